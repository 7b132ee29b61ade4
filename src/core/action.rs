//! Action identifiers and history records.
//!
//! Every decision in the game, chance or player, is a single integer id.
//! The id space is split into disjoint ranges per phase:
//!
//! | range            | meaning                                  |
//! |------------------|------------------------------------------|
//! | `0..51`          | deal round that receives the face-up card |
//! | `51..105`        | dealt card identity                      |
//! | `105`            | pass (auction and play)                  |
//! | `106..=108`      | bid value                                |
//! | `109..26162`     | card combinations (see [`crate::combos`]) |
//!
//! The layout is fixed so that recorded action logs stay valid.

use serde::{Deserialize, Serialize};

use super::config::{NUM_BID_SLOTS, NUM_CARDS, NUM_DEALT_CARDS};
use super::error::GameError;
use super::state::Actor;
use crate::cards::Card;

/// First id of the dealt-card range; also the number of face-up positions.
pub const DEALING_ACTION_BASE: u32 = NUM_DEALT_CARDS as u32;

/// Base for bid ids: bid `b` is `BIDDING_ACTION_BASE + b`.
pub const BIDDING_ACTION_BASE: u32 = DEALING_ACTION_BASE + NUM_CARDS as u32;

/// First combination id.
pub const PLAY_ACTION_BASE: u32 = BIDDING_ACTION_BASE + 1 + NUM_BID_SLOTS as u32;

/// Integer action identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl ActionId {
    /// Pass, shared by the auction and play phases.
    pub const PASS: ActionId = ActionId(BIDDING_ACTION_BASE);

    /// Face-up position choice.
    #[must_use]
    pub const fn face_up(position: u8) -> Self {
        Self(position as u32)
    }

    /// Chance deal of a specific card.
    #[must_use]
    pub const fn deal(card: Card) -> Self {
        Self(DEALING_ACTION_BASE + card.0 as u32)
    }

    /// Bid of the given value (1-based).
    #[must_use]
    pub const fn bid(value: u8) -> Self {
        Self(BIDDING_ACTION_BASE + value as u32)
    }

    /// Play of the catalogue entry at `index`.
    #[must_use]
    pub const fn play(index: usize) -> Self {
        Self(PLAY_ACTION_BASE + index as u32)
    }

    /// Get the raw id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Decode the id into its kind. `play_count` is the catalogue size.
    pub fn kind(self, play_count: usize) -> Result<ActionKind, GameError> {
        let id = self.0;
        let kind = if id < DEALING_ACTION_BASE {
            ActionKind::FaceUpPosition(id as u8)
        } else if id < BIDDING_ACTION_BASE {
            ActionKind::Deal(Card((id - DEALING_ACTION_BASE) as u8))
        } else if id == BIDDING_ACTION_BASE {
            ActionKind::Pass
        } else if id < PLAY_ACTION_BASE {
            ActionKind::Bid((id - BIDDING_ACTION_BASE) as u8)
        } else if ((id - PLAY_ACTION_BASE) as usize) < play_count {
            ActionKind::Play((id - PLAY_ACTION_BASE) as usize)
        } else {
            return Err(GameError::UnknownAction(id));
        };
        Ok(kind)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decoded meaning of an [`ActionId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Deal round (0-based) whose card is turned face up.
    FaceUpPosition(u8),
    /// A specific card is dealt to the seat whose turn it is.
    Deal(Card),
    Pass,
    /// Bid value, 1-based.
    Bid(u8),
    /// Index into the combination catalogue.
    Play(usize),
}

/// A recorded action: who took it and which id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub actor: Actor,
    pub action: ActionId,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(actor: Actor, action: ActionId) -> Self {
        Self { actor, action }
    }
}
