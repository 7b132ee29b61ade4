//! Phase, actor, and public game information.
//!
//! ## PublicState
//!
//! Information every seat can observe:
//! - Phase, seat to act, first bidder and face-up card
//! - Landlord, winning bid, consecutive passes
//! - Bomb counter, per-seat play counters, played cards, hand sizes
//! - Terminal returns
//! - Action history
//!
//! The private side (hands, bottom, undealt cards) lives in
//! [`DouDizhuState`](crate::game::DouDizhuState).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Rank, RankCounts};

/// Game phase. `GameOver` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Deal,
    Auction,
    Play,
    GameOver,
}

/// Who acts next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// The dealer: outcomes come from [`chance_outcomes`](crate::rules::SequentialGame::chance_outcomes).
    Chance,
    Player(PlayerId),
    /// Nobody: the game is over.
    Terminal,
}

impl Actor {
    /// The seat, if a player is to act.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Actor::Player(p) => Some(p),
            _ => None,
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Actor::Chance => write!(f, "Chance"),
            Actor::Player(p) => write!(f, "{p}"),
            Actor::Terminal => write!(f, "Terminal"),
        }
    }
}

/// Public game state - observable by all seats.
///
/// History uses an `im` persistent vector so clones for search stay cheap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicState {
    /// Current phase.
    pub phase: Phase,

    /// Seat to act during the auction and play.
    pub current_player: PlayerId,

    /// Deal round chosen to turn its card face up.
    pub face_up_position: Option<u8>,

    /// Rank of the face-up card, once dealt.
    pub face_up_rank: Option<Rank>,

    /// Seat dealt the face-up card; bids first.
    pub first_player: Option<PlayerId>,

    /// Highest bidder so far; landlord once the auction resolves.
    pub landlord: Option<PlayerId>,

    /// Highest bid so far, 0 when nobody has bid.
    pub winning_bid: u8,

    /// Passes since the last bid or play.
    pub consecutive_passes: u8,

    /// Bombs and rockets played this game.
    pub bombs_played: u32,

    /// Non-pass plays per seat.
    pub hands_played: PlayerMap<u32>,

    /// Tricks closed so far.
    pub tricks_played: u32,

    /// All cards played so far, by rank.
    pub played_cards: RankCounts,

    /// Cards held per seat.
    pub hand_sizes: PlayerMap<u32>,

    /// Seat that emptied its hand.
    pub final_winner: Option<PlayerId>,

    /// Payouts; all zero until the game is over.
    pub returns: PlayerMap<i64>,

    /// Every applied action in order.
    pub history: Vector<ActionRecord>,
}

impl PublicState {
    /// Create the public state of a fresh game, before any card is dealt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Deal,
            current_player: PlayerId::new(0),
            face_up_position: None,
            face_up_rank: None,
            first_player: None,
            landlord: None,
            winning_bid: 0,
            consecutive_passes: 0,
            bombs_played: 0,
            hands_played: PlayerMap::with_value(0),
            tricks_played: 0,
            played_cards: RankCounts::new(),
            hand_sizes: PlayerMap::with_value(0),
            final_winner: None,
            returns: PlayerMap::with_value(0),
            history: Vector::new(),
        }
    }

    /// Who acts next.
    #[must_use]
    pub fn actor(&self) -> Actor {
        match self.phase {
            Phase::Deal => Actor::Chance,
            Phase::Auction | Phase::Play => Actor::Player(self.current_player),
            Phase::GameOver => Actor::Terminal,
        }
    }

    /// Record an action in history.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Actions recorded from index `start` onward, oldest first.
    pub fn history_since(&self, start: usize) -> impl Iterator<Item = &ActionRecord> {
        self.history.iter().skip(start)
    }
}

impl Default for PublicState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionId;

    #[test]
    fn test_public_state_new() {
        let state = PublicState::new();

        assert_eq!(state.phase, Phase::Deal);
        assert_eq!(state.actor(), Actor::Chance);
        assert_eq!(state.landlord, None);
        assert_eq!(state.winning_bid, 0);
        assert_eq!(state.returns.to_array(), [0, 0, 0]);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_actor_per_phase() {
        let mut state = PublicState::new();
        state.current_player = PlayerId::new(2);

        state.phase = Phase::Auction;
        assert_eq!(state.actor(), Actor::Player(PlayerId::new(2)));
        assert_eq!(state.actor().player(), Some(PlayerId::new(2)));

        state.phase = Phase::GameOver;
        assert_eq!(state.actor(), Actor::Terminal);
        assert_eq!(state.actor().player(), None);
    }

    #[test]
    fn test_clone_shares_no_history_mutation() {
        let mut state = PublicState::new();
        state.record_action(ActionRecord::new(Actor::Chance, ActionId(3)));

        let mut cloned = state.clone();
        cloned.record_action(ActionRecord::new(Actor::Chance, ActionId(60)));

        assert_eq!(state.history.len(), 1);
        assert_eq!(cloned.history.len(), 2);
        assert_eq!(state.history_since(0).count(), 1);
    }
}
