//! Terminal payouts.
//!
//! `multiplier = bid * 2^(bombs + spring)`. The landlord wins or loses twice
//! the multiplier; each farmer the opposite of the multiplier. Returns sum to
//! zero. A game with no landlord pays nothing.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, PlayerId, PlayerMap, PublicState};

/// How a finished game was settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub landlord: PlayerId,
    /// Seat that emptied its hand.
    pub winner: PlayerId,
    pub bid: u8,
    /// Bombs and rockets played.
    pub bombs: u32,
    /// Whether the spring doubling applied.
    pub spring: bool,
    pub multiplier: i64,
}

impl GameOutcome {
    #[must_use]
    pub fn landlord_won(&self) -> bool {
        self.winner == self.landlord
    }

    /// Per-seat payouts.
    #[must_use]
    pub fn returns(&self) -> PlayerMap<i64> {
        let sign = if self.landlord_won() { 1 } else { -1 };
        PlayerMap::new(|seat| {
            if seat == self.landlord {
                sign * 2 * self.multiplier
            } else {
                -sign * self.multiplier
            }
        })
    }
}

/// Spring: the landlord played exactly once, or neither farmer ever played.
#[must_use]
pub fn is_spring(landlord: PlayerId, hands_played: &PlayerMap<u32>) -> bool {
    let farmers_silent = PlayerId::all()
        .filter(|&seat| seat != landlord)
        .all(|seat| hands_played[seat] == 0);
    hands_played[landlord] == 1 || farmers_silent
}

/// Settle a finished game. `None` when there is no landlord or no winner yet.
#[must_use]
pub fn settle(public: &PublicState, config: &GameConfig) -> Option<GameOutcome> {
    let landlord = public.landlord?;
    let winner = public.final_winner?;

    let spring = config.spring_bonus && is_spring(landlord, &public.hands_played);
    let doublings = public.bombs_played + u32::from(spring);
    let multiplier = i64::from(public.winning_bid) << doublings;

    Some(GameOutcome {
        landlord,
        winner,
        bid: public.winning_bid,
        bombs: public.bombs_played,
        spring,
        multiplier,
    })
}
