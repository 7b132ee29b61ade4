//! Game shape constants and runtime configuration.
//!
//! The table shape (three seats, a 54-card deck, a 3-card bottom) is fixed.
//! `GameConfig` holds the few rule knobs a caller may adjust; it is validated
//! once when a [`DouDizhu`](crate::game::DouDizhu) context is built.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Number of seats at the table.
pub const NUM_PLAYERS: usize = 3;

/// Standard ranks per suit (3 through 2).
pub const NUM_CARDS_PER_SUIT: usize = 13;

/// Number of suits.
pub const NUM_SUITS: usize = 4;

/// 13 standard ranks plus the two jokers.
pub const NUM_RANKS: usize = NUM_CARDS_PER_SUIT + 2;

/// Full deck: 52 standard cards plus two jokers.
pub const NUM_CARDS: usize = NUM_CARDS_PER_SUIT * NUM_SUITS + 2;

/// Cards dealt face-down to the bottom.
pub const NUM_CARDS_LEFT_OVER: usize = 3;

/// Cards dealt to players before the auction.
pub const NUM_DEALT_CARDS: usize = NUM_CARDS - NUM_CARDS_LEFT_OVER;

/// Number of bid slots in the action space. Never changes, so action ids stay stable.
pub const NUM_BID_SLOTS: u8 = 3;

/// Rule configuration.
///
/// ## Example
///
/// ```
/// use rust_doudizhu::core::GameConfig;
///
/// let config = GameConfig::default().with_max_bid(2).with_spring_bonus(false);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_utility(), 2 * 16384);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Highest bid a player may make. A bid of this value ends the auction.
    pub max_bid: u8,

    /// Whether the spring condition doubles the payout.
    pub spring_bonus: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_bid: NUM_BID_SLOTS,
            spring_bonus: true,
        }
    }
}

impl GameConfig {
    /// Set the highest bid.
    #[must_use]
    pub fn with_max_bid(mut self, max_bid: u8) -> Self {
        self.max_bid = max_bid;
        self
    }

    /// Enable or disable the spring doubling.
    #[must_use]
    pub fn with_spring_bonus(mut self, enabled: bool) -> Self {
        self.spring_bonus = enabled;
        self
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bid == 0 || self.max_bid > NUM_BID_SLOTS {
            return Err(ConfigError::MaxBidOutOfRange {
                got: self.max_bid,
                max: NUM_BID_SLOTS,
            });
        }
        Ok(())
    }

    /// Upper bound on any single player's return, for utility normalisation.
    #[must_use]
    pub fn max_utility(&self) -> i64 {
        i64::from(self.max_bid) * 16384
    }

    /// Lower bound on any single player's return. A losing landlord pays
    /// as much as a winning one collects.
    #[must_use]
    pub fn min_utility(&self) -> i64 {
        -self.max_utility()
    }

    /// Upper bound on the number of player decisions in one game.
    ///
    /// The auction lasts at most `3 * max_bid` turns; every play turn either
    /// removes at least one card or is one of at most two passes after a play.
    #[must_use]
    pub fn max_game_length(&self) -> usize {
        let auction = NUM_PLAYERS * usize::from(self.max_bid);
        let play = NUM_CARDS * NUM_PLAYERS;
        auction + play
    }
}
