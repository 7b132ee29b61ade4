//! The game: context object, state machine and its phase components.
//!
//! ## Key Types
//!
//! - `DouDizhu`: validated rules plus the shared combination catalogue;
//!   mints independent games
//! - `DouDizhuState`: one game, driven through [`SequentialGame`](crate::rules::SequentialGame)
//!
//! ## Phase components
//!
//! - `dealer`: face-up draw and the round-robin deal
//! - `auction`: bidding for the landlord seat
//! - `trick`: the trick in progress and its closure
//! - `scoring`: terminal payouts
//!
//! ## Example
//!
//! ```
//! use rust_doudizhu::core::{GameConfig, GameRng};
//! use rust_doudizhu::game::DouDizhu;
//! use rust_doudizhu::rules::random_playout;
//!
//! let game = DouDizhu::new(GameConfig::default()).unwrap();
//! let mut state = game.new_game();
//! let returns = random_playout(&mut state, &mut GameRng::new(1));
//! assert!(state.is_terminal());
//! assert_eq!(returns.values().sum::<i64>(), 0);
//! ```

pub mod auction;
pub mod dealer;
pub mod scoring;
pub mod state;
pub mod trick;

use std::sync::Arc;

use tracing::debug;

use crate::combos::ComboCatalog;
use crate::core::{action::PLAY_ACTION_BASE, ConfigError, GameConfig, NUM_CARDS};

pub use auction::AuctionStep;
pub use dealer::{DealtCard, Dealer, Deck};
pub use scoring::GameOutcome;
pub use state::DouDizhuState;
pub use trick::Trick;

/// A Dou Dizhu rule set and its combination catalogue.
///
/// Build one per process (or per configuration) and call
/// [`new_game`](Self::new_game) for each game. Games share the catalogue
/// through an `Arc`; dropping the context does not invalidate them.
#[derive(Clone, Debug)]
pub struct DouDizhu {
    config: GameConfig,
    catalog: Arc<ComboCatalog>,
}

impl DouDizhu {
    /// Validate `config` and build the catalogue.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = Arc::new(ComboCatalog::new());
        debug!(combinations = catalog.len(), max_bid = config.max_bid, "catalogue built");
        Ok(Self { config, catalog })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<ComboCatalog> {
        &self.catalog
    }

    /// A fresh game at the start of the deal.
    #[must_use]
    pub fn new_game(&self) -> DouDizhuState {
        DouDizhuState::new(self.config.clone(), Arc::clone(&self.catalog))
    }

    /// Size of the action space.
    #[must_use]
    pub fn num_distinct_actions(&self) -> usize {
        PLAY_ACTION_BASE as usize + self.catalog.len()
    }

    /// Largest chance outcome set (one per undealt card).
    #[must_use]
    pub fn max_chance_outcomes(&self) -> usize {
        NUM_CARDS
    }
}

impl Default for DouDizhu {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            catalog: Arc::new(ComboCatalog::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Actor;

    #[test]
    fn test_action_space_size() {
        let game = DouDizhu::default();
        assert_eq!(game.num_distinct_actions(), 26162);
        assert_eq!(game.max_chance_outcomes(), 54);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = DouDizhu::new(GameConfig::default().with_max_bid(5));
        assert!(matches!(result, Err(ConfigError::MaxBidOutOfRange { got: 5, .. })));
    }

    #[test]
    fn test_games_share_catalogue() {
        let game = DouDizhu::default();
        let a = game.new_game();
        let b = game.new_game();
        assert!(std::ptr::eq(a.catalog(), b.catalog()));
        assert_eq!(Arc::strong_count(game.catalog()), 3);
        assert_eq!(a.current_player(), Actor::Chance);
    }
}
