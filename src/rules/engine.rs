//! The sequential-game contract.
//!
//! A search algorithm, simulator or shell drives a game through these calls
//! only. Chance is explicit: at a chance node the game lists its outcomes
//! with probabilities and the driver picks one.
//!
//! ## Implementation Notes
//!
//! - `legal_actions`: ascending, distinct; memoised until the next mutation
//! - `apply_action`: panics on an action outside the legal set
//! - `chance_outcomes`: panics unless a chance node is to act
//! - `returns`: all zero until the game is terminal

use crate::core::{ActionId, Actor, PlayerMap};

/// A turn-based game with explicit chance nodes.
pub trait SequentialGame: Clone {
    /// Who acts next: a seat, chance, or nobody.
    fn current_player(&self) -> Actor;

    /// Legal actions for the actor, ascending.
    ///
    /// Takes `&mut self` because the result is cached until the state
    /// changes.
    fn legal_actions(&mut self) -> &[ActionId];

    /// Apply an action from the current legal set.
    fn apply_action(&mut self, action: ActionId);

    /// Chance outcomes and their probabilities, summing to 1.
    fn chance_outcomes(&self) -> Vec<(ActionId, f64)>;

    /// Per-seat payouts.
    fn returns(&self) -> PlayerMap<i64>;

    fn is_terminal(&self) -> bool {
        self.current_player() == Actor::Terminal
    }

    fn is_chance_node(&self) -> bool {
        self.current_player() == Actor::Chance
    }

    /// An independent deep copy.
    #[must_use]
    fn clone_state(&self) -> Self {
        self.clone()
    }
}
