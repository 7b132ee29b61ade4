//! Error types.
//!
//! Caller-contract violations surface as `GameError` from the checked entry
//! points (`try_apply_action`, `try_chance_outcomes`). The unchecked contract
//! calls turn the same errors into panics.

use thiserror::Error;

use super::action::ActionId;
use super::state::{Actor, Phase};

/// Errors raised by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The action is not in the current legal set.
    #[error("action {action} is not legal for {actor} during {phase:?}")]
    IllegalAction {
        action: ActionId,
        actor: Actor,
        phase: Phase,
    },

    /// Chance outcomes were requested while a player or nobody is to act.
    #[error("chance outcomes requested while {0} is to act")]
    NotChanceNode(Actor),

    /// An action was submitted after the game ended.
    #[error("game is over")]
    GameOver,

    /// The id lies outside the action space.
    #[error("action id {0} is outside the action space")]
    UnknownAction(u32),

    /// Card notation could not be parsed.
    #[error("invalid card notation {input:?}: {reason}")]
    ParseCards { input: String, reason: String },
}

/// Errors raised while validating a [`GameConfig`](super::GameConfig).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max bid must be in 1..={max}, got {got}")]
    MaxBidOutOfRange { got: u8, max: u8 },
}
