//! Core engine types: seats, actions, public state, RNG, configuration, errors.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionId, ActionKind, ActionRecord};
pub use config::{
    GameConfig, NUM_BID_SLOTS, NUM_CARDS, NUM_CARDS_LEFT_OVER, NUM_CARDS_PER_SUIT, NUM_DEALT_CARDS,
    NUM_PLAYERS, NUM_RANKS, NUM_SUITS,
};
pub use error::{ConfigError, GameError};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{Actor, Phase, PublicState};
