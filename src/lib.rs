//! # rust-doudizhu
//!
//! A three-player Dou Dizhu ("fight the landlord") engine for search and
//! simulation.
//!
//! ## Design Principles
//!
//! 1. **Explicit Chance**: The engine never rolls dice. Deal steps expose
//!    their outcome distribution and the driver picks one, so exact search
//!    can enumerate every continuation.
//!
//! 2. **Stable Action Ids**: Every decision is one integer. The id layout
//!    (face-up position, dealt card, pass, bids, combinations) never changes,
//!    so recorded logs stay valid.
//!
//! 3. **No Global State**: The combination catalogue lives in a `DouDizhu`
//!    context owned by the caller and shared by the games it creates.
//!
//! ## Architecture
//!
//! - **Rank Counts**: Suits never affect legality, so hands, plays, and the
//!   bottom are per-rank count vectors.
//!
//! - **Combination Catalogue**: All 26053 playable combinations are
//!   enumerated once, in id order, with a hash index from cards to ids.
//!
//! - **Cheap Clones**: History is an `im` persistent vector; the catalogue
//!   is behind an `Arc`.
//!
//! ## Modules
//!
//! - `core`: Seats, action ids, public state, RNG, configuration, errors
//! - `cards`: Cards, ranks, and rank-count vectors
//! - `combos`: Combination categories, the beating rule, and the catalogue
//! - `game`: The `DouDizhu` context and the game state machine
//! - `rules`: The `SequentialGame` contract and random playouts

pub mod cards;
pub mod combos;
pub mod core;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionId, ActionKind, ActionRecord, Actor, ConfigError, GameConfig, GameError, GameRng,
    Phase, PlayerId, PlayerMap, PublicState,
};

pub use crate::cards::{Card, Rank, RankCounts, Suit};

pub use crate::combos::{Category, ComboCatalog, Combination};

pub use crate::game::{DouDizhu, DouDizhuState, GameOutcome, Trick};

pub use crate::rules::{random_playout, SequentialGame};
