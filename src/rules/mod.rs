//! Game-driving contract and drivers.
//!
//! `SequentialGame` is the whole surface a driver sees: current actor,
//! legal actions, action application, chance outcomes, returns, and
//! cloning. The drivers here (`random_playout`, `resolve_chance`) work on
//! any implementation.

pub mod engine;
pub mod playout;

pub use engine::SequentialGame;
pub use playout::{random_playout, resolve_chance};
