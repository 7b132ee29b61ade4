//! Card model: identities, ranks, and rank-count vectors.
//!
//! ## Key Types
//!
//! - `Card`: one of the 54 physical cards
//! - `Rank`: 13 standard ranks plus two joker ranks, ordered by strength
//! - `RankCounts`: per-rank counts for hands, plays and the bottom

pub mod card;
pub mod counts;

pub use card::{card_rank_group, rank_of, Card, Rank, Suit, RANK_CHARS};
pub use counts::RankCounts;
