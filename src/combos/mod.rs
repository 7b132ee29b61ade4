//! Card combinations: categories, the beating rule, and the catalogue that
//! maps every legal combination to a stable action id.
//!
//! ## Key Types
//!
//! - `Category`: the twelve combination kinds
//! - `Combination`: one concrete play (category, chain length, strength key, kickers)
//! - `ComboCatalog`: every combination in id order, with classification and
//!   legal-play lookup
//!
//! ## Ambiguous plays
//!
//! Some card multisets read as more than one combination (`333444555666` is a
//! four-link airplane or a three-link airplane with three kickers). Each
//! reading has its own id; [`ComboCatalog::classify`] picks the strongest.

pub mod catalog;
pub mod combination;

pub use catalog::ComboCatalog;
pub use combination::{Category, Combination};
