//! Rank-count vectors: how many cards of each rank a hand or play holds.
//!
//! Suits never matter for legality, so hands, the bottom, plays and the
//! played-card pile are all `RankCounts`.
//!
//! ## Notation
//!
//! Ranks print as `3456789TJQKA2` (one character per card) followed by
//! `(BWJ)` and `(CJ)` for the jokers. The same notation parses back:
//!
//! ```
//! use rust_doudizhu::cards::{Rank, RankCounts};
//!
//! let hand: RankCounts = "3334 4(BWJ)".parse().unwrap();
//! assert_eq!(hand.get(Rank::THREE), 3);
//! assert_eq!(hand.total(), 6);
//! assert_eq!(hand.to_string(), "33344(BWJ)");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::card::{Card, Rank, RANK_CHARS};
use crate::core::{GameError, NUM_RANKS};

/// Cards held per rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankCounts([u8; NUM_RANKS]);

impl RankCounts {
    /// Empty count vector.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; NUM_RANKS])
    }

    /// Count the ranks of a set of cards.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut counts = Self::new();
        for card in cards {
            counts.add(card.rank(), 1);
        }
        counts
    }

    /// Count for one rank.
    #[must_use]
    pub const fn get(&self, rank: Rank) -> u8 {
        self.0[rank.index()]
    }

    /// Add `n` cards of `rank`.
    ///
    /// # Panics
    ///
    /// Panics if the result exceeds the rank's multiplicity.
    pub fn add(&mut self, rank: Rank, n: u8) {
        let slot = &mut self.0[rank.index()];
        *slot += n;
        assert!(*slot <= rank.group_size(), "Rank {rank} over multiplicity");
    }

    /// Remove `n` cards of `rank`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `n` are held.
    pub fn remove(&mut self, rank: Rank, n: u8) {
        let slot = &mut self.0[rank.index()];
        assert!(*slot >= n, "Rank {rank} count underflow");
        *slot -= n;
    }

    /// Add every card of `other`.
    pub fn add_all(&mut self, other: &RankCounts) {
        for (rank, n) in other.iter() {
            self.add(rank, n);
        }
    }

    /// Remove every card of `other`.
    pub fn remove_all(&mut self, other: &RankCounts) {
        for (rank, n) in other.iter() {
            self.remove(rank, n);
        }
    }

    /// Whether every card of `other` is held here.
    #[must_use]
    pub fn contains(&self, other: &RankCounts) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(have, need)| have >= need)
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&n| u32::from(n)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Iterate over ranks with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, u8)> + '_ {
        Rank::all()
            .map(move |r| (r, self.0[r.index()]))
            .filter(|&(_, n)| n > 0)
    }
}

impl std::fmt::Display for RankCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (rank, n) in self.iter() {
            for _ in 0..n {
                write!(f, "{rank}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for RankCounts {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| GameError::ParseCards {
            input: input.to_string(),
            reason,
        };

        let mut counts = [0u8; NUM_RANKS];
        let mut rest = input;
        while let Some(c) = rest.chars().next() {
            let (rank, consumed) = if c.is_whitespace() {
                rest = &rest[c.len_utf8()..];
                continue;
            } else if rest.starts_with("(BWJ)") {
                (Rank::BLACK_JOKER, 5)
            } else if rest.starts_with("(CJ)") {
                (Rank::RED_JOKER, 4)
            } else {
                let upper = u8::try_from(c.to_ascii_uppercase()).ok();
                match RANK_CHARS.iter().position(|&r| Some(r) == upper) {
                    Some(index) => (Rank(index as u8), c.len_utf8()),
                    None => return Err(error(format!("unknown rank character {c:?}"))),
                }
            };

            counts[rank.index()] += 1;
            if counts[rank.index()] > rank.group_size() {
                return Err(error(format!("too many cards of rank {rank}")));
            }
            rest = &rest[consumed..];
        }

        Ok(Self(counts))
    }
}
