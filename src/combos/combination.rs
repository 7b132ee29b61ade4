//! Combination categories and the beating rule.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Rank, RankCounts};

/// Playable combination categories, in action-id order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Single,
    /// Five or more consecutive singles.
    SoloChain,
    Pair,
    /// Three or more consecutive pairs.
    PairChain,
    Trio,
    TrioWithSolo,
    TrioWithPair,
    /// Two or more consecutive trios.
    Airplane,
    AirplaneWithSolo,
    AirplaneWithPair,
    Bomb,
    Rocket,
}

impl Category {
    /// All categories in action-id order.
    pub const ALL: [Category; 12] = [
        Category::Single,
        Category::SoloChain,
        Category::Pair,
        Category::PairChain,
        Category::Trio,
        Category::TrioWithSolo,
        Category::TrioWithPair,
        Category::Airplane,
        Category::AirplaneWithSolo,
        Category::AirplaneWithPair,
        Category::Bomb,
        Category::Rocket,
    ];

    /// Position in [`Category::ALL`].
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Bombs and the rocket beat plays of other categories.
    #[must_use]
    pub fn is_bomb_like(self) -> bool {
        matches!(self, Category::Bomb | Category::Rocket)
    }
}

/// One playable combination: category, shape and strength.
///
/// The strength key is the rank of the lowest chain link (or the only rank
/// for non-chains). Kickers never affect strength.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub category: Category,

    /// Chain length; 1 for non-chain categories.
    pub length: u8,

    /// Strength key.
    pub key: Rank,

    /// Kicker ranks in ascending order, one entry per single or pair.
    pub kickers: SmallVec<[Rank; 5]>,

    /// Cards consumed by the play.
    pub counts: RankCounts,
}

impl Combination {
    /// Whether this combination may be played over `winning`.
    ///
    /// ```
    /// use rust_doudizhu::cards::Rank;
    /// use rust_doudizhu::combos::{Category, Combination};
    ///
    /// let pair_of_aces = Combination::simple(Category::Pair, Rank::ACE, 2);
    /// let bomb_of_threes = Combination::simple(Category::Bomb, Rank::THREE, 4);
    /// assert!(bomb_of_threes.beats(&pair_of_aces));
    /// assert!(!pair_of_aces.beats(&bomb_of_threes));
    /// ```
    #[must_use]
    pub fn beats(&self, winning: &Combination) -> bool {
        match (self.category, winning.category) {
            (_, Category::Rocket) => false,
            (Category::Rocket, _) => true,
            (Category::Bomb, Category::Bomb) => self.key > winning.key,
            (Category::Bomb, _) => true,
            (mine, theirs) => {
                mine == theirs && self.length == winning.length && self.key > winning.key
            }
        }
    }

    /// Number of cards in the play.
    #[must_use]
    pub fn card_count(&self) -> u32 {
        self.counts.total()
    }

    /// Cards of the chain or main rank, without kickers.
    #[must_use]
    pub fn main_counts(&self) -> RankCounts {
        let mut main = self.counts;
        let kicker_width = match self.category {
            Category::TrioWithPair | Category::AirplaneWithPair => 2,
            _ => 1,
        };
        for &kicker in &self.kickers {
            main.remove(kicker, kicker_width);
        }
        main
    }

    /// A kicker-free combination with `width` cards of `key` (single, pair, trio, bomb).
    #[must_use]
    pub fn simple(category: Category, key: Rank, width: u8) -> Self {
        let mut counts = RankCounts::new();
        counts.add(key, width);
        Self {
            category,
            length: 1,
            key,
            kickers: SmallVec::new(),
            counts,
        }
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kickers.is_empty() {
            return write!(f, "{}", self.counts);
        }
        // Main part first so ambiguous airplanes read unambiguously.
        let main = self.main_counts();
        let mut kicker_counts = self.counts;
        kicker_counts.remove_all(&main);
        write!(f, "{main}{kicker_counts}")
    }
}
