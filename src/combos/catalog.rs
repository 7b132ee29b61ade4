//! The combination catalogue: every playable combination, indexed by action id.
//!
//! Entries are grouped by category in [`Category::ALL`] order; inside a
//! category by chain length, then by lowest rank, then by kicker ranks. The
//! position of an entry plus [`PLAY_ACTION_BASE`](crate::core::action::PLAY_ACTION_BASE)
//! is its action id.
//!
//! Kicker rules:
//! - kickers never share a rank with the trios they attach to
//! - a trio's single kicker may be any other rank, jokers included
//! - pair kickers are distinct, non-joker ranks
//! - an airplane's single kickers may repeat a rank up to three times and
//!   include at most one joker

use std::ops::Range;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::combination::{Category, Combination};
use crate::cards::{Rank, RankCounts};
use crate::core::{ActionId, NUM_CARDS_PER_SUIT};

const SOLO_CHAIN_LENGTHS: std::ops::RangeInclusive<u8> = 5..=12;
const PAIR_CHAIN_LENGTHS: std::ops::RangeInclusive<u8> = 3..=10;
const AIRPLANE_LENGTHS: std::ops::RangeInclusive<u8> = 2..=6;
const AIRPLANE_WITH_SOLO_LENGTHS: std::ops::RangeInclusive<u8> = 2..=5;
const AIRPLANE_WITH_PAIR_LENGTHS: std::ops::RangeInclusive<u8> = 2..=4;

/// Most copies of one rank allowed among an airplane's single kickers.
const MAX_SOLO_KICKER_REPEAT: u8 = 3;

/// Every playable combination with lookup indexes.
///
/// Built once per [`DouDizhu`](crate::game::DouDizhu) context and shared
/// read-only between game states.
#[derive(Clone, Debug)]
pub struct ComboCatalog {
    combos: Vec<Combination>,

    /// Index range per category, in `Category::ALL` order.
    categories: Vec<Range<usize>>,

    /// Index range per (category, chain length).
    groups: FxHashMap<(Category, u8), Range<usize>>,

    /// Entries sharing the same cards.
    by_counts: FxHashMap<RankCounts, SmallVec<[usize; 2]>>,
}

impl ComboCatalog {
    /// Enumerate every combination.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = Builder::default();

        for rank in Rank::all() {
            builder.push_simple(Category::Single, rank, 1);
        }
        builder.end_category();

        for length in SOLO_CHAIN_LENGTHS {
            builder.push_chains(Category::SoloChain, length, 1);
        }
        builder.end_category();

        for rank in standard_ranks() {
            builder.push_simple(Category::Pair, rank, 2);
        }
        builder.end_category();

        for length in PAIR_CHAIN_LENGTHS {
            builder.push_chains(Category::PairChain, length, 2);
        }
        builder.end_category();

        for rank in standard_ranks() {
            builder.push_simple(Category::Trio, rank, 3);
        }
        builder.end_category();

        for trio in standard_ranks() {
            for kicker in Rank::all().filter(|&k| k != trio) {
                builder.push_with_kickers(Category::TrioWithSolo, 1, trio, 3, &[kicker], 1);
            }
        }
        builder.end_category();

        for trio in standard_ranks() {
            for kicker in standard_ranks().filter(|&k| k != trio) {
                builder.push_with_kickers(Category::TrioWithPair, 1, trio, 3, &[kicker], 2);
            }
        }
        builder.end_category();

        for length in AIRPLANE_LENGTHS {
            builder.push_chains(Category::Airplane, length, 3);
        }
        builder.end_category();

        for length in AIRPLANE_WITH_SOLO_LENGTHS {
            for start in chain_starts(length) {
                let chain = start..Rank(start.0 + length);
                let candidates: Vec<Rank> = Rank::all().filter(|r| !chain.contains(r)).collect();
                for kickers in solo_kicker_sets(&candidates, length) {
                    builder.push_with_kickers(
                        Category::AirplaneWithSolo,
                        length,
                        start,
                        3,
                        &kickers,
                        1,
                    );
                }
            }
        }
        builder.end_category();

        for length in AIRPLANE_WITH_PAIR_LENGTHS {
            for start in chain_starts(length) {
                let chain = start..Rank(start.0 + length);
                let candidates: Vec<Rank> =
                    standard_ranks().filter(|r| !chain.contains(r)).collect();
                for kickers in distinct_subsets(&candidates, length) {
                    builder.push_with_kickers(
                        Category::AirplaneWithPair,
                        length,
                        start,
                        3,
                        &kickers,
                        2,
                    );
                }
            }
        }
        builder.end_category();

        for rank in standard_ranks() {
            builder.push_simple(Category::Bomb, rank, 4);
        }
        builder.end_category();

        let mut rocket = Combination::simple(Category::Rocket, Rank::RED_JOKER, 1);
        rocket.counts.add(Rank::BLACK_JOKER, 1);
        builder.push(rocket);
        builder.end_category();

        builder.finish()
    }

    /// Number of combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.combos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Combination at a catalogue index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Combination> {
        self.combos.get(index)
    }

    /// Combination for a play action id.
    #[must_use]
    pub fn combination(&self, action: ActionId) -> Option<&Combination> {
        let index = action.raw().checked_sub(ActionId::play(0).raw())?;
        self.combos.get(index as usize)
    }

    /// Catalogue index range of a category.
    #[must_use]
    pub fn category_range(&self, category: Category) -> Range<usize> {
        self.categories[category.ordinal()].clone()
    }

    /// Action ids of every interpretation of exactly these cards.
    pub fn ids_for(&self, counts: &RankCounts) -> impl Iterator<Item = ActionId> + '_ {
        self.by_counts
            .get(counts)
            .into_iter()
            .flatten()
            .map(|&i| ActionId::play(i))
    }

    /// Every interpretation of the cards, in id order. Empty if illegal.
    #[must_use]
    pub fn classify_all(&self, counts: &RankCounts) -> Vec<(ActionId, &Combination)> {
        self.ids_for(counts)
            .map(|id| (id, &self.combos[(id.raw() - ActionId::play(0).raw()) as usize]))
            .collect()
    }

    /// The primary interpretation of the cards, or `None` if they form no
    /// legal combination.
    ///
    /// When cards read several ways the strongest reading wins: rocket, then
    /// bomb, then the highest strength key, ties going to the lower id.
    #[must_use]
    pub fn classify(&self, counts: &RankCounts) -> Option<(ActionId, &Combination)> {
        let strength = |c: &Combination| {
            (c.category == Category::Rocket, c.category == Category::Bomb, c.key)
        };
        let mut best: Option<(ActionId, &Combination)> = None;
        for (id, combo) in self.classify_all(counts) {
            if best.map_or(true, |(_, current)| strength(combo) > strength(current)) {
                best = Some((id, combo));
            }
        }
        best
    }

    /// Play actions available to `hand`, ascending.
    ///
    /// With no `winning` play every combination the hand holds is legal (a
    /// lead). Otherwise only plays that beat `winning` are returned. Pass is
    /// not included.
    #[must_use]
    pub fn legal_plays(&self, hand: &RankCounts, winning: Option<&Combination>) -> Vec<ActionId> {
        let holds = |combo: &Combination| hand.contains(&combo.counts);

        let Some(winning) = winning else {
            return self
                .combos
                .iter()
                .enumerate()
                .filter(|(_, c)| holds(c))
                .map(|(i, _)| ActionId::play(i))
                .collect();
        };

        let mut plays = Vec::new();
        if winning.category == Category::Rocket {
            return plays;
        }

        if winning.category != Category::Bomb {
            if let Some(group) = self.groups.get(&(winning.category, winning.length)) {
                plays.extend(
                    group
                        .clone()
                        .filter(|&i| self.combos[i].key > winning.key && holds(&self.combos[i]))
                        .map(ActionId::play),
                );
            }
        }

        plays.extend(
            self.category_range(Category::Bomb)
                .filter(|&i| {
                    let bomb = &self.combos[i];
                    holds(bomb) && bomb.beats(winning)
                })
                .map(ActionId::play),
        );
        plays.extend(
            self.category_range(Category::Rocket)
                .filter(|&i| holds(&self.combos[i]))
                .map(ActionId::play),
        );
        plays
    }
}

impl Default for ComboCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-joker ranks, 3 through 2.
fn standard_ranks() -> impl Iterator<Item = Rank> {
    (0..NUM_CARDS_PER_SUIT as u8).map(Rank)
}

/// Lowest links of every `length`-link chain, weakest first.
fn chain_starts(length: u8) -> impl Iterator<Item = Rank> {
    Rank::all().take_while(move |start| Rank(start.0 + length - 1).is_chainable())
}

/// Non-decreasing multisets of `size` single kickers drawn from `candidates`.
fn solo_kicker_sets(candidates: &[Rank], size: u8) -> Vec<SmallVec<[Rank; 5]>> {
    fn extend(
        candidates: &[Rank],
        from: usize,
        remaining: u8,
        current: &mut SmallVec<[Rank; 5]>,
        out: &mut Vec<SmallVec<[Rank; 5]>>,
    ) {
        if remaining == 0 {
            out.push(current.clone());
            return;
        }
        for i in from..candidates.len() {
            let rank = candidates[i];
            let repeats = current.iter().filter(|&&r| r == rank).count() as u8;
            let limit = if rank.is_joker() { 1 } else { MAX_SOLO_KICKER_REPEAT };
            if repeats >= limit {
                continue;
            }
            if rank == Rank::RED_JOKER && current.contains(&Rank::BLACK_JOKER) {
                continue;
            }
            current.push(rank);
            extend(candidates, i, remaining - 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(candidates, 0, size, &mut SmallVec::new(), &mut out);
    out
}

/// Strictly increasing subsets of `size` ranks drawn from `candidates`.
fn distinct_subsets(candidates: &[Rank], size: u8) -> Vec<SmallVec<[Rank; 5]>> {
    fn extend(
        candidates: &[Rank],
        from: usize,
        remaining: u8,
        current: &mut SmallVec<[Rank; 5]>,
        out: &mut Vec<SmallVec<[Rank; 5]>>,
    ) {
        if remaining == 0 {
            out.push(current.clone());
            return;
        }
        for i in from..candidates.len() {
            current.push(candidates[i]);
            extend(candidates, i + 1, remaining - 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(candidates, 0, size, &mut SmallVec::new(), &mut out);
    out
}

#[derive(Default)]
struct Builder {
    combos: Vec<Combination>,
    categories: Vec<Range<usize>>,
    category_start: usize,
}

impl Builder {
    fn push(&mut self, combo: Combination) {
        self.combos.push(combo);
    }

    fn push_simple(&mut self, category: Category, rank: Rank, width: u8) {
        self.push(Combination::simple(category, rank, width));
    }

    /// Every chain of `length` links of `width` cards.
    fn push_chains(&mut self, category: Category, length: u8, width: u8) {
        for start in chain_starts(length) {
            self.push_with_kickers(category, length, start, width, &[], 0);
        }
    }

    fn push_with_kickers(
        &mut self,
        category: Category,
        length: u8,
        start: Rank,
        width: u8,
        kickers: &[Rank],
        kicker_width: u8,
    ) {
        let mut counts = RankCounts::new();
        for link in start.0..start.0 + length {
            counts.add(Rank(link), width);
        }
        for &kicker in kickers {
            counts.add(kicker, kicker_width);
        }
        self.push(Combination {
            category,
            length,
            key: start,
            kickers: SmallVec::from_slice(kickers),
            counts,
        });
    }

    fn end_category(&mut self) {
        let end = self.combos.len();
        self.categories.push(self.category_start..end);
        self.category_start = end;
    }

    fn finish(self) -> ComboCatalog {
        debug_assert_eq!(self.categories.len(), Category::ALL.len());

        let mut groups: FxHashMap<(Category, u8), Range<usize>> = FxHashMap::default();
        let mut by_counts: FxHashMap<RankCounts, SmallVec<[usize; 2]>> = FxHashMap::default();
        for (i, combo) in self.combos.iter().enumerate() {
            groups
                .entry((combo.category, combo.length))
                .and_modify(|r| r.end = i + 1)
                .or_insert(i..i + 1);
            by_counts.entry(combo.counts).or_default().push(i);
        }

        ComboCatalog {
            combos: self.combos,
            categories: self.categories,
            groups,
            by_counts,
        }
    }
}
