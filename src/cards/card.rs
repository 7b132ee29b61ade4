//! Card identities, suits and ranks.
//!
//! A card is an integer in `0..54`. Cards `0..52` have rank `card % 13` and
//! suit `card / 13`; card 52 is the black-and-white joker and card 53 the
//! coloured joker, each a rank of its own.

use serde::{Deserialize, Serialize};

use crate::core::{NUM_CARDS, NUM_CARDS_PER_SUIT, NUM_RANKS, NUM_SUITS};

/// Rank characters for the 13 standard ranks, weakest first.
pub const RANK_CHARS: &[u8; NUM_CARDS_PER_SUIT] = b"3456789TJQKA2";

/// Suit characters, indexed by suit.
const SUIT_CHARS: &[u8; NUM_SUITS] = b"CDHS";

/// A card rank, 0 (three) through 14 (coloured joker). Higher is stronger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const THREE: Rank = Rank(0);
    pub const ACE: Rank = Rank(11);
    pub const TWO: Rank = Rank(12);
    pub const BLACK_JOKER: Rank = Rank(13);
    pub const RED_JOKER: Rank = Rank(14);

    /// Iterate over all 15 ranks, weakest first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (0..NUM_RANKS as u8).map(Rank)
    }

    /// Get the raw rank index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        self.0 >= Self::BLACK_JOKER.0
    }

    /// Whether the rank may appear in a chain (3 through A).
    #[must_use]
    pub const fn is_chainable(self) -> bool {
        self.0 <= Self::ACE.0
    }

    /// Number of cards in the deck sharing this rank.
    #[must_use]
    pub const fn group_size(self) -> u8 {
        if self.is_joker() {
            1
        } else {
            NUM_SUITS as u8
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Rank::BLACK_JOKER => write!(f, "(BWJ)"),
            Rank::RED_JOKER => write!(f, "(CJ)"),
            Rank(r) => write!(f, "{}", RANK_CHARS[r as usize] as char),
        }
    }
}

/// Suit of a standard card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    const ALL: [Suit; NUM_SUITS] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// A card identity in `0..54`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(pub u8);

impl Card {
    /// Iterate over the whole deck.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..NUM_CARDS as u8).map(Card)
    }

    /// Build a standard card from rank and suit.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is a joker.
    #[must_use]
    pub fn new(rank: Rank, suit: Suit) -> Self {
        assert!(!rank.is_joker(), "Jokers have no suit");
        Card((suit as usize * NUM_CARDS_PER_SUIT) as u8 + rank.0)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub fn rank(self) -> Rank {
        rank_of(self)
    }

    /// Suit, or `None` for the jokers.
    #[must_use]
    pub fn suit(self) -> Option<Suit> {
        let index = self.index() / NUM_CARDS_PER_SUIT;
        Suit::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.suit() {
            Some(suit) => {
                let suit_char = SUIT_CHARS[suit as usize];
                write!(f, "{}{}", suit_char as char, self.rank())
            }
            None => write!(f, "{}", self.rank()),
        }
    }
}

/// Rank of a card.
#[must_use]
pub fn rank_of(card: Card) -> Rank {
    assert!(card.index() < NUM_CARDS, "Card id out of range");
    match card.index() {
        c if c == NUM_CARDS - 2 => Rank::BLACK_JOKER,
        c if c == NUM_CARDS - 1 => Rank::RED_JOKER,
        c => Rank((c % NUM_CARDS_PER_SUIT) as u8),
    }
}

/// Number of cards sharing a rank: 4 for standard ranks, 1 per joker.
#[must_use]
pub fn card_rank_group(rank: Rank) -> u8 {
    rank.group_size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_of() {
        assert_eq!(rank_of(Card(0)), Rank::THREE);
        assert_eq!(rank_of(Card(13)), Rank::THREE);
        assert_eq!(rank_of(Card(12)), Rank::TWO);
        assert_eq!(rank_of(Card(51)), Rank::TWO);
        assert_eq!(rank_of(Card(52)), Rank::BLACK_JOKER);
        assert_eq!(rank_of(Card(53)), Rank::RED_JOKER);
    }

    #[test]
    fn test_every_rank_group_matches_deck() {
        for rank in Rank::all() {
            let in_deck = Card::all().filter(|c| c.rank() == rank).count();
            assert_eq!(in_deck as u8, card_rank_group(rank), "rank {rank}");
        }
    }

    #[test]
    fn test_card_new_and_suit() {
        let card = Card::new(Rank::ACE, Suit::Hearts);
        assert_eq!(card, Card(2 * 13 + 11));
        assert_eq!(card.suit(), Some(Suit::Hearts));
        assert_eq!(card.rank(), Rank::ACE);
        assert_eq!(Card(52).suit(), None);

        for suit in [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades] {
            let card = Card::new(Rank::THREE, suit);
            assert_eq!(card.suit(), Some(suit));
            assert_eq!(card.index() % 13, 0);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Card(0).to_string(), "C3");
        assert_eq!(Card(3 * 13 + 7).to_string(), "ST");
        assert_eq!(Card(52).to_string(), "(BWJ)");
        assert_eq!(Card(53).to_string(), "(CJ)");
    }

    #[test]
    fn test_rank_predicates() {
        assert!(Rank::ACE.is_chainable());
        assert!(!Rank::TWO.is_chainable());
        assert!(!Rank::BLACK_JOKER.is_chainable());
        assert!(Rank::RED_JOKER.is_joker());
        assert!(!Rank::TWO.is_joker());
    }

    #[test]
    #[should_panic(expected = "Jokers have no suit")]
    fn test_joker_has_no_suit() {
        let _ = Card::new(Rank::RED_JOKER, Suit::Clubs);
    }
}
