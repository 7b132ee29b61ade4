//! Chance-driven dealing.
//!
//! The first chance action picks which deal round's card is turned face up.
//! After that each chance action deals one undealt card, round-robin from
//! seat 0, until 51 cards are out. The three cards left in the deck become
//! the bottom. The seat that receives the face-up card bids first.

use crate::cards::{Card, RankCounts};
use crate::core::{
    ActionId, PlayerId, PlayerMap, NUM_CARDS, NUM_CARDS_LEFT_OVER, NUM_DEALT_CARDS,
};

/// Cards not yet dealt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    undealt: [bool; NUM_CARDS],
    remaining: usize,
}

impl Deck {
    /// A complete 54-card deck.
    #[must_use]
    pub fn full() -> Self {
        Self {
            undealt: [true; NUM_CARDS],
            remaining: NUM_CARDS,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.undealt.get(card.index()).copied().unwrap_or(false)
    }

    /// Remove a card from the deck.
    ///
    /// # Panics
    ///
    /// Panics if the card was already dealt.
    pub fn take(&mut self, card: Card) {
        assert!(self.contains(card), "Card {card} dealt twice");
        self.undealt[card.index()] = false;
        self.remaining -= 1;
    }

    /// Undealt cards in id order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        Card::all().filter(move |&c| self.undealt[c.index()])
    }

    /// Rank counts of the undealt cards.
    #[must_use]
    pub fn counts(&self) -> RankCounts {
        RankCounts::from_cards(self.cards())
    }
}

/// One dealt card and where it went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DealtCard {
    pub card: Card,
    pub seat: PlayerId,
    /// Deal round, 0-based.
    pub round: usize,
    /// Whether this was the face-up card.
    pub face_up: bool,
}

/// Dealing progress: the deck, the face-up round, and the hands as dealt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dealer {
    deck: Deck,
    face_up_position: Option<u8>,
    dealt: PlayerMap<RankCounts>,
}

impl Dealer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            deck: Deck::full(),
            face_up_position: None,
            dealt: PlayerMap::with_default(),
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn face_up_position(&self) -> Option<u8> {
        self.face_up_position
    }

    /// Cards dealt so far.
    #[must_use]
    pub fn rounds_dealt(&self) -> usize {
        NUM_CARDS - self.deck.remaining()
    }

    /// Whether every player card is out and only the bottom remains.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.deck.remaining() == NUM_CARDS_LEFT_OVER
    }

    /// Hand of `seat` as dealt, before any bottom or play.
    #[must_use]
    pub fn dealt_hand(&self, seat: PlayerId) -> &RankCounts {
        &self.dealt[seat]
    }

    /// Chance outcomes at the current step, uniform over the support.
    ///
    /// Ids are ascending. Empty once dealing is complete.
    #[must_use]
    pub fn outcomes(&self) -> Vec<(ActionId, f64)> {
        if self.face_up_position.is_none() {
            let p = 1.0 / NUM_DEALT_CARDS as f64;
            return (0..NUM_DEALT_CARDS as u8)
                .map(|position| (ActionId::face_up(position), p))
                .collect();
        }
        if self.is_complete() {
            return Vec::new();
        }
        let p = 1.0 / self.deck.remaining() as f64;
        self.deck.cards().map(|card| (ActionId::deal(card), p)).collect()
    }

    /// Fix the round whose card is dealt face up.
    ///
    /// # Panics
    ///
    /// Panics if the position was already chosen or is not a deal round.
    pub fn choose_face_up(&mut self, position: u8) {
        assert!(self.face_up_position.is_none(), "Face-up position chosen twice");
        assert!(usize::from(position) < NUM_DEALT_CARDS, "Face-up position out of range");
        self.face_up_position = Some(position);
    }

    /// Deal `card` to the seat whose round it is.
    ///
    /// # Panics
    ///
    /// Panics if the face-up position is unset, dealing is complete, or the
    /// card is not in the deck.
    pub fn deal(&mut self, card: Card) -> DealtCard {
        assert!(!self.is_complete(), "Deal already complete");
        let face_up_position = match self.face_up_position {
            Some(position) => usize::from(position),
            None => panic!("Card dealt before the face-up position was chosen"),
        };

        let round = self.rounds_dealt();
        let seat = PlayerId::from_index(round);
        self.deck.take(card);
        self.dealt[seat].add(card.rank(), 1);

        DealtCard {
            card,
            seat,
            round,
            face_up: round == face_up_position,
        }
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_up_outcomes() {
        let dealer = Dealer::new();
        let outcomes = dealer.outcomes();
        assert_eq!(outcomes.len(), 51);
        assert_eq!(outcomes[0].0, ActionId(0));
        assert_eq!(outcomes[50].0, ActionId(50));
        let total: f64 = outcomes.iter().map(|&(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_deal_outcomes_shrink() {
        let mut dealer = Dealer::new();
        dealer.choose_face_up(4);
        assert_eq!(dealer.outcomes().len(), 54);

        dealer.deal(Card(10));
        let outcomes = dealer.outcomes();
        assert_eq!(outcomes.len(), 53);
        assert!(outcomes.iter().all(|&(id, _)| id != ActionId::deal(Card(10))));
        assert!((outcomes[0].1 - 1.0 / 53.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_robin_and_face_up() {
        let mut dealer = Dealer::new();
        dealer.choose_face_up(4);

        let dealt: Vec<DealtCard> = (0..6).map(|c| dealer.deal(Card(c))).collect();
        let seats: Vec<u8> = dealt.iter().map(|d| d.seat.0).collect();
        assert_eq!(seats, vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(dealt.iter().filter(|d| d.face_up).count(), 1);
        assert!(dealt[4].face_up);
        assert_eq!(dealt[4].seat, PlayerId::new(1));
    }

    #[test]
    fn test_complete_deal_leaves_bottom() {
        let mut dealer = Dealer::new();
        dealer.choose_face_up(0);
        for c in 0..NUM_DEALT_CARDS as u8 {
            dealer.deal(Card(c));
        }

        assert!(dealer.is_complete());
        assert!(dealer.outcomes().is_empty());
        assert_eq!(dealer.deck().counts().to_string(), "2(BWJ)(CJ)");
        for seat in PlayerId::all() {
            assert_eq!(dealer.dealt_hand(seat).total(), 17);
        }
    }

    #[test]
    #[should_panic(expected = "dealt twice")]
    fn test_double_deal_panics() {
        let mut dealer = Dealer::new();
        dealer.choose_face_up(0);
        dealer.deal(Card(3));
        dealer.deal(Card(3));
    }
}
