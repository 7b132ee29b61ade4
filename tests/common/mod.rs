//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use rust_doudizhu::cards::{Card, RankCounts};
use rust_doudizhu::core::{ActionId, GameRng, NUM_DEALT_CARDS, NUM_PLAYERS};
use rust_doudizhu::game::{DouDizhu, DouDizhuState};
use rust_doudizhu::rules::resolve_chance;

/// One context for the whole test binary; the catalogue is built once.
pub fn game() -> &'static DouDizhu {
    static GAME: OnceLock<DouDizhu> = OnceLock::new();
    GAME.get_or_init(DouDizhu::default)
}

/// A new game with the deal sampled from `seed`, ready for the auction.
pub fn random_deal(seed: u64) -> DouDizhuState {
    let mut state = game().new_game();
    resolve_chance(&mut state, &mut GameRng::new(seed));
    state
}

/// Deal fixed hands.
///
/// `hands[seat]` is 17 cards in rank notation, or `""` to fill the seat with
/// the lowest cards left. `bottom` is 3 cards or `""` for whatever remains.
/// The face-up card is dealt in round `face_up`, so seat `face_up % 3` bids
/// first.
pub fn scripted_deal(face_up: u8, hands: [&str; NUM_PLAYERS], bottom: &str) -> DouDizhuState {
    let mut pool: Vec<Card> = Card::all().collect();
    let mut take = |text: &str| -> Vec<Card> {
        let counts: RankCounts = text.parse().unwrap();
        let mut cards = Vec::new();
        for (rank, n) in counts.iter() {
            for _ in 0..n {
                let i = pool
                    .iter()
                    .position(|c| c.rank() == rank)
                    .unwrap_or_else(|| panic!("no {rank} left for {text}"));
                cards.push(pool.remove(i));
            }
        }
        cards
    };

    let mut seats: [Vec<Card>; NUM_PLAYERS] = Default::default();
    for (seat, text) in hands.iter().enumerate() {
        if !text.is_empty() {
            seats[seat] = take(text);
            assert_eq!(seats[seat].len(), 17, "seat {seat} needs 17 cards");
        }
    }
    if !bottom.is_empty() {
        assert_eq!(take(bottom).len(), 3);
    }
    for (seat, text) in hands.iter().enumerate() {
        if text.is_empty() {
            seats[seat] = pool.drain(..17).collect();
        }
    }

    let mut state = game().new_game();
    state.apply_action(ActionId::face_up(face_up));
    for round in 0..NUM_DEALT_CARDS {
        state.apply_action(ActionId::deal(seats[round % NUM_PLAYERS][round / NUM_PLAYERS]));
    }
    state
}

/// Action id of the strongest reading of `cards`.
pub fn play_of(state: &DouDizhuState, cards: &str) -> ActionId {
    let counts: RankCounts = cards.parse().unwrap();
    state
        .catalog()
        .classify(&counts)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("{cards} is not a combination"))
}
