//! Property tests over random games.
//!
//! - Card conservation at every step
//! - Zero-sum returns
//! - Auction bids strictly increase; passes never change the winning bid
//! - Tricks close exactly on the second consecutive pass after a play
//! - Classification ignores suits

mod common;

use proptest::prelude::*;

use common::game;
use rust_doudizhu::cards::{Card, RankCounts};
use rust_doudizhu::core::{ActionId, ActionKind, Actor, GameRng, Phase, NUM_CARDS};
use rust_doudizhu::game::DouDizhuState;

/// Play one random step: sample chance or pick a uniform legal action.
fn step(state: &mut DouDizhuState, rng: &mut GameRng) -> ActionId {
    let action = match state.current_player() {
        Actor::Chance => rng.sample_outcome(&state.chance_outcomes()),
        Actor::Player(_) => rng.choose(state.legal_actions()).copied(),
        Actor::Terminal => None,
    };
    let action = action.expect("non-terminal state offers an action");
    state.apply_action(action);
    action
}

fn conserved(state: &DouDizhuState) -> u32 {
    let held: u32 = rust_doudizhu::core::PlayerId::all()
        .map(|seat| state.hand(seat).total())
        .sum();
    let reserved = match state.phase() {
        Phase::Deal => NUM_CARDS as u32 - held,
        _ if state.bottom_awarded() => 0,
        _ => state.bottom().total(),
    };
    held + reserved + state.public().played_cards.total()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Hands, the bottom (until awarded) and played cards always total 54.
    #[test]
    fn prop_card_conservation(seed in any::<u64>()) {
        let mut state = game().new_game();
        let mut rng = GameRng::new(seed);
        while !state.is_terminal() {
            step(&mut state, &mut rng);
            if state.phase() != Phase::Deal {
                prop_assert_eq!(conserved(&state), NUM_CARDS as u32);
            }
        }
    }

    /// Scored games are zero-sum; unscored games pay nothing.
    #[test]
    fn prop_returns_zero_sum(seed in any::<u64>()) {
        let mut state = game().new_game();
        let returns = rust_doudizhu::rules::random_playout(&mut state, &mut GameRng::new(seed));

        prop_assert_eq!(returns.values().sum::<i64>(), 0);
        match state.public().landlord {
            Some(landlord) => {
                let outcome = state.outcome().expect("landlord games are scored");
                prop_assert_eq!(outcome.landlord, landlord);
                prop_assert!(returns[landlord] != 0);
                let config = game().config();
                prop_assert!(returns[landlord] <= config.max_utility());
                prop_assert!(returns[landlord] >= config.min_utility());
            }
            None => prop_assert_eq!(returns.to_array(), [0, 0, 0]),
        }
    }

    /// Accepted bids strictly increase and passes leave the winning bid alone.
    #[test]
    fn prop_auction_monotonic(seed in any::<u64>()) {
        let mut state = common::random_deal(seed);
        let mut rng = GameRng::new(seed ^ 0x5eed);
        let mut passes_in_a_row = 0;

        while state.phase() == Phase::Auction {
            let before = state.public().winning_bid;
            let action = step(&mut state, &mut rng);
            let after = state.public().winning_bid;

            match action.kind(state.catalog().len()) {
                Ok(ActionKind::Bid(value)) => {
                    prop_assert!(value > before);
                    prop_assert_eq!(after, value);
                    passes_in_a_row = 0;
                }
                Ok(ActionKind::Pass) => {
                    prop_assert_eq!(after, before);
                    passes_in_a_row += 1;
                }
                other => prop_assert!(false, "unexpected auction action {:?}", other),
            }
            prop_assert!(passes_in_a_row <= 3);
            if before > 0 {
                prop_assert!(passes_in_a_row <= 2);
            }
        }

        if state.public().landlord.is_none() {
            prop_assert_eq!(state.phase(), Phase::GameOver);
        } else {
            prop_assert_eq!(state.phase(), Phase::Play);
        }
    }

    /// A trick closes exactly when two passes follow the last play.
    #[test]
    fn prop_trick_closure(seed in any::<u64>()) {
        let mut state = common::random_deal(seed);
        let mut rng = GameRng::new(seed.rotate_left(17));
        let mut passes_since_play = 0;

        while !state.is_terminal() {
            let phase = state.phase();
            let tricks_before = state.public().tricks_played;
            let winner_before = state.trick().winner();
            let action = step(&mut state, &mut rng);
            if phase != Phase::Play {
                continue;
            }

            let tricks_after = state.public().tricks_played;
            if action == ActionId::PASS {
                passes_since_play += 1;
                let closed = passes_since_play == 2;
                prop_assert_eq!(tricks_after == tricks_before + 1, closed);
                if closed {
                    let winner = winner_before.expect("closed trick has a winner");
                    prop_assert_eq!(state.current_player(), Actor::Player(winner));
                    prop_assert!(state.trick().winner().is_none());
                    passes_since_play = 0;
                }
            } else {
                passes_since_play = 0;
                prop_assert_eq!(tricks_after, tricks_before);
            }
        }
    }

    /// Relabelling suits within ranks never changes classification.
    #[test]
    fn prop_classification_ignores_suits(
        picks in proptest::sample::subsequence((0..NUM_CARDS as u8).collect::<Vec<_>>(), 1..=8),
        rotation in 1usize..4,
    ) {
        let catalog = game().catalog();
        let cards: Vec<Card> = picks.iter().map(|&c| Card(c)).collect();
        let relabelled: Vec<Card> = cards
            .iter()
            .map(|&card| {
                if card.rank().is_joker() {
                    card
                } else {
                    let suit = (card.index() / 13 + rotation) % 4;
                    Card((suit * 13) as u8 + card.rank().0)
                }
            })
            .collect();

        let original = RankCounts::from_cards(cards);
        let renamed = RankCounts::from_cards(relabelled);
        let ids = |counts: &RankCounts| catalog.classify_all(counts).into_iter().map(|(id, _)| id).collect::<Vec<_>>();
        prop_assert_eq!(ids(&original), ids(&renamed));
        prop_assert_eq!(
            catalog.classify(&original).map(|(id, _)| id),
            catalog.classify(&renamed).map(|(id, _)| id)
        );
    }

    /// Legal plays are sorted, distinct, and always contained in the hand.
    #[test]
    fn prop_legal_actions_sorted_and_held(seed in any::<u64>()) {
        let mut state = common::random_deal(seed);
        let mut rng = GameRng::new(seed.wrapping_add(1));

        while !state.is_terminal() {
            let seat = state.current_player().player().expect("players act after the deal");
            let hand = *state.hand(seat);
            let legal = state.legal_actions().to_vec();
            prop_assert!(!legal.is_empty());
            prop_assert!(legal.windows(2).all(|w| w[0] < w[1]));
            if state.phase() == Phase::Play {
                for &id in &legal {
                    if let Some(combo) = state.catalog().combination(id) {
                        prop_assert!(hand.contains(&combo.counts));
                    }
                }
            }
            step(&mut state, &mut rng);
        }
    }
}
