//! Uniform random playouts.
//!
//! Chance nodes are sampled by their probabilities; player nodes pick a
//! legal action uniformly. Used by tests, benchmarks and the simulator.

use tracing::trace;

use super::engine::SequentialGame;
use crate::core::{Actor, GameRng, PlayerMap};

/// Play `state` to the end and return its payouts.
///
/// # Panics
///
/// Panics if a non-terminal node offers no action.
pub fn random_playout<G: SequentialGame>(state: &mut G, rng: &mut GameRng) -> PlayerMap<i64> {
    let mut steps = 0usize;
    loop {
        let actor = state.current_player();
        let action = match actor {
            Actor::Terminal => break,
            Actor::Chance => rng.sample_outcome(&state.chance_outcomes()),
            Actor::Player(_) => rng.choose(state.legal_actions()).copied(),
        };
        let Some(action) = action else {
            panic!("{actor} has no action to take");
        };
        state.apply_action(action);
        steps += 1;
    }

    trace!(steps, "playout finished");
    state.returns()
}

/// Apply sampled actions until the state leaves its chance nodes.
///
/// Returns the number of chance actions applied.
pub fn resolve_chance<G: SequentialGame>(state: &mut G, rng: &mut GameRng) -> usize {
    let mut applied = 0;
    while state.is_chance_node() {
        let Some(action) = rng.sample_outcome(&state.chance_outcomes()) else {
            break;
        };
        state.apply_action(action);
        applied += 1;
    }
    applied
}
