//! Move sources available to the CLI commands

use anyhow::Result;
use clap::ValueEnum;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use stonehenge_core::{
    rough_outcome_strategy, solve_iterative, solve_recursive, CellId, GameState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Exhaustive recursive minimax
    Recursive,
    /// Exhaustive minimax with an explicit work list
    Iterative,
    /// One/two-ply rough-outcome estimate
    Rough,
    /// Uniformly random legal move
    Random,
}

/// Ask a strategy for a move. `None` only at terminal states.
pub fn choose_move(
    kind: StrategyKind,
    state: &GameState,
    rng: &mut ChaCha8Rng,
) -> Result<Option<CellId>> {
    let mv = match kind {
        StrategyKind::Recursive => solve_recursive(state).best_move,
        StrategyKind::Iterative => solve_iterative(state)?.best_move,
        StrategyKind::Rough => rough_outcome_strategy(state),
        StrategyKind::Random => {
            let moves = state.legal_moves();
            if moves.is_empty() {
                None
            } else {
                Some(moves[rng.gen_range(0..moves.len())])
            }
        }
    };
    Ok(mv)
}
