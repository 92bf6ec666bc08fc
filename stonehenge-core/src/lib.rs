//! Stonehenge Core - game engine and exact solver
//!
//! This crate provides the core logic for the Stonehenge ley-line game:
//! - Board geometry (triangular cell grid with precomputed ley-line tables)
//! - Immutable game state and capture resolution
//! - Terminal evaluation (game over, winner, legal moves)
//! - Exact minimax solvers (recursive and explicit-stack iterative)
//! - A bounded-lookahead rough-outcome heuristic

pub mod ai;
pub mod board;
pub mod error;
pub mod game;

// Re-exports for convenient access
pub use ai::{
    rough_outcome, rough_outcome_strategy, solve_iterative, solve_recursive, SearchOutcome, Value,
};
pub use board::{BoardGeometry, CellId, LeyLine, LineId, Orientation, MAX_SIZE, MIN_SIZE};
pub use error::GameError;
pub use game::{GameState, Player};
