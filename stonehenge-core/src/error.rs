//! Typed failures surfaced by the core

use thiserror::Error;

/// Errors produced by geometry construction, the move engine, and the
/// iterative solver. None of these are retried; callers decide what is
/// recoverable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Board size outside the supported range. Fatal at setup time.
    #[error("unsupported board size {size} (must be 1..=5)")]
    Configuration { size: u8 },

    /// Move names a cell index that does not exist on this board.
    #[error("cell index {cell} is not on a size-{size} board")]
    UnknownCell { cell: u8, size: u8 },

    /// Move names a cell that already has an owner.
    #[error("cell {label} is already owned")]
    OccupiedCell { label: char },

    /// The iterative solver popped an empty work list. Under the expansion
    /// protocol this cannot happen; any occurrence is an internal invariant
    /// violation.
    #[error("search work list is empty")]
    EmptyWorklist,
}
