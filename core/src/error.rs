//! Error type for contract violations at the engine boundary.
//!
//! Every engine operation is deterministic, so none of these are retryable:
//! they signal that the caller handed the engine something outside its domain.

use thiserror::Error;

/// Errors raised when input to the engine is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A raw direction code or name that does not map to one of the four moves.
    #[error("invalid direction: {0}. Must be 0-3 (Up, Down, Left, Right) or a direction name")]
    InvalidDirection(String),

    /// A grid with no rows.
    #[error("grid must have at least one row")]
    EmptyGrid,

    /// A row whose length differs from the number of rows.
    #[error("grid is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// The grid size implied by the row count.
        expected: usize,
    },

    /// A side length whose cell count does not fit in `usize`.
    #[error("grid size {0} is too large")]
    TooLarge(usize),

    /// A non-empty cell holding something other than a power of two in `2..=MAX_TILE`.
    #[error(
        "invalid tile {value} at ({row}, {col}): tiles must be powers of two between 2 and {max}"
    )]
    InvalidTile {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The value found there.
        value: u32,
        /// Largest accepted tile.
        max: u32,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
