//! Error types for the search core

use thiserror::Error;

/// Main error type for the search core.
///
/// "No solution" is not an error: graph search reports it through
/// [`crate::search::Outcome::NoSolution`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("puzzle string has wrong length: expected {expected} cells, got {got} in '{input}'")]
    InvalidLength {
        expected: usize,
        got: usize,
        input: String,
    },

    #[error("invalid tile '{tile}' at position {position} in '{input}'")]
    InvalidTile {
        tile: char,
        position: usize,
        input: String,
    },

    #[error("tile '{tile}' appears more than once in '{input}'")]
    DuplicateTile { tile: char, input: String },

    #[error("unknown move '{input}' (expected one of: up, down, left, right)")]
    UnknownMove { input: String },

    #[error("move {step} ({action}) leaves the board from '{board}'")]
    IllegalMove {
        step: usize,
        action: String,
        board: String,
    },

    #[error("unknown search strategy '{input}'. Expected one of: {expected}")]
    UnknownStrategy { input: String, expected: String },

    #[error("unknown heuristic '{input}'. Expected one of: {expected}")]
    UnknownHeuristic { input: String, expected: String },

    #[error("invalid character '{character}' at position {position} in '{input}'")]
    InvalidCell {
        character: char,
        position: usize,
        input: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("non-terminal state '{state}' has no legal moves")]
    NoLegalMoves { state: String },

    #[error("game already over")]
    GameOver,

    #[error("search depth must be at least one ply")]
    ZeroDepth,

    #[error("search budget exhausted after visiting {visited} states")]
    BudgetExhausted { visited: u64 },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
