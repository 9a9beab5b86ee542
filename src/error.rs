//! Error types for the connect-K engine

use thiserror::Error;

use crate::board::{Cell, Player};

/// Errors raised before a search starts or while building boards.
///
/// Running out of time is never an error: the search reports it through
/// `SearchResult::timed_out` and falls back to the last completed depth.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board dimensions: {width}x{height} cannot hold a line of {k}")]
    InvalidDimensions { width: usize, height: usize, k: usize },

    #[error("board has no empty cells left")]
    BoardFull,

    #[error("game is already over: {winner} has a completed line")]
    GameOver { winner: Player },

    #[error("invalid time budget: {ms} ms (must be positive)")]
    InvalidTimeBudget { ms: i64 },

    #[error("cell ({}, {}) is outside the board", .0.col, .0.row)]
    CellOutOfBounds(Cell),

    #[error("cell ({}, {}) is already occupied", .0.col, .0.row)]
    CellOccupied(Cell),

    #[error("cannot parse board at row {line}: {reason}")]
    ParseBoard { line: usize, reason: String },

    #[error("invalid player '{0}' (expected 1 or 2)")]
    InvalidPlayer(u8),

    #[error("invalid search parameters: {0}")]
    InvalidParams(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
