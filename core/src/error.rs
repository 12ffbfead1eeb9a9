use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {0:?} are outside the board")]
    OutOfRange(Coord2),
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] Rejection),
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(#[from] ConfigIssue),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Action is not supported by this game")]
    Unsupported,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Why a rule set refused a move.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    #[error("cell is already occupied")]
    Occupied,
    #[error("placement captures no opposing stones")]
    NoCapture,
    #[error("tile is not next to the empty slot")]
    NotAdjacent,
    #[error("cell is flagged")]
    Flagged,
    #[error("cell is already revealed")]
    AlreadyRevealed,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigIssue {
    #[error("board dimensions must be positive")]
    EmptyBoard,
    #[error("win length {win_length} must be between 1 and {max}")]
    WinLength { win_length: Coord, max: Coord },
    #[error("board must be square")]
    NotSquare,
    #[error("board sides must be even and at least {min}")]
    UnevenSides { min: Coord },
    #[error("board sides must be at least {min}")]
    TooSmall { min: Coord },
    #[error("{mines} mines do not fit, at most {max} allowed")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("tiles are not a permutation of the board")]
    NotAPermutation,
    #[error("prepared {actual:?} board does not fit a {expected:?} game")]
    SizeMismatch { expected: Coord2, actual: Coord2 },
}
