use serde::{Deserialize, Serialize};

use crate::CellCount;

/// Side taking turns in the two-player games. Black always opens unless a
/// game is configured otherwise; solo games only ever use Black.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::Black
    }
}

/// Cell of the placement games: gomoku, tic-tac-toe, and reversi.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Player::Black),
            Self::White => Some(Player::White),
        }
    }
}

impl Default for Stone {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Player> for Stone {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

/// Slot of a sliding puzzle. Pieces are numbered from 1 in solved order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Piece(CellCount),
}

impl Tile {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Empty
    }
}

/// Player-visible state of a minefield cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineCell {
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
}

impl MineCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for MineCell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Display form of any variant's cell, used by state snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Empty,
    Stone(Player),
    Piece(CellCount),
    Hidden,
    Flagged,
    Revealed(u8),
    /// Unflagged mine shown after the game was lost.
    Mine,
    Exploded,
}
