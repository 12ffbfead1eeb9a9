#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use rules::*;
pub use session::*;
pub use settings::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod rules;
mod session;
mod settings;
mod types;

/// Rule set of a game, with the parameters that are not board dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantKind {
    /// Gomoku style: first line of `win_length` stones wins.
    ConnectN { win_length: Coord },
    TicTacToe,
    Reversi,
    SlidingPuzzle { numbering: Numbering },
    Minesweeper { mines: CellCount },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn size(self) -> Coord2 {
        match self {
            Self::Easy => (9, 9),
            Self::Medium => (16, 16),
            Self::Hard => (16, 30),
        }
    }

    pub const fn mines(self) -> CellCount {
        match self {
            Self::Easy => 10,
            Self::Medium => 40,
            Self::Hard => 99,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: VariantKind,
    pub size: Coord2,
    pub first_player: Player,
    /// Seeds puzzle shuffles and mine placement.
    pub seed: u64,
}

impl GameConfig {
    pub const fn new(variant: VariantKind, size: Coord2) -> Self {
        Self {
            variant,
            size,
            first_player: Player::Black,
            seed: 0,
        }
    }

    pub const fn gomoku() -> Self {
        Self::new(
            VariantKind::ConnectN {
                win_length: ConnectN::GOMOKU_WIN_LENGTH,
            },
            (15, 15),
        )
    }

    pub const fn tic_tac_toe() -> Self {
        Self::new(VariantKind::TicTacToe, (3, 3))
    }

    pub const fn reversi() -> Self {
        Self::new(VariantKind::Reversi, (8, 8))
    }

    pub const fn sliding_puzzle(side: Coord) -> Self {
        Self::new(
            VariantKind::SlidingPuzzle {
                numbering: Numbering::Classic,
            },
            (side, side),
        )
    }

    pub const fn image_puzzle(side: Coord) -> Self {
        Self::new(
            VariantKind::SlidingPuzzle {
                numbering: Numbering::Image,
            },
            (side, side),
        )
    }

    pub const fn minesweeper(difficulty: Difficulty) -> Self {
        Self::new(
            VariantKind::Minesweeper {
                mines: difficulty.mines(),
            },
            difficulty.size(),
        )
    }

    pub const fn with_first_player(self, first_player: Player) -> Self {
        Self {
            first_player,
            ..self
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Same checks that [`new_game`] applies, without building the game.
    pub fn validate(&self) -> core::result::Result<(), ConfigIssue> {
        use crate::engine::validate_board;

        let size = self.size;
        match self.variant {
            VariantKind::ConnectN { win_length } => {
                validate_board(&ConnectN::new(win_length), size)
            }
            VariantKind::TicTacToe => validate_board(&TicTacToe, size),
            VariantKind::Reversi => validate_board(&Reversi, size),
            VariantKind::SlidingPuzzle { numbering } => {
                validate_board(&SlidingPuzzle::new(numbering, self.seed), size)
            }
            VariantKind::Minesweeper { mines } => {
                validate_board(&Minesweeper::new(mines, self.seed), size)
            }
        }
    }
}
