use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

pub use connect::*;
pub use minesweeper::*;
pub use puzzle::*;
pub use reversi::*;
pub use tictactoe::*;

mod connect;
mod minesweeper;
mod puzzle;
mod reversi;
mod tictactoe;

/// Cells captured by a single reversi placement.
pub type Flips = SmallVec<[Coord2; 8]>;

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
    /// Puzzle put back in order, or every safe cell of a minefield revealed.
    Solved,
    /// A mine was revealed.
    Exploded,
}

impl Outcome {
    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::Win(player) => Some(player),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOrder {
    /// Players alternate, passing when the next one has no legal move.
    Alternating,
    /// A single player makes every move.
    Solo,
}

/// Cells touched by applying a move.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Applied {
    /// Every cell whose value changed, the target first.
    pub changed: Vec<Coord2>,
    /// Stones turned over by a reversi capture.
    pub flipped: Flips,
}

impl Applied {
    pub fn single(coords: Coord2) -> Self {
        Self {
            changed: alloc::vec![coords],
            flipped: Flips::new(),
        }
    }
}

pub trait GridRules {
    type Cell: Copy + Default + PartialEq + core::fmt::Debug;
}

pub trait MoveValidator: GridRules {
    /// What validation learned about a legal move, handed to `Variant::apply`.
    type Plan;

    fn validate(
        &self,
        grid: &Grid<Self::Cell>,
        player: Player,
        coords: Coord2,
    ) -> core::result::Result<Self::Plan, Rejection>;

    fn is_legal(&self, grid: &Grid<Self::Cell>, player: Player, coords: Coord2) -> bool {
        self.validate(grid, player, coords).is_ok()
    }

    fn has_legal_move(&self, grid: &Grid<Self::Cell>, player: Player) -> bool {
        iter_coords(grid.size()).any(|coords| self.is_legal(grid, player, coords))
    }

    fn legal_moves(&self, grid: &Grid<Self::Cell>, player: Player) -> Vec<Coord2> {
        iter_coords(grid.size())
            .filter(|&coords| self.is_legal(grid, player, coords))
            .collect()
    }
}

pub trait TerminalDetector: GridRules {
    /// Checks the position right after `mover` played at `last`.
    fn detect(&self, grid: &Grid<Self::Cell>, mover: Player, last: Coord2) -> Option<Outcome>;
}

/// A complete rule set the engine can drive.
pub trait Variant: MoveValidator + TerminalDetector {
    fn turn_order(&self) -> TurnOrder;

    /// Checks that a board of `size` (already known to be non-empty) can
    /// host this rule set.
    fn check_board(&self, size: Coord2) -> core::result::Result<(), ConfigIssue>;

    /// Prepares a fresh board; `grid` holds default cells on entry.
    fn setup(&mut self, grid: &mut Grid<Self::Cell>);

    fn apply(
        &mut self,
        grid: &mut Grid<Self::Cell>,
        player: Player,
        coords: Coord2,
        plan: Self::Plan,
    ) -> Applied;

    fn view(&self, grid: &Grid<Self::Cell>, coords: Coord2) -> CellView;
}

pub(crate) fn stone_view(stone: Stone) -> CellView {
    match stone.owner() {
        Some(player) => CellView::Stone(player),
        None => CellView::Empty,
    }
}

/// Placement rule shared by the line games.
pub(crate) fn validate_placement(
    grid: &Grid<Stone>,
    coords: Coord2,
) -> core::result::Result<(), Rejection> {
    if grid[coords].is_empty() {
        Ok(())
    } else {
        Err(Rejection::Occupied)
    }
}

pub(crate) fn is_board_full(grid: &Grid<Stone>) -> bool {
    grid.count(Stone::is_empty) == 0
}
