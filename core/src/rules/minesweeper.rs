use alloc::collections::VecDeque;
use hashbrown::HashSet;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Single-player minefield. Mines are laid on the first reveal, keeping the
/// revealed cell and its neighbors clear when there is room.
#[derive(Clone, Debug)]
pub struct Minesweeper {
    mines: CellCount,
    rng: SmallRng,
    start_tile: StartTile,
    fixed_layout: Option<MineLayout>,
    layout: Option<MineLayout>,
    detonated: bool,
}

impl Minesweeper {
    pub fn new(mines: CellCount, seed: u64) -> Self {
        Self {
            mines,
            rng: SmallRng::seed_from_u64(seed),
            start_tile: StartTile::AlwaysZero,
            fixed_layout: None,
            layout: None,
            detonated: false,
        }
    }

    /// Plays every game on `layout` instead of generating mines.
    pub fn with_layout(layout: MineLayout) -> Self {
        Self {
            mines: layout.mine_count(),
            fixed_layout: Some(layout),
            ..Self::new(0, 0)
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    /// Mines of the running game, `None` until the first reveal.
    pub fn layout(&self) -> Option<&MineLayout> {
        self.layout.as_ref()
    }
}

/// Opens `start` and, through zero cells, every connected safe cell.
/// Returns the newly revealed cells in visiting order.
fn flood_reveal(grid: &mut Grid<MineCell>, layout: &MineLayout, start: Coord2) -> Vec<Coord2> {
    let mut revealed = Vec::new();
    let mut visited: HashSet<Coord2> = HashSet::from([start]);
    let mut to_visit = VecDeque::from([start]);

    while let Some(coords) = to_visit.pop_front() {
        if grid[coords] != MineCell::Hidden {
            continue;
        }

        let adjacent_mines = layout.adjacent_mine_count(coords);
        grid[coords] = MineCell::Revealed(adjacent_mines);
        revealed.push(coords);

        if adjacent_mines == 0 {
            for pos in grid.iter_neighbors(coords) {
                if visited.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    log::trace!("Flood fill from {:?} revealed {} cells", start, revealed.len());
    revealed
}

impl GridRules for Minesweeper {
    type Cell = MineCell;
}

impl MoveValidator for Minesweeper {
    type Plan = ();

    fn validate(
        &self,
        grid: &Grid<MineCell>,
        _player: Player,
        coords: Coord2,
    ) -> core::result::Result<(), Rejection> {
        match grid[coords] {
            MineCell::Hidden => Ok(()),
            MineCell::Flagged => Err(Rejection::Flagged),
            MineCell::Revealed(_) | MineCell::Exploded => Err(Rejection::AlreadyRevealed),
        }
    }
}

impl TerminalDetector for Minesweeper {
    fn detect(&self, grid: &Grid<MineCell>, _mover: Player, last: Coord2) -> Option<Outcome> {
        if grid[last] == MineCell::Exploded {
            return Some(Outcome::Exploded);
        }
        let layout = self.layout.as_ref()?;
        let revealed = grid.count(|cell| matches!(cell, MineCell::Revealed(_)));
        (revealed == layout.safe_cell_count()).then_some(Outcome::Solved)
    }
}

impl Variant for Minesweeper {
    fn turn_order(&self) -> TurnOrder {
        TurnOrder::Solo
    }

    fn check_board(&self, size: Coord2) -> core::result::Result<(), ConfigIssue> {
        if let Some(layout) = &self.fixed_layout {
            if layout.size() != size {
                return Err(ConfigIssue::SizeMismatch {
                    expected: size,
                    actual: layout.size(),
                });
            }
        }
        // at least one safe cell to start from
        let max = mult(size.0, size.1) - 1;
        if self.mines > max {
            return Err(ConfigIssue::TooManyMines {
                mines: self.mines,
                max,
            });
        }
        Ok(())
    }

    fn setup(&mut self, _grid: &mut Grid<MineCell>) {
        self.layout = self.fixed_layout.clone();
        self.detonated = false;
    }

    fn apply(&mut self, grid: &mut Grid<MineCell>, _player: Player, coords: Coord2, _plan: ()) -> Applied {
        let (size, mines, start_tile) = (grid.size(), self.mines, self.start_tile);
        let rng = &mut self.rng;
        let layout = self.layout.get_or_insert_with(|| {
            log::debug!("Laying {} mines, first reveal at {:?}", mines, coords);
            RandomMineGenerator::new(rng.random(), coords, start_tile).generate(size, mines)
        });

        if layout.contains_mine(coords) {
            grid[coords] = MineCell::Exploded;
            self.detonated = true;
            return Applied::single(coords);
        }

        Applied {
            changed: flood_reveal(grid, layout, coords),
            flipped: Flips::new(),
        }
    }

    fn view(&self, grid: &Grid<MineCell>, coords: Coord2) -> CellView {
        match grid[coords] {
            MineCell::Hidden
                if self.detonated
                    && self
                        .layout
                        .as_ref()
                        .is_some_and(|layout| layout.contains_mine(coords)) =>
            {
                CellView::Mine
            }
            MineCell::Hidden => CellView::Hidden,
            MineCell::Flagged => CellView::Flagged,
            MineCell::Revealed(count) => CellView::Revealed(count),
            MineCell::Exploded => CellView::Exploded,
        }
    }
}

impl PlayEngine<Minesweeper> {
    /// Marks or unmarks a hidden cell. Revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.awaiting_player()?;

        Ok(match self.grid[coords] {
            MineCell::Hidden => {
                self.grid[coords] = MineCell::Flagged;
                MarkOutcome::Changed
            }
            MineCell::Flagged => {
                self.grid[coords] = MineCell::Hidden;
                MarkOutcome::Changed
            }
            MineCell::Revealed(_) | MineCell::Exploded => MarkOutcome::NoChange,
        })
    }

    pub fn flag_count(&self) -> CellCount {
        self.grid.count(|cell| cell == MineCell::Flagged)
    }

    /// Mines not yet accounted for by a flag; negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.variant.mine_count() as isize) - (self.flag_count() as isize)
    }
}
