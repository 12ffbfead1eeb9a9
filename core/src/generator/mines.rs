use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::*;

/// Hidden mine positions of a minefield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Grid<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Grid<bool>) -> Self {
        let mine_count = mine_mask.count(|is_mine| is_mine);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Grid<bool> = Grid::new(size);
        for &coords in mine_coords {
            mine_mask.set(coords, true)?;
        }
        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        self.mine_mask.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.mine_mask.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self.mine_mask[pos])
            .count() as u8
    }
}

/// Cells kept free of mines around the first reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTile {
    Random,
    SimpleSafe,
    AlwaysZero,
}

/// Purely random placement, except for an optional safe zone around the
/// start cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
        }
    }

    fn safe_zone(&self, mask: &Grid<bool>, start_tile: StartTile) -> Vec<Coord2> {
        match start_tile {
            StartTile::Random => Vec::new(),
            StartTile::SimpleSafe => alloc::vec![self.start],
            StartTile::AlwaysZero => core::iter::once(self.start)
                .chain(mask.iter_neighbors(self.start))
                .collect(),
        }
    }
}

impl MineLayoutGenerator for RandomMineGenerator {
    fn generate(self, size: Coord2, mines: CellCount) -> MineLayout {
        use StartTile::*;

        let mut mine_mask: Grid<bool> = Grid::new(size);
        let total_cells = mine_mask.total_cells();

        if mines >= total_cells {
            if mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    mines,
                    total_cells
                );
            }
            return MineLayout::from_mine_mask(Grid::filled(size, true));
        }

        let fits = |zone: usize| usize::from(mines) + zone <= usize::from(total_cells);
        let mut start_tile = self.start_tile;
        let mut zone = self.safe_zone(&mine_mask, start_tile);
        if start_tile == AlwaysZero && !fits(zone.len()) {
            log::warn!("Cannot make start tile zero, fallback to simple safe");
            start_tile = SimpleSafe;
            zone = self.safe_zone(&mine_mask, start_tile);
        }
        if start_tile == SimpleSafe && !fits(zone.len()) {
            log::warn!("Cannot make start tile safe, fallback to random");
            zone.clear();
        }

        let mut candidates: Vec<Coord2> = iter_coords(size)
            .filter(|coords| !zone.contains(coords))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, usize::from(mines));
        for &coords in chosen.iter() {
            mine_mask[coords] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        if layout.mine_count() != mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                mines
            );
        }
        layout
    }
}
