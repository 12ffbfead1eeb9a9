use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row-major arrangement of a sliding puzzle: pieces `1..N` plus one empty
/// slot, where `N` is the number of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzlePermutation {
    size: Coord2,
    tiles: Vec<Tile>,
}

impl PuzzlePermutation {
    /// Pieces in order with the empty slot last.
    pub fn solved(size: Coord2) -> Self {
        let total = mult(size.0, size.1);
        let tiles = (1..total)
            .map(Tile::Piece)
            .chain(core::iter::once(Tile::Empty))
            .collect();
        Self { size, tiles }
    }

    pub fn from_tiles(size: Coord2, tiles: Vec<Tile>) -> Result<Self> {
        let total = usize::from(mult(size.0, size.1));
        if tiles.len() != total {
            return Err(ConfigIssue::NotAPermutation.into());
        }

        let mut seen = alloc::vec![false; total];
        for tile in &tiles {
            // slot 0 tracks the empty tile, piece `n` lives at slot `n`
            let slot = match *tile {
                Tile::Empty => 0,
                Tile::Piece(0) => return Err(ConfigIssue::NotAPermutation.into()),
                Tile::Piece(n) => usize::from(n),
            };
            if slot >= total || seen[slot] {
                return Err(ConfigIssue::NotAPermutation.into());
            }
            seen[slot] = true;
        }

        Ok(Self { size, tiles })
    }

    /// Image puzzles number pieces from 0 in solved order, the last number
    /// being the blank piece.
    pub fn from_image_indices(size: Coord2, indices: &[CellCount]) -> Result<Self> {
        let blank = mult(size.0, size.1).saturating_sub(1);
        let tiles = indices
            .iter()
            .map(|&index| {
                if index == blank {
                    Tile::Empty
                } else {
                    Tile::Piece(index.saturating_add(1))
                }
            })
            .collect();
        Self::from_tiles(size, tiles)
    }

    pub(crate) fn from_grid(grid: &Grid<Tile>) -> Self {
        Self {
            size: grid.size(),
            tiles: grid.iter().map(|(_, tile)| tile).collect(),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn image_indices(&self) -> Vec<CellCount> {
        let blank = mult(self.size.0, self.size.1) - 1;
        self.tiles
            .iter()
            .map(|tile| match *tile {
                Tile::Empty => blank,
                Tile::Piece(n) => n - 1,
            })
            .collect()
    }

    pub fn blank_index(&self) -> usize {
        self.tiles
            .iter()
            .position(|tile| tile.is_empty())
            .unwrap_or(self.tiles.len())
    }

    /// Position of the empty slot as `(row, col)`.
    pub fn blank_coords(&self) -> Coord2 {
        let cols = usize::from(self.size.1);
        let index = self.blank_index();
        ((index / cols) as Coord, (index % cols) as Coord)
    }

    /// Pairs of pieces in the wrong relative order, the empty slot ignored.
    pub fn inversions(&self) -> usize {
        let pieces: Vec<CellCount> = self
            .tiles
            .iter()
            .filter_map(|tile| match *tile {
                Tile::Piece(n) => Some(n),
                Tile::Empty => None,
            })
            .collect();

        pieces
            .iter()
            .enumerate()
            .map(|(i, &a)| pieces[i + 1..].iter().filter(|&&b| a > b).count())
            .sum()
    }

    /// Classical 15-puzzle theorem. Odd widths need an even inversion count.
    /// Even widths need `inversions + blank row counted from the bottom`
    /// (0-based) to be even.
    pub fn is_solvable(&self) -> bool {
        let (rows, cols) = self.size;
        let inversions = self.inversions();

        if cols % 2 == 1 {
            inversions % 2 == 0
        } else {
            let (blank_row, _) = self.blank_coords();
            let row_from_bottom = usize::from(rows - 1 - blank_row);
            (inversions + row_from_bottom) % 2 == 0
        }
    }

    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles.iter().enumerate().all(|(i, tile)| {
            if i == last {
                tile.is_empty()
            } else {
                *tile == Tile::Piece(i as CellCount + 1)
            }
        })
    }
}

/// Deals sliding puzzles by reshuffling the whole board until it is
/// solvable and not already in order.
#[derive(Clone, Debug)]
pub struct PuzzleShuffler {
    rng: SmallRng,
}

impl PuzzleShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn shuffle(&mut self, size: Coord2) -> Result<PuzzlePermutation> {
        if size.0 < 2 || size.1 < 2 {
            return Err(ConfigIssue::TooSmall { min: 2 }.into());
        }

        let mut permutation = PuzzlePermutation::solved(size);
        let mut attempts = 0u32;
        loop {
            permutation.tiles.shuffle(&mut self.rng);
            attempts += 1;
            if permutation.is_solvable() && !permutation.is_solved() {
                log::trace!("Shuffled {:?} puzzle after {} attempts", size, attempts);
                return Ok(permutation);
            }
        }
    }
}
