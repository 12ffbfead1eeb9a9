use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board of cells, indexed by `(row, col)`.
///
/// Indexing with `[]` panics on out-of-range coordinates and is meant for
/// positions already checked with [`Grid::validate_coords`]; the
/// `get`/`set` accessors report [`GameError::OutOfRange`] instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(size: Coord2, value: T) -> Self {
        Self {
            cells: Array2::from_elem(size.to_nd_index(), value),
        }
    }

    pub fn from_fn(size: Coord2, mut f: impl FnMut(Coord2) -> T) -> Self {
        Self {
            cells: Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
                f((row as Coord, col as Coord))
            }),
        }
    }

    /// Builds a grid from row-major cells, `None` if the length does not match.
    pub fn from_row_major(size: Coord2, cells: impl IntoIterator<Item = T>) -> Option<Self> {
        let cells: Vec<T> = cells.into_iter().collect();
        Array2::from_shape_vec(size.to_nd_index(), cells)
            .ok()
            .map(|cells| Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        // dimensions always come from a `Coord2`
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange(coords))
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<T> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Writes a single cell, returning its previous value.
    pub fn set(&mut self, coords: Coord2, value: T) -> Result<T> {
        let coords = self.validate_coords(coords)?;
        Ok(core::mem::replace(&mut self[coords], value))
    }

    pub fn swap(&mut self, a: Coord2, b: Coord2) {
        self.cells.swap(a.to_nd_index(), b.to_nd_index());
    }

    /// Cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, T)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn count(&self, mut pred: impl FnMut(T) -> bool) -> CellCount {
        self.cells.iter().filter(|&&cell| pred(cell)).count() as CellCount
    }

    pub fn position(&self, mut pred: impl FnMut(T) -> bool) -> Option<Coord2> {
        self.iter()
            .find(|&(_, cell)| pred(cell))
            .map(|(coords, _)| coords)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn ray(&self, origin: Coord2, delta: Delta) -> Ray {
        Ray::new(origin, delta, self.size())
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.cells
    }
}

impl<T> Index<Coord2> for Grid<T> {
    type Output = T;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl<T> IndexMut<Coord2> for Grid<T> {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_access_is_reported() {
        let mut grid: Grid<Stone> = Grid::new((3, 4));

        assert_eq!(grid.get((3, 0)), Err(GameError::OutOfRange((3, 0))));
        assert_eq!(
            grid.set((0, 4), Stone::Black),
            Err(GameError::OutOfRange((0, 4)))
        );
        assert!(grid.iter().all(|(_, cell)| cell == Stone::Empty));
    }

    #[test]
    fn set_touches_a_single_cell() {
        let mut grid: Grid<Stone> = Grid::new((2, 2));

        assert_eq!(grid.set((1, 0), Stone::White), Ok(Stone::Empty));
        assert_eq!(grid.get((1, 0)), Ok(Stone::White));
        assert_eq!(grid.count(|cell| cell == Stone::Empty), 3);
    }

    #[test]
    fn dimensions_follow_rows_then_cols() {
        let grid = Grid::filled((2, 5), Tile::Empty);

        assert_eq!(grid.size(), (2, 5));
        assert_eq!(grid.total_cells(), 10);
        assert!(grid.in_bounds((1, 4)));
        assert!(!grid.in_bounds((4, 1)));
    }

    #[test]
    fn from_row_major_checks_length() {
        let grid = Grid::from_row_major((1, 3), [1u8, 2, 3]).unwrap();
        assert_eq!(grid[(0, 2)], 3);
        assert!(Grid::from_row_major((2, 2), [1u8, 2, 3]).is_none());
    }
}
