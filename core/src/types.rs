/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for cell totals, mine counts, and puzzle piece numbers.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Row and column step of a ray scan.
pub type Delta = (i8, i8);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// All eight king-move directions.
pub const NEIGHBOR_DELTAS: [Delta; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One half of each line axis: horizontal, vertical, and both diagonals.
/// The other half of an axis is the negated delta.
pub const AXIS_DELTAS: [Delta; 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

pub const fn negate((dr, dc): Delta) -> Delta {
    (-dr, -dc)
}

/// Manhattan distance between two cells.
pub const fn manhattan(a: Coord2, b: Coord2) -> u16 {
    (a.0.abs_diff(b.0) as u16) + (a.1.abs_diff(b.1) as u16)
}

/// Row-major iteration over every coordinate of a board of `size`.
pub fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: Delta, bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(dr)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dc)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= NEIGHBOR_DELTAS.len() {
                return None;
            }

            let next_item = apply_delta(
                self.center,
                NEIGHBOR_DELTAS[self.index as usize],
                self.bounds,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Walks from an origin cell in one direction until the board edge.
/// The origin itself is not yielded.
#[derive(Debug)]
pub struct Ray {
    current: Option<Coord2>,
    delta: Delta,
    bounds: Coord2,
}

impl Ray {
    pub(crate) fn new(origin: Coord2, delta: Delta, bounds: Coord2) -> Self {
        Self {
            current: apply_delta(origin, delta, bounds),
            delta,
            bounds,
        }
    }
}

impl Iterator for Ray {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let coords = self.current?;
        self.current = apply_delta(coords, self.delta, self.bounds);
        Some(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((2, 2), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn ray_stops_at_board_edge() {
        let mut ray = Ray::new((1, 1), (1, 1), (4, 4));
        assert_eq!(ray.next(), Some((2, 2)));
        assert_eq!(ray.next(), Some((3, 3)));
        assert_eq!(ray.next(), None);

        assert_eq!(Ray::new((0, 2), (-1, 0), (4, 4)).next(), None);
    }

    #[test]
    fn coords_are_row_major() {
        let mut coords = iter_coords((2, 3));
        assert_eq!(coords.next(), Some((0, 0)));
        assert_eq!(coords.next(), Some((0, 1)));
        assert_eq!(coords.nth(1), Some((1, 0)));
        assert_eq!(coords.count(), 2);
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        assert_eq!(manhattan((0, 0), (0, 1)), 1);
        assert_eq!(manhattan((2, 1), (1, 1)), 1);
        assert_eq!(manhattan((0, 0), (1, 1)), 2);
    }
}
