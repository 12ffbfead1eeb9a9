use serde::{Deserialize, Serialize};

use super::*;

/// How pieces are labelled in snapshots.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Numbering {
    /// Pieces `1..N` with a blank, as on a 15-puzzle.
    #[default]
    Classic,
    /// Picture fragments `0..N-1`, the last one being the blank.
    Image,
}

/// Sliding tile puzzle: a piece next to the empty slot slides into it and
/// the game is solved once every piece is back in order.
#[derive(Clone, Debug)]
pub struct SlidingPuzzle {
    numbering: Numbering,
    shuffler: PuzzleShuffler,
    blank: Coord2,
    start: Option<PuzzlePermutation>,
}

impl SlidingPuzzle {
    pub fn new(numbering: Numbering, seed: u64) -> Self {
        Self {
            numbering,
            shuffler: PuzzleShuffler::new(seed),
            blank: (0, 0),
            start: None,
        }
    }

    /// Always starts from `permutation` instead of dealing a shuffled board.
    pub fn with_permutation(numbering: Numbering, permutation: PuzzlePermutation) -> Self {
        Self {
            blank: permutation.blank_coords(),
            start: Some(permutation),
            ..Self::new(numbering, 0)
        }
    }

    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    pub fn blank(&self) -> Coord2 {
        self.blank
    }

    fn deal(&mut self, size: Coord2) -> PuzzlePermutation {
        if let Some(start) = &self.start {
            return start.clone();
        }
        // board sizes are validated before a puzzle is created
        self.shuffler
            .shuffle(size)
            .unwrap_or_else(|_| PuzzlePermutation::solved(size))
    }
}

impl GridRules for SlidingPuzzle {
    type Cell = Tile;
}

impl MoveValidator for SlidingPuzzle {
    /// The empty slot the piece moves into.
    type Plan = Coord2;

    fn validate(
        &self,
        _grid: &Grid<Tile>,
        _player: Player,
        coords: Coord2,
    ) -> core::result::Result<Coord2, Rejection> {
        if manhattan(coords, self.blank) == 1 {
            Ok(self.blank)
        } else {
            Err(Rejection::NotAdjacent)
        }
    }
}

impl TerminalDetector for SlidingPuzzle {
    fn detect(&self, grid: &Grid<Tile>, _mover: Player, _last: Coord2) -> Option<Outcome> {
        PuzzlePermutation::from_grid(grid)
            .is_solved()
            .then_some(Outcome::Solved)
    }
}

impl Variant for SlidingPuzzle {
    fn turn_order(&self) -> TurnOrder {
        TurnOrder::Solo
    }

    fn check_board(&self, size: Coord2) -> core::result::Result<(), ConfigIssue> {
        if size.0 < 2 || size.1 < 2 {
            return Err(ConfigIssue::TooSmall { min: 2 });
        }
        match &self.start {
            Some(start) if start.size() != size => Err(ConfigIssue::SizeMismatch {
                expected: size,
                actual: start.size(),
            }),
            _ => Ok(()),
        }
    }

    fn setup(&mut self, grid: &mut Grid<Tile>) {
        let permutation = self.deal(grid.size());
        for (coords, &tile) in iter_coords(grid.size()).zip(permutation.tiles()) {
            grid[coords] = tile;
        }
        self.blank = permutation.blank_coords();
    }

    fn apply(&mut self, grid: &mut Grid<Tile>, _player: Player, coords: Coord2, blank: Coord2) -> Applied {
        grid.swap(coords, blank);
        self.blank = coords;
        Applied {
            changed: alloc::vec![coords, blank],
            flipped: Flips::new(),
        }
    }

    fn view(&self, grid: &Grid<Tile>, coords: Coord2) -> CellView {
        match (grid[coords], self.numbering) {
            (Tile::Empty, _) => CellView::Empty,
            (Tile::Piece(n), Numbering::Classic) => CellView::Piece(n),
            (Tile::Piece(n), Numbering::Image) => CellView::Piece(n - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn dealt(puzzle: &mut SlidingPuzzle, size: Coord2) -> Grid<Tile> {
        let mut grid = Grid::new(size);
        puzzle.setup(&mut grid);
        grid
    }

    fn one_move_from_solved() -> PuzzlePermutation {
        let mut tiles: Vec<Tile> = PuzzlePermutation::solved((3, 3)).tiles().to_vec();
        tiles.swap(7, 8);
        PuzzlePermutation::from_tiles((3, 3), tiles).unwrap()
    }

    #[test]
    fn only_orthogonal_neighbors_of_blank_slide() {
        let mut puzzle = SlidingPuzzle::with_permutation(Numbering::Classic, one_move_from_solved());
        let grid = dealt(&mut puzzle, (3, 3));

        assert_eq!(puzzle.blank(), (2, 1));
        assert_eq!(puzzle.legal_moves(&grid, Player::Black), [(1, 1), (2, 0), (2, 2)]);
        assert_eq!(
            puzzle.validate(&grid, Player::Black, (1, 2)),
            Err(Rejection::NotAdjacent)
        );
        assert_eq!(
            puzzle.validate(&grid, Player::Black, (2, 1)),
            Err(Rejection::NotAdjacent)
        );
    }

    #[test]
    fn sliding_last_piece_home_solves() {
        let mut puzzle = SlidingPuzzle::with_permutation(Numbering::Classic, one_move_from_solved());
        let mut grid = dealt(&mut puzzle, (3, 3));
        assert_eq!(puzzle.detect(&grid, Player::Black, (2, 1)), None);

        let blank = puzzle.validate(&grid, Player::Black, (2, 2)).unwrap();
        let applied = puzzle.apply(&mut grid, Player::Black, (2, 2), blank);

        assert_eq!(applied.changed, [(2, 2), (2, 1)]);
        assert_eq!(grid[(2, 1)], Tile::Piece(8));
        assert_eq!(puzzle.blank(), (2, 2));
        assert_eq!(
            puzzle.detect(&grid, Player::Black, (2, 2)),
            Some(Outcome::Solved)
        );
    }

    #[test]
    fn dealt_board_is_a_solvable_shuffle() {
        let mut puzzle = SlidingPuzzle::new(Numbering::Classic, 11);
        let grid = dealt(&mut puzzle, (4, 4));
        let permutation = PuzzlePermutation::from_grid(&grid);

        assert!(permutation.is_solvable());
        assert!(!permutation.is_solved());
        assert_eq!(grid[puzzle.blank()], Tile::Empty);
    }

    #[test]
    fn prepared_board_must_match_the_game_size() {
        let puzzle = SlidingPuzzle::with_permutation(Numbering::Classic, PuzzlePermutation::solved((2, 2)));

        assert_eq!(
            PlayEngine::new(puzzle, (4, 4), Player::Black).err(),
            Some(GameError::InvalidConfig(ConfigIssue::SizeMismatch {
                expected: (4, 4),
                actual: (2, 2),
            }))
        );
        assert_eq!(
            PlayEngine::new(SlidingPuzzle::new(Numbering::Classic, 0), (1, 3), Player::Black).err(),
            Some(GameError::InvalidConfig(ConfigIssue::TooSmall { min: 2 }))
        );
    }

    #[test]
    fn image_numbering_counts_from_zero() {
        let mut puzzle = SlidingPuzzle::with_permutation(Numbering::Image, one_move_from_solved());
        let grid = dealt(&mut puzzle, (3, 3));

        assert_eq!(puzzle.view(&grid, (0, 0)), CellView::Piece(0));
        assert_eq!(puzzle.view(&grid, (2, 2)), CellView::Piece(7));
        assert_eq!(puzzle.view(&grid, (2, 1)), CellView::Empty);
    }
}
