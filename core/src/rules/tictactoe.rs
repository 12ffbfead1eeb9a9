use super::*;

/// Square board won by filling a whole row, column, or diagonal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TicTacToe;

impl TicTacToe {
    fn has_full_line(grid: &Grid<Stone>, mark: Stone) -> bool {
        let n = grid.rows();
        let owned = |coords: Coord2| grid[coords] == mark;

        let row = (0..n).any(|r| (0..n).all(|c| owned((r, c))));
        let col = (0..n).any(|c| (0..n).all(|r| owned((r, c))));
        let diagonal = (0..n).all(|i| owned((i, i)));
        let anti_diagonal = (0..n).all(|i| owned((i, n - 1 - i)));

        row || col || diagonal || anti_diagonal
    }
}

impl GridRules for TicTacToe {
    type Cell = Stone;
}

impl MoveValidator for TicTacToe {
    type Plan = ();

    fn validate(
        &self,
        grid: &Grid<Stone>,
        _player: Player,
        coords: Coord2,
    ) -> core::result::Result<(), Rejection> {
        validate_placement(grid, coords)
    }
}

impl TerminalDetector for TicTacToe {
    fn detect(&self, grid: &Grid<Stone>, mover: Player, _last: Coord2) -> Option<Outcome> {
        if Self::has_full_line(grid, Stone::from(mover)) {
            Some(Outcome::Win(mover))
        } else if is_board_full(grid) {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl Variant for TicTacToe {
    fn turn_order(&self) -> TurnOrder {
        TurnOrder::Alternating
    }

    fn check_board(&self, (rows, cols): Coord2) -> core::result::Result<(), ConfigIssue> {
        if rows != cols {
            return Err(ConfigIssue::NotSquare);
        }
        Ok(())
    }

    fn setup(&mut self, _grid: &mut Grid<Stone>) {}

    fn apply(&mut self, grid: &mut Grid<Stone>, player: Player, coords: Coord2, _plan: ()) -> Applied {
        grid[coords] = Stone::from(player);
        Applied::single(coords)
    }

    fn view(&self, grid: &Grid<Stone>, coords: Coord2) -> CellView {
        stone_view(grid[coords])
    }
}
