use super::*;

/// Line-forming placement game such as gomoku: any empty cell is playable
/// and a run of `win_length` stones through the last placement wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConnectN {
    win_length: Coord,
}

impl ConnectN {
    pub const GOMOKU_WIN_LENGTH: Coord = 5;

    pub const fn new(win_length: Coord) -> Self {
        Self { win_length }
    }

    pub const fn win_length(&self) -> Coord {
        self.win_length
    }
}

/// Length of the run of `stone` through `origin` along one axis, counting
/// `origin` itself plus the contiguous cells forward and backward.
pub fn run_length(grid: &Grid<Stone>, origin: Coord2, delta: Delta, stone: Stone) -> CellCount {
    let forward = grid
        .ray(origin, delta)
        .take_while(|&coords| grid[coords] == stone)
        .count();
    let backward = grid
        .ray(origin, negate(delta))
        .take_while(|&coords| grid[coords] == stone)
        .count();
    (1 + forward + backward) as CellCount
}

impl GridRules for ConnectN {
    type Cell = Stone;
}

impl MoveValidator for ConnectN {
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

impl TerminalDetector for ConnectN {
    fn detect(&self, grid: &Grid<Stone>, mover: Player, last: Coord2) -> Option<Outcome> {
        let stone = Stone::from(mover);
        let target = CellCount::from(self.win_length);

        if AXIS_DELTAS
            .iter()
            .any(|&delta| run_length(grid, last, delta, stone) >= target)
        {
            Some(Outcome::Win(mover))
        } else if is_board_full(grid) {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl Variant for ConnectN {
    fn turn_order(&self) -> TurnOrder {
        TurnOrder::Alternating
    }

    fn check_board(&self, (rows, cols): Coord2) -> core::result::Result<(), ConfigIssue> {
        let max = rows.max(cols);
        if self.win_length == 0 || self.win_length > max {
            return Err(ConfigIssue::WinLength {
                win_length: self.win_length,
                max,
            });
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
