use super::*;

/// Reversi/Othello: a placement must capture, the game ends when neither
/// side can move, and the side with more stones wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Reversi;

impl Reversi {
    /// Stones counted per side, `(black, white)`.
    pub fn score(grid: &Grid<Stone>) -> (CellCount, CellCount) {
        (
            grid.count(|stone| stone == Stone::Black),
            grid.count(|stone| stone == Stone::White),
        )
    }
}

/// Opposing stones `player` would flip by placing at `coords`, scanning
/// all eight rays. Does not check that `coords` itself is empty.
pub fn captures(grid: &Grid<Stone>, player: Player, coords: Coord2) -> Flips {
    let own = Stone::from(player);
    NEIGHBOR_DELTAS
        .iter()
        .filter_map(|&delta| captured_along(grid, coords, delta, own))
        .flatten()
        .collect()
}

/// A ray only captures when a run of opponents is closed by an own stone.
fn captured_along(grid: &Grid<Stone>, origin: Coord2, delta: Delta, own: Stone) -> Option<Flips> {
    let mut run = Flips::new();
    for coords in grid.ray(origin, delta) {
        match grid[coords] {
            Stone::Empty => return None,
            stone if stone == own => return (!run.is_empty()).then_some(run),
            _ => run.push(coords),
        }
    }
    None
}

impl GridRules for Reversi {
    type Cell = Stone;
}

impl MoveValidator for Reversi {
    type Plan = Flips;

    fn validate(
        &self,
        grid: &Grid<Stone>,
        player: Player,
        coords: Coord2,
    ) -> core::result::Result<Flips, Rejection> {
        validate_placement(grid, coords)?;
        let flips = captures(grid, player, coords);
        if flips.is_empty() {
            Err(Rejection::NoCapture)
        } else {
            Ok(flips)
        }
    }
}

impl TerminalDetector for Reversi {
    fn detect(&self, grid: &Grid<Stone>, _mover: Player, _last: Coord2) -> Option<Outcome> {
        if self.has_legal_move(grid, Player::Black) || self.has_legal_move(grid, Player::White) {
            return None;
        }

        let (black, white) = Self::score(grid);
        Some(match black.cmp(&white) {
            core::cmp::Ordering::Greater => Outcome::Win(Player::Black),
            core::cmp::Ordering::Less => Outcome::Win(Player::White),
            core::cmp::Ordering::Equal => Outcome::Draw,
        })
    }
}

impl Variant for Reversi {
    fn turn_order(&self) -> TurnOrder {
        TurnOrder::Alternating
    }

    fn check_board(&self, (rows, cols): Coord2) -> core::result::Result<(), ConfigIssue> {
        const MIN_SIDE: Coord = 4;
        if rows < MIN_SIDE || cols < MIN_SIDE || rows % 2 == 1 || cols % 2 == 1 {
            return Err(ConfigIssue::UnevenSides { min: MIN_SIDE });
        }
        Ok(())
    }

    /// Standard opening: white on the main diagonal of the centre square.
    fn setup(&mut self, grid: &mut Grid<Stone>) {
        let (rows, cols) = grid.size();
        let (mid_row, mid_col) = (rows / 2, cols / 2);
        grid[(mid_row - 1, mid_col - 1)] = Stone::White;
        grid[(mid_row - 1, mid_col)] = Stone::Black;
        grid[(mid_row, mid_col - 1)] = Stone::Black;
        grid[(mid_row, mid_col)] = Stone::White;
    }

    fn apply(&mut self, grid: &mut Grid<Stone>, player: Player, coords: Coord2, plan: Flips) -> Applied {
        let own = Stone::from(player);
        grid[coords] = own;
        for &flipped in &plan {
            grid[flipped] = own;
        }

        let mut changed = Vec::with_capacity(plan.len() + 1);
        changed.push(coords);
        changed.extend_from_slice(&plan);
        log::trace!("{:?} at {:?} flipped {} stones", player, coords, plan.len());

        Applied {
            changed,
            flipped: plan,
        }
    }

    fn view(&self, grid: &Grid<Stone>, coords: Coord2) -> CellView {
        stone_view(grid[coords])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening() -> Grid<Stone> {
        let mut grid = Grid::new((8, 8));
        Reversi.setup(&mut grid);
        grid
    }

    #[test]
    fn opening_has_four_moves_for_black() {
        let grid = opening();

        assert_eq!(
            Reversi.legal_moves(&grid, Player::Black),
            [(2, 3), (3, 2), (4, 5), (5, 4)]
        );
        assert_eq!(Reversi::score(&grid), (2, 2));
    }

    #[test]
    fn capture_requires_own_stone_at_ray_end() {
        let mut grid = Grid::new((4, 4));
        grid[(0, 1)] = Stone::White;
        grid[(0, 2)] = Stone::White;

        assert_eq!(
            Reversi.validate(&grid, Player::Black, (0, 0)),
            Err(Rejection::NoCapture)
        );

        grid[(0, 3)] = Stone::Black;
        let flips = Reversi.validate(&grid, Player::Black, (0, 0)).unwrap();
        assert_eq!(flips.as_slice(), &[(0, 1), (0, 2)]);
    }

    #[test]
    fn captures_in_several_directions_at_once() {
        let mut grid = Grid::new((5, 5));
        grid[(2, 1)] = Stone::White;
        grid[(2, 0)] = Stone::Black;
        grid[(1, 2)] = Stone::White;
        grid[(0, 2)] = Stone::Black;
        grid[(3, 3)] = Stone::White;
        grid[(4, 4)] = Stone::Empty;

        let flips = captures(&grid, Player::Black, (2, 2));
        assert_eq!(flips.as_slice(), &[(1, 2), (2, 1)]);
    }

    #[test]
    fn occupied_cell_is_rejected_before_scanning() {
        let grid = opening();

        assert_eq!(
            Reversi.validate(&grid, Player::Black, (3, 3)),
            Err(Rejection::Occupied)
        );
    }

    #[test]
    fn no_moves_for_either_side_ends_with_majority() {
        let mut grid = Grid::new((4, 4));
        grid[(0, 0)] = Stone::Black;
        grid[(0, 1)] = Stone::Black;
        grid[(3, 3)] = Stone::White;

        assert_eq!(
            Reversi.detect(&grid, Player::Black, (0, 1)),
            Some(Outcome::Win(Player::Black))
        );

        grid[(0, 2)] = Stone::White;
        assert!(Reversi.is_legal(&grid, Player::Black, (0, 3)));
        assert_eq!(Reversi.detect(&grid, Player::White, (0, 2)), None);
    }
}
