use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - AwaitingMove -> AwaitingMove, same or other player
/// - AwaitingMove -> Terminal
/// - any -> AwaitingMove(first player), on reset only
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    AwaitingMove(Player),
    Terminal(Outcome),
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    pub const fn current_player(self) -> Option<Player> {
        match self {
            Self::AwaitingMove(player) => Some(player),
            Self::Terminal(_) => None,
        }
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::AwaitingMove(_) => None,
            Self::Terminal(outcome) => Some(outcome),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub state: EngineState,
    pub move_count: u32,
    pub last_move: Option<Coord2>,
}

impl TurnState {
    fn new(first_player: Player) -> Self {
        Self {
            state: EngineState::AwaitingMove(first_player),
            move_count: 0,
            last_move: None,
        }
    }
}

/// Seconds counter for display, advanced by an external once-per-second
/// tick while a game is in progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Stopwatch {
    running: bool,
    elapsed_secs: u32,
}

impl Stopwatch {
    fn tick(&mut self) {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }
}

/// What happened to a submitted move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub accepted: bool,
    pub rejection: Option<Rejection>,
    pub changed: Vec<Coord2>,
    pub flipped: Flips,
    /// Player who had no legal move and was skipped.
    pub passed: Option<Player>,
    pub terminal: Option<Outcome>,
}

impl MoveResult {
    fn rejected(rejection: Rejection) -> Self {
        Self {
            accepted: false,
            rejection: Some(rejection),
            changed: Vec::new(),
            flipped: Flips::new(),
            passed: None,
            terminal: None,
        }
    }

    fn from_applied(applied: Applied) -> Self {
        Self {
            accepted: true,
            rejection: None,
            changed: applied.changed,
            flipped: applied.flipped,
            passed: None,
            terminal: None,
        }
    }

    /// Whether this result could have caused an update to the board
    pub const fn has_update(&self) -> bool {
        self.accepted
    }
}

/// Read-only view of a game handed to the rendering layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub cells: Array2<CellView>,
    pub state: EngineState,
    pub move_count: u32,
    pub last_move: Option<Coord2>,
    pub elapsed_secs: u32,
}

impl StateSnapshot {
    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn current_player(&self) -> Option<Player> {
        self.state.current_player()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }
}

/// Board size checks shared by engine construction and [`GameConfig::validate`].
pub(crate) fn validate_board<V: Variant>(
    variant: &V,
    size: Coord2,
) -> core::result::Result<(), ConfigIssue> {
    if size.0 == 0 || size.1 == 0 {
        return Err(ConfigIssue::EmptyBoard);
    }
    variant.check_board(size)
}

/// Turn-based state machine driving one rule set over one board.
#[derive(Clone, Debug)]
pub struct PlayEngine<V: Variant> {
    pub(crate) variant: V,
    pub(crate) grid: Grid<V::Cell>,
    first_player: Player,
    turn: TurnState,
    stopwatch: Stopwatch,
}

impl<V: Variant> PlayEngine<V> {
    pub fn new(variant: V, size: Coord2, first_player: Player) -> Result<Self> {
        validate_board(&variant, size)?;
        let mut engine = Self {
            variant,
            grid: Grid::new(size),
            first_player,
            turn: TurnState::new(first_player),
            stopwatch: Stopwatch::default(),
        };
        engine.reset();
        Ok(engine)
    }

    /// Clears the board and deals the variant's opening position.
    pub fn reset(&mut self) {
        let size = self.grid.size();
        self.grid = Grid::new(size);
        self.variant.setup(&mut self.grid);
        self.turn = TurnState::new(self.first_player);
        self.stopwatch = Stopwatch::default();
        log::debug!(
            "New game on a {:?} board, {:?} to move",
            size,
            self.first_player
        );
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn grid(&self) -> &Grid<V::Cell> {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<V::Cell> {
        self.grid.get(coords)
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn state(&self) -> EngineState {
        self.turn.state
    }

    pub fn is_finished(&self) -> bool {
        self.turn.state.is_finished()
    }

    pub fn current_player(&self) -> Option<Player> {
        self.turn.state.current_player()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.stopwatch.elapsed_secs
    }

    /// Advances the display timer by one second if the game is running.
    pub fn tick(&mut self) {
        self.stopwatch.tick();
    }

    pub(crate) fn awaiting_player(&self) -> Result<Player> {
        self.turn
            .state
            .current_player()
            .ok_or(GameError::AlreadyEnded)
    }

    fn plan_move(&self, coords: Coord2) -> Result<(Player, V::Plan)> {
        let coords = self.grid.validate_coords(coords)?;
        let player = self.awaiting_player()?;
        let plan = self.variant.validate(&self.grid, player, coords)?;
        Ok((player, plan))
    }

    /// Validates a move for the awaited player without applying it.
    pub fn check_move(&self, coords: Coord2) -> Result<V::Plan> {
        self.plan_move(coords).map(|(_, plan)| plan)
    }

    /// Plays a move for the awaited player. Rule violations come back as a
    /// result with `accepted: false` and leave the game untouched.
    pub fn submit_move(&mut self, coords: Coord2) -> Result<MoveResult> {
        let (player, plan) = match self.plan_move(coords) {
            Ok(planned) => planned,
            Err(GameError::IllegalMove(rejection)) => {
                log::debug!("Rejected move at {:?}: {}", coords, rejection);
                return Ok(MoveResult::rejected(rejection));
            }
            Err(err) => return Err(err),
        };

        let applied = self.variant.apply(&mut self.grid, player, coords, plan);
        self.turn.move_count = self.turn.move_count.saturating_add(1);
        self.turn.last_move = Some(coords);
        self.stopwatch.running = true;
        log::debug!(
            "{:?} moved at {:?}, {} cells changed",
            player,
            coords,
            applied.changed.len()
        );

        let mut result = MoveResult::from_applied(applied);
        match self.variant.detect(&self.grid, player, coords) {
            Some(outcome) => {
                self.turn.state = EngineState::Terminal(outcome);
                self.stopwatch.running = false;
                result.terminal = Some(outcome);
                log::debug!(
                    "Game over after {} moves: {:?}",
                    self.turn.move_count,
                    outcome
                );
            }
            None => {
                let next = self.next_player(player, &mut result);
                self.turn.state = EngineState::AwaitingMove(next);
            }
        }

        Ok(result)
    }

    fn next_player(&self, mover: Player, result: &mut MoveResult) -> Player {
        match self.variant.turn_order() {
            TurnOrder::Solo => mover,
            TurnOrder::Alternating => {
                let opponent = mover.opponent();
                if self.variant.has_legal_move(&self.grid, opponent) {
                    opponent
                } else {
                    log::debug!("{:?} has no legal move, turn passes", opponent);
                    result.passed = Some(opponent);
                    mover
                }
            }
        }
    }

    /// Every target the awaited player could legally play.
    pub fn legal_moves(&self) -> Vec<Coord2> {
        match self.current_player() {
            Some(player) => self.variant.legal_moves(&self.grid, player),
            None => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let cells = Array2::from_shape_fn(self.size().to_nd_index(), |(row, col)| {
            self.variant
                .view(&self.grid, (row as Coord, col as Coord))
        });
        StateSnapshot {
            cells,
            state: self.turn.state,
            move_count: self.turn.move_count,
            last_move: self.turn.last_move,
            elapsed_secs: self.stopwatch.elapsed_secs,
        }
    }
}

impl<V: Variant<Cell = Stone>> PlayEngine<V> {
    /// Continues from an arranged position with `to_move` awaited. A later
    /// `reset` deals the variant's regular opening with `to_move` first.
    ///
    /// A position where `to_move` cannot play starts with the opponent, or
    /// as finished when neither side can play.
    pub fn from_position(variant: V, grid: Grid<Stone>, to_move: Player) -> Result<Self> {
        validate_board(&variant, grid.size())?;
        let mut engine = Self {
            variant,
            grid,
            first_player: to_move,
            turn: TurnState::new(to_move),
            stopwatch: Stopwatch::default(),
        };

        if !engine.variant.has_legal_move(&engine.grid, to_move) {
            let opponent = to_move.opponent();
            engine.turn.state = if engine.variant.has_legal_move(&engine.grid, opponent) {
                log::debug!("{:?} has no legal move, {:?} opens", to_move, opponent);
                EngineState::AwaitingMove(opponent)
            } else {
                EngineState::Terminal(engine.settled_outcome())
            };
        }

        Ok(engine)
    }

    /// Outcome of a position nobody can play on; a win anywhere on the board
    /// takes precedence.
    fn settled_outcome(&self) -> Outcome {
        self.grid
            .iter()
            .filter_map(|(coords, stone)| {
                let owner = stone.owner()?;
                self.variant.detect(&self.grid, owner, coords)
            })
            .max_by_key(|outcome| outcome.winner().is_some())
            .unwrap_or(Outcome::Draw)
    }
}

impl PlayEngine<Reversi> {
    /// Stones counted per side, `(black, white)`.
    pub fn score(&self) -> (CellCount, CellCount) {
        Reversi::score(&self.grid)
    }
}
