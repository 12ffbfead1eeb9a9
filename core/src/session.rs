use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rounds won by each side since the session was created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinTally {
    pub black: u32,
    pub white: u32,
}

impl WinTally {
    fn record(&mut self, winner: Player) {
        let wins = match winner {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        };
        *wins = wins.saturating_add(1);
    }
}

#[derive(Clone, Debug)]
enum AnyEngine {
    ConnectN(PlayEngine<ConnectN>),
    TicTacToe(PlayEngine<TicTacToe>),
    Reversi(PlayEngine<Reversi>),
    SlidingPuzzle(PlayEngine<SlidingPuzzle>),
    Minesweeper(PlayEngine<Minesweeper>),
}

/// Runs the same expression against whichever engine is active.
macro_rules! with_engine {
    ($engine:expr, $bound:ident => $body:expr) => {
        match $engine {
            AnyEngine::ConnectN($bound) => $body,
            AnyEngine::TicTacToe($bound) => $body,
            AnyEngine::Reversi($bound) => $body,
            AnyEngine::SlidingPuzzle($bound) => $body,
            AnyEngine::Minesweeper($bound) => $body,
        }
    };
}

/// One game of any variant, as created from a [`GameConfig`].
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    engine: AnyEngine,
    wins: WinTally,
}

/// Validates `config` and starts a game with the opening position dealt.
pub fn new_game(config: GameConfig) -> Result<GameSession> {
    let GameConfig {
        variant,
        size,
        first_player,
        seed,
    } = config;
    let engine = match variant {
        VariantKind::ConnectN { win_length } => AnyEngine::ConnectN(PlayEngine::new(
            ConnectN::new(win_length),
            size,
            first_player,
        )?),
        VariantKind::TicTacToe => {
            AnyEngine::TicTacToe(PlayEngine::new(TicTacToe, size, first_player)?)
        }
        VariantKind::Reversi => AnyEngine::Reversi(PlayEngine::new(Reversi, size, first_player)?),
        VariantKind::SlidingPuzzle { numbering } => AnyEngine::SlidingPuzzle(PlayEngine::new(
            SlidingPuzzle::new(numbering, seed),
            size,
            first_player,
        )?),
        VariantKind::Minesweeper { mines } => AnyEngine::Minesweeper(PlayEngine::new(
            Minesweeper::new(mines, seed),
            size,
            first_player,
        )?),
    };

    log::debug!("Created {:?} game on a {:?} board", variant, size);
    Ok(GameSession {
        config,
        engine,
        wins: WinTally::default(),
    })
}

impl GameSession {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn submit_move(&mut self, coords: Coord2) -> Result<MoveResult> {
        let result = with_engine!(&mut self.engine, engine => engine.submit_move(coords))?;
        if let Some(winner) = result.terminal.and_then(Outcome::winner) {
            self.wins.record(winner);
            log::debug!("{:?} won, tally now {:?}", winner, self.wins);
        }
        Ok(result)
    }

    /// Rounds won per side; kept across `reset`.
    pub fn wins(&self) -> WinTally {
        self.wins
    }

    pub fn snapshot(&self) -> StateSnapshot {
        with_engine!(&self.engine, engine => engine.snapshot())
    }

    pub fn state(&self) -> EngineState {
        with_engine!(&self.engine, engine => engine.state())
    }

    /// Starts over with the same configuration. Puzzles and minefields are
    /// dealt afresh from the running random sequence.
    pub fn reset(&mut self) {
        with_engine!(&mut self.engine, engine => engine.reset())
    }

    pub fn tick(&mut self) {
        with_engine!(&mut self.engine, engine => engine.tick())
    }

    pub fn legal_moves(&self) -> Vec<Coord2> {
        with_engine!(&self.engine, engine => engine.legal_moves())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        match &mut self.engine {
            AnyEngine::Minesweeper(engine) => engine.toggle_flag(coords),
            _ => Err(GameError::Unsupported),
        }
    }

    pub fn mines_left(&self) -> Result<isize> {
        match &self.engine {
            AnyEngine::Minesweeper(engine) => Ok(engine.mines_left()),
            _ => Err(GameError::Unsupported),
        }
    }

    /// Stones per side, `(black, white)`, for the placement games.
    pub fn score(&self) -> Result<(CellCount, CellCount)> {
        let count = |grid: &Grid<Stone>| {
            let black = grid.count(|stone| stone == Stone::Black);
            let white = grid.count(|stone| stone == Stone::White);
            (black, white)
        };
        match &self.engine {
            AnyEngine::ConnectN(engine) => Ok(count(engine.grid())),
            AnyEngine::TicTacToe(engine) => Ok(count(engine.grid())),
            AnyEngine::Reversi(engine) => Ok(engine.score()),
            AnyEngine::SlidingPuzzle(_) | AnyEngine::Minesweeper(_) => {
                Err(GameError::Unsupported)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_refused() {
        let config = GameConfig::new(VariantKind::TicTacToe, (3, 4));
        assert_eq!(
            new_game(config).err(),
            Some(GameError::InvalidConfig(ConfigIssue::NotSquare))
        );
    }

    #[test]
    fn win_tally_survives_reset() {
        let mut session = new_game(GameConfig::tic_tac_toe()).unwrap();
        let black_top_row = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];

        for round in 1..=2 {
            for coords in black_top_row {
                session.submit_move(coords).unwrap();
            }
            assert_eq!(session.state().outcome(), Some(Outcome::Win(Player::Black)));
            session.reset();
            assert_eq!(session.wins(), WinTally { black: round, white: 0 });
        }

        // a draw counts for nobody
        for coords in [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)] {
            session.submit_move(coords).unwrap();
        }
        assert_eq!(session.state().outcome(), Some(Outcome::Draw));
        assert_eq!(session.wins(), WinTally { black: 2, white: 0 });
    }

    #[test]
    fn win_tally_counts_white() {
        let mut session =
            new_game(GameConfig::tic_tac_toe().with_first_player(Player::White)).unwrap();
        for coords in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            session.submit_move(coords).unwrap();
        }

        assert_eq!(session.wins(), WinTally { black: 0, white: 1 });
        assert_eq!(session.submit_move((2, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(session.wins(), WinTally { black: 0, white: 1 });
    }

    #[test]
    fn reversi_session_opens_with_centre_four() {
        let session = new_game(GameConfig::reversi()).unwrap();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.cell((3, 3)), Some(CellView::Stone(Player::White)));
        assert_eq!(snapshot.cell((3, 4)), Some(CellView::Stone(Player::Black)));
        assert_eq!(snapshot.cell((4, 3)), Some(CellView::Stone(Player::Black)));
        assert_eq!(snapshot.cell((4, 4)), Some(CellView::Stone(Player::White)));
        assert_eq!(session.score(), Ok((2, 2)));
        assert_eq!(session.legal_moves().len(), 4);
    }

    #[test]
    fn white_can_open() {
        let mut session =
            new_game(GameConfig::tic_tac_toe().with_first_player(Player::White)).unwrap();

        session.submit_move((1, 1)).unwrap();

        assert_eq!(session.snapshot().cell((1, 1)), Some(CellView::Stone(Player::White)));
        assert_eq!(session.state(), EngineState::AwaitingMove(Player::Black));
        assert_eq!(session.score(), Ok((0, 1)));
    }

    #[test]
    fn flags_only_exist_in_minesweeper() {
        let mut gomoku = new_game(GameConfig::gomoku()).unwrap();
        assert_eq!(gomoku.toggle_flag((0, 0)), Err(GameError::Unsupported));
        assert_eq!(gomoku.mines_left(), Err(GameError::Unsupported));

        let mut minefield = new_game(GameConfig::minesweeper(Difficulty::Easy)).unwrap();
        assert_eq!(minefield.toggle_flag((0, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(minefield.mines_left(), Ok(9));
        assert_eq!(minefield.score(), Err(GameError::Unsupported));
    }

    #[test]
    fn puzzle_session_deals_a_shuffled_board() {
        let mut session = new_game(GameConfig::sliding_puzzle(4).with_seed(3)).unwrap();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.state, EngineState::AwaitingMove(Player::Black));
        let moves = session.legal_moves();
        assert!((2..=4).contains(&moves.len()));

        let result = session.submit_move(moves[0]).unwrap();
        assert!(result.accepted);
        assert_eq!(session.state().current_player(), Some(Player::Black));
    }

    #[test]
    fn image_puzzle_numbers_from_zero() {
        let session = new_game(GameConfig::image_puzzle(3).with_seed(9)).unwrap();
        let snapshot = session.snapshot();

        let mut pieces: Vec<CellCount> = snapshot
            .cells
            .iter()
            .filter_map(|cell| match *cell {
                CellView::Piece(n) => Some(n),
                _ => None,
            })
            .collect();
        pieces.sort_unstable();

        assert_eq!(pieces, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn reset_restores_the_opening() {
        let mut session = new_game(GameConfig::gomoku()).unwrap();
        session.submit_move((7, 7)).unwrap();
        session.tick();

        session.reset();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.move_count, 0);
        assert_eq!(snapshot.last_move, None);
        assert_eq!(snapshot.elapsed_secs, 0);
        assert_eq!(snapshot.cell((7, 7)), Some(CellView::Empty));
    }
}
