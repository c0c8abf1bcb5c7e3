//! # Game Wrapper Module - Unified Game Interface
//!
//! Lets the search, the players and the match driver work with any supported
//! game through one type. `GameWrapper` is a tagged enum over the three game
//! states and `MoveWrapper` over their move types; both dispatch to the
//! wrapped game with a macro, so there is no dynamic dispatch.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │  Minimax Search │◄──►│   GameWrapper    │◄──►│  Game-Specific  │
//! │  Players        │    │                  │    │ Implementations │
//! │  Controller     │    │ • Unified API    │    │ • TicTacToe     │
//! └─────────────────┘    │ • Move parsing   │    │ • Connect4      │
//!                        └──────────────────┘    │ • Othello       │
//!                                                └─────────────────┘
//! ```

use crate::board::Board;
use crate::error::{ConfigError, GameError, MoveParseError};
use crate::games::connect4::{Connect4Move, Connect4State};
use crate::games::othello::{OthelloMove, OthelloState};
use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};
use crate::{GameCondition, GameState, Player};
use std::fmt;
use std::str::FromStr;

/// The supported games, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    TicTacToe,
    Connect4,
    Othello,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::TicTacToe, GameKind::Connect4, GameKind::Othello];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic-Tac-Toe",
            GameKind::Connect4 => "Connect4",
            GameKind::Othello => "Othello",
        }
    }

    /// Default (rows, cols, line size); Othello has no line size.
    pub fn default_dimensions(self) -> (usize, usize, Option<usize>) {
        match self {
            GameKind::TicTacToe => (3, 3, Some(3)),
            GameKind::Connect4 => (6, 7, Some(4)),
            GameKind::Othello => (8, 8, None),
        }
    }

    /// Builds a fresh game, filling in defaults for any dimension left out.
    pub fn build(
        self,
        rows: Option<usize>,
        cols: Option<usize>,
        line_size: Option<usize>,
    ) -> Result<GameWrapper, ConfigError> {
        let (default_rows, default_cols, default_line) = self.default_dimensions();
        let rows = rows.unwrap_or(default_rows);
        let cols = cols.unwrap_or(default_cols);
        // row labels run from 'a' to 'z'
        if rows == 0 || cols == 0 || rows > 26 {
            return Err(ConfigError::InvalidBoard(format!(
                "{}x{} is not a usable board (1-26 rows, at least 1 column)",
                rows, cols
            )));
        }

        match self {
            GameKind::TicTacToe | GameKind::Connect4 => {
                let line = line_size.or(default_line).unwrap_or(rows.max(cols));
                if line == 0 || line > rows.max(cols) {
                    return Err(ConfigError::InvalidBoard(format!(
                        "a line of {} cannot fit on a {}x{} board",
                        line, rows, cols
                    )));
                }
                Ok(if self == GameKind::TicTacToe {
                    GameWrapper::TicTacToe(TicTacToeState::new(rows, cols, line))
                } else {
                    GameWrapper::Connect4(Connect4State::new(rows, cols, line))
                })
            }
            GameKind::Othello => {
                if rows < 2 || cols < 2 {
                    return Err(ConfigError::InvalidBoard(format!(
                        "Othello needs at least 2x2 for its starting pieces, got {}x{}",
                        rows, cols
                    )));
                }
                if line_size.is_some() {
                    return Err(ConfigError::InvalidBoard(
                        "Othello does not take a line size".to_string(),
                    ));
                }
                Ok(GameWrapper::Othello(OthelloState::new(rows, cols)))
            }
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "tictactoe" | "ttt" => Ok(GameKind::TicTacToe),
            "connect4" | "connectx" | "c4" => Ok(GameKind::Connect4),
            "othello" | "reversi" => Ok(GameKind::Othello),
            _ => Err(ConfigError::Parse(format!(
                "unknown game '{}' (expected Tic-Tac-Toe, Connect4 or Othello)",
                s
            ))),
        }
    }
}

/// Wrapper enum for all supported game types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameWrapper {
    /// Tic-tac-toe on an N x M grid
    TicTacToe(TicTacToeState),
    /// Connect 4: gravity drops into columns
    Connect4(Connect4State),
    /// Othello: placements flip bracketed pieces
    Othello(OthelloState),
}

/// Wrapper enum for all supported move types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveWrapper {
    /// Placement at (row, col)
    TicTacToe(TicTacToeMove),
    /// Column to drop into; gravity picks the row
    Connect4(Connect4Move),
    /// Placement with captures, or a pass
    Othello(OthelloMove),
}

impl fmt::Display for MoveWrapper {
    /// Uses the same text as the player types in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveWrapper::TicTacToe(m) => write!(f, "{}", m),
            MoveWrapper::Connect4(m) => write!(f, "{}", m),
            MoveWrapper::Othello(m) => write!(f, "{}", m),
        }
    }
}

impl fmt::Display for GameWrapper {
    /// Delegates to the specific game's Display implementation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWrapper::TicTacToe(g) => write!(f, "{}", g),
            GameWrapper::Connect4(g) => write!(f, "{}", g),
            GameWrapper::Othello(g) => write!(f, "{}", g),
        }
    }
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl GameState for GameWrapper {
            type Move = MoveWrapper;

            fn reset(&mut self) {
                match self {
                    $(GameWrapper::$variant(g) => g.reset(),)*
                }
            }

            fn board(&self) -> &Board {
                match self {
                    $(GameWrapper::$variant(g) => g.board(),)*
                }
            }

            fn valid_moves(&self) -> Vec<Self::Move> {
                match self {
                    $(GameWrapper::$variant(g) => g
                        .valid_moves()
                        .into_iter()
                        .map(MoveWrapper::$variant)
                        .collect(),)*
                }
            }

            fn is_valid(&self, mv: &Self::Move) -> bool {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.is_valid(m),)*
                    _ => false,
                }
            }

            fn apply_move(&mut self, mv: &Self::Move) {
                match (self, mv) {
                    $((GameWrapper::$variant(g), MoveWrapper::$variant(m)) => g.apply_move(m),)*
                    _ => debug_assert!(false, "mismatched game and move types"),
                }
            }

            fn undo_move(&mut self) -> Result<(), GameError> {
                match self {
                    $(GameWrapper::$variant(g) => g.undo_move(),)*
                }
            }

            fn terminal_check(&self) -> GameCondition {
                match self {
                    $(GameWrapper::$variant(g) => g.terminal_check(),)*
                }
            }

            fn static_score(&self, perspective: Player) -> i32 {
                match self {
                    $(GameWrapper::$variant(g) => g.static_score(perspective),)*
                }
            }

            fn condition(&self) -> GameCondition {
                match self {
                    $(GameWrapper::$variant(g) => g.condition(),)*
                }
            }

            fn current_player(&self) -> Player {
                match self {
                    $(GameWrapper::$variant(g) => g.current_player(),)*
                }
            }

            fn move_count(&self) -> usize {
                match self {
                    $(GameWrapper::$variant(g) => g.move_count(),)*
                }
            }

            fn history_len(&self) -> usize {
                match self {
                    $(GameWrapper::$variant(g) => g.history_len(),)*
                }
            }

            fn last_move(&self) -> Option<(usize, usize)> {
                match self {
                    $(GameWrapper::$variant(g) => g.last_move(),)*
                }
            }

            fn forced_pass(&self) -> Option<Self::Move> {
                match self {
                    $(GameWrapper::$variant(g) => g.forced_pass().map(MoveWrapper::$variant),)*
                }
            }
        }

        impl GameWrapper {
            /// Decodes a move token in this game's text format.
            pub fn parse_move(&self, s: &str) -> Result<MoveWrapper, MoveParseError> {
                match self {
                    $(GameWrapper::$variant(_) => s.parse().map(MoveWrapper::$variant),)*
                }
            }

            pub fn kind(&self) -> GameKind {
                match self {
                    $(GameWrapper::$variant(_) => GameKind::$variant,)*
                }
            }
        }
    };
}

impl_game_dispatch!(TicTacToe, Connect4, Othello);
