//! # Minimax Arena
//!
//! Plays two-player, perfect-information board games (tic-tac-toe style
//! alignment, Connect 4 and Othello) and picks moves for computer players with a
//! plain minimax search. Leaves at the depth cutoff are scored either by a
//! game-specific heuristic or by random Monte Carlo rollouts.
//!
//! The search works on a single mutable state: every simulated move is applied
//! in place and undone afterwards, so each game keeps an undo history.

pub mod board;
pub mod config;
pub mod error;
pub mod game_controller;
pub mod game_wrapper;
pub mod games;
pub mod minimax;
pub mod player;

use std::fmt;
use std::hash::Hash;

pub use board::Board;
pub use config::{LeafEval, PlayerConfig, SearchConfig};
pub use error::{ConfigError, GameError, MoveParseError, PlayerError, SearchError};
pub use game_wrapper::{GameKind, GameWrapper, MoveWrapper};
pub use minimax::Minimax;
pub use player::{Agent, HumanInput};

/// Score of a won position before depth adjustment.
pub const WIN_SCORE: i32 = 10_000;

/// One of the two sides of a game.
///
/// On the board Player One is stored as `1` and Player Two as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell value used for this player's pieces.
    pub fn piece(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    pub fn from_piece(piece: i32) -> Option<Self> {
        match piece {
            1 => Some(Player::One),
            -1 => Some(Player::Two),
            _ => None,
        }
    }

    /// 1-based player number for display.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Whether a game is still running and, if not, how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameCondition {
    #[default]
    Ongoing,
    Draw,
    Won(Player),
}

impl GameCondition {
    pub fn is_over(self) -> bool {
        self != GameCondition::Ongoing
    }

    /// The saturated static score of a finished game, `None` while it is running.
    pub fn terminal_score(self, perspective: Player) -> Option<i32> {
        match self {
            GameCondition::Ongoing => None,
            GameCondition::Draw => Some(0),
            GameCondition::Won(p) if p == perspective => Some(WIN_SCORE),
            GameCondition::Won(_) => Some(-WIN_SCORE),
        }
    }
}

/// The rules of a game together with its mutable, undoable state.
///
/// Implementations keep one undo record per applied move, so
/// `history_len() == move_count()` holds after every `apply_move`/`undo_move`.
pub trait GameState {
    /// The type of a move in the game.
    type Move: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Restores the game's initial configuration and clears the history.
    fn reset(&mut self);

    fn board(&self) -> &Board;

    /// All legal moves for the player to move.
    fn valid_moves(&self) -> Vec<Self::Move>;

    /// Bounds- and legality-checks a single move against the live board.
    fn is_valid(&self, mv: &Self::Move) -> bool;

    /// Applies a move that `is_valid` accepted.
    ///
    /// Pushes an undo record, updates the last move and the move counter,
    /// recomputes the condition and hands the turn to the other player.
    /// Passing an invalid move is a caller error.
    fn apply_move(&mut self, mv: &Self::Move);

    /// Reverts the most recent `apply_move`.
    fn undo_move(&mut self) -> Result<(), GameError>;

    /// Decides the condition of the board right after a move. Only `apply_move` calls this.
    fn terminal_check(&self) -> GameCondition;

    /// Heuristic value of the board for `perspective`, used at the search cutoff.
    fn static_score(&self, perspective: Player) -> i32;

    fn condition(&self) -> GameCondition;

    /// The player whose turn it is.
    fn current_player(&self) -> Player;

    fn move_count(&self) -> usize;

    fn history_len(&self) -> usize;

    /// The cell touched by the most recent move, if any.
    fn last_move(&self) -> Option<(usize, usize)>;

    /// The pass move, when passing is the only legal option.
    fn forced_pass(&self) -> Option<Self::Move> {
        None
    }

    /// Validates and applies a move from an outside caller.
    fn try_apply_move(&mut self, mv: &Self::Move) -> Result<(), GameError> {
        if self.condition().is_over() {
            return Err(GameError::GameOver);
        }
        if !self.is_valid(mv) {
            return Err(GameError::InvalidMove(mv.to_string()));
        }
        self.apply_move(mv);
        Ok(())
    }

    /// Fails if the undo history and the move counter have drifted apart.
    fn check_consistency(&self) -> Result<(), GameError> {
        let (moves, history) = (self.move_count(), self.history_len());
        if moves == history {
            Ok(())
        } else {
            Err(GameError::StateInconsistency { moves, history })
        }
    }
}
