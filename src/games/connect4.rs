//! # Connect 4 Game Implementation
//!
//! This module implements the classic Connect 4 board game.
//! Players take turns dropping pieces into columns, trying to get 4 pieces
//! in a row (horizontally, vertically, or diagonally).
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get `line_size` pieces in a row wins
//! - Game is a draw if the board fills up with no winner
//!
//! ## Heuristic
//! Every row, column, diagonal and anti-diagonal is split into runs of equal
//! cells. A run of length `n` adds `n³` for the scoring player's pieces and
//! subtracts `n³` for the opponent's; empty runs count nothing. The cube makes
//! one long run worth far more than several short ones.

use super::{completes_line, PlacementUndo};
use crate::board::{Board, EMPTY};
use crate::error::{GameError, MoveParseError};
use crate::{GameCondition, GameState, Player};
use std::fmt;
use std::str::FromStr;

/// Represents a move in Connect 4
///
/// Contains the column number where a player wants to drop their piece.
/// Column numbers are 0-based indices; the landing row is found by gravity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Connect4Move(pub usize);

/// Represents the complete state of a Connect 4 game
///
/// Contains the board state, current player, dimensions, and undo history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4State {
    /// The game board (row 0 is the top)
    board: Board,
    /// Player to move
    current_player: Player,
    /// Number of pieces needed in a row to win
    line_size: usize,
    /// Moves applied since the last reset
    move_count: usize,
    condition: GameCondition,
    /// Last cell filled, if any (row, column)
    last_move: Option<(usize, usize)>,
    history: Vec<PlacementUndo>,
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_grid(f, &self.board, false)
    }
}

impl GameState for Connect4State {
    type Move = Connect4Move;

    fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::One;
        self.move_count = 0;
        self.condition = GameCondition::Ongoing;
        self.last_move = None;
        self.history.clear();
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn valid_moves(&self) -> Vec<Self::Move> {
        (0..self.board.cols())
            .filter(|&c| self.board.is_empty_at(0, c))
            .map(Connect4Move)
            .collect()
    }

    fn is_valid(&self, mv: &Self::Move) -> bool {
        mv.0 < self.board.cols() && self.board.rows() > 0 && self.board.is_empty_at(0, mv.0)
    }

    fn apply_move(&mut self, mv: &Self::Move) {
        debug_assert!(self.is_valid(mv), "column {} is full or off the board", mv.0);
        let Some(row) = self.landing_row(mv.0) else {
            return;
        };
        self.board.set(row, mv.0, self.current_player.piece());
        self.history.push(PlacementUndo {
            previous_last_move: self.last_move,
        });
        self.last_move = Some((row, mv.0));
        self.move_count += 1;
        self.condition = self.terminal_check();
        self.current_player = self.current_player.opponent();
    }

    fn undo_move(&mut self) -> Result<(), GameError> {
        let record = self.history.pop().ok_or(GameError::EmptyHistory)?;
        let (r, c) = self.last_move.ok_or(GameError::StateInconsistency {
            moves: self.move_count,
            history: self.history.len() + 1,
        })?;
        self.board.set(r, c, EMPTY);
        self.last_move = record.previous_last_move;
        self.move_count -= 1;
        self.condition = GameCondition::Ongoing;
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    fn terminal_check(&self) -> GameCondition {
        let Some((r, c)) = self.last_move else {
            return GameCondition::Ongoing;
        };
        if completes_line(&self.board, (r, c), self.line_size) {
            if let Some(winner) = Player::from_piece(self.board.get(r, c)) {
                return GameCondition::Won(winner);
            }
        }
        if self.board.is_full() {
            GameCondition::Draw
        } else {
            GameCondition::Ongoing
        }
    }

    fn static_score(&self, perspective: Player) -> i32 {
        if let Some(score) = self.condition.terminal_score(perspective) {
            return score;
        }
        self.board
            .lines()
            .iter()
            .map(|line| run_score(line, perspective))
            .sum()
    }

    fn condition(&self) -> GameCondition {
        self.condition
    }

    fn current_player(&self) -> Player {
        self.current_player
    }

    fn move_count(&self) -> usize {
        self.move_count
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }
}

impl Connect4State {
    /// Creates a new Connect 4 game with the specified configuration
    pub fn new(rows: usize, cols: usize, line_size: usize) -> Self {
        Self {
            board: Board::new(rows, cols),
            current_player: Player::One,
            line_size,
            move_count: 0,
            condition: GameCondition::Ongoing,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Gets the number of pieces needed in a row to win
    ///
    /// # Returns
    /// The line size (typically 4 for standard Connect 4)
    pub fn get_line_size(&self) -> usize {
        self.line_size
    }

    /// The row a piece dropped into `col` would land on, scanning up from the bottom.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        (0..self.board.rows())
            .rev()
            .find(|&r| self.board.is_empty_at(r, col))
    }
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new(6, 7, 4)
    }
}

/// Cubic run score of one board line for `perspective`.
fn run_score(line: &[i32], perspective: Player) -> i32 {
    let mine = perspective.piece();
    line.chunk_by(|a, b| a == b)
        .map(|run| {
            let weight = (run.len() as i32).pow(3);
            match run[0] {
                EMPTY => 0,
                piece if piece == mine => weight,
                _ => -weight,
            }
        })
        .sum()
}

impl fmt::Display for Connect4Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

impl FromStr for Connect4Move {
    type Err = MoveParseError;

    /// Creates a Connect4Move from a string representation
    ///
    /// Expected format is the 1-based column number (e.g. "3" is column index 2).
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use arena::games::connect4::Connect4Move;
    /// let mv = Connect4Move::from_str("3").unwrap();
    /// assert_eq!(mv.0, 2);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let c = token
            .parse::<usize>()
            .map_err(|e| MoveParseError::new(token, e.to_string()))?;
        if c == 0 {
            return Err(MoveParseError::new(token, "columns start at 1"));
        }
        Ok(Connect4Move(c - 1))
    }
}
