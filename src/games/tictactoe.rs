//! # Tic-Tac-Toe Game Implementation
//!
//! Generalized tic-tac-toe (an m,n,k-game): players alternate placing a piece
//! on any empty cell of a `rows` x `cols` grid. The first player with
//! `line_size` pieces in a row (horizontally, vertically or diagonally) wins;
//! a full board without a line is a draw. Defaults to the classic 3x3, 3 in a row.
//!
//! There is no positional heuristic: a running game scores zero, so the search
//! only sees wins and losses it can reach within its depth.

use super::{completes_line, format_cell, parse_cell, write_grid, PlacementUndo};
use crate::board::Board;
use crate::error::{GameError, MoveParseError};
use crate::{GameCondition, GameState, Player};
use std::fmt;
use std::str::FromStr;

/// A placement at (row, col), both 0-based.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeMove(pub usize, pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeState {
    board: Board,
    current_player: Player,
    line_size: usize,
    move_count: usize,
    condition: GameCondition,
    last_move: Option<(usize, usize)>,
    history: Vec<PlacementUndo>,
}

impl TicTacToeState {
    pub fn new(rows: usize, cols: usize, line_size: usize) -> Self {
        TicTacToeState {
            board: Board::new(rows, cols),
            current_player: Player::One,
            line_size,
            move_count: 0,
            condition: GameCondition::Ongoing,
            last_move: None,
            history: Vec::new(),
        }
    }

    pub fn get_line_size(&self) -> usize {
        self.line_size
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new(3, 3, 3)
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

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
        (0..self.board.rows())
            .flat_map(|r| (0..self.board.cols()).map(move |c| (r, c)))
            .filter(|&(r, c)| self.board.is_empty_at(r, c))
            .map(|(r, c)| TicTacToeMove(r, c))
            .collect()
    }

    fn is_valid(&self, mv: &Self::Move) -> bool {
        mv.0 < self.board.rows() && mv.1 < self.board.cols() && self.board.is_empty_at(mv.0, mv.1)
    }

    fn apply_move(&mut self, mv: &Self::Move) {
        debug_assert!(self.is_valid(mv), "illegal tic-tac-toe move {:?}", mv);
        self.board.set(mv.0, mv.1, self.current_player.piece());
        self.history.push(PlacementUndo {
            previous_last_move: self.last_move,
        });
        self.last_move = Some((mv.0, mv.1));
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
        self.board.set(r, c, crate::board::EMPTY);
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
        self.condition.terminal_score(perspective).unwrap_or(0)
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

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.board, true)
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cell(self.0, self.1))
    }
}

impl FromStr for TicTacToeMove {
    type Err = MoveParseError;

    /// Parses `a1`-style tokens: row letter, then 1-based column.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (r, c) = parse_cell(s)?;
        Ok(TicTacToeMove(r, c))
    }
}
