//! # Othello (Reversi) Game Implementation
//!
//! This module implements the classic Othello (also known as Reversi) board game.
//! Players take turns placing pieces on an 8x8 board, with the goal of having
//! the most pieces of their color when neither side can move.
//!
//! ## Rules
//! - Players must place pieces that "sandwich" opponent pieces between the new piece
//!   and an existing piece of the same color
//! - All sandwiched pieces are flipped to the current player's color
//! - A player with no legal placement must pass
//! - Two consecutive passes end the game
//! - Winner is determined by who has more pieces on the board
//!
//! Because a placement can flip pieces in up to eight directions, each undo
//! record keeps a copy of the board from before the move. A pass leaves the
//! board alone and only records the pass counter.

use super::{format_cell, parse_cell, write_grid};
use crate::board::{Board, EMPTY};
use crate::error::{GameError, MoveParseError};
use crate::{GameCondition, GameState, Player};
use std::fmt;
use std::str::FromStr;

/// The eight compass directions as (row, col) deltas.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];

/// Represents a move in Othello
///
/// Either a placement at 0-based (row, col) or a pass when no placement is legal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OthelloMove {
    Place(usize, usize),
    Pass,
}

/// What it takes to revert one Othello move.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OthelloUndo {
    /// Consecutive passes before the move
    passes: u8,
    /// Board before the move; `None` for a pass
    snapshot: Option<Board>,
    previous_last_move: Option<(usize, usize)>,
}

/// Represents the complete state of an Othello game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OthelloState {
    /// The game board
    board: Board,
    /// Current player (Player One plays black and moves first)
    current_player: Player,
    move_count: usize,
    condition: GameCondition,
    /// Passes in a row; two end the game
    consecutive_passes: u8,
    /// Last placement, `None` at the start or right after a pass
    last_move: Option<(usize, usize)>,
    history: Vec<OthelloUndo>,
}

impl GameState for OthelloState {
    type Move = OthelloMove;

    fn reset(&mut self) {
        Self::seed_center(&mut self.board);
        self.current_player = Player::One;
        self.move_count = 0;
        self.condition = GameCondition::Ongoing;
        self.consecutive_passes = 0;
        self.last_move = None;
        self.history.clear();
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn valid_moves(&self) -> Vec<Self::Move> {
        let moves = self.placements();
        if moves.is_empty() {
            vec![OthelloMove::Pass]
        } else {
            moves
        }
    }

    fn is_valid(&self, mv: &Self::Move) -> bool {
        match *mv {
            OthelloMove::Place(r, c) => self.is_valid_placement(r, c),
            OthelloMove::Pass => !self.has_any_placement(),
        }
    }

    fn apply_move(&mut self, mv: &Self::Move) {
        debug_assert!(self.is_valid(mv), "illegal othello move {:?}", mv);
        match *mv {
            OthelloMove::Pass => {
                self.history.push(OthelloUndo {
                    passes: self.consecutive_passes,
                    snapshot: None,
                    previous_last_move: self.last_move,
                });
                self.consecutive_passes += 1;
                self.last_move = None;
            }
            OthelloMove::Place(r, c) => {
                self.history.push(OthelloUndo {
                    passes: self.consecutive_passes,
                    snapshot: Some(self.board.clone()),
                    previous_last_move: self.last_move,
                });
                self.consecutive_passes = 0;
                self.board.set(r, c, self.current_player.piece());
                self.flip_pieces(r, c);
                self.last_move = Some((r, c));
            }
        }
        self.move_count += 1;
        self.condition = self.terminal_check();
        self.current_player = self.current_player.opponent();
    }

    fn undo_move(&mut self) -> Result<(), GameError> {
        let record = self.history.pop().ok_or(GameError::EmptyHistory)?;
        if let Some(board) = record.snapshot {
            self.board = board;
        }
        self.consecutive_passes = record.passes;
        self.last_move = record.previous_last_move;
        self.move_count -= 1;
        self.condition = GameCondition::Ongoing;
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    fn terminal_check(&self) -> GameCondition {
        if self.consecutive_passes < 2 {
            return GameCondition::Ongoing;
        }
        match self.board.piece_sum() {
            sum if sum > 0 => GameCondition::Won(Player::One),
            sum if sum < 0 => GameCondition::Won(Player::Two),
            _ => GameCondition::Draw,
        }
    }

    fn static_score(&self, perspective: Player) -> i32 {
        if let Some(score) = self.condition.terminal_score(perspective) {
            return score;
        }
        self.board.piece_sum() * perspective.piece()
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

    fn forced_pass(&self) -> Option<Self::Move> {
        (!self.has_any_placement()).then_some(OthelloMove::Pass)
    }
}

impl OthelloState {
    /// Creates a new Othello game with the standard starting position
    ///
    /// Sets up the board with 4 pieces in the center in the traditional pattern.
    /// Black (Player One) starts first.
    ///
    /// # Arguments
    /// * `rows` - Number of rows, typically 8 (at least 2)
    /// * `cols` - Number of columns, typically 8 (at least 2)
    ///
    /// # Panics
    /// If `rows` or `cols` is below 2, since the four starting pieces would not fit.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(
            rows >= 2 && cols >= 2,
            "Othello needs at least a 2x2 board, got {}x{}",
            rows,
            cols
        );
        let mut board = Board::new(rows, cols);
        Self::seed_center(&mut board);
        OthelloState {
            board,
            current_player: Player::One,
            move_count: 0,
            condition: GameCondition::Ongoing,
            consecutive_passes: 0,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Clears the board and places the four starting pieces.
    fn seed_center(board: &mut Board) {
        board.clear();
        let (r, c) = (board.rows() / 2, board.cols() / 2);
        board.set(r - 1, c - 1, Player::Two.piece());
        board.set(r - 1, c, Player::One.piece());
        board.set(r, c - 1, Player::One.piece());
        board.set(r, c, Player::Two.piece());
    }

    /// Pieces held by (Player One, Player Two).
    pub fn piece_counts(&self) -> (usize, usize) {
        (self.board.count(Player::One), self.board.count(Player::Two))
    }

    /// Passes in a row so far.
    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// All legal placements for the current player, without the pass fallback.
    fn placements(&self) -> Vec<OthelloMove> {
        let mut moves = Vec::new();
        for r in 0..self.board.rows() {
            for c in 0..self.board.cols() {
                if self.is_valid_placement(r, c) {
                    moves.push(OthelloMove::Place(r, c));
                }
            }
        }
        moves
    }

    fn has_any_placement(&self) -> bool {
        (0..self.board.rows())
            .any(|r| (0..self.board.cols()).any(|c| self.is_valid_placement(r, c)))
    }

    /// A placement is legal on an empty cell that brackets at least one opponent piece.
    fn is_valid_placement(&self, r: usize, c: usize) -> bool {
        if r >= self.board.rows() || c >= self.board.cols() || !self.board.is_empty_at(r, c) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.captures_in_direction(r, c, dir) > 0)
    }

    /// Number of opponent pieces bracketed from (r, c) in direction `dir`.
    ///
    /// Counts the run of opponent pieces right next to (r, c) and returns it only
    /// when the run ends on one of the mover's own pieces; otherwise 0.
    fn captures_in_direction(&self, r: usize, c: usize, dir: (i32, i32)) -> usize {
        let own = self.current_player.piece();
        let opponent = -own;
        let mut nr = r as i32 + dir.0;
        let mut nc = c as i32 + dir.1;
        let mut run = 0;

        while let Some(cell) = self.board.get_signed(nr, nc) {
            if cell == opponent {
                run += 1;
            } else if cell == own {
                return run;
            } else {
                return 0;
            }
            nr += dir.0;
            nc += dir.1;
        }
        0
    }

    /// Flips all opponent pieces that are captured by placing a piece at (r, c)
    ///
    /// Called right after the piece is placed, before the turn passes.
    fn flip_pieces(&mut self, r: usize, c: usize) {
        let own = self.current_player.piece();
        for &dir in DIRECTIONS.iter() {
            let run = self.captures_in_direction(r, c, dir);
            for step in 1..=run as i32 {
                let fr = (r as i32 + dir.0 * step) as usize;
                let fc = (c as i32 + dir.1 * step) as usize;
                self.board.set(fr, fc, own);
            }
        }
    }
}

impl Default for OthelloState {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

impl fmt::Display for OthelloState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.board, true)
    }
}

impl fmt::Display for OthelloMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OthelloMove::Place(r, c) => f.write_str(&format_cell(r, c)),
            OthelloMove::Pass => f.write_str("pass"),
        }
    }
}

impl FromStr for OthelloMove {
    type Err = MoveParseError;

    /// Creates an OthelloMove from a string representation
    ///
    /// Expected format is a row letter followed by a 1-based column ("d3"),
    /// or "pass".
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use arena::games::othello::OthelloMove;
    /// assert_eq!(OthelloMove::from_str("d3").unwrap(), OthelloMove::Place(3, 2));
    /// assert_eq!(OthelloMove::from_str("Pass").unwrap(), OthelloMove::Pass);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("pass") {
            return Ok(OthelloMove::Pass);
        }
        let (r, c) = parse_cell(s)?;
        Ok(OthelloMove::Place(r, c))
    }
}
