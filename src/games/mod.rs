//! # Game Implementations Module
//!
//! This module contains the rules of every supported game. Each game implements
//! the `GameState` trait so the minimax search, the players and the match driver
//! can work with any of them.
//!
//! ## Supported Games
//! - **Tic-Tac-Toe**: place pieces on an N x M grid, first to K in a row wins (3x3, 3 by default)
//! - **Connect 4**: gravity-based connection game on a 6x7 grid, 4 in a row wins
//! - **Othello (Reversi)**: 8x8 piece-flipping game decided by piece count
//!
//! ## Undo records
//! Tic-Tac-Toe and Connect 4 change exactly one cell per move, so their undo
//! record is only the previous last move. An Othello move can flip any number
//! of pieces, so its record carries a snapshot of the whole board.
//!
//! ## Move text
//! Grid games use a row letter and a 1-based column (`a1`, `c3`, `h10`);
//! Connect 4 uses a bare 1-based column number.

pub mod connect4;
pub mod othello;
pub mod tictactoe;

use crate::board::Board;
use crate::error::MoveParseError;

/// Undo record for games whose moves fill exactly one cell.
///
/// The filled cell is the state's current last move, so only the last move
/// before it has to be remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementUndo {
    pub previous_last_move: Option<(usize, usize)>,
}

/// True if the piece at `cell` is part of a line of at least `line_size`.
pub(crate) fn completes_line(board: &Board, cell: (usize, usize), line_size: usize) -> bool {
    arena_shared::has_line_through(board.cells(), board.cols(), board.rows(), cell, line_size)
}

/// Parses an `a1`-style cell token into 0-based (row, col).
///
/// The row letter is case-insensitive; the column may have several digits.
pub(crate) fn parse_cell(s: &str) -> Result<(usize, usize), MoveParseError> {
    let token = s.trim();
    let mut chars = token.chars();
    let letter = chars
        .next()
        .filter(char::is_ascii_alphabetic)
        .ok_or_else(|| MoveParseError::new(token, "expected a row letter"))?;
    let row = (letter.to_ascii_lowercase() as u8 - b'a') as usize;

    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(MoveParseError::new(token, "expected a column number after the row letter"));
    }
    let col = digits
        .parse::<usize>()
        .map_err(|e| MoveParseError::new(token, e.to_string()))?;
    if col == 0 {
        return Err(MoveParseError::new(token, "columns start at 1"));
    }
    Ok((row, col - 1))
}

/// Formats 0-based (row, col) as an `a1`-style token.
pub(crate) fn format_cell(row: usize, col: usize) -> String {
    let letter = (b'a' + row as u8) as char;
    format!("{}{}", letter, col + 1)
}

/// Writes a grid with row letters down the side and 1-based column numbers below.
pub(crate) fn write_grid(
    f: &mut std::fmt::Formatter<'_>,
    board: &Board,
    row_labels: bool,
) -> std::fmt::Result {
    let symbol = |cell: i32| match crate::Player::from_piece(cell) {
        Some(p) => p.symbol(),
        None => '_',
    };
    for r in 0..board.rows() {
        if row_labels {
            write!(f, "{} ", (b'a' + r as u8) as char)?;
        }
        for c in 0..board.cols() {
            write!(f, "{} ", symbol(board.get(r, c)))?;
        }
        writeln!(f)?;
    }
    if row_labels {
        write!(f, "  ")?;
    }
    for c in 0..board.cols() {
        write!(f, "{} ", c + 1)?;
    }
    writeln!(f)
}
