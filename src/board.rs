//! Fixed-size rectangular board shared by all games.
//!
//! Cells are stored row-major as `i32`: `0` is empty, `1` holds a Player One
//! piece and `-1` a Player Two piece (see [`crate::Player::piece`]).

use crate::Player;

/// Value of an empty cell.
pub const EMPTY: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Board {
    /// Creates an empty `rows` x `cols` board.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cells as a flat row-major slice.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.cells[row * self.cols + col]
    }

    /// Like [`Board::get`] but takes signed coordinates and returns `None` off the board.
    pub fn get_signed(&self, row: i32, col: i32) -> Option<i32> {
        if self.in_bounds(row, col) {
            Some(self.get(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: i32) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == EMPTY
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != EMPTY)
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Number of pieces `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        let piece = player.piece();
        self.cells.iter().filter(|&&c| c == piece).count()
    }

    /// Sum of all cells: Player One's piece count minus Player Two's.
    pub fn piece_sum(&self) -> i32 {
        self.cells.iter().sum()
    }

    /// Returns the board as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells.chunks(self.cols).map(<[i32]>::to_vec).collect()
    }

    /// Every row, column, diagonal and anti-diagonal of the board, as cell values.
    ///
    /// Diagonals run top-left to bottom-right, anti-diagonals top-right to
    /// bottom-left. Single-cell corner diagonals are included.
    pub fn lines(&self) -> Vec<Vec<i32>> {
        let (rows, cols) = (self.rows, self.cols);
        let mut lines = Vec::with_capacity(rows + cols + 2 * (rows + cols));

        lines.extend(self.to_rows());
        lines.extend((0..cols).map(|c| (0..rows).map(|r| self.get(r, c)).collect()));

        if rows == 0 || cols == 0 {
            return lines;
        }

        // Cells with equal `col - row` share a diagonal.
        for offset in -(rows as i64 - 1)..cols as i64 {
            let line = (0..rows)
                .filter_map(|r| {
                    let c = r as i64 + offset;
                    (0..cols as i64).contains(&c).then(|| self.get(r, c as usize))
                })
                .collect();
            lines.push(line);
        }

        // Cells with equal `row + col` share an anti-diagonal.
        for sum in 0..(rows + cols - 1) {
            let line = (0..rows)
                .filter_map(|r| {
                    let c = sum.checked_sub(r)?;
                    (c < cols).then(|| self.get(r, c))
                })
                .collect();
            lines.push(line);
        }

        lines
    }
}
