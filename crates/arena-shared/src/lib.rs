#![no_std]

/// The four line axes through a cell: vertical, horizontal, diagonal and anti-diagonal.
///
/// Each axis is scanned in its given direction and in the opposite one.
pub const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Counts the consecutive `player` pieces next to `origin`, walking in direction `step`.
///
/// The origin cell itself is not counted. The walk stops at the first cell that
/// is off the board or holds anything other than `player`.
///
/// # Arguments
/// * `board` - The board data as a flat row-major slice
/// * `width` - Board width
/// * `height` - Board height
/// * `origin` - The (row, col) cell to start from
/// * `step` - The (row, col) delta applied per step
/// * `player` - The piece value to count (e.g., 1 or -1)
pub fn count_direction(
    board: &[i32],
    width: usize,
    height: usize,
    origin: (usize, usize),
    step: (i32, i32),
    player: i32,
) -> usize {
    let (w, h) = (width as i32, height as i32);
    let mut r = origin.0 as i32 + step.0;
    let mut c = origin.1 as i32 + step.1;
    let mut count = 0;

    while r >= 0 && c >= 0 && r < h && c < w && board[(r * w + c) as usize] == player {
        count += 1;
        r += step.0;
        c += step.1;
    }
    count
}

/// Checks whether the piece at `origin` completes a line of at least `line_size`.
///
/// Only the four axes through `origin` are scanned, so this is the cheap test to
/// run right after a piece has been placed there.
pub fn has_line_through(
    board: &[i32],
    width: usize,
    height: usize,
    origin: (usize, usize),
    line_size: usize,
) -> bool {
    let player = board[origin.0 * width + origin.1];
    if player == 0 {
        return false;
    }

    AXES.iter().any(|&(dr, dc)| {
        let forward = count_direction(board, width, height, origin, (dr, dc), player);
        let backward = count_direction(board, width, height, origin, (-dr, -dc), player);
        forward + backward + 1 >= line_size
    })
}
