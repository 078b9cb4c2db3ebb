//! Square weights for the positional term

use crate::board::{DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Corners dominate, squares touching a corner are traps, the center is mild.
pub const POSITION_WEIGHTS: [[i32; DEFAULT_COLUMNS]; DEFAULT_ROWS] = [
    [500, -150, 30, 10, 10, 30, -150, 500],
    [-150, -250, 0, 0, 0, 0, -250, -150],
    [30, 0, 1, 2, 2, 1, 0, 30],
    [10, 0, 2, 16, 16, 2, 0, 10],
    [10, 0, 2, 16, 16, 2, 0, 10],
    [30, 0, 1, 2, 2, 1, 0, 30],
    [-150, -250, 0, 0, 0, 0, -250, -150],
    [500, -150, 30, 10, 10, 30, -150, 500],
];

#[inline]
pub fn weight(row: usize, col: usize) -> i32 {
    POSITION_WEIGHTS[row][col]
}
