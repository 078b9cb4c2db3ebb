//! Board representation for Othello

pub mod bitboard;
pub mod board;


use std::fmt;

use serde::{Deserialize, Serialize};

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, BoardError};

/// Default board size (8x8)
pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLUMNS: usize = 8;
/// Every board shape must hold exactly this many cells
pub const TOTAL_CELLS: usize = DEFAULT_ROWS * DEFAULT_COLUMNS; // 64

/// Piece occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Empty,
    Black,
    White,
}

impl Piece {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Black => Piece::White,
            Piece::White => Piece::Black,
            Piece::Empty => Piece::Empty,
        }
    }

    /// Single-letter rendering used by the text board
    pub fn symbol(self) -> char {
        match self {
            Piece::Black => 'B',
            Piece::White => 'W',
            Piece::Empty => ' ',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Piece::Black => "Black",
            Piece::White => "White",
            Piece::Empty => "Empty",
        }
    }
}

/// Shape of a board. Only shapes with `TOTAL_CELLS` cells are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub const DEFAULT: Dimensions = Dimensions {
        rows: DEFAULT_ROWS,
        columns: DEFAULT_COLUMNS,
    };

    #[inline]
    pub fn cells(self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn contains(self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.columns
    }

    /// Row-major cell index of a move
    #[inline]
    pub fn index(self, mv: Move) -> usize {
        mv.row as usize * self.columns + mv.col as usize
    }

    #[inline]
    pub fn move_at(self, idx: usize) -> Move {
        Move {
            row: (idx / self.columns) as u8,
            col: (idx % self.columns) as u8,
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A (row, column) placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    /// Create a move on the default 8x8 grid. Returns `None` when out of range.
    #[inline]
    pub fn new(row: i32, col: i32) -> Option<Self> {
        Self::within(row, col, Dimensions::DEFAULT)
    }

    /// Create a move bounded by the given board shape.
    #[inline]
    pub fn within(row: i32, col: i32, dims: Dimensions) -> Option<Self> {
        if dims.contains(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Move {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}
