//! Board structure with placement history

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bitboard::Bitboard;
use super::{Dimensions, Move, Piece, TOTAL_CELLS};
use crate::rules::{self, CaptureRule};

/// Rejected board shapes or grids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a {rows}x{columns} board does not have {expected} cells")]
    CellCount {
        rows: usize,
        columns: usize,
        expected: usize,
    },
    #[error("a {rows}x{columns} board cannot hold the opening 2x2 block")]
    TooNarrow { rows: usize, columns: usize },
    #[error("grid shape does not match a {rows}x{columns} board")]
    GridShape { rows: usize, columns: usize },
    #[error("history move ({row}, {col}) lies outside the board")]
    HistoryOutOfRange { row: u8, col: u8 },
    #[error("({row}, {col}) lies outside a {rows}x{columns} board")]
    OutOfRange {
        row: u8,
        col: u8,
        rows: usize,
        columns: usize,
    },
}

/// Game board: two bitboards plus the ordered list of placed moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    dims: Dimensions,
    black: Bitboard,
    white: Bitboard,
    /// Placement history (flipped pieces are not recorded)
    history: Vec<Move>,
}

impl Board {
    /// Default 8x8 board with the opening position
    pub fn new() -> Self {
        Self::opening(Dimensions::DEFAULT)
    }

    /// Board of another shape with the same total cell count.
    pub fn with_dimensions(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if rows.checked_mul(columns) != Some(TOTAL_CELLS) {
            return Err(BoardError::CellCount {
                rows,
                columns,
                expected: TOTAL_CELLS,
            });
        }
        if rows < 2 || columns < 2 {
            return Err(BoardError::TooNarrow { rows, columns });
        }
        Ok(Self::opening(Dimensions { rows, columns }))
    }

    fn opening(dims: Dimensions) -> Self {
        let mut board = Self {
            dims,
            black: Bitboard::new(),
            white: Bitboard::new(),
            history: Vec::with_capacity(TOTAL_CELLS),
        };
        // Center 2x2 block: White on the main diagonal, Black on the anti-diagonal
        let (r, c) = ((dims.rows / 2 - 1) as u8, (dims.columns / 2 - 1) as u8);
        board.set(Move { row: r, col: c }, Piece::White);
        board.set(Move { row: r + 1, col: c + 1 }, Piece::White);
        board.set(Move { row: r, col: c + 1 }, Piece::Black);
        board.set(Move { row: r + 1, col: c }, Piece::Black);
        board
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.dims.columns
    }

    /// Whether a move lies on this board
    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.dims.contains(mv.row as i32, mv.col as i32)
    }

    /// Get piece at position; cells off the board read as empty
    #[inline]
    pub fn get(&self, mv: Move) -> Piece {
        if !self.contains(mv) {
            return Piece::Empty;
        }
        let idx = self.dims.index(mv);
        if self.black.get(idx) {
            Piece::Black
        } else if self.white.get(idx) {
            Piece::White
        } else {
            Piece::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv) == Piece::Empty
    }

    /// Overwrite a single cell without touching the history.
    /// Moves outside the board are ignored.
    #[inline]
    pub fn set(&mut self, mv: Move, piece: Piece) {
        if !self.contains(mv) {
            return;
        }
        let idx = self.dims.index(mv);
        self.black.clear(idx);
        self.white.clear(idx);
        match piece {
            Piece::Black => self.black.set(idx),
            Piece::White => self.white.set(idx),
            Piece::Empty => {}
        }
    }

    /// Place a piece and record the placement in the history.
    pub fn place_piece(&mut self, mv: Move, piece: Piece) -> Result<(), BoardError> {
        if !self.contains(mv) {
            return Err(BoardError::OutOfRange {
                row: mv.row,
                col: mv.col,
                rows: self.dims.rows,
                columns: self.dims.columns,
            });
        }
        self.set(mv, piece);
        self.history.push(mv);
        Ok(())
    }

    /// Copy of the grid, row-major
    pub fn pieces(&self) -> Vec<Vec<Piece>> {
        (0..self.dims.rows)
            .map(|row| {
                (0..self.dims.columns)
                    .map(|col| {
                        self.get(Move {
                            row: row as u8,
                            col: col as u8,
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// Replace the whole grid. Clears the history.
    pub fn set_pieces(&mut self, grid: &[Vec<Piece>]) -> Result<(), BoardError> {
        let dims = self.dims;
        if grid.len() != dims.rows || grid.iter().any(|row| row.len() != dims.columns) {
            return Err(BoardError::GridShape {
                rows: dims.rows,
                columns: dims.columns,
            });
        }
        self.black = Bitboard::new();
        self.white = Bitboard::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &piece) in cells.iter().enumerate() {
                self.set(
                    Move {
                        row: row as u8,
                        col: col as u8,
                    },
                    piece,
                );
            }
        }
        self.history.clear();
        Ok(())
    }

    /// Full scan count of a piece kind (Empty included)
    pub fn count_pieces(&self, piece: Piece) -> usize {
        match piece {
            Piece::Black => self.black.count() as usize,
            Piece::White => self.white.count() as usize,
            Piece::Empty => {
                self.dims.cells() - self.black.count() as usize - self.white.count() as usize
            }
        }
    }

    /// Iterate over occupied cells of one color
    pub fn cells_of(&self, piece: Piece) -> impl Iterator<Item = Move> + '_ {
        let bits = match piece {
            Piece::Black => self.black,
            Piece::White => self.white,
            Piece::Empty => Bitboard::new(),
        };
        bits.iter_ones().map(move |idx| self.dims.move_at(idx))
    }

    /// Most recent placement, if any
    pub fn recent_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Remove the most recent placed piece. Flipped pieces are not restored.
    pub fn pop_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.set(mv, Piece::Empty);
        Some(mv)
    }

    /// Whether `piece` may be placed at `mv`
    pub fn is_legal(&self, mv: Move, piece: Piece) -> bool {
        rules::is_legal(self, mv, piece)
    }

    /// Place `piece` at `mv` and flip the first capturing direction.
    /// Returns false and leaves the board untouched when the move is illegal.
    pub fn apply_capture(&mut self, mv: Move, piece: Piece) -> bool {
        rules::apply_capture(self, mv, piece, CaptureRule::FirstDirection)
    }

    /// Same as `apply_capture` with an explicit flipping rule.
    pub fn apply_capture_with(&mut self, mv: Move, piece: Piece, rule: CaptureRule) -> bool {
        rules::apply_capture(self, mv, piece, rule)
    }

    /// Color-swapped copy (history kept)
    pub fn inverted(&self) -> Self {
        Self {
            dims: self.dims,
            black: self.white,
            white: self.black,
            history: self.history.clone(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = 5;
        let rule = format!("{}\n", format!("{}|", "-".repeat(w)).repeat(self.dims.columns + 1));

        f.write_str(&rule)?;
        write!(f, "{}|", "-".repeat(w))?;
        for col in 0..self.dims.columns {
            write!(f, "{:^w$}|", col)?;
        }
        f.write_str("\n")?;
        f.write_str(&rule)?;

        for row in 0..self.dims.rows {
            write!(f, "{:^w$}|", row)?;
            for col in 0..self.dims.columns {
                let piece = self.get(Move {
                    row: row as u8,
                    col: col as u8,
                });
                write!(f, "{:^w$}|", piece.symbol())?;
            }
            f.write_str("\n")?;
            f.write_str(&rule)?;
        }
        Ok(())
    }
}

/// Serialized form: shape, row-major cells and history
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    rows: usize,
    columns: usize,
    cells: Vec<Piece>,
    history: Vec<Move>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        let cells = board.pieces().into_iter().flatten().collect();
        Self {
            rows: board.dims.rows,
            columns: board.dims.columns,
            cells,
            history: board.history,
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let mut board = Board::with_dimensions(repr.rows, repr.columns)?;
        if repr.cells.len() != board.dims.cells() {
            return Err(BoardError::GridShape {
                rows: repr.rows,
                columns: repr.columns,
            });
        }
        let grid: Vec<Vec<Piece>> = repr
            .cells
            .chunks(repr.columns)
            .map(<[Piece]>::to_vec)
            .collect();
        board.set_pieces(&grid)?;
        if let Some(mv) = repr.history.iter().find(|mv| !board.contains(**mv)) {
            return Err(BoardError::HistoryOutOfRange {
                row: mv.row,
                col: mv.col,
            });
        }
        board.history = repr.history;
        Ok(board)
    }
}
