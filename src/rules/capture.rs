//! Bracketing capture for Othello
//!
//! A direction captures when, walking away from the placed piece, it crosses
//! one or more opposing pieces and then stops on a piece of the mover's color.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Piece};

/// Direction vectors in scan order: SE, NW, N, NE, W, E, SW, S
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 1),   // ↘
    (-1, -1), // ↖
    (-1, 0),  // ↑
    (-1, 1),  // ↗
    (0, -1),  // ←
    (0, 1),   // →
    (1, -1),  // ↙
    (1, 0),   // ↓
];

/// Which capturing directions get flipped by a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaptureRule {
    /// Only the first capturing direction in `DIRECTIONS` order is flipped
    #[default]
    FirstDirection,
    /// Every capturing direction is flipped (tournament Othello)
    AllDirections,
}

/// Number of opposing pieces bracketed from `mv` along `(dr, dc)`.
///
/// Returns 0 when the walk runs off the board, reaches an empty cell, or
/// meets a same-color piece before any opposing piece.
pub fn capture_length(board: &Board, mv: Move, piece: Piece, (dr, dc): (i32, i32)) -> usize {
    let dims = board.dimensions();
    let mut r = mv.row as i32 + dr;
    let mut c = mv.col as i32 + dc;
    let mut count = 0;

    while dims.contains(r, c) {
        let current = board.get(Move {
            row: r as u8,
            col: c as u8,
        });
        if current == Piece::Empty {
            return 0;
        }
        if current == piece {
            return count;
        }
        r += dr;
        c += dc;
        count += 1;
    }

    0
}

/// Check whether `piece` may be placed at `mv`.
///
/// False for an `Empty` piece, an off-board or occupied target, or a target
/// with no capturing direction.
pub fn is_legal(board: &Board, mv: Move, piece: Piece) -> bool {
    if piece == Piece::Empty || !board.contains(mv) || !board.is_empty(mv) {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&dir| capture_length(board, mv, piece, dir) > 0)
}

/// Positions that a placement at `mv` would flip under `rule`.
///
/// Empty when the placement is illegal.
pub fn captured_positions(board: &Board, mv: Move, piece: Piece, rule: CaptureRule) -> Vec<Move> {
    let mut captured = Vec::new();
    if piece == Piece::Empty || !board.contains(mv) || !board.is_empty(mv) {
        return captured;
    }

    for &(dr, dc) in &DIRECTIONS {
        let count = capture_length(board, mv, piece, (dr, dc)) as i32;
        if count == 0 {
            continue;
        }
        for i in 1..=count {
            captured.push(Move {
                row: (mv.row as i32 + i * dr) as u8,
                col: (mv.col as i32 + i * dc) as u8,
            });
        }
        if rule == CaptureRule::FirstDirection {
            break;
        }
    }

    captured
}

/// Place `piece` at `mv`, flip the captured pieces and record the placement.
///
/// Returns false and leaves the board untouched when nothing is captured.
pub fn apply_capture(board: &mut Board, mv: Move, piece: Piece, rule: CaptureRule) -> bool {
    let captured = captured_positions(board, mv, piece, rule);
    if captured.is_empty() {
        return false;
    }

    if board.place_piece(mv, piece).is_err() {
        return false;
    }
    for &pos in &captured {
        board.set(pos, piece);
    }
    debug!("{} plays {} flipping {} piece(s)", piece.name(), mv, captured.len());

    true
}
