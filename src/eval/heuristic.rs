//! Heuristic evaluation of Othello positions
//!
//! All functions are pure and read the game only.

use crate::board::{Dimensions, Piece};
use crate::config::HeuristicConfig;
use crate::game::Game;

use super::weights::weight;

/// Black count minus White count.
#[must_use]
pub fn material(game: &Game) -> i32 {
    game.count_pieces(Piece::Black) as i32 - game.count_pieces(Piece::White) as i32
}

/// Legal moves of the side to move minus legal moves of its opponent.
#[must_use]
pub fn mobility(game: &Game) -> i32 {
    let current = game.current_slot();
    game.valid_moves(current).len() as i32 - game.valid_moves(current.other()).len() as i32
}

/// Weighted square sum: +weight for Black, -weight for White.
///
/// Only defined for the 8x8 board; other shapes score 0.
#[must_use]
pub fn positional_strength(game: &Game) -> i32 {
    let board = game.board();
    if board.dimensions() != Dimensions::DEFAULT {
        return 0;
    }
    let sum = |piece: Piece| -> i32 {
        board
            .cells_of(piece)
            .map(|mv| weight(mv.row as usize, mv.col as usize))
            .sum()
    };
    sum(Piece::Black) - sum(Piece::White)
}

/// Sum of the enabled terms. With nothing enabled, material alone.
#[must_use]
pub fn evaluate(game: &Game, config: &HeuristicConfig) -> i32 {
    if config.is_empty() {
        return material(game);
    }

    let mut score = 0;
    if config.material {
        score += material(game);
    }
    if config.mobility {
        score += mobility(game);
    }
    if config.positional {
        score += positional_strength(game);
    }
    score
}
