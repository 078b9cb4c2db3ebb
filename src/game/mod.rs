//! Two-player game state: board, players, turn and per-player move logs

pub mod session;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Piece};
use crate::rules::{self, CaptureRule};

pub use session::{ChangeEvent, GameSession, SubscriberId};

/// Which of the two seats a player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    First,
    Second,
}

impl PlayerSlot {
    #[inline]
    pub fn other(self) -> PlayerSlot {
        match self {
            PlayerSlot::First => PlayerSlot::Second,
            PlayerSlot::Second => PlayerSlot::First,
        }
    }
}

/// A player with a fixed color and a stack of played moves (top = last)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    piece: Piece,
    count: usize,
    moves: Vec<Move>,
}

impl Player {
    pub fn new(name: impl Into<String>, piece: Piece) -> Self {
        Self {
            name: name.into(),
            piece,
            count: 0,
            moves: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Piece count as of the last applied move
    pub fn count(&self) -> usize {
        self.count
    }

    /// Moves played, oldest first
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} pieces)", self.name, self.piece.name(), self.count)
    }
}

/// The move a player made, as recorded on a search node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMove {
    pub slot: PlayerSlot,
    pub piece: Piece,
    pub mv: Move,
}

/// Board, two players and whose turn it is. Cloning gives an independent copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    first: Player,
    second: Player,
    current: PlayerSlot,
    #[serde(default)]
    capture_rule: CaptureRule,
}

impl Game {
    /// Standard opening with Black moving first
    pub fn new() -> Self {
        Self::with_first_piece(Piece::Black)
    }

    /// Opening position where the first player holds `piece`.
    ///
    /// `Piece::Empty` falls back to Black.
    pub fn with_first_piece(piece: Piece) -> Self {
        let piece = if piece == Piece::Empty {
            Piece::Black
        } else {
            piece
        };
        Self::with_board(Board::new(), piece)
    }

    /// Start from an arbitrary board
    pub fn with_board(board: Board, first_piece: Piece) -> Self {
        let mut game = Self {
            board,
            first: Player::new("J1", first_piece),
            second: Player::new("J2", first_piece.opponent()),
            current: PlayerSlot::First,
            capture_rule: CaptureRule::default(),
        };
        game.refresh_counts();
        game
    }

    pub fn with_capture_rule(mut self, rule: CaptureRule) -> Self {
        self.capture_rule = rule;
        self
    }

    pub fn capture_rule(&self) -> CaptureRule {
        self.capture_rule
    }

    pub fn set_capture_rule(&mut self, rule: CaptureRule) {
        self.capture_rule = rule;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board and refresh both counts. Move logs are kept.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.refresh_counts();
    }

    /// Raw placement with no legality check or flipping.
    ///
    /// Returns false and changes nothing when `mv` lies outside the board.
    pub fn place_piece(&mut self, mv: Move, piece: Piece) -> bool {
        if let Err(err) = self.board.place_piece(mv, piece) {
            debug!("placement rejected: {}", err);
            return false;
        }
        self.refresh_counts();
        true
    }

    pub fn first_player(&self) -> &Player {
        &self.first
    }

    pub fn second_player(&self) -> &Player {
        &self.second
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        match slot {
            PlayerSlot::First => &self.first,
            PlayerSlot::Second => &self.second,
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        match slot {
            PlayerSlot::First => &mut self.first,
            PlayerSlot::Second => &mut self.second,
        }
    }

    pub fn current_slot(&self) -> PlayerSlot {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn opponent_player(&self) -> &Player {
        self.player(self.current.other())
    }

    pub fn is_first_player_current(&self) -> bool {
        self.current == PlayerSlot::First
    }

    pub fn set_current(&mut self, slot: PlayerSlot) {
        self.current = slot;
    }

    /// Swap the current player. No validation.
    pub fn change_turn(&mut self) {
        self.current = self.current.other();
    }

    /// Legal moves for a player, in row-major order
    pub fn valid_moves(&self, slot: PlayerSlot) -> Vec<Move> {
        let piece = self.player(slot).piece;
        let dims = self.board.dimensions();
        (0..dims.cells())
            .map(|idx| dims.move_at(idx))
            .filter(|&mv| rules::is_legal(&self.board, mv, piece))
            .collect()
    }

    /// Whether a player may play `mv` now
    pub fn is_valid_move(&self, mv: Move, slot: PlayerSlot) -> bool {
        rules::is_legal(&self.board, mv, self.player(slot).piece)
    }

    /// Apply `mv` for `slot`: flip, refresh counts and log the move.
    ///
    /// Returns false with no side effects if the move is illegal.
    pub fn apply_move(&mut self, mv: Move, slot: PlayerSlot) -> bool {
        let piece = self.player(slot).piece;
        if !rules::apply_capture(&mut self.board, mv, piece, self.capture_rule) {
            return false;
        }
        self.refresh_counts();
        self.player_mut(slot).moves.push(mv);
        debug!(
            "{} played {} (J1 {} / J2 {})",
            self.player(slot).name,
            mv,
            self.first.count,
            self.second.count
        );
        true
    }

    fn refresh_counts(&mut self) {
        self.first.count = self.board.count_pieces(self.first.piece);
        self.second.count = self.board.count_pieces(self.second.piece);
    }

    /// Both players are out of moves
    pub fn is_over(&self) -> bool {
        self.valid_moves(PlayerSlot::First).is_empty()
            && self.valid_moves(PlayerSlot::Second).is_empty()
    }

    /// Player with more pieces; `None` on a tie
    pub fn winner(&self) -> Option<&Player> {
        let first = self.count_pieces(self.first.piece);
        let second = self.count_pieces(self.second.piece);
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Some(&self.first),
            std::cmp::Ordering::Less => Some(&self.second),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn count_pieces(&self, piece: Piece) -> usize {
        self.board.count_pieces(piece)
    }

    /// Independent deep copy for exploring a branch
    pub fn snapshot(&self) -> Game {
        self.clone()
    }

    /// Top of a player's move log
    pub fn recent_move(&self, slot: PlayerSlot) -> Option<PlayerMove> {
        let player = self.player(slot);
        player.last_move().map(|mv| PlayerMove {
            slot,
            piece: player.piece,
            mv,
        })
    }

    /// Fresh opening board and empty logs; names, colors and rule are kept.
    pub fn reset(&mut self) {
        let dims = self.board.dimensions();
        self.board = Board::with_dimensions(dims.rows, dims.columns).unwrap_or_default();
        self.first.moves.clear();
        self.second.moves.clear();
        self.current = PlayerSlot::First;
        self.refresh_counts();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: i32, col: i32) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_counts() {
        let game = Game::new();
        assert_eq!(game.first_player().count(), 2);
        assert_eq!(game.second_player().count(), 2);
        assert_eq!(game.first_player().piece(), Piece::Black);
        assert_eq!(game.second_player().piece(), Piece::White);
        assert!(game.is_first_player_current());
    }

    #[test]
    fn test_valid_moves_row_major() {
        let game = Game::new();
        assert_eq!(
            game.valid_moves(PlayerSlot::First),
            vec![mv(2, 3), mv(3, 2), mv(4, 5), mv(5, 4)]
        );
        assert_eq!(
            game.valid_moves(PlayerSlot::Second),
            vec![mv(2, 4), mv(3, 5), mv(4, 2), mv(5, 3)]
        );
    }

    #[test]
    fn test_apply_move_updates_counts_and_log() {
        let mut game = Game::new();
        assert!(game.apply_move(mv(2, 3), PlayerSlot::First));
        assert_eq!(game.first_player().count(), 4);
        assert_eq!(game.second_player().count(), 1);
        assert_eq!(game.first_player().moves(), &[mv(2, 3)]);
        assert!(game.second_player().moves().is_empty());
        assert_eq!(
            game.count_pieces(Piece::Black) + game.count_pieces(Piece::White),
            5
        );
        // apply_move does not advance the turn
        assert!(game.is_first_player_current());
    }

    #[test]
    fn test_illegal_move_has_no_side_effects() {
        let mut game = Game::new();
        let before = game.clone();
        assert!(!game.apply_move(mv(0, 0), PlayerSlot::First));
        assert_eq!(game, before);
    }

    #[test]
    fn test_change_turn() {
        let mut game = Game::new();
        game.change_turn();
        assert_eq!(game.current_slot(), PlayerSlot::Second);
        assert_eq!(game.current_player().piece(), Piece::White);
        assert_eq!(game.opponent_player().piece(), Piece::Black);
        game.change_turn();
        assert_eq!(game.current_slot(), PlayerSlot::First);
    }

    #[test]
    fn test_recent_move() {
        let mut game = Game::new();
        assert_eq!(game.recent_move(PlayerSlot::First), None);
        game.apply_move(mv(2, 3), PlayerSlot::First);
        assert_eq!(
            game.recent_move(PlayerSlot::First),
            Some(PlayerMove {
                slot: PlayerSlot::First,
                piece: Piece::Black,
                mv: mv(2, 3),
            })
        );
        assert_eq!(game.recent_move(PlayerSlot::Second), None);
    }

    #[test]
    fn test_snapshot_isolation() {
        let mut game = Game::new();
        let mut clone = game.snapshot();
        assert!(clone.apply_move(mv(2, 3), PlayerSlot::First));
        clone.change_turn();
        assert_eq!(game.count_pieces(Piece::Black), 2);
        assert!(game.first_player().moves().is_empty());
        assert!(game.is_first_player_current());

        assert!(game.apply_move(mv(3, 2), PlayerSlot::First));
        assert_eq!(clone.first_player().moves(), &[mv(2, 3)]);
    }

    fn board_from(rows: &[&str]) -> Board {
        let grid: Vec<Vec<Piece>> = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        'B' => Piece::Black,
                        'W' => Piece::White,
                        _ => Piece::Empty,
                    })
                    .collect()
            })
            .collect();
        let mut board = Board::new();
        board.set_pieces(&grid).unwrap();
        board
    }

    #[test]
    fn test_game_over_when_nobody_can_move() {
        let board = board_from(&[
            "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "WWWWWWWW", "WWWWWWWW", "WWWWWWWW",
            "WWWWWWWW",
        ]);
        let game = Game::with_board(board, Piece::Black);
        assert!(game.is_over());
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_not_over_when_one_side_can_move() {
        // Black can capture at (0,2); the Black corner cannot be bracketed
        let board = board_from(&[
            "BW......", "........", "........", "........", "........", "........", "........",
            "........",
        ]);
        let game = Game::with_board(board, Piece::Black);
        assert_eq!(game.valid_moves(PlayerSlot::First), vec![mv(0, 2)]);
        assert!(game.valid_moves(PlayerSlot::Second).is_empty());
        assert!(!game.is_over());
    }

    #[test]
    fn test_winner_by_count() {
        let board = board_from(&[
            "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BBBBBBBB", "BWWWWWWW", "WWWWWWWW", "WWWWWWWW",
            "WWWWWWWW",
        ]);
        let game = Game::with_board(board, Piece::White);
        assert!(game.is_over());
        let winner = game.winner().unwrap();
        assert_eq!(winner.piece(), Piece::Black);
        assert_eq!(winner.name(), "J2");
    }

    #[test]
    fn test_reset_keeps_players() {
        let mut game = Game::with_first_piece(Piece::White);
        game.apply_move(mv(2, 4), PlayerSlot::First);
        game.change_turn();
        game.reset();
        assert_eq!(game, Game::with_first_piece(Piece::White));
    }

    #[test]
    fn test_all_directions_rule_flows_through_apply_move() {
        let board = board_from(&[
            "........", "........", "........", "........", "........", "....WW..", "....B.B.",
            "........",
        ]);
        let mut game = Game::with_board(board.clone(), Piece::Black);
        assert!(game.apply_move(mv(4, 4), PlayerSlot::First));
        assert_eq!(game.count_pieces(Piece::White), 1);

        let mut game =
            Game::with_board(board, Piece::Black).with_capture_rule(CaptureRule::AllDirections);
        assert!(game.apply_move(mv(4, 4), PlayerSlot::First));
        assert_eq!(game.count_pieces(Piece::White), 0);
    }
}
