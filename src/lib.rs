//! Othello rules engine with game-tree search
//!
//! - Standard 8x8 board (other shapes with 64 cells are accepted)
//! - A placement must bracket opposing pieces; bracketed pieces flip
//! - The game ends when neither player can move; more pieces wins
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Legality and capture
//! - [`game`]: Players, turns, move logs and an observable session
//! - [`eval`]: Material, mobility and positional heuristics
//! - [`search`]: Search tree plus minimax, negamax and alpha-beta
//! - [`engine`]: AI engine tying the search to a game
//! - [`config`] / [`persist`]: Settings and saved matches
//! - [`ui`]: egui front-end
//!
//! # Quick Start
//!
//! ```
//! use othello::{AIEngine, Game, PlayerSlot, Settings, SearchAlgorithm};
//!
//! let mut game = Game::new();
//! let mv = othello::Move::new(2, 3).unwrap();
//! assert!(game.apply_move(mv, PlayerSlot::First));
//! game.change_turn();
//!
//! let settings = Settings {
//!     algorithm: SearchAlgorithm::AlphaBeta,
//!     ..Settings::default()
//! };
//! let mut engine = AIEngine::new(settings);
//! if let Some(reply) = engine.get_move(&game) {
//!     println!("AI plays at {}", reply);
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod game;
pub mod persist;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Move, Piece, DEFAULT_COLUMNS, DEFAULT_ROWS, TOTAL_CELLS};
pub use config::{Difficulty, GameMode, HeuristicConfig, SearchAlgorithm, Settings};
pub use engine::{AIEngine, MoveResult};
pub use game::{Game, Player, PlayerSlot};
