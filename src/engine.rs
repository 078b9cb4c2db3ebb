//! AI engine tying tree construction and search together
//!
//! For each request the engine:
//!
//! 1. Builds a fresh tree from the game, numbering from 1
//! 2. Runs the configured algorithm to the difficulty depth
//! 3. Picks the root child holding the root's best value
//!
//! # Example
//!
//! ```
//! use othello::{AIEngine, Game, Settings};
//!
//! let game = Game::new();
//! let mut engine = AIEngine::new(Settings::default());
//! let result = engine.choose_move(&game);
//! println!("Best move: {:?}", result.best_move);
//! println!("Nodes: {} in {}ms", result.nodes, result.time_ms);
//! ```

use std::time::Instant;

use log::info;

use crate::board::Move;
use crate::config::{SearchAlgorithm, Settings};
use crate::game::Game;
use crate::search::{alpha_beta, minimax, negamax, PlayerType, SearchNode, TreeBuilder, INF};

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Move to play, `None` when the side to move must pass
    pub best_move: Option<Move>,
    /// Value stored on the root
    pub score: i32,
    pub algorithm: SearchAlgorithm,
    /// Nodes in the searched tree
    pub nodes: u64,
    /// Build plus search time in milliseconds
    pub time_ms: u64,
    /// Searched tree, values filled in
    pub tree: SearchNode,
}

/// Main AI engine for Othello.
pub struct AIEngine {
    builder: TreeBuilder,
    settings: Settings,
}

impl AIEngine {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            builder: TreeBuilder::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Best move for the side to move in `game`
    #[must_use]
    pub fn get_move(&mut self, game: &Game) -> Option<Move> {
        self.choose_move(game).best_move
    }

    /// Search the position and return the move with statistics.
    ///
    /// The game is not modified.
    pub fn choose_move(&mut self, game: &Game) -> MoveResult {
        let depth = self.settings.depth();
        let algorithm = self.settings.algorithm;
        let heuristics = self.settings.heuristics;

        let start = Instant::now();
        self.builder.reset();
        let mut tree = self.builder.build(game, depth);
        let nodes = self.builder.nodes_created();
        info!(
            "tree built in {} ms ({} nodes, depth {})",
            start.elapsed().as_millis(),
            nodes,
            depth
        );

        let search_start = Instant::now();
        let score = match algorithm {
            SearchAlgorithm::Minimax => minimax(&mut tree, depth, &heuristics),
            SearchAlgorithm::AlphaBeta => alpha_beta(&mut tree, depth, -INF, INF, &heuristics),
            SearchAlgorithm::Negamax => negamax(&mut tree, depth, &heuristics),
        };
        info!(
            "{} in {} ms (score {})",
            algorithm,
            search_start.elapsed().as_millis(),
            score
        );

        let best_move = select_child(&tree, algorithm).and_then(SearchNode::last_move);
        MoveResult {
            best_move,
            score,
            algorithm,
            nodes,
            time_ms: start.elapsed().as_millis() as u64,
            tree,
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// First root child whose stored value realizes the root's objective.
///
/// MAX roots take the largest child value, MIN roots the smallest. Negamax
/// takes the largest negated child value. Ties go to the earliest child in
/// move order, which under alpha-beta is the one searched with a full window.
pub fn select_child(root: &SearchNode, algorithm: SearchAlgorithm) -> Option<&SearchNode> {
    let score = |child: &SearchNode| -> i32 {
        match (algorithm, root.player_type()) {
            (SearchAlgorithm::Negamax, _) => -child.heuristic(),
            (_, PlayerType::Max) => child.heuristic(),
            (_, PlayerType::Min) => -child.heuristic(),
        }
    };

    let mut best: Option<(&SearchNode, i32)> = None;
    for child in root.children() {
        let value = score(child);
        if best.map_or(true, |(_, v)| value > v) {
            best = Some((child, value));
        }
    }
    best.map(|(child, _)| child)
}
