//! Search module for the Othello AI
//!
//! Contains:
//! - Search tree nodes holding independent game snapshots
//! - Tree construction with an owned node counter
//! - Minimax, negamax and alpha-beta over a built tree

pub mod minimax;
pub mod node;
pub mod tree;

pub use minimax::{alpha_beta, minimax, negamax, INF};
pub use node::{NodeType, PlayerType, SearchNode};
pub use tree::TreeBuilder;
