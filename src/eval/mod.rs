//! Position evaluation
//!
//! Three terms, each scored from Black's side except mobility, which is
//! scored from the side to move:
//! - material: piece difference
//! - mobility: legal-move difference
//! - positional strength: weighted squares

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, material, mobility, positional_strength};
pub use weights::POSITION_WEIGHTS;
