//! Game rules for Othello
//!
//! This module implements the placement rule set:
//! - Legality: a placement must bracket at least one opposing piece
//! - Capture: bracketed opposing pieces are flipped to the mover's color

pub mod capture;

// Re-exports for convenient access
pub use capture::{
    apply_capture, capture_length, captured_positions, is_legal, CaptureRule, DIRECTIONS,
};
