//! Minimax, negamax and alpha-beta over a prebuilt tree
//!
//! Every algorithm stores the value it computes on the node it visits, so the
//! caller can read scores off the root's children afterwards.

use log::trace;

use super::node::{PlayerType, SearchNode};
use crate::config::HeuristicConfig;
use crate::eval::evaluate;

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

fn is_terminal(node: &SearchNode, depth: u32) -> bool {
    depth == 0 || node.is_leaf() || node.children.is_empty()
}

fn evaluate_leaf(node: &mut SearchNode, config: &HeuristicConfig) -> i32 {
    debug_assert!(
        node.is_leaf() || !node.children.is_empty(),
        "internal node #{} has no children",
        node.number
    );
    node.heuristic = evaluate(&node.game, config);
    trace!("{}", node.summary());
    node.heuristic
}

/// Plain minimax: MAX nodes take the largest child value, MIN nodes the smallest.
pub fn minimax(node: &mut SearchNode, depth: u32, config: &HeuristicConfig) -> i32 {
    if is_terminal(node, depth) {
        return evaluate_leaf(node, config);
    }

    let player_type = node.player_type;
    let values = node
        .children
        .iter_mut()
        .map(|child| minimax(child, depth - 1, config));
    let value = match player_type {
        PlayerType::Max => values.fold(-INF, i32::max),
        PlayerType::Min => values.fold(INF, i32::min),
    };

    node.heuristic = value;
    trace!("{}", node.summary());
    value
}

/// Single-perspective search: the best of the negated child values.
pub fn negamax(node: &mut SearchNode, depth: u32, config: &HeuristicConfig) -> i32 {
    if is_terminal(node, depth) {
        return evaluate_leaf(node, config);
    }

    let value = node
        .children
        .iter_mut()
        .map(|child| -negamax(child, depth - 1, config))
        .fold(-INF, i32::max);

    node.heuristic = value;
    trace!("{}", node.summary());
    value
}

/// Minimax with alpha-beta pruning. Children after a cutoff are not visited
/// and keep whatever value they held before.
///
/// Called with the full window `(-INF, INF)` it returns the same value as
/// [`minimax`] on the same tree and depth.
pub fn alpha_beta(
    node: &mut SearchNode,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    config: &HeuristicConfig,
) -> i32 {
    if is_terminal(node, depth) {
        return evaluate_leaf(node, config);
    }

    let value = match node.player_type {
        PlayerType::Max => {
            let mut max_value = -INF;
            for child in node.children.iter_mut() {
                max_value = max_value.max(alpha_beta(child, depth - 1, alpha, beta, config));
                alpha = alpha.max(max_value);
                node.alpha = Some(alpha);
                if beta <= alpha {
                    break;
                }
            }
            max_value
        }
        PlayerType::Min => {
            let mut min_value = INF;
            for child in node.children.iter_mut() {
                min_value = min_value.min(alpha_beta(child, depth - 1, alpha, beta, config));
                beta = beta.min(min_value);
                node.beta = Some(beta);
                if beta <= alpha {
                    break;
                }
            }
            min_value
        }
    };

    node.heuristic = value;
    trace!("{}", node.summary());
    value
}
