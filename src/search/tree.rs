//! Game tree construction
//!
//! The builder owns the node counter. Numbers keep increasing across
//! `build` calls until [`TreeBuilder::reset`] is called.

use log::debug;

use super::node::{NodeType, PlayerType, SearchNode};
use crate::game::{Game, PlayerSlot};

#[derive(Debug, Default)]
pub struct TreeBuilder {
    counter: u64,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart numbering at 1
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Nodes numbered since the last reset
    pub fn nodes_created(&self) -> u64 {
        self.counter
    }

    /// Build the full tree below `game`, `depth` plies deep.
    pub fn build(&mut self, game: &Game, depth: u32) -> SearchNode {
        let start = self.counter;
        let root = self.build_node(game, depth);
        debug!(
            "built tree of depth {} with {} nodes",
            depth,
            self.counter - start
        );
        root
    }

    fn build_node(&mut self, game: &Game, depth: u32) -> SearchNode {
        self.counter += 1;
        let number = self.counter;

        let mover = game.current_slot();
        let moves = game.valid_moves(mover);
        let branch_factor = moves.len();

        let player_type = match mover {
            PlayerSlot::First => PlayerType::Min,
            PlayerSlot::Second => PlayerType::Max,
        };
        let node_type = if branch_factor == 0 || depth == 0 {
            NodeType::Leaf
        } else {
            NodeType::Internal
        };

        // Labeled with the last move of whoever moved into this state
        let move_entry = game.recent_move(mover.other());

        let children = match node_type {
            NodeType::Leaf => Vec::new(),
            NodeType::Internal => moves
                .into_iter()
                .map(|mv| {
                    let mut child = game.snapshot();
                    let applied = child.apply_move(mv, mover);
                    debug_assert!(applied, "enumerated move {} must be legal", mv);
                    child.change_turn();
                    self.build_node(&child, depth - 1)
                })
                .collect(),
        };

        SearchNode {
            number,
            player_type,
            node_type,
            heuristic: 0,
            alpha: None,
            beta: None,
            children,
            branch_factor: if node_type == NodeType::Leaf { 0 } else { branch_factor },
            move_entry,
            game: game.snapshot(),
        }
    }
}
