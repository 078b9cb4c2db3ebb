//! Search tree node
//!
//! Each node owns an independent [`Game`] snapshot, so sibling subtrees never
//! share state.

use std::fmt;
use std::fmt::Write as _;

use crate::board::Move;
use crate::game::{Game, PlayerMove};

/// Whose objective a node optimizes.
///
/// The side to move is labeled `Min` when it is the first player, `Max` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerType {
    Min,
    Max,
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerType::Min => "MIN",
            PlayerType::Max => "MAX",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Leaf,
    Internal,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeType::Leaf => "LEAF",
            NodeType::Internal => "INTERNAL",
        })
    }
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub(crate) number: u64,
    pub(crate) player_type: PlayerType,
    pub(crate) node_type: NodeType,
    pub(crate) heuristic: i32,
    pub(crate) alpha: Option<i32>,
    pub(crate) beta: Option<i32>,
    pub(crate) children: Vec<SearchNode>,
    pub(crate) branch_factor: usize,
    pub(crate) move_entry: Option<PlayerMove>,
    pub(crate) game: Game,
}

impl SearchNode {
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn is_leaf(&self) -> bool {
        self.node_type == NodeType::Leaf
    }

    /// Last value stored by a search algorithm (0 before any search)
    pub fn heuristic(&self) -> i32 {
        self.heuristic
    }

    /// Set only by alpha-beta on MAX nodes
    pub fn alpha(&self) -> Option<i32> {
        self.alpha
    }

    /// Set only by alpha-beta on MIN nodes
    pub fn beta(&self) -> Option<i32> {
        self.beta
    }

    pub fn children(&self) -> &[SearchNode] {
        &self.children
    }

    /// Number of legal moves at this state; 0 for leaves
    pub fn branch_factor(&self) -> usize {
        self.branch_factor
    }

    /// The move that produced this node from its parent
    pub fn move_entry(&self) -> Option<PlayerMove> {
        self.move_entry
    }

    /// Shortcut for the move part of `move_entry`
    pub fn last_move(&self) -> Option<Move> {
        self.move_entry.map(|entry| entry.mv)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SearchNode::node_count).sum::<usize>()
    }

    /// Compact one-line form used in trace output
    pub fn summary(&self) -> String {
        format!(
            "[num:{}, type:{}, player:{}, h:{}]",
            self.number, self.node_type, self.player_type, self.heuristic
        )
    }

    /// Indented dump of the whole subtree, each line tagged with its parent
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, None, 0);
        out
    }

    fn render_into(&self, out: &mut String, parent: Option<u64>, depth: usize) {
        let parent = parent.map_or_else(|| "root".to_string(), |n| format!("#{}", n));
        let mv = self.last_move().map_or_else(|| "-".to_string(), |m| m.to_string());
        let _ = writeln!(
            out,
            "{:indent$}{} <- {} move {}",
            "",
            self.summary(),
            parent,
            mv,
            indent = depth * 2
        );
        for child in &self.children {
            child.render_into(out, Some(self.number), depth + 1);
        }
    }
}

impl fmt::Display for SearchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node #{} {} {} heuristic={} branches={}",
            self.number, self.player_type, self.node_type, self.heuristic, self.branch_factor
        )?;
        if let Some(alpha) = self.alpha {
            write!(f, " alpha={}", alpha)?;
        }
        if let Some(beta) = self.beta {
            write!(f, " beta={}", beta)?;
        }
        match self.move_entry {
            Some(entry) => write!(
                f,
                " move={} {} by {}",
                entry.piece.name(),
                entry.mv,
                self.game.player(entry.slot).name()
            ),
            None => f.write_str(" move=none"),
        }
    }
}
