//! Collapsible view of the last searched tree

use egui::{CollapsingHeader, RichText};

use crate::search::{PlayerType, SearchNode};

use super::theme::*;

fn node_label(node: &SearchNode) -> RichText {
    let mut text = format!("#{} {} h={}", node.number(), node.player_type(), node.heuristic());
    if let Some(alpha) = node.alpha() {
        text.push_str(&format!(" α={}", alpha));
    }
    if let Some(beta) = node.beta() {
        text.push_str(&format!(" β={}", beta));
    }
    if let Some(mv) = node.last_move() {
        text.push_str(&format!("  {}", mv));
    }
    let color = match node.player_type() {
        PlayerType::Max => NODE_MAX,
        PlayerType::Min => NODE_MIN,
    };
    RichText::new(text).size(11.0).monospace().color(color)
}

/// Render `node` and its subtree; leaves are plain labels
pub fn show(ui: &mut egui::Ui, node: &SearchNode) {
    if node.children().is_empty() {
        ui.label(node_label(node));
        return;
    }

    CollapsingHeader::new(node_label(node))
        .id_salt(node.number())
        .default_open(node.number() == 1)
        .show(ui, |ui| {
            for child in node.children() {
                show(ui, child);
            }
        });
}
