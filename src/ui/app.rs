//! Main application for the Othello GUI

use eframe::egui;
use egui::{
    CentralPanel, ComboBox, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel,
    TopBottomPanel, Vec2,
};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::GameState;
use super::theme::*;
use super::tree_view;
use crate::board::Piece;
use crate::config::{Difficulty, GameMode, SearchAlgorithm, Settings};
use crate::game::Player;

/// Main Othello application
pub struct OthelloApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    show_tree: bool,
}

impl OthelloApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        Self {
            state: GameState::new(settings),
            board_view: BoardView::default(),
            show_debug: true,
            show_tree: false,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (Player vs Machine)").clicked() {
                        self.state.new_game(GameMode::PlayerVsMachine);
                        ui.close_menu();
                    }
                    if ui.button("New Game (Player vs Player)").clicked() {
                        self.state.new_game(GameMode::PlayerVsPlayer);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo (U)").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                    if ui.button("Save").clicked() {
                        self.state.save();
                        ui.close_menu();
                    }
                    if ui.button("Load").clicked() {
                        self.state.load();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    ui.checkbox(&mut self.show_tree, "Search Tree (T)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.state.settings().mode.label());
                });
            });
        });
    }

    /// Render the side panel with game info and controls
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(260.0)
            .max_width(300.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(12.0);
                    self.render_title_card(ui);
                    ui.add_space(12.0);

                    if self.state.is_over() {
                        self.render_game_over_card(ui);
                    } else {
                        self.render_turn_card(ui);
                    }
                    ui.add_space(10.0);

                    self.render_score_card(ui);
                    ui.add_space(10.0);

                    self.render_settings_card(ui);
                    ui.add_space(10.0);

                    self.render_actions_card(ui);
                    ui.add_space(10.0);

                    self.render_file_card(ui);

                    if self.show_debug {
                        ui.add_space(10.0);
                        self.render_debug_card(ui);
                    }

                    if let Some(msg) = self.state.message.clone() {
                        ui.add_space(10.0);
                        self.render_message_card(ui, &msg);
                    }
                });
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn card_title(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(10.0).color(TEXT_MUTED));
        ui.add_space(6.0);
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(TEXT_SECONDARY));
            ui.add_space(4.0);
            ui.label(RichText::new("OTHELLO").size(22.0).strong().color(TEXT_PRIMARY));
        });
    }

    fn piece_glyph(piece: Piece) -> (&'static str, egui::Color32) {
        match piece {
            Piece::Black => ("●", egui::Color32::from_rgb(70, 70, 75)),
            _ => ("○", egui::Color32::from_rgb(220, 220, 225)),
        }
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        let player = self.state.game().current_player();
        let (glyph, accent) = Self::piece_glyph(player.piece());

        Self::card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    glyph,
                    egui::FontId::proportional(28.0),
                    TEXT_PRIMARY,
                );

                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("{} ({})", player.name(), player.piece().name()))
                            .size(16.0)
                            .strong()
                            .color(TEXT_PRIMARY),
                    );
                    let status = if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                        (format!("AI thinking... {:.1}s", elapsed.as_secs_f32()), STATUS_WARNING)
                    } else if self.state.is_ai_turn() {
                        ("AI to move".to_string(), STATUS_WARNING)
                    } else {
                        (
                            format!("Your turn · {:.0}s", self.state.move_timer.elapsed().as_secs_f32()),
                            STATUS_OK,
                        )
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_score_row(ui: &mut egui::Ui, player: &Player) {
        let (glyph, accent) = Self::piece_glyph(player.piece());
        ui.horizontal(|ui| {
            ui.label(RichText::new(glyph).size(18.0).color(accent));
            ui.label(RichText::new(player.name()).size(13.0).color(TEXT_PRIMARY));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(player.count().to_string()).size(16.0).strong().color(TEXT_PRIMARY));
            });
        });
    }

    fn render_score_card(&self, ui: &mut egui::Ui) {
        let game = self.state.game();
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "SCORE");
            Self::render_score_row(ui, game.first_player());
            ui.add_space(4.0);
            Self::render_score_row(ui, game.second_player());
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Move #{}", game.board().history().len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_settings_card(&mut self, ui: &mut egui::Ui) {
        let settings = self.state.settings().clone();
        let mut difficulty = settings.difficulty;
        let mut algorithm = settings.algorithm;
        let mut heuristics = settings.heuristics;
        let thinking = self.state.is_ai_thinking();

        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "AI");
            ui.add_enabled_ui(!thinking, |ui| {
                ComboBox::from_id_salt("difficulty")
                    .selected_text(difficulty.name())
                    .show_ui(ui, |ui| {
                        for d in Difficulty::ALL {
                            ui.selectable_value(&mut difficulty, d, format!("{} (depth {})", d, d.depth()));
                        }
                    });
                ComboBox::from_id_salt("algorithm")
                    .selected_text(algorithm.label())
                    .show_ui(ui, |ui| {
                        for a in SearchAlgorithm::ALL {
                            ui.selectable_value(&mut algorithm, a, a.label());
                        }
                    });
                ui.checkbox(&mut heuristics.material, "Material");
                ui.checkbox(&mut heuristics.mobility, "Mobility");
                ui.checkbox(&mut heuristics.positional, "Positional strength");
            });
            ui.label(RichText::new(format!("Evaluates {}", heuristics)).size(10.0).color(TEXT_SECONDARY));
        });

        if difficulty != settings.difficulty {
            self.state.session.set_difficulty(difficulty);
        }
        if algorithm != settings.algorithm {
            self.state.session.set_algorithm(algorithm);
        }
        if heuristics != settings.heuristics {
            self.state.session.set_heuristics(heuristics);
        }
    }

    fn action_button(ui: &mut egui::Ui, text: &str) -> bool {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click()))
                    .clicked()
            })
            .inner
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "ACTIONS");
            ui.horizontal(|ui| {
                if Self::action_button(ui, "↩ Undo") {
                    self.state.undo();
                }
                if Self::action_button(ui, "💡 Hint") {
                    self.state.request_hint();
                }
                if Self::action_button(ui, "🔄 New") {
                    self.state.reset();
                }
            });
        });
    }

    fn render_file_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "SAVE / LOAD");
            ui.text_edit_singleline(&mut self.state.save_path);
            ui.horizontal(|ui| {
                if Self::action_button(ui, "Save") {
                    self.state.save();
                }
                if Self::action_button(ui, "Load") {
                    self.state.load();
                }
            });
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "AI DEBUG");
            match &self.state.last_ai_result {
                Some(result) => {
                    ui.label(RichText::new(result.algorithm.label()).size(11.0).strong().color(STATUS_OK));
                    ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                    ui.label(
                        RichText::new(format!("{} nodes in {}ms", result.nodes, result.time_ms))
                            .size(10.0)
                            .color(TEXT_SECONDARY),
                    );
                    let mv = result
                        .best_move
                        .map_or_else(|| "pass".to_string(), |mv| mv.to_string());
                    ui.label(RichText::new(format!("→ {}", mv)).size(12.0).strong().color(WIN_HIGHLIGHT));
                }
                None => {
                    ui.label(RichText::new("No search yet").size(10.0).color(TEXT_MUTED));
                }
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui) {
        let headline = match self.state.game().winner() {
            Some(player) => format!("{} ({}) wins!", player.name(), player.piece().name()),
            None => "It's a tie".to_string(),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(12.0);
                    if Self::action_button(ui, "🔄 New Game") {
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(&self, ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_tree_panel(&self, ctx: &Context) {
        TopBottomPanel::bottom("search_tree")
            .resizable(true)
            .default_height(220.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.label(RichText::new("SEARCH TREE").size(10.0).color(TEXT_MUTED));
                ScrollArea::both().show(ui, |ui| match &self.state.last_ai_result {
                    Some(result) => tree_view::show(ui, &result.tree),
                    None => {
                        ui.label(RichText::new("Run the AI or ask for a hint").size(10.0).color(TEXT_MUTED));
                    }
                });
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let legal_moves = self.state.legal_moves();
            let game = self.state.game();
            let overlay = BoardOverlay {
                to_move: game.current_player().piece(),
                legal_moves: &legal_moves,
                last_move: game.board().recent_move(),
                hint: self.state.hint,
                accept_input: self.state.is_human_turn() && !self.state.is_ai_thinking() && !game.is_over(),
            };

            let clicked = self.board_view.show(ui, game.board(), &overlay);
            if let Some(mv) = clicked {
                if let Err(msg) = self.state.try_play(mv) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::T) {
                self.show_tree = !self.show_tree;
            }
            if i.key_pressed(egui::Key::H) {
                self.state.request_hint();
            }
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for OthelloApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        self.state.pass_if_stuck();
        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && !self.state.is_over() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        if self.show_tree {
            self.render_tree_panel(ctx);
        }
        self.render_board(ctx);

        if self.state.take_changed() || self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
