//! Board rendering for the Othello GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Move, Piece};

use super::theme::*;

/// What the board should draw besides the pieces
pub struct BoardOverlay<'a> {
    /// Piece of the side to move
    pub to_move: Piece,
    /// Legal moves to mark; empty when input is disabled
    pub legal_moves: &'a [Move],
    pub last_move: Option<Move>,
    pub hint: Option<Move>,
    pub accept_input: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Grid area (inside the margin)
    grid_rect: Rect,
    rows: usize,
    columns: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            grid_rect: Rect::NOTHING,
            rows: 8,
            columns: 8,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked legal move, if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay<'_>) -> Option<Move> {
        self.rows = board.rows();
        self.columns = board.columns();

        let available = ui.available_size() - Vec2::splat(20.0);
        self.cell_size = ((available.x - 2.0 * BOARD_MARGIN) / self.columns as f32)
            .min((available.y - 2.0 * BOARD_MARGIN) / self.rows as f32)
            .max(8.0);
        let size = Vec2::new(
            self.columns as f32 * self.cell_size + 2.0 * BOARD_MARGIN,
            self.rows as f32 * self.cell_size + 2.0 * BOARD_MARGIN,
        );

        let (response, painter) = ui.allocate_painter(size, Sense::click());
        painter.rect_filled(response.rect, CornerRadius::same(6), BOARD_BORDER);
        self.grid_rect = response.rect.shrink(BOARD_MARGIN);
        painter.rect_filled(self.grid_rect, CornerRadius::ZERO, BOARD_BG);

        self.draw_grid(&painter);
        self.draw_coordinates(&painter);
        self.draw_pieces(&painter, board);

        if let Some(mv) = overlay.last_move {
            self.draw_last_move_marker(&painter, mv);
        }
        if overlay.accept_input {
            for &mv in overlay.legal_moves {
                self.draw_legal_dot(&painter, mv);
            }
        }
        if let Some(mv) = overlay.hint {
            self.draw_hint(&painter, mv);
        }

        let mut clicked = None;
        if overlay.accept_input {
            if let Some(mv) = response.hover_pos().and_then(|p| self.screen_to_board(p)) {
                let is_legal = overlay.legal_moves.contains(&mv);
                self.draw_hover_preview(&painter, mv, overlay.to_move, is_legal);
                if response.clicked() && is_legal {
                    clicked = Some(mv);
                }
            }
        }

        clicked
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let rect = self.grid_rect;

        for col in 0..=self.columns {
            let x = rect.min.x + col as f32 * self.cell_size;
            painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        }
        for row in 0..=self.rows {
            let y = rect.min.y + row as f32 * self.cell_size;
            painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        }
    }

    /// Row and column indices, matching the `(row, col)` move notation
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        let rect = self.grid_rect;

        for col in 0..self.columns {
            let x = rect.min.x + (col as f32 + 0.5) * self.cell_size;
            let pos = Pos2::new(x, rect.min.y - BOARD_MARGIN * 0.5);
            painter.text(pos, egui::Align2::CENTER_CENTER, col, font.clone(), COORD_TEXT);
        }
        for row in 0..self.rows {
            let y = rect.min.y + (row as f32 + 0.5) * self.cell_size;
            let pos = Pos2::new(rect.min.x - BOARD_MARGIN * 0.5, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, row, font.clone(), COORD_TEXT);
        }
    }

    fn draw_pieces(&self, painter: &Painter, board: &Board) {
        for piece in [Piece::Black, Piece::White] {
            for mv in board.cells_of(piece) {
                self.draw_piece(painter, mv, piece);
            }
        }
    }

    fn draw_piece(&self, painter: &Painter, mv: Move, piece: Piece) {
        let center = self.board_to_screen(mv);
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        let shadow = Color32::from_rgba_unmultiplied(0, 0, 0, 60);

        match piece {
            Piece::Black => {
                painter.circle_filled(center + Vec2::new(2.0, 2.0), radius, shadow);
                painter.circle_filled(center, radius, BLACK_PIECE);
                painter.circle_filled(
                    center + Vec2::new(-radius * 0.3, -radius * 0.3),
                    radius * 0.2,
                    BLACK_PIECE_HIGHLIGHT,
                );
            }
            Piece::White => {
                painter.circle_filled(center + Vec2::new(2.0, 2.0), radius, shadow);
                painter.circle_filled(center, radius, WHITE_PIECE);
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_PIECE_SHADOW),
                );
            }
            Piece::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, mv: Move) {
        painter.circle_filled(self.board_to_screen(mv), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn draw_legal_dot(&self, painter: &Painter, mv: Move) {
        let radius = self.cell_size * LEGAL_DOT_RADIUS_RATIO;
        painter.circle_filled(self.board_to_screen(mv), radius, legal_move_dot());
    }

    fn draw_hint(&self, painter: &Painter, mv: Move) {
        let radius = self.cell_size * PIECE_RADIUS_RATIO;
        painter.circle_stroke(self.board_to_screen(mv), radius, Stroke::new(3.0, HINT_MARKER));
    }

    fn draw_hover_preview(&self, painter: &Painter, mv: Move, to_move: Piece, is_legal: bool) {
        let center = self.board_to_screen(mv);
        let radius = self.cell_size * PIECE_RADIUS_RATIO;

        let color = if is_legal {
            match to_move {
                Piece::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 110),
                Piece::White => Color32::from_rgba_unmultiplied(240, 240, 240, 110),
                Piece::Empty => return,
            }
        } else {
            hover_invalid()
        };

        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to a board cell
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Move> {
        let relative = screen_pos - self.grid_rect.min;
        let col = (relative.x / self.cell_size).floor() as i32;
        let row = (relative.y / self.cell_size).floor() as i32;

        if col >= 0 && (col as usize) < self.columns && row >= 0 && (row as usize) < self.rows {
            Some(Move {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Center of a board cell in screen coordinates
    pub fn board_to_screen(&self, mv: Move) -> Pos2 {
        let x = self.grid_rect.min.x + (mv.col as f32 + 0.5) * self.cell_size;
        let y = self.grid_rect.min.y + (mv.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
