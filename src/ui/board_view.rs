//! Board rendering for the viewer

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::game::{GameState, Mark, TicTacToe};
use crate::puzzle::{Board, CELLS, WIDTH};

use super::theme::*;

/// Renders a 3x3 board and maps clicks back to cell indices
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 120.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Allocate a square board filling the available space
    fn allocate(&mut self, ui: &mut egui::Ui) -> (egui::Response, Painter) {
        let available_size = ui.available_size();
        let board_size = (available_size.x.min(available_size.y) - 20.0).max(120.0);
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / WIDTH as f32;

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;
        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_BG);
        (response, painter)
    }

    /// Render the puzzle and return the clicked cell, if any
    pub fn show_puzzle(&mut self, ui: &mut egui::Ui, board: &Board, interactive: bool) -> Option<usize> {
        let (response, painter) = self.allocate(ui);

        for index in 0..CELLS {
            if let Some(tile) = board.tile(index) {
                self.draw_tile(&painter, index, tile);
            }
        }

        let hovered = response.hover_pos().and_then(|p| self.screen_to_cell(p));
        if interactive {
            if let Some(index) = hovered.filter(|&i| i != board.blank_index()) {
                painter.rect_filled(self.cell_rect(index).shrink(TILE_GAP), CornerRadius::same(8), hover_valid());
                if response.clicked() {
                    return Some(index);
                }
            }
        }
        None
    }

    fn draw_tile(&self, painter: &Painter, index: usize, tile: u8) {
        let rect = self.cell_rect(index).shrink(TILE_GAP);
        let at_home = usize::from(tile) == index + 1;

        painter.rect_filled(rect.translate(Vec2::new(3.0, 3.0)), CornerRadius::same(8), TILE_SHADOW);
        painter.rect_filled(rect, CornerRadius::same(8), if at_home { TILE_HOME } else { TILE_FILL });
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            tile.to_string(),
            egui::FontId::proportional(self.cell_size * 0.45),
            TILE_TEXT,
        );
    }

    /// Render tic-tac-toe and return the clicked empty cell, if any
    pub fn show_tictactoe(
        &mut self,
        ui: &mut egui::Ui,
        game: &TicTacToe,
        last_move: Option<usize>,
        interactive: bool,
    ) -> Option<usize> {
        let (response, painter) = self.allocate(ui);

        self.draw_grid(&painter);
        for index in 0..CELLS {
            if let Some(mark) = game.get(index) {
                self.draw_mark(&painter, index, mark);
            }
        }

        if let Some(index) = last_move {
            let corner = self.cell_rect(index).left_top() + Vec2::splat(12.0);
            painter.circle_filled(corner, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }

        if let Some(line) = game.winning_line() {
            let start = self.cell_rect(line[0]).center();
            let end = self.cell_rect(line[2]).center();
            painter.line_segment([start, end], Stroke::new(6.0, WIN_HIGHLIGHT));
        }

        if interactive && !game.is_terminal() {
            let hovered = response.hover_pos().and_then(|p| self.screen_to_cell(p));
            if let Some(index) = hovered.filter(|&i| game.get(i).is_none()) {
                painter.rect_filled(self.cell_rect(index).shrink(TILE_GAP), CornerRadius::same(8), hover_valid());
                if response.clicked() {
                    return Some(index);
                }
            }
        }
        None
    }

    /// Draw the two inner lines in each direction
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = self.cell_size * WIDTH as f32;
        let origin = self.board_rect.min + Vec2::splat(BOARD_MARGIN);

        for i in 1..WIDTH {
            let offset = i as f32 * self.cell_size;
            painter.line_segment([origin + Vec2::new(offset, 0.0), origin + Vec2::new(offset, span)], stroke);
            painter.line_segment([origin + Vec2::new(0.0, offset), origin + Vec2::new(span, offset)], stroke);
        }
    }

    fn draw_mark(&self, painter: &Painter, index: usize, mark: Mark) {
        let rect = self.cell_rect(index).shrink(self.cell_size * 0.22);
        match mark {
            Mark::X => {
                let stroke = Stroke::new(MARK_STROKE, MARK_X);
                painter.line_segment([rect.left_top(), rect.right_bottom()], stroke);
                painter.line_segment([rect.right_top(), rect.left_bottom()], stroke);
            }
            Mark::O => {
                painter.circle_stroke(rect.center(), rect.width() * 0.5, Stroke::new(MARK_STROKE, MARK_O));
            }
        }
    }

    /// Screen rectangle of a cell
    pub fn cell_rect(&self, index: usize) -> Rect {
        let (row, col) = (index / WIDTH, index % WIDTH);
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + col as f32 * self.cell_size,
                BOARD_MARGIN + row as f32 * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to a cell index
    pub fn screen_to_cell(&self, screen_pos: Pos2) -> Option<usize> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        let col = (relative.x / self.cell_size).floor() as i32;
        let row = (relative.y / self.cell_size).floor() as i32;

        let range = 0..WIDTH as i32;
        if range.contains(&col) && range.contains(&row) {
            Some(row as usize * WIDTH + col as usize)
        } else {
            None
        }
    }
}
