//! Theme constants for the viewer

use egui::Color32;

// Board colors - warm wood tones
pub const BOARD_BG: Color32 = Color32::from_rgb(222, 184, 135);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);

// Puzzle tiles
pub const TILE_FILL: Color32 = Color32::from_rgb(245, 232, 210);
pub const TILE_HOME: Color32 = Color32::from_rgb(190, 225, 190);
pub const TILE_TEXT: Color32 = Color32::from_rgb(50, 35, 20);
pub const TILE_SHADOW: Color32 = Color32::from_rgb(150, 110, 70);

// Tic-tac-toe marks
pub const MARK_X: Color32 = Color32::from_rgb(40, 60, 120);
pub const MARK_O: Color32 = Color32::from_rgb(160, 40, 40);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const BOARD_AREA_BG: Color32 = Color32::from_rgb(40, 42, 46);
pub const MESSAGE_BG: Color32 = Color32::from_rgb(80, 60, 30);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 24.0;
pub const TILE_GAP: f32 = 6.0;
pub const GRID_LINE_WIDTH: f32 = 3.0;
pub const MARK_STROKE: f32 = 8.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;
