//! Desktop viewer for the search engines
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod session;
mod theme;

pub use app::SearchApp;
pub use session::{DuelSession, PuzzleSession};
