//! Search core viewer
//!
//! Solve 8-puzzle boards with BFS, DFS or A* and play tic-tac-toe against
//! alpha-beta search.

use search_core::ui::SearchApp;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([700.0, 520.0])
            .with_title("Search Core"),
        ..Default::default()
    };

    eframe::run_native(
        "Search Core",
        options,
        Box::new(|cc| Ok(Box::new(SearchApp::new(cc)))),
    )
}
