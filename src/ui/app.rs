//! Main application for the viewer

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use crate::engine::StrategyKind;
use crate::eval::PuzzleHeuristic;
use crate::game::Mark;
use crate::search::Pruning;

use super::board_view::BoardView;
use super::session::{DuelSession, PuzzleSession};
use super::theme::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Puzzle,
    TicTacToe,
}

/// Viewer with an 8-puzzle tab and a tic-tac-toe tab
pub struct SearchApp {
    tab: Tab,
    puzzle: PuzzleSession,
    duel: DuelSession,
    board_view: BoardView,
    board_input: String,
    show_stats: bool,
}

impl Default for SearchApp {
    fn default() -> Self {
        Self {
            tab: Tab::Puzzle,
            puzzle: PuzzleSession::new(rand::random()),
            duel: DuelSession::new(Mark::X),
            board_view: BoardView::default(),
            board_input: String::new(),
            show_stats: true,
        }
    }
}

impl SearchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Puzzle", |ui| {
                    if ui.button("Scramble").clicked() {
                        self.tab = Tab::Puzzle;
                        self.puzzle.scramble();
                        ui.close_menu();
                    }
                    if ui.button("Reset to goal").clicked() {
                        self.tab = Tab::Puzzle;
                        self.puzzle.reset();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Tic-tac-toe", |ui| {
                    if ui.button("New game (play X)").clicked() {
                        self.tab = Tab::TicTacToe;
                        self.duel.human = Mark::X;
                        self.duel.reset();
                        ui.close_menu();
                    }
                    if ui.button("New game (play O)").clicked() {
                        self.tab = Tab::TicTacToe;
                        self.duel.human = Mark::O;
                        self.duel.reset();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.duel.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_stats, "Search statistics (S)");
                });

                ui.separator();
                ui.selectable_value(&mut self.tab, Tab::Puzzle, "8-puzzle");
                ui.selectable_value(&mut self.tab, Tab::TicTacToe, "Tic-tac-toe");
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

    /// Render the side panel for the active tab
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(260.0)
            .max_width(300.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                match self.tab {
                    Tab::Puzzle => self.render_puzzle_panel(ui),
                    Tab::TicTacToe => self.render_duel_panel(ui),
                }
            });
    }

    fn render_puzzle_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("8-PUZZLE").size(22.0).strong().color(TEXT_PRIMARY));
        ui.label(RichText::new(format!("Board {}", self.puzzle.board)).size(11.0).color(TEXT_MUTED));
        ui.add_space(12.0);

        let idle = !self.puzzle.is_solving();

        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "SETUP");
            ui.add(egui::Slider::new(&mut self.puzzle.scramble_steps, 1..=80).text("scramble moves"));
            ui.horizontal(|ui| {
                if ui.add_enabled(idle, egui::Button::new("Scramble")).clicked() {
                    self.puzzle.scramble();
                }
                if ui.add_enabled(idle, egui::Button::new("Goal")).clicked() {
                    self.puzzle.reset();
                }
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut self.board_input).hint_text("12345678_").desired_width(110.0));
                if ui.add_enabled(idle, egui::Button::new("Load")).clicked() {
                    let input = self.board_input.trim().to_string();
                    if let Err(err) = self.puzzle.load(&input) {
                        self.puzzle.message = Some(err.to_string());
                    }
                }
            });
        });
        ui.add_space(10.0);

        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "SOLVER");
            let config = &mut self.puzzle.config;
            egui::ComboBox::from_label("strategy")
                .selected_text(config.strategy.name())
                .show_ui(ui, |ui| {
                    for kind in StrategyKind::ALL {
                        ui.selectable_value(&mut config.strategy, kind, kind.name());
                    }
                });
            ui.add_enabled_ui(config.strategy.is_informed(), |ui| {
                egui::ComboBox::from_label("heuristic")
                    .selected_text(config.heuristic.name())
                    .show_ui(ui, |ui| {
                        for heuristic in PuzzleHeuristic::ALL {
                            ui.selectable_value(&mut config.heuristic, heuristic, heuristic.name());
                        }
                    });
            });
            ui.checkbox(&mut config.check_solvable, "reject unsolvable boards");

            ui.add_space(6.0);
            if ui.add_enabled(idle, egui::Button::new("Solve")).clicked() {
                self.puzzle.start_solve();
            }
            if let Some(elapsed) = self.puzzle.solving_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.5 {
                    TIMER_NORMAL
                } else if secs < 2.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("Searching... {secs:.2}s")).color(color));
            }
        });
        ui.add_space(10.0);

        if !self.puzzle.solution().is_empty() {
            Self::card_frame().show(ui, |ui| {
                Self::card_title(ui, "SOLUTION");
                let total = self.puzzle.solution().len();
                ui.label(
                    RichText::new(format!("Step {} / {}", self.puzzle.step(), total))
                        .size(16.0)
                        .strong()
                        .color(TEXT_PRIMARY),
                );
                ui.horizontal(|ui| {
                    if ui.button("|<").clicked() {
                        self.puzzle.rewind();
                    }
                    if ui.button("<").clicked() {
                        self.puzzle.step_back();
                    }
                    if ui.button(">").clicked() {
                        self.puzzle.step_forward();
                    }
                });
                let preview: Vec<String> = self
                    .puzzle
                    .solution()
                    .iter()
                    .skip(self.puzzle.step())
                    .take(12)
                    .map(ToString::to_string)
                    .collect();
                if !preview.is_empty() {
                    ui.label(RichText::new(preview.join(" ")).size(10.0).color(TEXT_SECONDARY));
                }
            });
            ui.add_space(10.0);
        }

        if self.show_stats {
            if let Some(result) = &self.puzzle.last_result {
                Self::card_frame().show(ui, |ui| {
                    Self::card_title(ui, "LAST SEARCH");
                    let title = if result.strategy.is_informed() {
                        format!("{} / {}", result.strategy, result.heuristic)
                    } else {
                        result.strategy.to_string()
                    };
                    ui.label(RichText::new(title).size(11.0).strong().color(TIMER_NORMAL));
                    let stats = result.stats;
                    for line in [
                        format!("{} ms", result.time_ms),
                        format!("{} expanded", stats.expanded),
                        format!("{} generated", stats.generated),
                        format!("{} discarded", stats.discarded),
                        format!("frontier peak {}", stats.max_frontier),
                        format!("depth {}", stats.depth),
                    ] {
                        ui.label(RichText::new(line).size(10.0).color(TEXT_SECONDARY));
                    }
                });
                ui.add_space(10.0);
            }
        }

        if let Some(msg) = &self.puzzle.message {
            Self::render_message_card(ui, msg);
        }
    }

    fn render_duel_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("TIC-TAC-TOE").size(22.0).strong().color(TEXT_PRIMARY));
        ui.label(
            RichText::new(format!("You play {}", self.duel.human.to_char()))
                .size(11.0)
                .color(TEXT_MUTED),
        );
        ui.add_space(12.0);

        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "STATUS");
            let status = self.duel.status();
            let color = if self.duel.is_ai_thinking() { TIMER_WARNING } else { TEXT_PRIMARY };
            ui.label(RichText::new(status).size(18.0).strong().color(color));
            ui.label(
                RichText::new(format!("Move #{}", self.duel.moves_played()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
        ui.add_space(10.0);

        Self::card_frame().show(ui, |ui| {
            Self::card_title(ui, "ENGINE");
            ui.add(egui::Slider::new(&mut self.duel.depth, 1..=9).text("depth (plies)"));
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.duel.pruning, Pruning::AlphaBeta, "alpha-beta");
                ui.selectable_value(&mut self.duel.pruning, Pruning::Disabled, "plain minimax");
            });
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("New game").clicked() {
                    self.duel.reset();
                }
                if ui.button("Undo").clicked() {
                    self.duel.undo();
                }
            });
        });
        ui.add_space(10.0);

        if self.show_stats {
            Self::card_frame().show(ui, |ui| {
                Self::card_title(ui, "LAST SEARCH");
                match &self.duel.last_result {
                    Some(result) => {
                        ui.label(
                            RichText::new(format!("cell {} (value {:.1})", result.action, result.value))
                                .size(12.0)
                                .strong()
                                .color(WIN_HIGHLIGHT),
                        );
                        let stats = result.stats;
                        for line in [
                            format!("{} states visited", stats.visited),
                            format!("{} cutoffs", stats.cutoffs),
                            format!("max ply {}", stats.max_ply),
                        ] {
                            ui.label(RichText::new(line).size(10.0).color(TEXT_SECONDARY));
                        }
                    }
                    None => {
                        ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    }
                }
            });
            ui.add_space(10.0);
        }

        if let Some(msg) = &self.duel.message {
            Self::render_message_card(ui, msg);
        }
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(MESSAGE_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(Frame::new().fill(BOARD_AREA_BG).inner_margin(16.0))
            .show(ctx, |ui| match self.tab {
                Tab::Puzzle => {
                    let interactive = !self.puzzle.is_solving();
                    if let Some(index) = self.board_view.show_puzzle(ui, &self.puzzle.board, interactive) {
                        if let Err(msg) = self.puzzle.slide_tile(index) {
                            self.puzzle.message = Some(msg);
                        }
                    }
                }
                Tab::TicTacToe => {
                    let interactive = !self.duel.is_ai_turn();
                    let clicked = self.board_view.show_tictactoe(
                        ui,
                        &self.duel.game,
                        self.duel.last_move,
                        interactive,
                    );
                    if let Some(index) = clicked {
                        if let Err(msg) = self.duel.try_play(index) {
                            self.duel.message = Some(msg);
                        }
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
            if i.key_pressed(egui::Key::S) {
                self.show_stats = !self.show_stats;
            }

            match self.tab {
                Tab::Puzzle => {
                    if i.key_pressed(egui::Key::ArrowRight) {
                        self.puzzle.step_forward();
                    }
                    if i.key_pressed(egui::Key::ArrowLeft) {
                        self.puzzle.step_back();
                    }
                }
                Tab::TicTacToe => {
                    if i.key_pressed(egui::Key::U) {
                        self.duel.undo();
                    }
                    if i.key_pressed(egui::Key::N) {
                        self.duel.reset();
                    }
                }
            }
        });
    }
}

impl eframe::App for SearchApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // Collect finished background searches
        self.puzzle.check_solve_result();
        self.duel.check_ai_result();

        if self.duel.is_ai_turn() && !self.duel.is_ai_thinking() && self.duel.message.is_none() {
            self.duel.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.puzzle.is_solving() || self.duel.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
