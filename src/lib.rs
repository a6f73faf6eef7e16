//! Search core: graph search and adversarial search
//!
//! Two related engines over pluggable problem descriptions:
//! - Uninformed and informed graph search (BFS, DFS, A*) over an implicit
//!   state space, applied to the 8-puzzle
//! - Depth-bounded minimax with alpha-beta pruning over any two-player,
//!   zero-sum, turn-based game
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`puzzle`]: 8-puzzle board, moves, parsing and solvability
//! - [`eval`]: Heuristic estimates (Hamming, Manhattan, combined)
//! - [`search`]: Node arena, graph search and minimax
//! - [`game`]: Game-state interface plus a tic-tac-toe reference game
//! - [`engine`]: Configuration-driven puzzle solver
//! - [`ui`]: Desktop viewer driving both engines
//!
//! # Quick Start
//!
//! ```
//! use search_core::{Board, PuzzleSolver, SolverConfig, StrategyKind};
//!
//! let mut solver = PuzzleSolver::with_config(SolverConfig {
//!     strategy: StrategyKind::Bfs,
//!     ..Default::default()
//! });
//!
//! let board: Board = "1_3426758".parse().unwrap();
//! let result = solver.solve(&board);
//! let path = result.outcome.path().unwrap();
//! assert!(board.apply_all(path).unwrap().is_goal());
//! ```
//!
//! Adversarial search takes any [`game::GameState`] and an evaluation
//! function:
//!
//! ```
//! use search_core::game::{tictactoe, TicTacToe};
//! use search_core::search::{best_move, DepthLimit};
//!
//! let game = TicTacToe::new();
//! let result = best_move(&game, DepthLimit::Plies(3), &tictactoe::evaluate).unwrap();
//! assert_eq!(result.action, 4); // centre opens the most lines
//! ```
//!
//! # Determinism
//!
//! Both engines are single-threaded and fully deterministic: successor
//! order, frontier tie-breaking and move selection depend only on the input.

pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod puzzle;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use engine::{PuzzleSolver, SolveResult, SolverConfig, StrategyKind};
pub use error::{Error, Result};
pub use eval::{Heuristic, PuzzleHeuristic};
pub use puzzle::{Board, EightPuzzle, Move};
pub use search::{GraphSearcher, Minimax, Outcome, SearchStats};
