//! Puzzle solver integrating board validation, heuristics and graph search
//!
//! [`PuzzleSolver`] is the configuration-driven entry point for solving
//! 8-puzzle instances. It picks the frontier discipline from
//! [`StrategyKind`], the estimate from [`PuzzleHeuristic`], optionally
//! rejects unsolvable boards up front, and times the run.
//!
//! # Example
//!
//! ```
//! use search_core::{PuzzleSolver, SolverConfig, StrategyKind};
//!
//! let mut solver = PuzzleSolver::with_config(SolverConfig {
//!     strategy: StrategyKind::AStar,
//!     ..Default::default()
//! });
//!
//! let result = solver.solve_str("1234567_8").unwrap();
//! let path = result.outcome.path().unwrap();
//! println!("Solved in {} moves ({}ms)", path.len(), result.time_ms);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::eval::PuzzleHeuristic;
use crate::puzzle::{Board, EightPuzzle, Move};
use crate::search::{GraphSearcher, Outcome, SearchLimits, SearchStats, Strategy};

/// Named search strategy, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    /// Breadth-first; optimal on unit costs
    Bfs,
    /// Depth-first; finds a path quickly but not a short one
    Dfs,
    /// A* with the configured heuristic
    #[default]
    AStar,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::Bfs, StrategyKind::Dfs, StrategyKind::AStar];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Bfs => "bfs",
            StrategyKind::Dfs => "dfs",
            StrategyKind::AStar => "astar",
        }
    }

    /// Whether the heuristic setting influences this strategy
    #[inline]
    pub fn is_informed(self) -> bool {
        self == StrategyKind::AStar
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(StrategyKind::Bfs),
            "dfs" | "depth-first" => Ok(StrategyKind::Dfs),
            "astar" | "a*" => Ok(StrategyKind::AStar),
            _ => Err(Error::UnknownStrategy {
                input: s.to_string(),
                expected: "bfs, dfs, astar".to_string(),
            }),
        }
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub strategy: StrategyKind,
    /// Only consulted by [`StrategyKind::AStar`]
    pub heuristic: PuzzleHeuristic,
    /// Answer `NoSolution` for odd-inversion boards without searching
    pub check_solvable: bool,
    pub limits: SearchLimits,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::AStar,
            heuristic: PuzzleHeuristic::Manhattan,
            check_solvable: true,
            limits: SearchLimits::default(),
        }
    }
}

/// Result of a solve with timing and statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub outcome: Outcome<Move>,
    pub stats: SearchStats,
    pub strategy: StrategyKind,
    pub heuristic: PuzzleHeuristic,
    /// Wall-clock time in milliseconds
    pub time_ms: u64,
}

impl SolveResult {
    /// Number of moves in the solution, if one was found
    #[inline]
    pub fn moves(&self) -> Option<usize> {
        self.outcome.path().map(<[Move]>::len)
    }
}

/// 8-puzzle solver.
///
/// # Example
///
/// ```
/// use search_core::{Board, PuzzleSolver};
///
/// let mut solver = PuzzleSolver::new();
/// let board: Board = "123456_78".parse().unwrap();
/// let result = solver.solve(&board);
/// assert_eq!(result.moves(), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PuzzleSolver {
    config: SolverConfig,
    searcher: GraphSearcher,
    last_stats: SearchStats,
}

impl PuzzleSolver {
    /// Create a solver with the default configuration
    /// (A*, Manhattan, solvability check on, no limits).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            searcher: GraphSearcher::with_limits(config.limits),
            last_stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    pub fn set_strategy(&mut self, strategy: StrategyKind) {
        self.config.strategy = strategy;
    }

    pub fn set_heuristic(&mut self, heuristic: PuzzleHeuristic) {
        self.config.heuristic = heuristic;
    }

    /// Statistics of the most recent solve, zero if it was answered by the
    /// solvability check
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    /// Solve `board` with the configured strategy.
    #[must_use]
    pub fn solve(&mut self, board: &Board) -> SolveResult {
        let start = Instant::now();
        let SolverConfig {
            strategy,
            heuristic,
            check_solvable,
            ..
        } = self.config;

        let (outcome, stats) = if check_solvable && !board.is_solvable() {
            (Outcome::NoSolution, SearchStats::default())
        } else {
            let frontier = match strategy {
                StrategyKind::Bfs => Strategy::BreadthFirst,
                StrategyKind::Dfs => Strategy::DepthFirst,
                StrategyKind::AStar => Strategy::AStar(&heuristic),
            };
            let result = self.searcher.search(&EightPuzzle, *board, frontier);
            (result.outcome, result.stats)
        };
        self.last_stats = stats;

        SolveResult {
            outcome,
            stats,
            strategy,
            heuristic,
            time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Parse and solve a puzzle string such as `"1_3426758"`.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `input` is not a valid board.
    pub fn solve_str(&mut self, input: &str) -> Result<SolveResult> {
        let board: Board = input.parse()?;
        Ok(self.solve(&board))
    }
}
