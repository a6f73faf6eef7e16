//! Search engines
//!
//! Contains:
//! - Node arena with parent links for path reconstruction
//! - Graph search (BFS, DFS, A*) over an implicit state space
//! - Depth-bounded minimax with alpha-beta pruning

pub mod graph;
pub mod minimax;
pub mod node;

pub use graph::{
    GraphSearcher, Outcome, SearchLimits, SearchResult, SearchStats, StateSpace, Strategy,
};
pub use minimax::{
    best_move, DepthLimit, Minimax, MinimaxConfig, MinimaxStats, MoveResult, Pruning,
};
pub use node::{Node, NodeId, SearchTree};
