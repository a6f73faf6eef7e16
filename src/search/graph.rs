//! Systematic graph search over an implicit state space
//!
//! One engine covers three strategies, distinguished only by frontier
//! discipline:
//!
//! - [`Strategy::BreadthFirst`]: FIFO, optimal for unit-cost graphs
//! - [`Strategy::DepthFirst`]: LIFO, complete on finite spaces thanks to the
//!   explored set, but the path may be far from minimal
//! - [`Strategy::AStar`]: min-priority on `f = g + h`, optimal when `h` is
//!   admissible
//!
//! # Example
//!
//! ```
//! use search_core::eval::manhattan;
//! use search_core::puzzle::{Board, EightPuzzle, Move};
//! use search_core::search::{GraphSearcher, Outcome, Strategy};
//!
//! let board: Board = "123456_78".parse().unwrap();
//! let mut searcher = GraphSearcher::new();
//! let result = searcher.search(&EightPuzzle, board, Strategy::AStar(&manhattan));
//!
//! assert_eq!(result.outcome, Outcome::Found(vec![Move::Right, Move::Right]));
//! assert!(result.stats.expanded > 0);
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use super::node::{NodeId, SearchTree};
use crate::eval::Heuristic;

/// A search problem: goal test plus successor enumeration.
///
/// `successors` must be pure and must not return the same
/// (action, state) pair twice.
pub trait StateSpace {
    type State: Clone + Eq + Hash + Ord;
    type Action: Clone;

    fn is_goal(&self, state: &Self::State) -> bool;

    fn successors(&self, state: &Self::State) -> Vec<(Self::Action, Self::State)>;
}

/// Frontier discipline for [`GraphSearcher::search`]
pub enum Strategy<'h, S> {
    BreadthFirst,
    DepthFirst,
    /// Best-first on path cost plus heuristic estimate
    AStar(&'h dyn Heuristic<S>),
}

impl<S> Strategy<'_, S> {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::DepthFirst => "dfs",
            Strategy::AStar(_) => "astar",
        }
    }
}

impl<S> fmt::Debug for Strategy<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    /// Actions from the initial state to the goal (empty if already solved)
    Found(Vec<A>),
    /// The frontier emptied without reaching the goal
    NoSolution,
    /// [`SearchLimits::max_expansions`] was hit first
    LimitReached,
}

impl<A> Outcome<A> {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    /// The action sequence, if one was found
    pub fn path(&self) -> Option<&[A]> {
        match self {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States marked explored (expanded)
    pub expanded: u64,
    /// Child nodes pushed onto the frontier
    pub generated: u64,
    /// Nodes popped whose state had already been explored
    pub discarded: u64,
    /// Largest frontier size observed
    pub max_frontier: usize,
    /// Length of the returned path (0 when none)
    pub depth: u32,
}

/// Optional safety valves. Default is unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_expansions: Option<u64>,
}

/// Result of [`GraphSearcher::search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<A> {
    pub outcome: Outcome<A>,
    pub stats: SearchStats,
}

/// Frontier container; one per search call.
enum Frontier<S: Ord> {
    Fifo(VecDeque<NodeId>),
    Lifo(Vec<NodeId>),
    /// Keyed by (f, state, creation order) so ties pop deterministically
    Priority(BinaryHeap<Reverse<(u32, S, NodeId)>>),
}

impl<S: Ord> Frontier<S> {
    fn for_strategy(strategy: &Strategy<'_, S>) -> Self {
        match strategy {
            Strategy::BreadthFirst => Frontier::Fifo(VecDeque::new()),
            Strategy::DepthFirst => Frontier::Lifo(Vec::new()),
            Strategy::AStar(_) => Frontier::Priority(BinaryHeap::new()),
        }
    }

    fn push(&mut self, id: NodeId, f: u32, state: S) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(id),
            Frontier::Lifo(stack) => stack.push(id),
            Frontier::Priority(heap) => heap.push(Reverse((f, state, id))),
        }
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
            Frontier::Priority(heap) => heap.pop().map(|Reverse((_, _, id))| id),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Fifo(queue) => queue.len(),
            Frontier::Lifo(stack) => stack.len(),
            Frontier::Priority(heap) => heap.len(),
        }
    }
}

/// Graph search engine.
///
/// Each call to [`GraphSearcher::search`] owns a fresh frontier, explored set
/// and node arena; only the limits and the statistics of the last run are
/// kept on the searcher.
#[derive(Debug, Clone, Default)]
pub struct GraphSearcher {
    limits: SearchLimits,
    stats: SearchStats,
}

impl GraphSearcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            limits,
            stats: SearchStats::default(),
        }
    }

    /// Statistics of the most recent search
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Search from `initial` to a goal of `space` using `strategy`.
    pub fn search<P>(
        &mut self,
        space: &P,
        initial: P::State,
        strategy: Strategy<'_, P::State>,
    ) -> SearchResult<P::Action>
    where
        P: StateSpace,
    {
        self.stats = SearchStats::default();
        let outcome = self.run(space, initial, &strategy);
        SearchResult {
            outcome,
            stats: self.stats,
        }
    }

    fn run<P>(
        &mut self,
        space: &P,
        initial: P::State,
        strategy: &Strategy<'_, P::State>,
    ) -> Outcome<P::Action>
    where
        P: StateSpace,
    {
        if space.is_goal(&initial) {
            return Outcome::Found(Vec::new());
        }

        let root_f = Self::priority(strategy, 0, &initial);
        let (mut tree, root) = SearchTree::new(initial.clone());
        let mut frontier = Frontier::for_strategy(strategy);
        frontier.push(root, root_f, initial);
        self.stats.max_frontier = 1;

        let mut explored: FxHashSet<P::State> = FxHashSet::default();

        while let Some(id) = frontier.pop() {
            let state = tree.get(id).state.clone();

            if space.is_goal(&state) {
                let path = tree.actions_to(id);
                self.stats.depth = path.len() as u32;
                return Outcome::Found(path);
            }

            if explored.contains(&state) {
                self.stats.discarded += 1;
                continue;
            }

            if let Some(max) = self.limits.max_expansions {
                if self.stats.expanded >= max {
                    return Outcome::LimitReached;
                }
            }

            explored.insert(state);
            self.stats.expanded += 1;

            for child in tree.expand(id, space) {
                if explored.contains(&child.state) {
                    continue;
                }
                let f = Self::priority(strategy, child.path_cost, &child.state);
                let child_state = child.state.clone();
                let child_id = tree.insert(child);
                frontier.push(child_id, f, child_state);
                self.stats.generated += 1;
            }

            self.stats.max_frontier = self.stats.max_frontier.max(frontier.len());
        }

        Outcome::NoSolution
    }

    /// Frontier key: `g + h` for A*, unused by the uninformed strategies.
    #[inline]
    fn priority<S>(strategy: &Strategy<'_, S>, path_cost: u32, state: &S) -> u32 {
        match strategy {
            Strategy::AStar(h) => path_cost + h.estimate(state),
            _ => path_cost,
        }
    }
}
