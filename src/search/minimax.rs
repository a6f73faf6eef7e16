//! Depth-bounded minimax with alpha-beta pruning
//!
//! The engine alternates two value functions by ply: `max_value` for the
//! side choosing the root move and `min_value` for the opponent's reply.
//! Every leaf is scored from the root player's point of view, so values are
//! comparable across the whole tree.
//!
//! Pruning only skips work: with [`Pruning::AlphaBeta`] the returned action
//! and value are identical to [`Pruning::Disabled`], and no more states are
//! visited.
//!
//! # Example
//!
//! ```
//! use search_core::game::{tictactoe, TicTacToe};
//! use search_core::search::{best_move, DepthLimit};
//!
//! // X to move can complete the top row
//! let game: TicTacToe = "XX.OO....".parse().unwrap();
//! let result = best_move(&game, DepthLimit::Plies(2), &tictactoe::evaluate).unwrap();
//! assert_eq!(result.action, 2);
//! assert_eq!(result.value, tictactoe::WIN_SCORE);
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::game::{Evaluator, GameState};

/// How deep the search may go below the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthLimit {
    /// At most this many plies
    Plies(u32),
    /// Until terminal positions; bounded only by the game itself
    Unlimited,
}

impl DepthLimit {
    /// Map the signed convention where any negative depth means unlimited.
    pub fn from_signed(depth: i32) -> Self {
        match u32::try_from(depth) {
            Ok(d) => DepthLimit::Plies(d),
            Err(_) => DepthLimit::Unlimited,
        }
    }

    #[inline]
    fn is_exhausted(self) -> bool {
        self == DepthLimit::Plies(0)
    }

    /// Limit for the next ply down
    #[inline]
    fn deeper(self) -> Self {
        match self {
            DepthLimit::Plies(d) => DepthLimit::Plies(d.saturating_sub(1)),
            DepthLimit::Unlimited => DepthLimit::Unlimited,
        }
    }
}

impl Default for DepthLimit {
    fn default() -> Self {
        DepthLimit::Plies(4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    #[default]
    AlphaBeta,
    /// Plain minimax; every legal move is searched
    Disabled,
}

/// Configuration for [`Minimax`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinimaxConfig {
    pub depth: DepthLimit,
    pub pruning: Pruning,
    /// Abort with [`Error::BudgetExhausted`] once more states than this have
    /// been visited
    pub node_budget: Option<u64>,
}

/// Search diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimaxStats {
    /// States whose value was computed, root included
    pub visited: u64,
    /// Times the remaining siblings were skipped because beta <= alpha
    pub cutoffs: u64,
    /// Deepest ply reached (root is ply 0)
    pub max_ply: u32,
}

/// Chosen root action with its minimax value
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult<A> {
    pub action: A,
    pub value: f64,
    pub stats: MinimaxStats,
}

/// Adversarial search engine.
///
/// # Example
///
/// ```
/// use search_core::game::{tictactoe, TicTacToe};
/// use search_core::search::{DepthLimit, Minimax, MinimaxConfig};
///
/// let mut engine = Minimax::with_config(MinimaxConfig {
///     depth: DepthLimit::Unlimited,
///     ..Default::default()
/// });
/// let result = engine.best_move(&TicTacToe::new(), &tictactoe::evaluate).unwrap();
/// assert_eq!(result.value, 0.0); // perfect play draws
/// ```
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    config: MinimaxConfig,
    stats: MinimaxStats,
}

/// Per-call state threaded through the recursion
struct Walk<'e, G: GameState, E: ?Sized> {
    root_player: G::Player,
    evaluator: &'e E,
    pruning: Pruning,
    node_budget: Option<u64>,
    stats: MinimaxStats,
}

impl Minimax {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MinimaxConfig) -> Self {
        Self {
            config,
            stats: MinimaxStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> MinimaxConfig {
        self.config
    }

    pub fn set_depth(&mut self, depth: DepthLimit) {
        self.config.depth = depth;
    }

    /// Statistics of the most recent search
    #[inline]
    pub fn stats(&self) -> MinimaxStats {
        self.stats
    }

    /// Best action for the player to move in `state`, with its value.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if `state` is terminal
    /// - [`Error::ZeroDepth`] if the depth limit is zero plies
    /// - [`Error::NoLegalMoves`] if a visited non-terminal state has no legal
    ///   moves. With [`Pruning::AlphaBeta`], states in pruned subtrees are never
    ///   visited, so such a state there goes unreported.
    /// - [`Error::BudgetExhausted`] if the node budget runs out
    pub fn best_move<G, E>(&mut self, state: &G, evaluator: &E) -> Result<MoveResult<G::Action>>
    where
        G: GameState + fmt::Debug,
        E: Evaluator<G> + ?Sized,
    {
        self.stats = MinimaxStats::default();

        if state.is_terminal() {
            return Err(Error::GameOver);
        }
        if self.config.depth.is_exhausted() {
            return Err(Error::ZeroDepth);
        }

        let mut walk = Walk {
            root_player: state.acting_player(),
            evaluator,
            pruning: self.config.pruning,
            node_budget: self.config.node_budget,
            stats: MinimaxStats::default(),
        };

        let outcome = walk.max_value(state, f64::NEG_INFINITY, f64::INFINITY, self.config.depth, 0);
        self.stats = walk.stats;
        let (value, action) = outcome?;

        // A non-terminal root with depth left always yields an action or
        // fails with NoLegalMoves inside max_value.
        let action = action.ok_or_else(|| Error::NoLegalMoves {
            state: format!("{state:?}"),
        })?;

        Ok(MoveResult {
            action,
            value,
            stats: walk.stats,
        })
    }
}

impl<G, E> Walk<'_, G, E>
where
    G: GameState + fmt::Debug,
    E: Evaluator<G> + ?Sized,
{
    /// Count a visit and enforce the node budget.
    fn enter(&mut self, ply: u32) -> Result<()> {
        self.stats.visited += 1;
        self.stats.max_ply = self.stats.max_ply.max(ply);
        match self.node_budget {
            Some(budget) if self.stats.visited > budget => Err(Error::BudgetExhausted {
                visited: self.stats.visited,
            }),
            _ => Ok(()),
        }
    }

    /// Leaf value, or `None` if `state` must be expanded.
    fn leaf_value(&self, state: &G, depth: DepthLimit) -> Option<f64> {
        (state.is_terminal() || depth.is_exhausted())
            .then(|| self.evaluator.evaluate(state, self.root_player))
    }

    fn moves_of(state: &G) -> Result<Vec<G::Action>> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves {
                state: format!("{state:?}"),
            });
        }
        Ok(moves)
    }

    /// Value for the root player when it is their turn to choose.
    fn max_value(
        &mut self,
        state: &G,
        mut alpha: f64,
        beta: f64,
        depth: DepthLimit,
        ply: u32,
    ) -> Result<(f64, Option<G::Action>)> {
        self.enter(ply)?;
        if let Some(value) = self.leaf_value(state, depth) {
            return Ok((value, None));
        }

        let mut best: Option<(f64, G::Action)> = None;
        for action in Self::moves_of(state)? {
            let child = state.next_state(&action);
            let (value, _) = self.min_value(&child, alpha, beta, depth.deeper(), ply + 1)?;

            if improves_max(value, best.as_ref()) {
                best = Some((value, action));
            }

            if self.pruning == Pruning::AlphaBeta {
                alpha = alpha.max(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        Ok(match best {
            Some((value, action)) => (value, Some(action)),
            None => (f64::NEG_INFINITY, None),
        })
    }

    /// Value for the root player when the opponent chooses.
    fn min_value(
        &mut self,
        state: &G,
        alpha: f64,
        mut beta: f64,
        depth: DepthLimit,
        ply: u32,
    ) -> Result<(f64, Option<G::Action>)> {
        self.enter(ply)?;
        if let Some(value) = self.leaf_value(state, depth) {
            return Ok((value, None));
        }

        let mut best: Option<(f64, G::Action)> = None;
        for action in Self::moves_of(state)? {
            let child = state.next_state(&action);
            let (value, _) = self.max_value(&child, alpha, beta, depth.deeper(), ply + 1)?;

            if improves_min(value, best.as_ref()) {
                best = Some((value, action));
            }

            if self.pruning == Pruning::AlphaBeta {
                beta = beta.min(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        Ok(match best {
            Some((value, action)) => (value, Some(action)),
            None => (f64::INFINITY, None),
        })
    }
}

// Strict comparisons keep the first action reaching the extremal value.

#[inline]
fn improves_max<A>(value: f64, best: Option<&(f64, A)>) -> bool {
    best.map_or(true, |(b, _)| value > *b)
}

#[inline]
fn improves_min<A>(value: f64, best: Option<&(f64, A)>) -> bool {
    best.map_or(true, |(b, _)| value < *b)
}

/// One-shot alpha-beta search to `max_depth`.
pub fn best_move<G, E>(state: &G, max_depth: DepthLimit, evaluator: &E) -> Result<MoveResult<G::Action>>
where
    G: GameState + fmt::Debug,
    E: Evaluator<G> + ?Sized,
{
    Minimax::with_config(MinimaxConfig {
        depth: max_depth,
        ..Default::default()
    })
    .best_move(state, evaluator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tictactoe::{self, Mark, TicTacToe, WIN_SCORE};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    /// Explicit game tree: inner nodes list children, every node has a value.
    /// Nodes listed in `stuck` have no children yet are not terminal.
    #[derive(Debug)]
    struct Tree {
        children: Vec<Vec<usize>>,
        values: Vec<f64>,
        stuck: Vec<usize>,
    }

    #[derive(Debug, Clone, Copy)]
    struct TreeGame<'t> {
        tree: &'t Tree,
        node: usize,
        ply: u32,
    }

    impl GameState for TreeGame<'_> {
        type Action = usize;
        type Player = bool;

        fn is_terminal(&self) -> bool {
            self.tree.children[self.node].is_empty() && !self.tree.stuck.contains(&self.node)
        }

        fn legal_moves(&self) -> Vec<usize> {
            (0..self.tree.children[self.node].len()).collect()
        }

        fn next_state(&self, action: &usize) -> Self {
            TreeGame {
                tree: self.tree,
                node: self.tree.children[self.node][*action],
                ply: self.ply + 1,
            }
        }

        fn acting_player(&self) -> bool {
            self.ply % 2 == 0
        }
    }

    fn tree_value(game: &TreeGame<'_>, _player: bool) -> f64 {
        game.tree.values[game.node]
    }

    /// Two-ply tree: MAX root over three MIN nodes with leaves
    /// [3, 12, 8], [2, 4, 6], [14, 5, 2]. Minimax value 3 via the first move.
    fn textbook_tree() -> Tree {
        let leaves = [3.0, 12.0, 8.0, 2.0, 4.0, 6.0, 14.0, 5.0, 2.0];
        let mut children = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10, 11, 12]];
        children.extend(std::iter::repeat(Vec::new()).take(9));
        let mut values = vec![0.0; 4];
        values.extend(leaves);
        Tree {
            children,
            values,
            stuck: Vec::new(),
        }
    }

    fn run(
        game: &TreeGame<'_>,
        depth: DepthLimit,
        pruning: Pruning,
    ) -> Result<MoveResult<usize>> {
        Minimax::with_config(MinimaxConfig {
            depth,
            pruning,
            node_budget: None,
        })
        .best_move(game, &tree_value)
    }

    /// Non-terminal position with nothing to play
    #[derive(Debug, Clone)]
    struct Stuck;

    impl GameState for Stuck {
        type Action = ();
        type Player = ();

        fn is_terminal(&self) -> bool {
            false
        }
        fn legal_moves(&self) -> Vec<()> {
            Vec::new()
        }
        fn next_state(&self, _action: &()) -> Self {
            Stuck
        }
        fn acting_player(&self) {}
    }

    #[test]
    fn test_textbook_tree_value() {
        let tree = textbook_tree();
        let root = TreeGame { tree: &tree, node: 0, ply: 0 };
        let result = run(&root, DepthLimit::Unlimited, Pruning::AlphaBeta).unwrap();
        assert_eq!(result.action, 0);
        assert_eq!(result.value, 3.0);
    }

    #[test]
    fn test_pruning_visits_strictly_fewer() {
        let tree = textbook_tree();
        let root = TreeGame { tree: &tree, node: 0, ply: 0 };
        let pruned = run(&root, DepthLimit::Unlimited, Pruning::AlphaBeta).unwrap();
        let full = run(&root, DepthLimit::Unlimited, Pruning::Disabled).unwrap();

        assert_eq!(pruned.action, full.action);
        assert_eq!(pruned.value, full.value);
        assert_eq!(full.stats.visited, 13);
        // Second MIN node stops after its first leaf (2 <= 3)
        assert_eq!(pruned.stats.visited, 11);
        assert!(pruned.stats.cutoffs >= 1);
        assert_eq!(full.stats.cutoffs, 0);
    }

    #[test]
    fn test_depth_limit_uses_evaluation() {
        let mut tree = textbook_tree();
        // Static estimates for the MIN nodes, used when the search stops there
        tree.values[1] = 1.0;
        tree.values[2] = 7.0;
        tree.values[3] = 5.0;
        let root = TreeGame { tree: &tree, node: 0, ply: 0 };

        let shallow = run(&root, DepthLimit::Plies(1), Pruning::AlphaBeta).unwrap();
        assert_eq!(shallow.action, 1);
        assert_eq!(shallow.value, 7.0);
        assert_eq!(shallow.stats.max_ply, 1);

        let deep = run(&root, DepthLimit::Plies(2), Pruning::AlphaBeta).unwrap();
        assert_eq!(deep.action, 0);
        assert_eq!(deep.value, 3.0);
    }

    #[test]
    fn test_ties_keep_first_action() {
        // Three root moves all worth 5
        let tree = Tree {
            children: vec![vec![1, 2, 3], vec![], vec![], vec![]],
            values: vec![0.0, 5.0, 5.0, 5.0],
            stuck: Vec::new(),
        };
        let root = TreeGame { tree: &tree, node: 0, ply: 0 };
        for pruning in [Pruning::AlphaBeta, Pruning::Disabled] {
            let result = run(&root, DepthLimit::Unlimited, pruning).unwrap();
            assert_eq!(result.action, 0);
            assert_eq!(result.value, 5.0);
        }
    }

    #[test]
    fn test_stuck_root_is_error() {
        let err = best_move(&Stuck, DepthLimit::Plies(3), &|_: &Stuck, _: ()| 0.0).unwrap_err();
        assert!(matches!(err, Error::NoLegalMoves { .. }));
    }

    #[test]
    fn test_stuck_interior_state_is_error() {
        // MAX root -> MIN node 1 -> [stuck node 3, leaf 4]; node 2 is a leaf
        let tree = Tree {
            children: vec![vec![1, 2], vec![3, 4], vec![], vec![], vec![]],
            values: vec![0.0, 0.0, 5.0, 0.0, 1.0],
            stuck: vec![3],
        };
        let root = TreeGame { tree: &tree, node: 0, ply: 0 };
        for pruning in [Pruning::AlphaBeta, Pruning::Disabled] {
            let err = run(&root, DepthLimit::Unlimited, pruning).unwrap_err();
            assert!(matches!(err, Error::NoLegalMoves { .. }), "{pruning:?}");
        }
    }

    #[test]
    fn test_stuck_state_in_pruned_subtree_is_not_visited() {
        // MAX root -> [leaf 5, MIN node 2 -> [leaf 1, stuck node 4]]
        let tree = Tree {
            children: vec![vec![1, 2], vec![], vec![3, 4], vec![], vec![]],
            values: vec![0.0, 5.0, 0.0, 1.0, 0.0],
            stuck: vec![4],
        };
        let root = TreeGame { tree: &tree, node: 0, ply: 0 };

        // The leaf worth 1 refutes node 2 before the stuck state is reached
        let pruned = run(&root, DepthLimit::Unlimited, Pruning::AlphaBeta).unwrap();
        assert_eq!(pruned.action, 0);
        assert_eq!(pruned.value, 5.0);
        assert_eq!(pruned.stats.cutoffs, 1);

        let err = run(&root, DepthLimit::Unlimited, Pruning::Disabled).unwrap_err();
        assert!(matches!(err, Error::NoLegalMoves { .. }));
    }

    #[test]
    fn test_terminal_root_is_game_over() {
        let game: TicTacToe = "XXXOO....".parse().unwrap();
        let err = best_move(&game, DepthLimit::Plies(3), &tictactoe::evaluate).unwrap_err();
        assert_eq!(err, Error::GameOver);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = best_move(&TicTacToe::new(), DepthLimit::Plies(0), &tictactoe::evaluate)
            .unwrap_err();
        assert_eq!(err, Error::ZeroDepth);
        assert_eq!(DepthLimit::from_signed(0), DepthLimit::Plies(0));
    }

    #[test]
    fn test_signed_depth_conversion() {
        assert_eq!(DepthLimit::from_signed(-1), DepthLimit::Unlimited);
        assert_eq!(DepthLimit::from_signed(-7), DepthLimit::Unlimited);
        assert_eq!(DepthLimit::from_signed(4), DepthLimit::Plies(4));
    }

    #[test]
    fn test_takes_immediate_win() {
        let game: TicTacToe = "XX.OO....".parse().unwrap();
        let result = best_move(&game, DepthLimit::Unlimited, &tictactoe::evaluate).unwrap();
        assert_eq!(result.action, 2);
        assert_eq!(result.value, WIN_SCORE);
    }

    #[test]
    fn test_blocks_opponent_win() {
        // O to move; X threatens the top row
        let game: TicTacToe = "XX..O....".parse().unwrap();
        assert_eq!(game.acting_player(), Mark::O);
        let result = best_move(&game, DepthLimit::Plies(2), &tictactoe::evaluate).unwrap();
        assert_eq!(result.action, 2);
    }

    #[test]
    fn test_perfect_play_draws() {
        let mut engine = Minimax::with_config(MinimaxConfig {
            depth: DepthLimit::Unlimited,
            ..Default::default()
        });
        let result = engine.best_move(&TicTacToe::new(), &tictactoe::evaluate).unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(engine.stats(), result.stats);
        assert_eq!(result.stats.max_ply, 9);
    }

    #[test]
    fn test_self_play_never_loses() {
        let mut game = TicTacToe::new();
        let mut engine = Minimax::with_config(MinimaxConfig {
            depth: DepthLimit::Unlimited,
            ..Default::default()
        });
        while !game.is_terminal() {
            let result = engine.best_move(&game, &tictactoe::evaluate).unwrap();
            game = game.next_state(&result.action);
        }
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_pruning_matches_plain_minimax_on_random_positions() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut checked = 0;
        while checked < 25 {
            let mut game = TicTacToe::new();
            let plies = rng.gen_range(1..6);
            for _ in 0..plies {
                if let Some(&mv) = game.legal_moves().choose(&mut rng) {
                    game = game.next_state(&mv);
                }
            }
            if game.is_terminal() {
                continue;
            }

            for depth in [DepthLimit::Plies(1), DepthLimit::Plies(3), DepthLimit::Unlimited] {
                let config = |pruning| MinimaxConfig {
                    depth,
                    pruning,
                    node_budget: None,
                };
                let pruned = Minimax::with_config(config(Pruning::AlphaBeta))
                    .best_move(&game, &tictactoe::evaluate)
                    .unwrap();
                let full = Minimax::with_config(config(Pruning::Disabled))
                    .best_move(&game, &tictactoe::evaluate)
                    .unwrap();

                assert_eq!(pruned.action, full.action, "position {game}, {depth:?}");
                assert_eq!(pruned.value, full.value, "position {game}, {depth:?}");
                assert!(pruned.stats.visited <= full.stats.visited);
            }
            checked += 1;
        }
    }

    #[test]
    fn test_node_budget() {
        let mut engine = Minimax::with_config(MinimaxConfig {
            depth: DepthLimit::Unlimited,
            pruning: Pruning::Disabled,
            node_budget: Some(100),
        });
        let err = engine.best_move(&TicTacToe::new(), &tictactoe::evaluate).unwrap_err();
        assert_eq!(err, Error::BudgetExhausted { visited: 101 });
        assert_eq!(engine.stats().visited, 101);
    }
}
