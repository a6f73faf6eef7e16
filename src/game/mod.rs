//! Game-state interface consumed by the adversarial search
//!
//! The minimax engine treats a game as opaque and only calls the four
//! operations of [`GameState`]. Scoring lives behind [`Evaluator`] so the
//! engine never depends on a particular board representation.

pub mod tictactoe;

pub use tictactoe::{Mark, TicTacToe};

/// Two-player, zero-sum, turn-based game position.
pub trait GameState: Sized {
    type Action: Clone;
    type Player: Copy + Eq;

    fn is_terminal(&self) -> bool;

    /// Legal actions in the order the search should try them.
    fn legal_moves(&self) -> Vec<Self::Action>;

    /// Independent successor position; `self` is left untouched.
    fn next_state(&self, action: &Self::Action) -> Self;

    /// Player whose turn it is
    fn acting_player(&self) -> Self::Player;
}

/// Scores a position from the point of view of `player`.
///
/// Must return the true outcome value at terminal positions and a finite
/// estimate elsewhere.
pub trait Evaluator<G: GameState> {
    fn evaluate(&self, state: &G, player: G::Player) -> f64;
}

impl<G, F> Evaluator<G> for F
where
    G: GameState,
    F: Fn(&G, G::Player) -> f64,
{
    #[inline]
    fn evaluate(&self, state: &G, player: G::Player) -> f64 {
        self(state, player)
    }
}
