//! Heuristic evaluation for informed search

pub mod heuristic;

pub use heuristic::{combined, hamming, manhattan, PuzzleHeuristic};

/// Estimate of the remaining cost from a state to the goal.
///
/// Any `Fn(&S) -> u32` is a heuristic, so plain functions such as
/// [`manhattan`] can be passed straight to the search engine.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> u32;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> u32,
{
    #[inline]
    fn estimate(&self, state: &S) -> u32 {
        self(state)
    }
}
