//! Distance estimates for the 8-puzzle
//!
//! All three estimates are admissible (never exceed the true number of moves
//! left) and return 0 on the goal:
//! - [`hamming`]: misplaced tiles
//! - [`manhattan`]: sum of per-tile grid distances, dominates `hamming`
//! - [`combined`]: floor of their mean

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::puzzle::{Board, CELLS, WIDTH};

use super::Heuristic;

/// Number of tiles (blank excluded) not on their goal square.
#[must_use]
pub fn hamming(board: &Board) -> u32 {
    (0..CELLS)
        .filter(|&i| matches!(board.tile(i), Some(t) if goal_index(t) != i))
        .count() as u32
}

/// Sum over tiles of row distance plus column distance to the goal square.
#[must_use]
pub fn manhattan(board: &Board) -> u32 {
    (0..CELLS)
        .filter_map(|i| board.tile(i).map(|t| grid_distance(i, goal_index(t))))
        .sum()
}

/// Floor of the mean of [`hamming`] and [`manhattan`].
///
/// Admissible because both operands are, but not pointwise larger than
/// either of them.
#[must_use]
pub fn combined(board: &Board) -> u32 {
    (hamming(board) + manhattan(board)) / 2
}

/// Goal index of tile `t` (tiles are 1-based, goal is row-major)
#[inline]
fn goal_index(tile: u8) -> usize {
    tile as usize - 1
}

#[inline]
fn grid_distance(a: usize, b: usize) -> u32 {
    let (ra, ca) = (a / WIDTH, a % WIDTH);
    let (rb, cb) = (b / WIDTH, b % WIDTH);
    (ra.abs_diff(rb) + ca.abs_diff(cb)) as u32
}

/// Named puzzle heuristic, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PuzzleHeuristic {
    Hamming,
    #[default]
    Manhattan,
    Combined,
}

impl PuzzleHeuristic {
    pub const ALL: [PuzzleHeuristic; 3] = [
        PuzzleHeuristic::Hamming,
        PuzzleHeuristic::Manhattan,
        PuzzleHeuristic::Combined,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PuzzleHeuristic::Hamming => "hamming",
            PuzzleHeuristic::Manhattan => "manhattan",
            PuzzleHeuristic::Combined => "combined",
        }
    }
}

impl Heuristic<Board> for PuzzleHeuristic {
    #[inline]
    fn estimate(&self, board: &Board) -> u32 {
        match self {
            PuzzleHeuristic::Hamming => hamming(board),
            PuzzleHeuristic::Manhattan => manhattan(board),
            PuzzleHeuristic::Combined => combined(board),
        }
    }
}

impl fmt::Display for PuzzleHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PuzzleHeuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hamming" => Ok(PuzzleHeuristic::Hamming),
            "manhattan" => Ok(PuzzleHeuristic::Manhattan),
            "combined" | "mean" => Ok(PuzzleHeuristic::Combined),
            _ => Err(Error::UnknownHeuristic {
                input: s.to_string(),
                expected: "hamming, manhattan, combined".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::EightPuzzle;
    use crate::search::{GraphSearcher, Strategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_zero_on_goal() {
        let goal = Board::goal();
        assert_eq!(hamming(&goal), 0);
        assert_eq!(manhattan(&goal), 0);
        assert_eq!(combined(&goal), 0);
        for h in PuzzleHeuristic::ALL {
            assert_eq!(h.estimate(&goal), 0);
        }
    }

    #[test_case("1234567_8", 1, 1 ; "one tile off by one")]
    #[test_case("123456_78", 2, 2 ; "two tiles off by one")]
    #[test_case("_23456781", 1, 4 ; "tile one in far corner")]
    #[test_case("87654321_", 8, 16 ; "reversed")]
    fn test_known_values(s: &str, ham: u32, man: u32) {
        let b = board(s);
        assert_eq!(hamming(&b), ham);
        assert_eq!(manhattan(&b), man);
        assert_eq!(combined(&b), (ham + man) / 2);
    }

    #[test]
    fn test_blank_is_ignored() {
        // Only the blank and tile 8 swapped: a single misplaced tile
        let b = board("1234567_8");
        assert_eq!(hamming(&b), 1);
    }

    #[test]
    fn test_manhattan_dominates_hamming() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let b = Board::scramble(40, &mut rng);
            assert!(manhattan(&b) >= hamming(&b));
            assert!(combined(&b) <= manhattan(&b));
            assert!(combined(&b) >= hamming(&b));
        }
    }

    #[test]
    fn test_combined_is_admissible() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let b = Board::scramble(16, &mut rng);
            let result = GraphSearcher::new().search(&EightPuzzle, b, Strategy::BreadthFirst);
            let optimal = result.outcome.path().unwrap().len() as u32;
            assert!(combined(&b) <= optimal, "board {b}");
            assert!(manhattan(&b) <= optimal, "board {b}");
        }
    }

    #[test]
    fn test_parse_heuristic() {
        assert_eq!("Manhattan".parse::<PuzzleHeuristic>(), Ok(PuzzleHeuristic::Manhattan));
        assert_eq!("combined".parse::<PuzzleHeuristic>(), Ok(PuzzleHeuristic::Combined));
        assert!(matches!(
            "euclid".parse::<PuzzleHeuristic>(),
            Err(Error::UnknownHeuristic { .. })
        ));
        for h in PuzzleHeuristic::ALL {
            assert_eq!(h.to_string().parse::<PuzzleHeuristic>(), Ok(h));
        }
    }
}
