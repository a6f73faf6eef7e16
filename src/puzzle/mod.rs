//! 8-puzzle representation and successor generation

pub mod board;

pub use board::Board;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::search::StateSpace;

/// Grid width (3x3)
pub const WIDTH: usize = 3;
pub const CELLS: usize = WIDTH * WIDTH; // 9

/// Internal value of the blank cell. Sorts after every tile, like `_` after
/// the digits in the text encoding.
pub const BLANK: u8 = 9;

/// Character used for the blank in the text encoding
pub const BLANK_CHAR: char = '_';

/// Text encoding of the solved arrangement
pub const GOAL: &str = "12345678_";

/// Direction the blank moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in successor-generation order
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// The move that undoes this one
    #[inline]
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Index reached by moving the blank from `blank`, or `None` when the
    /// move would cross the edge of the grid.
    #[inline]
    pub fn target(self, blank: usize) -> Option<usize> {
        let (row, col) = (blank / WIDTH, blank % WIDTH);
        match self {
            Move::Up if row > 0 => Some(blank - WIDTH),
            Move::Down if row + 1 < WIDTH => Some(blank + WIDTH),
            Move::Left if col > 0 => Some(blank - 1),
            Move::Right if col + 1 < WIDTH => Some(blank + 1),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            _ => Err(Error::UnknownMove {
                input: s.to_string(),
            }),
        }
    }
}

/// The 8-puzzle as a search problem: goal is [`GOAL`], successors come from
/// [`Board::successors`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EightPuzzle;

impl StateSpace for EightPuzzle {
    type State = Board;
    type Action = Move;

    #[inline]
    fn is_goal(&self, state: &Board) -> bool {
        state.is_goal()
    }

    fn successors(&self, state: &Board) -> Vec<(Move, Board)> {
        state.successors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_opposite() {
        for mv in Move::ALL {
            assert_eq!(mv.opposite().opposite(), mv);
            assert_ne!(mv.opposite(), mv);
        }
    }

    #[test]
    fn test_move_target_corners() {
        // Top-left corner: only down and right
        assert_eq!(Move::Up.target(0), None);
        assert_eq!(Move::Left.target(0), None);
        assert_eq!(Move::Down.target(0), Some(3));
        assert_eq!(Move::Right.target(0), Some(1));

        // Bottom-right corner: only up and left
        assert_eq!(Move::Down.target(8), None);
        assert_eq!(Move::Right.target(8), None);
        assert_eq!(Move::Up.target(8), Some(5));
        assert_eq!(Move::Left.target(8), Some(7));
    }

    #[test]
    fn test_move_target_no_row_wrap() {
        // Index 2 is the end of the first row; moving right must not wrap to 3
        assert_eq!(Move::Right.target(2), None);
        assert_eq!(Move::Left.target(3), None);
    }

    #[test]
    fn test_move_parse() {
        assert_eq!("up".parse::<Move>(), Ok(Move::Up));
        assert_eq!(" Right ".parse::<Move>(), Ok(Move::Right));
        assert_eq!("l".parse::<Move>(), Ok(Move::Left));
        assert!(matches!(
            "sideways".parse::<Move>(),
            Err(Error::UnknownMove { .. })
        ));
    }

    #[test]
    fn test_move_display_roundtrip() {
        for mv in Move::ALL {
            assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
        }
    }

    #[test]
    fn test_eight_puzzle_goal() {
        let space = EightPuzzle;
        assert!(space.is_goal(&Board::goal()));
        let board: Board = "123456_78".parse().unwrap();
        assert!(!space.is_goal(&board));
        assert_eq!(space.successors(&board), board.successors());
    }
}
