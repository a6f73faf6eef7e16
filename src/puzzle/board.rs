//! Board structure for the 8-puzzle

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Move, BLANK, BLANK_CHAR, CELLS, GOAL};
use crate::error::{Error, Result};

/// Immutable 3x3 arrangement of the tiles 1-8 and one blank, row-major.
///
/// Ordering follows the text encoding (`_` sorts after the digits), which
/// priority frontiers use to break ties deterministically.
///
/// # Example
///
/// ```
/// use search_core::puzzle::{Board, Move};
///
/// let board: Board = "1234567_8".parse().unwrap();
/// let next = board.apply(Move::Right).unwrap();
/// assert!(next.is_goal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    cells: [u8; CELLS],
    /// Index of the blank, kept in sync with `cells`
    blank: u8,
}

impl Board {
    /// The solved arrangement `12345678_`
    pub const fn goal() -> Self {
        Self {
            cells: [1, 2, 3, 4, 5, 6, 7, 8, BLANK],
            blank: 8,
        }
    }

    /// Build a board from raw cell values (1-8 for tiles, [`BLANK`] for the
    /// blank), validating that every value appears exactly once.
    pub fn from_cells(cells: [u8; CELLS]) -> Result<Self> {
        let text: String = cells.iter().map(|&c| cell_char(c)).collect();
        let mut seen = [false; CELLS + 1];
        let mut blank = 0;

        for (i, &value) in cells.iter().enumerate() {
            if value == 0 || value > BLANK {
                return Err(Error::InvalidTile {
                    tile: cell_char(value),
                    position: i,
                    input: text,
                });
            }
            if seen[value as usize] {
                return Err(Error::DuplicateTile {
                    tile: cell_char(value),
                    input: text,
                });
            }
            seen[value as usize] = true;
            if value == BLANK {
                blank = i as u8;
            }
        }

        Ok(Self { cells, blank })
    }

    #[inline]
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// Tile at `index`, or `None` for the blank and for indices past the board
    #[inline]
    pub fn tile(&self, index: usize) -> Option<u8> {
        match self.cells.get(index) {
            Some(&BLANK) | None => None,
            Some(&t) => Some(t),
        }
    }

    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank as usize
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        *self == Self::goal()
    }

    /// Board reached by moving the blank in direction `mv`, or `None` if the
    /// blank would leave the grid.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Option<Board> {
        let from = self.blank_index();
        let to = mv.target(from)?;
        let mut cells = self.cells;
        cells.swap(from, to);
        Some(Board {
            cells,
            blank: to as u8,
        })
    }

    /// Apply a whole action sequence, failing on the first move that would
    /// leave the grid.
    pub fn apply_all(&self, moves: &[Move]) -> Result<Board> {
        moves.iter().enumerate().try_fold(*self, |board, (step, &mv)| {
            board.apply(mv).ok_or_else(|| Error::IllegalMove {
                step,
                action: mv.to_string(),
                board: board.to_string(),
            })
        })
    }

    /// Every (move, resulting board) pair, in [`Move::ALL`] order.
    ///
    /// Each move targets a distinct cell, so no pair is produced twice.
    pub fn successors(&self) -> Vec<(Move, Board)> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply(mv).map(|next| (mv, next)))
            .collect()
    }

    /// Number of tile pairs appearing in the wrong relative order
    pub fn inversions(&self) -> u32 {
        let tiles: Vec<u8> = self.cells.iter().copied().filter(|&c| c != BLANK).collect();
        let mut count = 0;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether the goal is reachable. On an odd-width grid a move never
    /// changes inversion parity, and the goal has zero inversions.
    #[inline]
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }

    /// Random walk of `steps` moves from the goal, never immediately undoing
    /// the previous move. The result is always solvable.
    pub fn scramble<R: Rng + ?Sized>(steps: usize, rng: &mut R) -> Board {
        let mut board = Board::goal();
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let options: Vec<(Move, Board)> = board
                .successors()
                .into_iter()
                .filter(|(mv, _)| Some(mv.opposite()) != last)
                .collect();
            if let Some(&(mv, next)) = options.choose(rng) {
                board = next;
                last = Some(mv);
            }
        }

        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::goal()
    }
}

#[inline]
fn cell_char(value: u8) -> char {
    match value {
        BLANK => BLANK_CHAR,
        1..=8 => (b'0' + value) as char,
        _ => '?',
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.cells {
            write!(f, "{}", cell_char(c))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELLS {
            return Err(Error::InvalidLength {
                expected: CELLS,
                got: chars.len(),
                input: s.to_string(),
            });
        }

        let mut cells = [0u8; CELLS];
        let mut seen = [false; CELLS + 1];
        for (i, &ch) in chars.iter().enumerate() {
            let value = match ch {
                BLANK_CHAR => BLANK,
                '1'..='8' => ch as u8 - b'0',
                _ => {
                    return Err(Error::InvalidTile {
                        tile: ch,
                        position: i,
                        input: s.to_string(),
                    })
                }
            };
            if seen[value as usize] {
                return Err(Error::DuplicateTile {
                    tile: ch,
                    input: s.to_string(),
                });
            }
            seen[value as usize] = true;
            cells[i] = value;
        }

        Board::from_cells(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    #[test]
    fn test_goal_roundtrip() {
        let goal: Board = GOAL.parse().unwrap();
        assert_eq!(goal, Board::goal());
        assert!(goal.is_goal());
        assert_eq!(goal.to_string(), GOAL);
        assert_eq!(goal.blank_index(), 8);
    }

    #[test_case("1234567_" ; "too short")]
    #[test_case("12345678_9" ; "too long")]
    #[test_case("" ; "empty")]
    fn test_parse_rejects_length(input: &str) {
        assert!(matches!(
            input.parse::<Board>(),
            Err(Error::InvalidLength { expected: 9, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_tile() {
        let err = "1234567-8".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTile {
                tile: '-',
                position: 7,
                input: "1234567-8".to_string(),
            }
        );
        assert!("02345678_".parse::<Board>().is_err());
        assert!("12345678 ".parse::<Board>().is_err());
    }

    #[test_case("11345678_" ; "duplicate tile")]
    #[test_case("1234567__" ; "two blanks")]
    fn test_parse_rejects_duplicates(input: &str) {
        assert!(matches!(
            input.parse::<Board>(),
            Err(Error::DuplicateTile { .. })
        ));
    }

    #[test]
    fn test_from_cells_validates() {
        assert!(Board::from_cells([1, 2, 3, 4, 5, 6, 7, 8, BLANK]).is_ok());
        assert!(Board::from_cells([0, 2, 3, 4, 5, 6, 7, 8, BLANK]).is_err());
        assert!(Board::from_cells([1, 1, 3, 4, 5, 6, 7, 8, BLANK]).is_err());
    }

    #[test]
    fn test_tile_accessor() {
        let board: Board = "_12345678".parse().unwrap();
        assert_eq!(board.tile(0), None);
        assert_eq!(board.tile(1), Some(1));
        assert_eq!(board.tile(8), Some(8));
        assert_eq!(board.tile(CELLS), None);
        assert_eq!(board.tile(usize::MAX), None);
        assert_eq!(board.blank_index(), 0);
    }

    #[test]
    fn test_successors_corner() {
        let board = Board::goal();
        let succ = board.successors();
        assert_eq!(succ.len(), 2);
        assert_eq!(succ[0], (Move::Up, "12345_786".parse().unwrap()));
        assert_eq!(succ[1], (Move::Left, "1234567_8".parse().unwrap()));
    }

    #[test]
    fn test_successors_center() {
        let board: Board = "1234_5678".parse().unwrap();
        let succ = board.successors();
        assert_eq!(succ.len(), 4);
        let moves: Vec<Move> = succ.iter().map(|(m, _)| *m).collect();
        assert_eq!(moves, Move::ALL.to_vec());
        assert_eq!(succ[0].1.to_string(), "1_3425678");
        assert_eq!(succ[1].1.to_string(), "1234756_8");
        assert_eq!(succ[2].1.to_string(), "123_45678");
        assert_eq!(succ[3].1.to_string(), "12345_678");
    }

    #[test]
    fn test_successors_edge_middle() {
        // Blank at end of the middle row: no wrap-around to index 6
        let board: Board = "12345_678".parse().unwrap();
        let succ = board.successors();
        assert_eq!(succ.len(), 3);
        assert!(succ.iter().all(|(m, _)| *m != Move::Right));
    }

    #[test]
    fn test_successors_do_not_mutate() {
        let board: Board = "1234_5678".parse().unwrap();
        let copy = board;
        let _ = board.successors();
        assert_eq!(board, copy);
    }

    #[test]
    fn test_apply_all() {
        let board: Board = "123456_78".parse().unwrap();
        let solved = board.apply_all(&[Move::Right, Move::Right]).unwrap();
        assert!(solved.is_goal());
    }

    #[test]
    fn test_apply_all_illegal() {
        let err = Board::goal()
            .apply_all(&[Move::Left, Move::Down])
            .unwrap_err();
        assert!(matches!(err, Error::IllegalMove { step: 1, .. }));
    }

    #[test]
    fn test_solvability() {
        assert!(Board::goal().is_solvable());
        assert_eq!(Board::goal().inversions(), 0);
        // Swapping two tiles flips parity
        let swapped: Board = "21345678_".parse().unwrap();
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_solvable());
    }

    #[test]
    fn test_scramble_is_solvable_and_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        for steps in [0, 1, 5, 20, 60] {
            let board = Board::scramble(steps, &mut rng);
            assert!(board.is_solvable());
        }

        let a = Board::scramble(30, &mut StdRng::seed_from_u64(42));
        let b = Board::scramble(30, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(Board::scramble(0, &mut StdRng::seed_from_u64(1)).is_goal());
    }

    #[test]
    fn test_ordering_matches_text() {
        let a: Board = "1234567_8".parse().unwrap();
        let b: Board = "12345678_".parse().unwrap();
        assert_eq!(a.cmp(&b), a.to_string().cmp(&b.to_string()));
    }
}
