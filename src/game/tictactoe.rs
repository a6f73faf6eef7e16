//! Tic-tac-toe, a small complete game for exercising the adversarial search

use std::fmt;
use std::str::FromStr;

use super::GameState;
use crate::error::Error;

/// The eight winning lines (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Score of a won position; a lost one scores the negation
pub const WIN_SCORE: f64 = 100.0;

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// Board cells (row-major) plus the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: [Option<Mark>; 9],
    to_move: Mark,
}

impl TicTacToe {
    /// Empty board, X to move
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            to_move: Mark::X,
        }
    }

    /// Mark at `index`, `None` for an empty cell or an index past the board
    #[inline]
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    #[inline]
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some(first)
        })
    }

    /// Winning line, for highlighting
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        LINES.iter().copied().find(|line| {
            self.cells[line[0]].is_some()
                && line.iter().all(|&i| self.cells[i] == self.cells[line[0]])
        })
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Position after the side to move marks `index`, or `None` if the cell is
    /// taken, out of range, or the game is over.
    pub fn try_play(&self, index: usize) -> Option<TicTacToe> {
        if index >= 9 || self.cells[index].is_some() || self.is_terminal() {
            return None;
        }
        Some(self.next_state(&index))
    }

    /// Lines `player` could still complete that already hold one of their marks
    fn open_lines(&self, player: Mark) -> i32 {
        LINES
            .iter()
            .filter(|line| {
                let mut own = false;
                for &i in line.iter() {
                    match self.cells[i] {
                        Some(m) if m == player => own = true,
                        Some(_) => return false,
                        None => {}
                    }
                }
                own
            })
            .count() as i32
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Action = usize;
    type Player = Mark;

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    fn legal_moves(&self) -> Vec<usize> {
        if self.winner().is_some() {
            return Vec::new();
        }
        (0..9).filter(|&i| self.cells[i].is_none()).collect()
    }

    fn next_state(&self, action: &usize) -> Self {
        debug_assert!(self.cells[*action].is_none());
        let mut next = *self;
        next.cells[*action] = Some(self.to_move);
        next.to_move = self.to_move.opponent();
        next
    }

    #[inline]
    fn acting_player(&self) -> Mark {
        self.to_move
    }
}

/// Evaluate `state` for `player`: exact at terminal positions, otherwise the
/// difference in open lines.
#[must_use]
pub fn evaluate(state: &TicTacToe, player: Mark) -> f64 {
    match state.winner() {
        Some(w) if w == player => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None if state.is_full() => 0.0,
        None => f64::from(state.open_lines(player) - state.open_lines(player.opponent())),
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            let c = cell.map_or('.', Mark::to_char);
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for TicTacToe {
    type Err = Error;

    /// Nine cells of `X`, `O` or `.`; the side to move follows from the counts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(Error::InvalidLength {
                expected: 9,
                got: chars.len(),
                input: s.to_string(),
            });
        }

        let mut cells = [None; 9];
        for (i, &ch) in chars.iter().enumerate() {
            cells[i] = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | ' ' => None,
                _ => {
                    return Err(Error::InvalidCell {
                        character: ch,
                        position: i,
                        input: s.to_string(),
                    })
                }
            };
        }

        let xs = cells.iter().filter(|c| **c == Some(Mark::X)).count();
        let os = cells.iter().filter(|c| **c == Some(Mark::O)).count();
        let to_move = match xs.checked_sub(os) {
            Some(0) => Mark::X,
            Some(1) => Mark::O,
            _ => {
                return Err(Error::InvalidPieceCounts {
                    x_count: xs,
                    o_count: os,
                })
            }
        };

        Ok(Self { cells, to_move })
    }
}
