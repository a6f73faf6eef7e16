//! Session state for the viewer tabs
//!
//! Searches run on a spawned thread and report back through a channel that
//! the UI polls once per frame.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{PuzzleSolver, SolveResult, SolverConfig};
use crate::error::Result;
use crate::game::{tictactoe, GameState, Mark, TicTacToe};
use crate::puzzle::{Board, Move};
use crate::search::{DepthLimit, Minimax, MinimaxConfig, MoveResult, Pruning};

/// Background computation state
pub enum Worker<T> {
    Idle,
    Busy {
        receiver: Receiver<T>,
        start_time: Instant,
    },
}

impl<T: Send + 'static> Worker<T> {
    fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let _ = tx.send(job());
        });
        Worker::Busy {
            receiver: rx,
            start_time: Instant::now(),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Worker::Busy { .. })
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Worker::Busy { start_time, .. } => Some(start_time.elapsed()),
            Worker::Idle => None,
        }
    }

    /// Take the finished value, if any. `Err` means the worker died.
    fn poll(&mut self) -> std::result::Result<Option<T>, ()> {
        let received = match self {
            Worker::Busy { receiver, .. } => match receiver.try_recv() {
                Ok(value) => Ok(Some(value)),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => Err(()),
            },
            Worker::Idle => return Ok(None),
        };
        *self = Worker::Idle;
        received
    }
}

/// 8-puzzle tab: scramble, solve in the background, replay the solution.
pub struct PuzzleSession {
    pub board: Board,
    pub config: SolverConfig,
    pub scramble_steps: usize,
    pub last_result: Option<SolveResult>,
    pub message: Option<String>,
    /// Board the current solution starts from
    solved_from: Board,
    solution: Vec<Move>,
    /// Moves of `solution` already applied to `board`
    step: usize,
    worker: Worker<SolveResult>,
    rng: StdRng,
}

impl PuzzleSession {
    pub fn new(seed: u64) -> Self {
        Self {
            board: Board::goal(),
            config: SolverConfig::default(),
            scramble_steps: 20,
            last_result: None,
            message: None,
            solved_from: Board::goal(),
            solution: Vec::new(),
            step: 0,
            worker: Worker::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_solving(&self) -> bool {
        self.worker.is_busy()
    }

    pub fn solving_elapsed(&self) -> Option<Duration> {
        self.worker.elapsed()
    }

    pub fn solution(&self) -> &[Move] {
        &self.solution
    }

    pub fn step(&self) -> usize {
        self.step
    }

    fn set_board(&mut self, board: Board) {
        self.board = board;
        self.solution.clear();
        self.step = 0;
        self.message = None;
    }

    pub fn reset(&mut self) {
        if !self.is_solving() {
            self.set_board(Board::goal());
        }
    }

    pub fn scramble(&mut self) {
        if !self.is_solving() {
            let board = Board::scramble(self.scramble_steps, &mut self.rng);
            self.set_board(board);
        }
    }

    /// Load a board typed by the user.
    pub fn load(&mut self, input: &str) -> Result<()> {
        let board: Board = input.parse()?;
        self.set_board(board);
        Ok(())
    }

    /// Slide the tile at `index` into the blank if they are adjacent.
    pub fn slide_tile(&mut self, index: usize) -> std::result::Result<(), String> {
        if self.is_solving() {
            return Err("Solver is running".to_string());
        }
        let blank = self.board.blank_index();
        let mv = Move::ALL
            .into_iter()
            .find(|mv| mv.target(blank) == Some(index))
            .ok_or_else(|| "Tile is not next to the blank".to_string())?;
        let next = self.board.apply(mv).ok_or_else(|| "Illegal move".to_string())?;
        self.set_board(next);
        Ok(())
    }

    pub fn start_solve(&mut self) {
        if self.is_solving() {
            return;
        }
        let board = self.board;
        let config = self.config;
        self.solved_from = board;
        self.solution.clear();
        self.step = 0;
        self.message = None;
        self.worker = Worker::spawn(move || PuzzleSolver::with_config(config).solve(&board));
    }

    /// Poll the solver thread; returns true when a result arrived.
    pub fn check_solve_result(&mut self) -> bool {
        match self.worker.poll() {
            Ok(Some(result)) => {
                match result.outcome.path() {
                    Some(path) => self.solution = path.to_vec(),
                    None => self.message = Some(outcome_text(&result).to_string()),
                }
                self.last_result = Some(result);
                true
            }
            Ok(None) => false,
            Err(()) => {
                self.message = Some("Solver stopped unexpectedly".to_string());
                false
            }
        }
    }

    /// Apply the next solution move
    pub fn step_forward(&mut self) -> bool {
        let Some(&mv) = self.solution.get(self.step) else {
            return false;
        };
        match self.board.apply(mv) {
            Some(next) => {
                self.board = next;
                self.step += 1;
                true
            }
            None => false,
        }
    }

    /// Undo the last applied solution move
    pub fn step_back(&mut self) -> bool {
        if self.step == 0 {
            return false;
        }
        let mv = self.solution[self.step - 1].opposite();
        match self.board.apply(mv) {
            Some(prev) => {
                self.board = prev;
                self.step -= 1;
                true
            }
            None => false,
        }
    }

    /// Jump back to the board the solution starts from
    pub fn rewind(&mut self) {
        if !self.solution.is_empty() {
            self.board = self.solved_from;
            self.step = 0;
        }
    }
}

fn outcome_text(result: &SolveResult) -> &'static str {
    use crate::search::Outcome;
    match result.outcome {
        Outcome::Found(_) => "Solved",
        Outcome::NoSolution => "No solution: the board is unsolvable",
        Outcome::LimitReached => "Expansion limit reached",
    }
}

/// Tic-tac-toe tab: human against alpha-beta.
pub struct DuelSession {
    pub game: TicTacToe,
    pub human: Mark,
    pub depth: u32,
    pub pruning: Pruning,
    pub last_result: Option<MoveResult<usize>>,
    pub last_move: Option<usize>,
    pub message: Option<String>,
    history: Vec<usize>,
    worker: Worker<Result<MoveResult<usize>>>,
}

impl DuelSession {
    pub fn new(human: Mark) -> Self {
        Self {
            game: TicTacToe::new(),
            human,
            depth: 9,
            pruning: Pruning::AlphaBeta,
            last_result: None,
            last_move: None,
            message: None,
            history: Vec::new(),
            worker: Worker::Idle,
        }
    }

    pub fn reset(&mut self) {
        *self = Self {
            depth: self.depth,
            pruning: self.pruning,
            ..Self::new(self.human)
        };
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.game.is_terminal() && self.game.acting_player() != self.human
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.worker.is_busy()
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        self.worker.elapsed()
    }

    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Human move at `index`
    pub fn try_play(&mut self, index: usize) -> std::result::Result<(), String> {
        if self.game.is_terminal() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if self.is_ai_turn() {
            return Err("Not your turn".to_string());
        }
        let next = self.game.try_play(index).ok_or_else(|| "Cell is taken".to_string())?;
        self.execute_move(index, next);
        Ok(())
    }

    fn execute_move(&mut self, index: usize, next: TicTacToe) {
        self.game = next;
        self.history.push(index);
        self.last_move = Some(index);
        self.message = None;
    }

    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }
        let game = self.game;
        let config = MinimaxConfig {
            depth: DepthLimit::Plies(self.depth),
            pruning: self.pruning,
            node_budget: None,
        };
        self.worker = Worker::spawn(move || {
            Minimax::with_config(config).best_move(&game, &tictactoe::evaluate)
        });
    }

    pub fn check_ai_result(&mut self) {
        match self.worker.poll() {
            Ok(Some(Ok(result))) => {
                if let Some(next) = self.game.try_play(result.action) {
                    self.execute_move(result.action, next);
                }
                self.last_result = Some(result);
            }
            Ok(Some(Err(err))) => self.message = Some(err.to_string()),
            Ok(None) => {}
            Err(()) => self.message = Some("AI stopped unexpectedly".to_string()),
        }
    }

    /// Take back the last human move and the reply to it
    pub fn undo(&mut self) {
        if self.history.is_empty() || self.is_ai_thinking() {
            return;
        }
        // Back up to the latest earlier position with the human to move
        let mut keep = self.history.len() - 1;
        while keep > 0 && !self.human_moves_after(keep) {
            keep -= 1;
        }
        let moves: Vec<usize> = self.history.drain(..keep).collect();

        self.game = TicTacToe::new();
        self.history.clear();
        self.last_move = None;
        for index in moves {
            let next = self.game.next_state(&index);
            self.execute_move(index, next);
        }
    }

    /// X moves after an even number of plies
    fn human_moves_after(&self, plies: usize) -> bool {
        (plies % 2 == 0) == (self.human == Mark::X)
    }

    /// Short status line
    pub fn status(&self) -> String {
        match self.game.winner() {
            Some(mark) if mark == self.human => "You win".to_string(),
            Some(_) => "AI wins".to_string(),
            None if self.game.is_full() => "Draw".to_string(),
            None if self.is_ai_thinking() => "AI thinking...".to_string(),
            None if self.is_ai_turn() => "AI to move".to_string(),
            None => "Your turn".to_string(),
        }
    }
}
