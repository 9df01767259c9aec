//! Caller-side game state built on top of the pure engine.
//!
//! A [`Session`] owns everything the engine deliberately does not: the
//! current grid, the running score, a seeded RNG and an undo history.

use std::collections::VecDeque;
use std::fmt;

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::direction::Direction;
use crate::engine::{self, MergeEvent};
use crate::error::Result;
use crate::grid::Grid;
use crate::spawn::spawn;
use crate::terminal::is_terminal;

/// Number of moves [`Session::undo`] can walk back unless configured otherwise.
pub const DEFAULT_UNDO_DEPTH: usize = 64;

/// Result of executing a step in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the grid changed (and a new tile was spawned).
    pub moved: bool,
    /// Points earned from merges in this move.
    pub reward: u64,
    /// Whether the game is over (no legal moves remaining).
    pub done: bool,
    /// Tiles created by merges during this move.
    pub merges: Vec<MergeEvent>,
}

#[derive(Clone)]
struct Snapshot {
    grid: Grid,
    score: u64,
    moves: u32,
}

/// One game in progress.
///
/// ```
/// use tilemerge_core::{Direction, Session};
///
/// let mut session = Session::new(42);
/// let result = session.step(Direction::Left);
/// println!("Score: {}, Moved: {}", session.score(), result.moved);
/// ```
#[derive(Clone)]
pub struct Session {
    grid: Grid,
    score: u64,
    best_score: u64,
    moves: u32,
    rng: SmallRng,
    done: bool,
    history: VecDeque<Snapshot>,
    undo_depth: usize,
}

impl Session {
    /// Create a 4×4 game with the given seed.
    ///
    /// The game starts with two random tiles (90% chance of 2, 10% chance of 4).
    pub fn new(seed: u64) -> Self {
        Self::start(Grid::default(), seed)
    }

    /// Create a `size`×`size` game with the given seed.
    pub fn with_size(size: usize, seed: u64) -> Result<Self> {
        Ok(Self::start(Grid::new(size)?, seed))
    }

    fn start(empty: Grid, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = spawn(&empty, &mut rng);
        let grid = spawn(&grid, &mut rng);
        let done = is_terminal(&grid);
        Session {
            grid,
            score: 0,
            best_score: 0,
            moves: 0,
            rng,
            done,
            history: VecDeque::new(),
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }

    /// Keep at most `depth` snapshots for [`Session::undo`]; older ones are dropped
    /// first. A depth of 0 disables undo.
    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = depth;
        self.trim_history();
        self
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.undo_depth {
            self.history.pop_front();
        }
    }

    /// Reset to a fresh game of the same size with a new seed. The best score survives.
    pub fn reset(&mut self, seed: u64) {
        debug!("reset session (seed={seed}, previous score={})", self.score);
        let best_score = self.best_score;
        let undo_depth = self.undo_depth;
        let empty = Grid::new(self.grid.size()).unwrap_or_default();
        *self = Self::start(empty, seed);
        self.best_score = best_score;
        self.undo_depth = undo_depth;
    }

    /// Execute a move in the given direction.
    ///
    /// If the move doesn't change the grid, no tile is spawned and nothing is
    /// recorded in the undo history.
    pub fn step(&mut self, direction: Direction) -> StepResult {
        if self.done {
            return StepResult {
                moved: false,
                reward: 0,
                done: true,
                merges: Vec::new(),
            };
        }

        let result = engine::apply(&self.grid, direction);
        if result.moved {
            if self.undo_depth > 0 {
                self.history.push_back(Snapshot {
                    grid: self.grid.clone(),
                    score: self.score,
                    moves: self.moves,
                });
                self.trim_history();
            }
            self.score += result.score_delta;
            self.best_score = self.best_score.max(self.score);
            self.moves += 1;
            self.grid = spawn(&result.grid, &mut self.rng);
            self.done = is_terminal(&self.grid);
            if self.done {
                debug!(
                    "game over after {} moves: score={} max_tile={}",
                    self.moves,
                    self.score,
                    self.grid.max_tile()
                );
            }
        }

        StepResult {
            moved: result.moved,
            reward: result.score_delta,
            done: self.done,
            merges: result.merges,
        }
    }

    /// Restore the grid and score from before the last state-changing step.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(snapshot) => {
                self.grid = snapshot.grid;
                self.score = snapshot.score;
                self.moves = snapshot.moves;
                self.done = is_terminal(&self.grid);
                true
            }
            None => false,
        }
    }

    /// Check if the game is over (no legal moves available).
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Legal moves as `[Up, Down, Left, Right]`.
    pub fn legal_moves(&self) -> [bool; 4] {
        engine::legal_moves(&self.grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Highest score reached in this session across resets. Kept in memory only.
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Number of state-changing steps taken.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    /// Number of steps [`Session::undo`] can currently walk back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_depth
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Session {{ score: {}, moves: {}, done: {} }}",
            self.score, self.moves, self.done
        )?;
        write!(f, "{:?}", self.grid)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "{}", self.grid)
    }
}
