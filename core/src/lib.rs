//! # Tilemerge Core Engine
//!
//! Pure rules for a sliding-tile merge puzzle on an N×N grid. Tiles hold
//! powers of two, slide in one of four directions, and equal neighbours merge
//! into their sum. Every operation takes a grid value and returns a new one;
//! the only source of randomness is the RNG the caller passes to [`spawn`].
//!
//! The engine is built from a single line algorithm ([`compact_line`]) and a
//! coordinate transform per direction ([`orientation`]), so all four moves
//! share one merge rule.
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use tilemerge_core::{apply, is_terminal, spawn, Direction, Grid};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let grid = spawn(&spawn(&Grid::default(), &mut rng), &mut rng);
//!
//! let result = apply(&grid, Direction::Left);
//! let next = if result.moved { spawn(&result.grid, &mut rng) } else { grid };
//! println!("Gained: {}, Over: {}", result.score_delta, is_terminal(&next));
//! ```
//!
//! [`Session`] bundles that loop with score keeping and undo for callers
//! that do not want to manage state themselves.

pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod line;
pub mod orientation;
pub mod session;
pub mod spawn;
pub mod terminal;

pub use direction::Direction;
pub use engine::{apply, can_move, legal_moves, MergeEvent, MoveResult};
pub use error::{EngineError, Result};
pub use grid::{Grid, Position, DEFAULT_SIZE, EMPTY, MAX_TILE};
pub use line::{compact_line, LineOutcome};
pub use orientation::{denormalize, normalize, Orientation};
pub use session::{Session, StepResult, DEFAULT_UNDO_DEPTH};
pub use spawn::{spawn, spawn_tile, Spawned, TWO_PROBABILITY};
pub use terminal::is_terminal;
