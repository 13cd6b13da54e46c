//! Core game logic - pure, deterministic and testable
//!
//! This crate holds every rule of the falling-block simulation: the grid,
//! the piece table, collision, the piece source, scoring, the transition
//! engine and gravity pacing. It does no I/O; callers feed it intents and
//! elapsed time and read snapshots and events back.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 cell grid with merge and full-row clearing
//! - [`pieces`]: shape matrices, clockwise rotation, spawn placement
//! - [`collision`]: the single collision predicate
//! - [`rng`]: uniform (or scripted) piece generation
//! - [`scoring`]: line score, level and drop interval curves
//! - [`game_state`]: lifecycle and move/rotate/drop/lock transitions
//! - [`pacing`]: elapsed-time accumulator driving automatic drops
//! - [`events`]: the event sink seam
//! - [`snapshot`]: read-only state copies for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is drawn independently; repeats happen
//! - **Plain rotation**: 90° clockwise, no wall kicks; blocked rotations are dropped
//! - **Immediate lock**: a piece locks on the first drop that cannot move it
//! - **Scoring**: `k * 100 * 2^(k-1)` for `k` rows cleared by one lock
//! - **Levels**: one level per 10 lines, starting at 1
//!
//! # Example
//!
//! ```
//! use bricks_core::{GameState, Pacer};
//!
//! let mut game = GameState::new(12345);
//! let mut pacer = Pacer::new();
//! game.start();
//!
//! game.move_left();
//! game.rotate();
//! game.drop_piece();
//!
//! // Gravity: more than 800 ms at level 1 moves the piece down one row.
//! pacer.advance(&mut game, 801);
//!
//! assert_eq!(game.score(), 0);
//! assert!(game.current().is_some());
//! ```

pub mod collision;
pub mod events;
pub mod game_state;
pub mod grid;
pub mod pacing;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use bricks_types as types;

// Re-export commonly used types for convenience
pub use collision::collides;
pub use events::{EventSink, FnSink, NullSink};
pub use game_state::{DropOutcome, GameState, Phase};
pub use grid::Grid;
pub use pacing::Pacer;
pub use pieces::{get_shape, Position, Shape, Tetromino};
pub use rng::PieceGenerator;
pub use scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
pub use snapshot::{GameSnapshot, PieceSnapshot};
