//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, timers, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or script) produces identical games
//! - **Testable**: Every rule is a plain function or method
//! - **Portable**: Can run in any host (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: Fixed-size grid with row access and line clearing
//! - [`pieces`]: Catalog of the seven occupancy matrices and clockwise rotation
//! - [`collision`]: Placement checks and copy-on-write merging
//! - [`scoring`]: Line-clear points, hard-drop bonus, leveling, fall cadence
//! - [`rng`]: Uniform and scripted piece sources
//! - [`game_state`]: Session state, active-piece lifecycle and commands
//! - [`snapshot`]: Owned, serializable views for presentation layers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is an independent draw; repeats happen
//! - **Rotation**: clockwise only, accepted only if it fits at the current anchor
//! - **Lock**: a piece locks the moment a downward move is blocked
//! - **Scoring**: `lines * 100 * level` per lock, +2 per hard-dropped row
//! - **Leveling**: at most one level per lock, once lines reach `level * 10`
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{Command, Direction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.apply(Command::StartGame);
//!
//! game.apply(Command::Move(Direction::Left));
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! assert_eq!(game.phase(), Phase::Running);
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The core has no clock. Whoever hosts it calls [`GameState::tick`] every
//! [`GameState::fall_interval_ms`] while the phase is `Running`.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, is_legal_placement, merge_into_board};
pub use game_state::{ActivePiece, GameState, SessionSummary};
pub use pieces::{definition, rotate_shape, spawn_shape, PieceDef, Shape};
pub use rng::{PieceSource, ScriptedPieces, SimpleRng, UniformPicker};
pub use scoring::{fall_interval_ms, hard_drop_score, line_clear_score, should_level_up};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
