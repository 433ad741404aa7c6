//! Core game logic module - pure, deterministic, and testable
//!
//! This crate owns every game rule: the board, the shape table, the fit test,
//! gravity timing, line clears and level progression. It performs no I/O and
//! never calls into rendering; frontends issue commands, report elapsed time
//! and read the state back.
//!
//! # Module Structure
//!
//! - [`board`]: 10x16 sign-encoded grid with row compaction
//! - [`game`]: lifecycle state machine and piece movement engine
//! - [`pieces`]: shape table and 90° rotation
//! - [`rng`]: seeded uniform piece selection
//! - [`rules`]: immutable configuration and the speed model
//! - [`timer`]: fire-once gravity countdown
//!
//! # Example
//!
//! ```
//! use term_tetris_core::{Game, Rules};
//! use term_tetris_types::{GameCommand, GameStatus};
//!
//! let mut game = Game::new(Rules::new(12345));
//! assert_eq!(game.status(), GameStatus::Intro);
//!
//! game.apply(GameCommand::Start);
//! game.apply(GameCommand::MoveLeft);
//! game.apply(GameCommand::Rotate);
//! game.apply(GameCommand::Fall);
//!
//! // The dropped piece is settled and a new one is falling.
//! assert_eq!(game.board().settled_count(), 4);
//! assert_eq!(game.status(), GameStatus::Started);
//! ```
//!
//! # Timing
//!
//! Call [`Game::tick`](game::Game::tick) with the elapsed milliseconds; the
//! gravity timer fires once per interval and is rearmed by the game itself.

pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod rules;
pub mod timer;

pub use term_tetris_types as types;

pub use board::Board;
pub use game::{ClearedRows, Game, SPAWN_X, SPAWN_Y};
pub use pieces::{get_shape, rotate, PieceShape, SHAPE_TABLE};
pub use rng::SimpleRng;
pub use rules::{gravity_interval_ms, ResumePolicy, Rules};
pub use timer::GravityTimer;
