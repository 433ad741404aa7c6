//! Frontend-agnostic game session.
//!
//! A [`Session`] owns the game and the key auto-repeat state, turns terminal
//! events into commands and advances gravity by the time reported by the
//! caller. It does no I/O of its own.

pub mod session;

pub use term_tetris_core as core;
pub use term_tetris_input as input;
pub use term_tetris_types as types;

pub use session::{Control, Session, SessionConfig};
