//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`] and provides
//! an auto-repeat handler for held movement keys that also works in terminals
//! without key-release events. The game core never sees key codes.

pub mod handler;
pub mod map;

pub use term_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
