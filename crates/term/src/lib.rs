//! Terminal rendering for the game.
//!
//! The game is drawn into a plain framebuffer of styled characters, which a
//! small renderer diffs against the previous frame and flushes to the
//! terminal. No widget toolkit is involved, so the layout (two columns per
//! board cell, title, instruction panel) stays under direct control.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport, INSTRUCTIONS, TITLE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
