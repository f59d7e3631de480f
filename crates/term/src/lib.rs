//! Terminal "game renderer" module.
//!
//! Renders the game into a fixed 120x30 framebuffer of styled characters and
//! flushes it to the terminal with crossterm. Composition is pure and
//! unit-tested; only [`TerminalRenderer`] touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{kind_color, GameView};
pub use renderer::{encode_diff_into, encode_full_into, RenderSink, TerminalRenderer};
