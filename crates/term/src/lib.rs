//! Terminal presentation for the snake client.
//!
//! Views render into a [`Canvas`] of toned glyphs; the [`TerminalRenderer`]
//! flushes a canvas to the terminal through crossterm. Keeping the view pure
//! lets the layout be unit-tested without a terminal.

pub mod board_view;
pub mod canvas;
pub mod renderer;

pub use snake_client_core as core;
pub use snake_client_types as types;

pub use board_view::{BoardView, ViewState, Viewport, GAME_OVER_BANNER, HELP_LINE};
pub use canvas::{Canvas, Glyph, Tone};
pub use renderer::{encode_changed_rows_into, encode_full_into, TerminalRenderer};
