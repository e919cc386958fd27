//! Terminal input module.
//!
//! This module is independent of any UI framework beyond crossterm's event
//! types. It maps key events into [`crate::types::ControlEvent`]s for the sync
//! controller; whether an event applies is decided there, not here.

pub mod map;

pub use snake_client_types as types;

pub use map::{map_key, should_quit};
