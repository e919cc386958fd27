//! Core client logic module - pure, deterministic, and testable
//!
//! This module contains the snapshot model, the snapshot decoder and the
//! client session record. It has **zero dependencies** on networking,
//! terminal or async runtimes, making it:
//!
//! - **Deterministic**: the same document always decodes to the same snapshot
//! - **Testable**: the bracket-scanning functions are unit-tested in isolation
//! - **Portable**: usable from any presentation layer
//!
//! # Module Structure
//!
//! - [`snapshot`]: immutable board state for one server tick
//! - [`parser`]: lenient, hand-rolled decoder for the snapshot document
//! - [`session`]: phase, steering, in-flight guard and tick accumulator
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use snake_client_core::{parser, ClientSession};
//! use snake_client_core::types::{Direction, Phase};
//!
//! let doc = r#"{"snake":[[5,5]],"food":[3,3],"score":0,"game_over":false,"width":20,"height":15}"#;
//! let snap = parser::parse(doc).unwrap();
//!
//! let mut session = ClientSession::new();
//! session.mark_ready();
//! session.start(Arc::new(snap));
//! assert_eq!(session.phase(), Phase::Playing);
//!
//! // Turning back on the snake is refused.
//! assert!(!session.steer(Direction::Left));
//! assert!(session.steer(Direction::Up));
//! ```

pub mod parser;
pub mod session;
pub mod snapshot;

pub use snake_client_types as types;

pub use parser::{parse, ParseError, ParseFailure};
pub use session::ClientSession;
pub use snapshot::Snapshot;
