//! Transport module - HTTP requests against the snake game server
//!
//! This module turns the game server's small HTTP API into typed async
//! operations. Each operation resolves to exactly one outcome: a decoded
//! [`Snapshot`](crate::core::Snapshot) or a classified [`TransportError`].
//!
//! # Protocol Overview
//!
//! | Operation | Method | Path | Request body | Success body |
//! |-----------|--------|------|--------------|--------------|
//! | Health | GET | `/health` | none | any |
//! | Start | POST | `/start` | empty | snapshot document |
//! | Action | POST | `/action` | `{"direction": "UP"}` | snapshot document |
//! | State | GET | `/state` | none | snapshot document |
//!
//! Failed requests answer with a non-2xx status and `{"error": "..."}`.
//!
//! # Error Kinds
//!
//! - **Connection**: the server could not be reached at all
//! - **Timeout**: no complete answer within the configured timeout
//! - **Server**: non-2xx status or malformed HTTP
//! - **Parse**: the body is not a snapshot document
//!
//! # Environment Variables
//!
//! See [`config`] for `SNAKE_SERVER_URL`, `SNAKE_TIMEOUT_MS`, `SNAKE_TICK_MS`
//! and `SNAKE_CLIENT_LOG_PATH`.
//!
//! # Example Exchange
//!
//! ```text
//! POST /action HTTP/1.1
//! Host: localhost:5000
//! Content-Type: application/json
//! Content-Length: 18
//!
//! {"direction":"UP"}
//!
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {"snake": [[10, 6], [10, 7], [9, 7]], "food": [3, 3], "score": 0, "game_over": false, "width": 20, "height": 15}
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;

pub use snake_client_core as core;
pub use snake_client_types as types;

pub use client::TransportClient;
pub use config::{ClientConfig, Endpoint, EndpointError};
pub use error::{TransportError, TransportErrorKind};
