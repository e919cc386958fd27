//! Sync module - request/response synchronization with the game server
//!
//! The [`SyncController`] owns the client session and turns user intent and
//! wall-clock time into server requests:
//!
//! 1. **Connect**: a health check; success moves to Ready and starts a game
//! 2. **Play**: every update interval the pending direction is submitted
//! 3. **Reconcile**: each returned snapshot replaces the rendered state
//! 4. **Restart**: an explicit trigger starts a new game from Over
//!
//! At most one request is in flight at a time. The presentation layer is
//! injected as a [`Presentation`] implementation and the server as a
//! [`SnakeServer`] (normally a [`TransportClient`](crate::transport::TransportClient)).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use snake_client_sync::{Presentation, SyncController};
//! use snake_client_sync::core::Snapshot;
//! use snake_client_sync::transport::{ClientConfig, TransportClient};
//! use snake_client_sync::types::ControlEvent;
//!
//! struct Log;
//!
//! impl Presentation for Log {
//!     fn on_snapshot(&mut self, s: Arc<Snapshot>) {
//!         println!("score {}", s.score);
//!     }
//!     fn on_status(&mut self, message: &str) {
//!         println!("{message}");
//!     }
//!     fn on_game_over(&mut self) {
//!         println!("game over");
//!     }
//! }
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env();
//! let client = TransportClient::from_config(&config)?;
//! let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
//! let controller = SyncController::new(client, Log, config.tick_interval);
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(10)).await;
//!     let _ = tx.send(ControlEvent::Quit);
//! });
//! controller.run(rx).await;
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod presentation;
pub mod server;

pub use snake_client_core as core;
pub use snake_client_transport as transport;
pub use snake_client_types as types;

pub use controller::{Completion, Outcome, SyncController};
pub use presentation::Presentation;
pub use server::SnakeServer;
