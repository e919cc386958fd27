//! The controller's view of the game server.

use std::future::Future;

use crate::core::Snapshot;
use crate::transport::{TransportClient, TransportError};
use crate::types::Direction;

/// Request operations the controller dispatches.
///
/// Implementations are cloned into one spawned task per request, so the
/// returned futures must be `Send`.
pub trait SnakeServer: Clone + Send + Sync + 'static {
    fn check_health(&self) -> impl Future<Output = bool> + Send;

    fn start_game(&self) -> impl Future<Output = Result<Snapshot, TransportError>> + Send;

    fn submit_action(
        &self,
        direction: Direction,
    ) -> impl Future<Output = Result<Snapshot, TransportError>> + Send;
}

impl SnakeServer for TransportClient {
    fn check_health(&self) -> impl Future<Output = bool> + Send {
        TransportClient::check_health(self)
    }

    fn start_game(&self) -> impl Future<Output = Result<Snapshot, TransportError>> + Send {
        TransportClient::start_game(self)
    }

    fn submit_action(
        &self,
        direction: Direction,
    ) -> impl Future<Output = Result<Snapshot, TransportError>> + Send {
        TransportClient::submit_action(self, direction)
    }
}
