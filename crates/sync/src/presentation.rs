use std::sync::Arc;

use crate::core::Snapshot;

/// Presentation layer contract.
///
/// Called synchronously from the controller's own task, never from a
/// background thread.
pub trait Presentation {
    /// A new snapshot replaced the rendered state.
    fn on_snapshot(&mut self, snapshot: Arc<Snapshot>);

    /// Status line for the user. An empty message clears it.
    fn on_status(&mut self, message: &str);

    /// The latest snapshot reported game over.
    fn on_game_over(&mut self);

    /// The output surface changed; redraw from scratch.
    fn on_resize(&mut self) {}
}
