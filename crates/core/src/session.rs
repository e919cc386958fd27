//! Client session state.
//!
//! `ClientSession` is the single mutable record behind the sync controller:
//! phase, steering, the in-flight guard, the tick accumulator and the latest
//! rendered snapshot. It performs no I/O; the controller decides when to call
//! into it and what to tell the presentation layer.

use std::sync::Arc;
use std::time::Duration;

use crate::snapshot::Snapshot;
use crate::types::{Direction, Phase};

#[derive(Debug, Clone, Default)]
pub struct ClientSession {
    phase: Phase,
    /// Last direction acknowledged by the server.
    current_direction: Direction,
    /// Latest accepted input since the last submission.
    pending_direction: Direction,
    in_flight: bool,
    elapsed_since_last_tick: Duration,
    /// Bumped by `abandon`; requests tagged with an older value are stale.
    generation: u64,
    snapshot: Option<Arc<Snapshot>>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elapsed_since_last_tick(&self) -> Duration {
        self.elapsed_since_last_tick
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    /// Accept `dir` as the next direction to submit.
    ///
    /// Reversals are checked against the acknowledged direction, not the
    /// pending one, so several quick inputs between ticks cannot chain into
    /// a U-turn.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir.is_reverse_of(self.current_direction) {
            return false;
        }
        self.pending_direction = dir;
        true
    }

    /// Advance the tick accumulator. Returns true when an action is due.
    ///
    /// Time only accumulates while playing with nothing in flight.
    pub fn advance(&mut self, elapsed: Duration, interval: Duration) -> bool {
        if self.phase != Phase::Playing || self.in_flight {
            return false;
        }
        self.elapsed_since_last_tick += elapsed;
        if self.elapsed_since_last_tick >= interval {
            self.elapsed_since_last_tick = Duration::ZERO;
            return true;
        }
        false
    }

    /// Claim the in-flight slot. Returns the generation to tag the request
    /// with, or `None` if a request is already outstanding.
    pub fn begin_request(&mut self) -> Option<u64> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(self.generation)
    }

    /// Release the in-flight slot for a request tagged `generation`.
    ///
    /// Returns false for a stale request; its result must be discarded.
    pub fn finish_request(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn mark_ready(&mut self) {
        self.phase = Phase::Ready;
    }

    /// Enter a fresh game from a start snapshot.
    pub fn start(&mut self, snapshot: Arc<Snapshot>) {
        self.current_direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.elapsed_since_last_tick = Duration::ZERO;
        self.phase = if snapshot.game_over {
            Phase::Over
        } else {
            Phase::Playing
        };
        self.snapshot = Some(snapshot);
    }

    /// Record the server's answer to an action carrying `submitted`.
    pub fn acknowledge(&mut self, submitted: Direction, snapshot: Arc<Snapshot>) {
        self.current_direction = submitted;
        // An input accepted while the request was out may now be a reversal.
        if self.pending_direction.is_reverse_of(submitted) {
            self.pending_direction = submitted;
        }
        if snapshot.game_over {
            self.phase = Phase::Over;
        }
        self.snapshot = Some(snapshot);
    }

    /// Drop the session: outstanding requests become stale and the phase
    /// returns to Disconnected. The last snapshot stays for display.
    pub fn abandon(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = false;
        self.elapsed_since_last_tick = Duration::ZERO;
        self.phase = Phase::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    const INTERVAL: Duration = Duration::from_millis(150);

    fn snap(game_over: bool) -> Arc<Snapshot> {
        Arc::new(Snapshot {
            snake: vec![Point::new(5, 5)],
            food: Some(Point::new(3, 3)),
            score: 0,
            game_over,
            width: 20,
            height: 15,
        })
    }

    fn playing() -> ClientSession {
        let mut s = ClientSession::new();
        s.mark_ready();
        s.start(snap(false));
        s
    }

    #[test]
    fn test_new_session() {
        let s = ClientSession::new();
        assert_eq!(s.phase(), Phase::Disconnected);
        assert_eq!(s.current_direction(), Direction::Right);
        assert_eq!(s.pending_direction(), Direction::Right);
        assert!(!s.in_flight());
        assert!(s.snapshot().is_none());
    }

    #[test]
    fn test_reversal_guard() {
        let mut s = playing();
        assert!(!s.steer(Direction::Left));
        assert_eq!(s.pending_direction(), Direction::Right);

        assert!(s.steer(Direction::Up));
        assert_eq!(s.pending_direction(), Direction::Up);
        assert!(s.steer(Direction::Down));
        assert_eq!(s.pending_direction(), Direction::Down);
    }

    #[test]
    fn test_rapid_inputs_cannot_bypass_guard() {
        let mut s = playing();
        // Up is fine, but Left is still a reversal of the acknowledged Right.
        assert!(s.steer(Direction::Up));
        assert!(!s.steer(Direction::Left));
        assert_eq!(s.pending_direction(), Direction::Up);
    }

    #[test]
    fn test_advance_cadence() {
        let mut s = playing();
        assert!(!s.advance(Duration::from_millis(100), INTERVAL));
        assert!(s.advance(Duration::from_millis(60), INTERVAL));
        assert_eq!(s.elapsed_since_last_tick(), Duration::ZERO);
        assert!(!s.advance(Duration::from_millis(16), INTERVAL));
    }

    #[test]
    fn test_advance_paused_outside_playing_or_in_flight() {
        let mut s = ClientSession::new();
        assert!(!s.advance(Duration::from_secs(1), INTERVAL));
        assert_eq!(s.elapsed_since_last_tick(), Duration::ZERO);

        let mut s = playing();
        s.begin_request();
        assert!(!s.advance(Duration::from_secs(1), INTERVAL));
        assert_eq!(s.elapsed_since_last_tick(), Duration::ZERO);
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut s = playing();
        let tag = s.begin_request().unwrap();
        assert!(s.begin_request().is_none());
        assert!(s.finish_request(tag));
        assert!(s.begin_request().is_some());
    }

    #[test]
    fn test_abandon_makes_requests_stale() {
        let mut s = playing();
        let tag = s.begin_request().unwrap();
        s.abandon();
        assert_eq!(s.phase(), Phase::Disconnected);
        assert!(!s.in_flight());
        assert!(!s.finish_request(tag));

        let next = s.begin_request().unwrap();
        assert_ne!(next, tag);
        assert!(s.finish_request(next));
    }

    #[test]
    fn test_acknowledge_and_game_over() {
        let mut s = playing();
        assert!(s.steer(Direction::Up));
        s.acknowledge(Direction::Up, snap(false));
        assert_eq!(s.current_direction(), Direction::Up);
        assert_eq!(s.phase(), Phase::Playing);

        s.acknowledge(Direction::Up, snap(true));
        assert_eq!(s.phase(), Phase::Over);
        assert!(!s.advance(Duration::from_secs(1), INTERVAL));
    }

    #[test]
    fn test_acknowledge_drops_pending_reversal() {
        let mut s = playing();
        assert!(s.steer(Direction::Up));
        // Accepted against Right while Up is still unacknowledged.
        assert!(s.steer(Direction::Down));
        s.acknowledge(Direction::Up, snap(false));
        assert_eq!(s.pending_direction(), Direction::Up);
    }

    #[test]
    fn test_start_resets_direction() {
        let mut s = playing();
        s.steer(Direction::Up);
        s.acknowledge(Direction::Up, snap(true));
        assert_eq!(s.phase(), Phase::Over);

        s.start(snap(false));
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.current_direction(), Direction::Right);
        assert_eq!(s.pending_direction(), Direction::Right);
    }
}
