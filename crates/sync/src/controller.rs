//! SyncController: drives the client session from server snapshots.
//!
//! ```text
//! Disconnected --health ok--> Ready --start ok--> Playing --game_over--> Over
//!      ^                                            |  ^                  |
//!      +------------- connection error -------------+  +---- restart -----+
//! ```
//!
//! Each request runs in its own spawned task and reports back over a channel
//! as a [`Completion`] tagged with the session generation at dispatch. The
//! controller applies completions on its own task, so the session needs no
//! locking; completions from an abandoned generation are dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::{ClientSession, Snapshot};
use crate::presentation::Presentation;
use crate::server::SnakeServer;
use crate::transport::{TransportError, TransportErrorKind};
use crate::types::{ControlEvent, Direction, Phase, FRAME_MS};

/// Result of one dispatched request.
#[derive(Debug)]
pub enum Outcome {
    Health(bool),
    Started(Result<Snapshot, TransportError>),
    Acted {
        direction: Direction,
        result: Result<Snapshot, TransportError>,
    },
    /// The request task died before producing a result.
    Lost(TransportError),
}

#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub outcome: Outcome,
}

pub struct SyncController<S, P> {
    server: S,
    presentation: P,
    session: ClientSession,
    tick_interval: Duration,
    frame_interval: Duration,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    dispatched: u64,
}

enum Step {
    Frame,
    Event(Option<ControlEvent>),
    Completion(Completion),
}

impl<S: SnakeServer, P: Presentation> SyncController<S, P> {
    pub fn new(server: S, presentation: P, tick_interval: Duration) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            server,
            presentation,
            session: ClientSession::new(),
            tick_interval,
            frame_interval: Duration::from_millis(FRAME_MS as u64),
            completion_tx,
            completion_rx,
            dispatched: 0,
        }
    }

    /// Timer granularity of [`run`](Self::run).
    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    /// Total requests handed to the server so far.
    pub fn requests_dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Probe the server. On success the controller moves to Ready and
    /// immediately starts a game.
    pub fn connect(&mut self) -> bool {
        if self.session.phase() != Phase::Disconnected {
            return false;
        }
        let Some(generation) = self.session.begin_request() else {
            debug!("connect ignored: request in flight");
            return false;
        };

        info!("checking server health");
        self.presentation.on_status("Connecting to server...");
        let server = self.server.clone();
        self.dispatch(generation, async move {
            Outcome::Health(server.check_health().await)
        });
        true
    }

    /// Route a direction input through the reversal guard.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.session.phase() != Phase::Playing {
            return false;
        }
        let accepted = self.session.steer(direction);
        if !accepted {
            debug!(
                %direction,
                current = %self.session.current_direction(),
                "reversal rejected"
            );
        }
        accepted
    }

    /// Start a fresh game; reconnects first when disconnected.
    pub fn restart(&mut self) -> bool {
        match self.session.phase() {
            Phase::Disconnected => self.connect(),
            Phase::Ready | Phase::Playing | Phase::Over => self.start_game(),
        }
    }

    /// Feed elapsed wall-clock time. Submits the pending direction when the
    /// update interval has passed and nothing is in flight.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.session.advance(elapsed, self.tick_interval) {
            return false;
        }
        let Some(generation) = self.session.begin_request() else {
            return false;
        };

        let direction = self.session.pending_direction();
        debug!(%direction, "submitting action");
        let server = self.server.clone();
        self.dispatch(generation, async move {
            let result = server.submit_action(direction).await;
            Outcome::Acted { direction, result }
        });
        true
    }

    /// Tear down the current session; in-flight results will be discarded.
    pub fn abandon(&mut self) {
        self.session.abandon();
        info!(generation = self.session.generation(), "session abandoned");
    }

    /// Apply one request result to the session.
    pub fn handle_completion(&mut self, completion: Completion) {
        if !self.session.finish_request(completion.generation) {
            debug!(
                generation = completion.generation,
                current = self.session.generation(),
                "discarding stale completion"
            );
            return;
        }

        match completion.outcome {
            Outcome::Health(true) => {
                info!("server online");
                self.session.mark_ready();
                self.presentation.on_status("");
                self.start_game();
            }
            Outcome::Health(false) => {
                warn!("server offline");
                self.presentation
                    .on_status("Server offline! Start the game server, then press R to retry.");
            }
            Outcome::Started(Ok(snapshot)) => {
                let snapshot = Arc::new(snapshot);
                self.session.start(Arc::clone(&snapshot));
                info!(
                    width = snapshot.width,
                    height = snapshot.height,
                    "game started"
                );
                self.presentation.on_status("");
                self.presentation.on_snapshot(snapshot);
                self.notify_if_over();
            }
            Outcome::Started(Err(e)) => self.report("start game", e),
            Outcome::Acted {
                direction,
                result: Ok(snapshot),
            } => {
                let snapshot = Arc::new(snapshot);
                self.session.acknowledge(direction, Arc::clone(&snapshot));
                self.presentation.on_snapshot(snapshot);
                self.notify_if_over();
            }
            Outcome::Acted { result: Err(e), .. } => self.report("submit action", e),
            Outcome::Lost(e) => self.report("request", e),
        }
    }

    /// Wait for the next request to resolve and apply it.
    pub async fn resolve_next(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.handle_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Drive the controller until `Quit` or until the event channel closes.
    ///
    /// Returns the presentation layer so the caller can tear it down.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ControlEvent>) -> P {
        self.connect();

        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            let step = tokio::select! {
                _ = frames.tick() => Step::Frame,
                event = events.recv() => Step::Event(event),
                Some(completion) = self.completion_rx.recv() => Step::Completion(completion),
            };

            match step {
                Step::Frame => {
                    let now = Instant::now();
                    self.tick(now - last_frame);
                    last_frame = now;
                }
                Step::Event(Some(ControlEvent::Steer(direction))) => {
                    self.steer(direction);
                }
                Step::Event(Some(ControlEvent::Restart)) => {
                    self.restart();
                }
                Step::Event(Some(ControlEvent::Resize)) => self.presentation.on_resize(),
                Step::Event(Some(ControlEvent::Quit)) | Step::Event(None) => break,
                Step::Completion(completion) => self.handle_completion(completion),
            }
        }

        self.abandon();
        self.presentation
    }

    fn start_game(&mut self) -> bool {
        let Some(generation) = self.session.begin_request() else {
            debug!("start ignored: request in flight");
            return false;
        };

        info!("starting game");
        let server = self.server.clone();
        self.dispatch(generation, async move {
            Outcome::Started(server.start_game().await)
        });
        true
    }

    fn dispatch<F>(&mut self, generation: u64, request: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        self.dispatched += 1;
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            // The request runs on its own task so a panic still releases
            // the in-flight slot.
            let outcome = match tokio::spawn(request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(generation, error = %e, "request task failed");
                    Outcome::Lost(TransportError::Server {
                        status: None,
                        message: format!("request task failed: {e}"),
                    })
                }
            };
            // A closed channel means the controller is gone.
            let _ = tx.send(Completion {
                generation,
                outcome,
            });
        });
    }

    fn notify_if_over(&mut self) {
        if self.session.phase() == Phase::Over {
            let score = self.session.snapshot().map(|s| s.score).unwrap_or(0);
            info!(score, "game over");
            self.presentation.on_game_over();
        }
    }

    fn report(&mut self, during: &str, err: TransportError) {
        let message = match err.kind() {
            TransportErrorKind::Connection => {
                warn!(error = %err, "{during} failed: server unreachable");
                self.session.abandon();
                format!(
                    "Connection error: {err}\nIs the game server running and SNAKE_SERVER_URL correct? Press R to reconnect."
                )
            }
            TransportErrorKind::Timeout => {
                warn!(error = %err, "{during} timed out");
                format!("Server is slow to respond: {err}")
            }
            TransportErrorKind::Server => {
                warn!(error = %err, "{during} rejected by server");
                format!("Server error: {err}")
            }
            TransportErrorKind::Parse => {
                warn!(error = %err, "{during} returned an undecodable snapshot");
                format!("Protocol mismatch: {err}")
            }
        };
        self.presentation.on_status(&message);
    }
}
