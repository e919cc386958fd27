//! Terminal snake client (default binary).
//!
//! Keyboard input is read on a dedicated thread and forwarded as control
//! events; the sync controller runs on a tokio runtime and redraws the
//! terminal through [`TerminalPresentation`] whenever something changes.

use std::fs::OpenOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use snake_client::core::Snapshot;
use snake_client::input::map_key;
use snake_client::sync::{Presentation, SyncController};
use snake_client::term::{BoardView, TerminalRenderer, ViewState, Viewport};
use snake_client::transport::{ClientConfig, TransportClient};
use snake_client::types::ControlEvent;

const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    init_tracing(config.log_path.as_deref())?;

    let client = TransportClient::from_config(&config)?;
    info!(server = %client.endpoint(), "snake client starting");

    let runtime = tokio::runtime::Runtime::new()?;

    let mut presentation = TerminalPresentation::new();
    presentation.renderer.enter()?;

    let (tx, rx) = mpsc::unbounded_channel();
    let stop = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(tx, Arc::clone(&stop));

    let controller = SyncController::new(client, presentation, config.tick_interval);
    let mut presentation = runtime.block_on(controller.run(rx));

    stop.store(true, Ordering::Relaxed);
    let _ = input.join();

    // Always try to restore terminal state.
    presentation.renderer.exit()?;
    info!("snake client stopped");
    Ok(())
}

/// Logs go to a file only; stdout belongs to the game screen.
fn init_tracing(log_path: Option<&str>) -> Result<()> {
    let Some(path) = log_path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn spawn_input_thread(
    tx: mpsc::UnboundedSender<ControlEvent>,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!(error = %e, "input poll failed");
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    let Some(control) = map_key(key) else {
                        continue;
                    };
                    // Dropping the sender on quit closes the controller's loop too.
                    if tx.send(control).is_err() || control == ControlEvent::Quit {
                        break;
                    }
                }
                Ok(Event::Resize(..)) => {
                    if tx.send(ControlEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "input read failed");
                    break;
                }
            }
        }
    })
}

/// Redraws the whole screen on every controller callback.
struct TerminalPresentation {
    renderer: TerminalRenderer,
    view: BoardView,
    snapshot: Option<Arc<Snapshot>>,
    status: String,
    game_over: bool,
}

impl TerminalPresentation {
    fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: BoardView::default(),
            snapshot: None,
            status: String::new(),
            game_over: false,
        }
    }

    fn redraw(&mut self) {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let canvas = self.view.render(
            ViewState {
                snapshot: self.snapshot.as_deref(),
                status: &self.status,
                game_over: self.game_over,
            },
            Viewport::new(w, h),
        );
        if let Err(e) = self.renderer.draw(&canvas) {
            warn!(error = %e, "draw failed");
        }
    }
}

impl Presentation for TerminalPresentation {
    fn on_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        self.game_over = snapshot.game_over;
        self.snapshot = Some(snapshot);
        self.redraw();
    }

    fn on_status(&mut self, message: &str) {
        message.clone_into(&mut self.status);
        self.redraw();
    }

    fn on_game_over(&mut self) {
        self.game_over = true;
        self.redraw();
    }

    fn on_resize(&mut self) {
        self.renderer.invalidate();
        self.redraw();
    }
}
