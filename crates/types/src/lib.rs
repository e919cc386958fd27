//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the client.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (snapshot decoding, transport, terminal rendering).
//!
//! # Client Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame timer driving the controller loop (~60 FPS) |
//! | `UPDATE_INTERVAL_MS` | 150 | Cadence of action submissions while playing |
//! | `REQUEST_TIMEOUT_MS` | 5000 | Per-request network timeout |
//!
//! # Examples
//!
//! ```
//! use snake_client_types::{Direction, Phase};
//!
//! // Parse from string (case-insensitive)
//! let dir = Direction::from_str("up").unwrap();
//! assert_eq!(dir, Direction::Up);
//! assert_eq!(dir.as_str(), "UP");
//!
//! // A snake can never turn straight back on itself
//! assert!(Direction::Right.is_reverse_of(Direction::Left));
//!
//! assert_eq!(Phase::default(), Phase::Disconnected);
//! ```

/// Default base address of the game server.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Frame timer interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Interval between action submissions while playing (150ms)
pub const UPDATE_INTERVAL_MS: u32 = 150;

/// Per-request timeout (5 seconds)
pub const REQUEST_TIMEOUT_MS: u32 = 5000;

/// Heading of the snake.
///
/// The wire format spells directions in upper case (`"UP"`, `"DOWN"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use snake_client_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("down"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Some(Direction::Up),
            "DOWN" => Some(Direction::Down),
            "LEFT" => Some(Direction::Left),
            "RIGHT" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_reverse_of(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board coordinate. Negative components are representable; the server is
/// responsible for keeping coordinates on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Coarse client-side game state.
///
/// The cycle goes: Disconnected → Ready → Playing → Over → (restart) Playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No successful health check yet (or the server went away).
    #[default]
    Disconnected,
    /// Server is reachable; no game started.
    Ready,
    /// A game is running and actions are being submitted.
    Playing,
    /// The latest snapshot reported game over.
    Over,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Disconnected => "disconnected",
            Phase::Ready => "ready",
            Phase::Playing => "playing",
            Phase::Over => "over",
        }
    }
}

/// User intent delivered to the sync controller.
///
/// These events come from key input (or any other front end); the controller
/// decides whether they apply in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Request a heading change (subject to the reversal guard)
    Steer(Direction),
    /// Start a new game (or reconnect when disconnected)
    Restart,
    /// Leave the client
    Quit,
    /// The terminal changed size; redraw everything
    Resize,
}
