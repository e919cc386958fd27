//! BoardView: lays out a snapshot, the status line and the game-over banner
//! on a [`Canvas`].
//!
//! Pure; no terminal I/O happens here.

use crate::canvas::{Canvas, Tone};
use crate::core::Snapshot;
use crate::types::Point;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the view needs for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState<'a> {
    pub snapshot: Option<&'a Snapshot>,
    pub status: &'a str,
    pub game_over: bool,
}

pub const GAME_OVER_BANNER: &str = " GAME OVER - press R to restart ";
pub const HELP_LINE: &str = "arrows/WASD steer  R restart  Q quit";

pub struct BoardView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn render(&self, state: ViewState<'_>, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(state, &mut canvas);
        canvas
    }

    pub fn render_into(&self, state: ViewState<'_>, canvas: &mut Canvas) {
        let Some(snap) = state.snapshot else {
            // Nothing to draw yet: status and help only.
            let mut y = 0;
            for line in state.status.lines() {
                canvas.text(0, y, line, Tone::Status);
                y += 1;
            }
            canvas.text(0, y + 1, HELP_LINE, Tone::Plain);
            return;
        };

        let board_w = clamp_u16(snap.width).saturating_mul(self.cell_w);
        let board_h = clamp_u16(snap.height);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);
        let start_x = canvas.width().saturating_sub(frame_w) / 2;
        // Row 0 holds the score line.
        let start_y = 1;

        canvas.text(
            start_x,
            0,
            &format!("SCORE {}  LENGTH {}", snap.score, snap.snake_len()),
            Tone::Plain,
        );

        self.draw_frame(canvas, start_x, start_y, frame_w, frame_h);

        if let Some(food) = snap.food {
            if let Some((x, y)) = self.cell_origin(snap, food, start_x, start_y) {
                self.fill_cell(canvas, x, y, '●', Tone::Food);
            }
        }
        // Tail first so the head wins on overlap.
        for (i, seg) in snap.snake.iter().enumerate().rev() {
            let Some((x, y)) = self.cell_origin(snap, *seg, start_x, start_y) else {
                continue;
            };
            if i == 0 {
                self.fill_cell(canvas, x, y, '█', Tone::Head);
            } else {
                self.fill_cell(canvas, x, y, '▓', Tone::Body);
            }
        }

        let mut y = start_y.saturating_add(frame_h);
        if state.game_over {
            let bx = canvas.width().saturating_sub(GAME_OVER_BANNER.len() as u16) / 2;
            canvas.text(bx, y, GAME_OVER_BANNER, Tone::Banner);
            y = y.saturating_add(1);
        }
        for line in state.status.lines() {
            canvas.text(start_x, y, line, Tone::Status);
            y = y.saturating_add(1);
        }
        canvas.text(start_x, y.saturating_add(1), HELP_LINE, Tone::Plain);
    }

    fn draw_frame(&self, canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        // Interior offsets past the canvas edge would all be clipped.
        let inner_w = (w - 1).min(canvas.width().saturating_sub(x));
        let inner_h = (h - 1).min(canvas.height().saturating_sub(y));

        canvas.put(x, y, '┌', Tone::Border);
        canvas.put(right, y, '┐', Tone::Border);
        canvas.put(x, bottom, '└', Tone::Border);
        canvas.put(right, bottom, '┘', Tone::Border);
        for dx in 1..inner_w {
            canvas.put(x + dx, y, '─', Tone::Border);
            canvas.put(x + dx, bottom, '─', Tone::Border);
        }
        for dy in 1..inner_h {
            canvas.put(x, y + dy, '│', Tone::Border);
            canvas.put(right, y + dy, '│', Tone::Border);
            for dx in 1..inner_w {
                canvas.put(x + dx, y + dy, ' ', Tone::Field);
            }
        }
    }

    /// Screen position of a board cell. The board's y axis points up, so
    /// row 0 on screen is `height - 1` on the board.
    fn cell_origin(&self, snap: &Snapshot, p: Point, start_x: u16, start_y: u16) -> Option<(u16, u16)> {
        if !snap.in_bounds(p) {
            return None;
        }
        let col = u16::try_from(p.x).ok()?.checked_mul(self.cell_w)?;
        let row = u16::try_from(snap.height as i64 - 1 - p.y as i64).ok()?;
        Some((
            start_x.checked_add(1)?.checked_add(col)?,
            start_y.checked_add(1)?.checked_add(row)?,
        ))
    }

    fn fill_cell(&self, canvas: &mut Canvas, x: u16, y: u16, ch: char, tone: Tone) {
        for dx in 0..self.cell_w {
            canvas.put(x.saturating_add(dx), y, ch, tone);
        }
    }
}

fn clamp_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap() -> Snapshot {
        Snapshot {
            snake: vec![Point::new(1, 0), Point::new(0, 0)],
            food: Some(Point::new(2, 2)),
            score: 7,
            game_over: false,
            width: 3,
            height: 3,
        }
    }

    fn find_row(canvas: &Canvas, needle: &str) -> Option<u16> {
        (0..canvas.height()).find(|&y| canvas.row_text(y).contains(needle))
    }

    #[test]
    fn test_score_line_and_frame() {
        let s = snap();
        let view = BoardView::default();
        let c = view.render(
            ViewState {
                snapshot: Some(&s),
                ..ViewState::default()
            },
            Viewport::new(8, 10),
        );

        assert!(c.row_text(0).starts_with("SCORE 7"));
        assert_eq!(c.row_text(1), "┌──────┐");
        assert_eq!(c.row_text(5), "└──────┘");
    }

    #[test]
    fn test_y_axis_points_up() {
        let s = snap();
        let c = BoardView::default().render(
            ViewState {
                snapshot: Some(&s),
                ..ViewState::default()
            },
            Viewport::new(8, 10),
        );

        // Board y=2 (food) is the top field row, y=0 (snake) the bottom.
        assert_eq!(c.row_text(2), "│    ●●│");
        assert_eq!(c.row_text(4), "│▓▓██  │");
        assert_eq!(c.get(3, 4).map(|g| g.tone), Some(Tone::Head));
        assert_eq!(c.get(1, 4).map(|g| g.tone), Some(Tone::Body));
    }

    #[test]
    fn test_out_of_bounds_segments_skipped() {
        let mut s = snap();
        s.snake.push(Point::new(-1, 0));
        s.food = Some(Point::new(9, 9));
        let c = BoardView::default().render(
            ViewState {
                snapshot: Some(&s),
                ..ViewState::default()
            },
            Viewport::new(8, 10),
        );
        assert_eq!(c.row_text(2), "│      │");
    }

    #[test]
    fn test_banner_and_status() {
        let s = snap();
        let c = BoardView::default().render(
            ViewState {
                snapshot: Some(&s),
                status: "Server error: boom\nsecond line",
                game_over: true,
            },
            Viewport::new(40, 12),
        );

        let banner = find_row(&c, "GAME OVER").expect("banner drawn");
        let status = find_row(&c, "Server error: boom").expect("status drawn");
        assert!(status > banner);
        assert_eq!(find_row(&c, "second line"), Some(status + 1));
    }

    #[test]
    fn test_huge_board_is_clipped_to_viewport() {
        let s = Snapshot {
            snake: vec![Point::new(0, 29_999)],
            food: Some(Point::new(29_999, 0)),
            score: 1,
            game_over: false,
            width: 30_000,
            height: 30_000,
        };
        let started = std::time::Instant::now();
        let c = BoardView::default().render(
            ViewState {
                snapshot: Some(&s),
                ..ViewState::default()
            },
            Viewport::new(80, 24),
        );
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        // Board wider than the screen: frame starts at column 0, top-left
        // cell is the snake head.
        assert_eq!(c.get(0, 1).map(|g| g.ch), Some('┌'));
        assert_eq!(c.get(1, 2).map(|g| g.tone), Some(Tone::Head));
        assert_eq!(c.get(79, 23).map(|g| g.tone), Some(Tone::Field));
    }

    #[test]
    fn test_no_snapshot_shows_status() {
        let c = BoardView::default().render(
            ViewState {
                snapshot: None,
                status: "Connecting to server...",
                game_over: false,
            },
            Viewport::new(40, 4),
        );
        assert!(c.row_text(0).starts_with("Connecting to server..."));
        assert!(find_row(&c, "Q quit").is_some());
    }
}
