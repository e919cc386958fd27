//! TerminalRenderer: flushes a canvas to a real terminal.
//!
//! Rows that did not change since the previous frame are skipped.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Tone};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Canvas>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                encode_changed_rows_into(prev, canvas, &mut self.buf)?;
            }
            _ => encode_full_into(canvas, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(canvas.clone());
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut tone = None;
    for y in 0..canvas.height() {
        encode_row_into(canvas, y, &mut tone, out)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only rows that differ from `prev`. Both canvases must share a size.
pub fn encode_changed_rows_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut tone = None;
    for y in 0..next.height() {
        if prev.row(y) != next.row(y) {
            encode_row_into(next, y, &mut tone, out)?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn encode_row_into(
    canvas: &Canvas,
    y: u16,
    current: &mut Option<Tone>,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(cursor::MoveTo(0, y))?;
    for glyph in canvas.row(y) {
        if *current != Some(glyph.tone) {
            apply_tone_into(out, glyph.tone)?;
            *current = Some(glyph.tone);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn apply_tone_into(out: &mut Vec<u8>, tone: Tone) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(tone_color(tone)))?;
    if matches!(tone, Tone::Head | Tone::Banner) {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Plain | Tone::Field => Color::Reset,
        Tone::Border => Color::Grey,
        Tone::Head => Color::Green,
        Tone::Body => Color::DarkGreen,
        Tone::Food => Color::Red,
        Tone::Banner => Color::Yellow,
        Tone::Status => Color::Cyan,
    }
}
