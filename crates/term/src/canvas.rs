//! Canvas: a grid of toned glyphs that a view draws into and a renderer
//! flushes to the terminal.

/// Semantic color class of a glyph; the renderer picks the actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Border,
    Field,
    Head,
    Body,
    Food,
    Banner,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub tone: Tone,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            tone: Tone::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    /// Out-of-range writes are clipped.
    pub fn put(&mut self, x: u16, y: u16, ch: char, tone: Tone) {
        if let Some(i) = self.idx(x, y) {
            self.glyphs[i] = Glyph { ch, tone };
        }
    }

    pub fn text(&mut self, x: u16, y: u16, s: &str, tone: Tone) {
        for (i, ch) in s.chars().enumerate() {
            let Ok(dx) = u16::try_from(i) else { break };
            self.put(x.saturating_add(dx), y, ch, tone);
        }
    }

    pub fn row(&self, y: u16) -> &[Glyph] {
        match self.idx(0, y) {
            Some(start) => &self.glyphs[start..start + self.width as usize],
            None => &[],
        }
    }

    /// Characters of one row, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_clip() {
        let mut c = Canvas::new(4, 2);
        c.put(1, 1, 'x', Tone::Food);
        c.put(9, 9, 'y', Tone::Food);
        assert_eq!(c.get(1, 1), Some(Glyph { ch: 'x', tone: Tone::Food }));
        assert_eq!(c.get(4, 0), None);
        assert_eq!(c.row_text(1), " x  ");
    }

    #[test]
    fn test_text_clips_at_edge() {
        let mut c = Canvas::new(5, 1);
        c.text(2, 0, "hello", Tone::Status);
        assert_eq!(c.row_text(0), "  hel");
        assert!(c.row(3).is_empty());
    }
}
