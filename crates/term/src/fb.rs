//! Glyph grid the game view paints into and the renderer diffs.

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Weight of a glyph. Bold and dim never combine on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub emphasis: Emphasis,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            emphasis: Emphasis::Normal,
        }
    }

    pub const fn bold(self) -> Self {
        Self {
            emphasis: Emphasis::Bold,
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Self {
            emphasis: Emphasis::Dim,
            ..self
        }
    }

    pub const fn glyph(self, ch: char) -> Glyph {
        Glyph { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb(220, 220, 220), Rgb(0, 0, 0))
    }
}

/// One styled terminal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Glyph {
    fn default() -> Self {
        CellStyle::default().glyph(' ')
    }
}

/// Row-major grid of glyphs sized to the terminal.
///
/// Writes outside the grid are dropped, so callers can paint clipped
/// shapes without bounds checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut fb = Self::default();
        fb.reset(width, height, Glyph::default());
        fb
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize to `width` x `height` and fill every position with `fill`.
    pub fn reset(&mut self, width: u16, height: u16, fill: Glyph) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs.resize(width as usize * height as usize, fill);
    }

    /// Glyphs of row `y`; empty when `y` is past the last row.
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.glyphs[start..start + self.width as usize]
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y).get(x as usize).copied()
    }

    pub fn paint(&mut self, x: u16, y: u16, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[y as usize * self.width as usize + x as usize] = glyph;
        }
    }

    /// Write `s` starting at column `x`. Returns the column after the last
    /// character, which may lie past the right edge.
    pub fn text(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut col = x;
        for ch in s.chars() {
            self.paint(col, y, style.glyph(ch));
            col = col.saturating_add(1);
        }
        col
    }

    /// Fill a `w` x `h` block whose top-left corner is (x, y).
    pub fn block(&mut self, x: u16, y: u16, w: u16, h: u16, glyph: Glyph) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.paint(col, row, glyph);
            }
        }
    }

    /// Characters of row `y` as a string.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_clips_and_reports_end_column() {
        let mut fb = FrameBuffer::new(4, 1);
        let end = fb.text(2, 0, "SCORE", CellStyle::default());
        assert_eq!(fb.row_text(0), "  SC");
        assert_eq!(end, 7);
    }

    #[test]
    fn reset_refills_every_glyph() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.paint(0, 0, CellStyle::default().glyph('x'));
        let dot = CellStyle::default().dim().glyph('.');
        fb.reset(3, 3, dot);
        assert_eq!(fb.row(2).len(), 3);
        assert_eq!(fb.get(0, 0), Some(dot));
        assert!(fb.row(3).is_empty());
        assert_eq!(fb.get(3, 0), None);
    }

    #[test]
    fn block_ignores_out_of_range_part() {
        let mut fb = FrameBuffer::new(3, 2);
        let g = CellStyle::default().bold().glyph('#');
        fb.block(1, 1, 5, 5, g);
        assert_eq!(fb.row_text(0), "   ");
        assert_eq!(fb.row_text(1), " ##");
    }
}
