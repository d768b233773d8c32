//! TerminalRenderer: puts game snapshots on a real terminal.
//!
//! Each [`TerminalRenderer::draw`] paints the snapshot into a back buffer,
//! writes only the glyph runs that differ from the front buffer, then swaps
//! the two. Mouse capture stays on while the renderer owns the terminal so
//! targets can be clicked.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, Emphasis, FrameBuffer, Rgb};
use crate::game_view::{BoardLayout, GameView, Viewport};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    view: GameView,
    /// What the terminal currently shows; `None` forces a full repaint.
    front: Option<FrameBuffer>,
    back: FrameBuffer,
    bytes: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new(view: GameView) -> Self {
        Self {
            stdout: io::stdout(),
            view,
            front: None,
            back: FrameBuffer::default(),
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.bytes.queue(EnableMouseCapture)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes.queue(DisableMouseCapture)?;
        self.bytes.queue(ResetColor)?;
        self.bytes.queue(SetAttribute(Attribute::Reset))?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Show `snap` in `viewport` and report where the board landed.
    pub fn draw(&mut self, snap: &GameSnapshot, viewport: Viewport) -> Result<BoardLayout> {
        self.view.render_into(snap, viewport, &mut self.back);

        self.bytes.clear();
        encode_changes(self.front.as_ref(), &self.back, &mut self.bytes)?;
        self.flush()?;

        match self.front.as_mut() {
            Some(front) => std::mem::swap(front, &mut self.back),
            None => self.front = Some(self.back.clone()),
        }
        Ok(self.view.layout(snap.width, snap.height, viewport))
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queue the commands that turn `shown` into `next`.
///
/// Without a comparable previous frame the screen is cleared and every row
/// is written. Otherwise each maximal run of changed glyphs in a row becomes
/// one cursor move followed by its characters.
fn encode_changes(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let shown = shown.filter(|f| f.width() == next.width() && f.height() == next.height());
    if shown.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut style: Option<CellStyle> = None;
    for y in 0..next.height() {
        let row = next.row(y);
        let old = shown.map(|f| f.row(y));
        let same = |x: usize| old.is_some_and(|o| o[x] == row[x]);

        let mut x = 0;
        while x < row.len() {
            if same(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < row.len() && !same(x) {
                x += 1;
            }
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in &row[start..x] {
                if style != Some(glyph.style) {
                    queue_style(out, glyph.style)?;
                    style = Some(glyph.style);
                }
                out.queue(Print(glyph.ch))?;
            }
        }
    }

    if style.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(style.fg.into()))?;
    out.queue(SetBackgroundColor(style.bg.into()))?;
    match style.emphasis {
        Emphasis::Normal => {}
        Emphasis::Bold => {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        Emphasis::Dim => {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
    }
    Ok(())
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}
