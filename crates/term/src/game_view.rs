//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::types::{PieceKind, Rotation};

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

/// Where the board lands on screen for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the frame (border included).
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Terminal position of board cell (0, 0).
    pub origin_col: u16,
    pub origin_row: u16,
}

const PLAY_BG: Rgb = Rgb(30, 30, 40);
const PANEL_BG: Rgb = Rgb(0, 0, 0);

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    pub fn cell_h(&self) -> u16 {
        self.cell_h
    }

    /// Board placement, centered in the viewport.
    pub fn layout(&self, board_width: u8, board_height: u8, viewport: Viewport) -> BoardLayout {
        let frame_w = board_width as u16 * self.cell_w + 2;
        let frame_h = board_height as u16 * self.cell_h + 2;
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;
        BoardLayout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            origin_col: frame_x + 1,
            origin_row: frame_y + 1,
        }
    }

    /// Render the snapshot into `fb`, resizing it to the viewport and
    /// repainting every glyph.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height, Glyph::default());

        let layout = self.layout(snap.width, snap.height, viewport);
        fb.block(
            layout.origin_col,
            layout.origin_row,
            layout.frame_w - 2,
            layout.frame_h - 2,
            CellStyle::new(Rgb(80, 80, 90), PLAY_BG).glyph(' '),
        );
        draw_border(fb, &layout, CellStyle::new(Rgb(200, 200, 200), PANEL_BG));

        // Locked cells.
        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(kind) => self.fill_cell(fb, &layout, x as i8, y as i8, '█', piece_style(kind)),
                    None => self.fill_cell(
                        fb,
                        &layout,
                        x as i8,
                        y as i8,
                        '·',
                        CellStyle::new(Rgb(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = snap.active {
            let shape = get_shape(active.kind, active.rotation);
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::new(Rgb(140, 140, 140), PLAY_BG).dim();
                for (dx, dy) in shape.cells() {
                    self.fill_cell(fb, &layout, active.x + dx, ghost_y + dy, '░', ghost);
                }
            }
            for (dx, dy) in shape.cells() {
                self.fill_cell(
                    fb,
                    &layout,
                    active.x + dx,
                    active.y + dy,
                    '█',
                    piece_style(active.kind).bold(),
                );
            }
        }

        // Targets sit on top of their row's locked cells.
        for target in &snap.targets {
            let (ch, style) = if target.hit {
                ('×', CellStyle::new(Rgb(120, 120, 120), PLAY_BG).dim())
            } else {
                ('◎', CellStyle::new(Rgb(255, 255, 255), Rgb(200, 40, 40)).bold())
            };
            self.fill_cell(fb, &layout, target.x as i8, target.y as i8, ch, style);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.game_over {
            draw_overlay_text(fb, &layout, 0, "GAME OVER");
            draw_overlay_text(fb, &layout, 1, "ENTER: restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Paint board cell (x, y); cells outside the board are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        let cols = (layout.frame_w - 2) / self.cell_w;
        let rows = (layout.frame_h - 2) / self.cell_h;
        if x < 0 || y < 0 || x as u16 >= cols || y as u16 >= rows {
            return;
        }
        let px = layout.origin_col + x as u16 * self.cell_w;
        let py = layout.origin_row + y as u16 * self.cell_h;
        fb.block(px, py, self.cell_w, self.cell_h, style.glyph(ch));
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb(200, 200, 200), PANEL_BG);

        let mut y = layout.frame_y;
        fb.text(panel_x, y, "SCORE", label);
        fb.text(panel_x, y + 1, &snap.score.to_string(), value);
        y += 3;

        fb.text(panel_x, y, "LINES", label);
        fb.text(panel_x, y + 1, &snap.lines.to_string(), value);
        y += 3;

        fb.text(panel_x, y, "NEXT", label);
        y += 1;
        let preview = get_shape(snap.next, Rotation::North);
        for (dx, dy) in preview.cells() {
            let px = panel_x + dx as u16 * 2;
            fb.block(px, y + dy as u16, 2, 1, piece_style(snap.next).glyph('█'));
        }
        y += preview.height() as u16 + 1;

        // Live counter during an episode, otherwise a reminder of the rule.
        if snap.in_target_mode() {
            let hits = snap.targets.iter().filter(|t| t.hit).count();
            let alert = CellStyle::new(Rgb(255, 80, 80), PANEL_BG).bold();
            fb.text(panel_x, y, "TARGETS", alert);
            fb.text(panel_x, y + 1, &format!("{hits}/{}", snap.targets.len()), value);
            fb.text(panel_x, y + 2, "click them!", value.dim());
        } else {
            fb.text(panel_x, y, "TARGETS", label.dim());
            fb.text(panel_x, y + 1, "full rows need", value.dim());
            fb.text(panel_x, y + 2, "every ◎ clicked", value.dim());
        }
        y += 4;

        fb.text(panel_x, y, "KEYS", label);
        for (i, (key, action)) in KEY_LEGEND.iter().enumerate() {
            let row = y + 1 + i as u16;
            let end = fb.text(panel_x, row, key, label);
            fb.text(end.max(panel_x + 4), row, action, value);
        }
    }
}

/// Default bindings, in the order the side panel lists them.
const KEY_LEGEND: [(&str, &str); 6] = [
    ("W", "rotate"),
    ("A D", "move"),
    ("S", "down"),
    ("SPC", "drop"),
    ("R", "swap"),
    ("ENT", "restart"),
];

fn draw_border(fb: &mut FrameBuffer, layout: &BoardLayout, style: CellStyle) {
    let (x, y, w, h) = (layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h);
    if w < 2 || h < 2 {
        return;
    }

    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.paint(x, y, style.glyph('┌'));
    fb.paint(right, y, style.glyph('┐'));
    fb.paint(x, bottom, style.glyph('└'));
    fb.paint(right, bottom, style.glyph('┘'));
    fb.block(x + 1, y, w - 2, 1, style.glyph('─'));
    fb.block(x + 1, bottom, w - 2, 1, style.glyph('─'));
    fb.block(x, y + 1, 1, h - 2, style.glyph('│'));
    fb.block(right, y + 1, 1, h - 2, style.glyph('│'));
}

/// Centered text line `line` rows below the board's middle row.
fn draw_overlay_text(fb: &mut FrameBuffer, layout: &BoardLayout, line: u16, text: &str) {
    let y = layout.frame_y + layout.frame_h / 2 + line;
    let text_w = text.chars().count() as u16;
    let x = layout.frame_x + layout.frame_w.saturating_sub(text_w) / 2;
    let style = CellStyle::new(Rgb(255, 255, 255), PANEL_BG).bold();
    fb.text(x, y, text, style);
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb(80, 220, 220),
        PieceKind::O => Rgb(240, 220, 80),
        PieceKind::T => Rgb(200, 120, 220),
        PieceKind::S => Rgb(100, 220, 120),
        PieceKind::Z => Rgb(220, 80, 80),
        PieceKind::J => Rgb(80, 120, 220),
        PieceKind::L => Rgb(255, 165, 0),
    };
    CellStyle::new(fg, PLAY_BG)
}
