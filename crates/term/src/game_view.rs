//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Pos};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board frame placement inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const SCORE_DIGITS: usize = 5;

/// A lightweight terminal renderer for the board and its side panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers reuse the framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(fb, frame, border);

        // The board already contains the active piece.
        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for row in 0..snap.height {
            for col in 0..snap.width {
                let id = snap.board[row as usize * snap.width as usize + col as usize];
                match PieceKind::from_tile_id(id) {
                    Some(kind) => self.fill_cell(fb, frame, col, row, '█', piece_style(kind)),
                    None => self.fill_cell(fb, frame, col, row, '·', empty),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
            for pos in ghost {
                if snap.cell(pos).is_some() {
                    continue;
                }
                if let Some((col, row)) = snap.screen_cell(pos) {
                    self.fill_cell(fb, frame, col, row, '░', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left corner of board cell `(col, row_from_top)`.
    pub fn cell_origin(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> (u16, u16) {
        self.cell_pos(self.frame(snap, viewport), col, row)
    }

    fn cell_pos(&self, frame: Frame, col: u16, row: u16) -> (u16, u16) {
        (
            frame.x.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w)),
            frame.y.saturating_add(1).saturating_add(row.saturating_mul(self.cell_h)),
        )
    }

    /// Oversized boards saturate at the edge of the u16 plane and get clipped.
    fn frame(&self, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.height.saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_pos(frame, col, row);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, SCORE_DIGITS, value);
        y += 3;

        fb.put_str(panel_x, y, "BEST", label);
        fb.put_u32(panel_x, y + 1, snap.best, SCORE_DIGITS, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if let Some(kind) = snap.next {
            let style = piece_style(kind);
            let min_x = snap.next_cells.iter().map(|p| p.x).min().unwrap_or(0);
            let max_y = snap.next_cells.iter().map(|p| p.y).max().unwrap_or(0);
            for Pos { x, y: cy } in snap.next_cells {
                let px = panel_x + ((x - min_x) as u16) * self.cell_w;
                let py = y + ((max_y - cy) as u16) * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
        y += 3;

        fb.put_str(panel_x, y, "GAME", label);
        fb.put_u32(panel_x + 5, y, snap.episode, 0, value);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, BOARD_BG).bold()
}
