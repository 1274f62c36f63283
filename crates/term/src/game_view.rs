//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{BannerKind, Cell, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BANNER_BG: Rgb = Rgb::new(106, 90, 205);

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

/// Where the board frame lands inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Draws the board, the falling piece, the banner and the side panel.
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

    /// Board frame position for a viewport: horizontally centered, vertically centered.
    pub fn frame(&self, viewport: Viewport) -> BoardFrame {
        let w = (GRID_WIDTH as u16) * self.cell_w + 2;
        let h = (GRID_HEIGHT as u16) * self.cell_h + 2;
        BoardFrame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        draw_border(fb, frame, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.draw_board_cell(fb, frame, x as u16, y as u16, *cell);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.blocks() {
                if x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8 {
                    self.draw_block(fb, frame, x as u16, y as u16, active.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(banner) = snap.banner {
            draw_banner(fb, frame, banner);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16, cell: Cell) {
        if cell.occupied {
            self.draw_block(fb, frame, x, y, cell.color);
        } else {
            let dot = CellStyle::new(Rgb::new(70, 70, 80), BOARD_BG);
            self.fill_cell_rect(fb, frame, x, y, '·', dot);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16, color: Rgb) {
        self.fill_cell_rect(fb, frame, x, y, '█', CellStyle::new(color, BOARD_BG));
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: BoardFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(8) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("TOTAL", snap.total_lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        if snap.game_over {
            let over = CellStyle::new(Rgb::new(255, 80, 80), PANEL_BG).bold();
            fb.put_str(panel_x, y, "GAME OVER", over);
            y = y.saturating_add(2);
        }

        let help = CellStyle::new(Rgb::new(120, 120, 130), PANEL_BG);
        for line in ["←→ move", "↑ rotate", "↓ drop", "space slam", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: BoardFrame, style: CellStyle) {
    let BoardFrame { x, y, w, h } = frame;
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

/// Centered text on a band three rows tall, across the whole board.
fn draw_banner(fb: &mut FrameBuffer, frame: BoardFrame, banner: BannerKind) {
    let band = CellStyle::new(Rgb::new(220, 220, 220), BANNER_BG);
    let mid_y = frame.y.saturating_add(frame.h / 2);
    fb.fill_rect(
        frame.x + 1,
        mid_y.saturating_sub(1),
        frame.w.saturating_sub(2),
        3,
        ' ',
        band,
    );

    let text = banner.to_string();
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, mid_y, &text, band.bold());
}
