//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, BOARD_COLS, BOARD_ROWS};

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

/// A lightweight terminal renderer for the playfield.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::default(),
        });

        let board_px_w = (BOARD_COLS as u16) * self.cell_w;
        let board_px_h = (BOARD_ROWS as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        // Background for play area.
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);

        // Border.
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for row in 0..BOARD_ROWS as u16 {
            for col in 0..BOARD_COLS as u16 {
                match ColorId::from_code(snap.board[row as usize][col as usize]) {
                    Some(color) => {
                        self.draw_board_cell(fb, start_x, start_y, col, row, color);
                    }
                    None => {
                        self.draw_empty_cell(fb, start_x, start_y, col, row);
                    }
                }
            }
        }

        // Active piece (cells above the top row are simply not drawn).
        if let Some(active) = snap.active {
            for (dr, dc) in active.shape.cells() {
                let row = active.row + dr;
                let col = active.col + dc;
                if col >= 0 && col < BOARD_COLS as i8 && row >= 0 && row < BOARD_ROWS as i8 {
                    self.draw_board_cell(
                        fb,
                        start_x,
                        start_y,
                        col as u16,
                        row as u16,
                        active.color,
                    );
                }
            }
        }

        // Side panel.
        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Game-over overlay with the final score.
        if snap.game_over {
            self.draw_game_over_overlay(fb, snap.score, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, col: u16, row: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, col, row, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: u16,
        row: u16,
        color: ColorId,
    ) {
        let style = CellStyle {
            fg: color_rgb(color),
            bg: Rgb::new(30, 30, 40),
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, col, row, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        if viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        let dim = CellStyle { dim: true, ..value };
        fb.put_str(panel_x, y, "←→↓ move", dim);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "↑ rotate", dim);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "q quit", dim);
    }

    fn draw_game_over_overlay(
        &self,
        fb: &mut FrameBuffer,
        score: u32,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };

        let mid_y = start_y.saturating_add(frame_h / 2);

        let title = "GAME OVER";
        let title_w = title.chars().count() as u16;
        let tx = start_x.saturating_add(frame_w.saturating_sub(title_w) / 2);
        fb.put_str(tx, mid_y, title, style);

        // "SCORE " plus up to 10 digits.
        let line_w = 6 + decimal_width(score);
        let sx = start_x.saturating_add(frame_w.saturating_sub(line_w) / 2);
        fb.put_str(sx, mid_y + 1, "SCORE ", style);
        fb.put_u32(sx + 6, mid_y + 1, score, style);
    }
}

fn decimal_width(value: u32) -> u16 {
    let mut n = value;
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

fn color_rgb(color: ColorId) -> Rgb {
    match color {
        ColorId::Red => Rgb::new(220, 80, 80),
        ColorId::Green => Rgb::new(100, 220, 120),
        ColorId::Blue => Rgb::new(90, 130, 235),
        ColorId::Magenta => Rgb::new(200, 120, 220),
        ColorId::Yellow => Rgb::new(240, 220, 80),
        ColorId::Cyan => Rgb::new(80, 220, 220),
        ColorId::White => Rgb::new(235, 235, 235),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn contains_text(fb: &FrameBuffer, text: &str) -> bool {
        let w = fb.width() as usize;
        let row_chars: Vec<char> = fb.cells().iter().map(|c| c.ch).collect();
        row_chars
            .chunks(w)
            .map(|row| row.iter().collect::<String>())
            .any(|row| row.contains(text))
    }

    #[test]
    fn test_render_draws_border_and_panel() {
        let mut state = GameState::new(12345);
        state.start();

        let view = GameView::default();
        let fb = view.render(&state.snapshot(), Viewport::new(80, 24));

        assert!(fb.cells().iter().any(|c| c.ch == '┌'));
        assert!(contains_text(&fb, "SCORE"));
    }

    #[test]
    fn test_render_shows_active_piece_cells() {
        let mut state = GameState::new(12345);
        state.start();

        let view = GameView::default();
        let fb = view.render(&state.snapshot(), Viewport::new(80, 24));

        // Four shape cells, each 2 columns wide.
        let blocks = fb.cells().iter().filter(|c| c.ch == '█').count();
        assert_eq!(blocks, 8);
    }

    #[test]
    fn test_game_over_overlay_present() {
        let mut snap = GameState::new(12345).snapshot();
        snap.game_over = true;
        snap.score = 700;

        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(80, 24));

        assert!(contains_text(&fb, "GAME OVER"));
        assert!(contains_text(&fb, "SCORE 700"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let state = GameState::new(1);
        let view = GameView::default();
        let _ = view.render(&state.snapshot(), Viewport::new(4, 3));
    }
}
