//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::effects::{ParticleField, CELL_PX};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Host-side values shown in the side panel next to the snapshot data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HudInfo {
    /// Position on the mock leaderboard, if the score is on it.
    pub rank: Option<usize>,
    /// Print the key legend under the panel.
    pub show_keys: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the board frame for one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
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

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Terminal position of the top-left character of board cell (x, y).
    pub fn cell_origin(&self, layout: BoardLayout, x: u16, y: u16) -> (u16, u16) {
        (
            layout.start_x + 1 + x * self.cell_w,
            layout.start_y + 1 + y * self.cell_h,
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is resized when the
    /// viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_hud(snap, &HudInfo::default(), viewport, fb);
    }

    pub fn render_into_with_hud(
        &self,
        snap: &GameSnapshot,
        hud: &HudInfo,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        fb.draw_border(
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_color_index(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_board_cell(fb, layout, x, y, kind),
                    None => self.draw_empty_cell(fb, layout, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            for (dx, dy) in active.shape.filled_cells() {
                let x = active.x + dx;
                let y = active.y + dy;
                // Rows above the board are not visible.
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(fb, layout, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, layout);

        match snap.phase {
            Phase::Ready => self.draw_overlay_text(fb, layout, &["PRESS ENTER"]),
            Phase::Paused => self.draw_overlay_text(fb, layout, &["PAUSED"]),
            Phase::GameOver => self.draw_overlay_text(fb, layout, &["GAME OVER", "ENTER: RETRY"]),
            Phase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_hud(&self, snap: &GameSnapshot, hud: &HudInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_hud(snap, hud, viewport, &mut fb);
        fb
    }

    /// Overlay live particles. Particles outside the viewport are clipped.
    pub fn draw_particles(&self, particles: &ParticleField, viewport: Viewport, fb: &mut FrameBuffer) {
        let layout = self.layout(viewport);
        for p in particles.particles() {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let col = layout.start_x as f32 + 1.0 + p.x / CELL_PX * self.cell_w as f32;
            let row = layout.start_y as f32 + 1.0 + p.y / CELL_PX * self.cell_h as f32;
            if col >= viewport.width as f32 || row >= viewport.height as f32 {
                continue;
            }
            let fg = PieceKind::from_color_index(p.color)
                .map(piece_rgb)
                .unwrap_or(Rgb::new(255, 255, 255));
            let style = CellStyle {
                fg,
                bg: fb.get(col as u16, row as u16).map(|c| c.style.bg).unwrap_or(PANEL_BG),
                bold: false,
                dim: p.life < 30.0,
            };
            let ch = if p.size >= 5.0 { '●' } else { '•' };
            fb.put_char(col as u16, row as u16, ch, style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: BoardLayout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, layout, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, layout: BoardLayout, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_rgb(kind), BOARD_BG).bold();
        self.fill_cell_rect(fb, layout, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(layout, cell_x, cell_y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudInfo,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.start_y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let shape = next.shape.trimmed();
            let style = CellStyle::new(piece_rgb(next.kind), PANEL_BG).bold();
            for (dx, dy) in shape.filled_cells() {
                let px = panel_x + dx as u16 * self.cell_w;
                fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
            }
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "RANK", label);
        match hud.rank {
            Some(rank) => {
                fb.put_char(panel_x, y + 1, '#', value);
                fb.put_u32(panel_x + 1, y + 1, rank as u32, value);
            }
            None => fb.put_str(panel_x, y + 1, "-", value),
        }
        y = y.saturating_add(3);

        if hud.show_keys {
            let dim = value.dim();
            for line in [
                "←→ move  ↑ rotate",
                "↓ soft  space drop",
                "p pause  r reset",
                "enter start  q quit",
            ] {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, dim);
                y = y.saturating_add(1);
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: BoardLayout, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let top = mid_y.saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            fb.put_str_centered(layout.start_x, layout.frame_w, top + i as u16, text, style);
        }
    }
}

/// Display color of a piece kind.
pub fn piece_rgb(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}
