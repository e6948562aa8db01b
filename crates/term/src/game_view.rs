//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{base_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// A lightweight terminal renderer for the Tetris game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_help: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Top-left of the board frame in terminal coordinates.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_help: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    /// Size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Terminal position of board cell (col, row), inside the border.
    pub fn cell_origin(&self, viewport: Viewport, col: u16, row: u16) -> (u16, u16) {
        let o = self.origin(viewport);
        (
            o.x + 1 + col * self.cell_w,
            o.y + 1 + row * self.cell_h,
        )
    }

    fn origin(&self, viewport: Viewport) -> Origin {
        let (frame_w, frame_h) = self.frame_size();
        Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized only when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let origin = self.origin(viewport);
        let (frame_w, frame_h) = self.frame_size();

        fb.fill_rect(
            origin.x + 1,
            origin.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), WELL_BG),
        );
        draw_border(
            fb,
            origin,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        for (row, line) in snap.board.iter().enumerate() {
            for (col, &code) in line.iter().enumerate() {
                match PieceKind::from_code(code) {
                    Some(kind) => self.draw_block(fb, origin, col as i8, row as i8, kind),
                    None => self.fill_cell(
                        fb,
                        origin,
                        col as i8,
                        row as i8,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_row) = snap.ghost_row {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
                for (col, row) in active.ghost_cells(ghost_row) {
                    self.fill_cell(fb, origin, col, row, '░', ghost);
                }
            }
            for (col, row) in active.cells {
                self.draw_block(fb, origin, col, row, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.paused {
            draw_overlay(fb, origin, frame_w, frame_h, "PAUSED", None);
        } else if snap.game_over {
            draw_overlay(fb, origin, frame_w, frame_h, "GAME OVER", Some("R to restart"));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, origin: Origin, col: i8, row: i8, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), WELL_BG).bold();
        self.fill_cell(fb, origin, col, row, '█', style);
    }

    /// Fill one board cell; cells outside the well (e.g. above the top) are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        col: i8,
        row: i8,
        ch: char,
        style: CellStyle,
    ) {
        if col < 0 || row < 0 || col >= BOARD_WIDTH as i8 || row >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = origin.x + 1 + (col as u16) * self.cell_w;
        let py = origin.y + 1 + (row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = origin.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score.max(snap.score)),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            let style = CellStyle::new(piece_color(kind), SCREEN_BG).bold();
            for (dc, dr) in base_shape(kind).offsets() {
                fb.fill_rect(
                    panel_x + (dc as u16) * self.cell_w,
                    y + dr as u16,
                    self.cell_w,
                    1,
                    '█',
                    style,
                );
            }
        }
        y = y.saturating_add(3);

        if self.show_help {
            let help = value.dim();
            for line in [
                "←→ move  ↑ rotate",
                "↓ soft  ␣ hard",
                "P pause  R restart",
                "Q quit",
            ] {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, help);
                y = y.saturating_add(1);
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, origin: Origin, w: u16, h: u16, style: CellStyle) {
    let Origin { x, y } = origin;
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

fn draw_overlay(
    fb: &mut FrameBuffer,
    origin: Origin,
    frame_w: u16,
    frame_h: u16,
    title: &str,
    hint: Option<&str>,
) {
    let mid_y = origin.y.saturating_add(frame_h / 2);
    let centered = |text: &str| {
        let w = text.chars().count() as u16;
        origin.x.saturating_add(frame_w.saturating_sub(w) / 2)
    };

    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    fb.put_str(centered(title), mid_y, title, style);
    if let Some(hint) = hint {
        let dim = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        fb.put_str(centered(hint), mid_y + 1, hint, dim);
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, SequenceSource};

    const VIEW: Viewport = Viewport {
        width: 60,
        height: 24,
    };

    fn view() -> GameView {
        GameView::default().with_anchor_y(AnchorY::Top)
    }

    fn started(kinds: &[PieceKind]) -> GameState<SequenceSource> {
        let mut game = GameState::new(SequenceSource::new(kinds.iter().copied()));
        game.start();
        game
    }

    #[test]
    fn draws_border_around_well() {
        let fb = view().render(&GameSnapshot::default(), VIEW);
        let (frame_w, frame_h) = view().frame_size();
        assert_eq!((frame_w, frame_h), (22, 22));

        let x = (VIEW.width - frame_w) / 2;
        assert_eq!(fb.get(x, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(x + frame_w - 1, frame_h - 1).map(|c| c.ch), Some('┘'));
    }

    #[test]
    fn draws_active_and_ghost_cells() {
        let game = started(&[PieceKind::I, PieceKind::O]);
        let fb = view().render(&game.snapshot(), VIEW);

        let (x, y) = view().cell_origin(VIEW, 3, 0);
        let cell = fb.get(x, y).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::I));

        let (x, y) = view().cell_origin(VIEW, 6, 19);
        assert_eq!(fb.get(x, y).map(|c| c.ch), Some('░'));
    }

    #[test]
    fn draws_locked_cells() {
        let mut game = started(&[PieceKind::O, PieceKind::T]);
        game.hard_drop();
        let fb = view().render(&game.snapshot(), VIEW);

        let (x, y) = view().cell_origin(VIEW, 4, 19);
        let cell = fb.get(x, y).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_color(PieceKind::O));
        // Two columns per board cell.
        assert_eq!(fb.get(x + 1, y), Some(cell));

        let (x, y) = view().cell_origin(VIEW, 0, 19);
        assert_eq!(fb.get(x, y).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn side_panel_shows_stats() {
        let mut snap = started(&[PieceKind::T]).snapshot();
        snap.score = 1200;
        snap.high_score = 5000;
        let fb = view().render(&snap, VIEW);

        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("1200"));
        assert!(fb.contains_text("HIGH"));
        assert!(fb.contains_text("5000"));
        assert!(fb.contains_text("LEVEL"));
        assert!(fb.contains_text("NEXT"));
    }

    #[test]
    fn narrow_viewport_skips_panel() {
        let snap = started(&[PieceKind::T]).snapshot();
        let fb = view().render(&snap, Viewport::new(24, 24));
        assert!(!fb.contains_text("SCORE"));
    }

    #[test]
    fn paused_overlay() {
        let mut game = started(&[PieceKind::T]);
        game.apply_action(crate::types::GameAction::Pause);
        let fb = view().render(&game.snapshot(), VIEW);
        assert!(fb.contains_text("PAUSED"));
        assert!(!fb.contains_text("GAME OVER"));
    }

    #[test]
    fn game_over_overlay() {
        let mut snap = GameSnapshot::default();
        snap.started = true;
        snap.game_over = true;
        let fb = view().render(&snap, VIEW);
        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text("R to restart"));
    }

    #[test]
    fn render_into_reuses_buffer() {
        let snap = started(&[PieceKind::L]).snapshot();
        let mut fb = FrameBuffer::new(1, 1);
        view().render_into(&snap, VIEW, &mut fb);
        assert_eq!((fb.width(), fb.height()), (VIEW.width, VIEW.height));
        assert_eq!(fb, view().render(&snap, VIEW));
    }
}
