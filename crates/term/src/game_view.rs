//! GameView: maps a [`Game`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Game;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Title line above the board.
pub const TITLE: &str = "TETRIS WRITTEN IN RUST";

/// Help text printed next to the board, one entry per line.
pub const INSTRUCTIONS: [&str; 10] = [
    "Goal: Fill in 5 lines!",
    "",
    "left   Left",
    "right  Right",
    "up     Rotate",
    "down   Down",
    "space  Fall",
    "s      Start",
    "p      Pause",
    "esc,q  Exit",
];

const MARGIN_X: u16 = 2;
const MARGIN_Y: u16 = 1;

const BACKGROUND: Rgb = Rgb::new(0, 0, 90);
const BOARD_BG: Rgb = Rgb::new(20, 20, 28);
const TEXT: Rgb = Rgb::new(240, 220, 80);

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

/// Screen layout: title on top, the framed board below it, the
/// instruction panel to the right.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    show_landing: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps the board roughly square.
        Self {
            cell_w: 2,
            show_landing: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    /// Toggle the landing marker under the falling piece.
    pub fn with_landing_marker(mut self, show: bool) -> Self {
        self.show_landing = show;
        self
    }

    /// Smallest viewport that fits the whole layout.
    pub fn min_viewport(&self) -> Viewport {
        let panel_w = INSTRUCTIONS.iter().map(|s| s.len()).max().unwrap_or(0) as u16;
        let width = MARGIN_X + self.frame_w() + MARGIN_X + panel_w + MARGIN_X;
        let height = self.board_y() + self.frame_h() + MARGIN_Y;
        Viewport::new(width, height)
    }

    fn frame_w(&self) -> u16 {
        BOARD_WIDTH as u16 * self.cell_w + 2
    }

    fn frame_h(&self) -> u16 {
        BOARD_HEIGHT as u16 + 2
    }

    fn board_y(&self) -> u16 {
        MARGIN_Y + 1 + MARGIN_Y
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, game: &Game, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, BACKGROUND).cell(' '));

        let text = CellStyle::new(TEXT, BACKGROUND);
        fb.put_str(MARGIN_X, MARGIN_Y, TITLE, text.bold());

        let start_x = MARGIN_X;
        let start_y = self.board_y();
        self.draw_border(fb, start_x, start_y);
        self.draw_board(fb, game, start_x, start_y);
        self.draw_panel(fb, game, start_x + self.frame_w() + MARGIN_X, start_y);

        match game.status() {
            GameStatus::Intro => self.draw_overlay(fb, start_x, start_y, "PRESS S TO START"),
            GameStatus::Paused => self.draw_overlay(fb, start_x, start_y, "PAUSED"),
            GameStatus::GameOver => self.draw_overlay(fb, start_x, start_y, "GAME OVER"),
            GameStatus::Started => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND);
        let w = self.frame_w();
        let h = self.frame_h();

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

    fn draw_board(&self, fb: &mut FrameBuffer, game: &Game, start_x: u16, start_y: u16) {
        let empty = CellStyle::new(Rgb::new(70, 70, 80), BOARD_BG).dim();

        for (y, row) in game.board().rows().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                match PieceKind::from_cell(value) {
                    Some(kind) => {
                        let style = CellStyle::new(piece_color(kind), BOARD_BG);
                        // Falling blocks are drawn bold.
                        let style = if value < 0 { style.bold() } else { style };
                        self.fill_cell(fb, start_x, start_y, x as u16, y as u16, '█', style);
                    }
                    None => self.fill_cell(fb, start_x, start_y, x as u16, y as u16, '·', empty),
                }
            }
        }

        if !self.show_landing || game.status() != GameStatus::Started {
            return;
        }
        let (Some(kind), Some(landing_y)) = (game.piece(), game.landing_y()) else {
            return;
        };
        let (ax, ay) = game.anchor();
        if landing_y == ay {
            return;
        }
        let ghost = CellStyle::new(piece_color(kind), BOARD_BG).dim();
        for &(dx, dy) in game.shape().iter() {
            let x = ax + dx;
            let y = landing_y + dy;
            if (0..BOARD_WIDTH as i8).contains(&x)
                && (0..BOARD_HEIGHT as i8).contains(&y)
                && game.board().get(x, y) == Some(0)
            {
                self.fill_cell(fb, start_x, start_y, x as u16, y as u16, '░', ghost);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, game: &Game, x: u16, start_y: u16) {
        if x >= fb.width() {
            return;
        }
        let text = CellStyle::new(TEXT, BACKGROUND);

        let mut y = start_y;
        for line in INSTRUCTIONS {
            fb.put_str(x, y, line, text);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        let end = fb.put_str(x, y, "Level: ", text);
        fb.put_u32(end, y, game.level(), text.bold());
        y = y.saturating_add(1);
        let end = fb.put_str(x, y, "Lines: ", text);
        fb.put_u32(end, y, game.num_lines(), text.bold());

        if game.status() == GameStatus::GameOver {
            y = y.saturating_add(2);
            fb.put_str(x, y, "GAME OVER!", text.bold());
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, text: &str) {
        let mid_y = start_y.saturating_add(self.frame_h() / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(self.frame_w().saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Display color for a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::new(220, 60, 60),
        PieceKind::L => Rgb::new(80, 200, 90),
        PieceKind::J => Rgb::new(240, 220, 80),
        PieceKind::Z => Rgb::new(80, 120, 230),
        PieceKind::S => Rgb::new(200, 100, 220),
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(235, 235, 235),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rules;

    fn viewport() -> Viewport {
        GameView::default().min_viewport()
    }

    #[test]
    fn test_min_viewport_fits_layout() {
        let vp = viewport();
        assert_eq!(vp.height, 3 + 18 + 1);
        assert!(vp.width >= 2 + 22 + 2 + 22);
    }

    #[test]
    fn test_intro_screen() {
        let game = Game::new(Rules::default());
        let fb = GameView::default().render(&game, viewport());

        assert!(fb.row_text(MARGIN_Y).contains(TITLE));
        assert!(fb.contains_text("Goal: Fill in 5 lines!"));
        assert!(fb.contains_text("PRESS S TO START"));
        assert!(fb.contains_text("Level: 1"));
        assert!(fb.contains_text("Lines: 0"));
        assert!(!fb.contains_text("GAME OVER!"));
    }

    #[test]
    fn test_border_corners() {
        let view = GameView::default();
        let game = Game::new(Rules::default());
        let fb = view.render(&game, viewport());

        let y0 = view.board_y();
        assert_eq!(fb.get(MARGIN_X, y0).map(|c| c.ch), Some('┌'));
        assert_eq!(
            fb.get(MARGIN_X + view.frame_w() - 1, y0 + view.frame_h() - 1)
                .map(|c| c.ch),
            Some('┘')
        );
    }

    #[test]
    fn test_falling_piece_is_drawn_bold() {
        let view = GameView::default();
        let mut game = Game::new(Rules::default());
        game.start();
        game.spawn(PieceKind::O);

        let fb = view.render(&game, viewport());
        let px = MARGIN_X + 1 + 5 * 2;
        let py = view.board_y() + 1;
        let cell = fb.get(px, py).unwrap();
        assert_eq!(cell.ch, '█');
        assert!(cell.style.bold);
        assert_eq!(cell.style.fg, piece_color(PieceKind::O));
        // Two columns per board cell.
        assert_eq!(fb.get(px + 1, py).unwrap().ch, '█');
    }

    #[test]
    fn test_landing_marker_on_floor() {
        let view = GameView::default();
        let mut game = Game::new(Rules::default());
        game.start();
        game.spawn(PieceKind::O);

        let fb = view.render(&game, viewport());
        let px = MARGIN_X + 1 + 5 * 2;
        let floor = view.board_y() + 1 + (BOARD_HEIGHT as u16 - 1);
        assert_eq!(fb.get(px, floor).map(|c| c.ch), Some('░'));

        let fb = view
            .with_landing_marker(false)
            .render(&game, viewport());
        assert_eq!(fb.get(px, floor).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn test_settled_cells_are_plain() {
        let view = GameView::default();
        let mut game = Game::new(Rules::default());
        game.start();
        game.fall();

        let fb = view.render(&game, viewport());
        let settled = fb
            .cells()
            .iter()
            .filter(|c| c.ch == '█' && !c.style.bold)
            .count();
        assert_eq!(settled, 4 * 2);
    }

    #[test]
    fn test_pause_overlay() {
        let mut game = Game::new(Rules::default());
        game.start();
        game.pause();
        let fb = GameView::default().render(&game, viewport());
        assert!(fb.contains_text("PAUSED"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut game = Game::new(Rules::default());
        game.start();
        // Stack pieces until a spawn is blocked.
        for _ in 0..1_000 {
            if game.status() != GameStatus::Started {
                break;
            }
            if !game.fall() {
                game.play();
            }
        }
        assert_eq!(game.status(), GameStatus::GameOver);
        let fb = GameView::default().render(&game, viewport());
        assert!(fb.contains_text("GAME OVER!"));
        assert!(fb.contains_text("GAME OVER"));
    }

    #[test]
    fn test_small_viewport_does_not_panic() {
        let game = Game::new(Rules::default());
        let fb = GameView::default().render(&game, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
