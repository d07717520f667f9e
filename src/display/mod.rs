/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `Frame`.  No
/// round logic is performed; this module only scales screen-pixel
/// rectangles down onto the terminal grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::draw::{Frame, Sprite, Visual};
use invaders::entities::EnemyColor;
use invaders::rect::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_SHIP: Color = Color::White;
const C_ENEMY_RED: Color = Color::Red;
const C_ENEMY_GREEN: Color = Color::Green;
const C_ENEMY_YELLOW: Color = Color::Yellow;
const C_BONUS: Color = Color::Magenta;
const C_BARRIER: Color = Color::DarkGreen;
const C_LASER_PLAYER: Color = Color::Cyan;
const C_LASER_ENEMY: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

fn look(visual: Visual) -> Option<(Color, &'static str)> {
    match visual {
        Visual::Background => None,
        Visual::Enemy(EnemyColor::Red) => Some((C_ENEMY_RED, "▓")),
        Visual::Enemy(EnemyColor::Green) => Some((C_ENEMY_GREEN, "▓")),
        Visual::Enemy(EnemyColor::Yellow) => Some((C_ENEMY_YELLOW, "▓")),
        Visual::Bonus => Some((C_BONUS, "▒")),
        Visual::BarrierCell => Some((C_BARRIER, "█")),
        Visual::Ship => Some((C_SHIP, "▲")),
        Visual::PlayerLaser => Some((C_LASER_PLAYER, "║")),
        Visual::EnemyLaser => Some((C_LASER_ENEMY, "↓")),
    }
}

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

/// The framed play area inside the border, and the pixel screen it shows.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
    pub screen_width: i32,
    pub screen_height: i32,
}

impl Viewport {
    /// Rows 0 (HUD) and 1 (top border) above, border and hint rows below.
    pub fn for_terminal(width: u16, height: u16, screen_width: i32, screen_height: i32) -> Self {
        Viewport {
            col: 1,
            row: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
            screen_width: screen_width.max(1),
            screen_height: screen_height.max(1),
        }
    }

    /// Cell span covered by `span` pixels starting at `start`, clipped to
    /// `0..cells`.  Anything visible covers at least one cell.
    fn span(start: i32, len: i32, pixels: i32, cells: u16) -> Option<(u16, u16)> {
        let cells = cells as i64;
        let pixels = pixels as i64;
        let lo = (start as i64 * cells).div_euclid(pixels);
        let hi = ((start as i64 + len as i64) * cells + pixels - 1).div_euclid(pixels);
        let hi = hi.max(lo + 1);
        let lo = lo.max(0);
        let hi = hi.min(cells);
        (lo < hi).then_some((lo as u16, hi as u16))
    }

    /// `(cols, rows)` ranges in absolute terminal coordinates.
    pub fn cells(&self, rect: &Rect) -> Option<(std::ops::Range<u16>, std::ops::Range<u16>)> {
        let (c0, c1) = Self::span(rect.x, rect.w, self.screen_width, self.cols)?;
        let (r0, r1) = Self::span(rect.y, rect.h, self.screen_height, self.rows)?;
        Some((self.col + c0..self.col + c1, self.row + r0..self.row + r1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, frame.score)?;

    for sprite in &frame.sprites {
        draw_sprite(out, sprite, view)?;
    }

    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.row + view.rows + 1))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let top = view.row - 1;
    let bottom = view.row + view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(view.col - 1, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(view.col - 1, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in view.row..bottom {
        out.queue(cursor::MoveTo(view.col - 1, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.col + view.cols, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, score: u32) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", score)))?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, sprite: &Sprite, view: &Viewport) -> std::io::Result<()> {
    let Some((color, glyph)) = look(sprite.visual) else {
        return Ok(());
    };
    let Some((cols, rows)) = view.cells(&sprite.rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat(cols.len());
    for row in rows {
        out.queue(cursor::MoveTo(cols.start, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.row + view.rows + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   K : Kill one   Q : Quit"))?;
    Ok(())
}
