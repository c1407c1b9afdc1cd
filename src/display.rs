/// Rendering layer: all terminal output lives here.
///
/// The simulation works on an 800×600 logical canvas.  Each frame is
/// projected onto whatever cell grid the terminal currently offers; no game
/// logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use dodger::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use dodger::entities::{GameState, Rect, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Black;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_SCORE: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;
const C_INSTRUCTIONS: Color = Color::White;

const FILL: &str = "█";
const SCORE_Y: i32 = 10;
const RESTART_HINT: &str = "Press any key to restart or ESC to quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal grid the logical canvas is scaled onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

/// A block of cells, half-open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    pub fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport::new(cols, rows))
    }

    fn col(&self, x: i32) -> i64 {
        x as i64 * self.cols as i64 / SCREEN_WIDTH as i64
    }

    fn row(&self, y: i32) -> i64 {
        y as i64 * self.rows as i64 / SCREEN_HEIGHT as i64
    }

    /// Scale a logical rectangle to cells and clip it to the grid.
    ///
    /// Far edges round up so that anything covering part of a cell paints
    /// it; returns `None` when nothing is visible.
    pub fn project(&self, rect: Rect) -> Option<CellRect> {
        let ceil_div = |n: i64, d: i64| (n + d - 1).div_euclid(d);
        let c0 = self.col(rect.left()).clamp(0, self.cols as i64);
        let r0 = self.row(rect.top()).clamp(0, self.rows as i64);
        let c1 = ceil_div(rect.right() as i64 * self.cols as i64, SCREEN_WIDTH as i64)
            .clamp(0, self.cols as i64);
        let r1 = ceil_div(rect.bottom() as i64 * self.rows as i64, SCREEN_HEIGHT as i64)
            .clamp(0, self.rows as i64);
        if c1 <= c0 || r1 <= r0 {
            return None;
        }
        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16,
            cols: (c1 - c0) as u16,
            rows: (r1 - r0) as u16,
        })
    }

    /// Row for a logical y, clamped onto the grid.
    fn text_row(&self, y: i32) -> u16 {
        self.row(y).clamp(0, self.rows.saturating_sub(1) as i64) as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for sprite in state.sprites() {
        draw_sprite(out, sprite, view)?;
    }

    draw_score(out, state, view)?;

    if state.is_game_over() {
        draw_game_over(out, view)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, sprite: &dyn Sprite, view: Viewport) -> std::io::Result<()> {
    let Some(cells) = view.project(sprite.rect()) else {
        return Ok(());
    };
    let color = match sprite.kind() {
        SpriteKind::Player => C_PLAYER,
        SpriteKind::Enemy => C_ENEMY,
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = FILL.repeat(cells.cols as usize);
    for row in cells.row..cells.row + cells.rows {
        out.queue(cursor::MoveTo(cells.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

/// Print `text` centred on the grid, truncated to its width.
fn draw_centered<W: Write>(
    out: &mut W,
    text: &str,
    row: u16,
    color: Color,
    view: Viewport,
) -> std::io::Result<()> {
    let visible: String = text.chars().take(view.cols as usize).collect();
    let len = visible.chars().count() as u16;
    let col = (view.cols / 2).saturating_sub(len / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(visible))?;
    Ok(())
}

fn draw_score<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let text = format!("Score: {}", state.score);
    draw_centered(out, &text, view.text_row(SCORE_Y), C_SCORE, view)
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

const GLYPH_ROWS: usize = 5;

fn glyph(c: char) -> Option<[&'static str; GLYPH_ROWS]> {
    let rows = match c {
        'A' => [" ███ ", "█   █", "█████", "█   █", "█   █"],
        'E' => ["█████", "█    ", "████ ", "█    ", "█████"],
        'G' => [" ███ ", "█    ", "█  ██", "█   █", " ███ "],
        'M' => ["█   █", "██ ██", "█ █ █", "█   █", "█   █"],
        'O' => [" ███ ", "█   █", "█   █", "█   █", " ███ "],
        'R' => ["████ ", "█   █", "████ ", "█  █ ", "█   █"],
        'V' => ["█   █", "█   █", "█   █", " █ █ ", "  █  "],
        ' ' => ["   ", "   ", "   ", "   ", "   "],
        _ => return None,
    };
    Some(rows)
}

/// Block-letter rendering of `text`, or `None` if a glyph is missing.
fn banner(text: &str) -> Option<Vec<String>> {
    let glyphs = text.chars().map(glyph).collect::<Option<Vec<_>>>()?;
    let rows = (0..GLYPH_ROWS)
        .map(|r| {
            glyphs
                .iter()
                .map(|g| g[r])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Some(rows)
}

fn draw_game_over<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let title_row = view.text_row(SCREEN_HEIGHT / 4);
    let hint_row = view.text_row(SCREEN_HEIGHT / 2);

    // Fall back to plain text when the block letters would not fit above the hint.
    let big = banner("GAME OVER").filter(|rows| {
        let width = rows[0].chars().count();
        width <= view.cols as usize && title_row as usize + rows.len() < hint_row as usize
    });

    out.queue(style::SetAttribute(Attribute::Bold))?;
    match big {
        Some(rows) => {
            for (i, line) in rows.iter().enumerate() {
                draw_centered(out, line, title_row + i as u16, C_GAME_OVER, view)?;
            }
        }
        None => draw_centered(out, "GAME OVER", title_row, C_GAME_OVER, view)?,
    }
    out.queue(style::SetAttribute(Attribute::Reset))?;

    draw_centered(out, RESTART_HINT, hint_row, C_INSTRUCTIONS, view)
}
