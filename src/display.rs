/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; this module only translates state
/// into terminal commands, scaling game units to the terminal's play area.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dodge_game::clock::Clock;
use dodge_game::compute::{GameLoop, Presenter};
use dodge_game::config::GameConfig;
use dodge_game::entities::{Enemy, GameStatus, LivesDisplay};
use dodge_game::spawn::SpawnPolicy;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Yellow;
const C_ENEMY: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── HUD state ─────────────────────────────────────────────────────────────────

/// What the game loop has asked us to show.
#[derive(Clone, Debug)]
pub struct Hud {
    pub lives: LivesDisplay,
    pub game_over: bool,
}

impl Hud {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            lives: LivesDisplay::from_lives(starting_lives),
            game_over: false,
        }
    }
}

impl Presenter for Hud {
    fn update_lives(&mut self, lives: LivesDisplay) {
        self.lives = lives;
    }

    fn game_over(&mut self) {
        self.game_over = true;
    }
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Interior of the border, in terminal cells.
#[derive(Clone, Copy, Debug)]
struct PlayArea {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl PlayArea {
    fn new(width: u16, height: u16) -> Self {
        // Row 0 HUD, row 1 top border, row h-2 bottom border, row h-1 hint.
        Self {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    /// Map a game-space rectangle onto cells, clipped to the area.
    /// Returns `(col, row, w, h)` or `None` when fully off-screen.
    fn project(
        &self,
        config: &GameConfig,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Option<(u16, u16, u16, u16)> {
        let sx = self.cols as f32 / config.game_width;
        let sy = self.rows as f32 / config.game_height;

        let x1 = (x * sx).round() as i32;
        let y1 = (y * sy).round() as i32;
        let x2 = (x1 + ((w * sx).round() as i32).max(1)).min(self.cols as i32);
        let y2 = (y1 + ((h * sy).round() as i32).max(1)).min(self.rows as i32);
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        if x1 >= x2 || y1 >= y2 {
            return None;
        }
        Some((
            self.left + x1 as u16,
            self.top + y1 as u16,
            (x2 - x1) as u16,
            (y2 - y1) as u16,
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write, C: Clock, S: SpawnPolicy>(
    out: &mut W,
    game: &GameLoop<C, S>,
    hud: &Hud,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let area = PlayArea::new(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, hud, width)?;

    for enemy in game.enemies() {
        draw_enemy(out, &area, game.config(), enemy)?;
    }
    draw_player(out, &area, game)?;
    draw_controls_hint(out, height)?;

    if hud.game_over || game.status() == GameStatus::GameOver {
        draw_game_over(out, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, width: u16) -> std::io::Result<()> {
    let lives_text = format!("Lives: {}", hud.lives);
    let rx = width.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(out: &mut W, rect: (u16, u16, u16, u16), glyph: char) -> std::io::Result<()> {
    let (col, row, w, h) = rect;
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();
    for r in row..row + h {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_player<W: Write, C: Clock, S: SpawnPolicy>(
    out: &mut W,
    area: &PlayArea,
    game: &GameLoop<C, S>,
) -> std::io::Result<()> {
    let config = game.config();
    let p = game.player();
    if let Some(rect) = area.project(config, p.x, p.y, config.player_width, config.player_height) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        fill(out, rect, '█')?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    area: &PlayArea,
    config: &GameConfig,
    enemy: &Enemy,
) -> std::io::Result<()> {
    if let Some(rect) = area.project(config, enemy.x, enemy.y, config.enemy_width, config.enemy_height) {
        out.queue(style::SetForegroundColor(C_ENEMY))?;
        fill(out, rect, '▓')?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
