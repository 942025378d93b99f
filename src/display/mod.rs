//! Rendering layer. All terminal I/O lives here.
//!
//! The game draws through `RenderSurface`, which only knows how to clear,
//! fill rectangles and fill polygons in logical field units.
//! `TerminalSurface` rasterises those shapes onto the character grid and
//! writes the result with crossterm.  No game logic is performed here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::GameState;

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Color = Color::Black;
pub const C_TERRAIN: Color = Color::Green;
pub const C_PLAYER: Color = Color::Blue;
pub const C_ENEMY: Color = Color::Red;
pub const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Surface abstraction ───────────────────────────────────────────────────────

/// Something a frame can be drawn onto.  Coordinates are logical field units.
pub trait RenderSurface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    /// Fill the closed polygon through `points` (even-odd rule).
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color);
    /// One line of HUD text outside the play field.
    fn status_line(&mut self, _text: &str) {}
    /// Push the finished frame out.
    fn present(&mut self) -> io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame of `state` (without presenting it).
pub fn render(surface: &mut impl RenderSurface, state: &GameState) {
    surface.clear(C_BACKGROUND);

    let ground = state.terrain.silhouette(state.width, state.height);
    surface.fill_polygon(&ground, C_TERRAIN);

    let p = &state.player;
    surface.fill_rect(p.x, p.y, p.width, p.height, C_PLAYER);

    for e in &state.enemies {
        surface.fill_rect(e.x, e.y, e.width, e.height, C_ENEMY);
    }
    for b in &state.player.bullets {
        surface.fill_rect(b.x, b.y, b.width, b.height, C_BULLET);
    }

    surface.status_line(&format!(
        "Score: {:>5}   Frame: {:>7}   ←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit",
        state.score, state.frame
    ));
}

// ── Terminal surface ──────────────────────────────────────────────────────────

/// Even-odd point-in-polygon test.
fn inside_polygon(px: f32, py: f32, points: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for (i, &(xi, yi)) in points.iter().enumerate() {
        let (xj, yj) = points[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A terminal-backed surface.  Each character cell is one background-coloured
/// block; the last terminal row is reserved for the HUD.
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    field_width: f32,
    field_height: f32,
    cells: Vec<Color>,
    status: String,
}

impl<W: Write> TerminalSurface<W> {
    /// `cols` x `rows` is the whole terminal, HUD row included.
    pub fn new(out: W, cols: u16, rows: u16, field_width: f32, field_height: f32) -> Self {
        let mut surface = Self {
            out,
            cols: 0,
            rows: 0,
            field_width,
            field_height,
            cells: Vec::new(),
            status: String::new(),
        };
        surface.resize(cols, rows);
        surface
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows.saturating_sub(1);
        self.cells = vec![C_BACKGROUND; self.cols as usize * self.rows as usize];
    }

    /// Play-field size in cells.
    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Color> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.cols as f32 / self.field_width,
            self.rows as f32 / self.field_height,
        )
    }

    /// Logical coordinates of the centre of cell `(col, row)`.
    fn cell_centre(&self, col: u16, row: u16) -> (f32, f32) {
        let (sx, sy) = self.scale();
        ((col as f32 + 0.5) / sx, (row as f32 + 0.5) / sy)
    }

    /// Half-open cell range whose centres fall in `[start, start + len)`.
    fn span(start: f32, len: f32, scale: f32, limit: u16) -> (u16, u16) {
        let lo = (start * scale - 0.5).ceil().max(0.0);
        let hi = ((start + len) * scale - 0.5).ceil().max(0.0);
        (
            (lo as u32).min(limit as u32) as u16,
            (hi as u32).min(limit as u32) as u16,
        )
    }

    fn paint(&mut self, col: u16, row: u16, color: Color) {
        let idx = row as usize * self.cols as usize + col as usize;
        if let Some(cell) = self.cells.get_mut(idx) {
            *cell = color;
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn clear(&mut self, color: Color) {
        self.cells.fill(color);
        self.status.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        let (sx, sy) = self.scale();
        let (c0, c1) = Self::span(x, width, sx, self.cols);
        let (r0, r1) = Self::span(y, height, sy, self.rows);

        if c0 < c1 && r0 < r1 {
            for row in r0..r1 {
                for col in c0..c1 {
                    self.paint(col, row, color);
                }
            }
            return;
        }

        // Smaller than a cell: keep it visible on the cell under its centre.
        let cx = (x + width / 2.0) * sx;
        let cy = (y + height / 2.0) * sy;
        if cx >= 0.0 && cy >= 0.0 && cx < self.cols as f32 && cy < self.rows as f32 {
            self.paint(cx as u16, cy as u16, color);
        }
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 {
            return;
        }
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (px, py) = self.cell_centre(col, row);
                if inside_polygon(px, py, points) {
                    self.paint(col, row, color);
                }
            }
        }
    }

    fn status_line(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn present(&mut self) -> io::Result<()> {
        let mut current: Option<Color> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let color = self.cells[row as usize * self.cols as usize + col as usize];
                if current != Some(color) {
                    self.out.queue(style::SetBackgroundColor(color))?;
                    current = Some(color);
                }
                self.out.queue(Print(' '))?;
            }
        }

        // HUD (last row)
        let hud: String = self.status.chars().take(self.cols as usize).collect();
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out
            .queue(Print(format!("{:<width$}", hud, width = self.cols as usize)))?;

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
