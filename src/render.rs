//! RGB pixel buffer rendered with Unicode half-blocks (two pixels per
//! terminal cell), plus the scene drawing for one frame.

use std::io::{self, Write};

use crossterm::{cursor, queue, style, style::Color as CColor};

use crate::game::{CANVAS_H, CANVAS_W, Game, State};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend `a` toward `b`; `t_256` is the weight of `b` in 0..=256.
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

// Warm paper background, gold bird, slate pipes.
const BG_TOP: Rgb = Rgb(250, 247, 240);
const BG_BOT: Rgb = Rgb(232, 226, 213);
pub const BIRD: Rgb = Rgb(0xc5, 0xa4, 0x7e);
pub const PIPE: Rgb = Rgb(0xcb, 0xd5, 0xe1);
const PIPE_EDGE: Rgb = Rgb(0xb2, 0xbe, 0xcd);
pub const TEXT: Rgb = Rgb(0x2d, 0x2d, 0x2d);
pub const PANEL: Rgb = Rgb(255, 253, 248);
const PANEL_BORDER: Rgb = Rgb(0x2d, 0x2d, 0x2d);
const HINT: Rgb = Rgb(0x6b, 0x63, 0x55);

pub struct PixelBuf {
    pub w: usize,
    /// Pixel height, i.e. terminal rows times two.
    pub h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BG_TOP; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BG_TOP);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Bounds-checked alpha blend of `c` over the existing pixel.
    pub fn blend(&mut self, x: i32, y: i32, c: Rgb, t_256: u16) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let idx = y as usize * self.w + x as usize;
            self.px[idx] = Rgb::lerp(self.px[idx], c, t_256.min(256));
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Flush the buffer as `▀` half-blocks, batching color changes.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    // Uniform cell: a plain space on the background color.
                    if bg != Some(top) {
                        queue!(out, style::SetBackgroundColor(to_ccolor(top)))?;
                        bg = Some(top);
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if fg != Some(top) {
                        queue!(out, style::SetForegroundColor(to_ccolor(top)))?;
                        fg = Some(top);
                    }
                    if bg != Some(bot) {
                        queue!(out, style::SetBackgroundColor(to_ccolor(bot)))?;
                        bg = Some(bot);
                    }
                    queue!(out, style::Print('\u{2580}'))?;
                }
            }
            if row < rows.saturating_sub(1) {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                fg = None;
                bg = None;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn to_ccolor(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── 3x5 bitmap font ─────────────────────────────────────────────────────────

#[rustfmt::skip]
fn glyph(ch: char) -> Option<[u8; 15]> {
    Some(match ch {
        '0' => [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1],
        '1' => [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1],
        '2' => [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1],
        '3' => [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1],
        '4' => [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1],
        '5' => [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1],
        '6' => [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1],
        '7' => [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0],
        '8' => [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1],
        '9' => [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1],
        'A' => [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1],
        'C' => [1,1,1, 1,0,0, 1,0,0, 1,0,0, 1,1,1],
        'E' => [1,1,1, 1,0,0, 1,1,1, 1,0,0, 1,1,1],
        'G' => [1,1,1, 1,0,0, 1,0,1, 1,0,1, 1,1,1],
        'M' => [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1],
        'O' => [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1],
        'P' => [1,1,1, 1,0,1, 1,1,1, 1,0,0, 1,0,0],
        'R' => [1,1,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1],
        'S' => [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1],
        'V' => [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0],
        ':' => [0,0,0, 0,1,0, 0,0,0, 0,1,0, 0,0,0],
        _ => return None,
    })
}

pub fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, fg: Rgb) {
    for (i, ch) in text.chars().enumerate() {
        let Some(g) = glyph(ch) else { continue };
        let gx = x + i as i32 * 4; // 3px glyph + 1px spacing
        for row in 0..5 {
            for col in 0..3 {
                if g[row * 3 + col] == 1 {
                    buf.set(gx + col as i32, y + row as i32, fg);
                }
            }
        }
    }
}

pub fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, fg: Rgb) {
    let total_w = text.chars().count() as i32 * 4 - 1;
    draw_text(buf, cx - total_w / 2, y, text, fg);
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Maps the fixed logical playfield onto the current pixel buffer.
struct Viewport {
    sx: f64,
    sy: f64,
}

impl Viewport {
    fn of(buf: &PixelBuf) -> Self {
        Viewport {
            sx: buf.w as f64 / CANVAS_W,
            sy: buf.h as f64 / CANVAS_H,
        }
    }

    fn rect(&self, buf: &mut PixelBuf, x: f64, y: f64, w: f64, h: f64, c: Rgb) {
        let x0 = (x * self.sx).round() as i32;
        let y0 = (y * self.sy).round() as i32;
        let x1 = ((x + w) * self.sx).round() as i32;
        let y1 = ((y + h) * self.sy).round() as i32;
        if w > 0.0 && h > 0.0 {
            buf.fill_rect(x0, y0, (x1 - x0).max(1), (y1 - y0).max(1), c);
        }
    }
}

/// Full repaint of one frame: clear, pipes, bird, score, overlays. Reads the
/// game state, never mutates it.
pub fn draw_frame(game: &Game, buf: &mut PixelBuf) {
    draw_background(buf);

    let vp = Viewport::of(buf);
    for p in &game.pipes {
        vp.rect(buf, p.x, 0.0, p.w, p.top_h, PIPE);
        vp.rect(buf, p.x, p.bottom_y, p.w, game.canvas_h - p.bottom_y, PIPE);
        // A one-pixel lip on the gap edges so they read at low resolution.
        vp.rect(buf, p.x, p.top_h - 4.0, p.w, 4.0, PIPE_EDGE);
        vp.rect(buf, p.x, p.bottom_y, p.w, 4.0, PIPE_EDGE);
    }

    let b = &game.bird;
    vp.rect(buf, b.x, b.y, b.w, b.h, BIRD);

    draw_text(buf, 3, 3, &format!("SCORE: {}", game.score), TEXT);

    match game.state {
        State::NotStarted => {
            draw_text_centered(buf, buf.w as i32 / 2, buf.h as i32 / 2 + 6, "PRESS SPACE", HINT);
        }
        State::GameOver => draw_game_over(game, buf),
        State::Running => {}
    }
}

fn draw_background(buf: &mut PixelBuf) {
    let h = buf.h.max(1);
    for y in 0..buf.h {
        let t = (y * 256 / h) as u16;
        let c = Rgb::lerp(BG_TOP, BG_BOT, t);
        for x in 0..buf.w {
            buf.set(x as i32, y as i32, c);
        }
    }
}

fn draw_game_over(game: &Game, buf: &mut PixelBuf) {
    // Dim the scene behind the panel.
    for y in 0..buf.h {
        for x in 0..buf.w {
            let c = buf.get(x, y);
            buf.set(x as i32, y as i32, Rgb::lerp(c, Rgb(40, 38, 34), 96));
        }
    }

    let cx = buf.w as i32 / 2;
    let cy = buf.h as i32 / 2;
    let panel_w = ((buf.w as i32) / 2).clamp(40, 120);
    let panel_h = 24;
    let px = cx - panel_w / 2;
    let py = cy - panel_h / 2;
    buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, PANEL_BORDER);
    buf.fill_rect(px, py, panel_w, panel_h, PANEL);

    draw_text_centered(buf, cx, py + 3, "GAME OVER", TEXT);
    draw_text_centered(buf, cx, py + 10, &format!("SCORE: {}", game.score), TEXT);
    draw_text_centered(buf, cx, py + 17, "PRESS R", HINT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_fill_clip_at_bounds() {
        let mut buf = PixelBuf::new(10, 10);
        buf.set(-1, 0, BIRD);
        buf.set(0, -1, BIRD);
        buf.set(10, 10, BIRD);
        buf.fill_rect(-5, -5, 20, 20, BIRD);
        assert_eq!(buf.get(0, 0), BIRD);
        assert_eq!(buf.get(9, 9), BIRD);
    }

    #[test]
    fn blend_weights() {
        let mut buf = PixelBuf::new(2, 2);
        buf.set(0, 0, Rgb(0, 0, 0));
        buf.blend(0, 0, Rgb(255, 255, 255), 256);
        assert_eq!(buf.get(0, 0), Rgb(255, 255, 255));
        buf.set(1, 0, Rgb(100, 100, 100));
        buf.blend(1, 0, Rgb(200, 200, 200), 0);
        assert_eq!(buf.get(1, 0), Rgb(100, 100, 100));
        buf.blend(5, 5, Rgb(1, 2, 3), 128); // out of bounds is a no-op
    }

    #[test]
    fn draws_fresh_session_without_pipes() {
        let game = Game::new(CANVAS_W, CANVAS_H);
        let mut buf = PixelBuf::new(80, 48);
        draw_frame(&game, &mut buf);
        // Bird spawns at (80, 300) logical, which lands around (8..11, 24..26).
        assert_eq!(buf.get(9, 25), BIRD);
    }

    #[test]
    fn game_over_panel_covers_the_center() {
        let mut game = Game::new(CANVAS_W, CANVAS_H);
        game.state = State::GameOver;
        let mut buf = PixelBuf::new(100, 60);
        draw_frame(&game, &mut buf);
        // Center pixel sits inside the panel, off the text rows.
        assert_eq!(buf.get(26, 30), PANEL);
    }

    #[test]
    fn degenerate_buffer_does_not_panic() {
        let game = Game::new(CANVAS_W, CANVAS_H);
        let mut buf = PixelBuf::new(0, 0);
        draw_frame(&game, &mut buf);
        let mut buf = PixelBuf::new(1, 1);
        draw_frame(&game, &mut buf);
    }
}
