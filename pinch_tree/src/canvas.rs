//! Software 2D drawing surface.
//!
//! An ARGB `u32` framebuffer (the layout `minifb` presents) with just enough
//! immediate-mode primitives for the scene: blended rects, discs, radial
//! glows, thick lines and arcs, shaded polygons, rotated bitmaps and a
//! scalable bitmap font.
//!
//! Every primitive takes an explicit `alpha` and honours the current
//! [`BlendMode`] and [`Zoom`].

use glam::Vec2;
use std::f32::consts::TAU;

// ════════════════════════════════════════════════════════════════════════════
// Colors
// ════════════════════════════════════════════════════════════════════════════

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const GOLD:  u32 = 0xFFFFD700;

/// Pack opaque RGB into ARGB.
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// HSL → packed ARGB. `h` in degrees, `s` and `l` in `[0, 1]`.
pub fn hsl(h: f32, s: f32, l: f32) -> u32 {
    let h  = h.rem_euclid(360.0);
    let c  = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x  = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m  = l - c / 2.0;
    let to = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    rgb(to(r), to(g), to(b))
}

/// Linear mix of two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn mix(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Blend mode & zoom
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Ordinary alpha compositing.
    #[default]
    Over,
    /// Additive ("lighter"): channels saturate toward white.
    Lighter,
}

/// Uniform scale about a fixed point, applied to everything drawn while set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom {
    pub center: Vec2,
    pub scale:  f32,
}

impl Zoom {
    pub const IDENTITY: Zoom = Zoom { center: Vec2::ZERO, scale: 1.0 };

    pub fn new(center: Vec2, scale: f32) -> Self {
        Zoom { center, scale }
    }

    /// Local → screen.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        (p - self.center) * self.scale + self.center
    }

    /// Screen → local (used to map pointer input into cloud space).
    pub fn invert(&self, p: Vec2) -> Vec2 {
        if self.scale.abs() < f32::EPSILON {
            return self.center;
        }
        (p - self.center) / self.scale + self.center
    }
}

impl Default for Zoom {
    fn default() -> Self { Zoom::IDENTITY }
}

// ════════════════════════════════════════════════════════════════════════════
// Bitmap
// ════════════════════════════════════════════════════════════════════════════

/// A decoded image in ARGB (alpha honoured when blitting).
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    pub width:  u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Bitmap {
    pub fn solid(width: u32, height: u32, color: u32) -> Self {
        Bitmap { width, height, pixels: vec![color; (width * height) as usize] }
    }

    /// Nearest-neighbour sample at normalized `(u, v)`.
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
    blend:  BlendMode,
    zoom:   Zoom,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            buf:   vec![BLACK; width * height],
            blend: BlendMode::Over,
            zoom:  Zoom::IDENTITY,
        }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn pixels(&self) -> &[u32] { &self.buf }
    pub fn size(&self)   -> Vec2   { Vec2::new(self.width as f32, self.height as f32) }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn set_blend(&mut self, mode: BlendMode) { self.blend = mode; }
    pub fn set_zoom(&mut self, zoom: Zoom)       { self.zoom = zoom; }
    pub fn reset_zoom(&mut self)                 { self.zoom = Zoom::IDENTITY; }

    /// Run `f` with `mode` active, restoring the previous mode afterwards.
    pub fn with_blend(&mut self, mode: BlendMode, f: impl FnOnce(&mut Canvas)) {
        let prev = self.blend;
        self.blend = mode;
        f(self);
        self.blend = prev;
    }

    fn map(&self, p: Vec2) -> Vec2 { self.zoom.apply(p) }
    fn len(&self, l: f32) -> f32   { l * self.zoom.scale }

    // ── pixel ─────────────────────────────────────────────────────────────

    /// Blend one device pixel. `color`'s own alpha byte multiplies `alpha`.
    pub fn plot(&mut self, x: i32, y: i32, color: u32, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = alpha * ((color >> 24) & 0xFF) as f32 / 255.0;
        if a <= 0.0 {
            return;
        }
        let a   = a.min(1.0);
        let idx = y as usize * self.width + x as usize;
        let dst = self.buf[idx];
        let channel = |shift: u32| {
            let s = ((color >> shift) & 0xFF) as f32;
            let d = ((dst   >> shift) & 0xFF) as f32;
            let v = match self.blend {
                BlendMode::Over    => d + (s - d) * a,
                BlendMode::Lighter => d + s * a,
            };
            (v.clamp(0.0, 255.0) as u32) << shift
        };
        self.buf[idx] = 0xFF000000 | channel(16) | channel(8) | channel(0);
    }

    /// Iterate device pixels of the (clipped) box around `center ± half`.
    fn device_box(&self, center: Vec2, half: Vec2) -> Option<(i32, i32, i32, i32)> {
        let x0 = ((center.x - half.x).floor() as i32).max(0);
        let y0 = ((center.y - half.y).floor() as i32).max(0);
        let x1 = ((center.x + half.x).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((center.y + half.y).ceil() as i32).min(self.height as i32 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }

    // ── shapes ────────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32, alpha: f32) {
        let a = self.map(Vec2::new(x, y));
        let b = self.map(Vec2::new(x + w, y + h));
        let center = (a + b) * 0.5;
        let half   = (b - a).abs() * 0.5;
        if let Some((x0, y0, x1, y1)) = self.device_box(center, half) {
            for py in y0..=y1 {
                for px in x0..=x1 {
                    let c = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                    if (c - center).abs().cmple(half).all() {
                        self.plot(px, py, color, alpha);
                    }
                }
            }
        }
    }

    /// Filled rectangle of size `w × h` centred on `center`, rotated by
    /// `rotation` radians.
    pub fn fill_rotated_rect(&mut self, center: Vec2, w: f32, h: f32, rotation: f32, color: u32, alpha: f32) {
        self.fill_quad_with(center, w, h, rotation, alpha, |_, _| color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32) {
        let c = self.map(center);
        let r = self.len(radius);
        if r <= 0.0 {
            return;
        }
        if let Some((x0, y0, x1, y1)) = self.device_box(c, Vec2::splat(r)) {
            for py in y0..=y1 {
                for px in x0..=x1 {
                    let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5).distance(c);
                    if d <= r {
                        self.plot(px, py, color, alpha);
                    }
                }
            }
        }
    }

    /// Disc whose alpha falls off linearly from the centre to `radius`.
    pub fn fill_glow(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32) {
        let c = self.map(center);
        let r = self.len(radius);
        if r <= 0.0 {
            return;
        }
        if let Some((x0, y0, x1, y1)) = self.device_box(c, Vec2::splat(r)) {
            for py in y0..=y1 {
                for px in x0..=x1 {
                    let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5).distance(c);
                    if d <= r {
                        self.plot(px, py, color, alpha * (1.0 - d / r));
                    }
                }
            }
        }
    }

    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: u32, alpha: f32) {
        let a = self.map(from);
        let b = self.map(to);
        let half = (self.len(width) * 0.5).max(0.5);
        let center = (a + b) * 0.5;
        let span   = (b - a).abs() * 0.5 + Vec2::splat(half);
        let ab     = b - a;
        let len2   = ab.length_squared();
        if let Some((x0, y0, x1, y1)) = self.device_box(center, span) {
            for py in y0..=y1 {
                for px in x0..=x1 {
                    let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                    let t = if len2 > 0.0 { ((p - a).dot(ab) / len2).clamp(0.0, 1.0) } else { 0.0 };
                    if p.distance(a + ab * t) <= half {
                        self.plot(px, py, color, alpha);
                    }
                }
            }
        }
    }

    /// Arc of `radius` around `center`, starting at angle `start` and
    /// sweeping clockwise (screen space) by `sweep` radians.
    pub fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, sweep: f32, width: f32, color: u32, alpha: f32) {
        if sweep <= 0.0 {
            return;
        }
        let c    = self.map(center);
        let r    = self.len(radius);
        let half = (self.len(width) * 0.5).max(0.5);
        if let Some((x0, y0, x1, y1)) = self.device_box(c, Vec2::splat(r + half)) {
            for py in y0..=y1 {
                for px in x0..=x1 {
                    let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - c;
                    if (d.length() - r).abs() > half {
                        continue;
                    }
                    let rel = (d.y.atan2(d.x) - start).rem_euclid(TAU);
                    if sweep >= TAU || rel <= sweep {
                        self.plot(px, py, color, alpha);
                    }
                }
            }
        }
    }

    /// Even-odd scanline fill; `shade(x, y)` returns the color of each
    /// covered pixel in local (pre-zoom) coordinates.
    pub fn fill_polygon(&mut self, points: &[Vec2], alpha: f32, shade: impl Fn(f32, f32) -> u32) {
        if points.len() < 3 {
            return;
        }
        let pts: Vec<Vec2> = points.iter().map(|&p| self.map(p)).collect();
        let (min, max) = pts.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        let y0 = (min.y.floor() as i32).max(0);
        let y1 = (max.y.ceil() as i32).min(self.height as i32 - 1);
        let mut xs: Vec<f32> = Vec::with_capacity(pts.len());
        for py in y0..=y1 {
            let sy = py as f32 + 0.5;
            xs.clear();
            for i in 0..pts.len() {
                let a = pts[i];
                let b = pts[(i + 1) % pts.len()];
                if (a.y <= sy) != (b.y <= sy) {
                    xs.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for span in xs.chunks_exact(2) {
                let sx0 = (span[0].round() as i32).max(0);
                let sx1 = (span[1].round() as i32).min(self.width as i32);
                for px in sx0..sx1 {
                    let local = self.zoom.invert(Vec2::new(px as f32 + 0.5, sy));
                    let color = shade(local.x, local.y);
                    self.plot(px, py, color, alpha);
                }
            }
        }
    }

    /// Draw `bitmap` into a `size × size` square centred on `center`,
    /// rotated by `rotation` radians.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, center: Vec2, size: f32, rotation: f32, alpha: f32) {
        self.fill_quad_with(center, size, size, rotation, alpha, |u, v| bitmap.sample(u, v));
    }

    /// Rotated `w × h` quad centred on `center`; `color_at(u, v)` shades it
    /// from normalized quad coordinates.
    pub fn fill_quad_with(
        &mut self,
        center:   Vec2,
        w:        f32,
        h:        f32,
        rotation: f32,
        alpha:    f32,
        color_at: impl Fn(f32, f32) -> u32,
    ) {
        let c    = self.map(center);
        let half = Vec2::new(self.len(w), self.len(h)) * 0.5;
        if half.x <= 0.0 || half.y <= 0.0 {
            return;
        }
        let (sin, cos) = rotation.sin_cos();
        if let Some((x0, y0, x1, y1)) = self.device_box(c, Vec2::splat(half.length())) {
            for py in y0..=y1 {
                for px in x0..=x1 {
                    let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - c;
                    // Inverse rotation into the quad's own frame.
                    let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos);
                    if local.x.abs() <= half.x && local.y.abs() <= half.y {
                        let u = (local.x + half.x) / (2.0 * half.x);
                        let v = (local.y + half.y) / (2.0 * half.y);
                        self.plot(px, py, color_at(u, v), alpha);
                    }
                }
            }
        }
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Centred text whose glyphs are `height` pixels tall, rotated about
    /// the text centre.
    pub fn draw_text(&mut self, text: &str, center: Vec2, height: f32, rotation: f32, color: u32, alpha: f32) {
        let cell   = height / 5.0;
        let chars  = text.chars().count() as f32;
        let width  = chars * 4.0 * cell - cell;
        let origin = Vec2::new(-width / 2.0, -height / 2.0);
        let (sin, cos) = rotation.sin_cos();

        for (i, ch) in text.chars().enumerate() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) == 0 {
                        continue;
                    }
                    let local = origin + Vec2::new(
                        (i as f32 * 4.0 + col as f32 + 0.5) * cell,
                        (row as f32 + 0.5) * cell,
                    );
                    let rotated = Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos);
                    self.fill_rotated_rect(center + rotated, cell, cell, rotation, color, alpha);
                }
            }
        }
    }

    /// Small unscaled label (1 px per glyph cell), top-left anchored.
    pub fn draw_label(&mut self, text: &str, x: i32, y: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.plot(cx + col, y + row as i32, color, 1.0);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > self.width as i32 { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '\'' | '’' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b011, 0b000, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl(0.0, 1.0, 0.5),   0xFFFF0000);
        assert_eq!(hsl(120.0, 1.0, 0.5), 0xFF00FF00);
        assert_eq!(hsl(240.0, 1.0, 0.5), 0xFF0000FF);
        assert_eq!(hsl(0.0, 0.0, 1.0),   WHITE);
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(mix(BLACK, WHITE, 0.0), BLACK);
        assert_eq!(mix(BLACK, WHITE, 1.0), WHITE);
    }

    #[test]
    fn zoom_round_trips() {
        let z = Zoom::new(Vec2::new(100.0, 50.0), 0.5);
        let p = Vec2::new(180.0, 10.0);
        assert!((z.invert(z.apply(p)) - p).length() < 1e-4);
        assert_eq!(z.apply(z.center), z.center);
    }

    #[test]
    fn over_blend_half() {
        let mut c = Canvas::new(4, 4);
        c.plot(1, 1, WHITE, 0.5);
        let p = c.pixel(1, 1).unwrap();
        assert!(((p >> 16) & 0xFF) >= 127 && ((p >> 16) & 0xFF) <= 128);
    }

    #[test]
    fn lighter_blend_saturates() {
        let mut c = Canvas::new(2, 2);
        c.set_blend(BlendMode::Lighter);
        c.plot(0, 0, rgb(200, 0, 0), 1.0);
        c.plot(0, 0, rgb(200, 0, 0), 1.0);
        assert_eq!(c.pixel(0, 0), Some(rgb(255, 0, 0)));
    }

    #[test]
    fn plot_out_of_bounds_is_ignored() {
        let mut c = Canvas::new(2, 2);
        c.plot(-1, 0, WHITE, 1.0);
        c.plot(5, 5, WHITE, 1.0);
        assert!(c.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn circle_covers_centre_not_corner() {
        let mut c = Canvas::new(20, 20);
        c.fill_circle(Vec2::new(10.0, 10.0), 4.0, WHITE, 1.0);
        assert_eq!(c.pixel(10, 10), Some(WHITE));
        assert_eq!(c.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn zoom_scales_shapes() {
        let mut c = Canvas::new(40, 40);
        c.set_zoom(Zoom::new(Vec2::new(20.0, 20.0), 0.5));
        c.fill_rect(0.0, 0.0, 40.0, 40.0, WHITE, 1.0);
        assert_eq!(c.pixel(20, 20), Some(WHITE));
        assert_eq!(c.pixel(2, 2), Some(BLACK));
    }

    #[test]
    fn full_arc_is_a_ring() {
        let mut c = Canvas::new(40, 40);
        c.stroke_arc(Vec2::new(20.0, 20.0), 10.0, 0.0, TAU, 2.0, WHITE, 1.0);
        assert_eq!(c.pixel(20, 20), Some(BLACK));
        assert_eq!(c.pixel(30, 20), Some(WHITE));
    }

    #[test]
    fn quarter_arc_from_top() {
        let mut c = Canvas::new(40, 40);
        // Start at 12 o'clock, sweep a quarter turn clockwise.
        c.stroke_arc(Vec2::new(20.0, 20.0), 10.0, -TAU / 4.0, TAU / 4.0, 2.0, WHITE, 1.0);
        assert_eq!(c.pixel(27, 12), Some(WHITE));
        assert_eq!(c.pixel(12, 27), Some(BLACK));
    }

    #[test]
    fn polygon_fill_triangle() {
        let mut c = Canvas::new(20, 20);
        let tri = [Vec2::new(10.0, 1.0), Vec2::new(19.0, 19.0), Vec2::new(1.0, 19.0)];
        c.fill_polygon(&tri, 1.0, |_, _| WHITE);
        assert_eq!(c.pixel(10, 15), Some(WHITE));
        assert_eq!(c.pixel(1, 2), Some(BLACK));
    }

    #[test]
    fn bitmap_blit_samples_source() {
        let mut c = Canvas::new(20, 20);
        let bmp = Bitmap::solid(2, 2, rgb(0, 0, 255));
        c.draw_bitmap(&bmp, Vec2::new(10.0, 10.0), 8.0, 0.3, 1.0);
        assert_eq!(c.pixel(10, 10), Some(rgb(0, 0, 255)));
    }

    #[test]
    fn text_draws_something() {
        let mut c = Canvas::new(100, 40);
        c.draw_text("HI", Vec2::new(50.0, 20.0), 20.0, 0.0, WHITE, 1.0);
        assert!(c.pixels().iter().any(|&p| p == WHITE));
    }
}
