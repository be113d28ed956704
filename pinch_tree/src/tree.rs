//! Procedural pine tree.
//!
//! Everything here is a pure function of `(scale, time)`: the stage owns
//! the tree clock and calls [`draw_tree`] once per tick while tracking.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use crate::canvas::{hsl, mix, rgb, BlendMode, Canvas, BLACK, GOLD, WHITE};

pub const MAX_LAYERS:     usize = 15;
/// Below this scale nothing is drawn and the tree clock stands still.
pub const MIN_SCALE:      f32   = 0.05;
pub const TIME_STEP:      f32   = 0.02;
const TREE_HEIGHT:        f32   = 600.0;
const BASE_WIDTH:         f32   = 350.0;
const ORNAMENT_SCALE:     f32   = 0.4;
const SPIRAL_SCALE:       f32   = 0.6;
const STAR_SCALE:         f32   = 0.8;
const JAG_STEPS:          usize = 6;
const SPIRAL_LOOPS:       usize = 4;
const SPIRAL_PER_LOOP:    usize = 20;

const TRUNK:       u32 = rgb(0x2E, 0x1A, 0x0F);
const PINE_DARK:   u32 = rgb(0x00, 0x4D, 0x00);
const PINE_LIGHT:  u32 = rgb(0x2E, 0x8B, 0x57);
const STAR_CORE:   u32 = rgb(0xFF, 0xFF, 0xC8);
const STAR_RAY:    u32 = rgb(0xFF, 0xFA, 0xCD);
const BELL_CLAPPER: u32 = rgb(0xB8, 0x86, 0x0B);
const BAUBLE_COLORS: [u32; 4] = [
    rgb(0xFF, 0x00, 0x00),
    GOLD,
    rgb(0xFF, 0x69, 0xB4),
    rgb(0x00, 0xFF, 0xFF),
];

/// Number of pine layers shown at `scale`.
pub fn layer_count(scale: f32) -> usize {
    ((MAX_LAYERS as f32 * scale).floor() as usize).clamp(2, MAX_LAYERS)
}

/// Width of the layer at normalized height `progress`.
pub fn layer_width(scale: f32, progress: f32) -> f32 {
    BASE_WIDTH * scale * (1.0 - progress).max(0.0).powf(0.8)
}

/// Draw the tree rooted at `base` (trunk top centre).
pub fn draw_tree(canvas: &mut Canvas, base: Vec2, scale: f32, time: f32) {
    if scale < MIN_SCALE {
        return;
    }
    let height = TREE_HEIGHT * scale;
    let trunk_w = 40.0 * scale;
    canvas.fill_rect(base.x - trunk_w / 2.0, base.y, trunk_w, 50.0 * scale, TRUNK, 1.0);

    let layer_h = height / MAX_LAYERS as f32 * 1.5;
    for i in 0..layer_count(scale) {
        let progress = i as f32 / (MAX_LAYERS - 1) as f32;
        let at = Vec2::new(base.x, base.y - progress * height);
        draw_layer(canvas, at, layer_width(scale, progress), layer_h, i, scale, time);
    }

    if scale >= SPIRAL_SCALE {
        draw_spiral(canvas, base, height, scale, time);
    }

    if let Some(top) = star_position(base, scale) {
        draw_star(canvas, top, time, 1.0);
    }
}

/// Where the tree-top star sits, if the tree is grown enough to carry one.
pub fn star_position(base: Vec2, scale: f32) -> Option<Vec2> {
    (scale > STAR_SCALE).then(|| Vec2::new(base.x, base.y - TREE_HEIGHT * scale))
}

fn draw_layer(canvas: &mut Canvas, at: Vec2, width: f32, height: f32, index: usize, scale: f32, time: f32) {
    let sway = (time + index as f32 * 0.5).sin() * 5.0 * scale * (index as f32 / 10.0);
    let x = at.x + sway;
    let outline = pine_outline(Vec2::new(x, at.y), width, height);

    let left = x - width / 2.0;
    canvas.fill_polygon(&outline, 1.0, |px, _| {
        let u = if width > 0.0 { (px - left) / width } else { 0.5 };
        mix(PINE_DARK, PINE_LIGHT, 1.0 - (2.0 * u - 1.0).abs())
    });

    let flow = (time * 2.0 + index as f32) % 10.0;
    if flow < 3.0 {
        let alpha = 0.5 - (1.5 - flow).abs() / 3.0;
        for k in 0..outline.len() {
            let next = outline[(k + 1) % outline.len()];
            canvas.stroke_line(outline[k], next, 2.0, WHITE, alpha);
        }
    }

    if scale > ORNAMENT_SCALE {
        draw_ornaments(canvas, Vec2::new(x, at.y), width, height, index);
    }
}

/// Jagged pine silhouette: apex, saw-tooth right edge, sagging bottom,
/// saw-tooth left edge.
fn pine_outline(at: Vec2, width: f32, height: f32) -> Vec<Vec2> {
    let top    = at.y - height * 0.8;
    let bottom = at.y + height * 0.2;
    let step_h = height / JAG_STEPS as f32 * 0.5;
    let step_w = width / JAG_STEPS as f32 * 0.3;

    let mut pts = Vec::with_capacity(JAG_STEPS * 4 + 8);
    pts.push(Vec2::new(at.x, top));
    for s in 1..=JAG_STEPS {
        let t = s as f32 / JAG_STEPS as f32;
        let y = top + (bottom - top) * t;
        let x = at.x + width / 2.0 * t;
        pts.push(Vec2::new(x, y - step_h));
        pts.push(Vec2::new(x - step_w, y));
    }
    // Bottom sag through a quadratic towards the left corner.
    let from = *pts.last().unwrap_or(&at);
    let ctrl = Vec2::new(at.x, bottom + height * 0.2);
    let to   = Vec2::new(at.x - width / 2.0, bottom);
    for k in 1..=6 {
        pts.push(quad_point(from, ctrl, to, k as f32 / 6.0));
    }
    for s in (1..=JAG_STEPS).rev() {
        let t = s as f32 / JAG_STEPS as f32;
        let y = top + (bottom - top) * t;
        let x = at.x - width / 2.0 * t;
        pts.push(Vec2::new(x + step_w, y));
        pts.push(Vec2::new(x, y - step_h));
    }
    pts
}

pub(crate) fn quad_point(a: Vec2, ctrl: Vec2, b: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    a * (u * u) + ctrl * (2.0 * u * t) + b * (t * t)
}

fn draw_ornaments(canvas: &mut Canvas, at: Vec2, width: f32, height: f32, layer: usize) {
    let count = 2 + layer % 3;
    for k in 0..count {
        let offset = (k + 1) as f32 / (count + 1) as f32;
        let pos = Vec2::new(
            at.x - width / 2.0 + width * offset,
            at.y + (offset * PI).sin() * height * 0.3,
        );
        match (layer + k) % 3 {
            0 => draw_bauble(canvas, pos, 6.0, BAUBLE_COLORS[layer % 4]),
            1 => draw_bell(canvas, pos, 8.0),
            _ => {}
        }
    }
}

fn draw_bauble(canvas: &mut Canvas, pos: Vec2, r: f32, color: u32) {
    canvas.fill_circle(pos, r, mix(color, BLACK, 0.4), 1.0);
    canvas.fill_circle(pos, r * 0.75, color, 1.0);
    canvas.fill_circle(pos - Vec2::splat(r / 3.0), r / 4.0, WHITE, 0.9);
    canvas.with_blend(BlendMode::Lighter, |c| c.fill_glow(pos, r * 1.5, color, 0.6));
}

fn draw_bell(canvas: &mut Canvas, pos: Vec2, size: f32) {
    let body = [
        pos - Vec2::new(0.0, size),
        pos + Vec2::new(size * 0.5, 0.0),
        pos + Vec2::new(size, size),
        pos + Vec2::new(-size, size),
        pos + Vec2::new(-size * 0.5, 0.0),
    ];
    canvas.fill_polygon(&body, 1.0, |_, _| GOLD);
    canvas.fill_circle(pos + Vec2::new(0.0, size), size / 3.0, BELL_CLAPPER, 1.0);
}

fn draw_spiral(canvas: &mut Canvas, base: Vec2, height: f32, scale: f32, time: f32) {
    let total = SPIRAL_LOOPS * SPIRAL_PER_LOOP;
    canvas.with_blend(BlendMode::Lighter, |c| {
        for i in 0..total {
            let progress = i as f32 / total as f32;
            let angle = progress * PI * 8.0 + time;
            // Bulbs on the far side of the trunk are hidden.
            if angle.sin() < -0.5 {
                continue;
            }
            let width = BASE_WIDTH * scale * (1.0 - progress) * 0.5;
            let pos   = Vec2::new(base.x + angle.cos() * width, base.y - progress * height);
            let blink = (time * 5.0 + i as f32).sin() > 0.0;
            let color = hsl((i * 20 % 360) as f32, 1.0, 0.6);
            let size  = if blink { 6.0 } else { 2.0 };
            c.fill_glow(pos, size * 2.0, color, 1.0);
            if blink {
                c.fill_glow(pos, size, WHITE, 0.8);
            }
        }
    });
}

/// Eight-ray rotating star with a double glow. `alpha` fades the whole star.
pub fn draw_star(canvas: &mut Canvas, pos: Vec2, time: f32, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    canvas.fill_glow(pos, 40.0, STAR_CORE, alpha);
    canvas.fill_glow(pos, 40.0, GOLD, alpha * 0.5);

    let reach = 15.0 + (time * 10.0).sin() * 5.0;
    let spin  = time * 0.5;
    for k in 0..8 {
        let a   = spin + (k + 1) as f32 * TAU / 8.0;
        let dir = Vec2::new(a.cos(), a.sin());
        let nrm = dir.perp();
        let ray = [
            pos - nrm * 10.0,
            pos + dir * 2.0 - nrm * 2.0,
            pos + dir * reach,
            pos + dir * 2.0 + nrm * 2.0,
            pos + nrm * 10.0,
            pos - dir * 2.0 + nrm * 2.0,
            pos - dir * reach,
            pos - dir * 2.0 - nrm * 2.0,
        ];
        canvas.fill_polygon(&ray, alpha, |_, _| STAR_RAY);
    }

    canvas.with_blend(BlendMode::Lighter, |c| c.fill_glow(pos, 60.0, WHITE, alpha * 0.5));
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Vec2 = Vec2::new(640.0, 620.0);

    #[test]
    fn layer_count_bounds() {
        assert_eq!(layer_count(0.0), 2);
        assert_eq!(layer_count(0.1), 2);
        assert_eq!(layer_count(0.5), 7);
        assert_eq!(layer_count(1.0), 15);
    }

    #[test]
    fn layers_taper_to_the_top() {
        let widths: Vec<f32> = (0..MAX_LAYERS)
            .map(|i| layer_width(1.0, i as f32 / (MAX_LAYERS - 1) as f32))
            .collect();
        assert_eq!(widths[0], 350.0);
        assert_eq!(widths[MAX_LAYERS - 1], 0.0);
        assert!(widths.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn tiny_scale_draws_nothing() {
        let mut c = Canvas::new(1280, 720);
        draw_tree(&mut c, BASE, 0.04, 0.0);
        assert!(c.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn star_only_near_full_growth() {
        assert_eq!(star_position(BASE, 0.8), None);
        let star = star_position(BASE, 0.81);
        assert_eq!(star, Some(Vec2::new(640.0, 620.0 - 600.0 * 0.81)));
    }

    #[test]
    fn trunk_is_drawn() {
        let mut c = Canvas::new(1280, 720);
        draw_tree(&mut c, BASE, 0.5, 0.0);
        assert_eq!(c.pixel(640, 630), Some(TRUNK));
    }

    #[test]
    fn outline_is_closed_and_symmetric() {
        let pts = pine_outline(Vec2::new(100.0, 100.0), 60.0, 40.0);
        assert_eq!(pts[0], Vec2::new(100.0, 100.0 - 32.0));
        let xs: Vec<f32> = pts.iter().map(|p| p.x).collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((100.0 - min - (max - 100.0)).abs() < 1e-3);
    }

    #[test]
    fn quad_point_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(5.0, 10.0);
        assert_eq!(quad_point(a, c, b, 0.0), a);
        assert_eq!(quad_point(a, c, b, 1.0), b);
        assert_eq!(quad_point(a, c, b, 0.5), Vec2::new(5.0, 5.0));
    }
}
