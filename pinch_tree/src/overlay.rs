//! Screen-space overlays drawn on top of the scene: the hand
//! constellation, the hold ring, the lyric caption, the music bar and the
//! photo viewer.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

use lyric_sync::Caption;
use pinch_signal::{HandLandmarks, Landmark, FINGERTIPS, HAND_CONNECTIONS, INDEX_TIP, THUMB_TIP};

use crate::audio::PlayerStatus;
use crate::canvas::{mix, rgb, BlendMode, Bitmap, Canvas, BLACK, GOLD, WHITE};
use crate::tree::quad_point;

const CONSTELLATION: u32 = rgb(100, 255, 218);
const LEMON:         u32 = rgb(0xFF, 0xFA, 0xCD);
const BAR_TRACK:     u32 = rgb(0x33, 0x33, 0x44);
/// Pinch distance at which the energy arc fades out completely.
const ENERGY_RANGE:  f32 = 0.3;

fn to_screen(lm: Landmark, viewport: Vec2) -> Vec2 {
    Vec2::new(lm.x * viewport.x, lm.y * viewport.y)
}

// ════════════════════════════════════════════════════════════════════════════
// Hand
// ════════════════════════════════════════════════════════════════════════════

/// Faint skeleton lines, white joints and pulsing gold fingertips.
pub fn draw_hand(canvas: &mut Canvas, hand: &HandLandmarks, viewport: Vec2, time: f32) {
    for &(a, b) in &HAND_CONNECTIONS {
        let from = to_screen(hand.joint(a), viewport);
        let to   = to_screen(hand.joint(b), viewport);
        canvas.stroke_line(from, to, 1.0, CONSTELLATION, 0.15);
    }
    for (i, lm) in hand.joints().iter().enumerate() {
        let p = to_screen(*lm, viewport);
        if FINGERTIPS.contains(&i) {
            let r = 4.0 + (time * 5.0 + i as f32).sin() * 2.0;
            canvas.with_blend(BlendMode::Lighter, |c| c.fill_glow(p, r + 10.0, GOLD, 0.5));
            canvas.fill_circle(p, r, GOLD, 1.0);
        } else {
            canvas.fill_circle(p, 2.0, WHITE, 0.6);
        }
    }
}

/// Opacity of the thumb–index energy arc for a pinch distance.
pub fn energy_opacity(pinch_distance: f32) -> f32 {
    (1.0 - pinch_distance / ENERGY_RANGE).max(0.0)
}

/// Random offset of the arc's bend, redrawn every tick for a crackle.
pub fn energy_jitter(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.gen_range(-2.5..2.5), rng.gen_range(-2.5..2.5))
}

/// Gold arc between thumb and index tips, stronger as they close.
pub fn draw_energy(canvas: &mut Canvas, hand: &HandLandmarks, viewport: Vec2, jitter: Vec2) {
    let opacity = energy_opacity(hand.pinch_distance());
    if opacity <= 0.01 {
        return;
    }
    let a = to_screen(hand.joint(THUMB_TIP), viewport);
    let b = to_screen(hand.joint(INDEX_TIP), viewport);
    let mid = (a + b) / 2.0 + jitter;
    let width = 2.0 + opacity * 3.0;
    canvas.with_blend(BlendMode::Lighter, |c| {
        let mut prev = a;
        for k in 1..=12 {
            let next = quad_point(a, mid, b, k as f32 / 12.0);
            c.stroke_line(prev, next, width, GOLD, opacity);
            prev = next;
        }
    });
}

// ════════════════════════════════════════════════════════════════════════════
// Hold ring
// ════════════════════════════════════════════════════════════════════════════

/// Progress ring filling clockwise from 12 o'clock as the hold charges.
pub fn draw_hold_ring(canvas: &mut Canvas, center: Vec2, progress: f32) {
    let progress = progress.clamp(0.0, 1.0);
    if progress <= 0.0 {
        return;
    }
    let sweep = TAU * progress;
    canvas.stroke_arc(center, 60.0, -FRAC_PI_2, sweep, 15.0, GOLD, 0.3 * progress);
    canvas.stroke_arc(center, 60.0, -FRAC_PI_2, sweep, 8.0, GOLD, progress);
}

// ════════════════════════════════════════════════════════════════════════════
// Caption
// ════════════════════════════════════════════════════════════════════════════

const CAPTION_HEIGHT: f32 = 30.0;

/// Lyric line centred on `anchor`, posed by its animation phase.
pub fn draw_caption(canvas: &mut Canvas, caption: &Caption<'_>, anchor: Vec2) {
    let pose  = caption.pose;
    let alpha = pose.opacity.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let pos    = anchor + Vec2::new(0.0, pose.y_offset);
    let height = CAPTION_HEIGHT * pose.scale;
    let text   = caption.text;

    // Pulsing golden halo.
    let halo = 15.0 + (caption.elapsed as f32 * 3.0).sin() * 5.0;
    canvas.with_blend(BlendMode::Lighter, |c| {
        for k in 0..8 {
            let a = k as f32 * TAU / 8.0;
            let off = Vec2::new(a.cos(), a.sin()) * halo * 0.2;
            c.draw_text(text, pos + off, height, pose.rotation, GOLD, alpha * 0.08);
        }
    });

    // Blur as spread copies.
    if pose.blur > 0.5 {
        for off in [Vec2::X, -Vec2::X, Vec2::Y, -Vec2::Y] {
            canvas.draw_text(text, pos + off * pose.blur * 0.5, height, pose.rotation, LEMON, alpha * 0.25);
        }
        canvas.draw_text(text, pos, height, pose.rotation, WHITE, alpha * 0.5);
    } else {
        canvas.draw_text(text, pos, height, pose.rotation, mix(WHITE, LEMON, 0.5), alpha);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Music bar
// ════════════════════════════════════════════════════════════════════════════

fn text_left(canvas: &mut Canvas, text: &str, left: Vec2, height: f32, color: u32, alpha: f32) {
    let cell  = height / 5.0;
    let width = text.chars().count() as f32 * 4.0 * cell - cell;
    canvas.draw_text(text, left + Vec2::new(width / 2.0, 0.0), height, 0.0, color, alpha);
}

/// Play state, progress bar and `m:ss / m:ss` in the bottom-left corner.
pub fn draw_player(canvas: &mut Canvas, status: &PlayerStatus) {
    let y      = canvas.size().y - 24.0;
    let origin = Vec2::new(20.0, y);
    let icon   = if status.playing { "||" } else { ">" };
    text_left(canvas, icon, origin, 10.0, GOLD, 0.9);

    let bar_x = 50.0;
    let bar_w = 200.0;
    canvas.fill_rect(bar_x, y - 2.0, bar_w, 4.0, BAR_TRACK, 0.8);
    canvas.fill_rect(bar_x, y - 2.0, bar_w * status.progress(), 4.0, GOLD, 0.9);

    text_left(canvas, &status.label(), Vec2::new(bar_x + bar_w + 14.0, y), 10.0, WHITE, 0.8);
}

/// Small top-left label, e.g. the current phase.
pub fn draw_tag(canvas: &mut Canvas, text: &str) {
    text_left(canvas, text, Vec2::new(16.0, 18.0), 10.0, CONSTELLATION, 0.6);
}

// ════════════════════════════════════════════════════════════════════════════
// Photo viewer
// ════════════════════════════════════════════════════════════════════════════

/// Size that fits `bitmap` into `bounds` keeping its aspect ratio.
pub fn fit_size(bitmap: &Bitmap, bounds: Vec2) -> Vec2 {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Vec2::ZERO;
    }
    let native = Vec2::new(bitmap.width as f32, bitmap.height as f32);
    native * (bounds.x / native.x).min(bounds.y / native.y)
}

/// Full-screen dimmed view of one photo in a gold frame.
pub fn draw_viewer(canvas: &mut Canvas, bitmap: &Bitmap) {
    let view = canvas.size();
    canvas.fill_rect(0.0, 0.0, view.x, view.y, BLACK, 0.85);
    let center = view / 2.0;
    let size   = fit_size(bitmap, view * 0.8);
    canvas.fill_rotated_rect(center, size.x + 16.0, size.y + 16.0, 0.0, GOLD, 1.0);
    canvas.fill_quad_with(center, size.x, size.y, 0.0, 1.0, |u, v| bitmap.sample(u, v));
    text_left(canvas, "click to close", Vec2::new(center.x - 55.0, view.y - 30.0), 10.0, WHITE, 0.6);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
