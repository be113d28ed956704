//! Decorative layers composited every frame regardless of phase: falling
//! snow, magic dust shed while the hold ring charges, and star sparkles.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::arena::Arena;
use crate::canvas::{hsl, BlendMode, Canvas, WHITE};

// ════════════════════════════════════════════════════════════════════════════
// Snow
// ════════════════════════════════════════════════════════════════════════════

/// Size / speed / opacity band for one depth layer of snow.
#[derive(Clone, Copy, Debug)]
pub struct SnowLayer {
    pub count:     usize,
    pub min_size:  f32,
    pub max_size:  f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub opacity:   f32,
}

/// Back (many, small, slow), middle, front (few, large, fast).
pub const SNOW_LAYERS: [SnowLayer; 3] = [
    SnowLayer { count: 100, min_size: 1.0, max_size: 2.0, min_speed: 0.2, max_speed: 0.5, opacity: 0.3 },
    SnowLayer { count: 50,  min_size: 2.0, max_size: 4.0, min_speed: 0.5, max_speed: 1.0, opacity: 0.6 },
    SnowLayer { count: 20,  min_size: 4.0, max_size: 6.0, min_speed: 1.0, max_speed: 2.0, opacity: 0.9 },
];

#[derive(Clone, Debug)]
pub struct Flake {
    pub pos:        Vec2,
    pub size:       f32,
    pub fall_speed: f32,
    pub sway_speed: f32,
    pub sway_phase: f32,
    pub opacity:    f32,
}

#[derive(Debug)]
pub struct Snowfall {
    flakes: Vec<Flake>,
    bounds: Vec2,
}

impl Snowfall {
    pub fn new(bounds: Vec2, rng: &mut impl Rng) -> Self {
        let mut flakes = Vec::with_capacity(SNOW_LAYERS.iter().map(|l| l.count).sum());
        for layer in &SNOW_LAYERS {
            for _ in 0..layer.count {
                flakes.push(Flake {
                    pos:        Vec2::new(rng.gen_range(0.0..bounds.x), rng.gen_range(0.0..bounds.y)),
                    size:       rng.gen_range(layer.min_size..layer.max_size),
                    fall_speed: rng.gen_range(layer.min_speed..layer.max_speed),
                    sway_speed: rng.gen_range(0.01..0.06),
                    sway_phase: rng.gen_range(0.0..TAU),
                    opacity:    layer.opacity,
                });
            }
        }
        Snowfall { flakes, bounds }
    }

    pub fn update(&mut self, time: f32, rng: &mut impl Rng) {
        let Vec2 { x: w, y: h } = self.bounds;
        for f in &mut self.flakes {
            f.pos.y += f.fall_speed;
            f.pos.x += (time * f.sway_speed + f.sway_phase).sin() * 0.5;
            if f.pos.y > h {
                f.pos.y = -10.0;
                f.pos.x = rng.gen_range(0.0..w);
            }
            if f.pos.x > w   { f.pos.x = 0.0; }
            if f.pos.x < 0.0 { f.pos.x = w; }
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for f in &self.flakes {
            canvas.fill_glow(f.pos, f.size, WHITE, f.opacity);
        }
    }

    pub fn flakes(&self) -> &[Flake] { &self.flakes }
}

// ════════════════════════════════════════════════════════════════════════════
// Magic dust
// ════════════════════════════════════════════════════════════════════════════

const DUST_HUES: [f32; 4] = [50.0, 180.0, 300.0, 0.0];

#[derive(Clone, Debug)]
pub struct Mote {
    pub pos:   Vec2,
    pub vel:   Vec2,
    pub size:  f32,
    pub life:  f32,
    pub color: u32,
}

impl Mote {
    fn spawn(pos: Vec2, rng: &mut impl Rng) -> Self {
        let hue = *DUST_HUES.choose(rng).unwrap_or(&0.0);
        // Hue 0 is the white mote.
        let sat = if hue == 0.0 { 0.0 } else { 1.0 };
        Mote {
            pos,
            vel:   Vec2::new(rng.gen_range(-0.75..0.75), rng.gen_range(-0.75..0.75) - 0.5),
            size:  rng.gen_range(0.0..3.0),
            life:  1.0,
            color: hsl(hue, sat, 0.8),
        }
    }

    fn step(&mut self) -> bool {
        self.pos   += self.vel;
        self.vel.y -= 0.02;
        self.life  -= 0.015;
        self.size  *= 0.95;
        self.life > 0.0
    }
}

#[derive(Debug, Default)]
pub struct MagicDust {
    motes: Arena<Mote>,
}

impl MagicDust {
    pub fn emit(&mut self, pos: Vec2, rng: &mut impl Rng) {
        self.motes.insert(Mote::spawn(pos, rng));
    }

    pub fn update(&mut self) {
        self.motes.retain_mut(Mote::step);
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for m in self.motes.iter() {
            canvas.fill_glow(m.pos, m.size + 5.0, m.color, m.life * 0.5);
            canvas.fill_circle(m.pos, m.size, m.color, m.life);
        }
    }

    pub fn len(&self)      -> usize { self.motes.len() }
    pub fn is_empty(&self) -> bool  { self.motes.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// Sparkles
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct Sparkle {
    pub pos:      Vec2,
    pub color:    u32,
    pub phase:    f32,
    pub speed:    f32,
    pub max_size: f32,
}

impl Sparkle {
    /// Twinkle brightness in `[0, 1]`.
    pub fn brightness(&self) -> f32 {
        (self.phase.sin() + 1.0) / 2.0
    }
}

#[derive(Debug, Default)]
pub struct Sparkles {
    items: Vec<Sparkle>,
}

impl Sparkles {
    pub fn spawn(&mut self, pos: Vec2, color: u32, rng: &mut impl Rng) {
        self.items.push(Sparkle {
            pos,
            color,
            phase:    rng.gen_range(0.0..TAU),
            speed:    rng.gen_range(0.05..0.1),
            max_size: rng.gen_range(3.0..5.0),
        });
    }

    /// Advance twinkles; a sparkle lives until its phase passes two turns.
    pub fn update(&mut self) {
        for s in &mut self.items {
            s.phase += s.speed;
        }
        self.items.retain(|s| s.phase <= 4.0 * PI);
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for s in &self.items {
            let alpha = s.brightness();
            canvas.fill_glow(s.pos, s.max_size * 2.0, s.color, alpha);
            canvas.fill_circle(s.pos, s.max_size * 0.4, WHITE, alpha);
            let len = s.max_size * alpha * 3.0;
            canvas.stroke_line(s.pos - Vec2::X * len, s.pos + Vec2::X * len, 1.0, WHITE, alpha);
            canvas.stroke_line(s.pos - Vec2::Y * len, s.pos + Vec2::Y * len, 1.0, WHITE, alpha);
        }
    }

    pub fn len(&self)      -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool  { self.items.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// AmbientLayers
// ════════════════════════════════════════════════════════════════════════════

/// Every decorative layer, updated and drawn together.
#[derive(Debug)]
pub struct AmbientLayers {
    pub snow:     Snowfall,
    pub dust:     MagicDust,
    pub sparkles: Sparkles,
}

impl AmbientLayers {
    pub fn new(bounds: Vec2, rng: &mut impl Rng) -> Self {
        AmbientLayers {
            snow:     Snowfall::new(bounds, rng),
            dust:     MagicDust::default(),
            sparkles: Sparkles::default(),
        }
    }

    pub fn update(&mut self, time: f32, rng: &mut impl Rng) {
        self.snow.update(time, rng);
        self.dust.update();
        self.sparkles.update();
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        self.snow.draw(canvas);
        self.dust.draw(canvas);
        canvas.with_blend(BlendMode::Lighter, |c| self.sparkles.draw(c));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
