//! Radial explosion burst.
//!
//! All particles spawn at one point with a random heading, speed in
//! `[2, 12]` and decay in `[0.01, 0.03]` life per tick; gravity pulls them
//! down while they fade. The burst is over the tick the last one dies.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::arena::Arena;
use crate::canvas::{hsl, rgb, BlendMode, Canvas};

pub const BURST_COUNT: usize = 300;
pub const GRAVITY:     f32   = 0.1;
pub const MIN_SPEED:   f32   = 2.0;
pub const MAX_SPEED:   f32   = 12.0;
pub const MIN_DECAY:   f32   = 0.01;
pub const MAX_DECAY:   f32   = 0.03;
const RADIUS:          f32   = 3.0;
const AQUA:            u32   = rgb(0x64, 0xFF, 0xDA);

#[derive(Clone, Debug, PartialEq)]
pub struct BurstParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color:    u32,
    /// 1.0 at spawn, strictly decreasing; removed at `<= 0`.
    pub life:     f32,
    pub decay:    f32,
}

impl BurstParticle {
    pub fn spawn(origin: Vec2, rng: &mut impl Rng) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(MIN_SPEED..=MAX_SPEED);
        let color = if rng.gen_bool(0.7) {
            hsl(rng.gen_range(40.0..100.0), 1.0, 0.7)
        } else {
            AQUA
        };
        BurstParticle {
            position: origin,
            velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            life:     1.0,
            decay:    rng.gen_range(MIN_DECAY..=MAX_DECAY),
        }
    }

    /// One integration step. Returns `false` once the particle has expired.
    pub fn step(&mut self, gravity: f32) -> bool {
        self.position   += self.velocity;
        self.velocity.y += gravity;
        self.life       -= self.decay;
        self.life > 0.0
    }
}

/// What happened to the burst during one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstStatus {
    /// Nothing was alive before the update.
    Idle,
    /// Particles are still alive.
    Burning,
    /// The last particle died this tick.
    Depleted,
}

#[derive(Debug, Default)]
pub struct BurstSystem {
    particles: Arena<BurstParticle>,
}

impl BurstSystem {
    pub fn new() -> Self {
        BurstSystem { particles: Arena::with_capacity(BURST_COUNT) }
    }

    pub fn trigger(&mut self, origin: Vec2, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            self.particles.insert(BurstParticle::spawn(origin, rng));
        }
        log::debug!("[burst] spawned {} particles at ({:.0}, {:.0})", count, origin.x, origin.y);
    }

    pub fn update(&mut self) -> BurstStatus {
        if self.particles.is_empty() {
            return BurstStatus::Idle;
        }
        self.particles.retain_mut(|p| p.step(GRAVITY));
        if self.particles.is_empty() {
            BurstStatus::Depleted
        } else {
            BurstStatus::Burning
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.with_blend(BlendMode::Lighter, |c| {
            for p in self.particles.iter() {
                c.fill_circle(p.position, RADIUS, p.color, p.life);
            }
        });
    }

    pub fn len(&self)      -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool  { self.particles.is_empty() }

    pub fn particles(&self) -> impl Iterator<Item = &BurstParticle> {
        self.particles.iter()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
