//! Rotating 3D photo cloud.
//!
//! Photos ride a rising spiral around a cone whose radius grows with height
//! as `h^0.8 · max_radius + inner_offset`; lights fill the cone's volume.
//! Every tick the whole cloud turns about the vertical axis, each particle
//! bobs on its own phase, then everything is perspective-projected,
//! depth-sorted farthest-first and hit-tested against the pointer.
//!
//! The entrance (opacity, zoom about the cloud centre, rise from below) is
//! one transform applied to the whole cloud via [`Zoom`].

use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::time::Duration;

use crate::canvas::{mix, rgb, BlendMode, Bitmap, Canvas, Zoom, GOLD, WHITE};

// ════════════════════════════════════════════════════════════════════════════
// GalleryConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub photo_count:    usize,
    pub light_count:    usize,
    /// Cone height in world units, centred on y = 0.
    pub height:         f32,
    pub max_radius:     f32,
    pub inner_offset:   f32,
    /// Lights may sit this far outside the photo spiral.
    pub light_margin:   f32,
    pub focal_length:   f32,
    pub depth_offset:   f32,
    /// Particles whose adjusted depth falls below this are culled.
    pub cull_depth:     f32,
    /// Radians added to the shared rotation every tick.
    pub rotation_step:  f32,
    pub entrance:       Duration,
    pub rise:           f32,
    pub hover_scale:    f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            photo_count:   150,
            light_count:   600,
            height:        700.0,
            max_radius:    300.0,
            inner_offset:  20.0,
            light_margin:  40.0,
            focal_length:  400.0,
            depth_offset:  400.0,
            cull_depth:    1.0,
            rotation_step: 0.005,
            entrance:      Duration::from_millis(4000),
            rise:          150.0,
            hover_scale:   1.3,
        }
    }
}

impl GalleryConfig {
    /// Cone radius at normalized height `h` (0 = bottom, 1 = top).
    pub fn radius_at(&self, h: f32) -> f32 {
        h.clamp(0.0, 1.0).powf(0.8) * self.max_radius + self.inner_offset
    }
}

const FLOAT_SPEED:     f32 = 1.5;
const FLOAT_AMPLITUDE: f32 = 8.0;
const FLASH_CHANCE:    f64 = 0.02;

const FRAME:       u32 = rgb(0xB8, 0x86, 0x0B);
const FRAME_HOVER: u32 = rgb(0xFF, 0xFA, 0xCD);
const MOUNT:       u32 = rgb(0xFF, 0xF8, 0xDC);
const EMPTY_PHOTO: u32 = rgb(0x22, 0x22, 0x22);

const LIGHT_COLORS: [u32; 3] = [GOLD, rgb(0xFF, 0x00, 0x00), WHITE];

// ════════════════════════════════════════════════════════════════════════════
// Particles
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub screen: Vec2,
    pub size:   f32,
    /// `z + depth_offset`; larger is farther from the camera.
    pub depth:  f32,
}

impl Projection {
    /// Whether `p` lies inside the projected square box.
    pub fn contains(&self, p: Vec2) -> bool {
        let half = self.size / 2.0;
        (p - self.screen).abs().cmple(Vec2::splat(half)).all()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CloudKind {
    /// Index into the photo library, `None` when no photos were loaded.
    Photo { image: Option<usize> },
    Light { color: u32, twinkle_speed: f32, twinkle_phase: f32, flash: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CloudParticle {
    pub kind:        CloudKind,
    pub base:        Vec3,
    pub current:     Vec3,
    pub base_size:   f32,
    pub spin:        f32,
    pub spin_speed:  f32,
    pub float_phase: f32,
    pub projected:   Option<Projection>,
}

impl CloudParticle {
    /// Particle with no spin and zero float phase.
    pub fn new(kind: CloudKind, base: Vec3, base_size: f32) -> Self {
        CloudParticle {
            kind,
            base,
            current:     base,
            base_size,
            spin:        0.0,
            spin_speed:  0.0,
            float_phase: 0.0,
            projected:   None,
        }
    }

    pub fn is_photo(&self) -> bool {
        matches!(self.kind, CloudKind::Photo { .. })
    }

    pub fn image(&self) -> Option<usize> {
        match self.kind {
            CloudKind::Photo { image } => image,
            CloudKind::Light { .. }    => None,
        }
    }

    fn photo(index: usize, image_count: usize, cfg: &GalleryConfig, rng: &mut impl Rng) -> Self {
        let h     = index as f32 / cfg.photo_count.max(1) as f32;
        let y     = h * cfg.height - cfg.height / 2.0 + rng.gen_range(-10.0..10.0);
        let angle = h * PI * 20.0 + rng.gen_range(-0.25..0.25);
        let r     = cfg.radius_at(h);
        let base  = Vec3::new(
            angle.cos() * r + rng.gen_range(-15.0..15.0),
            y,
            angle.sin() * r + rng.gen_range(-15.0..15.0),
        );
        let image = (image_count > 0).then(|| index % image_count);
        Self::randomized(CloudKind::Photo { image }, base, rng.gen_range(40.0..70.0), rng)
    }

    fn light(cfg: &GalleryConfig, rng: &mut impl Rng) -> Self {
        let h     = rng.gen::<f32>();
        let theta = rng.gen_range(0.0..TAU);
        // sqrt for area-uniform density across the disc at this height.
        let r     = rng.gen::<f32>().sqrt() * (cfg.radius_at(h) + cfg.light_margin);
        let base  = Vec3::new(theta.cos() * r, h * cfg.height - cfg.height / 2.0, theta.sin() * r);
        let color = if rng.gen_bool(0.5) {
            LIGHT_COLORS[0]
        } else if rng.gen_bool(0.5) {
            LIGHT_COLORS[1]
        } else {
            LIGHT_COLORS[2]
        };
        let kind = CloudKind::Light {
            color,
            twinkle_speed: rng.gen_range(2.0..7.0),
            twinkle_phase: rng.gen_range(0.0..TAU),
            flash:         false,
        };
        Self::randomized(kind, base, rng.gen_range(5.0..15.0), rng)
    }

    fn randomized(kind: CloudKind, base: Vec3, base_size: f32, rng: &mut impl Rng) -> Self {
        CloudParticle {
            spin:        rng.gen_range(0.0..TAU),
            spin_speed:  rng.gen_range(-0.005..0.005),
            float_phase: rng.gen_range(0.0..TAU),
            ..Self::new(kind, base, base_size)
        }
    }

    /// Rotate the base position about the vertical axis and add the float.
    fn place(&mut self, rotation: f32, t: f32) {
        let (sin, cos) = rotation.sin_cos();
        self.current = Vec3::new(
            self.base.x * cos - self.base.z * sin,
            self.base.y + (t * FLOAT_SPEED + self.float_phase).sin() * FLOAT_AMPLITUDE,
            self.base.x * sin + self.base.z * cos,
        );
    }

    fn project(&mut self, center: Vec2, cfg: &GalleryConfig) {
        let depth = self.current.z + cfg.depth_offset;
        self.projected = (depth >= cfg.cull_depth).then(|| {
            let s = cfg.focal_length / depth;
            Projection {
                screen: center + Vec2::new(self.current.x, self.current.y) * s,
                size:   self.base_size * s,
                depth,
            }
        });
    }

    /// Fade with distance; far particles never drop below 0.1.
    pub fn distance_alpha(&self) -> f32 {
        ((self.current.z + 200.0) / 400.0).clamp(0.1, 1.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Entrance
// ════════════════════════════════════════════════════════════════════════════

/// Whole-cloud transform during the entrance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntrancePose {
    pub progress: f32,
    pub opacity:  f32,
    pub scale:    f32,
    pub rise:     f32,
}

impl EntrancePose {
    /// Ease-out quartic over `total`; exactly settled once `elapsed >= total`.
    pub fn at(elapsed: Duration, total: Duration, rise: f32) -> Self {
        let t = if elapsed >= total || total.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / total.as_secs_f32()
        };
        let p = 1.0 - (1.0 - t).powi(4);
        EntrancePose {
            progress: p,
            opacity:  p,
            scale:    0.5 + 0.5 * p,
            rise:     (1.0 - p) * rise,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GalleryCloud
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct GalleryCloud {
    config:     GalleryConfig,
    viewport:   Vec2,
    particles:  Vec<CloudParticle>,
    /// Indices of non-culled particles, farthest first.
    draw_order: Vec<usize>,
    rotation:   f32,
    entered_at: Duration,
    /// Seconds since entry, for float and twinkle.
    clock:      f32,
    entrance:   EntrancePose,
    center:     Vec2,
    hovered:    Option<usize>,
}

impl GalleryCloud {
    /// Build the cloud on GALLERY entry. Photo `i` shows image `i % image_count`.
    pub fn build(
        config:      GalleryConfig,
        viewport:    Vec2,
        image_count: usize,
        entered_at:  Duration,
        rng:         &mut impl Rng,
    ) -> Self {
        let mut particles = Vec::with_capacity(config.photo_count + config.light_count);
        for i in 0..config.photo_count {
            particles.push(CloudParticle::photo(i, image_count, &config, rng));
        }
        for _ in 0..config.light_count {
            particles.push(CloudParticle::light(&config, rng));
        }
        log::info!(
            "[gallery] built {} photos ({} images) + {} lights",
            config.photo_count, image_count, config.light_count
        );
        Self::from_particles(config, viewport, particles, entered_at)
    }

    pub fn from_particles(
        config:     GalleryConfig,
        viewport:   Vec2,
        particles:  Vec<CloudParticle>,
        entered_at: Duration,
    ) -> Self {
        let entrance = EntrancePose::at(Duration::ZERO, config.entrance, config.rise);
        let mut cloud = GalleryCloud {
            center: Vec2::ZERO,
            config,
            viewport,
            particles,
            draw_order: Vec::new(),
            rotation: 0.0,
            entered_at,
            clock: 0.0,
            entrance,
            hovered: None,
        };
        cloud.center = cloud.cloud_center();
        cloud
    }

    fn cloud_center(&self) -> Vec2 {
        Vec2::new(self.viewport.x / 2.0, self.viewport.y / 2.0 + 50.0 + self.entrance.rise)
    }

    /// Advance one tick: rotate, float, project, depth-sort and resolve hover.
    pub fn update(&mut self, now: Duration, pointer: Option<Vec2>, rng: &mut impl Rng) {
        let elapsed   = now.saturating_sub(self.entered_at);
        self.clock    = elapsed.as_secs_f32();
        self.entrance = EntrancePose::at(elapsed, self.config.entrance, self.config.rise);
        self.center   = self.cloud_center();
        self.rotation += self.config.rotation_step;

        for p in &mut self.particles {
            p.place(self.rotation, self.clock);
            p.spin += p.spin_speed;
            if let CloudKind::Light { flash, .. } = &mut p.kind {
                *flash = rng.gen_bool(FLASH_CHANCE);
            }
            p.project(self.center, &self.config);
        }

        self.sort();
        self.hovered = pointer.and_then(|ptr| self.hit_test(ptr));
    }

    fn sort(&mut self) {
        let particles = &self.particles;
        self.draw_order.clear();
        self.draw_order.extend((0..particles.len()).filter(|&i| particles[i].projected.is_some()));
        let depth = |i: usize| particles[i].projected.map_or(0.0, |p| p.depth);
        self.draw_order.sort_by(|&a, &b| depth(b).total_cmp(&depth(a)));
    }

    /// Topmost Photo whose projected box contains the screen-space `pointer`.
    pub fn hit_test(&self, pointer: Vec2) -> Option<usize> {
        let local = self.zoom().invert(pointer);
        self.draw_order.iter().rev().copied().find(|&i| {
            let p = &self.particles[i];
            p.is_photo() && p.projected.is_some_and(|proj| proj.contains(local))
        })
    }

    /// Transform composed around the cloud centre for the entrance.
    pub fn zoom(&self) -> Zoom {
        Zoom::new(self.center, self.entrance.scale)
    }

    pub fn particles(&self)  -> &[CloudParticle] { &self.particles }
    pub fn draw_order(&self) -> &[usize]         { &self.draw_order }
    pub fn hovered(&self)    -> Option<usize>    { self.hovered }
    pub fn entrance(&self)   -> EntrancePose     { self.entrance }
    pub fn center(&self)     -> Vec2             { self.center }
    pub fn rotation(&self)   -> f32              { self.rotation }

    pub fn hovered_particle(&self) -> Option<&CloudParticle> {
        self.hovered.map(|i| &self.particles[i])
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn draw(&self, canvas: &mut Canvas, images: &[Bitmap]) {
        canvas.set_zoom(self.zoom());
        for &i in &self.draw_order {
            let p = &self.particles[i];
            let Some(proj) = p.projected else { continue };
            let alpha = p.distance_alpha() * self.entrance.opacity;
            match &p.kind {
                CloudKind::Photo { image } => {
                    let bitmap = image.and_then(|idx| images.get(idx));
                    self.draw_photo(canvas, p, proj, bitmap, self.hovered == Some(i), alpha);
                }
                CloudKind::Light { color, twinkle_speed, twinkle_phase, flash } => {
                    let mut twinkle = 0.5 + (self.clock * twinkle_speed + twinkle_phase).sin() * 0.3;
                    if *flash {
                        twinkle += 1.5;
                    }
                    let a = (alpha * twinkle).min(1.0);
                    canvas.with_blend(BlendMode::Lighter, |c| {
                        c.fill_glow(proj.screen, proj.size, *color, a);
                        c.fill_circle(proj.screen, proj.size * 0.25, WHITE, a);
                    });
                }
            }
        }
        canvas.reset_zoom();
    }

    fn draw_photo(
        &self,
        canvas:  &mut Canvas,
        p:       &CloudParticle,
        proj:    Projection,
        bitmap:  Option<&Bitmap>,
        hovered: bool,
        alpha:   f32,
    ) {
        let size   = if hovered { proj.size * self.config.hover_scale } else { proj.size };
        let border = size * 0.1;
        if hovered {
            canvas.with_blend(BlendMode::Lighter, |c| c.fill_glow(proj.screen, size, GOLD, alpha));
        }
        let frame = if hovered { FRAME_HOVER } else { FRAME };
        canvas.fill_rotated_rect(proj.screen, size + border * 2.0, size + border * 2.0, p.spin, frame, alpha);
        canvas.fill_rotated_rect(proj.screen, size + 2.0, size + 2.0, p.spin, MOUNT, alpha);

        // Diagonal shine band sweeping across for half of each 4-unit cycle.
        let cycle = (self.clock * 2.0 + p.base.x * 0.01).rem_euclid(4.0);
        let band  = (cycle < 2.0).then(|| cycle - 0.5);
        canvas.fill_quad_with(proj.screen, size, size, p.spin, alpha, |u, v| {
            let base = bitmap.map_or(EMPTY_PHOTO, |b| b.sample(u, v));
            match band {
                Some(at) => {
                    let d = ((u + v) / 2.0 - at).abs();
                    if d < 0.15 { mix(base, WHITE, 0.4 * (1.0 - d / 0.15)) } else { base }
                }
                None => base,
            }
        });
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEW: Vec2 = Vec2::new(1280.0, 720.0);

    fn still() -> GalleryConfig {
        GalleryConfig { rotation_step: 0.0, ..GalleryConfig::default() }
    }

    fn photo_at(base: Vec3, size: f32) -> CloudParticle {
        CloudParticle::new(CloudKind::Photo { image: None }, base, size)
    }

    fn light_at(base: Vec3, size: f32) -> CloudParticle {
        let kind = CloudKind::Light { color: GOLD, twinkle_speed: 2.0, twinkle_phase: 0.0, flash: false };
        CloudParticle::new(kind, base, size)
    }

    /// Cloud updated once at the end of its entrance so the zoom is identity.
    fn settled(particles: Vec<CloudParticle>) -> GalleryCloud {
        let cfg = still();
        let entered = Duration::ZERO;
        let mut cloud = GalleryCloud::from_particles(cfg, VIEW, particles, entered);
        let mut rng = StdRng::seed_from_u64(0);
        // Float phase 0 at t = 4.0 s: sin(6.0) != 0, so tests use positions
        // relative to the particle's own projection instead of raw y.
        cloud.update(Duration::from_millis(4000), None, &mut rng);
        cloud
    }

    #[test]
    fn counts_and_cyclic_images() {
        let mut rng = StdRng::seed_from_u64(1);
        let cloud = GalleryCloud::build(GalleryConfig::default(), VIEW, 7, Duration::ZERO, &mut rng);
        assert_eq!(cloud.particles().len(), 750);
        let photos: Vec<_> = cloud.particles().iter().filter(|p| p.is_photo()).collect();
        assert_eq!(photos.len(), 150);
        for (i, p) in photos.iter().enumerate() {
            assert_eq!(p.image(), Some(i % 7));
        }
    }

    #[test]
    fn no_images_means_empty_frames() {
        let mut rng = StdRng::seed_from_u64(2);
        let cloud = GalleryCloud::build(GalleryConfig::default(), VIEW, 0, Duration::ZERO, &mut rng);
        assert!(cloud.particles().iter().all(|p| p.image().is_none()));
    }

    #[test]
    fn lights_fill_cone_volume() {
        let mut rng = StdRng::seed_from_u64(3);
        let cfg = GalleryConfig::default();
        let cloud = GalleryCloud::build(cfg.clone(), VIEW, 1, Duration::ZERO, &mut rng);
        let lights: Vec<_> = cloud.particles().iter().filter(|p| !p.is_photo()).collect();
        assert_eq!(lights.len(), 600);
        let mut inner = 0;
        for l in &lights {
            let h = (l.base.y + cfg.height / 2.0) / cfg.height;
            let r = Vec2::new(l.base.x, l.base.z).length();
            assert!(r <= cfg.radius_at(h) + cfg.light_margin + 1e-3);
            if r < (cfg.radius_at(h) + cfg.light_margin) * 0.5 {
                inner += 1;
            }
        }
        // Area-uniform: about a quarter fall inside half the radius.
        assert!(inner > 60 && inner < 300, "inner = {inner}");
    }

    #[test]
    fn rotation_preserves_height_and_radius() {
        let mut p = photo_at(Vec3::new(100.0, 50.0, 30.0), 50.0);
        p.place(1.234, 0.0);
        assert!((p.current.y - 50.0).abs() < 1e-4);
        let r0 = Vec2::new(100.0, 30.0).length();
        let r1 = Vec2::new(p.current.x, p.current.z).length();
        assert!((r0 - r1).abs() < 1e-3);
    }

    #[test]
    fn projection_formula() {
        let cfg = still();
        let mut p = photo_at(Vec3::new(40.0, -20.0, 400.0), 50.0);
        p.place(0.0, 0.0);
        p.project(Vec2::new(640.0, 410.0), &cfg);
        let proj = p.projected.unwrap();
        // depth 800 → scale 0.5
        assert_eq!(proj.depth, 800.0);
        assert!((proj.screen - Vec2::new(660.0, 400.0)).length() < 1e-4);
        assert!((proj.size - 25.0).abs() < 1e-4);
    }

    #[test]
    fn behind_camera_is_culled() {
        let cfg = still();
        let mut p = photo_at(Vec3::new(0.0, 0.0, -450.0), 50.0);
        p.place(0.0, 0.0);
        p.project(Vec2::ZERO, &cfg);
        assert!(p.projected.is_none());

        let cloud = settled(vec![p.clone(), photo_at(Vec3::ZERO, 10.0)]);
        assert_eq!(cloud.draw_order(), &[1]);
    }

    #[test]
    fn draw_order_is_farthest_first() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut cloud = GalleryCloud::build(GalleryConfig::default(), VIEW, 3, Duration::ZERO, &mut rng);
        cloud.update(Duration::from_millis(16), None, &mut rng);
        let depths: Vec<f32> = cloud
            .draw_order()
            .iter()
            .map(|&i| cloud.particles()[i].projected.unwrap().depth)
            .collect();
        assert!(depths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn nearest_photo_wins_hover() {
        let far  = photo_at(Vec3::new(0.0, 0.0, 200.0), 80.0);
        let near = photo_at(Vec3::new(0.0, 0.0, -100.0), 80.0);
        let cloud = settled(vec![far, near]);
        let target = cloud.particles()[1].projected.unwrap().screen;
        assert_eq!(cloud.hit_test(target), Some(1));
    }

    #[test]
    fn lights_are_not_hoverable() {
        let cloud = settled(vec![light_at(Vec3::ZERO, 200.0)]);
        let target = cloud.particles()[0].projected.unwrap().screen;
        assert_eq!(cloud.hit_test(target), None);
    }

    #[test]
    fn hover_misses_outside_box() {
        let cloud = settled(vec![photo_at(Vec3::ZERO, 40.0)]);
        let proj = cloud.particles()[0].projected.unwrap();
        assert_eq!(cloud.hit_test(proj.screen + Vec2::new(19.0, -19.0)), Some(0));
        assert_eq!(cloud.hit_test(proj.screen + Vec2::new(25.0, 0.0)), None);
    }

    #[test]
    fn pointer_is_mapped_through_entrance_zoom() {
        let mut cloud = GalleryCloud::from_particles(
            still(), VIEW, vec![photo_at(Vec3::new(100.0, 0.0, 0.0), 20.0)], Duration::ZERO,
        );
        let mut rng = StdRng::seed_from_u64(5);
        cloud.update(Duration::from_millis(1000), None, &mut rng);
        let proj = cloud.particles()[0].projected.unwrap();
        // The particle's local position is not where it appears on screen.
        let on_screen = cloud.zoom().apply(proj.screen);
        assert!(cloud.entrance().scale < 1.0);
        assert_eq!(cloud.hit_test(on_screen), Some(0));
        assert_eq!(cloud.hit_test(proj.screen), None);
    }

    #[test]
    fn entrance_settles_exactly() {
        let total = Duration::from_millis(4000);
        let done = EntrancePose::at(total, total, 150.0);
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.scale, 1.0);
        assert_eq!(done.rise, 0.0);
        let later = EntrancePose::at(Duration::from_secs(60), total, 150.0);
        assert_eq!(later, done);
        let start = EntrancePose::at(Duration::ZERO, total, 150.0);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.scale, 0.5);
        assert_eq!(start.rise, 150.0);
    }

    #[test]
    fn entrance_is_monotonic() {
        let total = Duration::from_millis(4000);
        let mut prev = 0.0;
        for ms in (0..=4000).step_by(100) {
            let p = EntrancePose::at(Duration::from_millis(ms), total, 150.0).progress;
            assert!(p >= prev && p <= 1.0);
            prev = p;
        }
    }

    #[test]
    fn draw_renders_something() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut cloud = GalleryCloud::build(GalleryConfig::default(), VIEW, 1, Duration::ZERO, &mut rng);
        cloud.update(Duration::from_millis(5000), None, &mut rng);
        let mut canvas = Canvas::new(1280, 720);
        cloud.draw(&mut canvas, &[Bitmap::solid(4, 4, rgb(0, 0, 255))]);
        assert!(canvas.pixels().iter().any(|&px| px != crate::canvas::BLACK));
    }

    proptest::proptest! {
        #[test]
        fn cone_radius_grows_with_height(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let cfg = GalleryConfig::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            proptest::prop_assert!(cfg.radius_at(lo) <= cfg.radius_at(hi));
            proptest::prop_assert!(cfg.radius_at(hi) <= cfg.max_radius + cfg.inner_offset + 1e-3);
            proptest::prop_assert!(cfg.radius_at(lo) >= cfg.inner_offset);
        }
    }
}
