//! The animation state machine and everything it drives.
//!
//! [`Stage`] owns the current [`AnimationPhase`], the gesture interpreter,
//! every particle collection and the lyric engine. The host calls
//! [`Stage::tick`] once per frame with whatever arrived since the last one
//! (every queued detector result, pointer state, the audio position), then
//! [`Stage::render`] to redraw the whole canvas.
//!
//! Per tick:
//!
//! ```text
//!   ambient ─▶ detections ─▶ phase step
//!                  │             Tracking:  tree clock, hold timer, dust
//!                  │             Explosion: burst physics
//!                  │             Gallery:   rotate / project / sort / hover, lyrics
//!                  └─ HandDetected / HandLost, once per queued result
//! ```

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use lyric_sync::{CueSheet, LyricSync};
use pinch_signal::{Detection, GestureInterpreter, HandLandmarks, SMOOTHING};

use crate::ambient::AmbientLayers;
use crate::audio::PlayerStatus;
use crate::burst::{BurstStatus, BurstSystem, BURST_COUNT};
use crate::canvas::{rgb, Canvas, GOLD, WHITE};
use crate::gallery::{GalleryCloud, GalleryConfig};
use crate::overlay;
use crate::phase::{transition, AnimationPhase, PhaseEvent};
use crate::photos::PhotoLibrary;
use crate::tree;

const BACKGROUND: u32 = rgb(0x05, 0x05, 0x10);

// ════════════════════════════════════════════════════════════════════════════
// StageConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct StageConfig {
    /// Scale must stay strictly above this to charge the hold.
    pub hold_threshold: f32,
    pub hold_duration:  Duration,
    pub burst_count:    usize,
    pub smoothing:      f32,
    pub dust_per_tick:  usize,
    /// Chance per tick that the tree-top star sheds a sparkle.
    pub sparkle_chance: f64,
    pub gallery:        GalleryConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        StageConfig {
            hold_threshold: 0.85,
            hold_duration:  Duration::from_millis(2000),
            burst_count:    BURST_COUNT,
            smoothing:      SMOOTHING,
            dust_per_tick:  2,
            sparkle_chance: 0.1,
            gallery:        GalleryConfig::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HoldTimer
// ════════════════════════════════════════════════════════════════════════════

/// Continuous-hold timer. Any observation below the threshold unsets the
/// start, so only uninterrupted time counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldTimer {
    start: Option<Duration>,
}

impl HoldTimer {
    /// Feed one observation; returns how long the hold has lasted, or
    /// `None` when not holding.
    pub fn observe(&mut self, above: bool, now: Duration) -> Option<Duration> {
        if !above {
            self.start = None;
            return None;
        }
        let start = *self.start.get_or_insert(now);
        Some(now.saturating_sub(start))
    }

    pub fn reset(&mut self) {
        self.start = None;
    }

    pub fn is_holding(&self) -> bool {
        self.start.is_some()
    }
}

/// Fraction of the hold completed, capped at 1.
pub fn hold_progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tick input / outcome
// ════════════════════════════════════════════════════════════════════════════

/// Everything the host delivers into one tick.
#[derive(Clone, Debug, Default)]
pub struct TickInput {
    /// Time since session start.
    pub now:           Duration,
    /// Every detector result since the previous tick, oldest first.
    pub detections:    Vec<Detection>,
    /// Pointer position in canvas coordinates.
    pub pointer:       Option<Vec2>,
    pub clicked:       bool,
    pub playback_time: f64,
    pub playing:       bool,
    /// Photos available right now; fixed into the cloud on GALLERY entry.
    pub photo_count:   usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub transitions:    Vec<(AnimationPhase, AnimationPhase)>,
    /// The explosion fired this tick; the host should start the music.
    pub start_music:    bool,
    /// A photo is under the pointer.
    pub pointer_cursor: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Stage
// ════════════════════════════════════════════════════════════════════════════

pub struct Stage {
    config:        StageConfig,
    viewport:      Vec2,
    phase:         AnimationPhase,
    gesture:       GestureInterpreter,
    hand:          Option<HandLandmarks>,
    hold:          HoldTimer,
    hold_progress: f32,
    burst:         BurstSystem,
    gallery:       Option<GalleryCloud>,
    ambient:       AmbientLayers,
    lyrics:        LyricSync,
    tree_time:     f32,
    clock:         f32,
    jitter:        Vec2,
    playback_time: f64,
    viewer:        Option<usize>,
    rng:           StdRng,
}

impl Stage {
    pub fn new(config: StageConfig, viewport: Vec2, cues: CueSheet, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        let ambient = AmbientLayers::new(viewport, &mut rng);
        Stage {
            gesture:       GestureInterpreter::with_smoothing(config.smoothing),
            config,
            viewport,
            phase:         AnimationPhase::Idle,
            hand:          None,
            hold:          HoldTimer::default(),
            hold_progress: 0.0,
            burst:         BurstSystem::new(),
            gallery:       None,
            ambient,
            lyrics:        LyricSync::new(cues),
            tree_time:     0.0,
            clock:         0.0,
            jitter:        Vec2::ZERO,
            playback_time: 0.0,
            viewer:        None,
            rng,
        }
    }

    fn tree_base(&self) -> Vec2 {
        Vec2::new(self.viewport.x / 2.0, self.viewport.y - 100.0)
    }

    // ── tick ──────────────────────────────────────────────────────────────

    pub fn tick(&mut self, input: TickInput) -> TickOutcome {
        let mut out = TickOutcome::default();
        self.clock     = input.now.as_secs_f32();
        self.ambient.update(self.clock, &mut self.rng);

        for detection in &input.detections {
            self.observe(detection, &input, &mut out);
        }

        match self.phase {
            AnimationPhase::Idle      => {}
            AnimationPhase::Tracking  => self.track(&input, &mut out),
            AnimationPhase::Explosion => {
                if self.burst.update() == BurstStatus::Depleted {
                    self.fire(PhaseEvent::BurstDepleted, &input, &mut out);
                }
            }
            AnimationPhase::Gallery   => {
                self.browse(&input);
                self.lyrics.update(input.playback_time, input.playing);
            }
        }
        self.playback_time = input.playback_time;

        out.pointer_cursor = self.viewer.is_none() && self.hovered().is_some();
        out
    }

    /// Hands only matter before the explosion.
    fn observe(&mut self, detection: &Detection, input: &TickInput, out: &mut TickOutcome) {
        if !matches!(self.phase, AnimationPhase::Idle | AnimationPhase::Tracking) {
            return;
        }
        match detection.sole_hand() {
            Some(hand) => {
                self.fire(PhaseEvent::HandDetected, input, out);
                self.gesture.observe(hand);
                self.hand = Some(*hand);
            }
            None => {
                self.hand = None;
                self.fire(PhaseEvent::HandLost, input, out);
            }
        }
    }

    fn track(&mut self, input: &TickInput, out: &mut TickOutcome) {
        let scale = self.gesture.scale();
        if scale >= tree::MIN_SCALE {
            self.tree_time += tree::TIME_STEP;
        }
        self.jitter = overlay::energy_jitter(&mut self.rng);
        if let Some(star) = tree::star_position(self.tree_base(), scale) {
            if self.rng.gen_bool(self.config.sparkle_chance) {
                self.ambient.sparkles.spawn(star, WHITE, &mut self.rng);
            }
        }

        let above = scale > self.config.hold_threshold;
        match self.hold.observe(above, input.now) {
            Some(elapsed) => {
                self.hold_progress = hold_progress(elapsed, self.config.hold_duration);
                let ring = self.tree_base();
                for _ in 0..self.config.dust_per_tick {
                    let at = ring + Vec2::new(self.rng.gen_range(-50.0..50.0), self.rng.gen_range(-25.0..25.0));
                    self.ambient.dust.emit(at, &mut self.rng);
                }
                if elapsed >= self.config.hold_duration {
                    self.fire(PhaseEvent::HoldCompleted, input, out);
                }
            }
            None => self.hold_progress = 0.0,
        }
    }

    fn browse(&mut self, input: &TickInput) {
        let Some(cloud) = self.gallery.as_mut() else { return };
        let pointer = if self.viewer.is_some() { None } else { input.pointer };
        cloud.update(input.now, pointer, &mut self.rng);

        if input.clicked && self.viewer.take().is_none() {
            self.viewer = cloud.hovered_particle().and_then(|p| p.image());
            if let Some(image) = self.viewer {
                log::info!("[stage] viewing photo {}", image);
            }
        }
    }

    fn fire(&mut self, event: PhaseEvent, input: &TickInput, out: &mut TickOutcome) {
        let Some(next) = transition(self.phase, event) else { return };
        let from = self.phase;
        self.phase = next;
        log::info!("[stage] {} → {} ({:?})", from, next, event);
        out.transitions.push((from, next));

        match next {
            AnimationPhase::Idle => {
                self.gesture.reset();
                self.hold.reset();
                self.hold_progress = 0.0;
            }
            AnimationPhase::Tracking => {}
            AnimationPhase::Explosion => {
                self.hold.reset();
                self.hold_progress = 0.0;
                self.hand = None;
                let center = self.viewport / 2.0;
                self.burst.trigger(center, self.config.burst_count, &mut self.rng);
                out.start_music = true;
            }
            AnimationPhase::Gallery => {
                self.gallery = Some(GalleryCloud::build(
                    self.config.gallery.clone(),
                    self.viewport,
                    input.photo_count,
                    input.now,
                    &mut self.rng,
                ));
            }
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self)         -> AnimationPhase        { self.phase }
    pub fn scale(&self)         -> f32                   { self.gesture.scale() }
    pub fn hold_progress(&self) -> f32                   { self.hold_progress }
    pub fn is_holding(&self)    -> bool                  { self.hold.is_holding() }
    pub fn burst(&self)         -> &BurstSystem          { &self.burst }
    pub fn gallery(&self)       -> Option<&GalleryCloud> { self.gallery.as_ref() }
    pub fn lyrics(&self)        -> &LyricSync            { &self.lyrics }
    pub fn viewer(&self)        -> Option<usize>         { self.viewer }
    pub fn ambient(&self)       -> &AmbientLayers        { &self.ambient }

    pub fn hovered(&self) -> Option<usize> {
        self.gallery.as_ref().and_then(GalleryCloud::hovered)
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    // ── render ────────────────────────────────────────────────────────────

    pub fn render(&self, canvas: &mut Canvas, photos: &PhotoLibrary, player: &PlayerStatus) {
        canvas.clear(BACKGROUND);
        self.ambient.draw(canvas);

        match self.phase {
            AnimationPhase::Idle => {
                overlay::draw_tag(canvas, "IDLE - show one hand to begin");
            }
            AnimationPhase::Tracking => {
                tree::draw_tree(canvas, self.tree_base(), self.gesture.scale(), self.tree_time);
                if let Some(hand) = &self.hand {
                    overlay::draw_hand(canvas, hand, self.viewport, self.clock);
                    overlay::draw_energy(canvas, hand, self.viewport, self.jitter);
                }
                overlay::draw_hold_ring(canvas, self.tree_base(), self.hold_progress);
                overlay::draw_tag(canvas, "TRACKING - pinch wide and hold");
            }
            AnimationPhase::Explosion => {
                self.burst.draw(canvas);
            }
            AnimationPhase::Gallery => {
                if let Some(cloud) = &self.gallery {
                    let opacity = cloud.entrance().opacity;
                    cloud.draw(canvas, photos.thumbnails());
                    // Unscaled, above the zoomed cloud.
                    tree::draw_star(canvas, cloud.center() - Vec2::new(0.0, 300.0), self.clock, opacity);
                    let title = Vec2::new(self.viewport.x / 2.0, 70.0);
                    canvas.draw_text("MERRY CHRISTMAS", title, 36.0, 0.0, GOLD, opacity);
                }
                if let Some(caption) = self.lyrics.caption(self.playback_time) {
                    let anchor = Vec2::new(self.viewport.x / 2.0, self.viewport.y - 250.0);
                    overlay::draw_caption(canvas, &caption, anchor);
                }
            }
        }

        overlay::draw_player(canvas, player);

        if let Some(bitmap) = self.viewer.and_then(|i| photos.full(i)) {
            overlay::draw_viewer(canvas, bitmap);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::synth_hand;
    use pinch_signal::Landmark;

    const VIEW: Vec2 = Vec2::new(1280.0, 720.0);

    /// Unsmoothed, so a wide pinch reaches full scale in one observation.
    fn stage() -> Stage {
        let cfg = StageConfig { smoothing: 1.0, ..StageConfig::default() };
        Stage::new(cfg, VIEW, CueSheet::builtin(), Some(7))
    }

    fn hand(pinch: f32) -> Option<Detection> {
        Some(Detection::single(synth_hand(Landmark::new(0.5, 0.5), pinch)))
    }

    fn at(ms: u64, detection: Option<Detection>) -> TickInput {
        queued(ms, detection.into_iter().collect())
    }

    fn queued(ms: u64, detections: Vec<Detection>) -> TickInput {
        TickInput { now: Duration::from_millis(ms), detections, photo_count: 3, ..TickInput::default() }
    }

    /// Drive a stage through the hold into EXPLOSION; returns the tick time.
    fn exploded() -> (Stage, u64) {
        let mut s = stage();
        s.tick(at(0, hand(0.3)));
        let out = s.tick(at(2000, hand(0.3)));
        assert!(out.start_music);
        (s, 2000)
    }

    fn to_gallery() -> (Stage, u64) {
        let (mut s, mut t) = exploded();
        while s.phase() != AnimationPhase::Gallery {
            t += 16;
            s.tick(at(t, None));
        }
        (s, t)
    }

    #[test]
    fn hand_enters_and_leaves_tracking() {
        let mut s = stage();
        let out = s.tick(at(0, hand(0.2)));
        assert_eq!(out.transitions, vec![(AnimationPhase::Idle, AnimationPhase::Tracking)]);
        assert!(s.scale() > 0.0);
        let out = s.tick(at(16, Some(Detection::empty())));
        assert_eq!(out.transitions, vec![(AnimationPhase::Tracking, AnimationPhase::Idle)]);
        assert_eq!(s.scale(), 0.0);
    }

    #[test]
    fn two_hands_mean_no_signal() {
        let mut s = stage();
        s.tick(at(0, hand(0.2)));
        let pair = synth_hand(Landmark::new(0.5, 0.5), 0.2);
        let two = Detection { hands: vec![pair.clone(), pair] };
        s.tick(at(16, Some(two)));
        assert_eq!(s.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn frames_without_detection_keep_tracking() {
        let mut s = stage();
        s.tick(at(0, hand(0.2)));
        for i in 1..10 {
            s.tick(at(i * 16, None));
        }
        assert_eq!(s.phase(), AnimationPhase::Tracking);
    }

    #[test]
    fn hold_triggers_at_exactly_two_seconds() {
        let mut s = stage();
        s.tick(at(0, hand(0.3)));
        assert!(s.is_holding());
        let out = s.tick(at(1999, hand(0.3)));
        assert!(out.transitions.is_empty());
        assert_eq!(s.phase(), AnimationPhase::Tracking);
        assert!(s.hold_progress() > 0.99 && s.hold_progress() < 1.0);

        let out = s.tick(at(2000, hand(0.3)));
        assert_eq!(out.transitions, vec![(AnimationPhase::Tracking, AnimationPhase::Explosion)]);
        assert!(out.start_music);
        assert_eq!(s.burst().len(), BURST_COUNT);
    }

    #[test]
    fn dip_restarts_hold() {
        let mut s = stage();
        s.tick(at(0, hand(0.3)));
        s.tick(at(1000, hand(0.0)));
        assert!(!s.is_holding());
        s.tick(at(1001, hand(0.3)));
        // 1000 ms before the dip plus 1999 ms after: not continuous.
        s.tick(at(3000, hand(0.3)));
        assert_eq!(s.phase(), AnimationPhase::Tracking);
        s.tick(at(3001, hand(0.3)));
        assert_eq!(s.phase(), AnimationPhase::Explosion);
    }

    #[test]
    fn at_threshold_is_not_above() {
        let cfg = StageConfig { smoothing: 1.0, hold_threshold: 1.0, ..StageConfig::default() };
        let mut s = Stage::new(cfg, VIEW, CueSheet::builtin(), Some(1));
        s.tick(at(0, hand(0.3)));
        s.tick(at(5000, hand(0.3)));
        assert_eq!(s.phase(), AnimationPhase::Tracking);
        assert!(!s.is_holding());
    }

    #[test]
    fn holding_sheds_dust() {
        let mut s = stage();
        s.tick(at(0, hand(0.3)));
        assert_eq!(s.ambient().dust.len(), 2);
    }

    #[test]
    fn explosion_fires_once_and_ignores_hands() {
        let (mut s, t) = exploded();
        let out = s.tick(at(t + 16, hand(0.3)));
        assert!(!out.start_music);
        assert!(out.transitions.is_empty());
        let out = s.tick(at(t + 32, Some(Detection::empty())));
        assert!(out.transitions.is_empty());
        assert_eq!(s.phase(), AnimationPhase::Explosion);
    }

    #[test]
    fn gallery_follows_last_particle_exactly_once() {
        let (mut s, mut t) = exploded();
        let mut entered = 0;
        for tick in 1..=200 {
            t += 16;
            let out = s.tick(at(t, None));
            for &(_, to) in &out.transitions {
                assert_eq!(to, AnimationPhase::Gallery);
                assert!(tick <= 101);
                assert!(s.burst().is_empty());
                entered += 1;
            }
            if s.phase() == AnimationPhase::Explosion {
                assert!(!s.burst().is_empty());
            }
        }
        assert_eq!(entered, 1);
        let cloud = s.gallery().unwrap();
        assert_eq!(cloud.particles().len(), 750);
        assert_eq!(cloud.particles()[4].image(), Some(1));
    }

    #[test]
    fn click_opens_and_closes_viewer() {
        let (mut s, mut t) = to_gallery();
        t += 5000;
        s.tick(at(t, None));
        let cloud = s.gallery().unwrap();
        let target = cloud
            .draw_order()
            .iter()
            .rev()
            .map(|&i| &cloud.particles()[i])
            .find(|p| p.is_photo())
            .and_then(|p| p.projected)
            .unwrap()
            .screen;

        t += 16;
        let out = s.tick(TickInput { pointer: Some(target), ..at(t, None) });
        assert!(out.pointer_cursor);
        let hovered = s.hovered().unwrap();
        let image = s.gallery().unwrap().particles()[hovered].image();

        t += 16;
        s.tick(TickInput { pointer: Some(target), clicked: true, ..at(t, None) });
        assert_eq!(s.viewer(), image);
        assert!(s.viewer().is_some());

        t += 16;
        s.tick(TickInput { pointer: Some(target), clicked: true, ..at(t, None) });
        assert_eq!(s.viewer(), None);
    }

    #[test]
    fn queued_dropout_restarts_hold() {
        let mut s = stage();
        s.tick(at(0, hand(0.3)));
        let out = s.tick(queued(1500, vec![
            Detection::single(synth_hand(Landmark::new(0.5, 0.5), 0.3)),
            Detection::empty(),
            Detection::single(synth_hand(Landmark::new(0.5, 0.5), 0.3)),
        ]));
        assert_eq!(out.transitions, vec![
            (AnimationPhase::Tracking, AnimationPhase::Idle),
            (AnimationPhase::Idle, AnimationPhase::Tracking),
        ]);
        assert!(s.is_holding());
        assert!(s.hold_progress() < 0.01);

        // Only 500 ms of continuous hold since the dropout.
        s.tick(at(2000, hand(0.3)));
        assert_eq!(s.phase(), AnimationPhase::Tracking);
        s.tick(at(3500, hand(0.3)));
        assert_eq!(s.phase(), AnimationPhase::Explosion);
    }

    #[test]
    fn every_queued_result_feeds_the_average() {
        let cfg = StageConfig::default();
        let mut one = Stage::new(cfg.clone(), VIEW, CueSheet::builtin(), Some(3));
        let mut three = Stage::new(cfg, VIEW, CueSheet::builtin(), Some(3));
        let wide = || Detection::single(synth_hand(Landmark::new(0.5, 0.5), 0.3));
        one.tick(queued(0, vec![wide()]));
        three.tick(queued(0, vec![wide(), wide(), wide()]));
        assert!(three.scale() > one.scale());
    }

    #[test]
    fn no_captions_before_gallery() {
        let mut s = stage();
        let second = s.lyrics().sheet().cues()[1].timestamp;
        s.tick(TickInput { playback_time: second + 1.0, playing: true, ..at(0, hand(0.2)) });
        assert_eq!(s.phase(), AnimationPhase::Tracking);
        assert_eq!(s.lyrics().state().active_cue, None);
        assert!(s.lyrics().caption(second + 1.0).is_none());
    }

    #[test]
    fn lyrics_follow_playback_in_gallery() {
        let (mut s, t) = to_gallery();
        let first = s.lyrics().sheet().cues()[0].timestamp;
        s.tick(TickInput { playback_time: first + 0.1, playing: true, ..at(t + 16, None) });
        assert_eq!(s.lyrics().state().active_cue, Some(0));
        assert!(s.lyrics().caption(first + 0.1).is_some());
    }

    #[test]
    fn gallery_star_is_drawn_unscaled() {
        let empty = GalleryConfig { photo_count: 0, light_count: 0, ..GalleryConfig::default() };
        let cfg = StageConfig { smoothing: 1.0, gallery: empty, ..StageConfig::default() };
        let mut s = Stage::new(cfg, VIEW, CueSheet::builtin(), Some(11));
        s.tick(at(0, hand(0.3)));
        s.tick(at(2000, hand(0.3)));
        let mut t = 2000;
        while s.phase() != AnimationPhase::Gallery {
            t += 16;
            s.tick(at(t, None));
        }
        // Mid-entrance: the cloud is still zoomed well below 1.
        s.tick(at(t + 1000, None));
        let cloud = s.gallery().unwrap();
        assert!(cloud.entrance().scale < 0.9);
        let star = cloud.center() - Vec2::new(0.0, 300.0);

        let mut canvas = Canvas::new(1280, 720);
        s.render(&mut canvas, &PhotoLibrary::default(), &PlayerStatus::default());
        let px = canvas.pixel(star.x as usize, star.y as usize).unwrap();
        assert!((px >> 16) & 0xFF > 0x80);
    }

    #[test]
    fn render_each_phase() {
        let mut canvas = Canvas::new(1280, 720);
        let photos = PhotoLibrary::default();
        let status = PlayerStatus::default();

        let mut s = stage();
        s.render(&mut canvas, &photos, &status);
        s.tick(at(0, hand(0.3)));
        s.render(&mut canvas, &photos, &status);
        let (s, _) = to_gallery();
        s.render(&mut canvas, &photos, &status);
        assert!(canvas.pixels().iter().any(|&p| p != BACKGROUND));
    }
}
