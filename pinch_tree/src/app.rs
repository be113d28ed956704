//! Top-level application loop.
//!
//! `run` wires the landmark source, the photo loader, the music player and
//! the [`Stage`] together and drives the visualizer at ~60 fps.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use lyric_sync::CueSheet;
use pinch_signal::Detection;

use crate::audio::{ClockTransport, MusicPlayer, FADE_INTERVAL};
use crate::canvas::Canvas;
use crate::error::AppError;
use crate::hand::{spawn_landmark_source, SimHandSource};
use crate::photos::{spawn_photo_loader, PhotoLibrary};
use crate::stage::{Stage, StageConfig, TickInput};
use crate::visualizer::Visualizer;

/// Pace of the simulated detector, roughly a 30 fps camera.
const DETECT_INTERVAL: Duration = Duration::from_millis(33);

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub width:          usize,
    pub height:         usize,
    pub photo_dir:      PathBuf,
    /// JSON cue sheet; the built-in sheet when absent.
    pub lyric_file:     Option<PathBuf>,
    /// Song length in seconds.
    pub song_length:    f64,
    /// Whether playback may start without a user action.
    pub allow_autoplay: bool,
    pub seed:           Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width:          1280,
            height:         720,
            photo_dir:      PathBuf::from("photos"),
            lyric_file:     None,
            song_length:    180.0,
            allow_autoplay: true,
            seed:           None,
        }
    }
}

impl AppConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn cue_sheet(&self) -> Result<CueSheet, AppError> {
        match &self.lyric_file {
            Some(path) => Ok(CueSheet::load(path)?),
            None       => Ok(CueSheet::builtin()),
        }
    }
}

/// Drain everything queued, oldest first. Each result is one detector
/// callback and must reach the stage.
pub fn drain_detections(rx: &Receiver<Detection>) -> Vec<Detection> {
    rx.try_iter().collect()
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application. Only window failures abort it.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let cues = cfg.cue_sheet().unwrap_or_else(|e| {
        log::warn!("[app] {}; using built-in lyrics", e);
        CueSheet::builtin()
    });
    log::info!("[app] {} lyric cues, photos from {}", cues.len(), cfg.photo_dir.display());

    // ── Sim hand channel ──────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel();
    let detections = spawn_landmark_source(SimHandSource { rx: sim_rx, interval: DETECT_INTERVAL });

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(cfg.width, cfg.height, sim_tx)?;

    // ── Assets, audio, stage ──────────────────────────────────────────────
    let full_max    = cfg.width.max(cfg.height) as u32;
    let mut library = PhotoLibrary::loading(spawn_photo_loader(cfg.photo_dir.clone(), full_max));
    let transport   = ClockTransport::new(cfg.song_length, cfg.allow_autoplay);
    let mut player  = MusicPlayer::new(Box::new(transport), FADE_INTERVAL);
    let mut stage   = Stage::new(StageConfig::default(), cfg.viewport(), cues, cfg.seed);
    let mut canvas  = Canvas::new(cfg.width, cfg.height);
    let start       = Instant::now();

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Window input
        let input = vis.poll_input();
        if input.quit { break; }
        if input.toggle_play  { player.toggle(); }
        if input.seek != 0.0  { player.seek_by(input.seek); }
        if input.close_viewer { stage.close_viewer(); }

        // 2. Background arrivals
        let queued = drain_detections(&detections);
        library.poll();

        // 3. Audio, then the stage against the fresh position
        let now = start.elapsed();
        player.tick(now);
        let outcome = stage.tick(TickInput {
            now,
            detections:    queued,
            pointer:       input.pointer,
            clicked:       input.clicked,
            playback_time: player.position(),
            playing:       player.is_playing(),
            photo_count:   library.len(),
        });
        if outcome.start_music {
            player.start_with_fade();
        }
        vis.set_hand_cursor(outcome.pointer_cursor);

        // 4. Render
        stage.render(&mut canvas, &library, player.status());
        vis.present(&mut canvas)?;
    }

    log::info!("[app] window closed after {:.1}s", start.elapsed().as_secs_f32());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::synth_hand;
    use crate::phase::AnimationPhase;
    use pinch_signal::Landmark;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pinch_tree_app_{}_{}", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn partial_config_fills_defaults() {
        let path = scratch_file("partial.json", r#"{ "width": 800, "seed": 9 }"#);
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 720);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.photo_dir, PathBuf::from("photos"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn config_errors_name_the_file() {
        let missing = std::env::temp_dir().join("pinch_tree_app_does_not_exist.json");
        assert!(matches!(AppConfig::load(&missing), Err(AppError::ConfigIo { .. })));

        let bad = scratch_file("bad.json", "{ width: ");
        let err = AppConfig::load(&bad).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
        assert!(err.to_string().contains("bad.json"));
        fs::remove_file(bad).ok();
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = AppConfig { lyric_file: Some(PathBuf::from("song.json")), ..AppConfig::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_lyric_file_is_an_error() {
        let cfg = AppConfig {
            lyric_file: Some(std::env::temp_dir().join("pinch_tree_no_lyrics.json")),
            ..AppConfig::default()
        };
        assert!(matches!(cfg.cue_sheet(), Err(AppError::Lyrics(_))));
        assert!(!AppConfig::default().cue_sheet().unwrap().is_empty());
    }

    #[test]
    fn every_queued_detection_is_kept_in_order() {
        let (tx, rx) = mpsc::channel();
        assert!(drain_detections(&rx).is_empty());
        let hand = || Detection::single(synth_hand(Landmark::new(0.5, 0.5), 0.3));
        tx.send(hand()).unwrap();
        tx.send(Detection::empty()).unwrap();
        tx.send(hand()).unwrap();
        let queued = drain_detections(&rx);
        let hands: Vec<usize> = queued.iter().map(|d| d.hands.len()).collect();
        assert_eq!(hands, vec![1, 0, 1]);
        assert!(drain_detections(&rx).is_empty());
    }

    #[test]
    fn drained_dropout_resets_the_hold() {
        let cfg = StageConfig { smoothing: 1.0, ..StageConfig::default() };
        let mut stage = Stage::new(cfg, Vec2::new(1280.0, 720.0), CueSheet::builtin(), Some(5));
        let (tx, rx) = mpsc::channel();
        let hand = || Detection::single(synth_hand(Landmark::new(0.5, 0.5), 0.3));
        let tick = |stage: &mut Stage, ms: u64| {
            stage.tick(TickInput {
                now:        Duration::from_millis(ms),
                detections: drain_detections(&rx),
                ..TickInput::default()
            })
        };

        tx.send(hand()).unwrap();
        tick(&mut stage, 0);
        tx.send(hand()).unwrap();
        tx.send(Detection::empty()).unwrap();
        tx.send(hand()).unwrap();
        tick(&mut stage, 1500);
        tx.send(hand()).unwrap();
        tick(&mut stage, 2000);
        assert_eq!(stage.phase(), AnimationPhase::Tracking);
    }
}
