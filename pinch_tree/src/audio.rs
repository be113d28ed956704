//! Audio transport and the volume fade-in.
//!
//! The song itself is an external collaborator behind [`AudioTransport`].
//! [`ClockTransport`] is the built-in implementation: it decodes nothing
//! and simply advances a position with the wall clock, which is all the
//! lyric engine and the status bar need.
//!
//! [`MusicPlayer`] wraps a transport with the status shown on screen and
//! the one-shot fade-in started at the explosion. The fade runs on its own
//! thread, sending volume steps over a channel, and exits by itself once
//! full volume is reached.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Transport interface
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("automatic playback was rejected; start it with Space")]
    AutoplayBlocked,
}

/// Who asked for playback. Automatic requests may be refused by policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOrigin {
    User,
    Automatic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioEvent {
    MetadataReady { duration: f64 },
    PlayStarted,
    Paused,
    Ended,
    /// Periodic position update while playing, in seconds.
    Position(f64),
}

pub trait AudioTransport {
    fn play(&mut self, origin: PlayOrigin) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn position(&self) -> f64;
    fn duration(&self) -> Option<f64>;
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    fn is_playing(&self) -> bool;
    /// Advance to `now` (time since session start) and drain pending events.
    fn poll(&mut self, now: Duration) -> Vec<AudioEvent>;
}

// ════════════════════════════════════════════════════════════════════════════
// ClockTransport
// ════════════════════════════════════════════════════════════════════════════

/// Silent transport whose position follows the wall clock.
#[derive(Debug)]
pub struct ClockTransport {
    length:         f64,
    allow_autoplay: bool,
    position:       f64,
    volume:         f32,
    playing:        bool,
    last_poll:      Option<Duration>,
    announced:      bool,
    pending:        Vec<AudioEvent>,
}

impl ClockTransport {
    pub fn new(length: f64, allow_autoplay: bool) -> Self {
        ClockTransport {
            length:    length.max(0.0),
            allow_autoplay,
            position:  0.0,
            volume:    1.0,
            playing:   false,
            last_poll: None,
            announced: false,
            pending:   Vec::new(),
        }
    }
}

impl AudioTransport for ClockTransport {
    fn play(&mut self, origin: PlayOrigin) -> Result<(), AudioError> {
        if origin == PlayOrigin::Automatic && !self.allow_autoplay {
            return Err(AudioError::AutoplayBlocked);
        }
        if !self.playing {
            self.playing = true;
            // Time spent paused must not count.
            self.last_poll = None;
            self.pending.push(AudioEvent::PlayStarted);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.pending.push(AudioEvent::Paused);
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.length);
        self.pending.push(AudioEvent::Position(self.position));
    }

    fn position(&self)      -> f64         { self.position }
    fn duration(&self)      -> Option<f64> { Some(self.length) }
    fn volume(&self)        -> f32         { self.volume }
    fn is_playing(&self)    -> bool        { self.playing }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn poll(&mut self, now: Duration) -> Vec<AudioEvent> {
        if !self.announced {
            self.announced = true;
            self.pending.insert(0, AudioEvent::MetadataReady { duration: self.length });
        }
        if self.playing {
            if let Some(last) = self.last_poll {
                self.position += now.saturating_sub(last).as_secs_f64();
            }
            if self.position >= self.length {
                // Rewind to the top, stopped.
                self.position = 0.0;
                self.playing  = false;
                self.pending.push(AudioEvent::Ended);
            } else {
                self.pending.push(AudioEvent::Position(self.position));
            }
        }
        self.last_poll = Some(now);
        std::mem::take(&mut self.pending)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Volume fade
// ════════════════════════════════════════════════════════════════════════════

pub const FADE_STEP:     f32      = 0.05;
pub const FADE_INTERVAL: Duration = Duration::from_millis(200);

/// Volume levels of the fade-in: 0.05, 0.10, … ending exactly at 1.0.
#[derive(Clone, Debug, Default)]
pub struct VolumeRamp {
    step: u32,
}

impl Iterator for VolumeRamp {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let steps = (1.0 / FADE_STEP).round() as u32;
        if self.step >= steps {
            return None;
        }
        self.step += 1;
        Some(if self.step == steps { 1.0 } else { self.step as f32 * FADE_STEP })
    }
}

/// Spawn the fade thread. It sends one level per `interval` and exits after
/// the last one, or as soon as the receiver is dropped.
pub fn spawn_volume_fade(interval: Duration) -> Receiver<f32> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for level in VolumeRamp::default() {
            thread::sleep(interval);
            if tx.send(level).is_err() {
                return;
            }
        }
        log::debug!("[audio] fade-in finished");
    });
    rx
}

#[derive(Debug)]
enum Fade {
    Idle,
    /// Automatic start was refused; fade begins on the next user play.
    Pending,
    Running(Receiver<f32>),
    Done,
}

// ════════════════════════════════════════════════════════════════════════════
// PlayerStatus
// ════════════════════════════════════════════════════════════════════════════

/// What the on-screen music bar shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerStatus {
    pub playing:  bool,
    pub current:  f64,
    pub duration: Option<f64>,
}

impl PlayerStatus {
    pub fn apply(&mut self, event: &AudioEvent) {
        match *event {
            AudioEvent::MetadataReady { duration } => self.duration = Some(duration),
            AudioEvent::PlayStarted                => self.playing = true,
            AudioEvent::Paused                     => self.playing = false,
            AudioEvent::Ended                      => {
                self.playing = false;
                self.current = 0.0;
            }
            AudioEvent::Position(t) => self.current = t,
        }
    }

    /// Fraction of the song played, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(d) if d > 0.0 => (self.current / d).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    /// `"m:ss / m:ss"`, with `0:00` for an unknown duration.
    pub fn label(&self) -> String {
        format!("{} / {}", format_time(self.current), format_time(self.duration.unwrap_or(0.0)))
    }
}

/// Seconds as `m:ss`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0).floor() as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}

// ════════════════════════════════════════════════════════════════════════════
// MusicPlayer
// ════════════════════════════════════════════════════════════════════════════

pub struct MusicPlayer {
    transport:     Box<dyn AudioTransport>,
    status:        PlayerStatus,
    fade:          Fade,
    fade_interval: Duration,
}

impl MusicPlayer {
    pub fn new(transport: Box<dyn AudioTransport>, fade_interval: Duration) -> Self {
        MusicPlayer {
            transport,
            status: PlayerStatus::default(),
            fade: Fade::Idle,
            fade_interval,
        }
    }

    /// Start the song silently and fade it in. Only the first call has any
    /// effect.
    pub fn start_with_fade(&mut self) {
        if !matches!(self.fade, Fade::Idle) {
            return;
        }
        self.transport.set_volume(0.0);
        match self.transport.play(PlayOrigin::Automatic) {
            Ok(()) => self.begin_fade(),
            Err(e) => {
                log::warn!("[audio] {}", e);
                self.fade = Fade::Pending;
            }
        }
    }

    fn begin_fade(&mut self) {
        log::info!("[audio] fading in");
        self.fade = Fade::Running(spawn_volume_fade(self.fade_interval));
    }

    /// User play/pause.
    pub fn toggle(&mut self) {
        if self.transport.is_playing() {
            self.transport.pause();
            return;
        }
        match self.transport.play(PlayOrigin::User) {
            Ok(()) if matches!(self.fade, Fade::Pending) => self.begin_fade(),
            Ok(()) => {}
            Err(e) => log::warn!("[audio] {}", e),
        }
    }

    pub fn seek_by(&mut self, delta: f64) {
        let target = self.transport.position() + delta;
        self.transport.seek(target.max(0.0));
    }

    /// Advance the transport, apply fade steps and fold events into the
    /// status. Returns the drained events.
    pub fn tick(&mut self, now: Duration) -> Vec<AudioEvent> {
        let mut finished = false;
        if let Fade::Running(rx) = &self.fade {
            loop {
                match rx.try_recv() {
                    Ok(level) => self.transport.set_volume(level),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        finished = true;
                        break;
                    }
                }
            }
        }
        if finished {
            self.fade = Fade::Done;
        }
        let events = self.transport.poll(now);
        for e in &events {
            self.status.apply(e);
        }
        events
    }

    pub fn status(&self)     -> &PlayerStatus { &self.status }
    pub fn position(&self)   -> f64           { self.transport.position() }
    pub fn is_playing(&self) -> bool          { self.transport.is_playing() }
    pub fn volume(&self)     -> f32           { self.transport.volume() }

    pub fn fade_pending(&self) -> bool { matches!(self.fade, Fade::Pending) }
    pub fn fade_done(&self)    -> bool { matches!(self.fade, Fade::Done) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
