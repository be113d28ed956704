//! Active-cue tracking.

use crate::caption::CaptionPose;
use crate::cue::{CueSheet, LyricCue};

/// Which cue is showing. Its animation clock is the playback position
/// minus the cue's timestamp, so a change of cue restarts it from zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptionAnimationState {
    pub active_cue: Option<usize>,
}

/// A cue ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Caption<'a> {
    pub text:    &'a str,
    pub pose:    CaptionPose,
    /// Seconds into the cue.
    pub elapsed: f64,
}

/// Drives caption selection from the playback position.
#[derive(Clone, Debug)]
pub struct LyricSync {
    sheet: CueSheet,
    state: CaptionAnimationState,
}

impl LyricSync {
    pub fn new(sheet: CueSheet) -> Self {
        LyricSync { sheet, state: CaptionAnimationState::default() }
    }

    /// Re-evaluate the active cue for `playback_time`.
    ///
    /// Does nothing while audio is paused. Returns `true` when the active
    /// cue changed.
    pub fn update(&mut self, playback_time: f64, playing: bool) -> bool {
        if !playing {
            return false;
        }
        let found = self.sheet.index_at(playback_time);
        if found == self.state.active_cue {
            return false;
        }
        self.state = CaptionAnimationState { active_cue: found };
        if let Some(i) = found {
            log::debug!("[lyrics] cue {} @ {:.2}s", i, playback_time);
        }
        true
    }

    /// Caption for the active cue at `playback_time`, or `None` when no cue
    /// applies (before the first cue, or past the active cue's range).
    pub fn caption(&self, playback_time: f64) -> Option<Caption<'_>> {
        let index   = self.state.active_cue?;
        let cue     = self.sheet.get(index)?;
        let elapsed = playback_time - cue.timestamp;
        if elapsed < 0.0 {
            return None;
        }
        let duration = self.sheet.duration_of(index);
        if duration.is_some_and(|d| elapsed > d) {
            return None;
        }
        Some(Caption {
            text: &cue.text,
            pose: CaptionPose::at(elapsed, duration),
            elapsed,
        })
    }

    pub fn active_cue(&self) -> Option<&LyricCue> {
        self.state.active_cue.and_then(|i| self.sheet.get(i))
    }

    /// Duration of the active cue; `None` when no cue is active or the
    /// active cue is the last one.
    pub fn active_duration(&self) -> Option<f64> {
        self.state.active_cue.and_then(|i| self.sheet.duration_of(i))
    }

    pub fn state(&self) -> CaptionAnimationState { self.state }
    pub fn sheet(&self) -> &CueSheet             { &self.sheet }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
