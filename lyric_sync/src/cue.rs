//! Lyric cues and the sorted cue sheet.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builtin::DEFAULT_CUES;

#[derive(Debug, Error)]
pub enum LyricError {
    #[error("cannot read lyric file {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed lyric file: {0}")]
    Parse(#[from] serde_json::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// LyricCue
// ════════════════════════════════════════════════════════════════════════════

/// One line of lyrics and the playback second at which it starts.
///
/// Serialized as `{ "time": 23.67, "text": "..." }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LyricCue {
    #[serde(rename = "time")]
    pub timestamp: f64,
    pub text:      String,
}

impl LyricCue {
    pub fn new(timestamp: f64, text: &str) -> Self {
        LyricCue { timestamp, text: text.to_string() }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CueSheet
// ════════════════════════════════════════════════════════════════════════════

/// Timestamp-ascending cue list. Never mutated after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CueSheet {
    cues: Vec<LyricCue>,
}

impl CueSheet {
    /// Sort `cues` by timestamp. Cues with a non-finite timestamp are dropped.
    pub fn new(mut cues: Vec<LyricCue>) -> Self {
        let before = cues.len();
        cues.retain(|c| c.timestamp.is_finite());
        if cues.len() != before {
            log::warn!("[lyrics] dropped {} cue(s) with invalid timestamps", before - cues.len());
        }
        cues.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        CueSheet { cues }
    }

    /// Parse a JSON array of `{ "time", "text" }` objects.
    pub fn from_json(json: &str) -> Result<Self, LyricError> {
        let cues: Vec<LyricCue> = serde_json::from_str(json)?;
        Ok(CueSheet::new(cues))
    }

    pub fn load(path: &Path) -> Result<Self, LyricError> {
        let json = fs::read_to_string(path).map_err(|source| LyricError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let sheet = CueSheet::from_json(&json)?;
        log::info!("[lyrics] loaded {} cues from {}", sheet.len(), path.display());
        Ok(sheet)
    }

    /// The song the program ships with.
    pub fn builtin() -> Self {
        CueSheet::new(
            DEFAULT_CUES.iter().map(|&(t, text)| LyricCue::new(t, text)).collect(),
        )
    }

    pub fn cues(&self) -> &[LyricCue]          { &self.cues }
    pub fn get(&self, i: usize) -> Option<&LyricCue> { self.cues.get(i) }
    pub fn len(&self) -> usize                 { self.cues.len() }
    pub fn is_empty(&self) -> bool             { self.cues.is_empty() }

    /// Greatest index whose timestamp is `<= time`, found by scanning the
    /// whole sheet (no cached cursor).
    pub fn index_at(&self, time: f64) -> Option<usize> {
        self.cues.iter().rposition(|c| c.timestamp <= time)
    }

    /// Seconds until the next cue starts; `None` for the final cue, which
    /// runs indefinitely.
    pub fn duration_of(&self, index: usize) -> Option<f64> {
        let this = self.cues.get(index)?;
        let next = self.cues.get(index + 1)?;
        Some(next.timestamp - this.timestamp)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
