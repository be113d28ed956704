//! # lyric_sync
//!
//! Maps an audio playback position to the lyric line that should be on
//! screen, and describes how that line animates while it is shown.
//!
//! * [`CueSheet`]: immutable, timestamp-ascending list of [`LyricCue`]s.
//! * [`LyricSync`]: picks the active cue by a full rescan on every update,
//!   so arbitrary seeks (forward or backward) always land on the right line.
//! * [`CaptionPose`]: opacity / scale / offset / rotation / blur for the
//!   entrance, idle and exit phases of a cue.
//!
//! ```rust
//! use lyric_sync::{CueSheet, LyricCue, LyricSync};
//!
//! let sheet = CueSheet::new(vec![
//!     LyricCue::new(23.67, "Snowflakes dancing 'round"),
//!     LyricCue::new(26.55, "Landing on your brow"),
//! ]);
//! let mut sync = LyricSync::new(sheet);
//! sync.update(25.0, true);
//! assert_eq!(sync.active_cue().map(|c| c.text.as_str()), Some("Snowflakes dancing 'round"));
//! ```

mod builtin;
pub mod caption;
pub mod cue;
pub mod sync;

pub use caption::{CaptionPose, ENTRANCE_SECS, EXIT_SECS};
pub use cue::{CueSheet, LyricCue, LyricError};
pub use sync::{Caption, CaptionAnimationState, LyricSync};
