//! Animation phases and their transition table.
//!
//! ```text
//!            HandDetected            HoldCompleted           BurstDepleted
//!   Idle ───────────────▶ Tracking ───────────────▶ Explosion ─────────────▶ Gallery
//!     ▲                      │                                               (terminal)
//!     └──────── HandLost ────┘
//! ```

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Tracking,
    Explosion,
    Gallery,
}

impl fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnimationPhase::Idle      => "IDLE",
            AnimationPhase::Tracking  => "TRACKING",
            AnimationPhase::Explosion => "EXPLOSION",
            AnimationPhase::Gallery   => "GALLERY",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseEvent {
    HandDetected,
    HandLost,
    /// Scale stayed above the threshold for the full hold duration.
    HoldCompleted,
    /// The last burst particle died this tick.
    BurstDepleted,
}

/// Every legal `(from, event) → to` edge. Anything else is ignored.
pub const TRANSITIONS: [(AnimationPhase, PhaseEvent, AnimationPhase); 4] = [
    (AnimationPhase::Idle,      PhaseEvent::HandDetected,  AnimationPhase::Tracking),
    (AnimationPhase::Tracking,  PhaseEvent::HandLost,      AnimationPhase::Idle),
    (AnimationPhase::Tracking,  PhaseEvent::HoldCompleted, AnimationPhase::Explosion),
    (AnimationPhase::Explosion, PhaseEvent::BurstDepleted, AnimationPhase::Gallery),
];

/// Next phase for `event` in `phase`, or `None` when the table has no edge.
pub fn transition(phase: AnimationPhase, event: PhaseEvent) -> Option<AnimationPhase> {
    TRANSITIONS
        .iter()
        .find(|(from, on, _)| *from == phase && *on == event)
        .map(|&(_, _, to)| to)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
