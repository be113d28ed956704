//! Caption animation curves.
//!
//! A cue's on-screen life is split into three phases keyed to the seconds
//! elapsed since the cue started:
//!
//! ```text
//!  0 ─ 0.3s          idle                      duration-0.3s ─ duration
//!  [ entrance ]──────────────────────────────────[   exit   ]
//!   back-ease pop     slow multi-sine breathing    fade up + blur
//! ```

/// Length of the entrance phase in seconds.
pub const ENTRANCE_SECS: f64 = 0.3;
/// Length of the exit phase in seconds.
pub const EXIT_SECS: f64 = 0.3;

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

/// Back-ease-out: rises past 1.0 and settles back, `f(0) = 0`, `f(1) = 1`.
pub fn ease_out_back(p: f64) -> f64 {
    let q = p - 1.0;
    1.0 + BACK_C3 * q.powi(3) + BACK_C1 * q.powi(2)
}

/// Visual parameters of a caption for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionPose {
    pub opacity:  f32,
    pub scale:    f32,
    /// Pixels; positive is downward.
    pub y_offset: f32,
    /// Radians.
    pub rotation: f32,
    /// Blur radius in pixels.
    pub blur:     f32,
}

impl CaptionPose {
    pub const REST: CaptionPose = CaptionPose {
        opacity: 1.0, scale: 1.0, y_offset: 0.0, rotation: 0.0, blur: 0.0,
    };

    /// Pose for a cue `elapsed` seconds in. `duration` is `None` for the
    /// final cue, which never exits.
    pub fn at(elapsed: f64, duration: Option<f64>) -> CaptionPose {
        if elapsed < ENTRANCE_SECS {
            return Self::entrance(elapsed.max(0.0) / ENTRANCE_SECS);
        }
        if let Some(d) = duration {
            if elapsed > d - EXIT_SECS {
                let remaining = d - elapsed;
                return Self::exit((1.0 - remaining / EXIT_SECS).clamp(0.0, 1.0));
            }
        }
        Self::idle(elapsed - ENTRANCE_SECS)
    }

    fn entrance(p: f64) -> CaptionPose {
        let back = ease_out_back(p);
        CaptionPose {
            opacity:  (p * 2.0).min(1.0) as f32,
            scale:    (0.5 + 0.5 * back) as f32,
            y_offset: ((1.0 - back) * 30.0) as f32,
            rotation: 0.0,
            blur:     ((1.0 - p) * 5.0) as f32,
        }
    }

    fn exit(p: f64) -> CaptionPose {
        CaptionPose {
            opacity:  (1.0 - p) as f32,
            scale:    (1.0 + p * 0.2) as f32,
            y_offset: (-p * 40.0) as f32,
            rotation: 0.0,
            blur:     (p * 8.0) as f32,
        }
    }

    fn idle(t: f64) -> CaptionPose {
        CaptionPose {
            opacity:  1.0,
            scale:    (1.0 + (t * 1.2).sin() * 0.01 + (t * 2.5).sin() * 0.005) as f32,
            y_offset: ((t * 0.8).sin() * 4.0 + (t * 1.5).cos() * 2.0) as f32,
            rotation: ((t * 0.5).sin() * 0.01) as f32,
            blur:     0.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_ease_endpoints_and_overshoot() {
        assert!(ease_out_back(0.0).abs() < 1e-12);
        assert!((ease_out_back(1.0) - 1.0).abs() < 1e-12);
        let peak = (1..100).map(|i| ease_out_back(i as f64 / 100.0)).fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn entrance_starts_small_and_transparent() {
        let pose = CaptionPose::at(0.0, Some(3.0));
        assert_eq!(pose.opacity, 0.0);
        assert!((pose.scale - 0.5).abs() < 1e-6);
        assert!((pose.y_offset - 30.0).abs() < 1e-4);
        assert!((pose.blur - 5.0).abs() < 1e-6);
    }

    #[test]
    fn entrance_opacity_full_at_half_window() {
        let pose = CaptionPose::at(ENTRANCE_SECS / 2.0, Some(3.0));
        assert!((pose.opacity - 1.0).abs() < 1e-6);
        let later = CaptionPose::at(ENTRANCE_SECS * 0.9, Some(3.0));
        assert_eq!(later.opacity, 1.0);
    }

    #[test]
    fn entrance_scale_overshoots_one() {
        let overshoot = (1..30)
            .map(|i| CaptionPose::at(i as f64 * 0.01, Some(3.0)).scale)
            .any(|s| s > 1.0);
        assert!(overshoot);
    }

    #[test]
    fn idle_stays_near_rest() {
        for i in 0..200 {
            let pose = CaptionPose::at(0.3 + i as f64 * 0.01, Some(10.0));
            assert_eq!(pose.opacity, 1.0);
            assert!((pose.scale - 1.0).abs() <= 0.0151);
            assert!(pose.y_offset.abs() <= 6.01);
            assert!(pose.rotation.abs() <= 0.0101);
            assert_eq!(pose.blur, 0.0);
        }
    }

    #[test]
    fn idle_is_not_frozen() {
        let a = CaptionPose::at(1.0, Some(10.0));
        let b = CaptionPose::at(2.0, Some(10.0));
        assert_ne!(a, b);
    }

    #[test]
    fn exit_fades_grows_and_rises() {
        let start = CaptionPose::at(2.7, Some(3.0));
        let end   = CaptionPose::at(3.0, Some(3.0));
        assert!(start.opacity > 0.9);
        assert!(end.opacity.abs() < 1e-6);
        assert!((end.scale - 1.2).abs() < 1e-5);
        assert!((end.y_offset + 40.0).abs() < 1e-4);
        assert!((end.blur - 8.0).abs() < 1e-5);
    }

    #[test]
    fn final_cue_never_exits() {
        let pose = CaptionPose::at(500.0, None);
        assert_eq!(pose.opacity, 1.0);
    }
}
