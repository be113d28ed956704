//! # pinch_signal
//!
//! Turns the 21 normalized joint positions reported by a hand-landmark
//! detector into one smoothed, bounded control value.
//!
//! The signal is the thumb-tip / index-tip pinch distance, remapped so that
//! a closed pinch (0.05) reads as `0.0` and a wide pinch (0.25) reads as
//! `1.0`, then damped with an exponential moving average applied once per
//! detector callback.
//!
//! ```rust
//! use pinch_signal::{GestureInterpreter, HandLandmarks, Landmark, THUMB_TIP, INDEX_TIP};
//!
//! let mut joints = [Landmark::new(0.5, 0.5); 21];
//! joints[THUMB_TIP] = Landmark::new(0.40, 0.50);
//! joints[INDEX_TIP] = Landmark::new(0.65, 0.50);
//! let hand = HandLandmarks::new(joints);
//!
//! let mut gi = GestureInterpreter::default();
//! let scale = gi.observe(&hand);
//! assert!(scale > 0.0 && scale <= 1.0);
//! ```

use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Joint indices (21-point hand model)
// ════════════════════════════════════════════════════════════════════════════

pub const JOINT_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP:   usize = 16;
pub const PINKY_TIP:  usize = 20;

/// All five fingertip joints.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Bone connections of the hand skeleton (pairs of joint indices).
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),   (1, 2),   (2, 3),   (3, 4),
    (0, 5),   (5, 6),   (6, 7),   (7, 8),
    (5, 9),   (9, 10),  (10, 11), (11, 12),
    (9, 13),  (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// A normalized joint position; `x` and `y` are in `[0, 1]` image space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }

    /// Euclidean distance in normalized space.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarks — exactly 21 joints
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected {JOINT_COUNT} hand landmarks, got {0}")]
pub struct JointCountError(pub usize);

/// One detected hand. The joint index is the array index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks {
    joints: [Landmark; JOINT_COUNT],
}

impl HandLandmarks {
    pub fn new(joints: [Landmark; JOINT_COUNT]) -> Self {
        HandLandmarks { joints }
    }

    pub fn joint(&self, index: usize) -> Landmark {
        self.joints[index]
    }

    pub fn joints(&self) -> &[Landmark; JOINT_COUNT] {
        &self.joints
    }

    /// Thumb-tip to index-tip distance in normalized space.
    pub fn pinch_distance(&self) -> f32 {
        self.joints[THUMB_TIP].distance(&self.joints[INDEX_TIP])
    }
}

impl TryFrom<&[Landmark]> for HandLandmarks {
    type Error = JointCountError;

    fn try_from(points: &[Landmark]) -> Result<Self, Self::Error> {
        let joints: [Landmark; JOINT_COUNT] =
            points.try_into().map_err(|_| JointCountError(points.len()))?;
        Ok(HandLandmarks { joints })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Detection — one detector callback
// ════════════════════════════════════════════════════════════════════════════

/// The result of one detector invocation: zero or more hands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Detection {
    pub hands: Vec<HandLandmarks>,
}

impl Detection {
    pub fn empty() -> Self {
        Detection { hands: Vec::new() }
    }

    pub fn single(hand: HandLandmarks) -> Self {
        Detection { hands: vec![hand] }
    }

    /// The hand, when exactly one is present. Zero or several hands carry
    /// no usable signal.
    pub fn sole_hand(&self) -> Option<&HandLandmarks> {
        match self.hands.as_slice() {
            [hand] => Some(hand),
            _      => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Control signal
// ════════════════════════════════════════════════════════════════════════════

/// Pinch distance that maps to a signal of 0.
pub const PINCH_CLOSED: f32 = 0.05;
/// Distance span over which the signal rises from 0 to 1.
pub const PINCH_SPAN:   f32 = 0.20;
/// EMA weight of each new sample.
pub const SMOOTHING:    f32 = 0.1;

/// Remap a pinch distance to `[0, 1]`: 0.05 → 0, 0.25 → 1.
pub fn control_signal(pinch_distance: f32) -> f32 {
    let raw = (pinch_distance - PINCH_CLOSED) / PINCH_SPAN;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

// ════════════════════════════════════════════════════════════════════════════
// GestureInterpreter
// ════════════════════════════════════════════════════════════════════════════

/// Last observed distance and the damped control value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub raw_distance:   f32,
    /// Always within `[0, 1]`.
    pub smoothed_scale: f32,
}

/// Stateful smoother fed once per detector callback.
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    state:     GestureState,
    smoothing: f32,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        GestureInterpreter::with_smoothing(SMOOTHING)
    }
}

impl GestureInterpreter {
    pub fn with_smoothing(smoothing: f32) -> Self {
        GestureInterpreter {
            state:     GestureState::default(),
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    /// Fold one hand observation into the smoothed scale and return it.
    pub fn observe(&mut self, hand: &HandLandmarks) -> f32 {
        let distance = hand.pinch_distance();
        let raw      = control_signal(distance);
        let scale    = self.state.smoothed_scale;

        self.state.raw_distance   = distance;
        self.state.smoothed_scale = (scale + (raw - scale) * self.smoothing).clamp(0.0, 1.0);
        log::trace!("[gesture] pinch d={:.3} raw={:.3} scale={:.3}", distance, raw, self.state.smoothed_scale);
        self.state.smoothed_scale
    }

    /// Forget the current scale (hand lost).
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }

    pub fn state(&self) -> GestureState { self.state }
    pub fn scale(&self) -> f32          { self.state.smoothed_scale }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hand_with_pinch(d: f32) -> HandLandmarks {
        let mut joints = [Landmark::new(0.5, 0.5); JOINT_COUNT];
        joints[THUMB_TIP] = Landmark::new(0.3, 0.4);
        joints[INDEX_TIP] = Landmark::new(0.3 + d, 0.4);
        HandLandmarks::new(joints)
    }

    #[test]
    fn signal_endpoints() {
        assert_eq!(control_signal(0.05), 0.0);
        assert!((control_signal(0.25) - 1.0).abs() < 1e-6);
        assert!((control_signal(0.15) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn signal_clamps_outside_range() {
        assert_eq!(control_signal(0.0), 0.0);
        assert_eq!(control_signal(0.9), 1.0);
        assert_eq!(control_signal(f32::NAN), 0.0);
    }

    #[test]
    fn pinch_distance_is_euclidean() {
        let mut joints = [Landmark::default(); JOINT_COUNT];
        joints[THUMB_TIP] = Landmark::new(0.1, 0.1);
        joints[INDEX_TIP] = Landmark::new(0.4, 0.5);
        let hand = HandLandmarks::new(joints);
        assert!((hand.pinch_distance() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn smoothing_moves_a_tenth_of_the_gap() {
        let mut gi = GestureInterpreter::default();
        let s = gi.observe(&hand_with_pinch(0.25));
        assert!((s - 0.1).abs() < 1e-6);
        let s = gi.observe(&hand_with_pinch(0.25));
        assert!((s - 0.19).abs() < 1e-6);
    }

    #[test]
    fn smoothing_converges_to_raw() {
        let mut gi = GestureInterpreter::default();
        for _ in 0..200 { gi.observe(&hand_with_pinch(0.25)); }
        assert!(gi.scale() > 0.99);
        assert!(gi.scale() <= 1.0);
    }

    #[test]
    fn reset_zeroes_scale() {
        let mut gi = GestureInterpreter::default();
        gi.observe(&hand_with_pinch(0.2));
        gi.reset();
        assert_eq!(gi.state(), GestureState::default());
    }

    #[test]
    fn wrong_joint_count_rejected() {
        let pts = vec![Landmark::default(); 20];
        assert_eq!(HandLandmarks::try_from(pts.as_slice()), Err(JointCountError(20)));
        let pts = vec![Landmark::default(); 21];
        assert!(HandLandmarks::try_from(pts.as_slice()).is_ok());
    }

    #[test]
    fn two_hands_carry_no_signal() {
        let h = hand_with_pinch(0.1);
        assert!(Detection::empty().sole_hand().is_none());
        assert!(Detection::single(h).sole_hand().is_some());
        assert!(Detection { hands: vec![h, h] }.sole_hand().is_none());
    }

    proptest! {
        #[test]
        fn signal_always_bounded(d in -10.0f32..10.0) {
            let s = control_signal(d);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn smoothed_scale_stays_bounded(ds in proptest::collection::vec(0.0f32..1.5, 1..100)) {
            let mut gi = GestureInterpreter::default();
            for d in ds {
                let s = gi.observe(&hand_with_pinch(d));
                prop_assert!((0.0..=1.0).contains(&s));
            }
        }
    }
}
