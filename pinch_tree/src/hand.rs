//! Hand-landmark sources.
//!
//! The public interface is a stream of [`Detection`]s delivered over a
//! `mpsc` channel, one per detector invocation. Consumers don't need to know
//! whether detections came from a real tracker or the keyboard simulator.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use pinch_signal::{Detection, HandLandmarks, Landmark, JOINT_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`Detection`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<Detection>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<Detection> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// Synthetic hand
// ════════════════════════════════════════════════════════════════════════════

pub const MIN_PINCH:  f32 = 0.0;
pub const MAX_PINCH:  f32 = 0.35;
pub const PINCH_STEP: f32 = 0.01;

/// Knuckle offsets from the palm centre, thumb first.
const KNUCKLES: [(f32, f32); 5] = [(-0.07, 0.09), (-0.035, 0.04), (0.0, 0.035), (0.03, 0.04), (0.06, 0.05)];

/// Build a 21-joint hand around `palm` whose thumb and index tips are
/// exactly `pinch` apart.
pub fn synth_hand(palm: Landmark, pinch: f32) -> HandLandmarks {
    let wrist = Landmark::new(palm.x, palm.y + 0.15);
    let grip  = Landmark::new(palm.x - 0.02, palm.y - 0.1);
    let tips  = [
        Landmark::new(grip.x - pinch / 2.0, grip.y),
        Landmark::new(grip.x + pinch / 2.0, grip.y),
        Landmark::new(palm.x + 0.005, palm.y - 0.2),
        Landmark::new(palm.x + 0.04,  palm.y - 0.18),
        Landmark::new(palm.x + 0.08,  palm.y - 0.14),
    ];

    let mut joints = [Landmark::default(); JOINT_COUNT];
    joints[0] = wrist;
    for (finger, (&(kx, ky), tip)) in KNUCKLES.iter().zip(tips).enumerate() {
        let knuckle = Landmark::new(palm.x + kx, palm.y + ky);
        for j in 0..4 {
            let t = j as f32 / 3.0;
            joints[1 + finger * 4 + j] = Landmark::new(
                knuckle.x + (tip.x - knuckle.x) * t,
                knuckle.y + (tip.y - knuckle.y) * t,
            );
        }
        // Exact endpoint, not an interpolated approximation.
        joints[4 + finger * 4] = tip;
    }
    HandLandmarks::new(joints)
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — keyboard simulation
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    ToggleHand,       // H
    Widen,            // Up
    Narrow,           // Down
    ToggleSecondHand, // 2
}

/// What the simulator currently shows the "camera".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimHand {
    pub present: bool,
    pub pinch:   f32,
    pub two:     bool,
}

impl Default for SimHand {
    fn default() -> Self {
        SimHand { present: false, pinch: 0.1, two: false }
    }
}

impl SimHand {
    pub fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::ToggleHand       => self.present = !self.present,
            SimInput::Widen            => self.pinch = (self.pinch + PINCH_STEP).min(MAX_PINCH),
            SimInput::Narrow           => self.pinch = (self.pinch - PINCH_STEP).max(MIN_PINCH),
            SimInput::ToggleSecondHand => self.two = !self.two,
        }
    }

    /// Detection for this moment; `wobble` is seconds, used for a slight drift.
    pub fn detect(&self, wobble: f32) -> Detection {
        if !self.present {
            return Detection::empty();
        }
        let palm = Landmark::new(0.5 + (wobble * 0.9).sin() * 0.01, 0.55 + (wobble * 1.3).cos() * 0.01);
        let hand = synth_hand(palm, self.pinch);
        if self.two {
            let other = synth_hand(Landmark::new(palm.x - 0.3, palm.y), self.pinch);
            Detection { hands: vec![hand, other] }
        } else {
            Detection::single(hand)
        }
    }
}

/// Landmark source driven by [`SimInput`] events from the visualizer's
/// window, emitting one detection per `interval` like a camera pipeline.
pub struct SimHandSource {
    pub rx:       Receiver<SimInput>,
    pub interval: Duration,
}

impl LandmarkSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<Detection>) {
        let start = Instant::now();
        let mut hand = SimHand::default();
        loop {
            loop {
                match self.rx.try_recv() {
                    Ok(input) => {
                        hand.apply(input);
                        log::debug!("[hand] {:?} → {:?}", input, hand);
                    }
                    Err(TryRecvError::Empty)        => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }
            if tx.send(hand.detect(start.elapsed().as_secs_f32())).is_err() {
                return;
            }
            thread::sleep(self.interval);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use pinch_signal::{INDEX_TIP, THUMB_TIP};

    #[test]
    fn synth_pinch_is_exact() {
        for &d in &[0.0, 0.05, 0.12, 0.25, 0.35] {
            let hand = synth_hand(Landmark::new(0.5, 0.5), d);
            assert!((hand.pinch_distance() - d).abs() < 1e-6);
        }
    }

    #[test]
    fn synth_hand_stays_in_frame() {
        let hand = synth_hand(Landmark::new(0.5, 0.55), MAX_PINCH);
        for j in hand.joints() {
            assert!((0.0..=1.0).contains(&j.x) && (0.0..=1.0).contains(&j.y));
        }
        assert_eq!(hand.joint(THUMB_TIP).y, hand.joint(INDEX_TIP).y);
    }

    #[test]
    fn sim_state_transitions() {
        let mut s = SimHand::default();
        assert!(s.detect(0.0).hands.is_empty());
        s.apply(SimInput::ToggleHand);
        assert_eq!(s.detect(0.0).hands.len(), 1);
        s.apply(SimInput::ToggleSecondHand);
        let d = s.detect(0.0);
        assert_eq!(d.hands.len(), 2);
        assert!(d.sole_hand().is_none());
        for _ in 0..100 { s.apply(SimInput::Widen); }
        assert_eq!(s.pinch, MAX_PINCH);
        for _ in 0..100 { s.apply(SimInput::Narrow); }
        assert_eq!(s.pinch, MIN_PINCH);
    }

    #[test]
    fn source_thread_emits_and_stops() {
        let (tx, rx) = mpsc::channel();
        let detections = spawn_landmark_source(SimHandSource { rx, interval: Duration::from_millis(1) });
        tx.send(SimInput::ToggleHand).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut saw_hand = false;
        while Instant::now() < deadline {
            if let Ok(d) = detections.recv_timeout(Duration::from_millis(100)) {
                if d.sole_hand().is_some() {
                    saw_hand = true;
                    break;
                }
            }
        }
        assert!(saw_hand);
        drop(tx);
        // The thread notices the closed input channel and exits.
        while detections.recv_timeout(Duration::from_secs(5)).is_ok() {}
    }
}
