//! `minifb` window: presents the canvas and gathers input.
//!
//! Keyboard input meant for the hand simulator is forwarded as
//! [`SimInput`] over a channel; everything the stage or the music player
//! needs comes back from [`Visualizer::poll_input`] as a [`FrameInput`].

use glam::Vec2;
use minifb::{CursorStyle, Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::canvas::{rgb, Canvas};
use crate::error::AppError;
use crate::hand::SimInput;

/// Seconds skipped by one Left/Right press.
pub const SEEK_STEP: f64 = 5.0;

const LEGEND: &str = "H=hand  UP/DOWN=pinch  2=second hand  SPACE=play  LEFT/RIGHT=seek  ESC=close  Q=quit";
const LEGEND_COLOR: u32 = rgb(0x88, 0x88, 0x88);

// ════════════════════════════════════════════════════════════════════════════
// FrameInput
// ════════════════════════════════════════════════════════════════════════════

/// Input gathered in one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub pointer:      Option<Vec2>,
    /// Left button went down this frame.
    pub clicked:      bool,
    pub toggle_play:  bool,
    /// Net seek in seconds.
    pub seek:         f64,
    pub close_viewer: bool,
    pub quit:         bool,
}

/// Rising edge of a button.
pub fn click_edge(was_down: bool, is_down: bool) -> bool {
    is_down && !was_down
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:      Window,
    width:       usize,
    height:      usize,
    sim_tx:      Sender<SimInput>,
    mouse_down:  bool,
    hand_cursor: bool,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Pinch Tree",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            width,
            height,
            sim_tx,
            mouse_down:  false,
            hand_cursor: false,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse. Simulator keys go straight to the sim thread.
    pub fn poll_input(&mut self) -> FrameInput {
        let mut input = FrameInput::default();
        if !self.window.is_open() {
            input.quit = true;
            return input;
        }

        // Keys that trigger on first press only
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        // Keys that repeat while held
        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        let mut sim = Vec::new();
        if one_shot(Key::H)    { sim.push(SimInput::ToggleHand); }
        if one_shot(Key::Key2) { sim.push(SimInput::ToggleSecondHand); }
        if held(Key::Up)       { sim.push(SimInput::Widen); }
        if held(Key::Down)     { sim.push(SimInput::Narrow); }

        input.quit         = one_shot(Key::Q);
        input.toggle_play  = one_shot(Key::Space);
        input.close_viewer = one_shot(Key::Escape);
        if one_shot(Key::Left)  { input.seek -= SEEK_STEP; }
        if one_shot(Key::Right) { input.seek += SEEK_STEP; }

        for s in sim {
            let _ = self.sim_tx.send(s);
        }

        input.pointer = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Vec2::new(x, y));
        let down = self.window.get_mouse_down(MouseButton::Left);
        input.clicked   = click_edge(self.mouse_down, down);
        self.mouse_down = down;

        input
    }

    /// Hand cursor while a photo is under the pointer.
    pub fn set_hand_cursor(&mut self, on: bool) {
        if on != self.hand_cursor {
            self.hand_cursor = on;
            let style = if on { CursorStyle::ClosedHand } else { CursorStyle::Arrow };
            self.window.set_cursor_style(style);
        }
    }

    /// Stamp the key legend and push the canvas to the window.
    pub fn present(&mut self, canvas: &mut Canvas) -> Result<(), AppError> {
        canvas.draw_label(LEGEND, 10, self.height as i32 - 12, LEGEND_COLOR);
        self.window.update_with_buffer(canvas.pixels(), self.width, self.height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_is_rising_edge_only() {
        assert!(click_edge(false, true));
        assert!(!click_edge(true, true));
        assert!(!click_edge(true, false));
        assert!(!click_edge(false, false));
    }
}
