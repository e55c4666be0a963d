use crate::key::{Key, MouseButton};
use glam::Vec2;
use std::collections::BTreeSet;

/// Accumulates raw input events between frames.
///
/// The host feeds events as they arrive and calls [`InputState::snapshot`]
/// once per frame. Nothing reads this directly during update.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: BTreeSet<Key>,
    keys_pressed: BTreeSet<Key>,
    buttons_down: BTreeSet<MouseButton>,
    mouse_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. A press for a key that is already held is
    /// OS auto-repeat and does not produce a new edge.
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        if pressed {
            if self.keys_down.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_down.insert(button);
        } else {
            self.buttons_down.remove(&button);
        }
    }

    /// Add raw pointer motion. Deltas sum until the next snapshot.
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    /// Forget everything held, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.keys_pressed.clear();
        self.buttons_down.clear();
        self.mouse_delta = Vec2::ZERO;
        tracing::debug!("input state cleared");
    }

    /// Capture this frame's input and reset the per-frame accumulators.
    pub fn snapshot(&mut self) -> FrameInput {
        FrameInput {
            keys_down: self.keys_down.clone(),
            keys_pressed: std::mem::take(&mut self.keys_pressed),
            buttons_down: self.buttons_down.clone(),
            mouse_delta: std::mem::replace(&mut self.mouse_delta, Vec2::ZERO),
            keyboard_captured: false,
            mouse_captured: false,
        }
    }
}

/// Input for a single frame, passed explicitly into update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    keys_down: BTreeSet<Key>,
    keys_pressed: BTreeSet<Key>,
    buttons_down: BTreeSet<MouseButton>,
    mouse_delta: Vec2,
    keyboard_captured: bool,
    mouse_captured: bool,
}

impl FrameInput {
    /// An empty frame: nothing held, no motion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Key is currently held.
    pub fn key_down(&self, key: Key) -> bool {
        !self.keyboard_captured && self.keys_down.contains(&key)
    }

    /// Key went down since the previous frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        !self.keyboard_captured && self.keys_pressed.contains(&key)
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        !self.mouse_captured && self.buttons_down.contains(&button)
    }

    /// Summed pointer motion since the previous frame.
    pub fn mouse_delta(&self) -> Vec2 {
        if self.mouse_captured {
            Vec2::ZERO
        } else {
            self.mouse_delta
        }
    }

    pub fn set_keyboard_capture(&mut self, captured: bool) {
        self.keyboard_captured = captured;
    }

    pub fn set_mouse_capture(&mut self, captured: bool) {
        self.mouse_captured = captured;
    }

    pub fn keyboard_captured(&self) -> bool {
        self.keyboard_captured
    }

    pub fn mouse_captured(&self) -> bool {
        self.mouse_captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_edge_triggered() {
        let mut state = InputState::new();
        state.handle_key(Key::C, true);
        let first = state.snapshot();
        assert!(first.key_down(Key::C));
        assert!(first.key_pressed(Key::C));

        let held = state.snapshot();
        assert!(held.key_down(Key::C));
        assert!(!held.key_pressed(Key::C));
    }

    #[test]
    fn auto_repeat_is_not_a_new_press() {
        let mut state = InputState::new();
        state.handle_key(Key::C, true);
        let _ = state.snapshot();
        state.handle_key(Key::C, true);
        state.handle_key(Key::C, true);
        assert!(!state.snapshot().key_pressed(Key::C));
    }

    #[test]
    fn tap_within_one_frame_still_counts() {
        let mut state = InputState::new();
        state.handle_key(Key::C, true);
        state.handle_key(Key::C, false);
        let frame = state.snapshot();
        assert!(frame.key_pressed(Key::C));
        assert!(!frame.key_down(Key::C));
    }

    #[test]
    fn release_then_press_is_new_edge() {
        let mut state = InputState::new();
        state.handle_key(Key::C, true);
        let _ = state.snapshot();
        state.handle_key(Key::C, false);
        let _ = state.snapshot();
        state.handle_key(Key::C, true);
        assert!(state.snapshot().key_pressed(Key::C));
    }

    #[test]
    fn mouse_delta_accumulates_and_resets() {
        let mut state = InputState::new();
        state.handle_mouse_motion(1.0, 2.0);
        state.handle_mouse_motion(3.0, -1.0);
        assert_eq!(state.snapshot().mouse_delta(), Vec2::new(4.0, 1.0));
        assert_eq!(state.snapshot().mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn capture_hides_device() {
        let mut state = InputState::new();
        state.handle_key(Key::W, true);
        state.handle_mouse_button(MouseButton::Left, true);
        state.handle_mouse_motion(5.0, 5.0);
        let mut frame = state.snapshot();

        frame.set_keyboard_capture(true);
        assert!(!frame.key_down(Key::W));
        assert!(!frame.key_pressed(Key::W));
        assert!(frame.mouse_down(MouseButton::Left));

        frame.set_mouse_capture(true);
        assert!(!frame.mouse_down(MouseButton::Left));
        assert_eq!(frame.mouse_delta(), Vec2::ZERO);

        frame.set_keyboard_capture(false);
        assert!(frame.key_down(Key::W));
    }

    #[test]
    fn clear_drops_held_keys() {
        let mut state = InputState::new();
        state.handle_key(Key::Escape, true);
        state.clear();
        assert!(!state.snapshot().key_down(Key::Escape));
    }
}
