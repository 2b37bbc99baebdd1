use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, KeyState};
use super::Key;

/// Held-key state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies `ev` and records the resulting transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // A key released while unfocused never reports; don't leave it stuck.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(&key) {
                        frame.keys_released.insert(key);
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// `-1`, `0` or `1` from a pair of opposing keys.
    pub fn axis(&self, negative: Key, positive: Key) -> i32 {
        self.key_down(positive) as i32 - self.key_down(negative) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_is_reported_once_while_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(frame.pressed(Key::Space));

        frame.clear();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(!frame.pressed(Key::Space));
        assert!(state.key_down(Key::Space));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::ArrowLeft));
    }

    #[test]
    fn axis_cancels_opposing_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowRight, KeyState::Pressed));
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), 1);

        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed));
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), 0);
    }
}
