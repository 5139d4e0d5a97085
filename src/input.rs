//! Input ingestion and the double-buffered input record.
//!
//! Raw device events accumulate into a *pending* [`InputState`] between
//! frames. At `start_frame` the window snapshots pending into the *active*
//! state and drains the pending one-shot sets (key triggers, typed chars);
//! widget logic only ever reads the active snapshot, so ingestion calls are
//! safe at any point, including mid-frame.

use std::collections::HashSet;

use bitflags::bitflags;

bitflags! {
    /// Held mouse buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

/// A mouse button identifier for ingestion calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn flag(self) -> MouseButtons {
        match self {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

/// A snapshot of input devices at one instant.
///
/// `keys` and `buttons` are level state and persist across frames;
/// `key_triggers` and `chars` are "since the last frame" sets that the
/// frame lifecycle drains on snapshot. Typed characters keep their arrival
/// order, so a focused text field applies them in the order they were typed.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Key codes currently held down.
    pub keys: HashSet<u32>,
    /// Key codes that transitioned to pressed since the last frame.
    pub key_triggers: HashSet<u32>,
    /// Characters typed since the last frame, in arrival order.
    pub chars: Vec<char>,
    /// Mouse position.
    pub mouse_x: i32,
    pub mouse_y: i32,
    /// Held mouse buttons.
    pub buttons: MouseButtons,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the mouse position.
    pub fn set_mouse_pos(&mut self, x: i32, y: i32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Record a mouse button press.
    pub fn press_button(&mut self, button: MouseButton) {
        self.buttons.insert(button.flag());
    }

    /// Record a mouse button release.
    pub fn release_button(&mut self, button: MouseButton) {
        self.buttons.remove(button.flag());
    }

    /// Record a key press: the code joins both the held set and the
    /// trigger set.
    pub fn press_key(&mut self, code: u32) {
        self.keys.insert(code);
        self.key_triggers.insert(code);
    }

    /// Record a key release: the code leaves the held set only; a trigger
    /// registered earlier this frame stays visible.
    pub fn release_key(&mut self, code: u32) {
        self.keys.remove(&code);
    }

    /// Record a typed character. Backspace arrives as `'\u{8}'`.
    pub fn push_char(&mut self, ch: char) {
        self.chars.push(ch);
    }

    /// Drop the one-shot sets while keeping level state (held keys, mouse
    /// position, held buttons). Called on the pending state at frame start.
    pub fn drain_one_shots(&mut self) {
        self.key_triggers.clear();
        self.chars.clear();
    }

    /// True while the primary button is held.
    #[inline]
    pub fn left_down(&self) -> bool {
        self.buttons.contains(MouseButtons::LEFT)
    }
}
