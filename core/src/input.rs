//! Per-frame key, button and cursor state folded from events.

use std::collections::HashSet;

use crate::event::{Event, EventData, EventType, MouseButton, Size, WindowAction};
use crate::keyboard::{Key, Scancode};
use crate::modifiers::Modifiers;

/// Platform-agnostic input state, updated from the event stream.
///
/// The owner is responsible for:
/// 1. Calling [`begin_frame()`](InputState::begin_frame) once the current
///    frame's deltas have been consumed.
/// 2. Feeding every event of the new frame to [`apply()`](InputState::apply).
///
/// Key repeats never change state: a repeating key is already down.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current cursor position in window pixels.
    pub cursor_position: [f32; 2],
    /// Cursor movement accumulated this frame.
    pub cursor_delta: [f32; 2],
    /// Raw (unaccelerated) motion accumulated this frame.
    pub raw_delta: [f32; 2],
    /// Scroll accumulated this frame, in lines. Positive y = scroll up.
    pub scroll_delta: [f32; 2],
    /// Last known client size.
    pub window_size: Size,
    /// Whether the window currently has keyboard focus.
    pub focused: bool,
    /// Whether the cursor is inside the window.
    pub cursor_inside: bool,
    /// Modifiers reported by the most recent keyboard or mouse event.
    pub modifiers: Modifiers,

    pressed_keys: HashSet<Key>,
    pressed_scancodes: HashSet<Scancode>,
    pressed_buttons: HashSet<MouseButton>,
    /// Text typed this frame.
    text: String,
}

impl InputState {
    /// Reset per-frame deltas and typed text.
    pub fn begin_frame(&mut self) {
        self.cursor_delta = [0.0, 0.0];
        self.raw_delta = [0.0, 0.0];
        self.scroll_delta = [0.0, 0.0];
        self.text.clear();
    }

    /// Fold one event into the state.
    pub fn apply(&mut self, event: &Event) {
        match (event.ty(), event.data()) {
            (EventType::KeyPress, EventData::Key(key)) => {
                if key.key != Key::Unknown {
                    self.pressed_keys.insert(key.key);
                }
                if key.scancode != Scancode::Unknown {
                    self.pressed_scancodes.insert(key.scancode);
                }
                self.modifiers = key.modifiers;
            }
            (EventType::KeyRelease, EventData::Key(key)) => {
                self.pressed_keys.remove(&key.key);
                self.pressed_scancodes.remove(&key.scancode);
                self.modifiers = key.modifiers;
            }
            (EventType::TextInput, EventData::TextInput(text)) => {
                self.text.push(text.ch);
            }
            (
                EventType::MouseButtonPress | EventType::MouseDoubleClick,
                EventData::MouseButton(button),
            ) => {
                self.pressed_buttons.insert(button.button);
                self.modifiers = button.modifiers;
            }
            (EventType::MouseButtonRelease, EventData::MouseButton(button)) => {
                self.pressed_buttons.remove(&button.button);
                self.modifiers = button.modifiers;
            }
            (EventType::MouseMove, EventData::MouseMove(motion)) => {
                self.on_mouse_move(motion.x, motion.y);
            }
            (EventType::MouseRaw, EventData::MouseRaw(raw)) => {
                self.raw_delta[0] += raw.dx;
                self.raw_delta[1] += raw.dy;
            }
            (EventType::MouseWheel, EventData::MouseWheel(wheel)) => {
                self.scroll_delta[0] += wheel.dx;
                self.scroll_delta[1] += wheel.dy;
            }
            (EventType::MouseEnter, _) => self.cursor_inside = true,
            (EventType::MouseLeave, _) => self.cursor_inside = false,
            (EventType::WindowResize, EventData::WindowResize(resize)) => {
                self.window_size = resize.size;
            }
            (_, EventData::Window(window)) => match window.action {
                WindowAction::FocusGained => self.focused = true,
                WindowAction::FocusLost => {
                    // Releases are not delivered to unfocused windows.
                    self.focused = false;
                    self.release_all();
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn on_mouse_move(&mut self, x: f32, y: f32) {
        self.cursor_delta[0] += x - self.cursor_position[0];
        self.cursor_delta[1] += y - self.cursor_position[1];
        self.cursor_position = [x, y];
    }

    /// Forget every held key and button.
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_scancodes.clear();
        self.pressed_buttons.clear();
        self.modifiers = Modifiers {
            caps_lock: self.modifiers.caps_lock,
            num_lock: self.modifiers.num_lock,
            scroll_lock: self.modifiers.scroll_lock,
            ..Modifiers::NONE
        };
    }

    /// Check whether a key is held. Side-less modifiers match either side.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        if self.pressed_keys.contains(&key) {
            return true;
        }
        key.normalized() == key
            && key.is_modifier()
            && self.pressed_keys.iter().any(|k| k.normalized() == key)
    }

    pub fn is_scancode_pressed(&self, scancode: Scancode) -> bool {
        self.pressed_scancodes.contains(&scancode)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed_keys.iter().copied()
    }

    /// Text typed since the last [`begin_frame`](Self::begin_frame).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Window aspect ratio (width / height). Returns 1.0 if height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.window_size.height > 0 {
            self.window_size.width as f32 / self.window_size.height as f32
        } else {
            1.0
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            cursor_position: [0.0, 0.0],
            cursor_delta: [0.0, 0.0],
            raw_delta: [0.0, 0.0],
            scroll_delta: [0.0, 0.0],
            window_size: Size::new(800, 600),
            focused: true,
            cursor_inside: false,
            modifiers: Modifiers::NONE,
            pressed_keys: HashSet::new(),
            pressed_scancodes: HashSet::new(),
            pressed_buttons: HashSet::new(),
            text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        ButtonState, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent,
        TextInputEvent, WindowEvent, WindowResizeEvent,
    };

    fn press(key: Key, scancode: Scancode) -> Event {
        Event::new(KeyEvent::pressed(key, scancode, Modifiers::NONE))
    }

    fn release(key: Key, scancode: Scancode) -> Event {
        Event::new(KeyEvent::released(key, scancode, Modifiers::NONE))
    }

    fn moved(x: f32, y: f32) -> Event {
        Event::new(MouseMoveEvent {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            modifiers: Modifiers::NONE,
        })
    }

    #[test]
    fn begin_frame_clears_deltas() {
        let mut input = InputState {
            cursor_delta: [10.0, 20.0],
            scroll_delta: [1.0, 2.0],
            ..InputState::default()
        };
        input.apply(&Event::new(TextInputEvent::new('x').unwrap()));
        input.begin_frame();
        assert_eq!(input.cursor_delta, [0.0, 0.0]);
        assert_eq!(input.scroll_delta, [0.0, 0.0]);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn mouse_move_accumulates_delta() {
        let mut input = InputState::default();
        input.apply(&moved(100.0, 200.0));
        assert_eq!(input.cursor_position, [100.0, 200.0]);
        assert_eq!(input.cursor_delta, [100.0, 200.0]);

        // Second move accumulates
        input.apply(&moved(110.0, 205.0));
        assert_eq!(input.cursor_position, [110.0, 205.0]);
        assert_eq!(input.cursor_delta, [110.0, 205.0]);
    }

    #[test]
    fn mouse_buttons() {
        let mut input = InputState::default();
        let down = MouseButtonEvent::new(MouseButton::Right, ButtonState::Pressed, 0.0, 0.0);
        input.apply(&Event::new(down));
        assert!(input.is_button_pressed(MouseButton::Right));
        input.apply(&Event::new(down.with_clicks(2)));
        assert!(input.is_button_pressed(MouseButton::Right));
        let up = MouseButtonEvent::new(MouseButton::Right, ButtonState::Released, 0.0, 0.0);
        input.apply(&Event::new(up));
        assert!(!input.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn scroll_accumulates() {
        let mut input = InputState::default();
        for (dx, dy) in [(1.0, 2.0), (0.5, -1.0)] {
            input.apply(&Event::new(MouseWheelEvent {
                dx,
                dy,
                x: 0.0,
                y: 0.0,
                precise: false,
                modifiers: Modifiers::NONE,
            }));
        }
        assert!((input.scroll_delta[0] - 1.5).abs() < f32::EPSILON);
        assert!((input.scroll_delta[1] - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn key_press_and_release() {
        let mut input = InputState::default();
        assert!(!input.is_key_pressed(Key::W));

        input.apply(&press(Key::W, Scancode::W));
        assert!(input.is_key_pressed(Key::W));
        assert!(input.is_scancode_pressed(Scancode::W));

        input.apply(&release(Key::W, Scancode::W));
        assert!(!input.is_key_pressed(Key::W));
    }

    #[test]
    fn repeat_does_not_change_state() {
        let mut input = InputState::default();
        let repeat = KeyEvent::pressed(Key::W, Scancode::W, Modifiers::NONE).with_repeat(true);
        input.apply(&Event::new(repeat));
        assert!(!input.is_key_pressed(Key::W));
    }

    #[test]
    fn generic_modifier_matches_either_side() {
        let mut input = InputState::default();
        input.apply(&press(Key::ShiftRight, Scancode::ShiftRight));
        assert!(input.is_key_pressed(Key::Shift));
        assert!(input.is_key_pressed(Key::ShiftRight));
        assert!(!input.is_key_pressed(Key::ShiftLeft));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputState::default();
        input.apply(&press(Key::A, Scancode::A));
        input.apply(&Event::new(WindowEvent::new(WindowAction::FocusLost)));
        assert!(!input.focused);
        assert_eq!(input.pressed_keys().count(), 0);
    }

    #[test]
    fn unknown_codes_are_not_held() {
        let mut input = InputState::default();
        input.apply(&press(Key::BrowserBack, Scancode::Unknown));
        assert!(input.is_key_pressed(Key::BrowserBack));
        assert!(!input.is_scancode_pressed(Scancode::Unknown));

        input.apply(&press(Key::Unknown, Scancode::IntlRo));
        assert!(input.is_scancode_pressed(Scancode::IntlRo));
        assert!(!input.is_key_pressed(Key::Unknown));
    }

    #[test]
    fn resize_and_aspect_ratio() {
        let mut input = InputState::default();
        input.apply(&Event::new(WindowResizeEvent {
            size: Size::new(1920, 1080),
            previous: Size::new(800, 600),
        }));
        assert!((input.aspect_ratio() - 16.0 / 9.0).abs() < 0.01);

        input.window_size = Size::new(10, 0);
        assert_eq!(input.aspect_ratio(), 1.0);
    }
}
