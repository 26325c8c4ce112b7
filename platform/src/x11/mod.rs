//! X11 event translation shared by the Xlib and XCB sources.
//!
//! Both client libraries deliver the same protocol events. The window layer
//! (or the XCB decoder) turns them into [`XEvent`] values; translation,
//! autorepeat detection and multi-click counting live here once.

mod xcb;
mod xlib;

pub use xcb::{XcbEvent, XcbSource, response};
pub use xlib::XlibSource;

use std::collections::HashMap;

use nk_core::event::{
    ButtonState, KeyEvent, MouseButton, MouseButtonEvent, MouseCrossingEvent, MouseMoveEvent,
    MouseWheelEvent, Position, Size, TextInputEvent, WindowAction, WindowMoveEvent,
    WindowResizeEvent,
};
use nk_core::keyboard::native::x11;
use nk_core::keyboard::{Key, NativeKey, Scancode, resolve_key};
use nk_core::{Event, ModifierKeys, Modifiers, NativeHandle, Timestamp};

use crate::click::ClickTracker;
use crate::source::SourceState;

/// Core protocol modifier mask bits.
pub mod mask {
    pub const SHIFT: u32 = 1 << 0;
    pub const LOCK: u32 = 1 << 1;
    pub const CONTROL: u32 = 1 << 2;
    /// Alt on every common keymap.
    pub const MOD1: u32 = 1 << 3;
    /// Num Lock on every common keymap.
    pub const MOD2: u32 = 1 << 4;
    /// Super on every common keymap.
    pub const MOD4: u32 = 1 << 6;
    /// ISO_Level3_Shift (AltGr).
    pub const MOD5: u32 = 1 << 7;
}

/// A protocol event addressed to one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XEvent {
    pub window: NativeHandle,
    /// Server time in milliseconds (0 for events without one).
    pub time: u32,
    pub kind: XEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XEventKind {
    /// `keysym` is 0 when the client did not look one up.
    KeyPress { keycode: u32, state: u32, keysym: u32 },
    KeyRelease { keycode: u32, state: u32, keysym: u32 },
    ButtonPress { button: u32, x: i32, y: i32, state: u32 },
    ButtonRelease { button: u32, x: i32, y: i32, state: u32 },
    Motion { x: i32, y: i32, state: u32 },
    Enter { x: i32, y: i32 },
    Leave { x: i32, y: i32 },
    FocusIn,
    FocusOut,
    /// `count` is the number of Expose events still following.
    Expose { count: u32 },
    Configure { x: i32, y: i32, width: u32, height: u32 },
    Map,
    Unmap,
    /// First data word of a `ClientMessage` (the protocol atom).
    ClientMessage { atom: u64 },
    Destroy,
}

impl XEvent {
    pub fn new(window: NativeHandle, time: u32, kind: XEventKind) -> Self {
        Self { window, time, kind }
    }
}

/// Fold a core-protocol state mask into [`Modifiers`].
pub fn modifiers_from_state(state: u32) -> Modifiers {
    Modifiers {
        shift: state & mask::SHIFT != 0,
        caps_lock: state & mask::LOCK != 0,
        ctrl: state & mask::CONTROL != 0,
        alt: state & mask::MOD1 != 0,
        num_lock: state & mask::MOD2 != 0,
        super_key: state & mask::MOD4 != 0,
        alt_graph: state & mask::MOD5 != 0,
        scroll_lock: false,
    }
}

/// How key text is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextSource {
    /// From the keysym the client looked up (honours the layout).
    Keysym,
    /// From the US reference layout (no keymap available).
    Reference,
}

#[derive(Debug, Default)]
struct WindowTrack {
    size: Option<Size>,
    position: Option<Position>,
    cursor: Option<(f32, f32)>,
}

/// Protocol-level translator shared by both X11 sources.
#[derive(Debug, Default)]
pub(crate) struct X11Translator {
    wm_delete_window: u64,
    windows: HashMap<NativeHandle, WindowTrack>,
    clicks: ClickTracker,
    held: ModifierKeys,
    /// Key release that ended the previous batch; its repeat press may be
    /// the first event of the next one.
    held_release: Option<XEvent>,
}

impl X11Translator {
    pub(crate) fn set_wm_delete_window(&mut self, atom: u64) {
        self.wm_delete_window = atom;
    }

    pub(crate) fn forget(&mut self, window: NativeHandle) {
        self.windows.remove(&window);
        if self.held_release.is_some_and(|held| held.window == window) {
            self.held_release = None;
        }
    }

    pub(crate) fn translate_batch(
        &mut self,
        state: &mut SourceState,
        batch: Vec<XEvent>,
        text: TextSource,
    ) {
        // A release held from the last pump is decided now, but never held
        // a second time.
        let carried = self.held_release.take();
        let mut events = carried.into_iter().chain(batch).peekable();
        let mut first = carried.is_some();
        while let Some(event) = events.next() {
            let from_last_pump = std::mem::take(&mut first);
            // Autorepeat arrives as a release immediately followed by a press
            // of the same keycode with the same server time.
            if let XEventKind::KeyRelease { keycode, .. } = event.kind {
                let next = events.peek();
                if next.is_none() && !from_last_pump {
                    self.held_release = Some(event);
                    break;
                }
                let is_repeat = matches!(
                    next,
                    Some(XEvent { window, time, kind: XEventKind::KeyPress { keycode: pressed, .. } })
                        if *window == event.window && *time == event.time && *pressed == keycode
                );
                if is_repeat {
                    if let Some(press) = events.next() {
                        self.translate(state, press, text, true);
                    }
                    continue;
                }
            }
            self.translate(state, event, text, false);
        }
    }

    fn translate(&mut self, state: &mut SourceState, event: XEvent, text: TextSource, repeat: bool) {
        let time = if event.time == 0 {
            Timestamp::now()
        } else {
            Timestamp::from_millis(event.time as u64)
        };
        let window = event.window;
        let config = *state.config();
        let mut emit = |e: Event| state.emit(Some(window), e.with_timestamp(time));

        match event.kind {
            XEventKind::KeyPress { keycode, state: mask, keysym } => {
                let Some(key) = key_event(&mut self.held, keycode, mask, keysym, true, repeat) else {
                    return;
                };
                emit(Event::new(key));
                if let Some(text) = key_text(&key, keysym, text) {
                    emit(Event::new(text));
                }
            }
            XEventKind::KeyRelease { keycode, state: mask, keysym } => {
                if let Some(key) = key_event(&mut self.held, keycode, mask, keysym, false, false) {
                    emit(Event::new(key));
                }
            }
            XEventKind::ButtonPress { button, x, y, state: mask } => {
                let (x, y) = (x as f32, y as f32);
                let modifiers = modifiers_from_state(mask);
                if let Some((dx, dy)) = wheel_step(button) {
                    let event = MouseWheelEvent {
                        dx,
                        dy,
                        x,
                        y,
                        precise: false,
                        modifiers,
                    };
                    emit(Event::new(event));
                    return;
                }
                let button = mouse_button(button);
                let clicks = self.clicks.press(button, x, y, time, &config);
                let event = MouseButtonEvent::new(button, ButtonState::Pressed, x, y)
                    .with_clicks(clicks)
                    .with_modifiers(modifiers);
                emit(Event::new(event));
            }
            XEventKind::ButtonRelease { button, x, y, state: mask } => {
                if wheel_step(button).is_some() {
                    return;
                }
                let event =
                    MouseButtonEvent::new(mouse_button(button), ButtonState::Released, x as f32, y as f32)
                        .with_clicks(0)
                        .with_modifiers(modifiers_from_state(mask));
                emit(Event::new(event));
            }
            XEventKind::Motion { x, y, state: mask } => {
                let (x, y) = (x as f32, y as f32);
                let track = self.windows.entry(window).or_default();
                let (dx, dy) = match track.cursor.replace((x, y)) {
                    Some((px, py)) => (x - px, y - py),
                    None => (0.0, 0.0),
                };
                let event = MouseMoveEvent {
                    x,
                    y,
                    dx,
                    dy,
                    modifiers: modifiers_from_state(mask),
                };
                emit(Event::new(event));
            }
            XEventKind::Enter { x, y } => {
                let (x, y) = (x as f32, y as f32);
                self.windows.entry(window).or_default().cursor = Some((x, y));
                emit(Event::new(MouseCrossingEvent { entered: true, x, y }));
            }
            XEventKind::Leave { x, y } => {
                let event = MouseCrossingEvent {
                    entered: false,
                    x: x as f32,
                    y: y as f32,
                };
                emit(Event::new(event));
            }
            XEventKind::FocusIn => emit(Event::window_action(WindowAction::FocusGained)),
            XEventKind::FocusOut => {
                self.clicks.reset();
                emit(Event::window_action(WindowAction::FocusLost));
            }
            XEventKind::Expose { count } => {
                if count == 0 {
                    emit(Event::window_action(WindowAction::Paint));
                }
            }
            XEventKind::Configure { x, y, width, height } => {
                let track = self.windows.entry(window).or_default();
                let size = Size::new(width, height);
                let position = Position::new(x, y);
                let previous_size = track.size.replace(size);
                let previous_position = track.position.replace(position);
                if previous_size != Some(size) {
                    let previous = previous_size.unwrap_or(size);
                    emit(Event::new(WindowResizeEvent { size, previous }));
                }
                if previous_position != Some(position) {
                    let previous = previous_position.unwrap_or(position);
                    emit(Event::new(WindowMoveEvent { position, previous }));
                }
            }
            XEventKind::Map => emit(Event::window_action(WindowAction::Show)),
            XEventKind::Unmap => emit(Event::window_action(WindowAction::Hide)),
            XEventKind::ClientMessage { atom } => {
                if atom != 0 && atom == self.wm_delete_window {
                    emit(Event::window_action(WindowAction::Close));
                } else {
                    log::trace!("Ignored client message {atom}");
                }
            }
            XEventKind::Destroy => {
                self.windows.remove(&window);
                emit(Event::window_action(WindowAction::Destroy));
            }
        }
    }
}

/// Build the key event for a key message, or `None` if nothing maps.
fn key_event(
    held: &mut ModifierKeys,
    keycode: u32,
    mask: u32,
    keysym: u32,
    pressed: bool,
    repeat: bool,
) -> Option<KeyEvent> {
    let scancode = x11::scancode_from_keycode(keycode);
    let key = resolve_key(scancode, || x11::key_from_keysym(keysym));
    if key == Key::Unknown && scancode == Scancode::Unknown {
        log::trace!("Dropped unmapped keycode {keycode} (keysym {keysym:#x})");
        return None;
    }
    // The state mask describes the moment before this key changed.
    let modifiers = if repeat {
        modifiers_from_state(mask)
    } else {
        held.fold(modifiers_from_state(mask), key, pressed)
    };
    Some(KeyEvent {
        key,
        scancode,
        native: NativeKey::X11 { keycode, keysym },
        state: ButtonState::from_pressed(pressed),
        repeat,
        modifiers,
    })
}

fn key_text(key: &KeyEvent, keysym: u32, source: TextSource) -> Option<TextInputEvent> {
    if key.modifiers.suppresses_text() {
        return None;
    }
    let ch = match source {
        TextSource::Keysym => x11::keysym_to_char(keysym),
        TextSource::Reference => {
            let letter = matches!(key.key.us_char(false), Some(c) if c.is_ascii_alphabetic());
            let shift = key.modifiers.shift ^ (letter && key.modifiers.caps_lock);
            key.key.us_char(shift)
        }
    };
    ch.and_then(TextInputEvent::new)
}

/// Scroll step for the wheel pseudo-buttons 4-7.
fn wheel_step(button: u32) -> Option<(f32, f32)> {
    match button {
        4 => Some((0.0, 1.0)),
        5 => Some((0.0, -1.0)),
        6 => Some((-1.0, 0.0)),
        7 => Some((1.0, 0.0)),
        _ => None,
    }
}

fn mouse_button(button: u32) -> MouseButton {
    match button {
        1 => MouseButton::Left,
        2 => MouseButton::Middle,
        3 => MouseButton::Right,
        8 => MouseButton::X1,
        9 => MouseButton::X2,
        other => MouseButton::Other(other.min(u8::MAX as u32) as u8),
    }
}

#[cfg(test)]
mod tests {
    use nk_core::{EventType, WindowId};

    use super::*;

    #[test]
    fn state_mask() {
        let m = modifiers_from_state(mask::SHIFT | mask::CONTROL | mask::MOD2);
        assert!(m.shift && m.ctrl && m.num_lock);
        assert!(!m.alt && !m.super_key);
        assert!(modifiers_from_state(0).is_empty());
    }

    #[test]
    fn buttons() {
        assert_eq!(mouse_button(3), MouseButton::Right);
        assert_eq!(mouse_button(9), MouseButton::X2);
        assert_eq!(wheel_step(4), Some((0.0, 1.0)));
        assert_eq!(wheel_step(1), None);
    }

    fn key(kind: fn(u32, u32, u32) -> XEventKind, time: u32) -> XEvent {
        XEvent {
            window: NativeHandle(7),
            time,
            kind: kind(38, 0, 0x61),
        }
    }

    fn press(keycode: u32, state: u32, keysym: u32) -> XEventKind {
        XEventKind::KeyPress { keycode, state, keysym }
    }

    fn release(keycode: u32, state: u32, keysym: u32) -> XEventKind {
        XEventKind::KeyRelease { keycode, state, keysym }
    }

    fn key_types(state: &mut SourceState) -> Vec<EventType> {
        std::iter::from_fn(|| state.pop())
            .map(|e| e.ty())
            .filter(|ty| *ty != EventType::TextInput)
            .collect()
    }

    fn bound_state() -> SourceState {
        let mut state = SourceState::default();
        state.bind(WindowId(1), NativeHandle(7));
        state
    }

    #[test]
    fn autorepeat_split_across_pumps() {
        let mut translator = X11Translator::default();
        let mut state = bound_state();
        let batch = vec![key(press, 10), key(release, 50)];
        translator.translate_batch(&mut state, batch, TextSource::Keysym);
        assert_eq!(key_types(&mut state), [EventType::KeyPress]);

        translator.translate_batch(&mut state, vec![key(press, 50)], TextSource::Keysym);
        assert_eq!(key_types(&mut state), [EventType::KeyRepeat]);
    }

    #[test]
    fn trailing_release_is_emitted_by_the_next_pump() {
        let mut translator = X11Translator::default();
        let mut state = bound_state();
        let batch = vec![key(press, 10), key(release, 50)];
        translator.translate_batch(&mut state, batch, TextSource::Keysym);
        assert_eq!(key_types(&mut state), [EventType::KeyPress]);

        translator.translate_batch(&mut state, Vec::new(), TextSource::Keysym);
        assert_eq!(key_types(&mut state), [EventType::KeyRelease]);

        translator.translate_batch(&mut state, vec![key(press, 90)], TextSource::Keysym);
        assert_eq!(key_types(&mut state), [EventType::KeyPress]);
    }

    #[test]
    fn reference_text_honours_caps_lock_for_letters_only() {
        let caps = Modifiers {
            caps_lock: true,
            ..Modifiers::NONE
        };
        let a = KeyEvent::pressed(Key::A, Scancode::A, caps);
        let one = KeyEvent::pressed(Key::Digit1, Scancode::Digit1, caps);
        let text = |k: &KeyEvent| key_text(k, 0, TextSource::Reference).map(|t| t.ch);
        assert_eq!(text(&a), Some('A'));
        assert_eq!(text(&one), Some('1'));
    }
}
