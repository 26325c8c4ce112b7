//! Cocoa (AppKit) event translation.
//!
//! The window layer copies what it needs out of each `NSEvent` into a
//! [`CocoaEvent`] from `sendEvent:` and forwards `NSWindowDelegate` and
//! `NSApplication` notifications as [`WindowNotification`] and
//! [`AppNotification`]. AppKit reports positions with a bottom-left
//! origin; this source flips them using the tracked content height.

use std::collections::HashMap;

use nk_core::event::{
    ButtonState, GestureEvent, GestureKind, KeyEvent, MouseButton, MouseButtonEvent,
    MouseCrossingEvent, MouseMoveEvent, MouseRawEvent, MouseWheelEvent, Position, Size,
    SystemAction, TextInputEvent, Theme, WindowAction, WindowDpiEvent, WindowMoveEvent,
    WindowResizeEvent, WindowThemeEvent,
};
use nk_core::keyboard::native::apple;
use nk_core::keyboard::{Key, NativeKey, Scancode, resolve_key};
use nk_core::text::FixedStr;
use nk_core::{Event, Modifiers, NativeHandle, Timestamp};

use crate::config::SourceConfig;
use crate::queue::NativeQueue;
use crate::source::{EventSource, SourceState};

/// `NSEventType` values.
pub mod event_type {
    pub const LEFT_MOUSE_DOWN: u32 = 1;
    pub const LEFT_MOUSE_UP: u32 = 2;
    pub const RIGHT_MOUSE_DOWN: u32 = 3;
    pub const RIGHT_MOUSE_UP: u32 = 4;
    pub const MOUSE_MOVED: u32 = 5;
    pub const LEFT_MOUSE_DRAGGED: u32 = 6;
    pub const RIGHT_MOUSE_DRAGGED: u32 = 7;
    pub const MOUSE_ENTERED: u32 = 8;
    pub const MOUSE_EXITED: u32 = 9;
    pub const KEY_DOWN: u32 = 10;
    pub const KEY_UP: u32 = 11;
    pub const FLAGS_CHANGED: u32 = 12;
    pub const ROTATE: u32 = 18;
    pub const SCROLL_WHEEL: u32 = 22;
    pub const OTHER_MOUSE_DOWN: u32 = 25;
    pub const OTHER_MOUSE_UP: u32 = 26;
    pub const OTHER_MOUSE_DRAGGED: u32 = 27;
    pub const MAGNIFY: u32 = 30;
    pub const SWIPE: u32 = 31;
}

/// `NSEventModifierFlags` bits, including the device-dependent side bits.
pub mod flags {
    pub const CAPS_LOCK: u64 = 1 << 16;
    pub const SHIFT: u64 = 1 << 17;
    pub const CONTROL: u64 = 1 << 18;
    pub const OPTION: u64 = 1 << 19;
    pub const COMMAND: u64 = 1 << 20;
    pub const NUMERIC_PAD: u64 = 1 << 21;
    pub const FUNCTION: u64 = 1 << 23;

    pub const LEFT_CONTROL: u64 = 0x0001;
    pub const LEFT_SHIFT: u64 = 0x0002;
    pub const RIGHT_SHIFT: u64 = 0x0004;
    pub const LEFT_COMMAND: u64 = 0x0008;
    pub const RIGHT_COMMAND: u64 = 0x0010;
    pub const LEFT_OPTION: u64 = 0x0020;
    pub const RIGHT_OPTION: u64 = 0x0040;
    pub const RIGHT_CONTROL: u64 = 0x2000;
}

/// `NSEvent.characters` as copied by the window layer.
pub type Characters = FixedStr<16>;

/// The fields of one `NSEvent` this source reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CocoaEvent {
    pub window: NativeHandle,
    /// `NSEventType`.
    pub kind: u32,
    /// Seconds since system start, or 0 if unknown.
    pub timestamp: f64,
    /// `locationInWindow`, bottom-left origin.
    pub x: f64,
    pub y: f64,
    /// `scrollingDeltaX/Y` for scroll events, `deltaX/Y` otherwise.
    pub delta_x: f64,
    pub delta_y: f64,
    pub key_code: u16,
    pub modifier_flags: u64,
    pub characters: Characters,
    pub is_repeat: bool,
    pub button_number: i64,
    pub click_count: i64,
    pub magnification: f64,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub has_precise_deltas: bool,
}

impl CocoaEvent {
    pub fn new(window: NativeHandle, kind: u32) -> Self {
        Self {
            window,
            kind,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn key(window: NativeHandle, kind: u32, key_code: u16, characters: &str) -> Self {
        Self {
            key_code,
            characters: Characters::new(characters),
            ..Self::new(window, kind)
        }
    }

    pub fn with_flags(mut self, modifier_flags: u64) -> Self {
        self.modifier_flags = modifier_flags;
        self
    }

    fn time(&self) -> Timestamp {
        if self.timestamp > 0.0 {
            Timestamp((self.timestamp * 1_000_000.0) as u64)
        } else {
            Timestamp::now()
        }
    }
}

/// `NSWindowDelegate` callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowNotification {
    /// Content view size in points.
    DidResize { width: u32, height: u32 },
    /// Frame origin, already converted to top-left screen coordinates.
    DidMove { x: i32, y: i32 },
    DidBecomeKey,
    DidResignKey,
    DidMiniaturize,
    DidDeminiaturize,
    DidEnterFullScreen,
    DidExitFullScreen,
    DidChangeOcclusionState { visible: bool },
    DidChangeBackingProperties { scale_factor: f64 },
    DidChangeEffectiveAppearance { dark: bool },
    NeedsDisplay,
    ShouldClose,
    WillClose,
}

/// `NSApplication` / workspace notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppNotification {
    WillTerminate,
    DidChangeScreenParameters,
    WillSleep,
    DidWake,
    CurrentLocaleDidChange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CocoaMessage {
    Event(CocoaEvent),
    Window(NativeHandle, WindowNotification),
    App(AppNotification),
}

#[derive(Debug, Default)]
struct WindowTrack {
    size: Size,
    position: Position,
    scale_factor: Option<f64>,
    cursor: Option<(f32, f32)>,
    minimized: bool,
}

/// Event source for AppKit events and window notifications.
pub struct CocoaSource {
    state: SourceState,
    queue: NativeQueue<CocoaMessage>,
    modifiers: Modifiers,
    windows: HashMap<NativeHandle, WindowTrack>,
}

impl CocoaSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            state: SourceState::new(config),
            queue: NativeQueue::new(),
            modifiers: Modifiers::NONE,
            windows: HashMap::new(),
        }
    }

    pub fn queue(&self) -> NativeQueue<CocoaMessage> {
        self.queue.clone()
    }

    pub fn post(&self, message: CocoaMessage) {
        self.queue.push(message);
    }

    fn track(&mut self, window: NativeHandle) -> &mut WindowTrack {
        self.windows.entry(window).or_default()
    }

    /// Window point with a top-left origin.
    fn point(&mut self, e: &CocoaEvent) -> (f32, f32) {
        let height = self.track(e.window).size.height as f64;
        (e.x as f32, (height - e.y) as f32)
    }

    fn emit(&mut self, e: &CocoaEvent, event: Event) {
        self.state
            .emit(Some(e.window), event.with_timestamp(e.time()));
    }

    fn translate(&mut self, message: CocoaMessage) {
        match message {
            CocoaMessage::Event(e) => self.event(e),
            CocoaMessage::Window(window, notification) => self.notification(window, notification),
            CocoaMessage::App(notification) => {
                let action = match notification {
                    AppNotification::WillTerminate => SystemAction::Quit,
                    AppNotification::DidChangeScreenParameters => SystemAction::DisplayChange,
                    AppNotification::WillSleep => SystemAction::Suspend,
                    AppNotification::DidWake => SystemAction::Resume,
                    AppNotification::CurrentLocaleDidChange => SystemAction::LocaleChange,
                };
                self.state.emit(None, Event::system(action));
            }
        }
    }

    fn event(&mut self, e: CocoaEvent) {
        use event_type::*;
        match e.kind {
            LEFT_MOUSE_DOWN | RIGHT_MOUSE_DOWN | OTHER_MOUSE_DOWN => {
                self.button(&e, ButtonState::Pressed)
            }
            LEFT_MOUSE_UP | RIGHT_MOUSE_UP | OTHER_MOUSE_UP => {
                self.button(&e, ButtonState::Released)
            }
            MOUSE_MOVED | LEFT_MOUSE_DRAGGED | RIGHT_MOUSE_DRAGGED | OTHER_MOUSE_DRAGGED => {
                self.mouse_move(&e)
            }
            MOUSE_ENTERED | MOUSE_EXITED => {
                let (x, y) = self.point(&e);
                let entered = e.kind == MOUSE_ENTERED;
                self.track(e.window).cursor = entered.then_some((x, y));
                self.emit(&e, Event::new(MouseCrossingEvent { entered, x, y }));
            }
            KEY_DOWN => self.key(&e, true),
            KEY_UP => self.key(&e, false),
            FLAGS_CHANGED => self.flags_changed(&e),
            SCROLL_WHEEL => self.scroll(&e),
            MAGNIFY | ROTATE | SWIPE => self.gesture(&e),
            other => log::trace!("Ignored NSEvent type {other}"),
        }
    }

    fn modifiers_from_flags(&self, bits: u64) -> Modifiers {
        Modifiers {
            ctrl: bits & flags::CONTROL != 0,
            alt: bits & flags::OPTION != 0,
            shift: bits & flags::SHIFT != 0,
            super_key: bits & flags::COMMAND != 0,
            alt_graph: false,
            caps_lock: bits & flags::CAPS_LOCK != 0,
            num_lock: self.modifiers.num_lock,
            scroll_lock: self.modifiers.scroll_lock,
        }
    }

    fn button(&mut self, e: &CocoaEvent, state: ButtonState) {
        let button = match e.kind {
            event_type::LEFT_MOUSE_DOWN | event_type::LEFT_MOUSE_UP => MouseButton::Left,
            event_type::RIGHT_MOUSE_DOWN | event_type::RIGHT_MOUSE_UP => MouseButton::Right,
            _ => match e.button_number {
                2 => MouseButton::Middle,
                3 => MouseButton::X1,
                4 => MouseButton::X2,
                n => MouseButton::Other(n.clamp(0, u8::MAX as i64) as u8),
            },
        };
        let (x, y) = self.point(e);
        let mut event = MouseButtonEvent::new(button, state, x, y)
            .with_modifiers(self.modifiers_from_flags(e.modifier_flags));
        if state.is_pressed() {
            event = event.with_clicks(e.click_count.clamp(1, u8::MAX as i64) as u8);
        }
        self.emit(e, Event::new(event));
    }

    fn mouse_move(&mut self, e: &CocoaEvent) {
        let (x, y) = self.point(e);
        let (dx, dy) = match self.track(e.window).cursor.replace((x, y)) {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        let event = MouseMoveEvent {
            x,
            y,
            dx,
            dy,
            modifiers: self.modifiers_from_flags(e.modifier_flags),
        };
        self.emit(e, Event::new(event));
        if self.state.config().raw_mouse {
            let raw = MouseRawEvent {
                dx: e.delta_x as f32,
                dy: e.delta_y as f32,
            };
            self.emit(e, Event::new(raw));
        }
    }

    fn key(&mut self, e: &CocoaEvent, pressed: bool) {
        let scancode = apple::scancode_from_carbon(e.key_code);
        let key = resolve_key(scancode, || Key::Unknown);
        if key == Key::Unknown && scancode == Scancode::Unknown {
            log::trace!("Dropped unmapped key code {:#04x}", e.key_code);
            return;
        }
        self.modifiers = self.modifiers_from_flags(e.modifier_flags);
        let event = KeyEvent {
            key,
            scancode,
            native: NativeKey::Apple(e.key_code),
            state: ButtonState::from_pressed(pressed),
            repeat: pressed && e.is_repeat,
            modifiers: self.modifiers,
        };
        self.emit(e, Event::new(event));

        if !pressed || self.modifiers.suppresses_text() {
            return;
        }
        for ch in e.characters.as_str().chars() {
            if ('\u{F700}'..='\u{F8FF}').contains(&ch) {
                // Function keys are reported as private-use characters
                continue;
            }
            if let Some(text) = TextInputEvent::new(ch) {
                self.emit(e, Event::new(text));
            }
        }
    }

    fn flags_changed(&mut self, e: &CocoaEvent) {
        let side_bit = match e.key_code {
            0x38 => Some((flags::LEFT_SHIFT, flags::SHIFT)),
            0x3C => Some((flags::RIGHT_SHIFT, flags::SHIFT)),
            0x3B => Some((flags::LEFT_CONTROL, flags::CONTROL)),
            0x3E => Some((flags::RIGHT_CONTROL, flags::CONTROL)),
            0x3A => Some((flags::LEFT_OPTION, flags::OPTION)),
            0x3D => Some((flags::RIGHT_OPTION, flags::OPTION)),
            0x37 => Some((flags::LEFT_COMMAND, flags::COMMAND)),
            0x36 => Some((flags::RIGHT_COMMAND, flags::COMMAND)),
            _ => None,
        };
        let scancode = apple::scancode_from_carbon(e.key_code);
        let key = resolve_key(scancode, || Key::Unknown);
        self.modifiers = self.modifiers_from_flags(e.modifier_flags);
        if key == Key::Unknown {
            // Fn and unknown keys only update the modifier state
            return;
        }

        let states: &[bool] = match side_bit {
            Some((side, generic)) => {
                // Synthesized events may lack the device side bits
                let bit = if e.modifier_flags & 0xFFFF != 0 { side } else { generic };
                if e.modifier_flags & bit != 0 { &[true] } else { &[false] }
            }
            // Caps Lock reports the toggle, not the key travel
            None if key == Key::CapsLock => &[true, false],
            None => return,
        };
        for &pressed in states {
            let event = KeyEvent {
                key,
                scancode,
                native: NativeKey::Apple(e.key_code),
                state: ButtonState::from_pressed(pressed),
                repeat: false,
                modifiers: self.modifiers,
            };
            self.emit(e, Event::new(event));
        }
    }

    fn scroll(&mut self, e: &CocoaEvent) {
        let (x, y) = self.point(e);
        let (dx, dy) = if e.has_precise_deltas {
            let line = self.state.config().wheel_line_height as f64;
            (e.delta_x / line, e.delta_y / line)
        } else {
            (e.delta_x, e.delta_y)
        };
        let event = MouseWheelEvent {
            dx: dx as f32,
            dy: dy as f32,
            x,
            y,
            precise: e.has_precise_deltas,
            modifiers: self.modifiers_from_flags(e.modifier_flags),
        };
        self.emit(e, Event::new(event));
    }

    fn gesture(&mut self, e: &CocoaEvent) {
        let (x, y) = self.point(e);
        let event = match e.kind {
            event_type::MAGNIFY => GestureEvent {
                magnification: e.magnification as f32,
                ..GestureEvent::new(GestureKind::Pinch, x, y)
            },
            event_type::ROTATE => GestureEvent {
                rotation: e.rotation,
                ..GestureEvent::new(GestureKind::Rotate, x, y)
            },
            // AppKit swipes use +1 for left and up
            _ => GestureEvent {
                dx: -(e.delta_x as f32),
                dy: -(e.delta_y as f32),
                ..GestureEvent::new(GestureKind::Swipe, x, y)
            },
        };
        self.emit(e, Event::new(event));
    }

    fn notification(&mut self, window: NativeHandle, notification: WindowNotification) {
        let emit = |state: &mut SourceState, event: Event| state.emit(Some(window), event);
        match notification {
            WindowNotification::DidResize { width, height } => {
                let size = Size::new(width, height);
                let previous = std::mem::replace(&mut self.track(window).size, size);
                if previous != size {
                    emit(&mut self.state, Event::new(WindowResizeEvent { size, previous }));
                }
            }
            WindowNotification::DidMove { x, y } => {
                let position = Position::new(x, y);
                let previous = std::mem::replace(&mut self.track(window).position, position);
                if previous != position {
                    emit(&mut self.state, Event::new(WindowMoveEvent { position, previous }));
                }
            }
            WindowNotification::DidBecomeKey => {
                emit(&mut self.state, Event::window_action(WindowAction::FocusGained))
            }
            WindowNotification::DidResignKey => {
                self.modifiers = Modifiers {
                    caps_lock: self.modifiers.caps_lock,
                    ..Modifiers::NONE
                };
                emit(&mut self.state, Event::window_action(WindowAction::FocusLost));
            }
            WindowNotification::DidMiniaturize => {
                self.track(window).minimized = true;
                emit(&mut self.state, Event::window_action(WindowAction::Minimize));
            }
            WindowNotification::DidDeminiaturize => {
                if std::mem::take(&mut self.track(window).minimized) {
                    emit(&mut self.state, Event::window_action(WindowAction::Restore));
                }
            }
            WindowNotification::DidEnterFullScreen => {
                emit(&mut self.state, Event::window_action(WindowAction::Maximize))
            }
            WindowNotification::DidExitFullScreen => {
                emit(&mut self.state, Event::window_action(WindowAction::Restore))
            }
            WindowNotification::DidChangeOcclusionState { visible } => {
                let action = if visible {
                    WindowAction::Show
                } else {
                    WindowAction::Hide
                };
                emit(&mut self.state, Event::window_action(action));
            }
            WindowNotification::DidChangeBackingProperties { scale_factor } => {
                let previous = self
                    .track(window)
                    .scale_factor
                    .replace(scale_factor)
                    .unwrap_or(1.0);
                if previous != scale_factor {
                    let event = WindowDpiEvent {
                        scale_factor,
                        previous,
                        suggested_size: None,
                    };
                    emit(&mut self.state, Event::new(event));
                }
            }
            WindowNotification::DidChangeEffectiveAppearance { dark } => {
                let theme = if dark { Theme::Dark } else { Theme::Light };
                emit(&mut self.state, Event::new(WindowThemeEvent { theme }));
            }
            WindowNotification::NeedsDisplay => {
                emit(&mut self.state, Event::window_action(WindowAction::Paint))
            }
            WindowNotification::ShouldClose => {
                emit(&mut self.state, Event::window_action(WindowAction::Close))
            }
            WindowNotification::WillClose => {
                self.windows.remove(&window);
                emit(&mut self.state, Event::window_action(WindowAction::Destroy));
            }
        }
    }
}

impl Default for CocoaSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl EventSource for CocoaSource {
    fn name(&self) -> &'static str {
        "cocoa"
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.state
    }

    fn pump(&mut self) {
        let max = self.state.config().max_pump_messages;
        for message in self.queue.drain(max) {
            self.translate(message);
        }
    }

    fn shutdown(&mut self, native: NativeHandle) {
        self.windows.remove(&native);
        self.state.unbind(native);
    }
}
