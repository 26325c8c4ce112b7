//! Payload shapes carried by events.
//!
//! Every payload is `Copy` and owns no heap data. Shapes shared by several
//! event types (key press/repeat/release, button press/release/double-click)
//! derive their concrete type from their own fields, see
//! [`EventPayload::event_type`](super::EventPayload::event_type).

use crate::handle::Timestamp;
use crate::keyboard::{Key, NativeKey, Scancode};
use crate::modifiers::Modifiers;
use crate::text::{FixedBytes, FixedStr};

use super::EventType;

/// Maximum simultaneous touch contacts a [`TouchEvent`] can hold.
pub const MAX_TOUCH_CONTACTS: usize = 32;

/// Capacity in bytes of a dropped file path.
pub const MAX_DROP_PATH: usize = 260;

/// Capacity in bytes of dropped text.
pub const MAX_DROP_TEXT: usize = 256;

/// Capacity in bytes of a [`CustomEvent`] body.
pub const MAX_CUSTOM_DATA: usize = 64;

/// Pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

impl ButtonState {
    pub fn is_pressed(self) -> bool {
        self == Self::Pressed
    }

    pub fn from_pressed(pressed: bool) -> Self {
        if pressed { Self::Pressed } else { Self::Released }
    }
}

/// Window size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Window position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// Window notifications without extra data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAction {
    Create,
    Close,
    Destroy,
    Paint,
    Show,
    Hide,
    Minimize,
    Maximize,
    Restore,
    FocusGained,
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowEvent {
    pub action: WindowAction,
}

impl WindowEvent {
    pub fn new(action: WindowAction) -> Self {
        Self { action }
    }

    pub(super) fn declared_type(&self) -> EventType {
        match self.action {
            WindowAction::Create => EventType::WindowCreate,
            WindowAction::Close => EventType::WindowClose,
            WindowAction::Destroy => EventType::WindowDestroy,
            WindowAction::Paint => EventType::WindowPaint,
            WindowAction::Show => EventType::WindowShow,
            WindowAction::Hide => EventType::WindowHide,
            WindowAction::Minimize => EventType::WindowMinimize,
            WindowAction::Maximize => EventType::WindowMaximize,
            WindowAction::Restore => EventType::WindowRestore,
            WindowAction::FocusGained => EventType::WindowFocusGained,
            WindowAction::FocusLost => EventType::WindowFocusLost,
        }
    }
}

/// Client area resized. Carries the previous size so deltas need no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowResizeEvent {
    pub size: Size,
    pub previous: Size,
}

impl WindowResizeEvent {
    pub fn delta(&self) -> (i64, i64) {
        (
            self.size.width as i64 - self.previous.width as i64,
            self.size.height as i64 - self.previous.height as i64,
        )
    }
}

/// Window moved. Carries the previous position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowMoveEvent {
    pub position: Position,
    pub previous: Position,
}

impl WindowMoveEvent {
    pub fn delta(&self) -> (i32, i32) {
        (
            self.position.x - self.previous.x,
            self.position.y - self.previous.y,
        )
    }
}

/// Scale factor changed (moved to another monitor, user setting).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowDpiEvent {
    pub scale_factor: f64,
    pub previous: f64,
    /// Size the OS suggests for the new scale, if it suggested one.
    pub suggested_size: Option<Size>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowThemeEvent {
    pub theme: Theme,
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Shared shape of key press, repeat and release.
///
/// Repeats keep `state == Pressed`; only `repeat` tells them apart from the
/// first press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub scancode: Scancode,
    pub native: NativeKey,
    pub state: ButtonState,
    pub repeat: bool,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn pressed(key: Key, scancode: Scancode, modifiers: Modifiers) -> Self {
        Self {
            key,
            scancode,
            native: NativeKey::None,
            state: ButtonState::Pressed,
            repeat: false,
            modifiers,
        }
    }

    pub fn released(key: Key, scancode: Scancode, modifiers: Modifiers) -> Self {
        Self {
            state: ButtonState::Released,
            ..Self::pressed(key, scancode, modifiers)
        }
    }

    pub fn with_native(mut self, native: NativeKey) -> Self {
        self.native = native;
        self
    }

    /// Mark as auto-repeat. Ignored for releases.
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat && self.state.is_pressed();
        self
    }

    pub(super) fn declared_type(&self) -> EventType {
        match (self.state, self.repeat) {
            (ButtonState::Released, _) => EventType::KeyRelease,
            (ButtonState::Pressed, true) => EventType::KeyRepeat,
            (ButtonState::Pressed, false) => EventType::KeyPress,
        }
    }
}

/// One Unicode scalar of text input, with its UTF-8 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextInputEvent {
    pub ch: char,
    utf8: [u8; 4],
    len: u8,
}

impl TextInputEvent {
    /// Build a text event, or `None` for control characters.
    pub fn new(ch: char) -> Option<Self> {
        if ch.is_control() {
            return None;
        }
        let mut utf8 = [0; 4];
        let len = ch.encode_utf8(&mut utf8).len() as u8;
        Some(Self { ch, utf8, len })
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.utf8[..self.len as usize]
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Back / X1.
    X1,
    /// Forward / X2.
    X2,
    Other(u8),
}

impl MouseButton {
    /// Dense index: left 0, right 1, middle 2, X1 3, X2 4, others from 5.
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
            Self::X1 => 3,
            Self::X2 => 4,
            Self::Other(n) => 5 + n as usize,
        }
    }
}

/// Shared shape of button press, release and double-click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub state: ButtonState,
    pub x: f32,
    pub y: f32,
    /// Consecutive click count. Two or more on a press is a double-click.
    pub clicks: u8,
    pub modifiers: Modifiers,
}

impl MouseButtonEvent {
    pub fn new(button: MouseButton, state: ButtonState, x: f32, y: f32) -> Self {
        Self {
            button,
            state,
            x,
            y,
            clicks: u8::from(state.is_pressed()),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_clicks(mut self, clicks: u8) -> Self {
        self.clicks = clicks;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub(super) fn declared_type(&self) -> EventType {
        match self.state {
            ButtonState::Released => EventType::MouseButtonRelease,
            ButtonState::Pressed if self.clicks >= 2 => EventType::MouseDoubleClick,
            ButtonState::Pressed => EventType::MouseButtonPress,
        }
    }
}

/// Cursor moved, in window client coordinates (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub x: f32,
    pub y: f32,
    /// Motion since the previous move event of the same source.
    pub dx: f32,
    pub dy: f32,
    pub modifiers: Modifiers,
}

/// Unaccelerated relative motion from a raw input device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseRawEvent {
    pub dx: f32,
    pub dy: f32,
}

/// Scroll in lines. Positive `dy` scrolls up, positive `dx` scrolls right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheelEvent {
    pub dx: f32,
    pub dy: f32,
    pub x: f32,
    pub y: f32,
    /// Source reported pixel deltas (touchpad) rather than notches.
    pub precise: bool,
    pub modifiers: Modifiers,
}

/// Cursor entered or left the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseCrossingEvent {
    pub entered: bool,
    pub x: f32,
    pub y: f32,
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Begin,
    Move,
    End,
    Cancel,
}

/// One finger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    /// Normalised pressure, `1.0` when the device does not report it.
    pub pressure: f32,
}

/// Multi-contact touch update.
///
/// Holds at most [`MAX_TOUCH_CONTACTS`] contacts. Contacts pushed past the
/// capacity are dropped; [`TouchEvent::is_full`] tells callers the list may be
/// incomplete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    contacts: [TouchPoint; MAX_TOUCH_CONTACTS],
    count: u8,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase) -> Self {
        Self {
            phase,
            contacts: [TouchPoint::default(); MAX_TOUCH_CONTACTS],
            count: 0,
        }
    }

    /// Append a contact. Returns `false` if the payload is already full.
    pub fn push(&mut self, point: TouchPoint) -> bool {
        let n = self.count as usize;
        if n >= MAX_TOUCH_CONTACTS {
            return false;
        }
        self.contacts[n] = point;
        self.count += 1;
        true
    }

    pub fn contacts(&self) -> &[TouchPoint] {
        &self.contacts[..self.count as usize]
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count as usize == MAX_TOUCH_CONTACTS
    }

    pub(super) fn declared_type(&self) -> EventType {
        match self.phase {
            TouchPhase::Begin => EventType::TouchBegin,
            TouchPhase::Move => EventType::TouchMove,
            TouchPhase::End => EventType::TouchEnd,
            TouchPhase::Cancel => EventType::TouchCancel,
        }
    }
}

impl FromIterator<TouchPoint> for TouchEvent {
    /// Collects into a `Move` update; set `phase` afterwards as needed.
    fn from_iter<I: IntoIterator<Item = TouchPoint>>(iter: I) -> Self {
        let mut event = TouchEvent::new(TouchPhase::Move);
        for point in iter {
            if !event.push(point) {
                break;
            }
        }
        event
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Pinch,
    Rotate,
    Swipe,
}

/// Trackpad or touchscreen gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Incremental magnification for pinch (`0.0` = no change).
    pub magnification: f32,
    /// Incremental rotation in degrees, counter-clockwise.
    pub rotation: f32,
    /// Swipe direction (-1, 0 or 1 per axis).
    pub dx: f32,
    pub dy: f32,
    pub x: f32,
    pub y: f32,
}

impl GestureEvent {
    pub fn new(kind: GestureKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            magnification: 0.0,
            rotation: 0.0,
            dx: 0.0,
            dy: 0.0,
            x,
            y,
        }
    }

    pub(super) fn declared_type(&self) -> EventType {
        match self.kind {
            GestureKind::Pinch => EventType::GesturePinch,
            GestureKind::Rotate => EventType::GestureRotate,
            GestureKind::Swipe => EventType::GestureSwipe,
        }
    }
}

// ---------------------------------------------------------------------------
// Gamepad
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GamepadConnectionEvent {
    pub id: u32,
    pub connected: bool,
    pub name: FixedStr<64>,
}

/// Buttons named by position (Xbox layout: South = A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    Guide,
    LeftStick,
    RightStick,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GamepadButtonEvent {
    pub id: u32,
    pub button: GamepadButton,
    pub state: ButtonState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

/// Axis value in `-1.0..=1.0` (triggers `0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadAxisEvent {
    pub id: u32,
    pub axis: GamepadAxis,
    pub value: f32,
}

// ---------------------------------------------------------------------------
// Drag and drop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropPhase {
    Enter,
    Over,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropHoverEvent {
    pub phase: DropPhase,
    pub x: f32,
    pub y: f32,
}

/// One dropped file. A multi-file drop produces one event per file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropFileEvent {
    pub path: FixedStr<MAX_DROP_PATH>,
    /// Position of this file in the drop and the total file count.
    pub index: u16,
    pub count: u16,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTextEvent {
    pub text: FixedStr<MAX_DROP_TEXT>,
    pub x: f32,
    pub y: f32,
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemAction {
    Quit,
    Suspend,
    Resume,
    LowMemory,
    DisplayChange,
    LocaleChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemEvent {
    pub action: SystemAction,
}

impl SystemEvent {
    pub fn new(action: SystemAction) -> Self {
        Self { action }
    }

    pub(super) fn declared_type(&self) -> EventType {
        match self.action {
            SystemAction::Quit => EventType::Quit,
            SystemAction::Suspend => EventType::AppSuspend,
            SystemAction::Resume => EventType::AppResume,
            SystemAction::LowMemory => EventType::LowMemory,
            SystemAction::DisplayChange => EventType::DisplayChange,
            SystemAction::LocaleChange => EventType::LocaleChange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerState {
    #[default]
    Unknown,
    OnBattery,
    Charging,
    Charged,
    NoBattery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PowerEvent {
    pub state: PowerState,
    pub percent: Option<u8>,
    pub seconds_left: Option<u32>,
}

// ---------------------------------------------------------------------------
// Custom
// ---------------------------------------------------------------------------

/// Application-defined event with a small inline body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomEvent {
    pub code: u32,
    pub data: FixedBytes<MAX_CUSTOM_DATA>,
    pub sent_at: Timestamp,
}

impl CustomEvent {
    pub fn new(code: u32, data: &[u8]) -> Self {
        Self {
            code,
            data: FixedBytes::new(data),
            sent_at: Timestamp::now(),
        }
    }
}
