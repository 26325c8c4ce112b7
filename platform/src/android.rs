//! Android `NativeActivity` input and lifecycle translation.
//!
//! The glue layer reads `AInputEvent`s off the activity's input queue and
//! lifecycle commands off its command pipe, copies them into
//! [`AndroidMessage`]s and posts them here. An activity owns a single
//! native window, so everything goes to the primary binding.

use nk_core::event::{
    ButtonState, KeyEvent, MouseButton, MouseButtonEvent, MouseCrossingEvent, MouseMoveEvent,
    MouseWheelEvent, Size, SystemAction, TextInputEvent, TouchEvent, TouchPhase, TouchPoint,
    WindowAction, WindowResizeEvent,
};
use nk_core::keyboard::native::android;
use nk_core::keyboard::{Key, NativeKey, Scancode, resolve_key};
use nk_core::{Event, Modifiers, NativeHandle, Timestamp};

use crate::click::ClickTracker;
use crate::config::SourceConfig;
use crate::queue::NativeQueue;
use crate::source::{EventSource, SourceState};

/// `AKEY_EVENT_ACTION_*`.
pub mod key_action {
    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const MULTIPLE: i32 = 2;
}

/// `AMETA_*` state bits.
pub mod meta {
    pub const SHIFT_ON: i32 = 0x01;
    pub const ALT_ON: i32 = 0x02;
    pub const CTRL_ON: i32 = 0x1000;
    pub const META_ON: i32 = 0x10000;
    pub const CAPS_LOCK_ON: i32 = 0x100000;
    pub const NUM_LOCK_ON: i32 = 0x200000;
    pub const SCROLL_LOCK_ON: i32 = 0x400000;
}

/// `AMOTION_EVENT_ACTION_*`.
pub mod motion_action {
    pub const MASK: i32 = 0xFF;
    pub const POINTER_INDEX_SHIFT: i32 = 8;

    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const MOVE: i32 = 2;
    pub const CANCEL: i32 = 3;
    pub const POINTER_DOWN: i32 = 5;
    pub const POINTER_UP: i32 = 6;
    pub const HOVER_MOVE: i32 = 7;
    pub const SCROLL: i32 = 8;
    pub const HOVER_ENTER: i32 = 9;
    pub const HOVER_EXIT: i32 = 10;
    pub const BUTTON_PRESS: i32 = 11;
    pub const BUTTON_RELEASE: i32 = 12;
}

/// `AINPUT_SOURCE_*` classes.
pub mod input_source {
    pub const CLASS_POINTER: i32 = 0x02;
    pub const TOUCHSCREEN: i32 = 0x1002;
    pub const MOUSE: i32 = 0x2002;
}

/// `AMOTION_EVENT_BUTTON_*`.
pub mod button {
    pub const PRIMARY: i32 = 1 << 0;
    pub const SECONDARY: i32 = 1 << 1;
    pub const TERTIARY: i32 = 1 << 2;
    pub const BACK: i32 = 1 << 3;
    pub const FORWARD: i32 = 1 << 4;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AndroidKeyEvent {
    pub action: i32,
    pub key_code: i32,
    pub meta_state: i32,
    pub repeat_count: i32,
    /// `KeyEvent.getUnicodeChar()`, 0 for none.
    pub unicode_char: u32,
    /// `KeyEvent.getCharacters()` for `ACTION_MULTIPLE` with an unknown key.
    pub characters: Option<String>,
    /// `getEventTime()` in milliseconds.
    pub event_time: i64,
}

impl AndroidKeyEvent {
    pub fn new(action: i32, key_code: i32) -> Self {
        Self {
            action,
            key_code,
            ..Self::default()
        }
    }

    pub fn with_unicode(mut self, unicode_char: u32) -> Self {
        self.unicode_char = unicode_char;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub id: i32,
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AndroidMotionEvent {
    /// Action code with the pointer index in bits 8..16.
    pub action: i32,
    pub source: i32,
    pub pointers: Vec<Pointer>,
    pub button_state: i32,
    /// `getActionButton()` for button press/release.
    pub action_button: i32,
    pub meta_state: i32,
    /// `AXIS_HSCROLL` and `AXIS_VSCROLL`.
    pub hscroll: f32,
    pub vscroll: f32,
    pub event_time: i64,
}

impl AndroidMotionEvent {
    pub fn touch(action: i32, pointers: Vec<Pointer>) -> Self {
        Self {
            action,
            source: input_source::TOUCHSCREEN,
            pointers,
            ..Self::default()
        }
    }

    pub fn mouse(action: i32, x: f32, y: f32) -> Self {
        Self {
            action,
            source: input_source::MOUSE,
            pointers: vec![Pointer {
                id: 0,
                x,
                y,
                pressure: 1.0,
            }],
            ..Self::default()
        }
    }

    fn masked_action(&self) -> i32 {
        self.action & motion_action::MASK
    }

    fn pointer_index(&self) -> usize {
        ((self.action >> motion_action::POINTER_INDEX_SHIFT) & 0xFF) as usize
    }

    fn is_mouse(&self) -> bool {
        self.source & input_source::MOUSE == input_source::MOUSE
    }
}

/// `APP_CMD_*` lifecycle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCmd {
    InitWindow { width: u32, height: u32 },
    TermWindow,
    WindowResized { width: u32, height: u32 },
    WindowRedrawNeeded,
    GainedFocus,
    LostFocus,
    Pause,
    Resume,
    LowMemory,
    ConfigChanged { locale_changed: bool },
    Destroy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AndroidMessage {
    Key(AndroidKeyEvent),
    Motion(AndroidMotionEvent),
    Command(AppCmd),
}

fn timestamp(millis: i64) -> Timestamp {
    if millis > 0 {
        Timestamp::from_millis(millis as u64)
    } else {
        Timestamp::now()
    }
}

fn modifiers_from_meta(meta_state: i32) -> Modifiers {
    Modifiers {
        ctrl: meta_state & meta::CTRL_ON != 0,
        alt: meta_state & meta::ALT_ON != 0,
        shift: meta_state & meta::SHIFT_ON != 0,
        super_key: meta_state & meta::META_ON != 0,
        alt_graph: false,
        caps_lock: meta_state & meta::CAPS_LOCK_ON != 0,
        num_lock: meta_state & meta::NUM_LOCK_ON != 0,
        scroll_lock: meta_state & meta::SCROLL_LOCK_ON != 0,
    }
}

/// Event source for a `NativeActivity`.
pub struct AndroidSource {
    state: SourceState,
    queue: NativeQueue<AndroidMessage>,
    size: Size,
    cursor: Option<(f32, f32)>,
    clicks: ClickTracker,
}

impl AndroidSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            state: SourceState::new(config),
            queue: NativeQueue::new(),
            size: Size::default(),
            cursor: None,
            clicks: ClickTracker::default(),
        }
    }

    pub fn queue(&self) -> NativeQueue<AndroidMessage> {
        self.queue.clone()
    }

    pub fn post(&self, message: AndroidMessage) {
        self.queue.push(message);
    }

    fn emit(&mut self, time: Timestamp, event: Event) {
        self.state.emit_primary(event.with_timestamp(time));
    }

    fn translate(&mut self, message: AndroidMessage) {
        match message {
            AndroidMessage::Key(key) => self.key(&key),
            AndroidMessage::Motion(motion) => self.motion(&motion),
            AndroidMessage::Command(cmd) => self.command(cmd),
        }
    }

    fn key(&mut self, e: &AndroidKeyEvent) {
        let time = timestamp(e.event_time);
        let modifiers = modifiers_from_meta(e.meta_state);

        if e.action == key_action::MULTIPLE && e.key_code == 0 {
            // Composed text with no key behind it
            if let Some(characters) = &e.characters {
                for text in characters.chars().filter_map(TextInputEvent::new) {
                    self.emit(time, Event::new(text));
                }
            }
            return;
        }

        let scancode = android::scancode_from_keycode(e.key_code);
        let key = resolve_key(scancode, || android::key_from_keycode(e.key_code));
        if key == Key::Unknown && scancode == Scancode::Unknown {
            log::trace!("Dropped unmapped key code {}", e.key_code);
            return;
        }
        let text = char::from_u32(e.unicode_char)
            .filter(|_| e.unicode_char != 0 && !modifiers.suppresses_text())
            .and_then(TextInputEvent::new);
        let base = KeyEvent {
            key,
            scancode,
            native: NativeKey::Android(e.key_code),
            state: ButtonState::Pressed,
            repeat: false,
            modifiers,
        };

        match e.action {
            key_action::DOWN => {
                let event = KeyEvent {
                    repeat: e.repeat_count > 0,
                    ..base
                };
                self.emit(time, Event::new(event));
                if let Some(text) = text {
                    self.emit(time, Event::new(text));
                }
            }
            key_action::UP => {
                let event = KeyEvent {
                    state: ButtonState::Released,
                    ..base
                };
                self.emit(time, Event::new(event));
            }
            key_action::MULTIPLE => {
                for _ in 0..e.repeat_count.max(0) {
                    let event = KeyEvent {
                        repeat: true,
                        ..base
                    };
                    self.emit(time, Event::new(event));
                    if let Some(text) = text {
                        self.emit(time, Event::new(text));
                    }
                }
            }
            other => log::trace!("Ignored key action {other}"),
        }
    }

    fn motion(&mut self, e: &AndroidMotionEvent) {
        let time = timestamp(e.event_time);
        match e.masked_action() {
            motion_action::HOVER_MOVE => self.mouse_move(e, time),
            motion_action::MOVE if e.is_mouse() => self.mouse_move(e, time),
            motion_action::HOVER_ENTER | motion_action::HOVER_EXIT => {
                let (x, y) = first_point(e);
                let entered = e.masked_action() == motion_action::HOVER_ENTER;
                self.cursor = entered.then_some((x, y));
                self.emit(time, Event::new(MouseCrossingEvent { entered, x, y }));
            }
            motion_action::BUTTON_PRESS => self.mouse_button(e, time, ButtonState::Pressed),
            motion_action::BUTTON_RELEASE => self.mouse_button(e, time, ButtonState::Released),
            motion_action::SCROLL => {
                let (x, y) = first_point(e);
                let event = MouseWheelEvent {
                    dx: e.hscroll,
                    dy: e.vscroll,
                    x,
                    y,
                    precise: e.hscroll.fract() != 0.0 || e.vscroll.fract() != 0.0,
                    modifiers: modifiers_from_meta(e.meta_state),
                };
                self.emit(time, Event::new(event));
            }
            // Mice report DOWN/UP next to BUTTON_PRESS/RELEASE
            motion_action::DOWN | motion_action::UP if e.is_mouse() => {}
            motion_action::DOWN | motion_action::POINTER_DOWN => {
                self.touch_changed(e, time, TouchPhase::Begin)
            }
            motion_action::UP | motion_action::POINTER_UP => {
                self.touch_changed(e, time, TouchPhase::End)
            }
            motion_action::MOVE => self.touch_all(e, time, TouchPhase::Move),
            motion_action::CANCEL => self.touch_all(e, time, TouchPhase::Cancel),
            other => log::trace!("Ignored motion action {other}"),
        }
    }

    fn mouse_move(&mut self, e: &AndroidMotionEvent, time: Timestamp) {
        let (x, y) = first_point(e);
        let (dx, dy) = match self.cursor.replace((x, y)) {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        let event = MouseMoveEvent {
            x,
            y,
            dx,
            dy,
            modifiers: modifiers_from_meta(e.meta_state),
        };
        self.emit(time, Event::new(event));
    }

    fn mouse_button(&mut self, e: &AndroidMotionEvent, time: Timestamp, state: ButtonState) {
        let button = match e.action_button {
            button::PRIMARY => MouseButton::Left,
            button::SECONDARY => MouseButton::Right,
            button::TERTIARY => MouseButton::Middle,
            button::BACK => MouseButton::X1,
            button::FORWARD => MouseButton::X2,
            other => {
                log::trace!("Ignored mouse button {other:#x}");
                return;
            }
        };
        let (x, y) = first_point(e);
        let mut event = MouseButtonEvent::new(button, state, x, y)
            .with_modifiers(modifiers_from_meta(e.meta_state));
        if state.is_pressed() {
            let config = *self.state.config();
            event = event.with_clicks(self.clicks.press(button, x, y, time, &config));
        }
        self.emit(time, Event::new(event));
    }

    /// Touch update carrying only the pointer the action refers to.
    fn touch_changed(&mut self, e: &AndroidMotionEvent, time: Timestamp, phase: TouchPhase) {
        let Some(pointer) = e.pointers.get(e.pointer_index()) else {
            log::trace!("Dropped touch action for missing pointer {}", e.pointer_index());
            return;
        };
        let mut event = TouchEvent::new(phase);
        event.push(touch_point(pointer));
        self.emit(time, Event::new(event));
    }

    fn touch_all(&mut self, e: &AndroidMotionEvent, time: Timestamp, phase: TouchPhase) {
        let mut event: TouchEvent = e.pointers.iter().map(touch_point).collect();
        event.phase = phase;
        self.emit(time, Event::new(event));
    }

    fn command(&mut self, cmd: AppCmd) {
        let time = Timestamp::now();
        match cmd {
            AppCmd::InitWindow { width, height } => {
                self.emit(time, Event::window_action(WindowAction::Show));
                self.resize(time, Size::new(width, height));
            }
            AppCmd::TermWindow => {
                self.cursor = None;
                self.emit(time, Event::window_action(WindowAction::Hide));
            }
            AppCmd::WindowResized { width, height } => self.resize(time, Size::new(width, height)),
            AppCmd::WindowRedrawNeeded => self.emit(time, Event::window_action(WindowAction::Paint)),
            AppCmd::GainedFocus => {
                self.emit(time, Event::window_action(WindowAction::FocusGained))
            }
            AppCmd::LostFocus => {
                self.clicks.reset();
                self.emit(time, Event::window_action(WindowAction::FocusLost));
            }
            AppCmd::Pause => self.emit(time, Event::system(SystemAction::Suspend)),
            AppCmd::Resume => self.emit(time, Event::system(SystemAction::Resume)),
            AppCmd::LowMemory => self.emit(time, Event::system(SystemAction::LowMemory)),
            AppCmd::ConfigChanged { locale_changed } => {
                let action = if locale_changed {
                    SystemAction::LocaleChange
                } else {
                    SystemAction::DisplayChange
                };
                self.emit(time, Event::system(action));
            }
            AppCmd::Destroy => {
                self.emit(time, Event::window_action(WindowAction::Destroy));
                self.state.emit(None, Event::system(SystemAction::Quit));
            }
        }
    }

    fn resize(&mut self, time: Timestamp, size: Size) {
        let previous = std::mem::replace(&mut self.size, size);
        if previous != size {
            self.emit(time, Event::new(WindowResizeEvent { size, previous }));
        }
    }
}

fn first_point(e: &AndroidMotionEvent) -> (f32, f32) {
    e.pointers.first().map_or((0.0, 0.0), |p| (p.x, p.y))
}

fn touch_point(pointer: &Pointer) -> TouchPoint {
    TouchPoint {
        id: pointer.id as u64,
        x: pointer.x,
        y: pointer.y,
        pressure: pointer.pressure,
    }
}

impl Default for AndroidSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl EventSource for AndroidSource {
    fn name(&self) -> &'static str {
        "android"
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
}

#[cfg(test)]
mod tests {
    use nk_core::{EventType, WindowId};

    use super::*;

    fn source() -> AndroidSource {
        let mut source = AndroidSource::default();
        source.initialize(WindowId(1), NativeHandle(0xA0));
        source
    }

    fn drain(source: &mut AndroidSource) -> Vec<Event> {
        source.poll_events();
        std::iter::from_fn(|| source.pop()).collect()
    }

    #[test]
    fn key_down_with_unicode_char() {
        let mut source = source();
        source.post(AndroidMessage::Key(
            AndroidKeyEvent::new(key_action::DOWN, 29).with_unicode('a' as u32),
        ));
        source.post(AndroidMessage::Key(AndroidKeyEvent::new(key_action::UP, 29)));
        let events = drain(&mut source);
        let types: Vec<_> = events.iter().map(|e| e.ty()).collect();
        assert_eq!(
            types,
            [EventType::KeyPress, EventType::TextInput, EventType::KeyRelease]
        );
        assert_eq!(events[0].key().unwrap().scancode, Scancode::A);
    }

    #[test]
    fn back_key_resolves_without_scancode() {
        let mut source = source();
        source.post(AndroidMessage::Key(AndroidKeyEvent::new(
            key_action::DOWN,
            android::KEYCODE_BACK,
        )));
        let events = drain(&mut source);
        let key = events[0].key().unwrap();
        assert_eq!(key.key, Key::BrowserBack);
        assert_eq!(key.scancode, Scancode::Unknown);
    }

    #[test]
    fn repeat_count_marks_repeat() {
        let mut source = source();
        let mut down = AndroidKeyEvent::new(key_action::DOWN, 29);
        down.repeat_count = 3;
        source.post(AndroidMessage::Key(down));
        let events = drain(&mut source);
        assert_eq!(events[0].ty(), EventType::KeyRepeat);
    }

    #[test]
    fn pointer_down_reports_changed_pointer() {
        let mut source = source();
        let pointers = vec![
            Pointer {
                id: 4,
                x: 1.0,
                y: 1.0,
                pressure: 1.0,
            },
            Pointer {
                id: 9,
                x: 2.0,
                y: 2.0,
                pressure: 0.5,
            },
        ];
        let action = motion_action::POINTER_DOWN | (1 << motion_action::POINTER_INDEX_SHIFT);
        source.post(AndroidMessage::Motion(AndroidMotionEvent::touch(action, pointers)));
        let events = drain(&mut source);
        assert_eq!(events[0].ty(), EventType::TouchBegin);
        let touch = events[0].get::<TouchEvent>().unwrap();
        assert_eq!(touch.contacts()[0].id, 9);
    }

    #[test]
    fn move_saturates_at_capacity() {
        let mut source = source();
        let pointers = (0..40)
            .map(|id| Pointer {
                id,
                ..Pointer::default()
            })
            .collect();
        source.post(AndroidMessage::Motion(AndroidMotionEvent::touch(
            motion_action::MOVE,
            pointers,
        )));
        let events = drain(&mut source);
        assert_eq!(events[0].get::<TouchEvent>().unwrap().len(), 32);
    }

    #[test]
    fn mouse_buttons_ignore_duplicate_down() {
        let mut source = source();
        source.post(AndroidMessage::Motion(AndroidMotionEvent::mouse(
            motion_action::DOWN,
            5.0,
            5.0,
        )));
        let mut press = AndroidMotionEvent::mouse(motion_action::BUTTON_PRESS, 5.0, 5.0);
        press.action_button = button::SECONDARY;
        source.post(AndroidMessage::Motion(press));
        let events = drain(&mut source);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].mouse_button().unwrap().button, MouseButton::Right);
    }

    #[test]
    fn lifecycle_commands() {
        let mut source = source();
        for cmd in [
            AppCmd::InitWindow {
                width: 1080,
                height: 1920,
            },
            AppCmd::Pause,
            AppCmd::Resume,
            AppCmd::Destroy,
        ] {
            source.post(AndroidMessage::Command(cmd));
        }
        let types: Vec<_> = drain(&mut source).iter().map(|e| e.ty()).collect();
        assert_eq!(
            types,
            [
                EventType::WindowShow,
                EventType::WindowResize,
                EventType::AppSuspend,
                EventType::AppResume,
                EventType::WindowDestroy,
                EventType::Quit,
            ]
        );
    }
}
