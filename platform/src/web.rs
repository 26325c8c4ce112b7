//! Browser (DOM) event translation.
//!
//! The host registers listeners on the canvas and `window` and forwards the
//! fields it reads as [`DomEvent`]s. DOM events carry no window handle, so
//! everything is delivered to the primary bound window.

use nk_core::event::{
    ButtonState, DropFileEvent, DropHoverEvent, DropPhase, DropTextEvent, KeyEvent, MouseButton,
    MouseButtonEvent, MouseCrossingEvent, MouseMoveEvent, MouseRawEvent, MouseWheelEvent, Size,
    SystemAction, TextInputEvent, Theme, TouchEvent, TouchPhase, TouchPoint, WindowAction,
    WindowDpiEvent, WindowResizeEvent, WindowThemeEvent,
};
use nk_core::keyboard::native::web;
use nk_core::keyboard::{Key, NativeKey, Scancode, resolve_key};
use nk_core::text::FixedStr;
use nk_core::{Event, Modifiers, NativeHandle, Timestamp};

use crate::config::SourceConfig;
use crate::queue::NativeQueue;
use crate::source::{EventSource, SourceState};

/// `WheelEvent.deltaMode` values.
pub mod delta_mode {
    pub const PIXEL: u32 = 0;
    pub const LINE: u32 = 1;
    pub const PAGE: u32 = 2;
}

/// Modifier fields common to keyboard, mouse and wheel events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomModifiers {
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
    /// `getModifierState("AltGraph")`.
    pub alt_graph: bool,
    /// `getModifierState("CapsLock")`.
    pub caps_lock: bool,
    /// `getModifierState("NumLock")`.
    pub num_lock: bool,
}

impl From<DomModifiers> for Modifiers {
    fn from(m: DomModifiers) -> Self {
        Modifiers {
            ctrl: m.ctrl_key,
            alt: m.alt_key,
            shift: m.shift_key,
            super_key: m.meta_key,
            alt_graph: m.alt_graph,
            caps_lock: m.caps_lock,
            num_lock: m.num_lock,
            scroll_lock: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomKey {
    /// `KeyboardEvent.code`.
    pub code: String,
    /// `KeyboardEvent.key`.
    pub key: String,
    pub repeat: bool,
    pub modifiers: DomModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomMouse {
    /// `MouseEvent.button`.
    pub button: i16,
    /// `UIEvent.detail`: the click count on `mousedown`.
    pub detail: u32,
    /// `offsetX/Y` in CSS pixels.
    pub x: f32,
    pub y: f32,
    pub movement_x: f32,
    pub movement_y: f32,
    pub modifiers: DomModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomWheel {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: u32,
    pub x: f32,
    pub y: f32,
    pub modifiers: DomModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomTouch {
    /// `Touch.identifier`.
    pub identifier: i64,
    pub x: f32,
    pub y: f32,
    /// `Touch.force`, 0 when unsupported.
    pub force: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomEventKind {
    KeyDown(DomKey),
    KeyUp(DomKey),
    MouseDown(DomMouse),
    MouseUp(DomMouse),
    MouseMove(DomMouse),
    MouseEnter(DomMouse),
    MouseLeave(DomMouse),
    Wheel(DomWheel),
    /// `changedTouches` of each touch event.
    TouchStart(Vec<DomTouch>),
    TouchMove(Vec<DomTouch>),
    TouchEnd(Vec<DomTouch>),
    TouchCancel(Vec<DomTouch>),
    Focus,
    Blur,
    /// Canvas size in CSS pixels and `devicePixelRatio`.
    Resize {
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
    },
    VisibilityChange {
        hidden: bool,
    },
    BeforeUnload,
    ColorSchemeChange {
        dark: bool,
    },
    LanguageChange,
    DragEnter {
        x: f32,
        y: f32,
    },
    DragOver {
        x: f32,
        y: f32,
    },
    DragLeave,
    Drop {
        files: Vec<String>,
        text: Option<String>,
        x: f32,
        y: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    /// `Event.timeStamp` in milliseconds, or 0 if unknown.
    pub time_stamp: f64,
    pub kind: DomEventKind,
}

impl DomEvent {
    pub fn new(kind: DomEventKind) -> Self {
        Self {
            time_stamp: 0.0,
            kind,
        }
    }

    fn time(&self) -> Timestamp {
        if self.time_stamp > 0.0 {
            Timestamp((self.time_stamp * 1000.0) as u64)
        } else {
            Timestamp::now()
        }
    }
}

/// Event source for DOM events.
pub struct WebSource {
    state: SourceState,
    queue: NativeQueue<DomEvent>,
    size: Size,
    device_pixel_ratio: Option<f64>,
}

impl WebSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            state: SourceState::new(config),
            queue: NativeQueue::new(),
            size: Size::default(),
            device_pixel_ratio: None,
        }
    }

    pub fn queue(&self) -> NativeQueue<DomEvent> {
        self.queue.clone()
    }

    pub fn post(&self, event: DomEvent) {
        self.queue.push(event);
    }

    fn translate(&mut self, e: DomEvent) {
        let time = e.time();
        let emit = |state: &mut SourceState, event: Event| {
            state.emit_primary(event.with_timestamp(time))
        };
        match e.kind {
            DomEventKind::KeyDown(key) => self.key(&key, true, time),
            DomEventKind::KeyUp(key) => self.key(&key, false, time),
            DomEventKind::MouseDown(m) => {
                let clicks = m.detail.clamp(1, u8::MAX as u32) as u8;
                let event = MouseButtonEvent::new(dom_button(m.button), ButtonState::Pressed, m.x, m.y)
                    .with_clicks(clicks)
                    .with_modifiers(m.modifiers.into());
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::MouseUp(m) => {
                let event = MouseButtonEvent::new(dom_button(m.button), ButtonState::Released, m.x, m.y)
                    .with_modifiers(m.modifiers.into());
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::MouseMove(m) => {
                let event = MouseMoveEvent {
                    x: m.x,
                    y: m.y,
                    dx: m.movement_x,
                    dy: m.movement_y,
                    modifiers: m.modifiers.into(),
                };
                emit(&mut self.state, Event::new(event));
                if self.state.config().raw_mouse {
                    let raw = MouseRawEvent {
                        dx: m.movement_x,
                        dy: m.movement_y,
                    };
                    emit(&mut self.state, Event::new(raw));
                }
            }
            DomEventKind::MouseEnter(m) => {
                let event = MouseCrossingEvent {
                    entered: true,
                    x: m.x,
                    y: m.y,
                };
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::MouseLeave(m) => {
                let event = MouseCrossingEvent {
                    entered: false,
                    x: m.x,
                    y: m.y,
                };
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::Wheel(w) => {
                let event = self.wheel(&w);
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::TouchStart(touches) => {
                emit(&mut self.state, Event::new(touch(TouchPhase::Begin, &touches)))
            }
            DomEventKind::TouchMove(touches) => {
                emit(&mut self.state, Event::new(touch(TouchPhase::Move, &touches)))
            }
            DomEventKind::TouchEnd(touches) => {
                emit(&mut self.state, Event::new(touch(TouchPhase::End, &touches)))
            }
            DomEventKind::TouchCancel(touches) => {
                emit(&mut self.state, Event::new(touch(TouchPhase::Cancel, &touches)))
            }
            DomEventKind::Focus => {
                emit(&mut self.state, Event::window_action(WindowAction::FocusGained))
            }
            DomEventKind::Blur => {
                emit(&mut self.state, Event::window_action(WindowAction::FocusLost))
            }
            DomEventKind::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                let size = Size::new(width, height);
                let previous = std::mem::replace(&mut self.size, size);
                if previous != size {
                    emit(&mut self.state, Event::new(WindowResizeEvent { size, previous }));
                }
                let previous_ratio = self
                    .device_pixel_ratio
                    .replace(device_pixel_ratio)
                    .unwrap_or(1.0);
                if previous_ratio != device_pixel_ratio {
                    let event = WindowDpiEvent {
                        scale_factor: device_pixel_ratio,
                        previous: previous_ratio,
                        suggested_size: None,
                    };
                    emit(&mut self.state, Event::new(event));
                }
            }
            DomEventKind::VisibilityChange { hidden } => {
                let action = if hidden {
                    WindowAction::Hide
                } else {
                    WindowAction::Show
                };
                emit(&mut self.state, Event::window_action(action));
            }
            DomEventKind::BeforeUnload => {
                emit(&mut self.state, Event::window_action(WindowAction::Close))
            }
            DomEventKind::ColorSchemeChange { dark } => {
                let theme = if dark { Theme::Dark } else { Theme::Light };
                emit(&mut self.state, Event::new(WindowThemeEvent { theme }));
            }
            DomEventKind::LanguageChange => {
                emit(&mut self.state, Event::system(SystemAction::LocaleChange))
            }
            DomEventKind::DragEnter { x, y } => {
                let event = DropHoverEvent {
                    phase: DropPhase::Enter,
                    x,
                    y,
                };
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::DragOver { x, y } => {
                let event = DropHoverEvent {
                    phase: DropPhase::Over,
                    x,
                    y,
                };
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::DragLeave => {
                let event = DropHoverEvent {
                    phase: DropPhase::Leave,
                    x: 0.0,
                    y: 0.0,
                };
                emit(&mut self.state, Event::new(event));
            }
            DomEventKind::Drop { files, text, x, y } => {
                let count = files.len().min(u16::MAX as usize) as u16;
                for (index, path) in files.iter().take(count as usize).enumerate() {
                    let event = DropFileEvent {
                        path: FixedStr::new(path),
                        index: index as u16,
                        count,
                        x,
                        y,
                    };
                    emit(&mut self.state, Event::new(event));
                }
                if let Some(text) = text {
                    let event = DropTextEvent {
                        text: FixedStr::new(&text),
                        x,
                        y,
                    };
                    emit(&mut self.state, Event::new(event));
                }
            }
        }
    }

    fn key(&mut self, dom: &DomKey, pressed: bool, time: Timestamp) {
        let scancode = web::scancode_from_code(&dom.code);
        let key = resolve_key(scancode, || web::key_from_code(&dom.code));
        if key == Key::Unknown && scancode == Scancode::Unknown {
            log::trace!("Dropped unmapped DOM code {:?}", dom.code);
            return;
        }
        let modifiers = Modifiers::from(dom.modifiers);
        let event = KeyEvent {
            key,
            scancode,
            native: NativeKey::Dom(FixedStr::new(&dom.code)),
            state: ButtonState::from_pressed(pressed),
            repeat: pressed && dom.repeat,
            modifiers,
        };
        self.state
            .emit_primary(Event::new(event).with_timestamp(time));

        if !pressed || modifiers.suppresses_text() {
            return;
        }
        if let Some(text) = web::char_from_key_value(&dom.key).and_then(TextInputEvent::new) {
            self.state
                .emit_primary(Event::new(text).with_timestamp(time));
        }
    }

    fn wheel(&self, w: &DomWheel) -> MouseWheelEvent {
        let line = self.state.config().wheel_line_height as f64;
        let (scale, precise) = match w.delta_mode {
            delta_mode::PIXEL => (1.0 / line, true),
            delta_mode::PAGE => {
                let page = if self.size.height > 0 {
                    self.size.height as f64 / line
                } else {
                    1.0
                };
                (page, false)
            }
            _ => (1.0, false),
        };
        // DOM deltaY grows downward
        MouseWheelEvent {
            dx: (w.delta_x * scale) as f32,
            dy: (-w.delta_y * scale) as f32,
            x: w.x,
            y: w.y,
            precise,
            modifiers: w.modifiers.into(),
        }
    }
}

fn dom_button(button: i16) -> MouseButton {
    match button {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        3 => MouseButton::X1,
        4 => MouseButton::X2,
        n => MouseButton::Other(n.clamp(0, u8::MAX as i16) as u8),
    }
}

fn touch(phase: TouchPhase, touches: &[DomTouch]) -> TouchEvent {
    let mut event: TouchEvent = touches
        .iter()
        .map(|t| TouchPoint {
            id: t.identifier as u64,
            x: t.x,
            y: t.y,
            pressure: if t.force > 0.0 { t.force } else { 1.0 },
        })
        .collect();
    if touches.len() > event.len() {
        log::trace!("Dropped {} touch contacts past capacity", touches.len() - event.len());
    }
    event.phase = phase;
    event
}

impl Default for WebSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl EventSource for WebSource {
    fn name(&self) -> &'static str {
        "web"
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.state
    }

    fn pump(&mut self) {
        let max = self.state.config().max_pump_messages;
        for event in self.queue.drain(max) {
            self.translate(event);
        }
    }

    fn shutdown(&mut self, native: NativeHandle) {
        self.state.unbind(native);
        if self.state.is_idle() {
            self.size = Size::default();
            self.device_pixel_ratio = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use nk_core::{EventType, WindowId};

    use super::*;

    fn source() -> WebSource {
        let mut source = WebSource::default();
        source.initialize(WindowId(3), NativeHandle(1));
        source
    }

    fn drain(source: &mut WebSource) -> Vec<Event> {
        source.poll_events();
        std::iter::from_fn(|| source.pop()).collect()
    }

    fn key_down(code: &str, key: &str, modifiers: DomModifiers) -> DomEvent {
        DomEvent::new(DomEventKind::KeyDown(DomKey {
            code: code.into(),
            key: key.into(),
            repeat: false,
            modifiers,
        }))
    }

    #[test]
    fn key_down_with_text_targets_primary_window() {
        let mut source = source();
        source.post(key_down("KeyA", "a", DomModifiers::default()));
        let events = drain(&mut source);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].key().unwrap().key, Key::A);
        assert_eq!(events[0].window(), Some(WindowId(3)));
        assert_eq!(events[1].text().unwrap().as_str(), "a");
    }

    #[test]
    fn named_keys_and_shortcuts_produce_no_text() {
        let mut source = source();
        source.post(key_down("Enter", "Enter", DomModifiers::default()));
        let ctrl = DomModifiers {
            ctrl_key: true,
            ..DomModifiers::default()
        };
        source.post(key_down("KeyC", "c", ctrl));
        let types: Vec<_> = drain(&mut source).iter().map(|e| e.ty()).collect();
        assert_eq!(types, [EventType::KeyPress, EventType::KeyPress]);
    }

    #[test]
    fn dom_time_stamp_stamps_every_event() {
        let mut source = source();
        let mut press = key_down("KeyA", "a", DomModifiers::default());
        press.time_stamp = 1500.25;
        source.post(press);
        let events = drain(&mut source);
        assert_eq!(events.len(), 2);
        for event in &events {
            assert_eq!(event.timestamp(), Timestamp(1_500_250));
        }
    }

    #[test]
    fn pixel_wheel_is_normalised_and_inverted() {
        let mut source = source();
        source.post(DomEvent::new(DomEventKind::Wheel(DomWheel {
            delta_y: 80.0,
            delta_mode: delta_mode::PIXEL,
            ..DomWheel::default()
        })));
        let events = drain(&mut source);
        let wheel = events[0].get::<MouseWheelEvent>().unwrap();
        assert_eq!(wheel.dy, -2.0);
        assert!(wheel.precise);
    }

    #[test]
    fn touch_contacts_saturate() {
        let mut source = source();
        let touches = (0..40)
            .map(|i| DomTouch {
                identifier: i,
                ..DomTouch::default()
            })
            .collect();
        source.post(DomEvent::new(DomEventKind::TouchStart(touches)));
        let events = drain(&mut source);
        let touch = events[0].get::<TouchEvent>().unwrap();
        assert_eq!(events[0].ty(), EventType::TouchBegin);
        assert_eq!(touch.len(), 32);
        assert!(touch.is_full());
    }

    #[test]
    fn mouse_detail_is_click_count() {
        let mut source = source();
        source.post(DomEvent::new(DomEventKind::MouseDown(DomMouse {
            button: 1,
            detail: 2,
            ..DomMouse::default()
        })));
        let events = drain(&mut source);
        assert_eq!(events[0].ty(), EventType::MouseDoubleClick);
        assert_eq!(events[0].mouse_button().unwrap().button, MouseButton::Middle);
    }

    #[test]
    fn nothing_is_delivered_without_a_window() {
        let mut source = WebSource::default();
        source.post(DomEvent::new(DomEventKind::Focus));
        source.pump();
        assert!(source.is_empty());
    }
}
