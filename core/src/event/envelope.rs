//! The [`Event`] envelope and the payload ⇄ envelope plumbing.

use crate::handle::{Timestamp, WindowId};

use super::payload::*;
use super::{EventCategory, EventType};

/// A payload shape that can travel inside an [`Event`].
pub trait EventPayload: Copy + Sized + 'static {
    /// The event type this particular value declares.
    fn event_type(&self) -> EventType;

    /// Whether an envelope tagged `ty` may carry this shape.
    fn accepts(ty: EventType) -> bool;

    fn into_data(self) -> EventData;

    fn from_data(data: &EventData) -> Option<&Self>;
}

macro_rules! payloads {
    (
        fixed { $($fty:ident => $fvariant:ident: $single:ident,)* }
        shared { $($sty:ident => $svariant:ident: $pat:pat,)* }
    ) => {
        /// The payload of an event, one variant per shape.
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub enum EventData {
            #[default]
            None,
            $($fvariant($fty),)*
            $($svariant($sty),)*
        }

        $(
            impl EventPayload for $fty {
                fn event_type(&self) -> EventType {
                    EventType::$single
                }

                fn accepts(ty: EventType) -> bool {
                    ty == EventType::$single
                }

                fn into_data(self) -> EventData {
                    EventData::$fvariant(self)
                }

                fn from_data(data: &EventData) -> Option<&Self> {
                    match data {
                        EventData::$fvariant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$fty> for Event {
                fn from(payload: $fty) -> Self {
                    Event::new(payload)
                }
            }
        )*

        $(
            impl EventPayload for $sty {
                fn event_type(&self) -> EventType {
                    self.declared_type()
                }

                fn accepts(ty: EventType) -> bool {
                    matches!(ty, $pat)
                }

                fn into_data(self) -> EventData {
                    EventData::$svariant(self)
                }

                fn from_data(data: &EventData) -> Option<&Self> {
                    match data {
                        EventData::$svariant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$sty> for Event {
                fn from(payload: $sty) -> Self {
                    Event::new(payload)
                }
            }
        )*
    };
}

payloads! {
    fixed {
        WindowResizeEvent => WindowResize: WindowResize,
        WindowMoveEvent => WindowMove: WindowMove,
        WindowDpiEvent => WindowDpi: WindowDpiChange,
        WindowThemeEvent => WindowTheme: WindowThemeChange,
        TextInputEvent => TextInput: TextInput,
        MouseMoveEvent => MouseMove: MouseMove,
        MouseRawEvent => MouseRaw: MouseRaw,
        MouseWheelEvent => MouseWheel: MouseWheel,
        GamepadAxisEvent => GamepadAxis: GamepadAxis,
        DropFileEvent => DropFile: DropFile,
        DropTextEvent => DropText: DropText,
        PowerEvent => Power: PowerChange,
        CustomEvent => Custom: Custom,
    }
    shared {
        WindowEvent => Window: EventType::WindowCreate
            | EventType::WindowClose
            | EventType::WindowDestroy
            | EventType::WindowPaint
            | EventType::WindowShow
            | EventType::WindowHide
            | EventType::WindowMinimize
            | EventType::WindowMaximize
            | EventType::WindowRestore
            | EventType::WindowFocusGained
            | EventType::WindowFocusLost,
        KeyEvent => Key: EventType::KeyPress | EventType::KeyRepeat | EventType::KeyRelease,
        MouseButtonEvent => MouseButton: EventType::MouseButtonPress
            | EventType::MouseButtonRelease
            | EventType::MouseDoubleClick,
        MouseCrossingEvent => MouseCrossing: EventType::MouseEnter | EventType::MouseLeave,
        TouchEvent => Touch: EventType::TouchBegin
            | EventType::TouchMove
            | EventType::TouchEnd
            | EventType::TouchCancel,
        GestureEvent => Gesture: EventType::GesturePinch
            | EventType::GestureRotate
            | EventType::GestureSwipe,
        GamepadConnectionEvent => GamepadConnection: EventType::GamepadConnect
            | EventType::GamepadDisconnect,
        GamepadButtonEvent => GamepadButton: EventType::GamepadButtonPress
            | EventType::GamepadButtonRelease,
        DropHoverEvent => DropHover: EventType::DropEnter | EventType::DropOver | EventType::DropLeave,
        SystemEvent => System: EventType::Quit
            | EventType::AppSuspend
            | EventType::AppResume
            | EventType::LowMemory
            | EventType::DisplayChange
            | EventType::LocaleChange,
    }
}

impl MouseCrossingEvent {
    fn declared_type(&self) -> EventType {
        if self.entered {
            EventType::MouseEnter
        } else {
            EventType::MouseLeave
        }
    }
}

impl GamepadConnectionEvent {
    fn declared_type(&self) -> EventType {
        if self.connected {
            EventType::GamepadConnect
        } else {
            EventType::GamepadDisconnect
        }
    }
}

impl GamepadButtonEvent {
    fn declared_type(&self) -> EventType {
        if self.state.is_pressed() {
            EventType::GamepadButtonPress
        } else {
            EventType::GamepadButtonRelease
        }
    }
}

impl DropHoverEvent {
    fn declared_type(&self) -> EventType {
        match self.phase {
            DropPhase::Enter => EventType::DropEnter,
            DropPhase::Over => EventType::DropOver,
            DropPhase::Leave => EventType::DropLeave,
        }
    }
}

/// A canonical event: a type tag plus the one payload that tag mandates.
///
/// Events are small fixed-size values and are copied freely. The tag is
/// derived from the payload at construction, so an envelope can never carry
/// a payload its tag does not accept. A default envelope has type
/// [`EventType::None`] and means "no event".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Event {
    ty: EventType,
    data: EventData,
    window: Option<WindowId>,
    timestamp: Timestamp,
}

impl Event {
    /// Wrap a payload, tagging the envelope with the payload's declared type.
    pub fn new<T: EventPayload>(payload: T) -> Self {
        Self {
            ty: payload.event_type(),
            data: payload.into_data(),
            window: None,
            timestamp: Timestamp::now(),
        }
    }

    /// The empty envelope.
    pub fn none() -> Self {
        Self::default()
    }

    /// Shorthand for a [`WindowEvent`].
    pub fn window_action(action: WindowAction) -> Self {
        Self::new(WindowEvent::new(action))
    }

    /// Shorthand for a [`SystemEvent`].
    pub fn system(action: SystemAction) -> Self {
        Self::new(SystemEvent::new(action))
    }

    pub fn with_window(mut self, window: Option<WindowId>) -> Self {
        self.window = window;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn ty(&self) -> EventType {
        self.ty
    }

    pub fn category(&self) -> EventCategory {
        self.ty.category()
    }

    pub fn is_none(&self) -> bool {
        self.ty.is_none()
    }

    /// The window this event belongs to, if any.
    pub fn window(&self) -> Option<WindowId> {
        self.window
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Borrow the payload as `T`.
    ///
    /// Returns `None` unless `T` is the shape this event's type carries.
    pub fn get<T: EventPayload>(&self) -> Option<&T> {
        if T::accepts(self.ty) {
            T::from_data(&self.data)
        } else {
            None
        }
    }

    pub fn key(&self) -> Option<&KeyEvent> {
        self.get()
    }

    pub fn text(&self) -> Option<&TextInputEvent> {
        self.get()
    }

    pub fn mouse_button(&self) -> Option<&MouseButtonEvent> {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{Key, Scancode};
    use crate::modifiers::Modifiers;

    fn key_a() -> KeyEvent {
        KeyEvent::pressed(Key::A, Scancode::A, Modifiers::NONE)
    }

    #[test]
    fn new_tags_from_payload() {
        let event = Event::new(WindowResizeEvent {
            size: Size::new(800, 600),
            previous: Size::new(640, 480),
        });
        assert_eq!(event.ty(), EventType::WindowResize);
        assert_eq!(event.category(), EventCategory::WINDOW);
        assert_eq!(event.get::<WindowResizeEvent>().map(|e| e.delta()), Some((160, 120)));
    }

    #[test]
    fn get_rejects_other_shapes() {
        let event = Event::new(key_a());
        assert!(event.get::<MouseButtonEvent>().is_none());
        assert!(event.get::<TextInputEvent>().is_none());
        assert_eq!(event.key().map(|k| k.key), Some(Key::A));
    }

    #[test]
    fn key_state_selects_type() {
        assert_eq!(Event::new(key_a()).ty(), EventType::KeyPress);

        let repeat = key_a().with_repeat(true);
        assert_eq!(repeat.state, ButtonState::Pressed);
        assert_eq!(Event::new(repeat).ty(), EventType::KeyRepeat);

        let release = KeyEvent::released(Key::A, Scancode::A, Modifiers::NONE).with_repeat(true);
        assert!(!release.repeat);
        assert_eq!(Event::new(release).ty(), EventType::KeyRelease);
    }

    #[test]
    fn double_click_from_click_count() {
        let press = MouseButtonEvent::new(MouseButton::Left, ButtonState::Pressed, 1.0, 2.0);
        assert_eq!(Event::new(press).ty(), EventType::MouseButtonPress);
        assert_eq!(Event::new(press.with_clicks(2)).ty(), EventType::MouseDoubleClick);
        let release = MouseButtonEvent::new(MouseButton::Left, ButtonState::Released, 1.0, 2.0);
        assert_eq!(Event::new(release.with_clicks(2)).ty(), EventType::MouseButtonRelease);
    }

    #[test]
    fn none_is_empty() {
        let event = Event::none();
        assert!(event.is_none());
        assert_eq!(event, Event::default());
        assert!(event.get::<KeyEvent>().is_none());
        assert!(event.category().is_empty());
    }

    #[test]
    fn text_input_rejects_control() {
        assert!(TextInputEvent::new('\u{8}').is_none());
        assert!(TextInputEvent::new('\r').is_none());
        let euro = TextInputEvent::new('€').map(Event::new);
        assert_eq!(euro.and_then(|e| e.text().map(|t| t.as_bytes().len())), Some(3));
    }

    #[test]
    fn touch_saturates() {
        let event: TouchEvent = (0..40)
            .map(|id| TouchPoint {
                id,
                x: id as f32,
                y: 0.0,
                pressure: 1.0,
            })
            .collect();
        assert_eq!(event.len(), MAX_TOUCH_CONTACTS);
        assert!(event.is_full());
        assert_eq!(event.contacts().last().map(|p| p.id), Some(31));
    }

    #[test]
    fn window_and_timestamp_are_carried() {
        let event = Event::window_action(WindowAction::Close)
            .with_window(Some(WindowId(7)))
            .with_timestamp(Timestamp::from_millis(5));
        assert_eq!(event.ty(), EventType::WindowClose);
        assert_eq!(event.window(), Some(WindowId(7)));
        assert_eq!(event.timestamp(), Timestamp::from_millis(5));
    }
}
