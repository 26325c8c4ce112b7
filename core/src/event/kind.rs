//! Event type tags and coarse categories.

use bitflags::bitflags;

bitflags! {
    /// Coarse grouping of event types for filtering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventCategory: u32 {
        /// Window lifecycle, geometry and focus.
        const WINDOW = 1 << 0;
        /// Key presses and text input.
        const KEYBOARD = 1 << 1;
        /// Pointer buttons, motion, wheel and crossing.
        const MOUSE = 1 << 2;
        /// Touch contacts and gestures.
        const TOUCH = 1 << 3;
        /// Gamepad connection, buttons and axes.
        const GAMEPAD = 1 << 4;
        /// Drag-and-drop hover and payloads.
        const DROP = 1 << 5;
        /// Application and system notifications.
        const SYSTEM = 1 << 6;
        /// Application-defined events.
        const CUSTOM = 1 << 7;
        /// Every category combined.
        const ALL = Self::WINDOW.bits()
            | Self::KEYBOARD.bits()
            | Self::MOUSE.bits()
            | Self::TOUCH.bits()
            | Self::GAMEPAD.bits()
            | Self::DROP.bits()
            | Self::SYSTEM.bits()
            | Self::CUSTOM.bits();
    }
}

macro_rules! event_types {
    ($($(#[$meta:meta])* $name:ident => $category:ident),* $(,)?) => {
        /// Tag identifying what an [`Event`](super::Event) means and which
        /// payload shape it carries.
        ///
        /// The set is closed; `None` marks an empty envelope.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(u16)]
        pub enum EventType {
            /// No event.
            #[default]
            None,
            $($(#[$meta])* $name,)*
        }

        impl EventType {
            /// Every event type, `None` first, in discriminant order.
            pub const ALL: &'static [EventType] = &[EventType::None, $(EventType::$name,)*];

            /// Number of event types including `None`.
            pub const COUNT: usize = Self::ALL.len();

            /// Stable name, matching the variant.
            pub fn name(self) -> &'static str {
                match self {
                    Self::None => "None",
                    $(Self::$name => stringify!($name),)*
                }
            }

            /// The category this type belongs to. `None` belongs to none.
            pub fn category(self) -> EventCategory {
                match self {
                    Self::None => EventCategory::empty(),
                    $(Self::$name => EventCategory::$category,)*
                }
            }
        }
    };
}

event_types! {
    WindowCreate => WINDOW,
    WindowClose => WINDOW,
    WindowDestroy => WINDOW,
    WindowPaint => WINDOW,
    WindowShow => WINDOW,
    WindowHide => WINDOW,
    WindowMinimize => WINDOW,
    WindowMaximize => WINDOW,
    WindowRestore => WINDOW,
    WindowFocusGained => WINDOW,
    WindowFocusLost => WINDOW,
    WindowResize => WINDOW,
    WindowMove => WINDOW,
    WindowDpiChange => WINDOW,
    WindowThemeChange => WINDOW,

    KeyPress => KEYBOARD,
    /// Auto-repeat of a key that is still held.
    KeyRepeat => KEYBOARD,
    KeyRelease => KEYBOARD,
    TextInput => KEYBOARD,

    MouseButtonPress => MOUSE,
    MouseButtonRelease => MOUSE,
    MouseDoubleClick => MOUSE,
    MouseMove => MOUSE,
    /// Unaccelerated relative motion.
    MouseRaw => MOUSE,
    MouseWheel => MOUSE,
    MouseEnter => MOUSE,
    MouseLeave => MOUSE,

    TouchBegin => TOUCH,
    TouchMove => TOUCH,
    TouchEnd => TOUCH,
    TouchCancel => TOUCH,
    GesturePinch => TOUCH,
    GestureRotate => TOUCH,
    GestureSwipe => TOUCH,

    GamepadConnect => GAMEPAD,
    GamepadDisconnect => GAMEPAD,
    GamepadButtonPress => GAMEPAD,
    GamepadButtonRelease => GAMEPAD,
    GamepadAxis => GAMEPAD,

    DropEnter => DROP,
    DropOver => DROP,
    DropLeave => DROP,
    DropFile => DROP,
    DropText => DROP,

    Quit => SYSTEM,
    AppSuspend => SYSTEM,
    AppResume => SYSTEM,
    LowMemory => SYSTEM,
    DisplayChange => SYSTEM,
    LocaleChange => SYSTEM,
    PowerChange => SYSTEM,

    Custom => CUSTOM,
}

impl EventType {
    /// Position in [`EventType::ALL`], usable as a table index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for the empty tag.
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position() {
        for (i, ty) in EventType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), i, "{ty}");
        }
        assert_eq!(EventType::COUNT, EventType::ALL.len());
    }

    #[test]
    fn every_type_has_exactly_one_category() {
        for ty in &EventType::ALL[1..] {
            assert_eq!(ty.category().bits().count_ones(), 1, "{ty}");
            assert!(EventCategory::ALL.contains(ty.category()));
        }
        assert!(EventType::None.category().is_empty());
    }

    #[test]
    fn categories() {
        assert_eq!(EventType::KeyRepeat.category(), EventCategory::KEYBOARD);
        assert_eq!(EventType::MouseDoubleClick.category(), EventCategory::MOUSE);
        assert_eq!(EventType::WindowResize.category(), EventCategory::WINDOW);
        assert_eq!(EventType::PowerChange.category(), EventCategory::SYSTEM);
        assert_eq!(EventType::Custom.name(), "Custom");
    }
}
