//! Physical key identity.
//!
//! [`Scancode`] names a key by where it sits on the keyboard, using the
//! USB-HID keyboard/keypad usage page (0x07) as the numbering. The same
//! physical key has the same scancode on every operating system and every
//! layout. Consumer-page keys (media transport, power) have no keyboard-page
//! usage and are given aliases above `0x100`.

macro_rules! scancodes {
    ($($(#[$meta:meta])* $name:ident = $usage:literal),* $(,)?) => {
        /// USB-HID based physical key identifier.
        ///
        /// `Unknown` (usage 0) is the sentinel for keys no table could place.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(u16)]
        pub enum Scancode {
            /// No physical key could be identified.
            #[default]
            Unknown = 0,
            $($(#[$meta])* $name = $usage,)*
        }

        impl Scancode {
            /// Every known scancode, in usage order. `Unknown` is not included.
            pub const ALL: &'static [Scancode] = &[$(Scancode::$name,)*];

            /// Look up a scancode by its HID usage (or consumer alias).
            ///
            /// Usages without a variant yield [`Scancode::Unknown`].
            pub fn from_usage(usage: u16) -> Self {
                match usage {
                    $($usage => Self::$name,)*
                    _ => Self::Unknown,
                }
            }

            /// Stable, human readable name of the scancode.
            pub fn name(self) -> &'static str {
                match self {
                    Self::Unknown => "Unknown",
                    $(Self::$name => stringify!($name),)*
                }
            }
        }
    };
}

scancodes! {
    // Letters
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,

    // Digit row
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Editing and whitespace
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,

    // Punctuation
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    /// ISO key left of Enter (`#~` on UK layouts).
    NonUsHash = 0x32,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    CapsLock = 0x39,

    // Function row
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,

    // Navigation cluster
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Keypad
    NumLock = 0x53,
    NumpadDivide = 0x54,
    NumpadMultiply = 0x55,
    NumpadSubtract = 0x56,
    NumpadAdd = 0x57,
    NumpadEnter = 0x58,
    Numpad1 = 0x59,
    Numpad2 = 0x5A,
    Numpad3 = 0x5B,
    Numpad4 = 0x5C,
    Numpad5 = 0x5D,
    Numpad6 = 0x5E,
    Numpad7 = 0x5F,
    Numpad8 = 0x60,
    Numpad9 = 0x61,
    Numpad0 = 0x62,
    NumpadDecimal = 0x63,

    /// ISO key between left Shift and Z.
    IntlBackslash = 0x64,
    ContextMenu = 0x65,
    Power = 0x66,
    NumpadEqual = 0x67,

    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6A,
    F16 = 0x6B,
    F17 = 0x6C,
    F18 = 0x6D,
    F19 = 0x6E,
    F20 = 0x6F,
    F21 = 0x70,
    F22 = 0x71,
    F23 = 0x72,
    F24 = 0x73,

    Execute = 0x74,
    Help = 0x75,
    Menu = 0x76,
    Select = 0x77,
    Stop = 0x78,
    Again = 0x79,
    Undo = 0x7A,
    Cut = 0x7B,
    Copy = 0x7C,
    Paste = 0x7D,
    Find = 0x7E,
    AudioVolumeMute = 0x7F,
    AudioVolumeUp = 0x80,
    AudioVolumeDown = 0x81,

    NumpadComma = 0x85,

    // International keys (JIS / Korean)
    /// JIS `ろ` key.
    IntlRo = 0x87,
    /// JIS katakana/hiragana toggle.
    KanaMode = 0x88,
    /// JIS `¥` key.
    IntlYen = 0x89,
    /// JIS henkan.
    Convert = 0x8A,
    /// JIS muhenkan.
    NonConvert = 0x8B,
    /// Korean Han/Yeong toggle.
    Lang1 = 0x90,
    /// Korean Hanja conversion.
    Lang2 = 0x91,

    // Modifiers
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    SuperLeft = 0xE3,
    ControlRight = 0xE4,
    ShiftRight = 0xE5,
    AltRight = 0xE6,
    SuperRight = 0xE7,

    // Consumer-page aliases (outside the keyboard page)
    MediaPlayPause = 0x101,
    MediaStop = 0x102,
    MediaTrackNext = 0x103,
    MediaTrackPrevious = 0x104,
    MediaSelect = 0x105,
    Eject = 0x106,
    Sleep = 0x107,
    WakeUp = 0x108,
}

impl Scancode {
    /// The raw HID usage (or consumer alias) of this scancode.
    pub fn usage(self) -> u16 {
        self as u16
    }

    /// Returns `true` for keys on the numeric keypad, including Num Lock.
    pub fn is_keypad(self) -> bool {
        matches!(self.usage(), 0x53..=0x63 | 0x67 | 0x85)
    }

    /// Returns `true` for the eight left/right modifier keys.
    pub fn is_modifier(self) -> bool {
        matches!(self.usage(), 0xE0..=0xE7)
    }

    /// Returns `true` for consumer-page aliases (media and power keys).
    pub fn is_consumer_alias(self) -> bool {
        self.usage() > 0xFF
    }

    /// Returns `true` unless this is [`Scancode::Unknown`].
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl std::fmt::Display for Scancode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_round_trips_through_from_usage() {
        for &code in Scancode::ALL {
            assert_eq!(Scancode::from_usage(code.usage()), code, "{code}");
        }
    }

    #[test]
    fn unmapped_usage_is_unknown() {
        assert_eq!(Scancode::from_usage(0x00), Scancode::Unknown);
        assert_eq!(Scancode::from_usage(0x03), Scancode::Unknown);
        assert_eq!(Scancode::from_usage(0xFFFF), Scancode::Unknown);
    }

    #[test]
    fn letters_follow_hid_numbering() {
        assert_eq!(Scancode::A.usage(), 0x04);
        assert_eq!(Scancode::Z.usage(), 0x1D);
        assert_eq!(Scancode::Digit0.usage(), 0x27);
    }

    #[test]
    fn classification() {
        assert!(Scancode::Numpad5.is_keypad());
        assert!(Scancode::NumLock.is_keypad());
        assert!(!Scancode::Digit5.is_keypad());
        assert!(Scancode::ShiftRight.is_modifier());
        assert!(!Scancode::CapsLock.is_modifier());
        assert!(Scancode::MediaPlayPause.is_consumer_alias());
        assert!(!Scancode::AudioVolumeMute.is_consumer_alias());
    }

    #[test]
    fn all_is_sorted_and_unique() {
        for pair in Scancode::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }
}
