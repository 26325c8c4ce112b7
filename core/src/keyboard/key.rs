//! Layout-invariant semantic key identity.
//!
//! A [`Key`] names "the key at this position on a US-QWERTY keyboard". It is
//! derived from a [`Scancode`](super::Scancode) through
//! [`scancode_to_key`](super::scancode_to_key), so pressing the key labelled
//! `Z` on a German keyboard still yields [`Key::Y`]. Text produced by the
//! layout travels separately in text-input events.

macro_rules! keys {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        /// Canonical key identity (US-QWERTY reference positions).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[non_exhaustive]
        pub enum Key {
            /// No canonical key could be resolved.
            #[default]
            Unknown,
            $($(#[$meta])* $name,)*
        }

        impl Key {
            /// Every canonical key except `Unknown`.
            pub const ALL: &'static [Key] = &[$(Key::$name,)*];

            /// Stable, human readable name of the key.
            pub fn name(self) -> &'static str {
                match self {
                    Self::Unknown => "Unknown",
                    $(Self::$name => stringify!($name),)*
                }
            }
        }
    };
}

keys! {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digit row
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,

    // Whitespace and editing
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,

    // Punctuation
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    NonUsHash,
    Semicolon,
    Quote,
    Backquote,
    Comma,
    Period,
    Slash,

    // Locks and system
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,

    // Navigation
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Keypad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadDivide,
    NumpadMultiply,
    NumpadSubtract,
    NumpadAdd,
    NumpadEnter,
    NumpadDecimal,
    NumpadEqual,
    NumpadComma,

    // Modifiers, sided
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    SuperLeft,
    SuperRight,

    /// Side-less Shift, produced only by [`Key::normalized`] or by backends
    /// that cannot tell the sides apart.
    Shift,
    /// Side-less Control.
    Control,
    /// Side-less Alt / Option.
    Alt,
    /// Side-less Super / Windows / Command.
    Super,

    // ISO and international
    IntlBackslash,
    IntlRo,
    IntlYen,
    KanaMode,
    Convert,
    NonConvert,
    Lang1,
    Lang2,

    // Application / editing commands
    ContextMenu,
    Power,
    Execute,
    Help,
    Menu,
    Select,
    Stop,
    Again,
    Undo,
    Cut,
    Copy,
    Paste,
    Find,

    // Media
    AudioVolumeMute,
    AudioVolumeUp,
    AudioVolumeDown,
    MediaPlayPause,
    MediaStop,
    MediaTrackNext,
    MediaTrackPrevious,
    MediaSelect,
    Eject,
    Sleep,
    WakeUp,

    // Browser and launch keys: no scancode, resolved by virtual-key fallback
    BrowserBack,
    BrowserForward,
    BrowserRefresh,
    BrowserStop,
    BrowserSearch,
    BrowserFavorites,
    BrowserHome,
    LaunchMail,
    LaunchApp1,
    LaunchApp2,
}

impl Key {
    /// Collapse sided modifiers onto their side-less equivalent.
    ///
    /// `ShiftLeft` and `ShiftRight` both normalize to `Shift`; every other
    /// key normalizes to itself. The sided values stay distinct keys.
    pub fn normalized(self) -> Key {
        match self {
            Self::ShiftLeft | Self::ShiftRight => Self::Shift,
            Self::ControlLeft | Self::ControlRight => Self::Control,
            Self::AltLeft | Self::AltRight => Self::Alt,
            Self::SuperLeft | Self::SuperRight => Self::Super,
            other => other,
        }
    }

    /// Whether `self` and `other` are the same key after normalization.
    pub fn is_equivalent(self, other: Key) -> bool {
        self.normalized() == other.normalized()
    }

    /// Returns `true` for Shift/Control/Alt/Super in any form.
    pub fn is_modifier(self) -> bool {
        matches!(
            self.normalized(),
            Self::Shift | Self::Control | Self::Alt | Self::Super
        )
    }

    /// Returns `true` for Caps Lock, Num Lock and Scroll Lock.
    pub fn is_lock(self) -> bool {
        matches!(self, Self::CapsLock | Self::NumLock | Self::ScrollLock)
    }

    /// Returns `true` for keys that normally produce a character.
    pub fn is_printable_position(self) -> bool {
        self.us_char(false).is_some()
    }

    /// Returns `true` for keys on the numeric keypad.
    pub fn is_keypad(self) -> bool {
        matches!(
            self,
            Self::Numpad0
                | Self::Numpad1
                | Self::Numpad2
                | Self::Numpad3
                | Self::Numpad4
                | Self::Numpad5
                | Self::Numpad6
                | Self::Numpad7
                | Self::Numpad8
                | Self::Numpad9
                | Self::NumpadDivide
                | Self::NumpadMultiply
                | Self::NumpadSubtract
                | Self::NumpadAdd
                | Self::NumpadEnter
                | Self::NumpadDecimal
                | Self::NumpadEqual
                | Self::NumpadComma
        )
    }

    /// Character this position produces on the US-QWERTY reference layout.
    ///
    /// Used by backends that deliver key codes without any text (for
    /// example XCB without an input method). Letters ignore Caps Lock;
    /// callers fold that into `shift`.
    pub fn us_char(self, shift: bool) -> Option<char> {
        let (plain, shifted) = match self {
            Self::A => ('a', 'A'),
            Self::B => ('b', 'B'),
            Self::C => ('c', 'C'),
            Self::D => ('d', 'D'),
            Self::E => ('e', 'E'),
            Self::F => ('f', 'F'),
            Self::G => ('g', 'G'),
            Self::H => ('h', 'H'),
            Self::I => ('i', 'I'),
            Self::J => ('j', 'J'),
            Self::K => ('k', 'K'),
            Self::L => ('l', 'L'),
            Self::M => ('m', 'M'),
            Self::N => ('n', 'N'),
            Self::O => ('o', 'O'),
            Self::P => ('p', 'P'),
            Self::Q => ('q', 'Q'),
            Self::R => ('r', 'R'),
            Self::S => ('s', 'S'),
            Self::T => ('t', 'T'),
            Self::U => ('u', 'U'),
            Self::V => ('v', 'V'),
            Self::W => ('w', 'W'),
            Self::X => ('x', 'X'),
            Self::Y => ('y', 'Y'),
            Self::Z => ('z', 'Z'),
            Self::Digit1 => ('1', '!'),
            Self::Digit2 => ('2', '@'),
            Self::Digit3 => ('3', '#'),
            Self::Digit4 => ('4', '$'),
            Self::Digit5 => ('5', '%'),
            Self::Digit6 => ('6', '^'),
            Self::Digit7 => ('7', '&'),
            Self::Digit8 => ('8', '*'),
            Self::Digit9 => ('9', '('),
            Self::Digit0 => ('0', ')'),
            Self::Space => (' ', ' '),
            Self::Minus => ('-', '_'),
            Self::Equal => ('=', '+'),
            Self::BracketLeft => ('[', '{'),
            Self::BracketRight => (']', '}'),
            Self::Backslash | Self::NonUsHash => ('\\', '|'),
            Self::IntlBackslash => ('<', '>'),
            Self::Semicolon => (';', ':'),
            Self::Quote => ('\'', '"'),
            Self::Backquote => ('`', '~'),
            Self::Comma => (',', '<'),
            Self::Period => ('.', '>'),
            Self::Slash => ('/', '?'),
            Self::Numpad0 => ('0', '0'),
            Self::Numpad1 => ('1', '1'),
            Self::Numpad2 => ('2', '2'),
            Self::Numpad3 => ('3', '3'),
            Self::Numpad4 => ('4', '4'),
            Self::Numpad5 => ('5', '5'),
            Self::Numpad6 => ('6', '6'),
            Self::Numpad7 => ('7', '7'),
            Self::Numpad8 => ('8', '8'),
            Self::Numpad9 => ('9', '9'),
            Self::NumpadDivide => ('/', '/'),
            Self::NumpadMultiply => ('*', '*'),
            Self::NumpadSubtract => ('-', '-'),
            Self::NumpadAdd => ('+', '+'),
            Self::NumpadDecimal => ('.', '.'),
            Self::NumpadEqual => ('=', '='),
            Self::NumpadComma => (',', ','),
            _ => return None,
        };
        Some(if shift { shifted } else { plain })
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sided_modifiers_normalize_but_stay_distinct() {
        assert_eq!(Key::ShiftLeft.normalized(), Key::Shift);
        assert_eq!(Key::ShiftRight.normalized(), Key::Shift);
        assert_ne!(Key::ShiftLeft, Key::ShiftRight);
        assert!(Key::ShiftLeft.is_equivalent(Key::ShiftRight));
        assert!(!Key::ShiftLeft.is_equivalent(Key::ControlLeft));
    }

    #[test]
    fn non_modifiers_normalize_to_themselves() {
        for &key in Key::ALL {
            if !key.is_modifier() {
                assert_eq!(key.normalized(), key);
            }
        }
    }

    #[test]
    fn us_chars() {
        assert_eq!(Key::A.us_char(false), Some('a'));
        assert_eq!(Key::A.us_char(true), Some('A'));
        assert_eq!(Key::Digit2.us_char(true), Some('@'));
        assert_eq!(Key::F1.us_char(false), None);
        assert!(Key::Space.is_printable_position());
        assert!(!Key::Enter.is_printable_position());
    }

    #[test]
    fn classification() {
        assert!(Key::Alt.is_modifier());
        assert!(Key::SuperRight.is_modifier());
        assert!(!Key::CapsLock.is_modifier());
        assert!(Key::CapsLock.is_lock());
        assert!(Key::NumpadEnter.is_keypad());
        assert!(!Key::Enter.is_keypad());
    }

    #[test]
    fn names() {
        assert_eq!(Key::Unknown.name(), "Unknown");
        assert_eq!(Key::BracketLeft.to_string(), "BracketLeft");
    }
}
