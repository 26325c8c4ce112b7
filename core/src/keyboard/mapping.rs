//! The authoritative scancode to canonical key table.
//!
//! Every backend funnels its native codes into a [`Scancode`] first and then
//! through [`scancode_to_key`]. There is exactly one such table; when two
//! backends disagree about a physical key it is their native table that is
//! wrong, never this one.
//!
//! Each physical position is named the same on both sides, so the table is
//! written once as a list of names and expanded into both directions.

use super::{Key, Scancode};

macro_rules! position_table {
    ($($name:ident),* $(,)?) => {
        /// Resolve the canonical key at a physical position.
        ///
        /// Pure and total: `Scancode::Unknown` maps to `Key::Unknown`.
        pub fn scancode_to_key(scancode: Scancode) -> Key {
            match scancode {
                Scancode::Unknown => Key::Unknown,
                $(Scancode::$name => Key::$name,)*
            }
        }

        /// Inverse of [`scancode_to_key`].
        ///
        /// Keys without a physical position (browser/launch keys, side-less
        /// modifiers) map to `Scancode::Unknown`.
        pub fn key_to_scancode(key: Key) -> Scancode {
            match key {
                $(Key::$name => Scancode::$name,)*
                _ => Scancode::Unknown,
            }
        }
    };
}

position_table! {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit1, Digit2, Digit3, Digit4, Digit5,
    Digit6, Digit7, Digit8, Digit9, Digit0,
    Enter, Escape, Backspace, Tab, Space,
    Minus, Equal, BracketLeft, BracketRight, Backslash, NonUsHash,
    Semicolon, Quote, Backquote, Comma, Period, Slash,
    CapsLock,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    PrintScreen, ScrollLock, Pause,
    Insert, Home, PageUp, Delete, End, PageDown,
    ArrowRight, ArrowLeft, ArrowDown, ArrowUp,
    NumLock, NumpadDivide, NumpadMultiply, NumpadSubtract, NumpadAdd, NumpadEnter,
    Numpad1, Numpad2, Numpad3, Numpad4, Numpad5,
    Numpad6, Numpad7, Numpad8, Numpad9, Numpad0,
    NumpadDecimal,
    IntlBackslash, ContextMenu, Power, NumpadEqual,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,
    Execute, Help, Menu, Select, Stop, Again, Undo, Cut, Copy, Paste, Find,
    AudioVolumeMute, AudioVolumeUp, AudioVolumeDown,
    NumpadComma,
    IntlRo, KanaMode, IntlYen, Convert, NonConvert, Lang1, Lang2,
    ControlLeft, ShiftLeft, AltLeft, SuperLeft,
    ControlRight, ShiftRight, AltRight, SuperRight,
    MediaPlayPause, MediaStop, MediaTrackNext, MediaTrackPrevious, MediaSelect,
    Eject, Sleep, WakeUp,
}

/// Resolve a canonical key, preferring the scancode path.
///
/// `fallback` is consulted only when the scancode path produced nothing.
/// It exists for purely symbolic keys (browser/launch keys) that have no
/// physical position but still have a native virtual code.
pub fn resolve_key(scancode: Scancode, fallback: impl FnOnce() -> Key) -> Key {
    match scancode_to_key(scancode) {
        Key::Unknown => fallback(),
        key => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scancode_has_a_key() {
        for &code in Scancode::ALL {
            assert_ne!(scancode_to_key(code), Key::Unknown, "{code}");
        }
    }

    #[test]
    fn table_is_invertible() {
        for &code in Scancode::ALL {
            assert_eq!(key_to_scancode(scancode_to_key(code)), code);
        }
    }

    #[test]
    fn lookup_is_pure() {
        for &code in Scancode::ALL {
            assert_eq!(scancode_to_key(code), scancode_to_key(code));
        }
    }

    #[test]
    fn keys_without_position() {
        assert_eq!(key_to_scancode(Key::BrowserBack), Scancode::Unknown);
        assert_eq!(key_to_scancode(Key::Shift), Scancode::Unknown);
        assert_eq!(scancode_to_key(Scancode::Unknown), Key::Unknown);
    }

    #[test]
    fn fallback_never_overrides_scancode() {
        let key = resolve_key(Scancode::A, || Key::BrowserBack);
        assert_eq!(key, Key::A);

        let key = resolve_key(Scancode::Unknown, || Key::BrowserBack);
        assert_eq!(key, Key::BrowserBack);
    }
}
