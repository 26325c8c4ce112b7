//! Web family key codes (DOM `KeyboardEvent.code`).
//!
//! `code` strings identify physical positions and are already named after
//! the US layout, so this table is almost a rename. Legacy spellings that
//! older engines still emit are accepted on input only.

use crate::keyboard::{Key, Scancode};

#[rustfmt::skip]
static DOM_CODES: &[(&str, Scancode)] = &[
    ("KeyA", Scancode::A),
    ("KeyB", Scancode::B),
    ("KeyC", Scancode::C),
    ("KeyD", Scancode::D),
    ("KeyE", Scancode::E),
    ("KeyF", Scancode::F),
    ("KeyG", Scancode::G),
    ("KeyH", Scancode::H),
    ("KeyI", Scancode::I),
    ("KeyJ", Scancode::J),
    ("KeyK", Scancode::K),
    ("KeyL", Scancode::L),
    ("KeyM", Scancode::M),
    ("KeyN", Scancode::N),
    ("KeyO", Scancode::O),
    ("KeyP", Scancode::P),
    ("KeyQ", Scancode::Q),
    ("KeyR", Scancode::R),
    ("KeyS", Scancode::S),
    ("KeyT", Scancode::T),
    ("KeyU", Scancode::U),
    ("KeyV", Scancode::V),
    ("KeyW", Scancode::W),
    ("KeyX", Scancode::X),
    ("KeyY", Scancode::Y),
    ("KeyZ", Scancode::Z),
    ("Digit1", Scancode::Digit1),
    ("Digit2", Scancode::Digit2),
    ("Digit3", Scancode::Digit3),
    ("Digit4", Scancode::Digit4),
    ("Digit5", Scancode::Digit5),
    ("Digit6", Scancode::Digit6),
    ("Digit7", Scancode::Digit7),
    ("Digit8", Scancode::Digit8),
    ("Digit9", Scancode::Digit9),
    ("Digit0", Scancode::Digit0),
    ("Enter", Scancode::Enter),
    ("Escape", Scancode::Escape),
    ("Backspace", Scancode::Backspace),
    ("Tab", Scancode::Tab),
    ("Space", Scancode::Space),
    ("Minus", Scancode::Minus),
    ("Equal", Scancode::Equal),
    ("BracketLeft", Scancode::BracketLeft),
    ("BracketRight", Scancode::BracketRight),
    ("Backslash", Scancode::Backslash),
    ("Semicolon", Scancode::Semicolon),
    ("Quote", Scancode::Quote),
    ("Backquote", Scancode::Backquote),
    ("Comma", Scancode::Comma),
    ("Period", Scancode::Period),
    ("Slash", Scancode::Slash),
    ("CapsLock", Scancode::CapsLock),
    ("F1", Scancode::F1),
    ("F2", Scancode::F2),
    ("F3", Scancode::F3),
    ("F4", Scancode::F4),
    ("F5", Scancode::F5),
    ("F6", Scancode::F6),
    ("F7", Scancode::F7),
    ("F8", Scancode::F8),
    ("F9", Scancode::F9),
    ("F10", Scancode::F10),
    ("F11", Scancode::F11),
    ("F12", Scancode::F12),
    ("F13", Scancode::F13),
    ("F14", Scancode::F14),
    ("F15", Scancode::F15),
    ("F16", Scancode::F16),
    ("F17", Scancode::F17),
    ("F18", Scancode::F18),
    ("F19", Scancode::F19),
    ("F20", Scancode::F20),
    ("F21", Scancode::F21),
    ("F22", Scancode::F22),
    ("F23", Scancode::F23),
    ("F24", Scancode::F24),
    ("PrintScreen", Scancode::PrintScreen),
    ("ScrollLock", Scancode::ScrollLock),
    ("Pause", Scancode::Pause),
    ("Insert", Scancode::Insert),
    ("Home", Scancode::Home),
    ("PageUp", Scancode::PageUp),
    ("Delete", Scancode::Delete),
    ("End", Scancode::End),
    ("PageDown", Scancode::PageDown),
    ("ArrowRight", Scancode::ArrowRight),
    ("ArrowLeft", Scancode::ArrowLeft),
    ("ArrowDown", Scancode::ArrowDown),
    ("ArrowUp", Scancode::ArrowUp),
    ("NumLock", Scancode::NumLock),
    ("NumpadDivide", Scancode::NumpadDivide),
    ("NumpadMultiply", Scancode::NumpadMultiply),
    ("NumpadSubtract", Scancode::NumpadSubtract),
    ("NumpadAdd", Scancode::NumpadAdd),
    ("NumpadEnter", Scancode::NumpadEnter),
    ("Numpad1", Scancode::Numpad1),
    ("Numpad2", Scancode::Numpad2),
    ("Numpad3", Scancode::Numpad3),
    ("Numpad4", Scancode::Numpad4),
    ("Numpad5", Scancode::Numpad5),
    ("Numpad6", Scancode::Numpad6),
    ("Numpad7", Scancode::Numpad7),
    ("Numpad8", Scancode::Numpad8),
    ("Numpad9", Scancode::Numpad9),
    ("Numpad0", Scancode::Numpad0),
    ("NumpadDecimal", Scancode::NumpadDecimal),
    ("NumpadEqual", Scancode::NumpadEqual),
    ("NumpadComma", Scancode::NumpadComma),
    ("IntlBackslash", Scancode::IntlBackslash),
    ("IntlRo", Scancode::IntlRo),
    ("IntlYen", Scancode::IntlYen),
    ("KanaMode", Scancode::KanaMode),
    ("Convert", Scancode::Convert),
    ("NonConvert", Scancode::NonConvert),
    ("Lang1", Scancode::Lang1),
    ("Lang2", Scancode::Lang2),
    ("ContextMenu", Scancode::ContextMenu),
    ("Power", Scancode::Power),
    ("Help", Scancode::Help),
    ("Select", Scancode::Select),
    ("Again", Scancode::Again),
    ("Undo", Scancode::Undo),
    ("Cut", Scancode::Cut),
    ("Copy", Scancode::Copy),
    ("Paste", Scancode::Paste),
    ("Find", Scancode::Find),
    ("AudioVolumeMute", Scancode::AudioVolumeMute),
    ("AudioVolumeUp", Scancode::AudioVolumeUp),
    ("AudioVolumeDown", Scancode::AudioVolumeDown),
    ("ControlLeft", Scancode::ControlLeft),
    ("ShiftLeft", Scancode::ShiftLeft),
    ("AltLeft", Scancode::AltLeft),
    ("MetaLeft", Scancode::SuperLeft),
    ("ControlRight", Scancode::ControlRight),
    ("ShiftRight", Scancode::ShiftRight),
    ("AltRight", Scancode::AltRight),
    ("MetaRight", Scancode::SuperRight),
    ("MediaPlayPause", Scancode::MediaPlayPause),
    ("MediaStop", Scancode::MediaStop),
    ("MediaTrackNext", Scancode::MediaTrackNext),
    ("MediaTrackPrevious", Scancode::MediaTrackPrevious),
    ("MediaSelect", Scancode::MediaSelect),
    ("Eject", Scancode::Eject),
    ("Sleep", Scancode::Sleep),
    ("WakeUp", Scancode::WakeUp),
    // Legacy spellings (input only; reverse lookups hit the entries above)
    ("OSLeft", Scancode::SuperLeft),
    ("OSRight", Scancode::SuperRight),
    ("VolumeMute", Scancode::AudioVolumeMute),
    ("VolumeUp", Scancode::AudioVolumeUp),
    ("VolumeDown", Scancode::AudioVolumeDown),
];

/// Scancode for a DOM `code` string. Unrecognised codes are `Unknown`.
pub fn scancode_from_code(code: &str) -> Scancode {
    DOM_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(Scancode::Unknown, |&(_, sc)| sc)
}

/// DOM `code` string for a scancode, where one exists.
pub fn code_from_scancode(scancode: Scancode) -> Option<&'static str> {
    if scancode == Scancode::Unknown {
        return None;
    }
    DOM_CODES
        .iter()
        .find(|(_, sc)| *sc == scancode)
        .map(|&(code, _)| code)
}

/// Canonical key for DOM codes with no physical position.
pub fn key_from_code(code: &str) -> Key {
    match code {
        "BrowserBack" => Key::BrowserBack,
        "BrowserForward" => Key::BrowserForward,
        "BrowserRefresh" => Key::BrowserRefresh,
        "BrowserStop" => Key::BrowserStop,
        "BrowserSearch" => Key::BrowserSearch,
        "BrowserFavorites" => Key::BrowserFavorites,
        "BrowserHome" => Key::BrowserHome,
        "LaunchMail" => Key::LaunchMail,
        "LaunchApp1" => Key::LaunchApp1,
        "LaunchApp2" => Key::LaunchApp2,
        _ => Key::Unknown,
    }
}

/// The single Unicode scalar a DOM `key` value stands for, if it is one.
///
/// Named values such as `"Enter"` or `"Shift"` are longer than one scalar
/// and yield `None`, as do control characters.
pub fn char_from_key_value(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_lookup() {
        assert_eq!(scancode_from_code("KeyA"), Scancode::A);
        assert_eq!(scancode_from_code("MetaLeft"), Scancode::SuperLeft);
        assert_eq!(scancode_from_code("OSLeft"), Scancode::SuperLeft);
        assert_eq!(scancode_from_code("Nonsense"), Scancode::Unknown);
    }

    #[test]
    fn reverse_prefers_standard_spelling() {
        assert_eq!(code_from_scancode(Scancode::SuperLeft), Some("MetaLeft"));
        assert_eq!(code_from_scancode(Scancode::AudioVolumeUp), Some("AudioVolumeUp"));
        assert_eq!(code_from_scancode(Scancode::Unknown), None);
    }

    #[test]
    fn round_trip_for_every_scancode_with_a_code() {
        for &sc in Scancode::ALL {
            if let Some(code) = code_from_scancode(sc) {
                assert_eq!(scancode_from_code(code), sc);
            }
        }
    }

    #[test]
    fn browser_keys() {
        assert_eq!(scancode_from_code("BrowserBack"), Scancode::Unknown);
        assert_eq!(key_from_code("BrowserBack"), Key::BrowserBack);
    }

    #[test]
    fn key_values() {
        assert_eq!(char_from_key_value("a"), Some('a'));
        assert_eq!(char_from_key_value("é"), Some('é'));
        assert_eq!(char_from_key_value("Enter"), None);
        assert_eq!(char_from_key_value(""), None);
        assert_eq!(char_from_key_value("\u{7f}"), None);
    }
}
