//! Android key codes (`AKEYCODE_*`).
//!
//! Android key codes are mostly positional for hardware keyboards. A few
//! system keys (Back, Search, Explorer) have no keyboard position and resolve
//! only through [`key_from_keycode`].

use crate::keyboard::{Key, Scancode};

#[rustfmt::skip]
static KEYCODES: &[(i32, Scancode)] = &[
    (7, Scancode::Digit0),
    (8, Scancode::Digit1),
    (9, Scancode::Digit2),
    (10, Scancode::Digit3),
    (11, Scancode::Digit4),
    (12, Scancode::Digit5),
    (13, Scancode::Digit6),
    (14, Scancode::Digit7),
    (15, Scancode::Digit8),
    (16, Scancode::Digit9),
    (19, Scancode::ArrowUp),
    (20, Scancode::ArrowDown),
    (21, Scancode::ArrowLeft),
    (22, Scancode::ArrowRight),
    (24, Scancode::AudioVolumeUp),
    (25, Scancode::AudioVolumeDown),
    (26, Scancode::Power),
    (29, Scancode::A),
    (30, Scancode::B),
    (31, Scancode::C),
    (32, Scancode::D),
    (33, Scancode::E),
    (34, Scancode::F),
    (35, Scancode::G),
    (36, Scancode::H),
    (37, Scancode::I),
    (38, Scancode::J),
    (39, Scancode::K),
    (40, Scancode::L),
    (41, Scancode::M),
    (42, Scancode::N),
    (43, Scancode::O),
    (44, Scancode::P),
    (45, Scancode::Q),
    (46, Scancode::R),
    (47, Scancode::S),
    (48, Scancode::T),
    (49, Scancode::U),
    (50, Scancode::V),
    (51, Scancode::W),
    (52, Scancode::X),
    (53, Scancode::Y),
    (54, Scancode::Z),
    (55, Scancode::Comma),
    (56, Scancode::Period),
    (57, Scancode::AltLeft),
    (58, Scancode::AltRight),
    (59, Scancode::ShiftLeft),
    (60, Scancode::ShiftRight),
    (61, Scancode::Tab),
    (62, Scancode::Space),
    (66, Scancode::Enter),
    (67, Scancode::Backspace),
    (68, Scancode::Backquote),
    (69, Scancode::Minus),
    (70, Scancode::Equal),
    (71, Scancode::BracketLeft),
    (72, Scancode::BracketRight),
    (73, Scancode::Backslash),
    (74, Scancode::Semicolon),
    (75, Scancode::Quote),
    (76, Scancode::Slash),
    (82, Scancode::ContextMenu),
    (85, Scancode::MediaPlayPause),
    (86, Scancode::MediaStop),
    (87, Scancode::MediaTrackNext),
    (88, Scancode::MediaTrackPrevious),
    (92, Scancode::PageUp),
    (93, Scancode::PageDown),
    (111, Scancode::Escape),
    (112, Scancode::Delete),
    (113, Scancode::ControlLeft),
    (114, Scancode::ControlRight),
    (115, Scancode::CapsLock),
    (116, Scancode::ScrollLock),
    (117, Scancode::SuperLeft),
    (118, Scancode::SuperRight),
    (120, Scancode::PrintScreen),
    (121, Scancode::Pause),
    (122, Scancode::Home),
    (123, Scancode::End),
    (124, Scancode::Insert),
    (129, Scancode::Eject),
    (131, Scancode::F1),
    (132, Scancode::F2),
    (133, Scancode::F3),
    (134, Scancode::F4),
    (135, Scancode::F5),
    (136, Scancode::F6),
    (137, Scancode::F7),
    (138, Scancode::F8),
    (139, Scancode::F9),
    (140, Scancode::F10),
    (141, Scancode::F11),
    (142, Scancode::F12),
    (143, Scancode::NumLock),
    (144, Scancode::Numpad0),
    (145, Scancode::Numpad1),
    (146, Scancode::Numpad2),
    (147, Scancode::Numpad3),
    (148, Scancode::Numpad4),
    (149, Scancode::Numpad5),
    (150, Scancode::Numpad6),
    (151, Scancode::Numpad7),
    (152, Scancode::Numpad8),
    (153, Scancode::Numpad9),
    (154, Scancode::NumpadDivide),
    (155, Scancode::NumpadMultiply),
    (156, Scancode::NumpadSubtract),
    (157, Scancode::NumpadAdd),
    (158, Scancode::NumpadDecimal),
    (159, Scancode::NumpadComma),
    (160, Scancode::NumpadEnter),
    (161, Scancode::NumpadEqual),
    (164, Scancode::AudioVolumeMute),
    (211, Scancode::Lang1),
    (212, Scancode::Lang2),
    (213, Scancode::NonConvert),
    (214, Scancode::Convert),
    (215, Scancode::KanaMode),
    (216, Scancode::IntlYen),
    (217, Scancode::IntlRo),
    (223, Scancode::Sleep),
    (224, Scancode::WakeUp),
    (259, Scancode::Help),
    (277, Scancode::Cut),
    (278, Scancode::Copy),
    (279, Scancode::Paste),
];

/// `AKEYCODE_BACK`.
pub const KEYCODE_BACK: i32 = 4;

/// Scancode for an Android key code.
pub fn scancode_from_keycode(code: i32) -> Scancode {
    KEYCODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(Scancode::Unknown, |&(_, sc)| sc)
}

/// Android key code for a scancode, where one exists.
pub fn keycode_from_scancode(scancode: Scancode) -> Option<i32> {
    if scancode == Scancode::Unknown {
        return None;
    }
    KEYCODES
        .iter()
        .find(|(_, sc)| *sc == scancode)
        .map(|&(code, _)| code)
}

/// Canonical key for Android system keys with no keyboard position.
pub fn key_from_keycode(code: i32) -> Key {
    match code {
        KEYCODE_BACK => Key::BrowserBack,
        3 => Key::BrowserHome,
        64 => Key::LaunchApp1,
        65 => Key::LaunchMail,
        84 => Key::BrowserSearch,
        125 => Key::BrowserForward,
        174 => Key::BrowserFavorites,
        210 => Key::LaunchApp2,
        285 => Key::BrowserRefresh,
        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters() {
        assert_eq!(scancode_from_keycode(29), Scancode::A);
        assert_eq!(keycode_from_scancode(Scancode::Z), Some(54));
    }

    #[test]
    fn round_trip() {
        for &(code, sc) in KEYCODES {
            assert_eq!(keycode_from_scancode(sc), Some(code));
            assert_eq!(scancode_from_keycode(code), sc);
        }
    }

    #[test]
    fn back_is_symbolic() {
        assert_eq!(scancode_from_keycode(KEYCODE_BACK), Scancode::Unknown);
        assert_eq!(key_from_keycode(KEYCODE_BACK), Key::BrowserBack);
    }
}
