//! Apple family key codes (Carbon `kVK_*` virtual keycodes).
//!
//! Carbon keycodes are positional: `kVK_ANSI_A` is the key at the US `A`
//! position whatever the active input source says.

use crate::keyboard::Scancode;

#[rustfmt::skip]
static CARBON: &[(u16, Scancode)] = &[
    (0x00, Scancode::A),
    (0x01, Scancode::S),
    (0x02, Scancode::D),
    (0x03, Scancode::F),
    (0x04, Scancode::H),
    (0x05, Scancode::G),
    (0x06, Scancode::Z),
    (0x07, Scancode::X),
    (0x08, Scancode::C),
    (0x09, Scancode::V),
    (0x0A, Scancode::IntlBackslash),
    (0x0B, Scancode::B),
    (0x0C, Scancode::Q),
    (0x0D, Scancode::W),
    (0x0E, Scancode::E),
    (0x0F, Scancode::R),
    (0x10, Scancode::Y),
    (0x11, Scancode::T),
    (0x12, Scancode::Digit1),
    (0x13, Scancode::Digit2),
    (0x14, Scancode::Digit3),
    (0x15, Scancode::Digit4),
    (0x16, Scancode::Digit6),
    (0x17, Scancode::Digit5),
    (0x18, Scancode::Equal),
    (0x19, Scancode::Digit9),
    (0x1A, Scancode::Digit7),
    (0x1B, Scancode::Minus),
    (0x1C, Scancode::Digit8),
    (0x1D, Scancode::Digit0),
    (0x1E, Scancode::BracketRight),
    (0x1F, Scancode::O),
    (0x20, Scancode::U),
    (0x21, Scancode::BracketLeft),
    (0x22, Scancode::I),
    (0x23, Scancode::P),
    (0x24, Scancode::Enter),
    (0x25, Scancode::L),
    (0x26, Scancode::J),
    (0x27, Scancode::Quote),
    (0x28, Scancode::K),
    (0x29, Scancode::Semicolon),
    (0x2A, Scancode::Backslash),
    (0x2B, Scancode::Comma),
    (0x2C, Scancode::Slash),
    (0x2D, Scancode::N),
    (0x2E, Scancode::M),
    (0x2F, Scancode::Period),
    (0x30, Scancode::Tab),
    (0x31, Scancode::Space),
    (0x32, Scancode::Backquote),
    (0x33, Scancode::Backspace),
    (0x35, Scancode::Escape),
    (0x36, Scancode::SuperRight),
    (0x37, Scancode::SuperLeft),
    (0x38, Scancode::ShiftLeft),
    (0x39, Scancode::CapsLock),
    (0x3A, Scancode::AltLeft),
    (0x3B, Scancode::ControlLeft),
    (0x3C, Scancode::ShiftRight),
    (0x3D, Scancode::AltRight),
    (0x3E, Scancode::ControlRight),
    (0x40, Scancode::F17),
    (0x41, Scancode::NumpadDecimal),
    (0x43, Scancode::NumpadMultiply),
    (0x45, Scancode::NumpadAdd),
    // kVK_ANSI_KeypadClear sits where Num Lock is on PC keyboards.
    (0x47, Scancode::NumLock),
    (0x48, Scancode::AudioVolumeUp),
    (0x49, Scancode::AudioVolumeDown),
    (0x4A, Scancode::AudioVolumeMute),
    (0x4B, Scancode::NumpadDivide),
    (0x4C, Scancode::NumpadEnter),
    (0x4E, Scancode::NumpadSubtract),
    (0x4F, Scancode::F18),
    (0x50, Scancode::F19),
    (0x51, Scancode::NumpadEqual),
    (0x52, Scancode::Numpad0),
    (0x53, Scancode::Numpad1),
    (0x54, Scancode::Numpad2),
    (0x55, Scancode::Numpad3),
    (0x56, Scancode::Numpad4),
    (0x57, Scancode::Numpad5),
    (0x58, Scancode::Numpad6),
    (0x59, Scancode::Numpad7),
    (0x5A, Scancode::F20),
    (0x5B, Scancode::Numpad8),
    (0x5C, Scancode::Numpad9),
    (0x5D, Scancode::IntlYen),
    (0x5E, Scancode::IntlRo),
    (0x5F, Scancode::NumpadComma),
    (0x60, Scancode::F5),
    (0x61, Scancode::F6),
    (0x62, Scancode::F7),
    (0x63, Scancode::F3),
    (0x64, Scancode::F8),
    (0x65, Scancode::F9),
    (0x66, Scancode::Lang2),
    (0x67, Scancode::F11),
    (0x68, Scancode::Lang1),
    (0x69, Scancode::F13),
    (0x6A, Scancode::F16),
    (0x6B, Scancode::F14),
    (0x6D, Scancode::F10),
    (0x6E, Scancode::ContextMenu),
    (0x6F, Scancode::F12),
    (0x71, Scancode::F15),
    // kVK_Help occupies the Insert position on extended keyboards.
    (0x72, Scancode::Insert),
    (0x73, Scancode::Home),
    (0x74, Scancode::PageUp),
    (0x75, Scancode::Delete),
    (0x76, Scancode::F4),
    (0x77, Scancode::End),
    (0x78, Scancode::F2),
    (0x79, Scancode::PageDown),
    (0x7A, Scancode::F1),
    (0x7B, Scancode::ArrowLeft),
    (0x7C, Scancode::ArrowRight),
    (0x7D, Scancode::ArrowDown),
    (0x7E, Scancode::ArrowUp),
    (0x7F, Scancode::Power),
];

/// `kVK_Function`: the Fn key, which has no HID keyboard usage.
pub const KVK_FUNCTION: u16 = 0x3F;

/// Scancode for a Carbon virtual keycode.
pub fn scancode_from_carbon(code: u16) -> Scancode {
    CARBON
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(Scancode::Unknown, |&(_, sc)| sc)
}

/// Carbon virtual keycode for a scancode, where one exists.
pub fn carbon_from_scancode(scancode: Scancode) -> Option<u16> {
    if scancode == Scancode::Unknown {
        return None;
    }
    CARBON
        .iter()
        .find(|(_, sc)| *sc == scancode)
        .map(|&(code, _)| code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_a_is_zero() {
        assert_eq!(scancode_from_carbon(0x00), Scancode::A);
        assert_eq!(carbon_from_scancode(Scancode::A), Some(0x00));
    }

    #[test]
    fn round_trip() {
        for &(code, sc) in CARBON {
            assert_eq!(carbon_from_scancode(sc), Some(code));
            assert_eq!(scancode_from_carbon(code), sc);
        }
    }

    #[test]
    fn function_key_has_no_scancode() {
        assert_eq!(scancode_from_carbon(KVK_FUNCTION), Scancode::Unknown);
        assert_eq!(carbon_from_scancode(Scancode::Unknown), None);
    }
}
