//! Win32 family key codes.
//!
//! Windows reports a virtual-key code, the hardware (set 1) scancode and an
//! "extended" bit for every key message. Virtual keys are layout dependent
//! for the OEM punctuation keys and ambiguous for the keypad/navigation
//! cluster, so both tables here take the extended bit into account. The
//! hardware table is preferred when the message carries a scancode; the
//! virtual-key table is the fallback and the reverse direction.

use crate::keyboard::{Key, Scancode};

/// How an entry constrains the extended-key flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ext {
    /// Matches regardless of the flag.
    Any,
    /// Matches only without the flag.
    No,
    /// Matches only with the flag.
    Yes,
}

impl Ext {
    fn matches(self, extended: bool) -> bool {
        match self {
            Ext::Any => true,
            Ext::No => !extended,
            Ext::Yes => extended,
        }
    }
}

pub const VK_SHIFT: u16 = 0x10;
pub const VK_CONTROL: u16 = 0x11;
pub const VK_MENU: u16 = 0x12;
pub const VK_PROCESSKEY: u16 = 0xE5;
pub const VK_PACKET: u16 = 0xE7;

/// Hardware scancode reported for the right Shift key.
const SCAN_RIGHT_SHIFT: u16 = 0x36;

/// Virtual key table, sided virtual keys first so the reverse lookup
/// prefers them.
#[rustfmt::skip]
static VIRTUAL_KEYS: &[(u16, Ext, Scancode)] = &[
    (0xA0, Ext::Any, Scancode::ShiftLeft),
    (0xA1, Ext::Any, Scancode::ShiftRight),
    (0xA2, Ext::Any, Scancode::ControlLeft),
    (0xA3, Ext::Any, Scancode::ControlRight),
    (0xA4, Ext::Any, Scancode::AltLeft),
    (0xA5, Ext::Any, Scancode::AltRight),
    (0x5B, Ext::Any, Scancode::SuperLeft),
    (0x5C, Ext::Any, Scancode::SuperRight),
    (VK_CONTROL, Ext::No, Scancode::ControlLeft),
    (VK_CONTROL, Ext::Yes, Scancode::ControlRight),
    (VK_MENU, Ext::No, Scancode::AltLeft),
    (VK_MENU, Ext::Yes, Scancode::AltRight),

    (0x08, Ext::Any, Scancode::Backspace),
    (0x09, Ext::Any, Scancode::Tab),
    (0x0D, Ext::No, Scancode::Enter),
    (0x0D, Ext::Yes, Scancode::NumpadEnter),
    (0x13, Ext::Any, Scancode::Pause),
    (0x14, Ext::Any, Scancode::CapsLock),
    (0x15, Ext::Any, Scancode::KanaMode),
    (0x19, Ext::Any, Scancode::Lang2),
    (0x1B, Ext::Any, Scancode::Escape),
    (0x1C, Ext::Any, Scancode::Convert),
    (0x1D, Ext::Any, Scancode::NonConvert),
    (0x20, Ext::Any, Scancode::Space),

    // Navigation cluster; the keypad aliases without the extended bit follow
    // the VK_NUMPAD* block
    (0x21, Ext::Yes, Scancode::PageUp),
    (0x22, Ext::Yes, Scancode::PageDown),
    (0x23, Ext::Yes, Scancode::End),
    (0x24, Ext::Yes, Scancode::Home),
    (0x25, Ext::Yes, Scancode::ArrowLeft),
    (0x26, Ext::Yes, Scancode::ArrowUp),
    (0x27, Ext::Yes, Scancode::ArrowRight),
    (0x28, Ext::Yes, Scancode::ArrowDown),
    (0x2D, Ext::Yes, Scancode::Insert),
    (0x2E, Ext::Yes, Scancode::Delete),

    (0x29, Ext::Any, Scancode::Select),
    (0x2B, Ext::Any, Scancode::Execute),
    (0x2C, Ext::Any, Scancode::PrintScreen),
    (0x2F, Ext::Any, Scancode::Help),

    (0x30, Ext::Any, Scancode::Digit0),
    (0x31, Ext::Any, Scancode::Digit1),
    (0x32, Ext::Any, Scancode::Digit2),
    (0x33, Ext::Any, Scancode::Digit3),
    (0x34, Ext::Any, Scancode::Digit4),
    (0x35, Ext::Any, Scancode::Digit5),
    (0x36, Ext::Any, Scancode::Digit6),
    (0x37, Ext::Any, Scancode::Digit7),
    (0x38, Ext::Any, Scancode::Digit8),
    (0x39, Ext::Any, Scancode::Digit9),

    (0x41, Ext::Any, Scancode::A),
    (0x42, Ext::Any, Scancode::B),
    (0x43, Ext::Any, Scancode::C),
    (0x44, Ext::Any, Scancode::D),
    (0x45, Ext::Any, Scancode::E),
    (0x46, Ext::Any, Scancode::F),
    (0x47, Ext::Any, Scancode::G),
    (0x48, Ext::Any, Scancode::H),
    (0x49, Ext::Any, Scancode::I),
    (0x4A, Ext::Any, Scancode::J),
    (0x4B, Ext::Any, Scancode::K),
    (0x4C, Ext::Any, Scancode::L),
    (0x4D, Ext::Any, Scancode::M),
    (0x4E, Ext::Any, Scancode::N),
    (0x4F, Ext::Any, Scancode::O),
    (0x50, Ext::Any, Scancode::P),
    (0x51, Ext::Any, Scancode::Q),
    (0x52, Ext::Any, Scancode::R),
    (0x53, Ext::Any, Scancode::S),
    (0x54, Ext::Any, Scancode::T),
    (0x55, Ext::Any, Scancode::U),
    (0x56, Ext::Any, Scancode::V),
    (0x57, Ext::Any, Scancode::W),
    (0x58, Ext::Any, Scancode::X),
    (0x59, Ext::Any, Scancode::Y),
    (0x5A, Ext::Any, Scancode::Z),

    (0x5D, Ext::Any, Scancode::ContextMenu),
    (0x5F, Ext::Any, Scancode::Sleep),

    (0x60, Ext::Any, Scancode::Numpad0),
    (0x61, Ext::Any, Scancode::Numpad1),
    (0x62, Ext::Any, Scancode::Numpad2),
    (0x63, Ext::Any, Scancode::Numpad3),
    (0x64, Ext::Any, Scancode::Numpad4),
    (0x65, Ext::Any, Scancode::Numpad5),
    (0x66, Ext::Any, Scancode::Numpad6),
    (0x67, Ext::Any, Scancode::Numpad7),
    (0x68, Ext::Any, Scancode::Numpad8),
    (0x69, Ext::Any, Scancode::Numpad9),
    (0x6A, Ext::Any, Scancode::NumpadMultiply),
    (0x6B, Ext::Any, Scancode::NumpadAdd),
    (0x6C, Ext::Any, Scancode::NumpadComma),
    (0x6D, Ext::Any, Scancode::NumpadSubtract),
    (0x6E, Ext::Any, Scancode::NumpadDecimal),
    (0x6F, Ext::Any, Scancode::NumpadDivide),

    // Keypad with Num Lock off, after VK_NUMPAD* so the reverse lookup
    // prefers the numpad virtual keys
    (0x21, Ext::No, Scancode::Numpad9),
    (0x22, Ext::No, Scancode::Numpad3),
    (0x23, Ext::No, Scancode::Numpad1),
    (0x24, Ext::No, Scancode::Numpad7),
    (0x25, Ext::No, Scancode::Numpad4),
    (0x26, Ext::No, Scancode::Numpad8),
    (0x27, Ext::No, Scancode::Numpad6),
    (0x28, Ext::No, Scancode::Numpad2),
    (0x2D, Ext::No, Scancode::Numpad0),
    (0x2E, Ext::No, Scancode::NumpadDecimal),
    (0x0C, Ext::Any, Scancode::Numpad5),

    (0x70, Ext::Any, Scancode::F1),
    (0x71, Ext::Any, Scancode::F2),
    (0x72, Ext::Any, Scancode::F3),
    (0x73, Ext::Any, Scancode::F4),
    (0x74, Ext::Any, Scancode::F5),
    (0x75, Ext::Any, Scancode::F6),
    (0x76, Ext::Any, Scancode::F7),
    (0x77, Ext::Any, Scancode::F8),
    (0x78, Ext::Any, Scancode::F9),
    (0x79, Ext::Any, Scancode::F10),
    (0x7A, Ext::Any, Scancode::F11),
    (0x7B, Ext::Any, Scancode::F12),
    (0x7C, Ext::Any, Scancode::F13),
    (0x7D, Ext::Any, Scancode::F14),
    (0x7E, Ext::Any, Scancode::F15),
    (0x7F, Ext::Any, Scancode::F16),
    (0x80, Ext::Any, Scancode::F17),
    (0x81, Ext::Any, Scancode::F18),
    (0x82, Ext::Any, Scancode::F19),
    (0x83, Ext::Any, Scancode::F20),
    (0x84, Ext::Any, Scancode::F21),
    (0x85, Ext::Any, Scancode::F22),
    (0x86, Ext::Any, Scancode::F23),
    (0x87, Ext::Any, Scancode::F24),

    (0x90, Ext::Any, Scancode::NumLock),
    (0x91, Ext::Any, Scancode::ScrollLock),
    (0x92, Ext::Any, Scancode::NumpadEqual),

    (0xAD, Ext::Any, Scancode::AudioVolumeMute),
    (0xAE, Ext::Any, Scancode::AudioVolumeDown),
    (0xAF, Ext::Any, Scancode::AudioVolumeUp),
    (0xB0, Ext::Any, Scancode::MediaTrackNext),
    (0xB1, Ext::Any, Scancode::MediaTrackPrevious),
    (0xB2, Ext::Any, Scancode::MediaStop),
    (0xB3, Ext::Any, Scancode::MediaPlayPause),
    (0xB5, Ext::Any, Scancode::MediaSelect),

    // OEM keys, named after their US-layout position
    (0xBA, Ext::Any, Scancode::Semicolon),
    (0xBB, Ext::Any, Scancode::Equal),
    (0xBC, Ext::Any, Scancode::Comma),
    (0xBD, Ext::Any, Scancode::Minus),
    (0xBE, Ext::Any, Scancode::Period),
    (0xBF, Ext::Any, Scancode::Slash),
    (0xC0, Ext::Any, Scancode::Backquote),
    (0xC1, Ext::Any, Scancode::IntlRo),
    (0xC2, Ext::Any, Scancode::NumpadComma),
    (0xDB, Ext::Any, Scancode::BracketLeft),
    (0xDC, Ext::Any, Scancode::Backslash),
    (0xDD, Ext::Any, Scancode::BracketRight),
    (0xDE, Ext::Any, Scancode::Quote),
    (0xE2, Ext::Any, Scancode::IntlBackslash),

    (0xF6, Ext::Any, Scancode::Again),
];

/// Hardware (PS/2 set 1) scancode table, keyed by `(scan, extended)`.
#[rustfmt::skip]
static HARDWARE_SCANCODES: &[(u16, Ext, Scancode)] = &[
    (0x01, Ext::No, Scancode::Escape),
    (0x02, Ext::No, Scancode::Digit1),
    (0x03, Ext::No, Scancode::Digit2),
    (0x04, Ext::No, Scancode::Digit3),
    (0x05, Ext::No, Scancode::Digit4),
    (0x06, Ext::No, Scancode::Digit5),
    (0x07, Ext::No, Scancode::Digit6),
    (0x08, Ext::No, Scancode::Digit7),
    (0x09, Ext::No, Scancode::Digit8),
    (0x0A, Ext::No, Scancode::Digit9),
    (0x0B, Ext::No, Scancode::Digit0),
    (0x0C, Ext::No, Scancode::Minus),
    (0x0D, Ext::No, Scancode::Equal),
    (0x0E, Ext::No, Scancode::Backspace),
    (0x0F, Ext::No, Scancode::Tab),
    (0x10, Ext::No, Scancode::Q),
    (0x11, Ext::No, Scancode::W),
    (0x12, Ext::No, Scancode::E),
    (0x13, Ext::No, Scancode::R),
    (0x14, Ext::No, Scancode::T),
    (0x15, Ext::No, Scancode::Y),
    (0x16, Ext::No, Scancode::U),
    (0x17, Ext::No, Scancode::I),
    (0x18, Ext::No, Scancode::O),
    (0x19, Ext::No, Scancode::P),
    (0x1A, Ext::No, Scancode::BracketLeft),
    (0x1B, Ext::No, Scancode::BracketRight),
    (0x1C, Ext::No, Scancode::Enter),
    (0x1D, Ext::No, Scancode::ControlLeft),
    (0x1E, Ext::No, Scancode::A),
    (0x1F, Ext::No, Scancode::S),
    (0x20, Ext::No, Scancode::D),
    (0x21, Ext::No, Scancode::F),
    (0x22, Ext::No, Scancode::G),
    (0x23, Ext::No, Scancode::H),
    (0x24, Ext::No, Scancode::J),
    (0x25, Ext::No, Scancode::K),
    (0x26, Ext::No, Scancode::L),
    (0x27, Ext::No, Scancode::Semicolon),
    (0x28, Ext::No, Scancode::Quote),
    (0x29, Ext::No, Scancode::Backquote),
    (0x2A, Ext::No, Scancode::ShiftLeft),
    (0x2B, Ext::No, Scancode::Backslash),
    (0x2C, Ext::No, Scancode::Z),
    (0x2D, Ext::No, Scancode::X),
    (0x2E, Ext::No, Scancode::C),
    (0x2F, Ext::No, Scancode::V),
    (0x30, Ext::No, Scancode::B),
    (0x31, Ext::No, Scancode::N),
    (0x32, Ext::No, Scancode::M),
    (0x33, Ext::No, Scancode::Comma),
    (0x34, Ext::No, Scancode::Period),
    (0x35, Ext::No, Scancode::Slash),
    (0x36, Ext::Any, Scancode::ShiftRight),
    (0x37, Ext::No, Scancode::NumpadMultiply),
    (0x38, Ext::No, Scancode::AltLeft),
    (0x39, Ext::No, Scancode::Space),
    (0x3A, Ext::No, Scancode::CapsLock),
    (0x3B, Ext::No, Scancode::F1),
    (0x3C, Ext::No, Scancode::F2),
    (0x3D, Ext::No, Scancode::F3),
    (0x3E, Ext::No, Scancode::F4),
    (0x3F, Ext::No, Scancode::F5),
    (0x40, Ext::No, Scancode::F6),
    (0x41, Ext::No, Scancode::F7),
    (0x42, Ext::No, Scancode::F8),
    (0x43, Ext::No, Scancode::F9),
    (0x44, Ext::No, Scancode::F10),
    // Windows reports Num Lock as extended and Pause as plain 0x45.
    (0x45, Ext::Yes, Scancode::NumLock),
    (0x45, Ext::No, Scancode::Pause),
    (0x46, Ext::No, Scancode::ScrollLock),
    (0x47, Ext::No, Scancode::Numpad7),
    (0x48, Ext::No, Scancode::Numpad8),
    (0x49, Ext::No, Scancode::Numpad9),
    (0x4A, Ext::No, Scancode::NumpadSubtract),
    (0x4B, Ext::No, Scancode::Numpad4),
    (0x4C, Ext::No, Scancode::Numpad5),
    (0x4D, Ext::No, Scancode::Numpad6),
    (0x4E, Ext::No, Scancode::NumpadAdd),
    (0x4F, Ext::No, Scancode::Numpad1),
    (0x50, Ext::No, Scancode::Numpad2),
    (0x51, Ext::No, Scancode::Numpad3),
    (0x52, Ext::No, Scancode::Numpad0),
    (0x53, Ext::No, Scancode::NumpadDecimal),
    (0x56, Ext::No, Scancode::IntlBackslash),
    (0x57, Ext::No, Scancode::F11),
    (0x58, Ext::No, Scancode::F12),
    (0x59, Ext::No, Scancode::NumpadEqual),
    (0x64, Ext::No, Scancode::F13),
    (0x65, Ext::No, Scancode::F14),
    (0x66, Ext::No, Scancode::F15),
    (0x67, Ext::No, Scancode::F16),
    (0x68, Ext::No, Scancode::F17),
    (0x69, Ext::No, Scancode::F18),
    (0x6A, Ext::No, Scancode::F19),
    (0x6B, Ext::No, Scancode::F20),
    (0x6C, Ext::No, Scancode::F21),
    (0x6D, Ext::No, Scancode::F22),
    (0x6E, Ext::No, Scancode::F23),
    (0x70, Ext::No, Scancode::KanaMode),
    (0x73, Ext::No, Scancode::IntlRo),
    (0x76, Ext::No, Scancode::F24),
    (0x79, Ext::No, Scancode::Convert),
    (0x7B, Ext::No, Scancode::NonConvert),
    (0x7D, Ext::No, Scancode::IntlYen),
    (0x7E, Ext::No, Scancode::NumpadComma),
    (0xF1, Ext::No, Scancode::Lang2),
    (0xF2, Ext::No, Scancode::Lang1),

    // E0-prefixed keys
    (0x10, Ext::Yes, Scancode::MediaTrackPrevious),
    (0x19, Ext::Yes, Scancode::MediaTrackNext),
    (0x1C, Ext::Yes, Scancode::NumpadEnter),
    (0x1D, Ext::Yes, Scancode::ControlRight),
    (0x20, Ext::Yes, Scancode::AudioVolumeMute),
    (0x22, Ext::Yes, Scancode::MediaPlayPause),
    (0x24, Ext::Yes, Scancode::MediaStop),
    (0x2E, Ext::Yes, Scancode::AudioVolumeDown),
    (0x30, Ext::Yes, Scancode::AudioVolumeUp),
    (0x35, Ext::Yes, Scancode::NumpadDivide),
    (0x37, Ext::Yes, Scancode::PrintScreen),
    (0x38, Ext::Yes, Scancode::AltRight),
    (0x47, Ext::Yes, Scancode::Home),
    (0x48, Ext::Yes, Scancode::ArrowUp),
    (0x49, Ext::Yes, Scancode::PageUp),
    (0x4B, Ext::Yes, Scancode::ArrowLeft),
    (0x4D, Ext::Yes, Scancode::ArrowRight),
    (0x4F, Ext::Yes, Scancode::End),
    (0x50, Ext::Yes, Scancode::ArrowDown),
    (0x51, Ext::Yes, Scancode::PageDown),
    (0x52, Ext::Yes, Scancode::Insert),
    (0x53, Ext::Yes, Scancode::Delete),
    (0x5B, Ext::Yes, Scancode::SuperLeft),
    (0x5C, Ext::Yes, Scancode::SuperRight),
    (0x5D, Ext::Yes, Scancode::ContextMenu),
    (0x5E, Ext::Yes, Scancode::Power),
    (0x5F, Ext::Yes, Scancode::Sleep),
    (0x63, Ext::Yes, Scancode::WakeUp),
    (0x6D, Ext::Yes, Scancode::MediaSelect),
];

fn lookup(table: &[(u16, Ext, Scancode)], code: u16, extended: bool) -> Scancode {
    table
        .iter()
        .find(|(c, ext, _)| *c == code && ext.matches(extended))
        .map_or(Scancode::Unknown, |&(_, _, sc)| sc)
}

fn reverse(table: &[(u16, Ext, Scancode)], scancode: Scancode) -> Option<(u16, bool)> {
    if scancode == Scancode::Unknown {
        return None;
    }
    table
        .iter()
        .find(|(_, _, sc)| *sc == scancode)
        .map(|&(code, ext, _)| (code, ext == Ext::Yes))
}

/// Resolve a scancode from a virtual key, its extended bit and the
/// hardware scancode delivered alongside it.
///
/// `VK_SHIFT` never carries the extended bit, so the side is taken from
/// the hardware scancode instead.
pub fn scancode_from_virtual_key(vk: u16, extended: bool, hardware_scan: u16) -> Scancode {
    if vk == VK_SHIFT {
        return if hardware_scan == SCAN_RIGHT_SHIFT {
            Scancode::ShiftRight
        } else {
            Scancode::ShiftLeft
        };
    }
    lookup(VIRTUAL_KEYS, vk, extended)
}

/// Resolve a scancode from the hardware (set 1) scancode and extended bit.
pub fn scancode_from_hardware(scan: u16, extended: bool) -> Scancode {
    lookup(HARDWARE_SCANCODES, scan, extended)
}

/// Resolve a scancode from a full key message, preferring the hardware path.
///
/// The hardware scancode is layout independent; the virtual key is used only
/// when the hardware code is zero or unmapped (injected input, IME packets).
pub fn scancode_from_key_message(vk: u16, hardware_scan: u16, extended: bool) -> Scancode {
    match scancode_from_hardware(hardware_scan, extended) {
        Scancode::Unknown => scancode_from_virtual_key(vk, extended, hardware_scan),
        sc => sc,
    }
}

/// Virtual key and extended bit for a scancode, where one exists.
pub fn virtual_key_from_scancode(scancode: Scancode) -> Option<(u16, bool)> {
    reverse(VIRTUAL_KEYS, scancode)
}

/// Hardware scancode and extended bit for a scancode, where one exists.
pub fn hardware_from_scancode(scancode: Scancode) -> Option<(u16, bool)> {
    reverse(HARDWARE_SCANCODES, scancode)
}

/// Canonical key for virtual keys that have no physical position.
///
/// Only consulted after the scancode path produced `Key::Unknown`.
pub fn key_from_virtual_key(vk: u16) -> Key {
    match vk {
        0xA6 => Key::BrowserBack,
        0xA7 => Key::BrowserForward,
        0xA8 => Key::BrowserRefresh,
        0xA9 => Key::BrowserStop,
        0xAA => Key::BrowserSearch,
        0xAB => Key::BrowserFavorites,
        0xAC => Key::BrowserHome,
        0xB4 => Key::LaunchMail,
        0xB6 => Key::LaunchApp1,
        0xB7 => Key::LaunchApp2,
        VK_SHIFT => Key::Shift,
        VK_CONTROL => Key::Control,
        VK_MENU => Key::Alt,
        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::scancode_to_key;

    #[test]
    fn letter_a() {
        assert_eq!(scancode_from_virtual_key(0x41, false, 0), Scancode::A);
        assert_eq!(scancode_to_key(scancode_from_virtual_key(0x41, false, 0)), Key::A);
        assert_eq!(scancode_from_key_message(0x41, 0x1E, false), Scancode::A);
    }

    #[test]
    fn extended_bit_disambiguates() {
        assert_eq!(scancode_from_virtual_key(0x0D, false, 0), Scancode::Enter);
        assert_eq!(scancode_from_virtual_key(0x0D, true, 0), Scancode::NumpadEnter);
        assert_eq!(scancode_from_virtual_key(0x2D, true, 0), Scancode::Insert);
        assert_eq!(scancode_from_virtual_key(0x2D, false, 0), Scancode::Numpad0);
        assert_eq!(scancode_from_virtual_key(VK_CONTROL, true, 0), Scancode::ControlRight);
        assert_eq!(scancode_from_hardware(0x1C, true), Scancode::NumpadEnter);
        assert_eq!(scancode_from_hardware(0x52, false), Scancode::Numpad0);
        assert_eq!(scancode_from_hardware(0x52, true), Scancode::Insert);
    }

    #[test]
    fn shift_side_comes_from_hardware_scan() {
        assert_eq!(scancode_from_virtual_key(VK_SHIFT, false, 0x2A), Scancode::ShiftLeft);
        assert_eq!(scancode_from_virtual_key(VK_SHIFT, false, 0x36), Scancode::ShiftRight);
    }

    #[test]
    fn hardware_scan_wins_over_layout_dependent_vk() {
        // AZERTY: the key at the US `Q` position reports VK 'A'.
        assert_eq!(scancode_from_key_message(0x41, 0x10, false), Scancode::Q);
    }

    #[test]
    fn virtual_key_round_trip() {
        for &(vk, _, sc) in VIRTUAL_KEYS {
            let (back_vk, ext) = virtual_key_from_scancode(sc).unwrap();
            assert_eq!(scancode_from_virtual_key(back_vk, ext, 0), sc, "vk {vk:#x}");
        }
    }

    #[test]
    fn hardware_round_trip() {
        for &(_, _, sc) in HARDWARE_SCANCODES {
            let (scan, ext) = hardware_from_scancode(sc).unwrap();
            assert_eq!(scancode_from_hardware(scan, ext), sc);
        }
    }

    #[test]
    fn browser_keys_resolve_only_through_fallback() {
        assert_eq!(scancode_from_virtual_key(0xA6, false, 0), Scancode::Unknown);
        assert_eq!(key_from_virtual_key(0xA6), Key::BrowserBack);
        assert_eq!(key_from_virtual_key(0x41), Key::Unknown);
    }
}
