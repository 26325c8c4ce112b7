//! X11 family key codes (Xlib and XCB).
//!
//! On any modern X server the keycode is the Linux evdev code plus 8, which
//! makes it a physical identifier. Keysyms are layout dependent and are only
//! used as the fallback key path and as the source of text.

use crate::keyboard::{Key, Scancode};

/// Offset between an X keycode and the Linux evdev code of the same key.
pub const EVDEV_OFFSET: u32 = 8;

/// Linux evdev key code table.
#[rustfmt::skip]
static EVDEV: &[(u16, Scancode)] = &[
    (1, Scancode::Escape),
    (2, Scancode::Digit1),
    (3, Scancode::Digit2),
    (4, Scancode::Digit3),
    (5, Scancode::Digit4),
    (6, Scancode::Digit5),
    (7, Scancode::Digit6),
    (8, Scancode::Digit7),
    (9, Scancode::Digit8),
    (10, Scancode::Digit9),
    (11, Scancode::Digit0),
    (12, Scancode::Minus),
    (13, Scancode::Equal),
    (14, Scancode::Backspace),
    (15, Scancode::Tab),
    (16, Scancode::Q),
    (17, Scancode::W),
    (18, Scancode::E),
    (19, Scancode::R),
    (20, Scancode::T),
    (21, Scancode::Y),
    (22, Scancode::U),
    (23, Scancode::I),
    (24, Scancode::O),
    (25, Scancode::P),
    (26, Scancode::BracketLeft),
    (27, Scancode::BracketRight),
    (28, Scancode::Enter),
    (29, Scancode::ControlLeft),
    (30, Scancode::A),
    (31, Scancode::S),
    (32, Scancode::D),
    (33, Scancode::F),
    (34, Scancode::G),
    (35, Scancode::H),
    (36, Scancode::J),
    (37, Scancode::K),
    (38, Scancode::L),
    (39, Scancode::Semicolon),
    (40, Scancode::Quote),
    (41, Scancode::Backquote),
    (42, Scancode::ShiftLeft),
    (43, Scancode::Backslash),
    (44, Scancode::Z),
    (45, Scancode::X),
    (46, Scancode::C),
    (47, Scancode::V),
    (48, Scancode::B),
    (49, Scancode::N),
    (50, Scancode::M),
    (51, Scancode::Comma),
    (52, Scancode::Period),
    (53, Scancode::Slash),
    (54, Scancode::ShiftRight),
    (55, Scancode::NumpadMultiply),
    (56, Scancode::AltLeft),
    (57, Scancode::Space),
    (58, Scancode::CapsLock),
    (59, Scancode::F1),
    (60, Scancode::F2),
    (61, Scancode::F3),
    (62, Scancode::F4),
    (63, Scancode::F5),
    (64, Scancode::F6),
    (65, Scancode::F7),
    (66, Scancode::F8),
    (67, Scancode::F9),
    (68, Scancode::F10),
    (69, Scancode::NumLock),
    (70, Scancode::ScrollLock),
    (71, Scancode::Numpad7),
    (72, Scancode::Numpad8),
    (73, Scancode::Numpad9),
    (74, Scancode::NumpadSubtract),
    (75, Scancode::Numpad4),
    (76, Scancode::Numpad5),
    (77, Scancode::Numpad6),
    (78, Scancode::NumpadAdd),
    (79, Scancode::Numpad1),
    (80, Scancode::Numpad2),
    (81, Scancode::Numpad3),
    (82, Scancode::Numpad0),
    (83, Scancode::NumpadDecimal),
    (86, Scancode::IntlBackslash),
    (87, Scancode::F11),
    (88, Scancode::F12),
    (89, Scancode::IntlRo),
    (92, Scancode::Convert),
    (93, Scancode::KanaMode),
    (94, Scancode::NonConvert),
    (96, Scancode::NumpadEnter),
    (97, Scancode::ControlRight),
    (98, Scancode::NumpadDivide),
    (99, Scancode::PrintScreen),
    (100, Scancode::AltRight),
    (102, Scancode::Home),
    (103, Scancode::ArrowUp),
    (104, Scancode::PageUp),
    (105, Scancode::ArrowLeft),
    (106, Scancode::ArrowRight),
    (107, Scancode::End),
    (108, Scancode::ArrowDown),
    (109, Scancode::PageDown),
    (110, Scancode::Insert),
    (111, Scancode::Delete),
    (113, Scancode::AudioVolumeMute),
    (114, Scancode::AudioVolumeDown),
    (115, Scancode::AudioVolumeUp),
    (116, Scancode::Power),
    (117, Scancode::NumpadEqual),
    (119, Scancode::Pause),
    (121, Scancode::NumpadComma),
    (122, Scancode::Lang1),
    (123, Scancode::Lang2),
    (124, Scancode::IntlYen),
    (125, Scancode::SuperLeft),
    (126, Scancode::SuperRight),
    (127, Scancode::ContextMenu),
    (128, Scancode::Stop),
    (129, Scancode::Again),
    (131, Scancode::Undo),
    (133, Scancode::Copy),
    (135, Scancode::Paste),
    (136, Scancode::Find),
    (137, Scancode::Cut),
    (138, Scancode::Help),
    (139, Scancode::Menu),
    (142, Scancode::Sleep),
    (143, Scancode::WakeUp),
    (161, Scancode::Eject),
    (163, Scancode::MediaTrackNext),
    (164, Scancode::MediaPlayPause),
    (165, Scancode::MediaTrackPrevious),
    (166, Scancode::MediaStop),
    (183, Scancode::F13),
    (184, Scancode::F14),
    (185, Scancode::F15),
    (186, Scancode::F16),
    (187, Scancode::F17),
    (188, Scancode::F18),
    (189, Scancode::F19),
    (190, Scancode::F20),
    (191, Scancode::F21),
    (192, Scancode::F22),
    (193, Scancode::F23),
    (194, Scancode::F24),
    (226, Scancode::MediaSelect),
    (353, Scancode::Select),
];

/// Scancode for a Linux evdev key code.
pub fn scancode_from_evdev(code: u32) -> Scancode {
    EVDEV
        .iter()
        .find(|(c, _)| u32::from(*c) == code)
        .map_or(Scancode::Unknown, |&(_, sc)| sc)
}

/// Evdev key code for a scancode, where one exists.
pub fn evdev_from_scancode(scancode: Scancode) -> Option<u32> {
    if scancode == Scancode::Unknown {
        return None;
    }
    EVDEV
        .iter()
        .find(|(_, sc)| *sc == scancode)
        .map(|&(code, _)| u32::from(code))
}

/// Scancode for an X11 keycode (evdev + 8).
pub fn scancode_from_keycode(keycode: u32) -> Scancode {
    match keycode.checked_sub(EVDEV_OFFSET) {
        Some(code) => scancode_from_evdev(code),
        None => Scancode::Unknown,
    }
}

/// X11 keycode for a scancode, where one exists.
pub fn keycode_from_scancode(scancode: Scancode) -> Option<u32> {
    evdev_from_scancode(scancode).map(|code| code + EVDEV_OFFSET)
}

/// Fallback canonical key from a keysym.
///
/// Used only when the keycode did not resolve, e.g. for synthetic events
/// sent with a zero keycode or for XF86 browser keys. Letters and digits
/// resolve to their US positions regardless of case.
pub fn key_from_keysym(keysym: u32) -> Key {
    match keysym {
        0x61..=0x7A => letter_key(keysym - 0x61),
        0x41..=0x5A => letter_key(keysym - 0x41),
        0x30 => Key::Digit0,
        0x31..=0x39 => digit_key(keysym - 0x30),
        0x20 => Key::Space,
        0x27 => Key::Quote,
        0x2C => Key::Comma,
        0x2D => Key::Minus,
        0x2E => Key::Period,
        0x2F => Key::Slash,
        0x3B => Key::Semicolon,
        0x3D => Key::Equal,
        0x5B => Key::BracketLeft,
        0x5C => Key::Backslash,
        0x5D => Key::BracketRight,
        0x60 => Key::Backquote,
        0xFF08 => Key::Backspace,
        0xFF09 => Key::Tab,
        0xFF0D => Key::Enter,
        0xFF13 => Key::Pause,
        0xFF14 => Key::ScrollLock,
        0xFF1B => Key::Escape,
        0xFF50 => Key::Home,
        0xFF51 => Key::ArrowLeft,
        0xFF52 => Key::ArrowUp,
        0xFF53 => Key::ArrowRight,
        0xFF54 => Key::ArrowDown,
        0xFF55 => Key::PageUp,
        0xFF56 => Key::PageDown,
        0xFF57 => Key::End,
        0xFF61 => Key::PrintScreen,
        0xFF63 => Key::Insert,
        0xFF67 => Key::ContextMenu,
        0xFF7F => Key::NumLock,
        0xFF8D => Key::NumpadEnter,
        0xFFAA => Key::NumpadMultiply,
        0xFFAB => Key::NumpadAdd,
        0xFFAC => Key::NumpadComma,
        0xFFAD => Key::NumpadSubtract,
        0xFFAE => Key::NumpadDecimal,
        0xFFAF => Key::NumpadDivide,
        0xFFB0 => Key::Numpad0,
        0xFFB1..=0xFFB9 => numpad_key(keysym - 0xFFB0),
        0xFFBD => Key::NumpadEqual,
        0xFFBE..=0xFFD5 => function_key(keysym - 0xFFBE),
        0xFFE1 => Key::ShiftLeft,
        0xFFE2 => Key::ShiftRight,
        0xFFE3 => Key::ControlLeft,
        0xFFE4 => Key::ControlRight,
        0xFFE5 => Key::CapsLock,
        0xFFE9 => Key::AltLeft,
        0xFFEA => Key::AltRight,
        0xFFEB => Key::SuperLeft,
        0xFFEC => Key::SuperRight,
        0xFFFF => Key::Delete,
        0x1008_FF11 => Key::AudioVolumeDown,
        0x1008_FF12 => Key::AudioVolumeMute,
        0x1008_FF13 => Key::AudioVolumeUp,
        0x1008_FF14 => Key::MediaPlayPause,
        0x1008_FF15 => Key::MediaStop,
        0x1008_FF16 => Key::MediaTrackPrevious,
        0x1008_FF17 => Key::MediaTrackNext,
        0x1008_FF18 => Key::BrowserHome,
        0x1008_FF19 => Key::LaunchMail,
        0x1008_FF1B => Key::BrowserSearch,
        0x1008_FF1D => Key::LaunchApp2,
        0x1008_FF26 => Key::BrowserBack,
        0x1008_FF27 => Key::BrowserForward,
        0x1008_FF28 => Key::BrowserStop,
        0x1008_FF29 => Key::BrowserRefresh,
        0x1008_FF30 => Key::BrowserFavorites,
        0x1008_FF33 => Key::LaunchApp1,
        _ => Key::Unknown,
    }
}

/// Unicode scalar produced by a keysym, if it is printable.
///
/// Covers the Latin-1 identity range, the `0x0100_0000 + codepoint` range
/// and the keypad keysyms. Control characters are never returned.
pub fn keysym_to_char(keysym: u32) -> Option<char> {
    let codepoint = match keysym {
        0x20..=0x7E | 0xA0..=0xFF => keysym,
        0x0100_0000..=0x0110_FFFF => keysym - 0x0100_0000,
        0xFF80 => u32::from(b' '),
        0xFFAA => u32::from(b'*'),
        0xFFAB => u32::from(b'+'),
        0xFFAC => u32::from(b','),
        0xFFAD => u32::from(b'-'),
        0xFFAE => u32::from(b'.'),
        0xFFAF => u32::from(b'/'),
        0xFFB0..=0xFFB9 => u32::from(b'0') + (keysym - 0xFFB0),
        0xFFBD => u32::from(b'='),
        _ => return None,
    };
    char::from_u32(codepoint).filter(|c| !c.is_control())
}

fn letter_key(offset: u32) -> Key {
    const LETTERS: [Key; 26] = [
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
    ];
    LETTERS[offset as usize]
}

fn digit_key(digit: u32) -> Key {
    const DIGITS: [Key; 10] = [
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
    ];
    DIGITS[digit as usize]
}

fn numpad_key(digit: u32) -> Key {
    const NUMPAD: [Key; 10] = [
        Key::Numpad0, Key::Numpad1, Key::Numpad2, Key::Numpad3, Key::Numpad4,
        Key::Numpad5, Key::Numpad6, Key::Numpad7, Key::Numpad8, Key::Numpad9,
    ];
    NUMPAD[digit as usize]
}

fn function_key(offset: u32) -> Key {
    const FUNCTION: [Key; 24] = [
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8,
        Key::F9, Key::F10, Key::F11, Key::F12, Key::F13, Key::F14, Key::F15, Key::F16,
        Key::F17, Key::F18, Key::F19, Key::F20, Key::F21, Key::F22, Key::F23, Key::F24,
    ];
    FUNCTION[offset as usize]
}
