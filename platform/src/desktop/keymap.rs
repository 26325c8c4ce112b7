//! winit key codes to scancodes.
//!
//! winit names physical keys after the W3C `code` values, so every code with
//! a keyboard position has a direct [`Scancode`]. Codes without one go
//! through [`fallback_key`].

use nk_core::keyboard::native::{android, apple, win32, x11};
use nk_core::keyboard::{Key, NativeKey, Scancode};
use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};

/// Scancode for a winit physical key.
///
/// Keys winit could not identify still carry the OS code; those are resolved
/// through the native tables of the platform that produced them.
pub fn scancode_from_physical(key: PhysicalKey) -> Scancode {
    match key {
        PhysicalKey::Code(code) => scancode_from_code(code),
        PhysicalKey::Unidentified(native) => scancode_from_native(native),
    }
}

pub fn scancode_from_native(native: NativeKeyCode) -> Scancode {
    match native {
        NativeKeyCode::Windows(scan) => {
            win32::scancode_from_hardware(scan & 0xFF, scan & 0xE000 == 0xE000)
        }
        NativeKeyCode::Xkb(keycode) => x11::scancode_from_keycode(keycode),
        NativeKeyCode::MacOS(code) => apple::scancode_from_carbon(code),
        NativeKeyCode::Android(code) => android::scancode_from_keycode(code as i32),
        NativeKeyCode::Unidentified => Scancode::Unknown,
    }
}

/// Native code record for diagnostics.
pub fn native_key(key: PhysicalKey) -> NativeKey {
    match key {
        PhysicalKey::Unidentified(NativeKeyCode::Windows(scan)) => NativeKey::Win32 {
            vk: 0,
            scan: scan & 0xFF,
            extended: scan & 0xE000 == 0xE000,
        },
        PhysicalKey::Unidentified(NativeKeyCode::Xkb(keycode)) => NativeKey::X11 {
            keycode,
            keysym: 0,
        },
        PhysicalKey::Unidentified(NativeKeyCode::MacOS(code)) => NativeKey::Apple(code),
        PhysicalKey::Unidentified(NativeKeyCode::Android(code)) => {
            NativeKey::Android(code as i32)
        }
        _ => NativeKey::None,
    }
}

/// Canonical key for codes with no keyboard position.
pub fn fallback_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::BrowserBack) => Key::BrowserBack,
        PhysicalKey::Code(KeyCode::BrowserForward) => Key::BrowserForward,
        PhysicalKey::Code(KeyCode::BrowserRefresh) => Key::BrowserRefresh,
        PhysicalKey::Code(KeyCode::BrowserStop) => Key::BrowserStop,
        PhysicalKey::Code(KeyCode::BrowserSearch) => Key::BrowserSearch,
        PhysicalKey::Code(KeyCode::BrowserFavorites) => Key::BrowserFavorites,
        PhysicalKey::Code(KeyCode::BrowserHome) => Key::BrowserHome,
        PhysicalKey::Code(KeyCode::LaunchMail) => Key::LaunchMail,
        PhysicalKey::Code(KeyCode::LaunchApp1) => Key::LaunchApp1,
        PhysicalKey::Code(KeyCode::LaunchApp2) => Key::LaunchApp2,
        _ => Key::Unknown,
    }
}

pub fn scancode_from_code(code: KeyCode) -> Scancode {
    match code {
        // Letters
        KeyCode::KeyA => Scancode::A,
        KeyCode::KeyB => Scancode::B,
        KeyCode::KeyC => Scancode::C,
        KeyCode::KeyD => Scancode::D,
        KeyCode::KeyE => Scancode::E,
        KeyCode::KeyF => Scancode::F,
        KeyCode::KeyG => Scancode::G,
        KeyCode::KeyH => Scancode::H,
        KeyCode::KeyI => Scancode::I,
        KeyCode::KeyJ => Scancode::J,
        KeyCode::KeyK => Scancode::K,
        KeyCode::KeyL => Scancode::L,
        KeyCode::KeyM => Scancode::M,
        KeyCode::KeyN => Scancode::N,
        KeyCode::KeyO => Scancode::O,
        KeyCode::KeyP => Scancode::P,
        KeyCode::KeyQ => Scancode::Q,
        KeyCode::KeyR => Scancode::R,
        KeyCode::KeyS => Scancode::S,
        KeyCode::KeyT => Scancode::T,
        KeyCode::KeyU => Scancode::U,
        KeyCode::KeyV => Scancode::V,
        KeyCode::KeyW => Scancode::W,
        KeyCode::KeyX => Scancode::X,
        KeyCode::KeyY => Scancode::Y,
        KeyCode::KeyZ => Scancode::Z,

        // Digits
        KeyCode::Digit0 => Scancode::Digit0,
        KeyCode::Digit1 => Scancode::Digit1,
        KeyCode::Digit2 => Scancode::Digit2,
        KeyCode::Digit3 => Scancode::Digit3,
        KeyCode::Digit4 => Scancode::Digit4,
        KeyCode::Digit5 => Scancode::Digit5,
        KeyCode::Digit6 => Scancode::Digit6,
        KeyCode::Digit7 => Scancode::Digit7,
        KeyCode::Digit8 => Scancode::Digit8,
        KeyCode::Digit9 => Scancode::Digit9,

        // Function keys
        KeyCode::F1 => Scancode::F1,
        KeyCode::F2 => Scancode::F2,
        KeyCode::F3 => Scancode::F3,
        KeyCode::F4 => Scancode::F4,
        KeyCode::F5 => Scancode::F5,
        KeyCode::F6 => Scancode::F6,
        KeyCode::F7 => Scancode::F7,
        KeyCode::F8 => Scancode::F8,
        KeyCode::F9 => Scancode::F9,
        KeyCode::F10 => Scancode::F10,
        KeyCode::F11 => Scancode::F11,
        KeyCode::F12 => Scancode::F12,
        KeyCode::F13 => Scancode::F13,
        KeyCode::F14 => Scancode::F14,
        KeyCode::F15 => Scancode::F15,
        KeyCode::F16 => Scancode::F16,
        KeyCode::F17 => Scancode::F17,
        KeyCode::F18 => Scancode::F18,
        KeyCode::F19 => Scancode::F19,
        KeyCode::F20 => Scancode::F20,
        KeyCode::F21 => Scancode::F21,
        KeyCode::F22 => Scancode::F22,
        KeyCode::F23 => Scancode::F23,
        KeyCode::F24 => Scancode::F24,

        // Modifiers
        KeyCode::ShiftLeft => Scancode::ShiftLeft,
        KeyCode::ShiftRight => Scancode::ShiftRight,
        KeyCode::ControlLeft => Scancode::ControlLeft,
        KeyCode::ControlRight => Scancode::ControlRight,
        KeyCode::AltLeft => Scancode::AltLeft,
        KeyCode::AltRight => Scancode::AltRight,
        KeyCode::SuperLeft => Scancode::SuperLeft,
        KeyCode::SuperRight => Scancode::SuperRight,

        // Navigation
        KeyCode::ArrowUp => Scancode::ArrowUp,
        KeyCode::ArrowDown => Scancode::ArrowDown,
        KeyCode::ArrowLeft => Scancode::ArrowLeft,
        KeyCode::ArrowRight => Scancode::ArrowRight,
        KeyCode::Insert => Scancode::Insert,
        KeyCode::Delete => Scancode::Delete,
        KeyCode::Home => Scancode::Home,
        KeyCode::End => Scancode::End,
        KeyCode::PageUp => Scancode::PageUp,
        KeyCode::PageDown => Scancode::PageDown,

        // Whitespace and editing
        KeyCode::Space => Scancode::Space,
        KeyCode::Enter => Scancode::Enter,
        KeyCode::Escape => Scancode::Escape,
        KeyCode::Tab => Scancode::Tab,
        KeyCode::Backspace => Scancode::Backspace,

        // Punctuation
        KeyCode::Minus => Scancode::Minus,
        KeyCode::Equal => Scancode::Equal,
        KeyCode::BracketLeft => Scancode::BracketLeft,
        KeyCode::BracketRight => Scancode::BracketRight,
        KeyCode::Backslash => Scancode::Backslash,
        KeyCode::Semicolon => Scancode::Semicolon,
        KeyCode::Quote => Scancode::Quote,
        KeyCode::Backquote => Scancode::Backquote,
        KeyCode::Comma => Scancode::Comma,
        KeyCode::Period => Scancode::Period,
        KeyCode::Slash => Scancode::Slash,

        // Locks and system
        KeyCode::CapsLock => Scancode::CapsLock,
        KeyCode::ScrollLock => Scancode::ScrollLock,
        KeyCode::NumLock => Scancode::NumLock,
        KeyCode::PrintScreen => Scancode::PrintScreen,
        KeyCode::Pause => Scancode::Pause,
        KeyCode::ContextMenu => Scancode::ContextMenu,
        KeyCode::Power => Scancode::Power,

        // Keypad
        KeyCode::Numpad0 => Scancode::Numpad0,
        KeyCode::Numpad1 => Scancode::Numpad1,
        KeyCode::Numpad2 => Scancode::Numpad2,
        KeyCode::Numpad3 => Scancode::Numpad3,
        KeyCode::Numpad4 => Scancode::Numpad4,
        KeyCode::Numpad5 => Scancode::Numpad5,
        KeyCode::Numpad6 => Scancode::Numpad6,
        KeyCode::Numpad7 => Scancode::Numpad7,
        KeyCode::Numpad8 => Scancode::Numpad8,
        KeyCode::Numpad9 => Scancode::Numpad9,
        KeyCode::NumpadDivide => Scancode::NumpadDivide,
        KeyCode::NumpadMultiply | KeyCode::NumpadStar => Scancode::NumpadMultiply,
        KeyCode::NumpadSubtract => Scancode::NumpadSubtract,
        KeyCode::NumpadAdd => Scancode::NumpadAdd,
        KeyCode::NumpadEnter => Scancode::NumpadEnter,
        KeyCode::NumpadDecimal => Scancode::NumpadDecimal,
        KeyCode::NumpadEqual => Scancode::NumpadEqual,
        KeyCode::NumpadComma => Scancode::NumpadComma,

        // International
        KeyCode::IntlBackslash => Scancode::IntlBackslash,
        KeyCode::IntlRo => Scancode::IntlRo,
        KeyCode::IntlYen => Scancode::IntlYen,
        KeyCode::KanaMode => Scancode::KanaMode,
        KeyCode::Convert => Scancode::Convert,
        KeyCode::NonConvert => Scancode::NonConvert,
        KeyCode::Lang1 => Scancode::Lang1,
        KeyCode::Lang2 => Scancode::Lang2,

        // Commands
        KeyCode::Help => Scancode::Help,
        KeyCode::Select => Scancode::Select,
        KeyCode::Again => Scancode::Again,
        KeyCode::Undo => Scancode::Undo,
        KeyCode::Cut => Scancode::Cut,
        KeyCode::Copy => Scancode::Copy,
        KeyCode::Paste => Scancode::Paste,
        KeyCode::Find => Scancode::Find,

        // Media
        KeyCode::AudioVolumeMute => Scancode::AudioVolumeMute,
        KeyCode::AudioVolumeUp => Scancode::AudioVolumeUp,
        KeyCode::AudioVolumeDown => Scancode::AudioVolumeDown,
        KeyCode::MediaPlayPause => Scancode::MediaPlayPause,
        KeyCode::MediaStop => Scancode::MediaStop,
        KeyCode::MediaTrackNext => Scancode::MediaTrackNext,
        KeyCode::MediaTrackPrevious => Scancode::MediaTrackPrevious,
        KeyCode::MediaSelect => Scancode::MediaSelect,
        KeyCode::Eject => Scancode::Eject,
        KeyCode::Sleep => Scancode::Sleep,
        KeyCode::WakeUp => Scancode::WakeUp,

        _ => Scancode::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use nk_core::keyboard::scancode_to_key;

    use super::*;

    #[test]
    fn codes_map_by_position() {
        assert_eq!(scancode_from_code(KeyCode::KeyA), Scancode::A);
        assert_eq!(scancode_from_code(KeyCode::NumpadEnter), Scancode::NumpadEnter);
        assert_eq!(scancode_to_key(scancode_from_code(KeyCode::AltRight)), Key::AltRight);
        assert_eq!(scancode_from_code(KeyCode::Fn), Scancode::Unknown);
    }

    #[test]
    fn unidentified_codes_use_native_tables() {
        let key = PhysicalKey::Unidentified(NativeKeyCode::Xkb(38));
        assert_eq!(scancode_from_physical(key), Scancode::A);
        let key = PhysicalKey::Unidentified(NativeKeyCode::MacOS(0x00));
        assert_eq!(scancode_from_physical(key), Scancode::A);
        assert_eq!(native_key(key), NativeKey::Apple(0x00));
    }

    #[test]
    fn browser_keys_fall_back() {
        let key = PhysicalKey::Code(KeyCode::BrowserBack);
        assert_eq!(scancode_from_physical(key), Scancode::Unknown);
        assert_eq!(fallback_key(key), Key::BrowserBack);
    }
}
