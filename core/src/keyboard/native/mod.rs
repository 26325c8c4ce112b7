//! Per-backend native key code tables.
//!
//! Each submodule owns one static table for its backend family. Forward and
//! reverse lookups read the same slice, so a code that maps to a scancode
//! maps back to the same code.

pub mod android;
pub mod apple;
pub mod web;
pub mod win32;
pub mod x11;

use super::Scancode;
use crate::text::FixedStr;

/// The native key code a keyboard event was translated from.
///
/// Kept on keyboard payloads for diagnostics and for code that needs to talk
/// back to the OS about a specific key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NativeKey {
    /// No native code (synthesized events).
    #[default]
    None,
    /// Win32 virtual key, hardware scancode and extended flag.
    Win32 { vk: u16, scan: u16, extended: bool },
    /// X11 keycode (evdev + 8) and the keysym it produced.
    X11 { keycode: u32, keysym: u32 },
    /// Carbon `kVK_*` virtual keycode.
    Apple(u16),
    /// DOM `KeyboardEvent.code`.
    Dom(FixedStr<32>),
    /// Android `AKEYCODE_*`.
    Android(i32),
}

impl NativeKey {
    /// Resolve the physical key through the table for this code's backend.
    pub fn scancode(&self) -> Scancode {
        match *self {
            NativeKey::None => Scancode::Unknown,
            NativeKey::Win32 { vk, scan, extended } => {
                win32::scancode_from_key_message(vk, scan, extended)
            }
            NativeKey::X11 { keycode, .. } => x11::scancode_from_keycode(keycode),
            NativeKey::Apple(code) => apple::scancode_from_carbon(code),
            NativeKey::Dom(ref code) => web::scancode_from_code(code.as_str()),
            NativeKey::Android(code) => android::scancode_from_keycode(code),
        }
    }

    /// Returns `true` for [`NativeKey::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, NativeKey::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_resolves_a() {
        let codes = [
            NativeKey::Win32 {
                vk: 0x41,
                scan: 0x1E,
                extended: false,
            },
            NativeKey::X11 {
                keycode: 38,
                keysym: 0x61,
            },
            NativeKey::Apple(0x00),
            NativeKey::Dom(FixedStr::new("KeyA")),
            NativeKey::Android(29),
        ];
        for code in codes {
            assert_eq!(code.scancode(), Scancode::A, "{code:?}");
        }
        assert_eq!(NativeKey::None.scancode(), Scancode::Unknown);
        assert!(NativeKey::default().is_none());
    }
}
