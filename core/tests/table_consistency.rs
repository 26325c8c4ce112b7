//! Every backend table must agree with the shared scancode → key table.

use nk_core::keyboard::native::{android, apple, web, win32, x11};
use nk_core::keyboard::{Key, Scancode, scancode_to_key};
use rstest::rstest;

#[derive(Debug, Clone, Copy)]
enum Backend {
    Win32VirtualKey,
    Win32Hardware,
    X11,
    Apple,
    Web,
    Android,
}

/// Encode `scancode` as the backend's native code and decode it again.
fn round_trip(backend: Backend, scancode: Scancode) -> Option<Scancode> {
    Some(match backend {
        Backend::Win32VirtualKey => {
            let (vk, extended) = win32::virtual_key_from_scancode(scancode)?;
            win32::scancode_from_virtual_key(vk, extended, 0)
        }
        Backend::Win32Hardware => {
            let (scan, extended) = win32::hardware_from_scancode(scancode)?;
            win32::scancode_from_hardware(scan, extended)
        }
        Backend::X11 => x11::scancode_from_keycode(x11::keycode_from_scancode(scancode)?),
        Backend::Apple => apple::scancode_from_carbon(apple::carbon_from_scancode(scancode)?),
        Backend::Web => web::scancode_from_code(web::code_from_scancode(scancode)?),
        Backend::Android => {
            android::scancode_from_keycode(android::keycode_from_scancode(scancode)?)
        }
    })
}

/// Keys on a full-size US-QWERTY keyboard.
#[rustfmt::skip]
const US_QWERTY: &[Scancode] = &[
    Scancode::A, Scancode::B, Scancode::C, Scancode::D, Scancode::E, Scancode::F,
    Scancode::G, Scancode::H, Scancode::I, Scancode::J, Scancode::K, Scancode::L,
    Scancode::M, Scancode::N, Scancode::O, Scancode::P, Scancode::Q, Scancode::R,
    Scancode::S, Scancode::T, Scancode::U, Scancode::V, Scancode::W, Scancode::X,
    Scancode::Y, Scancode::Z,
    Scancode::Digit1, Scancode::Digit2, Scancode::Digit3, Scancode::Digit4, Scancode::Digit5,
    Scancode::Digit6, Scancode::Digit7, Scancode::Digit8, Scancode::Digit9, Scancode::Digit0,
    Scancode::Enter, Scancode::Escape, Scancode::Backspace, Scancode::Tab, Scancode::Space,
    Scancode::Minus, Scancode::Equal, Scancode::BracketLeft, Scancode::BracketRight,
    Scancode::Backslash, Scancode::Semicolon, Scancode::Quote, Scancode::Backquote,
    Scancode::Comma, Scancode::Period, Scancode::Slash, Scancode::CapsLock,
    Scancode::F1, Scancode::F2, Scancode::F3, Scancode::F4, Scancode::F5, Scancode::F6,
    Scancode::F7, Scancode::F8, Scancode::F9, Scancode::F10, Scancode::F11, Scancode::F12,
    Scancode::PrintScreen, Scancode::ScrollLock, Scancode::Pause,
    Scancode::Insert, Scancode::Home, Scancode::PageUp, Scancode::Delete, Scancode::End,
    Scancode::PageDown, Scancode::ArrowRight, Scancode::ArrowLeft, Scancode::ArrowDown,
    Scancode::ArrowUp,
    Scancode::NumLock, Scancode::NumpadDivide, Scancode::NumpadMultiply,
    Scancode::NumpadSubtract, Scancode::NumpadAdd, Scancode::NumpadEnter,
    Scancode::Numpad1, Scancode::Numpad2, Scancode::Numpad3, Scancode::Numpad4,
    Scancode::Numpad5, Scancode::Numpad6, Scancode::Numpad7, Scancode::Numpad8,
    Scancode::Numpad9, Scancode::Numpad0, Scancode::NumpadDecimal,
    Scancode::ContextMenu,
    Scancode::ControlLeft, Scancode::ShiftLeft, Scancode::AltLeft, Scancode::SuperLeft,
    Scancode::ControlRight, Scancode::ShiftRight, Scancode::AltRight, Scancode::SuperRight,
];

/// Keys Apple keyboards do not have.
fn absent_on(backend: Backend, scancode: Scancode) -> bool {
    matches!(backend, Backend::Apple)
        && matches!(
            scancode,
            Scancode::PrintScreen | Scancode::ScrollLock | Scancode::Pause
        )
}

#[rstest]
#[case::win32_vk(Backend::Win32VirtualKey)]
#[case::win32_hardware(Backend::Win32Hardware)]
#[case::x11(Backend::X11)]
#[case::apple(Backend::Apple)]
#[case::web(Backend::Web)]
#[case::android(Backend::Android)]
fn us_qwerty_keys_resolve_identically(#[case] backend: Backend) {
    for &scancode in US_QWERTY {
        if absent_on(backend, scancode) {
            continue;
        }
        let decoded = round_trip(backend, scancode);
        assert_eq!(decoded, Some(scancode), "{backend:?} {scancode:?}");
        assert_eq!(
            decoded.map(scancode_to_key),
            Some(scancode_to_key(scancode)),
            "{backend:?} {scancode:?}"
        );
    }
}

#[rstest]
#[case::win32_vk(Backend::Win32VirtualKey)]
#[case::win32_hardware(Backend::Win32Hardware)]
#[case::x11(Backend::X11)]
#[case::apple(Backend::Apple)]
#[case::web(Backend::Web)]
#[case::android(Backend::Android)]
fn every_representable_scancode_round_trips(#[case] backend: Backend) {
    for &scancode in Scancode::ALL {
        if let Some(decoded) = round_trip(backend, scancode) {
            assert_eq!(decoded, scancode, "{backend:?}");
        }
    }
    assert_eq!(round_trip(backend, Scancode::Unknown), None);
}

#[test]
fn enter_and_numpad_enter_are_distinguished_by_extended_flag() {
    assert_eq!(win32::scancode_from_virtual_key(0x0D, false, 0), Scancode::Enter);
    assert_eq!(win32::scancode_from_virtual_key(0x0D, true, 0), Scancode::NumpadEnter);
    assert_eq!(win32::scancode_from_hardware(0x1C, false), Scancode::Enter);
    assert_eq!(win32::scancode_from_hardware(0x1C, true), Scancode::NumpadEnter);
    assert_eq!(win32::scancode_from_virtual_key(0x2D, true, 0), Scancode::Insert);
    assert_eq!(win32::scancode_from_virtual_key(0x2D, false, 0), Scancode::Numpad0);
}

#[rstest]
#[case::numpad0(Scancode::Numpad0, 0x60, false)]
#[case::numpad1(Scancode::Numpad1, 0x61, false)]
#[case::numpad2(Scancode::Numpad2, 0x62, false)]
#[case::numpad3(Scancode::Numpad3, 0x63, false)]
#[case::numpad4(Scancode::Numpad4, 0x64, false)]
#[case::numpad5(Scancode::Numpad5, 0x65, false)]
#[case::numpad6(Scancode::Numpad6, 0x66, false)]
#[case::numpad7(Scancode::Numpad7, 0x67, false)]
#[case::numpad8(Scancode::Numpad8, 0x68, false)]
#[case::numpad9(Scancode::Numpad9, 0x69, false)]
#[case::multiply(Scancode::NumpadMultiply, 0x6A, false)]
#[case::add(Scancode::NumpadAdd, 0x6B, false)]
#[case::comma(Scancode::NumpadComma, 0x6C, false)]
#[case::subtract(Scancode::NumpadSubtract, 0x6D, false)]
#[case::decimal(Scancode::NumpadDecimal, 0x6E, false)]
#[case::divide(Scancode::NumpadDivide, 0x6F, false)]
#[case::enter(Scancode::NumpadEnter, 0x0D, true)]
#[case::num_lock(Scancode::NumLock, 0x90, false)]
#[case::equal(Scancode::NumpadEqual, 0x92, false)]
fn keypad_scancodes_map_to_numpad_virtual_keys(
    #[case] scancode: Scancode,
    #[case] vk: u16,
    #[case] extended: bool,
) {
    assert!(scancode.is_keypad());
    assert_eq!(win32::virtual_key_from_scancode(scancode), Some((vk, extended)));
}

#[test]
fn keypad_cases_cover_every_keypad_scancode() {
    let keypad: Vec<_> = Scancode::ALL.iter().filter(|sc| sc.is_keypad()).collect();
    assert_eq!(keypad.len(), 19);
}

#[test]
fn symbolic_keys_fall_back_without_overriding() {
    use nk_core::keyboard::resolve_key;

    // Browser Back has no position, so the virtual-key fallback supplies it.
    let sc = win32::scancode_from_virtual_key(0xA6, true, 0);
    assert_eq!(sc, Scancode::Unknown);
    assert_eq!(resolve_key(sc, || win32::key_from_virtual_key(0xA6)), Key::BrowserBack);

    // A resolved scancode wins even if the fallback disagrees.
    assert_eq!(resolve_key(Scancode::A, || Key::BrowserBack), Key::A);
}
