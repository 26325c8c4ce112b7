use std::cell::RefCell;
use std::rc::Rc;

use nk_core::event::{SystemAction, WindowAction};
use nk_core::{Event, EventType, Key, NativeHandle, Scancode, WindowId};
use nk_platform::android::{AndroidKeyEvent, AndroidMessage, key_action};
use nk_platform::cocoa::{CocoaEvent, CocoaMessage, event_type};
use nk_platform::web::{DomEvent, DomEventKind, DomKey};
use nk_platform::win32::{Win32Message, wm};
use nk_platform::x11::{XEvent, XEventKind, XcbEvent, response};
use nk_platform::{
    AndroidSource, CocoaSource, EventSource, SourceConfig, WebSource, Win32Source, XcbSource,
    XlibSource,
};
use rstest::rstest;

const HANDLE: NativeHandle = NativeHandle(0x10);
const OWNER: WindowId = WindowId(1);

fn drain(source: &mut dyn EventSource) -> Vec<Event> {
    source.poll_events();
    std::iter::from_fn(|| source.pop()).collect()
}

fn bound<S: EventSource>(mut source: S) -> S {
    source.initialize(OWNER, HANDLE);
    source
}

fn press_a_win32() -> Vec<Event> {
    let mut source = bound(Win32Source::default());
    let lparam = Win32Message::key_lparam(0x1E, false, false, false);
    source.post(Win32Message::new(HANDLE, wm::KEYDOWN, 0x41, lparam));
    source.post(Win32Message::new(HANDLE, wm::CHAR, 'a' as usize, lparam));
    drain(&mut source)
}

fn press_a_xlib() -> Vec<Event> {
    let mut source = bound(XlibSource::default());
    let kind = XEventKind::KeyPress {
        keycode: 38,
        state: 0,
        keysym: 'a' as u32,
    };
    source.post(XEvent::new(HANDLE, 100, kind));
    drain(&mut source)
}

fn press_a_xcb() -> Vec<Event> {
    let mut source = bound(XcbSource::default());
    source.post(XcbEvent {
        response_type: response::KEY_PRESS,
        detail: 38,
        time: 100,
        window: HANDLE.0 as u32,
        ..XcbEvent::default()
    });
    drain(&mut source)
}

fn press_a_cocoa() -> Vec<Event> {
    let mut source = bound(CocoaSource::default());
    source.post(CocoaMessage::Event(CocoaEvent::key(
        HANDLE,
        event_type::KEY_DOWN,
        0x00,
        "a",
    )));
    drain(&mut source)
}

fn press_a_web() -> Vec<Event> {
    let mut source = bound(WebSource::default());
    source.post(DomEvent::new(DomEventKind::KeyDown(DomKey {
        code: "KeyA".into(),
        key: "a".into(),
        ..DomKey::default()
    })));
    drain(&mut source)
}

fn press_a_android() -> Vec<Event> {
    let mut source = bound(AndroidSource::default());
    source.post(AndroidMessage::Key(
        AndroidKeyEvent::new(key_action::DOWN, 29).with_unicode('a' as u32),
    ));
    drain(&mut source)
}

#[rstest]
#[case::win32(press_a_win32)]
#[case::xlib(press_a_xlib)]
#[case::xcb(press_a_xcb)]
#[case::cocoa(press_a_cocoa)]
#[case::web(press_a_web)]
#[case::android(press_a_android)]
fn every_backend_reports_the_same_key_a(#[case] press: fn() -> Vec<Event>) {
    let events = press();
    let types: Vec<_> = events.iter().map(Event::ty).collect();
    assert_eq!(types, [EventType::KeyPress, EventType::TextInput]);

    let key = events[0].key().unwrap();
    assert_eq!(key.key, Key::A);
    assert_eq!(key.scancode, Scancode::A);
    assert!(!key.repeat);
    assert_eq!(events[1].text().unwrap().as_str(), "a");
    assert!(events.iter().all(|e| e.window() == Some(OWNER)));
}

#[test]
fn win32_key_down_then_char() {
    let mut source = bound(Win32Source::default());
    let lparam = Win32Message::key_lparam(0x1E, false, false, false);
    source.post(Win32Message::new(HANDLE, wm::KEYDOWN, 0x41, lparam));

    let events = drain(&mut source);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].ty(), EventType::KeyPress);

    source.post(Win32Message::new(HANDLE, wm::CHAR, 97, lparam));
    let events = drain(&mut source);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text().unwrap().ch, 'a');
}

#[test]
fn shift_stays_held_until_both_sides_are_released() {
    let mut source = bound(Win32Source::default());
    let shift = |scan, msg, releasing| {
        let lparam = Win32Message::key_lparam(scan, false, releasing, releasing);
        Win32Message::new(HANDLE, msg, 0x10, lparam)
    };
    source.post(shift(0x2A, wm::KEYDOWN, false));
    source.post(shift(0x36, wm::KEYDOWN, false));
    source.post(shift(0x2A, wm::KEYUP, true));
    source.post(shift(0x36, wm::KEYUP, true));

    let held: Vec<_> = drain(&mut source)
        .iter()
        .map(|e| {
            let key = e.key().unwrap();
            (key.key, key.modifiers.shift)
        })
        .collect();
    assert_eq!(
        held,
        [
            (Key::ShiftLeft, true),
            (Key::ShiftRight, true),
            (Key::ShiftLeft, true),
            (Key::ShiftRight, false),
        ]
    );
}

#[rstest]
#[case::bound(HANDLE, 1)]
#[case::unknown(NativeHandle(0x99), 0)]
fn messages_for_unbound_windows_are_dropped(#[case] target: NativeHandle, #[case] expected: usize) {
    let mut source = bound(Win32Source::default());
    source.post(Win32Message::new(target, wm::PAINT, 0, 0));
    assert_eq!(drain(&mut source).len(), expected);
}

#[test]
fn idle_source_ignores_pending_messages() {
    let mut source = Win32Source::default();
    source.post(Win32Message::new(HANDLE, wm::PAINT, 0, 0));
    assert!(source.is_idle());
    assert!(drain(&mut source).is_empty());
    assert_eq!(source.queue().len(), 1);
}

#[test]
fn idle_source_discards_sent_events() {
    let mut source = Win32Source::default();
    let sender = source.sender();
    for _ in 0..3 {
        sender.send(Event::system(SystemAction::LowMemory));
    }
    assert_eq!(sender.pending(), 3);

    assert!(drain(&mut source).is_empty());
    assert_eq!(sender.pending(), 0);
}

#[test]
fn shutdown_twice_is_harmless() {
    let mut source = bound(XlibSource::default());
    source.shutdown(HANDLE);
    source.shutdown(HANDLE);
    assert!(source.is_idle());
}

#[test]
fn pump_respects_the_message_budget() {
    let config = SourceConfig::default().with_max_pump_messages(2);
    let mut source = bound(Win32Source::new(config));
    for _ in 0..5 {
        source.post(Win32Message::new(HANDLE, wm::PAINT, 0, 0));
    }
    assert_eq!(drain(&mut source).len(), 2);
    assert_eq!(drain(&mut source).len(), 2);
    assert_eq!(drain(&mut source).len(), 1);
}

#[test]
fn sender_events_arrive_after_native_input() {
    let mut source = bound(Win32Source::default());
    let sender = source.sender();
    std::thread::spawn(move || sender.send(Event::system(SystemAction::LowMemory)))
        .join()
        .unwrap();
    source.post(Win32Message::new(HANDLE, wm::PAINT, 0, 0));

    let types: Vec<_> = drain(&mut source).iter().map(Event::ty).collect();
    assert_eq!(types, [EventType::WindowPaint, EventType::LowMemory]);
}

#[test]
fn callbacks_see_events_before_the_queue() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut source = bound(Win32Source::default());
    let log = Rc::clone(&seen);
    source.set_event_callback(Some(Box::new(move |e: &Event| log.borrow_mut().push(e.ty()))));

    source.post(Win32Message::new(HANDLE, wm::CLOSE, 0, 0));
    source.poll_events();
    assert_eq!(*seen.borrow(), [EventType::WindowClose]);
    assert_eq!(source.len(), 1);

    source.dispatch_event(&Event::window_action(WindowAction::Paint), Some(HANDLE));
    assert_eq!(*seen.borrow(), [EventType::WindowClose, EventType::WindowPaint]);
    assert_eq!(source.len(), 1);
}
