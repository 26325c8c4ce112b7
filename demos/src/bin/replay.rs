//! # Replay
//!
//! Runs a scripted Win32 message sequence through a [`Win32Source`] and the
//! dispatcher, printing what comes out. Needs no window system.

use nk_app::{EventDispatcher, SharedSource, share};
use nk_core::{EventType, NativeHandle, WindowId};
use nk_platform::win32::{Win32Message, wm};
use nk_platform::{EventSource, Win32Source};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nk_core::init();
    nk_platform::init();
    nk_app::init();

    let hwnd = NativeHandle(0x1000);
    let source = share(Win32Source::default());
    source.borrow_mut().initialize(WindowId(1), hwnd);

    let key_a = Win32Message::key_lparam(0x1E, false, false, false);
    let key_a_up = Win32Message::key_lparam(0x1E, false, true, true);
    let script = [
        Win32Message::new(hwnd, wm::SETFOCUS, 0, 0),
        Win32Message::new(hwnd, wm::KEYDOWN, 0x41, key_a),
        Win32Message::new(hwnd, wm::CHAR, 'a' as usize, key_a),
        Win32Message::new(hwnd, wm::KEYUP, 0x41, key_a_up),
        Win32Message::new(hwnd, wm::MOUSEMOVE, 0, Win32Message::point_lparam(40, 30)),
        Win32Message::new(hwnd, wm::LBUTTONDOWN, 0x0001, Win32Message::point_lparam(40, 30)),
        Win32Message::new(hwnd, wm::LBUTTONUP, 0, Win32Message::point_lparam(40, 30)),
        Win32Message::new(hwnd, wm::CLOSE, 0, 0),
    ];
    for message in script {
        source.borrow().post(message);
    }

    let shared: SharedSource = source;
    let mut dispatcher = EventDispatcher::new();
    dispatcher.attach(&shared);
    dispatcher.set_type_callback(EventType::WindowClose, |_| log::info!("Close requested"));
    dispatcher.poll_events();

    while let Some(event) = dispatcher.poll_event() {
        println!("{}", nk_demos::describe(event));
    }
}
