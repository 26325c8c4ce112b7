//! # nk demos
//!
//! Small programs that show the canonical event stream.
//!
//! ## Available Demos
//!
//! - `event_viewer` - Opens a window and logs every event it receives
//! - `replay` - Feeds a scripted Win32 message sequence through the
//!   dispatcher without opening a window

use nk_core::Event;
use nk_core::event::{
    DropFileEvent, MouseMoveEvent, MouseRawEvent, MouseWheelEvent, TouchEvent, WindowDpiEvent,
    WindowMoveEvent, WindowResizeEvent,
};

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One log line for `event`.
pub fn describe(event: &Event) -> String {
    let window = match event.window() {
        Some(window) => window.to_string(),
        None => "-".to_string(),
    };
    let detail = detail(event).unwrap_or_default();
    format!("[{window}] {}{detail}", event.ty())
}

fn detail(event: &Event) -> Option<String> {
    if let Some(key) = event.key() {
        return Some(format!(
            " key={} scancode={} {:?}",
            key.key, key.scancode, key.modifiers
        ));
    }
    if let Some(text) = event.text() {
        return Some(format!(" {:?}", text.as_str()));
    }
    if let Some(button) = event.mouse_button() {
        return Some(format!(
            " {:?} at ({:.0}, {:.0}) clicks={}",
            button.button, button.x, button.y, button.clicks
        ));
    }
    if let Some(motion) = event.get::<MouseMoveEvent>() {
        return Some(format!(" ({:.0}, {:.0})", motion.x, motion.y));
    }
    if let Some(raw) = event.get::<MouseRawEvent>() {
        return Some(format!(" d=({:.1}, {:.1})", raw.dx, raw.dy));
    }
    if let Some(wheel) = event.get::<MouseWheelEvent>() {
        return Some(format!(" d=({:.2}, {:.2})", wheel.dx, wheel.dy));
    }
    if let Some(resize) = event.get::<WindowResizeEvent>() {
        let (dw, dh) = resize.delta();
        return Some(format!(
            " {}x{} ({dw:+}, {dh:+})",
            resize.size.width, resize.size.height
        ));
    }
    if let Some(moved) = event.get::<WindowMoveEvent>() {
        return Some(format!(" ({}, {})", moved.position.x, moved.position.y));
    }
    if let Some(dpi) = event.get::<WindowDpiEvent>() {
        return Some(format!(" scale={}", dpi.scale_factor));
    }
    if let Some(touch) = event.get::<TouchEvent>() {
        return Some(format!(" contacts={}", touch.len()));
    }
    if let Some(drop) = event.get::<DropFileEvent>() {
        return Some(format!(" {} ({}/{})", drop.path, drop.index + 1, drop.count));
    }
    None
}

#[cfg(test)]
mod tests {
    use nk_core::event::{KeyEvent, SystemAction};
    use nk_core::{Key, Modifiers, Scancode, WindowId};

    use super::*;

    #[test]
    fn describes_keys() {
        let press = KeyEvent::pressed(Key::A, Scancode::A, Modifiers::NONE);
        let line = describe(&Event::new(press).with_window(Some(WindowId(2))));
        assert!(line.starts_with("[window#2] KeyPress key=A scancode=A"));
    }

    #[test]
    fn windowless_events_have_no_detail() {
        assert_eq!(describe(&Event::system(SystemAction::Quit)), "[-] Quit");
    }
}
