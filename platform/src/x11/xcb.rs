//! XCB source.
//!
//! XCB hands out raw protocol structs. The window layer copies the fields
//! of each `xcb_generic_event_t` it cares about into an [`XcbEvent`]; this
//! module decodes the response type. XCB has no keymap lookup of its own,
//! so text is produced from the US reference layout.

use nk_core::NativeHandle;

use super::{TextSource, X11Translator, XEvent, XEventKind};
use crate::config::SourceConfig;
use crate::queue::NativeQueue;
use crate::source::{EventSource, SourceState};

/// Protocol response types.
pub mod response {
    pub const KEY_PRESS: u8 = 2;
    pub const KEY_RELEASE: u8 = 3;
    pub const BUTTON_PRESS: u8 = 4;
    pub const BUTTON_RELEASE: u8 = 5;
    pub const MOTION_NOTIFY: u8 = 6;
    pub const ENTER_NOTIFY: u8 = 7;
    pub const LEAVE_NOTIFY: u8 = 8;
    pub const FOCUS_IN: u8 = 9;
    pub const FOCUS_OUT: u8 = 10;
    pub const EXPOSE: u8 = 12;
    pub const DESTROY_NOTIFY: u8 = 17;
    pub const UNMAP_NOTIFY: u8 = 18;
    pub const MAP_NOTIFY: u8 = 19;
    pub const CONFIGURE_NOTIFY: u8 = 22;
    pub const CLIENT_MESSAGE: u8 = 33;
}

/// Flattened view of the XCB event structs this source understands.
///
/// Fields that an event type does not carry stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XcbEvent {
    pub response_type: u8,
    /// Keycode or button number.
    pub detail: u8,
    pub time: u32,
    pub window: u32,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    pub state: u16,
    /// Expose `count`.
    pub count: u16,
    /// First 32-bit data word of a client message.
    pub data: u32,
}

impl XcbEvent {
    /// Decode into a protocol event. Unknown response types yield `None`.
    pub fn decode(&self) -> Option<XEvent> {
        let keycode = self.detail as u32;
        let button = self.detail as u32;
        let state = self.state as u32;
        let (x, y) = (self.x as i32, self.y as i32);
        // The top bit flags events sent with SendEvent.
        let kind = match self.response_type & 0x7F {
            response::KEY_PRESS => XEventKind::KeyPress {
                keycode,
                state,
                keysym: 0,
            },
            response::KEY_RELEASE => XEventKind::KeyRelease {
                keycode,
                state,
                keysym: 0,
            },
            response::BUTTON_PRESS => XEventKind::ButtonPress { button, x, y, state },
            response::BUTTON_RELEASE => XEventKind::ButtonRelease { button, x, y, state },
            response::MOTION_NOTIFY => XEventKind::Motion { x, y, state },
            response::ENTER_NOTIFY => XEventKind::Enter { x, y },
            response::LEAVE_NOTIFY => XEventKind::Leave { x, y },
            response::FOCUS_IN => XEventKind::FocusIn,
            response::FOCUS_OUT => XEventKind::FocusOut,
            response::EXPOSE => XEventKind::Expose {
                count: self.count as u32,
            },
            response::DESTROY_NOTIFY => XEventKind::Destroy,
            response::UNMAP_NOTIFY => XEventKind::Unmap,
            response::MAP_NOTIFY => XEventKind::Map,
            response::CONFIGURE_NOTIFY => XEventKind::Configure {
                x,
                y,
                width: self.width as u32,
                height: self.height as u32,
            },
            response::CLIENT_MESSAGE => XEventKind::ClientMessage {
                atom: self.data as u64,
            },
            _ => return None,
        };
        Some(XEvent::new(NativeHandle(self.window as u64), self.time, kind))
    }
}

pub struct XcbSource {
    state: SourceState,
    queue: NativeQueue<XcbEvent>,
    translator: X11Translator,
}

impl XcbSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            state: SourceState::new(config),
            queue: NativeQueue::new(),
            translator: X11Translator::default(),
        }
    }

    pub fn queue(&self) -> NativeQueue<XcbEvent> {
        self.queue.clone()
    }

    pub fn post(&self, event: XcbEvent) {
        self.queue.push(event);
    }

    pub fn set_wm_delete_window(&mut self, atom: u32) {
        self.translator.set_wm_delete_window(atom as u64);
    }
}

impl Default for XcbSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl EventSource for XcbSource {
    fn name(&self) -> &'static str {
        "xcb"
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.state
    }

    fn pump(&mut self) {
        let raw = self.queue.drain(self.state.config().max_pump_messages);
        let batch: Vec<XEvent> = raw
            .iter()
            .filter_map(|event| {
                let decoded = event.decode();
                if decoded.is_none() {
                    log::trace!("Ignored XCB response type {}", event.response_type);
                }
                decoded
            })
            .collect();
        self.translator
            .translate_batch(&mut self.state, batch, TextSource::Reference);
    }

    fn shutdown(&mut self, native: NativeHandle) {
        self.translator.forget(native);
        self.state.unbind(native);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_send_event_flag() {
        let event = XcbEvent {
            response_type: response::KEY_PRESS | 0x80,
            detail: 38,
            window: 5,
            ..XcbEvent::default()
        };
        let decoded = event.decode().unwrap();
        assert_eq!(decoded.window, NativeHandle(5));
        assert!(matches!(decoded.kind, XEventKind::KeyPress { keycode: 38, .. }));
        let unknown = XcbEvent {
            response_type: 99,
            ..XcbEvent::default()
        };
        assert!(unknown.decode().is_none());
    }
}
