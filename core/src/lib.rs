//! # nk core
//!
//! Canonical input model shared by every backend: physical scancodes, the
//! layout-invariant [`Key`](keyboard::Key) table, per-backend native code
//! tables, modifier state, the closed [`EventType`](event::EventType) set and
//! the fixed-size [`Event`](event::Event) envelope.
//!
//! Nothing here depends on a windowing system. Backends live in
//! `nk-platform`; the dispatcher lives in `nk-app`.

pub mod event;
pub mod handle;
pub mod input;
pub mod keyboard;
pub mod modifiers;
pub mod text;

pub use event::{Event, EventCategory, EventData, EventPayload, EventType};
pub use handle::{NativeHandle, Timestamp, WindowId};
pub use input::InputState;
pub use keyboard::{Key, NativeKey, Scancode};
pub use modifiers::{ModifierKeys, Modifiers};

static_assertions::assert_impl_all!(Event: Copy, Send, Sync);
static_assertions::assert_impl_all!(event::KeyEvent: Copy, Send);
static_assertions::assert_impl_all!(event::TouchEvent: Copy, Send);
static_assertions::assert_impl_all!(event::DropFileEvent: Copy, Send);
static_assertions::const_assert!(EventType::COUNT <= u16::MAX as usize);

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init() {
    log::info!("nk core v{} initialized", VERSION);
}
