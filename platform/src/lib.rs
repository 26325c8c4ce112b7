//! # nk platform
//!
//! Event sources that translate native window-system input into canonical
//! [`Event`](nk_core::Event)s.
//!
//! Every backend implements [`EventSource`] on top of a shared
//! [`SourceState`]. The translators for Win32, X11, Cocoa, the web and
//! Android consume plain message records posted into a [`NativeQueue`] by
//! the window layer, so all of them build and run on every target. On
//! desktop targets [`WinitSource`] drives a real winit event loop.

pub mod android;
mod click;
pub mod cocoa;
mod config;
#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
pub mod desktop;
mod error;
mod queue;
mod source;
pub mod web;
pub mod win32;
pub mod x11;

pub use android::AndroidSource;
pub use click::ClickTracker;
pub use cocoa::CocoaSource;
pub use config::SourceConfig;
#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
pub use desktop::WinitSource;
pub use error::{PlatformError, PlatformResult};
pub use queue::{EventSender, NativeQueue};
pub use source::{EventCallback, EventSource, SourceState};
pub use web::WebSource;
pub use win32::Win32Source;
pub use x11::{XcbSource, XlibSource};

/// The message translator for the target being built.
#[cfg(target_os = "windows")]
pub type NativeSource = Win32Source;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub type NativeSource = CocoaSource;
#[cfg(target_os = "android")]
pub type NativeSource = AndroidSource;
#[cfg(target_arch = "wasm32")]
pub type NativeSource = WebSource;
#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "ios",
    target_os = "android",
    target_arch = "wasm32"
)))]
pub type NativeSource = XlibSource;

static_assertions::assert_impl_all!(NativeQueue<win32::Win32Message>: Send, Sync, Clone);
static_assertions::assert_impl_all!(EventSender: Send, Sync, Clone);

/// Platform library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init() {
    log::info!("nk platform v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn native_source_has_a_name() {
        let source = NativeSource::default();
        assert!(!source.name().is_empty());
        assert!(source.is_idle());
    }
}
