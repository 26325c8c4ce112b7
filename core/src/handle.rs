//! Window identity and event timestamps.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use web_time::Instant;

/// Application-level window identifier.
///
/// Assigned by whoever owns the window; events carry it so handlers can tell
/// windows apart without touching native handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Opaque native window handle (HWND, X11 window, NSWindow pointer, canvas
/// id, ...), widened to 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NativeHandle(pub u64);

impl NativeHandle {
    /// The null handle. Never bound by a source.
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Monotonic event time in microseconds since the first timestamp taken in
/// this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn now() -> Self {
        let epoch = *EPOCH.get_or_init(Instant::now);
        Self(epoch.elapsed().as_micros() as u64)
    }

    /// Build from a native millisecond clock (X11 server time, DOM
    /// `timeStamp`, Win32 `GetMessageTime`).
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.saturating_mul(1000))
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_micros(self.0)
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic() {
        let a = Timestamp::now();
        let b = Timestamp::now();
        assert!(b >= a);
        assert_eq!(a.since(b), Duration::ZERO);
    }

    #[test]
    fn from_millis() {
        assert_eq!(Timestamp::from_millis(3).as_duration(), Duration::from_millis(3));
        assert_eq!(
            Timestamp::from_millis(500).since(Timestamp::from_millis(200)),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn null_handle() {
        assert!(NativeHandle::NULL.is_null());
        assert!(!NativeHandle(0x10).is_null());
        assert_eq!(NativeHandle(0x10).to_string(), "0x10");
    }
}
