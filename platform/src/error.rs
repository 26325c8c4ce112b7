//! Platform error types.

use nk_core::WindowId;
use thiserror::Error;

/// Errors raised while setting up platform resources.
///
/// Translating native input never fails; unmapped messages and messages for
/// unbound handles are dropped. Only creating event loops and windows, and
/// addressing a window the source never created, can go wrong.
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Failed to create event loop: {0}")]
    EventLoopCreation(String),
    #[error("Failed to create window: {0}")]
    WindowCreation(String),
    #[error("{0} has no window on this source")]
    UnknownWindow(WindowId),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlatformError::EventLoopCreation("not on main thread".to_string());
        assert_eq!(err.to_string(), "Failed to create event loop: not on main thread");

        let err = PlatformError::UnknownWindow(WindowId(3));
        assert_eq!(err.to_string(), "window#3 has no window on this source");

        let err = PlatformError::WindowCreation("no display".to_string());
        assert_eq!(err.to_string(), "Failed to create window: no display");
    }
}
