//! Per-application frame context.

use nk_core::{InputState, WindowId};
use web_time::Instant;

/// State handed to every [`AppHandler`](crate::AppHandler) callback.
///
/// Window size, focus and key/button state come from the [`InputState`],
/// which the runner feeds with every event of the frame before
/// [`on_update`](crate::AppHandler::on_update) runs.
#[derive(Debug)]
pub struct AppContext {
    /// The window created at startup.
    pub(crate) window: WindowId,
    /// Current DPI scale factor.
    pub(crate) scale_factor: f64,
    /// Current frame number.
    pub(crate) frame_number: u64,
    /// Delta time since last frame in seconds.
    pub(crate) delta_time: f32,
    /// Time since application start in seconds.
    pub(crate) elapsed_time: f32,
    pub(crate) input: InputState,
    pub(crate) exit_requested: bool,
    pub(crate) start_time: Instant,
    pub(crate) last_frame_time: Instant,
}

impl AppContext {
    pub(crate) fn new(window: WindowId) -> Self {
        let now = Instant::now();
        Self {
            window,
            scale_factor: 1.0,
            frame_number: 0,
            delta_time: 0.0,
            elapsed_time: 0.0,
            input: InputState::default(),
            exit_requested: false,
            start_time: now,
            last_frame_time: now,
        }
    }

    /// Advance frame timing. Called once per frame before `on_update`.
    pub(crate) fn tick(&mut self) {
        let now = Instant::now();
        self.delta_time = (now - self.last_frame_time).as_secs_f32();
        self.elapsed_time = (now - self.start_time).as_secs_f32();
        self.last_frame_time = now;
    }

    /// The main window.
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Get the current window width.
    pub fn width(&self) -> u32 {
        self.input.window_size.width
    }

    /// Get the current window height.
    pub fn height(&self) -> u32 {
        self.input.window_size.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.input.aspect_ratio()
    }

    /// Get the current scale factor (DPI scaling).
    ///
    /// This is the ratio between physical pixels and logical pixels.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Get the current frame number.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Get the delta time since last frame in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the elapsed time since application start in seconds.
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Stop the application after the current frame.
    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::debug!("Exit requested at frame {}", self.frame_number);
        }
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_exit_is_sticky() {
        let mut ctx = AppContext::new(WindowId(1));
        assert!(!ctx.exit_requested());
        ctx.request_exit();
        ctx.request_exit();
        assert!(ctx.exit_requested());
    }

    #[test]
    fn tick_advances_time() {
        let mut ctx = AppContext::new(WindowId(1));
        std::thread::sleep(std::time::Duration::from_millis(2));
        ctx.tick();
        assert!(ctx.delta_time() > 0.0);
        assert!(ctx.elapsed_time() >= ctx.delta_time());
    }
}
