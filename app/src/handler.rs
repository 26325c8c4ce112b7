//! Application handler trait.

use nk_core::Event;
use nk_core::event::{KeyEvent, MouseButton, TextInputEvent};

use crate::context::AppContext;

/// Trait for handling application events.
///
/// # Lifecycle
///
/// 1. `on_init` - Called once before the first frame
/// 2. `on_event` and the typed hooks - Called for every event of a frame
/// 3. `on_update` - Called every frame after the events
/// 4. `on_shutdown` - Called when the application is closing
///
/// # Example
///
/// ```ignore
/// use nk_app::{AppContext, AppHandler};
/// use nk_core::Event;
///
/// struct Logger;
///
/// impl AppHandler for Logger {
///     fn on_event(&mut self, _ctx: &mut AppContext, event: &Event) {
///         log::info!("{}", event.ty());
///     }
/// }
/// ```
pub trait AppHandler {
    /// Called once when the application initializes.
    fn on_init(&mut self, _ctx: &mut AppContext) {}

    /// Called for every event, before the typed hooks below.
    fn on_event(&mut self, _ctx: &mut AppContext, _event: &Event) {}

    /// Called when the window is resized.
    ///
    /// The new size is available in `ctx.width()` and `ctx.height()`.
    fn on_resize(&mut self, _ctx: &mut AppContext) {}

    /// Called every frame after the frame's events.
    ///
    /// Returns `true` to continue running, `false` to exit.
    fn on_update(&mut self, _ctx: &mut AppContext) -> bool {
        true
    }

    /// Called when a key is pressed, repeated or released.
    fn on_key(&mut self, _ctx: &mut AppContext, _event: &KeyEvent) {}

    /// Called for every character of text input.
    fn on_text(&mut self, _ctx: &mut AppContext, _event: &TextInputEvent) {}

    /// Called when the mouse is moved.
    fn on_mouse_move(&mut self, _ctx: &mut AppContext, _x: f32, _y: f32) {}

    /// Called when a mouse button is pressed or released.
    fn on_mouse_button(&mut self, _ctx: &mut AppContext, _button: MouseButton, _pressed: bool) {}

    /// Called when the mouse wheel is scrolled.
    fn on_mouse_scroll(&mut self, _ctx: &mut AppContext, _delta_x: f32, _delta_y: f32) {}

    /// Called when a file is dropped onto the window.
    fn on_file_dropped(&mut self, _ctx: &mut AppContext, _path: &str) {}

    /// Called when the user requests to close the window (e.g. clicking the
    /// close button or pressing Alt+F4).
    ///
    /// Return `true` to allow the window to close (the default). Return
    /// `false` to keep it open; the handler can still exit later through
    /// [`AppContext::request_exit`] or by returning `false` from
    /// [`on_update`](Self::on_update).
    fn on_close_requested(&mut self, _ctx: &mut AppContext) -> bool {
        true
    }

    /// Called when the application is closing.
    fn on_shutdown(&mut self, _ctx: &mut AppContext) {}
}
