//! # nk app
//!
//! Event dispatch and a small application runner on top of `nk-platform`.
//!
//! ## Overview
//!
//! - [`EventDispatcher`] - Pumps attached sources once per frame and runs
//!   global and per-type callbacks
//! - [`AppHandler`] - Trait for handling events and frame updates
//! - [`AppArgs`] - Trait for parsing command line arguments
//! - [`App`] - Runner that owns the main window and the frame loop
//!
//! ## Example
//!
//! ```ignore
//! use nk_app::{App, AppArgs, AppContext, AppHandler, DefaultAppArgs};
//! use nk_core::event::KeyEvent;
//! use nk_core::Key;
//!
//! struct MyApp;
//!
//! impl AppHandler for MyApp {
//!     fn on_key(&mut self, ctx: &mut AppContext, event: &KeyEvent) {
//!         if event.key == Key::Escape {
//!             ctx.request_exit();
//!         }
//!     }
//! }
//!
//! fn main() {
//!     let args = DefaultAppArgs::parse();
//!     App::run(MyApp, args);
//! }
//! ```

mod app;
mod args;
mod context;
mod dispatcher;
mod handler;

pub use app::App;
pub use args::{AppArgs, DefaultAppArgs};
pub use context::AppContext;
pub use dispatcher::{EventDispatcher, SharedSource, share};
pub use handler::AppHandler;

/// App library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the app subsystem.
pub fn init() {
    log::info!("nk app v{} initialized", VERSION);
}
