//! # Event Viewer
//!
//! Opens a window and logs every canonical event at info level. Escape
//! exits; closing the window asks once before closing.
//!
//! ```bash
//! cargo run --bin event_viewer -- --raw-mouse --max-frames 600
//! ```

use nk_app::{App, AppArgs, AppContext, AppHandler, DefaultAppArgs};
use nk_core::event::KeyEvent;
use nk_core::{Event, EventType, Key};

#[derive(Default)]
struct EventViewer {
    events: u64,
    close_warned: bool,
}

impl AppHandler for EventViewer {
    fn on_init(&mut self, ctx: &mut AppContext) {
        log::info!("Viewing events of {}; press Escape to quit", ctx.window());
    }

    fn on_event(&mut self, _ctx: &mut AppContext, event: &Event) {
        self.events += 1;
        // Motion floods the log
        if matches!(event.ty(), EventType::MouseMove | EventType::MouseRaw) {
            log::debug!("{}", nk_demos::describe(event));
        } else {
            log::info!("{}", nk_demos::describe(event));
        }
    }

    fn on_key(&mut self, ctx: &mut AppContext, event: &KeyEvent) {
        if event.key == Key::Escape && event.state.is_pressed() {
            ctx.request_exit();
        }
    }

    fn on_close_requested(&mut self, _ctx: &mut AppContext) -> bool {
        if self.close_warned {
            return true;
        }
        log::warn!("Close again to exit");
        self.close_warned = true;
        false
    }

    fn on_shutdown(&mut self, ctx: &mut AppContext) {
        log::info!(
            "Saw {} events in {} frames",
            self.events,
            ctx.frame_number()
        );
    }
}

fn main() {
    let args = DefaultAppArgs::parse();
    App::run(EventViewer::default(), args);
}
