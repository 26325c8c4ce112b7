//! Main application struct and frame loop.

use nk_core::event::{DropFileEvent, MouseMoveEvent, MouseWheelEvent, WindowDpiEvent};
use nk_core::{Event, EventType, WindowId};

use crate::args::AppArgs;
use crate::context::AppContext;
use crate::dispatcher::EventDispatcher;
use crate::handler::AppHandler;

/// Main application struct that drives an [`AppHandler`] from an
/// [`EventDispatcher`].
///
/// The `App` struct is generic over:
/// - `H`: The handler type that implements [`AppHandler`]
/// - `A`: The arguments type that implements [`AppArgs`]
///
/// # Example
///
/// ```ignore
/// use nk_app::{App, AppArgs, AppHandler, DefaultAppArgs};
///
/// struct MyApp;
///
/// impl AppHandler for MyApp {}
///
/// fn main() {
///     let args = DefaultAppArgs::parse();
///     App::run(MyApp, args);
/// }
/// ```
pub struct App<H, A>
where
    H: AppHandler,
    A: AppArgs,
{
    handler: H,
    args: A,
    context: AppContext,
}

impl<H, A> App<H, A>
where
    H: AppHandler,
    A: AppArgs,
{
    /// Create an application whose main window is `window`.
    pub fn new(handler: H, args: A, window: WindowId) -> Self {
        Self {
            handler,
            args,
            context: AppContext::new(window),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Call [`AppHandler::on_init`].
    pub fn init(&mut self) {
        self.handler.on_init(&mut self.context);
    }

    /// Feed the events of the dispatcher's current frame to the input state
    /// and the handler.
    ///
    /// Returns the windows whose close request the handler accepted; the
    /// caller destroys them.
    pub fn process_events(&mut self, dispatcher: &mut EventDispatcher) -> Vec<WindowId> {
        self.context.input.begin_frame();
        let mut closing = Vec::new();
        while let Some(&event) = dispatcher.poll_event() {
            if let Some(window) = self.handle_event(&event) {
                closing.push(window);
            }
        }
        closing
    }

    fn handle_event(&mut self, event: &Event) -> Option<WindowId> {
        let ctx = &mut self.context;
        ctx.input.apply(event);
        self.handler.on_event(ctx, event);

        match event.ty() {
            EventType::KeyPress | EventType::KeyRepeat | EventType::KeyRelease => {
                if let Some(key) = event.key() {
                    self.handler.on_key(ctx, key);
                }
            }
            EventType::TextInput => {
                if let Some(text) = event.text() {
                    self.handler.on_text(ctx, text);
                }
            }
            EventType::MouseMove => {
                if let Some(motion) = event.get::<MouseMoveEvent>() {
                    self.handler.on_mouse_move(ctx, motion.x, motion.y);
                }
            }
            EventType::MouseButtonPress
            | EventType::MouseDoubleClick
            | EventType::MouseButtonRelease => {
                if let Some(button) = event.mouse_button() {
                    let pressed = button.state.is_pressed();
                    self.handler.on_mouse_button(ctx, button.button, pressed);
                }
            }
            EventType::MouseWheel => {
                if let Some(wheel) = event.get::<MouseWheelEvent>() {
                    self.handler.on_mouse_scroll(ctx, wheel.dx, wheel.dy);
                }
            }
            EventType::DropFile => {
                if let Some(drop) = event.get::<DropFileEvent>() {
                    self.handler.on_file_dropped(ctx, drop.path.as_str());
                }
            }
            EventType::WindowResize => self.handler.on_resize(ctx),
            EventType::WindowDpiChange => {
                if let Some(dpi) = event.get::<WindowDpiEvent>() {
                    ctx.scale_factor = dpi.scale_factor;
                }
            }
            EventType::WindowClose => {
                if self.handler.on_close_requested(ctx) {
                    return event.window();
                }
                log::info!("Close request cancelled by handler");
            }
            EventType::WindowDestroy if event.window() == Some(ctx.window) => {
                ctx.request_exit();
            }
            EventType::Quit => ctx.request_exit(),
            _ => {}
        }
        None
    }

    /// Advance timing and run [`AppHandler::on_update`].
    ///
    /// Returns `false` once the application should stop: the handler
    /// returned `false`, requested exit, or `max_frames` were processed.
    pub fn update(&mut self) -> bool {
        let ctx = &mut self.context;
        ctx.tick();
        if !self.handler.on_update(ctx) {
            ctx.request_exit();
        }
        ctx.frame_number += 1;

        if let Some(max_frames) = self.args.max_frames()
            && ctx.frame_number >= max_frames
        {
            log::info!("Reached max frames limit ({}), exiting", max_frames);
            ctx.request_exit();
        }
        !ctx.exit_requested
    }

    /// Call [`AppHandler::on_shutdown`].
    pub fn shutdown(&mut self) {
        self.handler.on_shutdown(&mut self.context);
        log::info!(
            "Application exited after {} frames ({:.2}s)",
            self.context.frame_number,
            self.context.elapsed_time
        );
    }
}

#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
mod desktop {
    use std::time::{Duration, Instant};

    use nk_platform::{EventSource, SourceConfig, WinitSource};

    use super::*;
    use crate::dispatcher::{SharedSource, share};

    impl<H, A> App<H, A>
    where
        H: AppHandler,
        A: AppArgs,
    {
        /// Run the application with the given handler and arguments.
        ///
        /// Creates the winit event loop and the main window, then runs the
        /// frame loop until the handler or the window system ends it.
        ///
        /// # Panics
        ///
        /// Panics if the event loop cannot be created.
        pub fn run(handler: H, args: A) {
            // Initialize logging
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(args.log_level()),
            )
            .init();

            nk_core::init();
            nk_platform::init();
            crate::init();

            let config = SourceConfig::default().with_raw_mouse(args.raw_mouse());
            let mut source = WinitSource::new(config).expect("Failed to create event loop");
            let window = source.request_window(
                args.window_title(),
                args.window_width(),
                args.window_height(),
            );
            let source = share(source);
            let shared: SharedSource = source.clone();

            let mut dispatcher = EventDispatcher::new();
            dispatcher.attach(&shared);

            let frame_budget = args
                .target_fps()
                .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));
            let mut app = Self::new(handler, args, window);
            app.init();

            loop {
                let frame_start = Instant::now();
                dispatcher.poll_events();

                if let Some(error) = source.borrow_mut().take_error() {
                    log::error!("{error}");
                    break;
                }

                for owner in app.process_events(&mut dispatcher) {
                    if let Err(error) = source.borrow_mut().close_window(owner) {
                        log::warn!("{error}");
                    }
                    if owner == window {
                        app.context.request_exit();
                    }
                }

                if !app.update() || source.borrow().has_exited() {
                    break;
                }

                if let Some(budget) = frame_budget {
                    let elapsed = frame_start.elapsed();
                    if elapsed < budget {
                        std::thread::sleep(budget - elapsed);
                    }
                }
            }

            app.shutdown();
            let native = source.borrow().native_handle(window);
            if let Some(native) = native {
                source.borrow_mut().shutdown(native);
            }
            dispatcher.detach(&shared);
        }
    }
}
