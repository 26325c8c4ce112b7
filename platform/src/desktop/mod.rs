//! Desktop event source backed by winit.
//!
//! [`WinitSource`] owns a winit [`EventLoop`] and pumps it with a zero
//! timeout, so [`EventSource::poll_events`] never blocks. Windows are created
//! on request from inside the loop and bound to the source automatically.

mod keymap;

pub use keymap::{fallback_key, native_key, scancode_from_code, scancode_from_physical};

use std::collections::HashMap;
use std::time::Duration;

use nk_core::event::{
    ButtonState, DropFileEvent, DropHoverEvent, DropPhase, GestureEvent, GestureKind, KeyEvent,
    MouseButton, MouseButtonEvent, MouseCrossingEvent, MouseMoveEvent, MouseRawEvent,
    MouseWheelEvent, Position, Size, SystemAction, TextInputEvent, Theme, TouchEvent, TouchPhase,
    TouchPoint, WindowAction, WindowDpiEvent, WindowMoveEvent, WindowResizeEvent,
    WindowThemeEvent,
};
use nk_core::keyboard::{Key, Scancode, resolve_key};
use nk_core::text::FixedStr;
use nk_core::{Event, Modifiers, NativeHandle, Timestamp, WindowId};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, Ime, MouseScrollDelta, StartCause};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key as LogicalKey, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
#[cfg(target_os = "windows")]
use winit::platform::windows::EventLoopBuilderExtWindows;
use winit::window::Window;

use crate::click::ClickTracker;
use crate::config::SourceConfig;
use crate::error::{PlatformError, PlatformResult};
use crate::source::{EventSource, SourceState};

/// A window waiting to be created on the next pump.
#[derive(Debug, Clone)]
struct WindowRequest {
    owner: WindowId,
    title: String,
    width: u32,
    height: u32,
}

#[derive(Debug, Default)]
struct WindowTrack {
    size: Size,
    position: Position,
    scale_factor: Option<f64>,
    cursor: (f32, f32),
    minimized: bool,
    hovered_files: u16,
    dropped_files: u16,
}

fn native_of(id: winit::window::WindowId) -> NativeHandle {
    NativeHandle(u64::from(id))
}

/// The part of the source winit calls back into while pumping.
struct Pump {
    state: SourceState,
    windows: HashMap<NativeHandle, Window>,
    tracks: HashMap<NativeHandle, WindowTrack>,
    requests: Vec<WindowRequest>,
    modifiers: Modifiers,
    clicks: ClickTracker,
    focused: Option<NativeHandle>,
    resumed_once: bool,
    exited: bool,
    error: Option<PlatformError>,
}

impl Pump {
    fn new(config: SourceConfig) -> Self {
        Self {
            state: SourceState::new(config),
            windows: HashMap::new(),
            tracks: HashMap::new(),
            requests: Vec::new(),
            modifiers: Modifiers::NONE,
            clicks: ClickTracker::default(),
            focused: None,
            resumed_once: false,
            exited: false,
            error: None,
        }
    }

    fn emit(&mut self, native: NativeHandle, event: Event) {
        self.state.emit(Some(native), event);
    }

    fn track(&mut self, native: NativeHandle) -> &mut WindowTrack {
        self.tracks.entry(native).or_default()
    }

    fn create_requested(&mut self, event_loop: &ActiveEventLoop) {
        for request in std::mem::take(&mut self.requests) {
            let attributes = Window::default_attributes()
                .with_title(request.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(request.width, request.height));
            match event_loop.create_window(attributes) {
                Ok(window) => {
                    let native = native_of(window.id());
                    let size = window.inner_size();
                    log::info!(
                        "Window created for {} ({}x{} physical)",
                        request.owner,
                        size.width,
                        size.height
                    );
                    let track = self.track(native);
                    track.size = Size::new(size.width, size.height);
                    track.scale_factor = Some(window.scale_factor());
                    self.windows.insert(native, window);
                    self.state.bind(request.owner, native);
                    self.emit(native, Event::window_action(WindowAction::Create));
                }
                Err(e) => {
                    log::error!("Failed to create window for {}: {}", request.owner, e);
                    self.error = Some(PlatformError::WindowCreation(e.to_string()));
                }
            }
        }
    }

    fn release_modifiers(&mut self) {
        self.modifiers = Modifiers {
            caps_lock: self.modifiers.caps_lock,
            num_lock: self.modifiers.num_lock,
            scroll_lock: self.modifiers.scroll_lock,
            ..Modifiers::NONE
        };
    }

    fn key(&mut self, native: NativeHandle, event: winit::event::KeyEvent) {
        let pressed = event.state == ElementState::Pressed;
        if event.logical_key == LogicalKey::Named(NamedKey::AltGraph) && !event.repeat {
            self.modifiers.alt_graph = pressed;
        }

        let scancode = scancode_from_physical(event.physical_key);
        let key = resolve_key(scancode, || fallback_key(event.physical_key));
        if key == Key::Unknown && scancode == Scancode::Unknown {
            log::trace!("Dropped unmapped key {:?}", event.physical_key);
            return;
        }
        let repeat = pressed && event.repeat;
        if !repeat && key.is_lock() {
            self.modifiers = self.modifiers.with_key(key, pressed);
        }

        let payload = KeyEvent {
            key,
            scancode,
            native: native_key(event.physical_key),
            state: ButtonState::from_pressed(pressed),
            repeat,
            modifiers: self.modifiers,
        };
        self.emit(native, Event::new(payload));

        if !pressed || self.modifiers.suppresses_text() {
            return;
        }
        if let Some(text) = &event.text {
            self.text(native, text);
        }
    }

    fn text(&mut self, native: NativeHandle, text: &str) {
        for payload in text.chars().filter_map(TextInputEvent::new) {
            self.emit(native, Event::new(payload));
        }
    }

    fn mouse_button(&mut self, native: NativeHandle, state: ElementState, button: winit::event::MouseButton) {
        let button = match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Back => MouseButton::X1,
            winit::event::MouseButton::Forward => MouseButton::X2,
            winit::event::MouseButton::Other(n) => MouseButton::Other(n.min(u8::MAX as u16) as u8),
        };
        let (x, y) = self.track(native).cursor;
        let state = ButtonState::from_pressed(state == ElementState::Pressed);
        let mut payload =
            MouseButtonEvent::new(button, state, x, y).with_modifiers(self.modifiers);
        if state.is_pressed() {
            let config = *self.state.config();
            let clicks = self.clicks.press(button, x, y, Timestamp::now(), &config);
            payload = payload.with_clicks(clicks);
        }
        self.emit(native, Event::new(payload));
    }

    fn resized(&mut self, native: NativeHandle, width: u32, height: u32) {
        let minimized = self
            .windows
            .get(&native)
            .and_then(Window::is_minimized)
            .unwrap_or(width == 0 && height == 0);
        let track = self.track(native);
        let was_minimized = std::mem::replace(&mut track.minimized, minimized);
        if minimized {
            // Minimized windows report 0x0; keep the last real size
            if !was_minimized {
                self.emit(native, Event::window_action(WindowAction::Minimize));
            }
            return;
        }
        let size = Size::new(width, height);
        let previous = std::mem::replace(&mut track.size, size);
        if was_minimized {
            self.emit(native, Event::window_action(WindowAction::Restore));
        }
        if previous != size {
            self.emit(native, Event::new(WindowResizeEvent { size, previous }));
        }
    }
}

impl ApplicationHandler for Pump {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if matches!(cause, StartCause::Init) {
            log::debug!("winit event loop started");
        }
        if self.resumed_once {
            self.create_requested(event_loop);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_once {
            self.state.emit(None, Event::system(SystemAction::Resume));
        }
        self.resumed_once = true;
        self.create_requested(event_loop);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.state.emit(None, Event::system(SystemAction::Suspend));
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        use winit::event::WindowEvent as W;

        let native = native_of(window_id);
        match event {
            W::Resized(size) => self.resized(native, size.width, size.height),
            W::Moved(position) => {
                let position = Position::new(position.x, position.y);
                let previous = std::mem::replace(&mut self.track(native).position, position);
                if previous != position {
                    self.emit(native, Event::new(WindowMoveEvent { position, previous }));
                }
            }
            W::CloseRequested => {
                log::info!("Close requested for {native}");
                self.emit(native, Event::window_action(WindowAction::Close));
            }
            W::Destroyed => {
                self.tracks.remove(&native);
                self.emit(native, Event::window_action(WindowAction::Destroy));
            }
            W::Focused(true) => {
                self.focused = Some(native);
                self.emit(native, Event::window_action(WindowAction::FocusGained));
            }
            W::Focused(false) => {
                if self.focused == Some(native) {
                    self.focused = None;
                }
                self.release_modifiers();
                self.clicks.reset();
                self.emit(native, Event::window_action(WindowAction::FocusLost));
            }
            W::KeyboardInput { event, .. } => self.key(native, event),
            W::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers.shift = state.shift_key();
                self.modifiers.ctrl = state.control_key();
                self.modifiers.alt = state.alt_key();
                self.modifiers.super_key = state.super_key();
            }
            W::Ime(Ime::Commit(text)) => self.text(native, &text),
            W::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                let (px, py) = std::mem::replace(&mut self.track(native).cursor, (x, y));
                let payload = MouseMoveEvent {
                    x,
                    y,
                    dx: x - px,
                    dy: y - py,
                    modifiers: self.modifiers,
                };
                self.emit(native, Event::new(payload));
            }
            W::CursorEntered { .. } => {
                let (x, y) = self.track(native).cursor;
                self.emit(native, Event::new(MouseCrossingEvent { entered: true, x, y }));
            }
            W::CursorLeft { .. } => {
                let (x, y) = self.track(native).cursor;
                self.emit(native, Event::new(MouseCrossingEvent { entered: false, x, y }));
            }
            W::MouseWheel { delta, .. } => {
                let (dx, dy, precise) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y, false),
                    MouseScrollDelta::PixelDelta(pos) => {
                        let line = self.state.config().wheel_line_height as f64;
                        ((pos.x / line) as f32, (pos.y / line) as f32, true)
                    }
                };
                let (x, y) = self.track(native).cursor;
                let payload = MouseWheelEvent {
                    dx,
                    dy,
                    x,
                    y,
                    precise,
                    modifiers: self.modifiers,
                };
                self.emit(native, Event::new(payload));
            }
            W::MouseInput { state, button, .. } => self.mouse_button(native, state, button),
            W::PinchGesture { delta, .. } => {
                let (x, y) = self.track(native).cursor;
                let payload = GestureEvent {
                    magnification: delta as f32,
                    ..GestureEvent::new(GestureKind::Pinch, x, y)
                };
                self.emit(native, Event::new(payload));
            }
            W::RotationGesture { delta, .. } => {
                let (x, y) = self.track(native).cursor;
                let payload = GestureEvent {
                    rotation: delta,
                    ..GestureEvent::new(GestureKind::Rotate, x, y)
                };
                self.emit(native, Event::new(payload));
            }
            W::Touch(touch) => {
                let phase = match touch.phase {
                    winit::event::TouchPhase::Started => TouchPhase::Begin,
                    winit::event::TouchPhase::Moved => TouchPhase::Move,
                    winit::event::TouchPhase::Ended => TouchPhase::End,
                    winit::event::TouchPhase::Cancelled => TouchPhase::Cancel,
                };
                let mut payload = TouchEvent::new(phase);
                payload.push(TouchPoint {
                    id: touch.id,
                    x: touch.location.x as f32,
                    y: touch.location.y as f32,
                    pressure: touch.force.map_or(1.0, |f| f.normalized() as f32),
                });
                self.emit(native, Event::new(payload));
            }
            W::HoveredFile(_) => {
                let track = self.track(native);
                track.hovered_files = track.hovered_files.saturating_add(1);
                track.dropped_files = 0;
                let (x, y) = track.cursor;
                if track.hovered_files == 1 {
                    let payload = DropHoverEvent {
                        phase: DropPhase::Enter,
                        x,
                        y,
                    };
                    self.emit(native, Event::new(payload));
                }
            }
            W::HoveredFileCancelled => {
                let track = self.track(native);
                track.hovered_files = 0;
                let payload = DropHoverEvent {
                    phase: DropPhase::Leave,
                    x: 0.0,
                    y: 0.0,
                };
                self.emit(native, Event::new(payload));
            }
            W::DroppedFile(path) => {
                let track = self.track(native);
                let index = track.dropped_files;
                track.dropped_files = index.saturating_add(1);
                let count = track.hovered_files.max(track.dropped_files);
                let (x, y) = track.cursor;
                if track.dropped_files >= track.hovered_files {
                    track.hovered_files = 0;
                }
                let payload = DropFileEvent {
                    path: FixedStr::new(&path.to_string_lossy()),
                    index,
                    count,
                    x,
                    y,
                };
                self.emit(native, Event::new(payload));
            }
            W::ScaleFactorChanged { scale_factor, .. } => {
                let previous = self
                    .track(native)
                    .scale_factor
                    .replace(scale_factor)
                    .unwrap_or(1.0);
                log::info!("Scale factor changed to {}", scale_factor);
                let payload = WindowDpiEvent {
                    scale_factor,
                    previous,
                    suggested_size: None,
                };
                self.emit(native, Event::new(payload));
            }
            W::ThemeChanged(theme) => {
                let theme = match theme {
                    winit::window::Theme::Light => Theme::Light,
                    winit::window::Theme::Dark => Theme::Dark,
                };
                self.emit(native, Event::new(WindowThemeEvent { theme }));
            }
            W::Occluded(occluded) => {
                let action = if occluded {
                    WindowAction::Hide
                } else {
                    WindowAction::Show
                };
                self.emit(native, Event::window_action(action));
            }
            W::RedrawRequested => self.emit(native, Event::window_action(WindowAction::Paint)),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event
            && self.state.config().raw_mouse
            && let Some(native) = self.focused.or_else(|| self.state.primary())
        {
            let payload = MouseRawEvent {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            };
            self.emit(native, Event::new(payload));
        }
    }

    fn memory_warning(&mut self, _event_loop: &ActiveEventLoop) {
        self.state.emit(None, Event::system(SystemAction::LowMemory));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.exited = true;
        self.state.emit(None, Event::system(SystemAction::Quit));
    }
}

/// Event source driving a winit event loop on the calling thread.
pub struct WinitSource {
    event_loop: EventLoop<()>,
    pump: Pump,
    next_window: u64,
}

impl WinitSource {
    /// Create the event loop. Must be called on the main thread on most
    /// platforms.
    pub fn new(config: SourceConfig) -> PlatformResult<Self> {
        #[cfg(target_os = "windows")]
        let event_loop = EventLoop::builder().with_any_thread(true).build();

        #[cfg(not(target_os = "windows"))]
        let event_loop = EventLoop::new();

        let event_loop =
            event_loop.map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
        Ok(Self {
            event_loop,
            pump: Pump::new(config),
            next_window: 1,
        })
    }

    /// Queue a window to be created on the next pump and return its id.
    ///
    /// The window is bound to this source once it exists; a
    /// `WindowCreate` event announces it.
    pub fn request_window(&mut self, title: &str, width: u32, height: u32) -> WindowId {
        let owner = WindowId(self.next_window);
        self.next_window += 1;
        self.pump.requests.push(WindowRequest {
            owner,
            title: title.to_string(),
            width,
            height,
        });
        log::debug!("Requested window {owner} ({width}x{height})");
        owner
    }

    /// Destroy the window owned by `owner`.
    pub fn close_window(&mut self, owner: WindowId) -> PlatformResult<()> {
        let native = self
            .native_handle(owner)
            .ok_or(PlatformError::UnknownWindow(owner))?;
        self.shutdown(native);
        Ok(())
    }

    /// Native handle of the window owned by `owner`, once it exists.
    pub fn native_handle(&self, owner: WindowId) -> Option<NativeHandle> {
        self.pump
            .state
            .handles()
            .find(|&native| self.pump.state.owner(native) == Some(owner))
    }

    /// Ask every window to redraw on the next pump.
    pub fn request_redraw(&self) {
        for window in self.pump.windows.values() {
            window.request_redraw();
        }
    }

    /// The last window creation failure, if any.
    pub fn take_error(&mut self) -> Option<PlatformError> {
        self.pump.error.take()
    }

    pub fn has_exited(&self) -> bool {
        self.pump.exited
    }
}

impl EventSource for WinitSource {
    fn name(&self) -> &'static str {
        "winit"
    }

    fn state(&self) -> &SourceState {
        &self.pump.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.pump.state
    }

    fn pump(&mut self) {
        if self.pump.exited {
            return;
        }
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.pump);
        if let PumpStatus::Exit(code) = status {
            log::info!("winit event loop exited with code {code}");
            self.pump.exited = true;
        }
    }

    /// Windows requested but not created yet keep the source busy.
    fn is_idle(&self) -> bool {
        self.pump.state.is_idle() && self.pump.requests.is_empty()
    }

    fn shutdown(&mut self, native: NativeHandle) {
        if self.pump.windows.remove(&native).is_some() {
            log::debug!("Destroyed window {native}");
        }
        self.pump.tracks.remove(&native);
        if self.pump.focused == Some(native) {
            self.pump.focused = None;
        }
        self.pump.state.unbind(native);
    }
}
