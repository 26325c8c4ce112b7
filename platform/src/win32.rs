//! Win32 window message translation.
//!
//! The window procedure (or a message hook) forwards each message it sees
//! as a [`Win32Message`] into the source's [`NativeQueue`]. Nothing here
//! calls into user32; everything needed is decoded from `wParam`/`lParam`.

use std::collections::HashMap;

use nk_core::event::{
    ButtonState, KeyEvent, MouseButton, MouseButtonEvent, MouseCrossingEvent, MouseMoveEvent,
    MouseRawEvent, MouseWheelEvent, Position, PowerEvent, Size, SystemAction, TextInputEvent,
    WindowAction, WindowDpiEvent, WindowMoveEvent, WindowResizeEvent,
};
use nk_core::keyboard::native::win32;
use nk_core::keyboard::{Key, NativeKey, Scancode, resolve_key};
use nk_core::{Event, ModifierKeys, Modifiers, NativeHandle, Timestamp};

use crate::config::SourceConfig;
use crate::queue::NativeQueue;
use crate::source::{EventSource, SourceState};

/// Window message identifiers.
pub mod wm {
    pub const CREATE: u32 = 0x0001;
    pub const DESTROY: u32 = 0x0002;
    pub const MOVE: u32 = 0x0003;
    pub const SIZE: u32 = 0x0005;
    pub const SETFOCUS: u32 = 0x0007;
    pub const KILLFOCUS: u32 = 0x0008;
    pub const PAINT: u32 = 0x000F;
    pub const CLOSE: u32 = 0x0010;
    pub const QUIT: u32 = 0x0012;
    pub const SHOWWINDOW: u32 = 0x0018;
    pub const DISPLAYCHANGE: u32 = 0x007E;
    pub const INPUT: u32 = 0x00FF;
    pub const KEYDOWN: u32 = 0x0100;
    pub const KEYUP: u32 = 0x0101;
    pub const CHAR: u32 = 0x0102;
    pub const SYSKEYDOWN: u32 = 0x0104;
    pub const SYSKEYUP: u32 = 0x0105;
    pub const SYSCHAR: u32 = 0x0106;
    pub const MOUSEMOVE: u32 = 0x0200;
    pub const LBUTTONDOWN: u32 = 0x0201;
    pub const LBUTTONUP: u32 = 0x0202;
    pub const LBUTTONDBLCLK: u32 = 0x0203;
    pub const RBUTTONDOWN: u32 = 0x0204;
    pub const RBUTTONUP: u32 = 0x0205;
    pub const RBUTTONDBLCLK: u32 = 0x0206;
    pub const MBUTTONDOWN: u32 = 0x0207;
    pub const MBUTTONUP: u32 = 0x0208;
    pub const MBUTTONDBLCLK: u32 = 0x0209;
    pub const MOUSEWHEEL: u32 = 0x020A;
    pub const XBUTTONDOWN: u32 = 0x020B;
    pub const XBUTTONUP: u32 = 0x020C;
    pub const XBUTTONDBLCLK: u32 = 0x020D;
    pub const MOUSEHWHEEL: u32 = 0x020E;
    pub const POWERBROADCAST: u32 = 0x0218;
    pub const MOUSELEAVE: u32 = 0x02A3;
    pub const DPICHANGED: u32 = 0x02E0;
}

const MK_SHIFT: usize = 0x0004;
const MK_CONTROL: usize = 0x0008;
const XBUTTON1: usize = 0x0001;
const WHEEL_DELTA: f32 = 120.0;
const USER_DEFAULT_SCREEN_DPI: f64 = 96.0;

const SIZE_RESTORED: usize = 0;
const SIZE_MINIMIZED: usize = 1;
const SIZE_MAXIMIZED: usize = 2;

const PBT_APMSUSPEND: usize = 0x0004;
const PBT_APMRESUMESUSPEND: usize = 0x0007;
const PBT_APMPOWERSTATUSCHANGE: usize = 0x000A;
const PBT_APMRESUMEAUTOMATIC: usize = 0x0012;

/// Relative motion the window layer read out of a `RAWINPUT` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMouse {
    pub dx: i32,
    pub dy: i32,
}

/// One window message as delivered to the window procedure.
#[derive(Debug, Clone, Copy)]
pub struct Win32Message {
    pub hwnd: NativeHandle,
    pub msg: u32,
    pub wparam: usize,
    pub lparam: isize,
    /// `GetMessageTime()` in milliseconds, or 0 if unknown.
    pub time: u32,
    /// Decoded payload for `WM_INPUT` mouse reports.
    pub raw: Option<RawMouse>,
}

impl Win32Message {
    pub fn new(hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            hwnd,
            msg,
            wparam,
            lparam,
            time: 0,
            raw: None,
        }
    }

    pub fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    pub fn raw_mouse(hwnd: NativeHandle, dx: i32, dy: i32) -> Self {
        Self {
            raw: Some(RawMouse { dx, dy }),
            ..Self::new(hwnd, wm::INPUT, 0, 0)
        }
    }

    /// Pack a client-area point the way mouse messages carry it.
    pub fn point_lparam(x: i16, y: i16) -> isize {
        ((x as u16 as u32) | ((y as u16 as u32) << 16)) as i32 as isize
    }

    /// Build the `lParam` of a key message.
    pub fn key_lparam(scan: u16, extended: bool, was_down: bool, releasing: bool) -> isize {
        let mut value: u32 = 1 | ((scan as u32 & 0xFF) << 16);
        if extended {
            value |= 1 << 24;
        }
        if was_down {
            value |= 1 << 30;
        }
        if releasing {
            value |= 1 << 31;
        }
        value as i32 as isize
    }

    fn low_word(&self) -> u16 {
        (self.lparam as usize & 0xFFFF) as u16
    }

    fn high_word(&self) -> u16 {
        ((self.lparam as usize >> 16) & 0xFFFF) as u16
    }

    fn point(&self) -> (f32, f32) {
        (self.low_word() as i16 as f32, self.high_word() as i16 as f32)
    }

    fn timestamp(&self) -> Timestamp {
        if self.time == 0 {
            Timestamp::now()
        } else {
            Timestamp::from_millis(self.time as u64)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Placement {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Default)]
struct WindowTrack {
    size: Size,
    position: Position,
    placement: Placement,
    scale_factor: Option<f64>,
    cursor: Option<(f32, f32)>,
    inside: bool,
}

/// Event source for Win32 window messages.
pub struct Win32Source {
    state: SourceState,
    queue: NativeQueue<Win32Message>,
    modifiers: Modifiers,
    held: ModifierKeys,
    high_surrogate: Option<u16>,
    windows: HashMap<NativeHandle, WindowTrack>,
}

impl Win32Source {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            state: SourceState::new(config),
            queue: NativeQueue::new(),
            modifiers: Modifiers::NONE,
            held: ModifierKeys::empty(),
            high_surrogate: None,
            windows: HashMap::new(),
        }
    }

    /// Queue the window procedure pushes into.
    pub fn queue(&self) -> NativeQueue<Win32Message> {
        self.queue.clone()
    }

    pub fn post(&self, message: Win32Message) {
        self.queue.push(message);
    }

    fn emit(&mut self, m: &Win32Message, event: Event) {
        self.state
            .emit(Some(m.hwnd), event.with_timestamp(m.timestamp()));
    }

    fn track(&mut self, hwnd: NativeHandle) -> &mut WindowTrack {
        self.windows.entry(hwnd).or_default()
    }

    fn translate(&mut self, m: Win32Message) {
        match m.msg {
            wm::KEYDOWN | wm::SYSKEYDOWN => self.key(&m, true),
            wm::KEYUP | wm::SYSKEYUP => self.key(&m, false),
            wm::CHAR => self.character(&m),
            wm::SYSCHAR => {}
            wm::LBUTTONDOWN => self.button(&m, MouseButton::Left, ButtonState::Pressed, 1),
            wm::LBUTTONUP => self.button(&m, MouseButton::Left, ButtonState::Released, 0),
            wm::LBUTTONDBLCLK => self.button(&m, MouseButton::Left, ButtonState::Pressed, 2),
            wm::RBUTTONDOWN => self.button(&m, MouseButton::Right, ButtonState::Pressed, 1),
            wm::RBUTTONUP => self.button(&m, MouseButton::Right, ButtonState::Released, 0),
            wm::RBUTTONDBLCLK => self.button(&m, MouseButton::Right, ButtonState::Pressed, 2),
            wm::MBUTTONDOWN => self.button(&m, MouseButton::Middle, ButtonState::Pressed, 1),
            wm::MBUTTONUP => self.button(&m, MouseButton::Middle, ButtonState::Released, 0),
            wm::MBUTTONDBLCLK => self.button(&m, MouseButton::Middle, ButtonState::Pressed, 2),
            wm::XBUTTONDOWN | wm::XBUTTONUP | wm::XBUTTONDBLCLK => {
                let button = if (m.wparam >> 16) & 0xFFFF == XBUTTON1 {
                    MouseButton::X1
                } else {
                    MouseButton::X2
                };
                let (state, clicks) = match m.msg {
                    wm::XBUTTONDOWN => (ButtonState::Pressed, 1),
                    wm::XBUTTONUP => (ButtonState::Released, 0),
                    _ => (ButtonState::Pressed, 2),
                };
                self.button(&m, button, state, clicks);
            }
            wm::MOUSEMOVE => self.mouse_move(&m),
            wm::MOUSELEAVE => {
                let track = self.track(m.hwnd);
                track.inside = false;
                let (x, y) = track.cursor.unwrap_or_default();
                self.emit(&m, Event::new(MouseCrossingEvent { entered: false, x, y }));
            }
            wm::MOUSEWHEEL | wm::MOUSEHWHEEL => self.wheel(&m),
            wm::INPUT => {
                if let Some(raw) = m.raw.filter(|_| self.state.config().raw_mouse) {
                    let event = MouseRawEvent {
                        dx: raw.dx as f32,
                        dy: raw.dy as f32,
                    };
                    self.emit(&m, Event::new(event));
                }
            }
            wm::SIZE => self.size(&m),
            wm::MOVE => {
                let position = Position::new(m.low_word() as i16 as i32, m.high_word() as i16 as i32);
                let track = self.track(m.hwnd);
                let previous = std::mem::replace(&mut track.position, position);
                if previous != position {
                    self.emit(&m, Event::new(WindowMoveEvent { position, previous }));
                }
            }
            wm::SETFOCUS => self.emit(&m, Event::window_action(WindowAction::FocusGained)),
            wm::KILLFOCUS => {
                self.release_modifiers();
                self.emit(&m, Event::window_action(WindowAction::FocusLost));
            }
            wm::CREATE => self.emit(&m, Event::window_action(WindowAction::Create)),
            wm::CLOSE => self.emit(&m, Event::window_action(WindowAction::Close)),
            wm::DESTROY => {
                self.windows.remove(&m.hwnd);
                self.emit(&m, Event::window_action(WindowAction::Destroy));
            }
            wm::PAINT => self.emit(&m, Event::window_action(WindowAction::Paint)),
            wm::SHOWWINDOW => {
                let action = if m.wparam != 0 {
                    WindowAction::Show
                } else {
                    WindowAction::Hide
                };
                self.emit(&m, Event::window_action(action));
            }
            wm::DPICHANGED => {
                let scale_factor = (m.wparam & 0xFFFF) as f64 / USER_DEFAULT_SCREEN_DPI;
                let track = self.track(m.hwnd);
                let previous = track.scale_factor.replace(scale_factor).unwrap_or(1.0);
                let event = WindowDpiEvent {
                    scale_factor,
                    previous,
                    suggested_size: None,
                };
                self.emit(&m, Event::new(event));
            }
            wm::DISPLAYCHANGE => self.emit(&m, Event::system(SystemAction::DisplayChange)),
            wm::POWERBROADCAST => match m.wparam {
                PBT_APMSUSPEND => self.emit(&m, Event::system(SystemAction::Suspend)),
                PBT_APMRESUMESUSPEND | PBT_APMRESUMEAUTOMATIC => {
                    self.emit(&m, Event::system(SystemAction::Resume))
                }
                PBT_APMPOWERSTATUSCHANGE => self.emit(&m, Event::new(PowerEvent::default())),
                _ => {}
            },
            wm::QUIT => {
                let event = Event::system(SystemAction::Quit).with_timestamp(m.timestamp());
                self.state.emit(None, event);
            }
            other => log::trace!("Ignored window message {other:#06x}"),
        }
    }

    fn key(&mut self, m: &Win32Message, pressed: bool) {
        let vk = (m.wparam & 0xFFFF) as u16;
        if vk == win32::VK_PROCESSKEY || vk == win32::VK_PACKET {
            // IME and SendInput text arrive as WM_CHAR
            return;
        }
        let lparam = m.lparam as usize;
        let scan = ((lparam >> 16) & 0xFF) as u16;
        let extended = lparam & (1 << 24) != 0;
        let repeat = pressed && lparam & (1 << 30) != 0;

        let scancode = win32::scancode_from_key_message(vk, scan, extended);
        let key = resolve_key(scancode, || win32::key_from_virtual_key(vk));
        if key == Key::Unknown && scancode == Scancode::Unknown {
            log::trace!("Dropped unmapped virtual key {vk:#04x} (scan {scan:#04x})");
            return;
        }

        if !repeat {
            self.modifiers = self.held.fold(self.modifiers, key, pressed);
            if key == Key::AltRight {
                // Windows reports AltGr as LeftCtrl + RightAlt
                self.modifiers.alt_graph = pressed && self.modifiers.ctrl;
            }
        }

        let event = KeyEvent {
            key,
            scancode,
            native: NativeKey::Win32 { vk, scan, extended },
            state: ButtonState::from_pressed(pressed),
            repeat,
            modifiers: self.modifiers,
        };
        self.emit(m, Event::new(event));
    }

    fn character(&mut self, m: &Win32Message) {
        let unit = (m.wparam & 0xFFFF) as u16;
        let ch = match unit {
            0xD800..=0xDBFF => {
                self.high_surrogate = Some(unit);
                return;
            }
            0xDC00..=0xDFFF => {
                let Some(high) = self.high_surrogate.take() else {
                    log::trace!("Dropped unpaired low surrogate {unit:#06x}");
                    return;
                };
                char::decode_utf16([high, unit]).next().and_then(Result::ok)
            }
            _ => {
                self.high_surrogate = None;
                char::from_u32(unit as u32)
            }
        };
        if let Some(text) = ch.and_then(TextInputEvent::new) {
            self.emit(m, Event::new(text));
        }
    }

    fn mouse_modifiers(&self, wparam: usize) -> Modifiers {
        Modifiers {
            ctrl: wparam & MK_CONTROL != 0,
            shift: wparam & MK_SHIFT != 0,
            ..self.modifiers
        }
    }

    fn button(&mut self, m: &Win32Message, button: MouseButton, state: ButtonState, clicks: u8) {
        let (x, y) = m.point();
        let event = MouseButtonEvent::new(button, state, x, y)
            .with_clicks(clicks)
            .with_modifiers(self.mouse_modifiers(m.wparam));
        self.emit(m, Event::new(event));
    }

    fn mouse_move(&mut self, m: &Win32Message) {
        let (x, y) = m.point();
        let track = self.track(m.hwnd);
        let entered = !std::mem::replace(&mut track.inside, true);
        let (dx, dy) = match track.cursor.replace((x, y)) {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        if entered {
            self.emit(m, Event::new(MouseCrossingEvent { entered: true, x, y }));
        }
        let event = MouseMoveEvent {
            x,
            y,
            dx,
            dy,
            modifiers: self.mouse_modifiers(m.wparam),
        };
        self.emit(m, Event::new(event));
    }

    fn wheel(&mut self, m: &Win32Message) {
        let delta = ((m.wparam >> 16) & 0xFFFF) as u16 as i16 as f32 / WHEEL_DELTA;
        let (dx, dy) = if m.msg == wm::MOUSEHWHEEL {
            (delta, 0.0)
        } else {
            (0.0, delta)
        };
        // Wheel messages carry screen coordinates; report the client cursor.
        let (x, y) = self.track(m.hwnd).cursor.unwrap_or_default();
        let event = MouseWheelEvent {
            dx,
            dy,
            x,
            y,
            precise: delta.fract() != 0.0,
            modifiers: self.mouse_modifiers(m.wparam),
        };
        self.emit(m, Event::new(event));
    }

    fn size(&mut self, m: &Win32Message) {
        let size = Size::new(m.low_word() as u32, m.high_word() as u32);
        let track = self.track(m.hwnd);
        let before = track.placement;
        let placement = match m.wparam {
            SIZE_MINIMIZED => Placement::Minimized,
            SIZE_MAXIMIZED => Placement::Maximized,
            SIZE_RESTORED => Placement::Normal,
            _ => return,
        };
        track.placement = placement;
        if placement == Placement::Minimized {
            // Minimized windows report 0x0; keep the last real size.
            if before != Placement::Minimized {
                self.emit(m, Event::window_action(WindowAction::Minimize));
            }
            return;
        }
        let previous = std::mem::replace(&mut track.size, size);

        match (before, placement) {
            (Placement::Maximized, Placement::Maximized) => {}
            (_, Placement::Maximized) => {
                self.emit(m, Event::window_action(WindowAction::Maximize))
            }
            (Placement::Minimized | Placement::Maximized, Placement::Normal) => {
                self.emit(m, Event::window_action(WindowAction::Restore))
            }
            _ => {}
        }
        if previous != size {
            self.emit(m, Event::new(WindowResizeEvent { size, previous }));
        }
    }

    fn release_modifiers(&mut self) {
        self.held = ModifierKeys::empty();
        self.modifiers = Modifiers {
            caps_lock: self.modifiers.caps_lock,
            num_lock: self.modifiers.num_lock,
            scroll_lock: self.modifiers.scroll_lock,
            ..Modifiers::NONE
        };
    }
}

impl Default for Win32Source {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl EventSource for Win32Source {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.state
    }

    fn pump(&mut self) {
        let max = self.state.config().max_pump_messages;
        for message in self.queue.drain(max) {
            self.translate(message);
        }
    }

    fn shutdown(&mut self, native: NativeHandle) {
        self.windows.remove(&native);
        self.state.unbind(native);
    }
}
