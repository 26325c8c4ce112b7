//! The platform event source contract.
//!
//! A source owns one backend's native message stream. Pumping translates the
//! pending native messages into canonical [`Event`]s; each translated event
//! goes through the same emission path:
//!
//! 1. the owning window id is stamped on the event,
//! 2. the per-window callback for the native handle runs (if any),
//! 3. the source-global callback runs (if any),
//! 4. the event is pushed onto the source FIFO for the dispatcher to drain.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use nk_core::{Event, NativeHandle, WindowId};
use parking_lot::Mutex;

use crate::config::SourceConfig;
use crate::queue::EventSender;

/// Callback invoked synchronously with each translated event.
pub type EventCallback = Box<dyn FnMut(&Event)>;

/// State every backend carries; the provided [`EventSource`] methods work on
/// it so backends only implement translation.
pub struct SourceState {
    queue: VecDeque<Event>,
    /// Bound native handles in binding order. The first one is the primary
    /// window for backends whose messages carry no handle.
    bindings: Vec<(NativeHandle, WindowId)>,
    window_callbacks: HashMap<NativeHandle, EventCallback>,
    event_callback: Option<EventCallback>,
    inbox: Arc<Mutex<VecDeque<Event>>>,
    config: SourceConfig,
}

impl SourceState {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            bindings: Vec::new(),
            window_callbacks: HashMap::new(),
            event_callback: None,
            inbox: Arc::default(),
            config,
        }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Bind `native` to `owner`. Rebinding a handle updates its owner.
    pub fn bind(&mut self, owner: WindowId, native: NativeHandle) {
        if native.is_null() {
            log::debug!("Ignoring bind of null handle for {owner}");
            return;
        }
        match self.bindings.iter_mut().find(|(n, _)| *n == native) {
            Some(binding) => binding.1 = owner,
            None => self.bindings.push((native, owner)),
        }
        log::debug!("Bound native handle {native} to {owner}");
    }

    /// Unbind `native`. Unknown handles are ignored.
    pub fn unbind(&mut self, native: NativeHandle) -> bool {
        let Some(index) = self.bindings.iter().position(|(n, _)| *n == native) else {
            log::debug!("Shutdown of unbound native handle {native} ignored");
            return false;
        };
        let (_, owner) = self.bindings.remove(index);
        self.window_callbacks.remove(&native);
        log::debug!("Unbound native handle {native} from {owner}");
        if self.bindings.is_empty() {
            log::debug!("Source is idle");
        }
        true
    }

    pub fn is_idle(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn is_bound(&self, native: NativeHandle) -> bool {
        self.bindings.iter().any(|(n, _)| *n == native)
    }

    pub fn owner(&self, native: NativeHandle) -> Option<WindowId> {
        self.bindings
            .iter()
            .find(|(n, _)| *n == native)
            .map(|&(_, owner)| owner)
    }

    fn native_of(&self, owner: WindowId) -> Option<NativeHandle> {
        self.bindings
            .iter()
            .find(|(_, o)| *o == owner)
            .map(|&(native, _)| native)
    }

    /// The first bound handle.
    pub fn primary(&self) -> Option<NativeHandle> {
        self.bindings.first().map(|&(native, _)| native)
    }

    pub fn handles(&self) -> impl Iterator<Item = NativeHandle> + '_ {
        self.bindings.iter().map(|&(native, _)| native)
    }

    pub fn set_window_callback(&mut self, native: NativeHandle, callback: Option<EventCallback>) {
        match callback {
            Some(callback) => {
                if self.window_callbacks.insert(native, callback).is_some() {
                    log::debug!("Replaced window callback for {native}");
                }
            }
            None => {
                self.window_callbacks.remove(&native);
            }
        }
    }

    pub fn set_event_callback(&mut self, callback: Option<EventCallback>) {
        if self.event_callback.is_some() && callback.is_some() {
            log::debug!("Replaced source event callback");
        }
        self.event_callback = callback;
    }

    /// Emit a translated event for the window behind `native`.
    ///
    /// Events for handles this source does not own are dropped. `None`
    /// emits a window-less event (system notifications).
    pub fn emit(&mut self, native: Option<NativeHandle>, event: Event) {
        if event.is_none() {
            return;
        }
        let window = match native {
            Some(native) => match self.owner(native) {
                Some(owner) => Some(owner),
                None => {
                    log::trace!("Dropped {} for unbound handle {native}", event.ty());
                    return;
                }
            },
            None => None,
        };
        let event = event.with_window(window);
        if let Some(callback) = native.and_then(|n| self.window_callbacks.get_mut(&n)) {
            callback(&event);
        }
        if let Some(callback) = &mut self.event_callback {
            callback(&event);
        }
        self.queue.push_back(event);
    }

    /// Emit to the primary window.
    pub fn emit_primary(&mut self, event: Event) {
        match self.primary() {
            Some(native) => self.emit(Some(native), event),
            None => log::trace!("Dropped {} with no bound window", event.ty()),
        }
    }

    /// Invoke callbacks without queueing.
    ///
    /// With a handle only that window's callback runs; without one every
    /// window callback runs. The source-global callback always runs last.
    pub fn dispatch(&mut self, event: &Event, native: Option<NativeHandle>) {
        match native {
            Some(native) => {
                if let Some(callback) = self.window_callbacks.get_mut(&native) {
                    callback(event);
                }
            }
            None => {
                for callback in self.window_callbacks.values_mut() {
                    callback(event);
                }
            }
        }
        if let Some(callback) = &mut self.event_callback {
            callback(event);
        }
    }

    /// Deliver events queued through [`EventSender`]s.
    pub fn deliver_sent(&mut self) {
        let pending: Vec<Event> = self.inbox.lock().drain(..).collect();
        for event in pending {
            let native = event.window().and_then(|owner| self.native_of(owner));
            match native {
                Some(native) => self.emit(Some(native), event),
                None => self.emit(None, event),
            }
        }
    }

    /// Drop events queued through [`EventSender`]s without delivering them.
    pub fn discard_sent(&mut self) {
        let dropped = {
            let mut inbox = self.inbox.lock();
            let dropped = inbox.len();
            inbox.clear();
            dropped
        };
        if dropped > 0 {
            log::trace!("Discarded {dropped} sent events on an idle source");
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender::new(Arc::clone(&self.inbox))
    }

    pub fn front(&self) -> Option<&Event> {
        self.queue.front()
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for SourceState {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

/// One backend's adapter between native messages and canonical events.
///
/// Backends implement [`state`](Self::state), [`state_mut`](Self::state_mut)
/// and [`pump`](Self::pump); every other method has a shared implementation.
pub trait EventSource {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    fn state(&self) -> &SourceState;

    fn state_mut(&mut self) -> &mut SourceState;

    /// Translate the native messages pending right now. Must not block.
    fn pump(&mut self);

    /// Bind a native window handle to `owner`. Safe to call once per window
    /// for windows sharing this source.
    fn initialize(&mut self, owner: WindowId, native: NativeHandle) {
        self.state_mut().bind(owner, native);
    }

    /// Unbind a native handle. Unknown handles are a no-op.
    fn shutdown(&mut self, native: NativeHandle) {
        self.state_mut().unbind(native);
    }

    /// An idle source has no bound windows; pumping it does nothing.
    fn is_idle(&self) -> bool {
        self.state().is_idle()
    }

    /// Pump native input and events handed over by [`EventSender`]s.
    ///
    /// An idle source translates nothing; events sent to it are discarded.
    fn poll_events(&mut self) {
        if self.is_idle() {
            self.state_mut().discard_sent();
            return;
        }
        self.pump();
        self.state_mut().deliver_sent();
    }

    fn front(&self) -> Option<&Event> {
        self.state().front()
    }

    fn pop(&mut self) -> Option<Event> {
        self.state_mut().pop()
    }

    fn is_empty(&self) -> bool {
        self.state().is_empty()
    }

    fn len(&self) -> usize {
        self.state().len()
    }

    /// Register (or clear with `None`) the callback for one window.
    fn set_window_callback(&mut self, native: NativeHandle, callback: Option<EventCallback>) {
        self.state_mut().set_window_callback(native, callback);
    }

    /// Register (or clear with `None`) the source-global callback.
    fn set_event_callback(&mut self, callback: Option<EventCallback>) {
        self.state_mut().set_event_callback(callback);
    }

    /// Invoke callbacks for `event` immediately, bypassing the FIFO.
    fn dispatch_event(&mut self, event: &Event, native: Option<NativeHandle>) {
        self.state_mut().dispatch(event, native);
    }

    /// Handle for other threads to hand events to this source.
    fn sender(&self) -> EventSender {
        self.state().sender()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use nk_core::event::{SystemAction, WindowAction};
    use nk_core::EventType;

    use super::*;

    fn log_into(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> EventCallback {
        let log = Rc::clone(log);
        Box::new(move |event: &Event| log.borrow_mut().push(format!("{tag}:{}", event.ty())))
    }

    #[test]
    fn emit_runs_window_then_global_then_queues() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut state = SourceState::default();
        state.bind(WindowId(1), NativeHandle(10));
        state.set_window_callback(NativeHandle(10), Some(log_into(&log, "window")));
        state.set_event_callback(Some(log_into(&log, "global")));

        state.emit(Some(NativeHandle(10)), Event::window_action(WindowAction::Paint));

        assert_eq!(*log.borrow(), ["window:WindowPaint", "global:WindowPaint"]);
        assert_eq!(state.front().map(|e| e.window()), Some(Some(WindowId(1))));
    }

    #[test]
    fn unbound_handles_are_dropped() {
        let mut state = SourceState::default();
        state.bind(WindowId(1), NativeHandle(10));
        state.emit(Some(NativeHandle(99)), Event::window_action(WindowAction::Paint));
        assert!(state.is_empty());
        state.emit(None, Event::system(SystemAction::Quit));
        assert_eq!(state.pop().map(|e| e.window()), Some(None));
    }

    #[test]
    fn unbind_is_idempotent_and_goes_idle() {
        let mut state = SourceState::default();
        assert!(state.is_idle());
        state.bind(WindowId(1), NativeHandle(10));
        state.bind(WindowId(2), NativeHandle(20));
        assert!(!state.unbind(NativeHandle(30)));
        assert!(state.unbind(NativeHandle(10)));
        assert!(!state.is_idle());
        assert_eq!(state.primary(), Some(NativeHandle(20)));
        assert!(state.unbind(NativeHandle(20)));
        assert!(state.is_idle());
        assert!(!state.unbind(NativeHandle(20)));
    }

    #[test]
    fn null_handle_is_never_bound() {
        let mut state = SourceState::default();
        state.bind(WindowId(1), NativeHandle::NULL);
        assert!(state.is_idle());
    }

    #[test]
    fn dispatch_without_handle_reaches_every_window() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut state = SourceState::default();
        state.bind(WindowId(1), NativeHandle(10));
        state.bind(WindowId(2), NativeHandle(20));
        state.set_window_callback(NativeHandle(10), Some(log_into(&log, "a")));
        state.set_window_callback(NativeHandle(20), Some(log_into(&log, "b")));
        state.set_event_callback(Some(log_into(&log, "global")));

        let event = Event::system(SystemAction::Suspend);
        state.dispatch(&event, None);
        let mut seen = log.borrow().clone();
        assert_eq!(seen.pop().as_deref(), Some("global:AppSuspend"));
        seen.sort();
        assert_eq!(seen, ["a:AppSuspend", "b:AppSuspend"]);
        assert!(state.is_empty());

        log.borrow_mut().clear();
        state.dispatch(&event, Some(NativeHandle(20)));
        assert_eq!(*log.borrow(), ["b:AppSuspend", "global:AppSuspend"]);
    }

    #[test]
    fn sent_events_are_delivered_through_emit() {
        let mut state = SourceState::default();
        state.bind(WindowId(3), NativeHandle(30));
        let sender = state.sender();
        std::thread::spawn(move || {
            sender.send(Event::window_action(WindowAction::Paint).with_window(Some(WindowId(3))));
        })
        .join()
        .unwrap();

        assert!(state.is_empty());
        state.deliver_sent();
        let event = state.pop().unwrap();
        assert_eq!(event.ty(), EventType::WindowPaint);
        assert_eq!(event.window(), Some(WindowId(3)));
    }
}
