//! Frame-driven event dispatch across attached sources.
//!
//! [`EventDispatcher`] pumps every attached [`EventSource`] once per frame,
//! drains each source's FIFO to empty in attachment order, runs the global
//! and per-type callbacks for every event, and keeps the drained events in a
//! replay buffer that [`poll_event()`](EventDispatcher::poll_event) walks
//! with a single cursor.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use nk_core::{Event, EventType};
use nk_platform::{EventCallback, EventSource};

/// A source shared between the dispatcher and whoever owns the windows.
///
/// Attachment identity is pointer identity of the `Rc`.
pub type SharedSource = Rc<RefCell<dyn EventSource>>;

/// Wrap a concrete source for attachment.
pub fn share<S: EventSource + 'static>(source: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(source))
}

/// Explicitly constructed dispatcher; one per application by convention.
pub struct EventDispatcher {
    sources: Vec<SharedSource>,
    global: Option<EventCallback>,
    typed: [Option<EventCallback>; EventType::COUNT],
    frame: Vec<Event>,
    cursor: usize,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            global: None,
            typed: [const { None }; EventType::COUNT],
            frame: Vec::new(),
            cursor: 0,
        }
    }

    /// Attach a source. Returns `false` if it was already attached.
    pub fn attach(&mut self, source: &SharedSource) -> bool {
        if self.is_attached(source) {
            return false;
        }
        log::debug!("Attached {} source", source.borrow().name());
        self.sources.push(Rc::clone(source));
        true
    }

    /// Detach a source. Returns `false` if it was not attached.
    pub fn detach(&mut self, source: &SharedSource) -> bool {
        let Some(index) = self.sources.iter().position(|s| Rc::ptr_eq(s, source)) else {
            return false;
        };
        let source = self.sources.remove(index);
        log::debug!("Detached {} source", source.borrow().name());
        true
    }

    pub fn is_attached(&self, source: &SharedSource) -> bool {
        self.sources.iter().any(|s| Rc::ptr_eq(s, source))
    }

    pub fn attached_count(&self) -> usize {
        self.sources.len()
    }

    /// Set (or clear) the callback run for every event. Last writer wins.
    pub fn set_event_callback(&mut self, callback: Option<EventCallback>) {
        self.global = callback;
    }

    /// Set the callback for one event type, replacing any previous one.
    pub fn set_type_callback(&mut self, ty: EventType, callback: impl FnMut(&Event) + 'static) {
        let slot = &mut self.typed[ty.index()];
        if slot.is_some() {
            log::debug!("Replaced {ty} callback");
        }
        *slot = Some(Box::new(callback));
    }

    pub fn clear_type_callback(&mut self, ty: EventType) {
        self.typed[ty.index()] = None;
    }

    pub fn has_type_callback(&self, ty: EventType) -> bool {
        self.typed[ty.index()].is_some()
    }

    /// Pump every attached source and rebuild the frame's replay buffer.
    ///
    /// Each source is drained to empty before the next one; events of
    /// different sources are not interleaved by timestamp.
    pub fn poll_events(&mut self) {
        for source in &self.sources {
            source.borrow_mut().poll_events();
        }

        self.frame.clear();
        self.cursor = 0;

        let Self {
            sources,
            global,
            typed,
            frame,
            ..
        } = self;
        for source in sources.iter() {
            loop {
                // Released before the callbacks run so they may touch the source.
                let next = source.borrow_mut().pop();
                let Some(event) = next else {
                    break;
                };
                invoke(global, typed, &event);
                frame.push(event);
            }
        }
    }

    /// Next unread event of the current frame, or `None` at the end.
    ///
    /// The reference is only valid until the next call on the dispatcher.
    pub fn poll_event(&mut self) -> Option<&Event> {
        let event = self.frame.get(self.cursor)?;
        self.cursor += 1;
        Some(event)
    }

    /// Run the global and typed callbacks for `event` without queueing it.
    pub fn dispatch_event(&mut self, event: &Event) {
        if event.is_none() {
            return;
        }
        invoke(&mut self.global, &mut self.typed, event);
    }

    /// Every event drained by the last [`poll_events()`](Self::poll_events).
    pub fn frame_events(&self) -> &[Event] {
        &self.frame
    }

    /// Position of the replay cursor in [`frame_events()`](Self::frame_events).
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

fn invoke(
    global: &mut Option<EventCallback>,
    typed: &mut [Option<EventCallback>; EventType::COUNT],
    event: &Event,
) {
    if let Some(callback) = global {
        callback(event);
    }
    if let Some(callback) = &mut typed[event.ty().index()] {
        callback(event);
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let typed = self.typed.iter().filter(|slot| slot.is_some()).count();
        f.debug_struct("EventDispatcher")
            .field("sources", &self.sources.len())
            .field("global", &self.global.is_some())
            .field("typed", &typed)
            .field("frame", &self.frame.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use nk_core::event::{SystemAction, WindowAction};
    use nk_core::{NativeHandle, WindowId};
    use nk_platform::{SourceState, WebSource};

    use super::*;

    /// Source whose FIFO is filled directly by the test.
    #[derive(Default)]
    struct Scripted {
        state: SourceState,
        pumps: usize,
    }

    impl EventSource for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn state(&self) -> &SourceState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut SourceState {
            &mut self.state
        }

        fn pump(&mut self) {
            self.pumps += 1;
        }
    }

    fn scripted() -> Rc<RefCell<Scripted>> {
        let source = share(Scripted::default());
        source.borrow_mut().initialize(WindowId(1), NativeHandle(1));
        source
    }

    #[test]
    fn attach_is_idempotent() {
        let source: SharedSource = share(WebSource::default());
        let mut dispatcher = EventDispatcher::new();
        assert!(dispatcher.attach(&source));
        assert!(!dispatcher.attach(&source));
        assert_eq!(dispatcher.attached_count(), 1);
        assert!(dispatcher.detach(&source));
        assert!(!dispatcher.detach(&source));
        assert_eq!(dispatcher.attached_count(), 0);
    }

    #[test]
    fn poll_pumps_attached_sources() {
        let source = scripted();
        let shared: SharedSource = source.clone();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.attach(&shared);
        dispatcher.poll_events();
        dispatcher.poll_events();
        assert_eq!(source.borrow().pumps, 2);
    }

    #[test]
    fn cursor_resets_every_frame() {
        let source = scripted();
        let shared: SharedSource = source.clone();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.attach(&shared);

        source
            .borrow_mut()
            .state_mut()
            .emit(None, Event::system(SystemAction::Resume));
        dispatcher.poll_events();
        assert_eq!(dispatcher.cursor(), 0);
        assert!(dispatcher.poll_event().is_some());
        assert_eq!(dispatcher.cursor(), 1);
        assert!(dispatcher.poll_event().is_none());
        assert_eq!(dispatcher.cursor(), 1);

        dispatcher.poll_events();
        assert_eq!(dispatcher.cursor(), 0);
        assert!(dispatcher.frame_events().is_empty());
        assert!(dispatcher.poll_event().is_none());
    }

    #[test]
    fn dispatch_skips_the_replay_buffer() {
        let hits = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new();
        let counter = Rc::clone(&hits);
        dispatcher.set_type_callback(EventType::WindowPaint, move |_| *counter.borrow_mut() += 1);

        dispatcher.dispatch_event(&Event::window_action(WindowAction::Paint));
        dispatcher.dispatch_event(&Event::none());
        assert_eq!(*hits.borrow(), 1);
        assert!(dispatcher.frame_events().is_empty());
    }
}
