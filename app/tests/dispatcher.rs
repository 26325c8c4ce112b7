use std::cell::RefCell;
use std::rc::Rc;

use nk_app::{App, AppArgs, AppContext, AppHandler, DefaultAppArgs, EventDispatcher, SharedSource, share};
use nk_core::event::{KeyEvent, SystemAction, WindowAction};
use nk_core::{Event, EventType, Key, NativeHandle, WindowId};
use nk_platform::web::{DomEvent, DomEventKind};
use nk_platform::win32::{Win32Message, wm};
use nk_platform::{EventSource, SourceState, WebSource, Win32Source};
use rstest::{fixture, rstest};

const WIN32_HANDLE: NativeHandle = NativeHandle(0x100);
const WEB_HANDLE: NativeHandle = NativeHandle(0x200);

/// Source whose FIFO is filled by the test through its state.
#[derive(Default)]
struct Manual {
    state: SourceState,
}

impl EventSource for Manual {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.state
    }

    fn pump(&mut self) {}
}

const MAIN: WindowId = WindowId(1);
const MAIN_HANDLE: NativeHandle = NativeHandle(1);

fn manual() -> Rc<RefCell<Manual>> {
    let source = share(Manual::default());
    source.borrow_mut().initialize(MAIN, MAIN_HANDLE);
    source
}

/// Emit as if translated for the main window.
fn push(source: &Rc<RefCell<Manual>>, event: Event) {
    source.borrow_mut().state_mut().emit(Some(MAIN_HANDLE), event);
}

#[fixture]
fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

fn record(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> impl FnMut(&Event) + 'static {
    let log = Rc::clone(log);
    move |event: &Event| log.borrow_mut().push(format!("{tag}:{}", event.ty()))
}

#[test]
fn sources_drain_in_attachment_order() {
    let win32 = share(Win32Source::default());
    win32.borrow_mut().initialize(WindowId(1), WIN32_HANDLE);
    win32.borrow().post(Win32Message::new(WIN32_HANDLE, wm::SETFOCUS, 0, 0));
    win32.borrow().post(Win32Message::new(WIN32_HANDLE, wm::PAINT, 0, 0));

    let web = share(WebSource::default());
    web.borrow_mut().initialize(WindowId(2), WEB_HANDLE);
    web.borrow().post(DomEvent::new(DomEventKind::Blur));

    let (a, b): (SharedSource, SharedSource) = (win32, web);
    let mut dispatcher = EventDispatcher::new();
    dispatcher.attach(&a);
    dispatcher.attach(&b);
    dispatcher.poll_events();

    let mut seen = Vec::new();
    while let Some(event) = dispatcher.poll_event() {
        seen.push((event.ty(), event.window()));
    }
    assert_eq!(
        seen,
        [
            (EventType::WindowFocusGained, Some(WindowId(1))),
            (EventType::WindowPaint, Some(WindowId(1))),
            (EventType::WindowFocusLost, Some(WindowId(2))),
        ]
    );
    assert!(dispatcher.poll_event().is_none());
    assert_eq!(dispatcher.cursor(), 3);
}

#[rstest]
fn global_runs_before_typed(recorder: Rc<RefCell<Vec<String>>>) {
    let source = manual();
    let shared: SharedSource = source.clone();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.attach(&shared);
    dispatcher.set_event_callback(Some(Box::new(record(&recorder, "global"))));
    dispatcher.set_type_callback(EventType::WindowPaint, record(&recorder, "paint"));

    push(&source, Event::window_action(WindowAction::Paint));
    push(&source, Event::system(SystemAction::Resume));
    dispatcher.poll_events();

    assert_eq!(
        *recorder.borrow(),
        ["global:WindowPaint", "paint:WindowPaint", "global:AppResume"]
    );
}

#[rstest]
fn typed_callbacks_replace(recorder: Rc<RefCell<Vec<String>>>) {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.set_type_callback(EventType::Quit, record(&recorder, "first"));
    dispatcher.set_type_callback(EventType::Quit, record(&recorder, "second"));

    dispatcher.dispatch_event(&Event::system(SystemAction::Quit));
    assert_eq!(*recorder.borrow(), ["second:Quit"]);

    dispatcher.clear_type_callback(EventType::Quit);
    assert!(!dispatcher.has_type_callback(EventType::Quit));
    dispatcher.dispatch_event(&Event::system(SystemAction::Quit));
    assert_eq!(recorder.borrow().len(), 1);
}

#[rstest]
fn global_callback_last_writer_wins(recorder: Rc<RefCell<Vec<String>>>) {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.set_event_callback(Some(Box::new(record(&recorder, "old"))));
    dispatcher.set_event_callback(Some(Box::new(record(&recorder, "new"))));
    dispatcher.dispatch_event(&Event::system(SystemAction::LowMemory));
    assert_eq!(*recorder.borrow(), ["new:LowMemory"]);

    dispatcher.set_event_callback(None);
    dispatcher.dispatch_event(&Event::system(SystemAction::LowMemory));
    assert_eq!(recorder.borrow().len(), 1);
}

#[test]
fn callbacks_may_feed_the_source_back() {
    let source = manual();
    let shared: SharedSource = source.clone();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.attach(&shared);

    let target = Rc::clone(&source);
    dispatcher.set_type_callback(EventType::WindowClose, move |_| {
        target
            .borrow_mut()
            .state_mut()
            .emit(None, Event::window_action(WindowAction::Destroy));
    });

    push(&source, Event::window_action(WindowAction::Close));
    dispatcher.poll_events();
    let types: Vec<_> = dispatcher.frame_events().iter().map(Event::ty).collect();
    assert_eq!(types, [EventType::WindowClose, EventType::WindowDestroy]);
}

#[test]
fn detached_sources_are_not_pumped() {
    let source = manual();
    let shared: SharedSource = source.clone();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.attach(&shared);
    dispatcher.detach(&shared);

    push(&source, Event::window_action(WindowAction::Paint));
    dispatcher.poll_events();
    assert!(dispatcher.frame_events().is_empty());
    assert_eq!(source.borrow().len(), 1);
}

#[derive(Default)]
struct Recorder {
    keys: Vec<Key>,
    updates: u64,
    allow_close: bool,
    close_requests: usize,
}

impl AppHandler for Recorder {
    fn on_update(&mut self, _ctx: &mut AppContext) -> bool {
        self.updates += 1;
        true
    }

    fn on_key(&mut self, _ctx: &mut AppContext, event: &KeyEvent) {
        self.keys.push(event.key);
    }

    fn on_close_requested(&mut self, _ctx: &mut AppContext) -> bool {
        self.close_requests += 1;
        self.allow_close
    }
}

fn app_with(
    handler: Recorder,
    args: DefaultAppArgs,
) -> (App<Recorder, DefaultAppArgs>, EventDispatcher, Rc<RefCell<Manual>>) {
    let source = manual();
    let shared: SharedSource = source.clone();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.attach(&shared);
    (App::new(handler, args, MAIN), dispatcher, source)
}

#[test]
fn app_feeds_keys_and_input_state() {
    let (mut app, mut dispatcher, source) = app_with(Recorder::default(), DefaultAppArgs::default());
    let press = KeyEvent::pressed(Key::Space, nk_core::Scancode::Space, Default::default());
    push(&source, Event::new(press));

    dispatcher.poll_events();
    assert!(app.process_events(&mut dispatcher).is_empty());
    assert!(app.update());
    assert_eq!(app.handler().keys, [Key::Space]);
    assert!(app.context().input().is_key_pressed(Key::Space));
    assert_eq!(app.context().frame_number(), 1);
}

#[rstest]
#[case::accepted(true, vec![MAIN])]
#[case::cancelled(false, vec![])]
fn close_requests_ask_the_handler(#[case] allow_close: bool, #[case] expected: Vec<WindowId>) {
    let handler = Recorder {
        allow_close,
        ..Recorder::default()
    };
    let (mut app, mut dispatcher, source) = app_with(handler, DefaultAppArgs::default());
    push(&source, Event::window_action(WindowAction::Close));
    dispatcher.poll_events();
    assert_eq!(app.process_events(&mut dispatcher), expected);
    assert_eq!(app.handler().close_requests, 1);
}

#[rstest]
#[case::quit(Event::system(SystemAction::Quit))]
#[case::main_window_destroyed(Event::window_action(WindowAction::Destroy))]
fn app_stops_on_quit_and_main_window_destroy(#[case] event: Event) {
    let (mut app, mut dispatcher, source) = app_with(Recorder::default(), DefaultAppArgs::default());
    push(&source, event);
    dispatcher.poll_events();
    app.process_events(&mut dispatcher);
    assert!(!app.update());
    assert!(app.context().exit_requested());
}

#[test]
fn max_frames_ends_the_loop() {
    let args = DefaultAppArgs::default().with_max_frames(3);
    assert_eq!(args.max_frames(), Some(3));
    let (mut app, mut dispatcher, _source) = app_with(Recorder::default(), args);

    let mut frames = 0;
    loop {
        dispatcher.poll_events();
        app.process_events(&mut dispatcher);
        frames += 1;
        if !app.update() {
            break;
        }
    }
    assert_eq!(frames, 3);
    assert_eq!(app.handler().updates, 3);
}
