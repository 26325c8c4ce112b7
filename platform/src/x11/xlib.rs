//! Xlib source: the window layer reads `XEvent`s with `XNextEvent`, looks up
//! keysyms with `XLookupString`, and forwards them here.

use nk_core::NativeHandle;

use super::{TextSource, X11Translator, XEvent};
use crate::config::SourceConfig;
use crate::queue::NativeQueue;
use crate::source::{EventSource, SourceState};

pub struct XlibSource {
    state: SourceState,
    queue: NativeQueue<XEvent>,
    translator: X11Translator,
}

impl XlibSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            state: SourceState::new(config),
            queue: NativeQueue::new(),
            translator: X11Translator::default(),
        }
    }

    pub fn queue(&self) -> NativeQueue<XEvent> {
        self.queue.clone()
    }

    pub fn post(&self, event: XEvent) {
        self.queue.push(event);
    }

    /// The interned `WM_DELETE_WINDOW` atom, used to recognise close requests.
    pub fn set_wm_delete_window(&mut self, atom: u64) {
        self.translator.set_wm_delete_window(atom);
    }
}

impl Default for XlibSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl EventSource for XlibSource {
    fn name(&self) -> &'static str {
        "xlib"
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.state
    }

    fn pump(&mut self) {
        let batch = self.queue.drain(self.state.config().max_pump_messages);
        self.translator
            .translate_batch(&mut self.state, batch, TextSource::Keysym);
    }

    fn shutdown(&mut self, native: NativeHandle) {
        self.translator.forget(native);
        self.state.unbind(native);
    }
}
