//! Cross-thread hand-off queues.
//!
//! Native messages arrive from OS hooks, window procedures or host callbacks
//! and are parked in a [`NativeQueue`] until the owning source pumps.
//! Background producers that already hold canonical events use an
//! [`EventSender`]; those events are delivered on the pumping thread through
//! the normal callback path, never from the producer's thread.

use std::collections::VecDeque;
use std::sync::Arc;

use nk_core::Event;
use parking_lot::Mutex;

/// Shared FIFO of raw native messages.
pub struct NativeQueue<M> {
    inner: Arc<Mutex<VecDeque<M>>>,
}

impl<M> NativeQueue<M> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn push(&self, message: M) {
        self.inner.lock().push_back(message);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Take up to `max` of the messages queued right now.
    ///
    /// Messages pushed while the caller processes the batch wait for the
    /// next drain, so a pump never chases its own tail.
    pub fn drain(&self, max: usize) -> Vec<M> {
        let mut queue = self.inner.lock();
        let n = queue.len().min(max);
        queue.drain(..n).collect()
    }
}

impl<M> Clone for NativeQueue<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> Default for NativeQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for producers on other threads to enqueue canonical events.
#[derive(Clone)]
pub struct EventSender {
    inbox: Arc<Mutex<VecDeque<Event>>>,
}

impl EventSender {
    pub(crate) fn new(inbox: Arc<Mutex<VecDeque<Event>>>) -> Self {
        Self { inbox }
    }

    /// Queue an event for delivery on the next pump of the owning source.
    pub fn send(&self, event: Event) {
        if event.is_none() {
            return;
        }
        self.inbox.lock().push_back(event);
    }

    /// Number of events waiting for the next pump.
    pub fn pending(&self) -> usize {
        self.inbox.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nk_core::event::{SystemAction, SystemEvent};

    #[test]
    fn drain_is_bounded() {
        let queue = NativeQueue::new();
        for i in 0..10 {
            queue.push(i);
        }
        assert_eq!(queue.drain(4), vec![0, 1, 2, 3]);
        assert_eq!(queue.len(), 6);
        assert_eq!(queue.drain(100).len(), 6);
        assert!(queue.is_empty());
    }

    #[test]
    fn clones_share_storage() {
        let queue = NativeQueue::new();
        let producer = queue.clone();
        std::thread::spawn(move || producer.push(7u32))
            .join()
            .unwrap();
        assert_eq!(queue.drain(8), vec![7]);
    }

    #[test]
    fn sender_ignores_empty_events() {
        let sender = EventSender::new(Arc::default());
        sender.send(Event::none());
        assert_eq!(sender.pending(), 0);
        sender.send(Event::new(SystemEvent::new(SystemAction::LowMemory)));
        assert_eq!(sender.pending(), 1);
    }
}
