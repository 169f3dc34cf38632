//! A registry of listeners that events can be dispatched into.

use crate::events::Event;
use crate::listener::EventListener;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Identifies a listener registered with an [`EventManager`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ListenerId(u64);

/// Dispatches events to a list of listeners, in the order they were registered.
///
/// Listeners must not dispatch into the manager that is calling them.
#[derive(Default)]
pub struct EventManager {
    listeners: Mutex<Vec<(ListenerId, Box<dyn EventListener + Send>)>>,
    next_id: AtomicU64,
}
impl EventManager {
    pub fn new() -> Self {
        EventManager::default()
    }

    /// Adds a listener to the end of the list.
    pub fn register(&self, listener: impl EventListener + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Box::new(listener)));
        debug!(id = id.0, "Registered listener");
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let len = listeners.len();
        listeners.retain(|x| x.0 != id);
        let removed = listeners.len() != len;
        debug!(id = id.0, removed, "Unregistered listener");
        removed
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }

    /// Passes an event to every registered listener.
    pub fn dispatch(&self, event: &dyn Event) {
        let mut listeners = self.listeners.lock();
        trace!(event = ?event, listeners = listeners.len(), "Dispatching event");
        for (_, listener) in listeners.iter_mut() {
            listener.on_event(event);
        }
    }
}
