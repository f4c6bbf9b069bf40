//! Dirty notification fan-out.
//!
//! Any change that could alter rendered output (buffer edits, cursor blink,
//! bounds or wrap changes) raises a dirty notification. Hosts register
//! zero-argument callbacks that typically schedule a repaint. Callbacks run
//! synchronously on the thread that raised the notification, which for
//! cursor blinks is the blink thread, so they must be `Send + Sync`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

type Handler = Arc<dyn Fn() + Send + Sync>;

/// Identifies a registered dirty handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

/// Ordered list of dirty callbacks.
///
/// Callbacks fire in registration order. The list is snapshotted before
/// invocation, so no lock is held while a callback runs. A callback must
/// not mutate the widget that notified it.
pub struct DirtyHandlers {
    handlers: RwLock<Vec<(HandlerId, Handler)>>,
    next_id: AtomicU64,
}

impl DirtyHandlers {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a callback. Returns an id usable with [`remove`](Self::remove).
    pub fn add<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, Arc::new(handler)));
        id
    }

    /// Unregister a callback. Returns `false` if the id was unknown.
    pub fn remove(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.write();
        match handlers.iter().position(|(hid, _)| *hid == id) {
            Some(idx) => {
                handlers.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    /// Invoke every callback in registration order.
    pub fn notify(&self) {
        let snapshot: Vec<Handler> = self.handlers.read().iter().map(|(_, h)| Arc::clone(h)).collect();
        for handler in snapshot {
            handler();
        }
    }
}

impl Default for DirtyHandlers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DirtyHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirtyHandlers").field("len", &self.len()).finish()
    }
}
