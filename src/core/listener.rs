//! Log event listeners
//!
//! Listeners observe every log event that passes a logger's gate, before the
//! message is split into lines. They exist for tests: a test registers a
//! [`LogList`], runs the code under test, and asserts on what was logged.
//!
//! ```
//! use log_front::prelude::*;
//! use std::sync::Arc;
//!
//! let listeners = Arc::new(LogListeners::new());
//! let factory = LoggerFactory::builder()
//!     .null_backend()
//!     .listeners(Arc::clone(&listeners))
//!     .build();
//!
//! let list = Arc::new(LogList::new());
//! let _guard = listeners.register(list.clone());
//!
//! let logger = factory.get_logger("example").unwrap();
//! // a null backend gates everything out, so nothing reaches the listener
//! logger.info("not delivered").unwrap();
//! assert!(list.is_empty());
//! ```

use super::log_item::LogItem;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

pub trait LogListener: Send + Sync {
    fn receive(&self, item: &LogItem);
}

impl<F> LogListener for F
where
    F: Fn(&LogItem) + Send + Sync,
{
    fn receive(&self, item: &LogItem) {
        self(item)
    }
}

/// Registry of listeners notified of every log event.
#[derive(Default)]
pub struct LogListeners {
    listeners: Mutex<Vec<Arc<dyn LogListener>>>,
    count: AtomicUsize,
}

/// Listeners captured for one broadcast
enum Snapshot {
    Empty,
    Single(Arc<dyn LogListener>),
    Many(Vec<Arc<dyn LogListener>>),
}

impl LogListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by factories that are not given their own
    pub fn global() -> &'static Arc<LogListeners> {
        static GLOBAL: OnceLock<Arc<LogListeners>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(LogListeners::new()))
    }

    pub fn add(&self, listener: Arc<dyn LogListener>) {
        let mut listeners = self.listeners.lock();
        listeners.push(listener);
        self.count.store(listeners.len(), Ordering::Release);
    }

    /// Remove a listener previously added, compared by identity.
    ///
    /// Returns false if the listener was not registered, so removing twice is harmless.
    pub fn remove(&self, listener: &Arc<dyn LogListener>) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        self.count.store(listeners.len(), Ordering::Release);
        listeners.len() != before
    }

    /// Add a listener and return a guard that removes it when dropped.
    pub fn register(self: &Arc<Self>, listener: Arc<dyn LogListener>) -> ListenerGuard {
        self.add(Arc::clone(&listener));
        ListenerGuard {
            registry: Arc::clone(self),
            listener,
        }
    }

    /// Whether any listener is registered; does not take the lock.
    #[inline]
    pub fn present(&self) -> bool {
        self.count.load(Ordering::Acquire) > 0
    }

    pub fn len(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        !self.present()
    }

    /// Deliver an item to every listener, in registration order, on this thread.
    ///
    /// The lock is held only while the listeners are copied out, so a listener may
    /// itself log or add and remove listeners.
    pub fn invoke_all(&self, item: &LogItem) {
        let snapshot = {
            let listeners = self.listeners.lock();
            match listeners.len() {
                0 => Snapshot::Empty,
                1 => Snapshot::Single(Arc::clone(&listeners[0])),
                _ => Snapshot::Many(listeners.clone()),
            }
        };
        match snapshot {
            Snapshot::Empty => {}
            Snapshot::Single(listener) => listener.receive(item),
            Snapshot::Many(listeners) => {
                for listener in &listeners {
                    listener.receive(item);
                }
            }
        }
    }
}

/// Removes its listener from the registry when dropped
#[must_use = "the listener is removed as soon as the guard is dropped"]
pub struct ListenerGuard {
    registry: Arc<LogListeners>,
    listener: Arc<dyn LogListener>,
}

impl ListenerGuard {
    pub fn listener(&self) -> &Arc<dyn LogListener> {
        &self.listener
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.listener);
    }
}

/// A listener that keeps every item it receives.
#[derive(Default)]
pub struct LogList {
    items: Mutex<Vec<LogItem>>,
}

impl LogList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the items received so far
    pub fn items(&self) -> Vec<LogItem> {
        self.items.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn clear(&self) {
        self.items.lock().clear();
    }
}

impl LogListener for LogList {
    fn receive(&self, item: &LogItem) {
        self.items.lock().push(item.clone());
    }
}
