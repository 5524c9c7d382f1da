//! Wake observer registry
//!
//! Observers register a callback for the single "woke up" event. Dispatch
//! is synchronous and runs in registration order; there is no payload and
//! no priority beyond that order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Handle identifying one registration, used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

type WakeCallback = Arc<dyn Fn() + Send + Sync>;

/// Registry of wake observers
pub struct WakeObserverRegistry {
    observers: Mutex<Vec<(ObserverId, WakeCallback)>>,
    next_id: AtomicU64,
}

impl WakeObserverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register an observer; the returned handle removes it again
    pub fn register<F>(&self, callback: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.observers
            .lock()
            .expect("observer list lock poisoned")
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a previously registered observer
    ///
    /// Returns `false` if the handle was not (or no longer) registered.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock().expect("observer list lock poisoned");
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    /// Invoke every observer synchronously, in registration order
    ///
    /// Dispatch runs over a snapshot taken at emit time, so a callback may
    /// register or unregister observers on this registry: additions are
    /// first invoked by the next `emit`, removals take effect once the
    /// in-flight dispatch has finished.
    pub fn emit(&self) {
        let snapshot: Vec<WakeCallback> = {
            let observers = self.observers.lock().expect("observer list lock poisoned");
            observers.iter().map(|(_, callback)| callback.clone()).collect()
        };
        debug!("dispatching wake event to {} observer(s)", snapshot.len());
        for callback in snapshot {
            callback();
        }
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .expect("observer list lock poisoned")
            .len()
    }

    /// Whether no observers are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WakeObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
