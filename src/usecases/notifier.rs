//! Synchronous publish/subscribe for "entity set changed" events.
//!
//! One successful save or delete triggers one broadcast; every live
//! subscriber is invoked in subscription order on the calling thread.

use crate::domain::DomainError;
use std::sync::{Arc, Mutex, Weak};
use tracing::warn;

/// Receives "entity set changed" events.
pub trait ChangeListener: Send + Sync {
    /// Called after a successful mutation. A failure here is reported
    /// by the notifier and must not reach the publisher.
    fn on_changed(&self) -> Result<(), DomainError>;
}

struct Inner {
    next_id: u64,
    listeners: Vec<(u64, Weak<dyn ChangeListener>)>,
}

/// Broadcast hub. Cheap to clone; all clones share one subscriber list.
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Arc<Mutex<Inner>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. The returned token detaches it on drop, so a
    /// session that holds its token cannot outlive its registration.
    /// Listeners are held weakly; a dropped listener is pruned on the
    /// next publish either way.
    pub fn subscribe(&self, listener: Weak<dyn ChangeListener>) -> Subscription {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke every live subscriber in subscription order. A failing
    /// listener is logged and skipped; delivery continues to the rest.
    pub fn publish(&self) {
        // Snapshot under the lock, invoke outside it, so a listener may
        // subscribe or drop a token from inside its callback.
        let live: Vec<Arc<dyn ChangeListener>> = {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.listeners.retain(|(_, l)| l.strong_count() > 0);
            inner
                .listeners
                .iter()
                .filter_map(|(_, l)| l.upgrade())
                .collect()
        };
        for listener in live {
            if let Err(e) = listener.on_changed() {
                warn!(error = %e, "change listener failed, continuing delivery");
            }
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .listeners
            .len()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscription token. Dropping it detaches the listener.
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<Inner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
