//! Holder of the currently displayed entity collection.
//!
//! The collection is replaced wholesale on every refresh; there is no
//! incremental patching. The session subscribes to the change notifier
//! on open and keeps its subscription token, so teardown detaches it.

use crate::domain::{DomainError, Entity};
use crate::ports::ConfirmPort;
use crate::usecases::entity_service::EntityService;
use crate::usecases::notifier::{ChangeListener, ChangeNotifier, Subscription};
use std::sync::{Arc, Mutex, Weak};
use tracing::info;

pub struct ListSession<T: Entity> {
    service: EntityService<T>,
    notifier: ChangeNotifier,
    items: Mutex<Vec<T>>,
    // Held for its Drop; releasing the session releases the listener.
    subscription: Mutex<Option<Subscription>>,
}

impl<T: Entity> ListSession<T> {
    /// Create the session, run the initial fetch and subscribe it to the
    /// notifier so every successful mutation anywhere triggers a refresh.
    pub fn open(
        service: EntityService<T>,
        notifier: ChangeNotifier,
    ) -> Result<Arc<Self>, DomainError> {
        let session = Arc::new(Self {
            service,
            notifier: notifier.clone(),
            items: Mutex::new(Vec::new()),
            subscription: Mutex::new(None),
        });
        session.refresh()?;
        let weak: Weak<dyn ChangeListener> = Arc::downgrade(&session) as Weak<dyn ChangeListener>;
        let sub = notifier.subscribe(weak);
        *session
            .subscription
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(sub);
        Ok(session)
    }

    /// Snapshot of the held collection.
    pub fn items(&self) -> Vec<T> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Re-fetch everything and replace the held collection.
    pub fn refresh(&self) -> Result<(), DomainError> {
        let fresh = self.service.list()?;
        info!(kind = T::KIND, count = fresh.len(), "list refreshed");
        *self.items.lock().unwrap_or_else(|e| e.into_inner()) = fresh;
        Ok(())
    }

    /// Delete an entity after confirmation. Returns `Ok(false)` when the
    /// operator declines: no service call, no refresh. On success the
    /// deletion is broadcast so every list session (this one included)
    /// refreshes. An integrity conflict propagates without touching the
    /// held collection.
    pub fn remove(&self, entity: &T, confirm: &dyn ConfirmPort) -> Result<bool, DomainError> {
        if !confirm.ask("Confirmation", "Are you sure to delete?") {
            return Ok(false);
        }
        self.service.remove(entity)?;
        self.notifier.publish();
        Ok(true)
    }

    pub fn service(&self) -> &EntityService<T> {
        &self.service
    }
}

impl<T: Entity> ChangeListener for ListSession<T> {
    fn on_changed(&self) -> Result<(), DomainError> {
        self.refresh()
    }
}
