//! One edit/create transaction: read raw fields, validate, persist,
//! broadcast. Collaborators are injected at construction; a session
//! without a service or notifier cannot be built.

use crate::domain::{DomainError, FieldErrorSet};
use crate::shared::format::FormatConfig;
use crate::usecases::drafts::Draft;
use crate::usecases::entity_service::EntityService;
use crate::usecases::notifier::ChangeNotifier;
use tracing::warn;

/// Verdict of one submit attempt. `Invalid` and `SaveFailed` return the
/// session to editing; `Saved` closes it.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Persisted and broadcast. The session is done.
    Saved,
    /// Field violations; nothing reached the service.
    Invalid(FieldErrorSet),
    /// The store rejected the save; message for display.
    SaveFailed(String),
}

/// Per-attempt orchestration of validate-then-persist for one entity.
/// Bound either to a fresh entity or to an existing snapshot for edit;
/// dropped when the dialog closes, however it closes.
pub struct FormSession<D: Draft> {
    entity: D::Entity,
    service: EntityService<D::Entity>,
    notifier: ChangeNotifier,
    fmt: FormatConfig,
}

impl<D: Draft> FormSession<D> {
    pub fn new(
        entity: D::Entity,
        service: EntityService<D::Entity>,
        notifier: ChangeNotifier,
        fmt: FormatConfig,
    ) -> Self {
        Self {
            entity,
            service,
            notifier,
            fmt,
        }
    }

    /// The currently bound entity snapshot.
    pub fn entity(&self) -> &D::Entity {
        &self.entity
    }

    /// Raw field text for the bound snapshot, for form display.
    pub fn draft(&self) -> D {
        D::prefill(&self.entity, &self.fmt)
    }

    /// Run one submission attempt. Validation always completes over all
    /// fields before any persistence call; a persistence failure is
    /// surfaced once and the attempt is abandoned.
    ///
    /// `Err` is reserved for wiring defects (`DomainError::Config`);
    /// callers let it abort the action.
    pub fn submit(&mut self, draft: &D) -> Result<SubmitOutcome, DomainError> {
        let candidate = match draft.build(&self.fmt) {
            Ok(candidate) => candidate,
            Err(DomainError::Validation(errors)) => return Ok(SubmitOutcome::Invalid(errors)),
            Err(other) => return Err(other),
        };

        // The bound entity is replaced before the save attempt lands, so
        // a failed save leaves the session ahead of storage. Carried over
        // from the original behavior; known operator-confusion hazard.
        self.entity = candidate.clone();

        match self.service.save_or_update(&candidate) {
            Ok(_) => {
                self.notifier.publish();
                Ok(SubmitOutcome::Saved)
            }
            Err(e @ DomainError::Config(_)) => Err(e),
            Err(e) => {
                warn!(error = %e, "save attempt failed, session stays open");
                Ok(SubmitOutcome::SaveFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::registry::Registry;
    use crate::domain::Department;
    use crate::ports::{EntityStore, StoreError};
    use crate::usecases::drafts::DepartmentDraft;
    use crate::usecases::notifier::ChangeListener;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingListener {
        calls: AtomicUsize,
    }

    impl ChangeListener for CountingListener {
        fn on_changed(&self) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn session_over_registry() -> (FormSession<DepartmentDraft>, EntityService<Department>, ChangeNotifier)
    {
        let registry = Registry::in_memory();
        let service = EntityService::new(registry.departments());
        let notifier = ChangeNotifier::new();
        let session = FormSession::new(
            Department::new(),
            service.clone(),
            notifier.clone(),
            FormatConfig::default(),
        );
        (session, service, notifier)
    }

    #[test]
    fn invalid_submit_never_reaches_the_service() {
        let (mut session, service, _notifier) = session_over_registry();
        let draft = DepartmentDraft {
            id_text: String::new(),
            name: String::new(),
        };
        match session.submit(&draft).unwrap() {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.get("name"), Some("Field can't be empty"));
            }
            other => panic!("expected invalid outcome, got {other:?}"),
        }
        assert!(service.list().unwrap().is_empty());
        // Session still bound to the original snapshot.
        assert_eq!(session.entity().id, None);
        assert_eq!(session.entity().name, "");
    }

    #[test]
    fn valid_submit_persists_and_publishes_exactly_once() {
        let (mut session, service, notifier) = session_over_registry();
        let listener = Arc::new(CountingListener {
            calls: AtomicUsize::new(0),
        });
        let weak: std::sync::Weak<dyn ChangeListener> =
            Arc::downgrade(&listener) as std::sync::Weak<dyn ChangeListener>;
        let _sub = notifier.subscribe(weak);

        let draft = DepartmentDraft {
            id_text: String::new(),
            name: "Sales".to_string(),
        };
        match session.submit(&draft).unwrap() {
            SubmitOutcome::Saved => {}
            other => panic!("expected saved outcome, got {other:?}"),
        }

        assert_eq!(listener.calls.load(Ordering::SeqCst), 1);
        let listed = service.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Sales");
        assert!(listed[0].id.is_some());
    }

    #[test]
    fn cleared_id_turns_an_edit_into_a_create() {
        let (mut session, service, _notifier) = session_over_registry();
        session
            .submit(&DepartmentDraft {
                id_text: String::new(),
                name: "Sales".to_string(),
            })
            .unwrap();

        // Operator edits but blanks the id field: a second row appears.
        let mut second = FormSession::<DepartmentDraft>::new(
            service.list().unwrap().remove(0),
            service.clone(),
            ChangeNotifier::new(),
            FormatConfig::default(),
        );
        second
            .submit(&DepartmentDraft {
                id_text: String::new(),
                name: "Sales Renamed".to_string(),
            })
            .unwrap();

        assert_eq!(service.list().unwrap().len(), 2);
    }

    /// Store whose writes always fail.
    struct BrokenStore;

    impl EntityStore<Department> for BrokenStore {
        fn find_all(&self) -> Result<Vec<Department>, StoreError> {
            Ok(Vec::new())
        }
        fn insert(&self, _: &Department) -> Result<Department, StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
        fn update(&self, _: &Department) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
        fn delete(&self, _: &Department) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
    }

    #[test]
    fn failed_save_keeps_session_open_with_candidate_bound() {
        let notifier = ChangeNotifier::new();
        let listener = Arc::new(CountingListener {
            calls: AtomicUsize::new(0),
        });
        let weak: std::sync::Weak<dyn ChangeListener> =
            Arc::downgrade(&listener) as std::sync::Weak<dyn ChangeListener>;
        let _sub = notifier.subscribe(weak);

        let mut session = FormSession::<DepartmentDraft>::new(
            Department::new(),
            EntityService::new(Arc::new(BrokenStore)),
            notifier,
            FormatConfig::default(),
        );
        let outcome = session
            .submit(&DepartmentDraft {
                id_text: String::new(),
                name: "Sales".to_string(),
            })
            .unwrap();

        match outcome {
            SubmitOutcome::SaveFailed(msg) => assert!(msg.contains("disk full")),
            other => panic!("expected save failure, got {other:?}"),
        }
        // No broadcast on failure.
        assert_eq!(listener.calls.load(Ordering::SeqCst), 0);
        // The bound entity was already replaced with the candidate.
        assert_eq!(session.entity().name, "Sales");
    }

    #[test]
    fn prefilled_draft_round_trips_the_snapshot() {
        let registry = Registry::in_memory();
        let service = EntityService::new(registry.departments());
        let saved = service
            .save_or_update(&Department {
                id: None,
                name: "Sales".to_string(),
            })
            .unwrap();

        let session = FormSession::<DepartmentDraft>::new(
            saved.clone(),
            service,
            ChangeNotifier::new(),
            FormatConfig::default(),
        );
        let draft = session.draft();
        assert_eq!(draft.id_text, saved.id.unwrap().to_string());
        assert_eq!(draft.name, "Sales");
    }
}
