//! Generic CRUD façade over the persistence port.
//!
//! Stateless: every call delegates to the store and translates its
//! failures into the DomainError taxonomy. Only the referential-
//! integrity case keeps a distinct variant so callers can word the
//! message specifically.

use crate::domain::{DomainError, Entity};
use crate::ports::{EntityStore, StoreError};
use std::sync::Arc;
use tracing::info;

pub struct EntityService<T: Entity> {
    store: Arc<dyn EntityStore<T>>,
}

impl<T: Entity> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: Entity> EntityService<T> {
    pub fn new(store: Arc<dyn EntityStore<T>>) -> Self {
        Self { store }
    }

    /// All persisted entities, in store order (primary key).
    pub fn list(&self) -> Result<Vec<T>, DomainError> {
        self.store.find_all().map_err(translate)
    }

    /// Insert when `id` is absent, update keyed by `id` otherwise.
    /// Returns the persisted entity; on insert its id is populated.
    pub fn save_or_update(&self, entity: &T) -> Result<T, DomainError> {
        match entity.id() {
            None => {
                let saved = self.store.insert(entity).map_err(translate)?;
                info!(kind = T::KIND, id = saved.id(), "inserted entity");
                Ok(saved)
            }
            Some(id) => {
                self.store.update(entity).map_err(translate)?;
                info!(kind = T::KIND, id, "updated entity");
                Ok(entity.clone())
            }
        }
    }

    /// Delete the persisted entity. `DomainError::Integrity` when it is
    /// still referenced by another persisted entity.
    pub fn remove(&self, entity: &T) -> Result<(), DomainError> {
        self.store.delete(entity).map_err(translate)?;
        info!(kind = T::KIND, id = entity.id(), "deleted entity");
        Ok(())
    }
}

fn translate(e: StoreError) -> DomainError {
    match e {
        StoreError::Integrity(msg) => DomainError::Integrity(msg),
        other => DomainError::Persistence(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Store stub with switchable failure modes.
    struct StubStore {
        rows: Mutex<BTreeMap<i32, Department>>,
        next_id: Mutex<i32>,
        fail: Option<fn() -> StoreError>,
    }

    impl StubStore {
        fn new() -> Self {
            Self {
                rows: Mutex::new(BTreeMap::new()),
                next_id: Mutex::new(1),
                fail: None,
            }
        }

        fn failing(fail: fn() -> StoreError) -> Self {
            Self {
                fail: Some(fail),
                ..Self::new()
            }
        }
    }

    impl EntityStore<Department> for StubStore {
        fn find_all(&self) -> Result<Vec<Department>, StoreError> {
            if let Some(fail) = self.fail {
                return Err(fail());
            }
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        fn insert(&self, entity: &Department) -> Result<Department, StoreError> {
            if let Some(fail) = self.fail {
                return Err(fail());
            }
            let mut next_id = self.next_id.lock().unwrap();
            let mut saved = entity.clone();
            saved.id = Some(*next_id);
            *next_id += 1;
            self.rows
                .lock()
                .unwrap()
                .insert(saved.id.unwrap(), saved.clone());
            Ok(saved)
        }

        fn update(&self, entity: &Department) -> Result<(), StoreError> {
            if let Some(fail) = self.fail {
                return Err(fail());
            }
            let id = entity.id.unwrap();
            self.rows.lock().unwrap().insert(id, entity.clone());
            Ok(())
        }

        fn delete(&self, entity: &Department) -> Result<(), StoreError> {
            if let Some(fail) = self.fail {
                return Err(fail());
            }
            self.rows.lock().unwrap().remove(&entity.id.unwrap());
            Ok(())
        }
    }

    #[test]
    fn absent_id_routes_to_insert_and_assigns_id() {
        let service = EntityService::new(Arc::new(StubStore::new()));
        let dept = Department {
            id: None,
            name: "Sales".to_string(),
        };
        let saved = service.save_or_update(&dept).unwrap();
        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.name, "Sales");

        let listed = service.list().unwrap();
        assert_eq!(listed, vec![saved]);
    }

    #[test]
    fn present_id_routes_to_update() {
        let service = EntityService::new(Arc::new(StubStore::new()));
        let saved = service
            .save_or_update(&Department {
                id: None,
                name: "Sales".to_string(),
            })
            .unwrap();

        let renamed = Department {
            name: "Marketing".to_string(),
            ..saved
        };
        service.save_or_update(&renamed).unwrap();

        let listed = service.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Marketing");
    }

    #[test]
    fn integrity_failures_stay_distinguishable() {
        let service = EntityService::new(Arc::new(StubStore::failing(|| {
            StoreError::Integrity("department is referenced by a seller".into())
        })));
        let dept = Department {
            id: Some(1),
            name: "Sales".to_string(),
        };
        match service.remove(&dept) {
            Err(DomainError::Integrity(msg)) => assert!(msg.contains("referenced")),
            other => panic!("expected integrity violation, got {other:?}"),
        }
    }

    #[test]
    fn backend_failures_become_persistence_errors() {
        let service = EntityService::new(Arc::new(StubStore::failing(|| {
            StoreError::Backend("registry file unreachable".into())
        })));
        match service.list() {
            Err(DomainError::Persistence(msg)) => assert!(msg.contains("unreachable")),
            other => panic!("expected persistence error, got {other:?}"),
        }
    }
}
