//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::Entity;
use thiserror::Error;

/// Failure signals from the persistence collaborator. The service layer
/// translates these into the DomainError taxonomy; only the
/// referential-integrity case stays distinguishable for callers.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The entity is referenced by another persisted entity.
    #[error("referential integrity: {0}")]
    Integrity(String),

    /// No persisted entity with this id.
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: i32 },

    /// I/O or backend failure.
    #[error("store backend: {0}")]
    Backend(String),
}

/// Persistence collaborator. All mutable record state lives behind this
/// port; the service layer above it is stateless.
pub trait EntityStore<T: Entity>: Send + Sync {
    /// All persisted entities in primary-key order.
    fn find_all(&self) -> Result<Vec<T>, StoreError>;

    /// Persist a new entity. Returns the entity with its id populated.
    fn insert(&self, entity: &T) -> Result<T, StoreError>;

    /// Overwrite the persisted entity keyed by `entity.id()`.
    fn update(&self, entity: &T) -> Result<(), StoreError>;

    /// Delete the persisted entity keyed by `entity.id()`. Fails with
    /// `StoreError::Integrity` when another entity still references it.
    fn delete(&self, entity: &T) -> Result<(), StoreError>;
}

/// Yes/no confirmation prompt, asked before destructive actions.
pub trait ConfirmPort: Send + Sync {
    fn ask(&self, title: &str, message: &str) -> bool;
}
