//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use crate::domain::validation::FieldErrorSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// One submission attempt produced field violations. Recoverable:
    /// the caller redisplays per-field messages; nothing reached the store.
    #[error("validation failed: {0}")]
    Validation(FieldErrorSet),

    /// A delete/update hit a referential-integrity conflict (e.g. a
    /// department still referenced by a seller). Recoverable; surfaced
    /// as a distinct user-facing message.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Generic store/collaborator failure. Recoverable; reported once
    /// per attempt, never retried.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Wiring defect (e.g. a seller submitted without a department
    /// selection). Programmer error; never handled locally.
    #[error("configuration error: {0}")]
    Config(String),
}
