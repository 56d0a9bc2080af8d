//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::{Department, Entity, Seller};
pub use errors::DomainError;
pub use validation::{FieldErrorSet, ValidationAccumulator};
