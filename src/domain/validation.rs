//! Field-level validation. One submission attempt accumulates every
//! violation before anything reaches the store, so the form can show
//! all messages at once instead of failing on the first bad field.

use crate::domain::DomainError;
use std::collections::BTreeMap;
use std::fmt;

/// Field-key → message mapping produced by one validation pass.
/// At most one message per field: a later `insert` for the same key
/// overwrites the earlier one. That is the accumulation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorSet {
    errors: BTreeMap<String, String>,
}

impl FieldErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Collects field violations during one submission attempt.
#[derive(Debug, Default)]
pub struct ValidationAccumulator {
    errors: FieldErrorSet,
}

impl ValidationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. A second message for the same field replaces
    /// the first.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field, message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrorSet {
        &self.errors
    }

    /// Fails with `DomainError::Validation` when any violation was
    /// recorded; a no-op otherwise. Consumes the accumulator — one pass,
    /// one verdict.
    pub fn raise_if_any(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.errors))
        }
    }
}
