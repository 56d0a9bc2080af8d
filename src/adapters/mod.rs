//! Infrastructure adapters. Implement outbound ports.
//!
//! Filesystem registry and console UI. Map errors to DomainError.

pub mod persistence;
pub mod ui;
