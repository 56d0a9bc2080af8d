//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the interactive console invokes application use cases.
pub trait InputPort {
    /// Run the menu loop until the operator quits.
    fn run(&self) -> Result<(), DomainError>;
}
