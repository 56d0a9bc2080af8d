//! Application use cases. Orchestrate domain logic via ports.

pub mod drafts;
pub mod entity_service;
pub mod form_session;
pub mod list_session;
pub mod notifier;

pub use drafts::{DepartmentDraft, Draft, SellerDraft};
pub use entity_service::EntityService;
pub use form_session::{FormSession, SubmitOutcome};
pub use list_session::ListSession;
pub use notifier::{ChangeListener, ChangeNotifier, Subscription};
