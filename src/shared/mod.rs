//! Cross-cutting concerns: configuration and formatting conventions.

pub mod config;
pub mod format;

pub use config::AppConfig;
pub use format::FormatConfig;
