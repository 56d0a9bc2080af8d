//! Application configuration. Data file path, formatting conventions.

use crate::shared::format::FormatConfig;
use serde::Deserialize;

/// Default location of the JSON registry file.
pub const DEFAULT_DATA_PATH: &str = "data/registry.json";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Path of the registry file. Read from SALESDESK_DATA_PATH.
    #[serde(default)]
    pub data_path: Option<String>,

    /// chrono day/month/year pattern for date fields. Read from SALESDESK_DATE_PATTERN.
    #[serde(default)]
    pub date_pattern: Option<String>,

    /// Decimal separator for salary fields. Read from SALESDESK_DECIMAL_SEPARATOR.
    #[serde(default)]
    pub decimal_separator: Option<String>,

    /// Grouping separator, stripped when parsing salary input. Read from SALESDESK_GROUPING_SEPARATOR.
    #[serde(default)]
    pub grouping_separator: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("SALESDESK"));
        if let Ok(path) = std::env::var("SALESDESK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the registry file path. Defaults to DEFAULT_DATA_PATH.
    pub fn data_path_or_default(&self) -> String {
        self.data_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
    }

    /// Formatting configuration for every parse/render call. Unset or
    /// empty values fall back to the pt-PT defaults.
    pub fn format_config(&self) -> FormatConfig {
        let defaults = FormatConfig::default();
        FormatConfig {
            date_pattern: self
                .date_pattern
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.date_pattern),
            decimal_separator: self
                .decimal_separator
                .as_deref()
                .and_then(|s| s.chars().next())
                .unwrap_or(defaults.decimal_separator),
            grouping_separator: self
                .grouping_separator
                .as_deref()
                .and_then(|s| s.chars().next())
                .unwrap_or(defaults.grouping_separator),
        }
    }
}
