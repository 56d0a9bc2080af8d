//! Locale-dependent parsing and rendering of form field text.
//!
//! Formatting rules travel in a `FormatConfig` value passed into every
//! call; nothing here touches process-wide locale state.

use chrono::NaiveDate;

/// Explicit formatting configuration for decimal and date fields.
/// Defaults match the pt-PT conventions the record data uses:
/// `1.234,56` and `31/12/1990`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// chrono pattern for date fields, day/month/year order.
    pub date_pattern: String,
    /// Separator between the integer and fractional part.
    pub decimal_separator: char,
    /// Thousands separator, stripped on parse, never emitted.
    pub grouping_separator: char,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date_pattern: "%d/%m/%Y".to_string(),
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

impl FormatConfig {
    /// Parse a decimal field. Returns `None` for empty or malformed text;
    /// the caller records a field error instead of failing the parse.
    pub fn parse_decimal(&self, text: &str) -> Option<f64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized: String = trimmed
            .chars()
            .filter(|&c| c != self.grouping_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();
        normalized.parse().ok()
    }

    /// Render a decimal with two fractional digits and the configured
    /// separator. No grouping is emitted.
    pub fn format_decimal(&self, value: f64) -> String {
        format!("{value:.2}").replace('.', &self.decimal_separator.to_string())
    }

    /// Parse a date field with the configured day/month/year pattern.
    pub fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), &self.date_pattern).ok()
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_pattern).to_string()
    }
}

/// Tolerant identity parse: empty or non-numeric text yields `None`,
/// which downstream treats as "unsaved entity" and routes to insert.
/// An operator who clears the id field silently turns an edit into a
/// create — long-standing behavior that callers rely on.
pub fn try_parse_id(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}
