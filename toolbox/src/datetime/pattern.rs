//! Fallback formatter using the configured default patterns.

use super::{DatetimeFormatter, DatetimeKind, format_with_pattern};
use crate::config::Config;
use crate::error::ToolboxError;
use chrono::{DateTime, FixedOffset};

/// Renders datetimes with fixed date and time patterns.
///
/// The datetime kind joins both patterns with a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    date_format: String,
    time_format: String,
}

impl PatternFormatter {
    /// Create a formatter from explicit patterns.
    #[must_use]
    pub fn new(date_format: impl Into<String>, time_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            time_format: time_format.into(),
        }
    }

    /// Create a formatter from the configured default patterns.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.default_date_format, &config.default_time_format)
    }

    fn pattern(&self, kind: DatetimeKind) -> String {
        match kind {
            DatetimeKind::Datetime => format!("{} {}", self.date_format, self.time_format),
            DatetimeKind::Date => self.date_format.clone(),
            DatetimeKind::Time => self.time_format.clone(),
        }
    }
}

impl DatetimeFormatter for PatternFormatter {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn format(
        &self,
        datetime: &DateTime<FixedOffset>,
        kind: DatetimeKind,
    ) -> Result<String, ToolboxError> {
        format_with_pattern(datetime, &self.pattern(kind))
    }
}
