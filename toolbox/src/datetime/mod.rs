//! Datetime parsing and formatting.
//!
//! Patterns use chrono's strftime syntax. When a caller gives no explicit
//! pattern, a [`DatetimeFormatter`] chosen once at startup renders the
//! value: [`LocaleFormatter`] when the configured locale is supported,
//! [`PatternFormatter`] with the configured default patterns otherwise.

mod locale;
mod pattern;

pub use locale::{DateOrder, LocaleFormatter};
pub use pattern::PatternFormatter;

use crate::config::Config;
use crate::error::ToolboxError;
use chrono::format::{self as chrono_format, Item, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt::{self, Write as _};
use tracing::debug;

/// ISO 8601 pattern with a numeric offset, e.g. `2023-01-15T10:30:00+0000`.
pub const ISO8601: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Offset-aware layouts accepted besides RFC 3339 and RFC 2822.
const OFFSET_PATTERNS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Layouts without offset, interpreted as UTC.
const NAIVE_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_PATTERN: &str = "%Y-%m-%d";

/// Year assumed when a pattern carries none. A leap year, so `%m-%d`
/// accepts February 29th.
const ANCHOR_YEAR: i64 = 2000;

/// What part of a datetime to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DatetimeKind {
    /// Date and time
    #[default]
    Datetime,
    /// Date only
    Date,
    /// Time only
    Time,
}

impl DatetimeKind {
    /// Get the kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl From<&str> for DatetimeKind {
    /// Unknown names fall back to [`DatetimeKind::Datetime`].
    fn from(kind: &str) -> Self {
        match kind {
            "date" => Self::Date,
            "time" => Self::Time,
            _ => Self::Datetime,
        }
    }
}

impl fmt::Display for DatetimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders datetimes when the caller supplies no explicit pattern.
pub trait DatetimeFormatter: Send + Sync + fmt::Debug {
    /// Short name of the formatter, for logs.
    fn name(&self) -> &'static str;

    /// Render `datetime` for the requested `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::Format`] if the resolved pattern is invalid.
    fn format(&self, datetime: &DateTime<FixedOffset>, kind: DatetimeKind)
    -> Result<String, ToolboxError>;
}

/// Check whether locale-aware formatting is available for `name`.
///
/// Accepts `fr_FR`, `fr-FR` and `fr_FR.UTF-8` spellings.
#[must_use]
pub fn probe_locale(name: &str) -> Option<Locale> {
    let base = name
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_");
    if base.is_empty() {
        return None;
    }
    Locale::try_from(base.as_str()).ok()
}

/// Select the formatter for a configuration.
#[must_use]
pub fn formatter_for(config: &Config) -> Box<dyn DatetimeFormatter> {
    let locale = if config.locale_formatting {
        probe_locale(&config.locale)
    } else {
        None
    };

    let formatter: Box<dyn DatetimeFormatter> = match locale {
        Some(locale) => Box::new(LocaleFormatter::new(locale)),
        None => Box::new(PatternFormatter::from_config(config)),
    };
    debug!(
        locale = %config.locale,
        formatter = formatter.name(),
        "datetime formatter selected"
    );
    formatter
}

/// Parse a datetime string.
///
/// Accepted layouts, after trimming surrounding whitespace: RFC 3339,
/// ISO 8601 with a `+hhmm` offset, RFC 2822, `YYYY-MM-DD HH:MM[:SS[.f]]`
/// (space or `T` separated, read as UTC) and `YYYY-MM-DD` (midnight UTC).
///
/// # Errors
///
/// Returns [`ToolboxError::Parse`] if no layout matches.
pub fn parse_datetime(raw: &str) -> Result<DateTime<FixedOffset>, ToolboxError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ToolboxError::parse(raw));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    if let Some(dt) = OFFSET_PATTERNS
        .iter()
        .find_map(|p| DateTime::parse_from_str(s, p).ok())
    {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt);
    }
    if let Some(naive) = NAIVE_PATTERNS
        .iter()
        .find_map(|p| NaiveDateTime::parse_from_str(s, p).ok())
    {
        return Ok(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(s, DATE_PATTERN)
        .ok()
        .and_then(midnight_utc)
        .ok_or_else(|| ToolboxError::parse(raw))
}

/// Parse a datetime string as laid out by `pattern`, then generically.
///
/// Fields the pattern does not carry are anchored: year 2000, January,
/// the first day matching any parsed weekday, midnight, UTC. A time-only
/// pattern such as `%H:%M` or a partial date such as `%B %Y` therefore
/// parses back what it rendered.
///
/// # Errors
///
/// Returns [`ToolboxError::Parse`] if neither the pattern nor the generic
/// layouts match.
pub fn parse_with_pattern(
    raw: &str,
    pattern: &str,
) -> Result<DateTime<FixedOffset>, ToolboxError> {
    match parse_fields(raw, pattern) {
        Some(dt) => Ok(dt),
        None => parse_datetime(raw),
    }
}

fn parse_fields(raw: &str, pattern: &str) -> Option<DateTime<FixedOffset>> {
    let mut parsed = Parsed::new();
    chrono_format::parse(&mut parsed, raw, StrftimeItems::new(pattern)).ok()?;
    if parsed.timestamp().is_some() {
        return parsed.to_datetime().ok();
    }

    let week_based = parsed.ordinal().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.isoweek().is_some();
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some()
        || parsed.isoyear_mod_100().is_some();

    if !has_year {
        parsed.set_year(ANCHOR_YEAR).ok()?;
    }
    if !week_based && parsed.month().is_none() {
        parsed.set_month(1).ok()?;
    }
    if parsed.hour_div_12().is_none() {
        parsed.set_ampm(false).ok()?;
    }
    if parsed.hour_mod_12().is_none() {
        parsed.set_hour12(12).ok()?;
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0).ok()?;
    }

    let offset = parsed.offset().unwrap_or(0);
    if week_based || parsed.day().is_some() {
        return resolve(&parsed, offset);
    }
    // Seven consecutive days cover every weekday a pattern may name.
    (1..=7).find_map(|day| {
        let mut candidate = parsed.clone();
        candidate.set_day(day).ok()?;
        resolve(&candidate, offset)
    })
}

fn resolve(parsed: &Parsed, offset: i32) -> Option<DateTime<FixedOffset>> {
    let naive = parsed.to_naive_datetime_with_offset(offset).ok()?;
    FixedOffset::east_opt(offset)?
        .from_local_datetime(&naive)
        .single()
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Format a datetime with a strftime pattern.
///
/// # Errors
///
/// Returns [`ToolboxError::Format`] if the pattern contains an unknown
/// specifier or cannot be rendered for the value.
pub fn format_with_pattern(
    datetime: &DateTime<FixedOffset>,
    pattern: &str,
) -> Result<String, ToolboxError> {
    let items = compile(StrftimeItems::new(pattern), pattern)?;
    let mut out = String::with_capacity(pattern.len() * 2);
    write!(out, "{}", datetime.format_with_items(items.iter()))
        .map_err(|_| ToolboxError::format(pattern))?;
    Ok(out)
}

/// Collect strftime items, rejecting patterns with unknown specifiers.
fn compile<'a>(
    items: StrftimeItems<'a>,
    pattern: &str,
) -> Result<Vec<Item<'a>>, ToolboxError> {
    let items: Vec<Item<'a>> = items.collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ToolboxError::format(pattern));
    }
    Ok(items)
}

/// Upper-case the first character of every whitespace-delimited word.
///
/// # Examples
///
/// ```
/// use input_toolbox::datetime::capitalize_words;
///
/// assert_eq!(capitalize_words("dimanche 15 janvier"), "Dimanche 15 Janvier");
/// ```
#[must_use]
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}
