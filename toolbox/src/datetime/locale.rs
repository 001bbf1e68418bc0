//! Locale-aware formatter backed by chrono's locale tables.
//!
//! Names come from the locale, and so does the order of day, month and
//! year: it is read off the locale's numeric date (`%x`) once, when the
//! formatter is built.

use super::{DatetimeFormatter, DatetimeKind, capitalize_words, compile};
use crate::error::ToolboxError;
use chrono::format::StrftimeItems;
use chrono::{DateTime, FixedOffset, Locale, NaiveDate};
use std::fmt::Write as _;

/// Medium time: the locale's preferred time representation.
const MEDIUM_TIME: &str = "%X";

/// Order of day, month and year in a locale's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// `Dimanche 15 Janvier 2023`
    DayMonthYear,
    /// `Sunday, January 15, 2023`
    MonthDayYear,
    /// `2023 1月 15 日曜日`
    YearMonthDay,
}

impl DateOrder {
    /// Detect the order from the locale's `%x` rendering of 2003-11-22.
    ///
    /// Locales whose numeric date cannot be read (non-Latin digits, for
    /// instance) get [`DateOrder::DayMonthYear`].
    #[must_use]
    pub fn of(locale: Locale) -> Self {
        let Some(reference) = NaiveDate::from_ymd_opt(2003, 11, 22) else {
            return Self::DayMonthYear;
        };
        let mut rendered = String::new();
        if write!(rendered, "{}", reference.format_localized("%x", locale)).is_err() {
            return Self::DayMonthYear;
        }
        match (rendered.find("22"), rendered.find("11"), rendered.find("03")) {
            (Some(day), Some(month), Some(year)) if year < month && month < day => {
                Self::YearMonthDay
            }
            (Some(day), Some(month), _) if month < day => Self::MonthDayYear,
            _ => Self::DayMonthYear,
        }
    }

    const fn full_date(self) -> &'static str {
        match self {
            Self::DayMonthYear => "%A %-d %B %Y",
            Self::MonthDayYear => "%A, %B %-d, %Y",
            Self::YearMonthDay => "%Y %B %-d %A",
        }
    }

    const fn full_date_medium_time(self) -> &'static str {
        match self {
            Self::DayMonthYear => "%A %-d %B %Y %X",
            Self::MonthDayYear => "%A, %B %-d, %Y %X",
            Self::YearMonthDay => "%Y %B %-d %A %X",
        }
    }
}

/// Renders full dates and medium times in the configured locale,
/// capitalizing every word.
#[derive(Debug, Clone, Copy)]
pub struct LocaleFormatter {
    locale: Locale,
    order: DateOrder,
}

impl LocaleFormatter {
    /// Create a formatter for a supported locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            order: DateOrder::of(locale),
        }
    }

    /// The locale used for names.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// The detected day, month and year order.
    #[must_use]
    pub const fn date_order(&self) -> DateOrder {
        self.order
    }

    const fn pattern(&self, kind: DatetimeKind) -> &'static str {
        match kind {
            DatetimeKind::Datetime => self.order.full_date_medium_time(),
            DatetimeKind::Date => self.order.full_date(),
            DatetimeKind::Time => MEDIUM_TIME,
        }
    }
}

impl DatetimeFormatter for LocaleFormatter {
    fn name(&self) -> &'static str {
        "locale"
    }

    fn format(
        &self,
        datetime: &DateTime<FixedOffset>,
        kind: DatetimeKind,
    ) -> Result<String, ToolboxError> {
        let pattern = self.pattern(kind);
        let items = compile(StrftimeItems::new_with_locale(pattern, self.locale), pattern)?;
        let mut out = String::new();
        write!(
            out,
            "{}",
            datetime.format_localized_with_items(items.iter(), self.locale)
        )
        .map_err(|_| ToolboxError::format(pattern))?;
        Ok(capitalize_words(&out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::parse_datetime;

    fn sample() -> DateTime<FixedOffset> {
        parse_datetime("2023-01-15T10:30:00Z").unwrap()
    }

    #[test]
    fn test_french_date() {
        let formatter = LocaleFormatter::new(Locale::fr_FR);
        let out = formatter.format(&sample(), DatetimeKind::Date).unwrap();
        assert_eq!(out, "Dimanche 15 Janvier 2023");
    }

    #[test]
    fn test_english_date() {
        let formatter = LocaleFormatter::new(Locale::en_US);
        let out = formatter.format(&sample(), DatetimeKind::Date).unwrap();
        assert_eq!(out, "Sunday, January 15, 2023");
    }

    #[test]
    fn test_date_order_follows_locale() {
        assert_eq!(DateOrder::of(Locale::fr_FR), DateOrder::DayMonthYear);
        assert_eq!(DateOrder::of(Locale::de_DE), DateOrder::DayMonthYear);
        assert_eq!(DateOrder::of(Locale::en_GB), DateOrder::DayMonthYear);
        assert_eq!(DateOrder::of(Locale::en_US), DateOrder::MonthDayYear);
        assert_eq!(DateOrder::of(Locale::hu_HU), DateOrder::YearMonthDay);
        assert_eq!(DateOrder::of(Locale::ja_JP), DateOrder::YearMonthDay);
    }

    #[test]
    fn test_german_date() {
        let formatter = LocaleFormatter::new(Locale::de_DE);
        let out = formatter.format(&sample(), DatetimeKind::Date).unwrap();
        assert_eq!(out, "Sonntag 15 Januar 2023");
    }

    #[test]
    fn test_french_time() {
        let formatter = LocaleFormatter::new(Locale::fr_FR);
        let out = formatter.format(&sample(), DatetimeKind::Time).unwrap();
        assert_eq!(out, "10:30:00");
    }

    #[test]
    fn test_datetime_joins_date_and_time() {
        let formatter = LocaleFormatter::new(Locale::fr_FR);
        let date = formatter.format(&sample(), DatetimeKind::Date).unwrap();
        let time = formatter.format(&sample(), DatetimeKind::Time).unwrap();
        let both = formatter.format(&sample(), DatetimeKind::Datetime).unwrap();
        assert_eq!(both, format!("{date} {time}"));
    }

    #[test]
    fn test_name() {
        assert_eq!(LocaleFormatter::new(Locale::de_DE).name(), "locale");
        assert_eq!(LocaleFormatter::new(Locale::de_DE).locale(), Locale::de_DE);
        assert_eq!(
            LocaleFormatter::new(Locale::en_US).date_order(),
            DateOrder::MonthDayYear
        );
    }
}
