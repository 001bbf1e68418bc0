//! Shared proptest generators.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use input_toolbox::{ComparisonOperator, Connector};
use proptest::prelude::*;

/// Generate arbitrary printable strings, including markup and quotes.
pub fn untrusted_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Z0-9 <>/\"'&=;\\-_*\t\n\u{0}]{0,60}",
        "(<[a-z]{1,5}>)?[a-zA-Z ]{0,20}(</[a-z]{1,5}>)?",
    ]
}

/// Generate strings made only of characters kept by key sanitization.
pub fn canonical_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_*\\-]{0,40}"
}

/// Generate key-shaped strings with upper-case letters.
pub fn mixed_case_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_*\\-]{0,40}"
}

/// Generate whitelisted comparison operators.
pub fn operator_strategy() -> impl Strategy<Value = ComparisonOperator> {
    proptest::sample::select(ComparisonOperator::ALL.to_vec())
}

/// Generate whitelisted connectors.
pub fn connector_strategy() -> impl Strategy<Value = Connector> {
    proptest::sample::select(Connector::ALL.to_vec())
}

/// Generate tokens that look like SQL but are outside both whitelists.
pub fn non_whitelisted_token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("is".to_string()),
        Just("Is Null".to_string()),
        Just("like".to_string()),
        Just("and".to_string()),
        Just("Or".to_string()),
        Just("XOR".to_string()),
        Just("==".to_string()),
        Just("= 1 OR 1=1".to_string()),
        Just(" AND".to_string()),
        Just("IS  NULL".to_string()),
        "[a-z]{1,10}",
    ]
}

/// Generate numeric-looking strings with optional noise.
pub fn numeric_string_strategy() -> impl Strategy<Value = String> {
    (
        "[ \t]{0,2}",
        "[+-]?",
        "[0-9]{0,12}",
        "(\\.[0-9]{0,4})?",
        "[a-z ]{0,4}",
    )
        .prop_map(|(ws, sign, int, frac, tail)| format!("{ws}{sign}{int}{frac}{tail}"))
}

/// Generate datetimes between 1970 and 2100 with whole-minute offsets.
pub fn datetime_strategy() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (
        1970i32..2100,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..60,
        -12i32..=14,
    )
        .prop_filter_map(
            "valid datetime",
            |(year, month, day, hour, minute, second, offset_hours)| {
                let offset = FixedOffset::east_opt(offset_hours * 3600)?;
                let naive = NaiveDate::from_ymd_opt(year, month, day)?
                    .and_hms_opt(hour, minute, second)?;
                offset.from_local_datetime(&naive).single()
            },
        )
}

/// Generate patterns, full and partial, used by the datetime round-trip law.
pub fn round_trip_pattern_strategy() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec![
        "%Y-%m-%d",
        "%H:%M",
        "%H:%M:%S",
        "%Y",
        "%Y-%m",
        "%B %Y",
        "%A %H:%M",
        "%I:%M %p",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%z",
        "%d/%m/%Y",
        "%d/%m/%Y %H:%M",
    ])
}
