//! Predicates over untrusted input.
//!
//! String, key and integer validators mean "already in sanitized form".
//! Email and URL validators check structure instead. None of them fail.

use crate::datetime::{format_with_pattern, parse_with_pattern};
use crate::sanitize::{sanitize_int, sanitize_key, sanitize_string};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use url::Url;

const MAX_EMAIL_LEN: usize = 320;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;

/// Schemes whose URLs must carry a host.
const HOST_REQUIRED_SCHEMES: [&str; 5] = ["http", "https", "ftp", "ws", "wss"];

#[allow(clippy::expect_used)]
static EMAIL_LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("email local part pattern is valid")
});

#[allow(clippy::expect_used)]
static DOMAIN_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("domain label pattern is valid")
});

/// Check that a string is unchanged by [`sanitize_string`].
#[must_use]
pub fn validate_string(input: &str) -> bool {
    sanitize_string(input) == input
}

/// Check that a key is unchanged by [`sanitize_key`].
#[must_use]
pub fn validate_key(key: &str) -> bool {
    sanitize_key(key) == key
}

/// Check that a string is the canonical decimal form of an integer.
///
/// `"42"` and `"-7"` are valid; `"042"`, `"+1"`, `"-0"` and `"4.0"` are not.
#[must_use]
pub fn validate_int(input: &str) -> bool {
    sanitize_int(input).to_string() == input
}

/// Check that an email address is structurally valid.
///
/// The local part must be a dot-atom of RFC 5322 `atext` characters; the
/// domain must be dot-separated hostname labels or a bracketed IPv4 /
/// `IPv6:` literal. Only ASCII addresses are accepted.
///
/// # Examples
///
/// ```
/// use input_toolbox::validate::validate_email;
///
/// assert!(validate_email("user.name+tag@example.co.uk"));
/// assert!(!validate_email("user@@example.com"));
/// ```
#[must_use]
pub fn validate_email(email: &str) -> bool {
    if !email.is_ascii() || email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    local.len() <= MAX_LOCAL_PART_LEN && EMAIL_LOCAL_PART.is_match(local) && is_email_domain(domain)
}

fn is_email_domain(domain: &str) -> bool {
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        return literal.parse::<Ipv4Addr>().is_ok()
            || literal
                .strip_prefix("IPv6:")
                .is_some_and(|v6| v6.parse::<Ipv6Addr>().is_ok());
    }

    domain.len() <= MAX_DOMAIN_LEN && domain.split('.').all(|label| DOMAIN_LABEL.is_match(label))
}

/// Check that a URL is structurally valid.
///
/// The URL must be ASCII without whitespace or control characters, parse
/// as an absolute URL, and carry a host for network schemes.
#[must_use]
pub fn validate_url(url: &str) -> bool {
    if !url.is_ascii() || url.chars().any(|c| c.is_ascii_whitespace() || c.is_ascii_control()) {
        return false;
    }

    Url::parse(url).is_ok_and(|parsed| {
        !HOST_REQUIRED_SCHEMES.contains(&parsed.scheme())
            || parsed.host_str().is_some_and(|host| !host.is_empty())
    })
}

/// Check that a datetime string is exactly what `format` renders for it.
///
/// The input is parsed as directed by `format` first, then with the
/// generic parser. Differences in whitespace or casing make it invalid.
#[must_use]
pub fn validate_datetime(datetime: &str, format: &str) -> bool {
    parse_with_pattern(datetime, format)
        .and_then(|parsed| format_with_pattern(&parsed, format))
        .is_ok_and(|formatted| formatted == datetime)
}
