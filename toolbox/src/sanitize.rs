//! Best-effort normalization of untrusted input.
//!
//! None of these functions fail: the worst outcome is an empty string or
//! `0`. Every `sanitize_*` function is idempotent. [`esc_html`] is an
//! escaper, not a sanitizer, and escapes `&` again on each call.

use crate::whitelist::{ComparisonOperator, Connector};
use std::num::IntErrorKind;
use tracing::{debug, trace};

/// Characters kept by [`sanitize_email`] besides ASCII letters and digits.
const EMAIL_EXTRA: &str = "!#$%&'*+-=?^_`{|}~@.[]";

/// Characters kept by [`sanitize_url`] besides ASCII letters and digits.
const URL_EXTRA: &str = "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

/// Escape HTML special characters for embedding in markup or attributes.
///
/// # Examples
///
/// ```
/// use input_toolbox::sanitize::esc_html;
///
/// assert_eq!(
///     esc_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
/// );
/// ```
#[must_use]
pub fn esc_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip tags, drop NUL characters and encode quotes.
///
/// Rules, applied in order:
/// 1. NUL characters are removed.
/// 2. A `<` followed by whitespace is kept as text. Any other `<` opens a
///    tag that extends to its matching `>`, counting nested `<`. A tag
///    left open swallows the rest of the input. A `>` outside a tag is
///    kept.
/// 3. `'` becomes `&#39;` and `"` becomes `&#34;`.
///
/// # Examples
///
/// ```
/// use input_toolbox::sanitize::sanitize_string;
///
/// assert_eq!(sanitize_string("<b>Hello</b> \"world\""), "Hello &#34;world&#34;");
/// assert_eq!(sanitize_string("1 < 2 > 0"), "1 < 2 > 0");
/// ```
#[must_use]
pub fn sanitize_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut depth = 0usize;
    let mut chars = input.chars().filter(|&c| c != '\0').peekable();

    while let Some(c) = chars.next() {
        if depth > 0 {
            match c {
                '<' => depth += 1,
                '>' => depth -= 1,
                _ => {}
            }
            continue;
        }

        match c {
            '<' if chars.peek().is_some_and(|next| next.is_whitespace()) => out.push('<'),
            '<' => depth = 1,
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }

    if depth > 0 {
        trace!("unterminated tag stripped to end of input");
    }
    out
}

/// Lower-case a key and keep only `[a-z0-9_*-]`.
///
/// # Examples
///
/// ```
/// use input_toolbox::sanitize::sanitize_key;
///
/// assert_eq!(sanitize_key("Post_Title; DROP TABLE"), "post_titledroptable");
/// ```
#[must_use]
pub fn sanitize_key(key: &str) -> String {
    let out: String = key
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '*' | '-'))
        .collect();
    log_stripped("key", key, &out);
    out
}

/// Return the operator if it is whitelisted, otherwise an empty string.
#[must_use]
pub fn sanitize_operator(operator: &str) -> &'static str {
    operator.parse::<ComparisonOperator>().map_or_else(
        |_| {
            debug!(operator = ?operator, "comparison operator rejected");
            ""
        },
        |op| op.as_str(),
    )
}

/// Return the connector if it is `AND` or `OR`, otherwise an empty string.
#[must_use]
pub fn sanitize_condition(condition: &str) -> &'static str {
    condition.parse::<Connector>().map_or_else(
        |_| {
            debug!(condition = ?condition, "condition connector rejected");
            ""
        },
        |connector| connector.as_str(),
    )
}

/// Convert a string to an integer by truncation.
///
/// Leading whitespace is skipped, then the longest numeric prefix
/// `[+-]digits[.digits][e[+-]digits]` is read and truncated toward zero.
/// Values out of range saturate at `i64::MIN` / `i64::MAX`. Input without
/// a numeric prefix yields `0`.
///
/// # Examples
///
/// ```
/// use input_toolbox::sanitize::sanitize_int;
///
/// assert_eq!(sanitize_int("42.9"), 42);
/// assert_eq!(sanitize_int("-42.9"), -42);
/// assert_eq!(sanitize_int("  12abc"), 12);
/// assert_eq!(sanitize_int("1e3"), 1000);
/// assert_eq!(sanitize_int("abc"), 0);
/// ```
#[must_use]
pub fn sanitize_int(input: &str) -> i64 {
    let s = input.trim_start_matches([' ', '\t', '\n', '\r', '\x0B', '\x0C']);
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(sign_len);
    let int_digits = end - sign_len;
    let mut fractional = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if int_digits > 0 || frac_end > end + 1 {
            end = frac_end;
            fractional = true;
        }
    }

    if end == sign_len {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
            fractional = true;
        }
    }

    let numeric = &s[..end];
    if fractional {
        numeric.parse::<f64>().map_or(0, truncate_saturating)
    } else {
        match numeric.parse::<i64>() {
            Ok(value) => value,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => 0,
            },
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_saturating(value: f64) -> i64 {
    // `as` saturates out-of-range values and maps NaN to 0.
    value.trunc() as i64
}

/// Remove every character not allowed in an email address.
///
/// The result is not guaranteed to be a valid address.
#[must_use]
pub fn sanitize_email(email: &str) -> String {
    let out = keep_ascii(email, EMAIL_EXTRA);
    log_stripped("email", email, &out);
    out
}

/// Remove every character not allowed in a URL.
///
/// The result is not guaranteed to be a valid URL.
#[must_use]
pub fn sanitize_url(url: &str) -> String {
    let out = keep_ascii(url, URL_EXTRA);
    log_stripped("url", url, &out);
    out
}

fn keep_ascii(input: &str, extra: &str) -> String {
    input
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || extra.contains(c))
        .collect()
}

/// Values are never logged, only how many characters were removed.
fn log_stripped(field: &'static str, input: &str, out: &str) {
    let removed = input.chars().count() - out.chars().count();
    if removed > 0 {
        trace!(field, removed, "characters stripped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_stripping_is_logged_without_value() {
        let logs = capture_logs(|| {
            assert_eq!(sanitize_email("j\u{f6}hn@example.com"), "jhn@example.com");
        });
        assert!(logs.contains("characters stripped"));
        assert!(logs.contains("email"));
        assert!(!logs.contains("example.com"));

        let logs = capture_logs(|| {
            assert_eq!(sanitize_key("Post Title"), "posttitle");
            assert_eq!(sanitize_url("https://a.b/c d"), "https://a.b/cd");
        });
        assert!(logs.contains("key"));
        assert!(logs.contains("url"));
        assert!(!logs.contains("Post"));
    }

    #[test]
    fn test_clean_input_is_not_logged() {
        let logs = capture_logs(|| {
            assert_eq!(sanitize_key("post_title"), "post_title");
            assert_eq!(sanitize_email("john@example.com"), "john@example.com");
        });
        assert!(!logs.contains("characters stripped"));
    }

    #[test]
    fn test_esc_html_all_specials() {
        assert_eq!(esc_html("&\"'<>"), "&amp;&quot;&#039;&lt;&gt;");
        assert_eq!(esc_html(""), "");
        assert_eq!(esc_html("plain text"), "plain text");
    }

    #[test]
    fn test_esc_html_escapes_ampersand_again() {
        assert_eq!(esc_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_sanitize_string_strips_tags() {
        assert_eq!(sanitize_string("<script>alert(1)</script>Hi"), "alert(1)Hi");
        assert_eq!(sanitize_string("a<b<c>d>e"), "ae");
        assert_eq!(sanitize_string("text <unterminated"), "text ");
        assert_eq!(sanitize_string("ends with <"), "ends with ");
    }

    #[test]
    fn test_sanitize_string_keeps_comparisons() {
        assert_eq!(sanitize_string("a < b"), "a < b");
        assert_eq!(sanitize_string("a > b"), "a > b");
    }

    #[test]
    fn test_sanitize_string_encodes_quotes_and_drops_nul() {
        assert_eq!(sanitize_string("it's \"ok\""), "it&#39;s &#34;ok&#34;");
        assert_eq!(sanitize_string("nu\0ll"), "null");
        assert_eq!(sanitize_string("<\0b>x"), "x");
    }

    #[test]
    fn test_sanitize_string_leaves_ampersand() {
        assert_eq!(sanitize_string("Tom & Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("Post_ID"), "post_id");
        assert_eq!(sanitize_key("count(*)"), "count*");
        assert_eq!(sanitize_key("user-name"), "user-name");
        assert_eq!(sanitize_key("naïve"), "nave");
        assert_eq!(sanitize_key("`id`; --"), "id--");
        assert_eq!(sanitize_key(""), "");
    }

    #[test]
    fn test_sanitize_operator() {
        assert_eq!(sanitize_operator("<=>"), "<=>");
        assert_eq!(sanitize_operator("IS NOT NULL"), "IS NOT NULL");
        assert_eq!(sanitize_operator("is"), "");
        assert_eq!(sanitize_operator("= 1 OR 1=1"), "");
        assert_eq!(sanitize_operator(""), "");
    }

    #[test]
    fn test_sanitize_condition() {
        assert_eq!(sanitize_condition("AND"), "AND");
        assert_eq!(sanitize_condition("OR"), "OR");
        assert_eq!(sanitize_condition("and"), "");
        assert_eq!(sanitize_condition("XOR"), "");
    }

    #[test]
    fn test_sanitize_int_truncation() {
        assert_eq!(sanitize_int("42"), 42);
        assert_eq!(sanitize_int("42.9"), 42);
        assert_eq!(sanitize_int("-42.9"), -42);
        assert_eq!(sanitize_int("-0.9"), 0);
        assert_eq!(sanitize_int(".5"), 0);
        assert_eq!(sanitize_int("7."), 7);
        assert_eq!(sanitize_int("+8"), 8);
    }

    #[test]
    fn test_sanitize_int_non_numeric() {
        assert_eq!(sanitize_int("abc"), 0);
        assert_eq!(sanitize_int(""), 0);
        assert_eq!(sanitize_int("-"), 0);
        assert_eq!(sanitize_int("."), 0);
        assert_eq!(sanitize_int("abc123"), 0);
    }

    #[test]
    fn test_sanitize_int_prefix_and_whitespace() {
        assert_eq!(sanitize_int("  12abc"), 12);
        assert_eq!(sanitize_int("\t\n-3 apples"), -3);
        assert_eq!(sanitize_int("12 34"), 12);
    }

    #[test]
    fn test_sanitize_int_exponent() {
        assert_eq!(sanitize_int("1e3"), 1000);
        assert_eq!(sanitize_int("2.5E2"), 250);
        assert_eq!(sanitize_int("1e-3"), 0);
        assert_eq!(sanitize_int("3e"), 3);
        assert_eq!(sanitize_int("3e+"), 3);
    }

    #[test]
    fn test_sanitize_int_saturates() {
        assert_eq!(sanitize_int("99999999999999999999"), i64::MAX);
        assert_eq!(sanitize_int("-99999999999999999999"), i64::MIN);
        assert_eq!(sanitize_int("1e400"), i64::MAX);
        assert_eq!(sanitize_int("-1e400"), i64::MIN);
    }

    #[test]
    fn test_sanitize_email() {
        assert_eq!(sanitize_email("john (doe)@example.com"), "johndoe@example.com");
        assert_eq!(sanitize_email("jöhn@exämple.com"), "jhn@exmple.com");
        assert_eq!(sanitize_email("a+b@[127.0.0.1]"), "a+b@[127.0.0.1]");
        assert_eq!(sanitize_email("no spaces\t@x.io"), "nospaces@x.io");
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(
            sanitize_url("https://exa mple.com/päth?q=1&r=2#frag"),
            "https://example.com/pth?q=1&r=2#frag"
        );
        assert_eq!(sanitize_url("http://x.io/\u{7f}a\nb"), "http://x.io/ab");
        assert_eq!(sanitize_url("{}|\\^~[]`<>\""), "{}|\\^~[]`<>\"");
    }
}
