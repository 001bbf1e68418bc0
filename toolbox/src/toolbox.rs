//! The toolbox facade used by controllers and templates.

use crate::config::Config;
use crate::datetime::{
    DatetimeFormatter, DatetimeKind, ISO8601, format_with_pattern, formatter_for, parse_datetime,
};
use crate::error::ToolboxError;
use crate::token::{self, HmacAlgorithm};
use crate::{sanitize, validate};
use secrecy::ExposeSecret;
use std::borrow::Cow;

/// Sanitizers, validators, datetime formatting and token helpers bound
/// to a borrowed [`Config`].
///
/// Every method is independent of the others; a single instance can be
/// shared across threads.
///
/// # Examples
///
/// ```
/// use input_toolbox::{Config, DatetimeKind, Toolbox};
///
/// let config = Config::default().with_secret("change-me");
/// let toolbox = Toolbox::new(&config);
///
/// assert_eq!(toolbox.sanitize_key("Post_Title"), "post_title");
/// assert_eq!(toolbox.sanitize_operator("LIKE"), "LIKE");
/// assert_eq!(
///     toolbox
///         .format_datetime("2023-01-15T10:30:00Z", Some("%Y-%m-%d"), DatetimeKind::Datetime)
///         .unwrap(),
///     "2023-01-15"
/// );
/// ```
#[derive(Debug)]
pub struct Toolbox<'a> {
    config: &'a Config,
    formatter: Box<dyn DatetimeFormatter>,
}

impl<'a> Toolbox<'a> {
    /// Create a toolbox, probing the configured locale once to pick the
    /// datetime formatter.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            formatter: formatter_for(config),
        }
    }

    /// Create a toolbox with an explicit datetime formatter.
    #[must_use]
    pub fn with_formatter(config: &'a Config, formatter: Box<dyn DatetimeFormatter>) -> Self {
        Self { config, formatter }
    }

    /// The bound configuration.
    #[must_use]
    pub const fn config(&self) -> &'a Config {
        self.config
    }

    /// The formatter used when no explicit pattern is given.
    #[must_use]
    pub fn formatter(&self) -> &dyn DatetimeFormatter {
        self.formatter.as_ref()
    }

    /// See [`sanitize::esc_html`].
    #[must_use]
    pub fn esc_html(&self, input: &str) -> String {
        sanitize::esc_html(input)
    }

    /// See [`sanitize::sanitize_string`].
    #[must_use]
    pub fn sanitize_string(&self, input: &str) -> String {
        sanitize::sanitize_string(input)
    }

    /// See [`sanitize::sanitize_key`].
    #[must_use]
    pub fn sanitize_key(&self, key: &str) -> String {
        sanitize::sanitize_key(key)
    }

    /// See [`sanitize::sanitize_operator`].
    #[must_use]
    pub fn sanitize_operator(&self, operator: &str) -> &'static str {
        sanitize::sanitize_operator(operator)
    }

    /// See [`sanitize::sanitize_condition`].
    #[must_use]
    pub fn sanitize_condition(&self, condition: &str) -> &'static str {
        sanitize::sanitize_condition(condition)
    }

    /// See [`sanitize::sanitize_int`].
    #[must_use]
    pub fn sanitize_int(&self, input: &str) -> i64 {
        sanitize::sanitize_int(input)
    }

    /// See [`sanitize::sanitize_email`].
    #[must_use]
    pub fn sanitize_email(&self, email: &str) -> String {
        sanitize::sanitize_email(email)
    }

    /// See [`sanitize::sanitize_url`].
    #[must_use]
    pub fn sanitize_url(&self, url: &str) -> String {
        sanitize::sanitize_url(url)
    }

    /// See [`validate::validate_string`].
    #[must_use]
    pub fn validate_string(&self, input: &str) -> bool {
        validate::validate_string(input)
    }

    /// See [`validate::validate_key`].
    #[must_use]
    pub fn validate_key(&self, key: &str) -> bool {
        validate::validate_key(key)
    }

    /// See [`validate::validate_int`].
    #[must_use]
    pub fn validate_int(&self, input: &str) -> bool {
        validate::validate_int(input)
    }

    /// See [`validate::validate_email`].
    #[must_use]
    pub fn validate_email(&self, email: &str) -> bool {
        validate::validate_email(email)
    }

    /// See [`validate::validate_url`].
    #[must_use]
    pub fn validate_url(&self, url: &str) -> bool {
        validate::validate_url(url)
    }

    /// See [`validate::validate_datetime`].
    #[must_use]
    pub fn validate_datetime(&self, datetime: &str, format: &str) -> bool {
        validate::validate_datetime(datetime, format)
    }

    /// Parse `raw` and render it.
    ///
    /// With an explicit `format`, the pattern is used as is. Without one,
    /// the selected [`DatetimeFormatter`] renders `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::Parse`] for unrecognized input and
    /// [`ToolboxError::Format`] for invalid patterns.
    pub fn format_datetime(
        &self,
        raw: &str,
        format: Option<&str>,
        kind: DatetimeKind,
    ) -> Result<String, ToolboxError> {
        let datetime = parse_datetime(raw)?;
        match format {
            Some(pattern) => format_with_pattern(&datetime, pattern),
            None => self.formatter.format(&datetime, kind),
        }
    }

    /// Parse `raw` and render it as ISO 8601 with a numeric offset.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::Parse`] for unrecognized input.
    pub fn format_iso8601(&self, raw: &str) -> Result<String, ToolboxError> {
        self.format_datetime(raw, Some(ISO8601), DatetimeKind::Datetime)
    }

    /// Generate an HMAC token.
    ///
    /// An absent or empty `salt` is replaced by [`token::SALT_BYTES`] random
    /// bytes, hex-encoded. An absent or empty `key` is replaced by the
    /// configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::InvalidConfiguration`] if no key is given
    /// and the configured secret is empty, and
    /// [`ToolboxError::RandomnessUnavailable`] if a salt cannot be drawn.
    pub fn generate_token(
        &self,
        salt: Option<&str>,
        key: Option<&str>,
        algorithm: HmacAlgorithm,
    ) -> Result<String, ToolboxError> {
        let key = key
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| self.config.secret.expose_secret());
        if key.is_empty() {
            return Err(ToolboxError::config(
                "token secret is empty; set TOOLBOX_SECRET",
            ));
        }

        let salt = match salt.filter(|s| !s.is_empty()) {
            Some(salt) => Cow::Borrowed(salt),
            None => Cow::Owned(token::random_salt()?),
        };

        Ok(token::sign(&salt, key.as_bytes(), algorithm))
    }

    /// See [`token::check_token`].
    #[must_use]
    pub fn check_token(&self, known: &str, candidate: &str) -> bool {
        token::check_token(known, candidate)
    }
}
