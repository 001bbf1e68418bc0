//! Application configuration consumed by the toolbox.
//!
//! The host application owns the [`Config`]; the toolbox only borrows it.
//! Values are loaded from environment variables or deserialized from the
//! host's own configuration file. The toolbox never validates the values
//! beyond parsing: an empty secret is only reported when a token is
//! generated with it.

use crate::error::ToolboxError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::env;
use std::fmt;

/// Environment variable holding the locale name.
pub const ENV_LOCALE: &str = "TOOLBOX_LOCALE";
/// Environment variable holding the fallback date pattern.
pub const ENV_DATE_FORMAT: &str = "TOOLBOX_DATE_FORMAT";
/// Environment variable holding the fallback time pattern.
pub const ENV_TIME_FORMAT: &str = "TOOLBOX_TIME_FORMAT";
/// Environment variable holding the token secret.
pub const ENV_SECRET: &str = "TOOLBOX_SECRET";
/// Environment variable toggling locale-aware formatting.
pub const ENV_LOCALE_FORMATTING: &str = "TOOLBOX_LOCALE_FORMATTING";

const DEFAULT_LOCALE: &str = "en_US";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Keys readable through [`Config::get_app`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKey {
    /// Locale name, e.g. `fr_FR`
    Locale,
    /// strftime pattern used for dates when no locale formatter is available
    DefaultDateFormat,
    /// strftime pattern used for times when no locale formatter is available
    DefaultTimeFormat,
    /// HMAC key for token generation
    Secret,
}

impl AppKey {
    /// Get the key name as used by the host application.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locale => "locale",
            Self::DefaultDateFormat => "defaultDateFormat",
            Self::DefaultTimeFormat => "defaultTimeFormat",
            Self::Secret => "secret",
        }
    }
}

impl fmt::Display for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Toolbox configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale used by the locale-aware datetime formatter
    pub locale: String,
    /// Fallback date pattern (chrono strftime syntax)
    #[serde(alias = "defaultDateFormat")]
    pub default_date_format: String,
    /// Fallback time pattern (chrono strftime syntax)
    #[serde(alias = "defaultTimeFormat")]
    pub default_time_format: String,
    /// Secret key for token generation
    pub secret: SecretString,
    /// Allow the locale-aware formatter when the locale is supported
    #[serde(alias = "localeFormatting")]
    pub locale_formatting: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            default_date_format: DEFAULT_DATE_FORMAT.to_string(),
            default_time_format: DEFAULT_TIME_FORMAT.to_string(),
            secret: SecretString::from(String::new()),
            locale_formatting: true,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("locale", &self.locale)
            .field("default_date_format", &self.default_date_format)
            .field("default_time_format", &self.default_time_format)
            .field("secret", &"[REDACTED]")
            .field("locale_formatting", &self.locale_formatting)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honoured when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ToolboxError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ToolboxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let locale_formatting = match lookup(ENV_LOCALE_FORMATTING) {
            Some(val) => parse_bool(&val).ok_or_else(|| {
                ToolboxError::config(format!("Invalid {ENV_LOCALE_FORMATTING}: {val}"))
            })?,
            None => defaults.locale_formatting,
        };

        Ok(Self {
            locale: lookup(ENV_LOCALE).unwrap_or(defaults.locale),
            default_date_format: lookup(ENV_DATE_FORMAT).unwrap_or(defaults.default_date_format),
            default_time_format: lookup(ENV_TIME_FORMAT).unwrap_or(defaults.default_time_format),
            secret: lookup(ENV_SECRET).map_or(defaults.secret, SecretString::from),
            locale_formatting,
        })
    }

    /// Read a configuration value by key.
    #[must_use]
    pub fn get_app(&self, key: AppKey) -> &str {
        match key {
            AppKey::Locale => &self.locale,
            AppKey::DefaultDateFormat => &self.default_date_format,
            AppKey::DefaultTimeFormat => &self.default_time_format,
            AppKey::Secret => self.secret.expose_secret(),
        }
    }

    /// Set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the fallback date pattern.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.default_date_format = format.into();
        self
    }

    /// Set the fallback time pattern.
    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.default_time_format = format.into();
        self
    }

    /// Set the token secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = SecretString::from(secret.into());
        self
    }

    /// Disable the locale-aware formatter, forcing the pattern fallback.
    #[must_use]
    pub const fn without_locale_formatting(mut self) -> Self {
        self.locale_formatting = false;
        self
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
