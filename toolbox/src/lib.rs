//! Input sanitization, validation and token helpers for web applications.
//!
//! This crate provides:
//! - Sanitizers for strings, SQL keys, whitelisted SQL operators and
//!   connectors, integers, emails and URLs
//! - Validators that check input is already in sanitized form, plus
//!   structural email and URL checks
//! - Datetime formatting with a locale-aware formatter and a fixed-pattern
//!   fallback
//! - HMAC token generation and constant-time verification
//!
//! The [`Toolbox`] facade binds these to a borrowed [`Config`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod datetime;
pub mod error;
pub mod sanitize;
pub mod token;
pub mod toolbox;
pub mod tracing_config;
pub mod validate;
pub mod whitelist;

pub use config::{AppKey, Config};
pub use datetime::{DatetimeFormatter, DatetimeKind, LocaleFormatter, PatternFormatter};
pub use error::ToolboxError;
pub use token::{HmacAlgorithm, check_token};
pub use toolbox::Toolbox;
pub use tracing_config::{TracingConfig, init_tracing};
pub use whitelist::{ComparisonOperator, Connector};
