//! Error type shared by every fallible toolbox operation.
//!
//! Sanitizers and validators never fail. Only datetime formatting, token
//! generation and configuration loading return [`ToolboxError`].

use thiserror::Error;

/// Error code for unparseable datetime input.
pub const TOOLBOX_PARSE_ERROR: &str = "TOOLBOX_PARSE_ERROR";
/// Error code for invalid datetime patterns.
pub const TOOLBOX_FORMAT_ERROR: &str = "TOOLBOX_FORMAT_ERROR";
/// Error code for entropy source failures.
pub const TOOLBOX_RANDOMNESS_UNAVAILABLE: &str = "TOOLBOX_RANDOMNESS_UNAVAILABLE";
/// Error code for missing or malformed configuration values.
pub const TOOLBOX_INVALID_CONFIGURATION: &str = "TOOLBOX_INVALID_CONFIGURATION";
/// Error code for unknown token hash algorithms.
pub const TOOLBOX_UNSUPPORTED_ALGORITHM: &str = "TOOLBOX_UNSUPPORTED_ALGORITHM";

/// Errors returned by the toolbox.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolboxError {
    /// The input is not a recognizable datetime
    #[error("Unrecognized datetime: {input:?}")]
    Parse {
        /// The rejected input
        input: String,
    },

    /// The pattern is invalid or cannot be rendered for the value
    #[error("Invalid datetime pattern: {pattern:?}")]
    Format {
        /// The rejected pattern
        pattern: String,
    },

    /// The secure random source could not supply bytes
    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// A configuration value is missing, empty or malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The requested token hash algorithm is not supported
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl ToolboxError {
    /// Check if this error is retryable.
    ///
    /// Only entropy failures are transient; every other error is caused by
    /// the input or the configuration and will fail again.
    ///
    /// # Examples
    ///
    /// ```
    /// use input_toolbox::ToolboxError;
    ///
    /// assert!(ToolboxError::randomness("getrandom failed").is_retryable());
    /// assert!(!ToolboxError::parse("not-a-date").is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RandomnessUnavailable(_))
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => TOOLBOX_PARSE_ERROR,
            Self::Format { .. } => TOOLBOX_FORMAT_ERROR,
            Self::RandomnessUnavailable(_) => TOOLBOX_RANDOMNESS_UNAVAILABLE,
            Self::InvalidConfiguration(_) => TOOLBOX_INVALID_CONFIGURATION,
            Self::UnsupportedAlgorithm(_) => TOOLBOX_UNSUPPORTED_ALGORITHM,
        }
    }

    /// Create a parse error for the given input.
    #[must_use]
    pub fn parse(input: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
        }
    }

    /// Create a format error for the given pattern.
    #[must_use]
    pub fn format(pattern: impl Into<String>) -> Self {
        Self::Format {
            pattern: pattern.into(),
        }
    }

    /// Create a randomness error with the given reason.
    #[must_use]
    pub fn randomness(reason: impl Into<String>) -> Self {
        Self::RandomnessUnavailable(reason.into())
    }

    /// Create a configuration error with the given message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ToolboxError::randomness("test").is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!ToolboxError::parse("test").is_retryable());
        assert!(!ToolboxError::format("%Q").is_retryable());
        assert!(!ToolboxError::config("test").is_retryable());
        assert!(!ToolboxError::UnsupportedAlgorithm("md5".to_string()).is_retryable());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ToolboxError::parse("x").code(), TOOLBOX_PARSE_ERROR);
        assert_eq!(ToolboxError::format("x").code(), TOOLBOX_FORMAT_ERROR);
        assert_eq!(
            ToolboxError::randomness("x").code(),
            TOOLBOX_RANDOMNESS_UNAVAILABLE
        );
        assert_eq!(
            ToolboxError::config("x").code(),
            TOOLBOX_INVALID_CONFIGURATION
        );
    }

    #[test]
    fn test_error_display() {
        let err = ToolboxError::parse("not-a-date");
        assert_eq!(err.to_string(), "Unrecognized datetime: \"not-a-date\"");

        let err = ToolboxError::config("secret is empty");
        assert_eq!(err.to_string(), "Invalid configuration: secret is empty");
    }
}
