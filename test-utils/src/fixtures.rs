//! Configuration fixtures.

use input_toolbox::Config;

/// Secret used by fixture configurations.
pub const TEST_SECRET: &str = "test-secret-for-hmac-tokens!!";

/// Configuration with an English locale and a test secret.
#[must_use]
pub fn english_config() -> Config {
    Config::default()
        .with_locale("en_US")
        .with_secret(TEST_SECRET)
}

/// Configuration with a French locale and a test secret.
#[must_use]
pub fn french_config() -> Config {
    Config::default()
        .with_locale("fr_FR")
        .with_date_format("%d/%m/%Y")
        .with_time_format("%H:%M")
        .with_secret(TEST_SECRET)
}

/// Configuration forcing the fixed-pattern fallback formatter.
#[must_use]
pub fn fallback_config() -> Config {
    Config::default()
        .with_locale("fr_FR")
        .with_date_format("%d/%m/%Y")
        .with_time_format("%H:%M")
        .with_secret(TEST_SECRET)
        .without_locale_formatting()
}

/// Configuration without a secret.
#[must_use]
pub fn secretless_config() -> Config {
    Config::default()
}
