//! Environment-driven configuration.
//!
//! # Environment variables
//!
//! - `ZK_I18N_LOCALE` (locale code, default `en-US`)
//! - `ZK_I18N_MISSING_KEY` = placeholder|key
//! - `ZK_I18N_YEAR` (integer, replaces `{year}` in literals; default current year)
//!
//! Invalid values keep the default and are reported as [`ConfigError`]s.

use std::env;
use std::fmt;

use crate::locale::Locale;

pub const ENV_LOCALE: &str = "ZK_I18N_LOCALE";
pub const ENV_MISSING_KEY: &str = "ZK_I18N_MISSING_KEY";
pub const ENV_YEAR: &str = "ZK_I18N_YEAR";

/// How a key that no locale defines is rendered by the [`crate::Translator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
    /// Render `⟦missing:<key>⟧`.
    #[default]
    Placeholder,
    /// Render the key itself.
    Key,
}

impl MissingKeyPolicy {
    #[must_use]
    pub fn render(self, key: &str) -> String {
        match self {
            Self::Placeholder => format!("⟦missing:{key}⟧"),
            Self::Key => key.to_string(),
        }
    }
}

impl fmt::Display for MissingKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Placeholder => "placeholder",
            Self::Key => "key",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct I18nConfig {
    pub locale: Locale,
    pub missing_key: MissingKeyPolicy,
    /// Year substituted for `{year}`; `None` means the current local year.
    pub year: Option<i32>,
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct I18nConfigParse {
    pub config: I18nConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl I18nConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> I18nConfig {
        let parsed = Self::from_env_with_diagnostics();
        for error in &parsed.errors {
            tracing::warn!(%error, "ignoring invalid i18n setting");
        }
        parsed.config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> I18nConfigParse {
        from_env_with(|key| env::var(key).ok())
    }
}

fn from_env_with<F>(mut get: F) -> I18nConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = I18nConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_LOCALE) {
        match value.parse::<Locale>() {
            Ok(locale) => config.locale = locale,
            Err(_) => errors.push(ConfigError::new(
                "locale",
                value,
                "expected en-US, de-DE or de-AT",
            )),
        }
    }

    if let Some(value) = get(ENV_MISSING_KEY) {
        match value.trim().to_ascii_lowercase().as_str() {
            "placeholder" => config.missing_key = MissingKeyPolicy::Placeholder,
            "key" => config.missing_key = MissingKeyPolicy::Key,
            _ => errors.push(ConfigError::new(
                "missing_key",
                value,
                "expected placeholder|key",
            )),
        }
    }

    if let Some(value) = get(ENV_YEAR) {
        match value.trim().parse::<i32>() {
            Ok(year) if (1970..=9999).contains(&year) => config.year = Some(year),
            _ => errors.push(ConfigError::new("year", value, "expected year 1970..=9999")),
        }
    }

    I18nConfigParse { config, errors }
}
