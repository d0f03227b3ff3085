//! Error type shared by loading, validation and key resolution.

use std::fmt;

use crate::locale::Locale;
use crate::value::ValueKind;

/// Errors from i18n operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A locale string was malformed or names an unsupported locale.
    InvalidLocale(String),
    /// Key not defined by the locale nor by any locale it inherits from.
    MissingKey { locale: Locale, key: String },
    /// Caller asked for a value shape the key does not have.
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },
    /// A list value does not hold one entry per calendar month.
    ListArity {
        locale: Locale,
        key: String,
        len: usize,
    },
    /// A literal or list entry is empty.
    EmptyValue { locale: Locale, key: String },
    /// The same key has different value kinds in two locales.
    KindConflict {
        key: String,
        locale: Locale,
        kind: ValueKind,
        first_locale: Locale,
        first_kind: ValueKind,
    },
    /// The reference locale was not loaded.
    MissingReference,
    /// A loaded locale's declared base locale was not loaded.
    MissingBase { locale: Locale, base: Locale },
    /// A resource file could not be parsed.
    Parse { file: String, message: String },
    /// Filesystem error while reading or writing resources.
    Io { path: String, message: String },
    /// Output (JSON or CSV) could not be produced.
    Serialize { what: String, message: String },
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocale(l) => write!(f, "invalid locale: {l}"),
            Self::MissingKey { locale, key } => {
                write!(f, "missing key '{key}' for locale '{locale}'")
            }
            Self::TypeMismatch {
                key,
                expected,
                found,
            } => write!(f, "key '{key}' is a {found}, requested as {expected}"),
            Self::ListArity { locale, key, len } => write!(
                f,
                "list '{key}' in locale '{locale}' has {len} entries, expected {}",
                crate::value::MONTH_COUNT
            ),
            Self::EmptyValue { locale, key } => {
                write!(f, "empty value for '{key}' in locale '{locale}'")
            }
            Self::KindConflict {
                key,
                locale,
                kind,
                first_locale,
                first_kind,
            } => write!(
                f,
                "key '{key}' is a {kind} in locale '{locale}' but a {first_kind} in locale '{first_locale}'"
            ),
            Self::MissingReference => {
                write!(f, "reference locale '{}' is not loaded", Locale::REFERENCE)
            }
            Self::MissingBase { locale, base } => write!(
                f,
                "locale '{locale}' is loaded but its base locale '{base}' is not"
            ),
            Self::Parse { file, message } => write!(f, "parse error in {file}: {message}"),
            Self::Io { path, message } => write!(f, "i/o error on {path}: {message}"),
            Self::Serialize { what, message } => {
                write!(f, "failed to serialize {what}: {message}")
            }
        }
    }
}

impl std::error::Error for I18nError {}

impl I18nError {
    /// Wrap a serializer failure for `what` (e.g. `"de-AT.json"`).
    pub fn serialize(what: impl Into<String>, err: &impl fmt::Display) -> Self {
        Self::Serialize {
            what: what.into(),
            message: err.to_string(),
        }
    }

    /// Wrap an I/O failure, keeping the path and message.
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_locales_and_output() {
        let err = I18nError::MissingBase {
            locale: Locale::DeAt,
            base: Locale::DeDe,
        };
        assert_eq!(
            err.to_string(),
            "locale 'de-AT' is loaded but its base locale 'de-DE' is not"
        );
        let err = I18nError::serialize("coverage report", &"key must be a string");
        assert_eq!(
            err.to_string(),
            "failed to serialize coverage report: key must be a string"
        );
    }
}
