//! Supported locales and their inheritance relation.
//!
//! Every locale declares at most one base locale. Lookups that miss in a
//! locale continue in its base, then in the base's base, ending at the
//! reference locale (`en-US`). The relation is a fixed `match`, so it is
//! acyclic and every chain terminates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "de-AT")]
    DeAt,
}

impl Locale {
    /// Locale whose key set is the canonical inventory and the last fallback.
    pub const REFERENCE: Locale = Locale::EnUs;

    /// All supported locales, reference first.
    pub const ALL: [Locale; 3] = [Locale::EnUs, Locale::DeDe, Locale::DeAt];

    /// BCP-47 style code, e.g. `"de-AT"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::DeDe => "de-DE",
            Self::DeAt => "de-AT",
        }
    }

    /// Declared base locale (`extends` pointer).
    ///
    /// `de-AT` only overlays Austrian month vocabulary and inherits the rest
    /// from `de-DE`; `de-DE` inherits from the reference locale.
    #[must_use]
    pub const fn base(self) -> Option<Locale> {
        match self {
            Self::EnUs => None,
            Self::DeDe => Some(Self::EnUs),
            Self::DeAt => Some(Self::DeDe),
        }
    }

    /// Lookup order for this locale: itself, then each base in turn.
    pub fn chain(self) -> impl Iterator<Item = Locale> {
        std::iter::successors(Some(self), |l| l.base())
    }

    /// Map an arbitrary code to a supported locale.
    ///
    /// Unsupported or malformed codes resolve to [`Locale::REFERENCE`].
    #[must_use]
    pub fn negotiate(code: &str) -> Locale {
        match code.parse() {
            Ok(locale) => locale,
            Err(_) => {
                tracing::debug!(code, fallback = Self::REFERENCE.code(), "unsupported locale");
                Self::REFERENCE
            }
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    /// Case-insensitive; `_` is accepted as separator (`de_at`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| I18nError::InvalidLocale(s.to_string()))
    }
}
