//! Translation table with declared locale inheritance.
//!
//! # Invariants
//!
//! 1. **Inheritance chain terminates**: a lookup walks `locale`, then each
//!    declared base locale exactly once, ending at the reference locale.
//!
//! 2. **Kind is a property of the key**: a key has the same [`ValueKind`] in
//!    every locale that defines it (checked by [`crate::validate`]).
//!
//! 3. **Immutable after construction**: `Catalog` exposes no mutation once
//!    built, so shared references are safe across threads (`Send + Sync`).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in the chain | `I18nError::MissingKey` |
//! | Arg on literal/list | Caller passed an argument | `I18nError::TypeMismatch` |
//! | No arg on template | Caller forgot the argument | `I18nError::TypeMismatch` |
//! | Locale not loaded | Catalog built without it | Chain continues in its bases |

use std::collections::HashMap;

use crate::error::I18nError;
use crate::locale::Locale;
use crate::value::{FormatArg, Value, ValueKind};

/// Values defined directly by a single locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleStrings {
    strings: HashMap<String, Value>,
    /// Resource text of literals rewritten at load time (`{year}`).
    sources: HashMap<String, String>,
}

impl LocaleStrings {
    /// Create an empty locale string set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a literal string.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_value(key, Value::Literal(value.into()));
    }

    /// Insert a value of any kind.
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.sources.remove(&key);
        self.strings.insert(key, value);
    }

    /// Insert a literal rendered from resource text `source`.
    ///
    /// Lookups see `rendered`; exports write `source` back out.
    pub fn insert_rendered(
        &mut self,
        key: impl Into<String>,
        rendered: impl Into<String>,
        source: impl Into<String>,
    ) {
        let key = key.into();
        let source = source.into();
        let rendered = rendered.into();
        if source != rendered {
            self.sources.insert(key.clone(), source);
        } else {
            self.sources.remove(&key);
        }
        self.strings.insert(key, Value::Literal(rendered));
    }

    /// Resource text of a literal: the unsubstituted form if it was
    /// rendered at load time, the literal itself otherwise.
    #[must_use]
    pub fn source_text(&self, key: &str) -> Option<&str> {
        match self.strings.get(key)? {
            Value::Literal(text) => Some(
                self.sources
                    .get(key)
                    .map_or(text.as_str(), String::as_str),
            ),
            Value::List(_) | Value::Template(_) => None,
        }
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.strings.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the locale has no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all keys in this locale.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    /// Iterate over all entries in this locale (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Outcome of a successful [`Catalog::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// Literal text, or the output of a template.
    Text(String),
    /// A month list, borrowed from the catalog.
    List(&'a [String]),
}

impl<'a> Resolved<'a> {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&'a [String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

/// Process-wide translation table.
///
/// # Example
///
/// ```
/// use zk_i18n::{Catalog, Locale, LocaleStrings};
///
/// let mut en = LocaleStrings::new();
/// en.insert("login", "Sign in");
/// en.insert("logout", "Sign out");
/// let mut de = LocaleStrings::new();
/// de.insert("login", "Anmelden");
///
/// let mut catalog = Catalog::new();
/// catalog.add_locale(Locale::EnUs, en);
/// catalog.add_locale(Locale::DeDe, de);
///
/// // de-AT is not loaded: its chain continues in de-DE.
/// assert_eq!(catalog.text(Locale::DeAt, "login").unwrap(), "Anmelden");
/// // de-DE lacks "logout": falls back to en-US.
/// assert_eq!(catalog.text(Locale::DeDe, "logout").unwrap(), "Sign out");
/// assert!(catalog.text(Locale::DeDe, "nope").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locales: HashMap<Locale, LocaleStrings>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the strings defined directly by a locale.
    pub fn add_locale(&mut self, locale: Locale, strings: LocaleStrings) {
        self.locales.insert(locale, strings);
    }

    /// Strings defined directly by `locale`, without inheritance.
    #[must_use]
    pub fn locale_strings(&self, locale: Locale) -> Option<&LocaleStrings> {
        self.locales.get(&locale)
    }

    /// Strings defined directly by `locale`, created empty if absent.
    pub fn locale_strings_mut(&mut self, locale: Locale) -> &mut LocaleStrings {
        self.locales.entry(locale).or_default()
    }

    /// Loaded locales, in [`Locale::ALL`] order.
    #[must_use]
    pub fn locales(&self) -> Vec<Locale> {
        Locale::ALL
            .into_iter()
            .filter(|l| self.locales.contains_key(l))
            .collect()
    }

    /// Look up a value, walking the locale's inheritance chain.
    #[must_use]
    pub fn get(&self, locale: Locale, key: &str) -> Option<&Value> {
        self.get_with_origin(locale, key).map(|(_, value)| value)
    }

    /// Like [`get`](Self::get), also reporting which locale defined the value.
    #[must_use]
    pub fn get_with_origin(&self, locale: Locale, key: &str) -> Option<(Locale, &Value)> {
        locale.chain().find_map(|l| {
            self.locales
                .get(&l)
                .and_then(|ls| ls.get(key))
                .map(|value| (l, value))
        })
    }

    /// Resolve a key to display data.
    ///
    /// `arg` must be given exactly when the key holds a template.
    pub fn resolve(
        &self,
        locale: Locale,
        key: &str,
        arg: Option<FormatArg<'_>>,
    ) -> Result<Resolved<'_>, I18nError> {
        let value = self.get(locale, key).ok_or_else(|| I18nError::MissingKey {
            locale,
            key: key.to_string(),
        })?;

        match (value, arg) {
            (Value::Literal(text), None) => Ok(Resolved::Text(text.clone())),
            (Value::List(items), None) => Ok(Resolved::List(items)),
            (Value::Template(template), Some(arg)) => Ok(Resolved::Text(template.render(arg))),
            (Value::Template(_), None) => Err(mismatch(key, ValueKind::Literal, value)),
            (Value::Literal(_) | Value::List(_), Some(_)) => {
                Err(mismatch(key, ValueKind::Template, value))
            }
        }
    }

    /// Literal text for a key.
    pub fn text(&self, locale: Locale, key: &str) -> Result<&str, I18nError> {
        match self.lookup(locale, key)? {
            Value::Literal(text) => Ok(text),
            other => Err(mismatch(key, ValueKind::Literal, other)),
        }
    }

    /// Render a template key with its argument.
    pub fn format<'a>(
        &self,
        locale: Locale,
        key: &str,
        arg: impl Into<FormatArg<'a>>,
    ) -> Result<String, I18nError> {
        match self.lookup(locale, key)? {
            Value::Template(template) => Ok(template.render(arg.into())),
            other => Err(mismatch(key, ValueKind::Template, other)),
        }
    }

    /// Month list for a key.
    pub fn list(&self, locale: Locale, key: &str) -> Result<&[String], I18nError> {
        match self.lookup(locale, key)? {
            Value::List(items) => Ok(items),
            other => Err(mismatch(key, ValueKind::List, other)),
        }
    }

    fn lookup(&self, locale: Locale, key: &str) -> Result<&Value, I18nError> {
        self.get(locale, key).ok_or_else(|| I18nError::MissingKey {
            locale,
            key: key.to_string(),
        })
    }

    /// Materialize every value visible from `locale` into one mapping.
    ///
    /// The result needs no fallback walk: each key maps to the value the
    /// inheritance chain would have produced.
    #[must_use]
    pub fn flatten(&self, locale: Locale) -> LocaleStrings {
        let mut flat = LocaleStrings::new();
        // Walk base-first so overlays overwrite inherited entries.
        let chain: Vec<Locale> = locale.chain().collect();
        for l in chain.into_iter().rev() {
            if let Some(ls) = self.locales.get(&l) {
                for (key, value) in ls.iter() {
                    flat.insert_value(key, value.clone());
                    if let Some(source) = ls.sources.get(key) {
                        flat.sources.insert(key.to_string(), source.clone());
                    }
                }
            }
        }
        flat
    }

    // -----------------------------------------------------------------
    // Extraction & Coverage
    // -----------------------------------------------------------------

    /// Collect all unique keys across every loaded locale, sorted.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .locales
            .values()
            .flat_map(|ls| ls.keys().map(String::from))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys of the reference locale, sorted. This is the canonical inventory.
    #[must_use]
    pub fn reference_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .locales
            .get(&Locale::REFERENCE)
            .map(|ls| ls.keys().map(String::from).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Keys from `reference_keys` that `locale` cannot resolve, even through
    /// its inheritance chain. Sorted alphabetically.
    #[must_use]
    pub fn missing_keys(&self, locale: Locale, reference_keys: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = reference_keys
            .iter()
            .filter(|key| self.get(locale, key).is_none())
            .map(|key| key.to_string())
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Coverage of the reference inventory for every loaded locale.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let reference = self.reference_keys();
        let ref_keys: Vec<&str> = reference.iter().map(String::as_str).collect();
        let total = ref_keys.len();

        let locales = self
            .locales()
            .into_iter()
            .map(|locale| {
                let missing = self.missing_keys(locale, &ref_keys);
                let present = total.saturating_sub(missing.len());
                let own = self
                    .locales
                    .get(&locale)
                    .map(|ls| ref_keys.iter().filter(|k| ls.contains(k)).count())
                    .unwrap_or(0);
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                LocaleCoverage {
                    locale,
                    present,
                    own,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: total,
            locales,
        }
    }
}

fn mismatch(key: &str, expected: ValueKind, found: &Value) -> I18nError {
    I18nError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Coverage report for a catalog, relative to the reference key inventory.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CoverageReport {
    /// Number of keys in the reference locale.
    pub total_keys: usize,
    /// Per-locale coverage data.
    pub locales: Vec<LocaleCoverage>,
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LocaleCoverage {
    pub locale: Locale,
    /// Reference keys resolvable (including via inheritance).
    pub present: usize,
    /// Reference keys defined directly by this locale.
    pub own: usize,
    /// Reference keys not resolvable even after inheritance.
    pub missing: Vec<String>,
    /// Coverage as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}
