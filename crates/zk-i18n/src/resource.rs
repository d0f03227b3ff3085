//! Loading the table from JSON resources, plus load-time validation.
//!
//! Resources are flat JSON objects, one file per locale (`en-US.json`),
//! mapping keys to a string or to an array of strings. Template keys are not
//! part of the resources; [`crate::template::templates_for`] supplies them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use chrono::Datelike;
use serde::Deserialize;

use crate::catalog::{Catalog, LocaleStrings};
use crate::config::I18nConfig;
use crate::error::I18nError;
use crate::locale::Locale;
use crate::template::templates_for;
use crate::value::{MONTH_COUNT, Value, ValueKind};

/// Placeholder replaced in every literal at load time.
pub const YEAR_PLACEHOLDER: &str = "{year}";

const EMBEDDED: [(Locale, &str); 3] = [
    (Locale::EnUs, include_str!("../locales/en-US.json")),
    (Locale::DeDe, include_str!("../locales/de-DE.json")),
    (Locale::DeAt, include_str!("../locales/de-AT.json")),
];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    List(Vec<String>),
}

/// Options applied while building a [`Catalog`] from resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Substituted for `{year}`.
    pub year: i32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            year: chrono::Local::now().year(),
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn from_config(config: &I18nConfig) -> Self {
        config
            .year
            .map(|year| Self { year })
            .unwrap_or_default()
    }
}

/// Parse one locale's JSON resource and attach its templates.
pub fn parse_locale(
    locale: Locale,
    file: &str,
    json: &str,
    options: &LoadOptions,
) -> Result<LocaleStrings, I18nError> {
    let raw: HashMap<String, RawValue> =
        serde_json::from_str(json).map_err(|e| I18nError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?;

    let mut strings = LocaleStrings::new();
    for (key, value) in raw {
        match value {
            RawValue::Text(text) => insert_resource_text(&mut strings, key, text, options),
            RawValue::List(items) => strings.insert_value(key, Value::List(items)),
        }
    }
    for (key, template) in templates_for(locale) {
        if strings.contains(key) {
            tracing::warn!(%locale, key, "resource entry shadowed by template");
        }
        strings.insert_value(*key, Value::Template(*template));
    }

    tracing::debug!(%locale, file, keys = strings.len(), "parsed locale resource");
    Ok(strings)
}

/// Store resource text as a literal, substituting `{year}` and keeping the
/// original text for export.
pub(crate) fn insert_resource_text(
    strings: &mut LocaleStrings,
    key: String,
    text: String,
    options: &LoadOptions,
) {
    let rendered = text.replace(YEAR_PLACEHOLDER, &options.year.to_string());
    strings.insert_rendered(key, rendered, text);
}

impl Catalog {
    /// Build and validate the table from the resources compiled into the crate.
    pub fn embedded(options: &LoadOptions) -> Result<Catalog, I18nError> {
        let mut catalog = Catalog::new();
        for (locale, json) in EMBEDDED {
            let file = format!("{}.json", locale.code());
            catalog.add_locale(locale, parse_locale(locale, &file, json, options)?);
        }
        validate(&catalog)?;
        Ok(catalog)
    }

    /// Build and validate the table from a directory of `<locale>.json` files.
    ///
    /// Files whose stem is not a supported locale are skipped.
    pub fn load_dir(dir: impl AsRef<Path>, options: &LoadOptions) -> Result<Catalog, I18nError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| I18nError::io(dir, &e))?;

        let mut catalog = Catalog::new();
        for entry in entries {
            let path = entry.map_err(|e| I18nError::io(dir, &e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(locale) = stem.parse::<Locale>() else {
                tracing::warn!(path = %path.display(), "skipping resource for unsupported locale");
                continue;
            };
            let json = fs::read_to_string(&path).map_err(|e| I18nError::io(&path, &e))?;
            let file = path.display().to_string();
            catalog.add_locale(locale, parse_locale(locale, &file, &json, options)?);
        }

        validate(&catalog)?;
        Ok(catalog)
    }
}

/// Process-wide table built once from the embedded resources.
///
/// Settings come from [`I18nConfig::from_env`] on first use.
pub fn shared() -> Result<&'static Catalog, I18nError> {
    static SHARED: OnceLock<Result<Catalog, I18nError>> = OnceLock::new();
    SHARED
        .get_or_init(|| {
            let options = LoadOptions::from_config(&I18nConfig::from_env());
            Catalog::embedded(&options)
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// A key defined by a non-reference locale but absent from the reference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OrphanKey {
    pub locale: Locale,
    pub key: String,
}

/// Non-fatal findings from [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    /// Orphans, sorted by locale then key.
    pub orphan_keys: Vec<OrphanKey>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphan_keys.is_empty()
    }
}

/// Check the table's structural invariants.
///
/// Fatal: reference locale absent, a loaded locale whose base is absent,
/// list arity other than twelve, empty text, one key with different kinds
/// in two locales. Orphan keys are logged and reported.
pub fn validate(catalog: &Catalog) -> Result<ValidationReport, I18nError> {
    let reference = catalog
        .locale_strings(Locale::REFERENCE)
        .ok_or(I18nError::MissingReference)?;

    // A gap in the chain would route lookups (templates included) to a
    // more distant ancestor.
    for locale in catalog.locales() {
        if let Some(base) = locale.base()
            && catalog.locale_strings(base).is_none()
        {
            return Err(I18nError::MissingBase { locale, base });
        }
    }

    let mut kinds: HashMap<&str, (Locale, ValueKind)> = HashMap::new();
    let mut report = ValidationReport::default();

    for locale in catalog.locales() {
        let Some(strings) = catalog.locale_strings(locale) else {
            continue;
        };
        let mut keys: Vec<&str> = strings.keys().collect();
        keys.sort_unstable();

        for key in keys {
            let Some(value) = strings.get(key) else {
                continue;
            };
            check_value(locale, key, value)?;

            let kind = value.kind();
            let (first_locale, first_kind) = *kinds.entry(key).or_insert((locale, kind));
            if first_kind != kind {
                return Err(I18nError::KindConflict {
                    key: key.to_string(),
                    locale,
                    kind,
                    first_locale,
                    first_kind,
                });
            }

            if locale != Locale::REFERENCE && !reference.contains(key) {
                tracing::warn!(%locale, key, "key not defined by reference locale");
                report.orphan_keys.push(OrphanKey {
                    locale,
                    key: key.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn check_value(locale: Locale, key: &str, value: &Value) -> Result<(), I18nError> {
    let empty = || I18nError::EmptyValue {
        locale,
        key: key.to_string(),
    };
    match value {
        Value::Literal(text) if text.is_empty() => Err(empty()),
        Value::List(items) if items.len() != MONTH_COUNT => Err(I18nError::ListArity {
            locale,
            key: key.to_string(),
            len: items.len(),
        }),
        Value::List(items) if items.iter().any(String::is_empty) => Err(empty()),
        _ => Ok(()),
    }
}
