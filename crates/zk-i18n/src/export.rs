//! Write the table back out as per-locale JSON resources.
//!
//! Output matches the resource format read by [`Catalog::load_dir`]: one
//! `<locale>.json` per locale, keys sorted, two-space indentation. Templates
//! are code, not data, and are left out. Literals rendered at load time are
//! written in their resource form, so `{year}` survives a round trip.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{Catalog, LocaleStrings};
use crate::error::I18nError;
use crate::locale::Locale;
use crate::value::Value;

/// Which keys go into a locale's file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Only keys the locale defines itself. Re-loading yields the same table.
    #[default]
    Own,
    /// Every key visible through inheritance.
    Flattened,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ExportValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

/// Files written by [`export_json`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: Vec<PathBuf>,
    /// Template entries left out, summed over all files.
    pub skipped_templates: usize,
}

/// Serialize one locale's entries to pretty JSON with sorted keys.
pub fn locale_to_json(strings: &LocaleStrings) -> Result<(String, usize), I18nError> {
    let mut object: BTreeMap<&str, ExportValue<'_>> = BTreeMap::new();
    let mut skipped = 0;
    for (key, value) in strings.iter() {
        match value {
            Value::Literal(text) => {
                let source = strings.source_text(key).unwrap_or(text);
                object.insert(key, ExportValue::Text(source));
            }
            Value::List(items) => {
                object.insert(key, ExportValue::List(items));
            }
            Value::Template(_) => skipped += 1,
        }
    }
    let mut json = serde_json::to_string_pretty(&object)
        .map_err(|e| I18nError::serialize("locale resource", &e))?;
    json.push('\n');
    Ok((json, skipped))
}

/// Write `<locale>.json` for every loaded locale into `dir`.
///
/// The directory is created if missing. Locales with nothing to write are
/// skipped.
pub fn export_json(
    catalog: &Catalog,
    dir: impl AsRef<Path>,
    mode: ExportMode,
) -> Result<ExportSummary, I18nError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| I18nError::io(dir, &e))?;

    let mut summary = ExportSummary {
        files: Vec::new(),
        skipped_templates: 0,
    };

    for locale in catalog.locales() {
        let strings = match mode {
            ExportMode::Own => catalog.locale_strings(locale).cloned().unwrap_or_default(),
            ExportMode::Flattened => catalog.flatten(locale),
        };
        let (json, skipped) = locale_to_json(&strings)?;
        summary.skipped_templates += skipped;
        if strings.len() == skipped {
            tracing::debug!(%locale, "nothing to export");
            continue;
        }

        let path = dir.join(file_name(locale));
        fs::write(&path, json).map_err(|e| I18nError::io(&path, &e))?;
        tracing::info!(%locale, path = %path.display(), "exported translations");
        summary.files.push(path);
    }

    Ok(summary)
}

fn file_name(locale: Locale) -> String {
    format!("{}.json", locale.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::LoadOptions;
    use crate::value::Template;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        let mut en = LocaleStrings::new();
        en.insert("b", "Bee");
        en.insert("a", "<span class='x'>A</span>");
        en.insert_value("t", Value::Template(Template::new(|x| x.to_string())));
        let mut at = LocaleStrings::new();
        at.insert_value("months.long", Value::List((1..=12).map(|m| m.to_string()).collect()));

        let mut catalog = Catalog::new();
        catalog.add_locale(Locale::EnUs, en);
        catalog.add_locale(Locale::DeAt, at);
        catalog
    }

    #[test]
    fn json_is_sorted_and_skips_templates() {
        let catalog = catalog();
        let en = catalog.locale_strings(Locale::EnUs).unwrap();
        let (json, skipped) = locale_to_json(en).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(
            json,
            "{\n  \"a\": \"<span class='x'>A</span>\",\n  \"b\": \"Bee\"\n}\n"
        );
    }

    #[test]
    fn own_mode_writes_defined_keys_only() {
        let dir = tempfile::tempdir().unwrap();
        let summary = export_json(&catalog(), dir.path(), ExportMode::Own).unwrap();
        assert_eq!(
            summary.files,
            vec![dir.path().join("en-US.json"), dir.path().join("de-AT.json")]
        );
        assert_eq!(summary.skipped_templates, 1);

        let at = fs::read_to_string(dir.path().join("de-AT.json")).unwrap();
        let parsed: BTreeMap<String, serde_json::Value> = serde_json::from_str(&at).unwrap();
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["months.long"]);
    }

    #[test]
    fn flattened_mode_includes_inherited() {
        let dir = tempfile::tempdir().unwrap();
        export_json(&catalog(), dir.path(), ExportMode::Flattened).unwrap();
        let at = fs::read_to_string(dir.path().join("de-AT.json")).unwrap();
        let parsed: BTreeMap<String, serde_json::Value> = serde_json::from_str(&at).unwrap();
        assert_eq!(
            parsed.keys().collect::<Vec<_>>(),
            vec!["a", "b", "months.long"]
        );
    }

    #[test]
    fn year_placeholder_survives_round_trip() {
        let original = Catalog::embedded(&LoadOptions { year: 2025 }).unwrap();
        let dir = tempfile::tempdir().unwrap();
        export_json(&original, dir.path(), ExportMode::Own).unwrap();

        let en = fs::read_to_string(dir.path().join("en-US.json")).unwrap();
        let rights = r#""zeitkapsl.rights": "&copy; {year} zeitkapsl. All rights reserved.""#;
        assert!(en.contains(rights), "{en}");

        let reloaded = Catalog::load_dir(dir.path(), &LoadOptions { year: 2030 }).unwrap();
        assert_eq!(
            reloaded.text(Locale::EnUs, "zeitkapsl.rights").unwrap(),
            "&copy; 2030 zeitkapsl. All rights reserved."
        );
        assert_eq!(
            reloaded.text(Locale::DeAt, "zeitkapsl.rights").unwrap(),
            "&copy; 2030 zeitkapsl. Alle Rechte vorbehalten."
        );
    }

    #[test]
    fn flattened_export_keeps_placeholder() {
        let original = Catalog::embedded(&LoadOptions { year: 2025 }).unwrap();
        let dir = tempfile::tempdir().unwrap();
        export_json(&original, dir.path(), ExportMode::Flattened).unwrap();
        let at = fs::read_to_string(dir.path().join("de-AT.json")).unwrap();
        assert!(at.contains("&copy; {year} zeitkapsl. Alle Rechte vorbehalten."));
        assert!(!at.contains("2025"));
    }

    #[test]
    fn template_only_locale_is_skipped() {
        let mut en = LocaleStrings::new();
        en.insert_value("t", Value::Template(Template::new(|x| x.to_string())));
        let mut catalog = Catalog::new();
        catalog.add_locale(Locale::EnUs, en);

        let dir = tempfile::tempdir().unwrap();
        let summary = export_json(&catalog, dir.path(), ExportMode::Own).unwrap();
        assert!(summary.files.is_empty());
        assert!(!dir.path().join("en-US.json").exists());
    }

    #[test]
    fn embedded_round_trips_through_load_dir() {
        let options = LoadOptions { year: 2029 };
        let original = Catalog::embedded(&options).unwrap();
        let dir = tempfile::tempdir().unwrap();
        export_json(&original, dir.path(), ExportMode::Own).unwrap();

        let reloaded = Catalog::load_dir(dir.path(), &options).unwrap();
        for locale in Locale::ALL {
            assert_eq!(
                reloaded.locale_strings(locale),
                original.locale_strings(locale),
                "{locale}"
            );
        }
    }
}
