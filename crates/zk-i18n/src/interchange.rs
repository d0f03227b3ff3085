//! Spreadsheet interchange for translators.
//!
//! One `;`-delimited CSV file holds every literal: a header
//! `app;key;comment;<locale>...` and one row per key. A cell is the text the
//! locale defines itself; an empty cell means "inherit". Lists and templates
//! are not translator-editable and never appear.

use std::collections::BTreeSet;
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::I18nError;
use crate::locale::Locale;
use crate::resource::{LoadOptions, insert_resource_text};
use crate::value::{Value, ValueKind};

pub const CSV_DELIMITER: u8 = b';';

/// Value of the `app` column for rows written by [`export_csv`].
pub const DEFAULT_APP: &str = "web";

const FIXED_COLUMNS: [&str; 3] = ["app", "key", "comment"];

/// Counts from [`import_csv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvImport {
    /// Data rows read.
    pub rows: usize,
    /// Cells written into the catalog.
    pub updated: usize,
    /// Rows or cells ignored (short rows, empty keys, non-literal keys).
    pub skipped: usize,
}

/// Write every literal of `catalog` to `path`. Returns the number of rows.
///
/// Locale columns are sorted by code; rows are sorted by key.
pub fn export_csv(catalog: &Catalog, path: impl AsRef<Path>) -> Result<usize, I18nError> {
    let path = path.as_ref();
    let mut locales = catalog.locales();
    locales.sort_by_key(|l| l.code());

    let keys: BTreeSet<&str> = locales
        .iter()
        .filter_map(|&l| catalog.locale_strings(l))
        .flat_map(|ls| ls.iter())
        .filter(|(_, value)| matches!(value, Value::Literal(_)))
        .map(|(key, _)| key)
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_path(path)
        .map_err(|e| csv_io_error(path, &e))?;

    let header = FIXED_COLUMNS
        .iter()
        .copied()
        .chain(locales.iter().map(|l| l.code()));
    writer
        .write_record(header)
        .map_err(|e| I18nError::serialize("CSV header", &e))?;

    for key in &keys {
        let cells = locales.iter().map(|&l| {
            catalog
                .locale_strings(l)
                .and_then(|ls| ls.source_text(key))
                .unwrap_or("")
        });
        let record = [DEFAULT_APP, *key, ""].into_iter().chain(cells);
        writer
            .write_record(record)
            .map_err(|e| I18nError::serialize(format!("CSV row '{key}'"), &e))?;
    }
    writer.flush().map_err(|e| I18nError::io(path, &e))?;

    tracing::info!(path = %path.display(), rows = keys.len(), "exported CSV");
    Ok(keys.len())
}

/// Merge the literals of a CSV file into `catalog`.
///
/// Non-empty cells replace the locale's own literal; `{year}` is substituted
/// as for JSON resources. Columns for unsupported locales are skipped. Keys
/// the catalog holds as lists or templates are left alone. Run
/// [`crate::validate`] afterwards.
pub fn import_csv(
    catalog: &mut Catalog,
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<CsvImport, I18nError> {
    let path = path.as_ref();
    let file = path.display().to_string();
    let parse_error = |e: csv::Error| I18nError::Parse {
        file: file.clone(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_io_error(path, &e))?;

    let header = reader.headers().map_err(parse_error)?.clone();
    if header.len() < FIXED_COLUMNS.len()
        || header.iter().zip(FIXED_COLUMNS).any(|(got, want)| got != want)
    {
        return Err(I18nError::Parse {
            file: file.clone(),
            message: format!("header must start with {}", FIXED_COLUMNS.join(";")),
        });
    }

    let mut columns: Vec<(usize, Locale)> = Vec::new();
    for (index, code) in header.iter().enumerate().skip(FIXED_COLUMNS.len()) {
        match code.parse::<Locale>() {
            Ok(locale) => columns.push((index, locale)),
            Err(_) => {
                tracing::warn!(%file, column = code, "skipping unsupported locale column");
            }
        }
    }

    let mut summary = CsvImport::default();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(parse_error)?;
        summary.rows += 1;
        let key = match record.get(1) {
            Some(key) if record.len() >= FIXED_COLUMNS.len() && !key.is_empty() => key,
            _ => {
                // Header is line 1.
                tracing::warn!(%file, line = row + 2, "skipping incomplete row");
                summary.skipped += 1;
                continue;
            }
        };

        for &(index, locale) in &columns {
            let Some(cell) = record.get(index).filter(|c| !c.is_empty()) else {
                continue;
            };
            let kind = catalog.get(locale, key).map(Value::kind);
            if kind.is_some_and(|k| k != ValueKind::Literal) {
                tracing::warn!(%locale, key, "ignoring CSV text for non-literal key");
                summary.skipped += 1;
                continue;
            }
            let strings = catalog.locale_strings_mut(locale);
            insert_resource_text(strings, key.to_string(), cell.to_string(), options);
            summary.updated += 1;
        }
    }

    tracing::info!(
        %file,
        rows = summary.rows,
        updated = summary.updated,
        "imported CSV"
    );
    Ok(summary)
}

fn csv_io_error(path: &Path, err: &csv::Error) -> I18nError {
    I18nError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LocaleStrings;
    use crate::resource::validate;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn small_catalog() -> Catalog {
        let mut en = LocaleStrings::new();
        en.insert("login", "Sign in");
        en.insert("logout", "Sign out; bye");
        en.insert_value(
            "months.long",
            Value::List((1..=12).map(|m| format!("M{m}")).collect()),
        );
        let mut de = LocaleStrings::new();
        de.insert("login", "Anmelden");
        let mut catalog = Catalog::new();
        catalog.add_locale(Locale::EnUs, en);
        catalog.add_locale(Locale::DeDe, de);
        catalog
    }

    #[test]
    fn export_writes_sorted_locales_and_literals_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.csv");
        let rows = export_csv(&small_catalog(), &path).unwrap();
        assert_eq!(rows, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "app;key;comment;de-DE;en-US\n\
             web;login;;Anmelden;Sign in\n\
             web;logout;;;\"Sign out; bye\"\n"
        );
    }

    #[test]
    fn embedded_table_round_trips_with_new_year() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.csv");
        export_csv(&Catalog::embedded(&LoadOptions { year: 2025 }).unwrap(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("app;key;comment;de-AT;de-DE;en-US\n"));
        assert!(!text.contains("2025"));

        let options = LoadOptions { year: 2030 };
        let expected = Catalog::embedded(&options).unwrap();
        let mut imported = Catalog::embedded(&options).unwrap();
        let summary = import_csv(&mut imported, &path, &options).unwrap();
        assert_eq!(summary.skipped, 0);
        assert!(summary.rows > 300);
        for locale in Locale::ALL {
            assert_eq!(
                imported.locale_strings(locale),
                expected.locale_strings(locale),
                "{locale}"
            );
        }
        assert_eq!(
            imported.text(Locale::DeAt, "zeitkapsl.rights").unwrap(),
            "&copy; 2030 zeitkapsl. Alle Rechte vorbehalten."
        );
    }

    #[test]
    fn import_merges_edits_and_skips_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.csv");
        fs::write(
            &path,
            "app;key;comment;de-DE;fr-FR\n\
             web;login;;Einloggen;Connexion\n\
             web;months.long;;Monate;\n\
             web\n\
             web;new.key;note;Neu;\n",
        )
        .unwrap();

        let mut catalog = small_catalog();
        let summary = import_csv(&mut catalog, &path, &LoadOptions { year: 2025 }).unwrap();
        assert_eq!(
            summary,
            CsvImport {
                rows: 4,
                updated: 2,
                skipped: 2,
            }
        );
        assert_eq!(catalog.text(Locale::DeDe, "login").unwrap(), "Einloggen");
        assert_eq!(catalog.text(Locale::EnUs, "login").unwrap(), "Sign in");
        assert_eq!(catalog.list(Locale::DeDe, "months.long").unwrap().len(), 12);
        assert_eq!(catalog.text(Locale::DeDe, "new.key").unwrap(), "Neu");

        let report = validate(&catalog).unwrap();
        assert_eq!(report.orphan_keys.len(), 1);
        assert_eq!(report.orphan_keys[0].key, "new.key");
    }

    #[test]
    fn import_rejects_foreign_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "key;de-DE\nlogin;Anmelden\n").unwrap();
        let options = LoadOptions { year: 2025 };
        let err = import_csv(&mut small_catalog(), &path, &options).unwrap_err();
        assert!(matches!(err, I18nError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn import_of_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_csv(
            &mut small_catalog(),
            dir.path().join("absent.csv"),
            &LoadOptions { year: 2025 },
        )
        .unwrap_err();
        assert!(matches!(err, I18nError::Io { .. }));
    }
}
