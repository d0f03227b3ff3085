#![forbid(unsafe_code)]

//! Localized UI text for the zeitkapsl web app.
//!
//! A read-only table maps each supported locale to its translation keys.
//! Values are literal text (inline markup preserved byte-for-byte), month
//! lists, or single-argument templates. Locales inherit from a declared base
//! (`de-AT` → `de-DE` → `en-US`), so partial locales only carry overrides.
//!
//! ```
//! use zk_i18n::{Catalog, LoadOptions, Locale};
//!
//! let catalog = Catalog::embedded(&LoadOptions { year: 2025 }).unwrap();
//! assert_eq!(catalog.text(Locale::DeAt, "login").unwrap(), "Anmelden");
//! assert_eq!(catalog.list(Locale::DeAt, "months.long").unwrap()[0], "Jänner");
//! assert_eq!(
//!     catalog.format(Locale::EnUs, "settings.up.to.users", 5).unwrap(),
//!     "Up to 5 users"
//! );
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod interchange;
pub mod locale;
pub mod plural;
pub mod resource;
pub mod template;
pub mod translator;
pub mod value;

pub use catalog::{Catalog, CoverageReport, LocaleCoverage, LocaleStrings, Resolved};
pub use config::{ConfigError, I18nConfig, I18nConfigParse, MissingKeyPolicy};
pub use error::I18nError;
pub use export::{ExportMode, ExportSummary, export_json};
pub use interchange::{CsvImport, export_csv, import_csv};
pub use locale::Locale;
pub use plural::PluralCategory;
pub use resource::{LoadOptions, OrphanKey, ValidationReport, shared, validate};
pub use translator::Translator;
pub use value::{FormatArg, MONTH_COUNT, Template, Value, ValueKind};
