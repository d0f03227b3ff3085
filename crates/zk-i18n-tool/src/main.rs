#![forbid(unsafe_code)]

//! `zk-i18n`: operator tool over the zeitkapsl translation table.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use zk_i18n::{
    Catalog, CoverageReport, ExportMode, FormatArg, I18nConfig, I18nError, LoadOptions, Locale,
    Resolved, export_csv, export_json, import_csv, validate,
};

use crate::cli::{Command, Opts};

const LOG_ENV: &str = "ZK_I18N_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let opts = Opts::parse();
    let config = I18nConfig::from_env();

    match run(&opts, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Opts, config: &I18nConfig) -> Result<ExitCode, I18nError> {
    let options = LoadOptions::from_config(config);
    let mut catalog = match &opts.dir {
        Some(dir) => Catalog::load_dir(dir, &options)?,
        None => Catalog::embedded(&options)?,
    };
    tracing::debug!(locales = catalog.locales().len(), year = options.year, "catalog loaded");
    let mut stdout = io::stdout().lock();

    match &opts.command {
        Command::Lookup { locale, key, arg } => {
            let locale = locale
                .as_deref()
                .map_or(config.locale, Locale::negotiate);
            let resolved = catalog.resolve(locale, key, arg.as_deref().map(parse_arg))?;
            write_resolved(&mut stdout, &resolved).map_err(stdout_error)?;
        }
        Command::Check => {
            let report = validate(&catalog)?;
            for orphan in &report.orphan_keys {
                writeln!(stdout, "orphan {} {}", orphan.locale, orphan.key).map_err(stdout_error)?;
            }
            let summary = if report.is_clean() {
                "ok".to_string()
            } else {
                format!("ok ({} orphan keys)", report.orphan_keys.len())
            };
            writeln!(stdout, "{summary}").map_err(stdout_error)?;
        }
        Command::Coverage { json } => {
            let report = catalog.coverage_report();
            if *json {
                let text = serde_json::to_string_pretty(&report)
                    .map_err(|e| I18nError::serialize("coverage report", &e))?;
                writeln!(stdout, "{text}").map_err(stdout_error)?;
            } else {
                write_coverage_table(&mut stdout, &report).map_err(stdout_error)?;
            }
        }
        Command::Export { out, flatten } => {
            let mode = if *flatten {
                ExportMode::Flattened
            } else {
                ExportMode::Own
            };
            let summary = export_json(&catalog, out, mode)?;
            for file in &summary.files {
                writeln!(stdout, "{}", file.display()).map_err(stdout_error)?;
            }
        }
        Command::CsvExport { file } => {
            let rows = export_csv(&catalog, file)?;
            writeln!(stdout, "{} ({rows} rows)", file.display()).map_err(stdout_error)?;
        }
        Command::CsvImport { file, out } => {
            let imported = import_csv(&mut catalog, file, &options)?;
            validate(&catalog)?;
            let summary = export_json(&catalog, out, ExportMode::Own)?;
            writeln!(
                stdout,
                "{} rows, {} cells updated, {} skipped",
                imported.rows, imported.updated, imported.skipped
            )
            .map_err(stdout_error)?;
            for file in &summary.files {
                writeln!(stdout, "{}", file.display()).map_err(stdout_error)?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Whole numbers become [`FormatArg::Number`], anything else stays text.
fn parse_arg(raw: &str) -> FormatArg<'_> {
    raw.parse::<i64>()
        .map_or(FormatArg::Text(raw), FormatArg::Number)
}

fn write_resolved(out: &mut impl Write, resolved: &Resolved<'_>) -> io::Result<()> {
    match resolved {
        Resolved::Text(text) => writeln!(out, "{text}"),
        Resolved::List(items) => items.iter().try_for_each(|item| writeln!(out, "{item}")),
    }
}

fn write_coverage_table(out: &mut impl Write, report: &CoverageReport) -> io::Result<()> {
    writeln!(out, "{} reference keys", report.total_keys)?;
    writeln!(out, "{:<8} {:>8} {:>8} {:>8}", "locale", "present", "own", "percent")?;
    for lc in &report.locales {
        writeln!(
            out,
            "{:<8} {:>8} {:>8} {:>7.1}%",
            lc.locale.code(),
            lc.present,
            lc.own,
            lc.coverage_percent
        )?;
        for key in &lc.missing {
            writeln!(out, "  missing {key}")?;
        }
    }
    Ok(())
}

fn stdout_error(err: io::Error) -> I18nError {
    I18nError::io("<stdout>", &err)
}
