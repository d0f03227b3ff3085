//! Command-line argument parsing for the translation tool.
//!
//! Arguments are parsed by hand. Environment defaults come from the
//! library's `ZK_I18N_*` settings.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
zk-i18n - inspect and export the zeitkapsl translation table

USAGE:
    zk-i18n [OPTIONS] <COMMAND>

COMMANDS:
    lookup <LOCALE> <KEY> [ARG]  Print the resolved value (lists one entry per line)
    check                        Validate the table; exit 1 on fatal problems
    coverage [--json]            Per-locale coverage of the en-US key inventory
    export --out <DIR> [--flatten]
                                 Write <locale>.json files into DIR
    csv export <FILE>            Write all literals to a ';'-delimited CSV file
    csv import <FILE> --out <DIR>
                                 Merge CSV edits and write <locale>.json files into DIR

OPTIONS:
    --dir <DIR>          Load resources from DIR instead of the embedded table
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    ZK_I18N_LOG          Log filter (default: warn)
    ZK_I18N_LOCALE       Default locale when LOOKUP is given '-' (default: en-US)
    ZK_I18N_MISSING_KEY  'placeholder' or 'key' (affects translator output)
    ZK_I18N_YEAR         Year substituted for {year} (default: current year)";

/// What the tool was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lookup {
        /// Locale code as typed, or `None` for `-` (use the configured default).
        locale: Option<String>,
        key: String,
        arg: Option<String>,
    },
    Check,
    Coverage {
        json: bool,
    },
    Export {
        out: PathBuf,
        flatten: bool,
    },
    CsvExport {
        file: PathBuf,
    },
    CsvImport {
        file: PathBuf,
        out: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub command: Command,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    MissingCommand,
    MissingValue(&'static str),
    UnknownArg(String),
}

impl Opts {
    pub fn parse() -> Self {
        match Self::parse_from_args(env::args().skip(1)) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("zk-i18n {VERSION}");
                process::exit(0);
            }
            Err(ParseError::MissingCommand) => {
                eprintln!("No command given.");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
            Err(ParseError::MissingValue(what)) => {
                eprintln!("Missing {what}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    fn parse_from_args<I, S>(args: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter().map(|s| s.as_ref().to_string());
        let mut dir = None;
        let mut command_name = None;
        let mut positional = Vec::new();
        let mut json = false;
        let mut flatten = false;
        let mut out = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--json" => json = true,
                "--flatten" => flatten = true,
                "--dir" => {
                    let value = args.next().ok_or(ParseError::MissingValue("--dir <DIR>"))?;
                    dir = Some(PathBuf::from(value));
                }
                "--out" => {
                    let value = args.next().ok_or(ParseError::MissingValue("--out <DIR>"))?;
                    out = Some(PathBuf::from(value));
                }
                other => {
                    if let Some(value) = other.strip_prefix("--dir=") {
                        dir = Some(PathBuf::from(value));
                    } else if let Some(value) = other.strip_prefix("--out=") {
                        out = Some(PathBuf::from(value));
                    } else if other.starts_with("--") {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    } else if command_name.is_none() {
                        command_name = Some(other.to_string());
                    } else {
                        positional.push(other.to_string());
                    }
                }
            }
        }

        let name = command_name.ok_or(ParseError::MissingCommand)?;
        let mut positional = positional.into_iter();
        let command = match name.as_str() {
            "lookup" => {
                let locale = positional
                    .next()
                    .ok_or(ParseError::MissingValue("<LOCALE>"))?;
                let key = positional.next().ok_or(ParseError::MissingValue("<KEY>"))?;
                Command::Lookup {
                    locale: (locale != "-").then_some(locale),
                    key,
                    arg: positional.next(),
                }
            }
            "check" => Command::Check,
            "coverage" => Command::Coverage { json },
            "export" => Command::Export {
                out: out.ok_or(ParseError::MissingValue("--out <DIR>"))?,
                flatten,
            },
            "csv" => {
                let action = positional
                    .next()
                    .ok_or(ParseError::MissingValue("csv action (export|import)"))?;
                let file = positional
                    .next()
                    .map(PathBuf::from)
                    .ok_or(ParseError::MissingValue("<FILE>"))?;
                match action.as_str() {
                    "export" => Command::CsvExport { file },
                    "import" => Command::CsvImport {
                        file,
                        out: out.ok_or(ParseError::MissingValue("--out <DIR>"))?,
                    },
                    _ => return Err(ParseError::UnknownArg(action)),
                }
            }
            other => return Err(ParseError::UnknownArg(other.to_string())),
        };

        if let Some(extra) = positional.next() {
            return Err(ParseError::UnknownArg(extra));
        }

        Ok(Self { command, dir })
    }
}
