//! Command-line argument definitions for the recipient importer
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ImportConfig;
use crate::constants::{ACCEPTED_EXTENSIONS, TEMPLATE_FILE_NAME, UNSUPPORTED_EXTENSION_MESSAGE};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI arguments for the recipient importer
///
/// Converts recipient spreadsheets with arbitrary column headers into
/// structured recipient records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "recipient-import",
    version,
    about = "Import recipients from arbitrarily-headered CSV files",
    long_about = "Reads one or more CSV files, works out which columns hold names, emails, \
                  departments and other recipient attributes from the header row, and writes \
                  the recipients it finds as JSON or CSV. Rows with invalid email addresses \
                  and files with no recognisable columns are skipped."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import recipients from CSV files
    Import(ImportArgs),
    /// Write an example upload file with every recognised column
    Template(TemplateArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// CSV files to import, processed in order as parts of one upload
    ///
    /// Processing stops at the first file that is completely empty; later
    /// files are not read.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Write records to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format for imported records
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Field delimiter used by the input files
    #[arg(short = 'd', long = "delimiter", default_value_t = ',')]
    pub delimiter: char,

    /// Keep leading whitespace in fields
    #[arg(long = "no-trim")]
    pub no_trim: bool,

    /// Treat double quotes as ordinary characters
    #[arg(long = "no-quoting")]
    pub no_quoting: bool,

    /// Abandon the import if it takes longer than this many seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress the summary and all logging except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the template command
#[derive(Debug, Clone, Parser)]
pub struct TemplateArgs {
    /// Destination file, or `-` for stdout
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = TEMPLATE_FILE_NAME)]
    pub output: PathBuf,

    /// Overwrite the destination if it already exists
    #[arg(long = "force")]
    pub force: bool,
}

/// Output format options for imported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// CSV with one column per recipient attribute
    Csv,
}

impl ImportArgs {
    /// Get the log level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Deadline for the whole import, if any
    pub fn deadline(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Check input files before any of them is read
    pub fn validate(&self) -> Result<()> {
        for path in &self.files {
            if !has_accepted_extension(path) {
                return Err(Error::unsupported_input(
                    path.display().to_string(),
                    UNSUPPORTED_EXTENSION_MESSAGE,
                ));
            }
            if !path.is_file() {
                return Err(Error::unsupported_input(
                    path.display().to_string(),
                    "File not found",
                ));
            }
        }

        if self.timeout == Some(0) {
            return Err(Error::configuration("Timeout must be at least one second"));
        }

        Ok(())
    }

    /// Build the import configuration from the CLI flags
    pub fn to_config(&self) -> Result<ImportConfig> {
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter '{}' is not an ASCII character",
                self.delimiter
            )));
        }

        let mut config = ImportConfig::default().with_delimiter(self.delimiter as u8);
        if self.no_trim {
            config = config.without_trimming();
        }
        if self.no_quoting {
            config = config.without_quoting();
        }

        config.validate()?;
        Ok(config)
    }
}

impl TemplateArgs {
    /// Whether the template goes to stdout
    pub fn to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

/// Whether a path ends in one of the accepted upload extensions
pub fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}
