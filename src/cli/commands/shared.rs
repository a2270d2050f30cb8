//! Shared utilities for CLI commands
//!
//! Logging setup, record export, and the import summary report.

use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::app::models::{Record, SemanticField};
use crate::app::services::csv_importer::ImportStats;
use crate::cli::args::OutputFormat;
use crate::constants::LOG_TARGET;
use crate::{Error, Result};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the level derived from CLI flags.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let init = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init()
    };
    init.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Open the export destination: a file when given, stdout otherwise
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Write records in the requested format
pub fn write_records<W: Write>(records: &[Record], format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)
                .map_err(|e| Error::export(format!("Failed to write JSON: {}", e)))?;
            writeln!(writer).map_err(|e| Error::io("Failed to write output", e))?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut writer);
            csv_writer
                .write_record(SemanticField::ALL.iter().map(|field| field.key()))
                .map_err(|e| Error::export(format!("Failed to write CSV header: {}", e)))?;
            for record in records {
                csv_writer
                    .serialize(record)
                    .map_err(|e| Error::export(format!("Failed to write CSV record: {}", e)))?;
            }
            csv_writer
                .flush()
                .map_err(|e| Error::io("Failed to flush CSV output", e))?;
        }
    }

    writer
        .flush()
        .map_err(|e| Error::io("Failed to flush output", e))
}

/// Print a human-readable import summary to stderr
pub fn print_summary(stats: &ImportStats) {
    eprintln!();
    eprintln!("{}", "Import Summary".bold().underline());
    eprintln!(
        "  Records imported:   {}",
        stats.records_imported.to_string().green().bold()
    );
    eprintln!("  Parts imported:     {}", stats.parts_imported);
    eprintln!("  Rows read:          {}", stats.rows_read);

    if stats.rows_invalid_email > 0 {
        eprintln!(
            "  Invalid emails:     {}",
            stats.rows_invalid_email.to_string().yellow()
        );
    }
    if stats.rows_malformed > 0 {
        eprintln!(
            "  Malformed rows:     {}",
            stats.rows_malformed.to_string().yellow()
        );
    }
    if stats.parts_unclassified > 0 {
        eprintln!(
            "  Unrecognised files: {}",
            stats.parts_unclassified.to_string().yellow()
        );
    }
    if stats.stopped_early {
        eprintln!(
            "  {} import stopped at empty file '{}'; later files were not read",
            "Warning:".red().bold(),
            stats.stopped_at.as_deref().unwrap_or("unknown")
        );
    }
    if stats.rows_read > 0 {
        eprintln!("  Success rate:       {:.1}%", stats.success_rate());
    }
}
