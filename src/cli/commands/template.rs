//! Template command implementation
//!
//! Writes a one-row example upload whose headers map onto every recognised
//! recipient attribute.

use std::fs::OpenOptions;
use std::io::{self, Write};
use tracing::info;

use crate::cli::args::TemplateArgs;
use crate::constants::{TEMPLATE_EXAMPLE_ROW, TEMPLATE_HEADERS};
use crate::{Error, Result};

/// Main entry point for the template command
pub fn run_template(args: &TemplateArgs) -> Result<()> {
    if args.to_stdout() {
        return write_template(io::stdout().lock());
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .create_new(!args.force)
        .open(&args.output)
        .map_err(|e| {
            Error::io(
                format!(
                    "Failed to create {} (use --force to overwrite)",
                    args.output.display()
                ),
                e,
            )
        })?;

    write_template(file)?;
    info!("Wrote upload template to {}", args.output.display());
    eprintln!("Template written to {}", args.output.display());
    Ok(())
}

/// Write the template header and example row as CSV
pub fn write_template<W: Write>(writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(TEMPLATE_HEADERS)
        .map_err(|e| Error::export(format!("Failed to write template header: {}", e)))?;
    csv_writer
        .write_record(TEMPLATE_EXAMPLE_ROW)
        .map_err(|e| Error::export(format!("Failed to write template row: {}", e)))?;
    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush template", e))
}
