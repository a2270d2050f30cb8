//! Import command implementation
//!
//! Runs the blocking import on tokio's blocking pool so an optional overall
//! deadline can be enforced around it.

use tracing::{debug, info};

use super::shared::{open_output, print_summary, setup_logging, write_records};
use crate::app::adapters::upload::FileParts;
use crate::app::services::csv_importer::{ImportResult, ImportStats, RecipientImporter};
use crate::cli::args::ImportArgs;
use crate::{Error, Result};

/// Main entry point for the import command
pub async fn run_import(args: ImportArgs) -> Result<ImportStats> {
    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Import arguments: {:?}", args);

    args.validate()?;
    let importer = RecipientImporter::new(args.to_config()?)?;

    info!("Importing {} file(s)", args.files.len());
    let result = import_files(importer, &args).await?;

    let writer = open_output(args.output.as_deref())?;
    write_records(&result.records, args.format, writer)?;

    if let Some(path) = &args.output {
        info!("Wrote {} records to {}", result.records.len(), path.display());
    }
    if !args.quiet {
        print_summary(&result.stats);
    }

    Ok(result.stats)
}

/// Import the files as consecutive parts of one upload
async fn import_files(importer: RecipientImporter, args: &ImportArgs) -> Result<ImportResult> {
    let source = FileParts::new(args.files.clone());
    let task = tokio::task::spawn_blocking(move || importer.import(source));

    let joined = match args.deadline() {
        Some(deadline) => tokio::time::timeout(deadline, task).await.map_err(|_| {
            Error::processing_interrupted(format!(
                "Import did not finish within {} seconds",
                deadline.as_secs()
            ))
        })?,
        None => task.await,
    };

    joined.map_err(|e| Error::processing_interrupted(format!("Import task failed: {}", e)))?
}
