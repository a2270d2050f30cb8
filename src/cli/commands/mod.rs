//! Command implementations for the recipient importer CLI
//!
//! Each subcommand lives in its own module; shared logging and output
//! helpers are in [`shared`].

pub mod import;
pub mod shared;
pub mod template;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the selected subcommand
///
/// - `import`: classify and import CSV files, writing the records
/// - `template`: write an example upload file
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Import(import_args)) => import::run_import(import_args).await.map(|_| ()),
        Some(Commands::Template(template_args)) => template::run_template(&template_args),
        None => Err(crate::Error::configuration("No command given")),
    }
}
