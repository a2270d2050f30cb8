use anyhow::Context;
use clap::Parser;
use recipient_importer::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(recipient_importer::Error::processing_interrupted(
                    "Import interrupted by user",
                ))
            }
        }
    });

    // Do not wait on an import abandoned by a timeout or CTRL+C
    runtime.shutdown_background();

    Ok(result?)
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Recipient Importer - CSV Recipient Import Tool");
    println!("==============================================");
    println!();
    println!("Import recipients from CSV files with any column headers. Columns are");
    println!("matched to names, emails, departments and other attributes by their");
    println!("header text.");
    println!();
    println!("USAGE:");
    println!("    recipient-import <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import recipients from one or more CSV files");
    println!("    template    Write an example upload file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Import two files and print recipients as JSON:");
    println!("    recipient-import import staff.csv contractors.csv");
    println!();
    println!("    # Import semicolon-separated data to a CSV file:");
    println!("    recipient-import import -d ';' -f csv -o recipients.csv export.txt");
    println!();
    println!("    # Write the example upload file:");
    println!("    recipient-import template -o group_template.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    recipient-import <COMMAND> --help");
}
