//! Recipient Importer Library
//!
//! A Rust library for turning operator-supplied, arbitrarily-headered CSV
//! uploads into structured recipient records.
//!
//! This library provides tools for:
//! - Classifying header rows onto a fixed set of semantic recipient fields
//! - Streaming rows into records with per-field bounds and email checks
//! - Walking the parts of a multi-part upload with tolerant skip rules
//! - Reading parts from memory or from files on disk

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_importer;
    }
    pub mod adapters {
        pub mod upload;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::upload::{FileParts, MemoryParts, Part, PartSource};
pub use app::models::{Record, SemanticField};
pub use app::services::csv_importer::{ImportResult, ImportStats, RecipientImporter};
pub use config::ImportConfig;

/// Result type alias for the recipient importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for recipient import operations
///
/// Malformed content never surfaces here; only transport failures and
/// invalid caller input do.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading a part's CSV stream failed below the row level
    #[error("CSV read error in part '{part}': {message}")]
    CsvRead {
        part: String,
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Writing exported records failed
    #[error("Export error: {message}")]
    Export { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Input file rejected before import
    #[error("Unsupported input '{path}': {message}")]
    UnsupportedInput { path: String, message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV read error for a named part
    pub fn csv_read(part: impl Into<String>, message: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvRead {
            part: part.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unsupported input error
    pub fn unsupported_input(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnsupportedInput {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvRead {
            part: "unknown".to_string(),
            message: "CSV stream failed".to_string(),
            source: error,
        }
    }
}
