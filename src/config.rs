//! Configuration for CSV reading during imports.
//!
//! The importer infers everything else from the uploaded data itself; these
//! settings only control how raw bytes are split into fields.

use crate::app::services::csv_importer::field_trim::TrimLeadingSpace;
use crate::constants::{DEFAULT_DELIMITER, DEFAULT_TRIM_LEADING_SPACE};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Settings applied to every part of an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Field delimiter byte
    pub delimiter: u8,

    /// Strip leading whitespace from every field, header included
    ///
    /// Whitespace is removed from the byte stream before fields are split,
    /// so a quoted field may follow a delimiter and a space.
    pub trim_leading_space: bool,

    /// Honour double-quote quoting in fields
    pub quoting: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            trim_leading_space: DEFAULT_TRIM_LEADING_SPACE,
            quoting: true,
        }
    }
}

impl ImportConfig {
    /// Use a custom field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Keep leading whitespace in fields
    pub fn without_trimming(mut self) -> Self {
        self.trim_leading_space = false;
        self
    }

    /// Treat double quotes as ordinary characters
    pub fn without_quoting(mut self) -> Self {
        self.quoting = false;
        self
    }

    /// Check that the settings can split records sensibly
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, b'\n' | b'\r' | b'"') {
            return Err(Error::configuration(format!(
                "Delimiter {:?} cannot be used to separate fields",
                self.delimiter as char
            )));
        }
        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(
                "Delimiter must be a single ASCII character",
            ));
        }
        Ok(())
    }

    /// Build a headerless, ragged-row tolerant CSV reader for one part body
    pub fn reader<R: std::io::Read>(&self, body: R) -> csv::Reader<TrimLeadingSpace<R>> {
        let body = if self.trim_leading_space {
            TrimLeadingSpace::new(body, self.delimiter, self.quoting)
        } else {
            TrimLeadingSpace::passthrough(body)
        };

        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quoting(self.quoting)
            .from_reader(body)
    }
}
