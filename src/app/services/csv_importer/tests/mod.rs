//! Test utilities for the CSV importer
//!
//! Helpers for building in-memory uploads and failing streams shared by the
//! test modules below.

use std::io::{self, Read};

use crate::app::adapters::upload::{MemoryParts, Part};
use crate::app::models::Record;
use crate::app::services::csv_importer::field_trim::TrimLeadingSpace;
use crate::config::ImportConfig;

// Test modules
mod column_map_tests;
mod importer_tests;

/// Build an in-memory upload of file parts from `(filename, body)` pairs
pub fn upload(parts: &[(&str, &str)]) -> MemoryParts {
    MemoryParts::new(
        parts
            .iter()
            .map(|(name, body)| Part::from_bytes(*name, body.to_string())),
    )
}

/// Build a headerless CSV reader over a string, as the importer does
pub fn reader(content: &str) -> csv::Reader<TrimLeadingSpace<io::Cursor<Vec<u8>>>> {
    reader_over(content.as_bytes().to_vec())
}

/// Same as [`reader`], for raw bytes that need not be UTF-8
pub fn reader_over(content: Vec<u8>) -> csv::Reader<TrimLeadingSpace<io::Cursor<Vec<u8>>>> {
    ImportConfig::default().reader(io::Cursor::new(content))
}

/// Shorthand for a record with only a first name and email
pub fn named(first_name: &str, email: &str) -> Record {
    Record {
        first_name: first_name.to_string(),
        email: email.to_string(),
        ..Record::default()
    }
}

/// Reader that serves some bytes and then fails like a dropped connection
pub struct FailingBody {
    prefix: io::Cursor<Vec<u8>>,
}

impl FailingBody {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: io::Cursor::new(prefix.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.prefix.read(buf)?;
        if n > 0 {
            return Ok(n);
        }
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "upload aborted"))
    }
}
