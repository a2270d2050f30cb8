//! Row streaming for a single upload part
//!
//! Rows are turned into records through a carried value buffer that lives
//! for the whole part. A row only overwrites the fields it actually reaches;
//! fields whose column is missing or beyond the end of a short row keep the
//! value left by an earlier row.
//!
//! Cells are decoded lossily, so bytes that are not UTF-8 become U+FFFD
//! instead of costing the row.

use csv::ByteRecord;
use std::io::Read;
use tracing::debug;

use super::column_map::ColumnMap;
use super::email::validate_email;
use super::stats::RowStats;
use crate::app::models::{Record, SemanticField};
use crate::{Error, Result};

/// Field values carried from row to row within one part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarriedValues {
    values: [String; SemanticField::COUNT],
}

impl CarriedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for a field
    pub fn get(&self, field: SemanticField) -> &str {
        &self.values[field.index()]
    }

    /// Overwrite a field, reusing the existing allocation
    pub fn set(&mut self, field: SemanticField, value: &str) {
        let slot = &mut self.values[field.index()];
        slot.clear();
        slot.push_str(value);
    }

    /// Copy the current values into a standalone record
    pub fn snapshot(&self) -> Record {
        Record::from_values(&self.values)
    }
}

/// What happened to a single data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row produced a record
    Emitted(Record),
    /// The email cell was present but invalid; no record was produced
    InvalidEmail,
}

/// Apply one row to the carried buffer
///
/// Fields are visited in [`SemanticField::ALL`] order. An invalid email stops
/// the visit: fields before Email keep what this row wrote, fields after it
/// keep their previous values, and no record is produced.
pub fn apply_row(
    row: &ByteRecord,
    columns: &ColumnMap,
    carried: &mut CarriedValues,
) -> RowOutcome {
    for (field, index) in columns.mapped_fields() {
        let Some(raw) = row.get(index) else {
            continue;
        };
        let value = String::from_utf8_lossy(raw);

        if field == SemanticField::Email {
            match validate_email(&value) {
                Some(address) => carried.set(field, &address),
                None => return RowOutcome::InvalidEmail,
            }
        } else {
            carried.set(field, &value);
        }
    }

    RowOutcome::Emitted(carried.snapshot())
}

/// Lazily turns the data rows of one part into records
///
/// The header row must already have been consumed from `reader`. The
/// iterator yields an error only when the underlying stream fails; rows that
/// the reader rejects or that carry a bad email are skipped and counted.
pub struct RowImporter<R> {
    part: String,
    reader: csv::Reader<R>,
    columns: ColumnMap,
    carried: CarriedValues,
    row: ByteRecord,
    stats: RowStats,
    finished: bool,
}

impl<R: Read> RowImporter<R> {
    pub fn new(part: impl Into<String>, reader: csv::Reader<R>, columns: ColumnMap) -> Self {
        Self {
            part: part.into(),
            reader,
            columns,
            carried: CarriedValues::new(),
            row: ByteRecord::new(),
            stats: RowStats::default(),
            finished: false,
        }
    }

    /// Name of the part being streamed
    pub fn part(&self) -> &str {
        &self.part
    }

    /// Column map this part was classified with
    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Values that the next record will inherit
    pub fn carried(&self) -> &CarriedValues {
        &self.carried
    }

    /// Counters for rows read so far
    pub fn stats(&self) -> &RowStats {
        &self.stats
    }

    fn line(&self) -> u64 {
        self.row.position().map(|p| p.line()).unwrap_or_default()
    }
}

impl<R: Read> Iterator for RowImporter<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.reader.read_byte_record(&mut self.row) {
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Ok(true) => {
                    self.stats.rows_read += 1;
                    match apply_row(&self.row, &self.columns, &mut self.carried) {
                        RowOutcome::Emitted(record) => {
                            self.stats.records_emitted += 1;
                            return Some(Ok(record));
                        }
                        RowOutcome::InvalidEmail => {
                            self.stats.invalid_email += 1;
                            debug!(
                                "Skipped row at line {} of '{}': invalid email",
                                self.line(),
                                self.part
                            );
                        }
                    }
                }
                Err(e) if e.is_io_error() => {
                    self.finished = true;
                    return Some(Err(Error::csv_read(
                        self.part.clone(),
                        format!("Stream failed after {} rows", self.stats.rows_read),
                        e,
                    )));
                }
                Err(e) => {
                    self.stats.rows_read += 1;
                    self.stats.malformed += 1;
                    debug!("Skipped malformed row in '{}': {}", self.part, e);
                }
            }
        }
    }
}
