//! Part-by-part import orchestration
//!
//! Parts are pulled from the upload source one at a time. Each file part has
//! its first row classified as a header and its remaining rows streamed into
//! records. Parts without a file name and parts with an unrecognisable
//! header contribute nothing. A file part with no rows at all ends the whole
//! import: later parts are left unread and the records gathered so far are
//! returned as a successful result.

use csv::ByteRecord;
use std::borrow::Cow;
use std::io::Read;
use std::mem;
use tracing::{debug, info, warn};

use super::column_map::HeaderClassifier;
use super::field_trim::TrimLeadingSpace;
use super::row_importer::RowImporter;
use super::stats::{ImportResult, ImportStats};
use crate::app::adapters::upload::{Part, PartSource};
use crate::app::models::Record;
use crate::config::ImportConfig;
use crate::{Error, Result};

type PartRows = RowImporter<TrimLeadingSpace<Box<dyn Read + Send>>>;

/// Recipient importer for multi-part CSV uploads
///
/// Holds only configuration, so repeated imports of identical input produce
/// identical output.
#[derive(Debug, Clone)]
pub struct RecipientImporter {
    config: ImportConfig,
    classifier: HeaderClassifier,
}

impl Default for RecipientImporter {
    fn default() -> Self {
        Self {
            config: ImportConfig::default(),
            classifier: HeaderClassifier::new(),
        }
    }
}

impl RecipientImporter {
    /// Create an importer, rejecting settings that cannot split records
    pub fn new(config: ImportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            classifier: HeaderClassifier::new(),
        })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import every part of an upload, collecting the records
    pub fn import<S: PartSource>(&self, source: S) -> Result<ImportResult> {
        let mut stream = self.stream(source);
        let records = stream.by_ref().collect::<Result<Vec<Record>>>()?;

        Ok(ImportResult {
            records,
            stats: stream.into_stats(),
        })
    }

    /// Lazily import an upload, yielding records as rows are read
    pub fn stream<S: PartSource>(&self, source: S) -> ImportStream<S> {
        info!("Starting recipient import");
        ImportStream {
            source,
            config: self.config.clone(),
            classifier: self.classifier,
            state: ImportState::AwaitPart,
            stats: ImportStats::new(),
        }
    }
}

/// Where an import currently stands
enum ImportState {
    /// Ready to request the next part
    AwaitPart,
    /// Streaming data rows of an open part
    StreamRows(Box<PartRows>),
    /// Upload exhausted, halted, or failed
    Done,
}

/// How a newly received part is handled
enum PartStart {
    Rows(Box<PartRows>),
    Skipped,
    Halted,
}

/// Lazy record stream over an upload
///
/// Yields `Err` at most once, for a transport failure, after which the
/// stream is finished.
pub struct ImportStream<S> {
    source: S,
    config: ImportConfig,
    classifier: HeaderClassifier,
    state: ImportState,
    stats: ImportStats,
}

impl<S: PartSource> ImportStream<S> {
    /// Counters gathered so far
    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// Give up the stream, keeping its counters
    pub fn into_stats(self) -> ImportStats {
        self.stats
    }

    /// Read a part's header and decide whether its rows are imported
    ///
    /// The part is consumed here, so its body is released on every path out
    /// of this function unless it moves into the returned row stream.
    fn begin_part(&mut self, part: Part) -> Result<PartStart> {
        self.stats.parts_received += 1;

        if !part.is_file() {
            self.stats.parts_without_filename += 1;
            debug!("Skipping form field part without a file name");
            return Ok(PartStart::Skipped);
        }

        let filename = part.filename().to_string();
        let mut reader = self.config.reader(part.into_body());
        let mut header = ByteRecord::new();

        match reader.read_byte_record(&mut header) {
            Ok(true) => {}
            Ok(false) => {
                self.stats.stopped_early = true;
                self.stats.stopped_at = Some(filename.clone());
                warn!(
                    "Part '{}' has no header row; stopping import, remaining parts are not read",
                    filename
                );
                return Ok(PartStart::Halted);
            }
            Err(e) if e.is_io_error() => {
                return Err(Error::csv_read(filename, "Failed to read header row", e));
            }
            Err(e) => {
                self.stats.parts_unclassified += 1;
                info!("Skipping part '{}': unreadable header row ({})", filename, e);
                return Ok(PartStart::Skipped);
            }
        }

        let cells: Vec<Cow<'_, str>> = header.iter().map(String::from_utf8_lossy).collect();
        let Some(columns) = self
            .classifier
            .classify(cells.iter().map(|cell| cell.as_ref()))
        else {
            self.stats.parts_unclassified += 1;
            info!(
                "Skipping part '{}': no recognised columns in header {:?}",
                filename, cells
            );
            return Ok(PartStart::Skipped);
        };

        info!(
            "Importing part '{}' with {} mapped columns",
            filename,
            columns.len()
        );
        for (field, index) in columns.mapped_fields() {
            debug!("  {} -> column {}", field, index);
        }

        Ok(PartStart::Rows(Box::new(RowImporter::new(filename, reader, columns))))
    }

    /// Fold a finished part's counters into the totals
    fn close_part(&mut self, rows: &PartRows) {
        let row_stats = *rows.stats();
        self.stats.absorb_rows(&row_stats);
        self.stats.parts_imported += 1;
        debug!(
            "Closed part '{}': {} records from {} rows",
            rows.part(),
            row_stats.records_emitted,
            row_stats.rows_read
        );
    }

    fn log_summary(&self) {
        info!(
            "Import finished: {} records from {} parts ({} rows discarded)",
            self.stats.records_imported,
            self.stats.parts_imported,
            self.stats.rows_discarded()
        );
    }
}

impl<S: PartSource> Iterator for ImportStream<S> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match mem::replace(&mut self.state, ImportState::Done) {
                ImportState::Done => return None,
                ImportState::StreamRows(mut rows) => match rows.next() {
                    Some(Ok(record)) => {
                        self.state = ImportState::StreamRows(rows);
                        return Some(Ok(record));
                    }
                    Some(Err(e)) => {
                        self.close_part(&rows);
                        return Some(Err(e));
                    }
                    None => {
                        self.close_part(&rows);
                        self.state = ImportState::AwaitPart;
                    }
                },
                ImportState::AwaitPart => {
                    let part = match self.source.next_part() {
                        Ok(Some(part)) => part,
                        Ok(None) => {
                            self.log_summary();
                            return None;
                        }
                        Err(e) => return Some(Err(e)),
                    };

                    match self.begin_part(part) {
                        Ok(PartStart::Rows(rows)) => self.state = ImportState::StreamRows(rows),
                        Ok(PartStart::Skipped) => self.state = ImportState::AwaitPart,
                        Ok(PartStart::Halted) => {
                            self.log_summary();
                            return None;
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
            }
        }
    }
}
