//! Import statistics and result structures
//!
//! Malformed input is skipped silently by the importer; these counters are
//! where those skips become visible to callers.

use crate::app::models::Record;

/// Import result with records and statistics
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Records in upload order, across all parts
    pub records: Vec<Record>,

    /// Counters describing what was read and skipped
    pub stats: ImportStats,
}

/// Counters for one import pass
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportStats {
    /// Parts handed over by the upload source
    pub parts_received: usize,

    /// Parts without a file name (plain form fields)
    pub parts_without_filename: usize,

    /// Parts whose header row named no recognised column
    pub parts_unclassified: usize,

    /// Parts whose rows were streamed into records
    pub parts_imported: usize,

    /// Data rows read, header rows excluded
    pub rows_read: usize,

    /// Records emitted
    pub records_imported: usize,

    /// Rows dropped because the email cell failed validation
    pub rows_invalid_email: usize,

    /// Rows dropped because the CSV reader could not decode them
    pub rows_malformed: usize,

    /// Import halted at a part with no header row, leaving later parts unread
    pub stopped_early: bool,

    /// File name of the part that halted the import
    pub stopped_at: Option<String>,
}

impl ImportStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows dropped for any reason
    pub fn rows_discarded(&self) -> usize {
        self.rows_invalid_email + self.rows_malformed
    }

    /// Calculate record yield as a percentage of data rows read
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.records_imported as f64 / self.rows_read as f64) * 100.0
        }
    }

    /// Fold the counters of one part's row stream into the totals
    pub fn absorb_rows(&mut self, rows: &RowStats) {
        self.rows_read += rows.rows_read;
        self.records_imported += rows.records_emitted;
        self.rows_invalid_email += rows.invalid_email;
        self.rows_malformed += rows.malformed;
    }
}

/// Counters kept while streaming the rows of a single part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub rows_read: usize,
    pub records_emitted: usize,
    pub invalid_email: usize,
    pub malformed: usize,
}
