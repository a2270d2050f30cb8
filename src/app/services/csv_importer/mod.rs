//! Heuristic CSV importer for recipient uploads
//!
//! Uploaded spreadsheets arrive with whatever headers the operator chose.
//! This module infers which column holds which recipient attribute and
//! streams the rows into [`Record`](crate::app::models::Record)s, skipping
//! bad rows and bad files instead of failing the import.
//!
//! ## Architecture
//!
//! - [`column_map`] - Header classification onto semantic fields
//! - [`email`] - Mailbox validation for the email column
//! - [`field_trim`] - Leading whitespace removal before fields are split
//! - [`row_importer`] - Carried-value row streaming within one part
//! - [`importer`] - Part-by-part orchestration and termination rules
//! - [`stats`] - Import counters and result structures
//!
//! ## Usage
//!
//! ```rust
//! use recipient_importer::{MemoryParts, Part, RecipientImporter};
//!
//! # fn example() -> recipient_importer::Result<()> {
//! let upload = MemoryParts::new([
//!     Part::form_field("submit"),
//!     Part::from_bytes("staff.csv", "First Name,Email\nAlice,alice@example.com\n"),
//! ]);
//!
//! let result = RecipientImporter::default().import(upload)?;
//! assert_eq!(result.records.len(), 1);
//! assert_eq!(result.records[0].first_name, "Alice");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod column_map;
pub mod email;
pub mod field_trim;
pub mod importer;
pub mod row_importer;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_map::{ColumnMap, HeaderClassifier};
pub use email::validate_email;
pub use field_trim::TrimLeadingSpace;
pub use importer::{ImportStream, RecipientImporter};
pub use row_importer::{CarriedValues, RowImporter, RowOutcome, apply_row};
pub use stats::{ImportResult, ImportStats, RowStats};
