//! Application constants for the recipient importer
//!
//! This module contains default values, accepted upload types, and the
//! example row written by the template command.

// =============================================================================
// CSV Reading Defaults
// =============================================================================

/// Default field delimiter for uploaded files
pub const DEFAULT_DELIMITER: u8 = b',';

/// Leading whitespace in each field is trimmed unless configured otherwise
pub const DEFAULT_TRIM_LEADING_SPACE: bool = true;

// =============================================================================
// Upload Acceptance
// =============================================================================

/// File extensions accepted for upload (compared case-insensitively)
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "txt"];

/// Message shown when an upload has an unsupported extension
pub const UNSUPPORTED_EXTENSION_MESSAGE: &str = "Unsupported file extension (use .csv or .txt)";

// =============================================================================
// Upload Template
// =============================================================================

/// Default file name for the generated upload template
pub const TEMPLATE_FILE_NAME: &str = "group_template.csv";

/// Header row of the upload template, one column per semantic field
pub const TEMPLATE_HEADERS: &[&str] = &[
    "First Name",
    "Last Name",
    "Email",
    "Position",
    "Department",
    "Department Number",
    "Age",
    "Gender",
    "Site",
    "Phone",
    "Degree",
    "Description",
];

/// Example row of the upload template
pub const TEMPLATE_EXAMPLE_ROW: &[&str] = &[
    "Example",
    "User",
    "foobar@example.com",
    "Systems Administrator",
    "Department of justice",
    "1838",
    "41",
    "Male",
    "Washington",
    "+1 5124901128",
    "Phd.",
    "Some serious person",
];

// =============================================================================
// Logging
// =============================================================================

/// Tracing target used when building the default log filter
pub const LOG_TARGET: &str = "recipient_importer";
