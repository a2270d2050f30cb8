//! Data models for recipient imports
//!
//! This module contains the semantic field catalogue recognised in uploaded
//! spreadsheets and the recipient record assembled from each accepted row.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Semantic Fields
// =============================================================================

/// A recognised recipient attribute that a spreadsheet column can map onto
///
/// The declaration order is significant: header classification tests each
/// column against the fields in this order, and row extraction applies
/// values in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticField {
    FirstName,
    LastName,
    Email,
    Position,
    Department,
    DepartmentNumber,
    Age,
    Gender,
    Site,
    Phone,
    Degree,
    Description,
}

impl SemanticField {
    /// Number of semantic fields
    pub const COUNT: usize = 12;

    /// All fields in classification order
    pub const ALL: [SemanticField; Self::COUNT] = [
        SemanticField::FirstName,
        SemanticField::LastName,
        SemanticField::Email,
        SemanticField::Position,
        SemanticField::Department,
        SemanticField::DepartmentNumber,
        SemanticField::Age,
        SemanticField::Gender,
        SemanticField::Site,
        SemanticField::Phone,
        SemanticField::Degree,
        SemanticField::Description,
    ];

    /// Position of this field in [`SemanticField::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Serialized key used for this field in exported records
    pub fn key(self) -> &'static str {
        match self {
            SemanticField::FirstName => "first_name",
            SemanticField::LastName => "last_name",
            SemanticField::Email => "email",
            SemanticField::Position => "position",
            SemanticField::Department => "department",
            SemanticField::DepartmentNumber => "department_number",
            SemanticField::Age => "age",
            SemanticField::Gender => "gender",
            SemanticField::Site => "site",
            SemanticField::Phone => "phone",
            SemanticField::Degree => "degree",
            SemanticField::Description => "description",
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Recipient Record
// =============================================================================

/// One imported recipient
///
/// Every field defaults to the empty string. Records carry no identity beyond
/// their values; deduplication belongs to whatever stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub department_number: String,
    pub age: String,
    pub gender: String,
    pub site: String,
    pub phone: String,
    pub degree: String,
    pub description: String,
}

impl Record {
    /// Build a record from values laid out in [`SemanticField::ALL`] order
    pub fn from_values(values: &[String; SemanticField::COUNT]) -> Self {
        let [
            first_name,
            last_name,
            email,
            position,
            department,
            department_number,
            age,
            gender,
            site,
            phone,
            degree,
            description,
        ] = values.clone();

        Self {
            first_name,
            last_name,
            email,
            position,
            department,
            department_number,
            age,
            gender,
            site,
            phone,
            degree,
            description,
        }
    }

    /// Read the value stored for a semantic field
    pub fn get(&self, field: SemanticField) -> &str {
        match field {
            SemanticField::FirstName => &self.first_name,
            SemanticField::LastName => &self.last_name,
            SemanticField::Email => &self.email,
            SemanticField::Position => &self.position,
            SemanticField::Department => &self.department,
            SemanticField::DepartmentNumber => &self.department_number,
            SemanticField::Age => &self.age,
            SemanticField::Gender => &self.gender,
            SemanticField::Site => &self.site,
            SemanticField::Phone => &self.phone,
            SemanticField::Degree => &self.degree,
            SemanticField::Description => &self.description,
        }
    }
}
