//! Header classification for arbitrarily-headered uploads
//!
//! Each header cell is tested against an ordered table of end-anchored,
//! case-insensitive patterns, one per semantic field. The first pattern that
//! matches claims the column; when several columns claim the same field the
//! right-most one is kept.

use regex::Regex;
use std::sync::LazyLock;

use crate::app::models::SemanticField;

/// Field detection table, evaluated top to bottom for every column
static FIELD_PATTERNS: LazyLock<Vec<(SemanticField, Regex)>> = LazyLock::new(|| {
    [
        (SemanticField::FirstName, r"(?i)first[\s_-]*name$"),
        (SemanticField::LastName, r"(?i)last[\s_-]*name$"),
        (SemanticField::Email, r"(?i)email$"),
        (SemanticField::Position, r"(?i)position$"),
        (SemanticField::Department, r"(?i)department$"),
        (SemanticField::DepartmentNumber, r"(?i)department\s?number$"),
        (SemanticField::Age, r"(?i)age$"),
        (SemanticField::Gender, r"(?i)gender$"),
        (SemanticField::Site, r"(?i)site$"),
        (SemanticField::Phone, r"(?i)phone$"),
        (SemanticField::Degree, r"(?i)degree$"),
        (SemanticField::Description, r"(?i)description$"),
    ]
    .into_iter()
    .map(|(field, pattern)| {
        let regex = Regex::new(pattern).expect("field pattern is a valid regex");
        (field, regex)
    })
    .collect()
});

/// Mapping from semantic field to the column index holding it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [Option<usize>; SemanticField::COUNT],
}

impl ColumnMap {
    /// Column index for a field, if the header named one
    pub fn get(&self, field: SemanticField) -> Option<usize> {
        self.indices[field.index()]
    }

    /// Record a column for a field, replacing any earlier one
    fn assign(&mut self, field: SemanticField, index: usize) {
        self.indices[field.index()] = Some(index);
    }

    /// True when no field was recognised
    pub fn is_empty(&self) -> bool {
        self.indices.iter().all(Option::is_none)
    }

    /// Number of fields with a column
    pub fn len(&self) -> usize {
        self.indices.iter().filter(|index| index.is_some()).count()
    }

    /// Mapped fields with their columns, in field order
    pub fn mapped_fields(&self) -> impl Iterator<Item = (SemanticField, usize)> + '_ {
        SemanticField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|index| (field, index)))
    }
}

/// Classifies header rows into [`ColumnMap`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderClassifier;

impl HeaderClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Identify the semantic field a single header cell names
    pub fn classify_column(&self, name: &str) -> Option<SemanticField> {
        FIELD_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(name))
            .map(|(field, _)| *field)
    }

    /// Build a column map from a header row
    ///
    /// Returns `None` when not a single column is recognised, meaning the
    /// part holds nothing importable.
    pub fn classify<'a, I>(&self, header: I) -> Option<ColumnMap>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = ColumnMap::default();

        for (index, name) in header.into_iter().enumerate() {
            if let Some(field) = self.classify_column(name) {
                map.assign(field, index);
            }
        }

        if map.is_empty() { None } else { Some(map) }
    }
}
