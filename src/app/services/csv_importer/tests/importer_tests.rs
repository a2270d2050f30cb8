//! Tests for part-by-part import orchestration

use super::*;
use crate::app::adapters::upload::{MemoryParts, Part, PartSource};
use crate::app::services::csv_importer::RecipientImporter;
use crate::config::ImportConfig;
use crate::{Error, Result};

#[test]
fn test_records_combined_across_parts() {
    let source = upload(&[
        ("a.csv", "First Name,Email\nAlice,alice@example.com\n"),
        ("b.csv", "email,last name\nbob@example.com,Jones\n"),
    ]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0], named("Alice", "alice@example.com"));
    assert_eq!(result.records[1].email, "bob@example.com");
    assert_eq!(result.records[1].last_name, "Jones");
    assert_eq!(result.records[1].first_name, "");
    assert_eq!(result.stats.parts_imported, 2);
    assert_eq!(result.stats.records_imported, 2);
    assert!(!result.stats.stopped_early);
}

#[test]
fn test_carried_values_reset_between_parts() {
    let source = upload(&[
        ("a.csv", "First Name,Site\nAlice,London\n"),
        ("b.csv", "First Name,Site\nBob\n"),
    ]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records[1].first_name, "Bob");
    assert_eq!(result.records[1].site, "");
}

#[test]
fn test_form_field_parts_skipped() {
    let source = MemoryParts::new([
        Part::form_field("Import"),
        Part::from_bytes("a.csv", "Email\nalice@example.com\n"),
        Part::form_field(""),
    ]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stats.parts_received, 3);
    assert_eq!(result.stats.parts_without_filename, 2);
    assert!(!result.stats.stopped_early);
}

#[test]
fn test_unclassifiable_part_skipped_and_later_parts_processed() {
    let source = upload(&[
        ("notes.csv", "id,comment\n1,Alice\n2,Bob\n"),
        ("staff.csv", "First Name\nCarl\n"),
    ]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].first_name, "Carl");
    assert_eq!(result.stats.parts_unclassified, 1);
    assert_eq!(result.stats.parts_imported, 1);
    assert_eq!(result.stats.rows_read, 1);
}

#[test]
fn test_empty_part_stops_entire_import() {
    let source = upload(&[
        ("first.csv", "Email\nalice@example.com\n"),
        ("empty.csv", ""),
        ("later.csv", "Email\nbob@example.com\n"),
    ]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].email, "alice@example.com");
    assert!(result.stats.stopped_early);
    assert_eq!(result.stats.stopped_at.as_deref(), Some("empty.csv"));
    assert_eq!(result.stats.parts_received, 2);
}

#[test]
fn test_empty_part_leaves_later_parts_unread() {
    let mut source = upload(&[
        ("empty.csv", ""),
        ("later.csv", "Email\nbob@example.com\n"),
    ]);

    let result = RecipientImporter::default().import(&mut source).unwrap();

    assert!(result.records.is_empty());
    assert_eq!(source.remaining(), 1);
}

#[test]
fn test_header_only_part_is_not_a_stop() {
    let source = upload(&[
        ("header_only.csv", "First Name,Email\n"),
        ("later.csv", "Email\nbob@example.com\n"),
    ]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records.len(), 1);
    assert!(!result.stats.stopped_early);
}

#[test]
fn test_no_parts_is_empty_success() {
    let result = RecipientImporter::default()
        .import(MemoryParts::default())
        .unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.stats, crate::ImportStats::default());
}

#[test]
fn test_reimport_is_identical() {
    let content = "First Name,Email,Site\nAlice,alice@example.com,Leeds\nBob,bad\nCarl\n";
    let importer = RecipientImporter::default();

    let first = importer.import(upload(&[("a.csv", content)])).unwrap();
    let second = importer.import(upload(&[("a.csv", content)])).unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_custom_delimiter() {
    let importer = RecipientImporter::new(ImportConfig::default().with_delimiter(b';')).unwrap();
    let source = upload(&[("a.csv", "First Name;Email\nAlice;alice@example.com\n")]);

    let result = importer.import(source).unwrap();

    assert_eq!(result.records, vec![named("Alice", "alice@example.com")]);
}

#[test]
fn test_invalid_config_rejected() {
    let config = ImportConfig::default().with_delimiter(b'\n');
    assert!(matches!(
        RecipientImporter::new(config),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_stream_yields_lazily() {
    let importer = RecipientImporter::default();
    let mut stream = importer.stream(upload(&[
        ("a.csv", "First Name\nAlice\nBob\n"),
        ("b.csv", "First Name\nCarl\n"),
    ]));

    assert_eq!(stream.next().unwrap().unwrap().first_name, "Alice");
    assert_eq!(stream.stats().parts_received, 1);

    let rest: Vec<String> = stream.by_ref().map(|r| r.unwrap().first_name).collect();
    assert_eq!(rest, vec!["Bob", "Carl"]);
    assert_eq!(stream.stats().parts_received, 2);
    assert!(stream.next().is_none());
}

#[test]
fn test_transport_failure_propagates() {
    let source = MemoryParts::new([
        Part::from_bytes("a.csv", "Email\nalice@example.com\n"),
        Part::new("broken.csv", FailingBody::new("Email\nbob@example.com\n")),
    ]);

    let error = RecipientImporter::default().import(source).unwrap_err();

    assert!(matches!(error, Error::CsvRead { ref part, .. } if part == "broken.csv"));
}

#[test]
fn test_header_read_failure_propagates() {
    let source = MemoryParts::new([Part::new("broken.csv", FailingBody::new(""))]);

    let error = RecipientImporter::default().import(source).unwrap_err();

    assert!(matches!(error, Error::CsvRead { .. }));
}

struct FailingSource {
    served: bool,
}

impl PartSource for FailingSource {
    fn next_part(&mut self) -> Result<Option<Part>> {
        if self.served {
            return Err(Error::io(
                "Upload decoder failed",
                std::io::Error::other("truncated multipart body"),
            ));
        }
        self.served = true;
        Ok(Some(Part::from_bytes("a.csv", "Email\nalice@example.com\n")))
    }
}

#[test]
fn test_source_failure_propagates() {
    let importer = RecipientImporter::default();
    let mut stream = importer.stream(FailingSource { served: false });

    assert!(stream.next().unwrap().is_ok());
    assert!(matches!(stream.next(), Some(Err(Error::Io { .. }))));
    assert!(stream.next().is_none());
}

#[test]
fn test_non_utf8_header_cell_still_classified() {
    let mut body = b"Pr\xe9nom,First Name,Email\n".to_vec();
    body.extend_from_slice(b"x,Ada,ada@example.com\n");
    let source = MemoryParts::new([Part::from_bytes("latin1.csv", body)]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records, vec![named("Ada", "ada@example.com")]);
    assert_eq!(result.stats.parts_unclassified, 0);
    assert_eq!(result.stats.parts_imported, 1);
}

#[test]
fn test_non_utf8_data_row_still_imported() {
    let mut body = b"First Name,Email\nAda,ada@example.com\n".to_vec();
    body.extend_from_slice(b"J\xfcrgen,j@example.com\n");
    let source = MemoryParts::new([Part::from_bytes("latin1.csv", body)]);

    let result = RecipientImporter::default().import(source).unwrap();
    let emails: Vec<&str> = result.records.iter().map(|r| r.email.as_str()).collect();

    assert_eq!(emails, vec!["ada@example.com", "j@example.com"]);
    assert_eq!(result.stats.rows_malformed, 0);
}

#[test]
fn test_spaced_quoted_fields_imported_whole() {
    let source = upload(&[(
        "staff.csv",
        "Last Name, First Name, Email\n\"Smith, Jr\", \"Ann, B\", ann@example.com\n",
    )]);

    let result = RecipientImporter::default().import(source).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].last_name, "Smith, Jr");
    assert_eq!(result.records[0].first_name, "Ann, B");
    assert_eq!(result.records[0].email, "ann@example.com");
    assert_eq!(result.stats.rows_invalid_email, 0);
}
