//! Tests for header classification

use super::super::column_map::HeaderClassifier;
use crate::app::models::SemanticField;
use crate::constants::TEMPLATE_HEADERS;

#[test]
fn test_each_field_maps_to_its_index() {
    let header = [
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

    let map = HeaderClassifier::new().classify(header).unwrap();

    assert_eq!(map.len(), SemanticField::COUNT);
    for (index, field) in SemanticField::ALL.iter().enumerate() {
        assert_eq!(map.get(*field), Some(index), "field {field}");
    }
}

#[test]
fn test_template_headers_classify_completely() {
    let map = HeaderClassifier::new()
        .classify(TEMPLATE_HEADERS.iter().copied())
        .unwrap();
    assert_eq!(map.len(), SemanticField::COUNT);
}

#[test]
fn test_matching_is_case_insensitive_and_suffix_anchored() {
    let classifier = HeaderClassifier::new();

    assert_eq!(classifier.classify_column("EMAIL"), Some(SemanticField::Email));
    assert_eq!(classifier.classify_column("Work Email"), Some(SemanticField::Email));
    assert_eq!(classifier.classify_column("Email Address"), None);
    assert_eq!(classifier.classify_column("Mobile Phone"), Some(SemanticField::Phone));
    assert_eq!(classifier.classify_column("Phone Number"), None);
}

#[test]
fn test_name_separators() {
    let classifier = HeaderClassifier::new();

    for header in ["firstname", "First Name", "first_name", "first-name", "FIRST  NAME"] {
        assert_eq!(
            classifier.classify_column(header),
            Some(SemanticField::FirstName),
            "{header}"
        );
    }
    for header in ["lastname", "Last_Name", "last - name"] {
        assert_eq!(
            classifier.classify_column(header),
            Some(SemanticField::LastName),
            "{header}"
        );
    }
}

#[test]
fn test_department_and_department_number_are_distinct() {
    let classifier = HeaderClassifier::new();

    assert_eq!(
        classifier.classify_column("Department"),
        Some(SemanticField::Department)
    );
    assert_eq!(
        classifier.classify_column("department number"),
        Some(SemanticField::DepartmentNumber)
    );
    assert_eq!(
        classifier.classify_column("DepartmentNumber"),
        Some(SemanticField::DepartmentNumber)
    );
    assert_eq!(classifier.classify_column("DepNumber"), None);
}

#[test]
fn test_suffix_matching_catches_compound_names() {
    let classifier = HeaderClassifier::new();

    assert_eq!(classifier.classify_column("Website"), Some(SemanticField::Site));
    assert_eq!(classifier.classify_column("Home Page"), Some(SemanticField::Age));
    assert_eq!(classifier.classify_column("Job Description"), Some(SemanticField::Description));
}

#[test]
fn test_later_duplicate_column_wins() {
    let header = ["Email", "Name", "Backup Email", "Notes"];

    let map = HeaderClassifier::new().classify(header).unwrap();

    assert_eq!(map.get(SemanticField::Email), Some(2));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_unrecognised_header_is_unclassifiable() {
    let classifier = HeaderClassifier::new();

    assert!(classifier.classify(["id", "name", "notes"]).is_none());
    assert!(classifier.classify(Vec::<&str>::new()).is_none());
}

#[test]
fn test_absent_fields_are_unset() {
    let map = HeaderClassifier::new()
        .classify(["Surname", "Email", "Phone"])
        .unwrap();

    assert_eq!(map.get(SemanticField::Email), Some(1));
    assert_eq!(map.get(SemanticField::Phone), Some(2));
    assert_eq!(map.get(SemanticField::FirstName), None);
    assert_eq!(map.get(SemanticField::LastName), None);

    let mapped: Vec<_> = map.mapped_fields().collect();
    assert_eq!(
        mapped,
        vec![(SemanticField::Email, 1), (SemanticField::Phone, 2)]
    );
}
