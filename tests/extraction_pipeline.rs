//! End-to-end behaviour of the extraction pipeline over scripted documents.

mod common;

use chrono::NaiveDate;
use common::{extractor, ScriptedDocument};
use orderscan::extraction::{ExtractionError, ExtractionOutcome, UNRESOLVED_REASON};

const PDF: &[u8] = b"%PDF-1.7\n";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn typed_requisition_is_identified_without_ocr() {
    let doc = ScriptedDocument::typed(&[
        "ACME Labs Requisition\nOrdering Provider: John Smith\nPatient Name: Jane Doe\nDOB: 07/04/1985",
        "Tests ordered: CBC\nReport generated 2024-02-01",
    ]);
    let (extractor, ocr) = extractor(doc);

    let record = extractor.extract(PDF).unwrap().into_result().unwrap();

    assert_eq!(record.first_name, "Jane");
    assert_eq!(record.last_name, "Doe");
    assert_eq!(record.date_of_birth, date(1985, 7, 4));
    assert_eq!(ocr.calls(), 0);
}

#[test]
fn scanned_pages_go_through_ocr() {
    let doc = ScriptedDocument::scanned(&[
        "Mary Jones\n12 Elm Street\n\x0c",
        "Date of Birth: 1990-01-01\n\x0c",
    ]);
    let (extractor, ocr) = extractor(doc);

    let record = extractor.extract(PDF).unwrap().into_result().unwrap();

    assert_eq!(record.first_name, "Mary");
    assert_eq!(record.last_name, "Jones");
    assert_eq!(record.date_of_birth, date(1990, 1, 1));
    assert_eq!(ocr.calls(), 2);
}

#[test]
fn unparseable_dob_falls_through_to_next_line() {
    let doc = ScriptedDocument::typed(&["Patient: Alan Turing\nDOB: 99/99/9999\nBirth 1912-06-23"]);
    let (extractor, _) = extractor(doc);

    let record = extractor.extract(PDF).unwrap().into_result().unwrap();
    assert_eq!(record.date_of_birth, date(1912, 6, 23));
}

#[test]
fn missing_dob_is_unresolved_with_hints() {
    let doc = ScriptedDocument::typed(&["Patient: Jane Doe Smith\nVisit 2020-01-05 and 02/15/2021"]);
    let (extractor, _) = extractor(doc);

    match extractor.extract(PDF).unwrap() {
        ExtractionOutcome::Unresolved(failure) => {
            assert_eq!(failure.reason, UNRESOLVED_REASON);
            assert_eq!(failure.full_name.as_deref(), Some("Jane Doe"));
            assert_eq!(failure.first_name.as_deref(), Some("Jane"));
            assert_eq!(failure.last_name.as_deref(), Some("Doe"));
            assert_eq!(failure.date_of_birth, None);
            assert_eq!(failure.all_dates, vec!["2020-01-05", "02/15/2021"]);
            assert_eq!(failure.candidate_lines, vec!["Patient: Jane Doe Smith"]);
        }
        other => panic!("expected unresolved, got {other:?}"),
    }
}

#[test]
fn single_word_name_leaves_both_parts_unset() {
    // "Patient: Madonna" has no two-word name, and no line is a bare two-word name
    let doc = ScriptedDocument::typed(&["Patient: Madonna\nDOB 1958-08-16"]);
    let (extractor, _) = extractor(doc);

    let failure = extractor.extract(PDF).unwrap().into_result().unwrap_err();
    assert_eq!(failure.first_name, None);
    assert_eq!(failure.last_name, None);
    assert_eq!(failure.date_of_birth.as_deref(), Some("1958-08-16"));
}

#[test]
fn non_pdf_is_rejected_before_reading_pages() {
    let (extractor, ocr) = extractor(ScriptedDocument::scanned(&["Jane Doe"]));

    let err = extractor.extract(b"GIF89a").unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidDocument(_)));
    assert_eq!(ocr.calls(), 0);
}

#[test]
fn repeated_extraction_gives_identical_results() {
    let doc = ScriptedDocument::scanned(&["Name: Grace Hopper\nBirth: 12/09/1906"]);
    let (extractor, _) = extractor(doc);

    let first = extractor.extract(PDF).unwrap();
    let second = extractor.extract(PDF).unwrap();
    assert_eq!(first, second);
}
