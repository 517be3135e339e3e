//! Line splitting and candidate line selection.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that end a line. `\r\n` is treated as a single terminator.
const LINE_TERMINATORS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Keywords that make a line a candidate for identity information.
static IDENTITY_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Patient|Name|DOB|Birth").unwrap());

/// Split text into lines with terminators removed.
///
/// Recognises form feeds and the other universal line boundaries that OCR
/// output tends to contain. A trailing terminator does not produce an empty
/// final line; empty lines in the middle are kept.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(LINE_TERMINATORS) {
        lines.push(&rest[..pos]);
        let tail = &rest[pos..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[width..];
    }

    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Whether a line mentions patient identity or birth information.
pub fn is_candidate_line(line: &str) -> bool {
    IDENTITY_KEYWORDS.is_match(line)
}

/// Select candidate lines from already-split lines, preserving order.
pub fn select_candidates<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| is_candidate_line(line))
        .collect()
}

/// Split raw text and return every candidate line, verbatim and in order.
pub fn candidate_lines(text: &str) -> Vec<&str> {
    select_candidates(&split_lines(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_basic() {
        assert_eq!(split_lines("a\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_split_lines_mixed_terminators() {
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
        assert_eq!(
            split_lines("Jane Doe\n\x0cDOB 01/02/1990\u{2028}end"),
            vec!["Jane Doe", "", "DOB 01/02/1990", "end"]
        );
    }

    #[test]
    fn test_split_lines_ocr_form_feed() {
        // Tesseract ends its output with a form feed
        assert_eq!(
            split_lines("Patient: Jane Doe\n\x0c"),
            vec!["Patient: Jane Doe", ""]
        );
    }

    #[test]
    fn test_candidate_lines_case_insensitive_and_verbatim() {
        let text = "Clinic Header\n  PATIENT: jane doe  \nnameless thing\nVisit 2020-01-05\ndate of birth: x\nDob\n";
        assert_eq!(
            candidate_lines(text),
            vec!["  PATIENT: jane doe  ", "nameless thing", "date of birth: x", "Dob"]
        );
    }

    #[test]
    fn test_candidate_lines_keeps_duplicates() {
        let text = "Patient: A\nPatient: A\n";
        assert_eq!(candidate_lines(text), vec!["Patient: A", "Patient: A"]);
    }

    #[test]
    fn test_candidate_lines_none() {
        assert!(candidate_lines("Visit 2020-01-05\nTotal: 4").is_empty());
    }
}
