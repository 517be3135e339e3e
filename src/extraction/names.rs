//! Patient name recovery.
//!
//! A labelled match on a candidate line wins; otherwise a bare
//! "First Last" line near the top of the document is accepted.

use regex::Regex;
use std::sync::LazyLock;

/// How many leading lines of the document the positional fallback inspects.
pub const FALLBACK_LINE_WINDOW: usize = 10;

/// Lines naming someone other than the patient.
static EXCLUDED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Provider|Doctor|Generated|Report|Prescriber").unwrap());

/// "Patient" or "Name", then non-letters, then two capitalized words.
static LABELLED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Patient|Name)[^A-Za-z]*([A-Z][a-z]+ [A-Z][a-z]+)").unwrap()
});

/// A whole line consisting of two capitalized words.
static STANDALONE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+$").unwrap());

/// Whether a line is about a provider, prescriber or report rather than the patient.
pub fn is_excluded_line(line: &str) -> bool {
    EXCLUDED_LINE.is_match(line)
}

/// Name following a "Patient"/"Name" label on the first eligible candidate line.
pub fn find_labelled_name<'a>(candidate_lines: &[&'a str]) -> Option<&'a str> {
    candidate_lines
        .iter()
        .copied()
        .filter(|line| !is_excluded_line(line))
        .find_map(|line| {
            LABELLED_NAME
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        })
}

/// First of the leading document lines that is exactly two capitalized words.
pub fn find_standalone_name<'a>(document_lines: &[&'a str]) -> Option<&'a str> {
    document_lines
        .iter()
        .take(FALLBACK_LINE_WINDOW)
        .copied()
        .map(str::trim)
        .find(|line| STANDALONE_NAME.is_match(line))
}

/// Recover the patient's full name.
///
/// `document_lines` are all lines of the raw text; only the first
/// [`FALLBACK_LINE_WINDOW`] are used, and only when no labelled name exists.
pub fn find_patient_name<'a>(
    candidate_lines: &[&'a str],
    document_lines: &[&'a str],
) -> Option<&'a str> {
    find_labelled_name(candidate_lines).or_else(|| find_standalone_name(document_lines))
}

/// Split a full name into first and last name.
///
/// Parts beyond the second are dropped; a single part yields nothing.
pub fn split_name(full_name: &str) -> Option<(&str, &str)> {
    let mut parts = full_name.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(first), Some(last)) => Some((first, last)),
        _ => None,
    }
}
