//! Date token scanning and date-of-birth recovery.
//!
//! Only two shapes are recognised: ISO `YYYY-MM-DD` and US `MM/DD/YYYY`.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Any date-shaped token, ISO first.
static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}|\d{2}/\d{2}/\d{4}").unwrap());

/// A birth keyword followed by non-digits and then a date token.
static DOB_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:DOB|Birth)\D*(\d{4}-\d{2}-\d{2}|\d{2}/\d{2}/\d{4})").unwrap()
});

/// Every date-shaped token in the text, in order of appearance.
///
/// Matches are non-overlapping and duplicates are kept. The tokens are not
/// validated as calendar dates.
pub fn find_all_dates(text: &str) -> Vec<&str> {
    DATE_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Parse a date token: hyphenated tokens are ISO, anything else is `MM/DD/YYYY`.
///
/// Year zero is rejected along with impossible months and days.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let format = if token.contains('-') {
        "%Y-%m-%d"
    } else {
        "%m/%d/%Y"
    };
    NaiveDate::parse_from_str(token, format)
        .ok()
        .filter(|date| date.year() >= 1)
}

/// The labelled birth date on a single line, if it parses.
///
/// Only the first labelled token on the line is considered.
pub fn date_of_birth_on_line(line: &str) -> Option<NaiveDate> {
    let token = DOB_LABEL.captures(line)?.get(1)?.as_str();
    let parsed = parse_date_token(token);
    if parsed.is_none() {
        tracing::debug!("Ignoring unparseable birth date token {:?}", token);
    }
    parsed
}

/// First candidate line that yields a parseable birth date.
///
/// Lines whose labelled token is not a real calendar date are skipped and
/// scanning continues.
pub fn find_date_of_birth(candidate_lines: &[&str]) -> Option<NaiveDate> {
    candidate_lines
        .iter()
        .find_map(|line| date_of_birth_on_line(line))
}
