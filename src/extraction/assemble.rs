//! Assembly of extracted fields into an identity record or a diagnostic failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{find_all_dates, find_date_of_birth};
use super::lines::{select_candidates, split_lines};
use super::names::{find_patient_name, split_name};
use super::trace::ExtractionTrace;

/// Reason attached to every unresolved extraction.
pub const UNRESOLVED_REASON: &str =
    "Could not robustly extract patient name and date of birth from the PDF.";

/// Patient identity recovered from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
}

/// Why a well-formed document did not yield an identity, with everything
/// that was found along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub reason: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Parsed birth date rendered as `YYYY-MM-DD`, when one was found.
    pub date_of_birth: Option<String>,
    pub candidate_lines: Vec<String>,
    pub all_dates: Vec<String>,
    pub full_name: Option<String>,
}

/// Result of running the heuristics over a well-formed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Identified(IdentityRecord),
    Unresolved(ExtractionFailure),
}

impl ExtractionOutcome {
    pub fn is_identified(&self) -> bool {
        matches!(self, Self::Identified(_))
    }

    /// Convert into a `Result`, treating an unresolved extraction as the error.
    pub fn into_result(self) -> Result<IdentityRecord, ExtractionFailure> {
        match self {
            Self::Identified(record) => Ok(record),
            Self::Unresolved(failure) => Err(failure),
        }
    }
}

/// Everything the heuristics found in one raw text, borrowed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Findings<'a> {
    pub candidate_lines: Vec<&'a str>,
    pub all_dates: Vec<&'a str>,
    pub full_name: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
}

impl<'a> Findings<'a> {
    /// Run every heuristic over the raw text of a document.
    pub fn analyze(text: &'a str) -> Self {
        let lines = split_lines(text);
        let candidate_lines = select_candidates(&lines);
        let all_dates = find_all_dates(text);
        let date_of_birth = find_date_of_birth(&candidate_lines);
        let full_name = find_patient_name(&candidate_lines, &lines);
        let (first_name, last_name) = match full_name.and_then(split_name) {
            Some((first, last)) => (Some(first), Some(last)),
            None => (None, None),
        };

        Self {
            candidate_lines,
            all_dates,
            full_name,
            first_name,
            last_name,
            date_of_birth,
        }
    }

    /// Diagnostic view of these findings for an observability sink.
    pub fn trace(&self, full_text: &'a str) -> ExtractionTrace<'_> {
        ExtractionTrace {
            full_text,
            candidate_lines: &self.candidate_lines,
            all_dates: &self.all_dates,
            full_name: self.full_name,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
        }
    }

    /// Build an identity record only when every field is present and non-empty.
    pub fn assemble(&self) -> ExtractionOutcome {
        fn non_empty(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        match (
            non_empty(self.first_name),
            non_empty(self.last_name),
            self.date_of_birth,
        ) {
            (Some(first_name), Some(last_name), Some(date_of_birth)) => {
                ExtractionOutcome::Identified(IdentityRecord {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    date_of_birth,
                })
            }
            _ => ExtractionOutcome::Unresolved(ExtractionFailure {
                reason: UNRESOLVED_REASON.to_string(),
                first_name: self.first_name.map(str::to_string),
                last_name: self.last_name.map(str::to_string),
                date_of_birth: self.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
                candidate_lines: self.candidate_lines.iter().map(|s| s.to_string()).collect(),
                all_dates: self.all_dates.iter().map(|s| s.to_string()).collect(),
                full_name: self.full_name.map(str::to_string),
            }),
        }
    }
}
