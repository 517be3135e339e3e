//! Patient identity extraction from PDF documents.
//!
//! Text is acquired page by page (embedded text, else OCR), then a set of
//! line-oriented heuristics recovers the patient's name and date of birth.
//! The pipeline knows nothing about HTTP or storage; callers get either an
//! [`IdentityRecord`] or an [`ExtractionFailure`] describing what was found.

mod acquire;
mod assemble;
pub mod dates;
mod document;
pub mod lines;
pub mod names;
mod poppler;
mod trace;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use thiserror::Error;

use crate::config::Settings;
use crate::ocr::{OcrBackend, OcrConfig, OcrError, TesseractBackend};

pub use acquire::{acquire_text, resolve_page, PageSource};
pub use assemble::{
    ExtractionFailure, ExtractionOutcome, Findings, IdentityRecord, UNRESOLVED_REASON,
};
pub use document::{DocumentLoader, PagedDocument};
pub use poppler::{is_pdf, PopplerLoader, DEFAULT_RENDER_DPI, PDF_MIME_TYPE};
pub use trace::{ExtractionSink, ExtractionTrace, NullSink, TracingSink};

/// Errors that abort an extraction.
///
/// A document that loads fine but yields no identity is not an error; see
/// [`ExtractionOutcome::Unresolved`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    /// Whether the failure is caused by a missing external program.
    pub fn is_missing_tool(&self) -> bool {
        matches!(
            self,
            Self::ToolNotFound(_) | Self::Ocr(OcrError::BackendNotAvailable(_))
        )
    }
}

/// Runs the full pipeline: load, acquire text, analyze, assemble.
pub struct PatientExtractor {
    loader: Box<dyn DocumentLoader>,
    ocr: Box<dyn OcrBackend>,
    sink: Arc<dyn ExtractionSink>,
}

impl PatientExtractor {
    /// Create an extractor that reports traces through `tracing`.
    pub fn new(loader: Box<dyn DocumentLoader>, ocr: Box<dyn OcrBackend>) -> Self {
        Self {
            loader,
            ocr,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn ExtractionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Poppler and Tesseract configured from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let loader = PopplerLoader::new()
            .with_dpi(settings.render_dpi)
            .with_layout(settings.pdf_layout);
        let ocr = TesseractBackend::with_config(OcrConfig {
            language: settings.ocr_language.clone(),
        });
        Self::new(Box::new(loader), Box::new(ocr))
    }

    /// Name of the OCR backend in use.
    pub fn ocr_backend(&self) -> &'static str {
        self.ocr.name()
    }

    /// Extract patient identity from raw document bytes.
    ///
    /// Malformed input fails with [`ExtractionError::InvalidDocument`] before
    /// any page is read. A readable document always yields an outcome.
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractionOutcome, ExtractionError> {
        let document = self.loader.load(bytes)?;
        let text = acquire_text(document.as_ref(), self.ocr.as_ref())?;
        Ok(self.analyze(&text))
    }

    /// Run the heuristics over already-acquired text.
    pub fn analyze(&self, text: &str) -> ExtractionOutcome {
        let findings = Findings::analyze(text);
        self.sink.record(&findings.trace(text));

        let outcome = findings.assemble();
        match &outcome {
            ExtractionOutcome::Identified(record) => tracing::info!(
                "Extracted patient {} {}",
                record.first_name,
                record.last_name
            ),
            ExtractionOutcome::Unresolved(failure) => tracing::warn!(
                "Extraction unresolved: {} candidate lines, {} dates",
                failure.candidate_lines.len(),
                failure.all_dates.len()
            ),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeDocument, FakeLoader};
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        traces: Mutex<Vec<(Vec<String>, Option<String>)>>,
    }

    impl ExtractionSink for RecordingSink {
        fn record(&self, trace: &ExtractionTrace<'_>) {
            self.traces.lock().unwrap().push((
                trace.candidate_lines.iter().map(|s| s.to_string()).collect(),
                trace.full_name.map(str::to_string),
            ));
        }
    }

    fn extractor(document: FakeDocument) -> PatientExtractor {
        PatientExtractor::new(
            Box::new(FakeLoader::new(document)),
            Box::new(testing::FakeOcr::new()),
        )
        .with_sink(Arc::new(NullSink))
    }

    #[test]
    fn test_extract_typed_document() {
        let doc = FakeDocument::embedded(&[
            "Lab Order\nOrdering Provider: John Smith\nPatient Name: Jane Doe\nDOB: 07/04/1985",
        ]);
        let record = extractor(doc)
            .extract(b"%PDF-1.7")
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(
            record.date_of_birth,
            NaiveDate::from_ymd_opt(1985, 7, 4).unwrap()
        );
    }

    #[test]
    fn test_extract_scanned_document() {
        let doc = FakeDocument::scanned(&["Patient: Mary Jones\nDate of Birth 1990-01-01\n\x0c"]);
        let outcome = extractor(doc).extract(b"%PDF-1.7").unwrap();
        assert!(outcome.is_identified());
    }

    #[test]
    fn test_extract_across_pages() {
        let doc = FakeDocument::new(vec![
            ("Patient: Jane Doe".into(), String::new()),
            (String::new(), "DOB 1985-07-04".into()),
        ]);
        assert!(extractor(doc).extract(b"%PDF-1.7").unwrap().is_identified());
    }

    #[test]
    fn test_invalid_document_is_an_error_not_an_outcome() {
        let err = extractor(FakeDocument::embedded(&["Patient: Jane Doe"]))
            .extract(b"PK\x03\x04")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidDocument(_)));
    }

    #[test]
    fn test_unresolved_carries_diagnostics() {
        let doc = FakeDocument::embedded(&["Patient Name: Jane Doe\nVisit 2020-01-05"]);
        let failure = extractor(doc)
            .extract(b"%PDF-1.7")
            .unwrap()
            .into_result()
            .unwrap_err();

        assert_eq!(failure.reason, UNRESOLVED_REASON);
        assert_eq!(failure.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(failure.candidate_lines, vec!["Patient Name: Jane Doe"]);
        assert_eq!(failure.all_dates, vec!["2020-01-05"]);
    }

    #[test]
    fn test_missing_ocr_tool_is_reported() {
        let err = ExtractionError::from(OcrError::BackendNotAvailable("tesseract".into()));
        assert!(err.is_missing_tool());
        assert!(ExtractionError::ToolNotFound("pdfinfo".into()).is_missing_tool());
        assert!(!ExtractionError::InvalidDocument("x".into()).is_missing_tool());
    }

    #[test]
    fn test_sink_receives_trace() {
        let sink = Arc::new(RecordingSink::default());
        let extractor = PatientExtractor::new(
            Box::new(FakeLoader::default()),
            Box::new(testing::FakeOcr::new()),
        )
        .with_sink(sink.clone());

        extractor.analyze("Header\nPatient: Jane Doe\n");

        let traces = sink.traces.lock().unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].0, vec!["Patient: Jane Doe"]);
        assert_eq!(traces[0].1.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let doc = FakeDocument::scanned(&["Name: Ada Lovelace\nBirth: 12/10/1815"]);
        let extractor = extractor(doc);
        let first = extractor.extract(b"%PDF-1.4").unwrap();
        let second = extractor.extract(b"%PDF-1.4").unwrap();
        assert_eq!(first, second);
        assert!(first.is_identified());
    }
}
