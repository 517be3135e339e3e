//! Diagnostic traces of an extraction run.

use chrono::NaiveDate;

/// Everything the heuristics saw for one document, borrowed for the
/// duration of a sink call.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionTrace<'a> {
    pub full_text: &'a str,
    pub candidate_lines: &'a [&'a str],
    pub all_dates: &'a [&'a str],
    pub full_name: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Receives a trace for every extraction.
///
/// Sinks cannot fail; anything they do is invisible to the caller of the
/// pipeline.
pub trait ExtractionSink: Send + Sync {
    fn record(&self, trace: &ExtractionTrace<'_>);
}

/// Emits traces as debug events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ExtractionSink for TracingSink {
    fn record(&self, trace: &ExtractionTrace<'_>) {
        tracing::debug!(
            target: "orderscan::extraction",
            text_len = trace.full_text.len(),
            candidates = ?trace.candidate_lines,
            dates = ?trace.all_dates,
            full_name = ?trace.full_name,
            first_name = ?trace.first_name,
            last_name = ?trace.last_name,
            dob = ?trace.date_of_birth,
            "Extraction trace"
        );
        tracing::trace!(target: "orderscan::extraction", "Full text:\n{}", trace.full_text);
    }
}

/// Discards traces.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ExtractionSink for NullSink {
    fn record(&self, _trace: &ExtractionTrace<'_>) {}
}
