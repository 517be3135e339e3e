//! One-off extraction from a local file.

use std::path::Path;
use std::sync::Arc;

use console::style;

use crate::config::Settings;
use crate::extraction::{ExtractionOutcome, PatientExtractor};

/// Run the extraction pipeline on a file and print what was found.
pub async fn cmd_extract(settings: &Settings, file: &Path, json: bool) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;

    let extractor = Arc::new(PatientExtractor::from_settings(settings));
    tracing::info!(
        "Extracting {} ({} bytes, {} OCR)",
        file.display(),
        bytes.len(),
        extractor.ocr_backend()
    );
    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await??;

    match outcome {
        ExtractionOutcome::Identified(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{} Patient identified", style("✓").green());
                println!("  First name:    {}", record.first_name);
                println!("  Last name:     {}", record.last_name);
                println!("  Date of birth: {}", record.date_of_birth);
            }
            Ok(())
        }
        ExtractionOutcome::Unresolved(failure) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&failure)?);
            } else {
                eprintln!("{} {}", style("✗").red(), failure.reason);
                let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
                eprintln!("  Name found:    {}", show(&failure.full_name));
                eprintln!("  Date of birth: {}", show(&failure.date_of_birth));
                eprintln!("  Candidate lines:");
                for line in &failure.candidate_lines {
                    eprintln!("    {}", style(line).dim());
                }
                eprintln!("  Dates: {}", failure.all_dates.join(", "));
            }
            anyhow::bail!("extraction unresolved for {}", file.display())
        }
    }
}
