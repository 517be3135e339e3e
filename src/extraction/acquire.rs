//! Text acquisition: embedded page text with a per-page OCR fallback.

use tempfile::TempDir;

use super::document::PagedDocument;
use super::ExtractionError;
use crate::ocr::OcrBackend;

/// Where a page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    Embedded,
    Ocr,
}

impl PageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Ocr => "ocr",
        }
    }
}

/// Whether embedded text has anything besides whitespace and the
/// information separators `\x1c`..`\x1f`.
fn has_content(text: &str) -> bool {
    text.chars()
        .any(|c| !c.is_whitespace() && !('\x1c'..='\x1f').contains(&c))
}

/// Resolve the text of a single page.
///
/// Embedded text is used verbatim when it has any visible content;
/// otherwise the page is rendered and OCR output is used as-is, even when
/// it is empty.
pub fn resolve_page(
    document: &dyn PagedDocument,
    page: u32,
    ocr: &dyn OcrBackend,
) -> Result<(String, PageSource), ExtractionError> {
    let embedded = document.embedded_text(page)?;
    if has_content(&embedded) {
        return Ok((embedded, PageSource::Embedded));
    }

    let scratch = TempDir::new()?;
    let image_path = document.render_page(page, scratch.path())?;
    let result = ocr.ocr_image(&image_path)?;
    tracing::debug!(
        "Page {}: no embedded text, {} produced {} bytes in {}ms",
        page,
        result.backend,
        result.text.len(),
        result.processing_time_ms
    );
    Ok((result.text, PageSource::Ocr))
}

/// Produce the raw text of a document: every page's resolved text joined
/// with a single newline, in page order.
pub fn acquire_text(
    document: &dyn PagedDocument,
    ocr: &dyn OcrBackend,
) -> Result<String, ExtractionError> {
    let pages = (1..=document.page_count())
        .map(|page| {
            let (text, source) = resolve_page(document, page, ocr)?;
            tracing::debug!(
                "Page {}: {} text ({} bytes)",
                page,
                source.as_str(),
                text.len()
            );
            Ok(text)
        })
        .collect::<Result<Vec<_>, ExtractionError>>()?;
    Ok(pages.join("\n"))
}
