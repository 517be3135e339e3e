//! In-memory documents and OCR backends for pipeline tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::document::{DocumentLoader, PagedDocument};
use super::ExtractionError;
use crate::ocr::{OcrBackend, OcrError};

/// A document whose pages are `(embedded text, text the page image "shows")`.
///
/// Rendering writes the image text to a file so a [`FakeOcr`] can read it back.
#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    pages: Vec<(String, String)>,
}

impl FakeDocument {
    pub fn new(pages: Vec<(String, String)>) -> Self {
        Self { pages }
    }

    /// Pages that all carry embedded text and render to nothing.
    pub fn embedded(pages: &[&str]) -> Self {
        Self::new(
            pages
                .iter()
                .map(|text| (text.to_string(), String::new()))
                .collect(),
        )
    }

    /// Pages with no embedded text at all, as from a scanner.
    pub fn scanned(pages: &[&str]) -> Self {
        Self::new(
            pages
                .iter()
                .map(|text| (String::new(), text.to_string()))
                .collect(),
        )
    }

    fn page(&self, page: u32) -> Result<&(String, String), ExtractionError> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .ok_or_else(|| ExtractionError::ExtractionFailed(format!("no page {}", page)))
    }
}

impl PagedDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn embedded_text(&self, page: u32) -> Result<String, ExtractionError> {
        Ok(self.page(page)?.0.clone())
    }

    fn render_page(&self, page: u32, output_dir: &Path) -> Result<PathBuf, ExtractionError> {
        let path = output_dir.join(format!("page-{}.png", page));
        std::fs::write(&path, &self.page(page)?.1)?;
        Ok(path)
    }
}

/// OCR that "recognises" the text a [`FakeDocument`] rendered.
#[derive(Debug, Default)]
pub struct FakeOcr {
    calls: AtomicUsize,
    failing: bool,
}

impl FakeOcr {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every invocation fails.
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrBackend for FakeOcr {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "always available".to_string()
    }

    fn run_ocr(&self, image_path: &Path) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(OcrError::OcrFailed("engine crashed".to_string()));
        }
        Ok(std::fs::read_to_string(image_path)?)
    }
}

/// Loader that accepts bytes starting with `%PDF` and serves a fixed document.
#[derive(Debug, Clone, Default)]
pub struct FakeLoader {
    document: FakeDocument,
}

impl FakeLoader {
    pub fn new(document: FakeDocument) -> Self {
        Self { document }
    }
}

impl DocumentLoader for FakeLoader {
    fn load(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, ExtractionError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(ExtractionError::InvalidDocument(
                "missing PDF header".to_string(),
            ));
        }
        Ok(Box::new(self.document.clone()))
    }
}
