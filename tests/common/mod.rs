//! Shared fakes for integration tests: no poppler or tesseract needed.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use orderscan::extraction::{
    DocumentLoader, ExtractionError, NullSink, PagedDocument, PatientExtractor,
};
use orderscan::ocr::{OcrBackend, OcrError};

/// Pages as `(embedded text, text visible in the rendered image)`.
#[derive(Clone, Default)]
pub struct ScriptedDocument {
    pub pages: Vec<(String, String)>,
}

impl ScriptedDocument {
    pub fn typed(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| (p.to_string(), String::new())).collect(),
        }
    }

    pub fn scanned(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| (String::new(), p.to_string())).collect(),
        }
    }
}

impl PagedDocument for ScriptedDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn embedded_text(&self, page: u32) -> Result<String, ExtractionError> {
        Ok(self.pages[(page - 1) as usize].0.clone())
    }

    fn render_page(&self, page: u32, output_dir: &Path) -> Result<PathBuf, ExtractionError> {
        let path = output_dir.join(format!("page-{}.png", page));
        std::fs::write(&path, &self.pages[(page - 1) as usize].1)?;
        Ok(path)
    }
}

/// Accepts anything that starts like a PDF and hands out the scripted document.
pub struct ScriptedLoader(pub ScriptedDocument);

impl DocumentLoader for ScriptedLoader {
    fn load(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, ExtractionError> {
        if !bytes.starts_with(b"%PDF-") {
            return Err(ExtractionError::InvalidDocument("not a PDF".to_string()));
        }
        Ok(Box::new(self.0.clone()))
    }
}

/// Reads back what `ScriptedDocument::render_page` wrote and counts calls.
#[derive(Clone, Default)]
pub struct ReadBackOcr {
    pub calls: Arc<AtomicUsize>,
}

impl ReadBackOcr {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrBackend for ReadBackOcr {
    fn name(&self) -> &'static str {
        "read-back"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        String::new()
    }

    fn run_ocr(&self, image_path: &Path) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(std::fs::read_to_string(image_path)?)
    }
}

/// Extractor over a scripted document; the returned OCR handle shares its counter.
pub fn extractor(document: ScriptedDocument) -> (PatientExtractor, ReadBackOcr) {
    let ocr = ReadBackOcr::default();
    let extractor = PatientExtractor::new(
        Box::new(ScriptedLoader(document)),
        Box::new(ocr.clone()),
    )
    .with_sink(Arc::new(NullSink));
    (extractor, ocr)
}
