//! PDF access through the poppler command-line utilities.
//!
//! `pdfinfo` validates the file and counts pages, `pdftotext` pulls embedded
//! text for one page at a time and `pdftoppm` rasterises a page for OCR.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::document::{DocumentLoader, PagedDocument};
use super::ExtractionError;
use crate::ocr::POPPLER_NOT_FOUND;

/// MIME type accepted by the loader.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Default rasterisation resolution for OCR.
pub const DEFAULT_RENDER_DPI: u32 = 300;

/// Handle command output, extracting stdout on success or returning appropriate error.
fn handle_cmd_output(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ExtractionError::ToolNotFound(
            format!("{} ({})", tool_name, POPPLER_NOT_FOUND),
        )),
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Check command status, returning appropriate error on failure.
fn check_cmd_status(
    result: std::io::Result<std::process::ExitStatus>,
    tool_name: &str,
    error_msg: &str,
) -> Result<(), ExtractionError> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(ExtractionError::ExtractionFailed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ExtractionError::ToolNotFound(
            format!("{} ({})", tool_name, POPPLER_NOT_FOUND),
        )),
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Whether the bytes sniff as a PDF.
pub fn is_pdf(bytes: &[u8]) -> bool {
    infer::get(bytes).is_some_and(|kind| kind.mime_type() == PDF_MIME_TYPE)
}

/// Parse the `Pages:` line out of `pdfinfo` output.
pub fn parse_page_count(pdfinfo_output: &str) -> Option<u32> {
    pdfinfo_output
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|count| count.parse().ok())
}

/// Find the image file for a specific page number.
///
/// pdftoppm names files like page-1.png, page-01.png or page-001.png; the
/// padding width follows the document's total page count.
pub fn find_page_image(output_dir: &Path, page: u32) -> Option<PathBuf> {
    (1..=4)
        .map(|digits| output_dir.join(format!("page-{:0width$}.png", page, width = digits)))
        .find(|path| path.exists())
}

/// Loads PDFs by spilling them to a temporary file for the poppler tools.
#[derive(Debug, Clone)]
pub struct PopplerLoader {
    dpi: u32,
    layout: bool,
}

impl Default for PopplerLoader {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_RENDER_DPI,
            layout: false,
        }
    }
}

impl PopplerLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rasterisation resolution used for OCR fallback.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Ask pdftotext to keep the physical page layout.
    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    fn read_page_count(path: &Path) -> Result<u32, ExtractionError> {
        let output = match Command::new("pdfinfo").arg(path).output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExtractionError::ToolNotFound(format!(
                    "pdfinfo ({})",
                    POPPLER_NOT_FOUND
                )));
            }
            Err(e) => return Err(ExtractionError::Io(e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::InvalidDocument(format!(
                "pdfinfo rejected the file: {}",
                stderr.trim()
            )));
        }

        parse_page_count(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
            ExtractionError::InvalidDocument("PDF reports no page count".to_string())
        })
    }
}

impl DocumentLoader for PopplerLoader {
    fn load(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, ExtractionError> {
        if !is_pdf(bytes) {
            let detected = infer::get(bytes)
                .map(|kind| kind.mime_type())
                .unwrap_or("unknown");
            return Err(ExtractionError::InvalidDocument(format!(
                "expected {}, detected {}",
                PDF_MIME_TYPE, detected
            )));
        }

        let dir = TempDir::new()?;
        let path = dir.path().join("document.pdf");
        std::fs::write(&path, bytes)?;

        let page_count = Self::read_page_count(&path)?;
        tracing::debug!("Loaded PDF with {} pages ({} bytes)", page_count, bytes.len());

        Ok(Box::new(PopplerDocument {
            _dir: dir,
            path,
            page_count,
            dpi: self.dpi,
            layout: self.layout,
        }))
    }
}

/// A PDF spilled to disk; the file lives as long as the document.
struct PopplerDocument {
    _dir: TempDir,
    path: PathBuf,
    page_count: u32,
    dpi: u32,
    layout: bool,
}

impl PagedDocument for PopplerDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn embedded_text(&self, page: u32) -> Result<String, ExtractionError> {
        let page_str = page.to_string();
        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        let output = cmd
            .args(["-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
            .arg(&self.path)
            .arg("-") // Output to stdout
            .output();

        let mut text = handle_cmd_output(
            output,
            "pdftotext",
            &format!("pdftotext failed on page {}", page),
        )?;

        // pdftotext terminates every page with a form feed
        if text.ends_with('\x0c') {
            text.pop();
        }
        Ok(text)
    }

    fn render_page(&self, page: u32, output_dir: &Path) -> Result<PathBuf, ExtractionError> {
        let page_str = page.to_string();
        let dpi_str = self.dpi.to_string();
        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &dpi_str, "-f", &page_str, "-l", &page_str])
            .arg(&self.path)
            .arg(output_dir.join("page"))
            .status();

        check_cmd_status(
            status,
            "pdftoppm",
            &format!("pdftoppm failed to convert page {}", page),
        )?;

        find_page_image(output_dir, page).ok_or_else(|| {
            ExtractionError::ExtractionFailed(format!("No image generated for page {}", page))
        })
    }
}
