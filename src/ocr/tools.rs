//! External tool discovery for OCR and PDF processing.

/// Hint shown when Tesseract cannot be found.
pub const TESSERACT_NOT_FOUND: &str = "tesseract (install tesseract-ocr)";

/// Hint shown when a poppler utility cannot be found.
pub const POPPLER_NOT_FOUND: &str = "install poppler-utils";

/// Every external binary the extraction pipeline may invoke.
pub const REQUIRED_TOOLS: [&str; 4] = ["pdfinfo", "pdftotext", "pdftoppm", "tesseract"];

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Check which of the required tools are installed.
pub fn check_tools() -> Vec<(&'static str, bool)> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (*tool, check_binary(tool)))
        .collect()
}
