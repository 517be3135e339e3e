//! OCR module.
//!
//! Turns rendered page images into text. Tesseract is the only production
//! backend; the `OcrBackend` trait keeps the extraction pipeline testable
//! without the binary installed.

mod backend;
mod tesseract;
mod tools;

pub use backend::{OcrBackend, OcrConfig, OcrError, OcrResult};
pub use tesseract::TesseractBackend;
pub use tools::{check_binary, check_tools, POPPLER_NOT_FOUND, REQUIRED_TOOLS};
