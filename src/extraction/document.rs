//! Paged document abstraction.
//!
//! A document is an ordered set of pages, each with (possibly empty) embedded
//! text and a raster rendering used when that text is missing.

use std::path::{Path, PathBuf};

use super::ExtractionError;

/// A loaded document whose pages can be read or rendered.
///
/// Pages are numbered from 1.
pub trait PagedDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text embedded in the page structure; may be empty or whitespace.
    fn embedded_text(&self, page: u32) -> Result<String, ExtractionError>;

    /// Render a page to an image inside `output_dir`, returning its path.
    fn render_page(&self, page: u32, output_dir: &Path) -> Result<PathBuf, ExtractionError>;
}

/// Opens raw upload bytes as a paged document.
///
/// Implementations must reject malformed input with
/// [`ExtractionError::InvalidDocument`] before any page is read.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>, ExtractionError>;
}
