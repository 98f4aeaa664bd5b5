//! # pdf-processor
//!
//! Page text, table and metadata extraction from PDF files, shaped as JSON.
//!
//! The crate backs two command-line tools: `extract-pages` prints the text and
//! tables of selected pages, `get-metadata` prints page count, file size and
//! first-page text. Both are thin wrappers over the functions here.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_processor::{extract_pages_from_file, render, ExtractOptions, ExtractionRequest};
//!
//! fn main() -> pdf_processor::Result<()> {
//!     let request = ExtractionRequest::parse("statement.pdf", "0,1,4")?;
//!     let report = extract_pages_from_file(&request, &ExtractOptions::default())?;
//!     println!("{}", render::to_json(&report, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Page indices
//!
//! Pages are addressed by 0-based index. An index past the end (or negative)
//! is not an error: its result carries a notice naming the index and the real
//! page count, and no tables.

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use extract::{extract_metadata, extract_page, extract_pages};
pub use model::{
    Cell, ErrorResult, ExtractionRequest, MetadataResult, PageNumber, PageResult, PagesReport, RawTable,
    Table,
};
pub use parser::{ExtractOptions, LopdfBackend, PdfBackend, TableDetector, TableDetectorConfig};
pub use render::JsonFormat;

use std::fs;
use std::path::Path;

/// Open the requested PDF and extract its pages.
///
/// # Example
///
/// ```no_run
/// use pdf_processor::{extract_pages_from_file, ExtractOptions, ExtractionRequest};
///
/// let request = ExtractionRequest::new("report.pdf", vec![0i64, 2]);
/// let report = extract_pages_from_file(&request, &ExtractOptions::default()).unwrap();
/// assert_eq!(report.pages.len(), 2);
/// ```
pub fn extract_pages_from_file(
    request: &ExtractionRequest,
    options: &ExtractOptions,
) -> Result<PagesReport> {
    let backend = LopdfBackend::open(request.pdf_path())?
        .with_table_config(options.table_config.clone());
    extract_pages(&backend, request.page_numbers(), options)
}

/// Read page count, file size and first-page text of a PDF file.
///
/// Fails with [`Error::FileNotFound`] before any parsing when `path` is not
/// an existing regular file.
///
/// # Example
///
/// ```no_run
/// use pdf_processor::metadata_from_file;
///
/// let meta = metadata_from_file("report.pdf").unwrap();
/// println!("{} pages, {} bytes", meta.page_count, meta.file_size);
/// ```
pub fn metadata_from_file<P: AsRef<Path>>(path: P) -> Result<MetadataResult> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let file_size = fs::metadata(path)
        .map_err(|e| Error::from_io(path, e))?
        .len();
    let backend = LopdfBackend::open(path)?;
    extract_metadata(&backend, file_size)
}
