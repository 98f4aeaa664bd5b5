//! PDF backend abstraction layer.
//!
//! Extraction only needs three things from a PDF library: how many pages
//! there are, the text of a page, and the tables on a page. [`PdfBackend`]
//! captures exactly that, isolating the concrete library (lopdf) from the
//! extraction logic and letting tests substitute an in-memory document.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::RawTable;

use super::layout::{spans_to_text, SpanExtractor, TextSpan};
use super::table_detector::{TableDetector, TableDetectorConfig};

/// Abstract interface for PDF document access.
///
/// Page indices are 0-based. Callers only pass indices below
/// [`page_count`](PdfBackend::page_count).
pub trait PdfBackend {
    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// Full text of a page; empty if the page has none.
    fn page_text(&self, index: usize) -> Result<String>;

    /// Tables detected on a page, in page order.
    fn page_tables(&self, index: usize) -> Result<Vec<RawTable>>;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
///
/// The whole file is read into memory on open; dropping the backend releases
/// it.
pub struct LopdfBackend {
    doc: LopdfDocument,
    detector: TableDetector,
}

impl LopdfBackend {
    /// Load from a file path. The header is checked before parsing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = detect_format_from_path(path)?;
        log::debug!("Opening {} ({})", path.display(), format);

        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may be unreadable");
        }
        Self {
            doc,
            detector: TableDetector::new(),
        }
    }

    /// Use custom table detection thresholds.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.detector = TableDetector::with_config(config);
        self
    }

    /// lopdf numbers pages from 1.
    fn page_number(&self, index: usize) -> Result<u32> {
        let count = self.page_count();
        if index >= count {
            return Err(Error::PdfParse(format!(
                "Page index {} out of range (document has {} pages)",
                index, count
            )));
        }
        u32::try_from(index + 1)
            .map_err(|_| Error::PdfParse(format!("Page index {} too large", index)))
    }

    fn page_spans(&self, index: usize) -> Result<Vec<TextSpan>> {
        let page_num = self.page_number(index)?;
        SpanExtractor::new(&self.doc)
            .extract_page_spans(page_num)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", index, e)))
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let spans = self.page_spans(index)?;
        Ok(spans_to_text(&spans))
    }

    fn page_tables(&self, index: usize) -> Result<Vec<RawTable>> {
        let spans = self.page_spans(index)?;
        let tables = self.detector.extract_tables(&spans);
        log::debug!("Page {}: {} tables", index, tables.len());
        Ok(tables)
    }
}
