//! Page and metadata extraction over a [`PdfBackend`].

use crate::error::Result;
use crate::model::{normalize_tables, MetadataResult, PageNumber, PageResult, PagesReport};
use crate::parser::{ExtractOptions, PdfBackend};

/// Extract the requested pages, one result per index in request order.
///
/// Indices outside `[0, page_count)` produce an out-of-range placeholder
/// instead of failing. Any other failure aborts the whole request and the
/// pages extracted so far are dropped. Repeated indices are extracted again
/// on each occurrence.
pub fn extract_pages<B: PdfBackend>(
    backend: &B,
    page_numbers: &[PageNumber],
    options: &ExtractOptions,
) -> Result<PagesReport> {
    let page_count = backend.page_count();
    log::info!(
        "Extracting {} page(s) from a {}-page document",
        page_numbers.len(),
        page_count
    );

    let mut report = PagesReport::new();
    for page_num in page_numbers {
        let page = match page_num.page_index(page_count) {
            Some(index) => extract_page(backend, index, options)?,
            None => {
                log::warn!(
                    "Page {} out of range (document has {} pages)",
                    page_num,
                    page_count
                );
                PageResult::out_of_range(page_num.clone(), page_count)
            }
        };
        report.push(page);
    }

    Ok(report)
}

/// Extract text and normalized tables from one in-range page.
pub fn extract_page<B: PdfBackend>(
    backend: &B,
    index: usize,
    options: &ExtractOptions,
) -> Result<PageResult> {
    let text = backend.page_text(index)?;
    let tables = if options.detect_tables {
        normalize_tables(&backend.page_tables(index)?)
    } else {
        Vec::new()
    };

    Ok(PageResult::new(index as i64, text, tables))
}

/// Build document metadata. `file_size` comes from the filesystem, not the
/// backend.
pub fn extract_metadata<B: PdfBackend>(backend: &B, file_size: u64) -> Result<MetadataResult> {
    let page_count = backend.page_count();
    let first_page_text = if page_count > 0 {
        backend.page_text(0)?
    } else {
        String::new()
    };

    Ok(MetadataResult {
        page_count: page_count as u64,
        file_size,
        first_page_text,
    })
}
