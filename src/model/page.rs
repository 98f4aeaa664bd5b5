//! Page-level results.

use super::request::PageNumber;
use super::table::Table;
use serde::Serialize;

/// Extraction result for one requested page index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Requested page index (0-based, as given by the caller)
    pub page_num: PageNumber,

    /// Full page text, empty if the page has none
    pub text: String,

    /// Tables detected on the page, cells already normalized
    pub tables: Vec<Table>,
}

impl PageResult {
    /// Create a result for an extracted page.
    pub fn new(page_num: impl Into<PageNumber>, text: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            page_num: page_num.into(),
            text: text.into(),
            tables,
        }
    }

    /// Placeholder for an index outside `[0, page_count)`.
    pub fn out_of_range(page_num: impl Into<PageNumber>, page_count: usize) -> Self {
        let page_num = page_num.into();
        let notice = format!(
            "[Page {} out of range — PDF has {} pages]",
            page_num, page_count
        );
        Self::new(page_num, notice, Vec::new())
    }
}

/// Success payload of page extraction: `{"pages": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PagesReport {
    /// One result per requested index, in request order
    pub pages: Vec<PageResult>,
}

impl PagesReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page result.
    pub fn push(&mut self, page: PageResult) {
        self.pages.push(page);
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the report has no results.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
