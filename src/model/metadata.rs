//! Coarse document metadata.

use serde::{Deserialize, Serialize};

/// Page count, file size and first-page text of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResult {
    /// Number of pages in the document
    pub page_count: u64,

    /// Size of the file on disk, in bytes
    pub file_size: u64,

    /// Text of the first page; empty for a zero-page document
    pub first_page_text: String,
}

/// Error payload: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResult {
    /// Create an error payload.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl From<&crate::Error> for ErrorResult {
    fn from(err: &crate::Error) -> Self {
        Self::new(err.to_string())
    }
}
