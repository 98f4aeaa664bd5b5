//! Page extraction requests.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::{Error, Result};

/// One entry of a page list.
///
/// Any integer is a valid entry, however large. `index` is set when the
/// value fits in an `i64`; the canonical decimal digits are kept either way
/// so an oversized entry is still reported exactly as requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNumber {
    index: Option<i64>,
    digits: String,
}

impl PageNumber {
    /// Parse one trimmed entry: an optional sign followed by ASCII digits.
    pub fn parse(token: &str) -> Option<Self> {
        let (negative, unsigned) = match token.as_bytes().first()? {
            b'-' => (true, &token[1..]),
            b'+' => (false, &token[1..]),
            _ => (false, token),
        };
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let magnitude = unsigned.trim_start_matches('0');
        let digits = match (magnitude.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", magnitude),
            (false, false) => magnitude.to_string(),
        };
        // Digits are validated above, so the only failure left is overflow.
        let index = digits.parse::<i64>().ok();

        Some(Self { index, digits })
    }

    /// The value as an `i64`, or `None` when it does not fit.
    pub fn index(&self) -> Option<i64> {
        self.index
    }

    /// Position in a document of `page_count` pages, if the entry names one.
    pub fn page_index(&self, page_count: usize) -> Option<usize> {
        self.index
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < page_count)
    }
}

impl From<i64> for PageNumber {
    fn from(index: i64) -> Self {
        Self {
            index: Some(index),
            digits: index.to_string(),
        }
    }
}

impl PartialEq<i64> for PageNumber {
    fn eq(&self, other: &i64) -> bool {
        self.index == Some(*other)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl Serialize for PageNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.index {
            Some(index) => serializer.serialize_i64(index),
            None => RawValue::from_string(self.digits.clone())
                .map_err(S::Error::custom)?
                .serialize(serializer),
        }
    }
}

/// A validated page extraction request.
///
/// Built from the raw command-line strings before the file is touched, so a
/// malformed page list never causes a file open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pdf_path: PathBuf,
    page_numbers: Vec<PageNumber>,
}

impl ExtractionRequest {
    /// Create a request from already-parsed page indices.
    pub fn new<I, N>(pdf_path: impl Into<PathBuf>, page_numbers: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<PageNumber>,
    {
        Self {
            pdf_path: pdf_path.into(),
            page_numbers: page_numbers.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a request from a path and a comma-separated page list.
    ///
    /// Each entry is trimmed and parsed as a signed integer. Any bad entry
    /// rejects the whole list with [`Error::InvalidPageNumbers`] carrying the
    /// raw input.
    pub fn parse(pdf_path: impl Into<PathBuf>, raw_pages: &str) -> Result<Self> {
        let page_numbers = parse_page_list(raw_pages)?;
        Ok(Self::new(pdf_path, page_numbers))
    }

    /// Path of the PDF to read.
    pub fn pdf_path(&self) -> &Path {
        &self.pdf_path
    }

    /// Requested page indices, in request order.
    pub fn page_numbers(&self) -> &[PageNumber] {
        &self.page_numbers
    }
}

/// Parse a comma-separated list of 0-based page indices.
///
/// Negative and oversized values parse fine; they are reported as out of
/// range later.
pub fn parse_page_list(raw: &str) -> Result<Vec<PageNumber>> {
    raw.split(',')
        .map(|part| PageNumber::parse(part.trim()))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::InvalidPageNumbers(raw.to_string()))
}
