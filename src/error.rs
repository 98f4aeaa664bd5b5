//! Error types for pdf-processor.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pdf-processor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting from a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong command-line arguments. Carries the usage line.
    #[error("{0}")]
    Usage(String),

    /// The page list could not be parsed as integers. Carries the raw input.
    #[error("Invalid page numbers: {0}")]
    InvalidPageNumbers(String),

    /// The input path does not name an existing regular file.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input file exists but could not be read.
    #[error("cannot read {}: {}", .path.display(), .source)]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and requires a password.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error serializing output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Attach the path to an I/O error raised while opening or reading it.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Read {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
