//! PDF access: the backend trait, positioned text and table detection.

mod backend;
mod layout;
mod options;
mod table_detector;

pub use backend::{LopdfBackend, PdfBackend};
pub use layout::{decode_text_simple, spans_to_text, SpanExtractor, TextSpan};
pub use options::ExtractOptions;
pub use table_detector::{DetectedTable, TableDetector, TableDetectorConfig, TableRowData};
