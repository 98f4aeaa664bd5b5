//! Typed records for requests and results.
//!
//! Every value printed by the tools has a fixed shape defined here; nothing
//! untyped crosses the output boundary.

mod metadata;
mod page;
mod request;
mod table;

pub use metadata::{ErrorResult, MetadataResult};
pub use page::{PageResult, PagesReport};
pub use request::{parse_page_list, ExtractionRequest, PageNumber};
pub use table::{normalize_table, normalize_tables, Cell, RawTable, Table};
