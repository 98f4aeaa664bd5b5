//! Output formatting.

mod json;

pub use json::{error_json, to_json, JsonFormat};
