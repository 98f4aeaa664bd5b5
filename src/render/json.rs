//! JSON rendering for extraction results.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::ErrorResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Single-line JSON
    #[default]
    Compact,
    /// Pretty-printed JSON with indentation
    Pretty,
}

/// Serialize a result to JSON. Non-ASCII text is written as-is.
pub fn to_json<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Render the `{"error": "..."}` payload for an error.
///
/// Always compact: the payload goes to stderr as a single line.
pub fn error_json(err: &Error) -> String {
    let payload = ErrorResult::from(err);
    serde_json::json!({ "error": payload.error }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MetadataResult, PageResult, PagesReport};

    #[test]
    fn test_pages_json_shape() {
        let mut report = PagesReport::new();
        report.push(PageResult::new(0i64, "Grüße", vec![vec![vec!["a".into(), "".into()]]]));

        let json = to_json(&report, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"pages":[{"pageNum":0,"text":"Grüße","tables":[[["a",""]]]}]}"#
        );
    }

    #[test]
    fn test_to_json_pretty() {
        let meta = MetadataResult::default();
        let json = to_json(&meta, JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"firstPageText\": \"\""));
    }

    #[test]
    fn test_error_json() {
        let err = Error::InvalidPageNumbers("a,b".into());
        let json = error_json(&err);
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], "Invalid page numbers: a,b");
        assert_eq!(value.as_object().unwrap().len(), 1);
    }
}
