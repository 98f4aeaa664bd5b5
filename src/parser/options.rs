//! Extraction options and configuration.

use super::table_detector::TableDetectorConfig;

/// Options for page and metadata extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Whether to run table detection on extracted pages
    pub detect_tables: bool,

    /// Table detection thresholds
    pub table_config: TableDetectorConfig,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Extract text only; every page reports no tables.
    pub fn text_only(mut self) -> Self {
        self.detect_tables = false;
        self
    }

    /// Set table detection thresholds.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.table_config = config;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            detect_tables: true,
            table_config: TableDetectorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new().text_only();
        assert!(!options.detect_tables);
        assert!(ExtractOptions::new().with_tables(false).with_tables(true).detect_tables);

        let config = TableDetectorConfig {
            min_rows: 3,
            ..Default::default()
        };
        let options = ExtractOptions::new().with_table_config(config.clone());
        assert_eq!(options.table_config, config);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert!(options.detect_tables);
        assert_eq!(options.table_config, TableDetectorConfig::default());
    }
}
