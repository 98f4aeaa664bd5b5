//! Table detection using text position analysis (stream mode).
//!
//! Tables are found from text alignment alone, without relying on ruling
//! lines: rows come from shared baselines, columns from left edges that line
//! up across rows.

use std::collections::{HashMap, HashSet};

use crate::model::{Cell, RawTable};

use super::layout::TextSpan;

/// A detected table region with its content.
#[derive(Debug, Clone)]
pub struct DetectedTable {
    /// Right X boundary
    pub right_x: f32,
    /// Detected column boundaries (left edge X coordinates)
    pub columns: Vec<f32>,
    /// Rows of text spans grouped by Y position, top to bottom
    pub rows: Vec<TableRowData>,
}

/// A row of text spans in a table.
#[derive(Debug, Clone)]
pub struct TableRowData {
    /// Y position of this row
    pub y: f32,
    /// Spans in this row, sorted by X
    pub spans: Vec<TextSpan>,
}

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum column alignment ratio (0.0-1.0)
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

/// Width of the buckets left edges are snapped to.
const EDGE_BUCKET: f32 = 5.0;

/// Alignment tolerance between a span and a column edge.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Detects tables in a list of text spans.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables and return them as raw cell grids, top to bottom.
    pub fn extract_tables(&self, spans: &[TextSpan]) -> Vec<RawTable> {
        self.detect(spans)
            .iter()
            .map(|table| self.to_raw_table(table))
            .collect()
    }

    /// Detect table regions in the given spans.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<DetectedTable> {
        log::debug!("TableDetector: starting with {} spans", spans.len());

        if spans.len() < self.config.min_rows * self.config.min_columns {
            return vec![];
        }

        let rows = self.group_into_rows(spans);
        if rows.len() < self.config.min_rows {
            log::debug!("TableDetector: not enough rows ({})", rows.len());
            return vec![];
        }

        let columns = self.detect_columns(&rows);
        if columns.len() < self.config.min_columns {
            log::debug!("TableDetector: not enough columns ({})", columns.len());
            return vec![];
        }

        let regions = self.find_table_regions(&rows, &columns);
        log::debug!("TableDetector: found {} table regions", regions.len());

        let mut detected = Vec::new();
        for (start_row, end_row) in regions {
            let table_rows: Vec<TableRowData> = rows[start_row..=end_row].to_vec();

            // Re-detect columns for this specific table region
            let table_columns = self.detect_columns(&table_rows);
            if table_columns.len() < self.config.min_columns {
                continue;
            }
            if table_columns.len() > self.config.max_columns {
                log::debug!(
                    "TableDetector: skipping region, too many columns ({} > {})",
                    table_columns.len(),
                    self.config.max_columns
                );
                continue;
            }
            if self.is_list_pattern(&table_rows, &table_columns) {
                log::debug!("TableDetector: skipping region, detected as list pattern");
                continue;
            }

            let right_x = table_rows
                .iter()
                .flat_map(|r| r.spans.iter())
                .map(TextSpan::right)
                .fold(f32::MIN, f32::max);

            detected.push(DetectedTable {
                right_x,
                columns: table_columns,
                rows: table_rows,
            });
        }

        detected
    }

    /// Group spans into rows by Y position (top of page first).
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<TableRowData> {
        let mut sorted_spans = spans.to_vec();
        sorted_spans.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut rows: Vec<TableRowData> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted_spans {
            let y_tolerance = span.font_size * self.config.y_tolerance_factor;

            match current_y {
                Some(y) if (span.y - y).abs() <= y_tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        rows.push(finish_row(std::mem::take(&mut current)));
                    }
                    current_y = Some(span.y);
                    current.push(span);
                }
            }
        }

        if !current.is_empty() {
            rows.push(finish_row(current));
        }

        rows
    }

    /// Detect column left edges that recur across rows.
    ///
    /// Rows with two or more spans are the best evidence; when there are too
    /// few of them every row is counted instead.
    fn detect_columns(&self, rows: &[TableRowData]) -> Vec<f32> {
        let multi_span_rows: Vec<&TableRowData> =
            rows.iter().filter(|r| r.spans.len() >= 2).collect();

        let evidence: Vec<&TableRowData> = if multi_span_rows.len() >= self.config.min_rows {
            multi_span_rows
        } else {
            rows.iter().collect()
        };
        if evidence.is_empty() {
            return vec![];
        }

        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        for row in &evidence {
            // Count each bucket once per row
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|span| (span.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((evidence.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .iter()
            .filter(|(_, count)| **count >= min_occurrences)
            .map(|(bucket, _)| *bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }

        log::debug!("TableDetector: column edges = {:?}", merged);
        merged
    }

    /// Find contiguous row regions that form tables.
    fn find_table_regions(&self, rows: &[TableRowData], columns: &[f32]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut current_start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if self.alignment_score(row, columns) >= self.config.min_alignment_ratio {
                current_start.get_or_insert(i);
            } else if let Some(start) = current_start.take() {
                if i - start >= self.config.min_rows {
                    regions.push((start, i - 1));
                }
            }
        }

        if let Some(start) = current_start {
            if rows.len() - start >= self.config.min_rows {
                regions.push((start, rows.len() - 1));
            }
        }

        regions
    }

    /// Fraction of a row's spans that start on a column edge.
    fn alignment_score(&self, row: &TableRowData, columns: &[f32]) -> f32 {
        if row.spans.is_empty() || columns.is_empty() {
            return 0.0;
        }

        let aligned = row
            .spans
            .iter()
            .filter(|span| columns.iter().any(|col| (span.x - col).abs() <= ALIGN_TOLERANCE))
            .count();

        aligned as f32 / row.spans.len() as f32
    }

    /// Convert a detected table into a grid of raw cells.
    ///
    /// Each span goes to exactly one column. Several spans in one cell are
    /// joined with a space; a column with no span in a row is
    /// [`Cell::Missing`].
    pub fn to_raw_table(&self, detected: &DetectedTable) -> RawTable {
        detected
            .rows
            .iter()
            .map(|row| {
                let mut contents: Vec<Vec<&str>> = vec![Vec::new(); detected.columns.len()];
                for span in &row.spans {
                    let col = find_column_for_span(span.x, &detected.columns, detected.right_x);
                    if let Some(slot) = contents.get_mut(col) {
                        slot.push(span.text.as_str());
                    }
                }

                contents
                    .into_iter()
                    .map(|parts| {
                        if parts.is_empty() {
                            Cell::Missing
                        } else {
                            Cell::Present(parts.join(" "))
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Check if detected table rows actually represent a numbered or bulleted list.
    ///
    /// A numbered list like "1. Item" often becomes two spans at different X
    /// positions, which looks like a two-column table.
    fn is_list_pattern(&self, rows: &[TableRowData], columns: &[f32]) -> bool {
        if columns.len() < 2 || rows.is_empty() {
            return false;
        }

        let mut bullet_count = 0;
        let mut number_count = 0;

        for row in rows {
            // Spans are sorted by X, the first is the leftmost
            if let Some(span) = row.spans.first() {
                let text = span.text.trim();
                if is_bullet_marker(text) {
                    bullet_count += 1;
                } else if is_number_marker(text) {
                    number_count += 1;
                }
            }
        }

        let bullet_ratio = bullet_count as f32 / rows.len() as f32;
        let total_ratio = (bullet_count + number_count) as f32 / rows.len() as f32;

        // Numbered first columns are common in real tables, so only
        // two-column regions are rejected for numbers.
        bullet_ratio >= 0.5 || (columns.len() == 2 && total_ratio >= 0.5)
    }
}

fn finish_row(mut spans: Vec<TextSpan>) -> TableRowData {
    spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    let y = spans.iter().map(|s| s.y).sum::<f32>() / spans.len() as f32;
    TableRowData { y, spans }
}

/// Find which column a span belongs to based on its left edge.
fn find_column_for_span(span_x: f32, columns: &[f32], right_x: f32) -> usize {
    // Allow spans to start up to 10pt before their column edge
    for (i, &col_start) in columns.iter().enumerate() {
        let col_end = columns.get(i + 1).copied().unwrap_or(right_x + 100.0);
        if span_x >= col_start - 10.0 && span_x < col_end - 10.0 {
            return i;
        }
    }

    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (span_x - **a)
                .abs()
                .partial_cmp(&(span_x - **b).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Check if text is a bullet marker (•, -, etc.).
fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "▶"
    )
}

/// Check if text is a number-style list marker (1., 2), a., etc.).
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    if let Some(pos) = cleaned.find(|c: char| !c.is_ascii_digit()) {
        let (prefix, suffix) = cleaned.split_at(pos);
        if !prefix.is_empty() && (suffix == "." || suffix == ")") {
            return true;
        }
    }

    if cleaned.parse::<u32>().is_ok() {
        return true;
    }

    let chars: Vec<char> = cleaned.chars().collect();
    chars.len() == 2 && chars[0].is_alphabetic() && (chars[1] == '.' || chars[1] == ')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_span(text: &str, x: f32, y: f32) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, 12.0)
    }

    fn cells(row: &[Cell]) -> Vec<String> {
        row.iter().map(Cell::normalized).collect()
    }

    #[test]
    fn test_group_into_rows() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("A2", 10.0, 85.0),
            make_span("B1", 60.0, 100.0),
            make_span("A1", 10.0, 101.0),
            make_span("B2", 60.0, 85.0),
        ];

        let rows = detector.group_into_rows(&spans);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].spans[0].text, "A1");
        assert_eq!(rows[0].spans[1].text, "B1");
        assert_eq!(rows[1].spans[0].text, "A2");
    }

    #[test]
    fn test_detect_simple_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Name", 10.0, 100.0),
            make_span("Age", 160.0, 100.0),
            make_span("Alice", 10.0, 85.0),
            make_span("30", 160.0, 85.0),
            make_span("Bob", 10.0, 70.0),
            make_span("25", 160.0, 70.0),
        ];

        let tables = detector.extract_tables(&spans);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 3);
        assert_eq!(cells(&tables[0][0]), vec!["Name", "Age"]);
        assert_eq!(cells(&tables[0][2]), vec!["Bob", "25"]);
    }

    #[test]
    fn test_missing_cell() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Item", 10.0, 100.0),
            make_span("Qty", 160.0, 100.0),
            make_span("Price", 310.0, 100.0),
            make_span("Pen", 10.0, 85.0),
            make_span("2", 160.0, 85.0),
            make_span("1.50", 310.0, 85.0),
            make_span("Ink", 10.0, 70.0),
            make_span("9.00", 310.0, 70.0),
        ];

        let tables = detector.extract_tables(&spans);
        assert_eq!(tables.len(), 1);
        let last = &tables[0][2];
        assert_eq!(last.len(), 3);
        assert_eq!(last[0], Cell::text("Ink"));
        assert_eq!(last[1], Cell::Missing);
        assert_eq!(last[2], Cell::text("9.00"));
    }

    #[test]
    fn test_no_table_single_column() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("Line 1", 10.0, 100.0),
            make_span("Line 2", 10.0, 85.0),
            make_span("Line 3", 10.0, 70.0),
            make_span("Line 4", 10.0, 55.0),
        ];

        assert!(detector.extract_tables(&spans).is_empty());
    }

    #[test]
    fn test_numbered_list_not_detected_as_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("1.", 50.0, 400.0),
            make_span("Setup", 80.0, 400.0),
            make_span("2.", 50.0, 370.0),
            make_span("Routing", 80.0, 370.0),
            make_span("3.", 50.0, 340.0),
            make_span("Operations", 80.0, 340.0),
        ];

        assert!(detector.extract_tables(&spans).is_empty());
    }

    #[test]
    fn test_bullet_list_not_detected_as_table() {
        let detector = TableDetector::new();
        let spans = vec![
            make_span("-", 50.0, 400.0),
            make_span("Management", 80.0, 400.0),
            make_span("-", 50.0, 370.0),
            make_span("Firmware", 80.0, 370.0),
        ];

        assert!(detector.extract_tables(&spans).is_empty());
    }

    #[test]
    fn test_too_many_columns_rejected() {
        let config = TableDetectorConfig {
            max_columns: 2,
            ..TableDetectorConfig::default()
        };
        let detector = TableDetector::with_config(config);
        let mut spans = Vec::new();
        for (i, y) in [100.0, 85.0, 70.0].iter().enumerate() {
            for col in 0..3 {
                spans.push(make_span(&format!("r{}c{}", i, col), 10.0 + col as f32 * 100.0, *y));
            }
        }

        assert!(detector.extract_tables(&spans).is_empty());
    }

    #[test]
    fn test_find_column_for_span() {
        let columns = [10.0, 60.0];
        assert_eq!(find_column_for_span(12.0, &columns, 100.0), 0);
        assert_eq!(find_column_for_span(61.0, &columns, 100.0), 1);
        assert_eq!(find_column_for_span(0.0, &columns, 100.0), 0);
        assert_eq!(find_column_for_span(500.0, &columns, 100.0), 1);
    }

    #[test]
    fn test_list_markers() {
        for marker in ["1.", "12.", "1)", "1 .", "3", "a.", "B)"] {
            assert!(is_number_marker(marker), "{marker}");
        }
        for marker in ["-", "•", "*", "–"] {
            assert!(is_bullet_marker(marker), "{marker}");
        }
        for text in ["Name", "Hello World", ""] {
            assert!(!is_number_marker(text) && !is_bullet_marker(text), "{text}");
        }
    }
}
