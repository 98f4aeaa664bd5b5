//! Positioned text extraction for PDF pages.
//!
//! Walks a page's content stream and records where each shown string lands.
//! Table detection works on the spans directly; page text is the spans
//! joined line by line (see [`spans_to_text`]).
//!
//! Fonts are resolved one string at a time, so a font whose encoding cannot
//! be read only degrades the strings drawn with it.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// A text span with position information.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a new text span, estimating its width from the font size.
    pub fn new(text: String, x: f32, y: f32, font_size: f32) -> Self {
        // Average glyph advance is roughly half the em size.
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    /// Right edge of the span.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Extracts positioned text spans from the pages of a loaded document.
pub struct SpanExtractor<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> SpanExtractor<'a> {
    /// Create an extractor over a loaded document.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract text spans from a page (1-indexed, as `lopdf` numbers pages).
    pub fn extract_page_spans(&self, page_num: u32) -> Result<Vec<TextSpan>> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or_else(|| Error::PdfParse(format!("Page {} not found", page_num)))?;

        let fonts = self
            .doc
            .get_page_fonts(*page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let content = self.get_page_content(*page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let spans = self.parse_content_stream(&content, &fonts)?;
        log::debug!("Page {}: {} text spans", page_num, spans.len());
        Ok(spans)
    }

    /// Get the decompressed page content stream. A page without `Contents`
    /// is blank and yields no bytes.
    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(stream_bytes(s)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            content.extend_from_slice(&stream_bytes(s));
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn parse_content_stream(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut leading: f32 = 0.0;
        let mut text_matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    text_matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(tl) = op.operands.first().and_then(get_number) {
                        leading = tl;
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            leading = -ty;
                        }
                        text_matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        text_matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    text_matrix.next_line(leading);
                }
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        text_matrix.next_line(leading);
                    }
                    if !in_text_block {
                        continue;
                    }

                    let decode = |bytes: &[u8]| self.decode_bytes(fonts, &current_font_name, bytes);
                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(arr)) => decode_tj_array(arr, decode),
                            _ => String::new(),
                        },
                        "\"" => match op.operands.get(2) {
                            Some(Object::String(bytes, _)) => decode(bytes.as_slice()),
                            _ => String::new(),
                        },
                        _ => match op.operands.first() {
                            Some(Object::String(bytes, _)) => decode(bytes.as_slice()),
                            _ => String::new(),
                        },
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = text_matrix.get_position();
                        let effective_size = current_font_size * text_matrix.get_scale();
                        spans.push(TextSpan::new(text, x, y, effective_size));
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode a shown string with the current font's encoding, falling back to
    /// simple decoding when the font or its encoding is unavailable.
    fn decode_bytes(
        &self,
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        font_name: &[u8],
        bytes: &[u8],
    ) -> String {
        fonts
            .get(font_name)
            .and_then(|font| font.get_font_encoding(self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }
}

/// Join spans into page text.
///
/// Spans keep content-stream order. A span whose baseline differs from the
/// previous one by more than 40% of the font size starts a new line; spans on
/// the same line are separated by a space when there is a visible gap.
pub fn spans_to_text(spans: &[TextSpan]) -> String {
    let mut text = String::new();
    let mut prev: Option<&TextSpan> = None;

    for span in spans {
        if let Some(p) = prev {
            let size = p.font_size.max(span.font_size).max(1.0);
            if (span.y - p.y).abs() > size * 0.4 {
                text.push('\n');
            } else if needs_space(p, span) {
                text.push(' ');
            }
        }
        text.push_str(&span.text);
        prev = Some(span);
    }

    text
}

fn needs_space(prev: &TextSpan, next: &TextSpan) -> bool {
    let (Some(last), Some(first)) = (prev.text.chars().last(), next.text.chars().next()) else {
        return false;
    };
    if last.is_whitespace() || first.is_whitespace() {
        return false;
    }
    if is_spaceless_script_char(last) && is_spaceless_script_char(first) {
        return false;
    }
    // Width is estimated, so only a clear gap (or a jump back) counts.
    let gap = next.x - prev.right();
    gap > prev.font_size * 0.15 || next.x < prev.x
}

/// Stream data, decompressed when a filter is present.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Join the strings of a `TJ` array. Large negative adjustments (in 1/1000
/// text space units) move the pen right far enough to count as a word space.
fn decode_tj_array<F>(items: &[Object], decode: F) -> String
where
    F: Fn(&[u8]) -> String,
{
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes.as_slice())),
            Object::Integer(_) | Object::Real(_) => {
                let adjustment = -get_number(item).unwrap_or(0.0);
                if adjustment > SPACE_THRESHOLD {
                    if let Some(c) = combined.chars().last() {
                        if !c.is_whitespace() && !is_spaceless_script_char(c) {
                            combined.push(' ');
                        }
                    }
                }
            }
            _ => {}
        }
    }
    combined
}

/// Text matrix state (the `a b c d e f` of `Tm`).
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        // Without a TL the line height is unknown; 12pt is the usual body size.
        let leading = if leading > 0.0 { leading } else { 12.0 };
        self.translate(0.0, -leading);
    }

    fn get_position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn get_scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Chinese and Japanese don't put spaces between words; Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_width_estimate() {
        let span = TextSpan::new("Name".to_string(), 72.0, 700.0, 10.0);
        assert_eq!(span.width, 20.0);
        assert_eq!(span.right(), 92.0);
    }

    #[test]
    fn test_text_matrix_translate_and_next_line() {
        let mut tm = TextMatrix::default();
        tm.translate(72.0, 700.0);
        assert_eq!(tm.get_position(), (72.0, 700.0));

        tm.next_line(14.0);
        assert_eq!(tm.get_position(), (72.0, 686.0));

        tm.next_line(0.0);
        assert_eq!(tm.get_position(), (72.0, 674.0));
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut tm = TextMatrix::default();
        tm.set(2.0, 0.0, 0.0, 2.0, 10.0, 20.0);
        assert_eq!(tm.get_scale(), 2.0);
        tm.translate(5.0, 5.0);
        assert_eq!(tm.get_position(), (20.0, 30.0));
    }

    #[test]
    fn test_decode_tj_array_inserts_word_space() {
        let items = vec![
            Object::string_literal("Total"),
            Object::Integer(-300),
            Object::string_literal("due"),
            Object::Integer(-20),
            Object::string_literal("!"),
        ];
        let text = decode_tj_array(&items, decode_text_simple);
        assert_eq!(text, "Total due!");
    }

    fn span(text: &str, x: f32, y: f32) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, 12.0)
    }

    #[test]
    fn test_spans_to_text_breaks_on_baseline_change() {
        let spans = vec![
            span("Hello invoice", 72.0, 720.0),
            span("Second line", 72.0, 706.0),
            span("Third line", 72.0, 692.0),
        ];
        assert_eq!(spans_to_text(&spans), "Hello invoice\nSecond line\nThird line");
    }

    #[test]
    fn test_spans_to_text_same_line() {
        // "Name" ends at 96; "Amount" starts far to the right
        let spans = vec![span("Name", 72.0, 700.0), span("Amount", 300.0, 701.0)];
        assert_eq!(spans_to_text(&spans), "Name Amount");

        // Adjacent pieces of one word stay joined
        let spans = vec![span("Inv", 72.0, 700.0), span("oice", 90.0, 700.0)];
        assert_eq!(spans_to_text(&spans), "Invoice");

        let spans = vec![span("Total ", 72.0, 700.0), span("due", 200.0, 700.0)];
        assert_eq!(spans_to_text(&spans), "Total due");
    }

    #[test]
    fn test_spans_to_text_empty() {
        assert_eq!(spans_to_text(&[]), "");
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0xE9]), "Hé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('中'));
        assert!(is_spaceless_script_char('か'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }
}
