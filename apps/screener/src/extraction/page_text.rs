use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use super::{ExtractionError, ExtractionStrategy};

/// TJ adjustments below this (thousandths of an em) are word gaps.
const WORD_GAP: f64 = -200.0;

/// Reopens the PDF as a page tree with `lopdf` and walks each page's content
/// operations, breaking lines where the text cursor moves to a new line.
/// Pages are joined with a newline. Pages that fail individually are skipped.
pub struct PageText;

impl ExtractionStrategy for PageText {
    fn name(&self) -> &'static str {
        "page-text"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| ExtractionError::ExtractionFailed(format!("lopdf: {e}")))?;

        let mut pages = Vec::new();
        // get_pages is a BTreeMap keyed by page number, so this is page order
        for (page_number, page_id) in doc.get_pages() {
            match page_lines(&doc, page_id) {
                Ok(Some(text)) => pages.push(text),
                // composite fonts: let lopdf map the glyphs, line breaks are lost
                Ok(None) => match doc.extract_text(&[page_number]) {
                    Ok(text) => pages.push(text),
                    Err(e) => debug!("page {page_number} has no extractable text: {e}"),
                },
                Err(e) => debug!("page {page_number} has no readable content: {e}"),
            }
        }
        Ok(pages.join("\n").trim().to_string())
    }
}

/// Text of one page, or `None` when its strings are not single-byte text.
fn page_lines(doc: &Document, page_id: ObjectId) -> Result<Option<String>, lopdf::Error> {
    let content = Content::decode(&doc.get_page_content(page_id)?)?;
    let mut out = LineWriter::default();

    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" => out.show_operand(op.operands.first()),
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match number(item) {
                            Some(gap) if gap < WORD_GAP => out.space(),
                            Some(_) => {}
                            None => out.show_operand(Some(item)),
                        }
                    }
                }
            }
            "'" => {
                out.break_line();
                out.show_operand(op.operands.first());
            }
            "\"" => {
                out.break_line();
                out.show_operand(op.operands.get(2));
            }
            "Td" | "TD" => match op.operands.get(1).and_then(number) {
                Some(dy) if dy != 0.0 => out.break_line(),
                _ => out.space(),
            },
            "T*" | "Tm" | "ET" => out.break_line(),
            _ => {}
        }
    }
    Ok(out.finish())
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

#[derive(Default)]
struct LineWriter {
    text: String,
    line: String,
    undecodable: bool,
}

impl LineWriter {
    fn show_operand(&mut self, operand: Option<&Object>) {
        if let Some(Object::String(bytes, _)) = operand {
            match decode_simple(bytes) {
                Some(s) => self.line.push_str(&s),
                None => self.undecodable = true,
            }
        }
    }

    fn space(&mut self) {
        if !self.line.is_empty() && !self.line.ends_with(' ') {
            self.line.push(' ');
        }
    }

    fn break_line(&mut self) {
        let line = self.line.trim();
        if !line.is_empty() {
            self.text.push_str(line);
            self.text.push('\n');
        }
        self.line.clear();
    }

    fn finish(mut self) -> Option<String> {
        self.break_line();
        (!self.undecodable).then(|| self.text.trim_end().to_string())
    }
}

/// UTF-16BE with a byte-order mark, otherwise one byte per character.
/// Control bytes mean two-byte glyph ids, which need the font's CMap.
fn decode_simple(bytes: &[u8]) -> Option<String> {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        return char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .ok();
    }
    if bytes
        .iter()
        .any(|&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
    {
        return None;
    }
    Some(bytes.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tests::{sample_pdf, sample_pdf_pages};
    use crate::screening::details::{find_email, guess_name};

    #[test]
    fn test_unparseable_document_is_an_error() {
        assert!(PageText.extract(b"%PDF-1.4 truncated").is_err());
    }

    #[test]
    fn test_lines_stay_separate() {
        let pdf = sample_pdf(&["Jane Doe", "jane@x.com", "Python, Docker, AWS"]);

        let text = PageText.extract(&pdf).unwrap();

        assert_eq!(text, "Jane Doe\njane@x.com\nPython, Docker, AWS");
        assert_eq!(find_email(&text).as_deref(), Some("jane@x.com"));
        assert_eq!(guess_name(&text), "Jane Doe");
    }

    #[test]
    fn test_pages_are_joined_with_newline() {
        let pdf = sample_pdf_pages(&[&["Jane Doe"], &["jane@x.com"]]);
        assert_eq!(PageText.extract(&pdf).unwrap(), "Jane Doe\njane@x.com");
    }

    #[test]
    fn test_word_gaps_collapse_to_one_space() {
        let mut out = LineWriter::default();
        out.show_operand(Some(&Object::string_literal("Machine")));
        out.space();
        out.space();
        out.show_operand(Some(&Object::string_literal("Learning")));
        assert_eq!(out.finish().as_deref(), Some("Machine Learning"));
    }

    #[test]
    fn test_glyph_id_strings_are_not_decoded() {
        assert_eq!(decode_simple(&[0x00, 0x25, 0x00, 0x48]), None);
        assert_eq!(decode_simple(&[0xFE, 0xFF, 0x00, 0x41]).as_deref(), Some("A"));
        assert_eq!(decode_simple(b"C++").as_deref(), Some("C++"));
    }
}
