use std::panic::{catch_unwind, AssertUnwindSafe};

use super::{ExtractionError, ExtractionStrategy};

/// Whole-document text layer via `pdf-extract`. Cheapest strategy; fails or
/// comes back blank on scanned resumes.
pub struct TextLayer;

impl ExtractionStrategy for TextLayer {
    fn name(&self) -> &'static str {
        "text-layer"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed fonts instead of returning Err
        let outcome = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| ExtractionError::ExtractionFailed("pdf-extract panicked".to_string()))?;
        outcome.map_err(|e| ExtractionError::ExtractionFailed(format!("pdf-extract: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_instead_of_panicking() {
        let result = TextLayer.extract(b"definitely not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_real_pdf_keeps_line_breaks() {
        let pdf = crate::extraction::tests::sample_pdf(&["Jane Doe", "jane@x.com", "Python, Docker, AWS"]);

        let text = TextLayer.extract(&pdf).unwrap();
        let lines: Vec<_> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

        assert_eq!(lines, vec!["Jane Doe", "jane@x.com", "Python, Docker, AWS"]);
    }
}
