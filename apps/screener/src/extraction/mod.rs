//! Text extraction from uploaded resumes.
//!
//! An ordered fallback chain: cheapest strategy first, the first non-blank
//! result wins. Strategy errors are logged and treated as empty output.

pub mod ocr;
pub mod page_text;
pub mod text_layer;

use thiserror::Error;
use tracing::{debug, warn};

pub use ocr::PageOcr;
pub use page_text::PageText;
pub use text_layer::TextLayer;

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One way of turning document bytes into plain text.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Text produced by the chain plus the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub strategy: &'static str,
}

pub struct ExtractionChain {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ExtractionChain {
    /// Text layer, then per-page text, then OCR at 300 dpi.
    fn default() -> Self {
        Self::new(vec![
            Box::new(TextLayer),
            Box::new(PageText),
            Box::new(PageOcr::default()),
        ])
    }
}

impl ExtractionChain {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Returns the first non-blank extraction, or `None` when every strategy
    /// came back empty or failed.
    pub fn extract(&self, bytes: &[u8]) -> Option<Extracted> {
        for strategy in &self.strategies {
            match strategy.extract(bytes) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("{} extracted {} chars", strategy.name(), text.len());
                    return Some(Extracted {
                        text,
                        strategy: strategy.name(),
                    });
                }
                Ok(_) => debug!("{} produced no text, falling back", strategy.name()),
                Err(e) => warn!("{} failed, falling back: {e}", strategy.name()),
            }
        }
        None
    }
}
