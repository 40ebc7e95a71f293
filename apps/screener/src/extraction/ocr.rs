//! OCR fallback: rasterize every page with `pdftoppm` and recognize it with
//! Tesseract. Both are system binaries (poppler-utils, tesseract-ocr).

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use super::{ExtractionError, ExtractionStrategy};

/// Raster resolution for OCR input.
pub const OCR_DPI: u32 = 300;

pub struct PageOcr {
    language: String,
}

impl Default for PageOcr {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }
}

impl PageOcr {
    /// Renders all pages into `dir` and returns the images in page order.
    fn rasterize(&self, pdf_path: &Path, dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &OCR_DPI.to_string()])
            .arg(pdf_path)
            .arg(dir.join("page"))
            .status();
        check_cmd_status(status, "pdftoppm", "pdftoppm failed to rasterize the document")?;

        let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_page_image(p))
            .collect();
        // pdftoppm zero-pads page numbers to a common width, so lexical order is page order
        pages.sort();
        Ok(pages)
    }

    fn recognize(&self, image_path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();
        handle_cmd_output(output, "tesseract", "tesseract failed")
    }
}

impl ExtractionStrategy for PageOcr {
    fn name(&self) -> &'static str {
        "page-ocr"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("resume.pdf");
        std::fs::write(&pdf_path, bytes)?;

        let mut lines = Vec::new();
        for image in self.rasterize(&pdf_path, temp_dir.path())? {
            let recognized = self.recognize(&image)?;
            debug!("OCR read {} chars from {}", recognized.len(), image.display());
            lines.extend(recognized_lines(&recognized));
        }
        Ok(lines.join("\n"))
    }
}

fn is_page_image(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name.starts_with("page-") && name.ends_with(".png")
}

/// Non-blank recognized lines, trimmed.
fn recognized_lines(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

/// Handle command output, extracting stdout on success or returning appropriate error.
fn handle_cmd_output(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ExtractionError::ExtractionFailed(format!(
                "{error_prefix}: {stderr}"
            )))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Check command status, returning appropriate error on failure.
fn check_cmd_status(
    result: std::io::Result<std::process::ExitStatus>,
    tool_name: &str,
    error_msg: &str,
) -> Result<(), ExtractionError> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(ExtractionError::ExtractionFailed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}
