use bytes::Bytes;

use crate::errors::AppError;

/// Job description text for one run. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct JobDescription {
    text: String,
}

impl JobDescription {
    /// Accepts UTF-8 text with at least one non-whitespace character.
    pub fn from_upload(bytes: &[u8]) -> Result<Self, AppError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| AppError::Validation("job description must be UTF-8 text".to_string()))?;
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "job description cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One uploaded resume, as raw PDF bytes.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_description_keeps_text() {
        let jd = JobDescription::from_upload(b"Seeking a Python backend engineer").unwrap();
        assert_eq!(jd.text(), "Seeking a Python backend engineer");
    }

    #[test]
    fn test_blank_job_description_is_rejected() {
        assert!(matches!(
            JobDescription::from_upload(b" \n\t"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_non_utf8_job_description_is_rejected() {
        assert!(JobDescription::from_upload(&[0xff, 0xfe, 0x00]).is_err());
    }
}
