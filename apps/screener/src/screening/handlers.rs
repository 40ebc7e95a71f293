//! Axum route handlers for the Screening API.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::document::{JobDescription, ResumeDocument};
use crate::screening::report::ScreeningReport;
use crate::screening::views::{render, ErrorPage, ReportPage};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

/// POST /api/v1/screenings
///
/// Multipart upload: one `job_description` text file and one or more
/// `resumes` PDF files. Runs the full screening pipeline and returns the report.
pub async fn handle_screening(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let report = screen_upload(&state, multipart).await?;
    Ok(Json(report))
}

/// POST /screenings
///
/// Same upload and run as the API route, rendered as the HTML report page.
pub async fn handle_screening_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match screen_upload(&state, multipart).await {
        Ok(report) => render(&ReportPage::new(&report)).into_response(),
        Err(e) => {
            let (status, _, message) = e.parts();
            let page = ErrorPage {
                title: "Screening failed",
                message: &message,
            };
            (status, render(&page)).into_response()
        }
    }
}

async fn screen_upload(
    state: &AppState,
    multipart: Multipart,
) -> Result<ScreeningReport, AppError> {
    let (jd, resumes) = read_upload(multipart).await?;
    run_detached(state, jd, resumes).await
}

/// Runs on its own task: once started, a run completes even if the client
/// disconnects, so every candidate that was scored also gets notified.
async fn run_detached(
    state: &AppState,
    jd: JobDescription,
    resumes: Vec<ResumeDocument>,
) -> Result<ScreeningReport, AppError> {
    info!("Screening request with {} resume(s)", resumes.len());
    let pipeline = state.pipeline.clone();
    tokio::spawn(async move { pipeline.run(&jd, resumes).await })
        .await
        .map_err(|e| AppError::Internal(anyhow!("screening task failed: {e}")))?
}

async fn read_upload(
    mut multipart: Multipart,
) -> Result<(JobDescription, Vec<ResumeDocument>), AppError> {
    let mut jd: Option<JobDescription> = None;
    let mut resumes = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed upload: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            JOB_DESCRIPTION_FIELD => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read job description: {e}")))?;
                jd = Some(JobDescription::from_upload(&data)?);
            }
            RESUMES_FIELD => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                if !is_pdf_name(&file_name) {
                    return Err(AppError::Validation(format!(
                        "{file_name}: only PDF resumes are accepted"
                    )));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read {file_name}: {e}")))?;
                resumes.push(ResumeDocument { file_name, bytes });
            }
            // next_field skips whatever is left unread
            _ => {}
        }
    }

    let jd = jd.ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;
    if resumes.is_empty() {
        return Err(AppError::Validation(
            "at least one resume is required".to_string(),
        ));
    }
    Ok((jd, resumes))
}

fn is_pdf_name(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_name_check() {
        assert!(is_pdf_name("jane.pdf"));
        assert!(is_pdf_name("JANE.PDF"));
        assert!(!is_pdf_name("jane.docx"));
        assert!(!is_pdf_name("pdf"));
    }
}
