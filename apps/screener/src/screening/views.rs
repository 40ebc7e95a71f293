//! Askama template structs for the browser-facing report.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.

use askama::Template;
use axum::response::Html;

use crate::screening::report::ScreeningReport;

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportPage<'a> {
    pub title: &'a str,
    pub report: &'a ScreeningReport,
    /// Whole percent, or "n/a" for a run with no candidates.
    pub accuracy: String,
}

impl<'a> ReportPage<'a> {
    pub fn new(report: &'a ScreeningReport) -> Self {
        Self {
            title: "Screening Report",
            report,
            accuracy: format_accuracy(report.accuracy),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

pub fn format_accuracy(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(share) => format!("{:.0}%", share * 100.0),
        None => "n/a".to_string(),
    }
}

pub fn render<T: Template>(template: &T) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}
