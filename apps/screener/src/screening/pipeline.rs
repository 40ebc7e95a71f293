//! Screening run: orchestrates the per-resume pipeline.
//!
//! Flow per resume: extract text → (skip if empty) → details → score →
//! judge → tier → notify (if an email was found) → record.
//!
//! Resumes are processed strictly one after another. A model failure that
//! survives its single retry aborts the whole run; nothing is returned for
//! resumes already processed.

use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{ExtractionChain, Extracted};
use crate::llm_client::PacedModel;
use crate::models::candidate::CandidateRecord;
use crate::models::document::{JobDescription, ResumeDocument};
use crate::notify::{notify_candidate, Mailer, NotificationStatus};
use crate::screening::details::extract_details;
use crate::screening::fit_scoring::FitScorer;
use crate::screening::judge::FitJudge;
use crate::screening::report::ScreeningReport;
use crate::screening::tier::Tier;

pub struct ScreeningPipeline {
    model: Arc<PacedModel>,
    extractor: Arc<ExtractionChain>,
    scorer: FitScorer,
    judge: FitJudge,
    mailer: Arc<dyn Mailer>,
    /// One run at a time, so model calls from two uploads never interleave.
    run_lock: Mutex<()>,
}

impl ScreeningPipeline {
    pub fn new(
        model: Arc<PacedModel>,
        extractor: Arc<ExtractionChain>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            extractor,
            scorer: FitScorer::new(model.clone()),
            judge: FitJudge::new(model.clone()),
            model,
            mailer,
            run_lock: Mutex::new(()),
        }
    }

    /// Screens every resume against `jd` and builds the report.
    pub async fn run(
        &self,
        jd: &JobDescription,
        resumes: Vec<ResumeDocument>,
    ) -> Result<ScreeningReport, AppError> {
        let _guard = self.run_lock.lock().await;
        info!("Screening {} resume(s)", resumes.len());
        // left over from a run that aborted
        self.model.take_notices();

        let mut records = Vec::with_capacity(resumes.len());
        let mut skipped = Vec::new();
        let mut warnings = Vec::new();

        for resume in resumes {
            let Some(extracted) = self.extract_text(&resume).await? else {
                warn!("No text extracted from {}; skipping", resume.file_name);
                warnings.push(format!(
                    "No text could be extracted from {}; it was skipped",
                    resume.file_name
                ));
                skipped.push(resume.file_name);
                continue;
            };
            info!(
                "Extracted {} via {}",
                resume.file_name, extracted.strategy
            );

            let record = self.screen(jd, resume.file_name, &extracted.text).await?;
            warnings.extend(self.model.take_notices());
            if let NotificationStatus::Failed { error } = &record.notification {
                warnings.push(format!("Failed to send email to {}: {error}", record.name));
            }
            records.push(record);
        }

        info!(
            "Screening finished: {} recorded, {} skipped",
            records.len(),
            skipped.len()
        );
        Ok(ScreeningReport::build(records, skipped, warnings))
    }

    async fn extract_text(&self, resume: &ResumeDocument) -> Result<Option<Extracted>, AppError> {
        let chain = self.extractor.clone();
        let bytes = resume.bytes.clone();
        tokio::task::spawn_blocking(move || chain.extract(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow!("extraction task failed: {e}")))
    }

    async fn screen(
        &self,
        jd: &JobDescription,
        file_name: String,
        text: &str,
    ) -> Result<CandidateRecord, AppError> {
        let details = extract_details(text);

        let score = self.scorer.score(jd.text(), text).await?;
        let judgement = self.judge.judge(jd.text(), text).await?;
        let tier = Tier::from_score(score);
        info!(
            "{}: score {score} ({}), judge {}",
            details.name,
            tier.label(),
            if judgement.verdict { "YES" } else { "NO" }
        );

        let notification = notify_candidate(
            self.mailer.as_ref(),
            details.email.as_deref(),
            &details.name,
            tier,
        )
        .await;

        Ok(CandidateRecord {
            file_name,
            name: details.name,
            email: details.email,
            skills: details.skills,
            score,
            tier,
            judge_verdict: judgement.verdict,
            judge_reason: judgement.reason,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::extraction::tests::FixedStrategy;
    use crate::llm_client::pacing::tests::ScriptedModel;
    use crate::llm_client::{LlmError, Pacing};
    use crate::notify::tests::RecordingMailer;

    const JD: &str = "Seeking a Python backend engineer with Docker and AWS experience";

    fn resume(name: &str) -> ResumeDocument {
        ResumeDocument {
            file_name: name.to_string(),
            bytes: Bytes::from_static(b"%PDF-1.7"),
        }
    }

    fn pipeline(
        strategies: Vec<Box<dyn crate::extraction::ExtractionStrategy>>,
        model: Arc<ScriptedModel>,
        mailer: Arc<RecordingMailer>,
    ) -> ScreeningPipeline {
        ScreeningPipeline::new(
            Arc::new(PacedModel::new(model, Pacing::default())),
            Arc::new(ExtractionChain::new(strategies)),
            mailer,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_resume_end_to_end() {
        let model = Arc::new(ScriptedModel::ok(&["92", "YES - strong technical overlap"]));
        let mailer = Arc::new(RecordingMailer::default());
        let p = pipeline(
            vec![Box::new(FixedStrategy::text(
                "layer",
                "Jane Doe jane@x.com Skills: Python, Docker, AWS",
            ))],
            model.clone(),
            mailer.clone(),
        );
        let jd = JobDescription::from_upload(JD.as_bytes()).unwrap();

        let report = p.run(&jd, vec![resume("jane.pdf")]).await.unwrap();

        assert_eq!(report.candidates.len(), 1);
        let row = &report.candidates[0];
        assert_eq!(row.email, "jane@x.com");
        assert_eq!(row.skills, "aws, docker, python");
        assert_eq!(row.name, "Jane Doe jane@x.com Skills: Python, Docker, AWS");
        assert_eq!(row.score, 92);
        assert_eq!(row.category, "Top");
        assert_eq!(row.judge, "YES");
        assert_eq!(row.notification, NotificationStatus::Sent);
        assert_eq!(report.accuracy, Some(1.0));
        assert_eq!(report.top_justifications[0].reason, "strong technical overlap");

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_address, "jane@x.com");
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_extraction_is_skipped_without_model_calls() {
        let model = Arc::new(ScriptedModel::ok(&[]));
        let mailer = Arc::new(RecordingMailer::default());
        let p = pipeline(
            vec![
                Box::new(FixedStrategy::text("layer", "   ")),
                Box::new(FixedStrategy::failing("ocr")),
            ],
            model.clone(),
            mailer.clone(),
        );
        let jd = JobDescription::from_upload(JD.as_bytes()).unwrap();

        let report = p.run(&jd, vec![resume("scan.pdf")]).await.unwrap();

        assert!(report.candidates.is_empty());
        assert_eq!(report.skipped, vec!["scan.pdf"]);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(model.call_count(), 0);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_email_skips_notification() {
        let model = Arc::new(ScriptedModel::ok(&["40", "NO - no cloud experience"]));
        let mailer = Arc::new(RecordingMailer::default());
        let p = pipeline(
            vec![Box::new(FixedStrategy::text("layer", "Sam Lee\nExcel, PowerPoint"))],
            model,
            mailer.clone(),
        );
        let jd = JobDescription::from_upload(JD.as_bytes()).unwrap();

        let report = p.run(&jd, vec![resume("sam.pdf")]).await.unwrap();

        assert_eq!(report.candidates[0].email, "None");
        assert_eq!(report.candidates[0].notification, NotificationStatus::Skipped);
        assert_eq!(report.candidates[0].category, "Regret");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_failure_does_not_abort_run() {
        let model = Arc::new(ScriptedModel::ok(&["60", "YES - ok", "80", "YES - good"]));
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        });
        let p = pipeline(
            vec![Box::new(FixedStrategy::text("layer", "Ann Kim\nann@x.com\nPython"))],
            model,
            mailer.clone(),
        );
        let jd = JobDescription::from_upload(JD.as_bytes()).unwrap();

        let report = p
            .run(&jd, vec![resume("a.pdf"), resume("b.pdf")])
            .await
            .unwrap();

        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
        assert_eq!(report.candidates[0].score, 80);
    }

    #[tokio::test(start_paused = true)]
    async fn test_model_failure_after_retry_aborts_run() {
        let model = Arc::new(ScriptedModel::new(vec![
            Ok("70".to_string()),
            Err(LlmError::RateLimited("slow down".to_string())),
            Err(LlmError::RateLimited("still slow".to_string())),
        ]));
        let mailer = Arc::new(RecordingMailer::default());
        let p = pipeline(
            vec![Box::new(FixedStrategy::text("layer", "Ann Kim\nann@x.com"))],
            model.clone(),
            mailer.clone(),
        );
        let jd = JobDescription::from_upload(JD.as_bytes()).unwrap();

        let err = p.run(&jd, vec![resume("a.pdf")]).await.unwrap_err();

        assert!(matches!(err, AppError::Llm(LlmError::RetryExhausted { .. })));
        assert_eq!(model.call_count(), 3);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scoring_retry_recovers() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(LlmError::RateLimited("slow down".to_string())),
            Ok("77".to_string()),
            Ok("YES - fine".to_string()),
        ]));
        let mailer = Arc::new(RecordingMailer::default());
        let p = pipeline(
            vec![Box::new(FixedStrategy::text("layer", "Ann Kim"))],
            model.clone(),
            mailer,
        );
        let jd = JobDescription::from_upload(JD.as_bytes()).unwrap();

        let report = p.run(&jd, vec![resume("a.pdf")]).await.unwrap();

        assert_eq!(report.candidates[0].score, 77);
        assert_eq!(report.candidates[0].category, "Top");
        assert_eq!(model.call_count(), 3);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("scoring"));
    }
}
