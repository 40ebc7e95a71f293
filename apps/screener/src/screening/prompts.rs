// All LLM prompt templates for the screening module.
// Replace `{jd_text}` and `{resume_text}` before sending.

/// Fit score prompt. The reply is expected to be a bare number 0–100.
pub const SCORE_PROMPT_TEMPLATE: &str = "Rate the resume's match to the job description from 0 to 100. \
Only return a number. No explanation.

Job Description:
{jd_text}

Resume:
{resume_text}";

/// Judge prompt. The reply is expected to start with YES or NO, then a dash and a reason.
pub const JUDGE_PROMPT_TEMPLATE: &str = "You are a recruiter. Is this resume a good match for the job description?
Reply YES - or NO - followed by a brief reason.

Job Description:
{jd_text}

Resume:
{resume_text}";

pub fn render(template: &str, jd_text: &str, resume_text: &str) -> String {
    template
        .replace("{jd_text}", jd_text)
        .replace("{resume_text}", resume_text)
}
