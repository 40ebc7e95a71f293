use axum::response::Html;

const UPLOAD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Resume Matcher + LLM Judge</title>
</head>
<body>
    <h1>Resume Matcher + LLM Judge + Email Notifier</h1>
    <form action="/screenings" method="post" enctype="multipart/form-data">
        <p><label>Job description (.txt) <input type="file" name="job_description" accept=".txt" required></label></p>
        <p><label>Resumes (.pdf) <input type="file" name="resumes" accept=".pdf" multiple required></label></p>
        <p><button type="submit">Match &amp; Analyze</button></p>
    </form>
</body>
</html>
"#;

/// GET /
/// The upload form that starts a screening run.
pub async fn index_handler() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}
