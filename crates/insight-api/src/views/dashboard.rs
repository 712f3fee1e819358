//! Dashboard page and upload result page.

use uuid::Uuid;

use insight_core::{defaults, Document};

use super::{documents, html_escape, knowledge, knowledge::KnowledgePanel, layout, layout_with_head};
use crate::services::upload::UploadStage;

fn header(email: Option<&str>) -> String {
    let who = email
        .map(|e| format!(r#"<span class="muted small">{}</span>"#, html_escape(e)))
        .unwrap_or_default();
    format!(
        r#"<header class="site-header">
    <div class="container">
        <div>
            <h1>&#129504; Smart Knowledge Extraction</h1>
            <p class="muted small">AI-powered document analysis</p>
        </div>
        <form method="post" action="/auth/sign-out" style="display:flex;gap:0.75rem;align-items:center">
            {}
            <button class="btn btn-outline" type="submit">Sign Out</button>
        </form>
    </div>
</header>"#,
        who
    )
}

fn upload_card() -> String {
    let accept: Vec<String> = insight_core::AcceptedFileType::ALL
        .iter()
        .flat_map(|t| [format!(".{}", t.extension()), t.mime_type().to_string()])
        .collect();
    format!(
        r#"<div class="card">
    <h2>&#8682; Upload Document</h2>
    <form method="post" action="/dashboard/upload" enctype="multipart/form-data" id="upload-form">
        <label class="dropzone" for="file">
            <div style="font-size:2rem">&#128196;</div>
            <div><strong>Drag &amp; drop or click</strong></div>
            <div class="muted small">PDF, TXT, or CSV files</div>
            <input id="file" name="file" type="file" accept="{}" required hidden
                onchange="this.form.querySelector('.dropzone strong').textContent='Processing document...';this.form.submit()">
        </label>
    </form>
</div>"#,
        accept.join(",")
    )
}

/// Render `/dashboard`.
pub fn page(
    email: Option<&str>,
    docs: &[Document],
    selected: Option<Uuid>,
    panel: &KnowledgePanel<'_>,
) -> String {
    let body = format!(
        r#"{header}
<main class="container dashboard-grid">
    <div class="stack">
        {upload}
        {list}
    </div>
    <div id="knowledge-panel">
        {panel}
    </div>
</main>"#,
        header = header(email),
        upload = upload_card(),
        list = documents::list(docs, selected),
        panel = knowledge::panel(panel)
    );
    layout("Dashboard", &body)
}

/// Render the page shown after a dashboard upload.
///
/// On success it refreshes back to the dashboard with the new document
/// selected.
pub fn upload_result(reached: &[UploadStage], outcome: Result<&Document, &str>) -> String {
    let percent = reached.last().map(|s| s.percent()).unwrap_or(0);
    let stages: String = UploadStage::ALL
        .iter()
        .map(|stage| {
            let mark = if reached.contains(stage) { "&#10003;" } else { "&middot;" };
            format!(
                r#"<li>{} {} <span class="muted small">{}%</span></li>"#,
                mark,
                stage.label(),
                stage.percent()
            )
        })
        .collect();

    let (notice, head) = match outcome {
        Ok(doc) => (
            format!(
                r#"<div class="notice notice-success"><strong>Success!</strong> Document processed and insights extracted.<br><span class="small">{}</span></div>"#,
                html_escape(&doc.title)
            ),
            format!(
                r#"<meta http-equiv="refresh" content="{}; url=/dashboard?document={}">"#,
                defaults::RELOAD_DELAY_SECS,
                doc.id
            ),
        ),
        Err(message) => (
            format!(
                r#"<div class="notice notice-error"><strong>Upload failed</strong><br>{}</div>"#,
                html_escape(message)
            ),
            String::new(),
        ),
    };

    let body = format!(
        r#"<main class="container" style="max-width:36rem;padding-top:3rem">
    <div class="card">
        <h2>Upload Document</h2>
        {notice}
        <div class="progress"><div style="width:{percent}%"></div></div>
        <ul class="small" style="list-style:none;padding:0">{stages}</ul>
        <a class="btn btn-outline" href="/dashboard">Back to dashboard</a>
    </div>
</main>"#,
        notice = notice,
        percent = percent,
        stages = stages
    );

    layout_with_head("Upload", &head, &body)
}
