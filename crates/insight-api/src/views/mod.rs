//! Server-rendered HTML.
//!
//! Pages are plain `format!` templates. Every user- or model-supplied
//! string goes through [`html_escape`] before it is interpolated.

pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod knowledge;
pub mod landing;

use chrono::{DateTime, Utc};

/// Full HTML document around `body`.
pub fn layout(title: &str, body: &str) -> String {
    layout_with_head(title, "", body)
}

/// Full HTML document with extra `<head>` markup (e.g. a meta refresh).
pub fn layout_with_head(title: &str, head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Smart Knowledge Extraction</title>
    {head}
    <style>{css}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title),
        head = head,
        css = CSS,
        body = body
    )
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Calendar date shown next to documents.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub const CSS: &str = r#"
:root {
    --bg: #f6f7fb;
    --card: #fff;
    --text: #1c1f2a;
    --muted: #6b7080;
    --border: #e2e4ec;
    --primary: #5b4de0;
    --primary-soft: rgba(91, 77, 224, 0.08);
    --accent: #0ea5a4;
    --danger: #c53030;
    --radius: 12px;
    --shadow: 0 4px 16px rgba(28, 31, 42, 0.06);
}
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    background: radial-gradient(circle at top left, #ece9ff, var(--bg) 45%);
    color: var(--text);
    line-height: 1.5;
}
a { color: var(--primary); text-decoration: none; }
.container { max-width: 1200px; margin: 0 auto; padding: 0 1rem; }
.muted { color: var(--muted); }
.small { font-size: 0.85rem; }
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: var(--radius);
    box-shadow: var(--shadow);
    padding: 1.25rem;
}
.card h2 { font-size: 1.1rem; margin: 0 0 1rem; }
.btn {
    display: inline-block;
    padding: 0.6rem 1.2rem;
    border-radius: 8px;
    border: 1px solid var(--primary);
    background: var(--primary);
    color: #fff;
    font-weight: 600;
    cursor: pointer;
}
.btn-outline { background: transparent; color: var(--primary); }
.btn-block { width: 100%; }
.badge {
    display: inline-block;
    padding: 0.1rem 0.6rem;
    border-radius: 999px;
    font-size: 0.75rem;
    font-weight: 600;
    border: 1px solid transparent;
}
.badge-default { background: var(--primary); color: #fff; }
.badge-secondary { background: #eceef4; color: var(--text); }
.badge-outline { border-color: var(--border); color: var(--text); }
.relevance-high { background: var(--primary); color: #fff; }
.relevance-medium { background: var(--accent); color: #fff; }
.relevance-low { background: #eceef4; color: var(--text); }
.entity-person { background: #dbeafe; color: #1e40af; }
.entity-organization { background: #f3e8ff; color: #6b21a8; }
.entity-location { background: #dcfce7; color: #166534; }
.entity-date { background: #ffedd5; color: #9a3412; }
.entity-other { background: #f3f4f6; color: #1f2937; }
.site-header {
    position: sticky; top: 0; z-index: 10;
    background: rgba(255, 255, 255, 0.7);
    backdrop-filter: blur(6px);
    border-bottom: 1px solid var(--border);
}
.site-header .container { display: flex; align-items: center; justify-content: space-between; padding: 1rem; }
.site-header h1 { font-size: 1.2rem; margin: 0; }
.site-header p { margin: 0; }
.dashboard-grid { display: grid; grid-template-columns: 1fr 2fr; gap: 1.5rem; padding: 2rem 1rem; }
.stack > * + * { margin-top: 1.5rem; }
.doc-list { list-style: none; margin: 0; padding: 0; }
.doc-list li + li { margin-top: 0.5rem; }
.doc-item {
    display: flex; justify-content: space-between; gap: 0.5rem;
    padding: 0.75rem; border: 1px solid var(--border); border-radius: 8px; color: var(--text);
}
.doc-item:hover { border-color: var(--primary); }
.doc-item.selected { border-color: var(--primary); background: var(--primary-soft); }
.doc-title { font-weight: 500; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.status { display: flex; align-items: center; gap: 0.4rem; }
.status-icon { width: 1rem; text-align: center; }
.spin { display: inline-block; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.dropzone {
    display: block; text-align: center; padding: 2rem 1rem;
    border: 2px dashed var(--border); border-radius: var(--radius); cursor: pointer;
}
.dropzone:hover { border-color: var(--primary); }
.empty { text-align: center; padding: 3rem 1rem; }
.empty .icon { font-size: 3rem; }
.keyword-list { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.entity { display: flex; gap: 0.75rem; padding: 0.75rem; border-radius: 8px; background: #f8f9fc; }
.entity + .entity { margin-top: 0.75rem; }
.entity p { margin: 0; }
.insights { list-style: none; padding: 0; margin: 0; }
.insights li { display: flex; gap: 0.75rem; align-items: flex-start; }
.insights li + li { margin-top: 0.5rem; }
.insight-num {
    flex-shrink: 0; width: 1.5rem; height: 1.5rem; border-radius: 50%;
    background: var(--primary-soft); color: var(--primary);
    display: flex; align-items: center; justify-content: center; font-size: 0.85rem; font-weight: 600;
}
.relationship { padding: 0.75rem; border: 1px solid var(--border); border-radius: 8px; }
.relationship + .relationship { margin-top: 0.75rem; }
.progress { height: 0.5rem; background: #eceef4; border-radius: 999px; overflow: hidden; }
.progress > div { height: 100%; background: var(--primary); }
.notice { padding: 0.75rem 1rem; border-radius: 8px; margin-bottom: 1rem; }
.notice-error { background: #fde8e8; color: var(--danger); }
.notice-info { background: var(--primary-soft); color: var(--primary); }
.notice-success { background: #dcfce7; color: #166534; }
.hero { text-align: center; padding: 5rem 1rem 4rem; }
.hero h1 { font-size: 3.25rem; margin: 0 0 1rem; }
.hero h1 span { display: block; color: var(--primary); }
.hero p { font-size: 1.2rem; max-width: 40rem; margin: 0 auto 2rem; }
.features { display: grid; grid-template-columns: repeat(3, 1fr); gap: 2rem; padding: 2rem 1rem; }
.cta { text-align: center; max-width: 48rem; margin: 2rem auto 4rem; padding: 3rem; }
.auth-card { max-width: 26rem; margin: 4rem auto; }
.auth-card label { display: block; font-size: 0.9rem; margin: 0.75rem 0 0.25rem; }
.auth-card input {
    width: 100%; padding: 0.55rem 0.75rem; border: 1px solid var(--border); border-radius: 8px; font: inherit;
}
.auth-actions { display: flex; gap: 0.75rem; margin-top: 1.25rem; }
@media (max-width: 900px) {
    .dashboard-grid, .features { grid-template-columns: 1fr; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<script>alert("x")</script> & more"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more"
        );
    }

    #[test]
    fn test_format_date() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(format_date(&dt), "2026-03-09");
    }

    #[test]
    fn test_layout_escapes_title() {
        let html = layout("<b>", "<p>body</p>");
        assert!(html.contains("<title>&lt;b&gt; - Smart Knowledge Extraction</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
