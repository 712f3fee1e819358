//! "Your Documents" list.

use uuid::Uuid;

use insight_core::{Document, DocumentStatus};

use super::{format_date, html_escape};

/// Status icon: spinner while processing, check when completed, clock otherwise.
pub fn status_icon(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Completed => r#"<span class="status-icon" style="color:#16a34a">&#10003;</span>"#,
        DocumentStatus::Processing => r#"<span class="status-icon spin" style="color:var(--primary)">&#10227;</span>"#,
        DocumentStatus::Pending => r#"<span class="status-icon muted">&#9719;</span>"#,
    }
}

/// Badge variant for a status.
pub fn status_badge_variant(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Completed => "default",
        DocumentStatus::Processing => "secondary",
        DocumentStatus::Pending => "outline",
    }
}

/// Render the list card. `selected` highlights one entry.
pub fn list(documents: &[Document], selected: Option<Uuid>) -> String {
    let content = if documents.is_empty() {
        r#"<p class="muted empty">No documents yet. Upload one to get started!</p>"#.to_string()
    } else {
        let items: String = documents
            .iter()
            .map(|doc| {
                let class = if selected == Some(doc.id) {
                    "doc-item selected"
                } else {
                    "doc-item"
                };
                format!(
                    r#"
        <li>
            <a class="{class}" href="/dashboard?document={id}" data-document-id="{id}">
                <div style="min-width:0">
                    <div class="doc-title">{title}</div>
                    <div class="muted small">{date}</div>
                </div>
                <div class="status">{icon}<span class="badge badge-{variant}">{status}</span></div>
            </a>
        </li>"#,
                    class = class,
                    id = doc.id,
                    title = html_escape(&doc.title),
                    date = format_date(&doc.uploaded_at),
                    icon = status_icon(doc.status),
                    variant = status_badge_variant(doc.status),
                    status = doc.status,
                )
            })
            .collect();
        format!(r#"<ul class="doc-list">{}</ul>"#, items)
    };

    format!(
        r#"<div class="card">
    <h2>&#128196; Your Documents</h2>
    {}
</div>"#,
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn doc(title: &str, status: DocumentStatus) -> Document {
        Document {
            id: Uuid::now_v7(),
            user_id: Uuid::nil(),
            title: title.to_string(),
            file_type: "txt".to_string(),
            file_path: "u/x.txt".to_string(),
            file_size: 3,
            status,
            uploaded_at: Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap(),
            processed_at: None,
        }
    }

    #[test]
    fn test_empty_state() {
        assert!(list(&[], None).contains("No documents yet. Upload one to get started!"));
    }

    #[test]
    fn test_entries_keep_order_and_highlight_selection() {
        let a = doc("first.txt", DocumentStatus::Completed);
        let b = doc("<second>.csv", DocumentStatus::Processing);
        let html = list(&[a.clone(), b.clone()], Some(b.id));

        let first = html.find("first.txt").unwrap();
        let second = html.find("&lt;second&gt;.csv").unwrap();
        assert!(first < second);
        assert!(html.contains(&format!(
            r#"class="doc-item selected" href="/dashboard?document={}""#,
            b.id
        )));
        assert!(html.contains("2026-05-01"));
        assert!(html.contains(r#"badge-default">completed"#));
        assert!(html.contains(r#"badge-secondary">processing"#));
    }

    #[test]
    fn test_status_variants() {
        assert_eq!(status_badge_variant(DocumentStatus::Pending), "outline");
        assert!(status_icon(DocumentStatus::Processing).contains("spin"));
    }
}
