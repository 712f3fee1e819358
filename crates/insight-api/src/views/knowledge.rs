//! Knowledge panel.

use uuid::Uuid;

use insight_core::{EntityCategory, ExtractedKnowledge, RelevanceTier};

use super::html_escape;

/// What the panel shows.
#[derive(Debug, Clone, Copy)]
pub enum KnowledgePanel<'a> {
    /// No document selected.
    NoSelection,
    /// Document selected; the panel fetches its fragment.
    Loading(Uuid),
    /// Selected document has no knowledge row yet.
    Pending,
    Ready(&'a ExtractedKnowledge),
    /// Selected document is missing or belongs to someone else.
    NotFound,
}

pub fn relevance_class(label: &str) -> &'static str {
    match RelevanceTier::from_label(label) {
        RelevanceTier::High => "relevance-high",
        RelevanceTier::Medium => "relevance-medium",
        RelevanceTier::Low => "relevance-low",
    }
}

pub fn entity_class(label: &str) -> &'static str {
    match EntityCategory::from_label(label) {
        EntityCategory::Person => "entity-person",
        EntityCategory::Organization => "entity-organization",
        EntityCategory::Location => "entity-location",
        EntityCategory::Date => "entity-date",
        EntityCategory::Other => "entity-other",
    }
}

fn empty_state(icon: &str, title: &str, detail: &str) -> String {
    format!(
        r#"<div class="card empty">
    <div class="icon">{}</div>
    <h3>{}</h3>
    <p class="muted small">{}</p>
</div>"#,
        icon, title, detail
    )
}

/// Render the panel contents for a state.
pub fn panel(state: &KnowledgePanel<'_>) -> String {
    match state {
        KnowledgePanel::NoSelection => empty_state(
            "&#129504;",
            "Select a document",
            "Choose a document from the list to view extracted insights",
        ),
        KnowledgePanel::Loading(id) => format!(
            r#"<div class="card empty" id="knowledge-loading" data-src="/dashboard/knowledge/{id}">
    <div class="icon spin">&#10227;</div>
</div>
<script>
(function () {{
    var el = document.getElementById("knowledge-loading");
    fetch(el.dataset.src, {{ credentials: "same-origin" }})
        .then(function (r) {{ return r.text(); }})
        .then(function (html) {{ el.outerHTML = html; }})
        .catch(function () {{ el.innerHTML = "<p class=\"muted\">Could not load insights.</p>"; }});
}})();
</script>"#,
            id = id
        ),
        KnowledgePanel::Pending => empty_state(
            "&#128196;",
            "No insights yet",
            "This document is still being processed",
        ),
        KnowledgePanel::NotFound => empty_state(
            "&#128196;",
            "Document not found",
            "Choose a document from the list to view extracted insights",
        ),
        KnowledgePanel::Ready(knowledge) => ready(knowledge),
    }
}

fn ready(k: &ExtractedKnowledge) -> String {
    let keywords: String = k
        .keywords
        .iter()
        .map(|kw| {
            format!(
                r#"<span class="badge {}">{} ({})</span>"#,
                relevance_class(&kw.relevance),
                html_escape(&kw.term),
                kw.frequency
            )
        })
        .collect();

    let entities: String = k
        .entities
        .iter()
        .map(|e| {
            format!(
                r#"<div class="entity">
            <span class="badge {}">{}</span>
            <div><p><strong>{}</strong></p><p class="muted small">{}</p></div>
        </div>"#,
                entity_class(&e.category),
                html_escape(&e.category),
                html_escape(&e.name),
                html_escape(&e.context)
            )
        })
        .collect();

    let insights: String = k
        .key_insights
        .iter()
        .enumerate()
        .map(|(i, insight)| {
            format!(
                r#"<li><span class="insight-num">{}</span><p style="margin:0">{}</p></li>"#,
                i + 1,
                html_escape(insight)
            )
        })
        .collect();

    let relationships = if k.relationships.is_empty() {
        String::new()
    } else {
        let items: String = k
            .relationships
            .iter()
            .map(|r| {
                format!(
                    r#"<div class="relationship">
            <div><span class="badge badge-outline">{}</span> <span class="muted">&rarr;</span> <span class="badge badge-outline">{}</span></div>
            <p class="small" style="margin:0.5rem 0 0"><strong>{}:</strong> {}</p>
        </div>"#,
                    html_escape(&r.from),
                    html_escape(&r.to),
                    html_escape(&r.relation_type),
                    html_escape(&r.description)
                )
            })
            .collect();
        format!(
            r#"<div class="card" id="relationships">
        <h2>&#128376; Relationships</h2>
        {}
    </div>"#,
            items
        )
    };

    format!(
        r#"<div class="stack" id="knowledge">
    <div class="card">
        <h2>&#128196; Summary</h2>
        <p>{summary}</p>
    </div>
    <div class="card">
        <h2>&#127991; Keywords</h2>
        <div class="keyword-list">{keywords}</div>
    </div>
    <div class="card">
        <h2>&#128101; Entities</h2>
        {entities}
    </div>
    <div class="card">
        <h2>&#128161; Key Insights</h2>
        <ul class="insights">{insights}</ul>
    </div>
    {relationships}
</div>"#,
        summary = html_escape(&k.summary),
        keywords = keywords,
        entities = entities,
        insights = insights,
        relationships = relationships
    )
}
