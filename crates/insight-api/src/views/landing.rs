//! Landing page.

use super::layout;

/// Render `/`. Signed-in visitors get a dashboard link instead of sign-in.
pub fn page(signed_in: bool) -> String {
    let (primary_href, secondary) = if signed_in {
        (
            "/dashboard",
            r#"<a class="btn btn-outline" href="/dashboard">Open Dashboard</a>"#,
        )
    } else {
        (
            "/auth",
            r#"<a class="btn btn-outline" href="/auth">Sign In</a>"#,
        )
    };

    let body = format!(
        r#"<section class="container hero">
    <div class="icon" style="font-size:4rem">&#129504;</div>
    <h1>Smart Knowledge <span>Extraction</span></h1>
    <p class="muted">Transform your documents into actionable insights with AI-powered analysis.
    Extract keywords, entities, relationships, and key takeaways instantly.</p>
    <a class="btn" href="{primary_href}">Get Started &rarr;</a>
    {secondary}
</section>
<section class="container features">
    <div class="card">
        <h3>&#8682; Easy Upload</h3>
        <p class="muted">Drag and drop PDF, TXT, or CSV files. Our AI handles the rest automatically.</p>
    </div>
    <div class="card">
        <h3>&#128269; Deep Analysis</h3>
        <p class="muted">Extract keywords, entities, insights, and relationships from your documents.</p>
    </div>
    <div class="card">
        <h3>&#128451; Structured Storage</h3>
        <p class="muted">All extracted knowledge is organized and stored securely in your database.</p>
    </div>
</section>
<section class="container">
    <div class="card cta">
        <h2>Ready to unlock your knowledge?</h2>
        <p class="muted">Join now and start extracting insights from your documents with AI</p>
        <a class="btn" href="{primary_href}">Start Free &rarr;</a>
    </div>
</section>"#,
        primary_href = primary_href,
        secondary = secondary
    );

    layout("Home", &body)
}
