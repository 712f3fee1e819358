//! Sign-in / sign-up page.

use super::{html_escape, layout};

/// Message shown above the form.
#[derive(Debug, Clone, Copy)]
pub enum AuthNotice<'a> {
    Error(&'a str),
    Info(&'a str),
}

/// Render `/auth`. Both buttons submit the same form to different actions.
pub fn page(notice: Option<AuthNotice<'_>>, email: &str) -> String {
    let notice_html = match notice {
        Some(AuthNotice::Error(msg)) => {
            format!(r#"<div class="notice notice-error">{}</div>"#, html_escape(msg))
        }
        Some(AuthNotice::Info(msg)) => {
            format!(r#"<div class="notice notice-info">{}</div>"#, html_escape(msg))
        }
        None => String::new(),
    };

    let body = format!(
        r#"<div class="container">
    <div class="card auth-card">
        <h2>Smart Knowledge Extraction</h2>
        <p class="muted small">Sign in or create an account to analyze your documents.</p>
        {notice}
        <form method="post" action="/auth/sign-in">
            <label for="email">Email</label>
            <input id="email" name="email" type="email" required autocomplete="email" value="{email}">
            <label for="password">Password</label>
            <input id="password" name="password" type="password" required minlength="6" autocomplete="current-password">
            <div class="auth-actions">
                <button class="btn" type="submit">Sign In</button>
                <button class="btn btn-outline" type="submit" formaction="/auth/sign-up">Sign Up</button>
            </div>
        </form>
        <p class="small"><a href="/">&larr; Back to home</a></p>
    </div>
</div>"#,
        notice = notice_html,
        email = html_escape(email)
    );

    layout("Sign In", &body)
}
