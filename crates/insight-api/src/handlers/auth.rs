//! Sign-in, sign-up and sign-out.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use insight_core::{Error, Session};

use crate::{
    services::upload::failure_message,
    session::{clear_session_cookie, session_cookie, MaybeUser},
    views::{self, auth::AuthNotice},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// `GET /auth`. Signed-in users go straight to the dashboard.
pub async fn auth_page(MaybeUser(current): MaybeUser) -> Response {
    if current.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(views::auth::page(None, "")).into_response()
}

fn start_session(state: &AppState, session: &Session) -> Response {
    let cookie = session_cookie(
        &session.access_token,
        session.expires_in,
        state.config.secure_cookies,
    );
    ([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
}

fn form_error(status: StatusCode, err: &Error, email: &str) -> Response {
    let message = failure_message(err);
    (
        status,
        Html(views::auth::page(Some(AuthNotice::Error(&message)), email)),
    )
        .into_response()
}

/// `POST /auth/sign-in`
pub async fn sign_in(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    match state.auth.sign_in(form.email.trim(), &form.password).await {
        Ok(session) => {
            info!(subsystem = "auth", op = "sign_in", user_id = %session.user.id, "Signed in");
            start_session(&state, &session)
        }
        Err(e) => {
            warn!(subsystem = "auth", op = "sign_in", error = %e, "Sign-in failed");
            let status = match e {
                Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            };
            form_error(status, &e, &form.email)
        }
    }
}

/// `POST /auth/sign-up`
pub async fn sign_up(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    match state.auth.sign_up(form.email.trim(), &form.password).await {
        Ok(Some(session)) => {
            info!(subsystem = "auth", op = "sign_up", user_id = %session.user.id, "Account created");
            start_session(&state, &session)
        }
        Ok(None) => Html(views::auth::page(
            Some(AuthNotice::Info(
                "Check your email to confirm your account, then sign in.",
            )),
            &form.email,
        ))
        .into_response(),
        Err(e) => {
            warn!(subsystem = "auth", op = "sign_up", error = %e, "Sign-up failed");
            let status = match e {
                Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            form_error(status, &e, &form.email)
        }
    }
}

/// `POST /auth/sign-out`
pub async fn sign_out(State(state): State<AppState>, MaybeUser(current): MaybeUser) -> Response {
    if let Some(current) = current {
        if let Err(e) = state.auth.sign_out(&current.access_token).await {
            warn!(subsystem = "auth", op = "sign_out", error = %e, "Token revocation failed");
        }
    }
    (
        [(
            header::SET_COOKIE,
            clear_session_cookie(state.config.secure_cookies),
        )],
        Redirect::to("/auth"),
    )
        .into_response()
}
