//! Session resolution.
//!
//! A request carries its access token either as `Authorization: Bearer`
//! or in the HTTP-only session cookie set at sign-in. The token is
//! resolved to a user through the authentication service on every
//! request.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::Redirect,
};
use tracing::warn;

use insight_core::{defaults::SESSION_COOKIE, AuthUser};

use crate::{error::ApiError, AppState};

/// Bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Access token stored in the session cookie.
pub fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}

/// Access token from either source, header first.
pub fn request_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

/// Resolve a token to a user. Service failures count as "no user".
pub async fn resolve_user(state: &AppState, token: &str) -> Option<AuthUser> {
    match state.auth.get_user(token).await {
        Ok(user) => user,
        Err(e) => {
            warn!(subsystem = "auth", op = "resolve_user", error = %e, "Session resolution failed");
            None
        }
    }
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(access_token: &str, max_age_secs: Option<i64>, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, access_token
    );
    if let Some(max_age) = max_age_secs {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", Some(0), secure)
}

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: AuthUser,
    pub access_token: String,
}

impl CurrentUser {
    async fn from_headers(headers: &HeaderMap, state: &AppState) -> Option<Self> {
        let token = request_token(headers)?;
        let user = resolve_user(state, token).await?;
        Some(Self {
            user,
            access_token: token.to_string(),
        })
    }
}

/// Requires a session; JSON routes answer 401 without one.
#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers, state)
            .await
            .ok_or_else(ApiError::unauthorized)
    }
}

/// Requires a session; pages redirect to `/auth` without one.
#[derive(Debug, Clone)]
pub struct PageUser(pub CurrentUser);

#[axum::async_trait]
impl FromRequestParts<AppState> for PageUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        CurrentUser::from_headers(&parts.headers, state)
            .await
            .map(PageUser)
            .ok_or_else(|| Redirect::to("/auth"))
    }
}

/// Optional session.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(CurrentUser::from_headers(&parts.headers, state).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(
            bearer_token(&headers(&[(header::AUTHORIZATION, "Bearer abc.def")])),
            Some("abc.def")
        );
        assert_eq!(
            bearer_token(&headers(&[(header::AUTHORIZATION, "bearer  xyz ")])),
            Some("xyz")
        );
        assert_eq!(bearer_token(&headers(&[(header::AUTHORIZATION, "Basic Zm9v")])), None);
        assert_eq!(bearer_token(&headers(&[(header::AUTHORIZATION, "Bearer ")])), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_cookie_token() {
        let map = headers(&[(header::COOKIE, "theme=dark; insight_session=tok123; other=1")]);
        assert_eq!(cookie_token(&map), Some("tok123"));

        let map = headers(&[(header::COOKIE, "insight_session=")]);
        assert_eq!(cookie_token(&map), None);
    }

    #[test]
    fn test_request_token_prefers_header() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer from-header"),
            (header::COOKIE, "insight_session=from-cookie"),
        ]);
        assert_eq!(request_token(&map), Some("from-header"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", Some(3600), true);
        assert_eq!(
            cookie,
            "insight_session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure"
        );
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }
}
