//! Client for a GoTrue-compatible authentication service.
//!
//! Endpoints used:
//! - `GET  /auth/v1/user`                       resolve an access token
//! - `POST /auth/v1/token?grant_type=password`  sign in
//! - `POST /auth/v1/signup`                     register
//! - `POST /auth/v1/logout`                     revoke

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use insight_core::{defaults, AuthProvider, AuthUser, Error, Result, Session};

/// Connection settings for the authentication service.
#[derive(Debug, Clone)]
pub struct GoTrueConfig {
    /// Base URL, without the `/auth/v1` suffix.
    pub url: String,
    /// Project API key sent in the `apikey` header.
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for GoTrueConfig {
    fn default() -> Self {
        Self {
            url: defaults::AUTH_URL.to_string(),
            api_key: None,
            timeout_seconds: defaults::AUTH_TIMEOUT_SECS,
        }
    }
}

impl GoTrueConfig {
    /// Read `AUTH_URL`, `AUTH_API_KEY` and `AUTH_TIMEOUT`.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            url: std::env::var("AUTH_URL").unwrap_or(base.url),
            api_key: std::env::var("AUTH_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout_seconds: std::env::var("AUTH_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(base.timeout_seconds),
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Authentication service client.
pub struct GoTrueClient {
    client: Client,
    config: GoTrueConfig,
}

impl GoTrueClient {
    pub fn new(config: GoTrueConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GoTrueConfig::from_env())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.config.url.trim_end_matches('/'), path)
    }

    fn with_api_key(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key {
            Some(ref key) => req.header("apikey", key),
            None => req,
        }
    }

    /// Human-readable message from an error response body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["error_description", "msg", "message", "error"]
                    .iter()
                    .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
            })
            .unwrap_or_else(|| body.trim().to_string())
    }
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let response = self
            .with_api_key(self.client.get(self.endpoint("/user")))
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(Some(response.json::<AuthUser>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!(subsystem = "auth", op = "get_user", "Access token rejected");
                Ok(None)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(
                    subsystem = "auth",
                    op = "get_user",
                    upstream_status = status.as_u16(),
                    "Auth service error"
                );
                Err(Error::Request(format!(
                    "auth service returned {}: {}",
                    status,
                    Self::error_message(&body)
                )))
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .with_api_key(self.client.post(self.endpoint("/token?grant_type=password")))
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Unauthorized(Self::error_message(&body)));
        }
        Ok(response.json::<Session>().await?)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let response = self
            .with_api_key(self.client.post(self.endpoint("/signup")))
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidInput(Self::error_message(&body)));
        }

        // With email confirmation enabled the service answers with the user
        // only; otherwise it issues a session right away.
        let body: serde_json::Value = response.json().await?;
        if body.get("access_token").is_some() {
            Ok(Some(serde_json::from_value(body)?))
        } else {
            Ok(None)
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self
            .with_api_key(self.client.post(self.endpoint("/logout")))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "auth service returned {}: {}",
                status,
                Self::error_message(&body)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GoTrueClient {
        GoTrueClient::new(GoTrueConfig {
            url: server.uri(),
            api_key: Some("anon-key".to_string()),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    const USER_ID: &str = "0191d5a4-5f1c-7c3e-9a55-2b1f3c4d5e6f";

    #[tokio::test]
    async fn test_get_user_resolves_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("apikey", "anon-key"))
            .and(header("Authorization", "Bearer good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": USER_ID,
                "email": "ada@example.com",
                "aud": "authenticated"
            })))
            .mount(&server)
            .await;

        let user = client_for(&server).get_user("good-token").await.unwrap().unwrap();
        assert_eq!(user.id.to_string(), USER_ID);
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_get_user_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": 401, "msg": "invalid JWT"
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server).get_user("stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_user_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_user("t").await.unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }

    #[tokio::test]
    async fn test_sign_in_password_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(body_json(serde_json::json!({
                "email": "ada@example.com", "password": "hunter22"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "at",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "rt",
                "user": {"id": USER_ID, "email": "ada@example.com"}
            })))
            .mount(&server)
            .await;

        let session = client_for(&server)
            .sign_in("ada@example.com", "hunter22")
            .await
            .unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.expires_in, Some(3600));
        assert_eq!(session.user.id.to_string(), USER_ID);
    }

    #[tokio::test]
    async fn test_sign_in_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).sign_in("a@b.c", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Invalid login credentials");
    }

    #[tokio::test]
    async fn test_sign_up_requires_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": USER_ID, "email": "new@example.com", "confirmation_sent_at": "2026-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let session = client_for(&server).sign_up("new@example.com", "pw123456").await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_sign_up_with_immediate_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "at",
                "user": {"id": USER_ID}
            })))
            .mount(&server)
            .await;

        let session = client_for(&server).sign_up("new@example.com", "pw123456").await.unwrap();
        assert_eq!(session.unwrap().access_token, "at");
    }

    #[tokio::test]
    async fn test_sign_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("Authorization", "Bearer at"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).sign_out("at").await.unwrap();
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(GoTrueClient::error_message(r#"{"msg":"weak password"}"#), "weak password");
        assert_eq!(GoTrueClient::error_message("plain text "), "plain text");
    }
}
