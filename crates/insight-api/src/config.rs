//! Server configuration read from the environment.

use std::path::PathBuf;

use axum::http::HeaderValue;
use insight_core::{defaults, Error, Result};

/// Where uploaded document bytes are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Local directory, one subdirectory per bucket.
    Filesystem { base_path: PathBuf },
    /// Hosted bucket API (`/storage/v1/object/<bucket>/<key>`).
    Remote { url: String, api_key: Option<String> },
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub storage: StorageConfig,
    pub bucket: String,
    /// Maximum request body size, uploads included.
    pub max_upload_bytes: usize,
    /// Origins allowed to call the JSON API from a browser.
    pub allowed_origins: Vec<HeaderValue>,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            database_url: defaults::DATABASE_URL.to_string(),
            storage: StorageConfig::Filesystem {
                base_path: PathBuf::from(defaults::FILE_STORAGE_PATH),
            },
            bucket: defaults::STORAGE_BUCKET.to_string(),
            max_upload_bytes: defaults::MAX_UPLOAD_BYTES,
            allowed_origins: default_origins(),
            secure_cookies: false,
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables, keeping defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self> {
        let base = Self::default();

        let port = match std::env::var("PORT") {
            Ok(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got '{}'", v)))?,
            Err(_) => base.port,
        };

        let storage = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "filesystem".to_string())
            .to_lowercase()
            .as_str()
        {
            "filesystem" | "fs" => StorageConfig::Filesystem {
                base_path: std::env::var("FILE_STORAGE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(defaults::FILE_STORAGE_PATH)),
            },
            "remote" => StorageConfig::Remote {
                url: std::env::var("STORAGE_URL")
                    .or_else(|_| std::env::var("AUTH_URL"))
                    .unwrap_or_else(|_| defaults::AUTH_URL.to_string()),
                api_key: std::env::var("STORAGE_API_KEY")
                    .or_else(|_| std::env::var("AUTH_API_KEY"))
                    .ok()
                    .filter(|k| !k.is_empty()),
            },
            other => {
                return Err(Error::Config(format!(
                    "STORAGE_BACKEND must be 'filesystem' or 'remote', got '{}'",
                    other
                )))
            }
        };

        let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(base.max_upload_bytes);

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(base.host),
            port,
            database_url: std::env::var("DATABASE_URL").unwrap_or(base.database_url),
            storage,
            bucket: std::env::var("STORAGE_BUCKET").unwrap_or(base.bucket),
            max_upload_bytes,
            allowed_origins: parse_allowed_origins(std::env::var("ALLOWED_ORIGINS").ok().as_deref()),
            secure_cookies: std::env::var("SECURE_COOKIES")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_origins() -> Vec<HeaderValue> {
    vec![HeaderValue::from_static("http://localhost:3000")]
}

/// Parse the comma-separated `ALLOWED_ORIGINS` whitelist.
///
/// ```text
/// ALLOWED_ORIGINS=https://insight.example.com,http://localhost:3000
/// ```
///
/// Invalid entries and the `*` wildcard are skipped with a warning; the
/// whitelist only holds explicit origins. An unset or empty value yields
/// the local development origin.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<HeaderValue> {
    let Some(origins_str) = raw.filter(|s| !s.trim().is_empty()) else {
        return default_origins();
    };

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; list explicit origins instead");
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
