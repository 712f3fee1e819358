//! Centralized default constants for insight.
//!
//! Crates reference these instead of defining their own magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum upload body size in bytes (20 MiB).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Delay before the dashboard reloads after a successful upload.
pub const RELOAD_DELAY_SECS: u64 = 1;

/// Name of the session cookie carrying the access token.
pub const SESSION_COOKIE: &str = "insight_session";

// =============================================================================
// STORAGE
// =============================================================================

/// Object storage bucket for uploaded documents.
pub const STORAGE_BUCKET: &str = "documents";

/// Default filesystem root for the local storage backend.
pub const FILE_STORAGE_PATH: &str = "/var/lib/insight/files";

// =============================================================================
// DATABASE
// =============================================================================

/// Default database URL.
pub const DATABASE_URL: &str = "postgres://localhost/insight";

// =============================================================================
// AUTH
// =============================================================================

/// Default base URL of the authentication service.
pub const AUTH_URL: &str = "http://localhost:54321";

/// Timeout for auth service requests in seconds.
pub const AUTH_TIMEOUT_SECS: u64 = 15;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default model used for knowledge extraction.
pub const EXTRACTION_MODEL: &str = "google/gemini-2.5-flash";

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 300;
