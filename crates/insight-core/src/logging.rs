//! Structured logging field name constants for insight.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed, message surfaced to the caller |
//! | WARN  | Non-fatal failure, operation continued |
//! | INFO  | Lifecycle events, completed uploads and extractions |
//! | DEBUG | Pipeline stages, outbound calls, config choices |
//! | TRACE | Raw payload sizes and per-item detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "storage", "inference", "auth"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "upload", "extraction", "pool", "openai", "gotrue"
pub const COMPONENT: &str = "component";

/// Logical operation name.
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Document UUID being operated on.
pub const DOCUMENT_ID: &str = "document_id";

/// Authenticated user id.
pub const USER_ID: &str = "user_id";

/// Storage key of an uploaded object.
pub const STORAGE_PATH: &str = "storage_path";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Upload progress percentage.
pub const PROGRESS: &str = "progress";

/// Byte length of a prompt or document body.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

/// Upstream HTTP status returned by the gateway.
pub const UPSTREAM_STATUS: &str = "upstream_status";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_unique() {
        let mut names = vec![
            REQUEST_ID, SUBSYSTEM, COMPONENT, OPERATION, DOCUMENT_ID, USER_ID, STORAGE_PATH,
            DURATION_MS, PROGRESS, PROMPT_LEN, RESPONSE_LEN, RESULT_COUNT, MODEL,
            UPSTREAM_STATUS, SUCCESS, ERROR_MSG,
        ];
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
