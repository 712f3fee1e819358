//! Gateway error classification.

use insight_core::Error;

/// Error classes reported by the chat-completions gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    /// HTTP 429.
    RateLimitExceeded,
    /// HTTP 402: the workspace is out of credits.
    PaymentRequired,
    /// Any other non-success status.
    Other,
}

impl GatewayErrorCode {
    /// Determine error code from HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimitExceeded,
            402 => Self::PaymentRequired,
            _ => Self::Other,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded)
    }
}

/// Convert a gateway failure into an insight Error.
///
/// Rate limit and payment errors carry fixed user-facing messages; every
/// other status surfaces the raw response body.
pub fn to_insight_error(code: GatewayErrorCode, body: &str) -> Error {
    match code {
        GatewayErrorCode::RateLimitExceeded => Error::RateLimited,
        GatewayErrorCode::PaymentRequired => Error::PaymentRequired,
        GatewayErrorCode::Other => Error::Inference(format!("AI API error: {}", body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_429() {
        assert_eq!(
            GatewayErrorCode::from_status(429),
            GatewayErrorCode::RateLimitExceeded
        );
    }

    #[test]
    fn test_error_code_from_402() {
        assert_eq!(
            GatewayErrorCode::from_status(402),
            GatewayErrorCode::PaymentRequired
        );
    }

    #[test]
    fn test_error_code_from_other_statuses() {
        for status in [400, 401, 404, 500, 502, 503] {
            assert_eq!(GatewayErrorCode::from_status(status), GatewayErrorCode::Other);
        }
    }

    #[test]
    fn test_retryable_rate_limit_only() {
        assert!(GatewayErrorCode::RateLimitExceeded.is_retryable());
        assert!(!GatewayErrorCode::PaymentRequired.is_retryable());
        assert!(!GatewayErrorCode::Other.is_retryable());
    }

    #[test]
    fn test_to_insight_error_messages() {
        let err = to_insight_error(GatewayErrorCode::RateLimitExceeded, "slow down");
        assert!(matches!(err, Error::RateLimited));

        let err = to_insight_error(GatewayErrorCode::PaymentRequired, "");
        assert!(matches!(err, Error::PaymentRequired));

        let err = to_insight_error(GatewayErrorCode::Other, "model overloaded");
        assert_eq!(err.to_string(), "AI API error: model overloaded");
    }
}
