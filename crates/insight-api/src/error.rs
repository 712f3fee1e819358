//! HTTP error responses.
//!
//! Every error renders as `{"error": "<message>"}` with a status derived
//! from the core error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Error returned by JSON handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    PaymentRequired(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<insight_core::Error> for ApiError {
    fn from(err: insight_core::Error) -> Self {
        use insight_core::Error;
        match err {
            Error::Unauthorized(_) => ApiError::unauthorized(),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            e @ Error::DocumentNotFound(_) => ApiError::NotFound(e.to_string()),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            e @ Error::RateLimited => ApiError::RateLimited(e.to_string()),
            e @ Error::PaymentRequired => ApiError::PaymentRequired(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::Error;
    use uuid::Uuid;

    #[test]
    fn test_core_error_mapping() {
        assert_eq!(
            ApiError::from(Error::RateLimited).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::from(Error::PaymentRequired).status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ApiError::from(Error::DocumentNotFound(Uuid::nil())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(Error::Unauthorized("expired".into())).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(Error::InvalidInput("bad id".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::Storage("disk full".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_pass_through() {
        let err = ApiError::from(Error::Inference("AI API error: boom".into()));
        assert_eq!(err.to_string(), "AI API error: boom");

        let err = ApiError::from(Error::RateLimited);
        assert_eq!(err.to_string(), "Rate limit exceeded. Please try again later.");

        assert_eq!(
            ApiError::from(Error::Unauthorized("x".into())).to_string(),
            "Unauthorized"
        );
    }
}
