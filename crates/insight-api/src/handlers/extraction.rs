//! `extract-knowledge` endpoint.
//!
//! Callable cross-origin from any site; every response, errors included,
//! carries the wildcard CORS headers.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::ApiError,
    services::extraction::{self, ExtractKnowledgeRequest},
    session::{bearer_token, resolve_user},
    AppState,
};

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

/// `OPTIONS /extract-knowledge`
pub async fn extract_knowledge_preflight() -> Response {
    with_cors(StatusCode::OK.into_response())
}

/// `POST /extract-knowledge`
///
/// The bearer token is checked before the body is read, so unauthenticated
/// calls never touch storage.
pub async fn extract_knowledge(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    with_cors(handle(&state, &headers, &body).await.into_response())
}

async fn handle(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(headers).ok_or_else(ApiError::unauthorized)?;
    let user = resolve_user(state, token)
        .await
        .ok_or_else(ApiError::unauthorized)?;

    let req: ExtractKnowledgeRequest =
        serde_json::from_slice(body).map_err(|e| ApiError::Internal(e.to_string()))?;

    let knowledge = extraction::extract_knowledge(state, &user, req).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "knowledge": knowledge,
    })))
}
