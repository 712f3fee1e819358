//! insight-api - HTTP server for insight
//!
//! Serves the landing page, sign-in, the dashboard (upload, document list,
//! knowledge panel), the JSON read API and the `extract-knowledge`
//! endpoint.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod session;
pub mod telemetry;
pub mod views;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use insight_core::{defaults, AuthProvider, DocumentRepository, KnowledgeExtractor, KnowledgeRepository};
use insight_db::StorageBackend;

pub use config::ServerConfig;
pub use error::ApiError;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentRepository>,
    pub knowledge: Arc<dyn KnowledgeRepository>,
    pub storage: Arc<dyn StorageBackend>,
    pub auth: Arc<dyn AuthProvider>,
    pub extractor: Arc<dyn KnowledgeExtractor>,
    pub config: Arc<ServerConfig>,
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with all middleware applied.
pub fn router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    // Browser clients on other origins may read the JSON API
    let api = Router::new()
        .route(
            "/api/v1/documents",
            get(handlers::documents::list_documents).post(handlers::upload::upload_document),
        )
        .route(
            "/api/v1/documents/:id/knowledge",
            get(handlers::documents::get_document_knowledge),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(defaults::CORS_MAX_AGE_SECS)),
        );

    // Sets its own wildcard CORS headers on every response
    let extraction = Router::new().route(
        "/extract-knowledge",
        post(handlers::extraction::extract_knowledge)
            .options(handlers::extraction::extract_knowledge_preflight),
    );

    Router::new()
        .route("/", get(handlers::pages::landing))
        .route("/health", get(health_check))
        .route("/auth", get(handlers::auth::auth_page))
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/sign-out", post(handlers::auth::sign_out))
        .route("/dashboard", get(handlers::pages::dashboard))
        .route("/dashboard/upload", post(handlers::upload::upload_page))
        .route(
            "/dashboard/knowledge/:id",
            get(handlers::pages::knowledge_fragment),
        )
        .merge(api)
        .merge(extraction)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http()),
        )
        // Uploads are bounded by MAX_UPLOAD_BYTES instead of axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .with_state(state)
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
