//! HTML pages: landing, dashboard and the knowledge panel fragment.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use insight_core::Error;

use super::documents::owned_document_knowledge;
use crate::{
    error::ApiError,
    session::{CurrentUser, MaybeUser, PageUser},
    views::{self, knowledge::KnowledgePanel},
    AppState,
};

/// `GET /`
pub async fn landing(MaybeUser(current): MaybeUser) -> Html<String> {
    Html(views::landing::page(current.is_some()))
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Selected document id. Unparseable values select nothing.
    pub document: Option<String>,
}

/// `GET /dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    PageUser(current): PageUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let documents = state.documents.list_for_user(current.user.id).await?;
    let selected = query
        .document
        .as_deref()
        .and_then(|s| Uuid::parse_str(s.trim()).ok());

    let panel = match selected {
        None => KnowledgePanel::NoSelection,
        Some(id) if documents.iter().any(|d| d.id == id) => KnowledgePanel::Loading(id),
        Some(_) => KnowledgePanel::NotFound,
    };

    Ok(Html(views::dashboard::page(
        current.user.email.as_deref(),
        &documents,
        selected,
        &panel,
    )))
}

/// `GET /dashboard/knowledge/:id`, loaded into the panel by the dashboard.
pub async fn knowledge_fragment(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match owned_document_knowledge(&state, current.user.id, id).await {
        Ok(Some(knowledge)) => Ok(Html(views::knowledge::panel(&KnowledgePanel::Ready(
            &knowledge,
        )))
        .into_response()),
        Ok(None) => Ok(Html(views::knowledge::panel(&KnowledgePanel::Pending)).into_response()),
        Err(Error::DocumentNotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Html(views::knowledge::panel(&KnowledgePanel::NotFound)),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}
