//! JSON read API for documents and their knowledge.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;
use uuid::Uuid;

use insight_core::{Document, Error, ExtractedKnowledge};

use crate::{error::ApiError, session::CurrentUser, AppState};

/// `GET /api/v1/documents`, newest first.
pub async fn list_documents(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Document>>, ApiError> {
    let docs = state.documents.list_for_user(current.user.id).await?;
    debug!(
        subsystem = "api",
        op = "list_documents",
        user_id = %current.user.id,
        result_count = docs.len(),
        "Listed documents"
    );
    Ok(Json(docs))
}

/// `GET /api/v1/documents/:id/knowledge`
pub async fn get_document_knowledge(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ExtractedKnowledge>, ApiError> {
    let knowledge = owned_document_knowledge(&state, current.user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No knowledge extracted for document {}", id)))?;
    Ok(Json(knowledge))
}

/// Knowledge for a document the user owns.
///
/// `Err(DocumentNotFound)` when the document is missing or foreign,
/// `Ok(None)` while it has no knowledge row yet.
pub(crate) async fn owned_document_knowledge(
    state: &AppState,
    user_id: Uuid,
    document_id: Uuid,
) -> Result<Option<ExtractedKnowledge>, Error> {
    state
        .documents
        .get(document_id)
        .await?
        .filter(|d| d.user_id == user_id)
        .ok_or(Error::DocumentNotFound(document_id))?;
    state.knowledge.get_for_document(document_id).await
}
