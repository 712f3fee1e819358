//! Knowledge extraction for a stored document.
//!
//! Sends the document text to the extractor, stores the result and marks
//! the document completed. Nothing is written when the extractor fails.

use std::time::Instant;

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use insight_core::{AuthUser, CreateKnowledgeRequest, Error, ExtractedKnowledge, Result};

use crate::AppState;

/// Body of `POST /extract-knowledge`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractKnowledgeRequest {
    pub document_id: String,
    pub content: String,
    #[serde(default)]
    pub file_type: Option<String>,
}

impl ExtractKnowledgeRequest {
    fn parsed_document_id(&self) -> Result<Uuid> {
        Uuid::parse_str(self.document_id.trim())
            .map_err(|_| Error::InvalidInput(format!("Invalid documentId: {}", self.document_id)))
    }
}

/// Extract and persist knowledge for one of the caller's documents.
pub async fn extract_knowledge(
    state: &AppState,
    user: &AuthUser,
    req: ExtractKnowledgeRequest,
) -> Result<ExtractedKnowledge> {
    let document_id = req.parsed_document_id()?;

    // Foreign documents are reported exactly like missing ones
    let document = state
        .documents
        .get(document_id)
        .await?
        .filter(|d| d.user_id == user.id)
        .ok_or(Error::DocumentNotFound(document_id))?;

    let file_type = req.file_type.as_deref().unwrap_or("unknown");
    let start = Instant::now();
    let payload = state.extractor.extract(file_type, &req.content).await?;

    let knowledge = state
        .knowledge
        .insert(CreateKnowledgeRequest {
            user_id: user.id,
            document_id: document.id,
            payload,
        })
        .await?;

    if let Err(e) = state.documents.mark_completed(document.id).await {
        warn!(
            subsystem = "api",
            component = "extraction",
            document_id = %document.id,
            error = %e,
            "Failed to mark document completed"
        );
    }

    info!(
        subsystem = "api",
        component = "extraction",
        op = "extract_knowledge",
        document_id = %document.id,
        user_id = %user.id,
        model = state.extractor.model_name(),
        keywords = knowledge.keywords.len(),
        entities = knowledge.entities.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Knowledge extracted"
    );

    Ok(knowledge)
}
