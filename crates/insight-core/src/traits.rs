//! Core traits for insight abstractions.
//!
//! These traits define the seams between the HTTP layer and the hosted
//! collaborators (database, auth service, LLM gateway), enabling
//! pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// REPOSITORIES
// =============================================================================

/// Repository for document rows.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a new document and return the stored row.
    async fn insert(&self, req: CreateDocumentRequest) -> Result<Document>;

    /// Fetch a document by ID, if it exists.
    async fn get(&self, id: Uuid) -> Result<Option<Document>>;

    /// List a user's documents, most recently uploaded first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Document>>;

    /// Set status to `completed` and stamp `processed_at`.
    async fn mark_completed(&self, id: Uuid) -> Result<()>;
}

/// Repository for extracted knowledge rows.
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Insert a new knowledge row and return it.
    async fn insert(&self, req: CreateKnowledgeRequest) -> Result<ExtractedKnowledge>;

    /// Fetch the knowledge row for a document.
    ///
    /// Duplicate rows are not prevented; the most recent one wins.
    async fn get_for_document(&self, document_id: Uuid) -> Result<Option<ExtractedKnowledge>>;
}

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Client for the hosted authentication service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve an access token to a user. `Ok(None)` means the token was rejected.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>>;

    /// Exchange email and password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Register a new account. Returns a session when the service issues
    /// one immediately (no email confirmation required).
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>>;

    /// Revoke the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<()>;
}

// =============================================================================
// INFERENCE
// =============================================================================

/// Backend that turns document text into structured knowledge.
#[async_trait]
pub trait KnowledgeExtractor: Send + Sync {
    /// Extract the five knowledge fields from a document's text.
    async fn extract(&self, file_type: &str, content: &str) -> Result<ExtractionPayload>;

    /// Model identifier sent to the gateway.
    fn model_name(&self) -> &str;
}
