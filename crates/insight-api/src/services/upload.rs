//! Upload pipeline: store the file, record the document, extract knowledge.
//!
//! Stages report fixed progress percentages. Any failure aborts the
//! pipeline; the stored object and document row are left in place.

use axum::extract::Multipart;
use serde::Serialize;
use tracing::{debug, info};

use insight_core::{
    detect_content_type, document_file_type, extension_of, AcceptedFileType, AuthUser,
    CreateDocumentRequest, Document, DocumentStatus, Error, ExtractedKnowledge, Result,
};
use insight_db::generate_storage_path;

use super::document_text::read_document_text;
use super::extraction::{self, ExtractKnowledgeRequest};
use crate::AppState;

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStage {
    Authenticated,
    Stored,
    DocumentCreated,
    TextRead,
    ExtractionRequested,
    Completed,
}

impl UploadStage {
    pub const ALL: [UploadStage; 6] = [
        Self::Authenticated,
        Self::Stored,
        Self::DocumentCreated,
        Self::TextRead,
        Self::ExtractionRequested,
        Self::Completed,
    ];

    pub fn percent(&self) -> u8 {
        match self {
            Self::Authenticated => 10,
            Self::Stored => 30,
            Self::DocumentCreated => 50,
            Self::TextRead => 70,
            Self::ExtractionRequested => 80,
            Self::Completed => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Authenticated => "Signed in",
            Self::Stored => "File stored",
            Self::DocumentCreated => "Document recorded",
            Self::TextRead => "Text read",
            Self::ExtractionRequested => "Extracting knowledge",
            Self::Completed => "Done",
        }
    }
}

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub document: Document,
    pub knowledge: ExtractedKnowledge,
}

/// Read the first file field of a multipart form. Later files are ignored.
pub async fn read_first_file(multipart: &mut Multipart) -> Result<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidInput(e.to_string()))?
    {
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        return Ok(UploadedFile {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }
    Err(Error::InvalidInput("No file provided".to_string()))
}

/// Message shown to the uploader for a failed pipeline.
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::Unauthorized(msg) | Error::InvalidInput(msg) | Error::NotFound(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Run the upload pipeline for one file.
pub async fn process_upload(
    state: &AppState,
    user: Option<&AuthUser>,
    file: UploadedFile,
    mut progress: impl FnMut(UploadStage) + Send,
) -> Result<UploadOutcome> {
    let mut report = |stage: UploadStage| {
        debug!(
            subsystem = "api",
            component = "upload",
            stage = ?stage,
            progress = stage.percent(),
            "Upload stage reached"
        );
        progress(stage);
    };

    let user = user.ok_or_else(|| Error::Unauthorized("Not authenticated".to_string()))?;
    report(UploadStage::Authenticated);

    let claimed = file.content_type.as_deref().unwrap_or("application/octet-stream");
    let detected = detect_content_type(&file.data, claimed);
    let kind = AcceptedFileType::from_upload(&file.filename, Some(detected.as_str()))
        .ok_or_else(|| {
            Error::InvalidInput(
                "Unsupported file type. Upload a PDF, TXT, or CSV file.".to_string(),
            )
        })?;

    let storage_path = generate_storage_path(&user.id, extension_of(&file.filename).as_deref());
    state.storage.write(&storage_path, &file.data).await?;
    report(UploadStage::Stored);

    let document = state
        .documents
        .insert(CreateDocumentRequest {
            user_id: user.id,
            title: file.filename.clone(),
            file_type: document_file_type(&file.filename),
            file_path: storage_path,
            file_size: file.data.len() as i64,
            status: DocumentStatus::Processing,
        })
        .await?;
    report(UploadStage::DocumentCreated);

    let content = read_document_text(kind, &file.data).await;
    report(UploadStage::TextRead);

    report(UploadStage::ExtractionRequested);
    let knowledge = extraction::extract_knowledge(
        state,
        user,
        ExtractKnowledgeRequest {
            document_id: document.id.to_string(),
            content,
            file_type: Some(document.file_type.clone()),
        },
    )
    .await?;

    let document = state.documents.get(document.id).await?.unwrap_or(document);
    report(UploadStage::Completed);

    info!(
        subsystem = "api",
        component = "upload",
        document_id = %document.id,
        user_id = %user.id,
        file_type = %document.file_type,
        size = document.file_size,
        "Document processed"
    );

    Ok(UploadOutcome {
        document,
        knowledge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_percentages_increase() {
        let percents: Vec<u8> = UploadStage::ALL.iter().map(|s| s.percent()).collect();
        assert_eq!(percents, vec![10, 30, 50, 70, 80, 100]);
    }

    #[test]
    fn test_failure_message_strips_prefix() {
        assert_eq!(
            failure_message(&Error::Unauthorized("Not authenticated".into())),
            "Not authenticated"
        );
        assert_eq!(
            failure_message(&Error::RateLimited),
            "Rate limit exceeded. Please try again later."
        );
        assert_eq!(
            failure_message(&Error::Storage("bucket missing".into())),
            "Storage error: bucket missing"
        );
    }
}
