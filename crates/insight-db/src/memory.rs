//! In-memory repositories and storage for router tests and local demos.
//!
//! Enabled with the `memory` feature. Behavior mirrors the PostgreSQL
//! implementations: newest documents first, newest knowledge row wins.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use insight_core::{
    new_v7, CreateDocumentRequest, CreateKnowledgeRequest, Document, DocumentRepository,
    DocumentStatus, Error, ExtractedKnowledge, KnowledgeRepository, Result,
};

use crate::file_storage::StorageBackend;

fn poisoned<T>(_: T) -> Error {
    Error::Internal("in-memory store lock poisoned".to_string())
}

/// Document repository backed by a `Vec`.
#[derive(Default)]
pub struct MemoryDocumentRepository {
    rows: Mutex<Vec<Document>>,
}

impl MemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed row, keeping its timestamps.
    pub fn seed(&self, doc: Document) -> Result<()> {
        self.rows.lock().map_err(poisoned)?.push(doc);
        Ok(())
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocumentRepository {
    async fn insert(&self, req: CreateDocumentRequest) -> Result<Document> {
        let doc = Document {
            id: new_v7(),
            user_id: req.user_id,
            title: req.title,
            file_type: req.file_type,
            file_path: req.file_path,
            file_size: req.file_size,
            status: req.status,
            uploaded_at: Utc::now(),
            processed_at: None,
        };
        self.rows.lock().map_err(poisoned)?.push(doc.clone());
        Ok(doc)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Document>> {
        let rows = self.rows.lock().map_err(poisoned)?;
        Ok(rows.iter().find(|d| d.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Document>> {
        let rows = self.rows.lock().map_err(poisoned)?;
        let mut docs: Vec<Document> = rows.iter().filter(|d| d.user_id == user_id).cloned().collect();
        docs.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        Ok(docs)
    }

    async fn mark_completed(&self, id: Uuid) -> Result<()> {
        let mut rows = self.rows.lock().map_err(poisoned)?;
        let doc = rows
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(Error::DocumentNotFound(id))?;
        doc.status = DocumentStatus::Completed;
        doc.processed_at = Some(Utc::now());
        Ok(())
    }
}

/// Knowledge repository backed by a `Vec`.
#[derive(Default)]
pub struct MemoryKnowledgeRepository {
    rows: Mutex<Vec<ExtractedKnowledge>>,
}

impl MemoryKnowledgeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, knowledge: ExtractedKnowledge) -> Result<()> {
        self.rows.lock().map_err(poisoned)?.push(knowledge);
        Ok(())
    }

    /// Number of stored knowledge rows.
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KnowledgeRepository for MemoryKnowledgeRepository {
    async fn insert(&self, req: CreateKnowledgeRequest) -> Result<ExtractedKnowledge> {
        let payload = req.payload;
        let knowledge = ExtractedKnowledge {
            id: new_v7(),
            user_id: req.user_id,
            document_id: req.document_id,
            keywords: payload.keywords,
            entities: payload.entities,
            key_insights: payload.key_insights,
            summary: payload.summary,
            relationships: payload.relationships,
            created_at: Utc::now(),
        };
        self.rows.lock().map_err(poisoned)?.push(knowledge.clone());
        Ok(knowledge)
    }

    async fn get_for_document(&self, document_id: Uuid) -> Result<Option<ExtractedKnowledge>> {
        let rows = self.rows.lock().map_err(poisoned)?;
        Ok(rows
            .iter()
            .filter(|k| k.document_id == document_id)
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned())
    }
}

/// Storage backend backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryStorageBackend {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Bytes stored under `key`.
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorageBackend {
    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        self.objects
            .lock()
            .map_err(poisoned)?
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }
}
