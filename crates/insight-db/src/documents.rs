//! PostgreSQL implementation of DocumentRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use insight_core::{
    new_v7, CreateDocumentRequest, Document, DocumentRepository, DocumentStatus, Error, Result,
};

const DOCUMENT_COLUMNS: &str = "id, user_id, title, file_type, file_path, file_size, status, \
                                uploaded_at, processed_at";

/// PostgreSQL document repository.
#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: Pool<Postgres>,
}

impl PgDocumentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn parse_row(row: &PgRow) -> Result<Document> {
        let status: String = row.get("status");
        Ok(Document {
            id: row.get("id"),
            user_id: row.get("user_id"),
            title: row.get("title"),
            file_type: row.get("file_type"),
            file_path: row.get("file_path"),
            file_size: row.get("file_size"),
            status: status.parse().map_err(Error::Serialization)?,
            uploaded_at: row.get("uploaded_at"),
            processed_at: row.get("processed_at"),
        })
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert(&self, req: CreateDocumentRequest) -> Result<Document> {
        let id = new_v7();
        let row = sqlx::query(&format!(
            "INSERT INTO documents (id, user_id, title, file_type, file_path, file_size, status, uploaded_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(req.user_id)
        .bind(&req.title)
        .bind(&req.file_type)
        .bind(&req.file_path)
        .bind(req.file_size)
        .bind(req.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(subsystem = "db", db_table = "documents", document_id = %id, "Inserted document");
        Self::parse_row(&row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Document>> {
        let row = sqlx::query(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(Self::parse_row).transpose()
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Document>> {
        let rows = sqlx::query(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents
             WHERE user_id = $1
             ORDER BY uploaded_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(Self::parse_row).collect()
    }

    async fn mark_completed(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE documents SET status = $1, processed_at = $2 WHERE id = $3",
        )
        .bind(DocumentStatus::Completed.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::DocumentNotFound(id));
        }
        Ok(())
    }
}
