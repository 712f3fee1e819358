//! PostgreSQL implementation of KnowledgeRepository.
//!
//! The list-shaped fields are stored as JSONB columns.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, types::Json, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use insight_core::{
    new_v7, CreateKnowledgeRequest, Entity, Error, ExtractedKnowledge, Keyword,
    KnowledgeRepository, Relationship, Result,
};

const KNOWLEDGE_COLUMNS: &str = "id, user_id, document_id, keywords, entities, key_insights, \
                                 summary, relationships, created_at";

/// PostgreSQL extracted knowledge repository.
#[derive(Clone)]
pub struct PgKnowledgeRepository {
    pool: Pool<Postgres>,
}

impl PgKnowledgeRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn parse_row(row: &PgRow) -> ExtractedKnowledge {
        let Json(keywords): Json<Vec<Keyword>> = row.get("keywords");
        let Json(entities): Json<Vec<Entity>> = row.get("entities");
        let Json(key_insights): Json<Vec<String>> = row.get("key_insights");
        let Json(relationships): Json<Vec<Relationship>> = row.get("relationships");
        ExtractedKnowledge {
            id: row.get("id"),
            user_id: row.get("user_id"),
            document_id: row.get("document_id"),
            keywords,
            entities,
            key_insights,
            summary: row.get("summary"),
            relationships,
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl KnowledgeRepository for PgKnowledgeRepository {
    async fn insert(&self, req: CreateKnowledgeRequest) -> Result<ExtractedKnowledge> {
        let id = new_v7();
        let payload = req.payload;
        let row = sqlx::query(&format!(
            "INSERT INTO extracted_knowledge
                (id, user_id, document_id, keywords, entities, key_insights, summary, relationships, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {KNOWLEDGE_COLUMNS}"
        ))
        .bind(id)
        .bind(req.user_id)
        .bind(req.document_id)
        .bind(Json(&payload.keywords))
        .bind(Json(&payload.entities))
        .bind(Json(&payload.key_insights))
        .bind(&payload.summary)
        .bind(Json(&payload.relationships))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            db_table = "extracted_knowledge",
            document_id = %req.document_id,
            "Inserted extracted knowledge"
        );
        Ok(Self::parse_row(&row))
    }

    async fn get_for_document(&self, document_id: Uuid) -> Result<Option<ExtractedKnowledge>> {
        let row = sqlx::query(&format!(
            "SELECT {KNOWLEDGE_COLUMNS} FROM extracted_knowledge
             WHERE document_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        ))
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(Self::parse_row))
    }
}
