//! # insight-db
//!
//! PostgreSQL database layer and object storage for insight.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for documents and extracted knowledge
//! - Filesystem object storage keyed by `<user_id>/<random_id>.<ext>`
//! - In-memory implementations for router tests (`memory` feature)
//!
//! ## Example
//!
//! ```rust,ignore
//! use insight_db::{Database, DocumentRepository};
//!
//! let db = Database::connect("postgres://localhost/insight").await?;
//! let docs = db.documents.list_for_user(user_id).await?;
//! ```

pub mod documents;
pub mod file_storage;
pub mod knowledge;
#[cfg(feature = "memory")]
pub mod memory;
pub mod pool;

// Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

pub use insight_core::*;

pub use documents::PgDocumentRepository;
pub use file_storage::{generate_storage_path, FilesystemBackend, StorageBackend};
pub use knowledge::PgKnowledgeRepository;
#[cfg(feature = "memory")]
pub use memory::{MemoryDocumentRepository, MemoryKnowledgeRepository, MemoryStorageBackend};
pub use pool::{create_pool_with_config, log_pool_metrics, PoolConfig};

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Uploaded document rows.
    pub documents: PgDocumentRepository,
    /// Extracted knowledge rows.
    pub knowledge: PgKnowledgeRepository,
}

impl Database {
    /// Create a new database context from a pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            documents: PgDocumentRepository::new(pool.clone()),
            knowledge: PgKnowledgeRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to database with default configuration.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_config(url, PoolConfig::default()).await
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
