//! insight-api server binary.

use std::sync::Arc;

use tracing::info;

use insight_api::{
    config::StorageConfig,
    services::{GoTrueClient, RemoteBucketBackend},
    telemetry, AppState, ServerConfig,
};
use insight_core::KnowledgeExtractor;
use insight_db::{log_pool_metrics, Database, FilesystemBackend, PoolConfig, StorageBackend};
use insight_inference::OpenAIBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let _log_guard = telemetry::init();

    let config = ServerConfig::from_env()?;

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect_with_config(&config.database_url, PoolConfig::from_env()).await?;
    info!("Database connected");

    // Run pending database migrations on startup
    info!("Running database migrations...");
    db.migrate().await?;
    info!("Database migrations complete");
    log_pool_metrics(db.pool());

    let storage: Arc<dyn StorageBackend> = match config.storage {
        StorageConfig::Filesystem { ref base_path } => {
            let backend = FilesystemBackend::new(base_path.clone(), &config.bucket);
            backend
                .validate()
                .await
                .map_err(|e| anyhow::anyhow!("File storage unusable: {}", e))?;
            info!(
                "File storage initialized at {}/{}",
                base_path.display(),
                config.bucket
            );
            Arc::new(backend)
        }
        StorageConfig::Remote {
            ref url,
            ref api_key,
        } => {
            info!("Remote bucket storage at {} (bucket {})", url, config.bucket);
            Arc::new(RemoteBucketBackend::new(url, &config.bucket, api_key.clone())?)
        }
    };

    let auth = GoTrueClient::from_env()?;
    let extractor = OpenAIBackend::from_env()?;
    info!(
        "Inference backend initialized: {}",
        extractor.model_name()
    );

    let addr = config.bind_addr();
    let state = AppState {
        documents: Arc::new(db.documents.clone()),
        knowledge: Arc::new(db.knowledge.clone()),
        storage,
        auth: Arc::new(auth),
        extractor: Arc::new(extractor),
        config: Arc::new(config),
    };

    let app = insight_api::router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
