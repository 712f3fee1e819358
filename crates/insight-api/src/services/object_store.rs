//! Remote bucket storage over the hosted storage REST API.
//!
//! Objects live at `{url}/storage/v1/object/{bucket}/{key}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use insight_core::{Error, Result};
use insight_db::StorageBackend;

/// Storage backend for a hosted bucket.
pub struct RemoteBucketBackend {
    client: Client,
    base_url: String,
    bucket: String,
    api_key: Option<String>,
}

impl RemoteBucketBackend {
    pub fn new(base_url: &str, bucket: &str, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key,
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            key.trim_start_matches('/')
        )
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.api_key {
            Some(ref key) => req.header("apikey", key).bearer_auth(key),
            None => req,
        }
    }

    async fn storage_error(op: &str, key: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Error::Storage(format!("{} {} failed ({}): {}", op, key, status, body.trim()))
    }
}

#[async_trait]
impl StorageBackend for RemoteBucketBackend {
    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        debug!(subsystem = "storage", storage_path = %path, size = data.len(), "remote_bucket: write");
        let response = self
            .authorize(self.client.post(self.object_url(path)))
            .header("Content-Type", "application/octet-stream")
            .header("x-upsert", "false")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::storage_error("upload", path, response).await);
        }
        Ok(())
    }
}
