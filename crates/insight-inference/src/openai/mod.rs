//! OpenAI-compatible extraction backend.
//!
//! Works with any chat-completions endpoint that honors
//! `response_format: {"type": "json_object"}`, including hosted AI
//! gateways, OpenRouter and vLLM.
//!
//! # Example
//!
//! ```rust,no_run
//! use insight_core::KnowledgeExtractor;
//! use insight_inference::openai::{OpenAIBackend, OpenAIConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::new(OpenAIConfig {
//!         base_url: "https://ai.gateway.example/v1".to_string(),
//!         api_key: Some("sk-...".to_string()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//!     let payload = backend.extract("txt", "Ada Lovelace wrote notes.").await.unwrap();
//!     println!("{}", payload.summary);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{
    OpenAIBackend, OpenAIConfig, DEFAULT_GEN_MODEL, DEFAULT_OPENAI_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::{to_insight_error, GatewayErrorCode};
pub use types::*;
