//! # insight-inference
//!
//! Knowledge extraction client for insight.
//!
//! This crate provides:
//! - The fixed extraction prompt
//! - An OpenAI-compatible chat-completions backend implementing
//!   [`insight_core::KnowledgeExtractor`]
//! - Gateway status classification (rate limit, payment required)
//! - Lenient parsing of the model's JSON answer

pub mod openai;
pub mod parse;
pub mod prompt;

pub use openai::{OpenAIBackend, OpenAIConfig};
pub use parse::parse_extraction;
pub use prompt::{extraction_user_message, EXTRACTION_SYSTEM_PROMPT};
