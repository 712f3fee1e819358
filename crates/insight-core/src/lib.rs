//! # insight-core
//!
//! Core types, traits, and abstractions for the insight knowledge
//! extraction service.
//!
//! This crate provides the foundational data structures and trait definitions
//! that other insight crates depend on.

pub mod defaults;
pub mod error;
pub mod file_types;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use file_types::{detect_content_type, document_file_type, extension_of, AcceptedFileType};
pub use models::*;
pub use traits::*;
