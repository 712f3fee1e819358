//! Request-independent operations and outbound clients.

pub mod auth_client;
pub mod document_text;
pub mod extraction;
pub mod object_store;
pub mod upload;

pub use auth_client::{GoTrueClient, GoTrueConfig};
pub use object_store::RemoteBucketBackend;
