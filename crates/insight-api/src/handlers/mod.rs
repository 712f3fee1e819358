//! Route handlers, grouped by surface.

pub mod auth;
pub mod documents;
pub mod extraction;
pub mod pages;
pub mod upload;
