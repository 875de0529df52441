//! Storage for docqa-rs
//!
//! Documents live in memory for the lifetime of the process. Nothing is persisted.

pub mod document_store;

// Re-export main types
pub use crate::config::DuplicatePolicy;
pub use document_store::{Document, DocumentStore, DocumentSummary};
