//! In-memory document store
//!
//! Maps a document id to its extracted text and chunks. Iteration follows upload order,
//! which is the order documents appear in combined prompt context.

use crate::config::DuplicatePolicy;
use crate::error::{DocQaError, Result};
use crate::utils::truncate_chars;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An uploaded document. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Id derived from the filename
    pub id: String,

    /// Original upload filename
    pub filename: String,

    /// Complete extracted text
    pub full_text: String,

    /// Overlapping chunks of `full_text`
    pub chunks: Vec<String>,

    /// Always `chunks.len()`
    pub chunk_count: usize,

    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, full_text: String, chunks: Vec<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            full_text,
            chunk_count: chunks.len(),
            chunks,
            uploaded_at: Utc::now(),
        }
    }

    /// First `limit` characters of the full text
    pub fn prefix(&self, limit: usize) -> &str {
        truncate_chars(&self.full_text, limit)
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            doc_id: self.id.clone(),
            filename: self.filename.clone(),
            chunk_count: self.chunk_count,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// Listing entry for a stored document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSummary {
    pub doc_id: String,
    pub filename: String,
    pub chunk_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

/// Process-lifetime mapping of document id to document
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: IndexMap<String, Document>,
    policy: DuplicatePolicy,
}

impl DocumentStore {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            documents: IndexMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Store a document, applying the duplicate policy.
    ///
    /// With [`DuplicatePolicy::Replace`] the previous document is returned and the new
    /// one keeps the old position in iteration order.
    pub fn insert(&mut self, document: Document) -> Result<Option<Document>> {
        if self.policy == DuplicatePolicy::Reject && self.documents.contains_key(&document.id) {
            return Err(DocQaError::Conflict(document.id));
        }

        let replaced = self.documents.insert(document.id.clone(), document);
        if let Some(previous) = &replaced {
            log::info!("Replaced document '{}' ({})", previous.id, previous.filename);
        }

        Ok(replaced)
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Like [`get`](Self::get) but an unknown id is an error
    pub fn require(&self, id: &str) -> Result<&Document> {
        self.get(id)
            .ok_or_else(|| DocQaError::DocumentNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Remove a document, keeping the order of the others
    pub fn remove(&mut self, id: &str) -> Result<Document> {
        self.documents
            .shift_remove(id)
            .ok_or_else(|| DocQaError::DocumentNotFound(id.to_string()))
    }

    /// Documents in upload order
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.iter().map(Document::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
