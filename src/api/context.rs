//! Context selection
//!
//! Prompt context is assembled by truncation, not by relevance: either a prefix of one
//! document or the prefixes of every document joined in upload order.

use crate::config::ContextConfig;
use crate::error::Result;
use crate::storage::DocumentStore;

#[derive(Debug, Clone, Default)]
pub struct ContextSelector {
    config: ContextConfig,
}

impl ContextSelector {
    pub fn new(config: ContextConfig) -> Self {
        Self { config }
    }

    /// Select up to `per_doc_limit` characters per document.
    ///
    /// With `doc_id` only that document is used and an unknown id is an error. Without
    /// it every document contributes, joined by the configured separator. An empty store
    /// gives an empty string.
    pub fn select(&self, store: &DocumentStore, doc_id: Option<&str>, per_doc_limit: usize) -> Result<String> {
        match doc_id {
            Some(id) => Ok(store.require(id)?.prefix(per_doc_limit).to_string()),
            None => Ok(store
                .iter()
                .map(|document| document.prefix(per_doc_limit))
                .collect::<Vec<_>>()
                .join(self.config.separator.as_str())),
        }
    }

    /// Context for a question, about one document or all of them
    pub fn for_question(&self, store: &DocumentStore, doc_id: Option<&str>) -> Result<String> {
        match doc_id {
            Some(_) => self.select(store, doc_id, self.config.question_limit),
            None => self.select(store, None, self.config.question_all_limit),
        }
    }

    /// Context for a topic explanation, always across all documents
    pub fn for_topic(&self, store: &DocumentStore) -> Result<String> {
        self.select(store, None, self.config.topic_limit)
    }
}
