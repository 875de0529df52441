//! DocumentAssistant - main service API
//!
//! Owns the document store together with the extractor, chunker, context selector and
//! answer generator. The HTTP server and the CLI both go through this type.

use crate::api::context::ContextSelector;
use crate::api::generator::{AnswerGenerator, PromptKind};
use crate::config::Config;
use crate::error::{DocQaError, Result};
use crate::llm::{self, TextGenerator};
use crate::storage::{Document, DocumentStore, DocumentSummary, DuplicatePolicy};
use crate::text::{ChunkingStrategy, PdfProcessor, TextChunker, TextExtractor};
use crate::utils::{base_filename, derive_doc_id, format_file_size, is_pdf_file};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReport {
    pub doc_id: String,
    pub filename: String,
    pub chunk_count: usize,
    /// Whether an existing document with the same id was overwritten
    pub replaced: bool,
}

impl UploadReport {
    pub fn message(&self) -> String {
        format!(
            "Document '{}' uploaded successfully with {} chunks",
            self.filename, self.chunk_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub doc_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub topic: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub generator_initialized: bool,
}

/// Main document question-answering service
pub struct DocumentAssistant {
    store: RwLock<DocumentStore>,
    extractor: Arc<dyn TextExtractor>,
    chunker: TextChunker,
    selector: ContextSelector,
    generator: AnswerGenerator,
}

impl DocumentAssistant {
    /// Create an assistant with the PDF extractor and the configured LLM backend
    pub fn new(config: &Config) -> Result<Self> {
        let extractor = Arc::new(PdfProcessor::new(config.extraction.clone()));
        let client = llm::build_generator(&config.llm)?;
        Self::with_components(config, extractor, client)
    }

    /// Create an assistant from explicit collaborators
    pub fn with_components(
        config: &Config,
        extractor: Arc<dyn TextExtractor>,
        client: Option<Arc<dyn TextGenerator>>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            store: RwLock::new(DocumentStore::new(config.store.duplicates)),
            extractor,
            chunker: TextChunker::new(config.chunking.clone(), ChunkingStrategy::Recursive)?,
            selector: ContextSelector::new(config.context.clone()),
            generator: AnswerGenerator::new(client, config.llm.api_key_var()),
        })
    }

    /// Extract, chunk and store an uploaded PDF
    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> Result<UploadReport> {
        let filename = base_filename(filename);
        if filename.is_empty() {
            return Err(DocQaError::Validation("No file selected".to_string()));
        }
        if !is_pdf_file(filename) {
            return Err(DocQaError::Validation("Only PDF files are supported".to_string()));
        }

        let doc_id = derive_doc_id(filename)?;

        // Fail before extraction when the upload would be refused anyway
        {
            let store = self.store.read().await;
            if store.policy() == DuplicatePolicy::Reject && store.contains(&doc_id) {
                return Err(DocQaError::Conflict(doc_id));
            }
        }

        if bytes.is_empty() {
            return Err(DocQaError::Validation("Uploaded file is empty".to_string()));
        }

        log::info!("Processing upload '{}' ({})", filename, format_file_size(bytes.len() as u64));

        let extractor = Arc::clone(&self.extractor);
        let payload = bytes.to_vec();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&payload))
            .await
            .map_err(|e| DocQaError::Extraction(format!("extraction task failed: {}", e)))??;

        let chunks = self.chunker.chunk_text(&text);
        let document = Document::new(doc_id.clone(), filename, text, chunks);
        let chunk_count = document.chunk_count;

        // Single write: readers see either no document or the complete one
        let replaced = self.store.write().await.insert(document)?.is_some();

        log::info!("Stored document '{}' with {} chunks", doc_id, chunk_count);

        Ok(UploadReport {
            doc_id,
            filename: filename.to_string(),
            chunk_count,
            replaced,
        })
    }

    /// Stored documents in upload order
    pub async fn list(&self) -> Vec<DocumentSummary> {
        self.store.read().await.summaries()
    }

    /// Chunks of one document
    pub async fn chunks(&self, doc_id: &str) -> Result<Vec<String>> {
        Ok(self.store.read().await.require(doc_id)?.chunks.clone())
    }

    /// Full copy of one document
    pub async fn document(&self, doc_id: &str) -> Result<Document> {
        Ok(self.store.read().await.require(doc_id)?.clone())
    }

    /// Remove a document
    pub async fn delete(&self, doc_id: &str) -> Result<DocumentSummary> {
        let removed = self.store.write().await.remove(doc_id)?;
        log::info!("Deleted document '{}'", removed.id);
        Ok(removed.summary())
    }

    /// Answer a question about one document, or about all of them when `doc_id` is `None`
    pub async fn ask(&self, question: &str, doc_id: Option<&str>) -> Result<Answer> {
        self.generator.client()?;

        let question = question.trim();
        if question.is_empty() {
            return Err(DocQaError::Validation("Question is required".to_string()));
        }

        let doc_id = doc_id.map(str::trim).filter(|id| !id.is_empty());

        let context = {
            let store = self.store.read().await;
            self.selector.for_question(&store, doc_id)?
        };

        if context.trim().is_empty() {
            return Err(DocQaError::Validation(
                "No documents uploaded. Please upload a PDF first.".to_string(),
            ));
        }

        let answer = self
            .generator
            .generate(PromptKind::Question, &context, question)
            .await?;

        Ok(Answer {
            question: question.to_string(),
            answer,
            doc_id: doc_id.map(str::to_string),
        })
    }

    /// Explain a topic using every stored document. Works with an empty store too.
    pub async fn explain(&self, topic: &str) -> Result<Explanation> {
        self.generator.client()?;

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DocQaError::Validation("Topic is required".to_string()));
        }

        let context = {
            let store = self.store.read().await;
            self.selector.for_topic(&store)?
        };

        let explanation = self
            .generator
            .generate(PromptKind::Topic, &context, topic)
            .await?;

        Ok(Explanation {
            topic: topic.to_string(),
            explanation,
        })
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            generator_initialized: self.generator.is_initialized(),
        }
    }

    pub fn generator(&self) -> &AnswerGenerator {
        &self.generator
    }
}
