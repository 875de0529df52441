//! Error types for docqa-rs
//!
//! Every failure a caller can observe maps onto one variant here. The HTTP layer
//! turns these into `{ "success": false, "error": ... }` responses, the CLI prints them.

use thiserror::Error;

/// Main error type for docqa operations
#[derive(Error, Debug)]
pub enum DocQaError {
    /// Missing or invalid input (no file, wrong extension, empty question, ...)
    #[error("{0}")]
    Validation(String),

    /// A document id that is not in the store
    #[error("Document '{0}' not found")]
    DocumentNotFound(String),

    /// A document id that is already taken
    #[error("Document '{0}' already exists")]
    Conflict(String),

    /// PDF parsing or text extraction errors
    #[error("Error reading PDF: {0}")]
    Extraction(String),

    /// No text-generation client, usually because the API key is missing
    #[error("API not initialized: {0}")]
    NotInitialized(String),

    /// Failure reported by the text-generation client
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for docqa operations
pub type Result<T> = std::result::Result<T, DocQaError>;

impl From<lopdf::Error> for DocQaError {
    fn from(err: lopdf::Error) -> Self {
        DocQaError::Extraction(err.to_string())
    }
}

impl From<reqwest::Error> for DocQaError {
    fn from(err: reqwest::Error) -> Self {
        DocQaError::Generation(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for DocQaError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        DocQaError::Generation(err.to_string())
    }
}
