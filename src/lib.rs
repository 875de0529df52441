//! # docqa-rs
//!
//! Ask questions about PDF documents. Uploaded PDFs are extracted and split into
//! overlapping chunks, kept in memory, and a truncated slice of their text is sent
//! along with the question to a hosted language model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docqa_rs::{Config, DocumentAssistant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY from the environment or a .env file
//!     let config = Config::from_env()?;
//!     let assistant = DocumentAssistant::new(&config)?;
//!
//!     let bytes = std::fs::read("lecture.pdf")?;
//!     let report = assistant.upload("lecture.pdf", &bytes).await?;
//!     println!("{}", report.message());
//!
//!     let answer = assistant.ask("What is entropy?", Some("lecture")).await?;
//!     println!("{}", answer.answer);
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod storage;
pub mod text;
pub mod utils;

// Re-export main API types
pub use api::{
    Answer, DocumentAssistant, Explanation, HealthStatus, PromptKind, UploadReport,
    chat_with_documents, quick_ask, quick_explain,
};
pub use config::Config;
pub use error::{DocQaError, Result};

// Re-export commonly used types
pub use llm::{GenerationResponse, TextGenerator};
pub use storage::{Document, DocumentStore, DocumentSummary};
pub use text::{TextChunker, TextExtractor};
