//! API layer for docqa-rs
//!
//! This module provides the service object and the higher-level helpers built on it:
//! context selection, answer generation and chat sessions.

pub mod assistant;
pub mod chat;
pub mod context;
pub mod generator;

// Re-export main API types
pub use assistant::{Answer, DocumentAssistant, Explanation, HealthStatus, UploadReport};
pub use chat::{ChatCommand, chat_with_documents, load_documents, parse_command, quick_ask, quick_explain};
pub use context::ContextSelector;
pub use generator::{AnswerGenerator, PromptKind};
