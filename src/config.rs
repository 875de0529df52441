//! Configuration for docqa-rs
//!
//! All settings have defaults matching the behaviour of the hosted service. They can be
//! loaded from a JSON file, overridden from the process environment (including a `.env`
//! file) and finally from command-line flags in `main.rs`.

use crate::error::{DocQaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text chunking settings
    pub chunking: ChunkingConfig,

    /// Context selection limits
    pub context: ContextConfig,

    /// PDF extraction settings
    pub extraction: ExtractionConfig,

    /// Text-generation client settings
    pub llm: LlmConfig,

    /// Document store behaviour
    pub store: StoreConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// Chunk sizing, counted in characters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
        }
    }
}

impl ChunkingConfig {
    /// Check `chunk_size > 0` and `overlap < chunk_size`
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DocQaError::Config("chunk_size must be greater than 0".to_string()));
        }
        if self.overlap >= self.chunk_size {
            return Err(DocQaError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Per-document character limits used when assembling prompt context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContextConfig {
    /// Limit for a question about one specific document
    pub question_limit: usize,

    /// Per-document limit for a question across all documents
    pub question_all_limit: usize,

    /// Per-document limit for a topic explanation
    pub topic_limit: usize,

    /// Text placed between the prefixes of different documents
    pub separator: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            question_limit: 5000,
            question_all_limit: 2000,
            topic_limit: 3000,
            separator: "\n\n".to_string(),
        }
    }
}

/// PDF extraction settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Inserted between the text of consecutive pages. Empty joins pages directly.
    pub page_separator: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            page_separator: "\n".to_string(),
        }
    }
}

/// Supported text-generation backends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini `generateContent` REST API
    Gemini,
    /// OpenAI or any OpenAI-compatible server (Ollama, vLLM, ...)
    OpenAi,
}

impl FromStr for LlmProvider {
    type Err = DocQaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" | "open-ai" | "ollama" => Ok(LlmProvider::OpenAi),
            other => Err(DocQaError::Config(format!("Unknown LLM provider: {}", other))),
        }
    }
}

/// Text-generation client settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Which backend to talk to
    pub provider: LlmProvider,

    /// API credential. Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name, provider default when unset
    pub model: Option<String>,

    /// Base URL for OpenAI-compatible servers
    pub base_url: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds, none for no limit
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: None,
            model: None,
            base_url: None,
            temperature: 0.7,
            timeout_secs: Some(120),
        }
    }
}

impl LlmConfig {
    /// Configured model or the provider's default
    pub fn model_name(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model,
            (None, LlmProvider::Gemini) => "gemini-2.5-flash",
            (None, LlmProvider::OpenAi) => "gpt-4o-mini",
        }
    }

    /// Environment variable holding the credential for the selected provider
    pub fn api_key_var(&self) -> &'static str {
        match self.provider {
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// What happens when an upload derives an id that is already stored
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Refuse the upload with a conflict error
    #[default]
    Reject,
    /// Overwrite the stored document (last write wins)
    Replace,
}

impl FromStr for DuplicatePolicy {
    type Err = DocQaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "replace" | "overwrite" => Ok(DuplicatePolicy::Replace),
            other => Err(DocQaError::Config(format!("Unknown duplicate policy: {}", other))),
        }
    }
}

/// Document store behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub duplicates: DuplicatePolicy,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load a JSON configuration file. Missing sections fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment and an optional `.env` file
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Apply environment overrides on top of the current values
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(provider) = var("DOCQA_PROVIDER") {
            self.llm.provider = provider.parse()?;
        }
        let key_var = self.llm.api_key_var();
        if let Some(key) = var("DOCQA_API_KEY").or_else(|| var(key_var)) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = var("DOCQA_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(base_url) = var("DOCQA_BASE_URL") {
            self.llm.base_url = Some(base_url);
        }
        if let Some(host) = var("DOCQA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("DOCQA_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| DocQaError::Config(format!("Invalid DOCQA_PORT: {}", port)))?;
        }
        if let Some(policy) = var("DOCQA_DUPLICATES") {
            self.store.duplicates = policy.parse()?;
        }

        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;

        let context = &self.context;
        if context.question_limit == 0 || context.question_all_limit == 0 || context.topic_limit == 0 {
            return Err(DocQaError::Config("context limits must be greater than 0".to_string()));
        }

        Ok(())
    }
}
