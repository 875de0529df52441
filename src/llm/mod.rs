//! Text-generation clients
//!
//! Each backend implements [`TextGenerator`] and normalizes whatever its API returns
//! into a [`GenerationResponse`] with a plain `text` field.

pub mod gemini;
pub mod openai;

pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;

use crate::config::{LlmConfig, LlmProvider};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Normalized model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Answer text, or the serialized raw response when the provider sent no text
    pub text: String,

    /// Model that produced the answer, when reported
    pub model: Option<String>,
}

impl GenerationResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }
}

/// A hosted or local text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the model's answer. Called once per request, never retried.
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse>;

    /// Human-readable backend description, e.g. `gemini-2.5-flash (Gemini)`
    fn describe(&self) -> String;
}

/// Build the configured client.
///
/// Returns `Ok(None)` when no credential is available; generation then stays disabled
/// while uploads and listings keep working.
pub fn build_generator(config: &LlmConfig) -> Result<Option<Arc<dyn TextGenerator>>> {
    match config.provider {
        LlmProvider::Gemini => {
            if config.api_key.is_none() {
                log::warn!("{} environment variable not set, generation disabled", config.api_key_var());
                return Ok(None);
            }
            let generator = GeminiGenerator::new(config)?;
            log::info!("Text generation initialized: {}", generator.describe());
            Ok(Some(Arc::new(generator)))
        }
        LlmProvider::OpenAi => {
            // Local OpenAI-compatible servers usually need no key
            if config.api_key.is_none() && config.base_url.is_none() {
                log::warn!(
                    "{} not set and no base URL configured, generation disabled",
                    config.api_key_var()
                );
                return Ok(None);
            }
            let generator = OpenAiGenerator::new(config)?;
            log::info!("Text generation initialized: {}", generator.describe());
            Ok(Some(Arc::new(generator)))
        }
    }
}

/// HTTP client shared by the adapters, honouring the configured timeout
pub(crate) fn http_client(config: &LlmConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
