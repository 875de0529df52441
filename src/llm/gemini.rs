//! Google Gemini `generateContent` client

use async_trait::async_trait;
use serde_json::json;

use crate::config::LlmConfig;
use crate::error::{DocQaError, Result};
use crate::llm::{GenerationResponse, TextGenerator, http_client};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl GeminiGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| DocQaError::NotInitialized(format!("{} is not set", config.api_key_var())))?;

        Ok(Self {
            client: http_client(config)?,
            api_key,
            model: config.model_name().to_string(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            temperature: config.temperature,
        })
    }

    /// Build the request body for a single-turn prompt
    fn build_request_body(prompt: &str, temperature: f32) -> serde_json::Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": {
                "temperature": temperature,
            },
        })
    }

    /// Join the text parts of the first candidate, or fall back to the raw JSON
    fn normalize_response(resp: serde_json::Value) -> GenerationResponse {
        let model = resp["modelVersion"].as_str().map(str::to_string);

        let parts: Vec<&str> = resp["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|part| part["text"].as_str()).collect())
            .unwrap_or_default();

        let text = if parts.is_empty() {
            log::warn!("Gemini response carried no text parts, returning raw response");
            resp.to_string()
        } else {
            parts.concat()
        };

        GenerationResponse { text, model }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = Self::build_request_body(prompt, self.temperature);

        log::debug!("Gemini request to model={} ({} prompt chars)", self.model, prompt.chars().count());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocQaError::Generation(format!(
                "API error {}: {}",
                status.as_u16(),
                body
            )));
        }

        let resp: serde_json::Value = response.json().await?;
        Ok(Self::normalize_response(resp))
    }

    fn describe(&self) -> String {
        format!("{} (Gemini)", self.model)
    }
}
