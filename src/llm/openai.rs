//! OpenAI-compatible chat completion client
//!
//! Works against api.openai.com or any server speaking the same protocol, e.g.
//! `http://localhost:11434/v1` for Ollama.

use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    CreateChatCompletionResponse,
};
use async_openai::{Client, config::OpenAIConfig};
use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::llm::{GenerationResponse, TextGenerator, http_client};

pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    base_url: Option<String>,
    temperature: f32,
}

impl OpenAiGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone().unwrap_or_default());
        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        let client = Client::with_config(openai_config).with_http_client(http_client(config)?);

        Ok(Self {
            client,
            model: config.model_name().to_string(),
            base_url: config.base_url.clone(),
            temperature: config.temperature,
        })
    }

    /// First choice's content, or the debug rendering of the whole response
    fn normalize_response(response: CreateChatCompletionResponse) -> GenerationResponse {
        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone());

        match text {
            Some(text) => GenerationResponse {
                text,
                model: Some(response.model),
            },
            None => {
                log::warn!("Chat response carried no content, returning raw response");
                GenerationResponse {
                    text: format!("{:?}", response),
                    model: Some(response.model),
                }
            }
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse> {
        let messages = vec![ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
            name: None,
        })];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .temperature(self.temperature)
            .build()?;

        log::debug!("Chat completion request to model={} ({} prompt chars)", self.model, prompt.chars().count());

        let response = self.client.chat().create(request).await?;
        Ok(Self::normalize_response(response))
    }

    fn describe(&self) -> String {
        match &self.base_url {
            Some(base_url) => format!("{} via {}", self.model, base_url),
            None => format!("{} (OpenAI)", self.model),
        }
    }
}
