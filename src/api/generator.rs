//! Prompt rendering and answer generation

use crate::error::{DocQaError, Result};
use crate::llm::TextGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const CONTENT_PLACEHOLDER: &str = "{content}";

const QUESTION_TEMPLATE: &str = "Based on the following academic content:

{content}

Answer this question comprehensively:
{question}

Provide a clear, educational explanation suitable for students.";

const TOPIC_TEMPLATE: &str = "Based on the following academic materials:

{content}

Provide a comprehensive explanation of: {topic}

Include:
1. Definition and core concepts
2. Key points and examples (from the materials if available)
3. Common misconceptions
4. Practical applications

Format the response clearly with sections.";

/// The two supported prompt templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Answer a question about the documents
    Question,
    /// Explain a topic using the documents
    Topic,
}

impl PromptKind {
    pub fn template(self) -> &'static str {
        match self {
            PromptKind::Question => QUESTION_TEMPLATE,
            PromptKind::Topic => TOPIC_TEMPLATE,
        }
    }

    fn query_placeholder(self) -> &'static str {
        match self {
            PromptKind::Question => "{question}",
            PromptKind::Topic => "{topic}",
        }
    }

    /// Substitute context and query in one pass; placeholder-like text inside either
    /// value is left untouched.
    pub fn render(self, context: &str, query: &str) -> String {
        self.template()
            .split(CONTENT_PLACEHOLDER)
            .map(|piece| piece.replace(self.query_placeholder(), query))
            .collect::<Vec<_>>()
            .join(context)
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::Question => write!(f, "question"),
            PromptKind::Topic => write!(f, "topic"),
        }
    }
}

/// Renders prompts and sends them to the text-generation client
#[derive(Clone)]
pub struct AnswerGenerator {
    client: Option<Arc<dyn TextGenerator>>,
    credential_var: &'static str,
}

impl AnswerGenerator {
    /// `credential_var` names the environment variable reported when `client` is missing
    pub fn new(client: Option<Arc<dyn TextGenerator>>, credential_var: &'static str) -> Self {
        Self { client, credential_var }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// The client, or `NotInitialized` without touching the network
    pub fn client(&self) -> Result<&Arc<dyn TextGenerator>> {
        self.client.as_ref().ok_or_else(|| {
            DocQaError::NotInitialized(format!(
                "Please set {} environment variable.",
                self.credential_var
            ))
        })
    }

    /// Render the template for `kind` and return the model's answer text
    pub async fn generate(&self, kind: PromptKind, context: &str, query: &str) -> Result<String> {
        let client = self.client()?;
        let prompt = kind.render(context, query);

        log::info!(
            "Generating {} answer with {} ({} context chars)",
            kind,
            client.describe(),
            context.chars().count()
        );

        match client.generate(&prompt).await {
            Ok(response) => Ok(response.text),
            Err(DocQaError::Generation(message)) => Err(DocQaError::Generation(message)),
            Err(other) => Err(DocQaError::Generation(other.to_string())),
        }
    }
}

impl fmt::Debug for AnswerGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerGenerator")
            .field("client", &self.client.as_ref().map(|c| c.describe()))
            .finish()
    }
}
