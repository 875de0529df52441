//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use docqa_rs::config::Config;
use docqa_rs::error::{DocQaError, Result};
use docqa_rs::{DocumentAssistant, GenerationResponse, TextExtractor, TextGenerator};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build a PDF with one text line per page
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Extractor returning fixed text, keyed by payload
#[derive(Default)]
pub struct StubExtractor {
    texts: HashMap<Vec<u8>, String>,
}

impl StubExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extraction of `payload` yields `text`
    pub fn with(mut self, payload: &[u8], text: &str) -> Self {
        self.texts.insert(payload.to_vec(), text.to_string());
        self
    }
}

impl TextExtractor for StubExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        self.texts
            .get(bytes)
            .cloned()
            .ok_or_else(|| DocQaError::Extraction("not a PDF".to_string()))
    }
}

/// Generator that records prompts and answers with a fixed prefix
#[derive(Default)]
pub struct EchoGenerator {
    pub prompts: Mutex<Vec<String>>,
}

impl EchoGenerator {
    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(GenerationResponse::new(format!("echo: {} chars", prompt.chars().count())))
    }

    fn describe(&self) -> String {
        "echo".to_string()
    }
}

/// Generator that always fails, counting attempts
#[derive(Default)]
pub struct FailingGenerator {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<GenerationResponse> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DocQaError::Generation("401 Unauthorized: API key not valid".to_string()))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// Assistant over a stub extractor with the given client
pub fn assistant(
    config: &Config,
    extractor: StubExtractor,
    client: Option<Arc<dyn TextGenerator>>,
) -> DocumentAssistant {
    DocumentAssistant::with_components(config, Arc::new(extractor), client).unwrap()
}
