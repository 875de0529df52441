//! End-to-end behaviour of DocumentAssistant with stubbed extraction and generation

mod common;

use common::{EchoGenerator, FailingGenerator, StubExtractor, assistant};
use docqa_rs::config::{ChunkingConfig, Config, DuplicatePolicy};
use docqa_rs::{DocQaError, DocumentAssistant, TextGenerator};
use std::sync::Arc;
use std::sync::atomic::Ordering;

const SECTIONS: &str = "Section 1. Hello world. Section 2. Bye.";

fn small_chunks() -> Config {
    let mut config = Config::default();
    config.chunking = ChunkingConfig {
        chunk_size: 20,
        overlap: 5,
    };
    config
}

fn with_echo(config: &Config, extractor: StubExtractor) -> (DocumentAssistant, Arc<EchoGenerator>) {
    let echo = Arc::new(EchoGenerator::default());
    let client: Arc<dyn TextGenerator> = echo.clone();
    (assistant(config, extractor, Some(client)), echo)
}

#[tokio::test]
async fn test_upload_stores_exact_chunks() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = StubExtractor::new().with(b"%PDF-sections", SECTIONS);
    let (assistant, _) = with_echo(&small_chunks(), extractor);

    let report = assistant.upload("sections.pdf", b"%PDF-sections").await?;
    assert_eq!(report.doc_id, "sections");
    assert_eq!(report.filename, "sections.pdf");
    assert_eq!(report.chunk_count, 3);
    assert!(!report.replaced);
    assert_eq!(report.message(), "Document 'sections.pdf' uploaded successfully with 3 chunks");

    let chunks = assistant.chunks("sections").await?;
    assert_eq!(chunks, vec!["Section 1. ", "n 1. Hello world. ", "rld. Section 2. Bye."]);

    let document = assistant.document("sections").await?;
    assert_eq!(document.full_text, SECTIONS);
    assert_eq!(document.chunk_count, document.chunks.len());

    Ok(())
}

#[tokio::test]
async fn test_list_follows_upload_order() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = StubExtractor::new()
        .with(b"b", "Bravo text")
        .with(b"a", "Alpha text")
        .with(b"c", "Charlie text");
    let (assistant, _) = with_echo(&Config::default(), extractor);

    assistant.upload("bravo.pdf", b"b").await?;
    assistant.upload("alpha.PDF", b"a").await?;
    assistant.upload("uploads/charlie.pdf", b"c").await?;

    let ids: Vec<String> = assistant.list().await.into_iter().map(|d| d.doc_id).collect();
    assert_eq!(ids, vec!["bravo", "alpha", "charlie"]);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_upload_is_rejected_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = StubExtractor::new().with(b"one", "First version").with(b"two", "Second version");
    let (assistant, _) = with_echo(&Config::default(), extractor);

    assistant.upload("notes.pdf", b"one").await?;
    let err = assistant.upload("notes.pdf", b"two").await.unwrap_err();
    assert!(matches!(err, DocQaError::Conflict(ref id) if id == "notes"));

    let document = assistant.document("notes").await?;
    assert_eq!(document.full_text, "First version");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_upload_replaces_when_configured() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config.store.duplicates = DuplicatePolicy::Replace;

    let extractor = StubExtractor::new().with(b"one", "First version").with(b"two", "Second version");
    let (assistant, _) = with_echo(&config, extractor);

    assistant.upload("notes.pdf", b"one").await?;
    let report = assistant.upload("notes.pdf", b"two").await?;
    assert!(report.replaced);

    assert_eq!(assistant.list().await.len(), 1);
    assert_eq!(assistant.document("notes").await?.full_text, "Second version");

    Ok(())
}

#[tokio::test]
async fn test_upload_validation() {
    let (assistant, _) = with_echo(&Config::default(), StubExtractor::new());

    let err = assistant.upload("", b"%PDF").await.unwrap_err();
    assert_eq!(err.to_string(), "No file selected");

    let err = assistant.upload("notes.txt", b"plain text").await.unwrap_err();
    assert_eq!(err.to_string(), "Only PDF files are supported");

    let err = assistant.upload("empty.pdf", b"").await.unwrap_err();
    assert!(matches!(err, DocQaError::Validation(_)));

    // The stub knows no payloads, so this is an unreadable PDF
    let err = assistant.upload("broken.pdf", b"garbage").await.unwrap_err();
    assert!(matches!(err, DocQaError::Extraction(_)));

    assert!(assistant.list().await.is_empty());
}

#[tokio::test]
async fn test_delete_and_unknown_documents() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = StubExtractor::new().with(b"x", "Some text");
    let (assistant, _) = with_echo(&Config::default(), extractor);

    assistant.upload("lecture.pdf", b"x").await?;
    let removed = assistant.delete("lecture").await?;
    assert_eq!(removed.doc_id, "lecture");
    assert!(assistant.list().await.is_empty());

    assert!(matches!(assistant.delete("lecture").await, Err(DocQaError::DocumentNotFound(_))));
    assert!(matches!(assistant.chunks("missing").await, Err(DocQaError::DocumentNotFound(_))));
    assert!(matches!(
        assistant.ask("What?", Some("missing")).await,
        Err(DocQaError::DocumentNotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_ask_without_client_is_not_initialized() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = StubExtractor::new().with(b"x", "Some text");
    let assistant = assistant(&Config::default(), extractor, None);
    assistant.upload("lecture.pdf", b"x").await?;

    assert!(!assistant.health().generator_initialized);

    let err = assistant.ask("What is this?", Some("lecture")).await.unwrap_err();
    assert!(matches!(err, DocQaError::NotInitialized(_)));
    assert!(err.to_string().contains("GEMINI_API_KEY"));

    let err = assistant.explain("entropy").await.unwrap_err();
    assert!(matches!(err, DocQaError::NotInitialized(_)));

    Ok(())
}

#[tokio::test]
async fn test_default_config_without_key_still_serves_documents() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config.llm.api_key = None;

    let assistant = DocumentAssistant::new(&config)?;
    assert!(!assistant.health().generator_initialized);
    assert!(assistant.list().await.is_empty());
    assert!(matches!(assistant.ask("Hi?", None).await, Err(DocQaError::NotInitialized(_))));

    Ok(())
}

#[tokio::test]
async fn test_ask_requires_question_and_documents() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = StubExtractor::new().with(b"x", "Some text");
    let (assistant, echo) = with_echo(&Config::default(), extractor);

    let err = assistant.ask("   ", None).await.unwrap_err();
    assert_eq!(err.to_string(), "Question is required");

    let err = assistant.ask("What is this?", None).await.unwrap_err();
    assert!(matches!(err, DocQaError::Validation(_)));
    assert_eq!(echo.calls(), 0);

    assistant.upload("lecture.pdf", b"x").await?;
    let answer = assistant.ask("What is this?", None).await?;
    assert_eq!(answer.question, "What is this?");
    assert_eq!(answer.doc_id, None);
    assert_eq!(echo.calls(), 1);

    Ok(())
}

#[tokio::test]
async fn test_ask_sends_document_context_in_prompt() -> Result<(), Box<dyn std::error::Error>> {
    let extractor = StubExtractor::new()
        .with(b"a", &"A".repeat(600))
        .with(b"b", &"B".repeat(600));
    let (assistant, echo) = with_echo(&Config::default(), extractor);

    assistant.upload("alpha.pdf", b"a").await?;
    assistant.upload("beta.pdf", b"b").await?;

    let answer = assistant.ask("What letters appear?", Some("beta")).await?;
    assert_eq!(answer.doc_id.as_deref(), Some("beta"));

    let prompt = echo.last_prompt();
    assert!(prompt.contains(&"B".repeat(600)));
    assert!(!prompt.contains(&"A".repeat(600)));
    assert!(prompt.contains("What letters appear?"));
    assert_eq!(answer.answer, format!("echo: {} chars", prompt.chars().count()));

    assistant.ask("What letters appear?", None).await?;
    let prompt = echo.last_prompt();
    let context = format!("{}\n\n{}", "A".repeat(600), "B".repeat(600));
    assert!(prompt.contains(&context));

    Ok(())
}

#[tokio::test]
async fn test_explain_works_with_empty_store() -> Result<(), Box<dyn std::error::Error>> {
    let (assistant, echo) = with_echo(&Config::default(), StubExtractor::new());

    let explanation = assistant.explain("  photosynthesis ").await?;
    assert_eq!(explanation.topic, "photosynthesis");
    assert!(echo.last_prompt().contains("photosynthesis"));

    let err = assistant.explain("").await.unwrap_err();
    assert_eq!(err.to_string(), "Topic is required");

    Ok(())
}

#[tokio::test]
async fn test_generation_failure_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let failing = Arc::new(FailingGenerator::default());
    let client: Arc<dyn TextGenerator> = failing.clone();
    let extractor = StubExtractor::new().with(b"x", "Some text");
    let assistant = assistant(&Config::default(), extractor, Some(client));

    assistant.upload("lecture.pdf", b"x").await?;
    let err = assistant.ask("What?", Some("lecture")).await.unwrap_err();
    assert!(matches!(err, DocQaError::Generation(_)));
    assert!(err.to_string().contains("API key not valid"));
    assert_eq!(failing.attempts.load(Ordering::SeqCst), 1);

    // The store is untouched by a failed generation
    assert_eq!(assistant.list().await.len(), 1);

    Ok(())
}
