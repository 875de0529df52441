//! High-level chat API
//!
//! This module provides convenient functions for one-off questions and interactive chat
//! sessions over a set of PDF files on disk.

use crate::api::assistant::{Answer, DocumentAssistant, Explanation};
use crate::config::Config;
use crate::error::{DocQaError, Result};
use crate::utils::preview;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Upload PDF files from disk into an assistant, returning how many were stored
pub async fn load_documents<P: AsRef<Path>>(assistant: &DocumentAssistant, paths: &[P]) -> Result<usize> {
    let mut loaded = 0;

    for path in paths {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| DocQaError::Validation(format!("Invalid file name: {}", path.display())))?;

        let report = assistant.upload(filename, &bytes).await?;
        log::info!("{}", report.message());
        loaded += 1;
    }

    Ok(loaded)
}

/// Quick one-off question
///
/// Loads the given PDFs and asks a single question across all of them.
///
/// # Examples
/// ```no_run
/// use docqa_rs::{Config, quick_ask};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let answer = quick_ask(&config, &["lecture.pdf"], "What is entropy?").await?;
///     println!("{}", answer.answer);
///     Ok(())
/// }
/// ```
pub async fn quick_ask<P: AsRef<Path>>(config: &Config, pdfs: &[P], question: &str) -> Result<Answer> {
    let assistant = DocumentAssistant::new(config)?;
    load_documents(&assistant, pdfs).await?;
    assistant.ask(question, None).await
}

/// Quick one-off topic explanation over the given PDFs
pub async fn quick_explain<P: AsRef<Path>>(config: &Config, pdfs: &[P], topic: &str) -> Result<Explanation> {
    let assistant = DocumentAssistant::new(config)?;
    load_documents(&assistant, pdfs).await?;
    assistant.explain(topic).await
}

/// One line typed into the chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand<'a> {
    Quit,
    Help,
    Docs,
    All,
    Use(&'a str),
    Explain(&'a str),
    Ask(&'a str),
}

/// Interpret a trimmed chat line.
///
/// Bare commands must be the whole line. `use <doc_id>` takes a single token and
/// `explain <topic>` anything not ending in `?`. Everything else is a question.
pub fn parse_command(input: &str) -> ChatCommand<'_> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "quit" | "exit" | "q" => return ChatCommand::Quit,
        "help" => return ChatCommand::Help,
        "docs" => return ChatCommand::Docs,
        "all" => return ChatCommand::All,
        _ => {}
    }

    if let Some((command, rest)) = input.split_once(char::is_whitespace) {
        let argument = rest.trim();
        match command.to_lowercase().as_str() {
            // Document ids are a single token; "use of ..." is a question
            "use" if !argument.contains(char::is_whitespace) => return ChatCommand::Use(argument),
            "explain" if !argument.ends_with('?') => return ChatCommand::Explain(argument),
            _ => {}
        }
    }

    ChatCommand::Ask(input)
}

/// Interactive chat session
///
/// Every line is a question unless it is one of the commands listed by `help`.
/// `use <doc_id>` restricts questions to one document, `all` lifts the restriction.
pub async fn chat_with_documents(config: &Config, pdfs: &[PathBuf]) -> Result<()> {
    let assistant = DocumentAssistant::new(config)?;
    let loaded = load_documents(&assistant, pdfs).await?;

    println!("💬 Interactive Chat Mode");
    println!("   Type 'quit' or 'exit' to end the session");
    println!("   Type 'help' for more commands");

    println!("\nDocuments loaded: {}", loaded);
    match assistant.generator().client() {
        Ok(client) => println!("LLM: {}", client.describe()),
        Err(e) => println!("LLM: not available ({})", e),
    }
    println!("{}", "-".repeat(50));

    let mut focus: Option<String> = None;

    loop {
        match &focus {
            Some(doc_id) => print!("\nYou [{}]: ", doc_id),
            None => print!("\nYou: "),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match parse_command(input) {
            ChatCommand::Quit => {
                println!("Goodbye!");
                break;
            }
            ChatCommand::Help => {
                println!("\nCommands:");
                println!("  docs              - List loaded documents");
                println!("  use <doc_id>      - Ask about one document only");
                println!("  all               - Ask about all documents");
                println!("  explain <topic>   - Explain a topic from the documents");
                println!("  help              - Show this help");
                println!("  exit/quit         - End session");
            }
            ChatCommand::Docs => {
                for summary in assistant.list().await {
                    println!("  {} ({}, {} chunks)", summary.doc_id, summary.filename, summary.chunk_count);
                }
            }
            ChatCommand::Use(doc_id) => match assistant.document(doc_id).await {
                Ok(document) => {
                    println!("Questions now go to '{}': {}", document.id, preview(&document.full_text, 80));
                    focus = Some(document.id);
                }
                Err(e) => println!("❌ {}", e),
            },
            ChatCommand::All => {
                focus = None;
                println!("Questions now go to all documents.");
            }
            ChatCommand::Explain(topic) => {
                let start_time = std::time::Instant::now();
                match assistant.explain(topic).await {
                    Ok(explanation) => {
                        println!("\nAssistant: {}", explanation.explanation);
                        println!("[{:.1}s]", start_time.elapsed().as_secs_f64());
                    }
                    Err(e) => println!("❌ {}", e),
                }
            }
            ChatCommand::Ask(question) => {
                let start_time = std::time::Instant::now();
                match assistant.ask(question, focus.as_deref()).await {
                    Ok(answer) => {
                        println!("\nAssistant: {}", answer.answer);
                        println!("[{:.1}s]", start_time.elapsed().as_secs_f64());
                    }
                    Err(e) => println!("❌ {}", e),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_commands() {
        assert_eq!(parse_command("quit"), ChatCommand::Quit);
        assert_eq!(parse_command("  EXIT "), ChatCommand::Quit);
        assert_eq!(parse_command("q"), ChatCommand::Quit);
        assert_eq!(parse_command("help"), ChatCommand::Help);
        assert_eq!(parse_command("docs"), ChatCommand::Docs);
        assert_eq!(parse_command("All"), ChatCommand::All);
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(parse_command("use lecture-3"), ChatCommand::Use("lecture-3"));
        assert_eq!(parse_command("explain entropy"), ChatCommand::Explain("entropy"));
        assert_eq!(
            parse_command("explain the second law"),
            ChatCommand::Explain("the second law")
        );
    }

    #[test]
    fn test_questions_starting_with_command_words() {
        for question in [
            "Help me understand entropy",
            "All systems tend to what?",
            "Use of entropy in physics?",
            "Docs mention which authors?",
            "Quit smoking benefits?",
            "exit velocity of Earth",
            "Explain why ice floats?",
            "use",
            "explain",
        ] {
            assert_eq!(parse_command(question), ChatCommand::Ask(question));
        }
    }
}
