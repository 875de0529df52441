//! docqa-rs CLI application
//!
//! Command-line interface for the docqa-rs library.

use anyhow::Context;
use clap::{Parser, Subcommand};
use docqa_rs::config::{ChunkingConfig, LlmProvider};
use docqa_rs::text::{ChunkingStrategy, PdfProcessor, TextChunker};
use docqa_rs::utils::preview;
use docqa_rs::{Config, chat_with_documents, quick_ask, quick_explain, server};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docqa-rs")]
#[command(about = "Ask a language model questions about your PDF documents")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// LLM provider: gemini or openai
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Model name
    #[arg(long, global = true)]
    model: Option<String>,

    /// Base URL for OpenAI-compatible servers
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the chunks of a PDF
    Chunk {
        /// PDF file
        input: PathBuf,

        /// Chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Overlap between chunks
        #[arg(long)]
        overlap: Option<usize>,

        /// Print chunks as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Ask one question about one or more PDFs
    Ask {
        /// PDF files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// The question
        #[arg(short, long)]
        question: String,
    },

    /// Explain a topic using one or more PDFs
    Explain {
        /// PDF files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// The topic
        #[arg(short, long)]
        topic: String,
    },

    /// Interactive chat with your documents
    Chat {
        /// PDF files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(&config).await.context("server failed")?;
        }
        Commands::Chunk {
            input,
            chunk_size,
            overlap,
            json,
        } => {
            let chunking = ChunkingConfig {
                chunk_size: chunk_size.unwrap_or(config.chunking.chunk_size),
                overlap: overlap.unwrap_or(config.chunking.overlap),
            };
            chunk_command(&config, input, chunking, json)?;
        }
        Commands::Ask { inputs, question } => {
            let answer = quick_ask(&config, &inputs, &question)
                .await
                .context("could not answer the question")?;
            println!("{}", answer.answer);
        }
        Commands::Explain { inputs, topic } => {
            let explanation = quick_explain(&config, &inputs, &topic)
                .await
                .context("could not explain the topic")?;
            println!("{}", explanation.explanation);
        }
        Commands::Chat { inputs } => {
            chat_with_documents(&config, &inputs).await?;
        }
    }

    Ok(())
}

/// File (if given), then environment, then command-line flags
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_env()?;

    if let Some(provider) = &cli.provider {
        config.llm.provider = provider.parse::<LlmProvider>()?;
    }
    if let Some(model) = &cli.model {
        config.llm.model = Some(model.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config.llm.base_url = Some(base_url.clone());
    }

    config.validate()?;
    Ok(config)
}

fn chunk_command(config: &Config, input: PathBuf, chunking: ChunkingConfig, json: bool) -> anyhow::Result<()> {
    let text = PdfProcessor::new(config.extraction.clone())
        .extract_file(&input)
        .with_context(|| format!("failed to extract {}", input.display()))?;

    let chunker = TextChunker::new(chunking, ChunkingStrategy::Recursive)?;
    let chunks = chunker.chunk_text(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    println!("📄 {}: {} characters, {} chunks", input.display(), text.chars().count(), chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        println!("{:>4}. [{} chars] {}", i + 1, chunk.chars().count(), preview(chunk, 100).replace('\n', " "));
    }

    Ok(())
}
