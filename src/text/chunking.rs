//! Text chunking algorithms and utilities
//!
//! Documents are split into overlapping windows of at most `chunk_size` characters.
//! Each chunk after the first starts exactly `overlap` characters before the end of
//! the previous one, so [`merge_chunks`] can always rebuild the source text.

use crate::config::ChunkingConfig;
use crate::error::Result;

/// Text chunking strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkingStrategy {
    /// Split at the strongest structural boundary found inside each window
    #[default]
    Recursive,

    /// Hard cuts every `chunk_size - overlap` characters
    Character,
}

/// Structural split points, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Blank line, `"\n\n"`
    Paragraph,
    /// Single `"\n"`
    Line,
    /// `.`, `!` or `?` followed by whitespace
    Sentence,
    /// Any whitespace character
    Word,
}

impl Boundary {
    /// Search order used by [`ChunkingStrategy::Recursive`]
    pub const PRIORITY: [Boundary; 4] = [
        Boundary::Paragraph,
        Boundary::Line,
        Boundary::Sentence,
        Boundary::Word,
    ];

    /// Whether `window` ends with this boundary. The separator stays with the left side.
    fn terminates(self, window: &[char]) -> bool {
        match self {
            Boundary::Paragraph => window.ends_with(&['\n', '\n']),
            Boundary::Line => window.ends_with(&['\n']),
            Boundary::Sentence => {
                matches!(window, [.., '.' | '!' | '?', ws] if ws.is_whitespace())
            }
            Boundary::Word => matches!(window, [.., ws] if ws.is_whitespace()),
        }
    }

    /// Last split position in `min_end..=max_end` that this boundary ends at
    fn last_split(self, chars: &[char], start: usize, min_end: usize, max_end: usize) -> Option<usize> {
        (min_end..=max_end)
            .rev()
            .find(|&end| self.terminates(&chars[start..end]))
    }
}

/// Text chunker for processing documents into manageable chunks
#[derive(Debug, Clone)]
pub struct TextChunker {
    config: ChunkingConfig,
    strategy: ChunkingStrategy,
}

impl TextChunker {
    /// Create a new text chunker with the given configuration
    pub fn new(config: ChunkingConfig, strategy: ChunkingStrategy) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    /// Create a chunker with default configuration (1000 characters, 100 overlap)
    pub fn with_default_config() -> Self {
        Self {
            config: ChunkingConfig::default(),
            strategy: ChunkingStrategy::default(),
        }
    }

    /// Chunk text into overlapping segments.
    ///
    /// Empty input yields no chunks. Input no longer than `chunk_size` yields itself.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();

        if chars.is_empty() {
            return Vec::new();
        }
        if chars.len() <= self.config.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let window_end = (start + self.config.chunk_size).min(chars.len());
            if window_end == chars.len() {
                chunks.push(chars[start..].iter().collect());
                break;
            }

            let end = match self.strategy {
                ChunkingStrategy::Recursive => self.find_split(&chars, start, window_end),
                ChunkingStrategy::Character => window_end,
            };

            chunks.push(chars[start..end].iter().collect());

            // end > start + overlap, so every step advances
            start = end - self.config.overlap;
        }

        log::debug!(
            "Split {} characters into {} chunks (size {}, overlap {})",
            chars.len(),
            chunks.len(),
            self.config.chunk_size,
            self.config.overlap
        );

        chunks
    }

    /// Choose where the window starting at `start` ends
    fn find_split(&self, chars: &[char], start: usize, window_end: usize) -> usize {
        let min_end = start + self.config.overlap + 1;

        Boundary::PRIORITY
            .iter()
            .find_map(|boundary| boundary.last_split(chars, start, min_end, window_end))
            .unwrap_or(window_end)
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Rebuild the original text from chunks produced with the given overlap
pub fn merge_chunks<S: AsRef<str>>(chunks: &[S], overlap: usize) -> String {
    let mut merged = String::new();

    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            merged.push_str(chunk.as_ref());
        } else {
            merged.extend(chunk.as_ref().chars().skip(overlap));
        }
    }

    merged
}
