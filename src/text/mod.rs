//! Text processing for docqa-rs
//!
//! This module provides PDF text extraction and the chunking algorithms that split
//! extracted text into overlapping, size-bounded segments.

pub mod chunking;
pub mod pdf;

// Re-export main types and functions
pub use chunking::{Boundary, ChunkingStrategy, TextChunker, merge_chunks};
pub use pdf::{PdfProcessor, TextExtractor};
