//! PDF text extraction
//!
//! Pages are read in page-number order with `lopdf` and joined with the configured
//! separator. When the per-page pass yields nothing, the whole payload is handed to
//! `pdf-extract`, which copes with some font encodings `lopdf` does not.

use crate::config::ExtractionConfig;
use crate::error::{DocQaError, Result};
use std::path::Path;

/// Something that turns an uploaded payload into plain text
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// PDF text extractor
#[derive(Debug, Clone, Default)]
pub struct PdfProcessor {
    config: ExtractionConfig,
}

impl PdfProcessor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract the text of every page, in page order
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let document = lopdf::Document::load_mem(bytes)?;
        Self::page_texts(&document)
    }

    fn page_texts(document: &lopdf::Document) -> Result<Vec<String>> {
        document
            .get_pages()
            .into_keys()
            .map(|page_number| document.extract_text(&[page_number]).map_err(DocQaError::from))
            .collect()
    }

    /// Extract the full text of a PDF held in memory
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(DocQaError::Extraction("empty file".to_string()));
        }

        // Anything lopdf cannot even parse is not a PDF
        let document = lopdf::Document::load_mem(bytes)?;
        let page_count = document.get_pages().len();

        match Self::page_texts(&document) {
            Ok(pages) => {
                let text = pages.join(self.config.page_separator.as_str());
                if !text.trim().is_empty() {
                    log::debug!("Extracted {} characters from {} pages", text.chars().count(), page_count);
                    return Ok(text);
                }
                log::warn!("No text found page by page ({} pages), trying whole-document extraction", page_count);
            }
            Err(e) => {
                log::warn!("Page extraction failed: {}. Trying whole-document extraction", e);
            }
        }

        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocQaError::Extraction(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(DocQaError::Extraction(
                "no text layer found (scanned or image-only PDFs are not supported)".to_string(),
            ));
        }

        Ok(text)
    }

    /// Extract the full text of a PDF file on disk
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DocQaError::Extraction(format!("PDF file not found: {}", path.display())));
        }

        let bytes = std::fs::read(path)?;
        self.extract_bytes(&bytes)
    }
}

impl TextExtractor for PdfProcessor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        self.extract_bytes(bytes)
    }
}
