//! Utility functions for docqa-rs
//!
//! This module provides common utility functions used throughout the project.

use crate::error::{DocQaError, Result};
use std::path::Path;

/// Get file extension from path, lowercased
pub fn get_file_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a filename carries a `.pdf` extension (any case)
pub fn is_pdf_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(get_file_extension(path).as_deref(), Some("pdf"))
}

/// Last path component of an uploaded filename. Browsers may send full client paths.
pub fn base_filename(filename: &str) -> &str {
    filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename)
        .trim()
}

/// Derive a document id from its filename: directories dropped, `.pdf` stripped
pub fn derive_doc_id(filename: &str) -> Result<String> {
    let name = base_filename(filename);

    let split = name.len().saturating_sub(".pdf".len());
    let stem = match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &name[..split],
        _ => name,
    };

    let stem = stem.trim();
    if stem.is_empty() {
        return Err(DocQaError::Validation(format!(
            "Cannot derive a document id from '{}'",
            filename
        )));
    }

    Ok(stem.to_string())
}

/// First `limit` characters of `text`, never splitting a UTF-8 sequence
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Format file size in human readable format
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Shorten text for terminal previews
pub fn preview(text: &str, limit: usize) -> String {
    let cut = truncate_chars(text, limit);
    if cut.len() < text.len() {
        format!("{}...", cut)
    } else {
        cut.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(get_file_extension("test.pdf"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("test.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("test"), None);
        assert_eq!(get_file_extension("test.tar.gz"), Some("gz".to_string()));
    }

    #[test]
    fn test_pdf_detection() {
        assert!(is_pdf_file("lecture.pdf"));
        assert!(is_pdf_file("LECTURE.PDF"));
        assert!(!is_pdf_file("notes.txt"));
        assert!(!is_pdf_file("pdf"));
        assert!(!is_pdf_file("archive.pdf.zip"));
    }

    #[test]
    fn test_derive_doc_id() {
        assert_eq!(derive_doc_id("notes.pdf").unwrap(), "notes");
        assert_eq!(derive_doc_id("a.b.PDF").unwrap(), "a.b");
        assert_eq!(derive_doc_id("C:\\Users\\me\\week 1.pdf").unwrap(), "week 1");
        assert_eq!(derive_doc_id("uploads/ch2.pdf").unwrap(), "ch2");
        assert!(derive_doc_id(".pdf").is_err());
        assert!(derive_doc_id("   ").is_err());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 50), "hello");
        assert_eq!(truncate_chars("naïve", 3), "naï");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_file_size_formatting() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1048576), "1.0 MB");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("a longer sentence", 8), "a longer...");
    }
}
