use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN is a valid regex pattern"));

/// Turns an uploaded source document into plain text for prompt seeding.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> AppResult<String>;
    fn extract_text_from_bytes(&self, bytes: &[u8]) -> AppResult<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> AppResult<String> {
        log::info!("Extracting text from {}", path.display());

        if !path.exists() {
            return Err(AppError::ExtractionFailed(format!(
                "file not found: {}",
                path.display()
            )));
        }

        let raw = pdf_extract::extract_text(path)
            .map_err(|e| AppError::ExtractionFailed(format!("could not read PDF: {:?}", e)))?;
        finish_extraction(&raw)
    }

    fn extract_text_from_bytes(&self, bytes: &[u8]) -> AppResult<String> {
        log::info!("Extracting text from {} uploaded bytes", bytes.len());

        if bytes.is_empty() {
            return Err(AppError::ExtractionFailed("document is empty".to_string()));
        }

        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::ExtractionFailed(format!("could not read PDF: {:?}", e)))?;
        finish_extraction(&raw)
    }
}

fn finish_extraction(raw: &str) -> AppResult<String> {
    let text = normalize_whitespace(raw);
    if text.is_empty() {
        return Err(AppError::ExtractionFailed(
            "the document was read but contains no text".to_string(),
        ));
    }

    log::info!("Extracted {} characters", text.chars().count());
    Ok(text)
}

/// Collapses every whitespace run (newlines included) into one space.
pub fn normalize_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}
