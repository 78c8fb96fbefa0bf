//! PDF text extraction via `pdf-extract`.

use std::any::Any;
use std::panic;

use super::{ExtractionError, TextExtractor};

#[derive(Debug, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some structurally valid but semantically broken
        // files (unknown fonts, fonts missing descendants); treat those as parse failures.
        let text = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|payload| ExtractionError::Pdf(panic_message(payload.as_ref())))?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
        Ok(clean_text(&text))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("extractor aborted: {detail}")
}

/// Collapses runs of blank lines and trailing spaces left by PDF layout.
fn clean_text(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
