//! Document text extraction. One extractor per supported upload format.

pub mod docx;
pub mod pdf;

use std::sync::Arc;

use thiserror::Error;

use docx::DocxExtractor;
use pdf::PdfExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("DOCX parse error: {0}")]
    Docx(String),

    #[error("Document is missing required part '{0}'")]
    MissingPart(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Upload formats accepted by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a filename suffix, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Converts raw document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Dispatches extraction to the extractor registered for each format.
#[derive(Clone)]
pub struct DocumentParser {
    pdf: Arc<dyn TextExtractor>,
    docx: Arc<dyn TextExtractor>,
}

impl DocumentParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self::with_extractors(
            Arc::new(PdfExtractor),
            Arc::new(DocxExtractor::new()?),
        ))
    }

    pub fn with_extractors(pdf: Arc<dyn TextExtractor>, docx: Arc<dyn TextExtractor>) -> Self {
        Self { pdf, docx }
    }

    pub fn extract_text(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<String, ExtractionError> {
        match format {
            DocumentFormat::Pdf => self.pdf.extract(bytes),
            DocumentFormat::Docx => self.docx.extract(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_filename("cv.pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_filename("CV.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(
            DocumentFormat::from_filename("Resume.Final.DocX"),
            Some(DocumentFormat::Docx)
        );
    }

    #[test]
    fn test_unsupported_formats_rejected() {
        assert_eq!(DocumentFormat::from_filename("resume.doc"), None);
        assert_eq!(DocumentFormat::from_filename("resume.txt"), None);
        assert_eq!(DocumentFormat::from_filename("pdf"), None);
        assert_eq!(DocumentFormat::from_filename(""), None);
    }

    #[test]
    fn test_parser_dispatches_by_format() {
        struct Fixed(&'static str);
        impl TextExtractor for Fixed {
            fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
                Ok(self.0.to_string())
            }
        }

        let parser = DocumentParser::with_extractors(Arc::new(Fixed("pdf")), Arc::new(Fixed("docx")));
        assert_eq!(parser.extract_text(b"", DocumentFormat::Pdf).unwrap(), "pdf");
        assert_eq!(parser.extract_text(b"", DocumentFormat::Docx).unwrap(), "docx");
    }
}
