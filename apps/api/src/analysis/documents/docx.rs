//! DOCX text extraction. A .docx file is a zip package; the body lives in
//! `word/document.xml` as `<w:p>` paragraphs made of `<w:t>` text runs.

use std::io::{Cursor, Read};

use regex::Regex;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{ExtractionError, TextExtractor};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxExtractor {
    run_re: Regex,
}

impl DocxExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            run_re: Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:(tab|br|cr)\b[^>]*/>")?,
        })
    }

    /// One line per `<w:p>` paragraph, in document order.
    fn paragraphs(&self, xml: &str) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut segments = xml.split("</w:p>").peekable();

        while let Some(segment) = segments.next() {
            // The tail after the last paragraph holds section properties only.
            if segments.peek().is_none() {
                break;
            }
            let mut paragraph = String::new();
            for caps in self.run_re.captures_iter(segment) {
                if let Some(text) = caps.get(1) {
                    paragraph.push_str(&unescape_xml(text.as_str()));
                } else if let Some(tag) = caps.get(2) {
                    paragraph.push(if tag.as_str() == "tab" { '\t' } else { '\n' });
                }
            }
            paragraphs.push(paragraph);
        }

        paragraphs
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let mut xml = String::new();
        match archive.by_name(DOCUMENT_PART) {
            Ok(mut part) => {
                part.read_to_string(&mut xml)?;
            }
            Err(ZipError::FileNotFound) => return Err(ExtractionError::MissingPart(DOCUMENT_PART)),
            Err(e) => return Err(ExtractionError::Docx(e.to_string())),
        }

        Ok(self.paragraphs(&xml).join("\n"))
    }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
