//! Text extraction from document files.
//!
//! Detection works on plain text; this module is the thin collaborator that
//! produces it. An empty string is a valid result meaning nothing could be
//! extracted.

use crate::error::{AutocensorError, AutocensorResult};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::path::Path;
use tracing::debug;

/// Produces the plain text of a document.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> AutocensorResult<String>;

    /// Returns whether this extractor handles the file's type.
    fn supports(&self, path: &Path) -> bool;
}

/// Extracts text from PDF, DOCX and plain-text files.
#[derive(Debug, Clone, Default)]
pub struct FileTextExtractor;

impl FileTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Joins the text runs of each body paragraph, one paragraph per line.
    fn docx_text(bytes: &[u8]) -> Result<String, docx_rs::ReaderError> {
        let docx = docx_rs::read_docx(bytes)?;
        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();
        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

impl TextExtractor for FileTextExtractor {
    fn extract_text(&self, path: &Path) -> AutocensorResult<String> {
        if !self.supports(path) {
            return Err(AutocensorError::UnsupportedDocument {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| AutocensorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let text = match Self::extension(path).as_deref() {
            Some("pdf") => pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                AutocensorError::TextExtraction {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?,
            Some("docx") => Self::docx_text(&bytes).map_err(|e| {
                AutocensorError::TextExtraction {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?,
            _ => String::from_utf8(bytes).map_err(|e| AutocensorError::TextExtraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
        };

        debug!(path = %path.display(), chars = text.chars().count(), "extracted text");
        Ok(text)
    }

    fn supports(&self, path: &Path) -> bool {
        matches!(
            Self::extension(path).as_deref(),
            Some("pdf") | Some("docx") | Some("txt") | Some("md")
        )
    }
}
