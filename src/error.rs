//! Error types for the detection and review pipeline.
//!
//! Errors are categorized by the stage that produced them so callers can
//! tell a missing statistical model apart from a bad input document.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for detection operations.
pub type AutocensorResult<T> = Result<T, AutocensorError>;

/// Error type for all detection, extraction and model-loading operations.
#[derive(Debug, Error)]
pub enum AutocensorError {
    /// No statistical model could be loaded after trying every candidate.
    ///
    /// This is fatal to the current detection run and is never degraded to
    /// a pattern-only result.
    #[error(
        "no statistical model available for language '{language}' (tried: {}){}",
        .attempted.join(", "),
        .source.as_ref().map(|e| format!("; last error: {}", e)).unwrap_or_default()
    )]
    RecognizerUnavailable {
        language: String,
        attempted: Vec<String>,
        #[source]
        source: Option<Box<AutocensorError>>,
    },

    /// A single model candidate failed to load.
    #[error("failed to load model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },

    /// A model definition file could not be parsed.
    #[error("invalid model definition '{}': {source}", .path.display())]
    ModelFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Pattern compilation error
    #[error("pattern error for '{pattern}': {reason}")]
    PatternError { pattern: String, reason: String },

    /// Error occurred while reading a file
    #[error("IO error for path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Text extraction failed
    #[error("text extraction failed for '{}': {reason}", .path.display())]
    TextExtraction { path: PathBuf, reason: String },

    /// The document type has no text extractor.
    #[error("unsupported document type: '{}'", .path.display())]
    UnsupportedDocument { path: PathBuf },
}

impl AutocensorError {
    /// Returns true if the statistical pass could not run.
    pub fn is_recognizer_unavailable(&self) -> bool {
        matches!(self, Self::RecognizerUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AutocensorError::ModelLoad {
            model: "es_core_news_md".to_string(),
            reason: "not installed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load model 'es_core_news_md': not installed"
        );
    }

    #[test]
    fn test_recognizer_unavailable_lists_candidates() {
        let err = AutocensorError::RecognizerUnavailable {
            language: "es".to_string(),
            attempted: vec!["a".to_string(), "b".to_string()],
            source: Some(Box::new(AutocensorError::ModelLoad {
                model: "b".to_string(),
                reason: "missing".to_string(),
            })),
        };
        let display = err.to_string();
        assert!(display.contains("tried: a, b"));
        assert!(display.contains("last error: failed to load model 'b': missing"));
        assert!(err.is_recognizer_unavailable());
    }
}
