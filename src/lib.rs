//! Sensitive entity detection and review for redacting legal documents.
//!
//! Given the extracted text of a document, this library finds spans an
//! operator will likely want to censor (people, organizations, Spanish
//! DNI/NIE numbers, email addresses, phone numbers) and consolidates them
//! into a de-duplicated, operator-correctable list. It does not remove
//! anything from the document itself.
//!
//! # Architecture
//!
//! - [`domain`]: Entity model and deterministic pattern matchers
//! - [`recognizer`]: Lazily loaded statistical recognizer and label mapping
//! - [`detection`]: Orchestrator merging both detectors
//! - [`review`]: Consolidation engine and operator review state
//! - [`extract`]: Plain-text extraction from files
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```
//! use autocensor::{DetectOptions, Detector, DetectorConfig, ReviewSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = Detector::from_config(&DetectorConfig::default());
//! let mut session = ReviewSession::new();
//!
//! let text = "El Sr. Iván Castillo, con DNI 01647550Z, escribió a ana@example.com";
//! let options = DetectOptions { use_regex: true, include_email_phone: true };
//! let view = session.analyze(&detector, text, options)?;
//!
//! for entry in &view.entries {
//!     println!("{} (x{}) [{}]", entry.display_text, entry.count, entry.label);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Pattern Matching
//!
//! ```
//! use autocensor::domain::{NationalIdMatcher, PatternMatcher};
//!
//! let matcher = NationalIdMatcher::new();
//! let ids = matcher.find_entities("DNI 01647550Z y NIE X1234567L");
//! assert_eq!(ids.len(), 2);
//! assert_eq!(ids[1].meta("id_type"), Some("foreign-resident"));
//! ```

// Public API
pub mod detection;
pub mod domain;
pub mod error;
pub mod extract;
pub mod recognizer;
pub mod review;

// Re-exports for convenient access
pub use detection::{DetectOptions, Detector, DetectorConfig};
pub use domain::{
    DetectedEntity, EmailMatcher, Label, ManualTermMatcher, NationalIdMatcher, PatternMatcher,
    PhoneMatcher, Source, Span,
};
pub use error::{AutocensorError, AutocensorResult};
pub use extract::{FileTextExtractor, TextExtractor};
pub use recognizer::{ModelStatus, StatisticalRecognizer};
pub use review::{CaseTogglePolicy, GroupedEntry, LabelActivation, ReviewSession, ReviewView};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_creation() {
        let detector = Detector::from_config(&DetectorConfig::default());
        assert_eq!(detector.recognizer().status(), ModelStatus::Unloaded);
    }

    #[test]
    fn test_pattern_matchers() {
        let id_matcher = NationalIdMatcher::new();
        assert_eq!(id_matcher.extract_all("01647550Z"), vec!["01647550Z"]);

        let email_matcher = EmailMatcher::new();
        assert!(email_matcher.extract_all("correo@gmail").is_empty());
    }
}
