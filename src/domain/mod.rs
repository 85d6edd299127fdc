//! Domain models and deterministic pattern matching.
//!
//! This module contains the entity model shared by every detector and the
//! regex-driven matchers for structurally regular sensitive data: Spanish
//! national IDs, email addresses, phone numbers and operator-supplied
//! literal terms.

pub mod email;
pub mod entity;
pub mod manual;
pub mod national_id;
pub mod phone;

pub use email::EmailMatcher;
pub use entity::{DetectedEntity, Label, Source, Span};
pub use manual::ManualTermMatcher;
pub use national_id::{IdKind, NationalIdMatcher};
pub use phone::PhoneMatcher;

/// Trait for deterministic pattern matching strategies.
///
/// Implementations return entities with character offsets, ordered by start
/// offset. No match is an empty vector, never an error.
pub trait PatternMatcher: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn find_entities(&self, text: &str) -> Vec<DetectedEntity>;

    /// Returns the matched substrings only.
    fn extract_all(&self, text: &str) -> Vec<String> {
        self.find_entities(text)
            .into_iter()
            .map(|e| e.text().to_string())
            .collect()
    }
}

/// Translates byte offsets (what `regex` reports) into character offsets.
#[derive(Debug, Clone)]
pub struct CharOffsets {
    // Byte position of every char start, followed by the text length.
    boundaries: Vec<usize>,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { boundaries }
    }

    /// Character index of a byte offset, if it sits on a char boundary.
    pub fn char_index(&self, byte: usize) -> Option<usize> {
        self.boundaries.binary_search(&byte).ok()
    }

    /// Converts a byte range into a character [`Span`].
    pub fn span(&self, start: usize, end: usize) -> Option<Span> {
        if start > end {
            return None;
        }
        Some(Span::new(self.char_index(start)?, self.char_index(end)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_offsets_ascii() {
        let offsets = CharOffsets::new("abc");
        assert_eq!(offsets.span(1, 3), Some(Span::new(1, 3)));
    }

    #[test]
    fn test_char_offsets_multibyte() {
        // "Iván" - 'á' is two bytes
        let text = "Iván Castillo";
        let offsets = CharOffsets::new(text);
        let byte_start = text.find("Castillo").unwrap();
        assert_eq!(byte_start, 6);
        assert_eq!(offsets.char_index(byte_start), Some(5));
        // Inside the 'á' code point
        assert_eq!(offsets.char_index(3), None);
        assert_eq!(offsets.span(0, text.len()), Some(Span::new(0, 13)));
    }

    #[test]
    fn test_reversed_byte_range_rejected() {
        let offsets = CharOffsets::new("abc");
        assert_eq!(offsets.span(2, 1), None);
    }
}
