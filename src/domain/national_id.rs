//! Spanish identity document logic.
//!
//! Covers the two structured formats in use:
//! - DNI: 8 digits followed by a control letter (`01647550Z`)
//! - NIE: `X`, `Y` or `Z`, 7 digits and a control letter (`X1234567L`)
//!
//! Both map to [`Label::IdNumber`]; the concrete format is recorded in the
//! `id_type` meta attribute.

use super::{CharOffsets, DetectedEntity, Label, PatternMatcher, Source};
use once_cell::sync::Lazy;
use regex::Regex;

/// Control letters indexed by `number % 23`.
const CONTROL_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// Identity document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Documento Nacional de Identidad.
    National,
    /// Número de Identidad de Extranjero.
    ForeignResident,
}

impl IdKind {
    /// Value stored under the `id_type` meta key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::ForeignResident => "foreign-resident",
        }
    }
}

/// DNI/NIE pattern matcher.
///
/// Matches are reported even when the control letter is wrong; the
/// `check_letter` meta attribute records whether it validates. Overlapping
/// DNI and NIE matches are both reported.
#[derive(Debug, Clone)]
pub struct NationalIdMatcher;

impl NationalIdMatcher {
    pub fn new() -> Self {
        Self
    }

    fn dni_regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\b(\d{8})([A-HJ-NP-TV-Z])\b").expect("Valid DNI regex")
        });
        &PATTERN
    }

    fn nie_regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\b([XYZ])(\d{7})([A-HJ-NP-TV-Z])\b").expect("Valid NIE regex")
        });
        &PATTERN
    }

    /// Validates the control letter of a DNI or NIE.
    ///
    /// For a NIE the leading `X`/`Y`/`Z` is replaced by `0`/`1`/`2` before
    /// computing `number % 23`.
    pub fn validate(id: &str) -> bool {
        if id.len() != 9 || !id.is_ascii() {
            return false;
        }
        let id = id.to_ascii_uppercase();
        let (body, letter) = id.split_at(8);

        let digits: String = match body.chars().next() {
            Some('X') => format!("0{}", &body[1..]),
            Some('Y') => format!("1{}", &body[1..]),
            Some('Z') => format!("2{}", &body[1..]),
            _ => body.to_string(),
        };

        match (digits.parse::<u32>(), letter.as_bytes().first()) {
            (Ok(number), Some(&letter)) if digits.bytes().all(|b| b.is_ascii_digit()) => {
                CONTROL_LETTERS[(number % 23) as usize] == letter
            }
            _ => false,
        }
    }

    fn collect(
        &self,
        regex: &Regex,
        kind: IdKind,
        text: &str,
        offsets: &CharOffsets,
        out: &mut Vec<DetectedEntity>,
    ) {
        for m in regex.find_iter(text) {
            let Some(span) = offsets.span(m.start(), m.end()) else {
                continue;
            };
            let check = if Self::validate(m.as_str()) {
                "valid"
            } else {
                "invalid"
            };
            out.push(
                DetectedEntity::new(m.as_str(), span, Label::IdNumber, Source::Pattern)
                    .with_meta("id_type", kind.as_str())
                    .with_meta("check_letter", check),
            );
        }
    }
}

impl Default for NationalIdMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for NationalIdMatcher {
    fn name(&self) -> &str {
        "national_id"
    }

    fn find_entities(&self, text: &str) -> Vec<DetectedEntity> {
        let offsets = CharOffsets::new(text);
        let mut entities = Vec::new();
        self.collect(Self::dni_regex(), IdKind::National, text, &offsets, &mut entities);
        self.collect(
            Self::nie_regex(),
            IdKind::ForeignResident,
            text,
            &offsets,
            &mut entities,
        );
        entities.sort_by_key(|e| e.span());
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dni_match() {
        let entities = NationalIdMatcher::new().find_entities("DNI 01647550Z firmado");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text(), "01647550Z");
        assert_eq!(entities[0].meta("id_type"), Some("national"));
        assert_eq!(entities[0].start(), Some(4));
        assert_eq!(entities[0].end(), Some(13));
    }

    #[test]
    fn test_nie_match() {
        let entities = NationalIdMatcher::new().find_entities("NIE X1234567L");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].meta("id_type"), Some("foreign-resident"));
        assert_eq!(entities[0].label(), &Label::IdNumber);
    }

    #[test]
    fn test_bare_digits_rejected() {
        assert!(NationalIdMatcher::new().find_entities("ref 12345678 end").is_empty());
    }

    #[test]
    fn test_excluded_letters_rejected() {
        // I, O, U and Ñ are never control letters
        assert!(NationalIdMatcher::new().find_entities("12345678I").is_empty());
        assert!(NationalIdMatcher::new().find_entities("12345678O").is_empty());
    }

    #[test]
    fn test_lowercase_letter_accepted() {
        let entities = NationalIdMatcher::new().find_entities("dni 01647550z");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].meta("check_letter"), Some("valid"));
    }

    #[test]
    fn test_control_letter_validation() {
        assert!(NationalIdMatcher::validate("01647550Z"));
        assert!(NationalIdMatcher::validate("12345678Z"));
        assert!(NationalIdMatcher::validate("X1234567L"));
        assert!(!NationalIdMatcher::validate("12345678A"));
        assert!(!NationalIdMatcher::validate("1234567Z"));
    }

    #[test]
    fn test_wrong_control_letter_still_reported() {
        let entities = NationalIdMatcher::new().find_entities("12345678A");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].meta("check_letter"), Some("invalid"));
    }
}
