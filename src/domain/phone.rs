//! Phone number domain logic.
//!
//! Unlike a strict numbering-plan validator this matcher is deliberately
//! tolerant: legal documents quote national and international numbers in
//! many layouts, and the operator reviews every hit anyway.

use super::{CharOffsets, DetectedEntity, Label, PatternMatcher, Source};
use once_cell::sync::Lazy;
use regex::Regex;

/// Phone number pattern matcher.
///
/// Supported layouts include:
/// - +34 612345678
/// - +51 68639912
/// - (91) 123 45 67
/// - 612-34-56-78
/// - 612.345.678
///
/// A match never starts or ends inside a larger alphanumeric token, so the
/// digits of `12345678Z` are not reported.
#[derive(Debug, Clone)]
pub struct PhoneMatcher;

impl PhoneMatcher {
    /// Creates a new phone number matcher.
    pub fn new() -> Self {
        Self
    }

    /// Returns the phone regex. Capture group 1 is the number itself; the
    /// leading non-word character (or start of text) stands in for a
    /// look-behind. All repetitions are bounded.
    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?:^|\W)((?:\+\d{1,3}[\s\-.]?)?(?:\(?\d{1,4}\)?[\s\-.]?){2,6}\d)\b",
            )
            .expect("Valid phone number regex")
        });
        &PATTERN
    }

    /// Strips everything but digits and a leading `+`.
    pub fn normalize(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for (i, c) in text.trim().chars().enumerate() {
            if c.is_ascii_digit() || (i == 0 && c == '+') {
                out.push(c);
            }
        }
        out
    }
}

impl Default for PhoneMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for PhoneMatcher {
    fn name(&self) -> &str {
        "phone"
    }

    fn find_entities(&self, text: &str) -> Vec<DetectedEntity> {
        let offsets = CharOffsets::new(text);
        Self::regex()
            .captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(1)?;
                let span = offsets.span(m.start(), m.end())?;
                Some(
                    DetectedEntity::new(m.as_str(), span, Label::Phone, Source::Pattern)
                        .with_meta("digits", Self::normalize(m.as_str())),
                )
            })
            .collect()
    }
}
