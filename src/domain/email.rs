//! Email address detection.

use super::{CharOffsets, DetectedEntity, Label, PatternMatcher, Source};
use once_cell::sync::Lazy;
use regex::Regex;

/// ASCII `local@domain.tld` matcher. A top-level domain of at least two
/// letters is required.
#[derive(Debug, Clone)]
pub struct EmailMatcher;

impl EmailMatcher {
    pub fn new() -> Self {
        Self
    }

    fn regex() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}")
                .expect("Valid email regex")
        });
        &PATTERN
    }
}

impl Default for EmailMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for EmailMatcher {
    fn name(&self) -> &str {
        "email"
    }

    fn find_entities(&self, text: &str) -> Vec<DetectedEntity> {
        let offsets = CharOffsets::new(text);
        Self::regex()
            .find_iter(text)
            .filter_map(|m| {
                let span = offsets.span(m.start(), m.end())?;
                Some(DetectedEntity::new(
                    m.as_str(),
                    span,
                    Label::Email,
                    Source::Pattern,
                ))
            })
            .collect()
    }
}
