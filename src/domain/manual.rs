//! Literal matching for operator-supplied terms.

use super::{CharOffsets, DetectedEntity, Label, PatternMatcher, Source};
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Finds every non-overlapping occurrence of a list of literal terms.
///
/// Terms are escaped before compilation, so regex metacharacters in operator
/// input are matched literally. Case sensitivity is a single flag shared by
/// all terms. A term that still fails to compile (for example one exceeding
/// the regex size limit) is skipped with a warning and the others are kept.
#[derive(Debug, Clone)]
pub struct ManualTermMatcher {
    patterns: Vec<(String, Regex)>,
}

impl ManualTermMatcher {
    pub fn new<I, S>(terms: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = terms
            .into_iter()
            .filter_map(|term| {
                let term = term.as_ref();
                if term.is_empty() {
                    return None;
                }
                match RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(!case_sensitive)
                    .build()
                {
                    Ok(regex) => Some((term.to_string(), regex)),
                    Err(e) => {
                        warn!(term, error = %e, "skipping manual term that failed to compile");
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    /// Number of terms that compiled and will be matched.
    pub fn term_count(&self) -> usize {
        self.patterns.len()
    }

    /// Like [`find_entities`](PatternMatcher::find_entities), but every
    /// compiled term with no occurrence in `text` is appended as an
    /// unanchored entity, in term order.
    pub fn find_with_unmatched(&self, text: &str) -> Vec<DetectedEntity> {
        let mut entities = self.find_entities(text);
        for (term, _) in &self.patterns {
            let matched = entities.iter().any(|e| e.meta("term") == Some(term.as_str()));
            if !matched {
                entities.push(
                    DetectedEntity::unanchored(term.as_str(), Label::Misc, Source::Manual)
                        .with_meta("term", term.as_str()),
                );
            }
        }
        entities
    }
}

impl PatternMatcher for ManualTermMatcher {
    fn name(&self) -> &str {
        "manual"
    }

    fn find_entities(&self, text: &str) -> Vec<DetectedEntity> {
        if self.patterns.is_empty() {
            return Vec::new();
        }

        let offsets = CharOffsets::new(text);
        let mut entities = Vec::new();
        for (term, regex) in &self.patterns {
            for m in regex.find_iter(text) {
                if let Some(span) = offsets.span(m.start(), m.end()) {
                    entities.push(
                        DetectedEntity::new(m.as_str(), span, Label::Misc, Source::Manual)
                            .with_meta("term", term.as_str()),
                    );
                }
            }
        }
        entities.sort_by_key(|e| e.span());
        entities
    }
}
