//! Consolidation and review of detected entities.
//!
//! A [`ReviewSession`] owns every piece of operator-controlled state (label
//! toggles, manual terms, ignored terms, the case-sensitivity flag) together
//! with the last analyzed text. It turns raw detections into a grouped,
//! de-duplicated view:
//!
//! 1. Keep entities whose label is active
//! 2. Append manual-term matches (always shown, label `MISC`)
//! 3. Normalize each text (lowercase unless case-sensitive)
//! 4. Drop ignored keys
//! 5. Group by key, keeping the first text and label seen
//! 6. Order by descending count, ties in first-seen order

pub mod labels;
pub mod terms;

pub use labels::LabelActivation;
pub use terms::ManualTermSet;

use crate::detection::{DetectOptions, Detector};
use crate::domain::{DetectedEntity, Label, ManualTermMatcher};
use crate::error::AutocensorResult;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// What happens when the case-sensitivity flag changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseTogglePolicy {
    /// Only record the new flag. The view and the ignore set are left as
    /// they are until the next recompute, and ignored keys are not
    /// renormalized.
    #[default]
    Deferred,
    /// Lowercase ignored keys when switching to case-insensitive, then
    /// recompute immediately. Keys cannot regain their casing when switching
    /// the other way, so they stay lowercase.
    Eager,
}

/// One line of the review view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedEntry {
    /// Normalization key shared by every entity in the group.
    pub key: String,
    /// Text of the first entity seen for this key, original casing.
    pub display_text: String,
    /// Label of the first entity seen for this key.
    pub label: Label,
    pub count: usize,
}

/// Grouped result of a recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub entries: Vec<GroupedEntry>,
    /// Entities that passed label filtering plus manual matches, before
    /// ignoring and grouping.
    pub detected: usize,
}

impl ReviewView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the group for a normalization key.
    pub fn entry(&self, key: &str) -> Option<&GroupedEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

#[derive(Debug, Clone)]
struct AnalyzedText {
    text: String,
    raw: Vec<DetectedEntity>,
}

/// Operator review state for one document.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    labels: LabelActivation,
    manual_terms: ManualTermSet,
    ignored: BTreeSet<String>,
    case_sensitive: bool,
    case_policy: CaseTogglePolicy,
    analyzed: Option<AnalyzedText>,
    view: ReviewView,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_policy(mut self, policy: CaseTogglePolicy) -> Self {
        self.case_policy = policy;
        self
    }

    pub fn with_labels(mut self, labels: LabelActivation) -> Self {
        self.labels = labels;
        self
    }

    /// Stores a text and its raw detections, then recomputes the view.
    pub fn load(&mut self, text: impl Into<String>, raw: Vec<DetectedEntity>) -> &ReviewView {
        self.analyzed = Some(AnalyzedText {
            text: text.into(),
            raw,
        });
        self.recompute()
    }

    /// Runs detection on `text` and loads the result.
    ///
    /// On error the previously loaded text and view are kept.
    pub fn analyze(
        &mut self,
        detector: &Detector,
        text: &str,
        options: DetectOptions,
    ) -> AutocensorResult<&ReviewView> {
        let raw = detector.detect_with(text, options)?;
        debug!(raw = raw.len(), "detection finished");
        Ok(self.load(text, raw))
    }

    pub fn has_analyzed(&self) -> bool {
        self.analyzed.is_some()
    }

    /// Normalization key for a text under the current case setting.
    pub fn normalize(&self, text: &str) -> String {
        if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    }

    /// Entities shown for review before ignoring and grouping: active-label
    /// detections followed by manual-term matches. A term with no occurrence
    /// still appears once, without offsets.
    pub fn reviewable_entities(&self) -> Vec<DetectedEntity> {
        let Some(analyzed) = &self.analyzed else {
            return Vec::new();
        };

        let mut entities: Vec<DetectedEntity> = analyzed
            .raw
            .iter()
            .filter(|e| self.labels.is_active(e.label()))
            .cloned()
            .collect();

        let manual = ManualTermMatcher::new(self.manual_terms.iter(), self.case_sensitive);
        entities.extend(manual.find_with_unmatched(&analyzed.text));
        entities
    }

    /// Rebuilds the grouped view from the stored detections.
    ///
    /// Before anything has been analyzed the view is empty.
    pub fn recompute(&mut self) -> &ReviewView {
        let entities = self.reviewable_entities();
        let detected = entities.len();

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<GroupedEntry> = Vec::new();
        for entity in entities {
            let key = self.normalize(entity.text());
            if self.ignored.contains(&key) {
                continue;
            }
            match index.get(&key) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push(GroupedEntry {
                        key,
                        display_text: entity.text().to_string(),
                        label: entity.label().clone(),
                        count: 1,
                    });
                }
            }
        }
        // Stable: equal counts keep first-seen order.
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        debug!(detected, groups = entries.len(), "review view recomputed");
        self.view = ReviewView { entries, detected };
        &self.view
    }

    /// The view produced by the last recompute.
    pub fn view(&self) -> &ReviewView {
        &self.view
    }

    /// Ignores every entity normalizing to the same key as `term`.
    ///
    /// Accepts either a displayed text or a group key.
    pub fn ignore(&mut self, term: &str) -> &ReviewView {
        let key = self.normalize(term);
        self.ignored.insert(key);
        self.recompute()
    }

    pub fn clear_ignored(&mut self) -> &ReviewView {
        self.ignored.clear();
        self.recompute()
    }

    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }

    /// Adds a manual term. Returns false for empty or duplicate terms.
    ///
    /// A newly added term is also removed from the ignore set, and the view
    /// is recomputed if a text has been analyzed.
    pub fn add_manual_term(&mut self, term: &str) -> bool {
        let Some(stored) = self.manual_terms.insert(term).map(str::to_string) else {
            return false;
        };
        let key = self.normalize(&stored);
        self.ignored.remove(&key);
        if self.has_analyzed() {
            self.recompute();
        }
        true
    }

    /// Removes a manual term by exact value, recomputing if analyzed.
    pub fn remove_manual_term(&mut self, term: &str) -> bool {
        if !self.manual_terms.remove(term) {
            return false;
        }
        if self.has_analyzed() {
            self.recompute();
        }
        true
    }

    pub fn manual_terms(&self) -> &ManualTermSet {
        &self.manual_terms
    }

    /// Changes case sensitivity according to the session's
    /// [`CaseTogglePolicy`].
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        if self.case_sensitive == case_sensitive {
            return;
        }
        self.case_sensitive = case_sensitive;

        if self.case_policy == CaseTogglePolicy::Eager {
            if !case_sensitive {
                self.ignored = self.ignored.iter().map(|k| k.to_lowercase()).collect();
            }
            if self.has_analyzed() {
                self.recompute();
            }
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Replaces the active label set. Takes effect on the next recompute.
    pub fn set_active_labels<I: IntoIterator<Item = Label>>(&mut self, labels: I) {
        self.labels = LabelActivation::only(labels);
    }

    pub fn labels(&self) -> &LabelActivation {
        &self.labels
    }
}
