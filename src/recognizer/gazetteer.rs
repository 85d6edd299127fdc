//! File-backed gazetteer models.
//!
//! A gazetteer model is a JSON document listing literal entries and regex
//! rules, each tagged with a native label:
//!
//! ```json
//! {
//!   "case_sensitive": false,
//!   "entries": [{ "text": "Audiencia Nacional", "label": "ORG" }],
//!   "rules": [{ "pattern": "\\bexpediente \\d+/\\d{4}\\b", "label": "MISC" }]
//! }
//! ```
//!
//! [`DirectoryModelLoader`] resolves a model identifier to `<root>/<id>.json`.

use super::model::{EntityTagger, ModelLoader, TaggedSpan};
use crate::error::{AutocensorError, AutocensorResult};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerEntry {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerRule {
    pub pattern: String,
    pub label: String,
}

/// Serialized form of a gazetteer model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GazetteerDefinition {
    pub case_sensitive: bool,
    pub entries: Vec<GazetteerEntry>,
    pub rules: Vec<GazetteerRule>,
}

/// A compiled gazetteer tagger.
#[derive(Debug)]
pub struct GazetteerModel {
    model_id: String,
    patterns: Vec<(Regex, String)>,
}

impl GazetteerModel {
    /// Compiles a definition. Any invalid rule fails the whole model.
    pub fn from_definition(
        model_id: impl Into<String>,
        definition: GazetteerDefinition,
    ) -> AutocensorResult<Self> {
        let mut patterns = Vec::with_capacity(definition.entries.len() + definition.rules.len());

        for entry in definition.entries {
            if entry.text.is_empty() {
                continue;
            }
            let pattern = literal_pattern(&entry.text);
            patterns.push((compile(&pattern, definition.case_sensitive)?, entry.label));
        }
        for rule in definition.rules {
            patterns.push((compile(&rule.pattern, definition.case_sensitive)?, rule.label));
        }

        Ok(Self {
            model_id: model_id.into(),
            patterns,
        })
    }

    /// Reads and compiles a JSON model definition.
    pub fn from_path(model_id: impl Into<String>, path: &Path) -> AutocensorResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| AutocensorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let definition: GazetteerDefinition =
            serde_json::from_str(&raw).map_err(|e| AutocensorError::ModelFormat {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_definition(model_id, definition)
    }
}

/// Escapes a literal and anchors it on word boundaries where it starts or
/// ends with a word character.
fn literal_pattern(text: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if text.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let trail = if text.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    format!("{}{}{}", lead, regex::escape(text), trail)
}

fn compile(pattern: &str, case_sensitive: bool) -> AutocensorResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| AutocensorError::PatternError {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

impl EntityTagger for GazetteerModel {
    fn tag(&self, text: &str) -> Vec<TaggedSpan> {
        let mut spans: Vec<TaggedSpan> = self
            .patterns
            .iter()
            .flat_map(|(regex, label)| {
                regex
                    .find_iter(text)
                    .filter(|m| !m.is_empty())
                    .map(move |m| TaggedSpan::new(m.start(), m.end(), label.as_str()))
            })
            .collect();
        spans.sort_by_key(|s| (s.start, s.end));
        spans
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Loads gazetteer models from `<root>/<model_id>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryModelLoader {
    root: PathBuf,
}

impl DirectoryModelLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn model_path(&self, model_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", model_id))
    }
}

impl ModelLoader for DirectoryModelLoader {
    fn load(&self, model_id: &str) -> AutocensorResult<Box<dyn EntityTagger>> {
        let path = self.model_path(model_id);
        if !path.is_file() {
            return Err(AutocensorError::ModelLoad {
                model: model_id.to_string(),
                reason: format!("no model file at '{}'", path.display()),
            });
        }
        debug!(model = model_id, path = %path.display(), "reading gazetteer model");
        Ok(Box::new(GazetteerModel::from_path(model_id, &path)?))
    }
}
