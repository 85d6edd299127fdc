//! Built-in rule-based tagger for Spanish legal text.
//!
//! Used when no trained model is installed. It only knows the strongest
//! surface cues of Spanish court documents: honorifics before a person's
//! name, company-form suffixes, written dates and statute references.

use super::model::{EntityTagger, ModelLoader, TaggedSpan};
use crate::error::{AutocensorError, AutocensorResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns paired with the native label they emit. When a pattern has a
/// capture group, only group 1 is tagged.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(
                r"\b(?:Sr\.|Sra\.|Srta\.|D\.|Dña\.|Don|Doña|señor|señora)\s+(\p{Lu}\p{Ll}+(?:\s+(?:(?:de|del|de la)\s+)?\p{Lu}\p{Ll}+){0,3})",
            )
            .expect("Valid person rule"),
            "PER",
        ),
        (
            Regex::new(
                r"\b((?:\p{Lu}[\p{L}&\-]*\s+){1,4}(?:S\.L\.U\.|S\.A\.U\.|S\.L\.|S\.A\.|SLU\b|SAU\b|SL\b|SA\b))",
            )
            .expect("Valid organization rule"),
            "ORG",
        ),
        (
            Regex::new(
                r"(?i)\b\d{1,2}\s+de\s+(?:enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|setiembre|octubre|noviembre|diciembre)(?:\s+de\s+\d{4})?\b",
            )
            .expect("Valid written date rule"),
            "DATE",
        ),
        (
            Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").expect("Valid numeric date rule"),
            "DATE",
        ),
        (
            Regex::new(
                r"\b(?:Ley(?:\s+Orgánica)?|Real\s+Decreto(?:\s+Legislativo|-ley)?|RD)\s+\d{1,4}/\d{4}\b",
            )
            .expect("Valid statute rule"),
            "LAW",
        ),
    ]
});

/// Heuristic Spanish tagger.
#[derive(Debug, Clone)]
pub struct RuleModel {
    model_id: String,
}

impl RuleModel {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

impl EntityTagger for RuleModel {
    fn tag(&self, text: &str) -> Vec<TaggedSpan> {
        let mut spans = Vec::new();
        for (regex, label) in RULES.iter() {
            for caps in regex.captures_iter(text) {
                let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
                    continue;
                };
                spans.push(TaggedSpan::new(m.start(), m.end(), *label));
            }
        }
        spans.sort_by_key(|s| (s.start, s.end));
        spans
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Serves [`RuleModel`] for any Spanish model identifier (`es_*`).
#[derive(Debug, Clone, Default)]
pub struct BuiltinModelLoader;

impl BuiltinModelLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModelLoader for BuiltinModelLoader {
    fn load(&self, model_id: &str) -> AutocensorResult<Box<dyn EntityTagger>> {
        if model_id.starts_with("es_") {
            Ok(Box::new(RuleModel::new(model_id)))
        } else {
            Err(AutocensorError::ModelLoad {
                model: model_id.to_string(),
                reason: "no built-in model for this language".to_string(),
            })
        }
    }
}
