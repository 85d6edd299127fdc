//! Test fixtures: scripted models and sample documents.
//!
//! The scripted tagger stands in for a trained model so tests can control
//! exactly which spans the statistical pass reports.

use autocensor::error::{AutocensorError, AutocensorResult};
use autocensor::recognizer::{EntityTagger, ModelLoader, TaggedSpan};
use autocensor::{Detector, StatisticalRecognizer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Sample paragraph from a court filing.
pub const FILING: &str = "El Sr. Iván Castillo Mendoza con DNI 01647550Z es culpable de estafar a Empresa S.L. con número de teléfono +51 68639912 y correo correo@gmail.com";

/// Contact line used by the end-to-end scenario.
pub const CONTACT: &str = "Contacto: ana@example.com, tel +34 612345678, DNI 12345678Z";

/// Tags every occurrence of a fixed list of literals.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTagger {
    model_id: String,
    literals: Vec<(String, String)>,
}

impl ScriptedTagger {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            literals: Vec::new(),
        }
    }

    /// Reports `literal` with the native `label` wherever it occurs.
    pub fn with(mut self, literal: &str, label: &str) -> Self {
        self.literals.push((literal.to_string(), label.to_string()));
        self
    }
}

impl EntityTagger for ScriptedTagger {
    fn tag(&self, text: &str) -> Vec<TaggedSpan> {
        let mut spans: Vec<TaggedSpan> = self
            .literals
            .iter()
            .flat_map(|(literal, label)| {
                text.match_indices(literal.as_str())
                    .map(move |(i, m)| TaggedSpan::new(i, i + m.len(), label.as_str()))
            })
            .collect();
        spans.sort_by_key(|s| (s.start, s.end));
        spans
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Loader serving scripted taggers and recording every load attempt.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLoader {
    available: HashMap<String, ScriptedTagger>,
    attempts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, tagger: ScriptedTagger) -> Self {
        self.available.insert(tagger.model_id.clone(), tagger);
        self
    }

    /// Shared handle on the attempt log, usable after the loader is boxed.
    pub fn attempts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.attempts)
    }
}

impl ModelLoader for ScriptedLoader {
    fn load(&self, model_id: &str) -> AutocensorResult<Box<dyn EntityTagger>> {
        self.attempts
            .lock()
            .expect("attempt log poisoned")
            .push(model_id.to_string());
        self.available
            .get(model_id)
            .cloned()
            .map(|t| Box::new(t) as Box<dyn EntityTagger>)
            .ok_or_else(|| AutocensorError::ModelLoad {
                model: model_id.to_string(),
                reason: "not installed".to_string(),
            })
    }
}

/// Spanish recognizer whose medium model tags the given literals.
pub fn scripted_recognizer(literals: &[(&str, &str)]) -> StatisticalRecognizer {
    let tagger = literals
        .iter()
        .fold(ScriptedTagger::new("es_core_news_md"), |t, (lit, label)| {
            t.with(lit, label)
        });
    StatisticalRecognizer::new("es", Box::new(ScriptedLoader::new().with_model(tagger)))
}

pub fn scripted_detector(literals: &[(&str, &str)]) -> Detector {
    Detector::new(scripted_recognizer(literals))
}
