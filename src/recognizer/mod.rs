//! Statistical recognizer adapter.
//!
//! Isolates the rest of the crate from any particular entity-recognition
//! model. The adapter:
//!
//! 1. Defers loading until the first recognition call
//! 2. Tries an ordered list of candidate model identifiers and keeps the
//!    first one that loads
//! 3. Maps the model's native labels onto the canonical [`Label`] set
//! 4. Converts byte spans into character offsets
//!
//! [`Label`]: crate::domain::Label

pub mod gazetteer;
pub mod labels;
pub mod model;
pub mod rules;

pub use gazetteer::{DirectoryModelLoader, GazetteerDefinition, GazetteerModel};
pub use labels::normalize_label;
pub use model::{ChainedModelLoader, EntityTagger, ModelLoader, TaggedSpan};
pub use rules::{BuiltinModelLoader, RuleModel};

use crate::domain::{CharOffsets, DetectedEntity, Source};
use crate::error::{AutocensorError, AutocensorResult};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Returns candidate model identifiers for a language, in load order.
///
/// Spanish has three model sizes; the medium model is preferred unless
/// `prefer_small` is set. Other languages fall back to a medium/small pair.
pub fn candidate_models(language: &str, prefer_small: bool) -> Vec<String> {
    if language.starts_with("es") {
        let order: [&str; 3] = if prefer_small {
            ["es_core_news_sm", "es_core_news_md", "es_core_news_lg"]
        } else {
            ["es_core_news_md", "es_core_news_sm", "es_core_news_lg"]
        };
        order.iter().map(|s| s.to_string()).collect()
    } else {
        let (first, second) = if prefer_small { ("sm", "md") } else { ("md", "sm") };
        vec![
            format!("{}_core_news_{}", language, first),
            format!("{}_core_news_{}", language, second),
        ]
    }
}

/// Observable state of the lazily loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    /// No load has been attempted yet.
    Unloaded,
    /// A model is loaded and will be reused for the adapter's lifetime.
    Loaded { model_id: String },
    /// The last load exhausted every candidate.
    Failed {
        attempted: Vec<String>,
        reason: String,
    },
}

enum ModelState {
    Unloaded,
    Loaded(Arc<dyn EntityTagger>),
    Failed {
        attempted: Vec<String>,
        reason: String,
    },
}

/// Lazily loading adapter around an [`EntityTagger`].
///
/// Loading is serialized by an internal mutex, so the model is loaded at
/// most once even if several threads call [`recognize`](Self::recognize)
/// concurrently. A failed load is retried on the next call.
pub struct StatisticalRecognizer {
    language: String,
    prefer_small: bool,
    loader: Box<dyn ModelLoader>,
    state: Mutex<ModelState>,
}

impl StatisticalRecognizer {
    /// Creates an adapter. Nothing is loaded until first use.
    pub fn new(language: impl Into<String>, loader: Box<dyn ModelLoader>) -> Self {
        Self {
            language: language.into(),
            prefer_small: false,
            loader,
            state: Mutex::new(ModelState::Unloaded),
        }
    }

    /// Creates an adapter backed by the built-in rule model.
    pub fn with_builtin_models(language: impl Into<String>) -> Self {
        Self::new(language, Box::new(BuiltinModelLoader::new()))
    }

    /// Tries smaller models first.
    pub fn prefer_small(mut self, prefer_small: bool) -> Self {
        self.prefer_small = prefer_small;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Candidate identifiers this adapter will try, in order.
    pub fn candidates(&self) -> Vec<String> {
        candidate_models(&self.language, self.prefer_small)
    }

    pub fn status(&self) -> ModelStatus {
        match &*self.lock_state() {
            ModelState::Unloaded => ModelStatus::Unloaded,
            ModelState::Loaded(model) => ModelStatus::Loaded {
                model_id: model.model_id().to_string(),
            },
            ModelState::Failed { attempted, reason } => ModelStatus::Failed {
                attempted: attempted.clone(),
                reason: reason.clone(),
            },
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ModelState> {
        // A panic inside a loader leaves the state untouched, so a poisoned
        // lock still guards a consistent value.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the loaded model, loading it on first use.
    pub fn load(&self) -> AutocensorResult<Arc<dyn EntityTagger>> {
        let mut state = self.lock_state();
        if let ModelState::Loaded(model) = &*state {
            return Ok(Arc::clone(model));
        }

        let candidates = self.candidates();
        let mut last_err = None;
        for candidate in &candidates {
            debug!(model = %candidate, language = %self.language, "trying model candidate");
            match self.loader.load(candidate) {
                Ok(model) => {
                    info!(model = %candidate, "loaded recognition model");
                    let model: Arc<dyn EntityTagger> = Arc::from(model);
                    *state = ModelState::Loaded(Arc::clone(&model));
                    return Ok(model);
                }
                Err(e) => {
                    debug!(model = %candidate, error = %e, "model candidate unavailable");
                    last_err = Some(e);
                }
            }
        }

        *state = ModelState::Failed {
            attempted: candidates.clone(),
            reason: last_err
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default(),
        };
        Err(AutocensorError::RecognizerUnavailable {
            language: self.language.clone(),
            attempted: candidates,
            source: last_err.map(Box::new),
        })
    }

    /// Runs the model over `text` and returns canonical entities.
    ///
    /// Spans that fall outside the text or off a character boundary are
    /// dropped with a warning.
    pub fn recognize(&self, text: &str) -> AutocensorResult<Vec<DetectedEntity>> {
        let model = self.load()?;
        let offsets = CharOffsets::new(text);

        let entities: Vec<DetectedEntity> = model
            .tag(text)
            .into_iter()
            .filter_map(|span| {
                let converted = text
                    .get(span.start..span.end)
                    .zip(offsets.span(span.start, span.end));
                match converted {
                    Some((matched, char_span)) => Some(DetectedEntity::new(
                        matched,
                        char_span,
                        normalize_label(&span.label),
                        Source::Statistical,
                    )),
                    None => {
                        warn!(
                            model = model.model_id(),
                            start = span.start,
                            end = span.end,
                            "dropping span outside text bounds"
                        );
                        None
                    }
                }
            })
            .collect();

        debug!(count = entities.len(), "statistical entities recognized");
        Ok(entities)
    }
}
