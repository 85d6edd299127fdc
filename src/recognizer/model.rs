//! Model abstraction for the statistical recognizer.
//!
//! A model is an opaque tagger from text to labeled byte spans. Where a
//! model comes from is the job of a [`ModelLoader`], which turns a model
//! identifier into a ready tagger.

use crate::error::{AutocensorError, AutocensorResult};

/// A span emitted by a model, in the model's own label vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSpan {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Native label, e.g. `PER`, `GPE`, `CARDINAL`.
    pub label: String,
}

impl TaggedSpan {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// A loaded entity tagger.
pub trait EntityTagger: Send + Sync {
    /// Tags `text`, returning spans in order of appearance.
    fn tag(&self, text: &str) -> Vec<TaggedSpan>;

    /// Returns the identifier the model was loaded under.
    fn model_id(&self) -> &str;
}

/// Strategy for turning a model identifier into a tagger.
pub trait ModelLoader: Send + Sync {
    fn load(&self, model_id: &str) -> AutocensorResult<Box<dyn EntityTagger>>;
}

/// Tries several loaders in order for the same identifier.
///
/// The error of the last loader is returned when none succeeds.
pub struct ChainedModelLoader {
    loaders: Vec<Box<dyn ModelLoader>>,
}

impl ChainedModelLoader {
    pub fn new(loaders: Vec<Box<dyn ModelLoader>>) -> Self {
        Self { loaders }
    }
}

impl ModelLoader for ChainedModelLoader {
    fn load(&self, model_id: &str) -> AutocensorResult<Box<dyn EntityTagger>> {
        let mut last_err = None;
        for loader in &self.loaders {
            match loader.load(model_id) {
                Ok(model) => return Ok(model),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| AutocensorError::ModelLoad {
            model: model_id.to_string(),
            reason: "no model loaders configured".to_string(),
        }))
    }
}
