//! Detection orchestrator.
//!
//! Combines the statistical recognizer with the deterministic pattern
//! matchers into a single ordered stream of entities.

use crate::domain::{DetectedEntity, EmailMatcher, NationalIdMatcher, PatternMatcher, PhoneMatcher};
use crate::error::AutocensorResult;
use crate::recognizer::{
    BuiltinModelLoader, ChainedModelLoader, DirectoryModelLoader, ModelLoader,
    StatisticalRecognizer,
};
use std::path::PathBuf;
use tracing::debug;

/// Per-call switches for [`Detector::detect_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Run the pattern matchers at all.
    pub use_regex: bool,
    /// Also run the email and phone matchers, which are noisier.
    pub include_email_phone: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            use_regex: true,
            include_email_phone: false,
        }
    }
}

/// How to build a [`Detector`].
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub language: String,
    pub prefer_small: bool,
    /// Directory holding `<model_id>.json` gazetteer models. Searched
    /// before the built-in rule model.
    pub model_dir: Option<PathBuf>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            language: "es".to_string(),
            prefer_small: false,
            model_dir: None,
        }
    }
}

impl DetectorConfig {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn prefer_small(mut self, prefer_small: bool) -> Self {
        self.prefer_small = prefer_small;
        self
    }

    pub fn with_model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = Some(model_dir.into());
        self
    }

    fn loader(&self) -> Box<dyn ModelLoader> {
        match &self.model_dir {
            Some(dir) => Box::new(ChainedModelLoader::new(vec![
                Box::new(DirectoryModelLoader::new(dir)),
                Box::new(BuiltinModelLoader::new()),
            ])),
            None => Box::new(BuiltinModelLoader::new()),
        }
    }
}

/// Single entry point for entity detection.
pub struct Detector {
    recognizer: StatisticalRecognizer,
    national_id: NationalIdMatcher,
    email: EmailMatcher,
    phone: PhoneMatcher,
}

impl Detector {
    /// Creates a detector around an existing recognizer.
    pub fn new(recognizer: StatisticalRecognizer) -> Self {
        Self {
            recognizer,
            national_id: NationalIdMatcher::new(),
            email: EmailMatcher::new(),
            phone: PhoneMatcher::new(),
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        let recognizer = StatisticalRecognizer::new(config.language.clone(), config.loader())
            .prefer_small(config.prefer_small);
        Self::new(recognizer)
    }

    pub fn recognizer(&self) -> &StatisticalRecognizer {
        &self.recognizer
    }

    /// Detects sensitive entities in `text`.
    ///
    /// The statistical pass always runs and its failure is returned as is;
    /// there is no silent fallback to pattern-only output. Results are
    /// sorted by `(start, end)` with a stable sort, so statistical entities
    /// precede pattern entities at identical offsets.
    pub fn detect(
        &self,
        text: &str,
        use_regex: bool,
        include_email_phone: bool,
    ) -> AutocensorResult<Vec<DetectedEntity>> {
        let mut entities = self.recognizer.recognize(text)?;

        if use_regex {
            let mut matchers: Vec<&dyn PatternMatcher> = vec![&self.national_id];
            if include_email_phone {
                matchers.push(&self.email);
                matchers.push(&self.phone);
            }
            for matcher in matchers {
                let found = matcher.find_entities(text);
                debug!(matcher = matcher.name(), count = found.len(), "pattern matches");
                entities.extend(found);
            }
        }

        entities.sort_by_key(|e| e.span());
        Ok(entities)
    }

    pub fn detect_with(
        &self,
        text: &str,
        options: DetectOptions,
    ) -> AutocensorResult<Vec<DetectedEntity>> {
        self.detect(text, options.use_regex, options.include_email_phone)
    }
}
