//! Detected entity model.
//!
//! A [`DetectedEntity`] is the atomic unit produced by every detector. It is
//! immutable once built: fields are private and the only "mutation" helpers
//! consume the value and return a new one.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Semantic category of a detected entity.
///
/// The canonical set is closed; labels emitted by a statistical model that
/// have no canonical mapping are carried verbatim in [`Label::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Person,
    Org,
    Loc,
    Misc,
    Date,
    Time,
    Number,
    Law,
    Email,
    Phone,
    IdNumber,
    Other(String),
}

impl Label {
    /// Every canonical label, in display order.
    pub const CANONICAL: [Label; 11] = [
        Label::Person,
        Label::Org,
        Label::Loc,
        Label::Misc,
        Label::Date,
        Label::Time,
        Label::Number,
        Label::Law,
        Label::Email,
        Label::Phone,
        Label::IdNumber,
    ];

    /// Returns the canonical name (`PERSON`, `ID_NUMBER`, ...).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Loc => "LOC",
            Self::Misc => "MISC",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Number => "NUMBER",
            Self::Law => "LAW",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::IdNumber => "ID_NUMBER",
            Self::Other(name) => name,
        }
    }

    /// Parses a canonical name. Anything else becomes [`Label::Other`].
    pub fn parse(name: &str) -> Self {
        Self::CANONICAL
            .iter()
            .find(|label| label.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Self::Other(name.to_string()))
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which detector produced an entity. Used for traceability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Statistical,
    Pattern,
    Manual,
}

/// Half-open character range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span, swapping the bounds if given in reverse.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A sensitive span found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedEntity {
    text: String,
    span: Option<Span>,
    label: Label,
    source: Source,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    meta: BTreeMap<String, String>,
}

impl DetectedEntity {
    /// Creates an entity anchored at a character span of the source text.
    pub fn new(text: impl Into<String>, span: Span, label: Label, source: Source) -> Self {
        Self {
            text: text.into(),
            span: Some(span),
            label,
            source,
            meta: BTreeMap::new(),
        }
    }

    /// Creates an entity with no reliable position in the source text.
    pub fn unanchored(text: impl Into<String>, label: Label, source: Source) -> Self {
        Self {
            text: text.into(),
            span: None,
            label,
            source,
            meta: BTreeMap::new(),
        }
    }

    /// Returns a copy of this entity carrying an extra meta attribute.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn start(&self) -> Option<usize> {
        self.span.map(|s| s.start())
    }

    pub fn end(&self) -> Option<usize> {
        self.span.map(|s| s.end())
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }
}
