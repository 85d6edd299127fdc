//! Operator-controlled label activation.

use crate::domain::Label;
use std::collections::BTreeMap;

/// Which labels are shown in the review view.
///
/// High-risk categories (people, organizations, ID numbers, email, phone)
/// start enabled; everything else starts disabled. Labels that were never
/// configured, including pass-through model labels, are disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelActivation {
    states: BTreeMap<Label, bool>,
}

impl LabelActivation {
    /// Labels enabled by default.
    pub const DEFAULT_ACTIVE: [Label; 5] = [
        Label::Person,
        Label::Org,
        Label::IdNumber,
        Label::Email,
        Label::Phone,
    ];

    /// Every canonical label disabled.
    pub fn none() -> Self {
        Self {
            states: Label::CANONICAL.iter().map(|l| (l.clone(), false)).collect(),
        }
    }

    /// Exactly the given labels enabled.
    pub fn only<I: IntoIterator<Item = Label>>(labels: I) -> Self {
        let mut activation = Self::none();
        for label in labels {
            activation.set(label, true);
        }
        activation
    }

    pub fn set(&mut self, label: Label, enabled: bool) {
        self.states.insert(label, enabled);
    }

    pub fn is_active(&self, label: &Label) -> bool {
        self.states.get(label).copied().unwrap_or(false)
    }

    /// Enabled labels in canonical order, followed by any extra labels.
    pub fn active(&self) -> Vec<Label> {
        self.states
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// All known labels and their state.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, bool)> {
        self.states.iter().map(|(label, enabled)| (label, *enabled))
    }
}

impl Default for LabelActivation {
    fn default() -> Self {
        Self::only(Self::DEFAULT_ACTIVE)
    }
}
