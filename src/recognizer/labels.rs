//! Mapping from model label vocabularies onto the canonical label set.

use crate::domain::Label;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static LABEL_MAP: Lazy<HashMap<&'static str, Label>> = Lazy::new(|| {
    [
        ("PER", Label::Person),
        ("PERSON", Label::Person),
        ("ORG", Label::Org),
        ("LOC", Label::Loc),
        ("GPE", Label::Loc),
        ("MISC", Label::Misc),
        ("NORP", Label::Misc),
        ("DATE", Label::Date),
        ("TIME", Label::Time),
        ("CARDINAL", Label::Number),
        ("QUANTITY", Label::Number),
        ("ORDINAL", Label::Number),
        ("NUMBER", Label::Number),
        ("LAW", Label::Law),
        ("EMAIL", Label::Email),
        ("PHONE", Label::Phone),
        ("ID_NUMBER", Label::IdNumber),
    ]
    .into_iter()
    .collect()
});

/// Maps a native model label to a canonical [`Label`].
///
/// Unknown labels pass through unchanged as [`Label::Other`].
pub fn normalize_label(native: &str) -> Label {
    LABEL_MAP
        .get(native)
        .cloned()
        .unwrap_or_else(|| Label::Other(native.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_variants_collapse() {
        assert_eq!(normalize_label("PER"), Label::Person);
        assert_eq!(normalize_label("PERSON"), Label::Person);
    }

    #[test]
    fn test_geography_and_numbers() {
        assert_eq!(normalize_label("GPE"), Label::Loc);
        assert_eq!(normalize_label("CARDINAL"), Label::Number);
        assert_eq!(normalize_label("ORDINAL"), Label::Number);
        assert_eq!(normalize_label("NORP"), Label::Misc);
    }

    #[test]
    fn test_canonical_names_are_identity() {
        for label in Label::CANONICAL.iter() {
            assert_eq!(&normalize_label(label.as_str()), label);
        }
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(normalize_label("FAC"), Label::Other("FAC".to_string()));
    }
}
