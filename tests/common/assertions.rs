//! Custom assertions for detection output.

use autocensor::{DetectedEntity, Label};

/// Asserts entities are ordered by `(start, end)`.
///
/// # Panics
/// Panics at the first out-of-order pair.
pub fn assert_sorted(entities: &[DetectedEntity]) {
    for pair in entities.windows(2) {
        assert!(
            pair[0].span() <= pair[1].span(),
            "Entities out of order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Asserts an entity with `label` and `text` exists and that its offsets
/// point at `text` inside `source`.
///
/// # Panics
/// Panics if no such entity exists or its offsets are wrong.
pub fn assert_entity<'a>(
    source: &str,
    entities: &'a [DetectedEntity],
    label: Label,
    text: &str,
) -> &'a DetectedEntity {
    let entity = entities
        .iter()
        .find(|e| e.label() == &label && e.text() == text)
        .unwrap_or_else(|| panic!("No {} entity '{}' in {:?}", label, text, entities));

    let span = entity
        .span()
        .unwrap_or_else(|| panic!("Entity '{}' has no offsets", text));
    let sliced: String = source
        .chars()
        .skip(span.start())
        .take(span.len())
        .collect();
    assert_eq!(sliced, text, "Offsets of '{}' do not match the source", text);
    entity
}
