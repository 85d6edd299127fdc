//! Integration tests for the deterministic pattern matchers.

use autocensor::domain::{
    EmailMatcher, ManualTermMatcher, NationalIdMatcher, PatternMatcher, PhoneMatcher,
};
use autocensor::{Label, Source};

mod common;
use common::*;

mod national_id {
    use super::*;

    #[test]
    fn test_dni_is_national() {
        let entities = NationalIdMatcher::new().find_entities("01647550Z");
        assert_eq!(entities.len(), 1);
        let entity = assert_entity("01647550Z", &entities, Label::IdNumber, "01647550Z");
        assert_eq!(entity.meta("id_type"), Some("national"));
        assert_eq!(entity.source(), Source::Pattern);
    }

    #[test]
    fn test_nie_is_foreign_resident() {
        let entities = NationalIdMatcher::new().find_entities("X1234567L");
        assert_eq!(entities.len(), 1);
        let entity = assert_entity("X1234567L", &entities, Label::IdNumber, "X1234567L");
        assert_eq!(entity.meta("id_type"), Some("foreign-resident"));
    }

    #[test]
    fn test_bare_eight_digits_do_not_match() {
        assert!(NationalIdMatcher::new().find_entities("12345678").is_empty());
        assert!(NationalIdMatcher::new()
            .find_entities("expediente 12345678 de 2020")
            .is_empty());
    }

    #[test]
    fn test_embedded_in_longer_token_rejected() {
        assert!(NationalIdMatcher::new()
            .find_entities("ref901647550Z")
            .is_empty());
    }

    #[test]
    fn test_mixed_document_sorted() {
        let text = "NIE Y7654321G; DNI 01647550Z; NIE X1234567L";
        let entities = NationalIdMatcher::new().find_entities(text);
        assert_sorted(&entities);
        let kinds: Vec<_> = entities.iter().filter_map(|e| e.meta("id_type")).collect();
        assert_eq!(kinds, vec!["foreign-resident", "national", "foreign-resident"]);
    }
}

mod email {
    use super::*;

    #[test]
    fn test_full_address_matches() {
        let entities = EmailMatcher::new().find_entities("correo@gmail.com");
        assert_entity("correo@gmail.com", &entities, Label::Email, "correo@gmail.com");
    }

    #[test]
    fn test_missing_tld_does_not_match() {
        assert!(EmailMatcher::new().find_entities("correo@gmail").is_empty());
    }
}

mod phone {
    use super::*;

    #[test]
    fn test_filing_phone() {
        let entities = PhoneMatcher::new().find_entities(FILING);
        assert_eq!(entities.len(), 1);
        assert_entity(FILING, &entities, Label::Phone, "+51 68639912");
    }

    #[test]
    fn test_contact_phone_without_id_digits() {
        let phones = PhoneMatcher::new().extract_all(CONTACT);
        assert_eq!(phones, vec!["+34 612345678".to_string()]);
    }

    #[test]
    fn test_digits_meta() {
        let entities = PhoneMatcher::new().find_entities("tel. 91 123 45 67");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].meta("digits"), Some("911234567"));
    }
}

mod manual {
    use super::*;

    const TEXT: &str = "Declara iván castillo que IVÁN CASTILLO no conoce a Iván Castillo.";

    #[test]
    fn test_case_insensitive_matches_every_casing() {
        let matcher = ManualTermMatcher::new(["Iván Castillo"], false);
        let entities = matcher.find_entities(TEXT);
        assert_eq!(entities.len(), 3);
        assert_entity(TEXT, &entities, Label::Misc, "iván castillo");
        assert_entity(TEXT, &entities, Label::Misc, "IVÁN CASTILLO");
        assert_entity(TEXT, &entities, Label::Misc, "Iván Castillo");
    }

    #[test]
    fn test_case_sensitive_matches_exact_case_only() {
        let matcher = ManualTermMatcher::new(["Iván Castillo"], true);
        let entities = matcher.find_entities(TEXT);
        assert_eq!(entities.len(), 1);
        assert_entity(TEXT, &entities, Label::Misc, "Iván Castillo");
    }

    #[test]
    fn test_regex_syntax_is_literal() {
        let terms = ["[", "a|b", r"\d+", "(?i)x", "$^", "*"];
        let matcher = ManualTermMatcher::new(terms, true);
        assert_eq!(matcher.term_count(), terms.len());

        let text = r"a|b no es \d+ ni [ ni (?i)x ni $^ ni *";
        let found = matcher.extract_all(text);
        assert_eq!(found.len(), terms.len());
        assert!(matcher.find_entities("ab 123 X").is_empty());
    }

    #[test]
    fn test_term_exceeding_size_limit_is_skipped() {
        // Case folding turns every character into a class, so this blows
        // past the compiled regex size limit.
        let oversized = "k".repeat(1_000_000);
        let matcher = ManualTermMatcher::new(["Empresa", oversized.as_str(), "correo"], false);
        assert_eq!(matcher.term_count(), 2);

        assert_eq!(
            matcher.extract_all(FILING),
            vec![
                "Empresa".to_string(),
                "correo".to_string(),
                "correo".to_string()
            ]
        );
        let unmatched: Vec<_> = matcher
            .find_with_unmatched("sin coincidencias")
            .iter()
            .map(|e| e.text().to_string())
            .collect();
        assert_eq!(unmatched, vec!["Empresa", "correo"]);
    }

    #[test]
    fn test_non_overlapping_occurrences() {
        let matcher = ManualTermMatcher::new(["aa"], true);
        assert_eq!(matcher.extract_all("aaaa").len(), 2);
    }

    #[test]
    fn test_manual_provenance() {
        let matcher = ManualTermMatcher::new(["Empresa"], true);
        let entities = matcher.find_entities(FILING);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].source(), Source::Manual);
        assert_eq!(entities[0].meta("term"), Some("Empresa"));
    }
}
