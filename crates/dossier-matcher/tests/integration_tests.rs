//! Integration tests for dossier-matcher
//!
//! These tests run duplicate detection against a registry snapshot loaded
//! the way callers load it: from JSON.

use dossier_domain::{ClientId, ExistingRecord, ExtractedFields};
use dossier_matcher::{DuplicateMatcher, MatchField, MatchPolicy};
use std::path::PathBuf;

fn load_registry() -> Vec<ExistingRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/registry.json");
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&json).unwrap()
}

fn id(n: u32) -> ClientId {
    ClientId::from_string(&format!("0190a1b2-0000-7000-8000-{:012}", n)).unwrap()
}

#[test]
fn test_registry_fixture_loads() {
    let registry = load_registry();
    assert_eq!(registry.len(), 4);
    assert!(registry[2].birth_date.is_none());
    assert!(registry[2].document_number.is_none());
}

#[test]
fn test_document_number_wins_over_dissimilar_name() {
    let registry = load_registry();
    let fields = ExtractedFields {
        full_name: "Ana García López".to_string(),
        document_number: "12345678A".to_string(),
        ..Default::default()
    };

    let result = DuplicateMatcher::default().find_duplicate(&fields, &registry);

    assert!(result.is_duplicate);
    assert_eq!(result.best_match.unwrap().id, id(4));
    assert_eq!(result.matching_fields, vec![MatchField::DocumentNumber]);
}

#[test]
fn test_name_with_birth_date_prefers_corroborated_record() {
    let registry = load_registry();
    let fields = ExtractedFields {
        full_name: "ANA GARCIA LÓPEZ".to_string(),
        birth_date: "15/07/1990".to_string(),
        ..Default::default()
    };

    let result = DuplicateMatcher::default().find_duplicate(&fields, &registry);

    assert!(result.is_duplicate);
    assert_eq!(result.match_score, 80);
    assert_eq!(result.best_match.unwrap().id, id(2));
}

#[test]
fn test_name_only_is_reported_but_not_duplicate() {
    let registry = load_registry();
    let fields = ExtractedFields {
        full_name: "Ana Garcia Lopez".to_string(),
        ..Default::default()
    };

    let result = DuplicateMatcher::default().find_duplicate(&fields, &registry);

    assert!(!result.is_duplicate);
    assert_eq!(result.match_score, 50);
    // first of the two equally similar records
    assert_eq!(result.best_match.unwrap().id, id(2));
}

#[test]
fn test_no_signal_means_no_best_match() {
    let registry = load_registry();
    let result = DuplicateMatcher::default().find_duplicate(&ExtractedFields::default(), &registry);

    assert!(!result.is_duplicate);
    assert!(result.best_match.is_none());
    assert!(result.matching_fields.is_empty());
}

#[test]
fn test_policy_from_toml_changes_decision() {
    let registry = load_registry();
    let policy = MatchPolicy::from_toml("duplicate_cutoff = 50").unwrap();
    let matcher = DuplicateMatcher::new(policy).unwrap();
    let fields = ExtractedFields {
        full_name: "Ana Garcia Lopez".to_string(),
        ..Default::default()
    };

    assert!(matcher.find_duplicate(&fields, &registry).is_duplicate);
}

#[test]
fn test_parallel_scan_matches_sequential_on_fixture() {
    let registry = load_registry();
    let matcher = DuplicateMatcher::default();
    let fields = ExtractedFields {
        full_name: "María José Fernández Ruíz".to_string(),
        birth_date: "02/03/1985".to_string(),
        ..Default::default()
    };

    let sequential = matcher.find_duplicate(&fields, &registry);
    let parallel = matcher.find_duplicate_parallel(&fields, &registry);

    assert_eq!(sequential, parallel);
    assert!(parallel.is_duplicate);
    assert_eq!(parallel.best_match.unwrap().id, id(1));
}
