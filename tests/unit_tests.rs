// Unit tests for the hubspot-client scoring and model layers

use hubspot_client::core::{normalize, score_record, similarity, token_similarity, tokenize};
use hubspot_client::models::{
    FuzzySearchOptions, PageCursor, PropertyMatchOptions, Record, RecordPage, ScoredRecord,
    SearchCriteria,
};
use serde_json::json;

#[test]
fn test_exact_property_match_scores_two() {
    let record = Record::new(1).with_property("name", "Acme");
    let criteria = SearchCriteria::new().with("name", "Acme");

    assert_eq!(score_record(&record, &criteria), 2);
}

#[test]
fn test_partial_token_match_scores_one_per_token() {
    let record = Record::new(1).with_property("name", "Acme Corporation International");
    let criteria = SearchCriteria::new().with("name", "Acme International");

    // Both query tokens appear as substrings, neither string equals the other
    assert_eq!(score_record(&record, &criteria), 2);
}

#[test]
fn test_exact_match_outranks_full_partial_match() {
    let exact = Record::new(1).with_property("name", "Acme");
    let partial = Record::new(2).with_property("name", "Acme Holdings");
    let criteria = SearchCriteria::new().with("name", "Acme");

    let exact_score = score_record(&exact, &criteria);
    let partial_score = score_record(&partial, &criteria);

    assert_eq!(exact_score, 2);
    assert_eq!(partial_score, 1);
    assert!(
        exact_score > partial_score,
        "Exact matches should rank above partial matches"
    );
}

#[test]
fn test_scores_accumulate_across_criteria() {
    let record = Record::new(1)
        .with_property("name", "Acme")
        .with_property("city", "Dublin City Centre");
    let criteria = SearchCriteria::new()
        .with("name", "Acme")
        .with("city", "Dublin Centre");

    // 2 for the exact name, 1 per matched city token
    assert_eq!(score_record(&record, &criteria), 4);
}

#[test]
fn test_missing_property_contributes_nothing() {
    let record = Record::new(1).with_property("name", "Acme");
    let criteria = SearchCriteria::new()
        .with("name", "Acme")
        .with("industry", "Manufacturing");

    assert_eq!(score_record(&record, &criteria), 2);
}

#[test]
fn test_unrelated_record_scores_zero() {
    let record = Record::new(1).with_property("name", "Globex");
    let criteria = SearchCriteria::new().with("name", "Acme");

    assert_eq!(score_record(&record, &criteria), 0);
}

#[test]
fn test_number_criterion_matches_number_property() {
    let record = Record::new(1).with_property("numberofemployees", 250);
    let criteria = SearchCriteria::new().with("numberofemployees", 250);

    assert_eq!(score_record(&record, &criteria), 2);
}

#[test]
fn test_number_criterion_does_not_match_string_property() {
    let record = Record::new(1).with_property("numberofemployees", "250");
    let criteria = SearchCriteria::new().with("numberofemployees", 250);

    assert_eq!(score_record(&record, &criteria), 0);
}

#[test]
fn test_empty_criteria_scores_zero() {
    let record = Record::new(1).with_property("name", "Acme");

    assert_eq!(score_record(&record, &SearchCriteria::new()), 0);
}

#[test]
fn test_criteria_property_names_are_sorted() {
    let criteria = SearchCriteria::new()
        .with("website", "acme.com")
        .with("city", "Dublin")
        .with("name", "Acme");

    assert_eq!(criteria.property_names(), vec!["city", "name", "website"]);
}

#[test]
fn test_normalize_strips_accents_and_punctuation() {
    assert_eq!(normalize("Café & Co."), "cafe co");
    assert_eq!(normalize("ACME/Holdings-Group"), "acme holdings group");
    assert_eq!(normalize("  spaced   out  "), "spaced out");
}

#[test]
fn test_tokenize_drops_single_character_tokens() {
    let tokens = tokenize("a big co x");
    assert_eq!(tokens, vec!["big", "co"]);
}

#[test]
fn test_token_similarity_ratio() {
    // One of two tokens pairs; "corp" misses the pair threshold
    // against "corporation"
    let score = token_similarity("acme corp", "acme corporation");
    assert!((score - 0.5).abs() < f64::EPSILON);

    // Ratio divides by the longer token list
    let score = token_similarity("acme", "acme corporation");
    assert!((score - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_similarity_identical_strings() {
    assert!((similarity("Acme Corporation", "Acme Corporation") - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_similarity_is_accent_and_case_insensitive() {
    let accented = similarity("Café Acmé", "cafe acme");
    assert!(
        accented > 0.99,
        "Accent/case variants should be near-identical, got {}",
        accented
    );
}

#[test]
fn test_similarity_unrelated_strings_stay_low() {
    let score = similarity("Acme Corporation", "Zenith Plumbing Supplies");
    assert!(score < 0.6, "Unrelated names scored {}", score);
}

#[test]
fn test_page_cursor_from_numeric_json() {
    let cursor: PageCursor = serde_json::from_value(json!(15000)).unwrap();
    assert_eq!(cursor.as_str(), "15000");
}

#[test]
fn test_page_cursor_from_string_json() {
    let cursor: PageCursor = serde_json::from_value(json!("3451765be61fcc_offset")).unwrap();
    assert_eq!(cursor.as_str(), "3451765be61fcc_offset");
}

#[test]
fn test_page_cursor_echoes_back_verbatim() {
    let cursor = PageCursor::from(15000u64);
    assert_eq!(cursor.to_string(), "15000");
}

#[test]
fn test_record_id_from_company_payload() {
    let record: Record = serde_json::from_value(json!({
        "companyId": 42,
        "properties": {
            "name": { "value": "Acme", "timestamp": 1457708103000u64 }
        }
    }))
    .unwrap();

    assert_eq!(record.id, Some(42));
    assert_eq!(record.property_str("name"), Some("Acme"));
}

#[test]
fn test_record_id_from_ticket_payload() {
    let record: Record = serde_json::from_value(json!({
        "objectId": 176602,
        "properties": {
            "subject": { "value": "Printer on fire", "versions": [] }
        }
    }))
    .unwrap();

    assert_eq!(record.id, Some(176602));
}

#[test]
fn test_record_id_serializes_under_the_company_key() {
    // Whatever alias it was read from, the id writes back as companyId
    let record: Record = serde_json::from_value(json!({
        "objectId": 176602,
        "properties": {}
    }))
    .unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["companyId"], json!(176602));
    assert!(value.get("objectId").is_none());
}

#[test]
fn test_record_id_from_contact_payload() {
    let record: Record = serde_json::from_value(json!({
        "vid": 3234574,
        "properties": {}
    }))
    .unwrap();

    assert_eq!(record.id, Some(3234574));
}

#[test]
fn test_record_without_id_deserializes() {
    let record: Record = serde_json::from_value(json!({
        "properties": { "name": { "value": "Acme" } }
    }))
    .unwrap();

    assert_eq!(record.id, None);
}

#[test]
fn test_scored_record_serializes_flat_with_match_score() {
    let scored = ScoredRecord {
        record: Record::new(7).with_property("name", "Acme"),
        match_score: 3,
    };

    let value = serde_json::to_value(&scored).unwrap();
    assert_eq!(value["companyId"], json!(7));
    assert_eq!(value["matchScore"], json!(3));
    assert_eq!(value["properties"]["name"]["value"], json!("Acme"));
}

#[test]
fn test_match_options_defaults() {
    let options = PropertyMatchOptions::default();

    assert_eq!(options.limit, 5);
    assert!(options.recursive);
    assert!(!options.exhaustive);
    assert_eq!(options.max_pages, 100);
    assert!(options.return_properties.is_empty());
}

#[test]
fn test_match_options_deserialize_partial_json() {
    let options: PropertyMatchOptions = serde_json::from_value(json!({
        "limit": 10,
        "returnProperties": ["website"]
    }))
    .unwrap();

    assert_eq!(options.limit, 10);
    assert_eq!(options.return_properties, vec!["website"]);
    assert!(options.recursive, "Unset fields should take their defaults");
    assert_eq!(options.max_pages, 100);
}

#[test]
fn test_fuzzy_options_defaults() {
    let options = FuzzySearchOptions::default();

    assert_eq!(options.limit, 5);
    assert!((options.threshold - 0.70).abs() < f64::EPSILON);
    assert!(options.search_properties.is_empty());
    assert_eq!(options.max_pages, 100);
}

#[test]
fn test_record_page_empty_check() {
    let page = RecordPage::default();
    assert!(page.is_empty());
    assert!(!page.has_more);
    assert!(page.offset.is_none());
}
