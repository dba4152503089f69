use serde_json::Value;

use crate::models::{Record, SearchCriteria};

/// Calculate a match score for a record against property criteria
///
/// Scoring rules, applied per criterion:
/// - exact value match (any JSON type): +2
/// - otherwise, when both sides are strings: +1 for each whitespace
///   token of the criterion contained in the record's value
///
/// Criteria the record carries no value for contribute nothing. A total
/// of zero means the record does not match at all.
pub fn score_record(record: &Record, criteria: &SearchCriteria) -> u32 {
    let mut score = 0;

    for (name, expected) in criteria.iter() {
        score += score_property(record.property_value(name), expected);
    }

    score
}

/// Score a single property slot against its criterion
#[inline]
fn score_property(actual: Option<&Value>, expected: &Value) -> u32 {
    let actual = match actual {
        Some(value) => value,
        None => return 0,
    };

    // An exact match of a property is worth more than partial matches
    if actual == expected {
        return 2;
    }

    // For strings we can check partial matches
    match (actual.as_str(), expected.as_str()) {
        (Some(actual), Some(expected)) => partial_match_score(actual, expected),
        _ => 0,
    }
}

/// Count criterion tokens contained in the value
///
/// Containment is case-sensitive substring matching, so "Acme" scores
/// against "Acme Corporation" but "acme" does not.
#[inline]
fn partial_match_score(actual: &str, expected: &str) -> u32 {
    expected
        .split_whitespace()
        .filter(|token| actual.contains(token))
        .count() as u32
}
