//! Ranking of food candidates returned by a prefix query.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::foods::parse_maybe_json;

/// Candidates scoring below this are rejected.
pub const MIN_MATCH_SCORE: i32 = 80;

static BRANDED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bby\b|\bllc\b|\binc\b|\bltd\b").expect("static regex compile"));

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Label names on a food item: array entries, object keys, or a bare string.
#[must_use]
pub fn label_keys(labels: Option<&Value>) -> Vec<String> {
    let Some(labels) = labels else {
        return Vec::new();
    };
    match parse_maybe_json(labels.clone()) {
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Null => Vec::new(),
        other => vec![scalar_text(&other)],
    }
}

/// Scores one candidate against query `q` (already normalized).
#[must_use]
pub fn score_candidate(item: &Value, q: &str, label: Option<&str>) -> i32 {
    let name = item
        .get("name_lc")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_lowercase();

    let mut score = if name == q {
        100
    } else if name.starts_with(q) {
        80
    } else if name.contains(q) {
        60
    } else {
        0
    };

    let is_everyday = item
        .get("type")
        .map(scalar_text)
        .is_some_and(|t| t.eq_ignore_ascii_case("everyday"));
    if is_everyday {
        score += 25;
    }
    if BRANDED_RE.is_match(&name) {
        score -= 20;
    }

    if let Some(label) = label {
        if label_keys(item.get("labels")).iter().any(|k| k == label) {
            score += 50;
        }
    }

    score
}

/// Highest-scoring candidate, if it clears [`MIN_MATCH_SCORE`]. Ties keep store order.
#[must_use]
pub fn best_candidate<'a>(items: &'a [Value], q: &str, label: Option<&str>) -> Option<(&'a Value, i32)> {
    let mut scored: Vec<(&Value, i32)> = items
        .iter()
        .map(|item| (item, score_candidate(item, q, label)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().next().filter(|(_, score)| *score >= MIN_MATCH_SCORE)
}
