use serde_json::Value;

/// Fields stored as JSON-encoded strings on food items.
pub const JSON_FIELDS: [&str; 6] = [
    "nutrition_100g",
    "serving",
    "ingredient_analysis",
    "labels",
    "package_size",
    "alternate_names",
];

/// Parses `value` as JSON when it is a string holding JSON; otherwise returns it unchanged.
#[must_use]
pub fn parse_maybe_json(value: Value) -> Value {
    match value {
        Value::String(ref s) => serde_json::from_str(s).unwrap_or(value),
        other => other,
    }
}

#[must_use]
pub fn normalize_food(mut item: Value) -> Value {
    if let Some(map) = item.as_object_mut() {
        for field in JSON_FIELDS {
            if let Some(raw) = map.remove(field) {
                map.insert(field.to_string(), parse_maybe_json(raw));
            }
        }
    }
    item
}

/// GSI partition for a name: its first letter when a-z, otherwise `#`.
#[must_use]
pub fn first_letter_partition(name: &str) -> String {
    match name.trim().to_lowercase().chars().next() {
        Some(c) if c.is_ascii_lowercase() => c.to_string(),
        _ => "#".to_string(),
    }
}
