use serde_json::{Map, Number, Value};
use tracing::warn;

use super::tags;

/// Recursively unwraps `DynamoDB`-typed JSON (`{"S": ..}`, `{"N": ..}`, `{"M": ..}`, ...)
/// into plain JSON. Anything that is not a single-key type wrapper is walked
/// but otherwise left alone.
#[must_use]
pub fn unwrap_typed(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(unwrap_typed).collect()),
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some((tag, inner)) = map.iter().next() {
                    if let Some(plain) = unwrap_wrapper(tag, inner) {
                        return plain;
                    }
                }
            }
            Value::Object(map.into_iter().map(|(k, v)| (k, unwrap_typed(v))).collect())
        }
        other => other,
    }
}

fn unwrap_wrapper(tag: &str, inner: &Value) -> Option<Value> {
    match (tag, inner) {
        ("S", Value::String(s)) => Some(Value::String(s.clone())),
        ("N", Value::String(n)) => Some(number(n)),
        ("BOOL", Value::Bool(b)) => Some(Value::Bool(*b)),
        ("NULL", Value::Bool(true)) => Some(Value::Null),
        ("L", Value::Array(items)) => Some(Value::Array(
            items.iter().cloned().map(unwrap_typed).collect(),
        )),
        ("M", Value::Object(map)) => Some(Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), unwrap_typed(v.clone())))
                .collect(),
        )),
        ("SS", Value::Array(items)) => Some(Value::Array(items.clone())),
        ("NS", Value::Array(items)) => Some(Value::Array(
            items
                .iter()
                .map(|n| n.as_str().map_or_else(|| n.clone(), number))
                .collect(),
        )),
        _ => None,
    }
}

fn number(raw: &str) -> Value {
    if let Ok(i) = raw.trim().parse::<i64>() {
        return Value::Number(i.into());
    }
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

/// Turns `{"1": "step", "2": "step"}` into an array ordered by numeric key.
fn ordered_steps(map: &Map<String, Value>) -> Vec<Value> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    entries.into_iter().map(|(_, v)| v.clone()).collect()
}

fn csv_tags(csv: &str) -> Vec<Value> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Value::String(s.to_string()))
        .collect()
}

fn is_missing(item: &Map<String, Value>, key: &str) -> bool {
    item.get(key).is_none_or(Value::is_null)
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

fn non_empty_str<'a>(item: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Normalizes a stored recipe for API output. Returns `None` for anything that
/// is not a JSON object.
#[must_use]
pub fn normalize_recipe(item: Value, image_base_url: &str) -> Option<Value> {
    let Value::Object(map) = unwrap_typed(item) else {
        warn!("normalize_recipe: received null or invalid item");
        return None;
    };
    let mut item = map;

    if let Some(Value::Object(steps)) = item.get("instructions") {
        let steps = Value::Array(ordered_steps(steps));
        item.insert("instructions".to_string(), steps.clone());
        item.insert("directions".to_string(), steps);
    }

    if let Some(Value::Array(directions)) = item.get_mut("directions") {
        for dir in directions.iter_mut() {
            if !dir.is_string() {
                *dir = Value::String(match &*dir {
                    Value::Null => "null".to_string(),
                    other => other.to_string(),
                });
            }
        }
    }

    if is_missing(&item, "habits") || is_missing(&item, "categories") {
        let snapshot = Value::Object(item.clone());
        let habits = non_empty_str(&item, "habits_csv").map_or_else(
            || tags::habits(&snapshot).into_iter().map(Value::String).collect(),
            csv_tags,
        );
        let categories = non_empty_str(&item, "categories_csv").map_or_else(
            || tags::categories(&snapshot).into_iter().map(Value::String).collect(),
            csv_tags,
        );
        item.insert("habits".to_string(), Value::Array(habits));
        item.insert("categories".to_string(), Value::Array(categories));
    }

    apply_image_fields(&mut item, image_base_url);

    Some(Value::Object(item))
}

fn apply_image_fields(item: &mut Map<String, Value>, image_base_url: &str) {
    let has_display = truthy(item.get("image_display"));

    if !truthy(item.get("has_image")) && !has_display {
        let image_url = non_empty_str(item, "image_url").map(str::to_string);
        let image_name = non_empty_str(item, "image_filename")
            .or_else(|| non_empty_str(item, "image_name"))
            .map(str::to_string);

        if image_url.is_some() || image_name.is_some() {
            let display = image_url.or_else(|| {
                image_name.map(|name| format!("{}/{name}.jpg", image_base_url.trim_end_matches('/')))
            });
            item.insert("has_image".to_string(), Value::Bool(true));
            item.insert(
                "image_display".to_string(),
                display.map_or(Value::Null, Value::String),
            );
        } else {
            item.insert("has_image".to_string(), Value::Bool(false));
            item.insert("image_display".to_string(), Value::Null);
        }
    } else if let Some(display) = non_empty_str(item, "image_display") {
        if !display.contains(".jpg") && !display.contains(".jpeg") {
            let fixed = format!("{display}.jpg");
            item.insert("image_display".to_string(), Value::String(fixed));
        }
    }
}
