use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::ApiError;

pub type QueryParams = HashMap<String, String>;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of a REST (`httpMethod`) or HTTP API (`requestContext.http.method`) event.
pub fn http_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["httpMethod"]).or_else(|| v_str(payload, &["requestContext", "http", "method"]))
}

pub fn is_preflight(payload: &Value) -> bool {
    http_method(payload).is_some_and(|m| m.eq_ignore_ascii_case("OPTIONS"))
}

/// Flattens `queryStringParameters` into owned strings. A missing or null map is empty.
pub fn query_params(payload: &Value) -> QueryParams {
    payload
        .get("queryStringParameters")
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        Value::Null => return None,
                        other => other.to_string(),
                    };
                    Some((k.clone(), value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Returns the raw request body, decoding it when `isBase64Encoded` is set.
///
/// # Errors
///
/// Returns a parse error if the body is flagged as base64 but does not decode
/// to UTF-8 text.
pub fn request_body(payload: &Value) -> Result<Option<String>, ApiError> {
    let Some(body) = payload.get("body").and_then(Value::as_str) else {
        return Ok(None);
    };
    if body.is_empty() {
        return Ok(None);
    }

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(Some(body.to_string()));
    }

    let bytes = STANDARD.decode(body)?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| ApiError::ParseError(format!("body is not UTF-8: {e}")))
}

/// Parses a `limit` parameter. Missing, non-numeric or non-positive values give
/// `default`; larger values are capped at `max`.
#[must_use]
pub fn parse_limit(raw: Option<&str>, default: usize, max: usize) -> usize {
    let Some(n) = raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n > 0.0)
    else {
        return default;
    };
    if n >= max as f64 {
        return max;
    }
    // Truncation is intended: a fractional limit rounds down to a whole page.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = n.floor() as usize;
    whole.max(1)
}
