//! Common response builders for API handlers.
//!
//! Every handler answers with an API Gateway proxy response: a `statusCode`,
//! the CORS header set, and a JSON-encoded `body` string.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::errors::ApiError;

pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token",
    ),
    ("Content-Type", "application/json"),
];

fn cors_headers() -> Value {
    Value::Object(
        CORS_HEADERS
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
            .collect(),
    )
}

// ============================================================================
// Response Builders
// ============================================================================

/// Returns a response whose body is `body` serialized as JSON.
#[must_use]
pub fn json_response<T: Serialize + ?Sized>(status_code: u16, body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|e| {
        error!("Failed to serialize response body: {}", e);
        "{}".to_string()
    });
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body
    })
}

/// Returns a 200 OK response with the given JSON body.
#[must_use]
pub fn ok_json<T: Serialize + ?Sized>(body: &T) -> Value {
    json_response(200, body)
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Returns an error response that also lists what was wrong.
#[must_use]
pub fn error_details(status_code: u16, message: &str, details: &[String]) -> Value {
    json_response(status_code, &json!({ "error": message, "details": details }))
}

/// Returns a 500 response for an unexpected failure, logging it first.
#[must_use]
pub fn internal_error(err: &ApiError) -> Value {
    error!(error_type = err.kind(), "API Error: {}", err);
    json_response(500, &json!({ "error": err.to_string(), "type": err.kind() }))
}

/// Returns the 200 answer to a CORS preflight request.
#[must_use]
pub fn preflight() -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": ""
    })
}
