//! `next_token` cursors: base64 of the JSON-encoded last evaluated key.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::ApiError;

#[must_use]
pub fn encode_next_token(last_key: Option<&Value>) -> Option<String> {
    let key = last_key.filter(|k| !k.is_null())?;
    Some(STANDARD.encode(key.to_string()))
}

/// # Errors
///
/// Returns a parse error if the token is not base64 JSON, or a validation
/// error if the JSON is not an object.
pub fn decode_next_token(token: &str) -> Result<Value, ApiError> {
    let bytes = STANDARD.decode(token.trim())?;
    let key: Value = serde_json::from_slice(&bytes)?;
    if !key.is_object() {
        return Err(ApiError::ValidationError(
            "next_token does not hold a key object".to_string(),
        ));
    }
    Ok(key)
}
