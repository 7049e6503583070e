use mealwise::api::helpers::{
    CORS_HEADERS, err_response, error_details, internal_error, ok_json, preflight,
};
use mealwise::errors::ApiError;
use serde_json::{Value, json};

fn body(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}

#[test]
fn test_ok_json_wraps_body_as_string() {
    let response = ok_json(&json!({ "items": [], "count": 0 }));

    assert_eq!(response["statusCode"], 200);
    assert!(response["body"].is_string(), "Proxy body must be a string");
    assert_eq!(body(&response), json!({ "items": [], "count": 0 }));
}

#[test]
fn test_every_response_carries_cors_headers() {
    for response in [ok_json(&json!({})), err_response(404, "Not found"), preflight()] {
        for (name, value) in CORS_HEADERS {
            assert_eq!(
                response["headers"][name].as_str(),
                Some(value),
                "missing header {name}"
            );
        }
    }
}

#[test]
fn test_err_response_format() {
    let response = err_response(400, "Missing query");

    assert_eq!(response["statusCode"], 400);
    assert_eq!(body(&response), json!({ "error": "Missing query" }));
}

#[test]
fn test_error_details_lists_problems() {
    let details = vec!["Invalid category: pizza".to_string()];
    let response = error_details(400, "Invalid parameters", &details);

    let parsed = body(&response);
    assert_eq!(parsed["error"], "Invalid parameters");
    assert_eq!(parsed["details"][0], "Invalid category: pizza");
}

#[test]
fn test_internal_error_reports_type() {
    let response = internal_error(&ApiError::StoreError("throttled".to_string()));

    assert_eq!(response["statusCode"], 500);
    let parsed = body(&response);
    assert_eq!(parsed["type"], "StoreError");
    assert!(parsed["error"].as_str().unwrap().contains("throttled"));
}

#[test]
fn test_preflight_has_empty_body() {
    let response = preflight();
    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["body"], "");
}
