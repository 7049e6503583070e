//! Nutrition Lambda handler - `POST /match` with `{"ingredients": [...]}`.
//!
//! Each ingredient line is parsed into amount, unit and name. The name is then
//! tried against the foods index through a series of search variations until a
//! candidate scores high enough. The matched food's per-100g nutrition is
//! scaled to the line's weight and summed across lines.

use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error, info};

use super::quantity::parse_amount_unit;
use super::scoring::best_candidate;
use super::summary::{self, NutritionSummary};
use super::units::convert_to_grams;
use super::variations::{is_negligible, search_variations};
use crate::api::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::errors::ApiError;
use crate::foods::handler::{NAME_PARTITION_ATTR, NAME_SORT_ATTR};
use crate::foods::{first_letter_partition, parse_maybe_json};
use crate::store::{DocumentStore, PrefixQuery};

pub use self::function_handler as handler;

pub const ESTIMATE_NOTE: &str = "Nutrition is estimated based on matched ingredient and parsed amount/unit. If no match, try simplifying ingredient name or supplementing database.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchAttempt {
    pub query: String,
    pub candidates: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedFood {
    pub id: Value,
    pub name: Value,
    pub nutrition_100g: Value,
    pub gram_used: f64,
    pub matched_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineResult {
    /// The request item echoed back unchanged.
    pub ingredient: Value,
    pub query: String,
    #[serde(rename = "match")]
    pub matched: Option<MatchedFood>,
    pub search_attempts: Vec<SearchAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried_variations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResponse {
    pub results: Vec<LineResult>,
    pub summary_100g_sum: NutritionSummary,
    pub note: &'static str,
}

pub struct NutritionService<S> {
    store: S,
    config: AppConfig,
}

/// Lambda handler for the nutrition-match entrypoint.
///
/// # Errors
///
/// Never fails at the Lambda level; store errors become 500 responses.
#[tracing::instrument(level = "info", skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler<S: DocumentStore>(
    service: &NutritionService<S>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(service.handle(&event.payload).await)
}

/// Finds the request document in a proxy event (string or already-parsed
/// body), a console test event, or a bare payload.
///
/// # Errors
///
/// Returns a parse error if a base64-flagged body does not decode.
pub fn extract_request(payload: &Value) -> Result<Option<Value>, ApiError> {
    if let Some(body @ Value::Object(_)) = payload.get("body") {
        return Ok(Some(body.clone()));
    }
    if let Some(body) = parsing::request_body(payload)? {
        return Ok(Some(serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!("Could not parse body as JSON, using raw body: {}", e);
            Value::String(body)
        })));
    }
    if let Some(ingredients) = payload.get("ingredients").filter(|v| !v.is_null()) {
        return Ok(Some(json!({ "ingredients": ingredients })));
    }
    if payload.is_null() {
        return Ok(None);
    }
    Ok(Some(payload.clone()))
}

fn line_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        _ => String::new(),
    }
}

fn line_label(item: &Value) -> Option<String> {
    match item.get("label")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl<S: DocumentStore> NutritionService<S> {
    #[must_use]
    pub fn new(store: S, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub async fn handle(&self, payload: &Value) -> Value {
        if parsing::is_preflight(payload) {
            return helpers::preflight();
        }

        let request = match extract_request(payload) {
            Ok(Some(request)) => request,
            Ok(None) => {
                info!("Missing body / ingredients in event");
                return helpers::err_response(400, "Missing body");
            }
            Err(e) => {
                info!("Rejecting undecodable body: {}", e);
                return helpers::err_response(400, "Missing body");
            }
        };

        let Some(ingredients) = request
            .get("ingredients")
            .and_then(Value::as_array)
            .filter(|list| !list.is_empty())
        else {
            return helpers::err_response(400, "ingredients[] required");
        };

        match self.match_ingredients(ingredients).await {
            Ok(response) => helpers::ok_json(&response),
            Err(e) => {
                error!("Nutrition match failed");
                helpers::internal_error(&e)
            }
        }
    }

    /// Matches every line and sums the nutrition of the matched foods.
    ///
    /// # Errors
    ///
    /// Returns an error if a foods index query fails.
    pub async fn match_ingredients(&self, ingredients: &[Value]) -> Result<MatchResponse, ApiError> {
        let mut results = Vec::with_capacity(ingredients.len());
        let mut summary = NutritionSummary::new();

        for item in ingredients {
            results.push(self.match_line(item, &mut summary).await?);
        }

        Ok(MatchResponse {
            results,
            summary_100g_sum: summary,
            note: ESTIMATE_NOTE,
        })
    }

    async fn match_line(
        &self,
        item: &Value,
        summary: &mut NutritionSummary,
    ) -> Result<LineResult, ApiError> {
        let label = line_label(item);
        let parsed = parse_amount_unit(&line_text(item));
        let negligible = is_negligible(parsed.amount, &parsed.name);
        let variations = search_variations(&parsed.name);

        let Some(first_query) = variations.first().cloned() else {
            return Ok(LineResult {
                ingredient: item.clone(),
                query: parsed.name,
                matched: None,
                search_attempts: Vec::new(),
                successful_query: None,
                tried_variations: None,
            });
        };

        let mut attempts = Vec::new();
        let mut found: Option<(Value, String)> = None;

        for q in &variations {
            let page = self
                .store
                .query_prefix(PrefixQuery {
                    table: self.config.foods_table.clone(),
                    index: self.config.foods_gsi.clone(),
                    partition_attr: NAME_PARTITION_ATTR.to_string(),
                    partition_value: first_letter_partition(q),
                    sort_attr: NAME_SORT_ATTR.to_string(),
                    prefix: q.clone(),
                    limit: Some(self.config.candidate_limit),
                    exclusive_start_key: None,
                })
                .await?;

            attempts.push(SearchAttempt {
                query: q.clone(),
                candidates: page.items.len(),
            });

            if let Some((candidate, score)) = best_candidate(&page.items, q, label.as_deref()) {
                info!(ingredient = %parsed.name, query = %q, score, "Matched ingredient");
                found = Some((candidate.clone(), q.clone()));
                break;
            }
        }

        let Some((candidate, successful_query)) = found else {
            info!(ingredient = %parsed.name, ?variations, "No match found");
            return Ok(LineResult {
                ingredient: item.clone(),
                query: first_query,
                matched: None,
                search_attempts: attempts,
                successful_query: None,
                tried_variations: Some(variations),
            });
        };

        let food_name = candidate
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| candidate.get("name_lc").and_then(Value::as_str))
            .unwrap_or("");
        let nutrition = parse_maybe_json(candidate.get("nutrition_100g").cloned().unwrap_or(Value::Null));

        let mut grams = if negligible {
            0.0
        } else {
            convert_to_grams(parsed.amount, &parsed.unit, parsed.unit_given, food_name)
        };
        if !grams.is_finite() || grams < 0.0 {
            grams = 0.0;
        }
        if grams > self.config.max_gram_per_line {
            info!(food = %food_name, grams, "Clamping large gram value");
            grams = self.config.max_gram_per_line;
        }

        summary::accumulate(summary, &nutrition, grams);

        Ok(LineResult {
            ingredient: item.clone(),
            query: first_query,
            matched: Some(MatchedFood {
                id: candidate.get("id").cloned().unwrap_or(Value::Null),
                name: candidate.get("name").cloned().unwrap_or(Value::Null),
                nutrition_100g: nutrition,
                gram_used: grams,
                matched_label: label,
            }),
            search_attempts: attempts,
            successful_query: Some(successful_query),
            tried_variations: None,
        })
    }
}
