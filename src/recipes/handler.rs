//! Recipes Lambda handler - routes a `GET /recipes` request to the right query.
//!
//! Routing order:
//! - CORS preflight
//! - filter validation
//! - single recipe by `recipe_id`
//! - `facets=true`
//! - title search
//! - filter query
//! - general browsing

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::constants::{DEFAULT_LIMIT, MAX_LIMIT};
use super::filters::{self, RecipeFilters};
use super::queries::RecipesService;
use crate::api::{helpers, parsing};
use crate::errors::ApiError;
use crate::store::DocumentStore;

pub use self::function_handler as handler;

/// Lambda handler for the recipes entrypoint.
///
/// # Errors
///
/// Never fails at the Lambda level; store errors become 500 responses.
#[tracing::instrument(level = "info", skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler<S: DocumentStore>(
    service: &RecipesService<S>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(service.handle(&event.payload).await)
}

impl<S: DocumentStore> RecipesService<S> {
    /// Handles one API Gateway proxy event and returns the proxy response.
    pub async fn handle(&self, payload: &Value) -> Value {
        if parsing::is_preflight(payload) {
            return helpers::preflight();
        }

        match self.route(payload).await {
            Ok(response) => response,
            Err(e) => {
                error!(event = %payload, "Recipes request failed");
                helpers::internal_error(&e)
            }
        }
    }

    async fn route(&self, payload: &Value) -> Result<Value, ApiError> {
        let params = parsing::query_params(payload);
        info!(?params, "Recipes Lambda received request");

        let filters = RecipeFilters::from_params(&params);
        let errors = filters::validate(&filters);
        if !errors.is_empty() {
            return Ok(helpers::error_details(400, "Invalid parameters", &errors));
        }

        if let Some(recipe_id) = params.get("recipe_id").filter(|v| !v.is_empty()) {
            return self.single_recipe(recipe_id).await;
        }

        if params.get("facets").is_some_and(|v| v == "true") {
            return Ok(self.facets());
        }

        let limit = parsing::parse_limit(
            params.get("limit").map(String::as_str),
            DEFAULT_LIMIT,
            MAX_LIMIT,
        );

        if let Some(title) = &filters.title_prefix {
            if title.trim().is_empty() {
                return Ok(helpers::err_response(
                    400,
                    "title_prefix is required and cannot be empty",
                ));
            }
            return self.filtered_query(&filters, limit).await;
        }

        if filters.has_any() {
            return self.filtered_query(&filters, limit).await;
        }

        self.general_scan(limit, params.get("next_token").map(String::as_str))
            .await
    }
}
