//! Foods Lambda handler - `GET /foods?id=..` and `GET /foods?name_prefix=..`.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::normalize::{first_letter_partition, normalize_food};
use crate::api::pagination::{decode_next_token, encode_next_token};
use crate::api::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::core::models::PagedResponse;
use crate::errors::ApiError;
use crate::store::{DocumentStore, PrefixQuery};

pub use self::function_handler as handler;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

pub const NAME_PARTITION_ATTR: &str = "name_lc_first1";
pub const NAME_SORT_ATTR: &str = "name_lc";

pub struct FoodsService<S> {
    store: S,
    config: AppConfig,
}

/// Lambda handler for the foods entrypoint.
///
/// # Errors
///
/// Never fails at the Lambda level; store errors become 500 responses.
#[tracing::instrument(level = "info", skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler<S: DocumentStore>(
    service: &FoodsService<S>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(service.handle(&event.payload).await)
}

impl<S: DocumentStore> FoodsService<S> {
    #[must_use]
    pub fn new(store: S, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub async fn handle(&self, payload: &Value) -> Value {
        if parsing::is_preflight(payload) {
            return helpers::preflight();
        }

        match self.route(payload).await {
            Ok(response) => response,
            Err(e) => {
                error!(event = %payload, "Foods request failed");
                helpers::internal_error(&e)
            }
        }
    }

    async fn route(&self, payload: &Value) -> Result<Value, ApiError> {
        let params = parsing::query_params(payload);
        info!(?params, "Foods Lambda received request");

        if let Some(id) = params.get("id").filter(|v| !v.is_empty()) {
            return self.food_by_id(id).await;
        }

        if let Some(prefix) = params.get("name_prefix").filter(|v| !v.is_empty()) {
            let limit = parsing::parse_limit(
                params.get("limit").map(String::as_str),
                DEFAULT_LIMIT,
                MAX_LIMIT,
            );
            return self
                .search_by_prefix(prefix, limit, params.get("next_token").map(String::as_str))
                .await;
        }

        Ok(helpers::err_response(400, "Missing query"))
    }

    /// # Errors
    ///
    /// Returns an error if the store lookup fails.
    pub async fn food_by_id(&self, id: &str) -> Result<Value, ApiError> {
        let item = self
            .store
            .get_item(&self.config.foods_table, json!({ "id": id }))
            .await?;

        Ok(match item {
            Some(item) => helpers::ok_json(&normalize_food(item)),
            None => helpers::err_response(404, "Not found"),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the index query fails.
    pub async fn search_by_prefix(
        &self,
        name_prefix: &str,
        limit: usize,
        next_token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let prefix = name_prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Ok(helpers::err_response(400, "name_prefix required"));
        }

        let start_key = match next_token.filter(|t| !t.is_empty()).map(decode_next_token) {
            Some(Ok(key)) => Some(key),
            Some(Err(e)) => {
                warn!("Rejecting undecodable next_token: {}", e);
                return Ok(helpers::err_response(400, "Invalid next_token"));
            }
            None => None,
        };

        let page = self
            .store
            .query_prefix(PrefixQuery {
                table: self.config.foods_table.clone(),
                index: self.config.foods_gsi.clone(),
                partition_attr: NAME_PARTITION_ATTR.to_string(),
                partition_value: first_letter_partition(&prefix),
                sort_attr: NAME_SORT_ATTR.to_string(),
                prefix,
                limit: Some(i32::try_from(limit).unwrap_or(i32::MAX)),
                exclusive_start_key: start_key,
            })
            .await?;

        let items = page.items.into_iter().map(normalize_food).collect();
        let next = encode_next_token(page.last_evaluated_key.as_ref());
        Ok(helpers::ok_json(&PagedResponse::new(items, next)))
    }
}
