//! Store access for each kind of recipes request.

use std::collections::HashSet;

use futures::future::try_join_all;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::cache::QueryCache;
use super::constants::{ALL, PAGE_LIMIT, VALID_ALLERGY_FILTERS, VALID_CATEGORIES, VALID_DIET_TYPES};
use super::filters::{self, RecipeFilters};
use super::normalize::normalize_recipe;
use crate::api::helpers;
use crate::api::pagination::{decode_next_token, encode_next_token};
use crate::core::config::AppConfig;
use crate::core::models::PagedResponse;
use crate::errors::ApiError;
use crate::store::{Condition, DocumentStore, ScanRequest, Segment};

/// Shared state for the recipes Lambda: store handle, config and query cache.
pub struct RecipesService<S> {
    pub(crate) store: S,
    pub(crate) config: AppConfig,
    pub(crate) cache: QueryCache,
}

impl<S: DocumentStore> RecipesService<S> {
    #[must_use]
    pub fn new(store: S, config: AppConfig) -> Self {
        let cache = QueryCache::new(config.query_cache_ttl, config.query_cache_capacity);
        Self {
            store,
            config,
            cache,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn normalize_all(&self, items: Vec<Value>) -> Vec<Value> {
        items
            .into_iter()
            .filter_map(|item| normalize_recipe(item, &self.config.image_base_url))
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error if the store lookup fails.
    pub async fn single_recipe(&self, recipe_id: &str) -> Result<Value, ApiError> {
        let item = self
            .store
            .get_item(&self.config.recipes_table, json!({ "recipe_id": recipe_id }))
            .await?;

        let Some(item) = item else {
            return Ok(helpers::err_response(404, "Recipe not found"));
        };

        match normalize_recipe(item, &self.config.image_base_url) {
            Some(recipe) => Ok(helpers::ok_json(&recipe)),
            None => Ok(helpers::err_response(500, "Failed to process recipe data")),
        }
    }

    /// Available filter values, without the `all` wildcard.
    #[must_use]
    pub fn facets(&self) -> Value {
        let without_all = |list: &[&str]| -> Vec<String> {
            list.iter()
                .filter(|v| **v != ALL)
                .map(|v| (*v).to_string())
                .collect()
        };
        let diet_types = without_all(VALID_DIET_TYPES);
        let allergy_filters = without_all(VALID_ALLERGY_FILTERS);
        let habits: Vec<String> = diet_types
            .iter()
            .chain(allergy_filters.iter())
            .cloned()
            .collect();

        helpers::ok_json(&json!({
            "categories": without_all(VALID_CATEGORIES),
            "diet_types": diet_types,
            "allergy_filters": allergy_filters,
            "habits": habits,
        }))
    }

    /// Title search or filter query: cached parallel scan plus client-side filtering.
    ///
    /// # Errors
    ///
    /// Returns an error if any scan segment fails.
    pub async fn filtered_query(
        &self,
        filters: &RecipeFilters,
        limit: usize,
    ) -> Result<Value, ApiError> {
        let cache_key = QueryCache::key_for(filters, limit);
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let base = ScanRequest {
            table: self.config.recipes_table.clone(),
            limit: Some(PAGE_LIMIT),
            conditions: pushdown_conditions(filters),
            ..ScanRequest::default()
        };

        let items = self.parallel_scan(&base).await?;
        let recipes = filters::apply_all(self.normalize_all(items), filters);
        let mut recipes = dedupe_by_recipe_id(recipes);
        recipes.truncate(limit);

        let response = helpers::ok_json(&PagedResponse::new(recipes, None));
        self.cache.insert(cache_key, response.clone());
        Ok(response)
    }

    /// Plain paginated browsing with no filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub async fn general_scan(
        &self,
        limit: usize,
        next_token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let start_key = next_token.and_then(|token| {
            decode_next_token(token)
                .map_err(|e| warn!("Invalid next_token, ignoring: {}", e))
                .ok()
        });

        let page = self
            .store
            .scan(ScanRequest {
                table: self.config.recipes_table.clone(),
                limit: Some(i32::try_from(limit).unwrap_or(PAGE_LIMIT)),
                exclusive_start_key: start_key,
                ..ScanRequest::default()
            })
            .await?;

        let recipes = dedupe_by_recipe_id(self.normalize_all(page.items));
        let next = encode_next_token(page.last_evaluated_key.as_ref());
        Ok(helpers::ok_json(&PagedResponse::new(recipes, next)))
    }

    /// Runs `scan_segments` segment scans concurrently and concatenates them.
    async fn parallel_scan(&self, base: &ScanRequest) -> Result<Vec<Value>, ApiError> {
        let total = self.config.scan_segments.max(1);
        let segments = usize::try_from(total).unwrap_or(1);
        let budget = (self.config.max_scan_items / segments).max(1);
        let started = std::time::Instant::now();

        let scans = (0..total).map(|index| {
            self.scan_segment(base, Segment { index, total }, budget)
        });
        let items: Vec<Value> = try_join_all(scans).await?.into_iter().flatten().collect();

        info!(
            segments = total,
            items = items.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Parallel scan complete"
        );
        Ok(items)
    }

    async fn scan_segment(
        &self,
        base: &ScanRequest,
        segment: Segment,
        budget: usize,
    ) -> Result<Vec<Value>, ApiError> {
        let mut items = Vec::new();
        let mut scanned = 0usize;
        let mut start_key = None;

        loop {
            let page = self
                .store
                .scan(ScanRequest {
                    exclusive_start_key: start_key.take(),
                    segment: Some(segment),
                    ..base.clone()
                })
                .await?;

            scanned += page.scanned_count.max(1);
            items.extend(page.items);

            match page.last_evaluated_key {
                Some(key) if scanned < budget => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }
}

/// Tag filters the store can evaluate against the `*_csv` attributes.
#[must_use]
pub fn pushdown_conditions(filters: &RecipeFilters) -> Vec<Condition> {
    let candidates = [
        ("categories_csv", filters.category.as_ref()),
        ("habits_csv", filters.diet_type.as_ref()),
        ("habits_csv", filters.allergy_filter.as_ref()),
    ];
    candidates
        .into_iter()
        .filter_map(|(attribute, value)| {
            let value = value.filter(|v| !v.is_empty() && v.as_str() != ALL)?;
            Some(Condition::Contains {
                attribute: attribute.to_string(),
                value: value.clone(),
            })
        })
        .collect()
}

/// Keeps the first occurrence of each `recipe_id`.
#[must_use]
pub fn dedupe_by_recipe_id(recipes: Vec<Value>) -> Vec<Value> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|r| seen.insert(r.get("recipe_id").cloned().unwrap_or(Value::Null).to_string()))
        .collect()
}
