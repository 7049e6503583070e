//! Client-side recipe filters applied after the store returns candidates.

use regex::RegexBuilder;
use serde_json::Value;

use super::constants::{ALL, VALID_ALLERGY_FILTERS, VALID_CATEGORIES, VALID_DIET_TYPES};
use crate::api::parsing::QueryParams;

/// The filter-bearing query parameters of a recipes request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilters {
    pub habit: Option<String>,
    pub category: Option<String>,
    pub diet_type: Option<String>,
    pub allergy_filter: Option<String>,
    pub title_prefix: Option<String>,
    pub ingredients: Option<String>,
}

impl RecipeFilters {
    /// Empty parameter values count as absent.
    #[must_use]
    pub fn from_params(params: &QueryParams) -> Self {
        let get = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();
        Self {
            habit: get("habit"),
            category: get("category"),
            diet_type: get("diet_type"),
            allergy_filter: get("allergy_filter"),
            title_prefix: get("title_prefix"),
            ingredients: get("ingredients"),
        }
    }

    #[must_use]
    pub fn has_any(&self) -> bool {
        self.habit.is_some()
            || self.category.is_some()
            || self.diet_type.is_some()
            || self.allergy_filter.is_some()
            || self.title_prefix.is_some()
            || self.ingredients.is_some()
    }
}

/// Returns one message per invalid `category`, `diet_type` or `allergy_filter`.
#[must_use]
pub fn validate(filters: &RecipeFilters) -> Vec<String> {
    let checks: [(&str, Option<&String>, &[&str]); 3] = [
        ("category", filters.category.as_ref(), VALID_CATEGORIES),
        ("diet_type", filters.diet_type.as_ref(), VALID_DIET_TYPES),
        ("allergy_filter", filters.allergy_filter.as_ref(), VALID_ALLERGY_FILTERS),
    ];

    checks
        .into_iter()
        .filter_map(|(name, value, valid)| {
            let value = value?;
            (!valid.contains(&value.as_str())).then(|| {
                format!(
                    "Invalid {name}: {value}. Valid options: {}",
                    valid.join(", ")
                )
            })
        })
        .collect()
}

fn active(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty() && *v != ALL)
}

fn list_contains(recipe: &Value, field: &str, tag: &str) -> bool {
    recipe
        .get(field)
        .and_then(Value::as_array)
        .is_some_and(|list| list.iter().any(|v| v.as_str() == Some(tag)))
}

pub fn filter_by_tag(recipes: Vec<Value>, field: &str, tag: Option<&String>) -> Vec<Value> {
    let Some(tag) = active(tag) else {
        return recipes;
    };
    recipes
        .into_iter()
        .filter(|r| list_contains(r, field, tag))
        .collect()
}

/// Case-insensitive substring match on `title`.
pub fn filter_by_title(recipes: Vec<Value>, title_prefix: Option<&String>) -> Vec<Value> {
    let Some(needle) = title_prefix
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
    else {
        return recipes;
    };
    recipes
        .into_iter()
        .filter(|r| {
            r.get("title")
                .and_then(Value::as_str)
                .is_some_and(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Keeps recipes where ANY requested ingredient appears as a whole word in
/// ANY of the recipe's ingredient lines. `ingredients` is a comma-separated list.
pub fn filter_by_ingredients(recipes: Vec<Value>, ingredients: Option<&String>) -> Vec<Value> {
    let Some(raw) = ingredients else {
        return recipes;
    };

    let patterns: Vec<regex::Regex> = raw
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|term| {
            RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
                .case_insensitive(true)
                .build()
                .ok()
        })
        .collect();

    if patterns.is_empty() {
        return recipes;
    }

    recipes
        .into_iter()
        .filter(|recipe| {
            recipe
                .get("ingredients")
                .and_then(Value::as_array)
                .is_some_and(|lines| {
                    lines
                        .iter()
                        .filter_map(Value::as_str)
                        .any(|line| patterns.iter().any(|re| re.is_match(line)))
                })
        })
        .collect()
}

/// Applies every active filter in turn.
#[must_use]
pub fn apply_all(recipes: Vec<Value>, filters: &RecipeFilters) -> Vec<Value> {
    let recipes = filter_by_tag(recipes, "habits", filters.habit.as_ref());
    let recipes = filter_by_tag(recipes, "categories", filters.category.as_ref());
    let recipes = filter_by_tag(recipes, "habits", filters.diet_type.as_ref());
    let recipes = filter_by_tag(recipes, "habits", filters.allergy_filter.as_ref());
    let recipes = filter_by_title(recipes, filters.title_prefix.as_ref());
    filter_by_ingredients(recipes, filters.ingredients.as_ref())
}
