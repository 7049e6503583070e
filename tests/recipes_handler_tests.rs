use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mealwise::core::config::AppConfig;
use mealwise::recipes::RecipesService;
use mealwise::store::memory::MemoryStore;
use serde_json::{Value, json};

fn body(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}

fn get(params: Value) -> Value {
    json!({ "httpMethod": "GET", "queryStringParameters": params })
}

fn service() -> RecipesService<MemoryStore> {
    let config = AppConfig::default();
    let store = MemoryStore::new();
    let table = config.recipes_table.clone();

    store.put(&table, json!({
        "recipe_id": "pancakes",
        "title": "Fluffy Pancakes",
        "ingredients": ["2 cups flour", "1 cup milk", "2 eggs"],
        "categories_csv": "breakfast",
        "habits_csv": "vegetarian",
    }));
    store.put(&table, json!({
        "recipe_id": "brownies",
        "title": "Fudgy Brownies",
        "ingredients": ["1 cup sugar", "1/2 cup cocoa", "2 eggs"],
        "categories_csv": "dessert",
        "habits_csv": "vegetarian,nut_free",
    }));
    store.put(&table, json!({
        "recipe_id": "lentil-soup",
        "title": "Lentil Soup",
        "ingredients": ["1 cup lentils", "1 carrot", "4 cups vegetable broth"],
        "categories_csv": "soup,dinner",
        "habits_csv": "vegetarian,vegan,nut_free",
    }));
    // Duplicate row for the same recipe.
    store.put(&table, json!({
        "recipe_id": "brownies",
        "title": "Fudgy Brownies",
        "ingredients": ["1 cup sugar"],
        "categories_csv": "dessert",
        "habits_csv": "vegetarian,nut_free",
    }));

    RecipesService::new(store, config)
}

fn recipe_ids(parsed: &Value) -> Vec<String> {
    let mut ids: Vec<String> = parsed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["recipe_id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_preflight() {
    let response = service().handle(&json!({ "httpMethod": "OPTIONS" })).await;
    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["body"], "");
}

#[tokio::test]
async fn test_invalid_filters_are_rejected() {
    let response = service()
        .handle(&get(json!({ "category": "pizza", "allergy_filter": "cats" })))
        .await;

    assert_eq!(response["statusCode"], 400);
    let parsed = body(&response);
    assert_eq!(parsed["error"], "Invalid parameters");
    assert_eq!(parsed["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_single_recipe_lookup() {
    let service = service();

    let response = service.handle(&get(json!({ "recipe_id": "pancakes" }))).await;
    assert_eq!(response["statusCode"], 200);
    let recipe = body(&response);
    assert_eq!(recipe["title"], "Fluffy Pancakes");
    assert_eq!(recipe["categories"], json!(["breakfast"]));
    assert_eq!(recipe["has_image"], false);

    let response = service.handle(&get(json!({ "recipe_id": "nope" }))).await;
    assert_eq!(response["statusCode"], 404);
    assert_eq!(body(&response)["error"], "Recipe not found");
}

#[tokio::test]
async fn test_facets_omit_wildcard() {
    let response = service().handle(&get(json!({ "facets": "true" }))).await;
    let parsed = body(&response);

    assert_eq!(parsed["categories"].as_array().unwrap().len(), 8);
    assert!(!parsed["categories"].as_array().unwrap().contains(&json!("all")));
    assert_eq!(parsed["diet_types"].as_array().unwrap().len(), 7);
    assert_eq!(parsed["allergy_filters"].as_array().unwrap().len(), 8);
    assert_eq!(parsed["habits"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_blank_title_prefix_is_rejected() {
    let response = service().handle(&get(json!({ "title_prefix": "   " }))).await;

    assert_eq!(response["statusCode"], 400);
    assert_eq!(
        body(&response)["error"],
        "title_prefix is required and cannot be empty"
    );
}

#[tokio::test]
async fn test_title_search_is_case_insensitive() {
    let response = service().handle(&get(json!({ "title_prefix": "PANCAKE" }))).await;

    assert_eq!(response["statusCode"], 200);
    let parsed = body(&response);
    assert_eq!(recipe_ids(&parsed), vec!["pancakes"]);
    assert_eq!(parsed["count"], 1);
    assert!(parsed["next_token"].is_null());
}

#[tokio::test]
async fn test_category_filter_dedupes() {
    let response = service().handle(&get(json!({ "category": "dessert" }))).await;
    let parsed = body(&response);

    assert_eq!(recipe_ids(&parsed), vec!["brownies"]);
    assert_eq!(parsed["count"], 1);
}

#[tokio::test]
async fn test_combined_filters() {
    let response = service()
        .handle(&get(json!({ "diet_type": "vegetarian", "allergy_filter": "nut_free" })))
        .await;
    assert_eq!(recipe_ids(&body(&response)), vec!["brownies", "lentil-soup"]);

    let response = service()
        .handle(&get(json!({ "ingredients": "eggs", "category": "all" })))
        .await;
    assert_eq!(recipe_ids(&body(&response)), vec!["brownies", "pancakes"]);
}

#[tokio::test]
async fn test_filtered_query_respects_limit() {
    let config = AppConfig::default();
    let store = MemoryStore::new();
    for i in 0..12 {
        store.put(&config.recipes_table, json!({
            "recipe_id": format!("cake-{i}"),
            "title": format!("Cake {i}"),
            "categories_csv": "dessert",
            "habits_csv": "vegetarian",
        }));
    }
    let service = RecipesService::new(store, config);

    let response = service
        .handle(&get(json!({ "category": "dessert", "limit": "5" })))
        .await;
    assert_eq!(body(&response)["count"], 5);
}

#[tokio::test]
async fn test_filtered_results_are_cached() {
    let service = service();
    let params = get(json!({ "category": "soup" }));

    let first = service.handle(&params).await;
    assert_eq!(body(&first)["count"], 1);
    assert_eq!(service.cache().len(), 1);

    let table = AppConfig::default().recipes_table;
    service.store().put(&table, json!({
        "recipe_id": "chowder",
        "title": "Corn Chowder",
        "categories_csv": "soup",
        "habits_csv": "vegetarian",
    }));

    let second = service.handle(&params).await;
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_general_scan_pages_through_table() {
    let service = service();

    let first = body(&service.handle(&get(json!({ "limit": "3" }))).await);
    assert_eq!(first["count"], 3);
    let token = first["next_token"].as_str().unwrap().to_string();

    let second = body(
        &service
            .handle(&get(json!({ "limit": "3", "next_token": token })))
            .await,
    );
    assert_eq!(second["count"], 1);
    assert!(second["next_token"].is_null());
}

#[tokio::test]
async fn test_general_scan_ignores_bad_token() {
    let service = service();

    let response = service
        .handle(&get(json!({ "limit": "2", "next_token": "%%garbage%%" })))
        .await;
    assert_eq!(response["statusCode"], 200);

    let parsed = body(&response);
    assert_eq!(recipe_ids(&parsed), vec!["brownies", "pancakes"]);

    let token = parsed["next_token"].as_str().unwrap();
    let key: Value = serde_json::from_slice(&STANDARD.decode(token).unwrap()).unwrap();
    assert!(key.is_object());
}

#[tokio::test]
async fn test_handler_accepts_missing_query_string() {
    let response = service().handle(&json!({ "httpMethod": "GET" })).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(body(&response)["count"], 3);
}

// 450 rows over 2 segments: each segment holds 225 rows, so it needs three
// pages of 100. Desserts sit at indexes 400 and up.
fn large_table_service(max_scan_items: usize) -> RecipesService<MemoryStore> {
    let config = AppConfig {
        scan_segments: 2,
        max_scan_items,
        ..AppConfig::default()
    };
    let store = MemoryStore::new();
    for i in 0..450 {
        let category = if i >= 400 { "dessert" } else { "dinner" };
        store.put(&config.recipes_table, json!({
            "recipe_id": format!("r-{i}"),
            "title": format!("Recipe {i}"),
            "categories_csv": category,
            "habits_csv": "vegetarian",
        }));
    }
    RecipesService::new(store, config)
}

#[tokio::test]
async fn test_segment_scan_pages_past_first_page() {
    let service = large_table_service(5000);

    let response = service
        .handle(&get(json!({ "category": "dessert", "limit": "50" })))
        .await;
    assert_eq!(body(&response)["count"], 50);
}

#[tokio::test]
async fn test_segment_scan_stops_at_budget() {
    // 150 rows per segment: the scan stops after two pages.
    let service = large_table_service(300);

    let response = service
        .handle(&get(json!({ "category": "dessert", "limit": "50" })))
        .await;
    assert_eq!(response["statusCode"], 200);
    assert_eq!(body(&response)["count"], 0);
}
