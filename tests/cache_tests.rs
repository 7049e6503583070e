use std::time::Duration;

use mealwise::recipes::cache::QueryCache;
use mealwise::recipes::filters::RecipeFilters;
use serde_json::json;

#[test]
fn test_insert_then_get() {
    let cache = QueryCache::new(Duration::from_secs(30), 4);
    assert!(cache.is_empty());

    cache.insert("k".to_string(), json!({ "count": 1 }));
    assert_eq!(cache.get("k"), Some(json!({ "count": 1 })));
    assert_eq!(cache.get("missing"), None);
}

#[test]
fn test_oldest_entry_is_evicted_at_capacity() {
    let cache = QueryCache::new(Duration::from_secs(30), 2);
    cache.insert("a".to_string(), json!(1));
    cache.insert("b".to_string(), json!(2));
    cache.insert("c".to_string(), json!(3));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("c"), Some(json!(3)));
}

#[test]
fn test_reinserting_refreshes_value_without_eviction() {
    let cache = QueryCache::new(Duration::from_secs(30), 2);
    cache.insert("a".to_string(), json!(1));
    cache.insert("b".to_string(), json!(2));
    cache.insert("a".to_string(), json!(10));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("a"), Some(json!(10)));
    assert_eq!(cache.get("b"), Some(json!(2)));
}

#[test]
fn test_expired_entries_are_dropped_on_read() {
    let cache = QueryCache::new(Duration::ZERO, 4);
    cache.insert("k".to_string(), json!(1));

    assert_eq!(cache.get("k"), None);
    assert!(cache.is_empty());
}

#[test]
fn test_zero_capacity_stores_nothing() {
    let cache = QueryCache::new(Duration::from_secs(30), 0);
    cache.insert("k".to_string(), json!(1));
    assert!(cache.is_empty());
}

#[test]
fn test_key_covers_filters_and_limit() {
    let filters = RecipeFilters {
        category: Some("dessert".to_string()),
        ..RecipeFilters::default()
    };
    let other = RecipeFilters {
        habit: Some("vegan".to_string()),
        ..filters.clone()
    };

    assert_eq!(QueryCache::key_for(&filters, 10), QueryCache::key_for(&filters, 10));
    assert_ne!(QueryCache::key_for(&filters, 10), QueryCache::key_for(&filters, 20));
    assert_ne!(QueryCache::key_for(&filters, 10), QueryCache::key_for(&other, 10));
}

#[test]
fn test_reinserted_key_keeps_first_eviction_slot() {
    let cache = QueryCache::new(Duration::from_secs(30), 2);
    cache.insert("a".to_string(), json!(1));
    cache.insert("b".to_string(), json!(2));
    cache.insert("a".to_string(), json!(10));
    cache.insert("c".to_string(), json!(3));

    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("b"), Some(json!(2)));
    assert_eq!(cache.get("c"), Some(json!(3)));
}
