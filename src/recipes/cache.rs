use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use super::filters::RecipeFilters;

/// Small TTL cache of rendered query responses, kept across warm invocations.
///
/// When full, the oldest inserted entry is evicted. Expired entries are
/// dropped when they are read.
#[derive(Debug)]
pub struct QueryCache {
    ttl: Duration,
    capacity: usize,
    inner: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, (Instant, Value)>,
    order: VecDeque<String>,
}

impl QueryCache {
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            inner: Mutex::new(CacheState::default()),
        }
    }

    /// Key covering every parameter that changes the response.
    #[must_use]
    pub fn key_for(filters: &RecipeFilters, limit: usize) -> String {
        serde_json::json!({
            "title": filters.title_prefix,
            "cat": filters.category,
            "diet": filters.diet_type,
            "allergy": filters.allergy_filter,
            "ingredients": filters.ingredients,
            "habit": filters.habit,
            "limit": limit,
        })
        .to_string()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut state = self.lock();
        let (stored_at, value) = state.entries.get(key)?;
        if stored_at.elapsed() < self.ttl {
            debug!(cache_key = %key, "Query cache hit");
            return Some(value.clone());
        }
        state.entries.remove(key);
        state.order.retain(|k| k != key);
        None
    }

    pub fn insert(&self, key: String, value: Value) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.lock();
        // An existing key keeps its place in the eviction order.
        if !state.entries.contains_key(&key) {
            while state.entries.len() >= self.capacity {
                let Some(oldest) = state.order.pop_front() else {
                    break;
                };
                state.entries.remove(&oldest);
            }
            state.order.push_back(key.clone());
        }
        state.entries.insert(key, (Instant::now(), value));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
