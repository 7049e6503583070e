use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Condition, DocumentStore, Page, PrefixQuery, ScanRequest};
use crate::errors::ApiError;

/// In-process [`DocumentStore`] for tests and local runs.
///
/// Tables are insertion-ordered lists of JSON objects. Cursors are
/// `{"offset": n}` objects; `Limit` counts items read before filtering, the
/// same way `DynamoDB` does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, table: &str, item: Value) {
        self.lock().entry(table.to_string()).or_default().push(item);
    }

    #[must_use]
    pub fn len(&self, table: &str) -> usize {
        self.lock().get(table).map_or(0, Vec::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Value>>> {
        self.tables
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().get(table).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_item(&self, table: &str, key: Value) -> Result<Option<Value>, ApiError> {
        let Some(key) = key.as_object() else {
            return Err(ApiError::ParseError(
                "expected a JSON object for a key".to_string(),
            ));
        };
        Ok(self
            .rows(table)
            .into_iter()
            .find(|item| key.iter().all(|(k, v)| item.get(k) == Some(v))))
    }

    async fn scan(&self, request: ScanRequest) -> Result<Page, ApiError> {
        let rows: Vec<Value> = self
            .rows(&request.table)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| {
                request.segment.is_none_or(|s| {
                    let total = usize::try_from(s.total.max(1)).unwrap_or(1);
                    usize::try_from(s.index).is_ok_and(|idx| i % total == idx)
                })
            })
            .map(|(_, item)| item)
            .collect();

        let (window, last_evaluated_key) =
            paginate(&rows, request.exclusive_start_key.as_ref(), request.limit);
        let scanned_count = window.len();
        let items = window
            .into_iter()
            .filter(|item| request.conditions.iter().all(|c| matches(item, c)))
            .collect();

        Ok(Page {
            items,
            last_evaluated_key,
            scanned_count,
        })
    }

    async fn query_prefix(&self, query: PrefixQuery) -> Result<Page, ApiError> {
        let mut rows: Vec<Value> = self
            .rows(&query.table)
            .into_iter()
            .filter(|item| {
                item.get(&query.partition_attr).and_then(Value::as_str)
                    == Some(query.partition_value.as_str())
                    && item
                        .get(&query.sort_attr)
                        .and_then(Value::as_str)
                        .is_some_and(|s| s.starts_with(&query.prefix))
            })
            .collect();

        // Index order is the sort key order.
        rows.sort_by(|a, b| {
            let ka = a.get(&query.sort_attr).and_then(Value::as_str).unwrap_or("");
            let kb = b.get(&query.sort_attr).and_then(Value::as_str).unwrap_or("");
            ka.cmp(kb)
        });

        let (items, last_evaluated_key) =
            paginate(&rows, query.exclusive_start_key.as_ref(), query.limit);
        Ok(Page {
            scanned_count: items.len(),
            items,
            last_evaluated_key,
        })
    }
}

fn paginate(rows: &[Value], start: Option<&Value>, limit: Option<i32>) -> (Vec<Value>, Option<Value>) {
    let offset = start
        .and_then(|k| k.get("offset"))
        .and_then(Value::as_u64)
        .and_then(|o| usize::try_from(o).ok())
        .unwrap_or(0)
        .min(rows.len());
    let limit = limit
        .and_then(|l| usize::try_from(l).ok())
        .filter(|l| *l > 0)
        .unwrap_or(usize::MAX);
    let end = offset.saturating_add(limit).min(rows.len());

    let next = (end < rows.len()).then(|| json!({ "offset": end }));
    (rows[offset..end].to_vec(), next)
}

fn matches(item: &Value, condition: &Condition) -> bool {
    match condition {
        Condition::Contains { attribute, value } => match item.get(attribute) {
            Some(Value::String(s)) => s.contains(value.as_str()),
            Some(Value::Array(list)) => list.iter().any(|v| v.as_str() == Some(value.as_str())),
            _ => false,
        },
    }
}
