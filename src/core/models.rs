use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body shape shared by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse {
    pub items: Vec<Value>,
    pub count: usize,
    pub next_token: Option<String>,
}

impl PagedResponse {
    /// Builds a page, dropping `null` entries and counting what remains.
    #[must_use]
    pub fn new(items: Vec<Value>, next_token: Option<String>) -> Self {
        let items: Vec<Value> = items.into_iter().filter(|v| !v.is_null()).collect();
        Self {
            count: items.len(),
            items,
            next_token,
        }
    }
}
