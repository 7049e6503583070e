//! Document store abstraction.
//!
//! Handlers only talk to [`DocumentStore`]. Production uses [`dynamo::DynamoStore`];
//! tests and local runs use [`memory::MemoryStore`]. Items and keys cross the
//! seam as plain `serde_json::Value` objects.

pub mod dynamo;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ApiError;

/// Server-side filter pushed down into a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `contains(attribute, value)`: substring for strings, membership for lists.
    Contains { attribute: String, value: String },
}

/// One segment of a parallel scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub index: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    pub table: String,
    pub limit: Option<i32>,
    pub exclusive_start_key: Option<Value>,
    pub conditions: Vec<Condition>,
    pub segment: Option<Segment>,
}

/// `partition_attr = partition_value AND begins_with(sort_attr, prefix)` on an index.
#[derive(Debug, Clone, Default)]
pub struct PrefixQuery {
    pub table: String,
    pub index: String,
    pub partition_attr: String,
    pub partition_value: String,
    pub sort_attr: String,
    pub prefix: String,
    pub limit: Option<i32>,
    pub exclusive_start_key: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub last_evaluated_key: Option<Value>,
    /// Items read before filtering.
    pub scanned_count: usize,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches one item by its full primary key (a JSON object).
    async fn get_item(&self, table: &str, key: Value) -> Result<Option<Value>, ApiError>;

    async fn scan(&self, request: ScanRequest) -> Result<Page, ApiError>;

    async fn query_prefix(&self, query: PrefixQuery) -> Result<Page, ApiError>;
}
