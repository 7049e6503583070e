use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Number, Value};
use tracing::debug;

use super::{Condition, DocumentStore, Page, PrefixQuery, ScanRequest};
use crate::errors::ApiError;

pub type Item = HashMap<String, AttributeValue>;

/// [`DocumentStore`] backed by a `DynamoDB` client.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: DynamoClient,
}

impl DynamoStore {
    #[must_use]
    pub fn new(client: DynamoClient) -> Self {
        Self { client }
    }

    /// Builds a store from the shared AWS config (region defaults applied).
    pub async fn from_env() -> Self {
        let shared = crate::core::config::AppConfig::load_aws_config().await;
        Self::new(DynamoClient::new(&shared))
    }
}

#[async_trait]
impl DocumentStore for DynamoStore {
    async fn get_item(&self, table: &str, key: Value) -> Result<Option<Value>, ApiError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(json_to_item(&key)?))
            .send()
            .await?;

        Ok(output.item.map(item_to_json))
    }

    async fn scan(&self, request: ScanRequest) -> Result<Page, ApiError> {
        let filter = FilterExpression::build(&request.conditions);
        let start_key = request
            .exclusive_start_key
            .as_ref()
            .map(json_to_item)
            .transpose()?;

        let mut builder = self
            .client
            .scan()
            .table_name(&request.table)
            .set_limit(request.limit)
            .set_exclusive_start_key(start_key);

        if let Some(filter) = filter {
            debug!(expression = %filter.expression, "Pushing scan filter down");
            builder = builder
                .filter_expression(filter.expression)
                .set_expression_attribute_names(Some(filter.names))
                .set_expression_attribute_values(Some(filter.values));
        }

        if let Some(segment) = request.segment {
            builder = builder
                .segment(segment.index)
                .total_segments(segment.total);
        }

        let output = builder.send().await?;
        Ok(Page {
            scanned_count: usize::try_from(output.scanned_count).unwrap_or_default(),
            items: output
                .items
                .unwrap_or_default()
                .into_iter()
                .map(item_to_json)
                .collect(),
            last_evaluated_key: output.last_evaluated_key.map(item_to_json),
        })
    }

    async fn query_prefix(&self, query: PrefixQuery) -> Result<Page, ApiError> {
        let start_key = query
            .exclusive_start_key
            .as_ref()
            .map(json_to_item)
            .transpose()?;

        let output = self
            .client
            .query()
            .table_name(&query.table)
            .index_name(&query.index)
            .key_condition_expression("#pk = :pk AND begins_with(#sk, :pfx)")
            .expression_attribute_names("#pk", &query.partition_attr)
            .expression_attribute_names("#sk", &query.sort_attr)
            .expression_attribute_values(":pk", AttributeValue::S(query.partition_value.clone()))
            .expression_attribute_values(":pfx", AttributeValue::S(query.prefix.clone()))
            .set_limit(query.limit)
            .set_exclusive_start_key(start_key)
            .send()
            .await?;

        Ok(Page {
            scanned_count: usize::try_from(output.scanned_count).unwrap_or_default(),
            items: output
                .items
                .unwrap_or_default()
                .into_iter()
                .map(item_to_json)
                .collect(),
            last_evaluated_key: output.last_evaluated_key.map(item_to_json),
        })
    }
}

struct FilterExpression {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl FilterExpression {
    fn build(conditions: &[Condition]) -> Option<Self> {
        if conditions.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(conditions.len());
        let mut names = HashMap::new();
        let mut values = HashMap::new();

        for (i, condition) in conditions.iter().enumerate() {
            match condition {
                Condition::Contains { attribute, value } => {
                    let name = format!("#f{i}");
                    let placeholder = format!(":v{i}");
                    clauses.push(format!("contains({name}, {placeholder})"));
                    names.insert(name, attribute.clone());
                    values.insert(placeholder, AttributeValue::S(value.clone()));
                }
            }
        }

        Some(Self {
            expression: clauses.join(" AND "),
            names,
            values,
        })
    }
}

// ============================================================================
// AttributeValue <-> JSON
// ============================================================================

#[must_use]
pub fn item_to_json(item: Item) -> Value {
    Value::Object(
        item.into_iter()
            .map(|(k, v)| (k, attribute_to_json(&v)))
            .collect(),
    )
}

#[must_use]
pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_from_str(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), attribute_to_json(v)))
                .collect(),
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_from_str(n)).collect()),
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|b| Value::String(STANDARD.encode(b.as_ref())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Converts a JSON object into a `DynamoDB` item.
///
/// # Errors
///
/// Returns a parse error if `value` is not an object.
pub fn json_to_item(value: &Value) -> Result<Item, ApiError> {
    let Some(map) = value.as_object() else {
        return Err(ApiError::ParseError(
            "expected a JSON object for a DynamoDB key".to_string(),
        ));
    };
    Ok(map
        .iter()
        .map(|(k, v)| (k.clone(), json_to_attribute(v)))
        .collect())
}

#[must_use]
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attribute(v)))
                .collect(),
        ),
    }
}

fn number_from_str(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Value::Number(u.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(raw.to_string()), Value::Number)
}
