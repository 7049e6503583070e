/// Mealwise - serverless recipe and nutrition API backed by `DynamoDB`.
///
/// This crate implements three independent AWS Lambda handlers:
/// 1. A Recipes Lambda that looks up, searches and filters recipes
/// 2. A Foods Lambda that looks up foods by id or name prefix
/// 3. A Nutrition Lambda that matches free-text ingredient lines against the
///    foods table and sums up their nutrition
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution (API Gateway proxy events)
/// - `DynamoDB` as the document store, behind the [`store::DocumentStore`] trait
/// - Tokio for the async runtime
///
/// # Example
///
/// ```no_run
/// use mealwise::core::config::AppConfig;
/// use mealwise::foods::FoodsService;
/// use mealwise::store::memory::MemoryStore;
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     mealwise::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let store = MemoryStore::new();
///     store.put(&config.foods_table, json!({"id": "f1", "name": "Banana"}));
///
///     let service = FoodsService::new(store, config);
///     let response = service
///         .handle(&json!({"queryStringParameters": {"id": "f1"}}))
///         .await;
///     println!("{response}");
///     Ok(())
/// }
/// ```
pub mod api;
pub mod core;
pub mod errors;
pub mod foods;
pub mod nutrition;
pub mod recipes;
pub mod store;

pub use errors::ApiError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. The level filter is taken from `RUST_LOG` and defaults to `info`.
/// Calling it again after a subscriber is installed is a no-op.
///
/// # Example
///
/// ```
/// mealwise::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
