// Lambda bootstrap entry point for the Recipes function

use lambda_runtime::{Error, run, service_fn};
use mealwise::ApiError;
use mealwise::core::config::AppConfig;
use mealwise::recipes::{RecipesService, handler};
use mealwise::store::dynamo::DynamoStore;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    mealwise::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        let err = ApiError::ConfigError(e);
        error!("{}", err);
        err
    })?;
    let store = DynamoStore::from_env().await;
    let service = RecipesService::new(store, config);

    run(service_fn(|event| handler(&service, event))).await
}
