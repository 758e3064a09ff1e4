use award_lookup_core::query_params::QueryParamsValidator;
use award_lookup_lambda::adapters::dynamodb::DynamoDbRecordStore;
use award_lookup_lambda::config::HandlerConfig;
use award_lookup_lambda::handlers::award::{handle_award_event, ApiGatewayResponse};
use award_lookup_lambda::logging::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

/// Process-lifetime dependencies, built before the first invocation and
/// shared read-only by all of them.
struct RuntimeDependencies {
    store: DynamoDbRecordStore,
    validator: Box<dyn QueryParamsValidator>,
}

async fn load_dependencies(config: &HandlerConfig) -> RuntimeDependencies {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    let aws_config = loader.load().await;

    RuntimeDependencies {
        store: DynamoDbRecordStore::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.awards_table.clone(),
            config.cast_table.clone(),
        ),
        validator: config.query_params_schema.validator(),
    }
}

async fn handle_request(
    deps: &RuntimeDependencies,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_award_event(
        event.payload,
        deps.validator.as_ref(),
        &deps.store,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = HandlerConfig::from_env()?;
    tracing::info!(
        awards_table = %config.awards_table,
        cast_table = %config.cast_table,
        query_params_schema = ?config.query_params_schema,
        "award lookup configured"
    );
    let deps = load_dependencies(&config).await;

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handle_request(&deps, event)
    }))
    .await
}
