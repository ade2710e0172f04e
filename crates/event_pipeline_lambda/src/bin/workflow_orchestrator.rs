use event_pipeline_core::clock::SystemClock;
use event_pipeline_lambda::aws::dynamodb::DynamoRecordStore;
use event_pipeline_lambda::config::TableConfig;
use event_pipeline_lambda::handlers::response::LambdaResponse;
use event_pipeline_lambda::handlers::workflow::handle_workflow_event;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    store: &DynamoRecordStore,
) -> Result<LambdaResponse, Error> {
    Ok(handle_workflow_event(event.payload, store, &SystemClock))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = TableConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoRecordStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name,
    );

    lambda_runtime::run(service_fn(|event| handle_request(event, &store))).await
}
