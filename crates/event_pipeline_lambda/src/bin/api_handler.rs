use event_pipeline_core::clock::SystemClock;
use event_pipeline_lambda::aws::dynamodb::DynamoRecordStore;
use event_pipeline_lambda::aws::sqs::SqsEventQueue;
use event_pipeline_lambda::config::ApiConfig;
use event_pipeline_lambda::handlers::api::handle_api_event;
use event_pipeline_lambda::handlers::response::LambdaResponse;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

struct ApiDependencies {
    store: DynamoRecordStore,
    queue: SqsEventQueue,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &ApiDependencies,
) -> Result<LambdaResponse, Error> {
    Ok(handle_api_event(
        &event.payload,
        &deps.store,
        &deps.queue,
        &SystemClock,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = ApiConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = ApiDependencies {
        store: DynamoRecordStore::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name,
        ),
        queue: SqsEventQueue::new(aws_sdk_sqs::Client::new(&aws_config), config.queue_url),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
