use event_pipeline_core::clock::SystemClock;
use event_pipeline_lambda::aws::dynamodb::DynamoRecordStore;
use event_pipeline_lambda::aws::s3::S3BlobStore;
use event_pipeline_lambda::config::TableConfig;
use event_pipeline_lambda::handlers::file_processor::handle_object_created_event;
use event_pipeline_lambda::handlers::response::LambdaResponse;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

struct FileDependencies {
    blobs: S3BlobStore,
    store: DynamoRecordStore,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &FileDependencies,
) -> Result<LambdaResponse, Error> {
    Ok(handle_object_created_event(
        &event.payload,
        &deps.blobs,
        &deps.store,
        &SystemClock,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = TableConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = FileDependencies {
        blobs: S3BlobStore::new(aws_sdk_s3::Client::new(&aws_config)),
        store: DynamoRecordStore::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name,
        ),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
