use event_pipeline_core::clock::SystemClock;
use event_pipeline_lambda::aws::sns::SnsNotificationTopic;
use event_pipeline_lambda::config::NotificationConfig;
use event_pipeline_lambda::handlers::notification::handle_notification_event;
use event_pipeline_lambda::handlers::response::LambdaResponse;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    topic: &SnsNotificationTopic,
) -> Result<LambdaResponse, Error> {
    Ok(handle_notification_event(event.payload, topic, &SystemClock))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = NotificationConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let topic = SnsNotificationTopic::new(aws_sdk_sns::Client::new(&aws_config), config.topic_arn);

    lambda_runtime::run(service_fn(|event| handle_request(event, &topic))).await
}
