use event_pipeline_core::clock::Clock;
use event_pipeline_core::contract::{
    NotificationEnvelope, NotificationRequest, NotificationResponse,
};
use serde_json::Value;

use crate::adapters::topic::NotificationTopic;
use crate::error::HandlerError;
use crate::handlers::response::{error_response, json_response, LambdaResponse};

pub fn handle_notification_event(
    event: Value,
    topic: &impl NotificationTopic,
    clock: &dyn Clock,
) -> LambdaResponse {
    match publish_notification(event, topic, clock) {
        Ok(response) => json_response(200, response),
        Err(error) => {
            tracing::error!(component = "notification", error = %error, "publish failed");
            error_response(500, &error.to_string())
        }
    }
}

pub fn build_envelope(request: &NotificationRequest, timestamp: i64) -> NotificationEnvelope {
    NotificationEnvelope {
        default: request.message_text(),
        subject: request.subject_text(),
        timestamp,
    }
}

pub fn publish_notification(
    event: Value,
    topic: &impl NotificationTopic,
    clock: &dyn Clock,
) -> Result<NotificationResponse, HandlerError> {
    let request: NotificationRequest = serde_json::from_value(event)?;
    let envelope = build_envelope(&request, clock.now_secs());
    let message = serde_json::to_string(&envelope)?;

    let message_id = topic
        .publish(&message, &envelope.subject)
        .map_err(HandlerError::Topic)?;

    tracing::info!(
        component = "notification",
        message_id = %message_id,
        subject = %envelope.subject,
        "notification published"
    );

    Ok(NotificationResponse {
        success: true,
        message_id,
    })
}
