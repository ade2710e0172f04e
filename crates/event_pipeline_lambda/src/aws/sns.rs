use aws_sdk_sns::error::DisplayErrorContext;

use crate::adapters::topic::NotificationTopic;
use crate::aws::block_on;

/// Every subscribed protocol receives the `default` key of the published
/// JSON document.
const MESSAGE_STRUCTURE: &str = "json";

pub struct SnsNotificationTopic {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsNotificationTopic {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

impl NotificationTopic for SnsNotificationTopic {
    fn publish(&self, message: &str, subject: &str) -> Result<String, String> {
        let client = self.client.clone();
        let topic_arn = self.topic_arn.clone();
        let message = message.to_string();
        let subject = subject.to_string();

        block_on(async move {
            let output = client
                .publish()
                .topic_arn(topic_arn)
                .message(message)
                .subject(subject)
                .message_structure(MESSAGE_STRUCTURE)
                .send()
                .await
                .map_err(|error| {
                    format!(
                        "failed to publish notification: {}",
                        DisplayErrorContext(&error)
                    )
                })?;

            output
                .message_id()
                .map(str::to_string)
                .ok_or_else(|| "topic did not return a message id".to_string())
        })
    }
}
