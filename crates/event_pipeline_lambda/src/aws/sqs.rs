use aws_sdk_sqs::error::DisplayErrorContext;

use crate::adapters::queue::EventQueue;
use crate::aws::block_on;

pub struct SqsEventQueue {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsEventQueue {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

impl EventQueue for SqsEventQueue {
    fn send_message(&self, body: &str) -> Result<(), String> {
        let client = self.client.clone();
        let queue_url = self.queue_url.clone();
        let body = body.to_string();

        block_on(async move {
            client
                .send_message()
                .queue_url(queue_url)
                .message_body(body)
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    format!(
                        "failed to enqueue event message: {}",
                        DisplayErrorContext(&error)
                    )
                })
        })
    }
}
