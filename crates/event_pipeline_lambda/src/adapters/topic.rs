pub trait NotificationTopic {
    /// Publishes a JSON message structure and returns the id assigned by the
    /// topic service.
    fn publish(&self, message: &str, subject: &str) -> Result<String, String>;
}
