/// Failure raised inside a handler. `Display` is the raw failure text so the
/// generic error response carries exactly what the collaborator reported.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Store(String),
    #[error("{0}")]
    Queue(String),
    #[error("{0}")]
    Topic(String),
    #[error("{0}")]
    BlobStore(String),
    #[error("{0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl HandlerError {
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }
}
