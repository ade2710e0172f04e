use event_pipeline_core::contract::ErrorBody;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Proxy-style result returned by every handler: a status code, an optional
/// header map and a JSON-encoded body string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LambdaResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    pub body: String,
}

impl LambdaResponse {
    /// Adds the JSON content type and the open cross-origin header.
    pub fn with_cors(mut self) -> Self {
        self.headers = Some(json!({
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
        }));
        self
    }

    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

pub fn json_response(status_code: u16, payload: impl Serialize) -> LambdaResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => LambdaResponse {
            status_code,
            headers: None,
            body,
        },
        Err(error) => error_response(500, &error.to_string()),
    }
}

pub fn error_response(status_code: u16, message: &str) -> LambdaResponse {
    LambdaResponse {
        status_code,
        headers: None,
        body: json!(ErrorBody {
            error: message.to_string(),
        })
        .to_string(),
    }
}
