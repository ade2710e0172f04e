//! Environment-driven configuration, read once per process at cold start.

pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE";
pub const QUEUE_URL_VAR: &str = "SQS_QUEUE_URL";
pub const TOPIC_ARN_VAR: &str = "SNS_TOPIC_ARN";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Settings for handlers that only touch the record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
}

impl TableConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: required(&lookup, TABLE_NAME_VAR)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub table_name: String,
    pub queue_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: required(&lookup, TABLE_NAME_VAR)?,
            queue_url: required(&lookup, QUEUE_URL_VAR)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    pub topic_arn: String,
}

impl NotificationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            topic_arn: required(&lookup, TOPIC_ARN_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn api_config_reads_table_and_queue() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (TABLE_NAME_VAR, "events"),
            (QUEUE_URL_VAR, "https://sqs.local/queue"),
        ]))
        .expect("config should load");

        assert_eq!(config.table_name, "events");
        assert_eq!(config.queue_url, "https://sqs.local/queue");
    }

    #[test]
    fn missing_queue_url_is_reported_by_name() {
        let error = ApiConfig::from_lookup(lookup_from(&[(TABLE_NAME_VAR, "events")]))
            .expect_err("queue url is required");
        assert_eq!(error.to_string(), "SQS_QUEUE_URL must be configured");
    }

    #[test]
    fn blank_values_count_as_missing() {
        let error = TableConfig::from_lookup(lookup_from(&[(TABLE_NAME_VAR, "  ")]))
            .expect_err("blank table name should fail");
        assert_eq!(error, ConfigError::Missing(TABLE_NAME_VAR));
    }

    #[test]
    fn notification_config_trims_topic_arn() {
        let config = NotificationConfig::from_lookup(lookup_from(&[(
            TOPIC_ARN_VAR,
            " arn:aws:sns:eu-west-1:123456789012:alerts ",
        )]))
        .expect("config should load");
        assert_eq!(config.topic_arn, "arn:aws:sns:eu-west-1:123456789012:alerts");
    }
}
