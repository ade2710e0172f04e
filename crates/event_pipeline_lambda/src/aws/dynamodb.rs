use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use event_pipeline_core::contract::{EventStatus, Record};
use serde_json::{Map, Number, Value};

use crate::adapters::record_store::RecordStore;
use crate::aws::block_on;

type Item = HashMap<String, AttributeValue>;

const MARK_PROCESSED_EXPRESSION: &str = "SET #status = :status, processed_at = :processed_at";
const RECORD_EXISTS_CONDITION: &str = "attribute_exists(id)";

pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl RecordStore for DynamoRecordStore {
    fn put_record(&self, record: &Record) -> Result<(), String> {
        let item = record_to_item(record)?;
        let client = self.client.clone();
        let table_name = self.table_name.clone();

        block_on(async move {
            client
                .put_item()
                .table_name(table_name)
                .set_item(Some(item))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| format!("failed to put record: {}", DisplayErrorContext(&error)))
        })
    }

    fn scan_records(&self, limit: usize) -> Result<Vec<Record>, String> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);

        let output = block_on(async move {
            client
                .scan()
                .table_name(table_name)
                .limit(limit)
                .send()
                .await
                .map_err(|error| format!("failed to scan records: {}", DisplayErrorContext(&error)))
        })?;

        output.items().iter().map(item_to_record).collect()
    }

    fn mark_processed(&self, id: &str, processed_at: i64) -> Result<(), String> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let id = id.to_string();
        let status = status_label(EventStatus::Processed)?;

        block_on(async move {
            client
                .update_item()
                .table_name(table_name)
                .key("id", AttributeValue::S(id))
                .update_expression(MARK_PROCESSED_EXPRESSION)
                .condition_expression(RECORD_EXISTS_CONDITION)
                .expression_attribute_names("#status", "status")
                .expression_attribute_values(":status", AttributeValue::S(status))
                .expression_attribute_values(
                    ":processed_at",
                    AttributeValue::N(processed_at.to_string()),
                )
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    format!("failed to update record: {}", DisplayErrorContext(&error))
                })
        })
    }
}

fn status_label(status: EventStatus) -> Result<String, String> {
    match serde_json::to_value(status) {
        Ok(Value::String(label)) => Ok(label),
        _ => Err("event status must serialize as a string".to_string()),
    }
}

pub fn record_to_item(record: &Record) -> Result<Item, String> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Ok(fields
            .iter()
            .map(|(name, value)| (name.clone(), json_to_attribute(value)))
            .collect()),
        Ok(_) => Err("record must serialize to a JSON object".to_string()),
        Err(error) => Err(format!("failed to serialize record: {error}")),
    }
}

pub fn item_to_record(item: &Item) -> Result<Record, String> {
    let mut fields = Map::new();
    for (name, attribute) in item {
        fields.insert(name.clone(), attribute_to_json(attribute)?);
    }
    serde_json::from_value(Value::Object(fields))
        .map_err(|error| format!("stored item is not a valid record: {error}"))
}

pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

pub fn attribute_to_json(attribute: &AttributeValue) -> Result<Value, String> {
    match attribute {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::N(number) => parse_number(number),
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::Ss(texts) => Ok(Value::Array(
            texts.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(numbers) => numbers
            .iter()
            .map(|number| parse_number(number))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::L(items) => items
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(fields) => fields
            .iter()
            .map(|(name, value)| attribute_to_json(value).map(|value| (name.clone(), value)))
            .collect::<Result<Map<_, _>, _>>()
            .map(Value::Object),
        _ => Err("binary and unknown attribute types are not supported".to_string()),
    }
}

fn parse_number(text: &str) -> Result<Value, String> {
    if let Ok(integer) = text.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    if let Ok(unsigned) = text.parse::<u64>() {
        return Ok(Value::from(unsigned));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("invalid numeric attribute: {text}"))
}
