use serde_json::{Map, Value};

use crate::contract::{DerivedView, TransformedView};

/// String form used before upper-casing: strings are taken verbatim, every
/// other value uses its compact JSON text.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Builds the original-plus-derived view. Both views keep the caller's key
/// order; keys that collide once upper-cased keep the position of the first
/// and the value of the last.
pub fn transform_data(data: &Map<String, Value>, timestamp: i64) -> TransformedView {
    let uppercase_keys: Map<String, Value> = data
        .iter()
        .map(|(key, value)| {
            (
                key.to_uppercase(),
                Value::String(stringify_value(value).to_uppercase()),
            )
        })
        .collect();

    TransformedView {
        original: data.clone(),
        transformed: DerivedView {
            uppercase_keys,
            timestamp,
        },
    }
}
