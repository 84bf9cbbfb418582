//! Lossless conversion between JSON payloads and Qdrant values.
//!
//! Arrays and objects map onto `ListValue` / `StructValue` so fields such as
//! `tags` come back from a search with their original shape.

use std::collections::HashMap;

use qdrant_client::qdrant::{ListValue, Struct, Value as QdrantValue, value::Kind};
use serde_json::{Map, Number, Value};

fn json_to_qdrant_value(val: Value) -> QdrantValue {
    let kind = match val {
        Value::Null => Kind::NullValue(0),
        Value::Bool(b) => Kind::BoolValue(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Kind::IntegerValue(i),
            None => Kind::DoubleValue(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => Kind::StringValue(s),
        Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(json_to_qdrant_value).collect(),
        }),
        Value::Object(map) => Kind::StructValue(Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant_value(v)))
                .collect(),
        }),
    };

    QdrantValue { kind: Some(kind) }
}

fn qdrant_value_to_json(val: QdrantValue) -> Value {
    match val.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(b),
        Some(Kind::IntegerValue(i)) => Value::Number(i.into()),
        Some(Kind::DoubleValue(f)) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Some(Kind::StringValue(s)) => Value::String(s),
        Some(Kind::ListValue(list)) => {
            Value::Array(list.values.into_iter().map(qdrant_value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => Value::Object(fields_to_json(s.fields)),
    }
}

/// Top-level payload object into Qdrant payload fields. Non-object values
/// produce an empty payload.
pub(crate) fn json_to_payload(value: Value) -> HashMap<String, QdrantValue> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, json_to_qdrant_value(v)))
            .collect(),
        _ => HashMap::new(),
    }
}

/// Qdrant payload fields into a JSON object; empty payloads become `None`.
pub(crate) fn payload_to_json(payload: HashMap<String, QdrantValue>) -> Option<Value> {
    if payload.is_empty() {
        return None;
    }
    Some(Value::Object(fields_to_json(payload)))
}

fn fields_to_json(fields: HashMap<String, QdrantValue>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(k, v)| (k, qdrant_value_to_json(v)))
        .collect()
}
