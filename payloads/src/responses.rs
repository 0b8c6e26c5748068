use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Strip the `{ "data": ... }` envelope some endpoints wrap their payload in.
///
/// Only an object whose sole key is `data` counts as an envelope, so a
/// record that merely has a `data` field (inline media) is left alone.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Interpret a list payload. Besides a bare array or a `{ "data": [..] }`
/// envelope, an object carrying an array under `data` next to status fields
/// is accepted. Anything else is treated as an empty collection.
pub fn into_list(value: Value) -> Vec<Value> {
    match unwrap_envelope(value) {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// The message body many endpoints answer mutations and failures with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(alias = "error")]
    pub message: String,
}

/// Pull a human readable message out of an error body, falling back to the
/// raw text.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ServerMessage>(body)
        .map(|msg| msg.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
