//! Key-case transcoding between the wire and caller conventions.
//!
//! The service speaks `snake_case` keys; the public types use `camelCase`.
//! Both directions walk the whole JSON tree: sequences element by element,
//! mappings key by key, leaves untouched. Inputs are never mutated.

use heck::{ToLowerCamelCase, ToSnakeCase};
use serde_json::{Map, Value};

/// A key naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// `snake_case`, used on the wire.
    Snake,
    /// `camelCase`, used by callers.
    Camel,
}

impl KeyCase {
    /// Rewrite a single key into this convention.
    pub fn apply(&self, key: &str) -> String {
        match self {
            KeyCase::Snake => key.to_snake_case(),
            KeyCase::Camel => key.to_lower_camel_case(),
        }
    }
}

/// Recursively rewrite every mapping key in `value` into `case`.
pub fn transcode_keys(value: &Value, case: KeyCase) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|v| transcode_keys(v, case)).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in map {
                out.insert(case.apply(key), transcode_keys(inner, case));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Caller convention to wire convention.
pub fn to_wire(value: &Value) -> Value {
    transcode_keys(value, KeyCase::Snake)
}

/// Wire convention to caller convention.
pub fn to_caller(value: &Value) -> Value {
    transcode_keys(value, KeyCase::Camel)
}
