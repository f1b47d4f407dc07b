//! Bridging between values and JSON/YAML documents.

use serde::{Deserialize, Deserializer};
use serde_json::{Map as JsonMap, Number};

use super::{Object, Value};
use crate::error::{Error, Result};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Object(Object::from_values(items.into_iter().map(Value::from)))
            }
            serde_json::Value::Object(fields) => {
                let map = Object::plain();
                for (key, field) in fields {
                    map.set(&key, Value::from(field));
                }
                Value::Object(map)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        to_json_value(value, &mut Vec::new()).map(Option::unwrap_or_default)
    }
}

/// Converts the enumerable view of `value`.
///
/// Returns `None` for values JSON cannot represent at all (`Undefined`,
/// functions, symbols); callers drop them from maps and write `null` in arrays.
fn to_json_value(value: &Value, ancestors: &mut Vec<usize>) -> Result<Option<serde_json::Value>> {
    let object = match value {
        Value::Undefined | Value::Symbol(_) => return Ok(None),
        Value::Null => return Ok(Some(serde_json::Value::Null)),
        Value::Bool(b) => return Ok(Some(serde_json::Value::Bool(*b))),
        Value::Int(i) => return Ok(Some(serde_json::Value::from(*i))),
        Value::Float(x) => {
            return Ok(Some(
                Number::from_f64(*x).map_or(serde_json::Value::Null, serde_json::Value::Number),
            ))
        }
        Value::String(s) => return Ok(Some(serde_json::Value::String(s.clone()))),
        Value::Object(o) if o.is_function() => return Ok(None),
        Value::Object(o) => o,
    };

    if ancestors.contains(&object.addr()) {
        return Err(Error::Cycle);
    }
    ancestors.push(object.addr());
    let json = if object.is_array() {
        let mut items = Vec::with_capacity(object.len());
        for element in object.elements() {
            items.push(to_json_value(&element, ancestors)?.unwrap_or_default());
        }
        serde_json::Value::Array(items)
    } else {
        let mut fields = JsonMap::new();
        for (key, field) in object.entries() {
            if let Some(json) = to_json_value(&field, ancestors)? {
                fields.insert(key, json);
            }
        }
        serde_json::Value::Object(fields)
    };
    ancestors.pop();
    Ok(Some(json))
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String> {
    let json = serde_json::Value::try_from(value)?;
    Ok(serde_json::to_string(&json)?)
}

/// Serialize a value to indented JSON.
pub fn to_json_pretty(value: &Value) -> Result<String> {
    let json = serde_json::Value::try_from(value)?;
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Parse a value from YAML.
pub fn from_yaml(yaml: &str) -> Result<Value> {
    let json: serde_json::Value = serde_yaml::from_str(yaml)?;
    Ok(Value::from(json))
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String> {
    let json = serde_json::Value::try_from(value)?;
    Ok(serde_yaml::to_string(&json)?)
}
