// Two-pass decoding for discriminated payloads
//
// Pass one reads the payload as an untyped `serde_json::Value` so the
// discriminator can be inspected without committing to a shape. Pass two
// re-reads the same value through the concrete struct chosen by the
// family's lookup table. The family entry points live next to their types
// in `models`; this module holds the shared mechanics.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

/// Read a string discriminator field from an object payload.
pub(crate) fn discriminator<'a>(
    value: &'a Value,
    family: &'static str,
    field: &'static str,
) -> Result<&'a str, DecodeError> {
    let Some(object) = value.as_object() else {
        return Err(DecodeError::MalformedShape {
            message: format!("expected a JSON object for {family}, got {}", kind(value)),
        });
    };
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingDiscriminator { family, field })
}

/// Commit to a concrete shape.
pub(crate) fn commit<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(DecodeError::from)
}

/// Require an array payload for a bulk decode. `null` counts as empty.
pub(crate) fn elements<'a>(
    value: &'a Value,
    family: &'static str,
) -> Result<&'a [Value], DecodeError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(&[]),
        other => Err(DecodeError::MalformedShape {
            message: format!("expected an array of {family}, got {}", kind(other)),
        }),
    }
}

/// Elements of an `{items: [...]}` list envelope. Missing `items` is empty.
pub(crate) fn envelope_items<'a>(
    envelope: &'a Value,
    family: &'static str,
) -> Result<&'a [Value], DecodeError> {
    let Some(object) = envelope.as_object() else {
        return Err(DecodeError::MalformedShape {
            message: format!("expected a {family} envelope object, got {}", kind(envelope)),
        });
    };
    elements(object.get("items").unwrap_or(&Value::Null), family)
}

/// Normalize a value that may be absent, a single object, or a list.
///
/// Object → one element, array → each element, anything else → empty.
/// Element decode failures propagate.
pub fn singular_or_list<T: DeserializeOwned>(value: &Value) -> Result<Vec<T>, DecodeError> {
    match value {
        Value::Object(_) => Ok(vec![commit(value)?]),
        Value::Array(items) => items.iter().map(commit).collect(),
        _ => Ok(Vec::new()),
    }
}

/// `#[serde(deserialize_with = "variant::deserialize_singular_or_list")]` adapter.
pub fn deserialize_singular_or_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    singular_or_list(&raw).map_err(serde::de::Error::custom)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
