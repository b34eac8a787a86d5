// CSV-or-array list fields
//
// Several BSN.cloud fields are delivered either as a comma-separated
// string (`"Read, Write"`) or as a JSON array (`["Read", "Write"]`),
// depending on the endpoint and firmware. Both (and null/absent) are
// normalized to an ordered list here.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Normalize a raw field value to its ordered string parts.
///
/// - string: split on `,`, trim each part, drop empty parts
/// - array: keep string elements, silently drop everything else
/// - anything else (null, object, number, bool): empty
pub fn normalize(value: &Value) -> Vec<String> {
    match value {
        Value::String(csv) => csv
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize and convert each part through `T`'s string deserializer.
pub fn parse<T: DeserializeOwned>(value: &Value) -> Result<Vec<T>, serde_json::Error> {
    normalize(value)
        .into_iter()
        .map(|part| serde_json::from_value(Value::String(part)))
        .collect()
}

/// `#[serde(deserialize_with = "flex_list::deserialize")]` adapter.
///
/// Pair with `#[serde(default)]` so an absent field yields an empty list.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
