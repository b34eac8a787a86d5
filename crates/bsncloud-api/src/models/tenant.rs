// BSN.cloud network (tenant) descriptors

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A BSN.cloud network the credentials have access to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Numeric on some deployments, a string on others.
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "network id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_accepts_number_or_string() {
        let numeric: Network = serde_json::from_value(json!({"id": 4021, "name": "Retail"})).unwrap();
        let text: Network = serde_json::from_value(json!({"id": "4021", "name": "Retail"})).unwrap();
        assert_eq!(numeric.id, "4021");
        assert_eq!(numeric, text);
    }

    #[test]
    fn unmodelled_fields_are_kept() {
        let network: Network = serde_json::from_value(json!({
            "id": 1,
            "name": "Lab",
            "creationDate": "2022-05-01T00:00:00Z",
            "isLockedOut": false
        }))
        .unwrap();
        assert_eq!(network.extra.len(), 2);
        assert_eq!(network.extra["isLockedOut"], json!(false));
    }

    #[test]
    fn object_id_is_rejected() {
        assert!(serde_json::from_value::<Network>(json!({"id": {"x": 1}})).is_err());
    }
}
