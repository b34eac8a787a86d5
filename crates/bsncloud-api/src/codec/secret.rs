// Secret-bearing fields inside player payloads
//
// Passwords and passphrases decode into `SecretString`. Fields using these
// helpers are marked `skip_serializing`, so they never leave the process.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

/// `deserialize_with` adapter: a string, `null` or an absent field.
pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(SecretString::from)
        .unwrap_or_default())
}

/// Whether a secret holds a non-empty value.
pub fn is_set(secret: &SecretString) -> bool {
    !secret.expose_secret().is_empty()
}

/// Value comparison for the `PartialEq` impls of settings blocks.
pub(crate) fn same(a: &SecretString, b: &SecretString) -> bool {
    a.expose_secret() == b.expose_secret()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize")]
        password: SecretString,
    }

    #[test]
    fn string_null_and_absent() {
        let set: Holder = serde_json::from_value(json!({"password": "s3cret"})).unwrap();
        assert_eq!(set.password.expose_secret(), "s3cret");
        assert!(is_set(&set.password));

        let null: Holder = serde_json::from_value(json!({"password": null})).unwrap();
        assert!(!is_set(&null.password));

        let absent: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(!is_set(&absent.password));
    }

    #[test]
    fn comparison_uses_the_value() {
        assert!(same(&SecretString::from("a"), &SecretString::from("a")));
        assert!(!same(&SecretString::from("a"), &SecretString::from("b")));
    }
}
