// Bluetooth beacon settings
//
// Discriminated by `mode`. Unknown modes are a hard decode error: a player
// configured with a beacon we cannot represent should not be silently
// reported as having fewer beacons.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display};

use crate::codec::variant;
use crate::error::DecodeError;

const FAMILY: &str = "beacon";
const DISCRIMINATOR: &str = "mode";

/// Beacon broadcast mode (the `mode` discriminator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
pub enum BeaconMode {
    #[serde(rename = "iBeacon")]
    #[strum(serialize = "iBeacon")]
    IBeacon,
    EddystoneUid,
    EddystoneUrl,
}

impl BeaconMode {
    /// Case-sensitive lookup of a wire discriminator.
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "iBeacon" => Some(Self::IBeacon),
            "EddystoneUid" => Some(Self::EddystoneUid),
            "EddystoneUrl" => Some(Self::EddystoneUrl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IBeacon {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub major: u16,
    #[serde(default)]
    pub minor: u16,
    #[serde(default)]
    pub uuid: String,
    /// Calibrated transmission power (dBm at 1 m).
    #[serde(default)]
    pub power: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EddystoneUidBeacon {
    #[serde(default)]
    pub name: String,
    /// 10-byte namespace, base64 on the wire.
    #[serde(default, with = "base64_bytes")]
    pub namespace_id: Vec<u8>,
    /// 6-byte instance, base64 on the wire.
    #[serde(default, with = "base64_bytes")]
    pub instance_id: Vec<u8>,
    #[serde(default)]
    pub power: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EddystoneUrlBeacon {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub power: i16,
}

/// A configured beacon, one variant per [`BeaconMode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode")]
pub enum Beacon {
    #[serde(rename = "iBeacon")]
    IBeacon(IBeacon),
    EddystoneUid(EddystoneUidBeacon),
    EddystoneUrl(EddystoneUrlBeacon),
}

impl Beacon {
    pub fn mode(&self) -> BeaconMode {
        match self {
            Self::IBeacon(_) => BeaconMode::IBeacon,
            Self::EddystoneUid(_) => BeaconMode::EddystoneUid,
            Self::EddystoneUrl(_) => BeaconMode::EddystoneUrl,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::IBeacon(b) => &b.name,
            Self::EddystoneUid(b) => &b.name,
            Self::EddystoneUrl(b) => &b.name,
        }
    }

    /// Decode one beacon object.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let tag = variant::discriminator(value, FAMILY, DISCRIMINATOR)?;
        let Some(mode) = BeaconMode::from_wire(tag) else {
            return Err(DecodeError::UnknownVariant {
                family: FAMILY,
                value: tag.to_owned(),
            });
        };
        Ok(match mode {
            BeaconMode::IBeacon => Self::IBeacon(variant::commit(value)?),
            BeaconMode::EddystoneUid => Self::EddystoneUid(variant::commit(value)?),
            BeaconMode::EddystoneUrl => Self::EddystoneUrl(variant::commit(value)?),
        })
    }
}

/// Decode an array of beacons. Any element failure fails the whole list.
pub fn decode_beacons(value: &Value) -> Result<Vec<Beacon>, DecodeError> {
    variant::elements(value, FAMILY)?
        .iter()
        .map(Beacon::from_value)
        .collect()
}

impl<'de> Deserialize<'de> for Beacon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(&raw).map_err(serde::de::Error::custom)
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = Option::<String>::deserialize(d)?.unwrap_or_default();
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}
