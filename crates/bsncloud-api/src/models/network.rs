// Network interface status
//
// `status.network.interfaces[]` is discriminated by `type`. Only cellular
// modems carry a distinct shape. Every other type, including unrecognized
// ones, decodes as the standard shape.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum::{AsRefStr, Display};
use tracing::trace;

use crate::codec::{flex_list, variant};
use crate::error::DecodeError;

const FAMILY: &str = "network interface status";
const DISCRIMINATOR: &str = "type";

/// Physical or logical interface kind.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum NetworkInterfaceType {
    Ethernet,
    WiFi,
    Virtual,
    Other,
    Cellular,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Address configuration protocol.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum NetworkConfigurationProtocol {
    Static,
    DHCPv4,
    DHCPv6,
    #[serde(rename = "NDP")]
    #[strum(serialize = "NDP")]
    Ndp,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Network status block of a player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNetworkStatus {
    #[serde(default)]
    pub external_ip: String,
    #[serde(default, deserialize_with = "deserialize_interfaces")]
    pub interfaces: Vec<NetworkInterfaceStatus>,
}

/// Ethernet, WiFi, virtual and any unrecognized interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StandardInterfaceStatus {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub interface_type: NetworkInterfaceType,
    /// Delivered either as `"DHCPv4,DHCPv6"` or as an array.
    #[serde(default, deserialize_with = "flex_list::deserialize")]
    pub proto: Vec<NetworkConfigurationProtocol>,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub ip: Vec<String>,
    #[serde(default)]
    pub gateway: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<i32>,
    /// The wire `type` when it is none of the known kinds.
    #[serde(skip)]
    pub unrecognized_type: Option<String>,
}

impl StandardInterfaceStatus {
    /// The `type` as delivered, including unrecognized values.
    pub fn type_name(&self) -> &str {
        self.unrecognized_type
            .as_deref()
            .unwrap_or_else(|| self.interface_type.as_ref())
    }
}

/// Serialized form of [`StandardInterfaceStatus`], writing back the wire `type`.
#[derive(Serialize)]
struct StandardInterfaceWire<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    interface_type: &'a str,
    proto: &'a [NetworkConfigurationProtocol],
    mac: &'a str,
    ip: &'a [String],
    gateway: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metric: Option<i32>,
}

impl Serialize for StandardInterfaceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StandardInterfaceWire {
            name: &self.name,
            interface_type: self.type_name(),
            proto: &self.proto,
            mac: &self.mac,
            ip: &self.ip,
            gateway: &self.gateway,
            metric: self.metric,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellularInterfaceStatus {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub interface_type: NetworkInterfaceType,
    #[serde(default, deserialize_with = "flex_list::deserialize")]
    pub proto: Vec<NetworkConfigurationProtocol>,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub ip: Vec<String>,
    #[serde(default)]
    pub gateway: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<i32>,
    #[serde(default)]
    pub modem: CellularModemInfo,
    #[serde(default)]
    pub sims: Vec<CellularSimInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellularModemInfo {
    #[serde(default)]
    pub imei: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub revision: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellularSimInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub iccid: String,
    #[serde(default)]
    pub connection: CellularSimConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellularSimConnection {
    #[serde(default)]
    pub network: String,
    /// Signal strength in dBm.
    #[serde(default)]
    pub signal: i16,
}

/// Status of one network interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NetworkInterfaceStatus {
    Cellular(CellularInterfaceStatus),
    Standard(StandardInterfaceStatus),
}

impl NetworkInterfaceStatus {
    pub fn interface_type(&self) -> NetworkInterfaceType {
        match self {
            Self::Cellular(c) => c.interface_type,
            Self::Standard(s) => s.interface_type,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Cellular(c) => &c.name,
            Self::Standard(s) => &s.name,
        }
    }

    /// The `type` as delivered. Differs from [`Self::interface_type`] only
    /// for unrecognized kinds.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Cellular(c) => c.interface_type.as_ref(),
            Self::Standard(s) => s.type_name(),
        }
    }

    pub fn ip(&self) -> &[String] {
        match self {
            Self::Cellular(c) => &c.ip,
            Self::Standard(s) => &s.ip,
        }
    }

    /// Decode one interface status object.
    ///
    /// `Cellular` selects the cellular shape; any other `type` value falls
    /// back to [`StandardInterfaceStatus`].
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let tag = variant::discriminator(value, FAMILY, DISCRIMINATOR)?;
        match tag {
            "Cellular" => Ok(Self::Cellular(variant::commit(value)?)),
            "Ethernet" | "WiFi" | "Virtual" | "Other" => Ok(Self::Standard(variant::commit(value)?)),
            unknown => {
                trace!(interface_type = unknown, "decoding unrecognized interface as standard");
                let mut standard: StandardInterfaceStatus = variant::commit(value)?;
                standard.unrecognized_type = Some(unknown.to_owned());
                Ok(Self::Standard(standard))
            }
        }
    }
}

/// Decode an array of interface status objects.
pub fn decode_interface_statuses(value: &Value) -> Result<Vec<NetworkInterfaceStatus>, DecodeError> {
    variant::elements(value, FAMILY)?
        .iter()
        .map(NetworkInterfaceStatus::from_value)
        .collect()
}

impl<'de> Deserialize<'de> for NetworkInterfaceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(&raw).map_err(serde::de::Error::custom)
    }
}

fn deserialize_interfaces<'de, D>(deserializer: D) -> Result<Vec<NetworkInterfaceStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    decode_interface_statuses(&raw).map_err(serde::de::Error::custom)
}
