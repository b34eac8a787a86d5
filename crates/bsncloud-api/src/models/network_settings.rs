// Network interface settings
//
// `settings.network.interfaces[]` is discriminated by `type`. Entries whose
// type has no settings shape are dropped from the decoded list with a
// warning; they are never an error and never a placeholder.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::network::{NetworkConfigurationProtocol, NetworkInterfaceType};
use crate::codec::{secret, variant};
use crate::error::DecodeError;

const FAMILY: &str = "network interface settings";
const DISCRIMINATOR: &str = "type";

/// Network settings block of a player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNetworkSettings {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub proxy_server: String,
    #[serde(default)]
    pub proxy_bypass: Vec<String>,
    #[serde(default)]
    pub time_servers: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_interfaces")]
    pub interfaces: Vec<NetworkInterfaceSettings>,
}

/// Addressing shared by every wired and wireless interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSettings {
    #[serde(default)]
    pub proto: NetworkConfigurationProtocol,
    #[serde(default)]
    pub ip: Vec<String>,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub dns: Vec<String>,
}

/// Per-interface content and reporting policy.
///
/// Rate limits are in bytes per second; `None` leaves the player default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_during_initial_downloads: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_inside_content_download_window: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_outside_content_download_window: Option<i32>,
    #[serde(default)]
    pub content_download_enabled: bool,
    #[serde(default)]
    pub text_feeds_download_enabled: bool,
    #[serde(default)]
    pub media_feeds_download_enabled: bool,
    #[serde(default)]
    pub health_reporting_enabled: bool,
    #[serde(default)]
    pub logs_upload_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthernetInterfaceSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub addressing: IpSettings,
    #[serde(flatten)]
    pub policy: DownloadPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiFiInterfaceSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ssid: String,
    #[serde(default)]
    pub security: WiFiSecuritySettings,
    #[serde(flatten)]
    pub addressing: IpSettings,
    #[serde(flatten)]
    pub policy: DownloadPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiFiSecuritySettings {
    #[serde(default)]
    pub authentication: WiFiAuthenticationSettings,
    #[serde(default)]
    pub encryption: WiFiEncryptionSettings,
}

/// WiFi authentication. The passphrase is decoded but never serialized.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct WiFiAuthenticationSettings {
    #[serde(default)]
    pub mode: String,
    #[serde(default, skip_serializing, deserialize_with = "secret::deserialize")]
    pub passphrase: SecretString,
}

impl PartialEq for WiFiAuthenticationSettings {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && secret::same(&self.passphrase, &other.passphrase)
    }
}

impl Eq for WiFiAuthenticationSettings {}

impl std::fmt::Debug for WiFiAuthenticationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WiFiAuthenticationSettings")
            .field("mode", &self.mode)
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiFiEncryptionSettings {
    #[serde(default)]
    pub mode: String,
}

/// A VLAN on top of a physical interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualInterfaceSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub vlan_id: u16,
    #[serde(flatten)]
    pub addressing: IpSettings,
    #[serde(flatten)]
    pub policy: DownloadPolicy,
}

/// Cellular modem settings.
///
/// The modem, SIM and connection entries are undocumented upstream and kept
/// as raw JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellularInterfaceSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modems: Vec<Map<String, Value>>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub usb_device_ids: Vec<String>,
    #[serde(default)]
    pub sims: Vec<Map<String, Value>>,
    #[serde(default)]
    pub mcc: String,
    #[serde(default)]
    pub mnc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub policy: DownloadPolicy,
}

/// Configuration of one network interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NetworkInterfaceSettings {
    Ethernet(EthernetInterfaceSettings),
    WiFi(WiFiInterfaceSettings),
    Virtual(VirtualInterfaceSettings),
    Cellular(CellularInterfaceSettings),
}

impl NetworkInterfaceSettings {
    pub fn interface_type(&self) -> NetworkInterfaceType {
        match self {
            Self::Ethernet(_) => NetworkInterfaceType::Ethernet,
            Self::WiFi(_) => NetworkInterfaceType::WiFi,
            Self::Virtual(_) => NetworkInterfaceType::Virtual,
            Self::Cellular(_) => NetworkInterfaceType::Cellular,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Ethernet(s) => &s.name,
            Self::WiFi(s) => &s.name,
            Self::Virtual(s) => &s.name,
            Self::Cellular(s) => &s.name,
        }
    }

    pub fn policy(&self) -> &DownloadPolicy {
        match self {
            Self::Ethernet(s) => &s.policy,
            Self::WiFi(s) => &s.policy,
            Self::Virtual(s) => &s.policy,
            Self::Cellular(s) => &s.policy,
        }
    }

    /// Decode one settings object.
    ///
    /// Returns `Ok(None)` when the `type` has no settings shape.
    pub fn from_value(value: &Value) -> Result<Option<Self>, DecodeError> {
        let tag = variant::discriminator(value, FAMILY, DISCRIMINATOR)?;
        let decoded = match tag {
            "Ethernet" => Self::Ethernet(variant::commit(value)?),
            "WiFi" => Self::WiFi(variant::commit(value)?),
            "Virtual" => Self::Virtual(variant::commit(value)?),
            "Cellular" => Self::Cellular(variant::commit(value)?),
            _ => return Ok(None),
        };
        Ok(Some(decoded))
    }
}

/// Decode an array of settings objects, dropping unrecognized types.
pub fn decode_interface_settings(
    value: &Value,
) -> Result<Vec<NetworkInterfaceSettings>, DecodeError> {
    let mut out = Vec::new();
    for element in variant::elements(value, FAMILY)? {
        match NetworkInterfaceSettings::from_value(element)? {
            Some(settings) => out.push(settings),
            None => {
                let tag = element.get(DISCRIMINATOR).and_then(Value::as_str);
                warn!(
                    interface_type = tag,
                    "dropping network interface settings of unrecognized type"
                );
            }
        }
    }
    Ok(out)
}

fn deserialize_interfaces<'de, D>(deserializer: D) -> Result<Vec<NetworkInterfaceSettings>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    decode_interface_settings(&raw).map_err(serde::de::Error::custom)
}
