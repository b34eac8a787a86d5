// Player settings sub-tree (`player.settings`)
//
// Every nested block is optional and independent: an absent block stays
// `None` rather than decoding to a zeroed struct.

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display};

use super::beacon::{Beacon, decode_beacons};
use super::common::TimeSpan;
use super::network_settings::PlayerNetworkSettings;
use crate::codec::{BsnTime, secret};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum DeviceSetupType {
    Standalone,
    #[serde(rename = "BSN")]
    #[strum(serialize = "BSN")]
    Bsn,
    #[serde(rename = "LFN")]
    #[strum(serialize = "LFN")]
    Lfn,
    #[serde(rename = "SFN")]
    #[strum(serialize = "SFN")]
    Sfn,
    PartnerApplication,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum ScreenOrientation {
    Landscape,
    PortraitBottomLeft,
    PortraitBottomRight,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Desired configuration of a player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub concat_name_and_serial: bool,
    #[serde(default)]
    pub setup_type: DeviceSetupType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_wall: Option<BrightWallScreenInfo>,
    #[serde(default)]
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<DeviceScreenSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronization: Option<PlayerSynchronizationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<PlayerNetworkSettings>,
    #[serde(
        default,
        deserialize_with = "deserialize_beacons",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub beacons: Vec<Beacon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<DeviceLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<PlayerScreenshotsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<DeviceLogsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lws: Option<LocalWebServerSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldws: Option<DiagnosticWebServerSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<BsnTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrightWallScreenInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    /// Position of this player's screen within the wall.
    #[serde(default)]
    pub screen: u8,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceScreenSettings {
    #[serde(default)]
    pub idle_color: String,
    #[serde(default)]
    pub splash_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSynchronizationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SynchronizationPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SynchronizationPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<SynchronizationPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentSynchronizationWindow>,
}

/// How often the player polls for one kind of update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynchronizationPeriod {
    #[serde(default)]
    pub period: TimeSpan,
}

/// Daily window during which content may be downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSynchronizationWindow {
    #[serde(default)]
    pub start: TimeSpan,
    #[serde(default)]
    pub end: TimeSpan,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLocation {
    #[serde(default)]
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_longitude: Option<f64>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_long_name: String,
    #[serde(default)]
    pub admin_area_level1: String,
    #[serde(default)]
    pub admin_area_level1_long_name: String,
    #[serde(default)]
    pub admin_area_level2: String,
    #[serde(default)]
    pub admin_area_level2_long_name: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub locality_long_name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub path_long_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScreenshotsSettings {
    #[serde(default)]
    pub interval: TimeSpan,
    #[serde(default)]
    pub count_limit: u16,
    /// JPEG quality, 0-100.
    #[serde(default)]
    pub quality: u8,
    #[serde(default)]
    pub orientation: ScreenOrientation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLogsSettings {
    #[serde(default)]
    pub enable_diagnostic_log: bool,
    #[serde(default)]
    pub enable_event_log: bool,
    #[serde(default)]
    pub enable_playback_log: bool,
    #[serde(default)]
    pub enable_state_log: bool,
    #[serde(default)]
    pub enable_variable_log: bool,
    #[serde(default)]
    pub upload_at_boot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_time: Option<TimeSpan>,
}

/// Local web server (LWS) credentials. The password is never serialized.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalWebServerSettings {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing, deserialize_with = "secret::deserialize")]
    pub password: SecretString,
    #[serde(default)]
    pub enable_update_notifications: bool,
}

impl PartialEq for LocalWebServerSettings {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && secret::same(&self.password, &other.password)
            && self.enable_update_notifications == other.enable_update_notifications
    }
}

impl Eq for LocalWebServerSettings {}

impl fmt::Debug for LocalWebServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWebServerSettings")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field(
                "enable_update_notifications",
                &self.enable_update_notifications,
            )
            .finish()
    }
}

/// Local diagnostic web server (LDWS) credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticWebServerSettings {
    #[serde(default, skip_serializing, deserialize_with = "secret::deserialize")]
    pub password: SecretString,
}

impl PartialEq for DiagnosticWebServerSettings {
    fn eq(&self, other: &Self) -> bool {
        secret::same(&self.password, &other.password)
    }
}

impl Eq for DiagnosticWebServerSettings {}

impl fmt::Debug for DiagnosticWebServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticWebServerSettings")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn deserialize_beacons<'de, D>(deserializer: D) -> Result<Vec<Beacon>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    decode_beacons(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_blocks_stay_unset() {
        let settings: PlayerSettings = serde_json::from_value(json!({
            "name": "Lobby",
            "setupType": "BSN",
            "screen": {"idleColor": "#000000", "splashUrl": ""}
        }))
        .unwrap();

        assert_eq!(settings.setup_type, DeviceSetupType::Bsn);
        assert!(settings.screen.is_some());
        assert!(settings.network.is_none());
        assert!(settings.location.is_none());
        assert!(settings.lws.is_none());
        assert!(settings.beacons.is_empty());
        assert!(settings.last_modified_date.is_none());
    }

    #[test]
    fn null_beacons_are_empty() {
        let settings: PlayerSettings =
            serde_json::from_value(json!({"beacons": null})).unwrap();
        assert!(settings.beacons.is_empty());
    }

    #[test]
    fn bad_beacon_fails_the_settings_decode() {
        let err = serde_json::from_value::<PlayerSettings>(json!({
            "beacons": [{"mode": "bogus"}]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("bogus"), "{err}");
    }

    #[test]
    fn synchronization_and_location() {
        let settings: PlayerSettings = serde_json::from_value(json!({
            "synchronization": {
                "status": {"period": "00:05:00"},
                "content": {"start": "01:00:00", "end": "05:00:00"}
            },
            "location": {"placeId": "ChIJ", "gpsLatitude": 51.5, "gpsLongitude": -0.12, "country": "GB"}
        }))
        .unwrap();

        let sync = settings.synchronization.unwrap();
        assert_eq!(sync.status.unwrap().period.as_str(), "00:05:00");
        assert!(sync.schedule.is_none());
        assert_eq!(sync.content.unwrap().end.as_str(), "05:00:00");

        let location = settings.location.unwrap();
        assert_eq!(location.gps_latitude, Some(51.5));
        assert_eq!(location.country, "GB");
    }

    #[test]
    fn web_server_passwords_are_not_debug_printed() {
        let settings: PlayerSettings = serde_json::from_value(json!({
            "lws": {"username": "admin", "password": "s3cret"},
            "ldws": {"password": "d1ag"}
        }))
        .unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("d1ag"));
        assert!(debug.contains("admin"));
    }

    #[test]
    fn web_server_passwords_are_not_serialized() {
        let settings: PlayerSettings = serde_json::from_value(json!({
            "lws": {"username": "admin", "password": "s3cret"},
            "ldws": {"password": "d1ag"}
        }))
        .unwrap();
        let lws = settings.lws.as_ref().unwrap();
        assert_eq!(lws.password.expose_secret(), "s3cret");
        assert!(secret::is_set(&settings.ldws.as_ref().unwrap().password));

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("s3cret"), "{json}");
        assert!(!json.contains("d1ag"), "{json}");
        assert!(json.contains("admin"));
    }
}
