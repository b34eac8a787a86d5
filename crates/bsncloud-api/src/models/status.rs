// Player status sub-tree (`player.status`)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display};

use super::common::TimeSpan;
use super::network::PlayerNetworkStatus;
use super::settings::{BrightWallScreenInfo, GroupInfo};
use crate::codec::{BsnTime, flex_list, variant};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum PlayerHealthStatus {
    Normal,
    Warning,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum ScriptType {
    Setup,
    Autorun,
    Recovery,
    Custom,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum StorageInterface {
    Internal,
    Tmp,
    Flash,
    #[serde(rename = "SD1")]
    #[strum(serialize = "SD1")]
    Sd1,
    #[serde(rename = "USB1")]
    #[strum(serialize = "USB1")]
    Usb1,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum FileSystem {
    #[serde(rename = "exFAT")]
    #[strum(serialize = "exFAT")]
    ExFat,
    #[serde(rename = "ext3")]
    #[strum(serialize = "ext3")]
    Ext3,
    #[serde(rename = "ext4")]
    #[strum(serialize = "ext4")]
    Ext4,
    #[serde(rename = "FAT12")]
    #[strum(serialize = "FAT12")]
    Fat12,
    #[serde(rename = "FAT16")]
    #[strum(serialize = "FAT16")]
    Fat16,
    #[serde(rename = "FAT32")]
    #[strum(serialize = "FAT32")]
    Fat32,
    #[serde(rename = "HFS")]
    #[strum(serialize = "HFS")]
    Hfs,
    #[serde(rename = "HFSplus")]
    #[strum(serialize = "HFSplus")]
    HfsPlus,
    #[serde(rename = "NTFS")]
    #[strum(serialize = "NTFS")]
    Ntfs,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum AccessMode {
    Read,
    Write,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Everything the player last reported about itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFullStatus {
    #[serde(default)]
    pub group: GroupInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_wall: Option<BrightWallScreenInfo>,
    /// Absent, a single presentation, or several.
    #[serde(default, deserialize_with = "variant::deserialize_singular_or_list")]
    pub presentation: Vec<PresentationInfo>,
    #[serde(default)]
    pub script: PlayerScript,
    #[serde(default)]
    pub firmware: FirmwareInfo,
    #[serde(default)]
    pub storage: Vec<StorageStatus>,
    #[serde(default)]
    pub network: PlayerNetworkStatus,
    #[serde(default)]
    pub uptime: TimeSpan,
    #[serde(default)]
    pub current_settings_timestamp: BsnTime,
    #[serde(default)]
    pub current_schedule_timestamp: BsnTime,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub health: PlayerHealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<BsnTime>,
    #[serde(default)]
    pub synchronization: PlayerSynchronizationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationInfo {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScript {
    #[serde(rename = "type", default)]
    pub script_type: ScriptType,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub plugins: Vec<ScriptPluginInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPluginInfo {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareInfo {
    #[serde(default)]
    pub version: String,
}

/// One mounted storage device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageStatus {
    #[serde(default)]
    pub interface: StorageInterface,
    #[serde(default)]
    pub system: FileSystem,
    /// Delivered either as `"Read, Write"` or as an array.
    #[serde(default, deserialize_with = "flex_list::deserialize")]
    pub access: Vec<AccessMode>,
    /// Diagnostic counters; the server does not fix a schema here.
    #[serde(default)]
    pub stats: Map<String, Value>,
}

impl StorageStatus {
    pub fn is_writable(&self) -> bool {
        self.access.contains(&AccessMode::Write)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSynchronizationStatus {
    #[serde(default)]
    pub settings: SynchronizationState,
    #[serde(default)]
    pub schedule: SynchronizationState,
    #[serde(default)]
    pub content: SynchronizationState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynchronizationState {
    #[serde(default)]
    pub enabled: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn status(presentation: Value) -> PlayerFullStatus {
        serde_json::from_value(json!({ "presentation": presentation })).unwrap()
    }

    #[test]
    fn presentation_absent_single_or_list() {
        let absent: PlayerFullStatus = serde_json::from_value(json!({})).unwrap();
        assert!(absent.presentation.is_empty());
        assert!(status(json!(null)).presentation.is_empty());

        let single = status(json!({"id": 7, "name": "Menu", "link": "/p/7"}));
        assert_eq!(
            single.presentation,
            vec![PresentationInfo {
                id: 7,
                name: "Menu".into(),
                link: "/p/7".into()
            }]
        );

        let listed = status(json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]));
        assert_eq!(listed.presentation.len(), 2);
        assert_eq!(listed.presentation[1].name, "B");

        assert!(status(json!(12)).presentation.is_empty());
    }

    #[test]
    fn storage_access_csv_and_array() {
        let csv: StorageStatus = serde_json::from_value(json!({
            "interface": "SD1", "system": "exFAT", "access": "Read, Write"
        }))
        .unwrap();
        let arr: StorageStatus = serde_json::from_value(json!({
            "interface": "SD1", "system": "exFAT", "access": ["Read", "Write"]
        }))
        .unwrap();

        assert_eq!(csv, arr);
        assert_eq!(csv.access, vec![AccessMode::Read, AccessMode::Write]);
        assert_eq!(csv.system, FileSystem::ExFat);
        assert!(csv.is_writable());
    }

    #[test]
    fn storage_stats_keep_arbitrary_keys() {
        let storage: StorageStatus = serde_json::from_value(json!({
            "interface": "Internal",
            "system": "ext4",
            "access": "Read",
            "stats": {"sizeBytes": 31_914_983_424_u64, "isReadOnly": false, "label": "BRIGHTSIGN"}
        }))
        .unwrap();
        assert_eq!(storage.stats.len(), 3);
        assert_eq!(storage.stats["label"], "BRIGHTSIGN");
        assert!(!storage.is_writable());
    }

    #[test]
    fn unknown_catalog_values_decode_as_unknown() {
        let parsed: PlayerFullStatus = serde_json::from_value(json!({
            "health": "Degraded",
            "script": {"type": "Plugin", "version": "9.0.1"},
            "storage": [{"interface": "NVMe", "system": "btrfs"}]
        }))
        .unwrap();
        assert_eq!(parsed.health, PlayerHealthStatus::Unknown);
        assert_eq!(parsed.script.script_type, ScriptType::Unknown);
        assert_eq!(parsed.storage[0].interface, StorageInterface::Unknown);
        assert_eq!(parsed.storage[0].system, FileSystem::Unknown);
    }

    #[test]
    fn file_system_display_matches_wire() {
        assert_eq!(FileSystem::HfsPlus.to_string(), "HFSplus");
        assert_eq!(FileSystem::ExFat.as_ref(), "exFAT");
    }
}
