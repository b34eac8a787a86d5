// Player (device) resource
//
// The root of the decoded tree. List-shaped and discriminated fields route
// through the codec helpers in the nested modules; any failure below aborts
// the whole player.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display};

use super::catalog::{PlayerFamily, PlayerModel};
use super::common::TimeSpan;
use super::settings::PlayerSettings;
use super::status::PlayerFullStatus;
use crate::codec::BsnTime;
use crate::error::DecodeError;

/// A registered BrightSign player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub model: PlayerModel,
    #[serde(default)]
    pub family: PlayerFamily,
    #[serde(default)]
    pub registration_date: BsnTime,
    #[serde(default)]
    pub last_modified_date: BsnTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PlayerSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlayerFullStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<PlayerSubscription>,
    #[serde(default)]
    pub tagged_groups: Vec<TaggedGroupInfo>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Player {
    /// Decode one player object.
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        Self::deserialize(value).map_err(DecodeError::from)
    }

    /// Configured name, or the serial when no name is set.
    pub fn display_name(&self) -> &str {
        match self.settings.as_ref().map(|s| s.name.as_str()) {
            Some(name) if !name.is_empty() => name,
            _ => &self.serial,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum PlayerSubscriptionType {
    Content,
    Control,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum DeviceSubscriptionStatus {
    Active,
    Suspending,
    Suspended,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum PrincipalType {
    User,
    Role,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSubscription {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub device: DeviceInfo,
    #[serde(rename = "type", default)]
    pub subscription_type: PlayerSubscriptionType,
    #[serde(default)]
    pub activity_period: TimeSpan,
    #[serde(default)]
    pub status: DeviceSubscriptionStatus,
    #[serde(default)]
    pub creation_date: BsnTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_date: Option<BsnTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspension_date: Option<BsnTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<BsnTime>,
    #[serde(default)]
    pub last_modified_date: BsnTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub serial: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedGroupInfo {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<i64>,
    #[serde(rename = "operationUID", default)]
    pub operation_uid: String,
    #[serde(default)]
    pub principal: Principal,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default)]
    pub is_inherited: bool,
    #[serde(default)]
    pub is_allowed: bool,
    #[serde(default)]
    pub creation_date: BsnTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(rename = "type", default)]
    pub principal_type: PrincipalType,
    #[serde(default)]
    pub id: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn minimal_player_leaves_blocks_unset() {
        let player = Player::from_value(&json!({
            "id": 100,
            "serial": "XTD41N000123",
            "model": "XT1144",
            "family": "Malibu"
        }))
        .unwrap();

        assert_eq!(player.model, PlayerModel::XT1144);
        assert_eq!(player.family, PlayerFamily::Malibu);
        assert!(player.settings.is_none());
        assert!(player.status.is_none());
        assert!(player.subscription.is_none());
        assert!(player.registration_date.is_zero());
        assert_eq!(player.display_name(), "XTD41N000123");
    }

    #[test]
    fn subscription_and_permissions() {
        let player = Player::from_value(&json!({
            "id": 5,
            "serial": "S",
            "settings": {"name": "Front Desk"},
            "subscription": {
                "id": 9,
                "device": {"id": 5, "serial": "S"},
                "type": "Control",
                "status": "Suspending",
                "creationDate": "2023-01-02T03:04:05.000Z",
                "expirationDate": null
            },
            "taggedGroups": [{"id": 1, "name": "floor", "tags": {"level": "3"}}],
            "permissions": [{
                "operationUID": "op-1",
                "principal": {"name": "Admins", "type": "Role", "id": 2},
                "isAllowed": true,
                "creationDate": "2023-01-02T03:04:05"
            }]
        }))
        .unwrap();

        let sub = player.subscription.as_ref().unwrap();
        assert_eq!(sub.subscription_type, PlayerSubscriptionType::Control);
        assert_eq!(sub.status, DeviceSubscriptionStatus::Suspending);
        assert!(sub.expiration_date.is_none());
        assert!(!sub.creation_date.is_zero());

        assert_eq!(player.tagged_groups[0].tags["level"], "3");
        assert_eq!(player.permissions[0].principal.principal_type, PrincipalType::Role);
        assert_eq!(player.permissions[0].operation_uid, "op-1");
        assert_eq!(player.display_name(), "Front Desk");
    }

    #[test]
    fn invalid_timestamp_aborts_the_player() {
        let err = Player::from_value(&json!({
            "id": 1,
            "registrationDate": "last tuesday"
        }))
        .unwrap_err();
        let DecodeError::MalformedShape { message } = &err else {
            panic!("expected MalformedShape, got {err:?}");
        };
        assert!(message.contains("last tuesday"), "{message}");
    }
}
