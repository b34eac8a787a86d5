// Player hardware catalogs
//
// Closed lists mirrored from the vendor documentation. New hardware ships
// regularly, so every catalog decodes unrecognized strings to `Unknown`
// instead of failing the whole player.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Player hardware model.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[non_exhaustive]
pub enum PlayerModel {
    HD223,
    HD1023,
    HD1423,
    LS423,
    XD233,
    XD1033,
    XD1133,
    XT243,
    XT1043,
    XT1143,
    #[serde(rename = "4K242")]
    #[strum(serialize = "4K242")]
    Model4K242,
    #[serde(rename = "4K1042")]
    #[strum(serialize = "4K1042")]
    Model4K1042,
    #[serde(rename = "4K1142")]
    #[strum(serialize = "4K1142")]
    Model4K1142,
    HS123,
    HO523,
    XD234,
    XD1034,
    XT244,
    XT1144,
    HS124,
    HS144,
    LS424,
    HD224,
    HD1024,
    AU325,
    AU335,
    XC2055,
    XC4055,
    XD235,
    XD1035,
    LS425,
    LS445,
    HS125,
    HS145,
    HD225,
    HD1025,
    XT245,
    XT1145,
    XT2145,
    LGUV5N,
    MD435,
    HD226,
    HD1026,
    XD236,
    XD1036,
    XS156,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Player hardware family (one family spans several models).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[non_exhaustive]
pub enum PlayerFamily {
    Tiger,
    Pantera,
    Impala,
    Malibu,
    Pagani,
    Sebring,
    Raptor,
    Cobra,
    #[default]
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_model_names_use_wire_spelling() {
        let model: PlayerModel = serde_json::from_value(json!("4K1142")).unwrap();
        assert_eq!(model, PlayerModel::Model4K1142);
        assert_eq!(model.to_string(), "4K1142");
        assert_eq!(serde_json::to_value(model).unwrap(), json!("4K1142"));
    }

    #[test]
    fn new_hardware_decodes_as_unknown() {
        let model: PlayerModel = serde_json::from_value(json!("XT9999")).unwrap();
        assert_eq!(model, PlayerModel::Unknown);
        let family: PlayerFamily = serde_json::from_value(json!("Jaguar")).unwrap();
        assert_eq!(family, PlayerFamily::Unknown);
    }

    #[test]
    fn known_family_roundtrips() {
        let family: PlayerFamily = serde_json::from_value(json!("Malibu")).unwrap();
        assert_eq!(family, PlayerFamily::Malibu);
        assert_eq!(family.as_ref(), "Malibu");
    }
}
