// Typed BSN.cloud resources
//
// Field names follow the wire's camelCase via `rename_all`. Catalog enums
// decode unrecognized strings to their `Unknown` variant.

pub mod beacon;
pub mod catalog;
pub mod common;
pub mod network;
pub mod network_settings;
pub mod player;
pub mod settings;
pub mod status;
pub mod tenant;

pub use beacon::{
    Beacon, BeaconMode, EddystoneUidBeacon, EddystoneUrlBeacon, IBeacon, decode_beacons,
};
pub use catalog::{PlayerFamily, PlayerModel};
pub use common::TimeSpan;
pub use network::{
    CellularInterfaceStatus, CellularModemInfo, CellularSimConnection, CellularSimInfo,
    NetworkConfigurationProtocol, NetworkInterfaceStatus, NetworkInterfaceType,
    PlayerNetworkStatus, StandardInterfaceStatus, decode_interface_statuses,
};
pub use network_settings::{
    CellularInterfaceSettings, DownloadPolicy, EthernetInterfaceSettings, IpSettings,
    NetworkInterfaceSettings, PlayerNetworkSettings, VirtualInterfaceSettings,
    WiFiAuthenticationSettings, WiFiEncryptionSettings, WiFiInterfaceSettings,
    WiFiSecuritySettings, decode_interface_settings,
};
pub use player::{
    DeviceInfo, DeviceSubscriptionStatus, Permission, Player, PlayerSubscription,
    PlayerSubscriptionType, Principal, PrincipalType, TaggedGroupInfo,
};
pub use settings::{
    BrightWallScreenInfo, ContentSynchronizationWindow, DeviceLocation, DeviceLogsSettings,
    DeviceScreenSettings, DeviceSetupType, DiagnosticWebServerSettings, GroupInfo,
    LocalWebServerSettings, PlayerScreenshotsSettings, PlayerSettings,
    PlayerSynchronizationSettings, ScreenOrientation, SynchronizationPeriod,
};
pub use status::{
    AccessMode, FileSystem, FirmwareInfo, PlayerFullStatus, PlayerHealthStatus,
    PlayerScript, PlayerSynchronizationStatus, PresentationInfo, ScriptPluginInfo, ScriptType,
    StorageInterface, StorageStatus, SynchronizationState,
};
pub use tenant::Network;
