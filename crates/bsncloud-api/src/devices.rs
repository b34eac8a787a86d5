// Device (player) endpoints

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::{BsnClient, cancellable};
use crate::codec::variant;
use crate::error::Error;
use crate::models::Player;

const DEVICES_PATH: &str = "Devices";

impl BsnClient {
    /// List every player in the configured network.
    ///
    /// Authenticates, selects the configured network if it is not already
    /// the session's tenant, then decodes each player in the `items`
    /// envelope. A single undecodable player fails the whole call.
    pub async fn list_devices(&self) -> Result<Vec<Player>, Error> {
        self.ensure_network().await?;

        let resp = self.execute(Method::GET, DEVICES_PATH, None).await?;
        resp.require(200)?;
        let envelope = resp.json_value()?;

        let players = variant::envelope_items(&envelope, "device list")?
            .iter()
            .map(Player::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = players.len(), "devices listed");
        Ok(players)
    }

    pub async fn list_devices_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Player>, Error> {
        cancellable(cancel, self.list_devices()).await
    }

    /// Find one player by serial number (case-insensitive).
    pub async fn find_device(&self, serial: &str) -> Result<Option<Player>, Error> {
        let players = self.list_devices().await?;
        Ok(players
            .into_iter()
            .find(|p| p.serial.eq_ignore_ascii_case(serial)))
    }

    pub async fn find_device_cancellable(
        &self,
        serial: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Player>, Error> {
        cancellable(cancel, self.find_device(serial)).await
    }
}
