// Network (tenant) endpoints

use reqwest::Method;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::{BsnClient, cancellable};
use crate::codec::variant;
use crate::error::Error;
use crate::models::Network;

const SESSION_NETWORK_PATH: &str = "self/session/network";
const NETWORKS_PATH: &str = "networks";

impl BsnClient {
    /// Make `name` the tenant context of the server-side session.
    ///
    /// Success is exactly HTTP 204. Any other status fails with
    /// [`Error::TenantSelection`] and leaves the recorded tenant unchanged.
    pub async fn select_network(&self, name: &str) -> Result<(), Error> {
        let bearer = self.session().ensure_authenticated().await?;
        let body = json!({ "name": name });
        let resp = self
            .send(Method::PUT, SESSION_NETWORK_PATH, Some(&body), bearer.expose())
            .await?;

        if resp.status != 204 {
            return Err(Error::TenantSelection {
                status: resp.status,
                body: resp.text(),
            });
        }

        self.session().record_tenant(&bearer, name).await;
        info!(network = name, "network selected");
        Ok(())
    }

    pub async fn select_network_cancellable(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        cancellable(cancel, self.select_network(name)).await
    }

    /// Select the configured network unless it is already selected under
    /// the current token.
    pub(crate) async fn ensure_network(&self) -> Result<(), Error> {
        let name = self.network().ok_or(Error::MissingTenant)?;
        self.session().ensure_authenticated().await?;
        if self.session().selected_tenant().await.as_deref() == Some(name) {
            debug!(network = name, "network already selected");
            return Ok(());
        }
        self.select_network(name).await
    }

    /// List the networks these credentials can access.
    pub async fn list_networks(&self) -> Result<Vec<Network>, Error> {
        let resp = self.execute(Method::GET, NETWORKS_PATH, None).await?;
        resp.require(200)?;
        let envelope = resp.json_value()?;
        let networks = variant::envelope_items(&envelope, "network list")?
            .iter()
            .map(variant::commit::<Network>)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = networks.len(), "networks listed");
        Ok(networks)
    }

    pub async fn list_networks_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Network>, Error> {
        cancellable(cancel, self.list_networks()).await
    }
}
