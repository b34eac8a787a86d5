// Async client for the BSN.cloud REST API (v1).
//
// Base URL: https://api.bsn.cloud/v1/
// Auth: OAuth2 client-credentials bearer token, refreshed lazily
//
// `execute` is the single request primitive every operation goes through:
// it authenticates, attaches the bearer token, reports to the observer and
// hands back status plus raw body. Interpreting the status is left to the
// operation, since BSN.cloud uses different success codes per endpoint.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::ACCEPT;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{ClientCredentials, TokenSource};
use crate::error::{DecodeError, Error};
use crate::observer::{NoopObserver, RequestObserver};
use crate::session::SessionManager;
use crate::transport::TransportConfig;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.bsn.cloud/v1";

/// Production OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str =
    "https://auth.bsn.cloud/realms/bsncloud/protocol/openid-connect/token";

/// Longest body preview written to debug logs.
const LOG_PREVIEW_BYTES: usize = 512;

// ── Configuration ────────────────────────────────────────────────────

/// Everything needed to construct a [`BsnClient`].
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    /// Network (tenant) to select before tenant-scoped calls.
    pub network: Option<String>,
    pub base_url: Url,
    pub token_url: Url,
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Production endpoints with default transport settings.
    pub fn new(client_id: impl Into<String>, client_secret: SecretString) -> Result<Self, Error> {
        Ok(Self {
            client_id: client_id.into(),
            client_secret,
            network: None,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            token_url: Url::parse(DEFAULT_TOKEN_URL)?,
            transport: TransportConfig::default(),
        })
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_token_url(mut self, token_url: Url) -> Self {
        self.token_url = token_url;
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("network", &self.network)
            .field("base_url", &self.base_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("transport", &self.transport)
            .finish()
    }
}

// ── Raw response ─────────────────────────────────────────────────────

/// Status and body of one API call.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Require `expected` status and a non-empty body.
    ///
    /// An empty body is an error on any status; a wrong status carries the
    /// response text.
    pub fn require(&self, expected: u16) -> Result<&Bytes, Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::EmptyResponse {
                status: self.status,
            });
        }
        if self.status != expected {
            return Err(Error::HttpStatus {
                status: self.status,
                body: self.text(),
            });
        }
        Ok(&self.body)
    }

    /// Parse the body as an untyped JSON tree.
    pub fn json_value(&self) -> Result<Value, Error> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Decode(DecodeError::from(e)))
    }

    /// Parse the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Decode(DecodeError::from(e)))
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for BSN.cloud.
///
/// Owns one session; cloning is not supported, share it behind an `Arc`
/// instead. All operations take `&self` and are safe to call concurrently.
pub struct BsnClient {
    http: reqwest::Client,
    transport: TransportConfig,
    base_url: Url,
    network: Option<String>,
    session: SessionManager,
    observer: Arc<dyn RequestObserver>,
}

impl BsnClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client that authenticates with the client-credentials grant.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        let credentials = ClientCredentials::new(
            http.clone(),
            config.transport.clone(),
            config.token_url,
            config.client_id,
            config.client_secret,
        );
        Ok(Self::assemble(
            http,
            config.transport,
            &config.base_url,
            config.network,
            Arc::new(credentials),
        ))
    }

    /// Build a client around a caller-provided token source.
    ///
    /// `config.client_id`, `client_secret` and `token_url` are unused.
    pub fn with_token_source(
        config: ClientConfig,
        source: Arc<dyn TokenSource>,
    ) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self::assemble(
            http,
            config.transport,
            &config.base_url,
            config.network,
            source,
        ))
    }

    fn assemble(
        http: reqwest::Client,
        transport: TransportConfig,
        base_url: &Url,
        network: Option<String>,
        source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http,
            transport,
            base_url: normalize_base_url(base_url),
            network: network.filter(|n| !n.is_empty()),
            session: SessionManager::new(source),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the request observer.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configured network (tenant) name.
    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Exchange credentials unless a valid token is already held.
    pub async fn ensure_authenticated(&self) -> Result<(), Error> {
        self.session.ensure_authenticated().await.map(drop)
    }

    pub async fn ensure_authenticated_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        cancellable(cancel, self.ensure_authenticated()).await
    }

    // ── Request primitive ────────────────────────────────────────────

    /// Issue one authenticated call and return status plus raw body.
    ///
    /// `path` is relative to the base URL (`"Devices"`, `"self/session/network"`).
    /// Only transport failures are errors here; any HTTP status is returned.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse, Error> {
        let bearer = self.session.ensure_authenticated().await?;
        self.send(method, path, body, bearer.expose()).await
    }

    pub async fn execute_cancellable(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, Error> {
        cancellable(cancel, self.execute(method, path, body)).await
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        bearer: &str,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        debug!("{method} {url}");
        self.observer.on_request(&method, &url);

        let mut req = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(bearer)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| self.transport.classify(e))?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| self.transport.classify(e))?;

        trace!(status, body = %preview(&body), "{method} {url}");
        self.observer.on_response(&method, &url, status, &body);

        Ok(RawResponse { status, body })
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

impl fmt::Debug for BsnClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BsnClient")
            .field("base_url", &self.base_url.as_str())
            .field("network", &self.network)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Run `fut` unless `cancel` fires first.
///
/// On cancellation the in-flight future is dropped, which aborts the HTTP
/// call and releases any session lock without writing to it.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result,
    }
}

/// Ensure the base path ends with `/` so relative joins append.
fn normalize_base_url(raw: &Url) -> Url {
    let mut url = raw.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= LOG_PREVIEW_BYTES {
        return text.into_owned();
    }
    let mut cut = LOG_PREVIEW_BYTES;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…", &text[..cut])
}
