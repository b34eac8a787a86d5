// OAuth2 client-credentials token exchange
//
// POSTs `grant_type=client_credentials` to the BSN.cloud token endpoint with
// the client id/secret as HTTP Basic credentials. The session manager decides
// when to call it; this module only performs one exchange per call.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Lead time before the server-declared expiry at which a token is
/// treated as expired.
pub const EXPIRY_SAFETY_MARGIN: Duration = Duration::from_secs(30);

/// Token endpoint response.
#[derive(Deserialize)]
pub struct TokenResponse {
    #[serde(deserialize_with = "secret_string")]
    pub access_token: SecretString,
    /// Lifetime in seconds from the moment of issue.
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

fn secret_string<'de, D: serde::Deserializer<'de>>(d: D) -> Result<SecretString, D::Error> {
    String::deserialize(d).map(SecretString::from)
}

/// A bearer token with its local expiry instant.
pub struct AccessToken {
    secret: SecretString,
    expires_at: Instant,
}

impl AccessToken {
    pub fn new(secret: SecretString, expires_at: Instant) -> Self {
        Self { secret, expires_at }
    }

    /// Stamp a token response relative to `issued_at`.
    pub fn from_response(response: TokenResponse, issued_at: Instant) -> Self {
        Self {
            secret: response.access_token,
            expires_at: issued_at + Duration::from_secs(response.expires_in),
        }
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// `now < expiry - margin`. A lifetime shorter than the margin is never valid.
    pub fn is_valid_at(&self, now: Instant) -> bool {
        self.expires_at
            .checked_sub(EXPIRY_SAFETY_MARGIN)
            .is_some_and(|deadline| now < deadline)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of bearer tokens.
///
/// Implementations perform exactly one credential exchange per call and never
/// retry. The session manager serializes calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Result<TokenResponse, Error>;
}

/// The OAuth2 client-credentials grant against a token endpoint.
pub struct ClientCredentials {
    http: reqwest::Client,
    transport: TransportConfig,
    token_url: Url,
    client_id: String,
    client_secret: SecretString,
}

impl ClientCredentials {
    pub fn new(
        http: reqwest::Client,
        transport: TransportConfig,
        token_url: Url,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Self {
        Self {
            http,
            transport,
            token_url,
            client_id: client_id.into(),
            client_secret,
        }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenSource for ClientCredentials {
    async fn fetch_token(&self) -> Result<TokenResponse, Error> {
        debug!(url = %self.token_url, client_id = %self.client_id, "requesting access token");

        let resp = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| self.transport.classify(e))?;

        // Read the body before checking status so the server's reason survives.
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport.classify(e))?;

        if status != reqwest::StatusCode::OK {
            return Err(Error::Authentication {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Authentication {
                status: status.as_u16(),
                message: format!("invalid token response: {e}"),
            })?;

        debug!(expires_in = token.expires_in, "access token acquired");
        Ok(token)
    }
}
