use std::sync::Arc;

use thiserror::Error;

/// Top-level error type for the `bsncloud-api` crate.
///
/// Covers every failure mode of a client call: the credential exchange,
/// tenant (network) selection, transport, HTTP status handling and payload
/// decoding. A non-success response carries its status and body rather than
/// a generic transport error.
///
/// Cloneable so a failed credential exchange can be handed unchanged to
/// every caller that waited on it.
#[derive(Debug, Clone, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The OAuth2 client-credentials exchange failed.
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    // ── Tenant context ──────────────────────────────────────────────
    /// `PUT /self/session/network` returned anything other than 204.
    #[error("Network selection failed (HTTP {status}): {body}")]
    TenantSelection { status: u16, body: String },

    /// A tenant-scoped call was made without a configured network name.
    #[error("Network name must be configured before calling tenant-scoped endpoints")]
    MissingTenant,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The caller cancelled the operation before a response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// TLS or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-success status code, with the raw response body.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The server answered with an empty body where a payload was required.
    #[error("Empty response body (HTTP {status})")]
    EmptyResponse { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// Payload decoding failed.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl Error {
    /// Returns `true` if re-running the credential exchange might resolve it.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::HttpStatus { status: 401, .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    /// This crate never retries on its own.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::TenantSelection { status, .. }
            | Self::HttpStatus { status, .. }
            | Self::EmptyResponse { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure while turning a wire payload into typed models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The discriminator field is absent or not a string.
    #[error("missing or invalid `{field}` field in {family}")]
    MissingDiscriminator {
        family: &'static str,
        field: &'static str,
    },

    /// The discriminator names a variant this client does not know.
    #[error("unknown {family} variant: {value:?}")]
    UnknownVariant { family: &'static str, value: String },

    /// A timestamp matched none of the accepted layouts.
    #[error("could not parse timestamp: {raw:?}")]
    InvalidTimestamp { raw: String },

    /// The payload does not have the structure the target type expects.
    #[error("malformed payload: {message}")]
    MalformedShape { message: String },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedShape {
            message: err.to_string(),
        }
    }
}
