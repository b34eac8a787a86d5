// bsncloud-api: Async Rust client for the BrightSign BSN.cloud device management API

pub mod auth;
pub mod client;
pub mod codec;
pub mod devices;
pub mod error;
pub mod models;
pub mod networks;
pub mod observer;
pub mod session;
pub mod transport;

pub use auth::{AccessToken, ClientCredentials, EXPIRY_SAFETY_MARGIN, TokenResponse, TokenSource};
pub use client::{BsnClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TOKEN_URL, RawResponse};
pub use codec::BsnTime;
pub use error::{DecodeError, Error};
pub use observer::{NoopObserver, RequestObserver, TracingObserver};
pub use session::{Bearer, SessionManager};
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
