//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use bsncloud_api::Error as ApiError;
use bsncloud_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach BSN.cloud")]
    #[diagnostic(
        code(bsncloud::connection_failed),
        help("Check network connectivity and the configured base_url / token_url.")
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(bsncloud::timeout),
        help("Increase the timeout with --timeout or the profile's `timeout` key.")
    )]
    Timeout { seconds: u64 },

    #[error("Interrupted")]
    #[diagnostic(code(bsncloud::interrupted))]
    Interrupted,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status}): {message}")]
    #[diagnostic(
        code(bsncloud::auth_failed),
        help(
            "Verify the client id and secret.\n\
             Store a new secret with: bsncloud config set-secret --profile <name>"
        )
    )]
    AuthFailed { status: u16, message: String },

    #[error("No client secret configured for profile '{profile}'")]
    #[diagnostic(
        code(bsncloud::no_credentials),
        help(
            "Run: bsncloud config set-secret --profile {profile}\n\
             Or set BSN_CLIENT_SECRET, or `client_secret_env` in the profile."
        )
    )]
    NoCredentials { profile: String },

    #[error("No client id configured")]
    #[diagnostic(
        code(bsncloud::no_config),
        help(
            "Add a profile to {path}\n\
             Or pass --client-id / set BSN_CLIENT_ID."
        )
    )]
    NoConfig { path: String },

    // ── Network (tenant) ─────────────────────────────────────────────
    #[error("No network selected")]
    #[diagnostic(
        code(bsncloud::no_network),
        help(
            "Pass --network <name>, set BSN_NETWORK, or add `network` to the profile.\n\
             Run: bsncloud networks list"
        )
    )]
    NoNetwork,

    #[error("Network selection failed (HTTP {status}): {body}")]
    #[diagnostic(
        code(bsncloud::network_selection),
        help("Run: bsncloud networks list to see accessible networks")
    )]
    NetworkSelection { status: u16, body: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(bsncloud::not_found),
        help("Run: bsncloud {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(bsncloud::api_error))]
    Api { status: u16, message: String },

    #[error("Unexpected response payload: {message}")]
    #[diagnostic(
        code(bsncloud::decode),
        help("Re-run with -vvv to log raw response bodies.")
    )]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(bsncloud::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(bsncloud::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(bsncloud::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Interrupted => exit_code::INTERRUPTED,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::NetworkSelection { .. } => exit_code::PERMISSION,
            Self::Api { status, .. } => match status {
                401 => exit_code::AUTH,
                403 => exit_code::PERMISSION,
                404 => exit_code::NOT_FOUND,
                _ => exit_code::GENERAL,
            },
            Self::Validation { .. } | Self::NoNetwork | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Authentication { status, message } => Self::AuthFailed { status, message },
            ApiError::TenantSelection { status, body } => Self::NetworkSelection { status, body },
            ApiError::MissingTenant => Self::NoNetwork,
            ApiError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            ApiError::Cancelled => Self::Interrupted,
            ApiError::Transport(e) => Self::ConnectionFailed {
                source: Box::new(e),
            },
            ApiError::Tls(message) => Self::ConnectionFailed {
                source: message.into(),
            },
            ApiError::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            ApiError::HttpStatus { status, body } => Self::Api {
                status,
                message: body,
            },
            ApiError::EmptyResponse { status } => Self::Api {
                status,
                message: "empty response body".into(),
            },
            ApiError::Decode(e) => Self::Decode {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Api(e) => e.into(),
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_exit_codes() {
        let cases = [
            (
                ApiError::Authentication {
                    status: 401,
                    message: "bad secret".into(),
                },
                exit_code::AUTH,
            ),
            (ApiError::MissingTenant, exit_code::USAGE),
            (ApiError::Timeout { timeout_secs: 10 }, exit_code::TIMEOUT),
            (ApiError::Cancelled, exit_code::INTERRUPTED),
            (
                ApiError::HttpStatus {
                    status: 403,
                    body: String::new(),
                },
                exit_code::PERMISSION,
            ),
            (
                ApiError::HttpStatus {
                    status: 500,
                    body: String::new(),
                },
                exit_code::GENERAL,
            ),
            (
                ApiError::TenantSelection {
                    status: 404,
                    body: String::new(),
                },
                exit_code::PERMISSION,
            ),
        ];
        for (err, code) in cases {
            let label = err.to_string();
            assert_eq!(CliError::from(err).exit_code(), code, "{label}");
        }
    }

    #[test]
    fn config_errors_keep_their_shape() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "lab".into(),
        });
        assert!(matches!(err, CliError::NoCredentials { ref profile } if profile == "lab"));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
