//! Resolution of a `ClientConfig` from the config file, profile and flags.
//!
//! Flag (or `BSN_*` env var) > profile > global defaults.

use std::time::Duration;

use secrecy::SecretString;

use bsncloud_api::ClientConfig;
use bsncloud_config::{self as config, Config};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build the client configuration for a command that talks to BSN.cloud.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = config::load_config_or_default();
    resolve(global, &cfg)
}

fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let mut client = match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            let secret = match global.client_secret {
                Some(ref s) => SecretString::from(s.clone()),
                None => config::resolve_client_secret(profile, &profile_name)?,
            };
            let mut client = config::client_config_with_secret(profile, secret)?;
            if profile.timeout.is_none() {
                client.transport.timeout = Duration::from_secs(cfg.defaults.timeout);
            }
            client
        }
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: cfg.available_profiles(),
            });
        }
        None => from_flags(global, &profile_name)?,
    };

    if let Some(ref id) = global.client_id {
        client.client_id.clone_from(id);
    }
    if let Some(ref network) = global.network {
        client.network = Some(network.clone());
    }
    if let Some(ref raw) = global.base_url {
        client.base_url = parse_url("base_url", raw)?;
    }
    if let Some(ref raw) = global.token_url {
        client.token_url = parse_url("token_url", raw)?;
    }
    if let Some(secs) = global.timeout {
        client.transport.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(profile = %profile_name, config = ?client, "resolved client config");
    Ok(client)
}

/// No profile on disk: everything must come from flags or env vars.
fn from_flags(global: &GlobalOpts, profile_name: &str) -> Result<ClientConfig, CliError> {
    let client_id = global.client_id.clone().ok_or_else(|| CliError::NoConfig {
        path: config::config_path().display().to_string(),
    })?;
    let secret = global
        .client_secret
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;
    Ok(ClientConfig::new(client_id, SecretString::from(secret))?)
}

fn parse_url(field: &str, raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}
