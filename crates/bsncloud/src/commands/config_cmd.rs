//! Config subcommand handlers.

use std::fmt::Write;

use secrecy::SecretString;
use serde::Serialize;

use bsncloud_config::{self as config, Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Serializable view of a profile with its plaintext secret masked.
#[derive(Serialize)]
struct RedactedProfile<'a> {
    client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret_env: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    network: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

impl<'a> From<&'a Profile> for RedactedProfile<'a> {
    fn from(p: &'a Profile) -> Self {
        Self {
            client_id: &p.client_id,
            client_secret: p.client_secret.as_ref().map(|_| MASK),
            client_secret_env: p.client_secret_env.as_deref(),
            network: p.network.as_deref(),
            base_url: p.base_url.as_deref(),
            token_url: p.token_url.as_deref(),
            timeout: p.timeout,
        }
    }
}

#[derive(Serialize)]
struct RedactedConfig<'a> {
    default_profile: Option<&'a str>,
    defaults: &'a config::Defaults,
    profiles: Vec<(&'a str, RedactedProfile<'a>)>,
}

impl<'a> From<&'a Config> for RedactedConfig<'a> {
    fn from(cfg: &'a Config) -> Self {
        Self {
            default_profile: cfg.default_profile.as_deref(),
            defaults: &cfg.defaults,
            profiles: cfg
                .profiles
                .iter()
                .map(|(name, p)| (name.as_str(), RedactedProfile::from(p)))
                .collect(),
        }
    }
}

/// Format config as TOML-like text, masking the plaintext secret.
fn format_config_redacted(cfg: &RedactedConfig<'_>) -> String {
    let mut out = String::new();

    if let Some(default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = write!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = write!(out, "client_id = \"{}\"", p.client_id);
        let optional = [
            ("client_secret", p.client_secret),
            ("client_secret_env", p.client_secret_env),
            ("network", p.network),
            ("base_url", p.base_url),
            ("token_url", p.token_url),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                let _ = write!(out, "\n{key} = \"{value}\"");
            }
        }
        if let Some(timeout) = p.timeout {
            let _ = write!(out, "\ntimeout = {timeout}");
        }
    }

    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let view = RedactedConfig::from(&cfg);
            let out = output::render_single(&global.output, &view, format_config_redacted, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetSecret => {
            let cfg = config::load_config_or_default();
            let profile_name = cfg.active_profile_name(global.profile.as_deref());
            cfg.profile(&profile_name)?;

            let secret = rpassword::prompt_password("Client secret: ")?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "client_secret".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            config::store_client_secret(&profile_name, &SecretString::from(secret))?;
            eprintln!("✓ Client secret stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Config {
        toml::from_str(
            r#"
            default_profile = "retail"

            [profiles.retail]
            client_id = "retail-client"
            client_secret = "hunter2"
            network = "Retail"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn show_masks_plaintext_secret() {
        let cfg = sample();
        let text = format_config_redacted(&RedactedConfig::from(&cfg));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("client_secret = \"****\""));
        assert!(text.contains("[profiles.retail]"));
        assert!(text.contains("network = \"Retail\""));

        let json = serde_json::to_string(&RedactedConfig::from(&cfg)).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
