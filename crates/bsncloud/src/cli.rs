//! Clap derive structures for the `bsncloud` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bsncloud -- inspect BrightSign players registered with BSN.cloud
#[derive(Debug, Parser)]
#[command(
    name = "bsncloud",
    version,
    about = "Inspect BrightSign players managed by BSN.cloud",
    long_about = "Query the BSN.cloud device management API (v1).\n\n\
        Authenticates with OAuth2 client credentials from a config profile,\n\
        flags or environment, selects the configured network and prints\n\
        players and networks as tables, JSON or YAML.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "BSN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Network (tenant) name (overrides profile)
    #[arg(long, short = 'n', env = "BSN_NETWORK", global = true)]
    pub network: Option<String>,

    /// OAuth2 client id (overrides profile)
    #[arg(long, env = "BSN_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "BSN_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "BSN_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// OAuth2 token endpoint (overrides profile)
    #[arg(long, env = "BSN_TOKEN_URL", global = true)]
    pub token_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BSN_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "BSN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect players in the selected network
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List networks the credentials can access
    #[command(alias = "net")]
    Networks(NetworksArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List players
    #[command(alias = "ls")]
    List,

    /// Show one player's details
    Get {
        /// Player serial number (case-insensitive)
        serial: String,
    },
}

// ── Networks ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworksArgs {
    #[command(subcommand)]
    pub command: NetworksCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworksCommand {
    /// List accessible networks
    #[command(alias = "ls")]
    List,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the configuration with secrets masked
    Show,

    /// Store the active profile's client secret in the system keyring
    SetSecret,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
