//! CLI command definitions.

pub mod entries;
pub mod events;
pub mod range;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ClientConfig;

/// CLI client for the situps live-update server.
#[derive(Debug, Parser)]
#[command(name = "situps-client")]
#[command(about = "CLI client for the situps live-update server", long_about = None)]
pub struct Cli {
    /// Live-update socket address (host:port).
    #[arg(long, env = "SITUPS_WS_URL")]
    pub url: Option<String>,

    /// User whose entries are read and written.
    #[arg(long, env = "SITUPS_USER_ID")]
    pub user: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with the command-line overrides applied.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.url {
            config = config.with_ws_url(url);
        }
        if let Some(user) = &self.user {
            config = config.with_user_id(user);
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the weeks of a date range (offline).
    Range(range::RangeArgs),
    /// Fetch the amount recorded on a date.
    Get(entries::GetArgs),
    /// Record or clear the amount on a date.
    Update(entries::UpdateArgs),
    /// Print every update of a date as it happens.
    Watch(events::WatchArgs),
    /// Fetch the amounts of a whole range.
    Load(entries::LoadArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = Cli::parse_from([
            "situps-client",
            "--url",
            "10.0.0.2:7000",
            "--user",
            "grace",
            "get",
            "--date",
            "2024-03-06",
        ]);
        let config = cli.client_config();

        assert_eq!(config.ws_url, "10.0.0.2:7000");
        assert_eq!(config.user_id, "grace");
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_json_format_flag() {
        let cli = Cli::parse_from(["situps-client", "--format", "json", "--quiet", "range"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Range(_)));
    }
}
