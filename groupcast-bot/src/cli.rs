//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "groupcast")]
#[command(about = "Operator-only Telegram broadcast bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Load and validate config, print the group registry, and exit.
    Check {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Human-readable summary printed by `groupcast check`.
pub fn describe_config(config: &BotConfig) -> String {
    let mut out = format!(
        "Operator: {}\nFan-out concurrency: {}\nLog file: {}\nGroups ({}):",
        config.operator_id(),
        config.broadcast_concurrency(),
        config.log_file(),
        config.registry().len()
    );
    for (index, group) in config.registry().iter() {
        out.push_str(&format!("\n  [{}] {} ({})", index, group.name, group.id));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["groupcast", "run", "--token", "abc"]).unwrap();
        match cli.command {
            Commands::Run { token } => assert_eq!(token.as_deref(), Some("abc")),
            Commands::Check { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_check_without_token() {
        let cli = Cli::try_parse_from(["groupcast", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { token: None }));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["groupcast"]).is_err());
    }
}
