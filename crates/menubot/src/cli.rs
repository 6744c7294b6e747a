use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "menubot")]
#[command(author, version, about = "Menu-driven Telegram bot with in-chat administration", long_about = None)]
pub struct Cli {
    /// Path to the menu document (overrides MENU_CONFIG_PATH)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Validate the menu document, print a summary and exit
    Check,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Menu document path: the flag wins over the environment.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(menucore::config::MENU_CONFIG_PATH.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["menubot"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["menubot", "check", "--config", "/tmp/menu.json"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Check));
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/menu.json"));
    }
}
