//! Bot instance creation and the command list
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use menucore::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "show this message")]
    Help,
    #[command(description = "return to the main menu")]
    Menu,
    #[command(description = "abort an admin edit")]
    Cancel,
}

impl From<Command> for menucore::Command {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start => Self::Start,
            Command::Help => Self::Help,
            Command::Menu => Self::Menu,
            Command::Cancel => Self::Cancel,
        }
    }
}

/// Creates a Bot instance with custom or default API URL
///
/// The token comes from the menu document, not the environment.
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, client setup)
pub fn create_bot(token: &str) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;

    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        Bot::with_client(token, client).set_api_url(url)
    } else {
        Bot::with_client(token, client)
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_count() {
        assert_eq!(Command::bot_commands().len(), 4);
    }

    #[test]
    fn test_commands_parse_case_sensitively() {
        assert_eq!(Command::parse("/start", "menubot").ok(), Some(Command::Start));
        assert_eq!(Command::parse("/cancel", "menubot").ok(), Some(Command::Cancel));
        assert!(Command::parse("/START", "menubot").is_err());
        assert!(Command::parse("/settings", "menubot").is_err());
    }

    #[test]
    fn test_maps_onto_core_commands() {
        assert_eq!(menucore::Command::from(Command::Menu), menucore::Command::Menu);
        assert_eq!(menucore::Command::from(Command::Help), menucore::Command::Help);
    }
}
