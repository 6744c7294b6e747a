//! Configuration constants for the bot

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Display name used in startup banners and logs
pub const BOT_NAME: &str = "Menu Demo Chat Bot";

/// Path to the JSON menu document
/// Read from MENU_CONFIG_PATH environment variable
/// Default: menu_config.json
pub static MENU_CONFIG_PATH: Lazy<String> =
    Lazy::new(|| env::var("MENU_CONFIG_PATH").unwrap_or_else(|_| "menu_config.json".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: menubot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "menubot.log".to_string()));

/// Custom Bot API server (e.g. a local telegram-bot-api instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Must exceed the long-polling timeout teloxide uses for getUpdates
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Telegram limits
pub mod telegram {
    /// Maximum size of inline button callback data, in bytes
    pub const MAX_CALLBACK_DATA_BYTES: usize = 64;
}
