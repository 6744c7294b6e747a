//! Telegram transport: bot setup, handler tree and reply delivery

pub mod bot;
pub mod deliver;
pub mod handlers;
pub mod keyboard;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
