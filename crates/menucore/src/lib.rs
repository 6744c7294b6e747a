//! menucore - menu tree, navigation and admin dialogues for menubot
//!
//! This library holds everything the bot does that is not Telegram plumbing.
//! Handlers in the `menubot` crate feed it commands and button labels and get
//! back a list of [`Reply`] values to deliver.
//!
//! # Module Structure
//!
//! - `config`: environment-driven settings (config path, log file, Bot API URL)
//! - `error`: startup and mutation error types
//! - `model`: the menu document (menus, mappings, responses, admins)
//! - `store`: `ConfigStore` and the repositories behind it
//! - `navigation`: per-user back-navigation history
//! - `render`: menu definitions to displayable views
//! - `dialogue`: multi-step admin editing conversations
//! - `dispatcher`: routes each incoming event to one of the above

pub mod config;
pub mod dialogue;
pub mod dispatcher;
pub mod error;
pub mod html;
pub mod labels;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod render;
pub mod reply;
pub mod store;

// Re-export commonly used types for convenience
pub use dialogue::DialogueState;
pub use dispatcher::{Command, Dispatcher, UserRef};
pub use error::{ConfigError, StoreError, StoreResult};
pub use logging::init_logger;
pub use model::{Menu, MenuDocument, Target};
pub use navigation::NavigationEngine;
pub use render::MenuView;
pub use reply::Reply;
pub use store::{ConfigStore, DocumentRepository, JsonFileRepository, MemoryRepository};
