use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the menu document.
///
/// Any of these at startup is fatal: the bot refuses to start and prints the
/// message. The same errors come back from a runtime reload, where they are
/// shown to the admin instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Backing file does not exist
    #[error("Configuration file '{}' not found. Create it from the sample in README.md", .0.display())]
    NotFound(PathBuf),

    /// A required top-level field is absent
    #[error("Missing required field '{0}' in configuration")]
    MissingField(&'static str),

    /// `main` or `admin` menu is absent
    #[error("Required menu '{0}' is missing from 'menus'")]
    MissingMenu(&'static str),

    /// `bot_token` still holds the sample value
    #[error("Please update 'bot_token' in the configuration with your actual bot token")]
    PlaceholderToken,

    /// Document is not valid JSON or has fields of the wrong shape
    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by `ConfigStore` mutators.
///
/// The first group are rejections: the mutation was refused and nothing was
/// saved. `Persist` and `Encode` mean the mutation was valid but could not be
/// written; the in-memory document is left as it was before the call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User ID {0} is already an admin")]
    AdminExists(i64),

    #[error("User ID {0} is not an admin")]
    AdminNotFound(i64),

    #[error("There must be at least one admin")]
    LastAdmin,

    #[error("Menu '{0}' is essential and cannot be deleted")]
    ProtectedMenu(String),

    #[error("Menu '{0}' already exists")]
    MenuExists(String),

    #[error("Menu '{0}' not found")]
    MenuNotFound(String),

    #[error("Button '{label}' not found in menu '{menu}'")]
    ButtonNotFound { menu: String, label: String },

    #[error("Button '{label}' already exists in menu '{menu}'")]
    DuplicateButton { menu: String, label: String },

    /// Label already has a mapping or response of its own
    #[error("Button text '{0}' is already used by another button")]
    LabelInUse(String),

    #[error("No mapping exists for button '{0}'")]
    MappingNotFound(String),

    #[error("No response is set for button '{0}'")]
    ResponseNotFound(String),

    /// Write to the backing store failed
    #[error("Failed to save configuration: {0}")]
    Persist(#[from] std::io::Error),

    /// Document could not be serialized
    #[error("Failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the mutation itself was fine but saving it failed.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persist(_) | Self::Encode(_))
    }
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_classification() {
        let io = StoreError::Persist(std::io::Error::other("disk full"));
        assert!(io.is_persistence());
        assert!(!StoreError::LastAdmin.is_persistence());
        assert!(!StoreError::MenuNotFound("x".into()).is_persistence());
    }

    #[test]
    fn test_messages_name_the_subject() {
        let err = StoreError::ButtonNotFound {
            menu: "main".into(),
            label: "Help".into(),
        };
        assert_eq!(err.to_string(), "Button 'Help' not found in menu 'main'");
        assert!(ConfigError::NotFound(PathBuf::from("menu_config.json"))
            .to_string()
            .contains("menu_config.json"));
    }
}
