//! Transport-neutral output of the dispatcher.
//!
//! The core never talks to Telegram. Every event produces a list of these,
//! and the bot crate turns each one into a message, an edit, or a keyboard.

use crate::render::MenuView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// HTML-formatted message
    Text(String),
    /// Literal text, sent without any parse mode
    Plain(String),
    /// HTML message with a persistent reply keyboard
    Keyboard { text: String, rows: Vec<Vec<String>> },
    /// A menu with inline buttons; edits the originating message when there is one
    Menu(MenuView),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn keyboard(text: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self::Keyboard {
            text: text.into(),
            rows,
        }
    }

    /// Visible text of the reply, whatever its kind.
    pub fn body(&self) -> &str {
        match self {
            Self::Text(text) | Self::Plain(text) => text,
            Self::Keyboard { text, .. } => text,
            Self::Menu(view) => &view.title,
        }
    }

    pub fn as_menu(&self) -> Option<&MenuView> {
        match self {
            Self::Menu(view) => Some(view),
            _ => None,
        }
    }
}
