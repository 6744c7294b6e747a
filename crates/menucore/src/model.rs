//! The menu document: menus, button mappings, responses and admins
//!
//! This is the exact shape of `menu_config.json`. Unknown top-level fields are
//! kept in `extra` so a save never drops something a human put there.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::labels;

/// Sample token shipped in the README config; a document carrying it is rejected.
pub const PLACEHOLDER_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";

/// Root menu shown on /start and /menu
pub const MAIN_MENU: &str = "main";

/// Admin settings root
pub const ADMIN_MENU: &str = "admin";

/// Top-level fields a document must carry
const REQUIRED_FIELDS: [&str; 4] = ["bot_token", "welcome_message", "menus", "button_mapping"];

/// Menus that always exist and can never be deleted
const PROTECTED_MENUS: [&str; 2] = [MAIN_MENU, ADMIN_MENU];

static MENU_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("menu name regex"));

/// A single menu: a title and a grid of button labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub buttons: Vec<Vec<String>>,
}

impl Menu {
    /// New menu with the standard navigation row as its only row.
    pub fn with_navigation(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            buttons: vec![vec![labels::BACK.to_string(), labels::MAIN_MENU.to_string()]],
        }
    }

    /// Position (row, col) of the first button with exactly this label.
    pub fn find_button(&self, label: &str) -> Option<(usize, usize)> {
        self.buttons.iter().enumerate().find_map(|(row_idx, row)| {
            row.iter()
                .position(|button| button == label)
                .map(|col_idx| (row_idx, col_idx))
        })
    }

    pub fn contains_button(&self, label: &str) -> bool {
        self.find_button(label).is_some()
    }

    /// Label at a grid position, if the position exists.
    pub fn button_at(&self, row: usize, col: usize) -> Option<&str> {
        self.buttons.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Adds `label` as its own row just above the last row.
    ///
    /// The last row is where the Back / Main Menu buttons live, so new content
    /// goes above it. An empty menu simply gets the row.
    pub fn insert_row_before_last(&mut self, label: impl Into<String>) {
        let at = self.buttons.len().saturating_sub(1);
        self.buttons.insert(at, vec![label.into()]);
    }

    /// Removes the first button with this label, dropping its row if it
    /// ends up empty. Returns false when no such button exists.
    pub fn remove_button(&mut self, label: &str) -> bool {
        let Some((row, col)) = self.find_button(label) else {
            return false;
        };
        self.buttons[row].remove(col);
        if self.buttons[row].is_empty() {
            self.buttons.remove(row);
        }
        true
    }

    /// Replaces the first button with exactly `old` by `new`.
    pub fn rename_button(&mut self, old: &str, new: impl Into<String>) -> bool {
        match self.find_button(old) {
            Some((row, col)) => {
                self.buttons[row][col] = new.into();
                true
            }
            None => false,
        }
    }
}

/// Where a mapped button leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Previous menu in the user's history
    Back,
    /// Main menu, clearing history
    Main,
    /// Admin settings, admins only
    Admin,
    /// Any other value names a menu
    Menu(String),
}

impl Target {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "back" => Self::Back,
            "main" => Self::Main,
            "admin" => Self::Admin,
            other => Self::Menu(other.to_string()),
        }
    }

    pub fn is_reserved(raw: &str) -> bool {
        !matches!(Self::parse(raw), Self::Menu(_))
    }
}

/// The whole configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDocument {
    pub bot_token: String,
    pub welcome_message: String,
    pub menus: BTreeMap<String, Menu>,
    pub button_mapping: BTreeMap<String, String>,
    #[serde(default)]
    pub responses: BTreeMap<String, String>,
    #[serde(default)]
    pub admin_ids: Vec<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuDocument {
    /// Validates raw JSON and converts it into a document.
    ///
    /// Field presence is checked on the raw value first so the error can name
    /// the missing field instead of surfacing a serde message.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let object = value.as_object().ok_or_else(|| {
            ConfigError::Parse(serde::de::Error::custom("configuration root must be a JSON object"))
        })?;

        for field in REQUIRED_FIELDS {
            if !object.contains_key(field) {
                return Err(ConfigError::MissingField(field));
            }
        }

        let doc: Self = serde_json::from_value(value)?;

        if doc.bot_token == PLACEHOLDER_TOKEN {
            return Err(ConfigError::PlaceholderToken);
        }
        for menu in PROTECTED_MENUS {
            if !doc.menus.contains_key(menu) {
                return Err(ConfigError::MissingMenu(menu));
            }
        }

        Ok(doc)
    }

    /// Parses and validates a JSON document from text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn is_protected(menu_name: &str) -> bool {
        PROTECTED_MENUS.contains(&menu_name)
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    pub fn menu(&self, name: &str) -> Option<&Menu> {
        self.menus.get(name)
    }

    /// Mapping target for a label, if mapped.
    pub fn target_for(&self, label: &str) -> Option<Target> {
        self.button_mapping.get(label).map(|raw| Target::parse(raw))
    }

    /// Mappings whose target names a menu that does not exist.
    pub fn dangling_mappings(&self) -> Vec<(&str, &str)> {
        self.button_mapping
            .iter()
            .filter(|(_, target)| !Target::is_reserved(target) && !self.menus.contains_key(target.as_str()))
            .map(|(label, target)| (label.as_str(), target.as_str()))
            .collect()
    }

    /// Moves the mapping and response entries keyed by `old` to `new`.
    ///
    /// Returns (mapping_moved, response_moved).
    /// True when `label` is a key of `button_mapping` or `responses`.
    pub fn label_in_use(&self, label: &str) -> bool {
        self.button_mapping.contains_key(label) || self.responses.contains_key(label)
    }

    pub fn rekey_label(&mut self, old: &str, new: &str) -> (bool, bool) {
        let mapping_moved = match self.button_mapping.remove(old) {
            Some(target) => {
                self.button_mapping.insert(new.to_string(), target);
                true
            }
            None => false,
        };
        let response_moved = match self.responses.remove(old) {
            Some(text) => {
                self.responses.insert(new.to_string(), text);
                true
            }
            None => false,
        };
        (mapping_moved, response_moved)
    }
}

/// Turns free-form admin input into a menu key.
///
/// Lowercases, turns spaces into underscores, then accepts only
/// `[a-z0-9_]+`. `"New Menu"` becomes `new_menu`; `"123-x"` is rejected.
pub fn normalize_menu_name(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase().replace(' ', "_");
    MENU_NAME_RE.is_match(&name).then_some(name)
}
