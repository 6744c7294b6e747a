//! Menu views and button rows as Telegram keyboards
//!
//! Inline buttons carry `btn:<label>` as callback data. Telegram caps
//! callback data at 64 bytes, so longer labels are sent as
//! `pos:<menu>:<row>:<col>` and resolved back to a label by the dispatcher.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use menucore::config::telegram::MAX_CALLBACK_DATA_BYTES;
use menucore::MenuView;

const LABEL_PREFIX: &str = "btn:";
const POSITION_PREFIX: &str = "pos:";

/// What an inline button press refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackTarget {
    Label(String),
    Position { menu: String, row: usize, col: usize },
}

/// Callback data for the button at `row`/`col` of `menu`.
///
/// `None` when even the position form is over Telegram's limit: one such
/// button would make Telegram reject the whole keyboard.
pub fn callback_data(menu: &str, row: usize, col: usize, label: &str) -> Option<String> {
    let data = format!("{}{}", LABEL_PREFIX, label);
    if data.len() <= MAX_CALLBACK_DATA_BYTES {
        return Some(data);
    }

    let data = format!("{}{}:{}:{}", POSITION_PREFIX, menu, row, col);
    if data.len() > MAX_CALLBACK_DATA_BYTES {
        log::warn!("Skipping button '{}' in menu '{}': callback data exceeds Telegram's limit", label, menu);
        return None;
    }
    Some(data)
}

/// Decodes callback data. Data without a known prefix is taken as a label.
pub fn parse_callback(data: &str) -> CallbackTarget {
    if let Some(label) = data.strip_prefix(LABEL_PREFIX) {
        return CallbackTarget::Label(label.to_string());
    }

    if let Some(rest) = data.strip_prefix(POSITION_PREFIX) {
        // Menu names may contain ':', so split from the right
        let mut parts = rest.rsplitn(3, ':');
        if let (Some(col), Some(row), Some(menu)) = (parts.next(), parts.next(), parts.next()) {
            if let (Ok(row), Ok(col)) = (row.parse(), col.parse()) {
                return CallbackTarget::Position {
                    menu: menu.to_string(),
                    row,
                    col,
                };
            }
        }
    }

    CallbackTarget::Label(data.to_string())
}

/// Inline keyboard for a menu view
pub fn inline_menu(view: &MenuView) -> InlineKeyboardMarkup {
    let rows = view
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            row.iter()
                .enumerate()
                .filter_map(|(col_idx, label)| {
                    callback_data(&view.menu, row_idx, col_idx, label)
                        .map(|data| InlineKeyboardButton::callback(label.clone(), data))
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty());
    InlineKeyboardMarkup::new(rows)
}

/// Persistent reply keyboard
pub fn reply_keyboard(rows: &[Vec<String>]) -> KeyboardMarkup {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    KeyboardMarkup::new(rows).resize_keyboard()
}
