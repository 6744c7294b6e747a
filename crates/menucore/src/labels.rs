//! Fixed button labels the bot recognises by exact text.
//!
//! Menu buttons are free-form and live in the document. The labels here are
//! the ones the bot itself reacts to: navigation conventions, the admin
//! entry, and the buttons that drive admin dialogues.

use strum::{AsRefStr, EnumIter, EnumString};

/// Conventional back button in the trailing row of sub-menus
pub const BACK: &str = "⬅ Back";

/// Conventional home button in the trailing row of sub-menus
pub const MAIN_MENU: &str = "🔝 Main Menu";

/// Back-button spellings that count as navigation buttons when renaming
pub const NAVIGATION: [&str; 3] = [BACK, "⬅️ Back", MAIN_MENU];

/// Admin entry shown on the main menu to admins only
pub const SETTINGS: &str = "⚙️ Settings";

/// Answers for the "add a button to the main menu?" question
pub const YES: &str = "✅ Yes";
pub const NO: &str = "❌ No";

/// Admin buttons that act immediately, without a dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, EnumIter)]
pub enum AdminAction {
    #[strum(serialize = "👥 Manage Admins")]
    ManageAdmins,
    #[strum(serialize = "🔄 Reload Config")]
    ReloadConfig,
    #[strum(serialize = "🔙 Back to Settings")]
    BackToSettings,
}

/// Admin buttons that open a multi-step dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, EnumIter)]
pub enum DialogueEntry {
    #[strum(serialize = "📝 Edit Welcome Message")]
    EditWelcome,
    #[strum(serialize = "💬 Edit Response")]
    EditResponse,
    #[strum(serialize = "➕ Add Admin")]
    AddAdmin,
    #[strum(serialize = "➖ Remove Admin")]
    RemoveAdmin,
    #[strum(serialize = "🔧 Edit Menu")]
    EditMenu,
    #[strum(serialize = "➕ Add Menu")]
    AddMenu,
    #[strum(serialize = "🗑️ Delete Menu")]
    DeleteMenu,
    #[strum(serialize = "🔗 Edit Button Mapping")]
    EditMapping,
}

/// Choices offered once a menu has been picked in the Edit Menu dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, EnumIter)]
pub enum MenuAction {
    #[strum(serialize = "📝 Edit Title")]
    EditTitle,
    #[strum(serialize = "🔘 Edit Button Text")]
    EditButtonText,
    #[strum(serialize = "➕ Add Button")]
    AddButton,
    #[strum(serialize = "➖ Remove Button")]
    RemoveButton,
    #[strum(serialize = "📋 View All Buttons")]
    ViewAll,
    #[strum(serialize = "🔙 Back to Settings")]
    BackToSettings,
}

impl MenuAction {
    /// Reply-keyboard layout for the action picker.
    pub fn keyboard() -> Vec<Vec<String>> {
        vec![
            vec![Self::EditTitle.as_ref().to_string()],
            vec![Self::EditButtonText.as_ref().to_string()],
            vec![Self::AddButton.as_ref().to_string(), Self::RemoveButton.as_ref().to_string()],
            vec![Self::ViewAll.as_ref().to_string()],
            vec![Self::BackToSettings.as_ref().to_string()],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for action in AdminAction::iter() {
            assert_eq!(action.as_ref().parse::<AdminAction>().unwrap(), action);
        }
        for entry in DialogueEntry::iter() {
            assert_eq!(entry.as_ref().parse::<DialogueEntry>().unwrap(), entry);
        }
    }

    #[test]
    fn test_admin_and_dialogue_labels_do_not_overlap() {
        for entry in DialogueEntry::iter() {
            assert!(entry.as_ref().parse::<AdminAction>().is_err(), "{}", entry.as_ref());
        }
    }

    #[test]
    fn test_menu_action_keyboard_covers_every_action() {
        let flat: Vec<String> = MenuAction::keyboard().into_iter().flatten().collect();
        for action in MenuAction::iter() {
            assert!(flat.iter().any(|label| label == action.as_ref()));
        }
    }

    #[test]
    fn test_plain_text_is_not_an_admin_label() {
        assert!("Manage Admins".parse::<AdminAction>().is_err());
        assert!("hello".parse::<DialogueEntry>().is_err());
    }
}
