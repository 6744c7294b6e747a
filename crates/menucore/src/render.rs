//! Menu rendering
//!
//! Turns a stored menu into what a user actually sees. Two details live here
//! rather than in the document: admins get a Settings button appended to the
//! main menu, and a menu that does not exist renders as `main`.

use crate::labels;
use crate::model::{MenuDocument, MAIN_MENU};

/// Default title for menus saved without one
const DEFAULT_TITLE: &str = "Menu";

/// A menu ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    /// Name of the menu actually rendered (`main` after a fallback)
    pub menu: String,
    pub title: String,
    pub rows: Vec<Vec<String>>,
}

impl MenuView {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// Renders `name` for a user, falling back to `main` when it does not exist.
pub fn render_menu(doc: &MenuDocument, name: &str, is_admin: bool) -> MenuView {
    let (menu_name, menu) = match doc.menu(name) {
        Some(menu) => (name, menu.clone()),
        None => {
            log::error!("Menu '{}' not found in configuration", name);
            (MAIN_MENU, doc.menu(MAIN_MENU).cloned().unwrap_or_default())
        }
    };

    let mut rows = menu.buttons;
    if menu_name == MAIN_MENU && is_admin && !rows.iter().flatten().any(|b| b == labels::SETTINGS) {
        rows.push(vec![labels::SETTINGS.to_string()]);
    }

    let title = if menu.title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        menu.title
    };

    MenuView {
        menu: menu_name.to_string(),
        title,
        rows,
    }
}

/// Persistent reply keyboard sent with the welcome message.
///
/// All main-menu buttons flattened: the first one full width, the rest in
/// pairs, then Settings for admins.
pub fn main_reply_keyboard(doc: &MenuDocument, is_admin: bool) -> Vec<Vec<String>> {
    let flat: Vec<String> = doc
        .menu(MAIN_MENU)
        .map(|menu| {
            menu.buttons
                .iter()
                .flatten()
                .filter(|b| b.as_str() != labels::SETTINGS)
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let mut rows = Vec::new();
    if let Some((first, rest)) = flat.split_first() {
        rows.push(vec![first.clone()]);
        rows.extend(rest.chunks(2).map(<[String]>::to_vec));
    }

    if is_admin {
        rows.push(vec![labels::SETTINGS.to_string()]);
    }

    rows
}

/// One line per row, for admin previews.
pub fn describe_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let buttons = row.iter().map(|b| crate::html::code(b)).collect::<Vec<_>>().join(" | ");
            format!("<b>Row {}:</b> {}", i + 1, buttons)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc() -> MenuDocument {
        MenuDocument::from_value(json!({
            "bot_token": "1:x",
            "welcome_message": "hi",
            "menus": {
                "main": {"title": "Hi", "buttons": [["What is it?"], ["Plans"], ["Apply"], ["Contact"]]},
                "admin": {"title": "", "buttons": []},
                "plans": {"title": "Plans", "buttons": [["Gold"], ["⬅ Back", "🔝 Main Menu"]]}
            },
            "button_mapping": {"Plans": "plans"}
        }))
        .unwrap()
    }

    #[test]
    fn test_render_existing_menu() {
        let view = render_menu(&doc(), "plans", false);
        assert_eq!(view.menu, "plans");
        assert_eq!(view.title, "Plans");
        assert_eq!(view.rows.len(), 2);
    }

    #[test]
    fn test_missing_menu_falls_back_to_main() {
        let view = render_menu(&doc(), "sub", false);
        assert_eq!(view.menu, "main");
        assert_eq!(view.title, "Hi");
    }

    #[test]
    fn test_settings_button_only_for_admins_on_main() {
        let admin_view = render_menu(&doc(), "main", true);
        assert_eq!(admin_view.rows.last().unwrap(), &vec![labels::SETTINGS.to_string()]);

        let user_view = render_menu(&doc(), "main", false);
        assert!(!user_view.labels().any(|l| l == labels::SETTINGS));

        let sub_view = render_menu(&doc(), "plans", true);
        assert!(!sub_view.labels().any(|l| l == labels::SETTINGS));
    }

    #[test]
    fn test_empty_title_gets_default() {
        assert_eq!(render_menu(&doc(), "admin", true).title, "Menu");
    }

    #[test]
    fn test_main_reply_keyboard_layout() {
        let rows = main_reply_keyboard(&doc(), true);
        assert_eq!(
            rows,
            vec![
                vec!["What is it?".to_string()],
                vec!["Plans".to_string(), "Apply".to_string()],
                vec!["Contact".to_string()],
                vec![labels::SETTINGS.to_string()],
            ]
        );
    }
}
