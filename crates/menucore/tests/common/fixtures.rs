#![allow(dead_code)]

use std::sync::Arc;

use menucore::{Command, ConfigStore, Dispatcher, MemoryRepository, MenuDocument, MenuView, Reply, UserRef};
use serde_json::json;

pub const ADMIN_ID: i64 = 1001;
pub const SECOND_ADMIN_ID: i64 = 1002;
pub const VISITOR_ID: i64 = 2001;

/// A small menu tree in the shape the bot ships with.
pub fn sample_document() -> MenuDocument {
    MenuDocument::from_value(json!({
        "bot_token": "123456:TEST-TOKEN",
        "welcome_message": "Welcome to the demo bot!",
        "menus": {
            "main": {
                "title": "🏠 <b>Main Menu</b>",
                "buttons": [["What is it?"], ["Plans"], ["How to Apply"], ["Contact"]]
            },
            "plans": {
                "title": "💼 Plans",
                "buttons": [["Gold Plan"], ["Silver Plan"], ["⬅ Back", "🔝 Main Menu"]]
            },
            "gold": {
                "title": "🥇 Gold",
                "buttons": [["Gold Details"], ["⬅ Back", "🔝 Main Menu"]]
            },
            "admin": {
                "title": "⚙️ <b>Admin Settings</b>",
                "buttons": [
                    ["📝 Edit Welcome Message"],
                    ["💬 Edit Response"],
                    ["🔧 Edit Menu"],
                    ["➕ Add Menu", "🗑️ Delete Menu"],
                    ["🔗 Edit Button Mapping"],
                    ["👥 Manage Admins"],
                    ["🔄 Reload Config"],
                    ["🔝 Main Menu"]
                ]
            }
        },
        "button_mapping": {
            "Plans": "plans",
            "Gold Plan": "gold",
            "How to Apply": "apply",
            "⬅ Back": "back",
            "🔝 Main Menu": "main",
            "⚙️ Settings": "admin"
        },
        "responses": {
            "What is it?": "A demo of a configurable menu bot.",
            "Contact": "Write to hello@example.com"
        },
        "admin_ids": [ADMIN_ID, SECOND_ADMIN_ID],
        "theme": "dark"
    }))
    .expect("sample document is valid")
}

pub fn admin() -> UserRef {
    UserRef::new(ADMIN_ID, "Ada")
}

pub fn visitor() -> UserRef {
    UserRef::new(VISITOR_ID, "Vic")
}

/// A dispatcher over an in-memory repository.
pub struct TestBot {
    pub dispatcher: Dispatcher,
    pub repo: Arc<MemoryRepository>,
}

impl TestBot {
    pub async fn new() -> Self {
        Self::with_document(sample_document()).await
    }

    pub async fn with_document(doc: MenuDocument) -> Self {
        let repo = Arc::new(MemoryRepository::new(doc));
        let store = ConfigStore::load(repo.clone()).await.expect("load from memory");
        Self {
            dispatcher: Dispatcher::new(Arc::new(store)),
            repo,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        self.dispatcher.store()
    }

    pub async fn press(&self, user: &UserRef, label: &str) -> Vec<Reply> {
        self.dispatcher.handle_text(user, label).await
    }

    /// Presses each label in turn and returns the replies to the last one.
    pub async fn press_all(&self, user: &UserRef, labels: &[&str]) -> Vec<Reply> {
        let mut last = Vec::new();
        for label in labels {
            last = self.press(user, label).await;
        }
        last
    }

    pub async fn command(&self, user: &UserRef, command: Command) -> Vec<Reply> {
        self.dispatcher.handle_command(user, command).await
    }

    pub fn history(&self, user: &UserRef) -> Vec<String> {
        self.dispatcher.navigation().history(user.id)
    }

    pub fn in_dialogue(&self, user: &UserRef) -> bool {
        self.dispatcher.dialogue_state(user.id).is_some()
    }
}

/// The menu shown by the last menu reply, if any.
pub fn shown_menu(replies: &[Reply]) -> Option<&MenuView> {
    replies.iter().rev().find_map(Reply::as_menu)
}

pub fn shown_menu_name(replies: &[Reply]) -> Option<&str> {
    shown_menu(replies).map(|view| view.menu.as_str())
}

/// All reply bodies joined, for `contains` checks.
pub fn all_text(replies: &[Reply]) -> String {
    replies.iter().map(Reply::body).collect::<Vec<_>>().join("\n")
}
