//! Routes every incoming command or button label.
//!
//! Resolution order for a label, first match wins:
//! 1. an active dialogue takes the raw text
//! 2. fixed admin labels (admin only)
//! 3. `button_mapping`
//! 4. `responses`
//! 5. echo
//!
//! Per-user navigation history and dialogue state live here. Dialogue state
//! is taken out of its map before the step runs and put back afterwards, so
//! no map guard is held across an await.

use std::str::FromStr;
use std::sync::Arc;

use dashmap::DashMap;
use indoc::indoc;

use crate::dialogue::{self, DialogueContext, DialogueState, Outcome, Step};
use crate::html;
use crate::labels::{AdminAction, DialogueEntry};
use crate::model::{Target, ADMIN_MENU, MAIN_MENU};
use crate::navigation::NavigationEngine;
use crate::render::{main_reply_keyboard, render_menu};
use crate::reply::Reply;
use crate::store::ConfigStore;

const HELP_TEXT: &str = indoc! {"
    🤖 <b>Bot Help</b>

    📋 <b>Commands:</b>
    • /start - Start the bot
    • /help - Show this message
    • /menu - Return to main menu
    • /cancel - Abort an admin edit

    🧭 <b>Navigation:</b>
    • Tap buttons to navigate
    • <b>⬅ Back</b> - Previous menu
    • <b>🔝 Main Menu</b> - Home

    💡 Use the keyboard buttons below for easy navigation!"};

/// Commands the bot understands. Names are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Menu,
    Cancel,
}

/// The sender of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: i64,
    pub first_name: String,
}

impl UserRef {
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
        }
    }
}

#[derive(Debug)]
pub struct Dispatcher {
    store: Arc<ConfigStore>,
    navigation: NavigationEngine,
    dialogues: DashMap<i64, DialogueState>,
}

impl Dispatcher {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            store,
            navigation: NavigationEngine::new(),
            dialogues: DashMap::new(),
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn navigation(&self) -> &NavigationEngine {
        &self.navigation
    }

    /// Current dialogue step for a user, if any
    pub fn dialogue_state(&self, user_id: i64) -> Option<DialogueState> {
        self.dialogues.get(&user_id).map(|s| s.value().clone())
    }

    pub async fn handle_command(&self, user: &UserRef, command: Command) -> Vec<Reply> {
        log::info!("User {} ({}) sent {:?}", user.id, user.first_name, command);

        match command {
            Command::Start => {
                self.abandon_dialogue(user.id);
                self.navigation.reset(user.id);

                let is_admin = self.store.is_admin(user.id).await;
                let (welcome, keyboard) = self
                    .store
                    .read(|doc| (doc.welcome_message.clone(), main_reply_keyboard(doc, is_admin)))
                    .await;
                let greeting = format!("👋 Hello <b>{}</b>!\n\n{}", html::escape(&user.first_name), welcome);

                vec![
                    Reply::keyboard(greeting, keyboard),
                    self.show_menu(user.id, MAIN_MENU, true).await,
                ]
            }
            Command::Help => vec![Reply::text(HELP_TEXT)],
            Command::Menu => {
                self.abandon_dialogue(user.id);
                self.navigation.reset(user.id);
                vec![self.show_menu(user.id, MAIN_MENU, true).await]
            }
            Command::Cancel => match self.dialogues.remove(&user.id) {
                Some((_, state)) => {
                    log::info!("User {} cancelled dialogue at {:?}", user.id, state);
                    vec![Reply::plain("❌ Operation cancelled."), self.admin_root(user.id).await]
                }
                None => vec![Reply::plain("Nothing to cancel.")],
            },
        }
    }

    /// Handles a typed message or a pressed button label.
    pub async fn handle_text(&self, user: &UserRef, text: &str) -> Vec<Reply> {
        let active = self.dialogues.remove(&user.id).map(|(_, state)| state);
        if let Some(state) = active {
            return self.continue_dialogue(user, state, text).await;
        }

        log::info!("User {} pressed button: {}", user.id, text);

        if let Ok(action) = AdminAction::from_str(text) {
            if !self.store.is_admin(user.id).await {
                return vec![access_denied(user.id)];
            }
            return self.admin_action(user, action).await;
        }
        if let Ok(entry) = DialogueEntry::from_str(text) {
            if !self.store.is_admin(user.id).await {
                return vec![access_denied(user.id)];
            }
            let step = dialogue::begin(entry, self.context(user.id)).await;
            return self.apply_step(user.id, step).await;
        }

        let (target, response) = self
            .store
            .read(|doc| (doc.target_for(text), doc.responses.get(text).cloned()))
            .await;

        if let Some(target) = target {
            return self.follow(user, target).await;
        }
        if let Some(response) = response {
            log::info!("Sent custom response for button: {}", text);
            return vec![Reply::plain(response)];
        }

        vec![Reply::plain(format!("You selected: {}", text))]
    }

    /// Label at a position of a menu as this user sees it.
    ///
    /// Inline buttons whose label is too long for callback data are sent by
    /// position instead.
    pub async fn resolve_position(&self, user_id: i64, menu: &str, row: usize, col: usize) -> Option<String> {
        let is_admin = self.store.is_admin(user_id).await;
        let view = self.store.read(|doc| render_menu(doc, menu, is_admin)).await;
        if view.menu != menu {
            return None;
        }
        view.rows.get(row).and_then(|r| r.get(col)).cloned()
    }

    async fn follow(&self, user: &UserRef, target: Target) -> Vec<Reply> {
        match target {
            Target::Back => {
                let previous = self.navigation.back(user.id);
                vec![self.show_menu(user.id, &previous, false).await]
            }
            Target::Main => {
                self.navigation.reset(user.id);
                vec![self.show_menu(user.id, MAIN_MENU, true).await]
            }
            Target::Admin => {
                if !self.store.is_admin(user.id).await {
                    return vec![access_denied(user.id)];
                }
                vec![self.show_menu(user.id, ADMIN_MENU, true).await]
            }
            Target::Menu(name) => {
                if !self.store.has_menu(&name).await {
                    log::error!("Button for user {} points to missing menu '{}'", user.id, name);
                    return vec![
                        Reply::text(format!(
                            "⚠️ Menu {} was not found. Showing the main menu instead.",
                            html::code(&name)
                        )),
                        self.show_menu(user.id, MAIN_MENU, false).await,
                    ];
                }
                vec![self.show_menu(user.id, &name, true).await]
            }
        }
    }

    async fn admin_action(&self, user: &UserRef, action: AdminAction) -> Vec<Reply> {
        match action {
            AdminAction::ManageAdmins => {
                let ids = self.store.admin_ids().await;
                let listing = if ids.is_empty() {
                    "None".to_string()
                } else {
                    ids.iter().map(|id| format!("• {}", id)).collect::<Vec<_>>().join("\n")
                };
                let rows = vec![
                    vec![
                        DialogueEntry::AddAdmin.as_ref().to_string(),
                        DialogueEntry::RemoveAdmin.as_ref().to_string(),
                    ],
                    vec![AdminAction::BackToSettings.as_ref().to_string()],
                ];
                vec![Reply::keyboard(
                    format!(
                        "👥 <b>Admin Management</b>\n\nCurrent Admins:\n{}\n\nYour ID: <code>{}</code>\n\nWhat would you like to do?",
                        listing, user.id
                    ),
                    rows,
                )]
            }
            AdminAction::ReloadConfig => match self.store.reload().await {
                Ok(()) => vec![Reply::plain(format!(
                    "✅ Configuration reloaded successfully!\n\nAll changes from {} have been loaded.",
                    self.store.location()
                ))],
                Err(e) => {
                    log::error!("Reload requested by {} failed: {}", user.id, e);
                    vec![Reply::plain(format!("❌ Error reloading config:\n{}", e))]
                }
            },
            AdminAction::BackToSettings => vec![self.admin_root(user.id).await],
        }
    }

    async fn continue_dialogue(&self, user: &UserRef, state: DialogueState, text: &str) -> Vec<Reply> {
        if !self.store.is_admin(user.id).await {
            log::warn!("User {} lost admin rights mid-dialogue, dropping {:?}", user.id, state);
            return vec![access_denied(user.id)];
        }
        let step = dialogue::advance(state, text, self.context(user.id)).await;
        self.apply_step(user.id, step).await
    }

    async fn apply_step(&self, user_id: i64, step: Step) -> Vec<Reply> {
        let Step { outcome, mut replies } = step;
        match outcome {
            Outcome::Continue(state) => {
                self.dialogues.insert(user_id, state);
            }
            Outcome::Done => replies.push(self.admin_root(user_id).await),
        }
        replies
    }

    /// Returns a user to the admin menu with a fresh history.
    async fn admin_root(&self, user_id: i64) -> Reply {
        self.navigation.reset(user_id);
        self.show_menu(user_id, ADMIN_MENU, true).await
    }

    async fn show_menu(&self, user_id: i64, menu: &str, push: bool) -> Reply {
        self.navigation.enter(user_id, menu, push);
        let is_admin = self.store.is_admin(user_id).await;
        let view = self.store.read(|doc| render_menu(doc, menu, is_admin)).await;
        log::info!("User {} navigated to menu: {}", user_id, view.menu);
        Reply::Menu(view)
    }

    fn abandon_dialogue(&self, user_id: i64) {
        if let Some((_, state)) = self.dialogues.remove(&user_id) {
            log::info!("User {} abandoned dialogue at {:?}", user_id, state);
        }
    }

    fn context(&self, user_id: i64) -> DialogueContext<'_> {
        DialogueContext {
            store: &self.store,
            user_id,
        }
    }
}

fn access_denied(user_id: i64) -> Reply {
    Reply::text(format!(
        "⛔ Access Denied!\n\n\
         You are not authorized to access admin settings.\n\n\
         Your User ID: <code>{}</code>\n\
         Contact the bot owner to get admin access.",
        user_id
    ))
}
