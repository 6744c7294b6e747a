//! Admin dialogues
//!
//! Each dialogue is a short chain of text prompts. The whole chain is one
//! enum: every variant is a single step and carries exactly what that step
//! needs. [`advance`] takes the current step and the admin's text and returns
//! the next step (or `Done`) together with the replies to send.
//!
//! Validation failures keep the dialogue where it is and reprompt. Store
//! rejections and save failures end it; the dispatcher then returns the admin
//! to the admin root.

mod admins;
mod content;
mod menus;
mod structure;

use crate::error::StoreError;
use crate::html;
use crate::labels::{self, DialogueEntry};
use crate::reply::Reply;
use crate::store::ConfigStore;

/// Generic notice for a valid change that could not be written.
pub const SAVE_FAILED: &str = "❌ Failed to save changes. Please try again.";

/// Which admin list mutation an id prompt feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminMode {
    Add,
    Remove,
}

/// Where a user is inside an admin dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueState {
    AwaitingWelcomeText,
    AwaitingResponseLabel,
    AwaitingResponseText { label: String },
    AwaitingAdminId { mode: AdminMode },

    // Edit Menu
    AwaitingMenuName,
    AwaitingMenuAction { menu: String },
    AwaitingNewTitle { menu: String },
    AwaitingButtonToRename { menu: String },
    AwaitingNewButtonText { menu: String, old_label: String },
    AwaitingNewButtonLabel { menu: String },
    AwaitingButtonToRemove { menu: String },

    // Add Menu
    AwaitingNewMenuName,
    AwaitingNewMenuTitle { name: String },
    AwaitingAddToMainChoice { name: String },
    AwaitingMainButtonLabel { name: String },

    AwaitingMenuToDelete,

    // Edit Button Mapping
    AwaitingMappingLabel,
    AwaitingMappingTarget { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(DialogueState),
    Done,
}

/// Result of feeding one input to a dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub outcome: Outcome,
    pub replies: Vec<Reply>,
}

impl Step {
    pub fn next(state: DialogueState, reply: Reply) -> Self {
        Self {
            outcome: Outcome::Continue(state),
            replies: vec![reply],
        }
    }

    pub fn done(replies: Vec<Reply>) -> Self {
        Self {
            outcome: Outcome::Done,
            replies,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.outcome, Outcome::Done)
    }
}

/// What a dialogue step can touch.
#[derive(Debug, Clone, Copy)]
pub struct DialogueContext<'a> {
    pub store: &'a ConfigStore,
    /// Admin driving the dialogue
    pub user_id: i64,
}

/// Opens a dialogue. The caller has already checked admin rights.
pub async fn begin(entry: DialogueEntry, ctx: DialogueContext<'_>) -> Step {
    log::info!("Admin {} started dialogue: {}", ctx.user_id, entry.as_ref());
    match entry {
        DialogueEntry::EditWelcome => content::begin_welcome(ctx).await,
        DialogueEntry::EditResponse => content::begin_response(ctx).await,
        DialogueEntry::AddAdmin => admins::begin(AdminMode::Add, ctx).await,
        DialogueEntry::RemoveAdmin => admins::begin(AdminMode::Remove, ctx).await,
        DialogueEntry::EditMenu => menus::begin(ctx).await,
        DialogueEntry::AddMenu => structure::begin_add_menu(),
        DialogueEntry::DeleteMenu => structure::begin_delete_menu(ctx).await,
        DialogueEntry::EditMapping => structure::begin_edit_mapping(ctx).await,
    }
}

/// Feeds `input` to the step the user is at.
pub async fn advance(state: DialogueState, input: &str, ctx: DialogueContext<'_>) -> Step {
    use DialogueState::*;

    match state {
        AwaitingWelcomeText => content::welcome_text(input, ctx).await,
        AwaitingResponseLabel => content::response_label(input, ctx).await,
        AwaitingResponseText { label } => content::response_text(label, input, ctx).await,
        AwaitingAdminId { mode } => admins::admin_id(mode, input, ctx).await,

        AwaitingMenuName => menus::menu_name(input, ctx).await,
        AwaitingMenuAction { menu } => menus::action(menu, input, ctx).await,
        AwaitingNewTitle { menu } => menus::new_title(menu, input, ctx).await,
        AwaitingButtonToRename { menu } => menus::button_to_rename(menu, input, ctx).await,
        AwaitingNewButtonText { menu, old_label } => menus::new_button_text(menu, old_label, input, ctx).await,
        AwaitingNewButtonLabel { menu } => menus::new_button_label(menu, input, ctx).await,
        AwaitingButtonToRemove { menu } => menus::button_to_remove(menu, input, ctx).await,

        AwaitingNewMenuName => structure::new_menu_name(input, ctx).await,
        AwaitingNewMenuTitle { name } => structure::new_menu_title(name, input, ctx).await,
        AwaitingAddToMainChoice { name } => structure::add_to_main_choice(name, input),
        AwaitingMainButtonLabel { name } => structure::main_button_label(name, input, ctx).await,

        AwaitingMenuToDelete => structure::menu_to_delete(input, ctx).await,

        AwaitingMappingLabel => structure::mapping_label(input, ctx).await,
        AwaitingMappingTarget { label } => structure::mapping_target(label, input, ctx).await,
    }
}

/// Reply for a mutation the store refused or could not save.
fn store_failure(err: &StoreError) -> Reply {
    if err.is_persistence() {
        Reply::text(SAVE_FAILED)
    } else {
        Reply::text(format!("❌ {}", html::escape(&err.to_string())))
    }
}

/// Accepts the keyboard answers as well as typed yes/no.
fn parse_choice(input: &str) -> Option<bool> {
    let input = input.trim();
    if input == labels::YES {
        return Some(true);
    }
    if input == labels::NO {
        return Some(false);
    }
    match input.to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

const CANCEL_HINT: &str = "Or send /cancel to abort.";
