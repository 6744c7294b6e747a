//! Edit Menu: pick a menu, then retitle it or change its buttons.

use std::str::FromStr;

use super::{store_failure, DialogueContext, DialogueState, Step, CANCEL_HINT};
use crate::error::StoreError;
use crate::html;
use crate::labels::{self, MenuAction};
use crate::model::Menu;
use crate::render::describe_rows;
use crate::reply::Reply;

/// Rows shown in the summary before "... and N more rows"
const PREVIEW_ROWS: usize = 3;

pub(super) async fn begin(ctx: DialogueContext<'_>) -> Step {
    let names = ctx.store.menu_names().await;
    let listing = names.iter().map(|n| format!("• {}", html::code(n))).collect::<Vec<_>>().join("\n");

    Step::next(
        DialogueState::AwaitingMenuName,
        Reply::text(format!(
            "🔧 <b>Edit Menu</b>\n\n\
             Available menus:\n{}\n\n\
             Send me the menu name you want to edit (e.g., <code>main</code>).\n{}",
            listing, CANCEL_HINT
        )),
    )
}

pub(super) async fn menu_name(input: &str, ctx: DialogueContext<'_>) -> Step {
    let name = input.trim();
    if !ctx.store.has_menu(name).await {
        return Step::next(
            DialogueState::AwaitingMenuName,
            Reply::text(format!(
                "❌ Menu '{}' not found.\n\nPlease send a valid menu name. {}",
                html::code(name),
                CANCEL_HINT
            )),
        );
    }

    let menu = ctx.store.get_menu(name).await;
    let mut preview = describe_rows(&menu.buttons.iter().take(PREVIEW_ROWS).cloned().collect::<Vec<_>>());
    if menu.buttons.len() > PREVIEW_ROWS {
        preview.push_str(&format!("\n... and {} more rows", menu.buttons.len() - PREVIEW_ROWS));
    }

    Step::next(
        DialogueState::AwaitingMenuAction { menu: name.to_string() },
        Reply::keyboard(
            format!(
                "🔧 <b>Editing Menu: {}</b>\n\n\
                 <b>Current Title:</b>\n{}\n\n\
                 <b>Button Preview:</b>\n{}\n\n\
                 What would you like to do?",
                html::escape(name),
                html::escape(&menu.title),
                preview
            ),
            MenuAction::keyboard(),
        ),
    )
}

fn numbered_buttons(menu: &Menu) -> String {
    menu.buttons
        .iter()
        .enumerate()
        .flat_map(|(row, buttons)| buttons.iter().map(move |b| (row, b)))
        .enumerate()
        .map(|(i, (row, b))| format!("{}. {} (Row {})", i + 1, html::code(b), row + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) async fn action(menu: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let Ok(action) = MenuAction::from_str(input.trim()) else {
        return Step::next(
            DialogueState::AwaitingMenuAction { menu },
            Reply::keyboard("Please choose one of the options below.", MenuAction::keyboard()),
        );
    };

    let current = ctx.store.get_menu(&menu).await;
    let quoted = html::code(&menu);

    match action {
        MenuAction::EditTitle => Step::next(
            DialogueState::AwaitingNewTitle { menu },
            Reply::text(format!(
                "📝 <b>Edit Title for {}</b>\n\nCurrent title:\n{}\n\nSend me the new title. {}",
                quoted,
                html::code(&current.title),
                CANCEL_HINT
            )),
        ),
        MenuAction::EditButtonText => Step::next(
            DialogueState::AwaitingButtonToRename { menu },
            Reply::text(format!(
                "🔘 <b>Edit Button in {}</b>\n\nCurrent buttons:\n{}\n\n\
                 Send me the button text you want to change (exact text). {}",
                quoted,
                numbered_buttons(&current),
                CANCEL_HINT
            )),
        ),
        MenuAction::AddButton => Step::next(
            DialogueState::AwaitingNewButtonLabel { menu },
            Reply::text(format!(
                "➕ <b>Add Button to {}</b>\n\n\
                 The button goes in its own row above the last row.\n\n\
                 Send me the button text. {}",
                quoted, CANCEL_HINT
            )),
        ),
        MenuAction::RemoveButton => Step::next(
            DialogueState::AwaitingButtonToRemove { menu },
            Reply::text(format!(
                "➖ <b>Remove Button from {}</b>\n\nCurrent buttons:\n{}\n\n\
                 Send me the exact text of the button to remove. {}",
                quoted,
                numbered_buttons(&current),
                CANCEL_HINT
            )),
        ),
        MenuAction::ViewAll => Step::next(
            DialogueState::AwaitingMenuAction { menu },
            Reply::text(format!(
                "📋 <b>All Buttons in {}</b>\n\n{}\n\nTap '{}' to rename a button.",
                quoted,
                describe_rows(&current.buttons),
                MenuAction::EditButtonText.as_ref()
            )),
        ),
        MenuAction::BackToSettings => Step::done(Vec::new()),
    }
}

pub(super) async fn new_title(menu: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let title = input.trim();
    if title.is_empty() {
        return Step::next(
            DialogueState::AwaitingNewTitle { menu },
            Reply::text(format!("❌ The title cannot be empty. {}", CANCEL_HINT)),
        );
    }

    match ctx.store.set_menu_title(&menu, title).await {
        Ok(()) => Step::done(vec![Reply::text(format!(
            "✅ <b>Title updated successfully!</b>\n\nMenu: {}\nNew title: {}",
            html::code(&menu),
            html::escape(title)
        ))]),
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}

pub(super) async fn button_to_rename(menu: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let label = input.trim();
    if !ctx.store.get_menu(&menu).await.contains_button(label) {
        return Step::next(
            DialogueState::AwaitingButtonToRename { menu },
            Reply::text(format!(
                "❌ Button {} not found in this menu.\n\nPlease send the exact button text. {}",
                html::code(label),
                CANCEL_HINT
            )),
        );
    }

    let warning = if labels::NAVIGATION.contains(&label) {
        "\n\n⚠️ <b>Warning:</b> This is a navigation button. Changing it may affect menu navigation!"
    } else {
        ""
    };

    Step::next(
        DialogueState::AwaitingNewButtonText {
            menu,
            old_label: label.to_string(),
        },
        Reply::text(format!(
            "🔘 <b>Renaming Button</b>\n\nCurrent text: {}{}\n\nSend me the new button text. {}",
            html::code(label),
            warning,
            CANCEL_HINT
        )),
    )
}

pub(super) async fn new_button_text(menu: String, old_label: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let new_label = input.trim();
    if new_label.is_empty() {
        return Step::next(
            DialogueState::AwaitingNewButtonText { menu, old_label },
            Reply::text(format!("❌ The button text cannot be empty. {}", CANCEL_HINT)),
        );
    }

    match ctx.store.rename_button(&menu, &old_label, new_label).await {
        Ok((mapping_moved, response_moved)) => {
            let mut text = format!(
                "✅ <b>Button renamed successfully!</b>\n\nMenu: {}\nOld text: {}\nNew text: {}\n",
                html::code(&menu),
                html::code(&old_label),
                html::code(new_label)
            );
            if mapping_moved {
                text.push_str("\n✓ Button mapping updated");
            }
            if response_moved {
                text.push_str("\n✓ Button response preserved");
            }
            Step::done(vec![Reply::text(text)])
        }
        Err(e @ (StoreError::DuplicateButton { .. } | StoreError::LabelInUse(_))) => Step::next(
            DialogueState::AwaitingNewButtonText { menu, old_label },
            Reply::text(format!("❌ {} Send a different text. {}", html::escape(&e.to_string()), CANCEL_HINT)),
        ),
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}

pub(super) async fn new_button_label(menu: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let label = input.trim();
    if label.is_empty() {
        return Step::next(
            DialogueState::AwaitingNewButtonLabel { menu },
            Reply::text(format!("❌ The button text cannot be empty. {}", CANCEL_HINT)),
        );
    }
    if ctx.store.get_menu(&menu).await.contains_button(label) {
        return Step::next(
            DialogueState::AwaitingNewButtonLabel { menu },
            Reply::text(format!(
                "❌ Button {} already exists in this menu. Send a different text. {}",
                html::code(label),
                CANCEL_HINT
            )),
        );
    }

    match ctx.store.add_button(&menu, label).await {
        Ok(()) => Step::done(vec![Reply::text(format!(
            "✅ <b>Button added!</b>\n\nMenu: {}\nButton: {}\n\n\
             Use Edit Response or Edit Button Mapping to give it something to do.",
            html::code(&menu),
            html::code(label)
        ))]),
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}

pub(super) async fn button_to_remove(menu: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let label = input.trim();
    if !ctx.store.get_menu(&menu).await.contains_button(label) {
        return Step::next(
            DialogueState::AwaitingButtonToRemove { menu },
            Reply::text(format!(
                "❌ Button {} not found in this menu.\n\nPlease send the exact button text. {}",
                html::code(label),
                CANCEL_HINT
            )),
        );
    }

    match ctx.store.remove_button(&menu, label).await {
        Ok((mapping_purged, response_purged)) => {
            let mut text = format!(
                "✅ <b>Button removed!</b>\n\nMenu: {}\nButton: {}\n",
                html::code(&menu),
                html::code(label)
            );
            if mapping_purged {
                text.push_str("\n✓ Button mapping removed");
            }
            if response_purged {
                text.push_str("\n✓ Button response removed");
            }
            Step::done(vec![Reply::text(text)])
        }
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}
