//! Menu tree structure: adding and deleting menus, repointing mappings.

use super::{parse_choice, store_failure, DialogueContext, DialogueState, Step, CANCEL_HINT};
use crate::error::StoreError;
use crate::html;
use crate::labels;
use crate::model::{normalize_menu_name, MenuDocument, Target};
use crate::reply::Reply;

fn yes_no_keyboard() -> Vec<Vec<String>> {
    vec![vec![labels::YES.to_string(), labels::NO.to_string()]]
}

pub(super) fn begin_add_menu() -> Step {
    Step::next(
        DialogueState::AwaitingNewMenuName,
        Reply::text(format!(
            "➕ <b>Add Menu</b>\n\n\
             Send me a name for the new menu.\n\
             Letters, digits and spaces; it is stored lowercase with underscores \
             (e.g. <code>New Menu</code> becomes <code>new_menu</code>).\n\n{}",
            CANCEL_HINT
        )),
    )
}

pub(super) async fn new_menu_name(input: &str, ctx: DialogueContext<'_>) -> Step {
    let Some(name) = normalize_menu_name(input) else {
        return Step::next(
            DialogueState::AwaitingNewMenuName,
            Reply::text(format!(
                "❌ {} is not a valid menu name. Use only letters, digits, spaces and underscores. {}",
                html::code(input.trim()),
                CANCEL_HINT
            )),
        );
    };

    if ctx.store.has_menu(&name).await {
        return Step::next(
            DialogueState::AwaitingNewMenuName,
            Reply::text(format!(
                "❌ Menu {} already exists. Send a different name. {}",
                html::code(&name),
                CANCEL_HINT
            )),
        );
    }

    let reply = Reply::text(format!(
        "Menu name: {}\n\nNow send me the title shown above its buttons. {}",
        html::code(&name),
        CANCEL_HINT
    ));
    Step::next(DialogueState::AwaitingNewMenuTitle { name }, reply)
}

pub(super) async fn new_menu_title(name: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let title = input.trim();
    if title.is_empty() {
        return Step::next(
            DialogueState::AwaitingNewMenuTitle { name },
            Reply::text(format!("❌ The title cannot be empty. {}", CANCEL_HINT)),
        );
    }

    match ctx.store.add_menu(&name, title).await {
        Ok(()) => {
            log::info!("Admin {} created menu '{}'", ctx.user_id, name);
            let reply = Reply::keyboard(
                format!(
                    "✅ Menu {} created.\n\nAdd a button for it to the main menu?",
                    html::code(&name)
                ),
                yes_no_keyboard(),
            );
            Step::next(DialogueState::AwaitingAddToMainChoice { name }, reply)
        }
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}

pub(super) fn add_to_main_choice(name: String, input: &str) -> Step {
    match parse_choice(input) {
        Some(true) => Step::next(
            DialogueState::AwaitingMainButtonLabel { name },
            Reply::text(format!("Send me the text for the main menu button. {}", CANCEL_HINT)),
        ),
        Some(false) => Step::done(vec![Reply::text(format!(
            "👍 Menu {} is ready. It is not linked from anywhere yet.",
            html::code(&name)
        ))]),
        None => Step::next(
            DialogueState::AwaitingAddToMainChoice { name },
            Reply::keyboard("Please answer yes or no.", yes_no_keyboard()),
        ),
    }
}

pub(super) async fn main_button_label(name: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let label = input.trim();
    if label.is_empty() {
        return Step::next(
            DialogueState::AwaitingMainButtonLabel { name },
            Reply::text(format!("❌ The button text cannot be empty. {}", CANCEL_HINT)),
        );
    }

    match ctx.store.link_menu_from_main(label, &name).await {
        Ok(()) => Step::done(vec![Reply::text(format!(
            "✅ Button {} added to the main menu and linked to {}.",
            html::code(label),
            html::code(&name)
        ))]),
        Err(e @ (StoreError::DuplicateButton { .. } | StoreError::LabelInUse(_))) => Step::next(
            DialogueState::AwaitingMainButtonLabel { name },
            Reply::text(format!("❌ {} Send a different text. {}", html::escape(&e.to_string()), CANCEL_HINT)),
        ),
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}

pub(super) async fn begin_delete_menu(ctx: DialogueContext<'_>) -> Step {
    let names = ctx.store.menu_names().await;
    let deletable: Vec<String> = names
        .iter()
        .filter(|n| !MenuDocument::is_protected(n))
        .map(|n| format!("• {}", html::code(n)))
        .collect();

    if deletable.is_empty() {
        return Step::done(vec![Reply::text("ℹ️ There are no menus that can be deleted.")]);
    }

    Step::next(
        DialogueState::AwaitingMenuToDelete,
        Reply::text(format!(
            "🗑️ <b>Delete Menu</b>\n\n\
             Menus:\n{}\n\n\
             Send me the name of the menu to delete. Mappings that lead to it are removed too; \
             its buttons elsewhere stay. {}",
            deletable.join("\n"),
            CANCEL_HINT
        )),
    )
}

pub(super) async fn menu_to_delete(input: &str, ctx: DialogueContext<'_>) -> Step {
    let name = input.trim();
    if MenuDocument::is_protected(name) {
        return Step::next(
            DialogueState::AwaitingMenuToDelete,
            Reply::text(format!(
                "❌ Menu {} is essential and cannot be deleted. {}",
                html::code(name),
                CANCEL_HINT
            )),
        );
    }
    if !ctx.store.has_menu(name).await {
        return Step::next(
            DialogueState::AwaitingMenuToDelete,
            Reply::text(format!("❌ Menu {} not found. {}", html::code(name), CANCEL_HINT)),
        );
    }

    match ctx.store.delete_menu(name).await {
        Ok(purged) => {
            log::info!("Admin {} deleted menu '{}' ({} mappings purged)", ctx.user_id, name, purged.len());
            let mut text = format!("✅ Menu {} deleted.", html::code(name));
            if !purged.is_empty() {
                let labels = purged.iter().map(|l| html::code(l)).collect::<Vec<_>>().join(", ");
                text.push_str(&format!("\n\nRemoved mappings: {}", labels));
            }
            Step::done(vec![Reply::text(text)])
        }
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}

pub(super) async fn begin_edit_mapping(ctx: DialogueContext<'_>) -> Step {
    let listing = ctx
        .store
        .read(|doc| {
            doc.button_mapping
                .iter()
                .map(|(label, target)| format!("• {} → {}", html::escape(label), html::code(target)))
                .collect::<Vec<_>>()
        })
        .await;

    if listing.is_empty() {
        return Step::done(vec![Reply::text("ℹ️ There are no button mappings to edit.")]);
    }

    Step::next(
        DialogueState::AwaitingMappingLabel,
        Reply::text(format!(
            "🔗 <b>Edit Button Mapping</b>\n\n{}\n\nSend me the button text whose target you want to change. {}",
            listing.join("\n"),
            CANCEL_HINT
        )),
    )
}

pub(super) async fn mapping_label(input: &str, ctx: DialogueContext<'_>) -> Step {
    let label = input.trim();
    let Some(current) = ctx.store.read(|doc| doc.button_mapping.get(label).cloned()).await else {
        return Step::next(
            DialogueState::AwaitingMappingLabel,
            Reply::text(format!(
                "❌ No mapping exists for {}. Send one of the buttons listed above. {}",
                html::code(label),
                CANCEL_HINT
            )),
        );
    };

    let reply = Reply::text(format!(
        "🔗 <b>Mapping for:</b> {}\n\nCurrent target: {}\n\n\
         Send me the new target: a menu name, or <code>back</code>, <code>main</code> or <code>admin</code>. {}",
        html::escape(label),
        html::code(&current),
        CANCEL_HINT
    ));
    Step::next(
        DialogueState::AwaitingMappingTarget {
            label: label.to_string(),
        },
        reply,
    )
}

pub(super) async fn mapping_target(label: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    let target = input.trim();
    if target.is_empty() {
        return Step::next(
            DialogueState::AwaitingMappingTarget { label },
            Reply::text(format!("❌ The target cannot be empty. {}", CANCEL_HINT)),
        );
    }

    match ctx.store.set_mapping(&label, target).await {
        Ok(previous) => {
            let mut text = format!(
                "✅ Mapping updated!\n\nButton: {}\nOld target: {}\nNew target: {}",
                html::escape(&label),
                html::code(&previous),
                html::code(target)
            );
            if !Target::is_reserved(target) && !ctx.store.has_menu(target).await {
                text.push_str("\n\n⚠️ No menu with that name exists yet. Pressing the button will show the main menu.");
            }
            Step::done(vec![Reply::text(text)])
        }
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}
