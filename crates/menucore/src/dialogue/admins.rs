//! Adding and removing admins.

use super::{store_failure, AdminMode, DialogueContext, DialogueState, Step, CANCEL_HINT};
use crate::error::StoreError;
use crate::reply::Reply;

fn admin_list(ids: &[i64]) -> String {
    ids.iter().map(|id| format!("• <code>{}</code>", id)).collect::<Vec<_>>().join("\n")
}

pub(super) async fn begin(mode: AdminMode, ctx: DialogueContext<'_>) -> Step {
    let state = DialogueState::AwaitingAdminId { mode };
    match mode {
        AdminMode::Add => Step::next(
            state,
            Reply::text(format!(
                "➕ <b>Add New Admin</b>\n\n\
                 Send me the Telegram User ID to add as admin.\n\n\
                 💡 Users can find their ID by sending /start to this bot \
                 and pressing any admin button.\n\n{}",
                CANCEL_HINT
            )),
        ),
        AdminMode::Remove => {
            let ids = ctx.store.admin_ids().await;
            if ids.len() <= 1 {
                return Step::done(vec![Reply::text(
                    "⚠️ Cannot remove admin!\n\nThere must be at least one admin.",
                )]);
            }
            Step::next(
                state,
                Reply::text(format!(
                    "➖ <b>Remove Admin</b>\n\nCurrent Admins:\n{}\n\nSend me the User ID to remove. {}",
                    admin_list(&ids),
                    CANCEL_HINT
                )),
            )
        }
    }
}

pub(super) async fn admin_id(mode: AdminMode, input: &str, ctx: DialogueContext<'_>) -> Step {
    let Ok(id) = input.trim().parse::<i64>() else {
        return Step::next(
            DialogueState::AwaitingAdminId { mode },
            Reply::text("❌ Invalid User ID. Please send a numeric ID or /cancel to abort."),
        );
    };

    let reply = match mode {
        AdminMode::Add => match ctx.store.add_admin(id).await {
            Ok(()) => {
                log::info!("Admin {} added admin {}", ctx.user_id, id);
                Reply::text(format!("✅ Admin added successfully!\n\nUser ID {} is now an admin.", id))
            }
            Err(StoreError::AdminExists(_)) => Reply::text(format!("⚠️ User ID {} is already an admin.", id)),
            Err(e) => store_failure(&e),
        },
        AdminMode::Remove if id == ctx.user_id => Reply::text("⚠️ You cannot remove yourself as admin!"),
        AdminMode::Remove => match ctx.store.remove_admin(id).await {
            Ok(()) => {
                log::info!("Admin {} removed admin {}", ctx.user_id, id);
                Reply::text(format!(
                    "✅ Admin removed successfully!\n\nUser ID {} is no longer an admin.",
                    id
                ))
            }
            Err(StoreError::AdminNotFound(_)) => Reply::text(format!("❌ User ID {} is not an admin.", id)),
            Err(e) => store_failure(&e),
        },
    };

    Step::done(vec![reply])
}
