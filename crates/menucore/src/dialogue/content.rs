//! Welcome message and button responses.

use super::{store_failure, DialogueContext, DialogueState, Step, CANCEL_HINT};
use crate::error::StoreError;
use crate::html;
use crate::reply::Reply;

/// Response text that clears a button's response instead of setting it
const CLEAR_RESPONSE: &str = "-";

pub(super) async fn begin_welcome(ctx: DialogueContext<'_>) -> Step {
    let current = ctx.store.welcome_message().await;
    Step::next(
        DialogueState::AwaitingWelcomeText,
        Reply::text(format!(
            "📝 <b>Edit Welcome Message</b>\n\n\
             Current message:\n{}\n\n\
             Send me the new welcome message. {}",
            html::code(&current),
            CANCEL_HINT
        )),
    )
}

pub(super) async fn welcome_text(input: &str, ctx: DialogueContext<'_>) -> Step {
    if input.trim().is_empty() {
        return Step::next(
            DialogueState::AwaitingWelcomeText,
            Reply::text(format!("❌ The welcome message cannot be empty. {}", CANCEL_HINT)),
        );
    }

    match ctx.store.update_welcome_message(input).await {
        Ok(()) => Step::done(vec![Reply::text(format!(
            "✅ Welcome message updated successfully!\n\nNew message: {}",
            html::escape(input)
        ))]),
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}

pub(super) async fn begin_response(ctx: DialogueContext<'_>) -> Step {
    let labels = ctx
        .store
        .read(|doc| doc.responses.keys().map(|k| format!("• {}", html::escape(k))).collect::<Vec<_>>())
        .await;
    let listing = if labels.is_empty() {
        "None yet".to_string()
    } else {
        labels.join("\n")
    };

    Step::next(
        DialogueState::AwaitingResponseLabel,
        Reply::text(format!(
            "💬 <b>Edit Button Response</b>\n\n\
             Current responses:\n{}\n\n\
             Send me the button text you want to edit. {}",
            listing, CANCEL_HINT
        )),
    )
}

/// Any label is accepted: a response can be prepared before its button exists.
pub(super) async fn response_label(input: &str, ctx: DialogueContext<'_>) -> Step {
    let label = input.trim();
    if label.is_empty() {
        return Step::next(
            DialogueState::AwaitingResponseLabel,
            Reply::text(format!("❌ Please send the button text. {}", CANCEL_HINT)),
        );
    }

    let current = ctx
        .store
        .read(|doc| doc.responses.get(label).cloned())
        .await
        .unwrap_or_else(|| "Not set".to_string());

    Step::next(
        DialogueState::AwaitingResponseText {
            label: label.to_string(),
        },
        Reply::text(format!(
            "💬 <b>Editing Response for:</b> {}\n\n\
             Current response:\n{}\n\n\
             Send me the new response text, or <code>{}</code> to clear it. {}",
            html::escape(label),
            html::code(&current),
            CLEAR_RESPONSE,
            CANCEL_HINT
        )),
    )
}

pub(super) async fn response_text(label: String, input: &str, ctx: DialogueContext<'_>) -> Step {
    if input.trim().is_empty() {
        return Step::next(
            DialogueState::AwaitingResponseText { label },
            Reply::text(format!("❌ The response cannot be empty. {}", CANCEL_HINT)),
        );
    }

    if input.trim() == CLEAR_RESPONSE {
        let reply = match ctx.store.delete_response(&label).await {
            Ok(()) => Reply::text(format!("✅ Response for {} cleared.", html::escape(&label))),
            Err(StoreError::ResponseNotFound(_)) => {
                Reply::text(format!("ℹ️ {} had no response to clear.", html::escape(&label)))
            }
            Err(e) => store_failure(&e),
        };
        return Step::done(vec![reply]);
    }

    match ctx.store.update_response(&label, input).await {
        Ok(()) => Step::done(vec![Reply::text(format!(
            "✅ Response updated successfully!\n\nButton: {}\nNew response: {}",
            html::escape(&label),
            html::escape(input)
        ))]),
        Err(e) => Step::done(vec![store_failure(&e)]),
    }
}
