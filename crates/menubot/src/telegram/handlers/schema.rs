//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Message, MessageId};

use menucore::Reply;

use super::types::{user_ref, HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::deliver::deliver;
use crate::telegram::keyboard::{parse_callback, CallbackTarget};

/// Notice sent when delivering a reply failed
const ERROR_NOTICE: &str = "⚠️ An error occurred while processing your request. Please try again.";

/// Creates the dispatcher schema for the bot.
///
/// Commands first, then any text message, then inline button presses. All
/// three feed the same `menucore::Dispatcher`.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callback))
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                let Some(user) = msg.from.as_ref().and_then(user_ref) else {
                    log::warn!("Command {:?} without a usable sender in chat {}", cmd, msg.chat.id);
                    return Ok(());
                };

                let replies = deps.dispatcher.handle_command(&user, cmd.into()).await;
                respond(&bot, msg.chat.id, None, replies).await;
                Ok(())
            }
        },
    ))
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let (Some(user), Some(text)) = (msg.from.as_ref().and_then(user_ref), msg.text()) else {
                    return Ok(());
                };

                let replies = deps.dispatcher.handle_text(&user, text).await;
                respond(&bot, msg.chat.id, None, replies).await;
                Ok(())
            }
        })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            // Stop the client's loading spinner whatever happens next
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::warn!("Failed to answer callback query: {}", e);
            }

            let Some(user) = user_ref(&q.from) else {
                return Ok(());
            };
            let Some(data) = q.data.as_deref() else {
                return Ok(());
            };

            let label = match parse_callback(data) {
                CallbackTarget::Label(label) => label,
                CallbackTarget::Position { menu, row, col } => {
                    match deps.dispatcher.resolve_position(user.id, &menu, row, col).await {
                        Some(label) => label,
                        None => {
                            log::warn!("Stale button position {}:{}:{} from user {}", menu, row, col, user.id);
                            return Ok(());
                        }
                    }
                }
            };

            log::info!("User {} pressed inline button: {}", user.id, label);

            let chat_id = q
                .message
                .as_ref()
                .map(|m| m.chat().id)
                .unwrap_or_else(|| ChatId(user.id));
            let edit: Option<MessageId> = q.message.as_ref().map(|m| m.id());

            let replies = deps.dispatcher.handle_text(&user, &label).await;
            respond(&bot, chat_id, edit, replies).await;
            Ok(())
        }
    })
}

/// Delivers replies, logging failures and telling the user something went wrong.
async fn respond(bot: &Bot, chat_id: ChatId, edit: Option<MessageId>, replies: Vec<Reply>) {
    if let Err(e) = deliver(bot, chat_id, edit, replies).await {
        log::error!("Failed to deliver replies to chat {}: {}", chat_id, e);
        if let Err(e) = bot.send_message(chat_id, ERROR_NOTICE).await {
            log::error!("Failed to send error notice to chat {}: {}", chat_id, e);
        }
    }
}
