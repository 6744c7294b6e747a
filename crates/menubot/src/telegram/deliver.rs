//! Sends dispatcher replies to a chat

use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

use menucore::{MenuView, Reply};

use super::keyboard::{inline_menu, reply_keyboard};

/// Delivers `replies` in order.
///
/// When the update came from an inline button, `edit` names the message that
/// carried it: the first menu reply replaces that message in place instead
/// of adding a new one.
pub async fn deliver(bot: &Bot, chat_id: ChatId, mut edit: Option<MessageId>, replies: Vec<Reply>) -> Result<(), RequestError> {
    for reply in replies {
        match reply {
            Reply::Text(text) => {
                bot.send_message(chat_id, text).parse_mode(ParseMode::Html).await?;
            }
            Reply::Plain(text) => {
                bot.send_message(chat_id, text).await?;
            }
            Reply::Keyboard { text, rows } => {
                bot.send_message(chat_id, text)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(reply_keyboard(&rows))
                    .await?;
            }
            Reply::Menu(view) => match edit.take() {
                Some(message_id) => edit_menu(bot, chat_id, message_id, &view).await?,
                None => send_menu(bot, chat_id, &view).await?,
            },
        }
    }
    Ok(())
}

async fn send_menu(bot: &Bot, chat_id: ChatId, view: &MenuView) -> Result<(), RequestError> {
    bot.send_message(chat_id, view.title.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(inline_menu(view))
        .await?;
    Ok(())
}

async fn edit_menu(bot: &Bot, chat_id: ChatId, message_id: MessageId, view: &MenuView) -> Result<(), RequestError> {
    let result = bot
        .edit_message_text(chat_id, message_id, view.title.clone())
        .parse_mode(ParseMode::Html)
        .reply_markup(inline_menu(view))
        .await;

    match result {
        Ok(_) => Ok(()),
        // Pressing a button that leads to the menu already on screen
        Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => {
            log::warn!("Failed to edit menu message {} in chat {}: {}. Sending a new one", message_id.0, chat_id, e);
            send_menu(bot, chat_id, view).await
        }
    }
}
