//! menubot - Telegram front end for menucore
//!
//! Converts Telegram updates into `menucore::Dispatcher` calls and the
//! resulting `Reply` values back into messages, edits and keyboards.

pub mod cli;
pub mod telegram;
