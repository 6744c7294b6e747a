//! Telegram update handlers

pub mod schema;
pub mod types;

pub use schema::schema;
pub use types::{user_ref, HandlerDeps, HandlerError};
