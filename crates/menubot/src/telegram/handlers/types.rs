//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::User;

use menucore::{Dispatcher, UserRef};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub dispatcher: Arc<Dispatcher>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

/// Core view of a Telegram user. `None` for ids that do not fit an i64.
pub fn user_ref(user: &User) -> Option<UserRef> {
    let id = i64::try_from(user.id.0).ok()?;
    Some(UserRef::new(id, user.first_name.clone()))
}
