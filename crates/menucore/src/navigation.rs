//! Per-user navigation history
//!
//! A stack of visited menu names per user, used only to answer "back". It is
//! kept in memory for the life of the process and is never capped.

use dashmap::DashMap;

use crate::model::MAIN_MENU;

#[derive(Debug, Default)]
pub struct NavigationEngine {
    history: DashMap<i64, Vec<String>>,
}

impl NavigationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit to `menu` when `push` is set.
    ///
    /// Re-showing a menu without recording it (after "back", or when the
    /// admin root is redrawn) passes `push = false`.
    pub fn enter(&self, user_id: i64, menu: &str, push: bool) {
        if push {
            self.history.entry(user_id).or_default().push(menu.to_string());
        }
    }

    /// Resolves the "back" target and pops the current entry.
    ///
    /// With fewer than two entries the answer is `main` and history is left
    /// alone. Otherwise the current entry is popped and the new top is
    /// returned without popping it, so each call removes exactly one entry.
    pub fn back(&self, user_id: i64) -> String {
        let Some(mut history) = self.history.get_mut(&user_id) else {
            return MAIN_MENU.to_string();
        };
        if history.len() < 2 {
            return MAIN_MENU.to_string();
        }
        history.pop();
        history.last().cloned().unwrap_or_else(|| MAIN_MENU.to_string())
    }

    pub fn reset(&self, user_id: i64) {
        self.history.remove(&user_id);
    }

    pub fn history(&self, user_id: i64) -> Vec<String> {
        self.history.get(&user_id).map(|h| h.value().clone()).unwrap_or_default()
    }

    pub fn current(&self, user_id: i64) -> Option<String> {
        self.history.get(&user_id).and_then(|h| h.last().cloned())
    }

    /// Number of users with any recorded history
    pub fn tracked_users(&self) -> usize {
        self.history.len()
    }
}
