//! Common test utilities
//!
//! Shared by all menucore integration tests

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{
    admin, all_text, sample_document, shown_menu, shown_menu_name, visitor, TestBot, ADMIN_ID, SECOND_ADMIN_ID,
    VISITOR_ID,
};
