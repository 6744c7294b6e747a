//! Menu navigation through the dispatcher: mappings, back/main, responses
//! and the echo fallback.
//!
//! Run with: cargo test -p menucore --test navigation_test

mod common;

use common::*;
use menucore::labels;
use menucore::{Command, Reply};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_start_sends_welcome_then_main_menu() {
    let bot = TestBot::new().await;
    let replies = bot.command(&visitor(), Command::Start).await;

    assert_eq!(replies.len(), 2);
    match &replies[0] {
        Reply::Keyboard { text, rows } => {
            assert_eq!(text, "👋 Hello <b>Vic</b>!\n\nWelcome to the demo bot!");
            assert_eq!(
                rows,
                &vec![
                    vec!["What is it?".to_string()],
                    vec!["Plans".to_string(), "How to Apply".to_string()],
                    vec!["Contact".to_string()],
                ]
            );
        }
        other => panic!("expected a keyboard reply, got {:?}", other),
    }
    assert_eq!(shown_menu_name(&replies), Some("main"));
    assert_eq!(bot.history(&visitor()), vec!["main"]);
}

#[tokio::test]
async fn test_start_escapes_first_name() {
    let bot = TestBot::new().await;
    let user = menucore::UserRef::new(5, "<script>");
    let replies = bot.command(&user, Command::Start).await;
    assert!(replies[0].body().contains("<b>&lt;script&gt;</b>"));
}

#[tokio::test]
async fn test_submenus_and_back() {
    let bot = TestBot::new().await;
    let user = visitor();
    bot.command(&user, Command::Start).await;

    let replies = bot.press_all(&user, &["Plans", "Gold Plan"]).await;
    assert_eq!(shown_menu_name(&replies), Some("gold"));
    assert_eq!(bot.history(&user), vec!["main", "plans", "gold"]);

    let replies = bot.press(&user, labels::BACK).await;
    assert_eq!(shown_menu_name(&replies), Some("plans"));
    assert_eq!(bot.history(&user), vec!["main", "plans"]);

    let replies = bot.press(&user, labels::BACK).await;
    assert_eq!(shown_menu_name(&replies), Some("main"));

    // Nothing left to pop
    let replies = bot.press(&user, labels::BACK).await;
    assert_eq!(shown_menu_name(&replies), Some("main"));
    assert_eq!(bot.history(&user), vec!["main"]);
}

#[tokio::test]
async fn test_back_without_any_history_shows_main() {
    let bot = TestBot::new().await;
    let replies = bot.press(&visitor(), labels::BACK).await;
    assert_eq!(shown_menu_name(&replies), Some("main"));
    assert!(bot.history(&visitor()).is_empty());
}

#[tokio::test]
async fn test_main_menu_button_resets_history() {
    let bot = TestBot::new().await;
    let user = visitor();
    bot.command(&user, Command::Start).await;
    bot.press_all(&user, &["Plans", "Gold Plan"]).await;

    let replies = bot.press(&user, labels::MAIN_MENU).await;
    assert_eq!(shown_menu_name(&replies), Some("main"));
    assert_eq!(bot.history(&user), vec!["main"]);
}

#[tokio::test]
async fn test_dangling_mapping_falls_back_to_main() {
    let bot = TestBot::new().await;
    let user = visitor();
    bot.command(&user, Command::Start).await;

    let replies = bot.press(&user, "How to Apply").await;
    assert_eq!(replies.len(), 2);
    assert!(replies[0].body().contains("<code>apply</code> was not found"));
    assert_eq!(shown_menu_name(&replies), Some("main"));
    assert_eq!(bot.history(&user), vec!["main"]);
}

#[tokio::test]
async fn test_response_and_echo() {
    let bot = TestBot::new().await;
    let user = visitor();

    assert_eq!(
        bot.press(&user, "Contact").await,
        vec![Reply::plain("Write to hello@example.com")]
    );
    assert_eq!(
        bot.press(&user, "Silver Plan").await,
        vec![Reply::plain("You selected: Silver Plan")]
    );
    assert!(bot.history(&user).is_empty());
}

#[tokio::test]
async fn test_mapping_wins_over_response() {
    let bot = TestBot::new().await;
    bot.store().update_response("Plans", "never shown").await.unwrap();

    let replies = bot.press(&visitor(), "Plans").await;
    assert_eq!(shown_menu_name(&replies), Some("plans"));
}

#[tokio::test]
async fn test_settings_button_only_for_admins() {
    let bot = TestBot::new().await;

    let replies = bot.command(&admin(), Command::Menu).await;
    let view = shown_menu(&replies).unwrap();
    assert!(view.labels().any(|l| l == labels::SETTINGS));

    let replies = bot.command(&visitor(), Command::Menu).await;
    let view = shown_menu(&replies).unwrap();
    assert!(!view.labels().any(|l| l == labels::SETTINGS));
}

#[tokio::test]
async fn test_settings_opens_admin_menu() {
    let bot = TestBot::new().await;
    let user = admin();
    bot.command(&user, Command::Start).await;

    let replies = bot.press(&user, labels::SETTINGS).await;
    assert_eq!(shown_menu_name(&replies), Some("admin"));
    assert_eq!(bot.history(&user), vec!["main", "admin"]);
}

#[tokio::test]
async fn test_menu_command_resets_history() {
    let bot = TestBot::new().await;
    let user = visitor();
    bot.press_all(&user, &["Plans", "Gold Plan"]).await;

    bot.command(&user, Command::Menu).await;
    assert_eq!(bot.history(&user), vec!["main"]);
}

#[tokio::test]
async fn test_resolve_position() {
    let bot = TestBot::new().await;
    let d = &bot.dispatcher;

    assert_eq!(d.resolve_position(VISITOR_ID, "plans", 2, 1).await.as_deref(), Some(labels::MAIN_MENU));
    assert_eq!(d.resolve_position(ADMIN_ID, "main", 4, 0).await.as_deref(), Some(labels::SETTINGS));
    assert_eq!(d.resolve_position(VISITOR_ID, "main", 4, 0).await, None);
    assert_eq!(d.resolve_position(VISITOR_ID, "missing", 0, 0).await, None);
}

#[tokio::test]
async fn test_help_lists_commands() {
    let bot = TestBot::new().await;
    let text = all_text(&bot.command(&visitor(), Command::Help).await);
    for command in ["/start", "/help", "/menu", "/cancel"] {
        assert!(text.contains(command), "help is missing {}", command);
    }
}
