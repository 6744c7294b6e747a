use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use menubot::cli::{Cli, Commands};
use menubot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use menucore::logging::{log_menu_configuration, menu_warnings};
use menucore::{config, init_logger, ConfigStore};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the chosen subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, menu document, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them to stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // .env first so LOG_FILE_PATH and MENU_CONFIG_PATH can come from it
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    let path = cli.config_path();
    match cli.command {
        Some(Commands::Check) => run_check(path).await,
        Some(Commands::Run) => run_bot(path).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(path).await
        }
    }
}

/// Loads the menu document the way the bot would and reports on it.
async fn run_check(path: PathBuf) -> Result<()> {
    let store = match ConfigStore::open(&path).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Configuration Error: {}", e);
            return Err(e.into());
        }
    };

    let doc = store.snapshot().await;
    println!("📋 {}", path.display());
    println!("Menus: {}", doc.menus.keys().cloned().collect::<Vec<_>>().join(", "));
    println!("Button mappings: {}", doc.button_mapping.len());
    println!("Responses: {}", doc.responses.len());
    println!("Admins: {}", doc.admin_ids.len());

    let warnings = menu_warnings(&doc);
    if warnings.is_empty() {
        println!("✅ No problems found");
    } else {
        for warning in &warnings {
            println!("⚠️  {}", warning);
        }
    }

    Ok(())
}

async fn run_bot(path: PathBuf) -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting {}...", config::BOT_NAME);

    let store = match ConfigStore::open(&path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("Failed to load menu document {}: {}", path.display(), e);
            eprintln!("❌ Configuration Error: {}", e);
            return Err(e.into());
        }
    };
    log::info!("Loaded menu document from {}", store.location());

    store.read(log_menu_configuration).await;

    let bot = create_bot(&store.bot_token().await)?;

    let bot_info = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Bot API: {}", e))?;
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username.as_deref(), bot_info.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let dispatcher = Arc::new(menucore::Dispatcher::new(Arc::clone(&store)));
    let handler = schema(HandlerDeps::new(dispatcher));

    log::info!("================================================");
    log::info!(
        "🎉 Bot initialization complete in {:.2}s",
        bot_init_start.elapsed().as_secs_f64()
    );
    log::info!("📡 Ready to receive updates!");
    log::info!("================================================");

    // Drop updates that piled up while the bot was offline
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
