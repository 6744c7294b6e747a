//! Logging initialization
//!
//! Console + file logging through simplelog; everything else in the workspace
//! logs through the `log` facade.

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::labels;
use crate::model::{MenuDocument, Target, ADMIN_MENU};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file (truncated on start)
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Log file could not be created or a logger is already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Problems in a loaded document that do not stop the bot from starting.
pub fn menu_warnings(doc: &MenuDocument) -> Vec<String> {
    let mut warnings = Vec::new();

    if doc.admin_ids.is_empty() {
        warnings.push("admin_ids is empty: nobody can open the admin settings".to_string());
    }

    match doc.target_for(labels::SETTINGS) {
        Some(Target::Admin) => {}
        Some(_) => warnings.push(format!("'{}' is mapped to something other than '{}'", labels::SETTINGS, ADMIN_MENU)),
        None => warnings.push(format!(
            "'{}' has no mapping: admins will see the button but it will only echo",
            labels::SETTINGS
        )),
    }

    for (label, target) in doc.dangling_mappings() {
        warnings.push(format!("button '{}' maps to missing menu '{}'", label, target));
    }

    warnings
}

/// Logs a summary of the menu document at startup
///
/// Logs:
/// - menu, mapping, response and admin counts
/// - every warning from [`menu_warnings`]
pub fn log_menu_configuration(doc: &MenuDocument) {
    log::info!("{}", RULE);
    log::info!("📋 Menu Configuration Check");
    log::info!("{}", RULE);

    log::info!(
        "Menus: {} ({})",
        doc.menus.len(),
        doc.menus.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    log::info!("Button mappings: {}", doc.button_mapping.len());
    log::info!("Responses: {}", doc.responses.len());
    log::info!("Admins: {}", doc.admin_ids.len());

    let warnings = menu_warnings(doc);
    if warnings.is_empty() {
        log::info!("✅ Menu configuration looks consistent");
    } else {
        for warning in &warnings {
            log::warn!("⚠️  {}", warning);
        }
    }
    log::info!("{}", RULE);
}
