//! Where the menu document lives.
//!
//! `ConfigStore` only knows this trait; the bot uses the JSON file backend,
//! tests use `MemoryRepository`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{ConfigError, StoreError};
use crate::model::MenuDocument;

/// Load/save access to one menu document.
///
/// `save` must replace the stored document as a whole: a reader never sees a
/// half-written document.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Human-readable location, for logs and error messages.
    fn location(&self) -> String;

    async fn load(&self) -> Result<MenuDocument, ConfigError>;

    async fn save(&self, doc: &MenuDocument) -> Result<(), StoreError>;
}

/// The document as a pretty-printed JSON file.
///
/// Saves write `<file>.tmp` next to the target and rename it over the
/// original, so the file on disk is always either the old or the new version.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentRepository for JsonFileRepository {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<MenuDocument, ConfigError> {
        let text = match fs_err::tokio::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ConfigError::NotFound(self.path.clone())),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        MenuDocument::from_json(&text)
    }

    async fn save(&self, doc: &MenuDocument) -> Result<(), StoreError> {
        let mut content = serde_json::to_string_pretty(doc)?;
        content.push('\n');

        let temp_path = self.temp_path();
        fs_err::tokio::write(&temp_path, content).await?;
        if let Err(e) = fs_err::tokio::rename(&temp_path, &self.path).await {
            if let Err(cleanup) = fs_err::tokio::remove_file(&temp_path).await {
                log::warn!("Failed to remove temp config {}: {}", temp_path.display(), cleanup);
            }
            return Err(e.into());
        }

        log::debug!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}
