//! ConfigStore - the single owner of the menu document
//!
//! Every change goes through a named mutator. A mutator runs against a
//! working copy of the document, saves that copy through the repository and
//! only then swaps it in, so a failed save leaves memory exactly as it was.
//! The write lock is held across the save, which serialises writers.

mod memory;
mod repository;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

pub use memory::MemoryRepository;
pub use repository::{DocumentRepository, JsonFileRepository};

use crate::error::{ConfigError, StoreError, StoreResult};
use crate::model::{Menu, MenuDocument, MAIN_MENU};

pub struct ConfigStore {
    repo: Arc<dyn DocumentRepository>,
    doc: RwLock<MenuDocument>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("location", &self.repo.location())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Loads and validates the document from `repo`.
    pub async fn load(repo: Arc<dyn DocumentRepository>) -> Result<Self, ConfigError> {
        let doc = repo.load().await?;
        log::info!(
            "Loaded configuration from {} ({} menus, {} admins)",
            repo.location(),
            doc.menus.len(),
            doc.admin_ids.len()
        );
        Ok(Self {
            repo,
            doc: RwLock::new(doc),
        })
    }

    /// Loads the document from a JSON file.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::load(Arc::new(JsonFileRepository::new(path))).await
    }

    /// Re-reads the document, replacing the in-memory copy.
    ///
    /// On error the current document stays in place.
    pub async fn reload(&self) -> Result<(), ConfigError> {
        let fresh = self.repo.load().await?;
        *self.doc.write().await = fresh;
        log::info!("Reloaded configuration from {}", self.repo.location());
        Ok(())
    }

    pub fn location(&self) -> String {
        self.repo.location()
    }

    /// Runs `f` against the current document under the read lock.
    pub async fn read<R>(&self, f: impl FnOnce(&MenuDocument) -> R) -> R {
        let doc = self.doc.read().await;
        f(&doc)
    }

    pub async fn snapshot(&self) -> MenuDocument {
        self.doc.read().await.clone()
    }

    /// The named menu, or an empty one when it does not exist.
    pub async fn get_menu(&self, name: &str) -> Menu {
        self.read(|doc| doc.menu(name).cloned().unwrap_or_default()).await
    }

    pub async fn has_menu(&self, name: &str) -> bool {
        self.read(|doc| doc.menus.contains_key(name)).await
    }

    pub async fn welcome_message(&self) -> String {
        self.read(|doc| doc.welcome_message.clone()).await
    }

    pub async fn bot_token(&self) -> String {
        self.read(|doc| doc.bot_token.clone()).await
    }

    pub async fn is_admin(&self, user_id: i64) -> bool {
        self.read(|doc| doc.is_admin(user_id)).await
    }

    pub async fn admin_ids(&self) -> Vec<i64> {
        self.read(|doc| doc.admin_ids.clone()).await
    }

    pub async fn menu_names(&self) -> Vec<String> {
        self.read(|doc| doc.menus.keys().cloned().collect()).await
    }

    /// Applies `f` to a working copy and commits it once the save succeeds.
    ///
    /// A rejection from `f` returns before anything is written.
    async fn transact<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut MenuDocument) -> StoreResult<T> + Send,
        T: Send,
    {
        let mut doc = self.doc.write().await;
        let mut working = doc.clone();
        let value = f(&mut working)?;

        if let Err(e) = self.repo.save(&working).await {
            log::error!("Failed to save configuration to {}: {}", self.repo.location(), e);
            return Err(e);
        }

        *doc = working;
        Ok(value)
    }

    pub async fn update_welcome_message(&self, text: &str) -> StoreResult<()> {
        self.transact(|doc| {
            doc.welcome_message = text.to_string();
            Ok(())
        })
        .await
    }

    pub async fn add_admin(&self, user_id: i64) -> StoreResult<()> {
        self.transact(|doc| {
            if doc.admin_ids.contains(&user_id) {
                return Err(StoreError::AdminExists(user_id));
            }
            doc.admin_ids.push(user_id);
            Ok(())
        })
        .await
    }

    /// Removes an admin. The last admin can never be removed, whichever id
    /// is passed, so that check comes before the membership check.
    pub async fn remove_admin(&self, user_id: i64) -> StoreResult<()> {
        self.transact(|doc| {
            if doc.admin_ids.len() <= 1 {
                return Err(StoreError::LastAdmin);
            }
            let Some(pos) = doc.admin_ids.iter().position(|id| *id == user_id) else {
                return Err(StoreError::AdminNotFound(user_id));
            };
            doc.admin_ids.remove(pos);
            Ok(())
        })
        .await
    }

    pub async fn update_response(&self, label: &str, text: &str) -> StoreResult<()> {
        self.transact(|doc| {
            doc.responses.insert(label.to_string(), text.to_string());
            Ok(())
        })
        .await
    }

    pub async fn delete_response(&self, label: &str) -> StoreResult<()> {
        self.transact(|doc| match doc.responses.remove(label) {
            Some(_) => Ok(()),
            None => Err(StoreError::ResponseNotFound(label.to_string())),
        })
        .await
    }

    /// Creates a menu holding only the Back / Main Menu row.
    pub async fn add_menu(&self, name: &str, title: &str) -> StoreResult<()> {
        self.transact(|doc| {
            if doc.menus.contains_key(name) {
                return Err(StoreError::MenuExists(name.to_string()));
            }
            doc.menus.insert(name.to_string(), Menu::with_navigation(title));
            Ok(())
        })
        .await
    }

    /// Deletes a menu and every mapping that targets it.
    ///
    /// Buttons in other menus that led to it are left in place; pressing one
    /// afterwards falls through to responses or the echo. Returns the labels
    /// whose mappings were purged.
    pub async fn delete_menu(&self, name: &str) -> StoreResult<Vec<String>> {
        self.transact(|doc| {
            if MenuDocument::is_protected(name) {
                return Err(StoreError::ProtectedMenu(name.to_string()));
            }
            if doc.menus.remove(name).is_none() {
                return Err(StoreError::MenuNotFound(name.to_string()));
            }
            let purged: Vec<String> = doc
                .button_mapping
                .iter()
                .filter(|(_, target)| target.as_str() == name)
                .map(|(label, _)| label.clone())
                .collect();
            for label in &purged {
                doc.button_mapping.remove(label);
            }
            Ok(purged)
        })
        .await
    }

    pub async fn set_menu_title(&self, menu: &str, title: &str) -> StoreResult<()> {
        self.transact(|doc| {
            let target = menu_mut(doc, menu)?;
            target.title = title.to_string();
            Ok(())
        })
        .await
    }

    /// Renames a button and moves its mapping and response to the new label.
    ///
    /// Returns (mapping_moved, response_moved).
    pub async fn rename_button(&self, menu: &str, old: &str, new: &str) -> StoreResult<(bool, bool)> {
        self.transact(|doc| {
            let target = menu_mut(doc, menu)?;
            if old != new && target.contains_button(new) {
                return Err(StoreError::DuplicateButton {
                    menu: menu.to_string(),
                    label: new.to_string(),
                });
            }
            if !target.contains_button(old) {
                return Err(StoreError::ButtonNotFound {
                    menu: menu.to_string(),
                    label: old.to_string(),
                });
            }
            // Mappings and responses are global, so the new text must be free everywhere
            if old != new && doc.label_in_use(new) {
                return Err(StoreError::LabelInUse(new.to_string()));
            }
            menu_mut(doc, menu)?.rename_button(old, new);
            Ok(doc.rekey_label(old, new))
        })
        .await
    }

    /// Adds a button as a new row just above the menu's last row.
    pub async fn add_button(&self, menu: &str, label: &str) -> StoreResult<()> {
        self.transact(|doc| {
            let target = menu_mut(doc, menu)?;
            if target.contains_button(label) {
                return Err(StoreError::DuplicateButton {
                    menu: menu.to_string(),
                    label: label.to_string(),
                });
            }
            target.insert_row_before_last(label);
            Ok(())
        })
        .await
    }

    /// Removes a button and purges the mapping and response under its label.
    ///
    /// Returns (mapping_purged, response_purged).
    pub async fn remove_button(&self, menu: &str, label: &str) -> StoreResult<(bool, bool)> {
        self.transact(|doc| {
            let target = menu_mut(doc, menu)?;
            if !target.remove_button(label) {
                return Err(StoreError::ButtonNotFound {
                    menu: menu.to_string(),
                    label: label.to_string(),
                });
            }
            let mapping_purged = doc.button_mapping.remove(label).is_some();
            let response_purged = doc.responses.remove(label).is_some();
            Ok((mapping_purged, response_purged))
        })
        .await
    }

    /// Points an existing mapping at a new target. Returns the old target.
    ///
    /// The target is free text: reserved tokens and menus that do not exist
    /// yet are both accepted.
    pub async fn set_mapping(&self, label: &str, target: &str) -> StoreResult<String> {
        self.transact(|doc| match doc.button_mapping.get_mut(label) {
            Some(current) => Ok(std::mem::replace(current, target.to_string())),
            None => Err(StoreError::MappingNotFound(label.to_string())),
        })
        .await
    }

    /// Adds `label` to the main menu and maps it to `menu`, in one save.
    pub async fn link_menu_from_main(&self, label: &str, menu: &str) -> StoreResult<()> {
        self.transact(|doc| {
            if !doc.menus.contains_key(menu) {
                return Err(StoreError::MenuNotFound(menu.to_string()));
            }
            let main = menu_mut(doc, MAIN_MENU)?;
            if main.contains_button(label) {
                return Err(StoreError::DuplicateButton {
                    menu: MAIN_MENU.to_string(),
                    label: label.to_string(),
                });
            }
            if doc.label_in_use(label) {
                return Err(StoreError::LabelInUse(label.to_string()));
            }
            menu_mut(doc, MAIN_MENU)?.insert_row_before_last(label);
            doc.button_mapping.insert(label.to_string(), menu.to_string());
            Ok(())
        })
        .await
    }
}

fn menu_mut<'a>(doc: &'a mut MenuDocument, name: &str) -> StoreResult<&'a mut Menu> {
    doc.menus
        .get_mut(name)
        .ok_or_else(|| StoreError::MenuNotFound(name.to_string()))
}
