use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::DocumentRepository;
use crate::error::{ConfigError, StoreError};
use crate::model::MenuDocument;

/// In-memory repository.
///
/// Holds the last saved document, counts saves, and can be told to fail
/// them, which is how the store's rollback behaviour gets exercised.
#[derive(Debug)]
pub struct MemoryRepository {
    saved: Mutex<MenuDocument>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryRepository {
    pub fn new(doc: MenuDocument) -> Self {
        Self {
            saved: Mutex::new(doc),
            saves: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Copy of what was last saved (or the seed document)
    pub fn saved(&self) -> MenuDocument {
        self.saved.lock().map(|doc| doc.clone()).unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Replaces the stored document behind the store's back, like a hand
    /// edit of the config file before a reload.
    pub fn replace(&self, doc: MenuDocument) {
        match self.saved.lock() {
            Ok(mut saved) => *saved = doc,
            Err(e) => *e.into_inner() = doc,
        }
    }
}

#[async_trait]
impl DocumentRepository for MemoryRepository {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn load(&self) -> Result<MenuDocument, ConfigError> {
        Ok(self.saved())
    }

    async fn save(&self, doc: &MenuDocument) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Persist(std::io::Error::other("simulated write failure")));
        }
        self.replace(doc.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
