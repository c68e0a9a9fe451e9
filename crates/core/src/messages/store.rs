//! File-backed persistence for messages and login history.
//!
//! Persistence is best-effort JSON: an unreadable or corrupt file degrades
//! to an empty store with a warning rather than failing the login flow.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Error, Result};

use super::messages_model::{UserHistory, UserMessages};

const MESSAGES_FILE: &str = "user_messages.json";
const HISTORY_FILE: &str = "user_history.json";

pub struct MessageStore {
    messages_path: PathBuf,
    history_path: PathBuf,
}

impl MessageStore {
    /// Store rooted in `dir`; the files are created on first write.
    pub fn new(dir: &Path) -> Self {
        Self {
            messages_path: dir.join(MESSAGES_FILE),
            history_path: dir.join(HISTORY_FILE),
        }
    }

    pub fn load_messages(&self) -> HashMap<String, UserMessages> {
        Self::load_map(&self.messages_path)
    }

    pub fn save_messages(&self, messages: &HashMap<String, UserMessages>) -> Result<()> {
        Self::save_map(&self.messages_path, messages)
    }

    pub fn load_history(&self) -> HashMap<String, UserHistory> {
        Self::load_map(&self.history_path)
    }

    pub fn save_history(&self, history: &HashMap<String, UserHistory>) -> Result<()> {
        Self::save_map(&self.history_path, history)
    }

    fn load_map<T: DeserializeOwned + Default>(path: &Path) -> HashMap<String, T> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            // A store that was never written to is simply empty
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return HashMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!("Could not parse {}: {}", path.display(), e);
                HashMap::new()
            }
        }
    }

    fn save_map<T: Serialize>(path: &Path, map: &HashMap<String, T>) -> Result<()> {
        let raw = serde_json::to_string_pretty(map)?;
        fs::write(path, raw).map_err(|e| Error::Store(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::messages_model::UserMessages;

    #[test]
    fn test_missing_files_yield_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = MessageStore::new(dir.path());
        assert!(store.load_messages().is_empty());
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MESSAGES_FILE), "not json").unwrap();
        let store = MessageStore::new(dir.path());
        assert!(store.load_messages().is_empty());
    }

    #[test]
    fn test_messages_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MessageStore::new(dir.path());

        let mut messages = HashMap::new();
        messages.insert("alice".to_string(), UserMessages::default());
        store.save_messages(&messages).unwrap();

        assert_eq!(store.load_messages(), messages);
    }
}
