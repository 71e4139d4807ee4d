//! Generic keyed session storage.
//!
//! Sessions hold only ambient tool state (the working context path), never
//! notebook documents. When a storage path is configured the store is
//! persisted as pretty-printed JSON after every mutation and reloaded on
//! startup.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Bookkeeping kept alongside each session's data.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionMetadata {
    created_at: SystemTime,
    last_used: SystemTime,
}

impl Default for SessionMetadata {
    fn default() -> Self {
        let now = SystemTime::now();
        Self {
            created_at: now,
            last_used: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionEntry<T> {
    data: T,
    metadata: SessionMetadata,
}

/// Keyed store for per-session data.
#[derive(Debug)]
pub struct SessionStore<T> {
    sessions: HashMap<String, SessionEntry<T>>,
    storage_path: Option<PathBuf>,
}

impl<T> SessionStore<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Clone + Default,
{
    pub fn new(storage_path: Option<PathBuf>) -> Result<Self> {
        let mut store = Self {
            sessions: HashMap::new(),
            storage_path,
        };
        store.load()?;
        Ok(store)
    }

    /// Fetch a session's data, creating the session if it is new.
    pub fn get_or_create(&mut self, session_id: &str) -> Result<T> {
        let entry = self.sessions.entry(session_id.to_string()).or_default();
        entry.metadata.last_used = SystemTime::now();
        let data = entry.data.clone();
        self.save()?;
        Ok(data)
    }

    /// Mutate a session's data in place and persist the result.
    pub fn update(&mut self, session_id: &str, fun: impl FnOnce(&mut T)) -> Result<()> {
        let entry = self.sessions.entry(session_id.to_string()).or_default();
        entry.metadata.last_used = SystemTime::now();
        fun(&mut entry.data);
        self.save()
    }

    fn load(&mut self) -> Result<()> {
        if let Some(storage_path) = &self.storage_path {
            if let Some(parent) = storage_path.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Ok(contents) = fs::read_to_string(storage_path) {
                if let Ok(sessions) = serde_json::from_str(&contents) {
                    self.sessions = sessions;
                }
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(storage_path) = &self.storage_path {
            fs::write(
                storage_path,
                serde_json::to_string_pretty(&self.sessions)?,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
    struct Data {
        value: Option<String>,
    }

    #[test]
    fn ephemeral_store_round_trips_updates() {
        let mut store: SessionStore<Data> = SessionStore::new(None).unwrap();
        store
            .update("alpha", |data| data.value = Some("hello".into()))
            .unwrap();
        assert_eq!(
            store.get_or_create("alpha").unwrap().value.as_deref(),
            Some("hello")
        );
        assert_eq!(store.get_or_create("beta").unwrap(), Data::default());
    }

    #[test]
    fn persisted_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let mut store: SessionStore<Data> = SessionStore::new(Some(path.clone())).unwrap();
        store
            .update("alpha", |data| data.value = Some("kept".into()))
            .unwrap();
        drop(store);

        let mut reloaded: SessionStore<Data> = SessionStore::new(Some(path)).unwrap();
        assert_eq!(
            reloaded.get_or_create("alpha").unwrap().value.as_deref(),
            Some("kept")
        );
    }
}
