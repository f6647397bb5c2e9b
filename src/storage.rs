//! Progress persistence for the form aggregate.
//!
//! Snapshots go through a small synchronous key-value interface backed by
//! per-key files in the platform data directory. The payload and its save
//! timestamp are two keys written and read together as one logical unit.

use crate::state::{FormAggregate, FormSnapshot};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Key holding the serialized [`FormSnapshot`].
pub const FORM_DATA_KEY: &str = "coo_form_data";
/// Key holding the RFC 3339 timestamp of the last save.
pub const SAVED_AT_KEY: &str = "coo_form_saved_at";

/// A rejected write to the durable store. Load-side problems are never
/// errors; malformed state loads as absent.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not encode saved form data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not prepare the storage directory: {0}")]
    CreateDir(#[source] io::Error),
    #[error("could not write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Synchronous durable key-value store, session-local and single-writer.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str);
}

/// Key-value store over one file per key in a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let dirs = crate::config::project_dirs()
            .ok_or_else(|| anyhow::anyhow!("could not determine a data directory"))?;
        Ok(Self::new(dirs.data_dir()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(StorageError::CreateDir)?;
        fs::write(self.dir.join(key), value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&mut self, key: &str) {
        // Removal of an absent key stays silent
        let _ = fs::remove_file(self.dir.join(key));
    }
}

/// Persist the aggregate (attachment handles stripped) together with a fresh
/// save timestamp. Returns the timestamp that was written.
pub fn save_progress<S: KeyValueStore + ?Sized>(
    store: &mut S,
    form: &FormAggregate,
) -> Result<DateTime<Utc>, StorageError> {
    let payload = serde_json::to_string(&FormSnapshot::stripped(form))?;
    let saved_at = Utc::now();
    store.set(FORM_DATA_KEY, &payload)?;
    store.set(SAVED_AT_KEY, &saved_at.to_rfc3339())?;
    tracing::debug!("form progress saved");
    Ok(saved_at)
}

/// Load the saved aggregate and its save timestamp. A missing or unreadable
/// payload yields `(None, None)`; a saved draft must never block form use.
pub fn load_progress<S: KeyValueStore + ?Sized>(
    store: &S,
) -> (Option<FormAggregate>, Option<DateTime<Utc>>) {
    let Some(payload) = store.get(FORM_DATA_KEY) else {
        return (None, None);
    };
    let snapshot: FormSnapshot = match serde_json::from_str(&payload) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!("discarding unreadable saved form data: {err}");
            return (None, None);
        }
    };
    let saved_at = store
        .get(SAVED_AT_KEY)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|ts| ts.with_timezone(&Utc));
    (Some(snapshot.into_aggregate()), saved_at)
}

/// Remove both keys. Idempotent; never fails the caller.
#[allow(dead_code)]
pub fn clear_progress<S: KeyValueStore + ?Sized>(store: &mut S) {
    store.remove(FORM_DATA_KEY);
    store.remove(SAVED_AT_KEY);
}
