//! Backend-agnostic journal storage.
//!
//! The rest of the application only ever sees a `Box<dyn Storage>`. Which
//! implementation sits behind it is decided once, in [`open_storage`]:
//!
//! - [`SqliteStorage`]: relational store in an embedded SQLite file
//! - [`LocalStorage`]: one JSON blob in the host's key-value storage, for
//!   environments without an embedded SQL engine
//!
//! Both return identical shapes, orderings and flags for every operation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use moodlog::libs::entry::NewMoodEntry;
//! use moodlog::storage::{open_storage, BackendKind};
//!
//! let mut storage = open_storage(BackendKind::detect())?;
//! let entry = storage.create_mood_entry(&NewMoodEntry::new(["Feliz"]).with_tags(["work"]))?;
//! assert_eq!(storage.get_mood_entry_by_id(entry.id)?, Some(entry));
//! storage.shutdown()?;
//! # Ok::<(), moodlog::libs::error::StorageError>(())
//! ```

pub mod kv;
pub mod local;
pub mod sqlite;

pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use local::LocalStorage;
pub use sqlite::SqliteStorage;

use crate::db::db::DB_FILE_NAME;
use crate::libs::config::{Configuration, ConfigurationPatch};
use crate::libs::data_storage::DataStorage;
use crate::libs::entry::{Mood, MoodEntry, MoodEntryPatch, MoodStats, NewMoodEntry, Tag};
use crate::libs::error::{Result, StorageError};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment variable forcing a backend (`sqlite` or `local`).
pub const BACKEND_ENV: &str = "MOODLOG_BACKEND";

/// Directory under the data dir holding the blob backend's values.
pub const LOCAL_STORAGE_DIR: &str = "local_storage";

/// The operations every backend provides.
///
/// Lookups of missing records return `None` or `false`; errors always mean
/// the storage itself failed. Each mutating call either completes fully or
/// leaves no trace.
pub trait Storage {
    fn backend(&self) -> BackendKind;

    /// Creates missing structure and seed data. Safe to call repeatedly.
    fn ensure_schema(&mut self) -> Result<()>;

    /// Stores an entry with its mood and tag links. Unknown mood names are
    /// dropped; unknown tag names are created.
    fn create_mood_entry(&mut self, entry: &NewMoodEntry) -> Result<MoodEntry>;

    /// All entries, newest first.
    fn get_all_mood_entries(&mut self) -> Result<Vec<MoodEntry>>;

    fn get_mood_entry_by_id(&mut self, id: i64) -> Result<Option<MoodEntry>>;

    /// Entries whose local timestamp falls on `date`, newest first.
    fn get_mood_entries_by_date(&mut self, date: NaiveDate) -> Result<Vec<MoodEntry>>;

    /// Replaces each supplied field. Returns `false` for an empty patch or
    /// an unknown id.
    fn update_mood_entry(&mut self, id: i64, patch: &MoodEntryPatch) -> Result<bool>;

    fn delete_mood_entry(&mut self, id: i64) -> Result<bool>;

    fn delete_all_mood_entries(&mut self) -> Result<bool>;

    fn get_or_create_tag(&mut self, name: &str, color: Option<&str>) -> Result<i64>;

    /// Tag vocabulary ordered by name.
    fn list_tags(&mut self) -> Result<Vec<Tag>>;

    /// Mood catalogue ordered by id.
    fn list_moods(&mut self) -> Result<Vec<Mood>>;

    fn get_configuration(&mut self) -> Result<Option<Configuration>>;

    fn update_configuration(&mut self, patch: &ConfigurationPatch) -> Result<bool>;

    fn get_stats(&mut self) -> Result<MoodStats>;

    /// Releases the underlying handle. Later calls fail with `Closed`.
    fn shutdown(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Sqlite,
    Local,
}

impl BackendKind {
    /// Picks the backend for this process: the `MOODLOG_BACKEND` override
    /// when valid, otherwise the blob backend on wasm and SQLite elsewhere.
    pub fn detect() -> Self {
        if let Ok(value) = std::env::var(BACKEND_ENV) {
            match value.parse() {
                Ok(kind) => return kind,
                Err(e) => warn!("Ignoring {}: {}", BACKEND_ENV, e),
            }
        }
        Self::platform_default()
    }

    pub fn platform_default() -> Self {
        if cfg!(target_arch = "wasm32") {
            BackendKind::Local
        } else {
            BackendKind::Sqlite
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::Local => "local",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "sql" => Ok(BackendKind::Sqlite),
            "local" | "web" => Ok(BackendKind::Local),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Opens the selected backend in the application data directory.
pub fn open_storage(kind: BackendKind) -> Result<Box<dyn Storage>> {
    open_storage_in(kind, &DataStorage::new())
}

/// Opens the selected backend under `data` and ensures its schema.
///
/// Any failure here is an [`StorageError::Initialization`]: the caller
/// should stop rather than run against a partial store.
pub fn open_storage_in(kind: BackendKind, data: &DataStorage) -> Result<Box<dyn Storage>> {
    let mut storage: Box<dyn Storage> = match kind {
        BackendKind::Sqlite => {
            let path = data.get_path(DB_FILE_NAME).map_err(StorageError::initialization)?;
            Box::new(SqliteStorage::open(path).map_err(StorageError::initialization)?)
        }
        BackendKind::Local => {
            let dir = data.get_path(LOCAL_STORAGE_DIR).map_err(StorageError::initialization)?;
            Box::new(LocalStorage::new(FileKeyValueStore::new(dir).map_err(StorageError::initialization)?))
        }
    };
    storage.ensure_schema()?;
    info!("Opened {} storage in {:?}", kind, data.base_path());
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parsing() {
        assert_eq!("sqlite".parse::<BackendKind>(), Ok(BackendKind::Sqlite));
        assert_eq!(" LOCAL ".parse::<BackendKind>(), Ok(BackendKind::Local));
        assert!("postgres".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_platform_default_on_native() {
        assert_eq!(BackendKind::platform_default(), BackendKind::Sqlite);
    }

    #[test]
    fn test_open_storage_in_creates_both_backends() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataStorage::at(dir.path().join("data"));

        let mut sqlite = open_storage_in(BackendKind::Sqlite, &data).unwrap();
        assert_eq!(sqlite.backend(), BackendKind::Sqlite);
        assert_eq!(sqlite.list_moods().unwrap().len(), 9);
        sqlite.shutdown().unwrap();
        assert!(dir.path().join("data").join(DB_FILE_NAME).exists());

        let mut local = open_storage_in(BackendKind::Local, &data).unwrap();
        assert_eq!(local.backend(), BackendKind::Local);
        assert_eq!(local.list_moods().unwrap().len(), 9);
        local.shutdown().unwrap();
        assert!(dir
            .path()
            .join("data")
            .join(LOCAL_STORAGE_DIR)
            .join(format!("{}.json", local::STORAGE_KEY))
            .exists());
    }
}
