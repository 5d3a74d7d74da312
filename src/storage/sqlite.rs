//! Embedded SQL backend.
//!
//! Holds the process-wide [`Db`] handle from open until [`Storage::shutdown`].
//! Every multi-statement write runs in a transaction so a failure in the
//! middle never leaves a partially linked entry behind.

use super::{BackendKind, Storage};
use crate::db::configuration::ConfigurationStore;
use crate::db::db::Db;
use crate::db::entries::{Entries, EntryQuery};
use crate::db::moods::Moods;
use crate::db::schema;
use crate::db::stats::Stats;
use crate::db::tags::Tags;
use crate::libs::config::{Configuration, ConfigurationPatch};
use crate::libs::entry::{Mood, MoodEntry, MoodEntryPatch, MoodStats, NewMoodEntry, Tag};
use crate::libs::error::{Result, StorageError};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteStorage {
    db: Option<Db>,
}

impl SqliteStorage {
    pub fn new(db: Db) -> Self {
        Self { db: Some(db) }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Db::open(path)?))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Db::in_memory()?))
    }

    fn db(&self) -> Result<&Db> {
        self.db.as_ref().ok_or(StorageError::Closed)
    }

    fn db_mut(&mut self) -> Result<&mut Db> {
        self.db.as_mut().ok_or(StorageError::Closed)
    }
}

impl Storage for SqliteStorage {
    fn backend(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn ensure_schema(&mut self) -> Result<()> {
        schema::ensure_schema(&mut self.db_mut()?.conn)
    }

    fn create_mood_entry(&mut self, entry: &NewMoodEntry) -> Result<MoodEntry> {
        let tx = self.db_mut()?.conn.transaction()?;
        let created = Entries::new(&tx).insert(entry)?;
        tx.commit()?;
        debug!("Created mood entry {}", created.id);
        Ok(created)
    }

    fn get_all_mood_entries(&mut self) -> Result<Vec<MoodEntry>> {
        Entries::new(&self.db()?.conn).fetch(EntryQuery::All)
    }

    fn get_mood_entry_by_id(&mut self, id: i64) -> Result<Option<MoodEntry>> {
        Entries::new(&self.db()?.conn).get_by_id(id)
    }

    fn get_mood_entries_by_date(&mut self, date: NaiveDate) -> Result<Vec<MoodEntry>> {
        Entries::new(&self.db()?.conn).fetch(EntryQuery::ByDate(date))
    }

    fn update_mood_entry(&mut self, id: i64, patch: &MoodEntryPatch) -> Result<bool> {
        let tx = self.db_mut()?.conn.transaction()?;
        let changed = Entries::new(&tx).update(id, patch)?;
        tx.commit()?;
        debug!("Updated mood entry {}: changed={}", id, changed);
        Ok(changed)
    }

    fn delete_mood_entry(&mut self, id: i64) -> Result<bool> {
        let existed = Entries::new(&self.db()?.conn).delete(id)?;
        debug!("Deleted mood entry {}: existed={}", id, existed);
        Ok(existed)
    }

    fn delete_all_mood_entries(&mut self) -> Result<bool> {
        Entries::new(&self.db()?.conn).delete_all()
    }

    fn get_or_create_tag(&mut self, name: &str, color: Option<&str>) -> Result<i64> {
        Tags::new(&self.db()?.conn).get_or_create(name, color)
    }

    fn list_tags(&mut self) -> Result<Vec<Tag>> {
        Tags::new(&self.db()?.conn).list()
    }

    fn list_moods(&mut self) -> Result<Vec<Mood>> {
        Moods::new(&self.db()?.conn).list()
    }

    fn get_configuration(&mut self) -> Result<Option<Configuration>> {
        ConfigurationStore::new(&self.db()?.conn).get()
    }

    fn update_configuration(&mut self, patch: &ConfigurationPatch) -> Result<bool> {
        ConfigurationStore::new(&self.db()?.conn).update(patch)
    }

    fn get_stats(&mut self) -> Result<MoodStats> {
        Stats::new(&self.db()?.conn).get()
    }

    fn shutdown(&mut self) -> Result<()> {
        if let Some(db) = self.db.take() {
            db.close()?;
            info!("Database closed");
        }
        Ok(())
    }
}
