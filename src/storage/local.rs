//! Single-blob backend for hosts without an embedded SQL engine.
//!
//! The whole journal lives in one JSON document under [`STORAGE_KEY`]. It is
//! loaded into memory on first use, and every mutation works on a copy that
//! is written back whole before it replaces the in-memory state. A failed
//! write therefore leaves both the stored blob and the loaded data as they
//! were.
//!
//! ## Blob layout
//!
//! ```json
//! {
//!   "entries": [{ "id": 1, "timestamp": "2025-11-30 10:00:00", "notes": null,
//!                 "moodNames": ["Feliz"], "tagNames": ["work"] }],
//!   "moods": [{ "id": 1, "name": "Calmo", "color": "#87CEEB", "icon": "😌" }],
//!   "tags": [{ "id": 1, "name": "work", "color": "#CCCCCC" }],
//!   "configuration": { "reminderEnabled": true, "reminderTime": "08:00", "theme": "dark" },
//!   "nextEntryId": 2
//! }
//! ```
//!
//! `configuration` and `nextEntryId` are optional when reading.

use super::kv::KeyValueStore;
use super::{BackendKind, Storage};
use crate::libs::config::{Configuration, ConfigurationPatch};
use crate::libs::entry::{
    unique_names, usable_tag_names, Mood, MoodEntry, MoodEntryPatch, MoodStats, NewMoodEntry, Tag, DEFAULT_TAG_COLOR, NO_MOOD,
};
use crate::libs::error::{Result, StorageError};
use crate::libs::summary::most_common_primary_mood;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, info, warn};

/// Fixed key of the journal blob.
pub const STORAGE_KEY: &str = "mood_app_web_db_v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Dataset {
    entries: Vec<MoodEntry>,
    moods: Vec<Mood>,
    tags: Vec<Tag>,
    #[serde(default)]
    configuration: Configuration,
    #[serde(default)]
    next_entry_id: i64,
}

impl Dataset {
    fn seeded() -> Self {
        Dataset {
            entries: Vec::new(),
            moods: Mood::catalogue(),
            tags: Vec::new(),
            configuration: Configuration::default(),
            next_entry_id: 1,
        }
    }

    /// Adds missing catalogue moods by name, drops repeated names on stored
    /// entries, registers tags they name and repairs the id counter.
    /// Returns whether anything changed.
    fn normalize(&mut self) -> bool {
        let mut changed = false;
        for entry in self.entries.iter_mut() {
            let mood_names = unique_names(&entry.mood_names);
            let tag_names = usable_tag_names(&entry.tag_names);
            if mood_names != entry.mood_names || tag_names != entry.tag_names {
                entry.mood_names = mood_names;
                entry.tag_names = tag_names;
                changed = true;
            }
        }

        let named: Vec<String> = self.entries.iter().flat_map(|e| e.tag_names.iter().cloned()).collect();
        for name in named {
            if !self.tags.iter().any(|t| t.name == name) {
                self.get_or_create_tag(&name, None);
                changed = true;
            }
        }

        for mood in Mood::catalogue() {
            if !self.moods.iter().any(|m| m.name == mood.name) {
                let id = self.moods.iter().map(|m| m.id).max().unwrap_or(0) + 1;
                self.moods.push(Mood { id, ..mood });
                changed = true;
            }
        }
        self.moods.sort_by_key(|m| m.id);

        let floor = self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        if self.next_entry_id < floor {
            self.next_entry_id = floor;
            changed = true;
        }
        changed
    }

    /// Catalogue names for `names`, in order, without repeats or unknowns.
    fn resolve_moods(&self, names: &[String]) -> Vec<String> {
        unique_names(names)
            .into_iter()
            .filter(|name| {
                let known = self.moods.iter().any(|m| &m.name == name);
                if !known {
                    warn!("Dropping unknown mood '{}'", name);
                }
                known
            })
            .collect()
    }

    fn get_or_create_tag(&mut self, name: &str, color: Option<&str>) -> i64 {
        if let Some(tag) = self.tags.iter().find(|t| t.name == name) {
            return tag.id;
        }
        let id = self.tags.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.tags.push(Tag {
            id,
            name: name.to_string(),
            color: color.unwrap_or(DEFAULT_TAG_COLOR).to_string(),
        });
        debug!("Created tag '{}'", name);
        id
    }

    fn link_tags(&mut self, names: &[String]) -> Vec<String> {
        let names = usable_tag_names(names);
        for name in &names {
            self.get_or_create_tag(name, None);
        }
        names
    }

    /// Newest first; equal timestamps fall back to the higher id.
    fn sorted(mut entries: Vec<MoodEntry>) -> Vec<MoodEntry> {
        entries.sort_by_key(|e| (Reverse(e.timestamp), Reverse(e.id)));
        entries
    }
}

pub struct LocalStorage<S: KeyValueStore> {
    store: S,
    data: Option<Dataset>,
    closed: bool,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            data: None,
            closed: false,
        }
    }

    /// Loads the blob on first use. A missing blob starts a fresh journal;
    /// an unreadable one is an error, never a silent reset. A loaded blob is
    /// normalized before any operation sees it.
    fn data(&mut self) -> Result<&mut Dataset> {
        if self.closed {
            return Err(StorageError::Closed);
        }
        if self.data.is_none() {
            let dataset = match self.store.get(STORAGE_KEY)? {
                Some(raw) => {
                    let mut dataset: Dataset = serde_json::from_str(&raw)?;
                    if dataset.normalize() {
                        debug!("Repaired stored journal on load");
                        self.write(&dataset)?;
                    }
                    dataset
                }
                None => {
                    info!("No stored journal found, starting a new one");
                    let dataset = Dataset::seeded();
                    self.write(&dataset)?;
                    dataset
                }
            };
            self.data = Some(dataset);
        }
        self.data.as_mut().ok_or(StorageError::Closed)
    }

    fn write(&mut self, dataset: &Dataset) -> Result<()> {
        let raw = serde_json::to_string(dataset)?;
        self.store.set(STORAGE_KEY, &raw)
    }

    /// Runs `f` on a copy of the dataset and persists it when `f` reports a
    /// change. The copy only replaces the loaded data once the write succeeded.
    fn mutate<T>(&mut self, f: impl FnOnce(&mut Dataset) -> (T, bool)) -> Result<T> {
        let mut draft = self.data()?.clone();
        let (result, changed) = f(&mut draft);
        if changed {
            self.write(&draft)?;
            self.data = Some(draft);
        }
        Ok(result)
    }
}

impl<S: KeyValueStore> Storage for LocalStorage<S> {
    fn backend(&self) -> BackendKind {
        BackendKind::Local
    }

    fn ensure_schema(&mut self) -> Result<()> {
        self.mutate(|data| ((), data.normalize())).map_err(StorageError::initialization)?;
        debug!("Local journal is ready");
        Ok(())
    }

    fn create_mood_entry(&mut self, entry: &NewMoodEntry) -> Result<MoodEntry> {
        let created = self.mutate(|data| {
            let created = MoodEntry {
                id: data.next_entry_id,
                timestamp: entry.resolved_timestamp(),
                notes: entry.notes.clone(),
                mood_names: data.resolve_moods(&entry.mood_names),
                tag_names: data.link_tags(&entry.tag_names),
            };
            data.next_entry_id += 1;
            data.entries.push(created.clone());
            (created, true)
        })?;
        debug!("Created mood entry {}", created.id);
        Ok(created)
    }

    fn get_all_mood_entries(&mut self) -> Result<Vec<MoodEntry>> {
        Ok(Dataset::sorted(self.data()?.entries.clone()))
    }

    fn get_mood_entry_by_id(&mut self, id: i64) -> Result<Option<MoodEntry>> {
        Ok(self.data()?.entries.iter().find(|e| e.id == id).cloned())
    }

    fn get_mood_entries_by_date(&mut self, date: NaiveDate) -> Result<Vec<MoodEntry>> {
        let matching = self.data()?.entries.iter().filter(|e| e.timestamp.date() == date).cloned().collect();
        Ok(Dataset::sorted(matching))
    }

    fn update_mood_entry(&mut self, id: i64, patch: &MoodEntryPatch) -> Result<bool> {
        if patch.is_empty() {
            return Ok(false);
        }
        let changed = self.mutate(|data| {
            let Some(index) = data.entries.iter().position(|e| e.id == id) else {
                return (false, false);
            };
            let mood_names = patch.mood_names.as_ref().map(|names| data.resolve_moods(names));
            let tag_names = patch.tag_names.as_ref().map(|names| data.link_tags(names));

            let entry = &mut data.entries[index];
            if let Some(notes) = &patch.notes {
                entry.notes = notes.clone();
            }
            if let Some(mood_names) = mood_names {
                entry.mood_names = mood_names;
            }
            if let Some(tag_names) = tag_names {
                entry.tag_names = tag_names;
            }
            (true, true)
        })?;
        debug!("Updated mood entry {}: changed={}", id, changed);
        Ok(changed)
    }

    fn delete_mood_entry(&mut self, id: i64) -> Result<bool> {
        let existed = self.mutate(|data| {
            let before = data.entries.len();
            data.entries.retain(|e| e.id != id);
            let existed = data.entries.len() != before;
            (existed, existed)
        })?;
        debug!("Deleted mood entry {}: existed={}", id, existed);
        Ok(existed)
    }

    fn delete_all_mood_entries(&mut self) -> Result<bool> {
        self.mutate(|data| {
            let had_any = !data.entries.is_empty();
            data.entries.clear();
            (had_any, had_any)
        })
    }

    fn get_or_create_tag(&mut self, name: &str, color: Option<&str>) -> Result<i64> {
        self.mutate(|data| {
            let known = data.tags.len();
            let id = data.get_or_create_tag(name, color);
            (id, data.tags.len() != known)
        })
    }

    fn list_tags(&mut self) -> Result<Vec<Tag>> {
        let mut tags = self.data()?.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn list_moods(&mut self) -> Result<Vec<Mood>> {
        Ok(self.data()?.moods.clone())
    }

    fn get_configuration(&mut self) -> Result<Option<Configuration>> {
        Ok(Some(self.data()?.configuration.clone()))
    }

    fn update_configuration(&mut self, patch: &ConfigurationPatch) -> Result<bool> {
        self.mutate(|data| {
            let changed = data.configuration.apply(patch);
            (changed, changed)
        })
    }

    fn get_stats(&mut self) -> Result<MoodStats> {
        let data = self.data()?;
        Ok(MoodStats {
            total: data.entries.len(),
            most_common_mood: most_common_primary_mood(&data.entries, &data.moods).unwrap_or_else(|| NO_MOOD.to_string()),
        })
    }

    fn shutdown(&mut self) -> Result<()> {
        self.data = None;
        self.closed = true;
        info!("Local journal closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKeyValueStore;

    /// Store whose writes can be switched off.
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: MemoryKeyValueStore,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(StorageError::Io(std::io::Error::other("quota exceeded")));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        let mut storage = LocalStorage::new(FlakyStore::default());
        storage.ensure_schema().unwrap();
        storage.create_mood_entry(&NewMoodEntry::new(["Feliz"])).unwrap();

        storage.store.fail_writes = true;
        assert!(storage.create_mood_entry(&NewMoodEntry::new(["Triste"])).is_err());
        assert!(storage.delete_all_mood_entries().is_err());

        assert_eq!(storage.get_all_mood_entries().unwrap().len(), 1);
        let raw = storage.store.get(STORAGE_KEY).unwrap().unwrap();
        let stored: Dataset = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.entries.len(), 1);
        assert_eq!(stored.next_entry_id, 2);
    }

    #[test]
    fn test_corrupted_blob_is_an_error() {
        let mut kv = MemoryKeyValueStore::new();
        kv.set(STORAGE_KEY, "{not json").unwrap();
        let mut storage = LocalStorage::new(kv);
        let err = storage.ensure_schema().unwrap_err();
        assert!(err.is_initialization());
        assert!(matches!(storage.get_all_mood_entries(), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_minimal_blob_loads_with_defaults() {
        let mut kv = MemoryKeyValueStore::new();
        kv.set(
            STORAGE_KEY,
            r#"{"entries":[{"id":7,"timestamp":"2025-11-30 10:00:00","notes":null,"moodNames":["Feliz"],"tagNames":[]}],"moods":[],"tags":[]}"#,
        )
        .unwrap();
        let mut storage = LocalStorage::new(kv);
        storage.ensure_schema().unwrap();

        assert_eq!(storage.list_moods().unwrap().len(), 9);
        assert_eq!(storage.get_configuration().unwrap(), Some(Configuration::default()));
        let created = storage.create_mood_entry(&NewMoodEntry::new(["Calmo"])).unwrap();
        assert_eq!(created.id, 8);
    }

    #[test]
    fn test_lazy_load_repairs_counter_and_moods() {
        let mut kv = MemoryKeyValueStore::new();
        kv.set(
            STORAGE_KEY,
            r#"{"entries":[{"id":1,"timestamp":"2025-11-30 10:00:00","notes":null,"moodNames":["Feliz"],"tagNames":[]}],"moods":[],"tags":[]}"#,
        )
        .unwrap();
        let mut storage = LocalStorage::new(kv.clone());

        let first = storage.create_mood_entry(&NewMoodEntry::new(["Feliz"])).unwrap();
        let second = storage.create_mood_entry(&NewMoodEntry::new(["Feliz"])).unwrap();
        assert_eq!((first.id, second.id), (2, 3));
        assert_eq!(first.mood_names, vec!["Feliz"]);

        let ids: Vec<i64> = storage.get_all_mood_entries().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(storage.list_moods().unwrap().len(), 9);

        let stored: Dataset = serde_json::from_str(&kv.get(STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.next_entry_id, 4);
    }

    #[test]
    fn test_stored_entries_lose_repeated_names() {
        let mut kv = MemoryKeyValueStore::new();
        kv.set(
            STORAGE_KEY,
            r#"{"entries":[{"id":1,"timestamp":"2025-11-30 10:00:00","notes":null,"moodNames":["Feliz","Feliz"],"tagNames":["a","a"," "]}],"moods":[],"tags":[]}"#,
        )
        .unwrap();
        let mut storage = LocalStorage::new(kv);
        storage.ensure_schema().unwrap();

        let entry = storage.get_mood_entry_by_id(1).unwrap().unwrap();
        assert_eq!(entry.mood_names, vec!["Feliz"]);
        assert_eq!(entry.tag_names, vec!["a"]);

        let tags = storage.list_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "a");
        assert_eq!(tags[0].color, DEFAULT_TAG_COLOR);
    }

    #[test]
    fn test_shutdown_closes_storage() {
        let mut storage = LocalStorage::new(MemoryKeyValueStore::new());
        storage.ensure_schema().unwrap();
        storage.shutdown().unwrap();
        assert!(matches!(storage.get_all_mood_entries(), Err(StorageError::Closed)));
    }
}
