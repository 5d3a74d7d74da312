//! Mood entry persistence.
//!
//! Reads go through one LEFT JOIN over both link tables. That join fans out
//! to `moods × tags` rows per entry, so [`reconstruct`] folds the rows back
//! into one [`MoodEntry`] each and collects distinct names only.
//!
//! Writes that touch more than one table expect to run inside a transaction
//! owned by the caller (see `storage::sqlite`).

use crate::db::moods::Moods;
use crate::db::tags::Tags;
use crate::libs::entry::{MoodEntry, MoodEntryPatch, NewMoodEntry, DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::libs::error::{Result, StorageError};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, params_from_iter, types::Value, Connection};

const INSERT_ENTRY: &str = "INSERT INTO mood_entries (timestamp, notes) VALUES (?1, ?2)";
const UPDATE_NOTES: &str = "UPDATE mood_entries SET notes = ?2 WHERE id = ?1";
const DELETE_ENTRY: &str = "DELETE FROM mood_entries WHERE id = ?1";
const DELETE_ALL_ENTRIES: &str = "DELETE FROM mood_entries";
const COUNT_ENTRIES: &str = "SELECT COUNT(*) FROM mood_entries";
const ENTRY_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM mood_entries WHERE id = ?1)";
const SELECT_ENTRIES: &str = "
    SELECT e.id, e.timestamp, e.notes, m.name, t.name
    FROM mood_entries e
    LEFT JOIN entry_moods em ON em.entry_id = e.id
    LEFT JOIN moods m ON m.id = em.mood_id
    LEFT JOIN entry_tags et ON et.entry_id = e.id
    LEFT JOIN tags t ON t.id = et.tag_id
";
const WHERE_ID: &str = "WHERE e.id = ?1";
const WHERE_DATE: &str = "WHERE date(e.timestamp) = ?1";
const ORDER_ENTRIES: &str = "ORDER BY e.timestamp DESC, e.id DESC, em.position, et.position";

/// Which entries a read should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryQuery {
    All,
    ById(i64),
    ByDate(NaiveDate),
}

/// One row of the fan-out join, before reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: i64,
    pub timestamp: String,
    pub notes: Option<String>,
    pub mood: Option<String>,
    pub tag: Option<String>,
}

pub struct Entries<'c> {
    conn: &'c Connection,
}

impl<'c> Entries<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Inserts the entry row and its links, returning the stored shape.
    pub fn insert(&self, entry: &NewMoodEntry) -> Result<MoodEntry> {
        let timestamp = entry.resolved_timestamp().format(TIMESTAMP_FORMAT).to_string();
        self.conn.execute(INSERT_ENTRY, params![timestamp, entry.notes])?;
        let id = self.conn.last_insert_rowid();

        let moods = Moods::new(self.conn);
        moods.set_entry_moods(id, &moods.resolve_ids(&entry.mood_names)?)?;

        let tags = Tags::new(self.conn);
        tags.set_entry_tags(id, &tags.get_or_create_tags(&entry.tag_names)?)?;

        self.get_by_id(id)?
            .ok_or_else(|| StorageError::InvalidData(format!("entry {} vanished after insert", id)))
    }

    pub fn fetch(&self, query: EntryQuery) -> Result<Vec<MoodEntry>> {
        let (sql, params): (String, Vec<Value>) = match query {
            EntryQuery::All => (format!("{} {}", SELECT_ENTRIES, ORDER_ENTRIES), vec![]),
            EntryQuery::ById(id) => (format!("{} {} {}", SELECT_ENTRIES, WHERE_ID, ORDER_ENTRIES), vec![Value::Integer(id)]),
            EntryQuery::ByDate(date) => (
                format!("{} {} {}", SELECT_ENTRIES, WHERE_DATE, ORDER_ENTRIES),
                vec![Value::Text(date.format(DATE_FORMAT).to_string())],
            ),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(EntryRow {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    notes: row.get(2)?,
                    mood: row.get(3)?,
                    tag: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        reconstruct(rows)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<MoodEntry>> {
        Ok(self.fetch(EntryQuery::ById(id))?.into_iter().next())
    }

    pub fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.conn.query_row(ENTRY_EXISTS, params![id], |row| row.get(0))?)
    }

    /// Applies a patch. Returns `false` for an empty patch or unknown id.
    pub fn update(&self, id: i64, patch: &MoodEntryPatch) -> Result<bool> {
        if patch.is_empty() || !self.exists(id)? {
            return Ok(false);
        }

        if let Some(notes) = &patch.notes {
            self.conn.execute(UPDATE_NOTES, params![id, notes])?;
        }

        if let Some(mood_names) = &patch.mood_names {
            let moods = Moods::new(self.conn);
            moods.set_entry_moods(id, &moods.resolve_ids(mood_names)?)?;
        }

        if let Some(tag_names) = &patch.tag_names {
            let tags = Tags::new(self.conn);
            tags.set_entry_tags(id, &tags.get_or_create_tags(tag_names)?)?;
        }

        Ok(true)
    }

    /// Deletes one entry; its links go with it through the cascade.
    pub fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.conn.execute(DELETE_ENTRY, params![id])? > 0)
    }

    pub fn delete_all(&self) -> Result<bool> {
        Ok(self.conn.execute(DELETE_ALL_ENTRIES, [])? > 0)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_ENTRIES, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Folds fan-out rows into entries.
///
/// Rows of one entry must be adjacent, which the read ordering guarantees.
/// Each name is kept once, at its first position.
pub fn reconstruct(rows: Vec<EntryRow>) -> Result<Vec<MoodEntry>> {
    let mut entries: Vec<MoodEntry> = Vec::new();

    for row in rows {
        let same_entry = entries.last().map(|entry| entry.id == row.id).unwrap_or(false);
        if !same_entry {
            let timestamp = NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT)
                .map_err(|e| StorageError::InvalidData(format!("entry {} timestamp '{}': {}", row.id, row.timestamp, e)))?;
            entries.push(MoodEntry {
                id: row.id,
                timestamp,
                notes: row.notes,
                mood_names: Vec::new(),
                tag_names: Vec::new(),
            });
        }

        let Some(entry) = entries.last_mut() else {
            continue;
        };
        if let Some(mood) = row.mood {
            if !entry.mood_names.contains(&mood) {
                entry.mood_names.push(mood);
            }
        }
        if let Some(tag) = row.tag {
            if !entry.tag_names.contains(&tag) {
                entry.tag_names.push(tag);
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, mood: Option<&str>, tag: Option<&str>) -> EntryRow {
        EntryRow {
            id,
            timestamp: "2025-11-30 10:00:00".to_string(),
            notes: None,
            mood: mood.map(String::from),
            tag: tag.map(String::from),
        }
    }

    #[test]
    fn test_reconstruct_collapses_fan_out() {
        // Two moods and two tags produce four joined rows.
        let rows = vec![
            row(1, Some("Feliz"), Some("work")),
            row(1, Some("Feliz"), Some("hobby")),
            row(1, Some("Calmo"), Some("work")),
            row(1, Some("Calmo"), Some("hobby")),
        ];
        let entries = reconstruct(rows).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood_names, vec!["Feliz", "Calmo"]);
        assert_eq!(entries[0].tag_names, vec!["work", "hobby"]);
    }

    #[test]
    fn test_reconstruct_entry_without_links() {
        let entries = reconstruct(vec![row(3, None, None), row(2, Some("Triste"), None)]).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 3);
        assert!(entries[0].mood_names.is_empty());
        assert!(entries[0].tag_names.is_empty());
        assert_eq!(entries[1].mood_names, vec!["Triste"]);
    }

    #[test]
    fn test_reconstruct_keeps_names_containing_commas() {
        let entries = reconstruct(vec![row(1, Some("Feliz"), Some("work, late"))]).unwrap();
        assert_eq!(entries[0].tag_names, vec!["work, late"]);
    }

    #[test]
    fn test_reconstruct_rejects_bad_timestamp() {
        let mut bad = row(1, None, None);
        bad.timestamp = "yesterday".to_string();
        assert!(matches!(reconstruct(vec![bad]), Err(StorageError::InvalidData(_))));
    }
}
