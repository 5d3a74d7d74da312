//! Tag vocabulary with get-or-create semantics.
//!
//! Tag rows are never updated or removed individually; once a name has been
//! used it stays available for later entries.

use crate::libs::entry::{usable_tag_names, Tag, DEFAULT_TAG_COLOR};
use crate::libs::error::Result;
use rusqlite::{params, Connection};
use tracing::debug;

const INSERT_TAG_IF_ABSENT: &str = "INSERT OR IGNORE INTO tags (name, color) VALUES (?1, ?2)";
const SELECT_ALL_TAGS: &str = "SELECT id, name, color FROM tags ORDER BY name";
const SELECT_TAG_ID_BY_NAME: &str = "SELECT id FROM tags WHERE name = ?1";
const INSERT_ENTRY_TAG: &str = "INSERT OR IGNORE INTO entry_tags (entry_id, tag_id, position) VALUES (?1, ?2, ?3)";
const DELETE_ENTRY_TAGS: &str = "DELETE FROM entry_tags WHERE entry_id = ?1";

pub struct Tags<'c> {
    conn: &'c Connection,
}

impl<'c> Tags<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Returns the id of the tag named exactly `name`, creating it if needed.
    ///
    /// `color` only applies when the tag is created.
    pub fn get_or_create(&self, name: &str, color: Option<&str>) -> Result<i64> {
        let inserted = self
            .conn
            .prepare_cached(INSERT_TAG_IF_ABSENT)?
            .execute(params![name, color.unwrap_or(DEFAULT_TAG_COLOR)])?;
        if inserted > 0 {
            debug!("Created tag '{}'", name);
        }
        let id = self
            .conn
            .prepare_cached(SELECT_TAG_ID_BY_NAME)?
            .query_row(params![name], |row| row.get(0))?;
        Ok(id)
    }

    /// Get or create tags by names, skipping blank names and repeats.
    pub fn get_or_create_tags(&self, names: &[String]) -> Result<Vec<i64>> {
        usable_tag_names(names)
            .iter()
            .map(|name| self.get_or_create(name, None))
            .collect()
    }

    /// Get all tags
    pub fn list(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_TAGS)?;
        let tags = stmt
            .query_map([], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    /// Set tags for an entry (replaces existing tags)
    pub fn set_entry_tags(&self, entry_id: i64, tag_ids: &[i64]) -> Result<()> {
        self.conn.execute(DELETE_ENTRY_TAGS, params![entry_id])?;
        let mut stmt = self.conn.prepare_cached(INSERT_ENTRY_TAG)?;
        for (position, tag_id) in tag_ids.iter().enumerate() {
            stmt.execute(params![entry_id, tag_id, position as i64])?;
        }
        Ok(())
    }
}
