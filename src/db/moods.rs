//! Read access to the mood catalogue and entry-mood links.

use crate::libs::entry::{unique_names, Mood};
use crate::libs::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

const SELECT_ALL_MOODS: &str = "SELECT id, name, color, icon FROM moods ORDER BY id";
const SELECT_MOOD_ID_BY_NAME: &str = "SELECT id FROM moods WHERE name = ?1";
const INSERT_ENTRY_MOOD: &str = "INSERT OR IGNORE INTO entry_moods (entry_id, mood_id, position) VALUES (?1, ?2, ?3)";
const DELETE_ENTRY_MOODS: &str = "DELETE FROM entry_moods WHERE entry_id = ?1";

pub struct Moods<'c> {
    conn: &'c Connection,
}

impl<'c> Moods<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// The whole catalogue in id order.
    pub fn list(&self) -> Result<Vec<Mood>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_MOODS)?;
        let moods = stmt
            .query_map([], |row| {
                Ok(Mood {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    icon: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(moods)
    }

    /// Resolves names to catalogue ids, keeping the input order.
    ///
    /// Unknown names are dropped rather than failing the write.
    pub fn resolve_ids(&self, names: &[String]) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare_cached(SELECT_MOOD_ID_BY_NAME)?;
        let mut ids = Vec::new();
        for name in unique_names(names) {
            match stmt.query_row(params![name], |row| row.get::<_, i64>(0)).optional()? {
                Some(id) => ids.push(id),
                None => warn!("Dropping unknown mood '{}'", name),
            }
        }
        Ok(ids)
    }

    /// Replaces the mood links of an entry; positions follow `mood_ids`.
    pub fn set_entry_moods(&self, entry_id: i64, mood_ids: &[i64]) -> Result<()> {
        self.conn.execute(DELETE_ENTRY_MOODS, params![entry_id])?;
        let mut stmt = self.conn.prepare_cached(INSERT_ENTRY_MOOD)?;
        for (position, mood_id) in mood_ids.iter().enumerate() {
            stmt.execute(params![entry_id, mood_id, position as i64])?;
        }
        Ok(())
    }
}
