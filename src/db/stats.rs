//! Aggregates read straight from the entry tables.

use crate::db::entries::Entries;
use crate::libs::entry::{MoodStats, NO_MOOD};
use crate::libs::error::Result;
use rusqlite::{Connection, OptionalExtension};

/// Most frequent primary (position 0) mood; ties go to the lowest mood id.
const SELECT_MOST_COMMON_PRIMARY_MOOD: &str = "
    SELECT m.name
    FROM entry_moods em
    JOIN moods m ON m.id = em.mood_id
    WHERE em.position = 0
    GROUP BY m.id
    ORDER BY COUNT(*) DESC, m.id ASC
    LIMIT 1
";

pub struct Stats<'c> {
    conn: &'c Connection,
}

impl<'c> Stats<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self) -> Result<MoodStats> {
        let total = Entries::new(self.conn).count()?;
        if total == 0 {
            return Ok(MoodStats::empty());
        }

        let most_common_mood = self
            .conn
            .query_row(SELECT_MOST_COMMON_PRIMARY_MOOD, [], |row| row.get::<_, String>(0))
            .optional()?
            .unwrap_or_else(|| NO_MOOD.to_string());

        Ok(MoodStats { total, most_common_mood })
    }
}
