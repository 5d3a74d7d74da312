//! Relational schema creation and seeding.
//!
//! [`ensure_schema`] is idempotent and runs on every startup. All statements
//! execute inside one transaction, so a failure leaves no partial schema
//! behind and surfaces as [`StorageError::Initialization`].
//!
//! ## Tables
//!
//! - `configuration`: singleton settings row (`id = 1`)
//! - `moods`: fixed catalogue, seeded per name
//! - `tags`: freeform vocabulary, grows with use
//! - `mood_entries`: one row per journal entry
//! - `entry_moods` / `entry_tags`: join tables with a `position` column that
//!   preserves the written order

use crate::libs::entry::MOOD_CATALOGUE;
use crate::libs::error::{Result, StorageError};
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, info};

const SCHEMA_CONFIGURATION: &str = "CREATE TABLE IF NOT EXISTS configuration (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    reminder_enabled INTEGER NOT NULL DEFAULT 1,
    reminder_time TEXT NOT NULL DEFAULT '08:00',
    theme TEXT NOT NULL DEFAULT 'dark'
)";
const SEED_CONFIGURATION: &str = "INSERT OR IGNORE INTO configuration (id, reminder_enabled, reminder_time, theme) VALUES (1, 1, '08:00', 'dark')";

const SCHEMA_MOODS: &str = "CREATE TABLE IF NOT EXISTS moods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    color TEXT,
    icon TEXT
)";
const SEED_MOOD: &str = "INSERT OR IGNORE INTO moods (name, color, icon) VALUES (?1, ?2, ?3)";

const SCHEMA_TAGS: &str = "CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    color TEXT NOT NULL DEFAULT '#CCCCCC'
)";

const SCHEMA_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS mood_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    notes TEXT
)";
const INDEX_ENTRIES_TIMESTAMP: &str = "CREATE INDEX IF NOT EXISTS idx_mood_entries_timestamp ON mood_entries(timestamp)";

const SCHEMA_ENTRY_MOODS: &str = "CREATE TABLE IF NOT EXISTS entry_moods (
    entry_id INTEGER NOT NULL,
    mood_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (entry_id, mood_id),
    FOREIGN KEY (entry_id) REFERENCES mood_entries(id) ON DELETE CASCADE,
    FOREIGN KEY (mood_id) REFERENCES moods(id) ON DELETE RESTRICT
)";

const SCHEMA_ENTRY_TAGS: &str = "CREATE TABLE IF NOT EXISTS entry_tags (
    entry_id INTEGER NOT NULL,
    tag_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (entry_id, tag_id),
    FOREIGN KEY (entry_id) REFERENCES mood_entries(id) ON DELETE CASCADE,
    FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
)";

/// Creates missing tables and seed rows.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().map_err(StorageError::initialization)?;
    create_tables(&tx).map_err(StorageError::initialization)?;
    let seeded = seed_moods(&tx).map_err(StorageError::initialization)?;
    tx.commit().map_err(StorageError::initialization)?;

    if seeded > 0 {
        info!("Seeded {} mood(s) into the catalogue", seeded);
    }
    debug!("Schema is up to date");
    Ok(())
}

fn create_tables(tx: &Transaction) -> rusqlite::Result<()> {
    for statement in [
        SCHEMA_CONFIGURATION,
        SEED_CONFIGURATION,
        SCHEMA_MOODS,
        SCHEMA_TAGS,
        SCHEMA_ENTRIES,
        INDEX_ENTRIES_TIMESTAMP,
        SCHEMA_ENTRY_MOODS,
        SCHEMA_ENTRY_TAGS,
    ] {
        tx.execute(statement, [])?;
    }
    Ok(())
}

/// Inserts each catalogue mood that is not present yet, by name.
fn seed_moods(tx: &Transaction) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare(SEED_MOOD)?;
    let mut inserted = 0;
    for (name, color, icon) in MOOD_CATALOGUE {
        inserted += stmt.execute(params![name, color, icon])?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        ensure_schema(&mut conn).unwrap();

        assert_eq!(count(&conn, "configuration"), 1);
        assert_eq!(count(&conn, "moods"), MOOD_CATALOGUE.len() as i64);
        assert_eq!(count(&conn, "tags"), 0);
        assert_eq!(count(&conn, "mood_entries"), 0);
    }

    #[test]
    fn test_partial_seed_is_completed() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute(SCHEMA_MOODS, []).unwrap();
        conn.execute(SEED_MOOD, params!["Feliz", "#FFD700", "😊"]).unwrap();

        ensure_schema(&mut conn).unwrap();

        assert_eq!(count(&conn, "moods"), MOOD_CATALOGUE.len() as i64);
        let feliz: i64 = conn
            .query_row("SELECT COUNT(*) FROM moods WHERE name = 'Feliz'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(feliz, 1);
    }

    #[test]
    fn test_singleton_configuration_rejects_second_row() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        let result = conn.execute("INSERT INTO configuration (id) VALUES (2)", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_failure_is_reported_as_initialization_error() {
        let mut conn = Connection::open_in_memory().unwrap();
        // A view squatting on a table name makes CREATE TABLE IF NOT EXISTS a no-op
        // and the seed insert fail.
        conn.execute("CREATE VIEW moods AS SELECT 1 AS id", []).unwrap();
        let err = ensure_schema(&mut conn).unwrap_err();
        assert!(err.is_initialization());
    }
}
