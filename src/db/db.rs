use crate::libs::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

pub const DB_FILE_NAME: &str = "moodlog.db";

/// The one SQLite handle a process keeps open.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        info!("Opening database at: {:?}", path.as_ref());
        let conn = Connection::open(path)?;
        Self::configure(conn)
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> Result<Db> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Db> {
        // Link cleanup relies on cascading foreign keys.
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Db { conn })
    }

    /// Closes the handle, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }
}
