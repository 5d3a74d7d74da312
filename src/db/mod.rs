//! SQLite backend internals.
//!
//! [`db::Db`] owns the connection; the other modules are thin repositories
//! borrowing it (or a transaction) for one kind of record:
//!
//! - `schema`: table creation and mood seeding
//! - `entries`: mood entries with their mood and tag links
//! - `moods`, `tags`: catalogue and vocabulary
//! - `configuration`: the single settings row
//! - `stats`: aggregate counts
//!
//! ## Usage
//!
//! ```rust
//! use moodlog::db::{db::Db, entries::Entries, schema::ensure_schema};
//! use moodlog::libs::entry::NewMoodEntry;
//!
//! let mut db = Db::in_memory()?;
//! ensure_schema(&mut db.conn)?;
//! let entry = Entries::new(&db.conn).insert(&NewMoodEntry::new(["Calmo"]))?;
//! assert_eq!(entry.mood_names, vec!["Calmo"]);
//! # Ok::<(), moodlog::libs::error::StorageError>(())
//! ```

pub mod configuration;
pub mod db;
pub mod entries;
pub mod moods;
pub mod schema;
pub mod stats;
pub mod tags;
