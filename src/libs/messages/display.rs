//! Display implementation for moodlog messages.
//!
//! All user-facing text lives here so wording stays consistent between
//! commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === STORAGE MESSAGES ===
            Message::StorageReady(backend, location) => format!("Journal ready ({} storage at {})", backend, location),
            Message::StorageInitFailed(error) => format!("Could not open the journal: {}", error),
            Message::StorageOperationFailed(error) => format!("Journal storage failed: {}. Nothing was changed, please try again.", error),

            // === ENTRY MESSAGES ===
            Message::EntryCreated(id) => format!("Entry #{} recorded", id),
            Message::EntryUpdated(id) => format!("Entry #{} updated", id),
            Message::EntryUnchanged(id) => format!("Entry #{} was not changed", id),
            Message::EntryDeleted(id) => format!("Entry #{} deleted", id),
            Message::EntryNotFound(id) => format!("Entry #{} not found", id),
            Message::EntriesDeleted => "All entries deleted".to_string(),
            Message::NoEntriesFound => "No entries found.".to_string(),
            Message::NoEntriesToDelete => "There are no entries to delete.".to_string(),
            Message::EntriesHeader(count) => format!("Entries ({}):", count),
            Message::EntryHeader(id) => format!("Entry #{}", id),
            Message::MoodRequired => "Pick at least one mood (--mood).".to_string(),
            Message::UnknownMoodsIgnored(names) => format!("Unknown moods ignored: {}", names.join(", ")),
            Message::NothingToUpdate => "Nothing to update: pass --note, --clear-note, --mood or --tag.".to_string(),
            Message::ConfirmDeleteEntry(id) => format!("Delete entry #{}?", id),
            Message::ConfirmDeleteAll(count) => format!("Delete ALL {} entries? This cannot be undone.", count),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === TAG MESSAGES ===
            Message::TagReady(name, id) => format!("Tag '{}' (id {})", name, id),
            Message::TagListHeader => "Tags:".to_string(),
            Message::NoTagsFound => "No tags yet.".to_string(),

            // === MOOD MESSAGES ===
            Message::MoodListHeader => "Moods:".to_string(),

            // === SETTINGS MESSAGES ===
            Message::SettingsHeader => "Settings:".to_string(),
            Message::SettingsUpdated => "Settings saved".to_string(),
            Message::SettingsMissing => "Settings record is missing; run `moodlog init`.".to_string(),

            // === STATS MESSAGES ===
            Message::StatsHeader => "Journal statistics:".to_string(),
            Message::MonthSummaryHeader(month) => format!("Summary for {}:", month),

            // === INPUT ERRORS ===
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),
            Message::InvalidDateTime(value) => format!("Invalid date/time '{}', expected YYYY-MM-DD or 'YYYY-MM-DD HH:MM[:SS]'", value),
            Message::InvalidTime(value) => format!("Invalid time '{}', expected HH:MM", value),
            Message::InvalidMonth(value) => format!("Invalid month '{}', expected YYYY-MM", value),
            Message::InvalidTheme(value) => format!("Invalid theme '{}', expected light or dark", value),
            Message::InvalidToggle(value) => format!("Invalid value '{}', expected on or off", value),
        };
        write!(f, "{}", text)
    }
}
