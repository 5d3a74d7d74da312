//! Mood journal domain types.
//!
//! These are the shapes every backend reads and writes. A [`MoodEntry`] is
//! always returned fully reconstructed: its mood and tag names are plain
//! vectors in write order, never containing the same name twice.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Textual form of every stored timestamp (local wall-clock time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar-day form used for day filtering.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Color assigned to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#CCCCCC";

/// Placeholder returned by statistics when there is nothing to count.
pub const NO_MOOD: &str = "N/A";

/// The fixed mood catalogue as `(name, color, icon)`, in id order.
pub const MOOD_CATALOGUE: &[(&str, &str, &str)] = &[
    ("Calmo", "#87CEEB", "😌"),
    ("Feliz", "#FFD700", "😊"),
    ("Triste", "#6495ED", "😢"),
    ("Bravo", "#FF4500", "😡"),
    ("Desapontado", "#B0C4DE", "😞"),
    ("Preocupado", "#FFA07A", "😟"),
    ("Assustado", "#8A2BE2", "😨"),
    ("Frustrado", "#A52A2A", "😣"),
    ("Estressado", "#FF6347", "😫"),
];

/// Serde adapter keeping timestamps in [`TIMESTAMP_FORMAT`].
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// An emotional label from the fixed catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl Mood {
    /// Builds the seeded catalogue with ids starting at 1.
    pub fn catalogue() -> Vec<Mood> {
        MOOD_CATALOGUE
            .iter()
            .zip(1..)
            .map(|(&(name, color, icon), id)| Mood {
                id,
                name: name.to_string(),
                color: color.to_string(),
                icon: icon.to_string(),
            })
            .collect()
    }
}

/// A freeform user label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// One journaling event as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: i64,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub notes: Option<String>,
    pub mood_names: Vec<String>,
    pub tag_names: Vec<String>,
}

impl MoodEntry {
    /// The first listed mood, used by the statistics.
    pub fn primary_mood(&self) -> Option<&str> {
        self.mood_names.first().map(String::as_str)
    }
}

/// Payload for creating an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMoodEntry {
    /// Falls back to the current local time when absent.
    pub timestamp: Option<NaiveDateTime>,
    pub mood_names: Vec<String>,
    pub tag_names: Vec<String>,
    pub notes: Option<String>,
}

impl NewMoodEntry {
    pub fn new<I, S>(mood_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mood_names: mood_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tag_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_names = tag_names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Resolves the timestamp to store, truncated to whole seconds.
    pub fn resolved_timestamp(&self) -> NaiveDateTime {
        let timestamp = self.timestamp.unwrap_or_else(|| Local::now().naive_local());
        timestamp.with_nanosecond(0).unwrap_or(timestamp)
    }
}

/// Partial update of an entry.
///
/// Outer `None` leaves a field alone. For notes, `Some(None)` clears them.
/// Supplied mood or tag lists replace the previous set entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodEntryPatch {
    pub notes: Option<Option<String>>,
    pub mood_names: Option<Vec<String>>,
    pub tag_names: Option<Vec<String>>,
}

impl MoodEntryPatch {
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(Some(notes.into()));
        self
    }

    pub fn clear_notes(mut self) -> Self {
        self.notes = Some(None);
        self
    }

    pub fn moods<I, S>(mut self, mood_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mood_names = Some(mood_names.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<I, S>(mut self, tag_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_names = Some(tag_names.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_none() && self.mood_names.is_none() && self.tag_names.is_none()
    }
}

/// Aggregate numbers over the whole journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub total: usize,
    pub most_common_mood: String,
}

impl MoodStats {
    pub fn empty() -> Self {
        Self {
            total: 0,
            most_common_mood: NO_MOOD.to_string(),
        }
    }
}

/// Removes repeated names, keeping the first occurrence and the original order.
pub fn unique_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Tag names worth storing: unique and not blank.
pub fn usable_tag_names(names: &[String]) -> Vec<String> {
    unique_names(names.iter().filter(|name| !name.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_unique_names_keeps_first_occurrence() {
        let names = vec!["Feliz".to_string(), "Calmo".to_string(), "Feliz".to_string()];
        assert_eq!(unique_names(&names), vec!["Feliz", "Calmo"]);
    }

    #[test]
    fn test_usable_tag_names_drops_blank() {
        let names = vec!["work".to_string(), "  ".to_string(), String::new(), "work".to_string()];
        assert_eq!(usable_tag_names(&names), vec!["work"]);
    }

    #[test]
    fn test_catalogue_ids_and_order() {
        let moods = Mood::catalogue();
        assert_eq!(moods.len(), 9);
        assert_eq!(moods[0].id, 1);
        assert_eq!(moods[0].name, "Calmo");
        assert_eq!(moods[8].id, 9);
        assert_eq!(moods[8].name, "Estressado");
    }

    #[test]
    fn test_patch_distinguishes_clear_from_absent() {
        let untouched = MoodEntryPatch::default();
        assert!(untouched.is_empty());
        assert_eq!(untouched.notes, None);

        let cleared = MoodEntryPatch::default().clear_notes();
        assert!(!cleared.is_empty());
        assert_eq!(cleared.notes, Some(None));
    }

    #[test]
    fn test_resolved_timestamp_drops_subseconds() {
        let at = NaiveDate::from_ymd_opt(2025, 11, 30)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 750)
            .unwrap();
        let entry = NewMoodEntry::new(["Feliz"]).at(at);
        assert_eq!(entry.resolved_timestamp().format(TIMESTAMP_FORMAT).to_string(), "2025-11-30 10:00:00");
    }

    #[test]
    fn test_entry_serializes_with_camel_case_fields() {
        let entry = MoodEntry {
            id: 1,
            timestamp: NaiveDate::from_ymd_opt(2025, 11, 29).unwrap().and_hms_opt(15, 30, 0).unwrap(),
            notes: None,
            mood_names: vec!["Estressado".to_string()],
            tag_names: vec![],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["timestamp"], "2025-11-29 15:30:00");
        assert_eq!(json["moodNames"][0], "Estressado");
        assert!(json["tagNames"].as_array().unwrap().is_empty());
    }
}
