//! Derived numbers over already-loaded entries.
//!
//! The calendar screen shows, for the visible month, how many days carry at
//! least one entry, how many entries there are, and which primary mood shows
//! up most often. The same primary-mood tally backs the blob backend's stats.

use super::entry::{Mood, MoodEntry, NO_MOOD};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Most frequent primary mood among `entries`.
///
/// Ties go to the mood that comes first in `moods` (catalogue id order).
/// Entries without moods are ignored. Returns `None` when nothing counts.
pub fn most_common_primary_mood<'a, I>(entries: I, moods: &[Mood]) -> Option<String>
where
    I: IntoIterator<Item = &'a MoodEntry>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        if let Some(primary) = entry.primary_mood() {
            *counts.entry(primary).or_insert(0) += 1;
        }
    }

    let mut best: Option<(&Mood, usize)> = None;
    for mood in moods {
        let count = counts.get(mood.name.as_str()).copied().unwrap_or(0);
        if count > 0 && best.map(|(_, top)| count > top).unwrap_or(true) {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood.name.clone())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub days_with_entries: usize,
    pub total_entries: usize,
    pub most_common_mood: String,
}

impl MonthSummary {
    pub fn for_month(entries: &[MoodEntry], moods: &[Mood], year: i32, month: u32) -> Self {
        let in_month: Vec<&MoodEntry> = entries
            .iter()
            .filter(|entry| entry.timestamp.year() == year && entry.timestamp.month() == month)
            .collect();

        let days: HashSet<NaiveDate> = in_month.iter().map(|entry| entry.timestamp.date()).collect();

        MonthSummary {
            year,
            month,
            days_with_entries: days.len(),
            total_entries: in_month.len(),
            most_common_mood: most_common_primary_mood(in_month.iter().copied(), moods).unwrap_or_else(|| NO_MOOD.to_string()),
        }
    }
}
