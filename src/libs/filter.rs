//! In-memory filtering and search over loaded entries.
//!
//! Storage keeps names exactly as written. Comparisons here fold case,
//! strip Latin diacritics and trim whitespace, so "reuniao" finds
//! "Reunião" and "feliz" finds "Feliz".
//!
//! ## Matching rules
//!
//! - **Moods**: an entry matches if any of its moods equals any requested mood
//! - **Tags**: an entry must carry every requested tag
//! - **Date range**: inclusive, from the start of `start_date` to the end of `end_date`
//! - **Search**: substring of the notes, a mood name or a tag name

use super::entry::MoodEntry;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub mood_names: Vec<String>,
    pub tag_names: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_text: Option<String>,
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        self.mood_names.is_empty()
            && self.tag_names.is_empty()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.search_query().is_none()
    }

    pub fn matches(&self, entry: &MoodEntry) -> bool {
        self.matches_moods(entry) && self.matches_tags(entry) && self.matches_dates(entry) && self.matches_search(entry)
    }

    /// Keeps the matching entries in their original order.
    pub fn apply(&self, entries: Vec<MoodEntry>) -> Vec<MoodEntry> {
        entries.into_iter().filter(|entry| self.matches(entry)).collect()
    }

    fn matches_moods(&self, entry: &MoodEntry) -> bool {
        if self.mood_names.is_empty() {
            return true;
        }
        let wanted: Vec<String> = self.mood_names.iter().map(|m| fold(m)).collect();
        entry.mood_names.iter().any(|mood| wanted.contains(&fold(mood)))
    }

    fn matches_tags(&self, entry: &MoodEntry) -> bool {
        let carried: Vec<String> = entry.tag_names.iter().map(|t| fold(t)).collect();
        self.tag_names.iter().all(|tag| carried.contains(&fold(tag)))
    }

    fn matches_dates(&self, entry: &MoodEntry) -> bool {
        let day = entry.timestamp.date();
        self.start_date.map(|start| day >= start).unwrap_or(true) && self.end_date.map(|end| day <= end).unwrap_or(true)
    }

    fn matches_search(&self, entry: &MoodEntry) -> bool {
        let Some(query) = self.search_query() else {
            return true;
        };
        entry.notes.as_deref().map(|notes| fold(notes).contains(&query)).unwrap_or(false)
            || entry.mood_names.iter().any(|mood| fold(mood).contains(&query))
            || entry.tag_names.iter().any(|tag| fold(tag).contains(&query))
    }

    fn search_query(&self) -> Option<String> {
        self.search_text.as_deref().map(fold).filter(|query| !query.is_empty())
    }
}

/// Lowercases, removes Latin diacritics and trims.
pub fn fold(text: &str) -> String {
    text.trim().chars().flat_map(|c| c.to_lowercase()).map(strip_diacritic).collect()
}

fn strip_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, moods: &[&str], tags: &[&str], notes: Option<&str>) -> MoodEntry {
        MoodEntry {
            id: 1,
            timestamp: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap().and_hms_opt(23, 59, 59).unwrap(),
            notes: notes.map(String::from),
            mood_names: moods.iter().map(|m| m.to_string()).collect(),
            tag_names: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("  Reunião "), "reuniao");
        assert_eq!(fold("FAMÍLIA"), "familia");
        assert_eq!(fold("Lançamento"), "lancamento");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = EntryFilter {
            search_text: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&entry("2025-11-30", &[], &[], None)));
    }

    #[test]
    fn test_moods_match_any() {
        let filter = EntryFilter {
            mood_names: vec!["feliz".to_string(), "Bravo".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&entry("2025-11-30", &["Calmo", "Feliz"], &[], None)));
        assert!(!filter.matches(&entry("2025-11-30", &["Calmo"], &[], None)));
    }

    #[test]
    fn test_tags_match_all() {
        let filter = EntryFilter {
            tag_names: vec!["Trabalho".to_string(), "reuniao".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&entry("2025-11-29", &["Estressado"], &["Trabalho", "Reunião"], None)));
        assert!(!filter.matches(&entry("2025-11-29", &["Estressado"], &["Trabalho"], None)));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = EntryFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 11, 27),
            end_date: NaiveDate::from_ymd_opt(2025, 11, 28),
            ..Default::default()
        };
        assert!(filter.matches(&entry("2025-11-28", &[], &[], None)));
        assert!(filter.matches(&entry("2025-11-27", &[], &[], None)));
        assert!(!filter.matches(&entry("2025-11-29", &[], &[], None)));
        assert!(!filter.matches(&entry("2025-11-26", &[], &[], None)));
    }

    #[test]
    fn test_search_over_notes_moods_and_tags() {
        let filter = |q: &str| EntryFilter {
            search_text: Some(q.to_string()),
            ..Default::default()
        };
        let e = entry("2025-11-30", &["Feliz"], &["Família"], Some("Dia de lançamento"));
        assert!(filter("LANCAMENTO").matches(&e));
        assert!(filter("feli").matches(&e));
        assert!(filter("famil").matches(&e));
        assert!(!filter("academia").matches(&e));
    }
}
