use super::config::Configuration;
use super::config::REMINDER_TIME_FORMAT;
use super::entry::{Mood, MoodEntry, MoodStats, Tag, TIMESTAMP_FORMAT};
use super::summary::MonthSummary;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn entries(entries: &[MoodEntry]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "WHEN", "MOODS", "TAGS", "NOTES"]);
        for entry in entries {
            table.add_row(row![
                entry.id,
                entry.timestamp.format(TIMESTAMP_FORMAT),
                entry.mood_names.join(", "),
                entry.tag_names.join(", "),
                entry.notes.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
    }

    pub fn entry(entry: &MoodEntry) {
        let mut table = Table::new();

        table.add_row(row!["ID", entry.id]);
        table.add_row(row!["WHEN", entry.timestamp.format(TIMESTAMP_FORMAT)]);
        table.add_row(row!["MOODS", entry.mood_names.join(", ")]);
        table.add_row(row!["TAGS", entry.tag_names.join(", ")]);
        table.add_row(row!["NOTES", entry.notes.as_deref().unwrap_or("")]);
        table.printstd();
    }

    pub fn moods(moods: &[Mood]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "ICON", "NAME", "COLOR"]);
        for mood in moods {
            table.add_row(row![mood.id, mood.icon, mood.name, mood.color]);
        }
        table.printstd();
    }

    pub fn tags(tags: &[Tag]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR"]);
        for tag in tags {
            table.add_row(row![tag.id, tag.name, tag.color]);
        }
        table.printstd();
    }

    pub fn configuration(config: &Configuration) {
        let mut table = Table::new();

        table.add_row(row!["REMINDER", if config.reminder_enabled { "on" } else { "off" }]);
        table.add_row(row!["TIME", config.reminder_time.format(REMINDER_TIME_FORMAT)]);
        table.add_row(row!["THEME", config.theme]);
        table.printstd();
    }

    pub fn stats(stats: &MoodStats) {
        let mut table = Table::new();

        table.add_row(row!["TOTAL ENTRIES", stats.total]);
        table.add_row(row!["MOST COMMON MOOD", stats.most_common_mood]);
        table.printstd();
    }

    pub fn month_summary(summary: &MonthSummary) {
        let mut table = Table::new();

        table.add_row(row!["DAYS WITH ENTRIES", summary.days_with_entries]);
        table.add_row(row!["ENTRIES", summary.total_entries]);
        table.add_row(row!["MOST COMMON MOOD", summary.most_common_mood]);
        table.printstd();
    }
}
