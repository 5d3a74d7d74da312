#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use moodlog::libs::entry::{MoodEntryPatch, MoodStats, NewMoodEntry, NO_MOOD};
    use moodlog::libs::summary::MonthSummary;
    use moodlog::storage::{LocalStorage, MemoryKeyValueStore, SqliteStorage, Storage};
    use test_context::{test_context, TestContext};

    struct StatsTestContext {
        backends: Vec<Box<dyn Storage>>,
    }

    impl TestContext for StatsTestContext {
        fn setup() -> Self {
            let mut backends: Vec<Box<dyn Storage>> = vec![
                Box::new(SqliteStorage::in_memory().unwrap()),
                Box::new(LocalStorage::new(MemoryKeyValueStore::new())),
            ];
            for storage in backends.iter_mut() {
                storage.ensure_schema().unwrap();
            }
            StatsTestContext { backends }
        }
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_empty_journal(ctx: &mut StatsTestContext) {
        for storage in ctx.backends.iter_mut() {
            let stats = storage.get_stats().unwrap();
            assert_eq!(stats, MoodStats::empty());
            assert_eq!(stats.most_common_mood, NO_MOOD);
        }
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_most_common_primary_mood(ctx: &mut StatsTestContext) {
        for storage in ctx.backends.iter_mut() {
            storage.create_mood_entry(&NewMoodEntry::new(["Feliz"])).unwrap();
            storage.create_mood_entry(&NewMoodEntry::new(["Feliz", "Calmo"])).unwrap();
            storage.create_mood_entry(&NewMoodEntry::new(["Triste", "Calmo"])).unwrap();

            let stats = storage.get_stats().unwrap();
            assert_eq!(stats.total, 3);
            assert_eq!(stats.most_common_mood, "Feliz", "{} backend", storage.backend());
        }
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_tie_goes_to_catalogue_order(ctx: &mut StatsTestContext) {
        for storage in ctx.backends.iter_mut() {
            storage.create_mood_entry(&NewMoodEntry::new(["Estressado"])).unwrap();
            storage.create_mood_entry(&NewMoodEntry::new(["Feliz"])).unwrap();

            assert_eq!(storage.get_stats().unwrap().most_common_mood, "Feliz");
        }
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_entries_without_moods_are_counted_only(ctx: &mut StatsTestContext) {
        for storage in ctx.backends.iter_mut() {
            let entry = storage.create_mood_entry(&NewMoodEntry::new(["Bravo"])).unwrap();
            storage
                .update_mood_entry(entry.id, &MoodEntryPatch::default().moods(Vec::<String>::new()))
                .unwrap();

            let stats = storage.get_stats().unwrap();
            assert_eq!(stats.total, 1);
            assert_eq!(stats.most_common_mood, NO_MOOD);
        }
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_month_summary(ctx: &mut StatsTestContext) {
        let at = |d: u32, h: u32| NaiveDate::from_ymd_opt(2025, 11, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
        for storage in ctx.backends.iter_mut() {
            storage.create_mood_entry(&NewMoodEntry::new(["Calmo"]).at(at(3, 8))).unwrap();
            storage.create_mood_entry(&NewMoodEntry::new(["Calmo"]).at(at(3, 20))).unwrap();
            storage.create_mood_entry(&NewMoodEntry::new(["Triste"]).at(at(30, 9))).unwrap();
            storage
                .create_mood_entry(&NewMoodEntry::new(["Feliz"]).at(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()))
                .unwrap();

            let entries = storage.get_all_mood_entries().unwrap();
            let moods = storage.list_moods().unwrap();
            let summary = MonthSummary::for_month(&entries, &moods, 2025, 11);
            assert_eq!(summary.total_entries, 3);
            assert_eq!(summary.days_with_entries, 2);
            assert_eq!(summary.most_common_mood, "Calmo");
        }
    }
}
