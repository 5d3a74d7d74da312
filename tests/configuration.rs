#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use moodlog::libs::config::{Configuration, ConfigurationPatch, Theme};
    use moodlog::libs::data_storage::DataStorage;
    use moodlog::storage::{open_storage_in, BackendKind};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        data: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let data = DataStorage::at(temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                data,
            }
        }
    }

    const BACKENDS: [BackendKind; 2] = [BackendKind::Sqlite, BackendKind::Local];

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_defaults_after_init(ctx: &mut ConfigTestContext) {
        for kind in BACKENDS {
            let mut storage = open_storage_in(kind, &ctx.data).unwrap();
            let config = storage.get_configuration().unwrap().unwrap();
            assert_eq!(config, Configuration::default(), "{} backend", kind);
            assert!(config.reminder_enabled);
            assert_eq!(config.reminder_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
            assert_eq!(config.theme, Theme::Dark);
            storage.shutdown().unwrap();
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_update_persists(ctx: &mut ConfigTestContext) {
        for kind in BACKENDS {
            let mut storage = open_storage_in(kind, &ctx.data).unwrap();
            let changed = storage
                .update_configuration(&ConfigurationPatch::default().reminder_time(NaiveTime::from_hms_opt(21, 30, 0).unwrap()))
                .unwrap();
            assert!(changed);
            storage.shutdown().unwrap();

            let mut storage = open_storage_in(kind, &ctx.data).unwrap();
            let config = storage.get_configuration().unwrap().unwrap();
            assert_eq!(config.reminder_time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
            assert!(config.reminder_enabled);
            assert_eq!(config.theme, Theme::Dark);

            storage
                .update_configuration(&ConfigurationPatch::default().reminder_enabled(false).theme(Theme::Light))
                .unwrap();
            let config = storage.get_configuration().unwrap().unwrap();
            assert!(!config.reminder_enabled);
            assert_eq!(config.theme, Theme::Light);
            assert_eq!(config.reminder_time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
            storage.shutdown().unwrap();
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_empty_patch_changes_nothing(ctx: &mut ConfigTestContext) {
        for kind in BACKENDS {
            let mut storage = open_storage_in(kind, &ctx.data).unwrap();
            assert!(!storage.update_configuration(&ConfigurationPatch::default()).unwrap());
            assert_eq!(storage.get_configuration().unwrap(), Some(Configuration::default()));
            storage.shutdown().unwrap();
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_reinit_keeps_settings(ctx: &mut ConfigTestContext) {
        for kind in BACKENDS {
            let mut storage = open_storage_in(kind, &ctx.data).unwrap();
            storage.update_configuration(&ConfigurationPatch::default().theme(Theme::Light)).unwrap();
            storage.ensure_schema().unwrap();
            storage.ensure_schema().unwrap();
            assert_eq!(storage.get_configuration().unwrap().unwrap().theme, Theme::Light);
            storage.shutdown().unwrap();
        }
    }
}
