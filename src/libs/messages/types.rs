#[derive(Debug, Clone)]
pub enum Message {
    // === STORAGE MESSAGES ===
    StorageReady(String, String), // backend, location
    StorageInitFailed(String),    // error
    StorageOperationFailed(String),

    // === ENTRY MESSAGES ===
    EntryCreated(i64),
    EntryUpdated(i64),
    EntryUnchanged(i64),
    EntryDeleted(i64),
    EntryNotFound(i64),
    EntriesDeleted,
    NoEntriesFound,
    NoEntriesToDelete,
    EntriesHeader(usize),
    EntryHeader(i64),
    MoodRequired,
    UnknownMoodsIgnored(Vec<String>),
    NothingToUpdate,
    ConfirmDeleteEntry(i64),
    ConfirmDeleteAll(usize),
    OperationCancelled,

    // === TAG MESSAGES ===
    TagReady(String, i64), // name, id
    TagListHeader,
    NoTagsFound,

    // === MOOD MESSAGES ===
    MoodListHeader,

    // === SETTINGS MESSAGES ===
    SettingsHeader,
    SettingsUpdated,
    SettingsMissing,

    // === STATS MESSAGES ===
    StatsHeader,
    MonthSummaryHeader(String), // YYYY-MM

    // === INPUT ERRORS ===
    InvalidDate(String),
    InvalidDateTime(String),
    InvalidTime(String),
    InvalidMonth(String),
    InvalidTheme(String),
    InvalidToggle(String),
}
