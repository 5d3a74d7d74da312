pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod moods;
pub mod settings;
pub mod show;
pub mod stats;
pub mod tag;

use crate::{
    libs::{
        config::parse_reminder_time,
        data_storage::DataStorage,
        entry::{DATE_FORMAT, TIMESTAMP_FORMAT},
        error::StorageError,
        messages::Message,
    },
    msg_debug, msg_error_anyhow,
    storage::{open_storage, BackendKind, Storage},
};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Prepare the journal storage")]
    Init,
    #[command(about = "Record a mood entry")]
    Add(add::AddArgs),
    #[command(about = "List entries, optionally filtered")]
    List(list::ListArgs),
    #[command(about = "Show one entry")]
    Show(show::ShowArgs),
    #[command(about = "Change an entry's notes, moods or tags")]
    Edit(edit::EditArgs),
    #[command(about = "Delete one entry or all entries")]
    Delete(delete::DeleteArgs),
    #[command(about = "Create a tag or list tags")]
    Tag(tag::TagArgs),
    #[command(about = "List the mood catalogue")]
    Moods,
    #[command(about = "Show or change reminder and theme settings")]
    Settings(settings::SettingsArgs),
    #[command(about = "Show journal statistics")]
    Stats(stats::StatsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Add(args) => with_storage(|storage| add::cmd(storage, args)),
            Commands::List(args) => with_storage(|storage| list::cmd(storage, args)),
            Commands::Show(args) => with_storage(|storage| show::cmd(storage, args)),
            Commands::Edit(args) => with_storage(|storage| edit::cmd(storage, args)),
            Commands::Delete(args) => with_storage(|storage| delete::cmd(storage, args)),
            Commands::Tag(args) => with_storage(|storage| tag::cmd(storage, args)),
            Commands::Moods => with_storage(moods::cmd),
            Commands::Settings(args) => with_storage(|storage| settings::cmd(storage, args)),
            Commands::Stats(args) => with_storage(|storage| stats::cmd(storage, args)),
        }
    }
}

/// Opens the storage for one command and always shuts it down afterwards,
/// also when the command fails.
pub fn with_storage<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut dyn Storage) -> Result<()>,
{
    let mut storage = open_storage(BackendKind::detect()).map_err(|e| msg_error_anyhow!(Message::StorageInitFailed(e.to_string())))?;
    msg_debug!(Message::StorageReady(storage.backend().to_string(), DataStorage::new().base_path().display().to_string()));
    let result = f(storage.as_mut()).map_err(|e| match e.downcast_ref::<StorageError>() {
        Some(err) => msg_error_anyhow!(Message::StorageOperationFailed(err.to_string())),
        None => e,
    });
    let closed = storage.shutdown();
    result?;
    closed?;
    Ok(())
}

pub(crate) fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Message::InvalidDate(value.to_string()).to_string())
}

/// Accepts a full timestamp, one without seconds, or a bare date (midnight).
pub(crate) fn parse_datetime(value: &str) -> std::result::Result<NaiveDateTime, String> {
    let value = value.trim();
    [TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| parse_date(value).ok().and_then(|date| date.and_hms_opt(0, 0, 0)))
        .ok_or_else(|| Message::InvalidDateTime(value.to_string()).to_string())
}

pub(crate) fn parse_time(value: &str) -> std::result::Result<NaiveTime, String> {
    parse_reminder_time(value.trim()).map_err(|_| Message::InvalidTime(value.to_string()).to_string())
}

/// `YYYY-MM` as `(year, month)`.
pub(crate) fn parse_month(value: &str) -> std::result::Result<(i32, u32), String> {
    use chrono::Datelike;
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), DATE_FORMAT)
        .map(|date| (date.year(), date.month()))
        .map_err(|_| Message::InvalidMonth(value.to_string()).to_string())
}

pub(crate) fn parse_toggle(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(Message::InvalidToggle(value.to_string()).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_variants() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap().and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(parse_datetime("2025-11-30 10:00:00"), Ok(expected));
        assert_eq!(parse_datetime("2025-11-30 10:00"), Ok(expected));
        assert_eq!(parse_datetime("2025-11-30T10:00:00"), Ok(expected));
        assert_eq!(
            parse_datetime("2025-11-30"),
            Ok(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap().and_hms_opt(0, 0, 0).unwrap())
        );
        assert!(parse_datetime("30/11/2025").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-11"), Ok((2025, 11)));
        assert!(parse_month("2025-13").is_err());
    }

    #[test]
    fn test_parse_toggle() {
        assert_eq!(parse_toggle("ON"), Ok(true));
        assert_eq!(parse_toggle("off"), Ok(false));
        assert!(parse_toggle("maybe").is_err());
    }
}
