use super::parse_datetime;
use crate::{
    libs::{entry::NewMoodEntry, messages::Message, view::View},
    msg_bail_anyhow, msg_success, msg_warning,
    storage::Storage,
};
use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Mood name from the catalogue; repeat for several, the first is the primary mood
    #[arg(short, long = "mood", required = true)]
    moods: Vec<String>,
    /// Tag name; created on first use
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// Free-text note
    #[arg(short, long)]
    note: Option<String>,
    /// When it happened (defaults to now)
    #[arg(long, value_parser = parse_datetime)]
    at: Option<NaiveDateTime>,
}

pub fn cmd(storage: &mut dyn Storage, args: AddArgs) -> Result<()> {
    if args.moods.iter().all(|m| m.trim().is_empty()) {
        msg_bail_anyhow!(Message::MoodRequired);
    }

    let catalogue = storage.list_moods()?;
    let unknown: Vec<String> = args
        .moods
        .iter()
        .filter(|name| !catalogue.iter().any(|mood| &mood.name == *name))
        .cloned()
        .collect();
    if unknown.len() == args.moods.len() {
        msg_bail_anyhow!(Message::UnknownMoodsIgnored(unknown));
    }
    if !unknown.is_empty() {
        msg_warning!(Message::UnknownMoodsIgnored(unknown));
    }

    let mut entry = NewMoodEntry::new(args.moods).with_tags(args.tags);
    entry.notes = args.note;
    entry.timestamp = args.at;

    let created = storage.create_mood_entry(&entry)?;
    msg_success!(Message::EntryCreated(created.id));
    View::entry(&created);
    Ok(())
}
