use super::parse_date;
use crate::{
    libs::{filter::EntryFilter, messages::Message, view::View},
    msg_info, msg_print,
    storage::Storage,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only entries on this day (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Keep entries having any of these moods
    #[arg(short, long = "mood")]
    moods: Vec<String>,
    /// Keep entries having all of these tags
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// First day of a date range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Last day of a date range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Search notes, moods and tags (case and accent insensitive)
    #[arg(short, long)]
    search: Option<String>,
}

pub fn cmd(storage: &mut dyn Storage, args: ListArgs) -> Result<()> {
    let entries = match args.date {
        Some(date) => storage.get_mood_entries_by_date(date)?,
        None => storage.get_all_mood_entries()?,
    };

    let filter = EntryFilter {
        mood_names: args.moods,
        tag_names: args.tags,
        start_date: args.from,
        end_date: args.to,
        search_text: args.search,
    };
    let entries = filter.apply(entries);

    if entries.is_empty() {
        msg_info!(Message::NoEntriesFound);
        return Ok(());
    }

    msg_print!(Message::EntriesHeader(entries.len()), true);
    View::entries(&entries);
    Ok(())
}
