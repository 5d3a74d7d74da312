use super::parse_month;
use crate::{
    libs::{messages::Message, summary::MonthSummary, view::View},
    msg_print,
    storage::Storage,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Summarize one month instead (YYYY-MM)
    #[arg(short, long, value_parser = parse_month)]
    month: Option<(i32, u32)>,
}

pub fn cmd(storage: &mut dyn Storage, args: StatsArgs) -> Result<()> {
    match args.month {
        Some((year, month)) => {
            let entries = storage.get_all_mood_entries()?;
            let moods = storage.list_moods()?;
            let summary = MonthSummary::for_month(&entries, &moods, year, month);
            msg_print!(Message::MonthSummaryHeader(format!("{:04}-{:02}", year, month)), true);
            View::month_summary(&summary);
        }
        None => {
            let stats = storage.get_stats()?;
            msg_print!(Message::StatsHeader, true);
            View::stats(&stats);
        }
    }
    Ok(())
}
