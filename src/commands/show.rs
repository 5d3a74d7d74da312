use crate::{
    libs::{messages::Message, view::View},
    msg_error, msg_print,
    storage::Storage,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Entry ID
    id: i64,
}

pub fn cmd(storage: &mut dyn Storage, args: ShowArgs) -> Result<()> {
    match storage.get_mood_entry_by_id(args.id)? {
        Some(entry) => {
            msg_print!(Message::EntryHeader(entry.id), true);
            View::entry(&entry);
        }
        None => msg_error!(Message::EntryNotFound(args.id)),
    }
    Ok(())
}
