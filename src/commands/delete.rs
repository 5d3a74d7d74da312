use crate::{
    libs::messages::Message,
    msg_error, msg_info, msg_success,
    storage::Storage,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("target").required(true).args(["id", "all"]))]
pub struct DeleteArgs {
    /// Entry ID
    id: Option<i64>,
    /// Delete every entry (tags and moods are kept)
    #[arg(long)]
    all: bool,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(storage: &mut dyn Storage, args: DeleteArgs) -> Result<()> {
    match args.id {
        Some(id) => delete_one(storage, id, args.yes),
        None => delete_all(storage, args.yes),
    }
}

fn delete_one(storage: &mut dyn Storage, id: i64, yes: bool) -> Result<()> {
    if storage.get_mood_entry_by_id(id)?.is_none() {
        msg_error!(Message::EntryNotFound(id));
        return Ok(());
    }
    if !yes && !confirm(Message::ConfirmDeleteEntry(id))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if storage.delete_mood_entry(id)? {
        msg_success!(Message::EntryDeleted(id));
    } else {
        msg_error!(Message::EntryNotFound(id));
    }
    Ok(())
}

fn delete_all(storage: &mut dyn Storage, yes: bool) -> Result<()> {
    let count = storage.get_stats()?.total;
    if count == 0 {
        msg_info!(Message::NoEntriesToDelete);
        return Ok(());
    }
    if !yes && !confirm(Message::ConfirmDeleteAll(count))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if storage.delete_all_mood_entries()? {
        msg_success!(Message::EntriesDeleted);
    } else {
        msg_info!(Message::NoEntriesToDelete);
    }
    Ok(())
}

fn confirm(prompt: Message) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?)
}
