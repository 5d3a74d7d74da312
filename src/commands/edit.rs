use crate::{
    libs::{entry::MoodEntryPatch, messages::Message, view::View},
    msg_bail_anyhow, msg_error, msg_info, msg_success,
    storage::Storage,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Entry ID
    id: i64,
    /// Replace the note
    #[arg(short, long, conflicts_with = "clear_note")]
    note: Option<String>,
    /// Remove the note
    #[arg(long)]
    clear_note: bool,
    /// Replace the moods; repeat for several
    #[arg(short, long = "mood")]
    moods: Vec<String>,
    /// Replace the tags; repeat for several
    #[arg(short, long = "tag", conflicts_with = "clear_tags")]
    tags: Vec<String>,
    /// Remove all tags
    #[arg(long)]
    clear_tags: bool,
}

impl EditArgs {
    fn patch(&self) -> MoodEntryPatch {
        let mut patch = MoodEntryPatch::default();
        if let Some(note) = &self.note {
            patch = patch.notes(note.clone());
        }
        if self.clear_note {
            patch = patch.clear_notes();
        }
        if !self.moods.is_empty() {
            patch = patch.moods(self.moods.clone());
        }
        if !self.tags.is_empty() {
            patch = patch.tags(self.tags.clone());
        }
        if self.clear_tags {
            patch.tag_names = Some(Vec::new());
        }
        patch
    }
}

pub fn cmd(storage: &mut dyn Storage, args: EditArgs) -> Result<()> {
    let patch = args.patch();
    if patch.is_empty() {
        msg_bail_anyhow!(Message::NothingToUpdate);
    }

    if storage.get_mood_entry_by_id(args.id)?.is_none() {
        msg_error!(Message::EntryNotFound(args.id));
        return Ok(());
    }

    if storage.update_mood_entry(args.id, &patch)? {
        msg_success!(Message::EntryUpdated(args.id));
    } else {
        msg_info!(Message::EntryUnchanged(args.id));
    }

    if let Some(entry) = storage.get_mood_entry_by_id(args.id)? {
        View::entry(&entry);
    }
    Ok(())
}
