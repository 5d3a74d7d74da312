use crate::{
    libs::{messages::Message, view::View},
    msg_print,
    storage::Storage,
};
use anyhow::Result;

pub fn cmd(storage: &mut dyn Storage) -> Result<()> {
    let moods = storage.list_moods()?;
    msg_print!(Message::MoodListHeader, true);
    View::moods(&moods);
    Ok(())
}
