use crate::{
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
    storage::Storage,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("action").required(true).args(["name", "list"]))]
pub struct TagArgs {
    /// Tag name to look up or create
    name: Option<String>,
    /// Color for a newly created tag
    #[arg(short, long, requires = "name")]
    color: Option<String>,
    /// List all tags
    #[arg(short, long)]
    list: bool,
}

pub fn cmd(storage: &mut dyn Storage, args: TagArgs) -> Result<()> {
    match args.name {
        Some(name) => {
            let id = storage.get_or_create_tag(&name, args.color.as_deref())?;
            msg_success!(Message::TagReady(name, id));
        }
        None => {
            let tags = storage.list_tags()?;
            if tags.is_empty() {
                msg_info!(Message::NoTagsFound);
                return Ok(());
            }
            msg_print!(Message::TagListHeader, true);
            View::tags(&tags);
        }
    }
    Ok(())
}
