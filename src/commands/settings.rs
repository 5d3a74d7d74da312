use super::{parse_time, parse_toggle};
use crate::{
    libs::{
        config::{ConfigurationPatch, Theme},
        messages::Message,
        view::View,
    },
    msg_error, msg_print, msg_success,
    storage::Storage,
};
use anyhow::Result;
use chrono::NaiveTime;
use clap::Args;

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Turn the daily reminder on or off
    #[arg(long, value_parser = parse_toggle)]
    reminder: Option<bool>,
    /// Reminder time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,
    /// Color theme (light or dark)
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,
}

fn parse_theme(value: &str) -> std::result::Result<Theme, String> {
    value.parse().map_err(|_| Message::InvalidTheme(value.to_string()).to_string())
}

pub fn cmd(storage: &mut dyn Storage, args: SettingsArgs) -> Result<()> {
    let patch = ConfigurationPatch {
        reminder_enabled: args.reminder,
        reminder_time: args.time,
        theme: args.theme,
    };

    if storage.update_configuration(&patch)? {
        msg_success!(Message::SettingsUpdated);
    }

    match storage.get_configuration()? {
        Some(config) => {
            msg_print!(Message::SettingsHeader, true);
            View::configuration(&config);
        }
        None => msg_error!(Message::SettingsMissing),
    }
    Ok(())
}
