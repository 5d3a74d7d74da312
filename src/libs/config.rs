//! Global user settings kept in the journal store.
//!
//! There is exactly one [`Configuration`] per store. It is created with
//! defaults when the schema is ensured and only ever updated afterwards.
//!
//! ## Defaults
//!
//! - Reminders enabled
//! - Reminder time `08:00`
//! - Dark theme
//!
//! ## Usage
//!
//! ```rust,no_run
//! use moodlog::libs::config::{ConfigurationPatch, Theme};
//! use moodlog::storage::{open_storage, BackendKind};
//!
//! let mut storage = open_storage(BackendKind::detect())?;
//! storage.update_configuration(&ConfigurationPatch::default().theme(Theme::Light))?;
//! # Ok::<(), moodlog::libs::error::StorageError>(())
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Textual form of the reminder time.
pub const REMINDER_TIME_FORMAT: &str = "%H:%M";

/// Serde adapter keeping the reminder time as `HH:MM`.
pub mod reminder_time_format {
    use super::REMINDER_TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(REMINDER_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_reminder_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parses `HH:MM`, also accepting a trailing `:SS` as older rows may carry.
pub fn parse_reminder_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(raw, REMINDER_TIME_FORMAT).or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
}

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// The singleton settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub reminder_enabled: bool,
    #[serde(with = "reminder_time_format")]
    pub reminder_time: NaiveTime,
    pub theme: Theme,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            reminder_enabled: true,
            reminder_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            theme: Theme::Dark,
        }
    }
}

impl Configuration {
    /// Applies the supplied fields. Returns whether any field was supplied.
    pub fn apply(&mut self, patch: &ConfigurationPatch) -> bool {
        if let Some(enabled) = patch.reminder_enabled {
            self.reminder_enabled = enabled;
        }
        if let Some(time) = patch.reminder_time {
            self.reminder_time = time;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        !patch.is_empty()
    }
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigurationPatch {
    pub reminder_enabled: Option<bool>,
    pub reminder_time: Option<NaiveTime>,
    pub theme: Option<Theme>,
}

impl ConfigurationPatch {
    pub fn reminder_enabled(mut self, enabled: bool) -> Self {
        self.reminder_enabled = Some(enabled);
        self
    }

    pub fn reminder_time(mut self, time: NaiveTime) -> Self {
        self.reminder_time = Some(time);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.reminder_enabled.is_none() && self.reminder_time.is_none() && self.theme.is_none()
    }
}
