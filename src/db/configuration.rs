//! The singleton settings row.

use crate::libs::config::{parse_reminder_time, Configuration, ConfigurationPatch, REMINDER_TIME_FORMAT};
use crate::libs::error::{Result, StorageError};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};

const SELECT_CONFIGURATION: &str = "SELECT reminder_enabled, reminder_time, theme FROM configuration WHERE id = 1";

pub struct ConfigurationStore<'c> {
    conn: &'c Connection,
}

impl<'c> ConfigurationStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self) -> Result<Option<Configuration>> {
        let raw = self
            .conn
            .query_row(SELECT_CONFIGURATION, [], |row| {
                Ok((row.get::<_, bool>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })
            .optional()?;

        let Some((reminder_enabled, reminder_time, theme)) = raw else {
            return Ok(None);
        };

        Ok(Some(Configuration {
            reminder_enabled,
            reminder_time: parse_reminder_time(&reminder_time)
                .map_err(|e| StorageError::InvalidData(format!("reminder time '{}': {}", reminder_time, e)))?,
            theme: theme.parse().map_err(StorageError::InvalidData)?,
        }))
    }

    /// Writes the supplied fields only. Returns whether the row was touched.
    pub fn update(&self, patch: &ConfigurationPatch) -> Result<bool> {
        let mut fields: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(enabled) = patch.reminder_enabled {
            fields.push("reminder_enabled = ?");
            values.push(Value::Integer(enabled as i64));
        }
        if let Some(time) = patch.reminder_time {
            fields.push("reminder_time = ?");
            values.push(Value::Text(time.format(REMINDER_TIME_FORMAT).to_string()));
        }
        if let Some(theme) = patch.theme {
            fields.push("theme = ?");
            values.push(Value::Text(theme.as_str().to_string()));
        }

        if fields.is_empty() {
            return Ok(false);
        }

        let sql = format!("UPDATE configuration SET {} WHERE id = 1", fields.join(", "));
        let changed = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(changed > 0)
    }
}
