//! Journal initialization command.
//!
//! Opens the selected backend, which creates the schema and seed data when
//! missing, and reports where the journal lives. Safe to run repeatedly.

use crate::{
    libs::{data_storage::DataStorage, messages::Message},
    msg_error_anyhow, msg_success,
    storage::{open_storage_in, BackendKind},
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let kind = BackendKind::detect();
    let data = DataStorage::new();

    let mut storage = open_storage_in(kind, &data).map_err(|e| msg_error_anyhow!(Message::StorageInitFailed(e.to_string())))?;
    storage.shutdown()?;

    msg_success!(Message::StorageReady(kind.to_string(), data.base_path().display().to_string()));
    Ok(())
}
