//! Shared domain types and helpers.

pub mod config;
pub mod data_storage;
pub mod entry;
pub mod error;
pub mod filter;
pub mod logging;
pub mod messages;
pub mod summary;
pub mod view;
