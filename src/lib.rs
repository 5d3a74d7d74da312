//! # Moodlog - a personal mood journal
//!
//! Records how you feel over time: each entry carries one or more moods from
//! a fixed catalogue, optional free-text notes and free-form tags. Entries can
//! be listed by day, filtered, edited and summarized.
//!
//! ## Features
//!
//! - **Two backends**: embedded SQLite, or a single JSON blob in key-value storage
//! - **Mood catalogue**: nine seeded moods with colors and icons
//! - **Tags**: created on first use, shared across entries
//! - **Settings**: daily reminder and color theme
//! - **Statistics**: entry count and most common primary mood
//!
//! ## Usage
//!
//! ```rust,no_run
//! use moodlog::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod storage;
