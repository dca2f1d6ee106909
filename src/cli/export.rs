use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::config::DaylogConfig;
use crate::entries::{DailyEntry, EntrySource};

/// Export format: the user plus every entry, oldest first.
#[derive(Debug, Serialize)]
struct ExportData {
    username: String,
    exported_at: String,
    entries: Vec<DailyEntry>,
}

/// Export all of the user's entries as JSON to stdout.
pub fn export(config: &DaylogConfig, user: Option<&str>) -> Result<()> {
    let session = Session::open(config, user)?;
    let entries = session.conn.fetch_all_entries_for_user(&session.user.id)?;

    let data = ExportData {
        username: session.user.username,
        exported_at: chrono::Utc::now().to_rfc3339(),
        entries,
    };

    let json = serde_json::to_string_pretty(&data)?;
    println!("{json}");

    eprintln!("Exported {} entries for '{}'.", data.entries.len(), data.username);
    Ok(())
}
