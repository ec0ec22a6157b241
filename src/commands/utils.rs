//! Shared utilities for commands

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

use code_wrapped::history::{self, ProcessedEntryFile};

/// An editor whose local history will be scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    /// Display name (app name or the custom path)
    pub name: String,
    /// History root, e.g. ~/.config/Code/User/History
    pub path: PathBuf,
}

/// Expand a leading `~` to the home directory
pub fn expand_home(input: &str) -> Result<PathBuf> {
    match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => {
            let home = dirs::home_dir().context("Could not determine home directory")?;
            Ok(home.join(rest.trim_start_matches(['/', '\\'])))
        }
        _ => Ok(PathBuf::from(input)),
    }
}

/// Scan every editor's history root and concatenate the records
pub fn scan_editors(editors: &[Editor]) -> Result<Vec<ProcessedEntryFile>> {
    let mut all = Vec::new();

    for editor in editors {
        let entries = history::scan_history_dir(&editor.path)
            .with_context(|| format!("Failed to scan history for {}", editor.name))?;
        log::info!("{}: {} file(s) with history", editor.name, entries.len());
        all.extend(entries);
    }

    Ok(all)
}

/// Whether `path` holds at least one history folder with a manifest
pub fn has_history(path: &Path) -> bool {
    let Ok(entries) = fs::read_dir(path) else {
        return false;
    };

    entries
        .flatten()
        .any(|entry| entry.path().join(history::entries::ENTRIES_FILE).is_file())
}

/// Format an epoch-millisecond timestamp as a local date
pub fn format_date(timestamp: i64) -> String {
    match Local.timestamp_millis_opt(timestamp).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => timestamp.to_string(),
    }
}

/// Weekday name for 0 = Sunday .. 6 = Saturday
pub fn day_name(day: u32) -> &'static str {
    const DAYS: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    DAYS.get(day as usize).copied().unwrap_or("?")
}
