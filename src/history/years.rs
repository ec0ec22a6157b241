//! Yearly partition of every recorded change (the upload payload)

use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;

use super::entries::ProcessedEntryFile;

/// One saved snapshot of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub file: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// All changes made during one calendar year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearData {
    pub year: i32,
    pub changes: Vec<Change>,
}

/// Expand a record into its changes, oldest first
pub fn year_changes(entry: &ProcessedEntryFile) -> Vec<Change> {
    let mut changes: Vec<Change> = entry
        .timestamps
        .iter()
        .map(|&timestamp| Change {
            file: entry.file_location.clone(),
            timestamp,
        })
        .collect();
    changes.sort_by_key(|c| c.timestamp);
    changes
}

/// Group changes by calendar year in `tz`, years ascending
///
/// Changes are ordered by timestamp inside each year; equal timestamps keep
/// their input order. Timestamps outside chrono's range never reach here
/// from a scan (`process_entry_file` rejects them); direct callers get them
/// dropped with a warning.
pub fn sort_into_years<Tz: TimeZone>(mut changes: Vec<Change>, tz: &Tz) -> Vec<YearData> {
    changes.sort_by_key(|c| c.timestamp);

    let mut years: Vec<YearData> = Vec::new();
    for change in changes {
        let Some(year) = DateTime::from_timestamp_millis(change.timestamp)
            .map(|utc| utc.with_timezone(tz).year())
        else {
            log::warn!(
                "Dropping out-of-range timestamp {} for {}",
                change.timestamp,
                change.file
            );
            continue;
        };

        // Input is time-ordered, so a year only ever appends to the last bucket
        match years.last_mut() {
            Some(bucket) if bucket.year == year => bucket.changes.push(change),
            _ => years.push(YearData {
                year,
                changes: vec![change],
            }),
        }
    }

    years
}

/// Flatten every record into changes and partition them by year
pub fn build_year_data<Tz: TimeZone>(entries: &[ProcessedEntryFile], tz: &Tz) -> Vec<YearData> {
    let changes: Vec<Change> = entries.iter().flat_map(year_changes).collect();
    sort_into_years(changes, tz)
}
