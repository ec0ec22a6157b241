//! Rankings over processed history records
//!
//! Every function here is pure. Time bucketing takes the time zone as an
//! argument; the CLI passes `chrono::Local`.

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Timelike};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

use super::entries::ProcessedEntryFile;

/// Default number of languages and files a summary keeps
pub const SUMMARY_TOP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    /// Epoch milliseconds of the day's local midnight
    pub date: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// 0 = Sunday .. 6 = Saturday
    pub day: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: u32,
    pub count: usize,
}

/// Overview of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub number_of_changes: usize,
    pub language_data: Vec<LanguageCount>,
    pub most_popular_files: Vec<ProcessedEntryFile>,
    pub most_popular_dates: Vec<DateCount>,
    pub most_popular_days_of_week: Vec<DayCount>,
    pub most_popular_hours: Vec<HourCount>,
}

/// Count keys in first-seen order, then sort by count (largest first)
///
/// The sort is stable, so equal counts keep first-seen order.
fn ranked<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn to_local<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp_millis(timestamp).map(|utc| utc.with_timezone(tz))
}

/// Records per language, most common first
pub fn language_stats(entries: &[ProcessedEntryFile]) -> Vec<LanguageCount> {
    ranked(entries.iter().map(|e| e.language.as_str()))
        .into_iter()
        .map(|(language, count)| LanguageCount {
            language: language.to_string(),
            count,
        })
        .collect()
}

/// Records sorted by number of changes, most edited first
pub fn most_popular_files(entries: &[ProcessedEntryFile]) -> Vec<ProcessedEntryFile> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.changes.cmp(&a.changes));
    sorted
}

/// Changes per calendar day, busiest first
pub fn most_popular_dates<Tz: TimeZone>(timestamps: &[i64], tz: &Tz) -> Vec<DateCount> {
    let days = timestamps.iter().filter_map(|&ts| {
        let local = to_local(ts, tz)?;
        let midnight = local.date_naive().and_time(NaiveTime::MIN);
        // DST gaps can swallow midnight; fall back to the earliest valid instant
        let start = tz
            .from_local_datetime(&midnight)
            .earliest()
            .unwrap_or(local);
        Some(start.timestamp_millis())
    });

    ranked(days)
        .into_iter()
        .map(|(date, count)| DateCount { date, count })
        .collect()
}

/// Changes per weekday, busiest first
pub fn most_popular_days_of_week<Tz: TimeZone>(timestamps: &[i64], tz: &Tz) -> Vec<DayCount> {
    let mut days: Vec<u32> = timestamps
        .iter()
        .filter_map(|&ts| to_local(ts, tz))
        .map(|dt| dt.weekday().num_days_from_sunday())
        .collect();
    days.sort_unstable();

    ranked(days)
        .into_iter()
        .map(|(day, count)| DayCount { day, count })
        .collect()
}

/// Changes per hour of day, busiest first
pub fn most_popular_hours<Tz: TimeZone>(timestamps: &[i64], tz: &Tz) -> Vec<HourCount> {
    let mut hours: Vec<u32> = timestamps
        .iter()
        .filter_map(|&ts| to_local(ts, tz))
        .map(|dt| dt.hour())
        .collect();
    hours.sort_unstable();

    ranked(hours)
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect()
}

/// Build the overview shown by `code-wrapped stats`
///
/// Languages and files are cut to the `top` most frequent.
pub fn summarize<Tz: TimeZone>(entries: &[ProcessedEntryFile], tz: &Tz, top: usize) -> Summary {
    let all_timestamps: Vec<i64> = entries
        .iter()
        .flat_map(|e| e.timestamps.iter().copied())
        .collect();

    let mut language_data = language_stats(entries);
    language_data.truncate(top);
    let mut files = most_popular_files(entries);
    files.truncate(top);

    Summary {
        number_of_changes: all_timestamps.len(),
        language_data,
        most_popular_files: files,
        most_popular_dates: most_popular_dates(&all_timestamps, tz),
        most_popular_days_of_week: most_popular_days_of_week(&all_timestamps, tz),
        most_popular_hours: most_popular_hours(&all_timestamps, tz),
    }
}
