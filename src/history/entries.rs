//! Local history folders
//!
//! Editors built on VS Code keep one folder per tracked file under
//! `<User>/History/<id>/`, each with an `entries.json` manifest:
//!
//! ```json
//! { "version": 1, "resource": "file:///path/to/file.rs",
//!   "entries": [{ "id": "AbCd.rs", "timestamp": 1700000000000 }] }
//! ```

use anyhow::{Context, Result};
use chrono::DateTime;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::json::{parse_json, JsonError};
use super::language;

/// Manifest file inside every history folder
pub const ENTRIES_FILE: &str = "entries.json";

const FILE_SCHEME: &str = "file://";

/// One `entries.json` manifest as written by the editor
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryFile {
    pub version: u32,
    pub entries: Vec<Entry>,
    pub resource: String,
}

/// A single saved snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Normalized view of one tracked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedEntryFile {
    /// Filesystem path of the edited file
    pub file_location: String,
    pub language: String,
    /// Number of snapshots; always `timestamps.len()`
    pub changes: usize,
    pub timestamps: Vec<i64>,
}

#[derive(Debug, thiserror::Error)]
enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Json { path: String, source: JsonError },
}

/// Read and validate `<root>/<folder>/entries.json`
///
/// Returns `None` when the manifest is missing, unreadable, or does not match
/// the schema. Failures other than a missing file are logged; none of them
/// propagate, so one corrupt folder never aborts a scan.
pub fn read_entry_file(root: &Path, folder: &str) -> Option<EntryFile> {
    match load_entry_file(root, folder) {
        Ok(entry_file) => entry_file,
        Err(e) => {
            log::warn!("Skipping history folder: {}", e);
            None
        }
    }
}

fn load_entry_file(root: &Path, folder: &str) -> Result<Option<EntryFile>, ReadError> {
    let path = root.join(folder).join(ENTRIES_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| ReadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_json(&content).map(Some).map_err(|source| ReadError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Turn a manifest into a normalized record
///
/// Returns `None` for resources that are not local files, files without an
/// extension, extensions with no known language, and manifests holding a
/// timestamp that is not a representable date.
pub fn process_entry_file(entry_file: EntryFile) -> Option<ProcessedEntryFile> {
    let file_location = file_location(&entry_file.resource)?;
    let extension = file_extension(&file_location)?;
    let language = language::language_for_extension(extension)?;

    let timestamps: Vec<i64> = entry_file.entries.iter().map(|e| e.timestamp).collect();

    if let Some(bad) = timestamps
        .iter()
        .find(|&&ts| DateTime::from_timestamp_millis(ts).is_none())
    {
        log::warn!(
            "Skipping history for {}: timestamp {} is out of range",
            entry_file.resource,
            bad
        );
        return None;
    }

    Some(ProcessedEntryFile {
        changes: timestamps.len(),
        language: language.to_string(),
        file_location,
        timestamps,
    })
}

/// Path part of a `file://` resource URI, percent-decoded
pub fn file_location(resource: &str) -> Option<String> {
    let encoded = resource.strip_prefix(FILE_SCHEME)?;
    Some(percent_decode_str(encoded).decode_utf8_lossy().into_owned())
}

/// Text after the last `.` of the basename, if non-empty
pub fn file_extension(location: &str) -> Option<&str> {
    let basename = location.rsplit('/').next().unwrap_or(location);
    match basename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Read every history folder under an editor's history root
///
/// Folders without a usable manifest are dropped.
pub fn scan_history_dir(root: &Path) -> Result<Vec<ProcessedEntryFile>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("Failed to read: {}", root.display()))?;

    let mut folders: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    // read_dir order is platform-dependent; keep tie-breaks reproducible
    folders.sort();

    let processed: Vec<ProcessedEntryFile> = folders
        .iter()
        .filter_map(|folder| read_entry_file(root, folder))
        .filter_map(process_entry_file)
        .collect();

    log::info!(
        "{}: {} of {} folder(s) usable",
        root.display(),
        processed.len(),
        folders.len()
    );

    Ok(processed)
}
