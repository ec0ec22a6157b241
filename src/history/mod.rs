//! Editor local history: reading, normalizing, and aggregating

pub mod entries;
pub mod json;
pub mod language;
pub mod stats;
pub mod years;

pub use entries::{process_entry_file, read_entry_file, scan_history_dir, ProcessedEntryFile};
pub use json::{parse_json, JsonError};
pub use stats::{summarize, Summary};
pub use years::{build_year_data, Change, YearData};
