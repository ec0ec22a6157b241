//! Stats command - Show a local recap without uploading anything

use anyhow::Result;
use chrono::Local;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use super::utils::{self, Editor};
use code_wrapped::config;
use code_wrapped::history::{self, Summary};

/// Options for the stats command
pub struct StatsOptions {
    /// Editor app names; empty means every known editor
    pub editors: Vec<String>,
    /// Extra history roots
    pub paths: Vec<PathBuf>,
    /// Rows per table
    pub limit: usize,
}

/// Execute the stats command and return formatted output
pub fn execute(options: StatsOptions) -> Result<String> {
    let names: Vec<String> = if options.editors.is_empty() && options.paths.is_empty() {
        config::KNOWN_EDITORS
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    } else {
        options.editors.clone()
    };

    let mut editors = Vec::new();
    for name in names {
        let path = config::editor_history_dir(&name)?;
        if utils::has_history(&path) {
            editors.push(Editor { name, path });
        } else {
            eprintln!(
                "{} {}",
                "Warning:".yellow(),
                format!("no change history for {} at {}", name, path.display())
            );
        }
    }
    for path in options.paths {
        if utils::has_history(&path) {
            editors.push(Editor {
                name: path.display().to_string(),
                path,
            });
        } else {
            eprintln!(
                "{} no change history in {}",
                "Warning:".yellow(),
                path.display()
            );
        }
    }

    let entries = utils::scan_editors(&editors)?;
    let summary = history::summarize(&entries, &Local, options.limit);

    Ok(format_summary(&summary, options.limit))
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).set_alignment(CellAlignment::Right)
}

/// Format a summary as a set of tables
pub fn format_summary(summary: &Summary, limit: usize) -> String {
    if summary.number_of_changes == 0 {
        return "No changes found in local history.".to_string();
    }

    let mut sections = vec![format!(
        "Total changes: {}",
        summary.number_of_changes.to_string().green()
    )];

    let mut languages = table(&["Language", "Files"]);
    for lang in summary.language_data.iter().take(limit) {
        languages.add_row(vec![Cell::new(&lang.language), count_cell(lang.count)]);
    }
    sections.push(format!("{}\n{}", "Top languages".bold(), languages));

    let mut files = table(&["File", "Language", "Changes"]);
    for file in summary.most_popular_files.iter().take(limit) {
        files.add_row(vec![
            Cell::new(&file.file_location),
            Cell::new(&file.language),
            count_cell(file.changes),
        ]);
    }
    sections.push(format!("{}\n{}", "Most edited files".bold(), files));

    let mut dates = table(&["Date", "Changes"]);
    for date in summary.most_popular_dates.iter().take(limit) {
        dates.add_row(vec![Cell::new(utils::format_date(date.date)), count_cell(date.count)]);
    }
    sections.push(format!("{}\n{}", "Busiest days".bold(), dates));

    let mut days = table(&["Weekday", "Changes"]);
    for day in &summary.most_popular_days_of_week {
        days.add_row(vec![Cell::new(utils::day_name(day.day)), count_cell(day.count)]);
    }
    sections.push(format!("{}\n{}", "Weekdays".bold(), days));

    let mut hours = table(&["Hour", "Changes"]);
    for hour in summary.most_popular_hours.iter().take(limit) {
        hours.add_row(vec![
            Cell::new(format!("{:02}:00", hour.hour)),
            count_cell(hour.count),
        ]);
    }
    sections.push(format!("{}\n{}", "Busiest hours".bold(), hours));

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_wrapped::history::stats::{DayCount, HourCount, LanguageCount};
    use code_wrapped::history::ProcessedEntryFile;

    #[test]
    fn test_format_empty_summary() {
        let summary = history::summarize(&[], &Local, 5);
        assert_eq!(format_summary(&summary, 5), "No changes found in local history.");
    }

    #[test]
    fn test_format_summary_tables() {
        let summary = Summary {
            number_of_changes: 3,
            language_data: vec![LanguageCount {
                language: "Rust".to_string(),
                count: 1,
            }],
            most_popular_files: vec![ProcessedEntryFile {
                file_location: "/src/main.rs".to_string(),
                language: "Rust".to_string(),
                changes: 3,
                timestamps: vec![1, 2, 3],
            }],
            most_popular_dates: vec![],
            most_popular_days_of_week: vec![DayCount { day: 4, count: 3 }],
            most_popular_hours: vec![HourCount { hour: 9, count: 3 }],
        };

        let output = format_summary(&summary, 5);
        assert!(output.contains("/src/main.rs"));
        assert!(output.contains("Thursday"));
        assert!(output.contains("09:00"));
        assert!(output.contains("Top languages"));
    }

    #[test]
    fn test_limit_above_default_shows_every_file() {
        let entries: Vec<ProcessedEntryFile> = (0..15)
            .map(|i| ProcessedEntryFile {
                file_location: format!("/src/file_{:02}.rs", i),
                language: format!("Lang{:02}", i),
                changes: 1,
                timestamps: vec![1_700_000_000_000],
            })
            .collect();

        let summary = history::summarize(&entries, &Local, 20);
        let output = format_summary(&summary, 20);

        let files_shown = (0..15)
            .filter(|i| output.contains(&format!("/src/file_{:02}.rs", i)))
            .count();
        let languages_shown = (0..15)
            .filter(|i| output.contains(&format!("Lang{:02}", i)))
            .count();
        assert_eq!(files_shown, 15);
        assert_eq!(languages_shown, 15);
    }
}
