//! Wrapped command - Interactive scan and upload of the yearly recap

use anyhow::{Context, Result};
use chrono::Local;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::utils::{self, Editor};
use code_wrapped::config::{self, Endpoints};
use code_wrapped::history::{self, YearData};
use code_wrapped::prompt::{PromptError, PromptResult, Prompter, SelectOption};
use code_wrapped::upload::{self, UploadPayload};

/// What the user picked in the interactive flow
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Answers {
    /// Editors with an existing history root
    pub editors: Vec<Editor>,
    pub github: Option<String>,
}

/// Execute the wrapped command
pub fn execute(dry_run: bool) -> Result<()> {
    let endpoints = Endpoints::from_env()?;
    let mut prompter = Prompter::stdio();
    run(&mut prompter, &endpoints, config::editor_history_dir, dry_run)
}

/// Prompt, scan, partition by year and upload
///
/// All output goes through `prompter`. The share link is printed only after
/// a successful upload; any upload failure is returned as an error.
pub fn run<R, W, F>(
    prompter: &mut Prompter<R, W>,
    endpoints: &Endpoints,
    resolve: F,
    dry_run: bool,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<PathBuf>,
{
    prompter.say(&"Welcome to code wrapped!".bold().to_string())?;

    let answers = match collect_answers(prompter, resolve) {
        Ok(answers) => answers,
        Err(PromptError::Cancelled) => {
            prompter.say(&"Code wrapped cancelled.".red().to_string())?;
            return Ok(());
        }
        Err(PromptError::Io(e)) => return Err(e).context("Failed to read answer"),
    };

    if answers.editors.is_empty() {
        prompter.say(
            &"No change history found for the selected editors. Nothing to upload."
                .yellow()
                .to_string(),
        )?;
        return Ok(());
    }

    prompter.say("Searching for change history...")?;
    let entries = utils::scan_editors(&answers.editors)?;

    prompter.say("Crunching the numbers...")?;
    let data = history::build_year_data(&entries, &Local);
    let total: usize = data.iter().map(|y| y.changes.len()).sum();

    if total == 0 {
        prompter.say(
            &"No changes found in local history. Nothing to upload."
                .yellow()
                .to_string(),
        )?;
        return Ok(());
    }

    prompter.say(&format!(
        "Found {} change(s) across {} file(s) in {}",
        total.to_string().green(),
        entries.len().to_string().green(),
        describe_years(&data)
    ))?;

    let payload = UploadPayload {
        data,
        github: answers.github,
    };

    if dry_run {
        prompter.say(&format!(
            "\n{}",
            format!("(DRY-RUN) Would upload to {}", endpoints.api_url).blue()
        ))?;
        return Ok(());
    }

    prompter.say("Uploading analytics...")?;
    let response = upload::upload(endpoints, &payload).context("Failed to upload analytics")?;
    let link = endpoints.share_link(&response.id)?;

    prompter.say(&format!("{} View your analytics here: {}", "✔".green(), link))?;
    prompter.say("Thanks for using code wrapped!")?;

    Ok(())
}

/// Run the prompts and resolve the chosen editors to history roots
///
/// `resolve` maps an editor app name to its history root; editors whose root
/// does not exist are reported and left out.
pub fn collect_answers<R, W, F>(prompter: &mut Prompter<R, W>, resolve: F) -> PromptResult<Answers>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<PathBuf>,
{
    let mut answers = Answers::default();

    let options: Vec<SelectOption> = config::KNOWN_EDITORS
        .iter()
        .map(|(name, hint)| SelectOption::new(name, (name != hint).then_some(*hint)))
        .collect();
    let selected = prompter.multi_select("Which editors do you use?", &options)?;

    for name in &selected {
        add_named_editor(prompter, &mut answers, name, &resolve)?;
    }

    let custom_name = prompter.text(
        "Do you use another VS Code fork? Enter its app name",
        "Name of VS Code fork (enter to skip)",
        validate_custom_name,
    )?;
    if !custom_name.is_empty() {
        add_named_editor(prompter, &mut answers, &custom_name, &resolve)?;
    }

    let custom_path = prompter.text(
        "Is your history stored somewhere else? Enter the History folder",
        "Path to History folder (enter to skip)",
        |_| None,
    )?;
    if !custom_path.is_empty() {
        match utils::expand_home(&custom_path) {
            Ok(path) if utils::has_history(&path) => {
                prompter.say(&format!(
                    "{} Found change history in '{}'",
                    "✔".green(),
                    path.display()
                ))?;
                answers.editors.push(Editor {
                    name: custom_path,
                    path,
                });
            }
            _ => prompter.say(&missing_history(&custom_path))?,
        }
    }

    let github = prompter.text(
        "What's your GitHub username? It will be shown on your recap",
        "GitHub username (enter to skip)",
        validate_github,
    )?;
    answers.github = (!github.is_empty()).then_some(github);

    Ok(answers)
}

fn add_named_editor<R, W, F>(
    prompter: &mut Prompter<R, W>,
    answers: &mut Answers,
    name: &str,
    resolve: &F,
) -> PromptResult<()>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<PathBuf>,
{
    match resolve(name) {
        Ok(path) if utils::has_history(&path) => {
            log::debug!("{} history root: {}", name, path.display());
            answers.editors.push(Editor {
                name: name.to_string(),
                path,
            });
        }
        Ok(path) => {
            log::debug!("{} history root missing: {}", name, path.display());
            prompter.say(&missing_history(name))?;
        }
        Err(e) => {
            log::warn!("Could not resolve history for {}: {:#}", name, e);
            prompter.say(&missing_history(name))?;
        }
    }
    Ok(())
}

fn missing_history(name: &str) -> String {
    format!(
        "{} We couldn't find change history for '{}', it'll be ignored.",
        "!".yellow(),
        name
    )
}

fn validate_custom_name(value: &str) -> Option<String> {
    let lower = value.to_lowercase();
    config::KNOWN_EDITORS
        .iter()
        .any(|(name, _)| name.to_lowercase() == lower)
        .then(|| format!("You can't use '{}' as an editor name.", lower))
}

fn validate_github(value: &str) -> Option<String> {
    value
        .contains('@')
        .then(|| "Please enter your GitHub username, not an email address.".to_string())
}

/// "2023 and 2024", "2022, 2023 and 2024"
fn describe_years(data: &[YearData]) -> String {
    let years: Vec<String> = data.iter().map(|y| y.year.to_string()).collect();
    match years.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
