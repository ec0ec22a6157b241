//! Line-based interactive prompts
//!
//! Reads answers from any `BufRead` and writes questions to any `Write`, so
//! the same flow runs on a terminal and in tests. End of input cancels.

use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("cancelled")]
    Cancelled,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

/// One entry of a multi-select
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub hint: Option<String>,
}

impl SelectOption {
    pub fn new(value: &str, hint: Option<&str>) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
            hint: hint.map(str::to_string),
        }
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter over the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line without asking anything
    pub fn say(&mut self, message: &str) -> PromptResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn read_answer(&mut self) -> PromptResult<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Cancelled);
        }
        Ok(line.trim().to_string())
    }

    /// Ask for one or more of `options`
    ///
    /// Answers are option numbers or values separated by commas or spaces.
    /// At least one option must be picked; `q` cancels.
    pub fn multi_select(
        &mut self,
        message: &str,
        options: &[SelectOption],
    ) -> PromptResult<Vec<String>> {
        writeln!(self.output, "{} {}", "?".cyan(), message.bold())?;
        for (i, option) in options.iter().enumerate() {
            match &option.hint {
                Some(hint) => writeln!(
                    self.output,
                    "  {}) {} {}",
                    i + 1,
                    option.label,
                    format!("({})", hint).dimmed()
                )?,
                None => writeln!(self.output, "  {}) {}", i + 1, option.label)?,
            }
        }

        loop {
            write!(self.output, "{} ", "Select (e.g. 1,2):".dimmed())?;
            let answer = self.read_answer()?;

            if answer.eq_ignore_ascii_case("q") {
                return Err(PromptError::Cancelled);
            }

            match parse_selection(&answer, options) {
                Ok(selected) if !selected.is_empty() => return Ok(selected),
                Ok(_) => writeln!(self.output, "{}", "Please select at least one option.".yellow())?,
                Err(bad) => writeln!(
                    self.output,
                    "{}",
                    format!("Unknown option: {}", bad).yellow()
                )?,
            }
        }
    }

    /// Ask for free text; empty means skip
    ///
    /// `validate` returns an error message to show before asking again.
    pub fn text<F>(&mut self, message: &str, placeholder: &str, validate: F) -> PromptResult<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        writeln!(self.output, "{} {}", "?".cyan(), message.bold())?;

        loop {
            write!(self.output, "{} ", format!("{}:", placeholder).dimmed())?;
            let answer = self.read_answer()?;

            match validate(&answer) {
                Some(problem) => writeln!(self.output, "{}", problem.yellow())?,
                None => return Ok(answer),
            }
        }
    }
}

/// Resolve an answer into option values, in option order
///
/// Returns the first token that matches nothing as the error.
fn parse_selection(answer: &str, options: &[SelectOption]) -> Result<Vec<String>, String> {
    let mut picked = vec![false; options.len()];

    for token in answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let index = match token.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Some(n - 1),
            _ => options
                .iter()
                .position(|o| o.value.eq_ignore_ascii_case(token)),
        };

        match index {
            Some(i) => picked[i] = true,
            None => return Err(token.to_string()),
        }
    }

    Ok(options
        .iter()
        .zip(picked)
        .filter(|(_, p)| *p)
        .map(|(o, _)| o.value.clone())
        .collect())
}
