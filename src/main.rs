//! code-wrapped: a yearly recap of your edits from editor local history

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "code-wrapped")]
#[command(about = "Your year in code, from Cursor and VS Code local history", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick editors interactively and upload your recap (default)
    Wrapped {
        /// Scan and summarize without uploading
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show local statistics without uploading anything
    Stats {
        /// Editor app name, e.g. Cursor, Code, VSCodium (repeatable)
        #[arg(long, short)]
        editor: Vec<String>,

        /// Extra History folder to scan (repeatable)
        #[arg(long, short)]
        path: Vec<PathBuf>,

        /// Rows per table
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Wrapped { dry_run: false }) {
        Commands::Wrapped { dry_run } => {
            if dry_run {
                println!("{}", "(DRY-RUN MODE - nothing will be uploaded)".blue());
            }
            commands::wrapped::execute(dry_run)?;
        }

        Commands::Stats {
            editor,
            path,
            limit,
        } => {
            let options = commands::stats::StatsOptions {
                editors: editor,
                paths: path,
                limit,
            };
            let output = commands::stats::execute(options)?;
            println!("{}", output);
        }
    }

    Ok(())
}
