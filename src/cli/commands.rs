use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::models::{DEFAULT_MAX_RESULTS, DEFAULT_PREVIEW_RADIUS, Message, SearchOptions};
use crate::parsers::parse_transcript_file;
use crate::search::preview::unescape;
use crate::search::search;
use crate::settings::{JsonFileSettingsStore, default_settings_path};
use crate::tui::run_browser;
use crate::utils::single_line;

#[derive(Parser)]
#[command(name = "message-navigator")]
#[command(version = "0.1.0")]
#[command(about = "Search a chat transcript and jump to any message", long_about = None)]
pub struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a chat file for a keyword
    Search(SearchArgs),
    /// Show statistics about a chat file
    Stats {
        /// Chat file (JSONL)
        file: PathBuf,
    },
    /// Browse a chat file interactively
    Browse {
        /// Chat file (JSONL)
        file: PathBuf,
        /// Settings file (defaults to the platform config directory)
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,
        /// Jump to this floor on start
        #[arg(long)]
        floor: Option<String>,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Chat file (JSONL)
    pub file: PathBuf,
    /// Text to look for
    pub query: String,
    #[arg(long)]
    pub case_sensitive: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,
    /// Characters of context on each side of the match
    #[arg(long, default_value_t = DEFAULT_PREVIEW_RADIUS)]
    pub radius: usize,
    /// Do not mark matches in previews
    #[arg(long)]
    pub no_highlight: bool,
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, Some(Commands::Browse { .. }));
    init_logging(cli.log_file.as_deref(), interactive)?;

    match &cli.command {
        Some(Commands::Search(args)) => {
            run_search(args)?;
        }
        Some(Commands::Stats { file }) => {
            show_stats(file)?;
        }
        Some(Commands::Browse { file, settings, floor }) => {
            browse(file, settings.as_deref(), floor.as_deref())?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Logs go to stderr (default level `warn`, `RUST_LOG` overrides) or to
/// `log_file`. The interactive browser owns the terminal, so without a log
/// file it only logs when `RUST_LOG` asks for it.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_level = if interactive && log_file.is_none() { "off" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let result = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

fn run_search(args: &SearchArgs) -> Result<()> {
    let transcript = parse_transcript_file(&args.file)?;
    let options = SearchOptions {
        case_sensitive: args.case_sensitive,
        max_results: args.max_results,
        preview_radius: args.radius,
        highlight: !args.no_highlight,
    }
    .validated_or_default();

    let results = search(&transcript, &args.query, &options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&results).context("Failed to serialize results")?;
        println!("{}", json);
        return Ok(());
    }

    if results.is_empty() {
        println!("No messages match '{}'", args.query.trim());
        return Ok(());
    }

    for record in &results {
        println!(
            "#{} {}: {}",
            record.message_index,
            single_line(&record.author),
            single_line(&unescape(&record.preview))
        );
    }
    println!();
    let capped = if results.len() == options.max_results { " (limit reached)" } else { "" };
    println!("{} matches{}", results.len(), capped);

    Ok(())
}

/// Message counts per author, most active first (ties by name)
fn author_counts(transcript: &[Message]) -> Vec<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for message in transcript {
        *counts.entry(message.author.as_str()).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    counts
}

fn show_stats(file: &Path) -> Result<()> {
    let transcript = parse_transcript_file(file)?;

    let user_messages = transcript.iter().filter(|m| m.is_user).count();
    let system_messages = transcript.iter().filter(|m| m.is_system).count();
    let character_messages = transcript.iter().filter(|m| !m.is_user && !m.is_system).count();

    println!("Chat Statistics");
    println!("===============");
    println!("Total messages: {}", transcript.len());
    println!("  User messages: {}", user_messages);
    println!("  Character messages: {}", character_messages);
    println!("  System messages: {}", system_messages);

    let authors = author_counts(&transcript);
    if !authors.is_empty() {
        println!();
        println!("Authors:");
        for (author, count) in authors {
            println!("  {}: {}", single_line(author), count);
        }
    }

    println!();
    println!("Chat file: {}", file.display());
    if let Some(last) = transcript.last() {
        println!("Last floor: {}", last.index);
    }

    Ok(())
}

fn browse(file: &Path, settings: Option<&Path>, floor: Option<&str>) -> Result<()> {
    let transcript = parse_transcript_file(file)?;

    let settings_path = match settings {
        Some(path) => path.to_path_buf(),
        None => default_settings_path()?,
    };
    let store = JsonFileSettingsStore::open(&settings_path)?;
    tracing::info!(
        messages = transcript.len(),
        settings = %settings_path.display(),
        "Starting browser"
    );

    run_browser(transcript, store, Some(file.to_path_buf()), floor)
}
