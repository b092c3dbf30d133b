//! CLI interface for taskboard.
//!
//! The binary stands in for the UI layer: it replays a session of UI events
//! against a fresh in-memory store and renders the grid or calendar when
//! asked. Nothing is written back anywhere; the store lives only as long as
//! the session.

mod format;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use taskboard::config::Config;
use taskboard::model::Filter;
use taskboard::session::{Outcome, Session, read_events};

use format::{calendar_json, format_calendar, format_grid, grid_json};

/// taskboard: track work items, their status, and when they happen.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, after_long_help = SESSION_HELP)]
pub struct Cli {
    /// Config file to use instead of `~/.taskboard/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const SESSION_HELP: &str = r#"Session format: one JSON event per line
  {"event":"add","title":"Design","description":"Wireframes","assignee":"Alice","startDate":"2024-03-01","endDate":"2024-03-05"}
  {"event":"changeStatus","item":"Design","status":"in-progress"}
  {"event":"setFilter","filter":"in-progress"}
  {"event":"list"}
  {"event":"calendar","date":"2024-03-03"}

Items are referenced by full id, exact title, or unambiguous id prefix.
Lines starting with # are comments."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a session of events and print what it asks to see.
    ///
    /// Reads JSON Lines from FILE, or stdin when FILE is omitted or `-`.
    /// Rejected events are reported on stderr and the session continues.
    /// A malformed line stops the session.
    Run {
        /// Session file.
        file: Option<PathBuf>,

        /// Print grids and calendars as JSON.
        #[arg(long)]
        json: bool,

        /// Initial filter, overriding `default-filter` from config
        /// (all, not-started, in-progress, completed).
        #[arg(long)]
        filter: Option<Filter>,
    },

    /// Print the resolved configuration as TOML.
    Config,
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config)?;

    match cli.command {
        Command::Run { file, json, filter } => {
            if let Some(filter) = filter {
                config.default_filter = filter;
            }
            cmd_run(config, file, json)
        }
        Command::Config => cmd_config(&config),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config, String> {
    let config = match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    };
    config.map_err(|e| e.to_string())
}

fn open_session_input(file: Option<PathBuf>) -> Result<Box<dyn BufRead>, String> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(&path)
                .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Counts of events a replay applied and rejected.
#[derive(Debug, Default, PartialEq, Eq)]
struct Replay {
    applied: usize,
    rejected: usize,
}

fn cmd_run(config: Config, file: Option<PathBuf>, json: bool) -> Result<(), String> {
    let input = open_session_input(file)?;
    let mut session = Session::new(config);

    let Replay { applied, rejected } = replay(&mut session, input, json)?;

    info!(
        applied,
        rejected,
        items = session.store().len(),
        "session finished"
    );
    Ok(())
}

/// Apply every event in `input` to `session`, rendering each outcome.
///
/// Rejected events are reported on stderr and counted; a malformed line or a
/// read failure stops the replay with the line number.
fn replay<R: BufRead>(session: &mut Session, input: R, json: bool) -> Result<Replay, String> {
    let mut counts = Replay::default();

    for event in read_events(input) {
        let (line, event) = event.map_err(|e| e.to_string())?;

        match session.apply(event) {
            Ok(outcome) => {
                counts.applied += 1;
                render(&outcome, json)?;
            }
            Err(e) if e.is_recoverable() => {
                counts.rejected += 1;
                warn!(line, error = %e, "event rejected");
                eprintln!("line {line}: {e}");
            }
            Err(e) => return Err(format!("line {line}: {e}")),
        }
    }

    Ok(counts)
}

/// Print an outcome. Grids and calendars go to stdout; confirmations go to
/// stderr so stdout stays a clean view.
fn render(outcome: &Outcome<'_>, json: bool) -> Result<(), String> {
    match outcome {
        Outcome::Added(item) => {
            eprintln!("Added {}  {}", item.id().short(), item.title());
        }
        Outcome::Updated(item) => {
            eprintln!(
                "Updated {}  [{}] {}",
                item.id().short(),
                item.status().label(),
                item.progress()
            );
        }
        Outcome::FilterSet(filter) => {
            eprintln!("Filter: {filter}");
        }
        Outcome::Grid(items) => {
            if json {
                print_json(&grid_json(items))?;
            } else {
                println!("{}", format_grid(items));
            }
        }
        Outcome::Calendar { month, days } => {
            if json {
                print_json(&calendar_json(*month, days))?;
            } else {
                println!("{}", format_calendar(*month, days));
            }
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_config(config: &Config) -> Result<(), String> {
    let text = toml::to_string(config).map_err(|e| format!("failed to serialize config: {e}"))?;
    print!("{text}");
    Ok(())
}
