//! `gradepal` — track classes, weighted grades, GPA and assignment due
//! dates from the terminal.
//!
//! # Usage
//!
//! ```text
//! gradepal                        # interactive menu
//! gradepal report --json          # GPA by year and term
//! gradepal upcoming --days 14     # pending work due in the next two weeks
//! gradepal --store ~/grades.db --config ~/.config/gradepal.toml
//! ```

mod settings;
mod console;
mod menu;
mod report;

use std::{io, path::PathBuf};

use anyhow::Context as _;
use chrono::Local;
use clap::{Parser, Subcommand};
use gradepal_core::Gradebook;
use gradepal_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::Settings;
use console::Console;
use menu::Menu;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Grade, GPA and assignment tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "gradepal.toml")]
  config: PathBuf,

  /// SQLite database file; overrides `store_path` from the config.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Run the interactive menu (the default).
  Menu,

  /// Print the GPA of every year and term, then the program GPA.
  Report {
    #[arg(long)]
    json: bool,
  },

  /// List pending assignments due soon, overdue ones included.
  Upcoming {
    /// Look-ahead in days; defaults to `window_days` from the config.
    #[arg(long)]
    days: Option<u32>,

    #[arg(long)]
    json: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr and stay quiet unless RUST_LOG asks otherwise.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)?;
  if let Some(store) = cli.store {
    settings.store_path = store;
  }

  let store_path = settings.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = %store_path.display(), "opened store");

  let book = Gradebook::new(store);
  let mut stdout = io::stdout().lock();

  match cli.command.unwrap_or(Command::Menu) {
    Command::Menu => {
      let console = Console::new(io::stdin().lock(), stdout);
      Menu::new(&book, &settings, console).run().await?;
    }
    Command::Report { json } => {
      let summary = book.gpa_summary().await?;
      if json {
        report::write_gpa_summary_json(&mut stdout, &summary)?;
      } else {
        report::write_gpa_summary(&mut stdout, &summary)?;
      }
    }
    Command::Upcoming { days, json } => {
      let today = Local::now().date_naive();
      let upcoming = book
        .upcoming_assignments(today, settings.window_or(days))
        .await?;
      if json {
        report::write_upcoming_json(&mut stdout, &upcoming)?;
      } else {
        report::write_upcoming(&mut stdout, &upcoming, today)?;
      }
    }
  }

  Ok(())
}
