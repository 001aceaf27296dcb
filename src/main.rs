//! Turn Timer - collect players and their turn lengths, then start the timer
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use turntimer_app::config::{
    init_config_dir, load_settings, merge_overrides, save_settings, FormOverrides, NewEntryTime,
};
use turntimer_core::{Entry, TimeRepresentation};

/// Turn Timer - collect players and their turn lengths, then start the timer
#[derive(Parser, Debug)]
#[command(name = "turntimer")]
#[command(
    about = "Player form and turn timer driven by JSON over stdin/stdout",
    long_about = None
)]
struct Args {
    /// Directory holding .turntimer/config.toml (defaults to the current directory)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Seed the form with a player, as NAME or NAME:TIME (repeatable)
    #[arg(long = "player", value_name = "NAME[:TIME]")]
    players: Vec<String>,

    /// Time given to new players when nothing is inherited
    #[arg(long, value_name = "SECONDS")]
    fallback_time: Option<String>,

    /// Accept any number as a time instead of digits only
    #[arg(long)]
    numeric: bool,

    /// New players get the fallback time instead of copying the last player's
    #[arg(long)]
    reset_time: bool,

    /// Fewest players the form may hold
    #[arg(long, value_name = "N")]
    min_entries: Option<usize>,

    /// Write a default .turntimer/config.toml and exit
    #[arg(long)]
    init: bool,

    /// Persist the effective settings (file plus flags) before starting
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn overrides(&self) -> FormOverrides {
        FormOverrides {
            fallback_time: self.fallback_time.clone(),
            time_representation: self.numeric.then_some(TimeRepresentation::Numeric),
            new_entry_time: self.reset_time.then_some(NewEntryTime::Fallback),
            min_entries: self.min_entries,
        }
    }
}

/// Parse a `NAME[:TIME]` player argument
///
/// The last colon splits name from time, so names may contain colons.
fn parse_player(spec: &str, fallback_time: &str) -> Entry {
    match spec.rsplit_once(':') {
        Some((name, time)) => Entry::new(name, time),
        None => Entry::new(spec, fallback_time),
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    turntimer_core::logging::init()?;

    let args = Args::parse();

    // Get base path from args or use current directory
    let base_path = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init {
        init_config_dir(&base_path)?;
        eprintln!("Config written to {}", base_path.join(".turntimer").display());
        return Ok(());
    }

    let mut settings = load_settings(&base_path);
    merge_overrides(&mut settings, &args.overrides());
    settings.validate()?;

    if args.save_config {
        save_settings(&base_path, &settings)?;
    }

    let players: Vec<Entry> = args
        .players
        .iter()
        .map(|spec| parse_player(spec, &settings.form.fallback_time))
        .collect();
    info!("Seeding form with {} player(s)", players.len());

    turn_timer::run_headless(settings, players).await?;
    Ok(())
}
