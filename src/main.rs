//! CROWdle - CLI
//!
//! Daily word game with TUI and line modes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use crowdle::{
    commands::{build_runtime, run_share, run_simple, run_stats, startup},
    config::{AppConfig, ConfigWarning},
    core::GameDate,
    dictionary::DictionaryLocation,
    interactive::{App, run_tui},
    logging,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "crowdle",
    about = "Guess the daily word from the thesaurus",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Play (or report on) this date instead of today: YYYY-MM-DD
    #[arg(short, long, global = true, value_parser = parse_date)]
    date: Option<GameDate>,

    /// Directory for saved rounds and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Word-of-the-day endpoint
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Word lists: base URL or directory holding allowed-<L>.txt files
    #[arg(short = 'w', long, global = true)]
    dictionary: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line mode without the TUI
    Simple,

    /// Show lifetime statistics and recent days
    Stats,

    /// Print the share text of a finished round
    Share,
}

fn parse_date(value: &str) -> Result<GameDate, String> {
    GameDate::parse(value).map_err(|e| e.to_string())
}

/// Environment first, then command-line flags on top
fn load_config(cli: &Cli) -> (AppConfig, Vec<ConfigWarning>) {
    let (mut config, warnings) = AppConfig::from_env();

    if let Some(date) = cli.date {
        config.date = Some(date);
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(url) = &cli.api_url {
        config.api_url.clone_from(url);
    }
    if let Some(location) = &cli.dictionary {
        config.dictionary = Some(DictionaryLocation::parse(location));
    }

    (config, warnings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, warnings) = load_config(&cli);

    let _log_guard = logging::init(&config.log_dir())?;
    for warning in &warnings {
        tracing::warn!("{warning}");
        eprintln!("⚠ {warning}");
    }
    tracing::debug!(?config, "Configuration loaded");

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(&config),
        Commands::Simple => {
            let runtime = build_runtime()?;
            run_simple(&runtime, &config)
        }
        Commands::Stats => run_stats(&config),
        Commands::Share => run_share(&config),
    }
}

fn run_play_command(config: &AppConfig) -> Result<()> {
    let runtime = build_runtime()?;

    println!("Fetching the word for {}...", config.today());
    let startup = startup::start(&runtime, config, false)?;

    let app = App::new(
        startup.session,
        startup.dictionary,
        config.today(),
        config.share_url.clone(),
    );
    run_tui(app)
}
