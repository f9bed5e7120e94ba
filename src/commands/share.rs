//! Print the share text of a finished round

use super::startup::open_repository;
use crate::config::AppConfig;
use crate::core::GameDate;
use crate::game::Game;
use crate::output::share_text;
use crate::storage::{GameRepository, KeyValueStore};
use anyhow::{Context, Result, bail};

/// Share text for the finished round stored for `date`
///
/// # Errors
/// Returns an error if no round is stored for the date, the round is still
/// in progress, or the stored round is corrupt.
pub fn share_for_date<S: KeyValueStore>(
    repository: &GameRepository<S>,
    date: GameDate,
    share_url: Option<&str>,
) -> Result<String> {
    let Some(round) = repository.load_round(date) else {
        bail!("No round was played on {date}");
    };
    if !round.finished {
        bail!("The round for {date} is not finished yet");
    }

    let game = Game::restore(&round, None)
        .with_context(|| format!("Stored round for {date} is unreadable"))?;
    Ok(share_text(&game, share_url))
}

/// Print the share text for the configured date
///
/// # Errors
/// Returns an error if the store cannot be opened or the round cannot be shared.
pub fn run_share(config: &AppConfig) -> Result<()> {
    let repository = open_repository(config)?;
    let text = share_for_date(&repository, config.today(), config.share_url.as_deref())?;
    println!("{text}");
    Ok(())
}
