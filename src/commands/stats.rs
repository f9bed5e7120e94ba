//! Lifetime statistics report

use super::startup::open_repository;
use crate::config::{AppConfig, HISTORY_DAYS};
use crate::output::print_stats;
use anyhow::Result;
use colored::Colorize;

/// Print lifetime stats, the last week's rounds and any missed days
///
/// # Errors
/// Returns an error if the store cannot be opened.
pub fn run_stats(config: &AppConfig) -> Result<()> {
    let repository = open_repository(config)?;
    let today = config.today();

    let stats = repository.load_stats();
    let history = repository.history(today, HISTORY_DAYS);

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {}",
        "CROWdle statistics".bright_cyan().bold(),
        format!("as of {}", today.short_label()).bright_black()
    );
    println!("{}", "═".repeat(60).cyan());

    print_stats(stats, &history);
    Ok(())
}
