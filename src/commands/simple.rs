//! Simple line-mode play
//!
//! Text-based game without the TUI: type a guess, press enter.

use super::startup::{self, Startup};
use crate::config::{AppConfig, HISTORY_DAYS};
use crate::game::SubmitOutcome;
use crate::output::{print_banner, print_board, print_keyboard, print_results, share_text};
use crate::session::Session;
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use tokio::runtime::Runtime;

/// Run the line-mode game for the configured date
///
/// # Errors
///
/// Returns an error if the word of the day cannot be loaded or there's an
/// I/O error reading user input.
pub fn run_simple(runtime: &Runtime, config: &AppConfig) -> Result<()> {
    let Startup {
        mut session,
        mut dictionary,
    } = startup::start(runtime, config, true)?;

    print_banner(session.date(), session.game().word_length());

    if session.is_finished() {
        println!("\nYou already played this day.");
        finish(&session, config);
        return Ok(());
    }

    println!("\nGuess the word. Letters are coloured after each guess:");
    println!("  {} right letter, right spot", " A ".black().on_green().bold());
    println!("  {} in the word, other spot", " A ".black().on_yellow().bold());
    println!("  {} not in the word", " A ".white().on_bright_black());
    println!("Type \"ij\" for the Ĳ. Commands: ':q' to quit\n");

    loop {
        print_board(session.game());
        print_keyboard(session.game().letter_states());

        let prompt = format!(
            "Guess {} of {}",
            session.game().guesses().len() + 1,
            session.game().allowed_attempts()
        );
        let Some(input) = get_user_input(&prompt)? else {
            println!("\n👋 Your progress is saved.\n");
            return Ok(());
        };

        match input.as_str() {
            "" => continue,
            ":q" | ":quit" => {
                println!("\n👋 Your progress is saved.\n");
                return Ok(());
            }
            _ => {}
        }

        if let Some(loader) = dictionary.as_mut() {
            loader.drain(&mut session);
            if loader.retry() {
                println!("{}", "⚠ Word list unavailable, loading it again.".yellow());
            }
        }

        let submission = session.submit_guess(&input);
        if submission.save_failed {
            println!(
                "{}",
                "⚠ Progress could not be saved; playing on without saving.".yellow()
            );
        }

        match &submission.outcome {
            SubmitOutcome::Rejected(reason) => println!("{}", format!("❌ {reason}").red()),
            SubmitOutcome::BonusUnlocked { hint, .. } => {
                let mut notice = "🍀 One bonus attempt!".to_string();
                if let Some(hint) = hint {
                    notice.push_str(&format!(" Hint: {hint}."));
                }
                println!("{}", notice.bright_magenta().bold());
            }
            SubmitOutcome::Scored { .. } | SubmitOutcome::Finished { .. } => {}
        }

        if session.is_finished() {
            print_board(session.game());
            finish(&session, config);
            return Ok(());
        }
    }
}

fn finish<S: KeyValueStore>(session: &Session<S>, config: &AppConfig) {
    let history = session
        .repository()
        .history(config.today(), HISTORY_DAYS);
    print_results(session.game(), session.word(), session.stats(), &history);

    println!("{}", "Share your result:".bright_cyan().bold());
    println!("{}\n", share_text(session.game(), config.share_url.as_deref()));
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
