//! Display functions for line-mode play and reports

use super::formatters::{
    KEYBOARD_ROWS, colored_guess, create_progress_bar, display_word, guess_count_label,
    letter_tile,
};
use crate::core::{GameDate, LetterStates};
use crate::feed::WordOfTheDay;
use crate::game::{Game, LifetimeStats, Round};
use crate::storage::History;
use colored::Colorize;

/// Title banner for a round
pub fn print_banner(date: GameDate, length: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "CROWdle".bright_cyan().bold(),
        format!("{} · {length} letters", date.short_label()).bright_yellow()
    );
    println!("{}", "═".repeat(60).cyan());
}

/// The guess grid, padded with empty rows up to the attempt limit
pub fn print_board(game: &Game) {
    println!();
    for (guess, verdicts) in game.scored_guesses() {
        println!("   {}", colored_guess(guess, &verdicts));
    }

    let empty_row = " · ".repeat(game.word_length());
    for _ in game.guesses().len()..game.allowed_attempts() {
        println!("   {}", empty_row.bright_black());
    }
    println!();
}

/// QWERTY keyboard coloured by the best verdict seen for each letter
pub fn print_keyboard(states: &LetterStates) {
    for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
        let keys: String = row
            .chars()
            .map(|c| letter_tile(c, states.get(c)).to_string())
            .collect();
        println!("   {}{keys}", " ".repeat(indent));
    }
    println!();
}

/// End-of-round report: outcome, the word and its definition, stats, history
pub fn print_results(game: &Game, word: &WordOfTheDay, stats: LifetimeStats, history: &History) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    if game.is_won() {
        println!(
            "{}",
            format!(
                "  🎉 Solved in {}!",
                guess_count_label(game.guesses().len())
            )
            .bright_green()
            .bold()
        );
    } else {
        println!("{}", "  Game over".red().bold());
    }
    println!("{}", "═".repeat(60).bright_cyan());

    println!(
        "\n  The word was {}",
        display_word(game.target().text()).bright_yellow().bold()
    );
    match word.definition() {
        Some(definition) => println!("  {}", definition.italic()),
        None => println!("  {}", "No definition is available for this word.".bright_black()),
    }
    println!("  {}", word.term_id.bright_blue().underline());

    print_stats(stats, history);
}

/// Lifetime stats followed by the recent-days overview
pub fn print_stats(stats: LifetimeStats, history: &History) {
    println!("\n📊 {}", "Statistics:".bright_cyan().bold());
    println!("   Played:    {}", stats.games_played);
    println!("   Won:       {}", stats.games_won);
    println!(
        "   Win rate:  [{}] {}",
        create_progress_bar(f64::from(stats.win_rate()), 100.0, 20).green(),
        format!("{}%", stats.win_rate()).bright_yellow()
    );

    print_history(history);
}

fn print_history(history: &History) {
    if !history.recent.is_empty() {
        println!("\n📅 {}", "Recent days:".bright_cyan().bold());
        for round in &history.recent {
            println!("   {}", round_line(round));
        }
    }

    if !history.missed.is_empty() {
        println!("\n⏳ {}", "Missed days:".bright_cyan().bold());
        let labels: Vec<String> = history.missed.iter().map(|d| d.short_label()).collect();
        println!("   {}", labels.join(", "));
        if let Some(oldest) = history.missed.last() {
            println!(
                "   {}",
                format!("Catch up with: crowdle --date {oldest}").bright_black()
            );
        }
    }
    println!();
}

fn round_line(round: &Round) -> String {
    let label = format!("{:<12}", round.date.short_label());
    // Unfinished rounds keep their word hidden
    let shown = if round.finished {
        display_word(&round.word)
    } else {
        "?".repeat(round.word.chars().count())
    };
    let word = format!("{shown:<10}");
    let outcome = if !round.finished {
        "in progress".yellow()
    } else if round.won {
        guess_count_label(round.guesses.len()).green()
    } else {
        "not solved".red()
    };
    format!("{label}{word}{outcome}")
}
