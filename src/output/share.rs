//! Shareable result text
//!
//! ```text
//! CROWdle 2025-03-03
//!
//! 🟨⬜🟩🟩⬜
//! 🟩🟩🟩🟩🟩
//!
//! 2/6
//!
//! https://example.org/play/?date=2025-03-03Z
//! ```

use crate::core::verdicts_to_emoji;
use crate::game::Game;

/// Share text for a game: one emoji row per guess, the score, and a link
/// back to the same date when a share URL is configured
#[must_use]
pub fn share_text(game: &Game, share_url: Option<&str>) -> String {
    let mut text = format!("CROWdle {}\n\n", game.date());

    for (_, verdicts) in game.scored_guesses() {
        text.push_str(&verdicts_to_emoji(&verdicts));
        text.push('\n');
    }

    text.push_str(&format!(
        "\n{}/{}",
        game.guesses().len(),
        game.allowed_attempts()
    ));

    if let Some(url) = share_url {
        text.push_str(&format!("\n\n{}", date_link(url, game)));
    }

    text
}

fn date_link(url: &str, game: &Game) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}date={}", game.date().to_xsd())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameDate, Word};

    fn game_with(target: &str, guesses: &[&str]) -> Game {
        let date = GameDate::parse("2025-03-03").unwrap();
        let mut game = Game::new(date, Word::new(target).unwrap(), None);
        for guess in guesses {
            game.submit_guess(guess);
        }
        game
    }

    #[test]
    fn grid_and_score() {
        let game = game_with("appel", &["peper", "appel"]);
        let text = share_text(&game, None);

        assert_eq!(
            text,
            "CROWdle 2025-03-03\n\n🟨⬜🟩🟩⬜\n🟩🟩🟩🟩🟩\n\n2/6"
        );
    }

    #[test]
    fn link_carries_date() {
        let game = game_with("appel", &["appel"]);
        let text = share_text(&game, Some("https://example.org/play/"));
        assert!(text.ends_with("\n\nhttps://example.org/play/?date=2025-03-03Z"));
    }

    #[test]
    fn score_uses_bonus_limit() {
        let misses = ["peren", "bloem", "fiets", "kraan", "stoel", "tafel", "water"];
        let game = game_with("appel", &misses);
        assert!(share_text(&game, None).ends_with("7/7"));
    }
}
