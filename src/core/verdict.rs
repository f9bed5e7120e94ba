//! Letter-by-letter scoring of a guess against the target
//!
//! Scoring walks the guess left to right and lets each non-exact occurrence
//! of a letter claim one of the target's remaining copies of that letter.
//! Exact matches claim their copy first, wherever they sit in the guess, so a
//! repeated guess letter never earns more `Present`/`Correct` marks than the
//! target has copies.

use super::Word;
use serde::{Deserialize, Serialize};

/// Outcome for one position of a scored guess
///
/// Variants are ordered by priority: `Absent < Present < Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Letter not in the target (or every copy already claimed)
    Absent,
    /// Letter in the target, but elsewhere
    Present,
    /// Letter in this exact position
    Correct,
}

impl Verdict {
    /// Square emoji used in share text
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Score the guess letter at `position` against `target`
///
/// # Panics
/// Panics if `position` is out of range for either word. Callers only score
/// guesses whose length matches the target.
///
/// # Examples
/// ```
/// use crowdle::core::{Verdict, Word, score};
///
/// let target = Word::new("appel").unwrap();
/// let guess = Word::new("peper").unwrap();
///
/// assert_eq!(score(&target, &guess, 0), Verdict::Present);
/// assert_eq!(score(&target, &guess, 1), Verdict::Absent);
/// assert_eq!(score(&target, &guess, 2), Verdict::Correct);
/// ```
#[must_use]
pub fn score(target: &Word, guess: &Word, position: usize) -> Verdict {
    let letter = guess.char_at(position);

    if target.char_at(position) == letter {
        return Verdict::Correct;
    }

    let total_in_word = target.count_of(letter);
    if total_in_word == 0 {
        return Verdict::Absent;
    }

    let correct_matches = guess
        .chars()
        .iter()
        .zip(target.chars())
        .filter(|&(&g, &t)| g == letter && t == letter)
        .count();

    let present_before = guess.chars()[..position]
        .iter()
        .zip(target.chars())
        .filter(|&(&g, &t)| g == letter && t != letter)
        .count();

    if correct_matches + present_before < total_in_word {
        Verdict::Present
    } else {
        Verdict::Absent
    }
}

/// Score every position of `guess` against `target`
///
/// # Panics
/// Panics if the guess is longer than the target.
#[must_use]
pub fn score_all(target: &Word, guess: &Word) -> Vec<Verdict> {
    (0..guess.len())
        .map(|position| score(target, guess, position))
        .collect()
}

/// Render a verdict row as emoji squares, e.g. "🟨⬜🟩🟩⬜"
#[must_use]
pub fn verdicts_to_emoji(verdicts: &[Verdict]) -> String {
    verdicts.iter().map(|v| v.emoji()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rustc_hash::FxHashMap;
    use super::Verdict::{Absent, Correct, Present};

    fn scored(target: &str, guess: &str) -> Vec<Verdict> {
        score_all(&Word::new(target).unwrap(), &Word::new(guess).unwrap())
    }

    #[test]
    fn verdict_priority_order() {
        assert!(Correct > Present);
        assert!(Present > Absent);
        assert_eq!([Present, Correct, Absent].iter().max(), Some(&Correct));
    }

    #[test]
    fn all_absent() {
        assert_eq!(scored("brug", "kmix"), vec![Absent; 4]);
    }

    #[test]
    fn all_correct() {
        assert_eq!(scored("appel", "appel"), vec![Correct; 5]);
    }

    #[test]
    fn repeated_target_letter_scored_by_claims() {
        // A P P E L vs P E P E R
        // P: two copies in the target, one claimed by the exact match at 2,
        //    so the P at 0 takes the remaining copy -> present
        // E: single copy, claimed by the exact match at 3 -> absent at 1
        assert_eq!(
            scored("appel", "peper"),
            vec![Present, Absent, Correct, Correct, Absent]
        );
    }

    #[test]
    fn repeated_guess_letter_single_target_copy() {
        // S A L E T has one E; only the first E in the guess claims it
        assert_eq!(
            scored("salet", "eerie"),
            vec![Present, Absent, Absent, Absent, Absent]
        );
    }

    #[test]
    fn repeated_guess_letter_exact_match_wins_the_copy() {
        // A B O U T has one O at 2; the exact match claims it
        assert_eq!(
            scored("about", "ooooo"),
            vec![Absent, Absent, Correct, Absent, Absent]
        );
    }

    #[test]
    fn exact_match_later_in_guess_still_claims_first() {
        // K A N O has one A; the A at 1 is exact, so the A at 0 gets nothing
        assert_eq!(scored("kano", "aaxx"), vec![Absent, Correct, Absent, Absent]);
    }

    #[test]
    fn ligature_scored_as_one_glyph() {
        // ĳ S B E R vs ĳ Z E R S (after normalization)
        assert_eq!(
            scored("ijsber", "ijzers"),
            vec![Correct, Absent, Present, Present, Present]
        );
    }

    #[test]
    fn single_position_matches_score_all() {
        let target = Word::new("appel").unwrap();
        let guess = Word::new("pppll").unwrap();
        let all = score_all(&target, &guess);
        for (position, verdict) in all.iter().enumerate() {
            assert_eq!(score(&target, &guess, position), *verdict);
        }
    }

    #[test]
    fn emoji_rendering() {
        assert_eq!(
            verdicts_to_emoji(&[Present, Absent, Correct, Correct, Absent]),
            "🟨⬜🟩🟩⬜"
        );
    }

    fn pair_strategy() -> impl Strategy<Value = (String, String)> {
        (1usize..=8).prop_flat_map(|len| {
            (
                proptest::collection::vec(proptest::char::range('a', 'd'), len),
                proptest::collection::vec(proptest::char::range('a', 'd'), len),
            )
                .prop_map(|(t, g)| (t.into_iter().collect(), g.into_iter().collect()))
        })
    }

    proptest! {
        #[test]
        fn correct_count_equals_exact_matches((target, guess) in pair_strategy()) {
            let verdicts = scored(&target, &guess);
            let exact = target.chars().zip(guess.chars()).filter(|(t, g)| t == g).count();
            let correct = verdicts.iter().filter(|&&v| v == Correct).count();
            prop_assert_eq!(correct, exact);
        }

        #[test]
        fn marks_per_letter_never_exceed_target_copies((target, guess) in pair_strategy()) {
            let verdicts = scored(&target, &guess);
            let target_word = Word::new(&target).unwrap();
            let guess_word = Word::new(&guess).unwrap();

            let mut marked: FxHashMap<char, usize> = FxHashMap::default();
            for (letter, verdict) in guess.chars().zip(&verdicts) {
                if *verdict != Absent {
                    *marked.entry(letter).or_default() += 1;
                }
            }

            for (letter, count) in marked {
                prop_assert!(count <= target_word.count_of(letter));
                prop_assert_eq!(
                    count,
                    target_word.count_of(letter).min(guess_word.count_of(letter))
                );
            }
        }

        #[test]
        fn scoring_same_word_is_all_correct((target, _guess) in pair_strategy()) {
            prop_assert!(scored(&target, &target).iter().all(|&v| v == Correct));
        }
    }
}
