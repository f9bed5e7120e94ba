//! Best-verdict-per-letter aggregate shown on the keyboard

use super::{Verdict, Word};
use rustc_hash::FxHashMap;

/// Best verdict seen so far for each letter in the round
///
/// Merging never downgrades: `Correct` sticks, and `Present` never falls
/// back to `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterStates {
    states: FxHashMap<char, Verdict>,
}

impl LetterStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a single observation, keeping the higher-priority verdict
    pub fn merge(&mut self, letter: char, verdict: Verdict) {
        self.states
            .entry(letter)
            .and_modify(|current| *current = (*current).max(verdict))
            .or_insert(verdict);
    }

    /// Merge a whole scored guess
    pub fn merge_guess(&mut self, guess: &Word, verdicts: &[Verdict]) {
        for (&letter, &verdict) in guess.chars().iter().zip(verdicts) {
            self.merge(letter, verdict);
        }
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<Verdict> {
        self.states.get(&letter).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::score_all;
    use proptest::prelude::*;

    #[test]
    fn merge_keeps_best() {
        let mut states = LetterStates::new();
        states.merge('a', Verdict::Absent);
        assert_eq!(states.get('a'), Some(Verdict::Absent));

        states.merge('a', Verdict::Present);
        assert_eq!(states.get('a'), Some(Verdict::Present));

        states.merge('a', Verdict::Absent);
        assert_eq!(states.get('a'), Some(Verdict::Present));

        states.merge('a', Verdict::Correct);
        states.merge('a', Verdict::Present);
        states.merge('a', Verdict::Absent);
        assert_eq!(states.get('a'), Some(Verdict::Correct));
    }

    #[test]
    fn merge_guess_handles_repeated_letters() {
        // Within one guess P is both present and correct; correct must win
        let target = Word::new("appel").unwrap();
        let guess = Word::new("peper").unwrap();
        let mut states = LetterStates::new();
        states.merge_guess(&guess, &score_all(&target, &guess));

        assert_eq!(states.get('p'), Some(Verdict::Correct));
        assert_eq!(states.get('e'), Some(Verdict::Correct));
        assert_eq!(states.get('r'), Some(Verdict::Absent));
        assert_eq!(states.get('z'), None);
        assert_eq!(states.len(), 3);
    }

    fn word_strategy(len: usize) -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::char::range('a', 'e'), len)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn no_downgrade_over_any_guess_sequence(
            target in word_strategy(5),
            guesses in proptest::collection::vec(word_strategy(5), 1..10),
        ) {
            let target = Word::new(&target).unwrap();
            let mut states = LetterStates::new();

            for guess in &guesses {
                let before = states.clone();
                let guess = Word::new(guess).unwrap();
                states.merge_guess(&guess, &score_all(&target, &guess));

                for letter in 'a'..='e' {
                    if let Some(verdict) = before.get(letter) {
                        prop_assert!(states.get(letter).unwrap() >= verdict);
                    }
                }
            }
        }
    }
}
