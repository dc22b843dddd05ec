//! Match evaluation
//!
//! Compares a guess against one catalog entry. Composer and key must match
//! exactly (ignoring case); the title also accepts a partial match under the
//! configured [`NameMatchPolicy`].

use crate::config::NameMatchPolicy;
use crate::models::{CatalogEntry, Guess, MatchOutcome, NameMatch};

/// Word tally of a guess against a reference title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordOverlap {
    /// Guessed words found in the title
    pub correct: usize,
    /// Guessed words not found in the title
    pub wrong: usize,
}

impl WordOverlap {
    /// Count each whitespace-delimited guessed word as correct when it
    /// equals any title word, ignoring case.
    pub fn tally(guess: &str, title: &str) -> Self {
        let title_words: Vec<String> = title.split_whitespace().map(str::to_lowercase).collect();

        guess
            .split_whitespace()
            .fold(Self::default(), |mut tally, word| {
                let word = word.to_lowercase();
                if title_words.iter().any(|t| *t == word) {
                    tally.correct += 1;
                } else {
                    tally.wrong += 1;
                }
                tally
            })
    }

    /// More than twice as many hits as misses, and at most one miss.
    pub fn is_partial_match(&self) -> bool {
        self.correct > 2 * self.wrong && self.wrong <= 1
    }
}

/// Stateless evaluator; the only knob is the partial title policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEvaluator {
    policy: NameMatchPolicy,
}

impl MatchEvaluator {
    pub fn new(policy: NameMatchPolicy) -> Self {
        Self { policy }
    }

    pub fn evaluate(&self, guess: &Guess, entry: &CatalogEntry) -> MatchOutcome {
        MatchOutcome {
            composer: equals_ignore_case(&guess.composer, &entry.composer),
            name: self.name_match(&guess.name, &entry.title),
            key: equals_ignore_case(&guess.key, &entry.key),
        }
    }

    pub fn name_match(&self, guess: &str, title: &str) -> NameMatch {
        if is_blank(guess) {
            return NameMatch::None;
        }
        if equals_ignore_case(guess, title) {
            return NameMatch::Exact;
        }

        let partial = match self.policy {
            NameMatchPolicy::WordOverlap => WordOverlap::tally(guess, title).is_partial_match(),
            NameMatchPolicy::Substring => title.to_lowercase().contains(&guess.to_lowercase()),
        };

        if partial {
            NameMatch::Partial
        } else {
            NameMatch::None
        }
    }
}

/// Case-insensitive equality. Blank input never matches.
fn equals_ignore_case(guess: &str, reference: &str) -> bool {
    !is_blank(guess) && guess.to_lowercase() == reference.to_lowercase()
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
