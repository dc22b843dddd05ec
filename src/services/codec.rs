//! Score codec
//!
//! Packs a [`MatchOutcome`] into a short token for the `results` query
//! parameter of the post-submit redirect, and unpacks it again on the
//! result page. Not tamper-proof: the token only ever drives display.
//!
//! Format: comma-separated fragments `c` (composer correct), `n<digit>`
//! (name level, always present in canonical output) and `k` (key correct),
//! e.g. `c,n2,k` or `n0`.

use crate::models::{MatchOutcome, NameMatch};

const COMPOSER: &str = "c";
const KEY: &str = "k";
const NAME_PREFIX: char = 'n';

/// Canonical token: composer, name, key.
pub fn encode(outcome: &MatchOutcome) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if outcome.composer {
        parts.push(COMPOSER.to_string());
    }
    parts.push(format!("{}{}", NAME_PREFIX, outcome.name.level()));
    if outcome.key {
        parts.push(KEY.to_string());
    }
    parts.join(",")
}

/// Lenient decode; never fails.
///
/// Fragments may come in any order. Unknown fragments and name levels
/// outside 0-2 are ignored, absent ones keep their zero value, and when a
/// name fragment repeats the last valid one wins.
pub fn decode(token: &str) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    for fragment in token.split(',').map(str::trim) {
        match fragment {
            "" => {}
            COMPOSER => outcome.composer = true,
            KEY => outcome.key = true,
            _ => {
                if let Some(level) = parse_name_level(fragment) {
                    outcome.name = level;
                }
            }
        }
    }
    outcome
}

fn parse_name_level(fragment: &str) -> Option<NameMatch> {
    let digits = fragment.strip_prefix(NAME_PREFIX)?;
    if digits.len() != 1 {
        return None;
    }
    digits.parse::<u8>().ok().and_then(NameMatch::from_level)
}
