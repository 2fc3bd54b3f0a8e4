//! Text normalization and partial-match scoring.
//!
//! Normalization:
//! - Lowercases
//! - Replaces every non-alphanumeric character with a space
//! - Collapses whitespace runs and trims
//!
//! Scoring aligns the shorter normalized string against every window of the
//! longer one and keeps the best normalized Levenshtein similarity.

use strsim::normalized_levenshtein;

/// Highest score `partial_ratio` can return.
pub const MAX_SCORE: f64 = 1.0;

/// Normalize text for comparison.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    replaced
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Best similarity (0.0 - 1.0) of the shorter string against any
/// equal-length window of the longer one. Inputs are compared as given.
///
/// Returns 0.0 when either side is empty, so blank text never matches.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() || b_chars.is_empty() {
        return 0.0;
    }

    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a, &b_chars)
    } else {
        (b, &a_chars)
    };
    let width = short.chars().count();

    let mut best = 0.0_f64;
    for window in long.windows(width) {
        let candidate: String = window.iter().collect();
        let score = normalized_levenshtein(short, &candidate);
        if score > best {
            best = score;
            if best >= MAX_SCORE {
                break;
            }
        }
    }

    best
}

/// Check whether a score is the maximum achievable.
pub fn is_full_match(score: f64) -> bool {
    score >= MAX_SCORE
}
