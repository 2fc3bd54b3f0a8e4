//! Code matcher resolving free-text clinical mentions to candidate codes.
//!
//! Only full-confidence partial matches are accepted. A near match is
//! treated as no match: an unrecorded mention is preferable to a wrong code.

mod scoring;

pub use scoring::*;

use crate::models::CandidateCode;

/// A line that resolved to a candidate code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMatch {
    /// Position of the line in the input
    pub line_index: usize,
    /// Position of the winning candidate
    pub candidate_index: usize,
    /// The winning candidate's code
    pub code: String,
}

/// Matcher over a fixed candidate list.
pub struct CodeMatcher<'a> {
    candidates: &'a [CandidateCode],
    /// Normalized candidate labels, parallel to `candidates`
    labels: Vec<String>,
}

impl<'a> CodeMatcher<'a> {
    /// Create a matcher. Candidate labels are normalized once up front.
    pub fn new(candidates: &'a [CandidateCode]) -> Self {
        Self {
            candidates,
            labels: candidates.iter().map(|c| normalize(&c.text)).collect(),
        }
    }

    /// Best-scoring candidate for `text` as `(candidate_index, score)`.
    ///
    /// Ties keep the earliest candidate. `None` only when there are no
    /// candidates.
    pub fn best_candidate(&self, text: &str) -> Option<(usize, f64)> {
        let query = normalize(text);
        let mut best: Option<(usize, f64)> = None;

        for (index, label) in self.labels.iter().enumerate() {
            let score = partial_ratio(&query, label);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        best
    }

    /// Resolve one line, accepting only a full-confidence match.
    pub fn match_text(&self, text: &str) -> Option<&'a CandidateCode> {
        self.best_candidate(text)
            .filter(|(_, score)| is_full_match(*score))
            .map(|(index, _)| &self.candidates[index])
    }

    /// Resolve every line, in line order. Unmatched lines are skipped.
    pub fn match_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<CodeMatch> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(line_index, line)| {
                let (candidate_index, score) = self.best_candidate(line.as_ref())?;
                is_full_match(score).then(|| CodeMatch {
                    line_index,
                    candidate_index,
                    code: self.candidates[candidate_index].code.clone(),
                })
            })
            .collect()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
