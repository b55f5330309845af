//! Candidate scoring
//!
//! Scores are in [0, 1]. A candidate below the confidence threshold scores 0.

use rapidfuzz::fuzz;

use super::homophones::{normalize, HomophoneTable};
use super::location::WordLocation;

/// Scores candidates against normalized target subwords.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    homophones: &'a HomophoneTable,
    confidence_threshold: f64,
}

impl<'a> Scorer<'a> {
    pub fn new(homophones: &'a HomophoneTable, confidence_threshold: f64) -> Self {
        Self {
            homophones,
            confidence_threshold,
        }
    }

    /// Per-pair ratios below this count as no match at all.
    ///
    /// Half the threshold, so a weak token inside a multi-word candidate can
    /// still contribute to the aggregate.
    fn similarity_floor(&self) -> f64 {
        self.confidence_threshold / 2.0
    }

    /// Score a candidate run against the target subwords.
    ///
    /// A single-subword candidate is compared against all targets joined
    /// together, which finds targets OCR merged into one token. Longer
    /// candidates are paired 1:1 with the targets and averaged, weighted by
    /// target length.
    pub fn score_words(&self, candidates: &[WordLocation], normalized_targets: &[String]) -> f64 {
        self.score_words_with(candidates, normalized_targets, |text, target| {
            self.score_word(text, target)
        })
    }

    /// Best ratio between a candidate text and any homophone of the target.
    pub fn score_word(&self, candidate_text: &str, normalized_target: &str) -> f64 {
        let candidate = normalize(candidate_text);
        let floor = self.similarity_floor();
        self.homophones
            .expand(normalized_target)
            .into_iter()
            .map(|homophone| floored_ratio(homophone, &candidate, floor))
            .fold(0.0, f64::max)
    }

    /// `score_word` without the length-bound shortcut.
    pub fn score_word_naive(&self, candidate_text: &str, normalized_target: &str) -> f64 {
        let candidate = normalize(candidate_text);
        let floor = self.similarity_floor();
        self.homophones
            .expand(normalized_target)
            .into_iter()
            .map(|homophone| {
                let ratio = indel_ratio(homophone, &candidate);
                if ratio >= floor {
                    ratio
                } else {
                    0.0
                }
            })
            .fold(0.0, f64::max)
    }

    /// `score_words` built on `score_word_naive`.
    pub fn score_words_naive(
        &self,
        candidates: &[WordLocation],
        normalized_targets: &[String],
    ) -> f64 {
        self.score_words_with(candidates, normalized_targets, |text, target| {
            self.score_word_naive(text, target)
        })
    }

    fn score_words_with<F>(
        &self,
        candidates: &[WordLocation],
        normalized_targets: &[String],
        score_word: F,
    ) -> f64
    where
        F: Fn(&str, &str) -> f64,
    {
        let score = match candidates {
            [] => 0.0,
            [candidate] => score_word(&candidate.text, &normalized_targets.concat()),
            _ => {
                debug_assert_eq!(candidates.len(), normalized_targets.len());
                let mut weighted = 0.0;
                let mut total_weight = 0.0;
                for (candidate, target) in candidates.iter().zip(normalized_targets) {
                    let weight = target.chars().count() as f64;
                    weighted += score_word(&candidate.text, target) * weight;
                    total_weight += weight;
                }
                if total_weight > 0.0 {
                    weighted / total_weight
                } else {
                    0.0
                }
            }
        };

        if score >= self.confidence_threshold {
            score
        } else {
            0.0
        }
    }
}

/// Indel similarity: `1 - (insertions + deletions) / (len_a + len_b)`.
fn indel_ratio(a: &str, b: &str) -> f64 {
    fuzz::ratio(a.chars(), b.chars())
}

/// Indel similarity, or 0 when below `floor`.
///
/// Skips the comparison when the lengths alone rule out reaching the floor:
/// at least the length difference has to be inserted or deleted.
fn floored_ratio(a: &str, b: &str, floor: f64) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let total = a_len + b_len;
    if total > 0 {
        let difference = a_len.max(b_len) - a_len.min(b_len);
        let upper_bound = 1.0 - difference as f64 / total as f64;
        // Margin keeps rounding in the library's arithmetic from mattering
        if upper_bound + 1e-9 < floor {
            return 0.0;
        }
    }

    let ratio = indel_ratio(a, b);
    if ratio >= floor {
        ratio
    } else {
        0.0
    }
}
