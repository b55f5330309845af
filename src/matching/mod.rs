//! Fuzzy phrase location
//!
//! Finds a word or phrase in an OCR result despite misreads, homophones and
//! words OCR split or glued together, and picks the occurrence closest to a
//! reference point.

pub mod candidates;
pub mod contents;
pub mod homophones;
pub mod location;
pub mod scoring;
pub mod subword;

pub use candidates::{generate_candidates, Candidate, Candidates};
pub use contents::ScreenContents;
pub use homophones::{normalize, HomophoneTable, DEFAULT_HOMOPHONES};
pub use location::{Anchor, Point, WordLocation};
pub use scoring::Scorer;
pub use subword::{subwords, Subword};

use std::sync::Arc;
use tracing::debug;

use crate::error::{LocateError, LocateResult};
use crate::vision::OcrResult;

/// Default minimum score for a match
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;

/// A best-scoring candidate and its distance to the reference point
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub score: f64,
    /// Squared distance from the candidate's center to the reference point
    pub distance_squared: f64,
    pub words: Vec<WordLocation>,
}

/// Outcome of a single-word lookup
#[derive(Debug, Clone, PartialEq)]
pub enum WordMatch {
    /// The best match is exactly one subword
    Single(WordLocation),
    /// No single anchor: the best match spans several subwords, or several
    /// best matches are equally near the reference point
    Ambiguous(Vec<WordLocation>),
    NoMatch,
}

impl WordMatch {
    pub fn location(&self) -> Option<&WordLocation> {
        match self {
            WordMatch::Single(location) => Some(location),
            _ => None,
        }
    }
}

/// Split a target phrase into normalized subwords.
pub fn normalized_targets(target: &str) -> LocateResult<Vec<String>> {
    let targets: Vec<String> = target
        .split_whitespace()
        .flat_map(subwords)
        .map(|subword| normalize(subword.text))
        .collect();

    if targets.is_empty() {
        return Err(LocateError::EmptyTarget);
    }
    Ok(targets)
}

fn distance_squared(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let x_dist = x1 - x2;
    let y_dist = y1 - y2;
    x_dist * x_dist + y_dist * y_dist
}

/// Locates phrases in OCR results.
///
/// Holds no per-query state; one matcher can serve any number of queries,
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    confidence_threshold: f64,
    homophones: Arc<HomophoneTable>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            homophones: Arc::new(HomophoneTable::default()),
        }
    }
}

impl Matcher {
    /// Create a matcher; the threshold must be in (0, 1].
    pub fn new(confidence_threshold: f64, homophones: Arc<HomophoneTable>) -> LocateResult<Self> {
        if !(confidence_threshold > 0.0 && confidence_threshold <= 1.0) {
            return Err(LocateError::InvalidThreshold(confidence_threshold));
        }
        Ok(Self {
            confidence_threshold,
            homophones,
        })
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn homophones(&self) -> &Arc<HomophoneTable> {
        &self.homophones
    }

    /// All candidates tied for the best score, nearest to `reference` first.
    ///
    /// Candidates at equal distance keep their line-then-left-to-right order.
    pub fn find_matches(
        &self,
        result: &OcrResult,
        target: &str,
        reference: Point,
    ) -> LocateResult<Vec<ScoredMatch>> {
        let targets = normalized_targets(target)?;
        let scorer = Scorer::new(&self.homophones, self.confidence_threshold);

        let mut best_score = 0.0;
        let mut best: Vec<Candidate> = Vec::new();
        let mut scored = 0usize;

        for candidate in generate_candidates(result, targets.len()) {
            scored += 1;
            let score = scorer.score_words(&candidate, &targets);
            if score == 0.0 || score < best_score {
                continue;
            }
            if score > best_score {
                best_score = score;
                best.clear();
            }
            best.push(candidate);
        }

        let (ref_x, ref_y) = (f64::from(reference.x), f64::from(reference.y));
        let mut matches: Vec<ScoredMatch> = best
            .into_iter()
            .map(|candidate| {
                let first = &candidate[0];
                let last = &candidate[candidate.len() - 1];
                let right = f64::from(last.left) + f64::from(last.width);
                let bottom = f64::from(last.top) + f64::from(last.height);
                let center_x = (f64::from(first.left) + right) / 2.0;
                let center_y = (f64::from(first.top) + bottom) / 2.0;
                ScoredMatch {
                    score: best_score,
                    distance_squared: distance_squared(center_x, center_y, ref_x, ref_y),
                    words: candidate.into_vec(),
                }
            })
            .collect();
        matches.sort_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared));

        debug!(
            "Target {:?}: {} subwords, {} candidates scored, {} tied at {:.3}",
            target,
            targets.len(),
            scored,
            matches.len(),
            best_score
        );

        Ok(matches)
    }

    /// The best-scoring run of subwords nearest to `reference`, if any.
    pub fn find_nearest_words(
        &self,
        result: &OcrResult,
        target: &str,
        reference: Point,
    ) -> LocateResult<Option<Vec<WordLocation>>> {
        Ok(self
            .find_matches(result, target, reference)?
            .into_iter()
            .next()
            .map(|m| m.words))
    }

    /// Like `find_nearest_words`, but the match has to be a single subword
    /// with no other best match equally near.
    pub fn find_nearest_word(
        &self,
        result: &OcrResult,
        target: &str,
        reference: Point,
    ) -> LocateResult<WordMatch> {
        let matches = self.find_matches(result, target, reference)?;
        let Some(nearest) = matches.first() else {
            return Ok(WordMatch::NoMatch);
        };

        let tied: Vec<&ScoredMatch> = matches
            .iter()
            .take_while(|m| m.distance_squared == nearest.distance_squared)
            .collect();

        Ok(match tied.as_slice() {
            [only] if only.words.len() == 1 => WordMatch::Single(only.words[0].clone()),
            _ => {
                let words: Vec<WordLocation> =
                    tied.iter().flat_map(|m| m.words.iter().cloned()).collect();
                debug!(
                    "Target {:?}: {} equally near matches over {} subwords, no single anchor",
                    target,
                    tied.len(),
                    words.len()
                );
                WordMatch::Ambiguous(words)
            }
        })
    }

    /// Cursor coordinates of the nearest single-word match.
    pub fn find_nearest_word_coordinates(
        &self,
        result: &OcrResult,
        target: &str,
        reference: Point,
        anchor: Anchor,
    ) -> LocateResult<Option<Point>> {
        Ok(self
            .find_nearest_word(result, target, reference)?
            .location()
            .map(|location| location.coordinates(anchor)))
    }
}
